use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort an interface generation run.
///
/// Lines the declaration grammar does not recognize are never reported here;
/// the scanner drops them silently.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The source header is missing or could not be read.
    #[error("cannot read source header {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The destination header could not be created or written.
    #[error("cannot write interface header {}: {source}", path.display())]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A configuration file exists but could not be read.
    #[error("cannot read config file {}: {source}", path.display())]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A configuration file was read but is not valid.
    #[error("invalid config file {}: {source}", path.display())]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Convenience alias used throughout the generator.
pub type GenerateResult<T> = Result<T, GenerateError>;
