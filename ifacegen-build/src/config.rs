//! Formatting configuration shared by the scanner and the generator.

use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{GenerateError, GenerateResult};

/// File name searched for when no config path is given explicitly.
pub const CONFIG_FILE_NAME: &str = "ifacegen.toml";

/// Every constant the scanner and generator depend on.
///
/// Build one per run and hand it out by reference; neither component
/// mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterfaceConfig {
    /// Line that opens the export block.
    #[serde(default = "default_export_marker")]
    pub export_marker: String,
    /// Prefix of the enum constants (`FUNC` gives `FUNC_<NAME>`).
    #[serde(default = "default_index_prefix")]
    pub index_prefix: String,
    /// Final enum entry holding the number of exported functions.
    #[serde(default = "default_count_sentinel")]
    pub count_sentinel: String,
    /// Prefix of the function-pointer typedefs (`FPTR` gives `FPTR_<NAME>`).
    #[serde(default = "default_pointer_prefix")]
    pub pointer_prefix: String,
    /// Macro bound to the name table.
    #[serde(default = "default_name_table_ident")]
    pub name_table_ident: String,
    /// Indentation used inside the banner title and the enum body.
    #[serde(default = "default_indent")]
    pub indent: String,
    #[serde(default)]
    pub banner: BannerStyle,
}

/// Glyphs of the comment box around the interface title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BannerStyle {
    #[serde(default = "default_horizontal")]
    pub horizontal: char,
    #[serde(default = "default_vertical")]
    pub vertical: char,
    #[serde(default = "default_corner")]
    pub corner: char,
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            export_marker: default_export_marker(),
            index_prefix: default_index_prefix(),
            count_sentinel: default_count_sentinel(),
            pointer_prefix: default_pointer_prefix(),
            name_table_ident: default_name_table_ident(),
            indent: default_indent(),
            banner: BannerStyle::default(),
        }
    }
}

impl Default for BannerStyle {
    fn default() -> Self {
        Self {
            horizontal: default_horizontal(),
            vertical: default_vertical(),
            corner: default_corner(),
        }
    }
}

fn default_export_marker() -> String {
    "#ifdef BUILD_PLUGIN".to_string()
}

fn default_index_prefix() -> String {
    "FUNC".to_string()
}

fn default_count_sentinel() -> String {
    "NUM_FUNCS".to_string()
}

fn default_pointer_prefix() -> String {
    "FPTR".to_string()
}

fn default_name_table_ident() -> String {
    "gTableFuncName".to_string()
}

fn default_indent() -> String {
    "    ".to_string()
}

fn default_horizontal() -> char {
    '-'
}

fn default_vertical() -> char {
    '*'
}

fn default_corner() -> char {
    '/'
}

impl InterfaceConfig {
    /// Parse a configuration from TOML text. `origin` is only used in errors.
    pub fn from_toml_str(content: &str, origin: &Path) -> GenerateResult<Self> {
        toml::from_str(content).map_err(|source| GenerateError::InvalidConfig {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> GenerateResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| GenerateError::ConfigUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content, path)?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Look for `ifacegen.toml` in `start` and each of its ancestors.
    ///
    /// Returns the path of the first file found together with its parsed
    /// contents, or `None` when no directory up to the root has one.
    pub fn discover(start: &Path) -> GenerateResult<Option<(PathBuf, Self)>> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                return Ok(Some((candidate, config)));
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }
}
