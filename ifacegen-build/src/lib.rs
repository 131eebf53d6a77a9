//! Interface generator for C plugin headers.
//!
//! This crate scans a C header for the block of declarations that follows an
//! export marker (by default `#ifdef BUILD_PLUGIN`) and generates a companion
//! header containing:
//!
//! - an `enum` giving every exported function a stable index,
//! - a name table macro parallel to that enum,
//! - one function-pointer `typedef` per function.
//!
//! # Example
//!
//! In your `build.rs`:
//!
//! ```ignore
//! fn main() {
//!     ifacegen_build::generate_interface("src/heap.h", "src/heap_api.h")
//!         .run()
//!         .expect("Failed to generate heap_api.h");
//!
//!     println!("cargo:rerun-if-changed=src/heap.h");
//! }
//! ```

mod config;
mod errors;
mod generator;
mod grammar;
mod scanner;
mod signature;

pub use config::{BannerStyle, CONFIG_FILE_NAME, InterfaceConfig};
pub use errors::{GenerateError, GenerateResult};
pub use generator::{
    GenerationReport, GenerationStatus, InterfaceGenerator, emit, include_guard, interface_name_from_path, render,
};
pub use grammar::DeclarationGrammar;
pub use scanner::{extract, extract_from_str};
pub use signature::Signature;

use std::path::PathBuf;

/// Create a generator for `source_header` -> `output_file` with default settings.
///
/// # Example
///
/// ```ignore
/// let report = ifacegen_build::generate_interface("heap.h", "heap_api.h")
///     .check_only(true)
///     .run()?;
/// ```
pub fn generate_interface(source_header: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> InterfaceGenerator {
    InterfaceGenerator::new(source_header, output_file)
}
