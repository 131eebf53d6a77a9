//! Interface header generator.

use log::debug;
use serde::Serialize;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::InterfaceConfig;
use crate::errors::{GenerateError, GenerateResult};
use crate::scanner::extract;
use crate::signature::Signature;

const SECTION_PROLOGUE: &str = "The common interface for";
const SECTION_TABLE_INDEX: &str = "The index mapping table of exported functions.";
const SECTION_TABLE_NAME: &str = "The name mapping table of exported functions.";
const SECTION_TABLE_PTR: &str = "The function pointer types of exported functions.";

/// Outcome of writing the interface header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    /// The destination was created or replaced.
    Written,
    /// The destination already held the generated text and was left alone.
    Unchanged,
    /// Check mode only: the destination is missing or differs.
    Stale,
}

/// Summary of one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub interface_name: String,
    pub signatures: Vec<Signature>,
    pub status: GenerationStatus,
}

/// Builder for configuring and running the interface generator.
pub struct InterfaceGenerator {
    source_header: PathBuf,
    output_file: PathBuf,
    config: InterfaceConfig,
    check_only: bool,
}

impl InterfaceGenerator {
    /// Create a generator reading `source_header` and writing `output_file`.
    pub fn new(source_header: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            source_header: source_header.into(),
            output_file: output_file.into(),
            config: InterfaceConfig::default(),
            check_only: false,
        }
    }

    /// Replace the formatting configuration.
    ///
    /// Default: [`InterfaceConfig::default`]
    pub fn config(mut self, config: InterfaceConfig) -> Self {
        self.config = config;
        self
    }

    /// Compare against the existing output instead of writing it.
    pub fn check_only(mut self, check_only: bool) -> Self {
        self.check_only = check_only;
        self
    }

    /// Run the generator.
    ///
    /// Scans the source header, renders the interface, and writes it unless
    /// the destination already holds identical text.
    pub fn run(self) -> GenerateResult<GenerationReport> {
        let signatures = extract(&self.source_header, &self.config)?;
        let interface_name = interface_name_from_path(&self.output_file);
        let code = render(&signatures, &interface_name, &self.config);

        // Only write if content has changed
        let up_to_date = match fs::read(&self.output_file) {
            Ok(existing) => existing == code.as_bytes(),
            Err(_) => false,
        };

        let status = if up_to_date {
            GenerationStatus::Unchanged
        } else if self.check_only {
            GenerationStatus::Stale
        } else {
            write_output(&self.output_file, &code)?;
            GenerationStatus::Written
        };
        debug!("{}: {:?}", self.output_file.display(), status);

        Ok(GenerationReport {
            source: self.source_header,
            destination: self.output_file,
            interface_name,
            signatures,
            status,
        })
    }
}

/// Render the interface for `signatures` and write it to `output_path`.
///
/// The interface name comes from the file name of `output_path`. The parent
/// directory must already exist.
pub fn emit(signatures: &[Signature], output_path: &Path, config: &InterfaceConfig) -> GenerateResult<()> {
    let interface_name = interface_name_from_path(output_path);
    let code = render(signatures, &interface_name, config);
    write_output(output_path, &code)
}

fn write_output(path: &Path, code: &str) -> GenerateResult<()> {
    fs::write(path, code).map_err(|source| GenerateError::DestinationUnwritable {
        path: path.to_path_buf(),
        source,
    })
}

/// Render the full interface header.
///
/// Sections are written in a fixed order: guard and banner, index table,
/// name table, pointer types, closing guard.
pub fn render(signatures: &[Signature], interface_name: &str, config: &InterfaceConfig) -> String {
    let mut content = String::new();
    put_prologue(&mut content, interface_name, config);
    put_index_table(&mut content, signatures, config);
    put_name_table(&mut content, signatures, config);
    put_pointer_table(&mut content, signatures, config);
    put_epilogue(&mut content);
    content
}

/// Base name of the output file without its extension.
pub fn interface_name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Include-guard token for an interface, e.g. `plugin_api` -> `_PLUGIN_API_H_`.
pub fn include_guard(interface_name: &str) -> String {
    format!("_{}_H_", sanitize_identifier(interface_name).to_ascii_uppercase())
}

/// Replace every character that cannot appear in a C identifier with `_`.
fn sanitize_identifier(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// The three lines of the comment box around the interface title.
///
/// Both borders are exactly as wide as the title, whatever the name length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Banner {
    pub top: String,
    pub title: String,
    pub bottom: String,
}

impl Banner {
    pub(crate) fn new(interface_name: &str, config: &InterfaceConfig) -> Self {
        let style = config.banner;
        let vertical = style.vertical;
        let indent = &config.indent;

        let title = format!(" {vertical}{indent}{SECTION_PROLOGUE} \"{interface_name}\"{indent}{vertical}");
        let rule_len = title.chars().count().saturating_sub(3);
        let rule = style.horizontal.to_string();

        let top = format!("{}{vertical}{}{vertical}", style.corner, rule.repeat(rule_len));
        let bottom = format!(
            " {vertical}{}{vertical}{}",
            rule.repeat(rule_len.saturating_sub(1)),
            style.corner
        );

        Self { top, title, bottom }
    }
}

fn put_prologue(content: &mut String, interface_name: &str, config: &InterfaceConfig) {
    let guard = include_guard(interface_name);
    let _ = writeln!(content, "#ifndef {guard}");
    let _ = writeln!(content, "#define {guard}");
    let _ = writeln!(content);

    let banner = Banner::new(interface_name, config);
    let _ = writeln!(content, "{}", banner.top);
    let _ = writeln!(content, "{}", banner.title);
    let _ = writeln!(content, "{}", banner.bottom);
    let _ = writeln!(content);
    let _ = writeln!(content);
}

fn put_index_table(content: &mut String, signatures: &[Signature], config: &InterfaceConfig) {
    let indent = &config.indent;

    let _ = writeln!(content, "/* {SECTION_TABLE_INDEX} */");
    let _ = writeln!(content, "enum {{");
    for signature in signatures {
        let _ = writeln!(content, "{indent}{}_{},", config.index_prefix, signature.upper_name());
    }
    let _ = writeln!(content, "{indent}{}", config.count_sentinel);
    let _ = writeln!(content, "}};");
    let _ = writeln!(content);
    let _ = writeln!(content);
}

fn put_name_table(content: &mut String, signatures: &[Signature], config: &InterfaceConfig) {
    let _ = writeln!(content, "/* {SECTION_TABLE_NAME} */");

    let opening = format!("#define {} ((char const *[]) {{", config.name_table_ident);
    let padding = " ".repeat(opening.chars().count());

    if signatures.is_empty() {
        let _ = writeln!(content, "{opening} }})");
    }

    let last = signatures.len().saturating_sub(1);
    for (index, signature) in signatures.iter().enumerate() {
        let lead = if index == 0 { opening.as_str() } else { padding.as_str() };
        if index < last {
            let _ = writeln!(content, "{lead} \"{}\", \\", signature.name());
        } else {
            let _ = writeln!(content, "{lead} \"{}\" }})", signature.name());
        }
    }

    let _ = writeln!(content);
    let _ = writeln!(content);
}

fn put_pointer_table(content: &mut String, signatures: &[Signature], config: &InterfaceConfig) {
    let _ = writeln!(content, "/* {SECTION_TABLE_PTR} */");
    for signature in signatures {
        let _ = writeln!(
            content,
            "typedef {} (*{}_{}) ({});",
            signature.return_and_qualifiers(),
            config.pointer_prefix,
            signature.upper_name(),
            signature.parameters()
        );
    }
    let _ = writeln!(content);
    let _ = writeln!(content);
}

fn put_epilogue(content: &mut String) {
    let _ = writeln!(content, "#endif");
}
