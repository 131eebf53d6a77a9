//! Source header scanner for collecting exported function signatures.

use log::{debug, trace};
use std::fs;
use std::path::Path;

use crate::config::InterfaceConfig;
use crate::errors::{GenerateError, GenerateResult};
use crate::grammar::DeclarationGrammar;
use crate::signature::Signature;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Looking for the export marker.
    Seeking,
    /// Past the marker; every remaining line is a candidate declaration.
    Collecting,
}

/// Read a header file and collect the signatures of its export block.
pub fn extract(source_path: &Path, config: &InterfaceConfig) -> GenerateResult<Vec<Signature>> {
    let bytes = fs::read(source_path).map_err(|source| GenerateError::SourceUnreadable {
        path: source_path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8_lossy(&bytes);

    let signatures = extract_from_str(&content, config);
    debug!(
        "extracted {} signature(s) from {}",
        signatures.len(),
        source_path.display()
    );
    Ok(signatures)
}

/// Collect the signatures that follow the export marker in `text`.
///
/// Only the first marker opens a block, and the block runs to the end of the
/// text. Lines the grammar does not accept are skipped. Without a marker the
/// result is empty.
pub fn extract_from_str(text: &str, config: &InterfaceConfig) -> Vec<Signature> {
    let grammar = DeclarationGrammar::new();
    let mut state = ScanState::Seeking;
    let mut signatures = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        match state {
            ScanState::Seeking => {
                if line == config.export_marker {
                    debug!("export marker found on line {line_number}");
                    state = ScanState::Collecting;
                }
            }
            ScanState::Collecting => match grammar.parse(line) {
                Some(signature) => signatures.push(signature),
                None => trace!("line {line_number} skipped: {line:?}"),
            },
        }
    }

    if state == ScanState::Seeking {
        debug!("export marker {:?} not found", config.export_marker);
    }

    signatures
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(signatures: &[Signature]) -> Vec<&str> {
        signatures.iter().map(Signature::name).collect()
    }

    fn scan(text: &str) -> Vec<Signature> {
        extract_from_str(text, &InterfaceConfig::default())
    }

    #[test]
    fn test_collects_in_source_order() {
        let text = "\
#ifndef _HEAP_H_
#define _HEAP_H_
#ifdef BUILD_PLUGIN
int Foo(int a, int b);
void Bar(void);
unsigned long size();
#endif
#endif
";
        let signatures = scan(text);
        assert_eq!(names(&signatures), vec!["Foo", "Bar", "size"]);
        assert_eq!(signatures[0].parameters(), "int a, int b");
        assert_eq!(signatures[2].return_and_qualifiers(), "unsigned long");
    }

    #[test]
    fn test_declarations_before_marker_are_ignored() {
        let text = "\
int Early(void);
#ifdef BUILD_PLUGIN
int Late(void);
";
        assert_eq!(names(&scan(text)), vec!["Late"]);
    }

    #[test]
    fn test_no_marker_yields_nothing() {
        let text = "int Foo(int a, int b);\nvoid Bar(void);\n";
        assert!(scan(text).is_empty());
        assert!(scan("").is_empty());
    }

    #[test]
    fn test_unmatched_lines_are_skipped_silently() {
        let text = "\
#ifdef BUILD_PLUGIN
/* Create the heap. */
bool init();

int broken(int a)
int split(int a,
          int b);
void fill(int buf[16]);
void deinit();
";
        assert_eq!(names(&scan(text)), vec!["init", "deinit"]);
    }

    #[test]
    fn test_marker_must_match_exactly() {
        assert!(scan("  #ifdef BUILD_PLUGIN\nint Foo(void);\n").is_empty());
        assert!(scan("#ifdef BUILD_PLUGIN_EXTRA\nint Foo(void);\n").is_empty());
    }

    #[test]
    fn test_only_first_block_is_recognized() {
        let text = "\
#ifdef BUILD_PLUGIN
int A(void);
#endif
int B(void);
#ifdef BUILD_PLUGIN
int C(void);
";
        // Once collecting, everything to end of file is a candidate.
        assert_eq!(names(&scan(text)), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "#ifdef BUILD_PLUGIN\r\nint Foo(int a);\r\nvoid Bar(void);\r\n";
        assert_eq!(names(&scan(text)), vec!["Foo", "Bar"]);
    }

    #[test]
    fn test_custom_marker() {
        let config = InterfaceConfig {
            export_marker: "#if defined(EXPORTS)".to_string(),
            ..Default::default()
        };
        let text = "#ifdef BUILD_PLUGIN\nint A(void);\n#if defined(EXPORTS)\nint B(void);\n";
        assert_eq!(names(&extract_from_str(text, &config)), vec!["B"]);
    }
}
