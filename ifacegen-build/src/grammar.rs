//! The single-line declaration grammar recognized inside the export block.
//!
//! A declaration is accepted only when it fits on one line and uses the
//! narrow token sets below:
//!
//! ```text
//! <return/qualifiers> <name>(<parameters>);
//! ```
//!
//! Anything else (split prototypes, array brackets, varargs, default values)
//! does not match and is left for the scanner to skip.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::signature::Signature;

/// Characters allowed in the return type and qualifier run.
pub const RETURN_TOKENS: &str = "A-Za-z0-9_* ";
/// Characters allowed in the function name.
pub const NAME_TOKENS: &str = "A-Za-z0-9_";
/// Characters allowed between the parameter parentheses.
pub const PARAMETER_TOKENS: &str = "A-Za-z0-9_ ,*()";

const GROUP_RETURN: &str = "ret";
const GROUP_NAME: &str = "name";
const GROUP_PARAMETERS: &str = "params";

static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"^(?P<{GROUP_RETURN}>[{RETURN_TOKENS}]+) (?P<{GROUP_NAME}>[{NAME_TOKENS}]+)\((?P<{GROUP_PARAMETERS}>[{PARAMETER_TOKENS}]*)\);"
    );
    Regex::new(&pattern).expect("declaration grammar is a valid regex")
});

/// Compiled form of the declaration grammar.
#[derive(Debug, Clone)]
pub struct DeclarationGrammar {
    pattern: Regex,
}

impl DeclarationGrammar {
    pub fn new() -> Self {
        Self {
            pattern: DECLARATION.clone(),
        }
    }

    /// Whether `line` is a declaration this grammar accepts.
    pub fn matches(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }

    /// Split an accepted line into a [`Signature`]; `None` for any other line.
    ///
    /// Text after the terminating `;` is ignored.
    pub fn parse(&self, line: &str) -> Option<Signature> {
        let captures = self.pattern.captures(line)?;
        Some(Signature::new(
            group(&captures, GROUP_RETURN),
            group(&captures, GROUP_NAME),
            group(&captures, GROUP_PARAMETERS),
        ))
    }
}

impl Default for DeclarationGrammar {
    fn default() -> Self {
        Self::new()
    }
}

fn group<'a>(captures: &Captures<'a>, name: &str) -> &'a str {
    captures.name(name).map_or("", |m| m.as_str())
}
