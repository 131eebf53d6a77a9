use serde::Serialize;

/// One exported function declaration, split into the three captured parts.
///
/// The text of each part is kept exactly as it appeared in the source header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signature {
    return_and_qualifiers: String,
    name: String,
    parameters: String,
}

impl Signature {
    pub fn new(
        return_and_qualifiers: impl Into<String>,
        name: impl Into<String>,
        parameters: impl Into<String>,
    ) -> Self {
        Self {
            return_and_qualifiers: return_and_qualifiers.into(),
            name: name.into(),
            parameters: parameters.into(),
        }
    }

    /// Return type plus any qualifiers (e.g. `static inline int *`).
    pub fn return_and_qualifiers(&self) -> &str {
        &self.return_and_qualifiers
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter list without the surrounding parentheses.
    pub fn parameters(&self) -> &str {
        &self.parameters
    }

    /// Name as used in generated identifiers (`Foo` becomes `FOO`).
    pub fn upper_name(&self) -> String {
        self.name.to_ascii_uppercase()
    }
}
