//! User-facing diagnostics
//!
//! Every lifecycle call collects warnings and errors into a [`Diagnostics`]
//! list instead of failing on the first problem. Any error-severity entry
//! blocks the operation; warnings are reported and the operation proceeds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single diagnostic attached to a lifecycle call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    /// Attribute the diagnostic refers to, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        };
        match &self.attribute {
            Some(attr) => write!(f, "{}: {} ({}): {}", label, self.summary, attr, self.detail),
            None => write!(f, "{}: {}: {}", label, self.summary, self.detail),
        }
    }
}

/// Ordered collection of diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error that blocks the current operation
    pub fn add_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Severity::Error, summary.into(), detail.into(), None);
    }

    /// Records an error tied to a specific attribute
    pub fn add_attribute_error(
        &mut self,
        attribute: &str,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) {
        self.push(
            Severity::Error,
            summary.into(),
            detail.into(),
            Some(attribute.to_string()),
        );
    }

    /// Records a non-fatal warning
    pub fn add_warning(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Severity::Warning, summary.into(), detail.into(), None);
    }

    /// Records a non-fatal warning tied to a specific attribute
    pub fn add_attribute_warning(
        &mut self,
        attribute: &str,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) {
        self.push(
            Severity::Warning,
            summary.into(),
            detail.into(),
            Some(attribute.to_string()),
        );
    }

    fn push(&mut self, severity: Severity, summary: String, detail: String, attribute: Option<String>) {
        self.entries.push(Diagnostic {
            severity,
            summary,
            detail,
            attribute,
        });
    }

    pub fn has_error(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn has_warning(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when any diagnostic's summary or detail contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.entries
            .iter()
            .any(|d| d.summary.contains(needle) || d.detail.contains(needle))
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_do_not_block() {
        let mut diags = Diagnostics::new();
        diags.add_warning("Suboptimal RSA key size", "use more bits");
        assert!(!diags.has_error());
        assert!(diags.has_warning());

        diags.add_attribute_error("use", "Invalid attribute value for 'use'", "got 'x'");
        assert!(diags.has_error());
        assert_eq!(diags.errors().count(), 1);
        assert_eq!(diags.len(), 2);
        assert!(diags.contains("Invalid attribute value"));
    }

    #[test]
    fn display_includes_attribute() {
        let mut diags = Diagnostics::new();
        diags.add_attribute_error("size", "Invalid attribute value for 'size'", "too small");
        let rendered = diags.iter().next().map(|d| d.to_string()).unwrap();
        assert_eq!(
            rendered,
            "Error: Invalid attribute value for 'size' (size): too small"
        );
    }
}
