//! Diagnostic severity levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a reported issue is.
///
/// Severity is derived from the first letter of a diagnostic code: `E` codes
/// are errors, `W` codes are warnings and `I` codes are informational.
///
/// # Examples
///
/// ```
/// use core_types::Severity;
///
/// assert_eq!(Severity::from_code("E011"), Severity::Error);
/// assert_eq!(Severity::from_code("W117"), Severity::Warning);
/// assert!(Severity::Error > Severity::Warning);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational note
    Info,
    /// Style or likely-bug warning
    Warning,
    /// Syntax or binding error
    Error,
}

impl Severity {
    /// Severity implied by a diagnostic code prefix.
    pub fn from_code(code: &str) -> Self {
        match code.as_bytes().first() {
            Some(b'E') => Severity::Error,
            Some(b'I') => Severity::Info,
            _ => Severity::Warning,
        }
    }

    /// Lowercase label used by reporters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_from_code() {
        assert_eq!(Severity::from_code("E043"), Severity::Error);
        assert_eq!(Severity::from_code("W033"), Severity::Warning);
        assert_eq!(Severity::from_code("I003"), Severity::Info);
        assert_eq!(Severity::from_code(""), Severity::Warning);
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Error).unwrap();
        assert_eq!(json, "\"error\"");
    }
}
