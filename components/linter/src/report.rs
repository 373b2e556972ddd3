//! Analysis results.

use serde::Serialize;

use crate::diagnostics::Diagnostic;
use crate::error::Halt;

/// A global used without declaration and not predefined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImpliedGlobal {
    /// Variable name
    pub name: String,
    /// Lines of every use, in order of first appearance
    pub lines: Vec<u32>,
}

/// A declared but never used binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnusedBinding {
    /// Binding name
    pub name: String,
    /// Declaration kind (`var`, `let`, `param`, ...)
    pub kind: &'static str,
    /// Declaration line
    pub line: u32,
    /// Declaration column
    pub column: u32,
    /// Enclosing function name, or `(main)`
    pub scope: String,
}

/// Binding facts gathered over the whole program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BindingsSummary {
    /// Implied globals in order of first use
    pub implied_globals: Vec<ImpliedGlobal>,
    /// Names declared in the global scope, in declaration order
    pub declared_globals: Vec<String>,
    /// Unused bindings in scope-close order
    pub unused: Vec<UnusedBinding>,
    /// Names marked exported by directive or `export`
    pub exported: Vec<String>,
}

/// Result of analyzing one source text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Diagnostics in emission order
    pub diagnostics: Vec<Diagnostic>,
    /// Binding summary
    pub summary: BindingsSummary,
    /// Why analysis stopped early, if it did
    pub halted: Option<Halt>,
}

impl Analysis {
    /// True if any error-severity diagnostic was reported.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Number of error-severity diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Diagnostic codes in order, for quick assertions.
    pub fn codes(&self) -> Vec<&'static str> {
        self.diagnostics.iter().map(|d| d.code).collect()
    }
}
