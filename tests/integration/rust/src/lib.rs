//! Integration test suite for Corten Lint
//!
//! Scenarios that cross component boundaries: lexer through scope
//! tracker and diagnostics sink, and config file through the CLI runner
//! and reporters.

/// Re-export components for test convenience
pub mod components {
    pub use core_types;
    pub use lint_cli;
    pub use linter;
}

use linter::{analyze, Analysis, EsVersion, KnownGlobals, LintConfig};

/// Configuration for a given edition with `undef` on.
pub fn undef_config(esversion: EsVersion) -> LintConfig {
    let mut config = LintConfig::with_esversion(esversion);
    config.undef = true;
    config
}

/// Lint with no predefined globals.
pub fn lint(source: &str, config: &LintConfig) -> Analysis {
    analyze(source, config, &KnownGlobals::new())
}

/// `(code, line, column)` for every diagnostic.
pub fn located(analysis: &Analysis) -> Vec<(&'static str, u32, u32)> {
    analysis
        .diagnostics
        .iter()
        .map(|d| (d.code, d.line, d.column))
        .collect()
}
