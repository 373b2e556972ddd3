//! JavaScript Linter Core
//!
//! Static analysis for JavaScript source text in the JSHint tradition:
//! a lexer, a Pratt parser that validates syntax without building a tree,
//! a scope tracker for binding and usage analysis, and a diagnostics sink
//! with suppression and error limits.
//!
//! # Overview
//!
//! - [`analyze`] - Lint one source text and collect the results
//! - [`LintConfig`] - Options and enforcing switches
//! - [`Analysis`] - Diagnostics, binding summary and halt reason
//! - [`Lexer`] - Standalone tokenizer
//!
//! # Example
//!
//! ```
//! use linter::{analyze, KnownGlobals, LintConfig};
//!
//! let mut config = LintConfig::default();
//! config.undef = true;
//! let analysis = analyze("x = 1;", &config, &KnownGlobals::new());
//!
//! assert_eq!(analysis.codes(), vec!["W117"]);
//! assert_eq!(analysis.summary.implied_globals[0].name, "x");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod diagnostics;
pub mod directives;
pub mod error;
pub mod globals;
pub mod lexer;
pub mod messages;
mod parser;
pub mod report;
pub mod scope;
pub mod stack;
pub mod symbols;
pub mod token;
pub mod unicode;

pub use config::{EsVersion, LintConfig, ShadowMode, StrictMode, UnusedMode};
pub use diagnostics::{Diagnostic, DiagnosticSink};
pub use error::{Halt, ParseResult};
pub use globals::KnownGlobals;
pub use lexer::Lexer;
pub use report::{Analysis, BindingsSummary, ImpliedGlobal, UnusedBinding};
pub use token::{Token, TokenKind};

use core_types::SourcePosition;

/// Lint `source` and return every diagnostic plus the binding summary.
///
/// Never fails: syntax errors become diagnostics, and unrecoverable ones
/// set [`Analysis::halted`].
pub fn analyze(source: &str, config: &LintConfig, known: &KnownGlobals) -> Analysis {
    tracing::debug!(bytes = source.len(), esversion = config.esversion.number(), "analyze");
    parser::Parser::new(source, config, known).run()
}

/// Lint raw bytes. Input that is not UTF-8 yields a single E004.
pub fn analyze_bytes(bytes: &[u8], config: &LintConfig, known: &KnownGlobals) -> Analysis {
    match std::str::from_utf8(bytes) {
        Ok(source) => analyze(source, config, known),
        Err(err) => {
            tracing::debug!(valid_up_to = err.valid_up_to(), "source is not UTF-8");
            let mut sink = DiagnosticSink::new(config.maxerr, 1, config.disabled.iter().cloned());
            let halted = sink.report("E004", SourcePosition::START, Vec::new(), scope::MAIN).err();
            Analysis {
                diagnostics: sink.finish(),
                summary: BindingsSummary::default(),
                halted,
            }
        }
    }
}
