//! Diagnostic collection.
//!
//! Features:
//! - Error limit with a single terminal "Too many errors." entry
//! - Deduplication by code and position
//! - Code suppression from configuration and `-W###` directive ranges
//! - `ignore:start`/`ignore:end` regions and `ignore:line` markers

use core_types::{Severity, SourcePosition};
use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::debug;

use crate::error::{Halt, ParseResult};
use crate::messages;

/// Code of the terminal diagnostic appended when the error limit is hit.
pub const TOO_MANY_ERRORS: &str = "E043";
/// Code of the terminal diagnostic for unrecoverable syntax errors.
pub const UNRECOVERABLE: &str = "E041";
/// Code of the terminal diagnostic for excessive nesting.
pub const TOO_DEEP: &str = "E073";

/// A reported problem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Stable code such as `W117`
    pub code: &'static str,
    /// Severity derived from the code
    pub severity: Severity,
    /// Message template before formatting
    pub raw: &'static str,
    /// Formatted message
    pub message: String,
    /// Template arguments
    pub args: Vec<String>,
    /// 1-based line
    pub line: u32,
    /// 1-based column
    pub column: u32,
    /// Byte offset
    pub offset: usize,
    /// Name of the enclosing function, or `(main)`
    pub scope: String,
}

impl Diagnostic {
    /// Build a diagnostic from the catalog.
    pub fn new(code: &'static str, pos: SourcePosition, args: Vec<String>, scope: &str) -> Self {
        let raw = messages::template(code).unwrap_or("{a}");
        Self {
            code,
            severity: Severity::from_code(code),
            raw,
            message: messages::format(raw, &args),
            args,
            line: pos.line,
            column: pos.column,
            offset: pos.offset,
            scope: scope.to_string(),
        }
    }

    /// True for error-severity diagnostics.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// A `-W###`/`+W###` directive taking effect from `line` on.
#[derive(Debug, Clone)]
struct CodeToggle {
    code: String,
    line: u32,
    enabled: bool,
}

/// Append-only diagnostic sink for one analysis.
#[derive(Debug)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
    seen: FxHashSet<(&'static str, u32, u32)>,
    maxerr: usize,
    total_lines: u32,
    disabled: FxHashSet<String>,
    toggles: Vec<CodeToggle>,
    ignore_regions: Vec<(u32, Option<u32>)>,
    ignore_lines: FxHashSet<u32>,
    terminal: Option<usize>,
}

impl DiagnosticSink {
    /// Create a sink. A `maxerr` of zero disables the limit.
    pub fn new(maxerr: usize, total_lines: u32, disabled: impl IntoIterator<Item = String>) -> Self {
        Self {
            diagnostics: Vec::new(),
            seen: FxHashSet::default(),
            maxerr,
            total_lines: total_lines.max(1),
            disabled: disabled.into_iter().collect(),
            toggles: Vec::new(),
            ignore_regions: Vec::new(),
            ignore_lines: FxHashSet::default(),
            terminal: None,
        }
    }

    /// Number of accepted diagnostics, the terminal one included.
    pub fn count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Diagnostics accepted so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// True once a terminal diagnostic has been appended.
    pub fn is_halted(&self) -> bool {
        self.terminal.is_some()
    }

    /// Change the error limit (for `/* jshint maxerr:N */`).
    pub fn set_maxerr(&mut self, maxerr: usize) {
        self.maxerr = maxerr;
    }

    /// Report a diagnostic.
    ///
    /// Filtered and duplicate diagnostics are dropped silently. When an
    /// accepted diagnostic brings the count to the limit, the terminal
    /// "Too many errors." entry is appended and [`Halt::TooManyErrors`]
    /// returned.
    pub fn report(
        &mut self,
        code: &'static str,
        pos: SourcePosition,
        args: Vec<String>,
        scope: &str,
    ) -> ParseResult<()> {
        if self.terminal.is_some() || self.is_suppressed(code, pos.line) {
            return Ok(());
        }
        if !self.seen.insert((code, pos.line, pos.column)) {
            return Ok(());
        }

        self.diagnostics.push(Diagnostic::new(code, pos, args, scope));

        if self.maxerr > 0 && self.diagnostics.len() >= self.maxerr {
            debug!(count = self.diagnostics.len(), "error limit reached");
            self.terminate(TOO_MANY_ERRORS, pos, scope);
            return Err(Halt::TooManyErrors);
        }
        Ok(())
    }

    /// Append the single terminal diagnostic, bypassing all filters.
    ///
    /// The message gets a "(N% scanned)." suffix computed from `pos`.
    pub fn terminate(&mut self, code: &'static str, pos: SourcePosition, scope: &str) {
        if self.terminal.is_some() {
            return;
        }
        let percent = (u64::from(pos.line) * 100 / u64::from(self.total_lines)).min(100);
        let mut diagnostic = Diagnostic::new(code, pos, Vec::new(), scope);
        diagnostic.message = format!("{} ({}% scanned).", diagnostic.message, percent);
        self.terminal = Some(self.diagnostics.len());
        self.diagnostics.push(diagnostic);
    }

    /// Disable or re-enable a code from `line` on.
    pub fn toggle_code(&mut self, code: String, line: u32, enabled: bool) {
        self.toggles.push(CodeToggle {
            code,
            line,
            enabled,
        });
    }

    /// Start an `ignore:start` region.
    pub fn begin_ignore(&mut self, line: u32) {
        if self.ignore_regions.last().is_some_and(|(_, end)| end.is_none()) {
            return;
        }
        self.ignore_regions.push((line, None));
    }

    /// Close the open `ignore:start` region.
    pub fn end_ignore(&mut self, line: u32) {
        if let Some((_, end @ None)) = self.ignore_regions.last_mut() {
            *end = Some(line);
        }
    }

    /// Drop every diagnostic on `line`, including ones already reported.
    pub fn ignore_line(&mut self, line: u32) {
        self.ignore_lines.insert(line);
    }

    fn is_suppressed(&self, code: &str, line: u32) -> bool {
        let in_region = self
            .ignore_regions
            .iter()
            .any(|&(start, end)| line >= start && end.map_or(true, |end| line <= end));
        if in_region {
            return true;
        }
        match self
            .toggles
            .iter()
            .rev()
            .find(|toggle| toggle.code == code && toggle.line <= line)
        {
            Some(toggle) => !toggle.enabled,
            None => self.disabled.contains(code),
        }
    }

    /// Final diagnostic list in emission order.
    pub fn finish(self) -> Vec<Diagnostic> {
        let terminal = self.terminal;
        let ignore_lines = self.ignore_lines;
        self.diagnostics
            .into_iter()
            .enumerate()
            .filter(|(index, diagnostic)| {
                Some(*index) == terminal || !ignore_lines.contains(&diagnostic.line)
            })
            .map(|(_, diagnostic)| diagnostic)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line: u32, column: u32) -> SourcePosition {
        SourcePosition::new(line, column, 0)
    }

    fn args(a: &str) -> Vec<String> {
        vec![a.to_string()]
    }

    #[test]
    fn test_report_formats_message() {
        let mut sink = DiagnosticSink::new(50, 10, Vec::new());
        sink.report("W117", at(1, 1), args("foo"), "(main)").unwrap();
        let diagnostics = sink.finish();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "'foo' is not defined.");
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert_eq!(diagnostics[0].raw, "'{a}' is not defined.");
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let mut sink = DiagnosticSink::new(50, 10, Vec::new());
        sink.report("W033", at(2, 5), Vec::new(), "(main)").unwrap();
        sink.report("W033", at(2, 5), Vec::new(), "(main)").unwrap();
        sink.report("W033", at(3, 5), Vec::new(), "(main)").unwrap();
        assert_eq!(sink.count(), 2);
    }

    #[test]
    fn test_limit_appends_single_terminal() {
        let mut sink = DiagnosticSink::new(2, 4, Vec::new());
        sink.report("E024", at(1, 1), args("}"), "(main)").unwrap();
        let halt = sink.report("E024", at(2, 1), args("}"), "(main)");
        assert_eq!(halt, Err(Halt::TooManyErrors));
        sink.report("E024", at(3, 1), args("}"), "(main)").unwrap();
        let diagnostics = sink.finish();
        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics[2].code, TOO_MANY_ERRORS);
        assert_eq!(diagnostics[2].message, "Too many errors. (50% scanned).");
    }

    #[test]
    fn test_configured_codes_are_filtered() {
        let mut sink = DiagnosticSink::new(50, 10, vec!["W030".to_string()]);
        sink.report("W030", at(1, 1), Vec::new(), "(main)").unwrap();
        assert_eq!(sink.count(), 0);
    }

    #[test]
    fn test_toggles_apply_from_their_line() {
        let mut sink = DiagnosticSink::new(50, 10, Vec::new());
        sink.toggle_code("W117".to_string(), 3, false);
        sink.report("W117", at(1, 1), args("a"), "(main)").unwrap();
        sink.report("W117", at(4, 1), args("b"), "(main)").unwrap();
        sink.toggle_code("W117".to_string(), 6, true);
        sink.report("W117", at(7, 1), args("c"), "(main)").unwrap();
        let lines: Vec<u32> = sink.finish().iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![1, 7]);
    }

    #[test]
    fn test_ignore_regions_and_lines() {
        let mut sink = DiagnosticSink::new(50, 10, Vec::new());
        sink.report("W033", at(1, 3), Vec::new(), "(main)").unwrap();
        sink.ignore_line(1);
        sink.begin_ignore(2);
        sink.report("W033", at(3, 3), Vec::new(), "(main)").unwrap();
        sink.end_ignore(4);
        sink.report("W033", at(5, 3), Vec::new(), "(main)").unwrap();
        let lines: Vec<u32> = sink.finish().iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![5]);
    }

    #[test]
    fn test_terminal_survives_ignore_line() {
        let mut sink = DiagnosticSink::new(50, 1, Vec::new());
        sink.ignore_line(1);
        sink.terminate(UNRECOVERABLE, at(1, 1), "(main)");
        let diagnostics = sink.finish();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "Unrecoverable syntax error. (100% scanned).");
    }
}
