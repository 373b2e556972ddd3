//! Text and JSON output

use std::io::Write;
use std::path::Path;

use linter::{BindingsSummary, Diagnostic, Halt};
use serde::Serialize;

use crate::cli::ReporterKind;
use crate::runner::FileReport;

/// Totals over every linted file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Error-severity diagnostics
    pub errors: usize,
    /// Everything else
    pub warnings: usize,
}

impl Totals {
    /// Count diagnostics across reports.
    pub fn of(reports: &[FileReport]) -> Self {
        let mut totals = Totals::default();
        for report in reports {
            let errors = report.analysis.error_count();
            totals.errors += errors;
            totals.warnings += report.analysis.diagnostics.len() - errors;
        }
        totals
    }

    /// 2 with any error, 1 with warnings only, 0 when clean.
    pub fn exit_code(self) -> i32 {
        if self.errors > 0 {
            2
        } else if self.warnings > 0 {
            1
        } else {
            0
        }
    }
}

#[derive(Serialize)]
struct JsonFile<'a> {
    file: String,
    diagnostics: &'a [Diagnostic],
    summary: &'a BindingsSummary,
    halted: Option<Halt>,
}

/// Write reports in the chosen format.
pub fn write_reports<W: Write>(out: &mut W, kind: ReporterKind, reports: &[FileReport]) -> std::io::Result<()> {
    match kind {
        ReporterKind::Text => write_text(out, reports),
        ReporterKind::Json => write_json(out, reports),
    }
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// `file: line L, col C, Message (CODE)` per diagnostic, then a count.
pub fn write_text<W: Write>(out: &mut W, reports: &[FileReport]) -> std::io::Result<()> {
    for report in reports {
        let file = display_path(&report.path);
        for d in &report.analysis.diagnostics {
            writeln!(out, "{}: line {}, col {}, {} ({})", file, d.line, d.column, d.message, d.code)?;
        }
    }
    let totals = Totals::of(reports);
    let count = totals.errors + totals.warnings;
    if count > 0 {
        writeln!(out)?;
        writeln!(
            out,
            "{} {} ({} {}, {} {})",
            count,
            plural(count, "problem"),
            totals.errors,
            plural(totals.errors, "error"),
            totals.warnings,
            plural(totals.warnings, "warning")
        )?;
    }
    Ok(())
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// One JSON array entry per file, in input order.
pub fn write_json<W: Write>(out: &mut W, reports: &[FileReport]) -> std::io::Result<()> {
    let files: Vec<JsonFile<'_>> = reports
        .iter()
        .map(|r| JsonFile {
            file: display_path(&r.path),
            diagnostics: &r.analysis.diagnostics,
            summary: &r.analysis.summary,
            halted: r.analysis.halted,
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &files)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use linter::{analyze, KnownGlobals, LintConfig};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn report(path: &str, source: &str) -> FileReport {
        FileReport {
            path: PathBuf::from(path),
            analysis: analyze(source, &LintConfig::default(), &KnownGlobals::new()),
        }
    }

    #[test]
    fn test_text_lines_and_summary() {
        let reports = vec![report("a.js", "var a = 1\n"), report("b.js", "var b = 2;")];
        let mut out = Vec::new();
        write_text(&mut out, &reports).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "a.js: line 1, col 10, Missing semicolon. (W033)\n\n1 problem (0 errors, 1 warning)\n"
        );
    }

    #[test]
    fn test_clean_run_prints_nothing() {
        let mut out = Vec::new();
        write_text(&mut out, &[report("ok.js", "var ok = true;")]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_json_entry_per_file() {
        let reports = vec![report("a.js", "with (o) {}")];
        let mut out = Vec::new();
        write_json(&mut out, &reports).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["file"], "a.js");
        assert_eq!(value[0]["diagnostics"][0]["code"], "W085");
        assert_eq!(value[0]["halted"], serde_json::Value::Null);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Totals { errors: 0, warnings: 0 }.exit_code(), 0);
        assert_eq!(Totals { errors: 0, warnings: 3 }.exit_code(), 1);
        assert_eq!(Totals { errors: 1, warnings: 3 }.exit_code(), 2);
    }
}
