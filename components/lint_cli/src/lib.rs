//! JavaScript Lint CLI Library
//!
//! File discovery, config loading, parallel linting and reporting behind
//! the `corten-lint` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod discover;
pub mod error;
pub mod reporter;
pub mod runner;
pub mod settings;

pub use cli::{Cli, ReporterKind};
pub use error::{CliError, CliResult};
pub use runner::FileReport;
pub use settings::{ConfigFile, Settings};

use std::io::Write;

use reporter::Totals;

/// Lint everything `cli` names, write the report to `out` and return the
/// process exit status.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> CliResult<i32> {
    let settings = Settings::from_cli(cli)?;
    let files = discover::collect_files(&cli.paths)?;
    let workers = runner::worker_count(cli.jobs, files.len());
    let reports = runner::lint_files(&files, &settings, workers)?;

    reporter::write_reports(out, cli.reporter, &reports)?;
    out.flush()?;

    let totals = Totals::of(&reports);
    tracing::info!(
        files = reports.len(),
        errors = totals.errors,
        warnings = totals.warnings,
        "lint finished"
    );
    Ok(totals.exit_code())
}
