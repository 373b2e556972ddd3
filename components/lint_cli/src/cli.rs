//! Command line arguments

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use linter::EsVersion;

/// Lint JavaScript files and directories.
#[derive(Debug, Parser)]
#[command(name = "corten-lint", version, about)]
pub struct Cli {
    /// Files or directories to lint; directories are searched for .js, .mjs and .cjs
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// JSON file with lint options, overridden by flags
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// ECMAScript edition (3, 5, 6..13 or 2015..2022)
    #[arg(long, value_name = "N", value_parser = parse_esversion)]
    pub esversion: Option<EsVersion>,

    /// Stop a file after this many diagnostics (0 for no limit)
    #[arg(long, value_name = "N")]
    pub maxerr: Option<usize>,

    /// Treat every file as an ES module
    #[arg(long)]
    pub module: bool,

    /// Warn about uses of undeclared names
    #[arg(long)]
    pub undef: bool,

    /// Warn about unused variables and trailing unused parameters
    #[arg(long)]
    pub unused: bool,

    /// Predefine a global; append `:true` to allow assignment
    #[arg(short, long = "global", value_name = "NAME[:true]", value_parser = parse_global)]
    pub globals: Vec<(String, bool)>,

    /// Never report this diagnostic code
    #[arg(short, long = "disable", value_name = "CODE")]
    pub disabled: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ReporterKind::Text)]
    pub reporter: ReporterKind,

    /// Number of worker threads (defaults to available parallelism)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Log progress at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

/// Report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReporterKind {
    /// One line per diagnostic
    Text,
    /// A JSON array with one entry per file
    Json,
}

fn parse_esversion(raw: &str) -> Result<EsVersion, String> {
    let n: u32 = raw.parse().map_err(|_| format!("'{}' is not a number", raw))?;
    EsVersion::from_number(n).ok_or_else(|| format!("unsupported esversion {}", n))
}

/// Parse `NAME`, `NAME:true` or `NAME:false`.
pub fn parse_global(raw: &str) -> Result<(String, bool), String> {
    let (name, writable) = match raw.split_once(':') {
        None => (raw, false),
        Some((name, "true")) => (name, true),
        Some((name, "false")) => (name, false),
        Some(_) => return Err(format!("bad global '{}', expected NAME or NAME:true", raw)),
    };
    if name.is_empty() {
        return Err(format!("bad global '{}', expected NAME or NAME:true", raw));
    }
    Ok((name.to_string(), writable))
}
