//! Corten JavaScript Lint CLI
//!
//! Entry point for the linter. Parses CLI arguments, installs logging and
//! delegates to [`lint_cli::run`].

use clap::Parser as ClapParser;
use lint_cli::Cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match lint_cli::run(&cli, &mut out) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}
