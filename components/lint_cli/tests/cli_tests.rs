//! CLI argument parsing tests
//!
//! Tests for verifying clap argument parsing works correctly

use clap::Parser as ClapParser;
use lint_cli::{Cli, ReporterKind};
use linter::EsVersion;
use std::path::PathBuf;

/// Test parsing no arguments (lint the current directory)
#[test]
fn cli_parse_no_args() {
    let args: Vec<&str> = vec!["corten-lint"];
    let cli = Cli::try_parse_from(args).unwrap();

    assert_eq!(cli.paths, vec![PathBuf::from(".")]);
    assert_eq!(cli.config, None);
    assert_eq!(cli.esversion, None);
    assert_eq!(cli.reporter, ReporterKind::Text);
    assert!(!cli.undef);
    assert!(!cli.verbose);
}

/// Test parsing several paths
#[test]
fn cli_parse_paths() {
    let args = vec!["corten-lint", "src", "lib/app.js"];
    let cli = Cli::try_parse_from(args).unwrap();

    assert_eq!(cli.paths, vec![PathBuf::from("src"), PathBuf::from("lib/app.js")]);
}

/// Test parsing --esversion in both numbering styles
#[test]
fn cli_parse_esversion() {
    let cli = Cli::try_parse_from(vec!["corten-lint", "--esversion", "6"]).unwrap();
    assert_eq!(cli.esversion, Some(EsVersion::Es2015));

    let cli = Cli::try_parse_from(vec!["corten-lint", "--esversion", "2022"]).unwrap();
    assert_eq!(cli.esversion, Some(EsVersion::Es2022));
}

/// Test rejecting an unknown edition
#[test]
fn cli_parse_bad_esversion() {
    let result = Cli::try_parse_from(vec!["corten-lint", "--esversion", "4"]);
    assert!(result.is_err());
}

/// Test repeated --global options
#[test]
fn cli_parse_globals() {
    let args = vec!["corten-lint", "--global", "jQuery", "-g", "state:true"];
    let cli = Cli::try_parse_from(args).unwrap();

    assert_eq!(
        cli.globals,
        vec![("jQuery".to_string(), false), ("state".to_string(), true)]
    );
}

/// Test rejecting a malformed --global
#[test]
fn cli_parse_bad_global() {
    let result = Cli::try_parse_from(vec!["corten-lint", "--global", "state:maybe"]);
    assert!(result.is_err());
}

/// Test parsing --disable codes
#[test]
fn cli_parse_disable() {
    let args = vec!["corten-lint", "--disable", "W033", "-d", "W030"];
    let cli = Cli::try_parse_from(args).unwrap();

    assert_eq!(cli.disabled, vec!["W033".to_string(), "W030".to_string()]);
}

/// Test parsing --reporter json
#[test]
fn cli_parse_reporter() {
    let cli = Cli::try_parse_from(vec!["corten-lint", "--reporter", "json"]).unwrap();
    assert_eq!(cli.reporter, ReporterKind::Json);

    assert!(Cli::try_parse_from(vec!["corten-lint", "--reporter", "xml"]).is_err());
}

/// Test combining flags
#[test]
fn cli_parse_combined_flags() {
    let args = vec![
        "corten-lint",
        "--config",
        ".jshintrc",
        "--maxerr",
        "5",
        "--module",
        "--unused",
        "--jobs",
        "2",
        "--verbose",
        "app.mjs",
    ];
    let cli = Cli::try_parse_from(args).unwrap();

    assert_eq!(cli.config, Some(PathBuf::from(".jshintrc")));
    assert_eq!(cli.maxerr, Some(5));
    assert!(cli.module);
    assert!(cli.unused);
    assert_eq!(cli.jobs, Some(2));
    assert!(cli.verbose);
    assert_eq!(cli.paths, vec![PathBuf::from("app.mjs")]);
}
