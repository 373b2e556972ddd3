//! End-to-end runs of the lint pipeline over temporary files

use clap::Parser as ClapParser;
use lint_cli::{run, Cli, CliError};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, body) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, body).unwrap();
    }
    dir
}

fn lint(dir: &Path, extra: &[&str]) -> (i32, String) {
    let root = dir.to_string_lossy().to_string();
    let mut args = vec!["corten-lint".to_string()];
    args.extend(extra.iter().map(|s| s.to_string()));
    args.push(root.clone());
    let cli = Cli::try_parse_from(args).unwrap();

    let mut out = Vec::new();
    let code = run(&cli, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap().replace(&format!("{}/", root), "");
    (code, text)
}

/// Clean sources exit 0 with no output
#[test]
fn run_clean_project() {
    let dir = project(&[("a.js", "var a = 1;\n"), ("lib/b.js", "function b() { return 2; }\n")]);
    let (code, text) = lint(dir.path(), &[]);

    assert_eq!(code, 0);
    assert_eq!(text, "");
}

/// Warnings only exit 1
#[test]
fn run_warnings_exit_one() {
    let dir = project(&[("a.js", "var a = 1\n")]);
    let (code, text) = lint(dir.path(), &[]);

    assert_eq!(code, 1);
    assert!(text.starts_with("a.js: line 1, col 10, Missing semicolon. (W033)\n"));
}

/// Any error exits 2
#[test]
fn run_errors_exit_two() {
    let dir = project(&[("a.js", "var a = 1;\n"), ("b.js", "const x = 1; x = 2;\n")]);
    let (code, text) = lint(dir.path(), &["--esversion", "6"]);

    assert_eq!(code, 2);
    assert!(text.contains("b.js: line 1, col 14"));
    assert!(text.contains("(E013)"));
}

/// Files are reported in walk order regardless of worker count
#[test]
fn run_output_is_ordered() {
    let files: Vec<(String, &str)> = (0..9).map(|i| (format!("m{}.js", i), "x = 1\n")).collect();
    let borrowed: Vec<(&str, &str)> = files.iter().map(|(n, b)| (n.as_str(), *b)).collect();
    let dir = project(&borrowed);

    let (_, single) = lint(dir.path(), &["--jobs", "1"]);
    let (_, many) = lint(dir.path(), &["--jobs", "4"]);

    assert_eq!(single, many);
    let first_files: Vec<&str> = single.lines().take(9).map(|l| l.split(':').next().unwrap()).collect();
    assert_eq!(
        first_files,
        vec!["m0.js", "m1.js", "m2.js", "m3.js", "m4.js", "m5.js", "m6.js", "m7.js", "m8.js"]
    );
}

/// Config file options apply and flags override them
#[test]
fn run_with_config_file() {
    let dir = project(&[
        ("src/app.js", "helper(); counter = 1;\n"),
        ("lint.json", r#"{ "undef": true, "globals": { "helper": false } }"#),
    ]);
    let config = dir.path().join("lint.json").to_string_lossy().to_string();
    let src = dir.path().join("src");

    let cli = Cli::try_parse_from(vec![
        "corten-lint".to_string(),
        "--config".to_string(),
        config.clone(),
        src.to_string_lossy().to_string(),
    ])
    .unwrap();
    let mut out = Vec::new();
    assert_eq!(run(&cli, &mut out).unwrap(), 1);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("'counter' is not defined. (W117)"));
    assert!(!text.contains("'helper'"));

    let cli = Cli::try_parse_from(vec![
        "corten-lint".to_string(),
        "--config".to_string(),
        config,
        "--global".to_string(),
        "counter:true".to_string(),
        src.to_string_lossy().to_string(),
    ])
    .unwrap();
    let mut out = Vec::new();
    assert_eq!(run(&cli, &mut out).unwrap(), 0);
}

/// JSON reporter emits one entry per file
#[test]
fn run_json_reporter() {
    let dir = project(&[("a.js", "debugger;\n"), ("b.js", "var b;\n")]);
    let (code, text) = lint(dir.path(), &["--reporter", "json"]);

    assert_eq!(code, 1);
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["diagnostics"][0]["code"], "W087");
    assert_eq!(entries[1]["diagnostics"].as_array().unwrap().len(), 0);
}

/// Disabled codes never appear
#[test]
fn run_disable_flag() {
    let dir = project(&[("a.js", "var a = 1\n")]);
    let (code, text) = lint(dir.path(), &["--disable", "W033"]);

    assert_eq!(code, 0);
    assert_eq!(text, "");
}

/// A bad config file is a CLI error, not a diagnostic
#[test]
fn run_bad_config() {
    let dir = project(&[("a.js", "var a;\n"), ("bad.json", "{ esversion: ")]);
    let cli = Cli::try_parse_from(vec![
        "corten-lint".to_string(),
        "--config".to_string(),
        dir.path().join("bad.json").to_string_lossy().to_string(),
        dir.path().join("a.js").to_string_lossy().to_string(),
    ])
    .unwrap();

    let result = run(&cli, &mut Vec::new());
    assert!(matches!(result, Err(CliError::Config { .. })));
}
