//! Config file, discovery, parallel runner and reporters end to end.

use lint_cli::discover::collect_files;
use lint_cli::reporter::{write_json, write_text, Totals};
use lint_cli::runner::lint_files;
use lint_cli::{ConfigFile, Settings};
use pretty_assertions::assert_eq;
use std::fs;

/// Test: a project tree linted with a config file
#[test]
fn test_project_with_config() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src/util")).unwrap();
    fs::write(dir.path().join("src/main.js"), "run(helpers.twice(2));\n").unwrap();
    fs::write(
        dir.path().join("src/util/helpers.mjs"),
        "export function twice(n) {\n  return n * 2;\n}\n",
    )
    .unwrap();
    fs::write(dir.path().join("src/README.md"), "# not a script\n").unwrap();

    let file = ConfigFile::parse(r#"{ "esversion": 2015, "module": true, "undef": true, "predef": ["helpers"] }"#)
        .unwrap();
    let settings = Settings::from_file(file);

    let files = collect_files(&[dir.path().join("src")]).unwrap();
    assert_eq!(files.len(), 2);

    let reports = lint_files(&files, &settings, 2).unwrap();
    assert!(reports[0].path.ends_with("main.js"));
    assert_eq!(reports[0].analysis.codes(), vec!["W117"]);
    assert_eq!(reports[0].analysis.summary.implied_globals[0].name, "run");
    assert!(reports[1].analysis.diagnostics.is_empty());
    assert_eq!(reports[1].analysis.summary.exported, vec!["twice".to_string()]);

    let totals = Totals::of(&reports);
    assert_eq!(totals, Totals { errors: 0, warnings: 1 });
    assert_eq!(totals.exit_code(), 1);
}

/// Test: text and JSON reporters agree on the diagnostics
#[test]
fn test_reporters_agree() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.js");
    fs::write(&path, "var a = 1\nwith (a) {}\n").unwrap();

    let reports = lint_files(&[path], &Settings::default(), 1).unwrap();

    let mut text = Vec::new();
    write_text(&mut text, &reports).unwrap();
    let text = String::from_utf8(text).unwrap();
    let text_codes: Vec<&str> = text
        .lines()
        .filter_map(|line| line.rsplit_once('(').map(|(_, code)| code.trim_end_matches(')')))
        .filter(|code| code.starts_with('W') || code.starts_with('E'))
        .collect();

    let mut json = Vec::new();
    write_json(&mut json, &reports).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
    let json_codes: Vec<String> = value[0]["diagnostics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["code"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(text_codes, json_codes);
    assert_eq!(json_codes, vec!["W033", "W085"]);
}

/// Test: non-UTF-8 input becomes a single diagnostic
#[test]
fn test_binary_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blob.js");
    fs::write(&path, [0xffu8, 0xfe, 0x00, 0x41]).unwrap();

    let reports = lint_files(&[path], &Settings::default(), 1).unwrap();
    assert_eq!(reports[0].analysis.codes(), vec!["E004"]);
    assert_eq!(Totals::of(&reports).exit_code(), 2);
}
