//! Directive comments flowing from the lexer through the parser into the
//! scope tracker and diagnostics sink.

use integration_tests::{lint, located, undef_config};
use linter::{EsVersion, LintConfig};
use pretty_assertions::assert_eq;

/// Test: `global` directives declare names for the rest of the file
#[test]
fn test_global_directive_feeds_scope() {
    let source = "/* global app, state:true */\napp.start();\nstate = 1;\napp = null;";
    let analysis = lint(source, &undef_config(EsVersion::Es5));

    assert_eq!(located(&analysis), vec![("W020", 4, 1)]);
    assert!(analysis.summary.implied_globals.is_empty());
}

/// Test: `exported` keeps a top-level binding out of the unused report
#[test]
fn test_exported_directive() {
    let mut config = LintConfig::with_esversion(EsVersion::Es5);
    config.unused = linter::UnusedMode::Vars;
    let source = "/* exported api */\nvar api = {};\nvar hidden = {};";
    let analysis = lint(source, &config);

    let unused: Vec<_> = analysis.summary.unused.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(unused, vec!["hidden"]);
    assert!(analysis.summary.exported.contains(&"api".to_string()));
}

/// Test: `ignore:start` / `ignore:end` silences a region
#[test]
fn test_ignore_region() {
    let source = "var a = 1\n/* jshint ignore:start */\nvar b = 2\n/* jshint ignore:end */\nvar c = 3\n";
    let analysis = lint(source, &LintConfig::default());

    let lines: Vec<u32> = analysis.diagnostics.iter().map(|d| d.line).collect();
    assert!(lines.contains(&1));
    assert!(!lines.contains(&3));
    assert!(lines.contains(&5));
}

/// Test: `-W###` disables a code from the directive on
#[test]
fn test_warning_toggle_from_position() {
    let source = "a == 1;\n/* jshint -W030 */\nb == 2;";
    let analysis = lint(source, &LintConfig::default());

    assert_eq!(analysis.codes(), vec!["W030"]);
    assert_eq!(analysis.diagnostics[0].line, 1);
}

/// Test: inline `esversion` unlocks syntax after the directive
#[test]
fn test_inline_esversion() {
    let source = "/* jshint esversion: 6 */\nconst a = () => 1;\na();";
    let analysis = lint(source, &LintConfig::with_esversion(EsVersion::Es5));

    assert!(analysis.diagnostics.is_empty());
}

/// Test: inline `undef` turns on undeclared-name checks
#[test]
fn test_inline_undef() {
    let source = "/* jshint undef: true */\nmissing();";
    let analysis = lint(source, &LintConfig::default());

    assert_eq!(analysis.codes(), vec!["W117"]);
    assert_eq!(analysis.diagnostics[0].message, "'missing' is not defined.");
}

/// Test: `falls through` comments silence the switch fall-through warning
#[test]
fn test_falls_through_comment() {
    let base = "switch (a) {\ncase 1:\n  b();\n{}case 2:\n  c();\n}";
    let warned = lint(&base.replace("{}", ""), &LintConfig::default());
    assert_eq!(warned.codes(), vec!["W086"]);

    let silenced = lint(&base.replace("{}", "  /* falls through */\n"), &LintConfig::default());
    assert!(silenced.diagnostics.is_empty());
}

/// Test: unknown inline options are reported, known-but-unsupported ones are not
#[test]
fn test_unknown_inline_option() {
    let analysis = lint("/* jshint wibble: true */\nvar a;", &LintConfig::default());
    assert_eq!(analysis.codes(), vec!["E001"]);
}
