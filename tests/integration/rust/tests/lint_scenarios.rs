//! Lexer, parser, scope tracker and sink working together on whole programs.

use integration_tests::{lint, located, undef_config};
use linter::{analyze, EsVersion, Halt, KnownGlobals, LintConfig, UnusedMode};
use pretty_assertions::assert_eq;

/// Test: a typical ES module lints clean with undef and unused on
#[test]
fn test_clean_module() {
    let source = r#"import { readFile } from "fs";
import * as path from "path";

const cache = new Map();

export async function load(name) {
  const file = path.join("data", name);
  if (cache.has(file)) {
    return cache.get(file);
  }
  const text = await readFile(file, "utf8");
  cache.set(file, text);
  return text;
}
"#;
    let mut config = undef_config(EsVersion::Es2020);
    config.module = true;
    config.unused = UnusedMode::LastParam;
    let analysis = lint(source, &config);

    assert_eq!(analysis.codes(), Vec::<&str>::new());
    assert_eq!(analysis.summary.exported, vec!["load".to_string()]);
    assert!(analysis.summary.implied_globals.is_empty());
}

/// Test: top-level use before `let` is a dead-zone error, before `var` it is not
#[test]
fn test_dead_zone_at_top_level() {
    let config = LintConfig::with_esversion(EsVersion::Es2015);
    assert!(lint("f;\nlet f;", &config).codes().contains(&"E056"));
    assert!(!lint("f;\nvar f;", &config).codes().contains(&"E056"));
}

/// Test: the error limit counts every diagnostic and adds one terminal entry
#[test]
fn test_error_limit_with_many_problems() {
    let mut config = LintConfig::with_esversion(EsVersion::Es2015);
    config.maxerr = 1;
    let source = "a + 1;\nb + 2;\nc + 3;\nd + 4;\ne + 5;";
    let analysis = lint(source, &config);

    assert_eq!(analysis.diagnostics.len(), 2);
    assert_eq!(analysis.halted, Some(Halt::TooManyErrors));
    assert_eq!(analysis.diagnostics[1].message, "Too many errors. (20% scanned).");
}

/// Test: a limit of one stops at the first syntax error of five
#[test]
fn test_error_limit_on_syntax_errors() {
    let mut config = LintConfig::with_esversion(EsVersion::Es2015);
    config.maxerr = 1;
    let source = vec!["var = 1;"; 5].join("\n");
    let analysis = lint(&source, &config);

    assert_eq!(analysis.codes(), vec!["E030", "E043"]);
    assert_eq!(analysis.diagnostics[0].line, 1);
    assert_eq!(analysis.diagnostics[1].message, "Too many errors. (20% scanned).");
    assert_eq!(analysis.halted, Some(Halt::TooManyErrors));
}

/// Test: the limit of zero never stops
#[test]
fn test_unlimited_errors() {
    let mut config = LintConfig::with_esversion(EsVersion::Es2015);
    config.maxerr = 0;
    let source = "a + 1;\n".repeat(80);
    let analysis = lint(&source, &config);

    assert_eq!(analysis.diagnostics.len(), 80);
    assert_eq!(analysis.halted, None);
}

/// Test: redeclarations across block and function frames
#[test]
fn test_redeclarations() {
    let config = LintConfig::with_esversion(EsVersion::Es2015);

    let analysis = lint("var a;\nlet a;", &config);
    assert_eq!(analysis.codes(), vec!["E011"]);
    assert_eq!(analysis.diagnostics[0].line, 2);

    assert_eq!(lint("{ let a; let a; }", &config).codes(), vec!["E011"]);
    assert!(lint("var a; var a;", &config).diagnostics.is_empty());
}

/// Test: a problem inside a nested template substitution is located there
#[test]
fn test_nested_template_position() {
    let config = LintConfig::with_esversion(EsVersion::Es2015);
    let analysis = lint("let t = `${ f(`${ eval(s) }`) }`;", &config);

    assert_eq!(located(&analysis), vec![("W061", 1, 19)]);
}

/// Test: a syntax error five templates deep is located at the bad token
#[test]
fn test_deeply_nested_template_syntax_error() {
    let config = LintConfig::with_esversion(EsVersion::Es2015);
    let source = "var s = `${`${`${`${`${a + }`}`}`}`}`;";
    let analysis = lint(source, &config);

    assert_eq!(located(&analysis), vec![("E024", 1, 28)]);
    assert_eq!(analysis.diagnostics[0].message, "Unexpected '}'.");
    assert_eq!(analysis.halted, None);
}

/// Test: labels resolve through nested loops and functions reset them
#[test]
fn test_labels_across_functions() {
    let config = LintConfig::with_esversion(EsVersion::Es2015);

    let ok = "outer: for (;;) {\n  for (;;) {\n    continue outer;\n  }\n}";
    assert!(lint(ok, &config).diagnostics.is_empty());

    let lost = "outer: for (;;) {\n  (function () {\n    break outer;\n  })();\n}";
    let analysis = lint(lost, &config);
    assert_eq!(analysis.codes(), vec!["W090"]);
    assert_eq!(analysis.diagnostics[0].line, 3);
}

/// Test: implied globals collect every line they are used on
#[test]
fn test_implied_globals_with_known_names() {
    let config = undef_config(EsVersion::Es5);
    let mut known = KnownGlobals::new();
    known.insert("$".to_string(), false);

    let source = "$(function () {\n  total = 0;\n  total += 1;\n});";
    let analysis = analyze(source, &config, &known);

    assert_eq!(analysis.summary.implied_globals.len(), 1);
    assert_eq!(analysis.summary.implied_globals[0].name, "total");
    assert_eq!(analysis.summary.implied_globals[0].lines, vec![2, 3]);
    assert!(analysis.codes().iter().all(|code| *code == "W117"));
}

/// Test: read-only known globals cannot be assigned
#[test]
fn test_read_only_global_assignment() {
    let config = undef_config(EsVersion::Es5);
    let mut known = KnownGlobals::new();
    known.insert("window".to_string(), false);

    let analysis = analyze("window = null;", &config, &known);
    assert_eq!(analysis.codes(), vec!["W020"]);
}

/// Test: ES6 syntax is gated under ES5 and accepted under ES2015
#[test]
fn test_edition_gates() {
    let es5 = LintConfig::with_esversion(EsVersion::Es5);
    let analysis = lint("let a = () => 1;", &es5);
    assert!(analysis.codes().iter().all(|code| *code == "W104" || *code == "W119"));
    assert!(!analysis.diagnostics.is_empty());

    let es2015 = LintConfig::with_esversion(EsVersion::Es2015);
    assert!(lint("let a = () => 1;", &es2015).diagnostics.is_empty());
}

/// Test: unterminated block comment stops the analysis
#[test]
fn test_unterminated_comment_is_fatal() {
    let config = LintConfig::with_esversion(EsVersion::Es2015);
    let analysis = lint("var a = 1;\n/* never closed", &config);

    assert_eq!(analysis.halted, Some(Halt::Unrecoverable));
    assert_eq!(analysis.codes().last(), Some(&"E041"));
}

/// Test: the summary lists unused variables from every scope but no parameters
#[test]
fn test_unused_summary_scopes() {
    let mut config = LintConfig::with_esversion(EsVersion::Es2015);
    config.unused = UnusedMode::Vars;
    let source = "var first = 1;\nfunction helper(arg) {\n  var inner;\n}\nvar last;";
    let analysis = lint(source, &config);

    let names: Vec<_> = analysis.summary.unused.iter().map(|u| u.name.as_str()).collect();
    assert!(names.contains(&"first"));
    assert!(names.contains(&"inner"));
    assert!(names.contains(&"last"));
    assert!(!names.contains(&"arg"));
}
