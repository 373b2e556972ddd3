//! Contract tests for the linter API
//!
//! These tests drive `analyze` end to end the way a host program does.

use linter::{analyze, analyze_bytes, EsVersion, Halt, KnownGlobals, LintConfig, UnusedMode};
use pretty_assertions::assert_eq;

fn es6() -> LintConfig {
    LintConfig::with_esversion(EsVersion::Es2015)
}

fn lint(source: &str, config: &LintConfig) -> linter::Analysis {
    analyze(source, config, &KnownGlobals::new())
}

// =============================================================================
// Bindings
// =============================================================================

#[test]
fn test_const_reassignment_reported_once() {
    let analysis = lint("const x = 1;\nx = 2;", &es6());
    assert_eq!(analysis.codes(), vec!["E013"]);
    assert_eq!(analysis.diagnostics[0].line, 2);
    assert_eq!(analysis.diagnostics[0].message, "Attempting to override 'x' which is a constant.");
}

#[test]
fn test_let_dead_zone_but_not_var() {
    let analysis = lint("function f() {\n  a = 1;\n  let a;\n}", &es6());
    assert_eq!(analysis.codes(), vec!["E056"]);
    assert_eq!(analysis.diagnostics[0].line, 2);

    let hoisted = lint("function f() {\n  a = 1;\n  var a;\n}", &es6());
    assert!(hoisted.diagnostics.is_empty());
}

#[test]
fn test_dead_zone_ignored_across_closures() {
    let analysis = lint("function f() {\n  function g() { return a; }\n  let a = 1;\n  return g;\n}", &es6());
    assert!(analysis.diagnostics.is_empty());
}

#[test]
fn test_redeclaration_scenarios() {
    assert_eq!(lint("let a; let a;", &es6()).codes(), vec!["E011"]);
    assert_eq!(lint("let a; var a;", &es6()).codes(), vec!["E011"]);
    assert_eq!(lint("function f(a) { let a; }", &es6()).codes(), vec!["E011"]);
    assert!(lint("var a; var a;", &es6()).diagnostics.is_empty());
    assert!(lint("let a; { let a; }", &es6()).diagnostics.is_empty());
}

#[test]
fn test_implied_globals_summary() {
    let mut config = es6();
    config.undef = true;
    let analysis = lint("a = 1;\nfunction f() { return a + b; }\nb = 2;", &config);
    let names: Vec<_> = analysis.summary.implied_globals.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(analysis.summary.implied_globals[0].lines, vec![1, 2]);
    assert_eq!(analysis.codes(), vec!["W117", "W117", "W117", "W117"]);
}

#[test]
fn test_unused_summary() {
    let mut config = es6();
    config.unused = UnusedMode::LastParam;
    let analysis = lint("function f(a, b, c) { return b; }\nf();", &config);
    assert_eq!(analysis.codes(), vec!["W098"]);
    let unused: Vec<_> = analysis.summary.unused.iter().map(|u| (u.name.as_str(), u.kind)).collect();
    assert_eq!(unused, vec![("c", "param")]);
    assert_eq!(analysis.summary.unused[0].scope, "f");
}

// =============================================================================
// Control flow
// =============================================================================

#[test]
fn test_unknown_label() {
    let analysis = lint("function f() {\n  for (;;) {\n    break foo;\n  }\n}", &es6());
    assert_eq!(analysis.codes(), vec!["W090"]);
    assert_eq!(analysis.diagnostics[0].line, 3);
    assert_eq!(analysis.diagnostics[0].message, "'foo' is not a statement label.");
}

#[test]
fn test_continue_to_block_label() {
    let analysis = lint("foo: {\n  for (;;) {\n    continue foo;\n  }\n}", &es6());
    assert_eq!(analysis.codes(), vec!["W052"]);
    assert_eq!(analysis.diagnostics[0].message, "Unexpected 'continue'.");
}

// =============================================================================
// Limits
// =============================================================================

#[test]
fn test_maxerr_stops_after_limit() {
    let mut config = es6();
    config.maxerr = 1;
    let analysis = lint("a + 1;\nb + 2;\nc + 3;", &config);
    assert_eq!(analysis.codes(), vec!["W030", "E043"]);
    assert_eq!(analysis.halted, Some(Halt::TooManyErrors));
    assert_eq!(analysis.diagnostics[1].message, "Too many errors. (33% scanned).");
}

#[test]
fn test_deep_nesting_is_terminal() {
    let mut config = es6();
    config.max_depth = 50;
    let source = format!("var a = {}1{};", "[".repeat(200), "]".repeat(200));
    let analysis = lint(&source, &config);
    assert_eq!(analysis.codes(), vec!["E073"]);
    assert_eq!(analysis.halted, Some(Halt::TooDeep));
}

#[test]
fn test_invalid_utf8() {
    let analysis = analyze_bytes(&[0x76, 0x61, 0x72, 0xff], &es6(), &KnownGlobals::new());
    assert_eq!(analysis.codes(), vec!["E004"]);
    assert_eq!(analysis.diagnostics[0].line, 1);
}

// =============================================================================
// Templates and positions
// =============================================================================

#[test]
fn test_error_inside_nested_template() {
    let source = "var s = `a${ `b${ eval('c') }` }`;";
    let analysis = lint(source, &es6());
    assert_eq!(analysis.codes(), vec!["W061"]);
    assert_eq!(analysis.diagnostics[0].line, 1);
    assert_eq!(analysis.diagnostics[0].column, 19);
}

#[test]
fn test_unterminated_template_is_fatal() {
    let analysis = lint("var s = `abc", &es6());
    assert_eq!(analysis.halted, Some(Halt::Unrecoverable));
    assert_eq!(analysis.codes().last(), Some(&"E041"));
}

#[test]
fn test_code_point_escape_needs_es6() {
    let source = "var s = '\\u{1F600}';";
    let analysis = lint(source, &LintConfig::with_esversion(EsVersion::Es5));
    assert_eq!(analysis.codes(), vec!["W119"]);
    assert_eq!(analysis.diagnostics[0].column, 10);
    assert!(lint(source, &es6()).diagnostics.is_empty());
}

// =============================================================================
// Output
// =============================================================================

#[test]
fn test_analysis_is_deterministic() {
    let source = "function f(a) {\n  x = a == 1;\n  return\n}\nvar o = { a: 1, a: 2 };";
    let mut config = es6();
    config.undef = true;
    config.eqeqeq = true;
    let first = serde_json::to_string(&lint(source, &config)).expect("serializes");
    let second = serde_json::to_string(&lint(source, &config)).expect("serializes");
    assert_eq!(first, second);
    assert!(first.contains("\"code\":\"W075\""));
}

#[test]
fn test_function_sent_messages() {
    let source = "function* g() {\n  yield function.sent;\n}";
    let analysis = lint(source, &es6());
    assert_eq!(
        analysis.diagnostics[0].message,
        "'function.sent' is a non-standard language feature. Enable it using the 'gensent' unstable option."
    );

    let mut config = es6();
    config.unstable.gensent = true;
    let outside = lint("function f() {\n  return function.sent;\n}", &config);
    assert_eq!(outside.codes(), vec!["E071"]);
    assert_eq!(outside.diagnostics[0].line, 2);
}
