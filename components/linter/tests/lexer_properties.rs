//! Property-based tests for the lexer and the analyzer.
//!
//! Inputs are drawn from a JavaScript-flavored alphabet so that most
//! cases exercise real token boundaries rather than unknown characters.

use linter::{analyze, EsVersion, KnownGlobals, Lexer, LintConfig, TokenKind};
use proptest::prelude::*;

/// Source fragments mixing code, strings, comments and templates.
fn arb_source() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        "[a-z_$][a-z0-9_]{0,6}",
        "[0-9]{1,4}(\\.[0-9]{1,2})?",
        Just("\"str\"".to_string()),
        Just("'s\\n'".to_string()),
        Just("`t${x}`".to_string()),
        Just("/* c */".to_string()),
        Just("// c\n".to_string()),
        Just("/re/g".to_string()),
        "[-+*/%=<>!&|^~?:;,.(){}\\[\\]]",
        "[ \t\n]{1,2}",
    ];
    prop::collection::vec(piece, 0..40).prop_map(|pieces| pieces.concat())
}

/// True when `gap` holds only whitespace, line terminators and comments.
fn is_trivia(mut gap: &str) -> bool {
    loop {
        gap = gap.trim_start();
        if gap.is_empty() {
            return true;
        }
        if let Some(rest) = gap.strip_prefix("//") {
            gap = rest.find('\n').map_or("", |end| &rest[end..]);
        } else if let Some(rest) = gap.strip_prefix("/*") {
            match rest.find("*/") {
                Some(end) => gap = &rest[end + 2..],
                None => return false,
            }
        } else {
            return false;
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Tokens cover the source in order, carry their exact text and are
    /// separated by nothing but whitespace and comments.
    #[test]
    fn tokens_are_ordered_slices(source in arb_source()) {
        let mut lexer = Lexer::new(&source);
        let mut last_end = 0;
        for _ in 0..=source.len() + 1 {
            let token = lexer.next_token();
            if token.fatal_issue().is_some() {
                break;
            }
            prop_assert!(token.span.start >= last_end);
            prop_assert!(token.span.end <= source.len());
            prop_assert_eq!(token.raw.as_str(), &source[token.span.range()]);
            let gap = &source[last_end..token.span.start];
            prop_assert!(is_trivia(gap), "non-trivia gap {:?} before {:?}", gap, token.raw);
            last_end = token.span.end;
            if token.kind == TokenKind::Eof {
                break;
            }
        }
    }

    /// Analysis never panics and is repeatable.
    #[test]
    fn analysis_is_total_and_deterministic(source in arb_source()) {
        let config = LintConfig::with_esversion(EsVersion::Es2022);
        let known = KnownGlobals::new();
        let first = analyze(&source, &config, &known);
        let second = analyze(&source, &config, &known);
        prop_assert_eq!(first, second);
    }

    /// Every diagnostic points inside the source.
    #[test]
    fn diagnostics_point_into_source(source in arb_source()) {
        let analysis = analyze(&source, &LintConfig::default(), &KnownGlobals::new());
        let lines = source.split('\n').count() as u32;
        for diagnostic in &analysis.diagnostics {
            prop_assert!(diagnostic.line >= 1 && diagnostic.line <= lines);
            prop_assert!(diagnostic.offset <= source.len());
        }
    }
}
