//! Directive comments.
//!
//! The lexer hands every comment body to [`classify_comment`]; the ones that
//! configure the analysis travel with the next token and are applied by the
//! parser when that token is consumed.

use core_types::SourcePosition;
use regex::Regex;
use std::sync::OnceLock;

/// What a directive comment does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `/* jshint ... */` option changes
    Jshint,
    /// `/* jslint ... */`, accepted with the same syntax
    Jslint,
    /// `/* global ... */` and `/* globals ... */`
    Global,
    /// `/* exported ... */`
    Exported,
    /// `/* falls through */` before a `case` clause
    FallsThrough,
}

/// A recognized directive comment.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    /// Directive type
    pub kind: DirectiveKind,
    /// Text after the directive keyword
    pub body: String,
    /// Position of the comment opener
    pub pos: SourcePosition,
}

impl Directive {
    /// Split the body into `(name, value)` items.
    ///
    /// Items are separated by commas or whitespace; `name: value` and
    /// `name:value` are equivalent.
    pub fn items(&self) -> Vec<(String, Option<String>)> {
        let normalized = colon_regex()
            .map(|re| re.replace_all(self.body.trim(), ":").into_owned())
            .unwrap_or_else(|| self.body.trim().to_string());
        normalized
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|item| !item.is_empty())
            .map(|item| match item.split_once(':') {
                Some((name, value)) => (name.to_string(), Some(value.to_string())),
                None => (item.to_string(), None),
            })
            .collect()
    }
}

static HEADER: OnceLock<Option<Regex>> = OnceLock::new();
static FALLS_THROUGH: OnceLock<Option<Regex>> = OnceLock::new();
static COLON: OnceLock<Option<Regex>> = OnceLock::new();

fn header_regex() -> Option<&'static Regex> {
    HEADER
        .get_or_init(|| Regex::new(r"(?s)^\s*(jshint|jslint|members?|globals?|exported)\s+(.*?)\s*$").ok())
        .as_ref()
}

fn falls_through_regex() -> Option<&'static Regex> {
    FALLS_THROUGH
        .get_or_init(|| Regex::new(r"^\s*falls?\s?through\s*$").ok())
        .as_ref()
}

fn colon_regex() -> Option<&'static Regex> {
    COLON.get_or_init(|| Regex::new(r"\s*:\s*").ok()).as_ref()
}

/// Recognize a directive in a comment body.
///
/// `text` excludes the comment delimiters. Line comments only carry
/// `jshint`/`jslint` options and fall-through markers.
pub fn classify_comment(text: &str, block: bool, pos: SourcePosition) -> Option<Directive> {
    if falls_through_regex()?.is_match(text) {
        return Some(Directive {
            kind: DirectiveKind::FallsThrough,
            body: String::new(),
            pos,
        });
    }

    let caps = header_regex()?.captures(text)?;
    let keyword = caps.get(1)?.as_str();
    let body = caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default();
    let kind = match keyword {
        "jshint" => DirectiveKind::Jshint,
        "jslint" => DirectiveKind::Jslint,
        "global" | "globals" if block => DirectiveKind::Global,
        "exported" if block => DirectiveKind::Exported,
        _ => return None,
    };
    Some(Directive { kind, body, pos })
}

/// Parse a `-W###` / `+W###` item into its code and enable flag.
pub fn warning_toggle(name: &str) -> Option<(String, bool)> {
    let (enable, code) = match name.as_bytes().first()? {
        b'-' => (false, &name[1..]),
        b'+' => (true, &name[1..]),
        _ => return None,
    };
    let mut chars = code.chars();
    let prefix = chars.next()?;
    if !matches!(prefix, 'W' | 'E' | 'I') || code.len() != 4 || !chars.all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((code.to_string(), enable))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Option<Directive> {
        classify_comment(text, true, SourcePosition::START)
    }

    #[test]
    fn test_classify_headers() {
        assert_eq!(classify(" jshint undef:true ").unwrap().kind, DirectiveKind::Jshint);
        assert_eq!(classify("global a, b").unwrap().kind, DirectiveKind::Global);
        assert_eq!(classify("globals a").unwrap().kind, DirectiveKind::Global);
        assert_eq!(classify("exported foo").unwrap().kind, DirectiveKind::Exported);
        assert!(classify("members a").is_none());
        assert!(classify("just a comment").is_none());
    }

    #[test]
    fn test_line_comments_only_carry_options() {
        let pos = SourcePosition::START;
        assert!(classify_comment(" jshint ignore:line", false, pos).is_some());
        assert!(classify_comment(" global a", false, pos).is_none());
    }

    #[test]
    fn test_falls_through_spellings() {
        for text in [" falls through ", "fall through", "fallthrough", " falls through"] {
            assert_eq!(classify(text).unwrap().kind, DirectiveKind::FallsThrough, "{}", text);
        }
    }

    #[test]
    fn test_items() {
        let directive = classify("jshint undef : true, -W117 esversion:6").unwrap();
        assert_eq!(
            directive.items(),
            vec![
                ("undef".to_string(), Some("true".to_string())),
                ("-W117".to_string(), None),
                ("esversion".to_string(), Some("6".to_string())),
            ]
        );
    }

    #[test]
    fn test_warning_toggle() {
        assert_eq!(warning_toggle("-W117"), Some(("W117".to_string(), false)));
        assert_eq!(warning_toggle("+W030"), Some(("W030".to_string(), true)));
        assert_eq!(warning_toggle("-undef"), None);
        assert_eq!(warning_toggle("W117"), None);
    }
}
