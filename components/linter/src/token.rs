//! Token types produced by the lexer.

use core_types::{SourcePosition, Span};
use num_bigint::BigInt;

use crate::config::EsVersion;
use crate::directives::Directive;

/// Broad classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or contextual keyword (`let`, `async`, `of`, ...)
    Identifier,
    /// Reserved word spelled without escapes
    Keyword,
    /// Operator or delimiter. Characters the grammar does not know also land
    /// here as single-character punctuators so the parser can report them.
    Punctuator,
    /// Numeric literal
    Number,
    /// BigInt literal (`10n`)
    BigInt,
    /// String literal
    String,
    /// A piece of a template literal
    Template(TemplatePart),
    /// Regular expression literal
    RegExp,
    /// Private class member name (`#field`)
    PrivateName,
    /// End of input
    Eof,
}

/// Which piece of a template literal a template token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplatePart {
    /// `` `text` `` with no substitutions
    NoSubstitution,
    /// `` `text${ ``
    Head,
    /// `}text${`
    Middle,
    /// `` }text` ``
    Tail,
}

/// Decoded value carried by a token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// Punctuators, end of input
    None,
    /// Identifier or keyword name with escapes decoded
    Name(String),
    /// Cooked string literal value
    Str(String),
    /// Numeric literal value
    Number(f64),
    /// BigInt literal value
    BigInt(BigInt),
    /// Regular expression body and flags
    RegExp {
        /// Text between the slashes
        pattern: String,
        /// Trailing flag characters
        flags: String,
    },
    /// Template text between delimiters
    Template {
        /// Cooked text; `None` when an escape could not be cooked
        cooked: Option<String>,
    },
}

/// Lexical facts about a token that later checks depend on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenFlags {
    /// A line terminator appeared between the previous token and this one
    pub newline_before: bool,
    /// The identifier was written with unicode escapes
    pub escaped: bool,
    /// Legacy octal literal (`017`) or octal escape (`"\07"`)
    pub legacy_octal: bool,
    /// Decimal literal with a superfluous leading zero (`08`)
    pub leading_zero: bool,
    /// `0o`/`0b` prefixed literal
    pub prefixed_radix: bool,
    /// Numeric literal containing `_` separators
    pub separators: bool,
    /// String literal continued across lines with a backslash
    pub line_continuation: bool,
}

/// A lexical problem found while scanning a token.
///
/// Issues ride on the token and are reported when the parser consumes it,
/// so speculative lookahead never reports anything twice.
#[derive(Debug, Clone, PartialEq)]
pub struct LexIssue {
    /// Diagnostic code
    pub code: &'static str,
    /// Where the problem is
    pub pos: SourcePosition,
    /// Message arguments
    pub args: Vec<String>,
    /// Scanning cannot meaningfully continue past this problem
    pub fatal: bool,
    /// Only a problem below this edition
    pub since: Option<EsVersion>,
}

impl LexIssue {
    pub(crate) fn new(code: &'static str, pos: SourcePosition, args: Vec<String>) -> Self {
        Self {
            code,
            pos,
            args,
            fatal: false,
            since: None,
        }
    }

    pub(crate) fn fatal(code: &'static str, pos: SourcePosition, args: Vec<String>) -> Self {
        Self {
            code,
            pos,
            args,
            fatal: true,
            since: None,
        }
    }

    /// Syntax that needs at least `since` (reported as W119).
    pub(crate) fn gated(feature: &str, since: EsVersion, pos: SourcePosition) -> Self {
        Self {
            code: "W119",
            pos,
            args: vec![feature.to_string(), since.number().to_string()],
            fatal: false,
            since: Some(since),
        }
    }
}

/// A single lexical token.
///
/// `raw` is the exact source slice covered by `span`; concatenating the
/// trivia between tokens with every `raw` reproduces the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token classification
    pub kind: TokenKind,
    /// Source text of the token
    pub raw: String,
    /// Decoded value
    pub value: TokenValue,
    /// Byte range in the source
    pub span: Span,
    /// Position of the first character
    pub pos: SourcePosition,
    /// Position just past the last character
    pub end: SourcePosition,
    /// Lexical flags
    pub flags: TokenFlags,
    /// Problems found while scanning
    pub issues: Vec<LexIssue>,
    /// Directive comments between the previous token and this one
    pub directives: Vec<Directive>,
}

impl Token {
    /// True for a punctuator spelled `p`.
    pub fn is_punct(&self, p: &str) -> bool {
        self.kind == TokenKind::Punctuator && self.raw == p
    }

    /// True for the unescaped reserved word `k`.
    pub fn is_keyword(&self, k: &str) -> bool {
        self.kind == TokenKind::Keyword && self.raw == k
    }

    /// True for an identifier whose decoded name is `name`.
    pub fn is_name(&self, name: &str) -> bool {
        self.kind == TokenKind::Identifier && self.name() == name
    }

    /// True for an identifier or keyword, the tokens usable as property names.
    pub fn is_identifier_name(&self) -> bool {
        matches!(self.kind, TokenKind::Identifier | TokenKind::Keyword)
    }

    /// True at end of input.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Decoded name for identifiers and keywords, raw text otherwise.
    pub fn name(&self) -> &str {
        match &self.value {
            TokenValue::Name(name) => name,
            _ => &self.raw,
        }
    }

    /// How the token is quoted in messages such as "instead saw '{a}'".
    pub fn display(&self) -> String {
        match self.kind {
            TokenKind::Eof => "(end)".to_string(),
            TokenKind::Identifier | TokenKind::Keyword => self.name().to_string(),
            TokenKind::String => match &self.value {
                TokenValue::Str(s) => s.clone(),
                _ => self.raw.clone(),
            },
            _ => self.raw.clone(),
        }
    }

    /// The first fatal issue on this token, if any.
    pub fn fatal_issue(&self) -> Option<&LexIssue> {
        self.issues.iter().find(|issue| issue.fatal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Token {
        Token {
            kind: TokenKind::Identifier,
            raw: name.to_string(),
            value: TokenValue::Name(name.to_string()),
            span: Span::new(0, name.len()),
            pos: SourcePosition::START,
            end: SourcePosition::new(1, name.len() as u32 + 1, name.len()),
            flags: TokenFlags::default(),
            issues: Vec::new(),
            directives: Vec::new(),
        }
    }

    #[test]
    fn test_token_name_prefers_decoded_value() {
        let mut token = ident("a");
        token.raw = "\\u0061".to_string();
        assert_eq!(token.name(), "a");
        assert!(token.is_name("a"));
        assert!(!token.is_punct("a"));
    }

    #[test]
    fn test_eof_display() {
        let mut token = ident("");
        token.kind = TokenKind::Eof;
        token.value = TokenValue::None;
        assert_eq!(token.display(), "(end)");
    }
}
