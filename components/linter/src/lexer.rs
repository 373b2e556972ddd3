//! JavaScript Lexer - tokenizes source code into tokens
//!
//! The lexer never fails: problems are attached to the token they were found
//! in as [`LexIssue`]s and scanning continues from a recovery point. The two
//! context-sensitive cases (`/` starting a regular expression, `}` resuming a
//! template) are resolved by the parser, which asks for a rescan from the
//! token's start position.

use core_types::{SourcePosition, Span};
use num_bigint::BigInt;
use tracing::trace;

use crate::config::EsVersion;
use crate::directives::{self, Directive};
use crate::symbols;
use crate::token::{LexIssue, TemplatePart, Token, TokenFlags, TokenKind, TokenValue};
use crate::unicode::{is_id_continue, is_id_start, is_line_terminator, is_whitespace};

/// Saved lexer position for speculative scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    offset: usize,
    line: u32,
    column: u32,
}

/// Lexer over a UTF-8 source text
pub struct Lexer<'a> {
    source: &'a str,
    offset: usize,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer positioned at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// The text being scanned.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Current scan position.
    pub fn position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column, self.offset)
    }

    /// Save the scan position.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    /// Return to a saved scan position.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.offset = checkpoint.offset;
        self.line = checkpoint.line;
        self.column = checkpoint.column;
    }

    fn reset_to(&mut self, pos: SourcePosition) {
        self.offset = pos.offset;
        self.line = pos.line;
        self.column = pos.column;
    }

    /// Scan the next token in default mode, where `/` is a punctuator.
    pub fn next_token(&mut self) -> Token {
        let mut issues = Vec::new();
        let mut found = Vec::new();
        let newline_before = self.skip_trivia(&mut issues, &mut found);
        let start = self.position();

        let mut token = match self.peek() {
            None => self.finish(TokenKind::Eof, TokenValue::None, start, TokenFlags::default(), Vec::new()),
            Some(ch) => self.scan_token(ch, start),
        };

        token.flags.newline_before = newline_before;
        issues.append(&mut token.issues);
        token.issues = issues;
        token.directives = found;
        token
    }

    /// Rescan a `/` or `/=` token as a regular expression literal.
    pub fn rescan_as_regex(&mut self, token: &Token) -> Token {
        trace!(offset = token.pos.offset, "rescan as regular expression");
        self.reset_to(token.pos);
        let start = token.pos;
        let mut issues = Vec::new();
        let mut pattern = String::new();
        let mut in_class = false;
        let mut closed = false;

        self.advance(); // opening slash
        while let Some(ch) = self.peek() {
            if is_line_terminator(ch) {
                break;
            }
            match ch {
                '\\' => {
                    pattern.push(ch);
                    self.advance();
                    if let Some(escaped) = self.peek().filter(|c| !is_line_terminator(*c)) {
                        pattern.push(escaped);
                        self.advance();
                    }
                }
                '[' => {
                    in_class = true;
                    pattern.push(ch);
                    self.advance();
                }
                ']' => {
                    in_class = false;
                    pattern.push(ch);
                    self.advance();
                }
                '/' if !in_class => {
                    self.advance();
                    closed = true;
                    break;
                }
                _ => {
                    pattern.push(ch);
                    self.advance();
                }
            }
        }

        let mut flags = String::new();
        if closed {
            while let Some(ch) = self.peek().filter(|c| is_id_continue(*c)) {
                flags.push(ch);
                self.advance();
            }
            if !groups_balanced(&pattern) {
                issues.push(LexIssue::new("E016", start, Vec::new()));
            }
        } else {
            issues.push(LexIssue::new("E015", start, Vec::new()));
        }

        let mut regex = self.finish(
            TokenKind::RegExp,
            TokenValue::RegExp { pattern, flags },
            start,
            token.flags,
            issues,
        );
        regex.directives = token.directives.clone();
        regex
    }

    /// Rescan a `}` token as the continuation of a template literal.
    pub fn rescan_template_continuation(&mut self, token: &Token) -> Token {
        trace!(offset = token.pos.offset, "rescan as template continuation");
        self.reset_to(token.pos);
        let mut continuation = self.scan_template(token.pos, false);
        continuation.flags.newline_before = token.flags.newline_before;
        continuation.directives = token.directives.clone();
        continuation
    }

    fn scan_token(&mut self, ch: char, start: SourcePosition) -> Token {
        match ch {
            '"' | '\'' => self.scan_string(ch, start),
            '`' => self.scan_template(start, true),
            '0'..='9' => self.scan_number(start),
            '.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => self.scan_number(start),
            '#' if self.peek_at(1).is_some_and(|c| is_id_start(c) || c == '\\') => {
                self.advance();
                let mut name = self.scan_identifier(start);
                name.kind = TokenKind::PrivateName;
                name
            }
            '\\' => self.scan_identifier(start),
            c if is_id_start(c) => self.scan_identifier(start),
            _ => self.scan_punctuator(ch, start),
        }
    }

    fn scan_punctuator(&mut self, ch: char, start: SourcePosition) -> Token {
        self.advance();
        match ch {
            '.' => {
                if self.peek() == Some('.') && self.peek_at(1) == Some('.') {
                    self.advance();
                    self.advance();
                }
            }
            '?' => {
                if self.match_char('?') {
                    self.match_char('=');
                } else if self.peek() == Some('.')
                    && !self.peek_at(1).is_some_and(|c| c.is_ascii_digit())
                {
                    // `?.5` is a conditional followed by a number
                    self.advance();
                }
            }
            '=' => {
                if !self.match_char('>') && self.match_char('=') {
                    self.match_char('=');
                }
            }
            '!' => {
                if self.match_char('=') {
                    self.match_char('=');
                }
            }
            '+' | '-' => {
                if !self.match_char(ch) {
                    self.match_char('=');
                }
            }
            '*' => {
                self.match_char('*');
                self.match_char('=');
            }
            '/' | '%' | '^' => {
                self.match_char('=');
            }
            '<' => {
                self.match_char('<');
                self.match_char('=');
            }
            '>' => {
                if self.match_char('>') {
                    self.match_char('>');
                }
                self.match_char('=');
            }
            '&' | '|' => {
                self.match_char(ch);
                self.match_char('=');
            }
            _ => {}
        }
        self.finish(TokenKind::Punctuator, TokenValue::None, start, TokenFlags::default(), Vec::new())
    }

    fn scan_identifier(&mut self, start: SourcePosition) -> Token {
        let mut name = String::new();
        let mut escaped = false;
        let mut issues = Vec::new();

        loop {
            match self.peek() {
                Some('\\') => {
                    let escape_pos = self.position();
                    self.advance();
                    let decoded = if self.match_char('u') {
                        self.read_unicode_escape()
                    } else {
                        None
                    };
                    match decoded {
                        Some(c) if (name.is_empty() && is_id_start(c)) || (!name.is_empty() && is_id_continue(c)) => {
                            name.push(c);
                            escaped = true;
                        }
                        _ => issues.push(LexIssue::new("E024", escape_pos, vec!["\\".to_string()])),
                    }
                }
                Some(c) if (name.is_empty() && is_id_start(c)) || (!name.is_empty() && is_id_continue(c)) => {
                    name.push(c);
                    self.advance();
                }
                _ => break,
            }
        }

        let kind = if name.is_empty() {
            // A lone backslash: let the parser report it as unexpected
            TokenKind::Punctuator
        } else if !escaped && symbols::is_keyword(&name) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        let flags = TokenFlags {
            escaped,
            ..TokenFlags::default()
        };
        self.finish(kind, TokenValue::Name(name), start, flags, issues)
    }

    /// Read the rest of a `\u` escape (after the `u`).
    fn read_unicode_escape(&mut self) -> Option<char> {
        if self.match_char('{') {
            let mut value: u32 = 0;
            let mut digits = 0;
            while let Some(d) = self.peek().and_then(|c| c.to_digit(16)) {
                self.advance();
                value = value.saturating_mul(16).saturating_add(d);
                digits += 1;
            }
            if digits == 0 || !self.match_char('}') || value > 0x10FFFF {
                return None;
            }
            return Some(char::from_u32(value).unwrap_or('\u{FFFD}'));
        }
        let mut value = 0;
        for _ in 0..4 {
            let d = self.peek().and_then(|c| c.to_digit(16))?;
            self.advance();
            value = value * 16 + d;
        }
        Some(char::from_u32(value).unwrap_or('\u{FFFD}'))
    }

    fn scan_string(&mut self, quote: char, start: SourcePosition) -> Token {
        let mut value = String::new();
        let mut flags = TokenFlags::default();
        let mut issues = Vec::new();

        self.advance(); // opening quote
        loop {
            match self.peek() {
                None | Some('\n') | Some('\r') => {
                    issues.push(LexIssue::new("W112", start, Vec::new()));
                    break;
                }
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    let escape_pos = self.position();
                    self.advance();
                    match self.peek() {
                        None => continue,
                        Some(c) if is_line_terminator(c) => {
                            self.advance();
                            if c == '\r' {
                                self.match_char('\n');
                            }
                            flags.line_continuation = true;
                            issues.push(LexIssue::new("W043", escape_pos, Vec::new()));
                        }
                        Some(_) => {
                            if !self.scan_escape(&mut value, &mut flags, &mut issues, escape_pos, false) {
                                issues.push(LexIssue::new("W044", escape_pos, Vec::new()));
                            }
                        }
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }

        self.finish(TokenKind::String, TokenValue::Str(value), start, flags, issues)
    }

    /// Decode one escape sequence after its backslash.
    ///
    /// Returns `false` when the escape is malformed. In templates, legacy
    /// octal escapes are malformed too.
    fn scan_escape(
        &mut self,
        out: &mut String,
        flags: &mut TokenFlags,
        issues: &mut Vec<LexIssue>,
        escape_pos: SourcePosition,
        template: bool,
    ) -> bool {
        let Some(c) = self.advance() else {
            return false;
        };
        match c {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{C}'),
            'v' => out.push('\u{B}'),
            '0' if !self.peek().is_some_and(|d| d.is_ascii_digit()) => out.push('\0'),
            '0'..='7' => {
                if template {
                    return false;
                }
                flags.legacy_octal = true;
                let mut value = c.to_digit(8).unwrap_or(0);
                let max_digits = if c <= '3' { 2 } else { 1 };
                for _ in 0..max_digits {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            self.advance();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(value).unwrap_or('\u{FFFD}'));
            }
            '8' | '9' => {
                if template {
                    return false;
                }
                out.push(c);
            }
            'x' => {
                let mut value = 0;
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(16)) {
                        Some(d) => {
                            value = value * 16 + d;
                            self.advance();
                        }
                        None => return false,
                    }
                }
                out.push(char::from_u32(value).unwrap_or('\u{FFFD}'));
            }
            'u' => {
                if self.peek() == Some('{') {
                    issues.push(LexIssue::gated("Unicode code point escapes", EsVersion::Es2015, escape_pos));
                }
                match self.read_unicode_escape() {
                    Some(decoded) => out.push(decoded),
                    None => return false,
                }
            }
            other => out.push(other),
        }
        true
    }

    /// Scan a template piece starting at a backtick (`opening`) or at the
    /// `}` closing a substitution.
    fn scan_template(&mut self, start: SourcePosition, opening: bool) -> Token {
        let mut cooked = Some(String::new());
        let mut flags = TokenFlags::default();
        let mut issues = Vec::new();

        self.advance(); // ` or }
        let part = loop {
            match self.peek() {
                None => {
                    issues.push(LexIssue::fatal("E052", start, Vec::new()));
                    break if opening { TemplatePart::NoSubstitution } else { TemplatePart::Tail };
                }
                Some('`') => {
                    self.advance();
                    break if opening { TemplatePart::NoSubstitution } else { TemplatePart::Tail };
                }
                Some('$') if self.peek_at(1) == Some('{') => {
                    self.advance();
                    self.advance();
                    break if opening { TemplatePart::Head } else { TemplatePart::Middle };
                }
                Some('\\') => {
                    let escape_pos = self.position();
                    self.advance();
                    match self.peek() {
                        None => {}
                        Some(c) if is_line_terminator(c) => {
                            self.advance();
                            if c == '\r' {
                                self.match_char('\n');
                            }
                        }
                        Some(_) => {
                            let mut decoded = String::new();
                            if self.scan_escape(&mut decoded, &mut flags, &mut issues, escape_pos, true) {
                                if let Some(text) = cooked.as_mut() {
                                    text.push_str(&decoded);
                                }
                            } else {
                                cooked = None;
                            }
                        }
                    }
                }
                Some(c) => {
                    self.advance();
                    if let Some(text) = cooked.as_mut() {
                        // CRLF and lone CR cook to LF
                        if c == '\r' {
                            if self.peek() != Some('\n') {
                                text.push('\n');
                            }
                        } else {
                            text.push(c);
                        }
                    }
                }
            }
        };

        self.finish(TokenKind::Template(part), TokenValue::Template { cooked }, start, flags, issues)
    }

    fn scan_number(&mut self, start: SourcePosition) -> Token {
        let mut flags = TokenFlags::default();
        let mut issues = Vec::new();
        let mut malformed = false;
        let mut bigint = false;

        let radix = match (self.peek(), self.peek_at(1)) {
            (Some('0'), Some('x' | 'X')) => Some(16),
            (Some('0'), Some('o' | 'O')) => Some(8),
            (Some('0'), Some('b' | 'B')) => Some(2),
            _ => None,
        };

        let value = if let Some(radix) = radix {
            self.advance();
            self.advance();
            let digits = self.scan_digits(radix, &mut flags, &mut malformed);
            if digits.is_empty() {
                malformed = true;
            }
            match radix {
                8 => issues.push(LexIssue::gated("Octal integer literal", EsVersion::Es2015, start)),
                2 => issues.push(LexIssue::gated("Binary integer literal", EsVersion::Es2015, start)),
                _ => {}
            }
            if radix != 16 {
                flags.prefixed_radix = true;
            }
            if self.match_char('n') {
                bigint = true;
            }
            if bigint {
                TokenValue::BigInt(BigInt::parse_bytes(digits.as_bytes(), radix).unwrap_or_default())
            } else {
                TokenValue::Number(digits_value(&digits, radix))
            }
        } else if self.peek() == Some('0') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit() || c == '_') {
            // Legacy octal (`017`) or zero-prefixed decimal (`08`)
            let mut digits = String::new();
            while let Some(c) = self.peek().filter(|c| c.is_ascii_digit() || *c == '_') {
                if c == '_' {
                    malformed = true;
                } else {
                    digits.push(c);
                }
                self.advance();
            }
            if digits.chars().all(|c| c < '8') {
                flags.legacy_octal = true;
                TokenValue::Number(digits_value(&digits, 8))
            } else {
                flags.leading_zero = true;
                let mut text = digits;
                self.scan_fraction_and_exponent(&mut text, &mut flags, &mut malformed);
                TokenValue::Number(text.parse().unwrap_or(f64::NAN))
            }
        } else {
            let mut text = self.scan_digits(10, &mut flags, &mut malformed);
            let integral = !text.is_empty();
            let is_float = self.scan_fraction_and_exponent(&mut text, &mut flags, &mut malformed);
            if !integral {
                issues.push(LexIssue::new("W008", start, vec![self.source[start.offset..self.offset].to_string()]));
            }
            if !is_float && self.match_char('n') {
                bigint = true;
                TokenValue::BigInt(BigInt::parse_bytes(text.as_bytes(), 10).unwrap_or_default())
            } else {
                if text.ends_with('.') {
                    issues.push(LexIssue::new("W047", start, vec![self.source[start.offset..self.offset].to_string()]));
                }
                TokenValue::Number(text.parse().unwrap_or(f64::NAN))
            }
        };

        // `3in`, `0x1g`: an identifier glued to the literal
        if self.peek().is_some_and(|c| is_id_start(c) || c.is_ascii_digit()) {
            malformed = true;
            while self.peek().is_some_and(is_id_continue) {
                self.advance();
            }
        }

        if bigint {
            if flags.legacy_octal || flags.leading_zero {
                malformed = true;
            }
            issues.push(LexIssue::gated("BigInt", EsVersion::Es2020, start));
        }
        if flags.separators {
            issues.push(LexIssue::gated("Numeric separators", EsVersion::Es2021, start));
        }
        if malformed {
            let raw = self.source[start.offset..self.offset].to_string();
            issues.push(LexIssue::new("E067", start, vec![raw]));
        }

        let kind = if bigint { TokenKind::BigInt } else { TokenKind::Number };
        self.finish(kind, value, start, flags, issues)
    }

    /// Scan digits of `radix`, dropping `_` separators.
    ///
    /// A separator must sit between two digits; anything else marks the
    /// literal malformed.
    fn scan_digits(&mut self, radix: u32, flags: &mut TokenFlags, malformed: &mut bool) -> String {
        let mut digits = String::new();
        let mut last_separator = false;
        while let Some(c) = self.peek() {
            if c == '_' {
                if digits.is_empty() || last_separator {
                    *malformed = true;
                }
                flags.separators = true;
                last_separator = true;
            } else if c.is_digit(radix) {
                digits.push(c);
                last_separator = false;
            } else {
                break;
            }
            self.advance();
        }
        if last_separator {
            *malformed = true;
        }
        digits
    }

    /// Scan an optional fraction and exponent onto `text`.
    ///
    /// Returns `true` if either was present.
    fn scan_fraction_and_exponent(&mut self, text: &mut String, flags: &mut TokenFlags, malformed: &mut bool) -> bool {
        let mut is_float = false;
        if self.peek() == Some('.') {
            self.advance();
            text.push('.');
            is_float = true;
            let fraction = self.scan_digits(10, flags, malformed);
            text.push_str(&fraction);
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            self.advance();
            if text.ends_with('.') {
                text.push('0');
            }
            text.push('e');
            is_float = true;
            if let Some(sign) = self.peek().filter(|c| *c == '+' || *c == '-') {
                text.push(sign);
                self.advance();
            }
            let exponent = self.scan_digits(10, flags, malformed);
            if exponent.is_empty() {
                *malformed = true;
            }
            text.push_str(&exponent);
        }
        is_float
    }

    /// Skip whitespace and comments, collecting directives.
    ///
    /// Returns `true` if a line terminator was crossed.
    fn skip_trivia(&mut self, issues: &mut Vec<LexIssue>, found: &mut Vec<Directive>) -> bool {
        let mut newline = false;

        if self.offset == 0 && self.source.starts_with("#!") {
            while self.peek().is_some_and(|c| !is_line_terminator(c)) {
                self.advance();
            }
        }

        while let Some(ch) = self.peek() {
            if is_line_terminator(ch) {
                newline = true;
                self.advance();
            } else if is_whitespace(ch) {
                if ch == '\u{00A0}' {
                    issues.push(LexIssue::new("W125", self.position(), Vec::new()));
                }
                self.advance();
            } else if ch == '/' && self.peek_at(1) == Some('/') {
                let pos = self.position();
                self.advance();
                self.advance();
                let text_start = self.offset;
                while self.peek().is_some_and(|c| !is_line_terminator(c)) {
                    self.advance();
                }
                if let Some(directive) = directives::classify_comment(&self.source[text_start..self.offset], false, pos) {
                    found.push(directive);
                }
            } else if ch == '/' && self.peek_at(1) == Some('*') {
                let pos = self.position();
                self.advance();
                self.advance();
                let text_start = self.offset;
                let text_end = loop {
                    match self.peek() {
                        None => {
                            issues.push(LexIssue::fatal("E017", pos, Vec::new()));
                            return newline;
                        }
                        Some('*') if self.peek_at(1) == Some('/') => {
                            let end = self.offset;
                            self.advance();
                            self.advance();
                            break end;
                        }
                        Some(c) => {
                            if is_line_terminator(c) {
                                newline = true;
                            }
                            self.advance();
                        }
                    }
                };
                if let Some(directive) = directives::classify_comment(&self.source[text_start..text_end], true, pos) {
                    found.push(directive);
                }
            } else {
                break;
            }
        }
        newline
    }

    fn finish(
        &self,
        kind: TokenKind,
        value: TokenValue,
        start: SourcePosition,
        flags: TokenFlags,
        issues: Vec<LexIssue>,
    ) -> Token {
        Token {
            kind,
            raw: self.source[start.offset..self.offset].to_string(),
            value,
            span: Span::new(start.offset, self.offset),
            pos: start,
            end: self.position(),
            flags,
            issues,
            directives: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.offset..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.source[self.offset..].chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        match ch {
            '\n' | '\u{2028}' | '\u{2029}' => {
                self.line += 1;
                self.column = 1;
            }
            // CR of a CRLF pair: the LF ends the line
            '\r' if self.peek() == Some('\n') => self.column += 1,
            '\r' => {
                self.line += 1;
                self.column = 1;
            }
            _ => self.column += 1,
        }
        Some(ch)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }
}

/// Numeric value of `digits` in `radix`, saturating to infinity.
fn digits_value(digits: &str, radix: u32) -> f64 {
    digits
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d))
}

/// True if the parentheses of a regular expression body pair up.
fn groups_balanced(pattern: &str) -> bool {
    let mut depth: i32 = 0;
    let mut in_class = false;
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '[' => in_class = true,
            ']' => in_class = false,
            '(' if !in_class => depth += 1,
            ')' if !in_class => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}
