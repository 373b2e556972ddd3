//! Recursive descent parser for JavaScript
//!
//! Statements are parsed by recursive descent and expressions by a Pratt
//! loop over the binding powers in [`crate::symbols`]. No tree is built: the
//! parser reports diagnostics and drives the [`ScopeTracker`] as it goes.
//!
//! Token flow: `token` is the lookahead, `prev` the token consumed last.
//! Directive comments take effect when their token becomes the lookahead;
//! lexical issues are reported when their token is consumed.

mod expressions;
mod functions;
mod patterns;
mod statements;

use core_types::SourcePosition;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::config::{EsVersion, FlagOrWord, LintConfig, ShadowMode, StrictMode, UnusedMode};
use crate::diagnostics::{DiagnosticSink, UNRECOVERABLE};
use crate::directives::{self, Directive, DirectiveKind};
use crate::error::{Halt, ParseResult};
use crate::globals::KnownGlobals;
use crate::lexer::Lexer;
use crate::report::Analysis;
use crate::scope::{ScopeOptions, ScopeTracker};
use crate::stack;
use crate::symbols::{self, Reserved};
use crate::token::{LexIssue, TemplatePart, Token, TokenKind};

pub(crate) use expressions::{Expr, ExprKind};

/// Options of other linters and environments that are accepted in
/// `/* jshint */` comments but have no effect here.
const IGNORED_OPTIONS: &[&str] = &[
    "bitwise", "browser", "camelcase", "couch", "curly", "devel", "dojo", "enforceall", "freeze",
    "futurehostile", "immed", "indent", "jasmine", "jquery", "laxbreak", "laxcomma",
    "loopfunc", "maxcomplexity", "maxdepth", "maxlen", "maxparams", "maxstatements", "mocha",
    "mootools", "newcap", "noarg", "nocomma", "node", "noempty", "nonew", "nonstandard",
    "noreturnawait", "phantom", "plusplus", "predef", "prototypejs", "qunit", "quotmark",
    "regexpu", "rhino", "scripturl", "shelljs", "singleGroups", "supernew", "trailingcomma",
    "typed", "validthis", "varstmt", "white", "worker", "wsh", "yui",
];

/// The parser for one analysis.
pub(crate) struct Parser<'a> {
    lexer: Lexer<'a>,
    config: LintConfig,
    sink: DiagnosticSink,
    scope: ScopeTracker,
    prev: Token,
    token: Token,
    depth: usize,
    /// `in` is not an operator (first clause of a `for` head)
    no_in: bool,
    exported: FxHashSet<String>,
}

impl<'a> Parser<'a> {
    /// Create a parser positioned before the first token.
    pub(crate) fn new(source: &'a str, config: &LintConfig, known: &KnownGlobals) -> Self {
        let mut lexer = Lexer::new(source);
        let token = lexer.next_token();
        let sink = DiagnosticSink::new(config.maxerr, count_lines(source), config.disabled.iter().cloned());
        let strict = config.strict == StrictMode::Implied;
        let scope = ScopeTracker::new(known.clone(), ScopeOptions::from(config), config.module, strict);
        Self {
            lexer,
            config: config.clone(),
            sink,
            scope,
            prev: token.clone(),
            token,
            depth: 0,
            no_in: false,
            exported: FxHashSet::default(),
        }
    }

    /// Parse the whole program and collect the results.
    pub(crate) fn run(mut self) -> Analysis {
        let halted = self.parse_program().err();
        if let Some(halt) = halted {
            debug!(%halt, "analysis halted");
        }
        Analysis {
            summary: self.scope.summary(),
            diagnostics: self.sink.finish(),
            halted,
        }
    }

    fn parse_program(&mut self) -> ParseResult<()> {
        self.accept_lookahead()?;
        self.directive_prologue(None)?;
        self.parse_statements(true)?;
        self.scope.finish(&mut self.sink)
    }

    // ---- token flow ---------------------------------------------------

    /// Consume the lookahead.
    pub(crate) fn advance(&mut self) -> ParseResult<()> {
        let next = self.lexer.next_token();
        self.prev = std::mem::replace(&mut self.token, next);
        let issues = std::mem::take(&mut self.prev.issues);
        self.report_issues(issues)?;
        self.accept_lookahead()
    }

    /// Apply the directives riding on a fresh lookahead and stop on a
    /// fatal lexical error.
    fn accept_lookahead(&mut self) -> ParseResult<()> {
        if !self.token.directives.is_empty() {
            let found = self.token.directives.clone();
            for directive in &found {
                self.apply_directive(directive)?;
            }
        }
        self.check_fatal()
    }

    fn check_fatal(&mut self) -> ParseResult<()> {
        if let Some(issue) = self.token.fatal_issue().cloned() {
            self.report(issue.code, issue.pos, issue.args)?;
            return self.halt(UNRECOVERABLE, issue.pos, Halt::Unrecoverable);
        }
        Ok(())
    }

    fn report_issues(&mut self, issues: Vec<LexIssue>) -> ParseResult<()> {
        for issue in issues {
            let skip = match issue.code {
                "W043" => self.config.multistr,
                "W125" => !self.config.nonbsp,
                _ => issue.since.is_some_and(|since| self.config.esversion >= since),
            };
            if !skip {
                self.report(issue.code, issue.pos, issue.args)?;
            }
        }
        Ok(())
    }

    /// Rescan a `/` or `/=` lookahead in operand position as a regular
    /// expression literal.
    pub(crate) fn rescan_regex(&mut self) {
        if self.token.is_punct("/") || self.token.is_punct("/=") {
            self.token = self.lexer.rescan_as_regex(&self.token);
        }
    }

    /// Rescan a `}` lookahead as the continuation of a template literal.
    pub(crate) fn rescan_template(&mut self) -> ParseResult<()> {
        self.token = self.lexer.rescan_template_continuation(&self.token);
        self.check_fatal()
    }

    /// The token after the lookahead, without consuming anything.
    pub(crate) fn peek(&mut self) -> Token {
        self.peek_nth(1)
    }

    /// The `n`th token after the lookahead (`n >= 1`).
    pub(crate) fn peek_nth(&mut self, n: usize) -> Token {
        let checkpoint = self.lexer.checkpoint();
        let mut token = self.lexer.next_token();
        for _ in 1..n {
            token = self.lexer.next_token();
        }
        self.lexer.restore(checkpoint);
        token
    }

    /// The token following the bracketed group that the lookahead opens.
    ///
    /// Used to tell arrow parameters from parenthesized expressions and
    /// destructuring targets from literals.
    pub(crate) fn token_after_group(&mut self) -> Token {
        let checkpoint = self.lexer.checkpoint();
        let closer = closer_of(&self.token);
        let after = self.scan_past_group(closer);
        self.lexer.restore(checkpoint);
        after
    }

    /// Like [`Self::token_after_group`] for the group opened by the token
    /// after the lookahead (`async (` ...).
    pub(crate) fn token_after_next_group(&mut self) -> Token {
        let checkpoint = self.lexer.checkpoint();
        let opener = self.lexer.next_token();
        let closer = closer_of(&opener);
        let after = self.scan_past_group(closer);
        self.lexer.restore(checkpoint);
        after
    }

    fn scan_past_group(&mut self, closer: char) -> Token {
        let mut closers = vec![closer];
        let mut regex_allowed = true;
        let after = loop {
            let mut token = self.lexer.next_token();
            if token.is_eof() {
                break token;
            }
            if regex_allowed && (token.is_punct("/") || token.is_punct("/=")) {
                token = self.lexer.rescan_as_regex(&token);
            }
            if token.kind == TokenKind::Template(TemplatePart::Head) {
                closers.push('`');
            } else if token.kind == TokenKind::Punctuator {
                match token.raw.as_str() {
                    "(" => closers.push(')'),
                    "[" => closers.push(']'),
                    "{" => closers.push('}'),
                    "}" if closers.last() == Some(&'`') => {
                        let continuation = self.lexer.rescan_template_continuation(&token);
                        if continuation.kind == TokenKind::Template(TemplatePart::Tail) {
                            closers.pop();
                        }
                        regex_allowed = false;
                        continue;
                    }
                    ")" | "]" | "}" => {
                        closers.pop();
                        if closers.is_empty() {
                            break self.lexer.next_token();
                        }
                    }
                    _ => {}
                }
            }
            regex_allowed = regex_allowed_after(&token);
        };
        after
    }

    /// Consume the punctuator `p` or report E021 and leave the lookahead
    /// in place.
    pub(crate) fn expect_punctuator(&mut self, p: &str) -> ParseResult<()> {
        if self.token.is_punct(p) {
            return self.advance();
        }
        self.unexpected_instead(p)
    }

    /// Consume the keyword `k` or report E021.
    pub(crate) fn expect_keyword(&mut self, k: &str) -> ParseResult<()> {
        if self.token.is_keyword(k) {
            return self.advance();
        }
        self.unexpected_instead(k)
    }

    /// Consume the contextual word `name` (`of`, `from`, `as`) or report E021.
    pub(crate) fn expect_word(&mut self, name: &str) -> ParseResult<()> {
        if self.token.is_name(name) {
            return self.advance();
        }
        self.unexpected_instead(name)
    }

    fn unexpected_instead(&mut self, wanted: &str) -> ParseResult<()> {
        if self.token.is_eof() {
            return self.early_end();
        }
        let pos = self.token.pos;
        let saw = self.token.display();
        self.report("E021", pos, vec![wanted.to_string(), saw])
    }

    /// E006 followed by the terminal diagnostic.
    pub(crate) fn early_end(&mut self) -> ParseResult<()> {
        let pos = self.token.pos;
        self.report("E006", pos, Vec::new())?;
        self.halt(UNRECOVERABLE, pos, Halt::Unrecoverable)
    }

    /// Consume the semicolon ending a statement, applying automatic
    /// semicolon insertion.
    pub(crate) fn consume_semicolon(&mut self) -> ParseResult<()> {
        self.semicolon(false)
    }

    /// `do ... while (x)` may omit its semicolon on the same line in ES6.
    pub(crate) fn consume_semicolon_do_while(&mut self) -> ParseResult<()> {
        self.semicolon(true)
    }

    fn semicolon(&mut self, after_do_while: bool) -> ParseResult<()> {
        if self.token.is_punct(";") {
            return self.advance();
        }
        let same_line = !self.token.flags.newline_before && !self.token.is_eof();
        let block_end = self.token.is_punct("}");
        let pos = self.prev.end;
        if same_line && !block_end && !(after_do_while && self.config.esversion.is_es6()) {
            self.report("E058", pos, Vec::new())
        } else if !self.config.asi && !(block_end && same_line && self.config.lastsemic) {
            self.report("W033", pos, Vec::new())
        } else {
            Ok(())
        }
    }

    /// Run `f` one nesting level deeper.
    pub(crate) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            let pos = self.token.pos;
            return self.halt(crate::diagnostics::TOO_DEEP, pos, Halt::TooDeep);
        }
        let result = stack::ensure_sufficient_stack(|| f(self));
        self.depth -= 1;
        result
    }

    // ---- identifiers ----------------------------------------------------

    /// True if the lookahead can name a binding (identifier or a reserved
    /// word that will be reported).
    pub(crate) fn at_binding_identifier(&self) -> bool {
        matches!(self.token.kind, TokenKind::Identifier | TokenKind::Keyword)
    }

    /// Consume a binding identifier.
    ///
    /// Reserved words are reported with W024 and accepted; anything else is
    /// E030 and left in place.
    pub(crate) fn binding_identifier(&mut self) -> ParseResult<Option<(String, SourcePosition)>> {
        match self.token.kind {
            TokenKind::Identifier | TokenKind::Keyword => {
                let name = self.token.name().to_string();
                let pos = self.token.pos;
                if self.token.kind == TokenKind::Keyword || self.is_reserved_word(&name) {
                    self.report("W024", pos, vec![name.clone()])?;
                }
                self.advance()?;
                Ok(Some((name, pos)))
            }
            TokenKind::Eof => self.early_end().map(|_| None),
            _ => {
                let pos = self.token.pos;
                let saw = self.token.display();
                self.report("E030", pos, vec![saw])?;
                Ok(None)
            }
        }
    }

    /// True for words that cannot be identifiers in the current context.
    pub(crate) fn is_reserved_word(&self, name: &str) -> bool {
        match symbols::reserved_word(name) {
            Reserved::Always => true,
            Reserved::Strict => self.scope.is_strict() || (name == "yield" && self.in_generator()),
            Reserved::Es3 => self.config.esversion == EsVersion::Es3,
            Reserved::No => name == "await" && self.config.module,
        }
    }

    /// True directly inside a generator body.
    pub(crate) fn in_generator(&self) -> bool {
        let frame = self.scope.function_frame();
        frame.info.generator && !frame.info.arrow
    }

    /// True where `await` is an operator.
    pub(crate) fn in_async(&self) -> bool {
        let frame = self.scope.function_frame();
        if self.scope.in_function() {
            frame.info.is_async
        } else {
            self.config.module && self.config.esversion >= EsVersion::Es2022
        }
    }

    // ---- diagnostics ------------------------------------------------------

    /// Report a diagnostic attributed to the current function.
    pub(crate) fn report(&mut self, code: &'static str, pos: SourcePosition, args: Vec<String>) -> ParseResult<()> {
        let scope = self.scope.function_name().to_string();
        self.sink.report(code, pos, args, &scope)
    }

    /// Report W119 when `feature` is newer than the configured edition.
    pub(crate) fn require_edition(&mut self, feature: &str, since: EsVersion, pos: SourcePosition) -> ParseResult<()> {
        if self.config.esversion < since {
            self.report("W119", pos, vec![feature.to_string(), since.number().to_string()])?;
        }
        Ok(())
    }

    /// Report W104 for ES6 syntax that Mozilla also shipped.
    pub(crate) fn require_es6_or_moz(&mut self, feature: &str, pos: SourcePosition) -> ParseResult<()> {
        if !self.config.esversion.is_es6() {
            self.report("W104", pos, vec![feature.to_string(), "6".to_string()])?;
        }
        Ok(())
    }

    fn halt<T>(&mut self, code: &'static str, pos: SourcePosition, halt: Halt) -> ParseResult<T> {
        let scope = self.scope.function_name().to_string();
        self.sink.terminate(code, pos, &scope);
        debug!(code, line = pos.line, "terminal diagnostic");
        Err(halt)
    }

    // ---- directive comments ---------------------------------------------

    fn apply_directive(&mut self, directive: &Directive) -> ParseResult<()> {
        match directive.kind {
            DirectiveKind::Jshint | DirectiveKind::Jslint => {
                for (name, value) in directive.items() {
                    self.apply_option(&name, value.as_deref(), directive.pos)?;
                }
                self.scope.set_options(ScopeOptions::from(&self.config));
            }
            DirectiveKind::Global => {
                for (name, value) in directive.items() {
                    match name.strip_prefix('-') {
                        Some(removed) => self.scope.remove_known_global(removed),
                        None => self.scope.add_known_global(&name, value.as_deref() == Some("true")),
                    }
                }
            }
            DirectiveKind::Exported => {
                for (name, _) in directive.items() {
                    self.scope.mark_exported(&name);
                }
            }
            DirectiveKind::FallsThrough => {}
        }
        Ok(())
    }

    fn apply_option(&mut self, name: &str, value: Option<&str>, pos: SourcePosition) -> ParseResult<()> {
        if let Some((code, enabled)) = directives::warning_toggle(name) {
            self.sink.toggle_code(code, pos.line, enabled);
            return Ok(());
        }
        let bad_option = |name: &str| vec![String::new(), name.to_string()];
        let Some(value) = value else {
            return self.report("E001", pos, bad_option(name));
        };

        match name {
            "ignore" => match value {
                "start" => self.sink.begin_ignore(pos.line),
                "end" => self.sink.end_ignore(pos.line),
                "line" => self.sink.ignore_line(pos.line),
                _ => return self.report("E001", pos, bad_option(name)),
            },
            "esversion" => match value.parse().ok().and_then(EsVersion::from_number) {
                Some(edition) => self.config.esversion = edition,
                None => return self.report("E001", pos, bad_option(name)),
            },
            "esnext" if value == "true" => self.config.esversion = EsVersion::Es2015,
            "es3" if value == "true" => self.config.esversion = EsVersion::Es3,
            "es5" if value == "true" => self.config.esversion = EsVersion::Es5,
            "maxerr" => {
                let limit = if value == "false" { Some(0) } else { value.parse().ok() };
                match limit {
                    Some(limit) => {
                        self.config.maxerr = limit;
                        self.sink.set_maxerr(limit);
                    }
                    None => return self.report("E032", pos, vec![value.to_string()]),
                }
            }
            "strict" => match StrictMode::try_from(FlagOrWord::Word(value.to_string())) {
                Ok(mode) => {
                    self.config.strict = mode;
                    if mode == StrictMode::Implied {
                        self.scope.set_strict();
                    }
                }
                Err(_) => return self.report("E001", pos, bad_option(name)),
            },
            "unused" => match UnusedMode::try_from(FlagOrWord::Word(value.to_string())) {
                Ok(mode) => self.config.unused = mode,
                Err(_) => return self.report("E001", pos, bad_option(name)),
            },
            "shadow" => match ShadowMode::try_from(FlagOrWord::Word(value.to_string())) {
                Ok(mode) => self.config.shadow = mode,
                Err(_) => return self.report("E001", pos, bad_option(name)),
            },
            "latedef" if value == "nofunc" => self.config.latedef = true,
            "gensent" => self.config.unstable.gensent = value == "true",
            _ => {
                let flag = match value {
                    "true" => Some(true),
                    "false" => Some(false),
                    _ => None,
                };
                let applied = flag.is_some_and(|flag| self.config.set_flag(name, flag));
                if !applied && !IGNORED_OPTIONS.contains(&name) {
                    return self.report("E001", pos, bad_option(name));
                }
            }
        }
        Ok(())
    }
}

fn closer_of(token: &Token) -> char {
    match token.raw.as_str() {
        "[" => ']',
        "{" => '}',
        _ => ')',
    }
}

/// True if a `/` after `token` starts a regular expression.
fn regex_allowed_after(token: &Token) -> bool {
    match token.kind {
        TokenKind::Punctuator => !matches!(token.raw.as_str(), ")" | "]" | "}"),
        TokenKind::Keyword => !matches!(token.raw.as_str(), "this" | "super" | "true" | "false" | "null"),
        _ => false,
    }
}

/// Number of lines in `source`, counting every line terminator the lexer
/// counts.
fn count_lines(source: &str) -> u32 {
    let mut lines: u32 = 1;
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\n' | '\u{2028}' | '\u{2029}' => lines += 1,
            '\r' if chars.peek() != Some(&'\n') => lines += 1,
            _ => {}
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze;

    fn codes(source: &str) -> Vec<&'static str> {
        analyze(source, &LintConfig::with_esversion(EsVersion::Es2015), &KnownGlobals::new()).codes()
    }

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(""), 1);
        assert_eq!(count_lines("a\nb"), 2);
        assert_eq!(count_lines("a\r\nb\rc"), 3);
    }

    #[test]
    fn test_missing_semicolon_at_line_break() {
        assert_eq!(codes("var a = 1\nvar b = 2;"), vec!["W033"]);
    }

    #[test]
    fn test_missing_semicolon_on_same_line() {
        assert_eq!(codes("var a = 1 var b = 2;"), vec!["E058"]);
    }

    #[test]
    fn test_asi_option() {
        let mut config = LintConfig::with_esversion(EsVersion::Es2015);
        config.asi = true;
        let analysis = analyze("var a = 1\nvar b = 2", &config, &KnownGlobals::new());
        assert!(analysis.diagnostics.is_empty());
    }

    #[test]
    fn test_unclosed_block_ends_early() {
        let analysis = analyze("function f() {", &LintConfig::default(), &KnownGlobals::new());
        assert_eq!(analysis.codes(), vec!["E006", "E041"]);
        assert_eq!(analysis.halted, Some(Halt::Unrecoverable));
    }

    #[test]
    fn test_inline_options_apply_from_their_position() {
        let source = "if (a == 1) {}\n/* jshint eqeqeq: true */\nif (a == 2) {}";
        let analysis = analyze(source, &LintConfig::default(), &KnownGlobals::new());
        assert_eq!(analysis.codes(), vec!["W116"]);
        assert_eq!(analysis.diagnostics[0].line, 3);
    }

    #[test]
    fn test_unknown_inline_option() {
        assert_eq!(codes("/* jshint frobnicate: true */\nvar a;"), vec!["E001"]);
        assert!(codes("/* jshint node: true, curly: true */\nvar a;").is_empty());
    }

    #[test]
    fn test_bad_maxerr_value() {
        assert_eq!(codes("/* jshint maxerr: lots */\nvar a;"), vec!["E032"]);
    }

    #[test]
    fn test_warning_toggles() {
        assert!(codes("/* jshint -W033 */\nvar a = 1\nvar b;").is_empty());
    }

    #[test]
    fn test_global_directive() {
        let mut config = LintConfig::with_esversion(EsVersion::Es2015);
        config.undef = true;
        let analysis = analyze("/* global foo, bar:true */\nfoo(); bar = 1; baz();", &config, &KnownGlobals::new());
        assert_eq!(analysis.codes(), vec!["W117"]);
        assert_eq!(analysis.diagnostics[0].args, vec!["baz".to_string()]);
    }

    #[test]
    fn test_too_deep_nesting() {
        let mut config = LintConfig::with_esversion(EsVersion::Es2015);
        config.max_depth = 20;
        let source = format!("x = {}1{};", "(".repeat(40), ")".repeat(40));
        let analysis = analyze(&source, &config, &KnownGlobals::new());
        assert_eq!(analysis.halted, Some(Halt::TooDeep));
        let last = analysis.diagnostics.last().unwrap();
        assert_eq!(last.code, "E073");
        assert_eq!(last.message, "Too deeply nested. (100% scanned).");
    }
}
