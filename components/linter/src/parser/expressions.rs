//! Pratt expression parsing.
//!
//! `parse_expression(rbp)` runs the prefix parselet of the lookahead, then
//! keeps applying infix parselets while the next operator binds tighter
//! than `rbp`. Two levels are used everywhere: `0` for a full expression
//! and [`COMMA_BP`] for an assignment expression (no top-level comma).

use core_types::SourcePosition;

use super::Parser;
use crate::config::EsVersion;
use crate::error::ParseResult;
use crate::scope::{Access, RefId};
use crate::symbols::{self, Assoc, Infix, Prefix, Symbol, ASSIGN_BP, COMMA_BP, UNARY_BP};
use crate::token::{TemplatePart, TokenKind, TokenValue};

/// What an expression turned out to be, as far as later checks care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExprKind {
    /// Placeholder after a reported syntax error
    Invalid,
    Identifier,
    Number,
    String,
    /// `true`, `false`, `null` and BigInt literals
    Literal,
    Template,
    RegExp,
    This,
    Super,
    Array,
    Object,
    Function,
    Arrow,
    Class,
    Unary,
    Delete,
    Update,
    Binary,
    Logical,
    Assign,
    Conditional,
    Sequence,
    Member,
    /// Member access or call through `?.`, never assignable
    OptionalChain,
    Call,
    New,
    Yield,
    Await,
    /// Destructuring assignment target
    Pattern,
    /// `new.target`, `import.meta`, `function.sent`
    MetaProperty,
    PrivateName,
}

/// Summary of a parsed expression.
#[derive(Debug, Clone)]
pub(crate) struct Expr {
    pub(crate) kind: ExprKind,
    pub(crate) pos: SourcePosition,
    /// Identifier name, member property name or string value
    pub(crate) name: Option<String>,
    /// Scope reference for identifiers (and for assignments to one)
    pub(crate) reference: Option<RefId>,
    pub(crate) parenthesized: bool,
    /// Usable as an expression statement without W030
    pub(crate) effect: bool,
}

impl Expr {
    pub(crate) fn new(kind: ExprKind, pos: SourcePosition) -> Self {
        Self {
            kind,
            pos,
            name: None,
            reference: None,
            parenthesized: false,
            effect: matches!(
                kind,
                ExprKind::Assign
                    | ExprKind::Call
                    | ExprKind::Update
                    | ExprKind::Delete
                    | ExprKind::Yield
                    | ExprKind::Await
                    | ExprKind::New
            ),
        }
    }

    fn named(kind: ExprKind, pos: SourcePosition, name: Option<String>) -> Self {
        Self { name, ..Self::new(kind, pos) }
    }

    /// Simple assignment target.
    pub(crate) fn is_assignable(&self) -> bool {
        matches!(self.kind, ExprKind::Identifier | ExprKind::Member)
    }

    /// Identifier reference spelled `name`.
    pub(crate) fn is_name(&self, name: &str) -> bool {
        self.kind == ExprKind::Identifier && self.name.as_deref() == Some(name)
    }

    /// Values that can never be called or constructed.
    fn is_primitive_literal(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Number
                | ExprKind::String
                | ExprKind::Literal
                | ExprKind::Template
                | ExprKind::RegExp
                | ExprKind::Array
                | ExprKind::Object
        )
    }
}

/// Feature name used in W119 for edition-gated operators.
fn operator_feature(op: &str) -> &'static str {
    match op {
        "**" | "**=" => "Exponentiation operator",
        "?." => "Optional chaining",
        "??" => "Nullish Coalescing",
        "&&=" | "||=" | "??=" => "Logical assignment",
        _ => "operator",
    }
}

/// Objects that are not meant to be constructed.
const NOT_CONSTRUCTORS: &[&str] = &["Number", "String", "Boolean", "Math", "JSON"];

/// Timer functions that evaluate a string argument.
const STRING_EVALUATORS: &[&str] = &["setTimeout", "setInterval", "execScript"];

impl<'a> Parser<'a> {
    /// Parse an expression whose operators bind tighter than `rbp`.
    pub(crate) fn parse_expression(&mut self, rbp: u8) -> ParseResult<Expr> {
        self.nested(|p| p.parse_expression_inner(rbp))
    }

    fn parse_expression_inner(&mut self, rbp: u8) -> ParseResult<Expr> {
        let mut left = self.parse_prefix()?;
        loop {
            let symbol = symbols::table().lookup(&self.token);
            let Some(infix) = symbol.infix else {
                break;
            };
            let lbp = if self.no_in && self.token.is_keyword("in") { 0 } else { symbol.lbp };
            if lbp <= rbp {
                break;
            }
            // Restricted production: `a \n ++b`
            if infix == Infix::Postfix && self.token.flags.newline_before {
                break;
            }
            left = self.parse_infix(symbol, infix, left)?;
        }
        Ok(left)
    }

    /// Run `f` with `in` accepted as an operator again (inside brackets).
    pub(crate) fn with_in<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        let saved = std::mem::replace(&mut self.no_in, false);
        let result = f(self);
        self.no_in = saved;
        result
    }

    // ---- prefix parselets ------------------------------------------------

    pub(crate) fn parse_prefix(&mut self) -> ParseResult<Expr> {
        self.rescan_regex();
        let symbol = symbols::table().lookup(&self.token);
        let Some(prefix) = symbol.prefix else {
            return self.unexpected_operand();
        };
        match prefix {
            Prefix::Identifier => self.parse_identifier_expression(),
            Prefix::Literal => self.parse_literal(),
            Prefix::Template => self.parse_template(),
            Prefix::RegExp => self.parse_regexp(),
            Prefix::PrivateName => {
                let pos = self.token.pos;
                self.advance()?;
                if !self.token.is_keyword("in") {
                    let saw = self.token.display();
                    self.report("E024", pos, vec![saw])?;
                }
                Ok(Expr::new(ExprKind::PrivateName, pos))
            }
            Prefix::This => {
                let pos = self.token.pos;
                self.advance()?;
                Ok(Expr::new(ExprKind::This, pos))
            }
            Prefix::Super => self.parse_super(),
            Prefix::Unary => self.parse_unary(),
            Prefix::Update => self.parse_prefix_update(),
            Prefix::Paren => self.parse_paren(),
            Prefix::Array => {
                if self.token_after_group().is_punct("=") {
                    return self.parse_assignment_pattern();
                }
                self.parse_array_literal()
            }
            Prefix::Object => {
                if self.token_after_group().is_punct("=") {
                    return self.parse_assignment_pattern();
                }
                self.parse_object_literal()
            }
            Prefix::Function => {
                if self.peek().is_punct(".") {
                    return self.parse_function_sent();
                }
                self.parse_function_expression(false)
            }
            Prefix::Class => {
                let pos = self.token.pos;
                self.parse_class(false, true)?;
                Ok(Expr::new(ExprKind::Class, pos))
            }
            Prefix::New => self.parse_new(),
            Prefix::Import => self.parse_import_expression(),
        }
    }

    fn unexpected_operand(&mut self) -> ParseResult<Expr> {
        let pos = self.token.pos;
        if self.token.is_eof() {
            self.early_end()?;
            return Ok(Expr::new(ExprKind::Invalid, pos));
        }
        let saw = self.token.display();
        self.report("E024", pos, vec![saw])?;
        let closer = self.token.kind == TokenKind::Punctuator && matches!(self.token.raw.as_str(), ")" | "]" | "}" | ";");
        let statement_word = symbols::table().lookup(&self.token).statement.is_some();
        if !closer && !statement_word {
            self.advance()?;
        }
        Ok(Expr::new(ExprKind::Invalid, pos))
    }

    fn parse_identifier_expression(&mut self) -> ParseResult<Expr> {
        let name = self.token.name().to_string();
        let pos = self.token.pos;

        if !self.token.flags.escaped {
            match name.as_str() {
                "async" => {
                    let next = self.peek();
                    if !next.flags.newline_before {
                        if next.is_keyword("function") {
                            return self.parse_function_expression(true);
                        }
                        if next.kind == TokenKind::Identifier && self.peek_nth(2).is_punct("=>") {
                            return self.parse_arrow_function(true);
                        }
                        if next.is_punct("(") && self.token_after_next_group().is_punct("=>") {
                            return self.parse_arrow_function(true);
                        }
                    }
                }
                "yield" if self.in_generator() => return self.parse_yield(),
                "await" if self.in_async() => return self.parse_await(),
                _ => {}
            }
        }
        if self.peek().is_punct("=>") {
            return self.parse_arrow_function(false);
        }

        if self.is_reserved_word(&name) {
            self.report("W024", pos, vec![name.clone()])?;
        }
        self.advance()?;
        let reference = self.scope.reference_variable(&name, pos, Access::Read);
        let mut expr = Expr::named(ExprKind::Identifier, pos, Some(name));
        expr.reference = Some(reference);
        Ok(expr)
    }

    fn parse_literal(&mut self) -> ParseResult<Expr> {
        let pos = self.token.pos;
        let flags = self.token.flags;
        let kind = match self.token.kind {
            TokenKind::Number => ExprKind::Number,
            TokenKind::String => ExprKind::String,
            _ => ExprKind::Literal,
        };
        let name = match &self.token.value {
            TokenValue::Str(value) => Some(value.clone()),
            _ => None,
        };

        if flags.legacy_octal && self.scope.is_strict() {
            self.report("W115", pos, Vec::new())?;
        }
        if flags.leading_zero {
            if self.scope.is_strict() {
                self.report("E068", pos, Vec::new())?;
            } else {
                let raw = self.token.raw.clone();
                self.report("W046", pos, vec![raw])?;
            }
        }
        self.advance()?;
        Ok(Expr::named(kind, pos, name))
    }

    /// Template literal starting at the lookahead. Substitutions recurse
    /// into the expression parser.
    pub(crate) fn parse_template(&mut self) -> ParseResult<Expr> {
        let pos = self.token.pos;
        self.require_edition("template literal syntax", EsVersion::Es2015, pos)?;
        let head = self.token.kind;
        self.advance()?;
        if head != TokenKind::Template(TemplatePart::Head) {
            return Ok(Expr::new(ExprKind::Template, pos));
        }

        loop {
            self.with_in(|p| p.parse_expression(0))?;
            if !self.token.is_punct("}") {
                self.expect_punctuator("}")?;
                break;
            }
            self.rescan_template()?;
            let part = self.token.kind;
            self.advance()?;
            if part != TokenKind::Template(TemplatePart::Middle) {
                break;
            }
        }
        Ok(Expr::new(ExprKind::Template, pos))
    }

    fn parse_regexp(&mut self) -> ParseResult<Expr> {
        let pos = self.token.pos;
        let flags = match &self.token.value {
            TokenValue::RegExp { flags, .. } => flags.clone(),
            _ => String::new(),
        };
        self.advance()?;

        let mut seen = String::new();
        for flag in flags.chars() {
            let since = match flag {
                'g' | 'i' | 'm' => None,
                'u' | 'y' => Some(EsVersion::Es2015),
                's' => Some(EsVersion::Es2018),
                'd' => Some(EsVersion::Es2022),
                _ => {
                    self.report("E016", pos, Vec::new())?;
                    continue;
                }
            };
            if seen.contains(flag) {
                self.report("E016", pos, Vec::new())?;
                continue;
            }
            seen.push(flag);
            if let Some(since) = since {
                let feature = match flag {
                    'u' => "Unicode RegExp flag",
                    'y' => "Sticky RegExp flag",
                    's' => "DotAll RegExp flag",
                    _ => "RegExp indices flag",
                };
                self.require_edition(feature, since, pos)?;
            }
        }
        Ok(Expr::new(ExprKind::RegExp, pos))
    }

    fn parse_super(&mut self) -> ParseResult<Expr> {
        let pos = self.token.pos;
        self.advance()?;
        let function = self.scope.non_arrow_function();
        let in_constructor = function.is_some_and(|f| f.info.constructor);
        let in_method = function.is_some_and(|f| f.info.method);
        if self.token.is_punct("(") {
            if !in_constructor {
                self.report("E064", pos, Vec::new())?;
            }
        } else if self.token.is_punct(".") || self.token.is_punct("[") {
            if !in_method {
                self.report("E063", pos, Vec::new())?;
            }
        } else {
            self.report("E024", pos, vec!["super".to_string()])?;
        }
        Ok(Expr::new(ExprKind::Super, pos))
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let pos = self.token.pos;
        let op = self.token.raw.clone();
        self.advance()?;
        let operand = self.parse_expression(UNARY_BP)?;
        match op.as_str() {
            "delete" => {
                if operand.kind == ExprKind::Identifier {
                    self.report("W051", pos, Vec::new())?;
                }
                Ok(Expr::new(ExprKind::Delete, pos))
            }
            "typeof" => {
                if let (ExprKind::Identifier, Some(reference)) = (operand.kind, operand.reference) {
                    self.scope.set_access(reference, Access::Typeof);
                }
                Ok(Expr::new(ExprKind::Unary, pos))
            }
            _ => Ok(Expr::new(ExprKind::Unary, pos)),
        }
    }

    fn parse_prefix_update(&mut self) -> ParseResult<Expr> {
        let pos = self.token.pos;
        self.advance()?;
        let operand = self.parse_expression(UNARY_BP)?;
        self.update_operand(&operand)?;
        Ok(Expr::new(ExprKind::Update, pos))
    }

    fn update_operand(&mut self, operand: &Expr) -> ParseResult<()> {
        if !operand.is_assignable() {
            return self.report("W017", operand.pos, Vec::new());
        }
        if let Some(reference) = operand.reference {
            self.scope.set_access(reference, Access::ReadWrite);
        }
        Ok(())
    }

    fn parse_paren(&mut self) -> ParseResult<Expr> {
        if self.token_after_group().is_punct("=>") {
            return self.parse_arrow_function(false);
        }
        self.advance()?;
        let mut expr = self.with_in(|p| p.parse_expression(0))?;
        self.expect_punctuator(")")?;
        expr.parenthesized = true;
        Ok(expr)
    }

    fn parse_array_literal(&mut self) -> ParseResult<Expr> {
        let pos = self.token.pos;
        self.advance()?;
        self.with_in(|p| {
            loop {
                if p.token.is_punct("]") {
                    break;
                }
                if p.token.is_punct(",") {
                    if !p.config.elision {
                        let code = if p.config.esversion == EsVersion::Es3 { "W070" } else { "W128" };
                        let at = p.token.pos;
                        p.report(code, at, Vec::new())?;
                    }
                    p.advance()?;
                    continue;
                }
                if p.token.is_punct("...") {
                    let at = p.token.pos;
                    p.require_edition("spread operator", EsVersion::Es2015, at)?;
                    p.advance()?;
                }
                p.parse_expression(COMMA_BP)?;
                if !p.token.is_punct(",") {
                    break;
                }
                let comma = p.token.pos;
                p.advance()?;
                if p.token.is_punct("]") && p.config.esversion == EsVersion::Es3 {
                    p.report("W070", comma, Vec::new())?;
                }
            }
            Ok(())
        })?;
        self.expect_punctuator("]")?;
        Ok(Expr::new(ExprKind::Array, pos))
    }

    fn parse_function_sent(&mut self) -> ParseResult<Expr> {
        let pos = self.token.pos;
        self.advance()?;
        self.advance()?;
        self.expect_word("sent")?;
        if !self.config.unstable.gensent {
            self.report("W144", pos, vec!["function.sent".to_string(), "gensent".to_string()])?;
        } else if !self.scope.non_arrow_function().is_some_and(|f| f.info.generator) {
            self.report("E071", pos, Vec::new())?;
        }
        Ok(Expr::new(ExprKind::MetaProperty, pos))
    }

    fn parse_new(&mut self) -> ParseResult<Expr> {
        let pos = self.token.pos;
        self.advance()?;

        if self.token.is_punct(".") {
            self.advance()?;
            self.expect_word("target")?;
            self.require_edition("new.target", EsVersion::Es2015, pos)?;
            if self.scope.non_arrow_function().is_none() {
                self.report("E024", pos, vec!["new.target".to_string()])?;
            }
            return Ok(Expr::new(ExprKind::MetaProperty, pos));
        }

        let callee = self.nested(|p| p.parse_prefix())?;
        let mut callee_name = callee.kind == ExprKind::Identifier;
        loop {
            let symbol = symbols::table().lookup(&self.token);
            match symbol.infix {
                Some(Infix::Dot) => {
                    callee_name = false;
                    self.parse_dot(Expr::new(ExprKind::Member, pos))?;
                }
                Some(Infix::Index) => {
                    callee_name = false;
                    self.parse_index(Expr::new(ExprKind::Member, pos))?;
                }
                Some(Infix::TaggedTemplate) => {
                    callee_name = false;
                    self.parse_template()?;
                }
                _ => break,
            }
        }

        if self.token.is_punct("(") {
            self.advance()?;
            self.parse_arguments()?;
        } else {
            let at = self.prev.pos;
            self.report("W058", at, Vec::new())?;
        }

        if callee_name {
            let name = callee.name.as_deref().unwrap_or_default();
            if NOT_CONSTRUCTORS.contains(&name) {
                self.report("W053", callee.pos, vec![name.to_string()])?;
            } else if name == "Function" && !self.config.evil {
                self.report("W054", callee.pos, Vec::new())?;
            } else if name == "Array" {
                self.report("W009", callee.pos, Vec::new())?;
            } else if name == "Object" {
                self.report("W010", callee.pos, Vec::new())?;
            }
        }
        Ok(Expr::new(ExprKind::New, pos))
    }

    fn parse_import_expression(&mut self) -> ParseResult<Expr> {
        let pos = self.token.pos;
        self.advance()?;
        if self.token.is_punct("(") {
            self.require_edition("dynamic import", EsVersion::Es2020, pos)?;
            self.advance()?;
            self.with_in(|p| p.parse_expression(COMMA_BP))?;
            self.expect_punctuator(")")?;
            return Ok(Expr::new(ExprKind::Call, pos));
        }
        if self.token.is_punct(".") {
            self.advance()?;
            self.expect_word("meta")?;
            if !self.config.module {
                self.report("E070", pos, Vec::new())?;
            }
            self.require_edition("import.meta", EsVersion::Es2020, pos)?;
            return Ok(Expr::new(ExprKind::MetaProperty, pos));
        }
        let saw = self.token.display();
        self.report("E024", pos, vec![saw])?;
        Ok(Expr::new(ExprKind::Invalid, pos))
    }

    fn parse_yield(&mut self) -> ParseResult<Expr> {
        let pos = self.token.pos;
        self.advance()?;
        self.scope.record_yield();
        if self.token.flags.newline_before {
            return Ok(Expr::new(ExprKind::Yield, pos));
        }
        if self.token.is_punct("*") {
            self.advance()?;
            self.parse_expression(COMMA_BP)?;
        } else {
            self.rescan_regex();
            if symbols::table().lookup(&self.token).prefix.is_some() {
                self.parse_expression(COMMA_BP)?;
            }
        }
        Ok(Expr::new(ExprKind::Yield, pos))
    }

    fn parse_await(&mut self) -> ParseResult<Expr> {
        let pos = self.token.pos;
        self.advance()?;
        self.parse_expression(UNARY_BP)?;
        Ok(Expr::new(ExprKind::Await, pos))
    }

    // ---- infix parselets ------------------------------------------------

    fn parse_infix(&mut self, symbol: &'static Symbol, infix: Infix, left: Expr) -> ParseResult<Expr> {
        if let Some(since) = symbol.since {
            let pos = self.token.pos;
            self.require_edition(operator_feature(symbol.id), since, pos)?;
        }
        let rbp = match symbol.assoc {
            Assoc::Left => symbol.lbp,
            Assoc::Right => symbol.lbp - 1,
        };

        match infix {
            Infix::Binary => self.parse_binary(rbp, left),
            Infix::Logical | Infix::Nullish | Infix::Exponent => {
                let kind = if infix == Infix::Exponent { ExprKind::Binary } else { ExprKind::Logical };
                self.advance()?;
                self.parse_expression(rbp)?;
                Ok(Expr::new(kind, left.pos))
            }
            Infix::Assign => self.parse_assignment(left),
            Infix::Conditional => {
                self.advance()?;
                self.with_in(|p| p.parse_expression(COMMA_BP))?;
                self.expect_punctuator(":")?;
                self.parse_expression(COMMA_BP)?;
                Ok(Expr::new(ExprKind::Conditional, left.pos))
            }
            Infix::Comma => {
                self.advance()?;
                let right = self.parse_expression(rbp)?;
                let mut sequence = Expr::new(ExprKind::Sequence, left.pos);
                sequence.effect = right.effect;
                Ok(sequence)
            }
            Infix::Dot => self.parse_dot(left),
            Infix::OptionalChain => self.parse_optional_chain(left),
            Infix::Index => self.parse_index(left),
            Infix::Call => self.parse_call(left),
            Infix::Postfix => {
                self.update_operand(&left)?;
                self.advance()?;
                Ok(Expr::new(ExprKind::Update, left.pos))
            }
            Infix::TaggedTemplate => {
                self.parse_template()?;
                Ok(Expr::new(ExprKind::Call, left.pos))
            }
        }
    }

    fn parse_binary(&mut self, rbp: u8, left: Expr) -> ParseResult<Expr> {
        let op = self.token.raw.clone();
        let pos = self.token.pos;
        self.advance()?;
        let right = self.parse_expression(rbp)?;

        match op.as_str() {
            "==" | "!=" | "===" | "!==" | "<" | ">" | "<=" | ">=" => {
                if left.is_name("NaN") || right.is_name("NaN") {
                    self.report("W019", pos, Vec::new())?;
                }
                if self.config.eqeqeq && (op == "==" || op == "!=") {
                    let wanted = if op == "==" { "===" } else { "!==" };
                    self.report("W116", pos, vec![wanted.to_string(), op.clone()])?;
                }
            }
            "instanceof" => {
                if right.kind == ExprKind::Function {
                    self.report("W139", right.pos, Vec::new())?;
                } else if right.is_primitive_literal() && !right.parenthesized {
                    self.report("E060", right.pos, Vec::new())?;
                }
            }
            _ => {}
        }
        Ok(Expr::new(ExprKind::Binary, left.pos))
    }

    fn parse_assignment(&mut self, left: Expr) -> ParseResult<Expr> {
        let simple = self.token.is_punct("=");
        self.advance()?;
        let access = if simple { Access::Write } else { Access::ReadWrite };
        if left.kind == ExprKind::Pattern && simple {
            // targets were recorded while the pattern was parsed
        } else {
            self.assignment_target(&left, access)?;
        }
        self.parse_expression(ASSIGN_BP - 1)?;

        let mut assign = Expr::new(ExprKind::Assign, left.pos);
        if left.kind == ExprKind::Identifier {
            assign.name = left.name;
            assign.reference = left.reference;
        }
        Ok(assign)
    }

    /// Record a write through `target`, or report E031 if it cannot be
    /// assigned.
    pub(crate) fn assignment_target(&mut self, target: &Expr, access: Access) -> ParseResult<()> {
        match target.kind {
            ExprKind::Identifier => {
                if let Some(reference) = target.reference {
                    self.scope.set_access(reference, access);
                }
                Ok(())
            }
            ExprKind::Member => Ok(()),
            ExprKind::Pattern if access == Access::Write => Ok(()),
            _ => self.report("E031", target.pos, Vec::new()),
        }
    }

    fn parse_dot(&mut self, left: Expr) -> ParseResult<Expr> {
        self.advance()?;
        let name = self.property_after_dot()?;
        Ok(Expr::named(ExprKind::Member, left.pos, name))
    }

    fn property_after_dot(&mut self) -> ParseResult<Option<String>> {
        match self.token.kind {
            TokenKind::Identifier | TokenKind::Keyword | TokenKind::PrivateName => {
                let name = self.token.name().to_string();
                if self.token.kind == TokenKind::Keyword && self.config.esversion == EsVersion::Es3 {
                    let pos = self.token.pos;
                    self.report("W024", pos, vec![name.clone()])?;
                }
                self.advance()?;
                Ok(Some(name))
            }
            _ => {
                let pos = self.token.pos;
                let saw = self.token.display();
                self.report("E030", pos, vec![saw])?;
                Ok(None)
            }
        }
    }

    fn parse_optional_chain(&mut self, left: Expr) -> ParseResult<Expr> {
        self.advance()?;
        if self.token.is_punct("(") {
            self.advance()?;
            self.parse_arguments()?;
        } else if self.token.is_punct("[") {
            self.advance()?;
            self.with_in(|p| p.parse_expression(0))?;
            self.expect_punctuator("]")?;
        } else {
            self.property_after_dot()?;
        }
        let mut chain = Expr::new(ExprKind::OptionalChain, left.pos);
        chain.effect = true;
        Ok(chain)
    }

    fn parse_index(&mut self, left: Expr) -> ParseResult<Expr> {
        self.advance()?;
        let index = self.with_in(|p| p.parse_expression(0))?;
        if !self.config.sub && index.kind == ExprKind::String {
            if let Some(name) = index.name.as_deref().filter(|name| is_plain_identifier(name)) {
                if symbols::reserved_word(name) == symbols::Reserved::No {
                    self.report("W069", index.pos, vec![name.to_string()])?;
                }
            }
        }
        self.expect_punctuator("]")?;
        Ok(Expr::new(ExprKind::Member, left.pos))
    }

    fn parse_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        self.advance()?;
        let args = self.parse_arguments()?;

        if !self.config.evil {
            let name = match callee.kind {
                ExprKind::Identifier => callee.name.as_deref(),
                ExprKind::Member => callee.name.as_deref(),
                _ => None,
            };
            match name {
                Some("eval") if callee.kind == ExprKind::Identifier => {
                    self.report("W061", callee.pos, Vec::new())?;
                }
                Some("Function") if callee.kind == ExprKind::Identifier => {
                    self.report("W054", callee.pos, Vec::new())?;
                }
                Some(timer) if STRING_EVALUATORS.contains(&timer) => {
                    if args.first().is_some_and(|arg| arg.kind == ExprKind::String) {
                        self.report("W066", callee.pos, Vec::new())?;
                    }
                }
                _ => {}
            }
        }
        Ok(Expr::new(ExprKind::Call, callee.pos))
    }

    /// Arguments after an opening parenthesis, through the closing one.
    pub(crate) fn parse_arguments(&mut self) -> ParseResult<Vec<Expr>> {
        let args = self.with_in(|p| {
            let mut args = Vec::new();
            loop {
                if p.token.is_punct(")") {
                    break;
                }
                if p.token.is_punct("...") {
                    let at = p.token.pos;
                    p.require_edition("spread operator", EsVersion::Es2015, at)?;
                    p.advance()?;
                }
                args.push(p.parse_expression(COMMA_BP)?);
                if !p.token.is_punct(",") {
                    break;
                }
                let comma = p.token.pos;
                p.advance()?;
                if p.token.is_punct(")") {
                    p.require_edition("Trailing comma in arguments lists", EsVersion::Es2017, comma)?;
                }
            }
            Ok(args)
        })?;
        self.expect_punctuator(")")?;
        Ok(args)
    }
}

/// True for strings that could be written as a dotted property name.
fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
