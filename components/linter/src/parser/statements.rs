//! Statements, declarations and module items.

use core_types::SourcePosition;

use super::{Expr, ExprKind, Parser};
use crate::config::{EsVersion, StrictMode};
use crate::directives::DirectiveKind;
use crate::error::ParseResult;
use crate::scope::{Access, DeclKind, FrameKind};
use crate::symbols::{self, StatementKind, COMMA_BP};
use crate::token::TokenKind;

/// Broad class of a parsed statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StmtKind {
    Declaration,
    If,
    Loop,
    Block,
    /// `return`, `throw`, `break`, `continue`
    Jump,
    Expression,
    Empty,
    Other,
}

/// What later checks need to know about a statement.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Stmt {
    pub(crate) kind: StmtKind,
    /// Control never reaches the next statement
    pub(crate) exits: bool,
    /// Block whose first statement is an `if` (a for-in filter)
    pub(crate) filtered: bool,
}

impl Stmt {
    fn of(kind: StmtKind) -> Self {
        Self {
            kind,
            exits: false,
            filtered: false,
        }
    }

    fn jump() -> Self {
        Self {
            kind: StmtKind::Jump,
            exits: true,
            filtered: false,
        }
    }
}

/// Result of a `var`/`let`/`const` declaration list.
#[derive(Debug, Default)]
struct Declarations {
    names: Vec<String>,
    /// Number of declarators
    count: usize,
    /// Some declarator has an initializer
    initialized: bool,
}

/// Left-hand side of a `for` head.
enum ForHead {
    Empty,
    Declarations(Declarations, DeclKind),
    Expression(Expr),
}

impl<'a> Parser<'a> {
    /// Statements until `}` or end of input. At top level a stray `}` is
    /// reported and skipped.
    pub(crate) fn parse_statements(&mut self, top: bool) -> ParseResult<Stmt> {
        let mut first: Option<StmtKind> = None;
        let mut last_exits = false;
        loop {
            if self.token.is_eof() {
                break;
            }
            if self.token.is_punct("}") {
                if !top {
                    break;
                }
                let pos = self.token.pos;
                self.report("E024", pos, vec!["}".to_string()])?;
                self.advance()?;
                continue;
            }
            let start = self.token.span.start;
            let stmt = self.parse_statement(true)?;
            first.get_or_insert(stmt.kind);
            last_exits = stmt.exits;
            if self.token.span.start == start && !self.token.is_eof() {
                self.advance()?;
            }
        }
        Ok(Stmt {
            kind: StmtKind::Block,
            exits: last_exits,
            filtered: first == Some(StmtKind::If),
        })
    }

    /// Leading string-literal statements of a program or function body.
    ///
    /// `simple_params` is `None` for the program and tells for functions
    /// whether the parameter list allows a `"use strict"` directive.
    pub(crate) fn directive_prologue(&mut self, simple_params: Option<bool>) -> ParseResult<()> {
        while self.token.kind == TokenKind::String {
            let next = self.peek();
            let alone = next.is_punct(";")
                || next.is_punct("}")
                || next.is_eof()
                || (next.flags.newline_before && symbols::table().lookup(&next).infix.is_none());
            if !alone {
                break;
            }

            let pos = self.token.pos;
            let raw = &self.token.raw;
            let text = raw.get(1..raw.len().saturating_sub(1)).unwrap_or_default();
            if text == "use strict" {
                if self.scope.is_strict() {
                    self.report("W034", pos, vec!["use strict".to_string()])?;
                } else {
                    if simple_params == Some(false) {
                        self.report("E065", pos, Vec::new())?;
                    }
                    let global_ok = self.config.globalstrict || self.config.strict == StrictMode::Global;
                    if simple_params.is_none() && !global_ok {
                        self.report("W097", pos, Vec::new())?;
                    }
                    self.scope.set_strict();
                }
            }
            self.advance()?;
            self.consume_semicolon()?;
        }
        Ok(())
    }

    /// One statement. `in_list` is false for the body of `if`, loops and
    /// labels, where declarations are not allowed.
    pub(crate) fn parse_statement(&mut self, in_list: bool) -> ParseResult<Stmt> {
        self.nested(|p| p.parse_statement_inner(in_list))
    }

    fn parse_statement_inner(&mut self, in_list: bool) -> ParseResult<Stmt> {
        if self.token.kind == TokenKind::Identifier && self.peek().is_punct(":") {
            return self.parse_labeled_statement();
        }
        if self.token.is_name("let") && !self.token.flags.escaped && self.let_starts_declaration() {
            let pos = self.token.pos;
            if !in_list {
                self.report("E048", pos, vec!["Let".to_string()])?;
            }
            self.parse_declarations(DeclKind::Let, false)?;
            self.consume_semicolon()?;
            return Ok(Stmt::of(StmtKind::Declaration));
        }
        if self.token.is_name("async") && !self.token.flags.escaped {
            let next = self.peek();
            if next.is_keyword("function") && !next.flags.newline_before {
                self.function_statement(true, in_list)?;
                return Ok(Stmt::of(StmtKind::Declaration));
            }
        }

        let statement = symbols::table().lookup(&self.token).statement;
        match statement {
            Some(kind) => self.parse_keyword_statement(kind, in_list),
            None => self.parse_expression_statement(),
        }
    }

    fn let_starts_declaration(&mut self) -> bool {
        let next = self.peek();
        match next.kind {
            TokenKind::Identifier => true,
            TokenKind::Keyword => !next.is_keyword("in") && !next.is_keyword("instanceof"),
            _ => next.is_punct("[") || next.is_punct("{"),
        }
    }

    fn parse_keyword_statement(&mut self, kind: StatementKind, in_list: bool) -> ParseResult<Stmt> {
        let pos = self.token.pos;
        match kind {
            StatementKind::Var => {
                self.parse_declarations(DeclKind::Var, false)?;
                self.consume_semicolon()?;
                Ok(Stmt::of(StmtKind::Declaration))
            }
            StatementKind::Const => {
                if !in_list {
                    self.report("E048", pos, vec!["Const".to_string()])?;
                }
                self.parse_declarations(DeclKind::Const, false)?;
                self.consume_semicolon()?;
                Ok(Stmt::of(StmtKind::Declaration))
            }
            StatementKind::Function => {
                self.function_statement(false, in_list)?;
                Ok(Stmt::of(StmtKind::Declaration))
            }
            StatementKind::Class => {
                if !in_list {
                    self.report("E048", pos, vec!["Class".to_string()])?;
                }
                self.parse_class(true, false)?;
                Ok(Stmt::of(StmtKind::Declaration))
            }
            StatementKind::If => self.parse_if_statement(),
            StatementKind::For => self.parse_for_statement(),
            StatementKind::While => self.parse_while_statement(),
            StatementKind::Do => self.parse_do_statement(),
            StatementKind::Switch => self.parse_switch_statement(),
            StatementKind::Break | StatementKind::Continue => {
                self.parse_jump_statement(kind == StatementKind::Break, in_list)
            }
            StatementKind::Return => self.parse_return_statement(in_list),
            StatementKind::Throw => self.parse_throw_statement(in_list),
            StatementKind::Try => self.parse_try_statement(),
            StatementKind::With => self.parse_with_statement(),
            StatementKind::Debugger => {
                if !self.config.debug {
                    self.report("W087", pos, vec!["debugger".to_string()])?;
                }
                self.advance()?;
                self.consume_semicolon()?;
                Ok(Stmt::of(StmtKind::Other))
            }
            StatementKind::Block => self.parse_block(),
            StatementKind::Empty => {
                if in_list {
                    self.report("W032", pos, Vec::new())?;
                }
                self.advance()?;
                Ok(Stmt::of(StmtKind::Empty))
            }
            StatementKind::Import => {
                let next = self.peek();
                if next.is_punct("(") || next.is_punct(".") {
                    return self.parse_expression_statement();
                }
                self.parse_import_declaration()
            }
            StatementKind::Export => self.parse_export_declaration(),
        }
    }

    fn function_statement(&mut self, is_async: bool, in_list: bool) -> ParseResult<()> {
        if !in_list {
            let pos = self.token.pos;
            self.report("W082", pos, Vec::new())?;
        }
        self.parse_function_declaration(is_async, false)?;
        Ok(())
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.token.span.start;
        let expr = self.parse_expression(0)?;
        if expr.kind == ExprKind::Invalid && self.token.span.start == start {
            return Ok(Stmt::of(StmtKind::Other));
        }
        if !self.config.expr && expr.kind != ExprKind::Invalid {
            if expr.kind == ExprKind::New && !expr.parenthesized {
                self.report("W031", expr.pos, Vec::new())?;
            } else if !expr.effect {
                self.report("W030", expr.pos, Vec::new())?;
            }
        }
        self.consume_semicolon()?;
        Ok(Stmt::of(StmtKind::Expression))
    }

    fn parse_labeled_statement(&mut self) -> ParseResult<Stmt> {
        let name = self.token.name().to_string();
        let pos = self.token.pos;
        if self.is_reserved_word(&name) {
            self.report("W024", pos, vec![name.clone()])?;
        }
        self.advance()?;
        self.advance()?;

        let iteration = ["for", "while", "do"].iter().any(|k| self.token.is_keyword(k));
        let breakable = iteration || self.token.is_keyword("switch") || self.token.is_punct("{");
        if !breakable {
            let saw = self.token.display();
            self.report("W028", pos, vec![name.clone(), saw])?;
        }
        self.scope.push_label(&name, iteration, pos);
        let body = self.parse_statement(false);
        self.scope.pop_label();
        body
    }

    /// `{ ... }` with its own block scope.
    pub(crate) fn parse_block(&mut self) -> ParseResult<Stmt> {
        let pos = self.token.pos;
        if !self.token.is_punct("{") {
            self.expect_punctuator("{")?;
            return Ok(Stmt::of(StmtKind::Other));
        }
        self.advance()?;
        self.scope.enter_scope(FrameKind::Block, pos);
        let body = self.parse_statements(false)?;
        self.scope.exit_scope(&mut self.sink)?;
        self.expect_punctuator("}")?;
        Ok(Stmt {
            kind: StmtKind::Block,
            exits: body.exits,
            filtered: body.filtered,
        })
    }

    /// `var`, `let` or `const` declarators, keyword included.
    fn parse_declarations(&mut self, kind: DeclKind, in_for_head: bool) -> ParseResult<Declarations> {
        let keyword_pos = self.token.pos;
        if kind != DeclKind::Var {
            let word = kind.word().to_string();
            self.require_es6_or_moz(&word, keyword_pos)?;
        }
        self.advance()?;

        let mut result = Declarations::default();
        loop {
            let mut names = Vec::new();
            let plain = self.parse_binding_target(&mut names)?;
            for (name, at) in &names {
                self.scope.declare_variable(name, kind, *at, &mut self.sink)?;
            }
            result.count += 1;

            if self.token.is_punct("=") {
                self.advance()?;
                let value = self.parse_expression(COMMA_BP)?;
                result.initialized = true;
                self.check_initializer(kind, plain, &names, &value)?;
                if kind.is_lexical() {
                    let end = self.prev.span.end;
                    for (name, _) in &names {
                        self.scope.mark_initialized(name, end);
                    }
                }
            } else if kind == DeclKind::Const && !in_for_head {
                if let Some((name, at)) = names.first() {
                    self.report("E012", *at, vec![name.clone()])?;
                }
            }

            result.names.extend(names.into_iter().map(|(name, _)| name));
            if !self.token.is_punct(",") {
                break;
            }
            self.advance()?;
        }
        Ok(result)
    }

    fn check_initializer(
        &mut self,
        kind: DeclKind,
        plain: bool,
        names: &[(String, SourcePosition)],
        value: &Expr,
    ) -> ParseResult<()> {
        if plain && kind != DeclKind::Const && value.is_name("undefined") {
            if let Some((name, at)) = names.first() {
                self.report("W080", *at, vec![name.clone()])?;
            }
        }
        // `var a = b = 0` where `b` is not declared
        if value.kind == ExprKind::Assign && !value.parenthesized {
            if let Some(target) = value.name.as_deref().filter(|_| value.reference.is_some()) {
                if !self.scope.is_declared(target) {
                    self.report("W120", value.pos, vec![target.to_string()])?;
                }
            }
        }
        Ok(())
    }

    /// W084 for an unparenthesized assignment used as a condition.
    fn check_condition(&mut self, condition: &Expr) -> ParseResult<()> {
        if condition.kind == ExprKind::Assign && !condition.parenthesized && !self.config.boss {
            return self.report("W084", condition.pos, Vec::new());
        }
        Ok(())
    }

    /// `( expression )` after `if`, `while`, `switch`, `with`.
    fn parenthesized_condition(&mut self) -> ParseResult<Expr> {
        self.expect_punctuator("(")?;
        let condition = self.with_in(|p| p.parse_expression(0))?;
        self.expect_punctuator(")")?;
        Ok(condition)
    }

    fn parse_if_statement(&mut self) -> ParseResult<Stmt> {
        self.advance()?;
        let condition = self.parenthesized_condition()?;
        self.check_condition(&condition)?;
        let then = self.parse_statement(false)?;
        let mut exits = false;
        if self.token.is_keyword("else") {
            self.advance()?;
            let otherwise = self.parse_statement(false)?;
            exits = then.exits && otherwise.exits;
        }
        Ok(Stmt {
            kind: StmtKind::If,
            exits,
            filtered: false,
        })
    }

    fn loop_body(&mut self) -> ParseResult<Stmt> {
        self.scope.enter_loop();
        let body = self.parse_statement(false);
        self.scope.exit_loop();
        body
    }

    fn parse_while_statement(&mut self) -> ParseResult<Stmt> {
        self.advance()?;
        let condition = self.parenthesized_condition()?;
        self.check_condition(&condition)?;
        self.loop_body()?;
        Ok(Stmt::of(StmtKind::Loop))
    }

    fn parse_do_statement(&mut self) -> ParseResult<Stmt> {
        self.advance()?;
        self.loop_body()?;
        self.expect_keyword("while")?;
        let condition = self.parenthesized_condition()?;
        self.check_condition(&condition)?;
        self.consume_semicolon_do_while()?;
        Ok(Stmt::of(StmtKind::Loop))
    }

    fn parse_for_statement(&mut self) -> ParseResult<Stmt> {
        let pos = self.token.pos;
        self.advance()?;
        if self.token.is_name("await") && self.in_async() {
            let at = self.token.pos;
            self.require_edition("asynchronous iteration", EsVersion::Es2018, at)?;
            self.advance()?;
        }
        self.expect_punctuator("(")?;
        self.scope.enter_scope(FrameKind::Block, pos);
        let result = self.parse_for_rest(pos);
        if result.is_ok() {
            self.scope.exit_scope(&mut self.sink)?;
        }
        result
    }

    fn parse_for_rest(&mut self, pos: SourcePosition) -> ParseResult<Stmt> {
        let head = if self.token.is_punct(";") {
            ForHead::Empty
        } else if self.token.is_keyword("var") || self.token.is_keyword("const") || (self.token.is_name("let") && self.let_starts_declaration()) {
            let kind = if self.token.is_keyword("var") {
                DeclKind::Var
            } else if self.token.is_keyword("const") {
                DeclKind::Const
            } else {
                DeclKind::Let
            };
            self.no_in = true;
            let declarations = self.parse_declarations(kind, true);
            self.no_in = false;
            ForHead::Declarations(declarations?, kind)
        } else if (self.token.is_punct("[") || self.token.is_punct("{"))
            && (self.token_after_group().is_keyword("in") || self.token_after_group().is_name("of"))
        {
            ForHead::Expression(self.parse_assignment_pattern()?)
        } else {
            self.no_in = true;
            let expr = self.parse_expression(0);
            self.no_in = false;
            ForHead::Expression(expr?)
        };

        let is_of = self.token.is_name("of");
        if !matches!(head, ForHead::Empty) && (is_of || self.token.is_keyword("in")) {
            return self.parse_for_in_of(head, is_of, pos);
        }

        if let ForHead::Declarations(declarations, DeclKind::Const) = &head {
            if !declarations.initialized {
                let name = declarations.names.first().cloned().unwrap_or_default();
                self.report("E012", pos, vec![name])?;
            }
        }
        self.expect_punctuator(";")?;
        if !self.token.is_punct(";") {
            let condition = self.parse_expression(0)?;
            self.check_condition(&condition)?;
        }
        self.expect_punctuator(";")?;
        if !self.token.is_punct(")") {
            self.parse_expression(0)?;
        }
        self.expect_punctuator(")")?;
        self.loop_body()?;
        Ok(Stmt::of(StmtKind::Loop))
    }

    fn parse_for_in_of(&mut self, head: ForHead, is_of: bool, pos: SourcePosition) -> ParseResult<Stmt> {
        let word = if is_of { "of" } else { "in" };
        match head {
            ForHead::Declarations(declarations, kind) => {
                if declarations.count > 1 {
                    self.report("W133", pos, vec![word.to_string(), "more than one ForBinding".to_string()])?;
                }
                let legacy_initializer = !is_of && kind == DeclKind::Var && !self.scope.is_strict();
                if declarations.initialized && !legacy_initializer {
                    self.report("W133", pos, vec![word.to_string(), "initializer is forbidden".to_string()])?;
                }
            }
            ForHead::Expression(target) => {
                if target.kind == ExprKind::Identifier && !target.parenthesized {
                    if let Some(reference) = target.reference {
                        self.scope.set_access(reference, Access::Write);
                    }
                    let name = target.name.clone().unwrap_or_default();
                    if !self.scope.is_declared(&name) {
                        self.report("W088", target.pos, vec![name])?;
                    }
                } else {
                    self.assignment_target(&target, Access::Write)?;
                }
            }
            ForHead::Empty => {}
        }

        self.advance()?;
        if is_of {
            self.require_edition("for of", EsVersion::Es2015, pos)?;
            self.parse_expression(COMMA_BP)?;
        } else {
            self.parse_expression(0)?;
        }
        self.expect_punctuator(")")?;
        let body = self.loop_body()?;
        if !is_of && self.config.forin && !(body.filtered || body.kind == StmtKind::If) {
            self.report("W089", pos, Vec::new())?;
        }
        Ok(Stmt::of(StmtKind::Loop))
    }

    fn parse_switch_statement(&mut self) -> ParseResult<Stmt> {
        let pos = self.token.pos;
        self.advance()?;
        self.parenthesized_condition()?;
        self.expect_punctuator("{")?;
        self.scope.enter_scope(FrameKind::Block, pos);
        self.scope.enter_switch();

        // (case has statements, last statement exits)
        let mut clause: Option<(bool, bool)> = None;
        loop {
            if self.token.is_punct("}") || self.token.is_eof() {
                break;
            }
            if self.token.is_keyword("case") || self.token.is_keyword("default") {
                let falls_through = self
                    .token
                    .directives
                    .iter()
                    .any(|d| d.kind == DirectiveKind::FallsThrough);
                if let Some((true, false)) = clause {
                    if !falls_through {
                        let at = self.token.pos;
                        let word = self.token.raw.clone();
                        self.report("W086", at, vec![word])?;
                    }
                }
                let is_case = self.token.is_keyword("case");
                self.advance()?;
                if is_case {
                    self.with_in(|p| p.parse_expression(0))?;
                }
                self.expect_punctuator(":")?;
                clause = Some((false, false));
                continue;
            }
            if clause.is_none() {
                let at = self.token.pos;
                let saw = self.token.display();
                self.report("E021", at, vec!["case".to_string(), saw])?;
            }
            let start = self.token.span.start;
            let stmt = self.parse_statement(true)?;
            clause = Some((true, stmt.exits));
            if self.token.span.start == start && !self.token.is_eof() {
                self.advance()?;
            }
        }

        self.scope.exit_switch();
        self.scope.exit_scope(&mut self.sink)?;
        self.expect_punctuator("}")?;
        Ok(Stmt::of(StmtKind::Other))
    }

    fn parse_jump_statement(&mut self, is_break: bool, in_list: bool) -> ParseResult<Stmt> {
        let pos = self.token.pos;
        let word = if is_break { "break" } else { "continue" };
        self.advance()?;

        if self.token.kind == TokenKind::Identifier && !self.token.flags.newline_before {
            let name = self.token.name().to_string();
            self.advance()?;
            match self.scope.find_label(&name).map(|label| label.iteration) {
                None => self.report("W090", pos, vec![name])?,
                Some(false) if !is_break => self.report("W052", pos, vec![word.to_string()])?,
                Some(_) => {}
            }
        } else {
            let frame = self.scope.function_frame();
            let outside = if is_break {
                frame.breakable_depth == 0
            } else {
                frame.loop_depth == 0
            };
            if outside {
                self.report("W052", pos, vec![word.to_string()])?;
            }
        }
        self.consume_semicolon()?;
        self.check_unreachable(word, in_list)?;
        Ok(Stmt::jump())
    }

    fn parse_return_statement(&mut self, in_list: bool) -> ParseResult<Stmt> {
        self.advance()?;
        let ends = self.token.is_punct(";") || self.token.is_punct("}") || self.token.is_eof();
        if !ends && !self.token.flags.newline_before {
            let value = self.parse_expression(0)?;
            if value.kind == ExprKind::Assign && !value.parenthesized {
                self.report("W093", value.pos, Vec::new())?;
            }
        }
        self.consume_semicolon()?;
        self.check_unreachable("return", in_list)?;
        Ok(Stmt::jump())
    }

    fn parse_throw_statement(&mut self, in_list: bool) -> ParseResult<Stmt> {
        let pos = self.token.pos;
        self.advance()?;
        if self.token.flags.newline_before {
            self.report("E022", pos, vec!["throw".to_string()])?;
        }
        self.parse_expression(0)?;
        self.consume_semicolon()?;
        self.check_unreachable("throw", in_list)?;
        Ok(Stmt::jump())
    }

    /// W027 for a statement following a jump in the same list.
    fn check_unreachable(&mut self, jump: &str, in_list: bool) -> ParseResult<()> {
        if !in_list || !self.prev.is_punct(";") {
            return Ok(());
        }
        let ends_list = self.token.is_punct("}")
            || self.token.is_eof()
            || self.token.is_keyword("case")
            || self.token.is_keyword("default")
            || self.token.is_keyword("function");
        if ends_list {
            return Ok(());
        }
        let pos = self.token.pos;
        let saw = self.token.display();
        self.report("W027", pos, vec![saw, jump.to_string()])
    }

    fn parse_try_statement(&mut self) -> ParseResult<Stmt> {
        self.advance()?;
        self.parse_block()?;
        let mut handled = false;

        if self.token.is_keyword("catch") {
            let pos = self.token.pos;
            self.advance()?;
            self.scope.enter_scope(FrameKind::Catch, pos);
            if self.token.is_punct("(") {
                self.advance()?;
                let mut names = Vec::new();
                self.parse_binding_target(&mut names)?;
                for (name, at) in &names {
                    self.scope.declare_variable(name, DeclKind::CatchParam, *at, &mut self.sink)?;
                }
                self.expect_punctuator(")")?;
            } else {
                self.require_edition("optional catch binding", EsVersion::Es2019, pos)?;
            }
            self.expect_punctuator("{")?;
            self.parse_statements(false)?;
            self.scope.exit_scope(&mut self.sink)?;
            self.expect_punctuator("}")?;
            handled = true;
        }
        if self.token.is_keyword("finally") {
            self.advance()?;
            self.parse_block()?;
            handled = true;
        }
        if !handled {
            let pos = self.token.pos;
            let saw = self.token.display();
            self.report("E021", pos, vec!["catch".to_string(), saw])?;
        }
        Ok(Stmt::of(StmtKind::Other))
    }

    fn parse_with_statement(&mut self) -> ParseResult<Stmt> {
        let pos = self.token.pos;
        if self.scope.is_strict() {
            self.report("E010", pos, Vec::new())?;
        } else if !self.config.withstmt {
            self.report("W085", pos, Vec::new())?;
        }
        self.advance()?;
        self.parenthesized_condition()?;
        self.parse_statement(false)?;
        Ok(Stmt::of(StmtKind::Other))
    }

    // ---- modules ------------------------------------------------------

    fn module_item_position(&mut self, word: &str) -> ParseResult<()> {
        let pos = self.token.pos;
        if !self.scope.at_top_level() {
            self.report("E053", pos, vec![word.to_string()])?;
        }
        let feature = word.to_lowercase();
        self.require_edition(&feature, EsVersion::Es2015, pos)
    }

    fn parse_import_declaration(&mut self) -> ParseResult<Stmt> {
        self.module_item_position("Import")?;
        self.advance()?;

        if self.token.kind == TokenKind::String {
            self.advance()?;
            self.consume_semicolon()?;
            return Ok(Stmt::of(StmtKind::Declaration));
        }

        if self.token.kind == TokenKind::Identifier {
            self.import_binding()?;
            if self.token.is_punct(",") {
                self.advance()?;
            }
        }
        if self.token.is_punct("*") {
            self.advance()?;
            self.expect_word("as")?;
            self.import_binding()?;
        } else if self.token.is_punct("{") {
            self.advance()?;
            loop {
                if self.token.is_punct("}") {
                    break;
                }
                let imported_is_name = self.token.is_identifier_name();
                if !imported_is_name && self.token.kind != TokenKind::String {
                    let pos = self.token.pos;
                    let saw = self.token.display();
                    self.report("E030", pos, vec![saw])?;
                    break;
                }
                if self.peek().is_name("as") {
                    self.advance()?;
                    self.advance()?;
                    self.import_binding()?;
                } else {
                    self.import_binding()?;
                }
                if !self.token.is_punct(",") {
                    break;
                }
                self.advance()?;
            }
            self.expect_punctuator("}")?;
        }

        self.expect_word("from")?;
        self.module_specifier()?;
        self.consume_semicolon()?;
        Ok(Stmt::of(StmtKind::Declaration))
    }

    fn import_binding(&mut self) -> ParseResult<()> {
        if let Some((name, at)) = self.binding_identifier()? {
            self.scope.declare_variable(&name, DeclKind::Import, at, &mut self.sink)?;
        }
        Ok(())
    }

    fn module_specifier(&mut self) -> ParseResult<()> {
        if self.token.kind == TokenKind::String {
            return self.advance();
        }
        if self.token.is_eof() {
            return self.early_end();
        }
        let pos = self.token.pos;
        let saw = self.token.display();
        self.report("E021", pos, vec!["(string)".to_string(), saw])
    }

    fn parse_export_declaration(&mut self) -> ParseResult<Stmt> {
        let pos = self.token.pos;
        self.module_item_position("Export")?;
        self.advance()?;

        if self.token.is_keyword("default") {
            self.advance()?;
            let local = if self.token.is_keyword("function") {
                self.parse_function_declaration(false, true)?
            } else if self.token.is_name("async") && self.peek().is_keyword("function") {
                self.parse_function_declaration(true, true)?
            } else if self.token.is_keyword("class") {
                self.parse_class(true, true)?
            } else {
                self.parse_expression(COMMA_BP)?;
                self.consume_semicolon()?;
                None
            };
            if let Some(local) = local {
                self.scope.mark_exported(&local);
            }
            self.add_export("default", pos)?;
            return Ok(Stmt::of(StmtKind::Declaration));
        }

        if self.token.is_punct("*") {
            self.advance()?;
            if self.token.is_name("as") {
                self.advance()?;
                let name = self.token.name().to_string();
                let at = self.token.pos;
                self.advance()?;
                self.add_export(&name, at)?;
            }
            self.expect_word("from")?;
            self.module_specifier()?;
            self.consume_semicolon()?;
            return Ok(Stmt::of(StmtKind::Declaration));
        }

        if self.token.is_punct("{") {
            self.advance()?;
            let mut specifiers: Vec<(String, SourcePosition, String)> = Vec::new();
            loop {
                if self.token.is_punct("}") {
                    break;
                }
                if !self.token.is_identifier_name() && self.token.kind != TokenKind::String {
                    let at = self.token.pos;
                    let saw = self.token.display();
                    self.report("E030", at, vec![saw])?;
                    break;
                }
                let local = self.token.display();
                let at = self.token.pos;
                self.advance()?;
                let exported = if self.token.is_name("as") {
                    self.advance()?;
                    let exported = self.token.display();
                    self.advance()?;
                    exported
                } else {
                    local.clone()
                };
                specifiers.push((local, at, exported));
                if !self.token.is_punct(",") {
                    break;
                }
                self.advance()?;
            }
            self.expect_punctuator("}")?;
            let reexport = self.token.is_name("from");
            if reexport {
                self.advance()?;
                self.module_specifier()?;
            }
            for (local, at, exported) in specifiers {
                if !reexport {
                    self.scope.mark_exported(&local);
                    self.scope.reference_variable(&local, at, Access::Read);
                }
                self.add_export(&exported, at)?;
            }
            self.consume_semicolon()?;
            return Ok(Stmt::of(StmtKind::Declaration));
        }

        let names = if self.token.is_keyword("var") {
            let names = self.parse_declarations(DeclKind::Var, false)?.names;
            self.consume_semicolon()?;
            names
        } else if self.token.is_keyword("const") {
            let names = self.parse_declarations(DeclKind::Const, false)?.names;
            self.consume_semicolon()?;
            names
        } else if self.token.is_name("let") {
            let names = self.parse_declarations(DeclKind::Let, false)?.names;
            self.consume_semicolon()?;
            names
        } else if self.token.is_keyword("function") {
            self.parse_function_declaration(false, false)?.into_iter().collect()
        } else if self.token.is_name("async") && self.peek().is_keyword("function") {
            self.parse_function_declaration(true, false)?.into_iter().collect()
        } else if self.token.is_keyword("class") {
            self.parse_class(true, false)?.into_iter().collect()
        } else {
            let at = self.token.pos;
            let saw = self.token.display();
            self.report("E024", at, vec![saw])?;
            Vec::new()
        };
        for name in names {
            self.scope.mark_exported(&name);
            self.add_export(&name, pos)?;
        }
        Ok(Stmt::of(StmtKind::Declaration))
    }

    /// E069 for a name exported twice.
    fn add_export(&mut self, name: &str, pos: SourcePosition) -> ParseResult<()> {
        if !self.exported.insert(name.to_string()) {
            return self.report("E069", pos, vec![name.to_string()]);
        }
        Ok(())
    }
}
