//! Functions, classes and object literals.

use core_types::SourcePosition;
use rustc_hash::FxHashMap;

use super::patterns::BoundNames;
use super::{Expr, ExprKind, Parser};
use crate::config::{EsVersion, StrictMode};
use crate::error::ParseResult;
use crate::scope::{DeclKind, FrameKind, FunctionInfo};
use crate::symbols::{COMMA_BP, POSTFIX_BP};
use crate::token::TokenKind;

/// A parsed formal parameter list.
#[derive(Debug, Default)]
pub(crate) struct ParamList {
    /// Bound names, patterns flattened
    pub(crate) names: BoundNames,
    /// Number of formal parameters
    pub(crate) count: usize,
    /// No defaults, rest or patterns
    pub(crate) simple: bool,
    /// Per bound name, end of the default that initializes it
    pub(crate) defaults_end: Vec<Option<usize>>,
}

/// Accessor or method flavor of a property definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PropertyKind {
    Data,
    Getter,
    Setter,
}

impl PropertyKind {
    fn word(self) -> &'static str {
        match self {
            PropertyKind::Data => "key",
            PropertyKind::Getter => "getter",
            PropertyKind::Setter => "setter",
        }
    }
}

/// Modifiers read before a property or class member name.
#[derive(Debug, Default, Clone, Copy)]
struct Modifiers {
    is_async: bool,
    generator: bool,
    accessor: Option<PropertyKind>,
}

/// Tokens after `get`, `set`, `async` or `static` that make the word a
/// property name of its own.
fn ends_property_name(raw: &str) -> bool {
    matches!(raw, "(" | "," | ":" | "}" | "=" | ";")
}

impl<'a> Parser<'a> {
    /// `function` declaration at the lookahead (or `async function`).
    ///
    /// Returns the declared name. `anonymous` allows a missing name
    /// (`export default function () {}`).
    pub(crate) fn parse_function_declaration(&mut self, is_async: bool, anonymous: bool) -> ParseResult<Option<String>> {
        let pos = self.token.pos;
        if is_async {
            self.require_edition("async functions", EsVersion::Es2017, pos)?;
            self.advance()?;
        }
        self.advance()?;
        let generator = self.generator_star()?;

        let name = if anonymous && self.token.is_punct("(") {
            None
        } else {
            self.binding_identifier()?
        };
        if let Some((name, at)) = &name {
            let in_block = matches!(self.scope.current().kind, FrameKind::Block | FrameKind::Catch);
            if in_block && self.config.esversion.is_es6() {
                self.scope.declare_block_function(name, *at, &mut self.sink)?;
            } else {
                if in_block {
                    self.report("W082", pos, Vec::new())?;
                }
                self.scope.declare_variable(name, DeclKind::Function, *at, &mut self.sink)?;
            }
        }

        let info = FunctionInfo {
            name: name.as_ref().map(|(name, _)| name.clone()).unwrap_or_default(),
            generator,
            is_async,
            ..FunctionInfo::default()
        };
        self.parse_function_rest(info, pos, None)?;
        Ok(name.map(|(name, _)| name))
    }

    /// `function` expression at the lookahead (or `async function`).
    pub(crate) fn parse_function_expression(&mut self, is_async: bool) -> ParseResult<Expr> {
        let pos = self.token.pos;
        if is_async {
            self.require_edition("async functions", EsVersion::Es2017, pos)?;
            self.advance()?;
        }
        self.advance()?;
        let generator = self.generator_star()?;
        let name = if self.at_binding_identifier() {
            self.binding_identifier()?
        } else {
            None
        };
        let info = FunctionInfo {
            name: name.as_ref().map(|(name, _)| name.clone()).unwrap_or_default(),
            generator,
            is_async,
            ..FunctionInfo::default()
        };
        self.parse_function_rest(info, pos, name)?;
        Ok(Expr::new(ExprKind::Function, pos))
    }

    fn generator_star(&mut self) -> ParseResult<bool> {
        if !self.token.is_punct("*") {
            return Ok(false);
        }
        let pos = self.token.pos;
        self.require_es6_or_moz("function*", pos)?;
        self.advance()?;
        Ok(true)
    }

    /// Parameters and body of a function whose frame is not yet open.
    pub(crate) fn parse_function_rest(
        &mut self,
        info: FunctionInfo,
        pos: SourcePosition,
        own_name: Option<(String, SourcePosition)>,
    ) -> ParseResult<ParamList> {
        let generator = info.generator;
        let method = info.method;
        self.scope.enter_function(info, pos);
        if let Some((name, at)) = &own_name {
            self.scope.declare_function_name(name, *at);
        }
        let params = self.parse_parameters()?;
        self.declare_params(&params, method)?;
        self.parse_function_body(&params)?;
        if generator && self.scope.function_frame().yields == 0 {
            self.report("W124", pos, Vec::new())?;
        }
        self.scope.exit_scope(&mut self.sink)?;
        Ok(params)
    }

    /// Formal parameters in parentheses.
    pub(crate) fn parse_parameters(&mut self) -> ParseResult<ParamList> {
        let mut list = ParamList {
            simple: true,
            ..ParamList::default()
        };
        self.expect_punctuator("(")?;
        let mut seen_default = false;
        let mut after_rest = false;
        loop {
            if self.token.is_punct(")") {
                break;
            }
            if self.token.is_eof() {
                self.early_end()?;
            }
            let param_pos = self.token.pos;
            if after_rest {
                self.report("W131", param_pos, Vec::new())?;
            }
            let rest = self.token.is_punct("...");
            if rest {
                self.require_edition("rest parameter", EsVersion::Es2015, param_pos)?;
                self.advance()?;
                list.simple = false;
            }
            let first_name = list.names.len();
            if !self.parse_binding_target(&mut list.names)? {
                list.simple = false;
            }
            let mut default_end = None;
            if self.token.is_punct("=") {
                let at = self.token.pos;
                if rest {
                    self.report("E062", at, Vec::new())?;
                }
                self.require_edition("default parameters", EsVersion::Es2015, at)?;
                self.advance()?;
                self.with_in(|p| p.parse_expression(COMMA_BP))?;
                default_end = Some(self.prev.span.end);
                seen_default = true;
                list.simple = false;
            } else if seen_default && !rest {
                self.report("W138", param_pos, Vec::new())?;
            }
            list.defaults_end.extend(std::iter::repeat(default_end).take(list.names.len() - first_name));
            list.count += 1;
            after_rest |= rest;
            if !self.token.is_punct(",") {
                break;
            }
            let comma = self.token.pos;
            self.advance()?;
            if self.token.is_punct(")") {
                self.require_edition("Trailing comma in function parameters", EsVersion::Es2017, comma)?;
            }
        }
        self.expect_punctuator(")")?;
        Ok(list)
    }

    /// Declare parameters in the function frame just entered.
    fn declare_params(&mut self, params: &ParamList, method: bool) -> ParseResult<()> {
        let arrow = self.scope.function_frame().info.arrow;
        let strict_list = self.scope.is_strict() || !params.simple || arrow || method;
        // references resolve at frame close, so a parameter's dead zone
        // only has to end after its own default
        for (i, (name, pos)) in params.names.iter().enumerate() {
            self.scope.declare_param(name, *pos, strict_list, &mut self.sink)?;
            if let Some(Some(end)) = params.defaults_end.get(i) {
                self.scope.mark_initialized(name, *end);
            }
        }
        Ok(())
    }

    /// `{ body }` of a function, starting with its directive prologue.
    pub(crate) fn parse_function_body(&mut self, params: &ParamList) -> ParseResult<()> {
        if !self.token.is_punct("{") {
            return self.expect_punctuator("{");
        }
        let pos = self.token.pos;
        self.advance()?;
        self.directive_prologue(Some(params.simple))?;
        if self.config.strict == StrictMode::Required && !self.scope.is_strict() {
            self.report("E007", pos, Vec::new())?;
        }
        self.parse_statements(false)?;
        self.expect_punctuator("}")
    }

    /// Arrow function at the lookahead: `x =>`, `(...) =>`, or the same
    /// after `async`.
    pub(crate) fn parse_arrow_function(&mut self, is_async: bool) -> ParseResult<Expr> {
        let pos = self.token.pos;
        self.require_edition("arrow function syntax (=>)", EsVersion::Es2015, pos)?;
        if is_async {
            self.require_edition("async functions", EsVersion::Es2017, pos)?;
            self.advance()?;
        }
        let info = FunctionInfo {
            arrow: true,
            is_async,
            ..FunctionInfo::default()
        };
        self.scope.enter_function(info, pos);

        let params = if self.token.is_punct("(") {
            self.parse_parameters()?
        } else {
            let mut list = ParamList {
                simple: true,
                count: 1,
                ..ParamList::default()
            };
            if let Some(bound) = self.binding_identifier()? {
                list.names.push(bound);
            }
            list
        };
        self.declare_params(&params, false)?;
        self.expect_punctuator("=>")?;

        if self.token.is_punct("{") {
            self.parse_function_body(&params)?;
        } else {
            self.parse_expression(COMMA_BP)?;
        }
        self.scope.exit_scope(&mut self.sink)?;
        Ok(Expr::new(ExprKind::Arrow, pos))
    }

    /// Method, accessor or constructor body after its name.
    fn parse_method(&mut self, name: Option<&str>, modifiers: Modifiers, constructor: bool) -> ParseResult<ParamList> {
        let pos = self.token.pos;
        let info = FunctionInfo {
            name: name.unwrap_or_default().to_string(),
            generator: modifiers.generator,
            is_async: modifiers.is_async,
            method: true,
            constructor,
            ..FunctionInfo::default()
        };
        let params = self.parse_function_rest(info, pos, None)?;

        let shown = name.unwrap_or("(computed)").to_string();
        match modifiers.accessor {
            Some(PropertyKind::Getter) if params.count != 0 => {
                let first = params.names.first().map(|(n, _)| n.clone()).unwrap_or_default();
                self.report("W076", pos, vec![first, shown])?;
            }
            Some(PropertyKind::Setter) if params.count != 1 => {
                self.report("W077", pos, vec![shown])?;
            }
            _ => {}
        }
        Ok(params)
    }

    /// Read `async`, `*`, `get` and `set` prefixes of a property.
    fn property_modifiers(&mut self) -> ParseResult<Modifiers> {
        let mut modifiers = Modifiers::default();
        if self.token.kind == TokenKind::Identifier && !self.token.flags.escaped {
            let word = self.token.name().to_string();
            if matches!(word.as_str(), "get" | "set" | "async") {
                let next = self.peek();
                let own_name = next.kind == TokenKind::Punctuator && ends_property_name(&next.raw);
                if !own_name && !(word == "async" && next.flags.newline_before) {
                    let pos = self.token.pos;
                    match word.as_str() {
                        "get" => modifiers.accessor = Some(PropertyKind::Getter),
                        "set" => modifiers.accessor = Some(PropertyKind::Setter),
                        _ => {
                            self.require_edition("async functions", EsVersion::Es2017, pos)?;
                            modifiers.is_async = true;
                        }
                    }
                    if modifiers.accessor.is_some() && self.config.esversion == EsVersion::Es3 {
                        self.report("E034", pos, Vec::new())?;
                    }
                    self.advance()?;
                }
            }
        }
        if self.token.is_punct("*") {
            let pos = self.token.pos;
            self.require_es6_or_moz("generator methods", pos)?;
            modifiers.generator = true;
            self.advance()?;
        }
        Ok(modifiers)
    }

    /// Property name at the lookahead. `None` for computed keys.
    fn parse_property_key(&mut self) -> ParseResult<Option<String>> {
        match self.token.kind {
            TokenKind::Identifier | TokenKind::Keyword => {
                let name = self.token.name().to_string();
                if self.token.kind == TokenKind::Keyword && self.config.esversion == EsVersion::Es3 {
                    let pos = self.token.pos;
                    self.report("W024", pos, vec![name.clone()])?;
                }
                self.advance()?;
                Ok(Some(name))
            }
            TokenKind::String => {
                let name = self.token.display();
                self.advance()?;
                Ok(Some(name))
            }
            TokenKind::Number | TokenKind::BigInt | TokenKind::PrivateName => {
                let name = self.token.raw.clone();
                self.advance()?;
                Ok(Some(name))
            }
            TokenKind::Punctuator if self.token.is_punct("[") => {
                self.computed_key()?;
                Ok(None)
            }
            _ => {
                let pos = self.token.pos;
                let saw = self.token.display();
                self.report("E030", pos, vec![saw])?;
                Ok(None)
            }
        }
    }

    /// Object literal at `{`.
    pub(crate) fn parse_object_literal(&mut self) -> ParseResult<Expr> {
        let pos = self.token.pos;
        self.advance()?;
        let mut seen: FxHashMap<String, PropertyKind> = FxHashMap::default();
        let mut setters: Vec<(String, SourcePosition)> = Vec::new();

        self.with_in(|p| {
            loop {
                if p.token.is_punct("}") {
                    break;
                }
                if p.token.is_eof() {
                    return p.early_end();
                }
                let prop_pos = p.token.pos;
                let start = p.token.span.start;

                if p.token.is_punct("...") {
                    p.require_edition("object spread property", EsVersion::Es2018, prop_pos)?;
                    p.advance()?;
                    p.parse_expression(COMMA_BP)?;
                } else {
                    let shorthand = p.token.kind == TokenKind::Identifier;
                    let modifiers = p.property_modifiers()?;
                    let key = p.parse_property_key()?;
                    let kind = modifiers.accessor.unwrap_or(PropertyKind::Data);

                    if modifiers.accessor.is_some() {
                        p.parse_method(key.as_deref(), modifiers, false)?;
                    } else if p.token.is_punct("(") {
                        p.require_edition("concise methods", EsVersion::Es2015, prop_pos)?;
                        p.parse_method(key.as_deref(), modifiers, false)?;
                    } else if p.token.is_punct(":") {
                        p.advance()?;
                        p.parse_expression(COMMA_BP)?;
                    } else if shorthand && key.is_some() && !modifiers.generator && !modifiers.is_async {
                        p.require_edition("object short notation", EsVersion::Es2015, prop_pos)?;
                        if let Some(name) = &key {
                            p.scope.reference_variable(name, prop_pos, crate::scope::Access::Read);
                        }
                    } else {
                        p.expect_punctuator(":")?;
                        if p.token.span.start == start {
                            break;
                        }
                    }

                    if let Some(name) = key {
                        match (seen.get(&name).copied(), kind) {
                            (None, _) => {
                                seen.insert(name.clone(), kind);
                            }
                            (Some(PropertyKind::Getter), PropertyKind::Setter)
                            | (Some(PropertyKind::Setter), PropertyKind::Getter) => {
                                seen.insert(name.clone(), PropertyKind::Data);
                            }
                            (Some(_), kind) => {
                                p.report("W075", prop_pos, vec![kind.word().to_string(), name.clone()])?;
                            }
                        }
                        if kind == PropertyKind::Setter {
                            setters.push((name, prop_pos));
                        }
                    }
                }

                if !p.token.is_punct(",") {
                    break;
                }
                let comma = p.token.pos;
                p.advance()?;
                if p.token.is_punct("}") && p.config.esversion == EsVersion::Es3 {
                    p.report("W070", comma, Vec::new())?;
                }
            }
            Ok(())
        })?;
        self.expect_punctuator("}")?;

        for (name, at) in setters {
            if seen.get(&name) == Some(&PropertyKind::Setter) {
                self.report("W078", at, Vec::new())?;
            }
        }
        Ok(Expr::new(ExprKind::Object, pos))
    }

    /// Class declaration or expression at `class`.
    ///
    /// Declarations bind their name in the enclosing block; a missing name
    /// is accepted when `anonymous` is set.
    pub(crate) fn parse_class(&mut self, declaration: bool, anonymous: bool) -> ParseResult<Option<String>> {
        let pos = self.token.pos;
        self.require_edition("class", EsVersion::Es2015, pos)?;
        self.advance()?;

        let name = if self.at_binding_identifier() && !self.token.is_keyword("extends") {
            self.binding_identifier()?
        } else {
            if !anonymous {
                let at = self.token.pos;
                let saw = self.token.display();
                self.report("E030", at, vec![saw])?;
            }
            None
        };
        if declaration {
            if let Some((name, at)) = &name {
                self.scope.declare_variable(name, DeclKind::Class, *at, &mut self.sink)?;
            }
        }

        self.scope.enter_scope(FrameKind::Class, pos);
        if !declaration {
            if let Some((name, at)) = &name {
                self.scope.declare_variable(name, DeclKind::Class, *at, &mut self.sink)?;
            }
        }
        if self.token.is_keyword("extends") {
            self.advance()?;
            self.parse_expression(POSTFIX_BP)?;
        }
        if let Some((name, _)) = &name {
            let body = self.token.span.start;
            self.scope.mark_initialized(name, body);
        }
        self.expect_punctuator("{")?;
        loop {
            if self.token.is_punct("}") {
                break;
            }
            if self.token.is_eof() {
                self.early_end()?;
            }
            let start = self.token.span.start;
            self.parse_class_member()?;
            if self.token.span.start == start {
                let at = self.token.pos;
                let saw = self.token.display();
                self.report("E024", at, vec![saw])?;
                self.advance()?;
            }
        }
        self.scope.exit_scope(&mut self.sink)?;
        self.expect_punctuator("}")?;
        Ok(name.map(|(name, _)| name))
    }

    fn parse_class_member(&mut self) -> ParseResult<()> {
        if self.token.is_punct(";") {
            return self.advance();
        }
        let pos = self.token.pos;
        let mut is_static = false;
        if self.token.is_name("static") {
            let next = self.peek();
            if !(next.kind == TokenKind::Punctuator && ends_property_name(&next.raw) && !next.is_punct("{")) {
                is_static = true;
                self.advance()?;
                if self.token.is_punct("{") {
                    return self.parse_static_block(pos);
                }
            }
        }

        let private = self.token.kind == TokenKind::PrivateName;
        if private {
            self.require_edition("Private class members", EsVersion::Es2022, pos)?;
        }
        let modifiers = self.property_modifiers()?;
        let key = self.parse_property_key()?;

        if self.token.is_punct("(") {
            let constructor = !is_static && modifiers.accessor.is_none() && key.as_deref() == Some("constructor");
            self.parse_method(key.as_deref(), modifiers, constructor)?;
            return Ok(());
        }

        // field definition
        self.require_edition("Class properties", EsVersion::Es2022, pos)?;
        if self.token.is_punct("=") {
            self.advance()?;
            let info = FunctionInfo {
                name: key.unwrap_or_default(),
                method: true,
                ..FunctionInfo::default()
            };
            self.scope.enter_function(info, pos);
            self.parse_expression(COMMA_BP)?;
            self.scope.exit_scope(&mut self.sink)?;
        }
        self.consume_semicolon()
    }

    fn parse_static_block(&mut self, pos: SourcePosition) -> ParseResult<()> {
        self.require_edition("Class static blocks", EsVersion::Es2022, pos)?;
        let info = FunctionInfo {
            name: "static".to_string(),
            method: true,
            ..FunctionInfo::default()
        };
        self.scope.enter_function(info, pos);
        self.advance()?;
        self.parse_statements(false)?;
        self.scope.exit_scope(&mut self.sink)?;
        self.expect_punctuator("}")
    }
}
