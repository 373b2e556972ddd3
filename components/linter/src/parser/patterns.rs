//! Destructuring patterns.
//!
//! Binding patterns (declarations, parameters, catch clauses) only collect
//! the names they bind; the caller declares them with the right kind.
//! Assignment patterns record every target as a write.

use core_types::SourcePosition;

use super::{Expr, ExprKind, Parser};
use crate::config::EsVersion;
use crate::error::ParseResult;
use crate::scope::Access;
use crate::symbols::{ASSIGN_BP, COMMA_BP};
use crate::token::TokenKind;

/// Names bound by a declaration target, in source order.
pub(crate) type BoundNames = Vec<(String, SourcePosition)>;

impl<'a> Parser<'a> {
    /// Parse an identifier or binding pattern, appending the bound names.
    /// Returns true for a plain identifier.
    pub(crate) fn parse_binding_target(&mut self, names: &mut BoundNames) -> ParseResult<bool> {
        if self.token.is_punct("[") {
            self.parse_array_binding(names)?;
            Ok(false)
        } else if self.token.is_punct("{") {
            self.parse_object_binding(names)?;
            Ok(false)
        } else {
            if let Some(bound) = self.binding_identifier()? {
                names.push(bound);
            }
            Ok(true)
        }
    }

    fn parse_array_binding(&mut self, names: &mut BoundNames) -> ParseResult<()> {
        let pos = self.token.pos;
        self.require_edition("destructuring binding", EsVersion::Es2015, pos)?;
        self.advance()?;
        let before = names.len();
        let mut elements = 0;
        let mut after_rest = false;
        loop {
            if self.token.is_punct("]") {
                break;
            }
            if self.token.is_punct(",") {
                elements += 1;
                self.advance()?;
                continue;
            }
            if after_rest {
                let at = self.token.pos;
                self.report("W130", at, Vec::new())?;
            }
            if self.token.is_punct("...") {
                self.advance()?;
                after_rest = true;
            }
            elements += 1;
            self.parse_binding_target(names)?;
            self.binding_default()?;
            if !self.token.is_punct(",") {
                break;
            }
            self.advance()?;
        }
        self.expect_punctuator("]")?;
        if elements == 0 && names.len() == before {
            self.report("W137", pos, Vec::new())?;
        }
        Ok(())
    }

    fn parse_object_binding(&mut self, names: &mut BoundNames) -> ParseResult<()> {
        let pos = self.token.pos;
        self.require_edition("destructuring binding", EsVersion::Es2015, pos)?;
        self.advance()?;
        let mut properties = 0;
        loop {
            if self.token.is_punct("}") {
                break;
            }
            properties += 1;
            if self.token.is_punct("...") {
                let at = self.token.pos;
                self.require_edition("object rest property", EsVersion::Es2018, at)?;
                self.advance()?;
                if let Some(bound) = self.binding_identifier()? {
                    names.push(bound);
                }
            } else if self.token.is_punct("[") {
                self.computed_key()?;
                self.expect_punctuator(":")?;
                self.parse_binding_target(names)?;
            } else if self.is_property_key() {
                if self.peek().is_punct(":") {
                    self.advance()?;
                    self.advance()?;
                    self.parse_binding_target(names)?;
                } else if let Some(bound) = self.binding_identifier()? {
                    names.push(bound);
                }
            } else {
                let at = self.token.pos;
                let saw = self.token.display();
                self.report("E030", at, vec![saw])?;
                break;
            }
            self.binding_default()?;
            if !self.token.is_punct(",") {
                break;
            }
            self.advance()?;
        }
        self.expect_punctuator("}")?;
        if properties == 0 {
            self.report("W137", pos, Vec::new())?;
        }
        Ok(())
    }

    /// Optional `= default` after a pattern element.
    fn binding_default(&mut self) -> ParseResult<()> {
        if self.token.is_punct("=") {
            self.advance()?;
            self.with_in(|p| p.parse_expression(COMMA_BP))?;
        }
        Ok(())
    }

    /// `[expr]` property key.
    pub(crate) fn computed_key(&mut self) -> ParseResult<()> {
        let pos = self.token.pos;
        self.require_edition("computed property names", EsVersion::Es2015, pos)?;
        self.advance()?;
        self.with_in(|p| p.parse_expression(COMMA_BP))?;
        self.expect_punctuator("]")
    }

    /// Tokens that can name a property without brackets.
    pub(crate) fn is_property_key(&self) -> bool {
        matches!(
            self.token.kind,
            TokenKind::Identifier | TokenKind::Keyword | TokenKind::String | TokenKind::Number | TokenKind::BigInt
        )
    }

    /// Destructuring assignment target starting at `[` or `{`.
    pub(crate) fn parse_assignment_pattern(&mut self) -> ParseResult<Expr> {
        let pos = self.token.pos;
        self.require_edition("destructuring assignment", EsVersion::Es2015, pos)?;
        self.assignment_pattern_body()?;
        Ok(Expr::new(ExprKind::Pattern, pos))
    }

    fn assignment_pattern_body(&mut self) -> ParseResult<()> {
        let pos = self.token.pos;
        let array = self.token.is_punct("[");
        let closer = if array { "]" } else { "}" };
        self.advance()?;
        let mut elements = 0;
        let mut after_rest = false;
        loop {
            if self.token.is_punct(closer) {
                break;
            }
            if array && self.token.is_punct(",") {
                elements += 1;
                self.advance()?;
                continue;
            }
            if after_rest {
                let at = self.token.pos;
                self.report("W130", at, Vec::new())?;
            }
            elements += 1;
            if self.token.is_punct("...") {
                self.advance()?;
                after_rest = true;
                self.assignment_element()?;
            } else if array {
                self.assignment_element()?;
            } else {
                self.assignment_property()?;
            }
            if !self.token.is_punct(",") {
                break;
            }
            self.advance()?;
        }
        self.expect_punctuator(closer)?;
        if elements == 0 {
            self.report("W137", pos, Vec::new())?;
        }
        Ok(())
    }

    fn assignment_property(&mut self) -> ParseResult<()> {
        if self.token.is_punct("[") {
            self.computed_key()?;
            self.expect_punctuator(":")?;
            return self.assignment_element();
        }
        if !self.is_property_key() {
            let at = self.token.pos;
            let saw = self.token.display();
            return self.report("E030", at, vec![saw]);
        }
        if self.peek().is_punct(":") {
            self.advance()?;
            self.advance()?;
            return self.assignment_element();
        }
        // shorthand `{ a }` or `{ a = 1 }`
        if self.token.kind != TokenKind::Identifier {
            let at = self.token.pos;
            let saw = self.token.display();
            return self.report("E030", at, vec![saw]);
        }
        let name = self.token.name().to_string();
        let pos = self.token.pos;
        self.advance()?;
        self.scope.reference_variable(&name, pos, Access::Write);
        self.binding_default()
    }

    fn assignment_element(&mut self) -> ParseResult<()> {
        let nested = (self.token.is_punct("[") || self.token.is_punct("{"))
            && matches!(self.token_after_group().raw.as_str(), "=" | "," | "]" | "}");
        if nested {
            self.assignment_pattern_body()?;
        } else {
            let target = self.parse_expression(ASSIGN_BP)?;
            self.assignment_target(&target, Access::Write)?;
        }
        self.binding_default()
    }
}

#[cfg(test)]
mod tests {
    use crate::{analyze, EsVersion, KnownGlobals, LintConfig};

    fn codes(source: &str) -> Vec<&'static str> {
        analyze(source, &LintConfig::with_esversion(EsVersion::Es2018), &KnownGlobals::new()).codes()
    }

    #[test]
    fn test_binding_patterns_declare_names() {
        let mut config = LintConfig::with_esversion(EsVersion::Es2018);
        config.undef = true;
        let source = "var { a, b: [c, d = 1], ...rest } = obj; a + c + d + rest.x;";
        let mut known = KnownGlobals::new();
        known.insert("obj".to_string(), false);
        let analysis = analyze(source, &config, &known);
        assert_eq!(analysis.codes(), vec!["W030"]);
    }

    #[test]
    fn test_empty_destructuring() {
        assert_eq!(codes("var [] = a;"), vec!["W137"]);
        assert_eq!(codes("var {} = a;"), vec!["W137"]);
    }

    #[test]
    fn test_element_after_rest() {
        assert_eq!(codes("var [...a, b] = c;"), vec!["W130"]);
    }

    #[test]
    fn test_destructuring_needs_es6() {
        let config = LintConfig::with_esversion(EsVersion::Es5);
        let analysis = analyze("var [a] = b;", &config, &KnownGlobals::new());
        assert_eq!(analysis.codes(), vec!["W119"]);
    }

    #[test]
    fn test_assignment_pattern_targets() {
        assert!(codes("var a, b; [a, b] = [b, a]; ({ a, b: b } = o);").is_empty());
        assert_eq!(codes("[a + 1] = c;"), vec!["E031"]);
    }

    #[test]
    fn test_assignment_pattern_writes_constants() {
        assert_eq!(codes("const a = 1; [a] = [2];"), vec!["E013"]);
    }
}
