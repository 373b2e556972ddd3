//! Static symbol table for the Pratt parser.
//!
//! Each operator, delimiter and reserved word maps to a [`Symbol`] carrying
//! its binding power and the parselets that handle it in prefix, infix and
//! statement position. Token kinds without a fixed spelling (identifiers,
//! literals, templates) map to shared symbols.

use rustc_hash::FxHashMap;
use std::sync::OnceLock;

use crate::config::EsVersion;
use crate::token::{TemplatePart, Token, TokenKind};

/// Binding power of `,`
pub const COMMA_BP: u8 = 10;
/// Binding power of assignment operators
pub const ASSIGN_BP: u8 = 20;
/// Binding power of `? :`
pub const CONDITIONAL_BP: u8 = 30;
/// Binding power of prefix operators
pub const UNARY_BP: u8 = 150;
/// Binding power of postfix `++`/`--`
pub const POSTFIX_BP: u8 = 160;
/// Binding power of member access, calls and tagged templates
pub const CALL_BP: u8 = 170;

/// Operator associativity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    /// `a - b - c` is `(a - b) - c`
    Left,
    /// `a = b = c` is `a = (b = c)`
    Right,
}

/// How a word is reserved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reserved {
    /// Not reserved
    No,
    /// Reserved in every edition
    Always,
    /// Reserved in strict mode code
    Strict,
    /// Future reserved word of ES3 only
    Es3,
}

/// Parselet for a token in operand position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    /// Identifier reference, possibly contextual (`async`, `yield`, ...)
    Identifier,
    /// Number, BigInt, string, `true`, `false`, `null`
    Literal,
    /// Template literal
    Template,
    /// Regular expression literal
    RegExp,
    /// `#name in obj`
    PrivateName,
    /// `this`
    This,
    /// `super`
    Super,
    /// `! ~ + - typeof void delete`
    Unary,
    /// Prefix `++`/`--`
    Update,
    /// Parenthesized expression or arrow parameters
    Paren,
    /// Array literal or destructuring target
    Array,
    /// Object literal or destructuring target
    Object,
    /// Function expression or `function.sent`
    Function,
    /// Class expression
    Class,
    /// `new` expression or `new.target`
    New,
    /// `import(...)` or `import.meta`
    Import,
}

/// Parselet for a token following an operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Infix {
    /// Arithmetic, bitwise, relational and equality operators
    Binary,
    /// `&&` and `||`
    Logical,
    /// `??`
    Nullish,
    /// `**`
    Exponent,
    /// `=` and compound assignment
    Assign,
    /// `? :`
    Conditional,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `?.`
    OptionalChain,
    /// `[ ]`
    Index,
    /// `( )`
    Call,
    /// Postfix `++`/`--`
    Postfix,
    /// Template after an expression
    TaggedTemplate,
}

/// Parselet for a token in statement position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// `var`
    Var,
    /// `const`
    Const,
    /// Function declaration
    Function,
    /// Class declaration
    Class,
    /// `if`
    If,
    /// `for`
    For,
    /// `while`
    While,
    /// `do ... while`
    Do,
    /// `switch`
    Switch,
    /// `break`
    Break,
    /// `continue`
    Continue,
    /// `return`
    Return,
    /// `throw`
    Throw,
    /// `try`
    Try,
    /// `with`
    With,
    /// `debugger`
    Debugger,
    /// `{ ... }`
    Block,
    /// `;`
    Empty,
    /// `import` declaration
    Import,
    /// `export` declaration
    Export,
}

/// Grammar entry for one spelling or token kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Spelling, or a parenthesized kind name such as `(identifier)`
    pub id: &'static str,
    /// Left binding power in infix position
    pub lbp: u8,
    /// Associativity of the infix form
    pub assoc: Assoc,
    /// Operand-position parselet
    pub prefix: Option<Prefix>,
    /// Operator-position parselet
    pub infix: Option<Infix>,
    /// Statement-position parselet
    pub statement: Option<StatementKind>,
    /// Reservation of the word
    pub reserved: Reserved,
    /// First edition with the infix form
    pub since: Option<EsVersion>,
}

impl Symbol {
    const fn new(id: &'static str) -> Self {
        Self {
            id,
            lbp: 0,
            assoc: Assoc::Left,
            prefix: None,
            infix: None,
            statement: None,
            reserved: Reserved::No,
            since: None,
        }
    }

    const fn with_prefix(id: &'static str, prefix: Prefix) -> Self {
        let mut symbol = Self::new(id);
        symbol.prefix = Some(prefix);
        symbol
    }
}

static IDENTIFIER: Symbol = Symbol::with_prefix("(identifier)", Prefix::Identifier);
static LITERAL: Symbol = Symbol::with_prefix("(literal)", Prefix::Literal);
static REGEXP: Symbol = Symbol::with_prefix("(regexp)", Prefix::RegExp);
static PRIVATE_NAME: Symbol = Symbol::with_prefix("(private)", Prefix::PrivateName);
static TEMPLATE: Symbol = Symbol {
    id: "(template)",
    lbp: CALL_BP,
    assoc: Assoc::Left,
    prefix: Some(Prefix::Template),
    infix: Some(Infix::TaggedTemplate),
    statement: None,
    reserved: Reserved::No,
    since: None,
};
static END: Symbol = Symbol::new("(end)");
static UNKNOWN: Symbol = Symbol::new("(unknown)");

/// Words reserved in every edition. The lexer turns these into keywords.
const KEYWORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with",
];

const STRICT_RESERVED: &[&str] = &[
    "implements", "interface", "let", "package", "private", "protected", "public", "static",
    "yield",
];

const ES3_RESERVED: &[&str] = &[
    "abstract", "boolean", "byte", "char", "double", "final", "float", "goto", "int", "long",
    "native", "short", "synchronized", "throws", "transient", "volatile",
];

/// The symbol table.
#[derive(Debug)]
pub struct SymbolTable {
    by_spelling: FxHashMap<&'static str, Symbol>,
}

static TABLE: OnceLock<SymbolTable> = OnceLock::new();

/// Shared symbol table (lazily built on first use).
pub fn table() -> &'static SymbolTable {
    TABLE.get_or_init(SymbolTable::build)
}

/// True for words the lexer classifies as keywords.
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// How `name` is reserved when used as an identifier.
pub fn reserved_word(name: &str) -> Reserved {
    if KEYWORDS.contains(&name) {
        Reserved::Always
    } else if STRICT_RESERVED.contains(&name) {
        Reserved::Strict
    } else if ES3_RESERVED.contains(&name) {
        Reserved::Es3
    } else {
        Reserved::No
    }
}

impl SymbolTable {
    fn build() -> Self {
        let mut table = SymbolTable {
            by_spelling: FxHashMap::default(),
        };

        for word in KEYWORDS {
            table.entry(word).reserved = Reserved::Always;
        }

        table.infix(",", COMMA_BP, Infix::Comma);
        for op in ["=", "+=", "-=", "*=", "/=", "%=", "<<=", ">>=", ">>>=", "&=", "|=", "^="] {
            table.infixr(op, ASSIGN_BP, Infix::Assign);
        }
        table.infixr("**=", ASSIGN_BP, Infix::Assign).since = Some(EsVersion::Es2016);
        for op in ["&&=", "||=", "??="] {
            table.infixr(op, ASSIGN_BP, Infix::Assign).since = Some(EsVersion::Es2021);
        }
        table.infixr("?", CONDITIONAL_BP, Infix::Conditional);
        table.infix("??", 35, Infix::Nullish).since = Some(EsVersion::Es2020);
        table.infix("||", 40, Infix::Logical);
        table.infix("&&", 50, Infix::Logical);
        table.infix("|", 60, Infix::Binary);
        table.infix("^", 70, Infix::Binary);
        table.infix("&", 80, Infix::Binary);
        for op in ["==", "!=", "===", "!=="] {
            table.infix(op, 90, Infix::Binary);
        }
        for op in ["<", ">", "<=", ">=", "in", "instanceof"] {
            table.infix(op, 100, Infix::Binary);
        }
        for op in ["<<", ">>", ">>>"] {
            table.infix(op, 110, Infix::Binary);
        }
        for op in ["+", "-"] {
            table.infix(op, 120, Infix::Binary);
        }
        for op in ["*", "/", "%"] {
            table.infix(op, 130, Infix::Binary);
        }
        table.infixr("**", 140, Infix::Exponent).since = Some(EsVersion::Es2016);
        for op in ["++", "--"] {
            table.infix(op, POSTFIX_BP, Infix::Postfix);
            table.prefix(op, Prefix::Update);
        }
        table.infix(".", CALL_BP, Infix::Dot);
        table.infix("?.", CALL_BP, Infix::OptionalChain).since = Some(EsVersion::Es2020);
        table.infix("[", CALL_BP, Infix::Index);
        table.infix("(", CALL_BP, Infix::Call);

        for op in ["!", "~", "+", "-", "typeof", "void", "delete"] {
            table.prefix(op, Prefix::Unary);
        }
        table.prefix("(", Prefix::Paren);
        table.prefix("[", Prefix::Array);
        table.prefix("{", Prefix::Object);
        for word in ["true", "false", "null"] {
            table.prefix(word, Prefix::Literal);
        }
        table.prefix("this", Prefix::This);
        table.prefix("super", Prefix::Super);
        table.prefix("function", Prefix::Function);
        table.prefix("class", Prefix::Class);
        table.prefix("new", Prefix::New);
        table.prefix("import", Prefix::Import);

        for (word, kind) in [
            ("var", StatementKind::Var),
            ("const", StatementKind::Const),
            ("function", StatementKind::Function),
            ("class", StatementKind::Class),
            ("if", StatementKind::If),
            ("for", StatementKind::For),
            ("while", StatementKind::While),
            ("do", StatementKind::Do),
            ("switch", StatementKind::Switch),
            ("break", StatementKind::Break),
            ("continue", StatementKind::Continue),
            ("return", StatementKind::Return),
            ("throw", StatementKind::Throw),
            ("try", StatementKind::Try),
            ("with", StatementKind::With),
            ("debugger", StatementKind::Debugger),
            ("{", StatementKind::Block),
            (";", StatementKind::Empty),
            ("import", StatementKind::Import),
            ("export", StatementKind::Export),
        ] {
            table.entry(word).statement = Some(kind);
        }

        for delimiter in [")", "]", "}", ":", ";", "=>", "...", "#"] {
            table.entry(delimiter);
        }

        table
    }

    fn entry(&mut self, id: &'static str) -> &mut Symbol {
        self.by_spelling.entry(id).or_insert_with(|| Symbol::new(id))
    }

    fn infix(&mut self, id: &'static str, lbp: u8, infix: Infix) -> &mut Symbol {
        let symbol = self.entry(id);
        symbol.lbp = lbp;
        symbol.infix = Some(infix);
        symbol
    }

    fn infixr(&mut self, id: &'static str, lbp: u8, infix: Infix) -> &mut Symbol {
        let symbol = self.infix(id, lbp, infix);
        symbol.assoc = Assoc::Right;
        symbol
    }

    fn prefix(&mut self, id: &'static str, prefix: Prefix) -> &mut Symbol {
        let symbol = self.entry(id);
        symbol.prefix = Some(prefix);
        symbol
    }

    /// Symbol for a spelling, if the grammar knows it.
    pub fn get(&self, spelling: &str) -> Option<&Symbol> {
        self.by_spelling.get(spelling)
    }

    /// Symbol governing `token`.
    ///
    /// Unknown punctuators and stray template continuations map to a
    /// symbol with no parselets so the parser reports them.
    pub fn lookup(&self, token: &Token) -> &Symbol {
        match token.kind {
            TokenKind::Identifier => &IDENTIFIER,
            TokenKind::Number | TokenKind::BigInt | TokenKind::String => &LITERAL,
            TokenKind::RegExp => &REGEXP,
            TokenKind::PrivateName => &PRIVATE_NAME,
            TokenKind::Template(TemplatePart::NoSubstitution | TemplatePart::Head) => &TEMPLATE,
            TokenKind::Template(_) => &UNKNOWN,
            TokenKind::Eof => &END,
            TokenKind::Keyword | TokenKind::Punctuator => {
                self.by_spelling.get(token.raw.as_str()).unwrap_or(&UNKNOWN)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_powers_are_ordered() {
        let t = table();
        let bp = |id: &str| t.get(id).unwrap().lbp;
        assert!(bp(",") < bp("="));
        assert!(bp("=") < bp("?"));
        assert!(bp("?") < bp("??"));
        assert!(bp("||") < bp("&&"));
        assert!(bp("==") < bp("<"));
        assert!(bp("+") < bp("*"));
        assert!(bp("*") < bp("**"));
        assert!(bp("**") < bp("."));
        assert_eq!(bp("instanceof"), bp("in"));
    }

    #[test]
    fn test_right_associative_operators() {
        let t = table();
        assert_eq!(t.get("=").unwrap().assoc, Assoc::Right);
        assert_eq!(t.get("**").unwrap().assoc, Assoc::Right);
        assert_eq!(t.get("-").unwrap().assoc, Assoc::Left);
    }

    #[test]
    fn test_dual_role_symbols() {
        let t = table();
        let plus = t.get("+").unwrap();
        assert_eq!(plus.prefix, Some(Prefix::Unary));
        assert_eq!(plus.infix, Some(Infix::Binary));
        let paren = t.get("(").unwrap();
        assert_eq!(paren.prefix, Some(Prefix::Paren));
        assert_eq!(paren.infix, Some(Infix::Call));
        let function = t.get("function").unwrap();
        assert_eq!(function.statement, Some(StatementKind::Function));
        assert_eq!(function.reserved, Reserved::Always);
    }

    #[test]
    fn test_edition_gated_operators() {
        let t = table();
        assert_eq!(t.get("**").unwrap().since, Some(EsVersion::Es2016));
        assert_eq!(t.get("??=").unwrap().since, Some(EsVersion::Es2021));
        assert_eq!(t.get("+").unwrap().since, None);
    }

    #[test]
    fn test_reserved_words() {
        assert_eq!(reserved_word("class"), Reserved::Always);
        assert_eq!(reserved_word("yield"), Reserved::Strict);
        assert_eq!(reserved_word("goto"), Reserved::Es3);
        assert_eq!(reserved_word("of"), Reserved::No);
        assert!(is_keyword("enum"));
        assert!(!is_keyword("let"));
    }
}
