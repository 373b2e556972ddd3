//! Lint configuration.
//!
//! Keys follow the `.jshintrc` convention so existing configuration files
//! deserialize directly. Options that accept either a boolean or a keyword
//! (`strict`, `unused`, `shadow`) go through [`FlagOrWord`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Language edition the analyzed source targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum EsVersion {
    /// ECMAScript 3
    Es3,
    /// ECMAScript 5
    Es5,
    /// ECMAScript 2015 (6)
    Es2015,
    /// ECMAScript 2016 (7)
    Es2016,
    /// ECMAScript 2017 (8)
    Es2017,
    /// ECMAScript 2018 (9)
    Es2018,
    /// ECMAScript 2019 (10)
    Es2019,
    /// ECMAScript 2020 (11)
    Es2020,
    /// ECMAScript 2021 (12)
    Es2021,
    /// ECMAScript 2022 (13)
    Es2022,
}

impl EsVersion {
    /// Every supported edition, oldest first.
    pub const ALL: [EsVersion; 10] = [
        EsVersion::Es3,
        EsVersion::Es5,
        EsVersion::Es2015,
        EsVersion::Es2016,
        EsVersion::Es2017,
        EsVersion::Es2018,
        EsVersion::Es2019,
        EsVersion::Es2020,
        EsVersion::Es2021,
        EsVersion::Es2022,
    ];

    /// Parse an edition number, accepting both `6` and `2015` styles.
    pub fn from_number(n: u32) -> Option<Self> {
        let edition = match n {
            3 => EsVersion::Es3,
            5 => EsVersion::Es5,
            6 | 2015 => EsVersion::Es2015,
            7 | 2016 => EsVersion::Es2016,
            8 | 2017 => EsVersion::Es2017,
            9 | 2018 => EsVersion::Es2018,
            10 | 2019 => EsVersion::Es2019,
            11 | 2020 => EsVersion::Es2020,
            12 | 2021 => EsVersion::Es2021,
            13 | 2022 => EsVersion::Es2022,
            _ => return None,
        };
        Some(edition)
    }

    /// Short edition number as used in messages (`6`, `11`, ...).
    pub fn number(self) -> u32 {
        match self {
            EsVersion::Es3 => 3,
            EsVersion::Es5 => 5,
            EsVersion::Es2015 => 6,
            EsVersion::Es2016 => 7,
            EsVersion::Es2017 => 8,
            EsVersion::Es2018 => 9,
            EsVersion::Es2019 => 10,
            EsVersion::Es2020 => 11,
            EsVersion::Es2021 => 12,
            EsVersion::Es2022 => 13,
        }
    }

    /// True from ES2015 on.
    pub fn is_es6(self) -> bool {
        self >= EsVersion::Es2015
    }
}

impl Default for EsVersion {
    fn default() -> Self {
        EsVersion::Es5
    }
}

impl TryFrom<u32> for EsVersion {
    type Error = String;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        EsVersion::from_number(n).ok_or_else(|| format!("unsupported esversion {}", n))
    }
}

impl From<EsVersion> for u32 {
    fn from(edition: EsVersion) -> u32 {
        edition.number()
    }
}

impl fmt::Display for EsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ES{}", self.number())
    }
}

/// Raw form of options that take `true`/`false` or a keyword.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlagOrWord {
    /// `true` or `false`
    Flag(bool),
    /// A keyword such as `"global"`
    Word(String),
}

/// How strict mode is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "FlagOrWord", rename_all = "lowercase")]
pub enum StrictMode {
    /// No requirement
    #[default]
    Off,
    /// Every function must carry a `"use strict"` directive
    Required,
    /// A global `"use strict"` directive is allowed and satisfies the requirement
    Global,
    /// Code is analyzed as strict without any directive
    Implied,
}

impl TryFrom<FlagOrWord> for StrictMode {
    type Error = String;

    fn try_from(raw: FlagOrWord) -> Result<Self, Self::Error> {
        match raw {
            FlagOrWord::Flag(false) => Ok(StrictMode::Off),
            FlagOrWord::Flag(true) => Ok(StrictMode::Required),
            FlagOrWord::Word(word) => match word.as_str() {
                "global" => Ok(StrictMode::Global),
                "implied" => Ok(StrictMode::Implied),
                "true" => Ok(StrictMode::Required),
                "false" => Ok(StrictMode::Off),
                other => Err(format!("bad strict value '{}'", other)),
            },
        }
    }
}

/// Which unused bindings are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "FlagOrWord", rename_all = "kebab-case")]
pub enum UnusedMode {
    /// No W098 diagnostics
    #[default]
    Off,
    /// Variables only, never parameters
    Vars,
    /// Variables and parameters after the last used one
    LastParam,
    /// Variables and every parameter
    Strict,
}

impl TryFrom<FlagOrWord> for UnusedMode {
    type Error = String;

    fn try_from(raw: FlagOrWord) -> Result<Self, Self::Error> {
        match raw {
            FlagOrWord::Flag(false) => Ok(UnusedMode::Off),
            FlagOrWord::Flag(true) => Ok(UnusedMode::LastParam),
            FlagOrWord::Word(word) => match word.as_str() {
                "vars" => Ok(UnusedMode::Vars),
                "last-param" | "true" => Ok(UnusedMode::LastParam),
                "strict" => Ok(UnusedMode::Strict),
                "false" => Ok(UnusedMode::Off),
                other => Err(format!("bad unused value '{}'", other)),
            },
        }
    }
}

/// Which redeclarations and shadowings are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "FlagOrWord", rename_all = "lowercase")]
pub enum ShadowMode {
    /// Redeclaring a `var` merges silently
    #[default]
    Allow,
    /// Same-scope `var` redeclaration reports W004
    Inner,
    /// Additionally, shadowing an outer binding reports W123
    Outer,
}

impl TryFrom<FlagOrWord> for ShadowMode {
    type Error = String;

    fn try_from(raw: FlagOrWord) -> Result<Self, Self::Error> {
        match raw {
            FlagOrWord::Flag(true) => Ok(ShadowMode::Allow),
            FlagOrWord::Flag(false) => Ok(ShadowMode::Inner),
            FlagOrWord::Word(word) => match word.as_str() {
                "inner" | "false" => Ok(ShadowMode::Inner),
                "outer" => Ok(ShadowMode::Outer),
                "true" => Ok(ShadowMode::Allow),
                other => Err(format!("bad shadow value '{}'", other)),
            },
        }
    }
}

/// Non-standard syntax that must be switched on explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnstableOptions {
    /// Accept `function.sent` inside generators
    pub gensent: bool,
}

/// Complete configuration of one analysis.
///
/// # Examples
///
/// ```
/// use linter::{EsVersion, LintConfig};
///
/// let config: LintConfig = serde_json::from_str(r#"{ "esversion": 6, "undef": true }"#).unwrap();
/// assert_eq!(config.esversion, EsVersion::Es2015);
/// assert!(config.undef);
/// assert_eq!(config.maxerr, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Target edition
    pub esversion: EsVersion,
    /// Strict mode requirement
    pub strict: StrictMode,
    /// Analyze the source as module code
    pub module: bool,
    /// Stop after this many diagnostics
    pub maxerr: usize,
    /// Maximum nesting of expressions, statements and templates
    pub max_depth: usize,
    /// Report uses of undeclared variables (W117)
    pub undef: bool,
    /// Report unused bindings (W098)
    pub unused: UnusedMode,
    /// Report `var`/function uses that precede their declaration (W003)
    pub latedef: bool,
    /// Redeclaration and shadowing policy
    pub shadow: ShadowMode,
    /// Accept missing semicolons at line breaks
    pub asi: bool,
    /// Accept assignments where a condition is expected
    pub boss: bool,
    /// Accept `eval` and friends
    pub evil: bool,
    /// Accept `debugger` statements
    pub debug: bool,
    /// Require `===` and `!==`
    pub eqeqeq: bool,
    /// Require `for in` bodies to be filtered
    pub forin: bool,
    /// Accept `var` declarations used outside their block
    pub funcscope: bool,
    /// Accept a global `"use strict"` directive
    pub globalstrict: bool,
    /// Accept strings continued with a backslash
    pub multistr: bool,
    /// Report non-breaking spaces (W125)
    pub nonbsp: bool,
    /// Accept a missing semicolon after the last statement of a one-line block
    pub lastsemic: bool,
    /// Accept expression statements without side effects
    pub expr: bool,
    /// Accept `obj['name']` where dot notation would do
    pub sub: bool,
    /// Accept holes in array literals
    pub elision: bool,
    /// Accept `with` statements outside strict mode
    pub withstmt: bool,
    /// Non-standard syntax switches
    pub unstable: UnstableOptions,
    /// Codes that are never reported
    pub disabled: BTreeSet<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            esversion: EsVersion::default(),
            strict: StrictMode::Off,
            module: false,
            maxerr: 50,
            max_depth: 512,
            undef: false,
            unused: UnusedMode::Off,
            latedef: false,
            shadow: ShadowMode::Allow,
            asi: false,
            boss: false,
            evil: false,
            debug: false,
            eqeqeq: false,
            forin: false,
            funcscope: false,
            globalstrict: false,
            multistr: false,
            nonbsp: false,
            lastsemic: false,
            expr: false,
            sub: false,
            elision: false,
            withstmt: false,
            unstable: UnstableOptions::default(),
            disabled: BTreeSet::new(),
        }
    }
}

impl LintConfig {
    /// Configuration with a given edition and everything else default.
    pub fn with_esversion(esversion: EsVersion) -> Self {
        Self {
            esversion,
            ..Self::default()
        }
    }

    /// Set a boolean option by its `.jshintrc` name.
    ///
    /// Returns `false` for names that are not boolean options.
    pub fn set_flag(&mut self, name: &str, value: bool) -> bool {
        let slot = match name {
            "module" => &mut self.module,
            "undef" => &mut self.undef,
            "latedef" => &mut self.latedef,
            "asi" => &mut self.asi,
            "boss" => &mut self.boss,
            "evil" => &mut self.evil,
            "debug" => &mut self.debug,
            "eqeqeq" => &mut self.eqeqeq,
            "forin" => &mut self.forin,
            "funcscope" => &mut self.funcscope,
            "globalstrict" => &mut self.globalstrict,
            "multistr" => &mut self.multistr,
            "nonbsp" => &mut self.nonbsp,
            "lastsemic" => &mut self.lastsemic,
            "expr" => &mut self.expr,
            "sub" => &mut self.sub,
            "elision" => &mut self.elision,
            "withstmt" => &mut self.withstmt,
            _ => return false,
        };
        *slot = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esversion_accepts_both_styles() {
        assert_eq!(EsVersion::from_number(6), Some(EsVersion::Es2015));
        assert_eq!(EsVersion::from_number(2020), Some(EsVersion::Es2020));
        assert_eq!(EsVersion::from_number(4), None);
        assert_eq!(EsVersion::Es2021.number(), 12);
    }

    #[test]
    fn test_config_defaults() {
        let config = LintConfig::default();
        assert_eq!(config.maxerr, 50);
        assert_eq!(config.max_depth, 512);
        assert_eq!(config.esversion, EsVersion::Es5);
        assert_eq!(config.shadow, ShadowMode::Allow);
    }

    #[test]
    fn test_config_from_json() {
        let config: LintConfig = serde_json::from_str(
            r#"{
                "esversion": 2015,
                "strict": "global",
                "unused": "vars",
                "shadow": "outer",
                "maxerr": 3,
                "unstable": { "gensent": true },
                "disabled": ["W030"]
            }"#,
        )
        .unwrap();
        assert_eq!(config.esversion, EsVersion::Es2015);
        assert_eq!(config.strict, StrictMode::Global);
        assert_eq!(config.unused, UnusedMode::Vars);
        assert_eq!(config.shadow, ShadowMode::Outer);
        assert_eq!(config.maxerr, 3);
        assert!(config.unstable.gensent);
        assert!(config.disabled.contains("W030"));
    }

    #[test]
    fn test_config_flag_forms() {
        let config: LintConfig =
            serde_json::from_str(r#"{ "strict": true, "unused": true, "shadow": false }"#).unwrap();
        assert_eq!(config.strict, StrictMode::Required);
        assert_eq!(config.unused, UnusedMode::LastParam);
        assert_eq!(config.shadow, ShadowMode::Inner);
    }

    #[test]
    fn test_config_rejects_bad_edition() {
        let result: Result<LintConfig, _> = serde_json::from_str(r#"{ "esversion": 4 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_set_flag() {
        let mut config = LintConfig::default();
        assert!(config.set_flag("undef", true));
        assert!(config.undef);
        assert!(!config.set_flag("maxerr", true));
    }
}
