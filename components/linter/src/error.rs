//! Early-termination signal for an analysis pass.
//!
//! Nothing a user writes is a Rust error: malformed input becomes
//! diagnostics. The only thing that unwinds through the parser is [`Halt`],
//! raised once the terminal diagnostic has already been recorded.

use serde::Serialize;
use thiserror::Error;

/// Why an analysis pass stopped before reaching the end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Halt {
    /// The configured maximum diagnostic count was reached
    #[error("too many errors")]
    TooManyErrors,
    /// A lexical or syntax failure left nothing sensible to parse
    #[error("unrecoverable syntax error")]
    Unrecoverable,
    /// Expression, statement or template nesting exceeded the limit
    #[error("nesting too deep")]
    TooDeep,
}

/// Result type threaded through every parser and tracker operation.
pub type ParseResult<T> = Result<T, Halt>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_halt_display() {
        assert_eq!(Halt::TooManyErrors.to_string(), "too many errors");
        assert_eq!(Halt::Unrecoverable.to_string(), "unrecoverable syntax error");
    }

    #[test]
    fn test_halt_serializes_kebab_case() {
        let json = serde_json::to_string(&Halt::TooDeep).unwrap();
        assert_eq!(json, "\"too-deep\"");
    }
}
