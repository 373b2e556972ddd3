//! Source position and span types for diagnostics.
//!
//! Positions are produced by the lexer and carried by every token and
//! diagnostic. Lines and columns are 1-based, columns count characters (not
//! bytes), and offsets are byte offsets into the analyzed source.

use serde::{Deserialize, Serialize};

/// Represents a position in source code.
///
/// # Examples
///
/// ```
/// use core_types::SourcePosition;
///
/// let pos = SourcePosition {
///     line: 10,
///     column: 5,
///     offset: 150,
/// };
///
/// assert_eq!(pos.line, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourcePosition {
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based, in characters)
    pub column: u32,
    /// Byte offset from the start of the source
    pub offset: usize,
}

impl SourcePosition {
    /// The position of the first character of a source text.
    pub const START: SourcePosition = SourcePosition {
        line: 1,
        column: 1,
        offset: 0,
    };

    /// Create a position from its parts.
    pub fn new(line: u32, column: u32, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::START
    }
}

impl PartialOrd for SourcePosition {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SourcePosition {
    // Offsets alone are authoritative; line/column are derived from them.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.offset.cmp(&other.offset)
    }
}

/// A half-open byte range `[start, end)` into the source text.
///
/// # Examples
///
/// ```
/// use core_types::Span;
///
/// let span = Span::new(4, 9);
/// assert_eq!(span.len(), 5);
/// assert_eq!(&"let value = 1;"[span.range()], "value");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a span from start and end offsets.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start must not exceed end");
        Self { start, end }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for zero-width spans (e.g. the end-of-input token).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The span as a `Range` usable for slicing the source.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// Smallest span covering both `self` and `other`.
    pub fn cover(&self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_position_creation() {
        let pos = SourcePosition {
            line: 10,
            column: 5,
            offset: 150,
        };
        assert_eq!(pos.line, 10);
        assert_eq!(pos.column, 5);
        assert_eq!(pos.offset, 150);
    }

    #[test]
    fn test_positions_order_by_offset() {
        let a = SourcePosition::new(1, 8, 7);
        let b = SourcePosition::new(2, 1, 12);
        assert!(a < b);
        assert_eq!(a.max(b), b);
    }

    #[test]
    fn test_span_cover() {
        let joined = Span::new(3, 5).cover(Span::new(1, 4));
        assert_eq!(joined, Span::new(1, 5));
        assert!(Span::new(2, 2).is_empty());
    }
}
