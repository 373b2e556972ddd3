//! Unit tests for SourcePosition and Span

use core_types::{SourcePosition, Span};

#[cfg(test)]
mod source_position_tests {
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
    fn test_source_position_default_is_start() {
        let pos = SourcePosition::default();

        assert_eq!(pos, SourcePosition::START);
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 1);
        assert_eq!(pos.offset, 0);
    }

    #[test]
    fn test_source_position_large_values() {
        let pos = SourcePosition {
            line: u32::MAX,
            column: u32::MAX,
            offset: usize::MAX,
        };

        assert_eq!(pos.line, u32::MAX);
        assert_eq!(pos.column, u32::MAX);
        assert_eq!(pos.offset, usize::MAX);
    }

    #[test]
    fn test_source_position_sorting() {
        let mut positions = vec![
            SourcePosition::new(3, 1, 20),
            SourcePosition::new(1, 4, 3),
            SourcePosition::new(2, 2, 11),
        ];
        positions.sort();

        let offsets: Vec<usize> = positions.iter().map(|p| p.offset).collect();
        assert_eq!(offsets, vec![3, 11, 20]);
    }

    #[test]
    fn test_source_position_json_shape() {
        let pos = SourcePosition::new(2, 7, 19);
        let json = serde_json::to_value(pos).unwrap();

        assert_eq!(json["line"], 2);
        assert_eq!(json["column"], 7);
        assert_eq!(json["offset"], 19);
    }
}

#[cfg(test)]
mod span_tests {
    use super::*;

    #[test]
    fn test_span_slices_source() {
        let source = "const answer = 42;";
        let span = Span::new(6, 12);

        assert_eq!(&source[span.range()], "answer");
        assert_eq!(span.len(), 6);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_empty_span() {
        let span = Span::new(5, 5);
        assert!(span.is_empty());
        assert_eq!(span.len(), 0);
    }
}
