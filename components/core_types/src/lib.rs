//! Shared leaf types for the Corten linter.
//!
//! This crate provides the small value types every other component agrees
//! on: where something is in the source, and how serious a finding is.
//!
//! # Overview
//!
//! - [`SourcePosition`] - Line/column/offset of a source location
//! - [`Span`] - Byte range into the source text
//! - [`Severity`] - Error, warning or informational
//!
//! # Examples
//!
//! ```
//! use core_types::{Severity, SourcePosition, Span};
//!
//! let pos = SourcePosition::new(1, 5, 4);
//! let span = Span::new(pos.offset, pos.offset + 3);
//! assert_eq!(span.len(), 3);
//! assert_eq!(Severity::from_code("W098"), Severity::Warning);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod severity;
mod source;

pub use severity::Severity;
pub use source::{SourcePosition, Span};
