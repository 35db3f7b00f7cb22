//! Error and diagnostic system for the tikzlet parser.
//!
//! Fatal problems in the input (malformed XML, unparsable numbers) and
//! non-fatal findings of later passes (unattached connector ends, unknown
//! relation styles) share one representation: the [`Diagnostic`].
//!
//! # Overview
//!
//! - [`Diagnostic`] - one error or warning with code, labeled spans and help
//! - [`ErrorCode`] - searchable codes grouped by phase
//! - [`ParseError`] - one or more fatal diagnostics returned by [`crate::parse`]
//!
//! # Example
//!
//! ```
//! # use tikzlet_parser::error::{Diagnostic, ErrorCode};
//! # use tikzlet_parser::Span;
//! let diag = Diagnostic::error("`abc` is not an integer coordinate")
//!     .with_code(ErrorCode::E100)
//!     .with_label(Span::new(120..123), "expected an integer")
//!     .with_help("coordinates are whole editor pixels");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod parse_error;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use parse_error::ParseError;
