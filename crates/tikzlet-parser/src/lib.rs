//! # Tikzlet Parser
//!
//! Reader for UMLet `.uxf` documents. This crate turns the XML export of the
//! editor into the unresolved semantic [`Diagram`] of `tikzlet-core`: raw
//! frames, structured shape text, connector waypoints and style tokens.
//!
//! ## Usage
//!
//! ```
//! # use tikzlet_parser::{parse, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"<?xml version="1.0" encoding="UTF-8"?>
//!         <diagram program="umlet" version="15.1">
//!           <zoom_level>10</zoom_level>
//!           <element>
//!             <id>UMLClass</id>
//!             <coordinates><x>100</x><y>50</y><w>120</w><h>60</h></coordinates>
//!             <panel_attributes>Customer</panel_attributes>
//!           </element>
//!         </diagram>"#;
//!
//!     let diagram = parse(source)?;
//!     assert_eq!(diagram.elements().len(), 1);
//!     Ok(())
//! }
//! ```

mod attributes;
mod body;
mod document;
pub mod error;
mod tokenizer;

pub use error::ParseError;
pub use tikzlet_core::span::{self, Span};

use tikzlet_core::semantic::Diagram;

/// Parse a UXF document into a semantic diagram.
///
/// Every `<element>` record is read; problems in individual records are
/// collected so that a single error lists all of them.
///
/// # Errors
///
/// Returns a [`ParseError`] when the document is not well-formed XML, its
/// root is not `<diagram>`, the zoom level is invalid, or any record has
/// unparsable geometry or waypoints.
pub fn parse(source: &str) -> Result<Diagram, ParseError> {
    document::read_document(source)
}
