//! tikzlet Core Types and Definitions
//!
//! This crate provides the foundational types shared by the tikzlet parser,
//! the layout passes and the TikZ exporter. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Geometry**: Coordinate transform, points and bounding boxes ([`geometry`] module)
//! - **Spans**: Byte ranges into the source document ([`span::Span`])
//! - **Semantic**: The diagram arena of containers, elements and relations ([`semantic`] module)

pub mod geometry;
pub mod identifier;
pub mod semantic;
pub mod span;
