//! Semantic diagram model types.
//!
//! This module contains the in-memory representation of a diagram read from
//! an editor export. The model is an arena: the [`Diagram`] exclusively owns
//! every container, element and relation, and relations refer to shapes by
//! [`Id`](crate::identifier::Id) only.
//!
//! # Pipeline Position
//!
//! ```text
//! UXF document
//!     ↓ parse
//! Semantic Model (these types) - raw frames, tokenized text, waypoints
//!     ↓ geometry → connection → route → style passes (mutate in place)
//! Resolved Model - bounds, endpoints, routing shapes, commands
//!     ↓ export
//! TikZ
//! ```
//!
//! # Organization
//!
//! - [`diagram`] - The root aggregate: [`Diagram`]
//! - [`element`] - Shapes: [`Package`], [`Element`], the [`Shape`] trait and tokenized text
//! - [`relation`] - Connectors: [`Relation`], [`Endpoint`], [`RouteShape`]

pub mod diagram;
pub mod element;
pub mod relation;

pub use diagram::*;
pub use element::*;
pub use relation::*;
