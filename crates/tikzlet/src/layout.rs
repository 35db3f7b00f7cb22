//! Layout normalization passes.
//!
//! Editor positions are authoritative; nothing is moved here. The passes
//! derive canvas geometry from them and then interpret every connector
//! against that geometry.
//!
//! # Pipeline Position
//!
//! ```text
//! Semantic Model (Diagram, unresolved)
//!     ↓ geometry     every shape box and connector waypoint on the canvas
//!     ↓ connection   endpoint attachment and anchor angles
//!     ↓ route        routing shape of each connector
//!     ↓ style        drawing command, mirroring backwards tokens
//! Semantic Model (Diagram, resolved)
//! ```
//!
//! Each pass needs the complete output of the previous one: connection
//! resolution scans every shape box, and mirroring reverses the final
//! routing shape.

pub mod connection;
pub mod geometry;
pub mod route;
pub mod style;

use log::debug;

use tikzlet_core::semantic::Diagram;
use tikzlet_parser::error::Diagnostic;

use crate::config::AppConfig;

/// Runs every pass over `diagram` in order.
///
/// Returns the non-fatal findings of the passes.
pub fn normalize(diagram: &mut Diagram, config: &AppConfig) -> Vec<Diagnostic> {
    let transform = config.layout().transform();

    geometry::derive_all(diagram, transform);
    debug!("Geometry derived");

    let mut warnings = connection::ConnectionResolver::new(transform).resolve_all(diagram);
    debug!(unattached_ends = warnings.len(); "Connections resolved");

    route::classify_all(diagram);

    let style_resolver = style::StyleResolver::new(config.style().default_relation());
    warnings.extend(style_resolver.resolve_all(diagram));

    warnings
}
