//! Export functionality for tikzlet diagrams.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! converting resolved diagrams into output formats. It is the final stage in
//! the tikzlet processing pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! UXF Document
//!     ↓ parse
//! Semantic Model
//!     ↓ layout (geometry, connection, route, style)
//! Resolved Model
//!     ↓ structure
//! Container Hierarchy
//!     ↓ export (this module)
//! Output Text
//! ```
//!
//! # Available Backends
//!
//! - [`tikz`] - TikZ-UML output via [`tikz::TikzBuilder`] and [`tikz::Tikz`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and
//! formatting errors. [`Error`] converts into [`TikzletError::Export`] at the
//! crate boundary.
//!
//! [`TikzletError::Export`]: crate::TikzletError::Export

/// TikZ-UML export backend.
pub mod tikz;

use std::fmt;

use tikzlet_core::semantic::Diagram;

use crate::structure::ContainerHierarchy;

/// Abstraction for diagram export backends.
///
/// See the [`tikz`] module for the built-in TikZ-UML implementation.
pub trait Exporter {
    /// Exports a resolved diagram to the backend's output format.
    ///
    /// # Arguments
    ///
    /// * `diagram` - A diagram whose layout passes have all run.
    /// * `hierarchy` - The container nesting of `diagram`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if part of the diagram is not resolved, or
    /// [`Error::Write`] if writing the output fails.
    fn export_diagram(
        &mut self,
        diagram: &Diagram,
        hierarchy: &ContainerHierarchy,
    ) -> Result<(), Error>;
}

/// Errors that can occur during diagram export.
///
/// This type is converted into [`TikzletError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`TikzletError::Export`]: crate::TikzletError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering failure described by `message`.
    Render(String),
    /// A formatting error encountered while writing output.
    Write(fmt::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Write(err) => write!(f, "Write error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Write(err) => Some(err),
        }
    }
}

impl From<fmt::Error> for Error {
    fn from(err: fmt::Error) -> Self {
        Self::Write(err)
    }
}
