//! Error types for tikzlet operations.
//!
//! This module provides the main error type [`TikzletError`] which wraps
//! the error conditions that can occur while converting a diagram.

use std::io;

use thiserror::Error;

use tikzlet_parser::error::ParseError;

/// The main error type for tikzlet operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries the source document next to the diagnostics,
/// so that labeled spans can be rendered against it.
#[derive(Debug, Error)]
pub enum TikzletError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for TikzletError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl TikzletError {
    /// Create a new `Parse` error with the associated source document.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
