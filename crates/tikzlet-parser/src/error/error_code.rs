//! Error codes for the tikzlet diagnostic system.
//!
//! Codes are organized by phase:
//! - `E0xx` - Document errors
//! - `E1xx` - Geometry field errors
//! - `E2xx` - Waypoint list errors
//! - `W3xx` - Resolution warnings (non-fatal)

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Document Errors (E0xx)
    // =========================================================================
    /// Malformed XML.
    ///
    /// The input is not a well-formed XML document.
    E001,

    /// Unexpected root element.
    ///
    /// The document root is not a `<diagram>` element.
    E002,

    /// Invalid zoom level.
    ///
    /// `<zoom_level>` is not a positive integer.
    E003,

    // =========================================================================
    // Geometry Field Errors (E1xx)
    // =========================================================================
    /// Invalid coordinate.
    ///
    /// One of `<x>`, `<y>`, `<w>`, `<h>` is not an integer.
    E100,

    /// Missing coordinates.
    ///
    /// An `<element>` has no `<coordinates>` block.
    E101,

    // =========================================================================
    // Waypoint Errors (E2xx)
    // =========================================================================
    /// Invalid waypoint offset.
    ///
    /// A field of `<additional_attributes>` is not a finite number.
    E200,

    /// Unpaired waypoint offset.
    ///
    /// `<additional_attributes>` holds an odd number of offsets.
    E201,

    // =========================================================================
    // Resolution Warnings (W3xx)
    // =========================================================================
    /// Unattached start.
    ///
    /// No shape contains the first waypoint of a connector.
    W300,

    /// Unattached end.
    ///
    /// No shape contains the last waypoint of a connector.
    W301,

    /// Unknown relation style.
    ///
    /// The style token matches no drawing command, directly or mirrored.
    W302,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::W300 => "W300",
            ErrorCode::W301 => "W301",
            ErrorCode::W302 => "W302",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "malformed xml",
            ErrorCode::E002 => "unexpected root element",
            ErrorCode::E003 => "invalid zoom level",
            ErrorCode::E100 => "invalid coordinate",
            ErrorCode::E101 => "missing coordinates",
            ErrorCode::E200 => "invalid waypoint offset",
            ErrorCode::E201 => "unpaired waypoint offset",
            ErrorCode::W300 => "unattached start",
            ErrorCode::W301 => "unattached end",
            ErrorCode::W302 => "unknown relation style",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
