//! Accumulates diagnostics while reading the records of a document.

use crate::error::{Diagnostic, ParseError};

/// Collects diagnostics so every broken record is reported, not just the
/// first one.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Unwraps `result`, recording its diagnostic on failure.
    pub fn take<T>(&mut self, result: Result<T, Diagnostic>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(diagnostic) => {
                self.emit(diagnostic);
                None
            }
        }
    }

    /// `Err` with every diagnostic if any error was emitted.
    ///
    /// Warnings are logged and dropped in the success case.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.has_errors {
            return Err(ParseError::new(self.diagnostics));
        }
        for diagnostic in &self.diagnostics {
            log::log!(diagnostic.severity().log_level(), "{diagnostic}");
        }
        Ok(())
    }
}
