//! Bridge from tikzlet errors and warnings to miette reports.
//!
//! Each [`Diagnostic`] of a [`tikzlet_parser::error::ParseError`] becomes its
//! own [`Report`], rendered against the source document. Warnings returned
//! by [`tikzlet::DiagramBuilder::resolve`] go through the same path, so the
//! user sees the offending connector highlighted. Errors without a location
//! are reported with a `tikzlet::*` code.

use std::{error::Error as StdError, fmt};

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, Severity as MietteSeverity,
    SourceCode, SourceSpan,
};

use tikzlet::{Severity, TikzletError};
use tikzlet_parser::{Span, error::Diagnostic};

/// One renderable problem.
#[derive(Debug)]
pub enum Report<'a> {
    /// A diagnostic with spans into `src`.
    Diagnostic { diag: &'a Diagnostic, src: &'a str },
    /// An error without source location.
    Error(&'a TikzletError),
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Diagnostic { diag, .. } => f.write_str(diag.message()),
            Report::Error(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl StdError for Report<'_> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Report::Diagnostic { .. } => None,
            Report::Error(err) => StdError::source(*err),
        }
    }
}

impl MietteDiagnostic for Report<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Report::Diagnostic { diag, .. } => diag
                .code()
                .map(|code| Box::new(code) as Box<dyn fmt::Display>),
            Report::Error(err) => error_code(err).map(|code| Box::new(code) as Box<dyn fmt::Display>),
        }
    }

    fn severity(&self) -> Option<MietteSeverity> {
        match self {
            Report::Diagnostic { diag, .. } => Some(match diag.severity() {
                Severity::Error => MietteSeverity::Error,
                Severity::Warning => MietteSeverity::Warning,
            }),
            Report::Error(_) => Some(MietteSeverity::Error),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Report::Diagnostic { diag, .. } => diag
                .help()
                .map(|help| Box::new(help) as Box<dyn fmt::Display>),
            Report::Error(_) => None,
        }
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match self {
            Report::Diagnostic { src, .. } => Some(src as &dyn SourceCode),
            Report::Error(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Report::Diagnostic { diag, .. } = self else {
            return None;
        };
        if diag.labels().is_empty() {
            return None;
        }

        Some(Box::new(diag.labels().iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Code of an error without diagnostics; parse errors carry their own.
fn error_code(err: &TikzletError) -> Option<&'static str> {
    match err {
        TikzletError::Io(_) => Some("tikzlet::io"),
        TikzletError::Parse { .. } => None,
        TikzletError::Config(_) => Some("tikzlet::config"),
        TikzletError::Export(_) => Some("tikzlet::export"),
    }
}

fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Splits an error into reports, one per diagnostic for parse errors.
pub fn to_reports(err: &TikzletError) -> Vec<Report<'_>> {
    match err {
        TikzletError::Parse { err: parse_err, src } => parse_err
            .diagnostics()
            .iter()
            .map(|diag| Report::Diagnostic { diag, src })
            .collect(),
        _ => vec![Report::Error(err)],
    }
}

/// Wraps pass warnings for rendering against their source document.
pub fn warning_reports<'a>(warnings: &'a [Diagnostic], src: &'a str) -> Vec<Report<'a>> {
    warnings
        .iter()
        .map(|diag| Report::Diagnostic { diag, src })
        .collect()
}

/// Renders a report with miette's graphical handler.
///
/// Falls back to the plain message if the handler fails.
pub fn render(report: &Report<'_>) -> String {
    let mut writer = String::new();
    match GraphicalReportHandler::new().render_report(&mut writer, report) {
        Ok(()) => writer,
        Err(_) => report.to_string(),
    }
}
