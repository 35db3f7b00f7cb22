//! CLI logic for the tikzlet converter.
//!
//! Reads a UMLet `.uxf` export, converts it through the tikzlet pipeline and
//! writes the resulting `tikzpicture` to the output path.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};

use tikzlet::{DiagramBuilder, TikzletError};

use error_adapter::{render, warning_reports};

/// Run the tikzlet CLI application
///
/// Warnings found while resolving the diagram are reported and the run
/// continues. The output file is written only once the whole pipeline has
/// succeeded.
///
/// # Errors
///
/// Returns `TikzletError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), TikzletError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let diagram = builder.parse(&source)?;
    let resolved = builder.resolve(diagram)?;

    for report in warning_reports(resolved.warnings(), &source) {
        warn!("{}", render(&report));
    }

    let tikz = builder.render_tikz(&resolved)?;
    fs::write(&args.output, tikz)?;

    info!(output_file = args.output, warnings = resolved.warnings().len(); "TikZ exported successfully");

    Ok(())
}
