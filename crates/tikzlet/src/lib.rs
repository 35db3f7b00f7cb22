//! Tikzlet - Converts UMLet class diagrams into TikZ-UML drawing commands.
//!
//! Editor positions are kept as they are. The work lies in interpreting the
//! free-floating connectors of a UMLet export: attaching their ends to
//! shapes, classifying their paths into orthogonal routes, and turning
//! around connectors whose style token was drawn backwards.

pub mod config;
pub mod escape;
pub mod export;
pub mod layout;
pub mod structure;

mod error;

pub use tikzlet_core::{identifier, semantic};
pub use tikzlet_parser::error::{Diagnostic, ErrorCode, Severity};

pub use error::TikzletError;

use log::{debug, info, trace};

use config::AppConfig;
use export::{Exporter, tikz::TikzBuilder};
use semantic::Diagram;
use structure::ContainerHierarchy;

/// Builder for converting UMLet diagrams.
///
/// This provides an API for processing diagrams through parsing, layout
/// normalization, and rendering stages.
///
/// # Examples
///
/// ```rust,no_run
/// use tikzlet::{DiagramBuilder, config::AppConfig};
///
/// let source = std::fs::read_to_string("diagram.uxf").expect("Failed to read");
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// let diagram = builder.parse(&source).expect("Failed to parse");
/// let resolved = builder.resolve(diagram).expect("Failed to resolve");
/// let tikz = builder.render_tikz(&resolved).expect("Failed to render");
///
/// // Or use default config
/// let builder = DiagramBuilder::default();
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse a UXF document into an unresolved semantic diagram.
    ///
    /// # Errors
    ///
    /// Returns [`TikzletError::Parse`] carrying every problem found in the
    /// document, together with the document itself for span rendering.
    pub fn parse(&self, source: &str) -> Result<Diagram, TikzletError> {
        info!("Parsing diagram");
        let diagram = tikzlet_parser::parse(source)
            .map_err(|err| TikzletError::new_parse_error(err, source))?;
        debug!(
            packages = diagram.packages().len(),
            elements = diagram.elements().len(),
            relations = diagram.relations().len();
            "Diagram parsed"
        );
        trace!(diagram:?; "Parsed diagram");
        Ok(diagram)
    }

    /// Run the layout passes and build the container hierarchy.
    ///
    /// Non-fatal findings, such as connector ends outside every shape, are
    /// kept in the returned [`ResolvedDiagram`] for the caller to report.
    ///
    /// # Errors
    ///
    /// Returns [`TikzletError::Config`] when the configured scale is not
    /// positive.
    pub fn resolve(&self, mut diagram: Diagram) -> Result<ResolvedDiagram, TikzletError> {
        let scale = self.config.layout().scale();
        if scale.is_nan() || scale <= 0.0 {
            return Err(TikzletError::Config(format!(
                "layout scale must be positive, got {scale}"
            )));
        }

        info!("Resolving layout");
        let warnings = layout::normalize(&mut diagram, &self.config);
        for warning in &warnings {
            debug!(code:? = warning.code(); "{}", warning.message());
        }

        let hierarchy = ContainerHierarchy::from_diagram(&diagram);
        debug!(warnings = warnings.len(); "Layout resolved");

        Ok(ResolvedDiagram {
            diagram,
            hierarchy,
            warnings,
        })
    }

    /// Render a resolved diagram to a TikZ `tikzpicture`.
    ///
    /// # Errors
    ///
    /// Returns [`TikzletError::Export`] if the output cannot be written.
    pub fn render_tikz(&self, resolved: &ResolvedDiagram) -> Result<String, TikzletError> {
        let mut exporter = TikzBuilder::new()
            .with_layout(self.config.layout())
            .with_style(self.config.style())
            .build();
        exporter.export_diagram(&resolved.diagram, &resolved.hierarchy)?;
        Ok(exporter.into_output())
    }
}

/// A diagram whose layout passes have run, ready for export.
#[derive(Debug, Clone)]
pub struct ResolvedDiagram {
    diagram: Diagram,
    hierarchy: ContainerHierarchy,
    warnings: Vec<Diagnostic>,
}

impl ResolvedDiagram {
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn hierarchy(&self) -> &ContainerHierarchy {
        &self.hierarchy
    }

    /// Non-fatal findings of the layout passes, in pass order.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }
}
