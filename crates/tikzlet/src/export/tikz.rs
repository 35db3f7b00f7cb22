//! TikZ-UML rendering.
//!
//! The output is a single `tikzpicture` holding, in order: the package
//! environments with their nested packages and owned elements, the classes
//! and notes outside every package, and finally all connectors. Connectors
//! come last because they refer to shapes by name.
//!
//! Coordinates are written with two decimals and angles and label
//! positions with one.

mod relation;
mod shape;

use std::fmt::{self, Write as _};

use log::{debug, info};

use tikzlet_core::semantic::{Diagram, ElementBody};

use super::{Error, Exporter};
use crate::{
    config::{LayoutConfig, StyleConfig},
    structure::ContainerHierarchy,
};

/// Formats a canvas coordinate.
fn coordinate(value: f32) -> String {
    // Adding zero turns a negative zero into a positive one.
    format!("{:.2}", value + 0.0)
}

/// Formats an angle or a label position.
fn decimal(value: f32) -> String {
    format!("{:.1}", value + 0.0)
}

/// Builder for the TikZ-UML exporter.
///
/// # Examples
///
/// ```
/// # use tikzlet::{config::AppConfig, export::tikz::TikzBuilder};
/// let config = AppConfig::default();
/// let tikz = TikzBuilder::new()
///     .with_layout(config.layout())
///     .with_style(config.style())
///     .build();
/// assert!(tikz.output().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct TikzBuilder {
    layout: LayoutConfig,
    style: StyleConfig,
}

impl TikzBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the layout settings, used for self-loop sizes.
    pub fn with_layout(mut self, layout: &LayoutConfig) -> Self {
        self.layout = layout.clone();
        self
    }

    /// Sets the style settings, used for note placement.
    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    pub fn build(self) -> Tikz {
        Tikz {
            layout: self.layout,
            style: self.style,
            output: String::new(),
        }
    }
}

/// TikZ-UML exporter writing into an in-memory buffer.
#[derive(Debug)]
pub struct Tikz {
    layout: LayoutConfig,
    style: StyleConfig,
    output: String,
}

impl Tikz {
    /// Text written so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }

    /// Appends one output line.
    fn line(&mut self, args: fmt::Arguments<'_>) -> Result<(), Error> {
        self.output.write_fmt(args)?;
        self.output.push('\n');
        Ok(())
    }

    /// Renders the package at `index` with everything nested in it.
    fn render_package_tree(
        &mut self,
        diagram: &Diagram,
        hierarchy: &ContainerHierarchy,
        index: usize,
    ) -> Result<(), Error> {
        let package = &diagram.packages()[index];
        self.begin_package(package)?;
        for child in hierarchy.child_packages(index) {
            self.render_package_tree(diagram, hierarchy, *child)?;
        }
        for element in hierarchy.owned_elements(index) {
            self.render_element(&diagram.elements()[*element])?;
        }
        self.line(format_args!(r"\end{{umlpackage}}"))
    }
}

impl Exporter for Tikz {
    fn export_diagram(
        &mut self,
        diagram: &Diagram,
        hierarchy: &ContainerHierarchy,
    ) -> Result<(), Error> {
        self.line(format_args!(r"\begin{{tikzpicture}}"))?;

        let roots: Vec<usize> = hierarchy.root_packages().collect();
        for root in &roots {
            self.render_package_tree(diagram, hierarchy, *root)?;
        }
        debug!(root_packages = roots.len(); "Packages rendered");

        let unowned: Vec<usize> = hierarchy.unowned_elements().collect();
        let is_note =
            |index: &&usize| matches!(diagram.elements()[**index].body(), ElementBody::Note(_));
        for index in unowned.iter().filter(|index| !is_note(index)) {
            self.render_element(&diagram.elements()[*index])?;
        }
        for index in unowned.iter().filter(is_note) {
            self.render_element(&diagram.elements()[*index])?;
        }

        for relation in diagram.relations() {
            self.render_relation(relation)?;
        }

        self.line(format_args!(r"\end{{tikzpicture}}"))?;
        info!(
            packages = diagram.packages().len(),
            elements = diagram.elements().len(),
            relations = diagram.relations().len();
            "TikZ rendered"
        );
        Ok(())
    }
}
