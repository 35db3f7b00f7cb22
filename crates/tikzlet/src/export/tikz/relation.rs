//! Connectors.

use tikzlet_core::semantic::{Endpoint, Relation};

use super::{Tikz, coordinate, decimal};
use crate::{
    escape::{clean_multiplicity, clean_role, escape_latex},
    export::Error,
    layout::route::{self, START_LABEL_POSITION},
};

/// A label value worth printing.
fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|value| !value.is_empty())
}

/// Appends the multiplicity, role and position options of one end.
///
/// Nothing is appended when the end carries neither label.
fn push_end_labels(
    options: &mut Vec<String>,
    end: u8,
    multiplicity: Option<&str>,
    role: Option<&str>,
    position: f32,
) {
    if let Some(multiplicity) = multiplicity {
        options.push(format!("mult{end}={{{}}}", clean_multiplicity(multiplicity)));
    }
    if let Some(role) = role {
        options.push(format!("arg{end}={{{}}}", clean_role(role)));
    }
    if multiplicity.is_some() || role.is_some() {
        options.push(format!("pos{end}={}", decimal(position)));
    }
}

impl Tikz {
    /// Renders a connector with its synthesized anchors and title.
    pub(super) fn render_relation(&mut self, relation: &Relation) -> Result<(), Error> {
        let (Some(start), Some(end)) = (relation.start(), relation.end()) else {
            return Err(Error::Render(format!(
                "connector `{}` has unresolved endpoints",
                relation.id()
            )));
        };
        let Some(command) = relation.command() else {
            return Err(Error::Render(format!(
                "connector `{}` has no drawing command",
                relation.id()
            )));
        };

        // Anchors keep the document's order even when the connector is turned around.
        let document_order = if relation.is_mirrored() {
            [end, start]
        } else {
            [start, end]
        };
        for endpoint in document_order {
            if let Endpoint::Detached { anchor, at } = endpoint {
                self.line(format_args!(
                    r"\node at ({},{}) [name={anchor}]{{}};",
                    coordinate(at.x()),
                    coordinate(at.y())
                ))?;
            }
        }

        let route = relation.route();
        let mut options = vec![format!("name={}", relation.id())];
        if route.is_loop() {
            options.push(format!("loop={}", self.layout.loop_size()));
        } else {
            options.push(format!("geometry={route}"));
            if let Some(angle) = start.angle() {
                options.push(format!("anchor1={}", decimal(angle)));
            }
            if let Some(angle) = end.angle() {
                options.push(format!("anchor2={}", decimal(angle)));
            }
        }

        let labels = relation.labels();
        push_end_labels(
            &mut options,
            1,
            present(labels.mult1.as_ref()),
            present(labels.role1.as_ref()),
            START_LABEL_POSITION,
        );
        push_end_labels(
            &mut options,
            2,
            present(labels.mult2.as_ref()),
            present(labels.role2.as_ref()),
            route::end_label_position(route),
        );

        self.line(format_args!(
            r"\{command}[{}]{{{}}}{{{}}}",
            options.join(","),
            start.reference(),
            end.reference()
        ))?;

        if let Some(title) = present(labels.title.as_ref()) {
            let placement = route::title_placement(route);
            self.line(format_args!(
                r"\node[{}] at ({}-{}) {{{}}};",
                placement.align.as_str(),
                relation.id(),
                placement.anchor,
                escape_latex(title)
            ))?;
        }
        Ok(())
    }
}
