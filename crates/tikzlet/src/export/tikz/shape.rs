//! Packages, classes and notes.

use log::trace;

use tikzlet_core::{
    geometry::Point,
    semantic::{
        ClassBody, Decoration, Element, ElementBody, Header, NameStyle, Package, Shape, TextLine,
    },
};

use super::{Tikz, coordinate};
use crate::{escape::escape_latex, export::Error};

/// `key={value}` options for the parts of a header that are present.
fn header_options(header: &Header, with_template: bool) -> Vec<String> {
    let mut options = Vec::new();
    if let Some(type_label) = header.type_label() {
        options.push(format!("type={{{}}}", escape_latex(type_label)));
    }
    if let Some(template) = header.template().filter(|_| with_template) {
        options.push(format!("template={{{}}}", escape_latex(template)));
    }
    if let Some(tags) = header.tags() {
        options.push(format!("tags={{{}}}", escape_latex(tags)));
    }
    options
}

/// One line of a member or operation block.
fn member_line(line: &TextLine) -> String {
    match line.decoration() {
        Decoration::Static => format!(r"\umlstatic{{{}}}", escape_latex(line.text())),
        Decoration::Abstract => format!(r"\umlvirt{{{}}}", escape_latex(line.text())),
        Decoration::None if line.text().starts_with('-') => {
            escape_latex(&format!("-{}", line.text()))
        }
        Decoration::None => escape_latex(line.text()),
    }
}

impl Tikz {
    /// Opens the environment of a package; the caller closes it.
    pub(super) fn begin_package(&mut self, package: &Package) -> Result<(), Error> {
        let Some(geometry) = package.geometry() else {
            return Err(Error::Render(format!(
                "package `{}` has no geometry",
                package.id()
            )));
        };
        let corner = geometry.bounds().top_left();

        let mut options = vec![
            format!("x={}", coordinate(corner.x())),
            format!("y={}", coordinate(corner.y())),
            format!("name={}", package.reference()),
        ];
        options.extend(header_options(package.header(), false));

        self.line(format_args!(
            r"\begin{{umlpackage}}[{}]{{{}}}",
            options.join(","),
            escape_latex(package.header().name())
        ))
    }

    /// Renders a class, interface or note.
    pub(super) fn render_element(&mut self, element: &Element) -> Result<(), Error> {
        let Some(geometry) = element.geometry() else {
            return Err(Error::Render(format!(
                "element `{}` has no geometry",
                element.id()
            )));
        };
        let center = geometry.center();

        match element.body() {
            ElementBody::Note(text) => {
                let name = element.reference();
                let anchor_x = center.x() + self.style.note_offset();
                self.line(format_args!(
                    r"\node at ({},{}) [name={name}]{{}};",
                    coordinate(anchor_x),
                    coordinate(center.y()),
                ))?;
                self.line(format_args!(
                    r"\umlnote[x={},y={}]{{{name}}}{{{}}}",
                    coordinate(center.x()),
                    coordinate(center.y()),
                    escape_latex(text)
                ))
            }
            ElementBody::Class(body) => self.render_class(element, body, center),
        }
    }

    fn render_class(
        &mut self,
        element: &Element,
        body: &ClassBody,
        center: Point,
    ) -> Result<(), Error> {
        let header = body.header();
        if header.name_style() == NameStyle::Object {
            trace!(element:% = element.id(); "Skipping object instance");
            return Ok(());
        }

        let mut options = vec![
            format!("x={}", coordinate(center.x())),
            format!("y={}", coordinate(center.y())),
            format!("alias={}", element.id()),
        ];
        options.extend(header_options(header, true));

        let command = if body.is_simple() {
            "umlsimpleclass"
        } else {
            "umlclass"
        };
        self.line(format_args!(
            r"\{command}[{}]{{{}}}",
            options.join(","),
            escape_latex(header.name())
        ))?;

        if !body.is_simple() {
            self.render_block(body.members())?;
            self.render_block(body.operations())?;
        }
        Ok(())
    }

    fn render_block(&mut self, lines: &[TextLine]) -> Result<(), Error> {
        self.line(format_args!("{{"))?;
        for line in lines {
            self.line(format_args!(r"  {} \\", member_line(line)))?;
        }
        self.line(format_args!("}}"))
    }
}
