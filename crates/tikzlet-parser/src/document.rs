//! Reading of UXF documents into the semantic model.
//!
//! The document is a `<diagram>` root holding an optional `<zoom_level>` and a
//! flat list of `<element>` records. Each record is turned into a container,
//! a leaf element or a connector according to its type tag.

use std::collections::HashMap;

use log::{debug, trace};
use roxmltree::{Document, Node};
use tikzlet_core::{
    identifier::Id,
    semantic::{Diagram, Element, ElementBody, ElementKind, Frame, Package, Relation},
};

use crate::{
    attributes::{parse_relation_attributes, parse_waypoint_offsets},
    body::{parse_class_body, parse_package_header},
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

const ROOT_TAG: &str = "diagram";
const ZOOM_TAG: &str = "zoom_level";
const ELEMENT_TAG: &str = "element";

const PACKAGE_TYPE: &str = "UMLPackage";
const RELATION_TYPE: &str = "Relation";

/// Zoom level at which coordinates are stored unscaled.
const BASE_ZOOM: f32 = 10.0;

/// The span of an XML node.
fn node_span(node: Node<'_, '_>) -> Span {
    Span::new(node.range())
}

/// The first child element named `name`.
fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.has_tag_name(name))
}

/// Text of the first child element named `name`, trimmed; empty when the
/// child has no text.
fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    child(node, name).map(|child| child.text().unwrap_or_default().trim())
}

/// Converts a roxmltree row/column position into a byte offset.
fn offset_of(source: &str, position: roxmltree::TextPos) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(position.row.saturating_sub(1) as usize)
        .map(str::len)
        .sum();
    let column = source[line_start.min(source.len())..]
        .char_indices()
        .nth(position.col.saturating_sub(1) as usize)
        .map_or(0, |(index, _)| index);
    (line_start + column).min(source.len())
}

/// Reads the zoom level divisor; `<zoom_level>` defaults to the base zoom.
fn read_zoom(root: Node<'_, '_>) -> Result<f32, Diagnostic> {
    let Some(node) = child(root, ZOOM_TAG) else {
        return Ok(1.0);
    };
    let text = node.text().unwrap_or_default().trim();
    match text.parse::<i32>() {
        Ok(level) if level > 0 => Ok(level as f32 / BASE_ZOOM),
        _ => Err(Diagnostic::error(format!("invalid zoom level `{text}`"))
            .with_code(ErrorCode::E003)
            .with_label(node_span(node), "expected a positive integer")),
    }
}

/// Reads the four geometry fields of a record, divided by `zoom`.
fn read_frame(element: Node<'_, '_>, zoom: f32) -> Result<Frame, Diagnostic> {
    let Some(coordinates) = child(element, "coordinates") else {
        return Err(Diagnostic::error("element has no coordinates")
            .with_code(ErrorCode::E101)
            .with_label(node_span(element), "missing <coordinates>"));
    };

    let field = |name: &str| -> Result<f32, Diagnostic> {
        let Some(node) = child(coordinates, name) else {
            return Ok(0.0);
        };
        let text = node.text().unwrap_or_default().trim();
        text.parse::<i64>()
            .map(|value| value as f32 / zoom)
            .map_err(|_| {
                Diagnostic::error(format!("`{text}` is not an integer coordinate"))
                    .with_code(ErrorCode::E100)
                    .with_label(node_span(node), "expected an integer")
                    .with_secondary_label(node_span(element), "in this element")
                    .with_help("coordinates are whole editor pixels")
            })
    };

    Ok(Frame::new(field("x")?, field("y")?, field("w")?, field("h")?))
}

/// Builds the semantic diagram record by record.
struct DocumentReader {
    zoom: f32,
    counters: HashMap<String, usize>,
    packages: Vec<Package>,
    elements: Vec<Element>,
    relations: Vec<Relation>,
    diagnostics: DiagnosticCollector,
}

impl DocumentReader {
    fn new(zoom: f32) -> Self {
        Self {
            zoom,
            counters: HashMap::new(),
            packages: Vec::new(),
            elements: Vec::new(),
            relations: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Assigns the next `<type><n>` identity of `type_tag`.
    fn next_id(&mut self, type_tag: &str) -> Id {
        let counter = self.counters.entry(type_tag.to_string()).or_default();
        let id = Id::sequenced(type_tag, *counter);
        *counter += 1;
        id
    }

    fn read_element(&mut self, node: Node<'_, '_>) {
        let type_tag = child_text(node, "id").unwrap_or_default();
        let id = self.next_id(type_tag);
        let span = node_span(node);
        let text = child_text(node, "panel_attributes").unwrap_or_default();

        let Some(frame) = self.diagnostics.take(read_frame(node, self.zoom)) else {
            return;
        };
        trace!(id:% = id, type_tag; "Read element");

        match type_tag {
            PACKAGE_TYPE => {
                self.packages
                    .push(Package::new(id, frame, parse_package_header(text), span));
            }
            RELATION_TYPE => {
                let waypoints_text = child_text(node, "additional_attributes").unwrap_or_default();
                let waypoints_span = child(node, "additional_attributes").map_or(span, node_span);
                let Some(offsets) = self.diagnostics.take(parse_waypoint_offsets(
                    waypoints_text,
                    self.zoom,
                    waypoints_span,
                )) else {
                    return;
                };
                let attributes = parse_relation_attributes(text);
                self.relations.push(Relation::new(
                    id,
                    frame.origin(),
                    offsets,
                    attributes.style,
                    attributes.labels,
                    span,
                ));
            }
            _ => {
                let kind = ElementKind::from_type_tag(type_tag);
                let body = match kind {
                    ElementKind::Note => ElementBody::Note(text.to_string()),
                    ElementKind::Interface => {
                        ElementBody::Class(parse_class_body(text, Some("interface")))
                    }
                    ElementKind::Class => ElementBody::Class(parse_class_body(text, None)),
                };
                self.elements
                    .push(Element::new(id, kind, frame, body, span));
            }
        }
    }

    fn finish(self) -> Result<Diagram, ParseError> {
        self.diagnostics.finish()?;
        debug!(
            packages = self.packages.len(),
            elements = self.elements.len(),
            relations = self.relations.len();
            "Document read"
        );
        Ok(Diagram::new(self.packages, self.elements, self.relations))
    }
}

/// Reads a UXF document into an unresolved [`Diagram`].
pub fn read_document(source: &str) -> Result<Diagram, ParseError> {
    let document = Document::parse(source).map_err(|err| {
        let offset = offset_of(source, err.pos());
        Diagnostic::error(format!("malformed XML: {err}"))
            .with_code(ErrorCode::E001)
            .with_label(Span::new(offset..offset), ErrorCode::E001.description())
    })?;

    let root = document.root_element();
    if !root.has_tag_name(ROOT_TAG) {
        return Err(Diagnostic::error(format!(
            "expected a <{ROOT_TAG}> root, found <{}>",
            root.tag_name().name()
        ))
        .with_code(ErrorCode::E002)
        .with_label(node_span(root), "document root")
        .into());
    }

    let zoom = read_zoom(root)?;
    debug!(zoom; "Reading document");

    let mut reader = DocumentReader::new(zoom);
    for node in root
        .children()
        .filter(|node| node.is_element() && node.has_tag_name(ELEMENT_TAG))
    {
        reader.read_element(node);
    }
    reader.finish()
}
