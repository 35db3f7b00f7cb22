//! Shapes: containers, leaf elements and their tokenized text.

use std::cell::OnceCell;

use crate::{
    geometry::{Bounds, CoordinateTransform, Point},
    identifier::Id,
    span::Span,
};

/// Raw position and size of a record, in source units after zoom correction.
///
/// `x`/`y` is the top-left corner in the editor, with Y growing downward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Frame {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Frame {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Source-space top-left corner
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Canvas-space geometry derived from a [`Frame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeGeometry {
    bounds: Bounds,
    center: Point,
}

impl ShapeGeometry {
    /// Derives the bounding box and center of `frame` under `transform`.
    ///
    /// The two transformed corners are `(x, y)` and `(x + w, y + h)`; the
    /// resulting [`Bounds`] is normalized so that containment tests are
    /// independent of which corner ends up on top.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tikzlet_core::{geometry::CoordinateTransform, semantic::{Frame, ShapeGeometry}};
    /// let frame = Frame::new(0.0, 0.0, 100.0, 50.0);
    /// let geometry = ShapeGeometry::from_frame(frame, CoordinateTransform::new(0.02));
    ///
    /// assert_eq!(geometry.bounds().max_x(), 2.0);
    /// assert_eq!(geometry.bounds().min_y(), -1.0);
    /// assert!(geometry.bounds().contains_point(geometry.center()));
    /// ```
    pub fn from_frame(frame: Frame, transform: CoordinateTransform) -> Self {
        let corner1 = transform.apply(frame.x, frame.y);
        let corner2 = transform.apply(frame.x + frame.width, frame.y + frame.height);
        let bounds = Bounds::from_corners(corner1, corner2);
        Self {
            bounds,
            center: bounds.center(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn center(&self) -> Point {
        self.center
    }
}

/// Common view over containers and leaf elements.
///
/// Geometry is derived exactly once per shape; until then [`Shape::geometry`]
/// returns `None` and the shape takes no part in containment queries.
pub trait Shape {
    /// Sequence-assigned identity, e.g. `UMLClass3`.
    fn id(&self) -> Id;

    /// Name other drawing commands use to refer to this shape.
    fn reference(&self) -> Id {
        self.id()
    }

    fn frame(&self) -> Frame;

    fn span(&self) -> Span;

    fn geometry(&self) -> Option<ShapeGeometry>;

    /// Derives and freezes the geometry. Later calls keep the first result.
    fn derive_geometry(&self, transform: CoordinateTransform) -> ShapeGeometry;

    /// Inclusive containment test; `false` while geometry is not derived.
    fn contains(&self, point: Point) -> bool {
        self.geometry()
            .is_some_and(|geometry| geometry.bounds().contains_point(point))
    }
}

/// The role a single line of free text plays in a shape header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `template=T`
    Template,
    /// `<<stereotype>>`
    Stereotype,
    /// `{tag, ...}`
    Tags,
    /// Anything else.
    Text,
}

/// Emphasis markers wrapping a whole line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Decoration {
    #[default]
    None,
    /// `_text_`: static member, or an object instance when used as a name.
    Static,
    /// `/text/`: virtual operation, or an abstract class when used as a name.
    Abstract,
}

/// A tokenized line of shape text.
///
/// `text` holds the payload with markers removed, e.g. `interface` for
/// `<<interface>>` or `Shape` for `/Shape/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    kind: LineKind,
    decoration: Decoration,
    text: String,
}

impl TextLine {
    pub fn new(kind: LineKind, decoration: Decoration, text: impl Into<String>) -> Self {
        Self {
            kind,
            decoration,
            text: text.into(),
        }
    }

    /// A plain, undecorated text line
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(LineKind::Text, Decoration::None, text)
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    pub fn decoration(&self) -> Decoration {
        self.decoration
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// How the name line of a header is to be presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameStyle {
    #[default]
    Plain,
    /// `/Name/`
    Abstract,
    /// `_name_`: an object instance, which has no class-diagram rendering.
    Object,
}

/// Structured header of a container or class body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    template: Option<String>,
    stereotype: Option<String>,
    tags: Option<String>,
    name: String,
    name_style: NameStyle,
}

impl Header {
    pub fn new(
        template: Option<String>,
        stereotype: Option<String>,
        tags: Option<String>,
        name: impl Into<String>,
        name_style: NameStyle,
    ) -> Self {
        Self {
            template,
            stereotype,
            tags,
            name: name.into(),
            name_style,
        }
    }

    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    pub fn stereotype(&self) -> Option<&str> {
        self.stereotype.as_deref()
    }

    pub fn tags(&self) -> Option<&str> {
        self.tags.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_style(&self) -> NameStyle {
        self.name_style
    }

    /// The `type` shown above the name: an explicit stereotype, or
    /// `abstract` for an abstract name.
    pub fn type_label(&self) -> Option<&str> {
        match self.name_style {
            NameStyle::Abstract => Some("abstract"),
            NameStyle::Plain | NameStyle::Object => self.stereotype(),
        }
    }
}

/// Up to three sections of a class-like body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassBody {
    header: Header,
    members: Vec<TextLine>,
    operations: Vec<TextLine>,
    simple: bool,
}

impl ClassBody {
    /// A body with member and operation blocks
    pub fn full(header: Header, members: Vec<TextLine>, operations: Vec<TextLine>) -> Self {
        Self {
            header,
            members,
            operations,
            simple: false,
        }
    }

    /// A single-section body, rendered without member/operation blocks
    pub fn simple(header: Header) -> Self {
        Self {
            header,
            members: Vec::new(),
            operations: Vec::new(),
            simple: true,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn members(&self) -> &[TextLine] {
        &self.members
    }

    pub fn operations(&self) -> &[TextLine] {
        &self.operations
    }

    pub fn is_simple(&self) -> bool {
        self.simple
    }
}

/// The kind of a leaf element, derived from the record's type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Class,
    Interface,
    Note,
}

impl ElementKind {
    /// Maps an editor type tag onto an element kind.
    ///
    /// Unknown tags are treated as classes.
    pub fn from_type_tag(tag: &str) -> Self {
        match tag {
            "UMLInterface" => Self::Interface,
            "UMLNote" => Self::Note,
            _ => Self::Class,
        }
    }
}

/// Text content of a leaf element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementBody {
    Class(ClassBody),
    /// Free text of a note, kept verbatim.
    Note(String),
}

/// A leaf shape.
#[derive(Debug, Clone)]
pub struct Element {
    id: Id,
    kind: ElementKind,
    frame: Frame,
    body: ElementBody,
    span: Span,
    geometry: OnceCell<ShapeGeometry>,
}

impl Element {
    pub fn new(id: Id, kind: ElementKind, frame: Frame, body: ElementBody, span: Span) -> Self {
        Self {
            id,
            kind,
            frame,
            body,
            span,
            geometry: OnceCell::new(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn body(&self) -> &ElementBody {
        &self.body
    }
}

impl Shape for Element {
    fn id(&self) -> Id {
        self.id
    }

    fn reference(&self) -> Id {
        match self.kind {
            ElementKind::Note => self.id.with_prefix("note_"),
            ElementKind::Class | ElementKind::Interface => self.id,
        }
    }

    fn frame(&self) -> Frame {
        self.frame
    }

    fn span(&self) -> Span {
        self.span
    }

    fn geometry(&self) -> Option<ShapeGeometry> {
        self.geometry.get().copied()
    }

    fn derive_geometry(&self, transform: CoordinateTransform) -> ShapeGeometry {
        *self
            .geometry
            .get_or_init(|| ShapeGeometry::from_frame(self.frame, transform))
    }
}

/// A container shape.
#[derive(Debug, Clone)]
pub struct Package {
    id: Id,
    frame: Frame,
    header: Header,
    span: Span,
    geometry: OnceCell<ShapeGeometry>,
}

impl Package {
    pub fn new(id: Id, frame: Frame, header: Header, span: Span) -> Self {
        Self {
            id,
            frame,
            header,
            span,
            geometry: OnceCell::new(),
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }
}

impl Shape for Package {
    fn id(&self) -> Id {
        self.id
    }

    fn frame(&self) -> Frame {
        self.frame
    }

    fn span(&self) -> Span {
        self.span
    }

    fn geometry(&self) -> Option<ShapeGeometry> {
        self.geometry.get().copied()
    }

    fn derive_geometry(&self, transform: CoordinateTransform) -> ShapeGeometry {
        *self
            .geometry
            .get_or_init(|| ShapeGeometry::from_frame(self.frame, transform))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str, frame: Frame) -> Element {
        Element::new(
            Id::new(name),
            ElementKind::Class,
            frame,
            ElementBody::Class(ClassBody::simple(Header::default())),
            Span::default(),
        )
    }

    #[test]
    fn test_element_kind_from_type_tag() {
        assert_eq!(ElementKind::from_type_tag("UMLClass"), ElementKind::Class);
        assert_eq!(
            ElementKind::from_type_tag("UMLInterface"),
            ElementKind::Interface
        );
        assert_eq!(ElementKind::from_type_tag("UMLNote"), ElementKind::Note);
        assert_eq!(ElementKind::from_type_tag("UMLActor"), ElementKind::Class);
    }

    #[test]
    fn test_geometry_is_absent_until_derived() {
        let element = class("UMLClass0", Frame::new(0.0, 0.0, 10.0, 10.0));

        assert!(element.geometry().is_none());
        assert!(!element.contains(Point::new(0.0, 0.0)));

        element.derive_geometry(CoordinateTransform::new(1.0));
        assert!(element.contains(Point::new(5.0, -5.0)));
    }

    #[test]
    fn test_geometry_is_frozen_after_first_derivation() {
        let package = Package::new(
            Id::new("UMLPackage0"),
            Frame::new(0.0, 0.0, 100.0, 100.0),
            Header::default(),
            Span::default(),
        );

        let first = package.derive_geometry(CoordinateTransform::new(0.02));
        let second = package.derive_geometry(CoordinateTransform::new(1.0));

        assert_eq!(first, second);
        assert_eq!(package.geometry(), Some(first));
    }

    #[test]
    fn test_frame_geometry_corners() {
        let geometry = ShapeGeometry::from_frame(
            Frame::new(10.0, 20.0, 30.0, 40.0),
            CoordinateTransform::new(1.0),
        );

        assert_eq!(geometry.bounds().min_x(), 10.0);
        assert_eq!(geometry.bounds().max_x(), 40.0);
        assert_eq!(geometry.bounds().max_y(), -20.0);
        assert_eq!(geometry.bounds().min_y(), -60.0);
        assert_eq!(geometry.center(), Point::new(25.0, -40.0));
    }

    #[test]
    fn test_note_reference_is_prefixed() {
        let note = Element::new(
            Id::new("UMLNote0"),
            ElementKind::Note,
            Frame::default(),
            ElementBody::Note("remember".to_string()),
            Span::default(),
        );

        assert_eq!(note.id(), "UMLNote0");
        assert_eq!(note.reference(), "note_UMLNote0");
    }

    #[test]
    fn test_header_type_label() {
        let abstract_header = Header::new(
            None,
            Some("entity".to_string()),
            None,
            "Shape",
            NameStyle::Abstract,
        );
        assert_eq!(abstract_header.type_label(), Some("abstract"));

        let plain = Header::new(None, Some("entity".to_string()), None, "Shape", NameStyle::Plain);
        assert_eq!(plain.type_label(), Some("entity"));

        assert_eq!(Header::default().type_label(), None);
    }
}
