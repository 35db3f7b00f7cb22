//! Connectors and their resolution state.

use std::fmt;

use crate::{
    geometry::{CoordinateTransform, Point},
    identifier::Id,
    span::Span,
};

/// Style token used when a relation does not specify one.
pub const PLAIN_STYLE: &str = "-";

/// Classification of a connector path into a drawing style.
///
/// | variant                          | code  | bends |
/// |----------------------------------|-------|-------|
/// | `Straight`                       | `--`  | 0     |
/// | `VerticalFirst`                  | `\|-`  | 1     |
/// | `HorizontalFirst`                | `-\|`  | 1     |
/// | `VerticalHorizontalVertical`     | `\|-\|` | 2     |
/// | `HorizontalVerticalHorizontal`   | `-\|-` | 2     |
/// | `Loop`                           | -     | 0     |
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RouteShape {
    #[default]
    Straight,
    VerticalFirst,
    HorizontalFirst,
    VerticalHorizontalVertical,
    HorizontalVerticalHorizontal,
    /// Both endpoints attach to the same shape.
    Loop,
}

impl RouteShape {
    /// The TikZ-UML `geometry` code, `None` for self-loops.
    pub fn code(self) -> Option<&'static str> {
        match self {
            Self::Straight => Some("--"),
            Self::VerticalFirst => Some("|-"),
            Self::HorizontalFirst => Some("-|"),
            Self::VerticalHorizontalVertical => Some("|-|"),
            Self::HorizontalVerticalHorizontal => Some("-|-"),
            Self::Loop => None,
        }
    }

    pub fn bend_count(self) -> u8 {
        match self {
            Self::Straight | Self::Loop => 0,
            Self::VerticalFirst | Self::HorizontalFirst => 1,
            Self::VerticalHorizontalVertical | Self::HorizontalVerticalHorizontal => 2,
        }
    }

    /// The same route walked from the other end.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tikzlet_core::semantic::RouteShape;
    /// assert_eq!(RouteShape::VerticalFirst.reversed(), RouteShape::HorizontalFirst);
    /// assert_eq!(
    ///     RouteShape::VerticalHorizontalVertical.reversed(),
    ///     RouteShape::VerticalHorizontalVertical
    /// );
    /// ```
    pub fn reversed(self) -> Self {
        match self {
            Self::VerticalFirst => Self::HorizontalFirst,
            Self::HorizontalFirst => Self::VerticalFirst,
            other => other,
        }
    }

    pub fn is_loop(self) -> bool {
        matches!(self, Self::Loop)
    }
}

impl fmt::Display for RouteShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code().unwrap_or("loop"))
    }
}

/// Where one end of a relation attaches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Endpoint {
    /// The end lies inside a shape; `shape` is the shape's reference name and
    /// `angle` the boundary anchor in degrees.
    Attached { shape: Id, angle: f32 },
    /// No shape contains the end; a zero-size anchor named `anchor` is
    /// synthesized at `at` (canvas coordinates).
    Detached { anchor: Id, at: Point },
}

impl Endpoint {
    /// Name the connector command uses for this end
    pub fn reference(&self) -> Id {
        match self {
            Self::Attached { shape, .. } => *shape,
            Self::Detached { anchor, .. } => *anchor,
        }
    }

    /// Anchor angle for attached ends
    pub fn angle(&self) -> Option<f32> {
        match self {
            Self::Attached { angle, .. } => Some(*angle),
            Self::Detached { .. } => None,
        }
    }

    pub fn is_attached(&self) -> bool {
        matches!(self, Self::Attached { .. })
    }
}

/// Optional text carried by a relation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationLabels {
    pub mult1: Option<String>,
    pub mult2: Option<String>,
    pub role1: Option<String>,
    pub role2: Option<String>,
    pub title: Option<String>,
}

/// A connector between two shapes or free points.
#[derive(Debug, Clone)]
pub struct Relation {
    id: Id,
    origin: Point,
    offsets: Vec<Point>,
    style: String,
    labels: RelationLabels,
    span: Span,
    waypoints: Vec<Point>,
    start: Option<Endpoint>,
    end: Option<Endpoint>,
    route: RouteShape,
    command: Option<String>,
    mirrored: bool,
}

impl Relation {
    /// Creates an unresolved relation.
    ///
    /// `origin` is the record's own position and `offsets` the waypoint
    /// offsets relative to it, both in source units.
    pub fn new(
        id: Id,
        origin: Point,
        offsets: Vec<Point>,
        style: impl Into<String>,
        labels: RelationLabels,
        span: Span,
    ) -> Self {
        Self {
            id,
            origin,
            offsets,
            style: style.into(),
            labels,
            span,
            waypoints: Vec::new(),
            start: None,
            end: None,
            route: RouteShape::default(),
            command: None,
            mirrored: false,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Raw style token, e.g. `<<-`
    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn labels(&self) -> &RelationLabels {
        &self.labels
    }

    /// Waypoints in source coordinates
    pub fn source_waypoints(&self) -> impl Iterator<Item = Point> + '_ {
        self.offsets
            .iter()
            .map(|offset| self.origin.add_point(*offset))
    }

    /// Transforms every waypoint onto the canvas.
    pub fn derive_waypoints(&mut self, transform: CoordinateTransform) {
        self.waypoints = self
            .source_waypoints()
            .map(|point| transform.apply(point.x(), point.y()))
            .collect();
    }

    /// Waypoints in canvas coordinates; empty until derived
    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    /// Canvas position of the record's own origin
    pub fn origin(&self, transform: CoordinateTransform) -> Point {
        transform.apply(self.origin.x(), self.origin.y())
    }

    pub fn start(&self) -> Option<&Endpoint> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&Endpoint> {
        self.end.as_ref()
    }

    pub fn set_endpoints(&mut self, start: Endpoint, end: Endpoint) {
        self.start = Some(start);
        self.end = Some(end);
    }

    /// Both ends attach to the same shape
    pub fn is_self_loop(&self) -> bool {
        match (&self.start, &self.end) {
            (Some(Endpoint::Attached { shape: a, .. }), Some(Endpoint::Attached { shape: b, .. })) => {
                a == b
            }
            _ => false,
        }
    }

    pub fn route(&self) -> RouteShape {
        self.route
    }

    pub fn set_route(&mut self, route: RouteShape) {
        self.route = route;
    }

    /// Resolved drawing command, e.g. `umlinherit`
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn set_command(&mut self, command: impl Into<String>) {
        self.command = Some(command.into());
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    /// Exchanges start and end and walks the route backwards.
    ///
    /// Multiplicities and roles travel with their ends. Mirroring twice
    /// restores the original orientation.
    pub fn mirror(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
        std::mem::swap(&mut self.labels.mult1, &mut self.labels.mult2);
        std::mem::swap(&mut self.labels.role1, &mut self.labels.role2);
        self.route = self.route.reversed();
        self.mirrored = !self.mirrored;
    }
}
