//! Endpoint attachment for connectors.
//!
//! Each end of a connector is attached to the first shape whose box contains
//! it, leaf elements before containers, each in document order. Overlapping
//! shapes are therefore resolved by document order; this is intentional and
//! not reported.
//!
//! An attached end also gets an anchor angle: the direction, seen from the
//! shape's center, of the point where the ray towards the end leaves the
//! box.

use log::trace;

use tikzlet_core::{
    geometry::{Bounds, CoordinateTransform, Point},
    semantic::{Diagram, Endpoint, Relation, ShapeSet},
};
use tikzlet_parser::error::{Diagnostic, ErrorCode};

/// Suffix of the synthesized anchor for an unattached start.
const START_ANCHOR_SUFFIX: &str = "node1";
/// Suffix of the synthesized anchor for an unattached end.
const END_ANCHOR_SUFFIX: &str = "node2";

/// Which end of a connector is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Start,
    End,
}

impl End {
    fn anchor_suffix(self) -> &'static str {
        match self {
            Self::Start => START_ANCHOR_SUFFIX,
            Self::End => END_ANCHOR_SUFFIX,
        }
    }

    fn code(self) -> ErrorCode {
        match self {
            Self::Start => ErrorCode::W300,
            Self::End => ErrorCode::W301,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

/// Computes the anchor angle, in degrees, of a connector end at `point`.
///
/// The ray starts at the box center and points towards `point`, or towards
/// `neighbor` when `point` is the center itself. Among the box edges it
/// crosses with a positive ray parameter, the nearest crossing wins. Without
/// any crossing the angle from the center to `point` is used.
///
/// # Examples
///
/// ```
/// # use tikzlet::layout::connection::anchor_angle;
/// # use tikzlet_core::geometry::{Bounds, Point};
/// let bounds = Bounds::from_corners(Point::new(0.0, 0.0), Point::new(4.0, -2.0));
///
/// // Straight up from the center leaves through the top edge.
/// let angle = anchor_angle(bounds, bounds.center(), Point::new(2.0, -0.5), None);
/// assert!((angle - 90.0).abs() < 1e-4);
/// ```
pub fn anchor_angle(bounds: Bounds, center: Point, point: Point, neighbor: Option<Point>) -> f32 {
    let direction = match (point.sub_point(center), neighbor) {
        (direction, Some(neighbor)) if direction.is_zero() => neighbor.sub_point(center),
        (direction, _) => direction,
    };

    let (dx, dy) = (direction.x(), direction.y());
    let mut nearest: Option<(f32, Point)> = None;
    let mut consider = |t: f32, crossing: Point| {
        if t > 0.0 && nearest.is_none_or(|(best, _)| t < best) {
            nearest = Some((t, crossing));
        }
    };

    if dx != 0.0 {
        for edge_x in [bounds.min_x(), bounds.max_x()] {
            let t = (edge_x - center.x()) / dx;
            let y = center.y() + t * dy;
            if bounds.min_y() <= y && y <= bounds.max_y() {
                consider(t, Point::new(edge_x, y));
            }
        }
    }
    if dy != 0.0 {
        for edge_y in [bounds.max_y(), bounds.min_y()] {
            let t = (edge_y - center.y()) / dy;
            let x = center.x() + t * dx;
            if bounds.min_x() <= x && x <= bounds.max_x() {
                consider(t, Point::new(x, edge_y));
            }
        }
    }

    match nearest {
        Some((_, crossing)) => center.angle_to(crossing),
        None => center.angle_to(point),
    }
}

/// Attaches connector ends to shapes.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionResolver {
    transform: CoordinateTransform,
}

impl ConnectionResolver {
    /// Creates a resolver; `transform` places connectors without waypoints.
    pub fn new(transform: CoordinateTransform) -> Self {
        Self { transform }
    }

    /// Resolves both ends of every connector of `diagram`.
    ///
    /// Shape geometry must already be derived. Returns one warning per
    /// unattached end.
    pub fn resolve_all(&self, diagram: &mut Diagram) -> Vec<Diagnostic> {
        let (shapes, relations) = diagram.split_for_resolution();
        let mut warnings = Vec::new();
        for relation in relations {
            warnings.extend(self.resolve(relation, shapes));
        }
        warnings
    }

    /// Resolves both ends of `relation` against `shapes`.
    ///
    /// The start is the first waypoint and the end the last one; each is
    /// resolved independently, so a connector whose ends lie in the same
    /// shape becomes a self-loop.
    pub fn resolve(&self, relation: &mut Relation, shapes: ShapeSet<'_>) -> Vec<Diagnostic> {
        let waypoints = relation.waypoints();
        let origin = relation.origin(self.transform);

        // (point, neighbor) of each end
        let (start_at, end_at) = match waypoints {
            [] => ((origin, None), (origin, None)),
            [single] => ((*single, None), (*single, None)),
            [first, .., last] => (
                (*first, waypoints.get(1).copied()),
                (*last, waypoints.get(waypoints.len() - 2).copied()),
            ),
        };

        let (start, start_warning) = self.resolve_end(relation, End::Start, start_at, shapes);
        let (end, end_warning) = self.resolve_end(relation, End::End, end_at, shapes);

        trace!(
            relation:% = relation.id(),
            start:% = start.reference(),
            end:% = end.reference();
            "Resolved connector"
        );
        relation.set_endpoints(start, end);
        start_warning.into_iter().chain(end_warning).collect()
    }

    /// Attaches one end, or synthesizes a detached anchor and a warning.
    fn resolve_end(
        &self,
        relation: &Relation,
        end: End,
        (point, neighbor): (Point, Option<Point>),
        shapes: ShapeSet<'_>,
    ) -> (Endpoint, Option<Diagnostic>) {
        let attached = shapes.iter().find_map(|shape| {
            let geometry = shape.geometry()?;
            shape.contains(point).then(|| Endpoint::Attached {
                shape: shape.reference(),
                angle: anchor_angle(geometry.bounds(), geometry.center(), point, neighbor),
            })
        });
        if let Some(endpoint) = attached {
            return (endpoint, None);
        }

        let id = relation.id();
        let detached = Endpoint::Detached {
            anchor: id.with_suffix(end.anchor_suffix()),
            at: point,
        };
        let warning = Diagnostic::warning(format!(
            "{} of `{id}` is not attached to any shape",
            end.name()
        ))
        .with_code(end.code())
        .with_label(relation.span(), "connector defined here")
        .with_help("move the end point inside a shape to attach it");

        (detached, Some(warning))
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;
    use tikzlet_core::{
        identifier::Id,
        semantic::{
            ClassBody, Element, ElementBody, ElementKind, Frame, Header, PLAIN_STYLE, Package,
            RelationLabels, Shape,
        },
        span::Span,
    };

    use super::*;

    fn class(id: &str, frame: Frame) -> Element {
        Element::new(
            Id::new(id),
            ElementKind::Class,
            frame,
            ElementBody::Class(ClassBody::simple(Header::default())),
            Span::default(),
        )
    }

    fn relation(origin: (f32, f32), offsets: &[(f32, f32)]) -> Relation {
        Relation::new(
            Id::new("Relation0"),
            Point::new(origin.0, origin.1),
            offsets.iter().map(|(x, y)| Point::new(*x, *y)).collect(),
            PLAIN_STYLE,
            RelationLabels::default(),
            Span::default(),
        )
    }

    fn resolved(elements: Vec<Element>, packages: Vec<Package>, relation: Relation) -> (Diagram, Vec<Diagnostic>) {
        let mut diagram = Diagram::new(packages, elements, vec![relation]);
        crate::layout::geometry::derive_all(&mut diagram, CoordinateTransform::new(1.0));
        let warnings = ConnectionResolver::new(CoordinateTransform::new(1.0)).resolve_all(&mut diagram);
        (diagram, warnings)
    }

    #[test]
    fn test_anchor_angle_edges() {
        let bounds = Bounds::from_corners(Point::new(0.0, 0.0), Point::new(4.0, -2.0));
        let center = bounds.center();

        let right = anchor_angle(bounds, center, Point::new(3.5, -1.0), None);
        let left = anchor_angle(bounds, center, Point::new(0.5, -1.0), None);
        let down = anchor_angle(bounds, center, Point::new(2.0, -1.9), None);

        assert!(approx_eq!(f32, right, 0.0, epsilon = 1e-4));
        assert!(approx_eq!(f32, left.abs(), 180.0, epsilon = 1e-4));
        assert!(approx_eq!(f32, down, -90.0, epsilon = 1e-4));
    }

    #[test]
    fn test_anchor_angle_is_taken_at_the_boundary() {
        // The diagonal of a wide box leaves through the top edge.
        let bounds = Bounds::from_corners(Point::new(-2.0, 1.0), Point::new(2.0, -1.0));
        let angle = anchor_angle(bounds, Point::new(0.0, 0.0), Point::new(1.0, 1.0), None);

        assert!(approx_eq!(f32, angle, 45.0, epsilon = 1e-4));
    }

    #[test]
    fn test_anchor_angle_at_center_uses_neighbor() {
        let bounds = Bounds::from_corners(Point::new(0.0, 0.0), Point::new(2.0, -2.0));
        let center = bounds.center();

        let angle = anchor_angle(bounds, center, center, Some(Point::new(1.0, 5.0)));
        assert!(approx_eq!(f32, angle, 90.0, epsilon = 1e-4));

        let fallback = anchor_angle(bounds, center, center, None);
        assert!(approx_eq!(f32, fallback, 0.0, epsilon = 1e-4));
    }

    #[test]
    fn test_both_ends_attached() {
        let (diagram, warnings) = resolved(
            vec![
                class("UMLClass0", Frame::new(0.0, 0.0, 10.0, 10.0)),
                class("UMLClass1", Frame::new(50.0, 0.0, 10.0, 10.0)),
            ],
            Vec::new(),
            relation((5.0, 5.0), &[(0.0, 0.0), (50.0, 0.0)]),
        );
        let relation = &diagram.relations()[0];

        assert!(warnings.is_empty());
        assert_eq!(relation.start().unwrap().reference(), "UMLClass0");
        assert_eq!(relation.end().unwrap().reference(), "UMLClass1");
        assert!(!relation.is_self_loop());
    }

    #[test]
    fn test_unattached_end_synthesizes_anchor() {
        let (diagram, warnings) = resolved(
            vec![class("UMLClass0", Frame::new(0.0, 0.0, 10.0, 10.0))],
            Vec::new(),
            relation((0.0, 0.0), &[(5.0, 5.0), (100.0, 100.0)]),
        );
        let relation = &diagram.relations()[0];

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code(), Some(ErrorCode::W301));
        assert!(warnings[0].severity().is_warning());
        assert_eq!(
            relation.end(),
            Some(&Endpoint::Detached {
                anchor: Id::new("Relation0node2"),
                at: Point::new(100.0, -100.0),
            })
        );
    }

    #[test]
    fn test_elements_win_over_packages() {
        let package = Package::new(
            Id::new("UMLPackage0"),
            Frame::new(0.0, 0.0, 200.0, 200.0),
            Header::default(),
            Span::default(),
        );
        let (diagram, warnings) = resolved(
            vec![class("UMLClass0", Frame::new(100.0, 100.0, 50.0, 50.0))],
            vec![package],
            relation((0.0, 0.0), &[(10.0, 10.0), (120.0, 120.0)]),
        );
        let relation = &diagram.relations()[0];

        assert!(warnings.is_empty());
        assert_eq!(relation.start().unwrap().reference(), "UMLPackage0");
        assert_eq!(relation.end().unwrap().reference(), "UMLClass0");
    }

    #[test]
    fn test_first_shape_in_document_order_wins() {
        let (diagram, _) = resolved(
            vec![
                class("UMLClass0", Frame::new(0.0, 0.0, 20.0, 20.0)),
                class("UMLClass1", Frame::new(10.0, 10.0, 20.0, 20.0)),
            ],
            Vec::new(),
            relation((0.0, 0.0), &[(15.0, 15.0), (15.0, 15.0)]),
        );

        assert_eq!(
            diagram.relations()[0].start().unwrap().reference(),
            "UMLClass0"
        );
    }

    #[test]
    fn test_self_loop() {
        let (diagram, _) = resolved(
            vec![class("UMLClass0", Frame::new(0.0, 0.0, 40.0, 40.0))],
            Vec::new(),
            relation((0.0, 0.0), &[(10.0, 10.0), (60.0, 10.0), (60.0, 30.0), (30.0, 30.0)]),
        );

        assert!(diagram.relations()[0].is_self_loop());
    }

    #[test]
    fn test_note_is_referenced_by_pinned_name() {
        let note = Element::new(
            Id::new("UMLNote0"),
            ElementKind::Note,
            Frame::new(0.0, 0.0, 10.0, 10.0),
            ElementBody::Note("n".to_string()),
            Span::default(),
        );
        let (diagram, _) = resolved(
            vec![note],
            Vec::new(),
            relation((0.0, 0.0), &[(5.0, 5.0), (50.0, 50.0)]),
        );

        assert_eq!(
            diagram.relations()[0].start().unwrap().reference(),
            "note_UMLNote0"
        );
    }

    #[test]
    fn test_connector_without_waypoints_is_detached_at_origin() {
        let (diagram, warnings) = resolved(Vec::new(), Vec::new(), relation((3.0, 4.0), &[]));
        let relation = &diagram.relations()[0];

        let codes: Vec<_> = warnings.iter().filter_map(Diagnostic::code).collect();
        assert_eq!(codes, vec![ErrorCode::W300, ErrorCode::W301]);
        assert_eq!(
            relation.start(),
            Some(&Endpoint::Detached {
                anchor: Id::new("Relation0node1"),
                at: Point::new(3.0, -4.0),
            })
        );
    }

    fn check_single_containing_shape_attaches_start(x: f32, y: f32) {
        let (diagram, _) = resolved(
            vec![
                class("UMLClass0", Frame::new(0.0, 0.0, 100.0, 100.0)),
                class("UMLClass1", Frame::new(200.0, 0.0, 100.0, 100.0)),
            ],
            Vec::new(),
            relation((0.0, 0.0), &[(x, y), (500.0, 500.0)]),
        );
        let start = diagram.relations()[0].start().copied().unwrap();

        assert_eq!(start.reference(), "UMLClass0");
        let angle = start.angle().unwrap();
        assert!((-180.0..=180.0).contains(&angle));
        let shape = &diagram.elements()[0];
        assert!(shape.contains(Point::new(x, -y)));
    }

    proptest! {
        #[test]
        fn single_containing_shape_attaches_start(x in 1.0f32..99.0, y in 1.0f32..99.0) {
            check_single_containing_shape_attaches_start(x, y);
        }
    }
}
