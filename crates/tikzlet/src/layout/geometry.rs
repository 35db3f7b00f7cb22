//! Canvas geometry of shapes and connectors.

use tikzlet_core::{geometry::CoordinateTransform, semantic::Diagram};

/// Derives the box of every shape and the canvas waypoints of every
/// connector.
///
/// Shape geometry is frozen on first derivation, so running this twice with
/// different transforms keeps the first boxes.
pub fn derive_all(diagram: &mut Diagram, transform: CoordinateTransform) {
    for shape in diagram.shapes() {
        shape.derive_geometry(transform);
    }
    for relation in diagram.relations_mut() {
        relation.derive_waypoints(transform);
    }
}

#[cfg(test)]
mod tests {
    use tikzlet_core::{
        geometry::Point,
        identifier::Id,
        semantic::{
            ClassBody, Element, ElementBody, ElementKind, Frame, Header, PLAIN_STYLE, Relation,
            RelationLabels, Shape,
        },
        span::Span,
    };

    use super::*;

    #[test]
    fn test_derive_all() {
        let element = Element::new(
            Id::new("UMLClass0"),
            ElementKind::Class,
            Frame::new(0.0, 0.0, 100.0, 50.0),
            ElementBody::Class(ClassBody::simple(Header::default())),
            Span::default(),
        );
        let relation = Relation::new(
            Id::new("Relation0"),
            Point::new(100.0, 0.0),
            vec![Point::new(0.0, 0.0), Point::new(50.0, 50.0)],
            PLAIN_STYLE,
            RelationLabels::default(),
            Span::default(),
        );
        let mut diagram = Diagram::new(Vec::new(), vec![element], vec![relation]);

        derive_all(&mut diagram, CoordinateTransform::default());

        let geometry = diagram.elements()[0].geometry().unwrap();
        assert!(geometry.bounds().contains_point(geometry.center()));
        assert_eq!(geometry.bounds().max_x(), 2.0);
        assert_eq!(
            diagram.relations()[0].waypoints(),
            &[Point::new(2.0, 0.0), Point::new(3.0, -1.0)]
        );
    }
}
