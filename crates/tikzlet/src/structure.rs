//! Container nesting for resolved diagrams.
//!
//! Packages nest by box containment: a package or leaf element belongs to a
//! package whose box fully contains its own. The exporter walks the
//! resulting forest so that every `umlpackage` environment encloses its
//! nested packages and owned elements.
//!
//! # Ambiguity
//!
//! When several packages contain a box, the innermost ones are preferred and
//! among those the first in document order wins. Overlapping packages
//! therefore produce a document-order-dependent nesting; this is accepted
//! and not reported.

use log::trace;

use tikzlet_core::{
    geometry::Bounds,
    semantic::{Diagram, Shape},
};

/// Ownership forest of packages and elements.
///
/// All indices refer to positions in [`Diagram::packages`] and
/// [`Diagram::elements`] of the diagram the hierarchy was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerHierarchy {
    package_parents: Vec<Option<usize>>,
    element_owners: Vec<Option<usize>>,
    child_packages: Vec<Vec<usize>>,
    owned_elements: Vec<Vec<usize>>,
}

impl ContainerHierarchy {
    /// Builds the hierarchy of a diagram whose geometry has been derived.
    ///
    /// Shapes without geometry never own and are never owned.
    pub fn from_diagram(diagram: &Diagram) -> Self {
        let package_bounds: Vec<Option<Bounds>> = diagram
            .packages()
            .iter()
            .map(|package| package.geometry().map(|geometry| geometry.bounds()))
            .collect();

        let package_parents: Vec<Option<usize>> = package_bounds
            .iter()
            .enumerate()
            .map(|(index, bounds)| {
                let bounds = (*bounds)?;
                // Identical boxes only nest into an earlier package.
                innermost_container(&package_bounds, bounds, |candidate, candidate_bounds| {
                    candidate != index && (candidate_bounds != bounds || candidate < index)
                })
            })
            .collect();

        let element_owners: Vec<Option<usize>> = diagram
            .elements()
            .iter()
            .map(|element| {
                let bounds = element.geometry()?.bounds();
                innermost_container(&package_bounds, bounds, |_, _| true)
            })
            .collect();

        let mut child_packages = vec![Vec::new(); package_bounds.len()];
        for (child, parent) in package_parents.iter().enumerate() {
            if let Some(parent) = parent {
                child_packages[*parent].push(child);
            }
        }

        let mut owned_elements = vec![Vec::new(); package_bounds.len()];
        for (element, owner) in element_owners.iter().enumerate() {
            if let Some(owner) = owner {
                owned_elements[*owner].push(element);
            }
        }

        trace!(package_parents:?, element_owners:?; "Container hierarchy built");

        Self {
            package_parents,
            element_owners,
            child_packages,
            owned_elements,
        }
    }

    /// Parent package of the package at `index`.
    pub fn package_parent(&self, index: usize) -> Option<usize> {
        self.package_parents.get(index).copied().flatten()
    }

    /// Owning package of the element at `index`.
    pub fn element_owner(&self, index: usize) -> Option<usize> {
        self.element_owners.get(index).copied().flatten()
    }

    /// Packages nested directly in no other package, in document order.
    pub fn root_packages(&self) -> impl Iterator<Item = usize> + '_ {
        self.package_parents
            .iter()
            .enumerate()
            .filter(|(_, parent)| parent.is_none())
            .map(|(index, _)| index)
    }

    /// Packages nested directly in the package at `index`, in document order.
    pub fn child_packages(&self, index: usize) -> &[usize] {
        self.child_packages.get(index).map(Vec::as_slice).unwrap_or_default()
    }

    /// Elements owned directly by the package at `index`, in document order.
    pub fn owned_elements(&self, index: usize) -> &[usize] {
        self.owned_elements.get(index).map(Vec::as_slice).unwrap_or_default()
    }

    /// Elements outside every package, in document order.
    pub fn unowned_elements(&self) -> impl Iterator<Item = usize> + '_ {
        self.element_owners
            .iter()
            .enumerate()
            .filter(|(_, owner)| owner.is_none())
            .map(|(index, _)| index)
    }
}

/// Picks the container of `bounds` among `packages`.
///
/// `eligible` filters candidates by index and box. Of the eligible packages
/// containing `bounds`, those that contain no other such package are
/// innermost; the first of them wins.
fn innermost_container(
    packages: &[Option<Bounds>],
    bounds: Bounds,
    eligible: impl Fn(usize, Bounds) -> bool,
) -> Option<usize> {
    let candidates: Vec<(usize, Bounds)> = packages
        .iter()
        .enumerate()
        .filter_map(|(index, candidate)| candidate.map(|candidate| (index, candidate)))
        .filter(|(index, candidate)| candidate.contains_bounds(bounds) && eligible(*index, *candidate))
        .collect();

    candidates
        .iter()
        .find(|(_, outer)| {
            !candidates
                .iter()
                .any(|(_, inner)| inner != outer && outer.contains_bounds(*inner))
        })
        .map(|(index, _)| *index)
}

#[cfg(test)]
mod tests {
    use tikzlet_core::{
        geometry::CoordinateTransform,
        identifier::Id,
        semantic::{ClassBody, Element, ElementBody, ElementKind, Frame, Header, Package},
        span::Span,
    };

    use super::*;

    fn package(index: usize, frame: Frame) -> Package {
        Package::new(
            Id::sequenced("UMLPackage", index),
            frame,
            Header::default(),
            Span::default(),
        )
    }

    fn element(index: usize, kind: ElementKind, frame: Frame) -> Element {
        let body = match kind {
            ElementKind::Note => ElementBody::Note("note".to_string()),
            ElementKind::Class | ElementKind::Interface => {
                ElementBody::Class(ClassBody::simple(Header::default()))
            }
        };
        Element::new(
            Id::sequenced("UMLClass", index),
            kind,
            frame,
            body,
            Span::default(),
        )
    }

    fn hierarchy(packages: Vec<Package>, elements: Vec<Element>) -> ContainerHierarchy {
        let mut diagram = Diagram::new(packages, elements, Vec::new());
        crate::layout::geometry::derive_all(&mut diagram, CoordinateTransform::new(1.0));
        ContainerHierarchy::from_diagram(&diagram)
    }

    #[test]
    fn test_nested_packages_pick_innermost_parent() {
        let hierarchy = hierarchy(
            vec![
                package(0, Frame::new(0.0, 0.0, 100.0, 100.0)),
                package(1, Frame::new(10.0, 10.0, 50.0, 50.0)),
                package(2, Frame::new(20.0, 20.0, 10.0, 10.0)),
            ],
            vec![element(0, ElementKind::Class, Frame::new(22.0, 22.0, 5.0, 5.0))],
        );

        assert_eq!(hierarchy.package_parent(0), None);
        assert_eq!(hierarchy.package_parent(1), Some(0));
        assert_eq!(hierarchy.package_parent(2), Some(1));
        assert_eq!(hierarchy.element_owner(0), Some(2));
        assert_eq!(hierarchy.root_packages().collect::<Vec<_>>(), vec![0]);
        assert_eq!(hierarchy.child_packages(0), &[1]);
        assert_eq!(hierarchy.owned_elements(2), &[0]);
        assert!(hierarchy.owned_elements(0).is_empty());
    }

    #[test]
    fn test_overlapping_packages_first_wins() {
        let hierarchy = hierarchy(
            vec![
                package(0, Frame::new(0.0, 0.0, 60.0, 60.0)),
                package(1, Frame::new(40.0, 0.0, 60.0, 60.0)),
            ],
            vec![element(0, ElementKind::Class, Frame::new(45.0, 10.0, 10.0, 10.0))],
        );

        assert_eq!(hierarchy.element_owner(0), Some(0));
        assert_eq!(hierarchy.root_packages().count(), 2);
    }

    #[test]
    fn test_identical_packages_nest_into_earlier() {
        let frame = Frame::new(0.0, 0.0, 50.0, 50.0);
        let hierarchy = hierarchy(vec![package(0, frame), package(1, frame)], Vec::new());

        assert_eq!(hierarchy.package_parent(0), None);
        assert_eq!(hierarchy.package_parent(1), Some(0));
    }

    #[test]
    fn test_partially_covered_element_is_unowned() {
        let hierarchy = hierarchy(
            vec![package(0, Frame::new(0.0, 0.0, 50.0, 50.0))],
            vec![
                element(0, ElementKind::Class, Frame::new(40.0, 40.0, 20.0, 20.0)),
                element(1, ElementKind::Note, Frame::new(100.0, 100.0, 10.0, 10.0)),
                element(2, ElementKind::Class, Frame::new(10.0, 10.0, 10.0, 10.0)),
            ],
        );

        assert_eq!(hierarchy.element_owner(0), None);
        assert_eq!(hierarchy.element_owner(2), Some(0));
        assert_eq!(hierarchy.unowned_elements().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_shapes_without_geometry_are_ignored() {
        let diagram = Diagram::new(
            vec![package(0, Frame::new(0.0, 0.0, 50.0, 50.0))],
            vec![element(0, ElementKind::Class, Frame::new(10.0, 10.0, 5.0, 5.0))],
            Vec::new(),
        );
        let hierarchy = ContainerHierarchy::from_diagram(&diagram);

        assert_eq!(hierarchy.element_owner(0), None);
        assert_eq!(hierarchy.package_parent(0), None);
    }
}
