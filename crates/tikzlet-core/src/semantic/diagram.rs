//! The root aggregate of the semantic model.

use crate::semantic::{Element, Package, Relation, Shape};

/// A diagram read from an editor export.
///
/// The diagram exclusively owns every container, element and relation.
/// Entities keep their document order, which is also the order used to break
/// ties whenever several shapes could claim the same point or box.
///
/// # Lifecycle
///
/// Built once by the parser, mutated in place by the geometry, connection,
/// route and style passes, consumed once by the exporter.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    packages: Vec<Package>,
    elements: Vec<Element>,
    relations: Vec<Relation>,
}

impl Diagram {
    pub fn new(packages: Vec<Package>, elements: Vec<Element>, relations: Vec<Relation>) -> Self {
        Self {
            packages,
            elements,
            relations,
        }
    }

    /// Containers in document order
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Leaf elements in document order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Relations in document order
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn relations_mut(&mut self) -> &mut [Relation] {
        &mut self.relations
    }

    /// Every shape, leaf elements first, then containers.
    ///
    /// This is the candidate order for endpoint attachment: a connector
    /// ending inside a class that sits inside a package attaches to the class.
    pub fn shapes(&self) -> impl Iterator<Item = &dyn Shape> {
        self.elements
            .iter()
            .map(|element| element as &dyn Shape)
            .chain(self.packages.iter().map(|package| package as &dyn Shape))
    }

    /// Splits the diagram into shared shapes and mutable relations, so a
    /// pass can resolve relations against the complete shape set.
    pub fn split_for_resolution(&mut self) -> (ShapeSet<'_>, &mut [Relation]) {
        (
            ShapeSet {
                elements: &self.elements,
                packages: &self.packages,
            },
            &mut self.relations,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty() && self.elements.is_empty() && self.relations.is_empty()
    }
}

/// Read-only view over the shapes of a [`Diagram`].
#[derive(Debug, Clone, Copy)]
pub struct ShapeSet<'a> {
    elements: &'a [Element],
    packages: &'a [Package],
}

impl<'a> ShapeSet<'a> {
    /// Every shape, leaf elements first, then containers
    pub fn iter(&self) -> impl Iterator<Item = &'a dyn Shape> + use<'a> {
        self.elements
            .iter()
            .map(|element| element as &dyn Shape)
            .chain(self.packages.iter().map(|package| package as &dyn Shape))
    }
}
