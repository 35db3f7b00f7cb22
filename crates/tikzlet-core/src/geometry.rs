//! Geometric primitives for diagram conversion.
//!
//! This module provides the geometric types used throughout tikzlet to map
//! editor coordinates onto the TikZ canvas and to reason about shape boxes.
//!
//! # Overview
//!
//! - [`CoordinateTransform`] - Maps a source coordinate onto the canvas
//! - [`Point`] - A 2D coordinate
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate Systems
//!
//! The editor export grows downward, the TikZ canvas grows upward:
//!
//! ```text
//!   source                     canvas
//!   (0,0) ────────► +X           +Y
//!     │                          ▲
//!     │                          │
//!     ▼                          │
//!    +Y                        (0,0) ────────► +X
//! ```
//!
//! [`CoordinateTransform::apply`] scales both axes and flips the Y axis, so a
//! box that is "top-left to bottom-right" in the source keeps that visual
//! orientation on the canvas while its Y values become negative.

/// Default scale between editor pixels and TikZ centimetres.
pub const DEFAULT_SCALE: f32 = 0.02;

/// A 2D point representing a position in canvas coordinate space.
///
/// # Examples
///
/// ```
/// # use tikzlet_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let delta = p1.sub_point(p2);
/// assert_eq!(delta.x(), 5.0);
/// assert_eq!(delta.y(), 15.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Returns the angle in degrees of the vector from this point to `other`.
    ///
    /// The angle is measured counter-clockwise from the positive X axis and
    /// lies in `(-180, 180]`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tikzlet_core::geometry::Point;
    /// let origin = Point::new(0.0, 0.0);
    /// assert_eq!(origin.angle_to(Point::new(1.0, 0.0)), 0.0);
    /// assert!((origin.angle_to(Point::new(0.0, 2.0)) - 90.0).abs() < 1e-4);
    /// assert!((origin.angle_to(Point::new(-3.0, 0.0)) - 180.0).abs() < 1e-4);
    /// ```
    pub fn angle_to(self, other: Point) -> f32 {
        let delta = other.sub_point(self);
        delta.y.atan2(delta.x).to_degrees()
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates.
///
/// Bounds are always normalized: whichever corner order they were built from,
/// `min_* <= max_*` holds afterwards. Containment tests therefore never depend
/// on corner naming.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds spanning two arbitrary opposite corners.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tikzlet_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::from_corners(Point::new(0.0, 0.0), Point::new(2.0, -1.0));
    /// assert_eq!(bounds.min_y(), -1.0);
    /// assert_eq!(bounds.max_y(), 0.0);
    /// ```
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Creates a zero-size bounds located at `point`
    pub fn at_point(point: Point) -> Self {
        Self::from_corners(point, point)
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the top-left corner as seen on the canvas (Y grows upward).
    pub fn top_left(self) -> Point {
        Point::new(self.min_x, self.max_y)
    }

    /// Inclusive point membership test.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tikzlet_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::from_corners(Point::new(0.0, 0.0), Point::new(1.0, -1.0));
    /// assert!(bounds.contains_point(Point::new(0.5, -0.5)));
    /// assert!(bounds.contains_point(Point::new(1.0, 0.0)));
    /// assert!(!bounds.contains_point(Point::new(1.5, -0.5)));
    /// ```
    pub fn contains_point(self, point: Point) -> bool {
        self.min_x <= point.x
            && point.x <= self.max_x
            && self.min_y <= point.y
            && point.y <= self.max_y
    }

    /// Inclusive containment test for another bounds
    pub fn contains_bounds(self, other: Bounds) -> bool {
        self.min_x <= other.min_x
            && other.max_x <= self.max_x
            && self.min_y <= other.min_y
            && other.max_y <= self.max_y
    }
}

/// Linear map from editor coordinates to canvas coordinates.
///
/// `apply(x, y) = (x * scale, -y * scale)`. The transform is pure and applied
/// uniformly to every position, size offset and waypoint before any geometric
/// reasoning takes place.
///
/// # Examples
///
/// ```
/// # use tikzlet_core::geometry::CoordinateTransform;
/// let transform = CoordinateTransform::default();
/// let point = transform.apply(50.0, 50.0);
/// assert_eq!(point.x(), 1.0);
/// assert_eq!(point.y(), -1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    scale: f32,
}

impl CoordinateTransform {
    /// Creates a transform with the given scale.
    ///
    /// The scale must be strictly positive; callers validate configuration
    /// values before constructing a transform.
    pub fn new(scale: f32) -> Self {
        debug_assert!(scale > 0.0, "scale must be positive");
        Self { scale }
    }

    /// Returns the scale factor
    pub fn scale(self) -> f32 {
        self.scale
    }

    /// Maps a source coordinate onto the canvas
    pub fn apply(self, x: f32, y: f32) -> Point {
        Point::new(x * self.scale, -y * self.scale)
    }
}

impl Default for CoordinateTransform {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE)
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn frame_strategy() -> impl Strategy<Value = (f32, f32, f32, f32)> {
        (
            -1000.0f32..1000.0,
            -1000.0f32..1000.0,
            0.0f32..500.0,
            0.0f32..500.0,
        )
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn scale_strategy() -> impl Strategy<Value = f32> {
        0.001f32..10.0
    }

    // ===================
    // Property Test Functions
    // ===================

    /// The center of a transformed frame always lies inside its bounds.
    fn check_center_is_contained(
        (x, y, w, h): (f32, f32, f32, f32),
        scale: f32,
    ) -> Result<(), TestCaseError> {
        let transform = CoordinateTransform::new(scale);
        let bounds = Bounds::from_corners(transform.apply(x, y), transform.apply(x + w, y + h));

        prop_assert!(bounds.contains_point(bounds.center()));
        Ok(())
    }

    /// Corner order never changes the normalized bounds.
    fn check_corner_order_is_irrelevant(a: Point, b: Point) -> Result<(), TestCaseError> {
        let forward = Bounds::from_corners(a, b);
        let backward = Bounds::from_corners(b, a);

        prop_assert_eq!(forward, backward);
        prop_assert!(forward.min_x() <= forward.max_x());
        prop_assert!(forward.min_y() <= forward.max_y());
        Ok(())
    }

    /// The transform is linear: apply(a + b) == apply(a) + apply(b).
    fn check_transform_is_linear(a: Point, b: Point, scale: f32) -> Result<(), TestCaseError> {
        let transform = CoordinateTransform::new(scale);
        let sum = a.add_point(b);

        let direct = transform.apply(sum.x(), sum.y());
        let split = transform
            .apply(a.x(), a.y())
            .add_point(transform.apply(b.x(), b.y()));

        prop_assert!(approx_eq!(f32, direct.x(), split.x(), epsilon = 0.01));
        prop_assert!(approx_eq!(f32, direct.y(), split.y(), epsilon = 0.01));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn center_is_contained(frame in frame_strategy(), scale in scale_strategy()) {
            check_center_is_contained(frame, scale)?;
        }

        #[test]
        fn corner_order_is_irrelevant(a in point_strategy(), b in point_strategy()) {
            check_corner_order_is_irrelevant(a, b)?;
        }

        #[test]
        fn transform_is_linear(a in point_strategy(), b in point_strategy(), scale in scale_strategy()) {
            check_transform_is_linear(a, b, scale)?;
        }
    }
}
