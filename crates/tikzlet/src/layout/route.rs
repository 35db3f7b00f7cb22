//! Routing-shape classification and label placement.
//!
//! A connector's waypoints are reduced to one of a few orthogonal drawing
//! styles by comparing the slope of its first leg with the slope of the
//! straight line between its two ends:
//!
//! ```text
//!   first leg steeper        first leg shallower
//!
//!   o                        o-------+
//!   |                                |
//!   +-------o                        o
//!
//!   VerticalFirst            HorizontalFirst
//! ```
//!
//! With four or more waypoints the two-bend variants are used instead.

use tikzlet_core::{
    geometry::Point,
    semantic::{Diagram, RouteShape},
};

/// Label position of the start-side multiplicity and role.
pub const START_LABEL_POSITION: f32 = 0.2;

/// Offset of the end-side labels past the last bend.
const END_LABEL_OFFSET: f32 = 0.8;

/// Classifies a connector path.
///
/// Self-loops always get [`RouteShape::Loop`]. Paths of at most two points,
/// paths whose ends are aligned horizontally or vertically, and paths whose
/// first leg runs along the end-to-end line are straight.
///
/// # Examples
///
/// ```
/// # use tikzlet::layout::route::classify;
/// # use tikzlet_core::{geometry::Point, semantic::RouteShape};
/// let path = [Point::new(0.0, 0.0), Point::new(0.0, 2.0), Point::new(3.0, 2.0)];
/// assert_eq!(classify(&path, false), RouteShape::VerticalFirst);
/// assert_eq!(classify(&path, true), RouteShape::Loop);
/// ```
pub fn classify(waypoints: &[Point], is_self_loop: bool) -> RouteShape {
    if is_self_loop {
        return RouteShape::Loop;
    }
    // Fewer than three points never bend.
    let [first, second, .., last] = waypoints else {
        return RouteShape::Straight;
    };

    let (dx_end, dy_end) = (last.x() - first.x(), last.y() - first.y());
    if dx_end == 0.0 || dy_end == 0.0 {
        return RouteShape::Straight;
    }
    let end_slope = (dy_end / dx_end).abs();

    let (dx_leg, dy_leg) = (second.x() - first.x(), second.y() - first.y());
    let leg_slope = if dx_leg == 0.0 {
        f32::INFINITY
    } else {
        (dy_leg / dx_leg).abs()
    };

    let two_bends = waypoints.len() > 3;
    match leg_slope.partial_cmp(&end_slope) {
        Some(std::cmp::Ordering::Greater) if two_bends => RouteShape::VerticalHorizontalVertical,
        Some(std::cmp::Ordering::Greater) => RouteShape::VerticalFirst,
        Some(std::cmp::Ordering::Less) if two_bends => RouteShape::HorizontalVerticalHorizontal,
        Some(std::cmp::Ordering::Less) => RouteShape::HorizontalFirst,
        Some(std::cmp::Ordering::Equal) | None => RouteShape::Straight,
    }
}

/// Classifies every connector of a resolved diagram.
pub fn classify_all(diagram: &mut Diagram) {
    for relation in diagram.relations_mut() {
        let route = classify(relation.waypoints(), relation.is_self_loop());
        relation.set_route(route);
    }
}

/// Label position of the end-side multiplicity and role.
///
/// Each bend adds one path segment, so the position moves one unit further
/// along the path.
pub fn end_label_position(route: RouteShape) -> f32 {
    f32::from(route.bend_count()) + END_LABEL_OFFSET
}

/// Side of its anchor a title is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleAlign {
    Above,
    Right,
}

impl TitleAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Above => "above",
            Self::Right => "right",
        }
    }
}

/// Where a connector title goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitlePlacement {
    /// Index of the path point the title is anchored at.
    pub anchor: u8,
    pub align: TitleAlign,
}

/// Places the title of a connector with the given route.
///
/// Two-bend routes carry the title at their middle leg: to the right of a
/// vertical one, above a horizontal one. Other routes carry it above their
/// first point.
pub fn title_placement(route: RouteShape) -> TitlePlacement {
    match route {
        RouteShape::HorizontalVerticalHorizontal => TitlePlacement {
            anchor: 3,
            align: TitleAlign::Right,
        },
        RouteShape::VerticalHorizontalVertical => TitlePlacement {
            anchor: 3,
            align: TitleAlign::Above,
        },
        RouteShape::Straight
        | RouteShape::VerticalFirst
        | RouteShape::HorizontalFirst
        | RouteShape::Loop => TitlePlacement {
            anchor: 1,
            align: TitleAlign::Above,
        },
    }
}
