//! Core types for the 2D drawing output: points, bounds, and primitives.

use serde::{Deserialize, Serialize};

/// A 2D point for serializable drawing output.
///
/// We use a custom type instead of nalgebra::Point2 to enable serde
/// serialization without requiring nalgebra's serde feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point2D {
    /// Create a new 2D point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Distance to another point.
    pub fn distance(&self, other: &Self) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// 2D axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox2D {
    /// Minimum X coordinate.
    pub min_x: f64,
    /// Minimum Y coordinate.
    pub min_y: f64,
    /// Maximum X coordinate.
    pub max_x: f64,
    /// Maximum Y coordinate.
    pub max_y: f64,
}

impl BoundingBox2D {
    /// Create an empty bounding box.
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Expand the bounding box to include a point.
    pub fn include_point(&mut self, p: Point2D) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Width of the bounding box.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if the bounding box is valid (non-empty).
    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Grow the box on every side by `fraction` of its larger extent.
    pub fn expanded_by_fraction(&self, fraction: f64) -> Self {
        let padding = self.width().max(self.height()) * fraction;
        Self {
            min_x: self.min_x - padding,
            min_y: self.min_y - padding,
            max_x: self.max_x + padding,
            max_y: self.max_y + padding,
        }
    }
}

impl Default for BoundingBox2D {
    fn default() -> Self {
        Self::empty()
    }
}

/// Whether a primitive belongs to the outer boundary or to a hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveClass {
    /// Outer loop of the face.
    Boundary,
    /// Interior cut-out loop.
    Hole,
}

/// A circular arc with resolved direction flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArcShape {
    /// Arc center.
    pub center: Point2D,
    /// Arc radius.
    pub radius: f64,
    /// Start angle in degrees, in the stored travel direction.
    pub start_angle: f64,
    /// End angle in degrees, in the stored travel direction.
    pub end_angle: f64,
    /// True when travel from start to end runs counter-clockwise.
    pub sweep_ccw: bool,
    /// True when the swept angle exceeds 180°.
    pub large_arc: bool,
}

impl ArcShape {
    /// Point on the arc at the stored start angle.
    pub fn start_point(&self) -> Point2D {
        self.point_at_angle(self.start_angle)
    }

    /// Point on the arc at the stored end angle.
    pub fn end_point(&self) -> Point2D {
        self.point_at_angle(self.end_angle)
    }

    fn point_at_angle(&self, angle_deg: f64) -> Point2D {
        let a = angle_deg.to_radians();
        Point2D::new(
            self.center.x + self.radius * a.cos(),
            self.center.y + self.radius * a.sin(),
        )
    }
}

/// The geometry of a drawing primitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    /// Straight segment.
    Line {
        /// Start point.
        p1: Point2D,
        /// End point.
        p2: Point2D,
    },
    /// Full circle.
    Circle {
        /// Center.
        center: Point2D,
        /// Radius.
        radius: f64,
    },
    /// Circular arc.
    Arc(ArcShape),
    /// Full ellipse.
    Ellipse {
        /// Center.
        center: Point2D,
        /// Major axis direction (projected, scaled by the major radius).
        major_axis: Point2D,
        /// Minor-to-major radius ratio.
        ratio: f64,
    },
    /// Open or closed point chain.
    Polyline {
        /// Points in order.
        points: Vec<Point2D>,
        /// True when the last point connects back to the first.
        closed: bool,
    },
}

/// One classified drawing primitive — the sole output contract handed
/// to format renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Primitive {
    /// Boundary or hole.
    pub class: PrimitiveClass,
    /// Geometry.
    pub shape: Shape,
}

impl Primitive {
    /// Create a primitive.
    pub fn new(class: PrimitiveClass, shape: Shape) -> Self {
        Self { class, shape }
    }

    /// Expand `bounds` to cover this primitive.
    ///
    /// Arcs contribute their endpoints; circles and ellipses contribute
    /// their full extents.
    pub fn include_in_bounds(&self, bounds: &mut BoundingBox2D) {
        match &self.shape {
            Shape::Line { p1, p2 } => {
                bounds.include_point(*p1);
                bounds.include_point(*p2);
            }
            Shape::Circle { center, radius } => {
                bounds.include_point(Point2D::new(center.x - radius, center.y - radius));
                bounds.include_point(Point2D::new(center.x + radius, center.y + radius));
            }
            Shape::Arc(arc) => {
                bounds.include_point(arc.start_point());
                bounds.include_point(arc.end_point());
            }
            Shape::Ellipse {
                center, major_axis, ..
            } => {
                let extent = major_axis.distance(&Point2D::ORIGIN);
                bounds.include_point(Point2D::new(center.x - extent, center.y - extent));
                bounds.include_point(Point2D::new(center.x + extent, center.y + extent));
            }
            Shape::Polyline { points, .. } => {
                for p in points {
                    bounds.include_point(*p);
                }
            }
        }
    }
}

/// Bounds covering a whole primitive list.
pub fn bounds_of(primitives: &[Primitive]) -> BoundingBox2D {
    let mut bounds = BoundingBox2D::empty();
    for p in primitives {
        p.include_in_bounds(&mut bounds);
    }
    bounds
}
