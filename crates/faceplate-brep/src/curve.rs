//! Analytic curve geometry for edges.
//!
//! Mirrors the curve kinds an exchange-file kernel reports for an edge:
//! lines, circles, ellipses, and free-form curves that arrive only as
//! sampled points. Evaluation is parametric; an edge's domain selects
//! the segment actually used.

use faceplate_math::{Point3, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of segments used when measuring an ellipse arc numerically.
const ELLIPSE_LENGTH_SEGMENTS: usize = 64;

/// Errors raised while accessing or evaluating an edge's curve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// The kernel supplied no curve geometry for this edge.
    #[error("edge has no underlying curve geometry")]
    MissingGeometry,
    /// The curve exists but could not be evaluated.
    #[error("curve evaluation failed: {0}")]
    Evaluation(String),
}

/// Classification of an edge's underlying curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveClass {
    /// Straight segment.
    Line,
    /// Circular arc or full circle.
    Circle,
    /// Elliptical arc or full ellipse.
    Ellipse,
    /// Free-form curve (B-spline etc.) available only as samples.
    Other,
}

/// A straight line, parameterized by arc length along `dir` from `origin`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineCurve {
    /// Point at parameter 0 `[x, y, z]`.
    pub origin: [f64; 3],
    /// Unit direction `[x, y, z]`.
    pub dir: [f64; 3],
}

impl LineCurve {
    /// Evaluate at parameter `t`.
    pub fn value_at(&self, t: f64) -> Point3 {
        Point3::new(
            self.origin[0] + t * self.dir[0],
            self.origin[1] + t * self.dir[1],
            self.origin[2] + t * self.dir[2],
        )
    }
}

/// A circle in 3D, parameterized as `center + r·(cos t · x_axis + sin t · y_axis)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircleCurve {
    /// Circle center `[x, y, z]`.
    pub center: [f64; 3],
    /// Unit vector at parameter 0 `[x, y, z]`.
    pub x_axis: [f64; 3],
    /// Unit vector at parameter π/2 `[x, y, z]`.
    pub y_axis: [f64; 3],
    /// Radius.
    pub radius: f64,
}

impl CircleCurve {
    /// A circle lying in the global XY plane.
    pub fn in_xy_plane(center: Point3, radius: f64) -> Self {
        Self {
            center: [center.x, center.y, center.z],
            x_axis: [1.0, 0.0, 0.0],
            y_axis: [0.0, 1.0, 0.0],
            radius,
        }
    }

    /// Circle center as a point.
    pub fn center_point(&self) -> Point3 {
        Point3::new(self.center[0], self.center[1], self.center[2])
    }

    /// Evaluate at parameter `t` (radians).
    pub fn value_at(&self, t: f64) -> Point3 {
        let (s, c) = t.sin_cos();
        Point3::new(
            self.center[0] + self.radius * (c * self.x_axis[0] + s * self.y_axis[0]),
            self.center[1] + self.radius * (c * self.x_axis[1] + s * self.y_axis[1]),
            self.center[2] + self.radius * (c * self.x_axis[2] + s * self.y_axis[2]),
        )
    }
}

/// An ellipse in 3D with distinct major/minor radii along its axes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EllipseCurve {
    /// Ellipse center `[x, y, z]`.
    pub center: [f64; 3],
    /// Unit vector along the major axis `[x, y, z]`.
    pub x_axis: [f64; 3],
    /// Unit vector along the minor axis `[x, y, z]`.
    pub y_axis: [f64; 3],
    /// Major radius.
    pub major_radius: f64,
    /// Minor radius.
    pub minor_radius: f64,
}

impl EllipseCurve {
    /// Ellipse center as a point.
    pub fn center_point(&self) -> Point3 {
        Point3::new(self.center[0], self.center[1], self.center[2])
    }

    /// Major axis direction as a vector.
    pub fn major_dir(&self) -> Vec3 {
        Vec3::new(self.x_axis[0], self.x_axis[1], self.x_axis[2])
    }

    /// Ratio of minor to major radius, 0 when the major radius is degenerate.
    pub fn ratio(&self) -> f64 {
        if self.major_radius.abs() < f64::EPSILON {
            0.0
        } else {
            self.minor_radius / self.major_radius
        }
    }

    /// Evaluate at parameter `t` (radians).
    pub fn value_at(&self, t: f64) -> Point3 {
        let (s, c) = t.sin_cos();
        let a = self.major_radius * c;
        let b = self.minor_radius * s;
        Point3::new(
            self.center[0] + a * self.x_axis[0] + b * self.y_axis[0],
            self.center[1] + a * self.x_axis[1] + b * self.y_axis[1],
            self.center[2] + a * self.x_axis[2] + b * self.y_axis[2],
        )
    }
}

/// A free-form curve known only through evenly spaced parameter samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampledCurve {
    /// Sample points `[x, y, z]`, evenly spaced in parameter.
    pub points: Vec<[f64; 3]>,
    /// Parameter of the first sample.
    pub first: f64,
    /// Parameter of the last sample.
    pub last: f64,
}

impl SampledCurve {
    /// Evaluate at parameter `t` by piecewise-linear interpolation.
    pub fn value_at(&self, t: f64) -> Result<Point3, CurveError> {
        if self.points.len() < 2 {
            return Err(CurveError::Evaluation(format!(
                "sampled curve has {} points, need at least 2",
                self.points.len()
            )));
        }
        let span = self.last - self.first;
        if span.abs() < f64::EPSILON {
            return Err(CurveError::Evaluation(
                "sampled curve has an empty parameter range".into(),
            ));
        }
        let s = ((t - self.first) / span).clamp(0.0, 1.0);
        let scaled = s * (self.points.len() - 1) as f64;
        let i = (scaled.floor() as usize).min(self.points.len() - 2);
        let frac = scaled - i as f64;
        let a = self.points[i];
        let b = self.points[i + 1];
        Ok(Point3::new(
            a[0] + frac * (b[0] - a[0]),
            a[1] + frac * (b[1] - a[1]),
            a[2] + frac * (b[2] - a[2]),
        ))
    }

    /// Total polyline length over the sample points.
    pub fn polyline_length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| {
                let dx = w[1][0] - w[0][0];
                let dy = w[1][1] - w[0][1];
                let dz = w[1][2] - w[0][2];
                (dx * dx + dy * dy + dz * dz).sqrt()
            })
            .sum()
    }
}

/// The curve geometry behind an edge, as reported by the kernel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurveGeometry {
    /// Straight line.
    Line(LineCurve),
    /// Circle or circular arc.
    Circle(CircleCurve),
    /// Ellipse or elliptical arc.
    Ellipse(EllipseCurve),
    /// Free-form sampled curve.
    Sampled(SampledCurve),
}

impl CurveGeometry {
    /// Classification used by the edge classifier.
    pub fn class(&self) -> CurveClass {
        match self {
            CurveGeometry::Line(_) => CurveClass::Line,
            CurveGeometry::Circle(_) => CurveClass::Circle,
            CurveGeometry::Ellipse(_) => CurveClass::Ellipse,
            CurveGeometry::Sampled(_) => CurveClass::Other,
        }
    }

    /// Evaluate the curve at parameter `t`.
    pub fn value_at(&self, t: f64) -> Result<Point3, CurveError> {
        match self {
            CurveGeometry::Line(line) => Ok(line.value_at(t)),
            CurveGeometry::Circle(circle) => Ok(circle.value_at(t)),
            CurveGeometry::Ellipse(ellipse) => Ok(ellipse.value_at(t)),
            CurveGeometry::Sampled(sampled) => sampled.value_at(t),
        }
    }

    /// Arc length of the segment between parameters `first` and `last`.
    pub fn arc_length(&self, first: f64, last: f64) -> f64 {
        let span = (last - first).abs();
        match self {
            CurveGeometry::Line(line) => {
                let d = Vec3::new(line.dir[0], line.dir[1], line.dir[2]);
                span * d.norm()
            }
            CurveGeometry::Circle(circle) => span * circle.radius,
            CurveGeometry::Ellipse(ellipse) => {
                let mut total = 0.0;
                let mut prev = ellipse.value_at(first);
                for i in 1..=ELLIPSE_LENGTH_SEGMENTS {
                    let t = first + (last - first) * i as f64 / ELLIPSE_LENGTH_SEGMENTS as f64;
                    let p = ellipse.value_at(t);
                    total += (p - prev).norm();
                    prev = p;
                }
                total
            }
            CurveGeometry::Sampled(sampled) => sampled.polyline_length(),
        }
    }
}
