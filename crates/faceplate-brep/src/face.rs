//! Faces, wires, and edges as handed over by the exchange reader.

use faceplate_math::{Point3, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::curve::{CurveError, CurveGeometry, LineCurve};
use crate::mesh::TriangleMesh;

/// Surface classification reported for a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceClass {
    /// Planar surface.
    Plane,
    /// Any non-planar analytic or free-form surface.
    Curved,
    /// The kernel could not classify the surface.
    Unknown,
}

impl fmt::Display for SurfaceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SurfaceClass::Plane => "Plane",
            SurfaceClass::Curved => "Curved",
            SurfaceClass::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// A curve segment bounded by a parameter domain.
///
/// `curve` is `None` when the kernel failed to supply curve geometry for
/// the edge; evaluation then reports [`CurveError::MissingGeometry`] and
/// the classifier skips the edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeData {
    /// Underlying curve, if the kernel provided one.
    pub curve: Option<CurveGeometry>,
    /// First parameter of the domain.
    pub first: f64,
    /// Last parameter of the domain.
    pub last: f64,
}

impl EdgeData {
    /// Create an edge from curve geometry and a parameter domain.
    pub fn new(curve: Option<CurveGeometry>, first: f64, last: f64) -> Self {
        Self { curve, first, last }
    }

    /// A straight edge between two points, parameterized by arc length.
    pub fn line_between(p0: Point3, p1: Point3) -> Self {
        let d = p1 - p0;
        let len = d.norm();
        let dir = if len > f64::EPSILON {
            d / len
        } else {
            Vec3::x()
        };
        Self {
            curve: Some(CurveGeometry::Line(LineCurve {
                origin: [p0.x, p0.y, p0.z],
                dir: [dir.x, dir.y, dir.z],
            })),
            first: 0.0,
            last: len,
        }
    }

    /// The underlying curve, or a typed error when the kernel gave none.
    pub fn curve(&self) -> Result<&CurveGeometry, CurveError> {
        self.curve.as_ref().ok_or(CurveError::MissingGeometry)
    }

    /// Parameter domain `(first, last)`.
    pub fn domain(&self) -> (f64, f64) {
        (self.first, self.last)
    }

    /// Absolute parameter span of the domain.
    pub fn param_range(&self) -> f64 {
        (self.last - self.first).abs()
    }

    /// Evaluate the edge's curve at parameter `t`.
    pub fn point_at(&self, t: f64) -> Result<Point3, CurveError> {
        self.curve()?.value_at(t)
    }

    /// Arc length over the edge's domain; 0 when no curve is present.
    pub fn arc_length(&self) -> f64 {
        match &self.curve {
            Some(c) => c.arc_length(self.first, self.last),
            None => 0.0,
        }
    }
}

/// An ordered, cyclic sequence of edges bounding a face.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireData {
    /// Edges in wire order.
    pub edges: Vec<EdgeData>,
}

impl WireData {
    /// Total wire length: sum of edge arc lengths.
    pub fn length(&self) -> f64 {
        self.edges.iter().map(EdgeData::arc_length).sum()
    }
}

/// A face extracted from the exchange file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceData {
    /// Index of the face within its shape.
    pub id: usize,
    /// Surface classification.
    pub surface_class: SurfaceClass,
    /// Unit face normal `[x, y, z]`; all zeros when the kernel could not answer.
    pub normal: [f64; 3],
    /// Bounding wires; the outer boundary is not marked — classification
    /// happens downstream by wire length.
    pub wires: Vec<WireData>,
    /// Triangulation for the fallback pipeline, if available.
    pub mesh: Option<TriangleMesh>,
}

impl FaceData {
    /// The stored normal as a vector (possibly zero).
    pub fn normal_vec(&self) -> Vec3 {
        Vec3::new(self.normal[0], self.normal[1], self.normal[2])
    }

    /// A usable, non-zero normal: the stored one, else one derived from
    /// the mesh, else global +Z.
    pub fn resolved_normal(&self) -> Vec3 {
        let n = self.normal_vec();
        if n.norm() > 1e-12 {
            return n;
        }
        if let Some(mesh) = &self.mesh {
            if let Some(derived) = mesh.derived_normal() {
                return derived;
            }
        }
        Vec3::z()
    }
}
