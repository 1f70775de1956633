//! Triangulated face meshes for the fallback reconstruction pipeline.

use faceplate_math::{Point3, Vec3};
use serde::{Deserialize, Serialize};

/// A face's triangulation: 3D vertices plus triangle index triples.
///
/// This is the fallback representation the exchange reader always
/// produces, even when exact curve data is unavailable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Vertex positions `[x, y, z]`.
    pub vertices: Vec<[f64; 3]>,
    /// Triangle vertex indices.
    pub triangles: Vec<[usize; 3]>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// True when the mesh has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex `i` as a point.
    pub fn vertex_point(&self, i: usize) -> Point3 {
        let v = self.vertices[i];
        Point3::new(v[0], v[1], v[2])
    }

    /// All vertices as points.
    pub fn vertex_points(&self) -> Vec<Point3> {
        self.vertices
            .iter()
            .map(|v| Point3::new(v[0], v[1], v[2]))
            .collect()
    }

    /// Normal derived from the first non-degenerate triangle, if any.
    ///
    /// Used when the kernel could not answer a face-normal query.
    pub fn derived_normal(&self) -> Option<Vec3> {
        for tri in &self.triangles {
            if tri.iter().any(|&i| i >= self.vertices.len()) {
                continue;
            }
            let a = self.vertex_point(tri[0]);
            let b = self.vertex_point(tri[1]);
            let c = self.vertex_point(tri[2]);
            let n = (b - a).cross(&(c - a));
            if n.norm() > f64::EPSILON {
                return Some(n.normalize());
            }
        }
        None
    }
}
