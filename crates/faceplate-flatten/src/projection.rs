//! Per-face projection basis: an orthonormal 2D frame built from the
//! face normal, reused for every point of the face so all projected
//! coordinates stay consistent.

use faceplate_math::{Point3, Vec3};

use crate::error::FlattenError;
use crate::types::Point2D;

/// An orthonormal pair of in-plane axes derived from a face normal.
///
/// Invariant: `u·v = 0` and `|u| = |v| = 1`, within 1e-9.
#[derive(Debug, Clone)]
pub struct ProjectionBasis {
    u: Vec3,
    v: Vec3,
}

impl ProjectionBasis {
    /// Build a basis from a face normal.
    ///
    /// The reference axes are the two global axes least aligned with the
    /// normal (smallest |dot|), orthonormalized against the normal and
    /// each other by Gram-Schmidt. Fails with
    /// [`FlattenError::DegenerateNormal`] when the normal's length is
    /// effectively zero; callers substitute (0,0,1).
    pub fn from_normal(normal: &Vec3) -> Result<Self, FlattenError> {
        let len = normal.norm();
        if len < 1e-12 {
            return Err(FlattenError::DegenerateNormal);
        }
        let n = normal / len;

        let axes = [Vec3::x(), Vec3::y(), Vec3::z()];
        let mut order = [0usize, 1, 2];
        order.sort_by(|&a, &b| {
            let da = n.dot(&axes[a]).abs();
            let db = n.dot(&axes[b]).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });
        let first_ref = axes[order[0]];
        let second_ref = axes[order[1]];

        let u = (first_ref - n * n.dot(&first_ref)).normalize();
        let v_raw = second_ref - n * n.dot(&second_ref) - u * u.dot(&second_ref);
        let v = v_raw.normalize();

        Ok(Self { u, v })
    }

    /// Basis for the global +Z normal, the substitute for degenerate input.
    pub fn default_xy() -> Self {
        Self {
            u: Vec3::x(),
            v: Vec3::y(),
        }
    }

    /// First in-plane axis.
    pub fn u(&self) -> &Vec3 {
        &self.u
    }

    /// Second in-plane axis.
    pub fn v(&self) -> &Vec3 {
        &self.v
    }

    /// Project a 3D point into the basis: `(p·u, p·v)`.
    pub fn project(&self, p: &Point3) -> Point2D {
        let c = p.coords;
        Point2D::new(c.dot(&self.u), c.dot(&self.v))
    }

    /// Project a 3D direction vector (no origin involved — projection is
    /// linear, so vectors and points share the same formula).
    pub fn project_vec(&self, v: &Vec3) -> Point2D {
        Point2D::new(v.dot(&self.u), v.dot(&self.v))
    }

    /// Project a batch of points with the same basis.
    pub fn project_all(&self, points: &[Point3]) -> Vec<Point2D> {
        points.iter().map(|p| self.project(p)).collect()
    }
}
