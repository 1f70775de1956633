//! Export orchestration: exact curve walking first, mesh boundary
//! reconstruction second, a placeholder square as the terminal stage.
//!
//! Each stage reports a typed outcome instead of throwing; the face
//! pipeline as a whole never fails — the worst case is the placeholder.

use faceplate_brep::FaceData;

use crate::consolidate::consolidate_arcs;
use crate::edges::classify_edge;
use crate::error::FlattenError;
use crate::projection::ProjectionBasis;
use crate::types::{bounds_of, BoundingBox2D, Point2D, Primitive, PrimitiveClass, Shape};
use crate::wires::{classify_wires, WireRole};

/// Which pipeline stage produced a face's drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineSource {
    /// Exact curve data from the face's wires.
    ExactCurves,
    /// Boundary reconstructed from the triangulation.
    MeshBoundary,
    /// The fixed placeholder square.
    Placeholder,
}

/// The flattened drawing for one face.
#[derive(Debug, Clone)]
pub struct FaceDrawing {
    /// Ordered primitives handed to format renderers.
    pub primitives: Vec<Primitive>,
    /// Number of wires that contributed (1 for mesh/placeholder output).
    pub wire_count: usize,
    /// Which stage produced the drawing.
    pub source: PipelineSource,
}

impl FaceDrawing {
    /// Number of drawing entities.
    pub fn entity_count(&self) -> usize {
        self.primitives.len()
    }

    /// Bounding box over all primitives.
    pub fn bounds(&self) -> BoundingBox2D {
        bounds_of(&self.primitives)
    }
}

/// Side length of the placeholder square.
const PLACEHOLDER_SIZE: f64 = 10.0;

/// Build the projection basis for a face, substituting +Z when the
/// resolved normal is still degenerate.
pub fn basis_for_face(face: &FaceData) -> ProjectionBasis {
    let normal = face.resolved_normal();
    match ProjectionBasis::from_normal(&normal) {
        Ok(basis) => basis,
        Err(_) => {
            log::warn!("face {}: degenerate normal, using XY basis", face.id);
            ProjectionBasis::default_xy()
        }
    }
}

/// Exact pipeline: classify wires, walk their edges, consolidate arcs.
///
/// Fails typed with [`FlattenError::NoGeometry`] when the face has no
/// wires or every edge failed or collapsed — the orchestrator then
/// branches to the mesh stage.
fn exact_attempt(face: &FaceData, basis: &ProjectionBasis) -> Result<Vec<Primitive>, FlattenError> {
    if face.wires.is_empty() {
        return Err(FlattenError::NoGeometry);
    }

    let roles = classify_wires(&face.wires);
    let mut primitives = Vec::new();

    for (wire, role) in face.wires.iter().zip(roles) {
        let class = match role {
            WireRole::Boundary => PrimitiveClass::Boundary,
            WireRole::Hole => PrimitiveClass::Hole,
        };
        for edge in &wire.edges {
            match classify_edge(edge, basis, class) {
                Ok(Some(primitive)) => primitives.push(primitive),
                Ok(None) => {}
                Err(err) => {
                    log::warn!("face {}: skipping edge: {err}", face.id);
                }
            }
        }
    }

    if primitives.is_empty() {
        return Err(FlattenError::NoGeometry);
    }
    Ok(consolidate_arcs(primitives))
}

/// Mesh pipeline: project the triangulation and reconstruct a closed
/// boundary polyline.
///
/// Fails typed with [`FlattenError::NoGeometry`] when no mesh is present
/// or fewer than 3 boundary points emerge.
fn mesh_attempt(face: &FaceData, basis: &ProjectionBasis) -> Result<Vec<Primitive>, FlattenError> {
    let mesh = face.mesh.as_ref().ok_or(FlattenError::NoGeometry)?;
    if mesh.num_vertices() < 3 {
        return Err(FlattenError::NoGeometry);
    }

    let projected = basis.project_all(&mesh.vertex_points());
    let path = crate::mesh_boundary::extract_boundary(&projected, &mesh.triangles);
    if path.len() < 3 {
        return Err(FlattenError::NoGeometry);
    }

    Ok(vec![Primitive::new(
        PrimitiveClass::Boundary,
        Shape::Polyline {
            points: path,
            closed: true,
        },
    )])
}

/// The terminal never-fail stage: a fixed square outline.
pub fn placeholder_primitives() -> Vec<Primitive> {
    vec![Primitive::new(
        PrimitiveClass::Boundary,
        Shape::Polyline {
            points: vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(PLACEHOLDER_SIZE, 0.0),
                Point2D::new(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE),
                Point2D::new(0.0, PLACEHOLDER_SIZE),
            ],
            closed: true,
        },
    )]
}

/// Flatten one face into an ordered primitive list.
///
/// Never fails: exact curves, then the mesh boundary, then the
/// placeholder square.
pub fn flatten_face(face: &FaceData) -> FaceDrawing {
    let basis = basis_for_face(face);

    let exact_err = match exact_attempt(face, &basis) {
        Ok(primitives) => {
            return FaceDrawing {
                primitives,
                wire_count: face.wires.len(),
                source: PipelineSource::ExactCurves,
            };
        }
        Err(err) => err,
    };

    log::debug!("face {}: exact pipeline unavailable ({exact_err}), trying mesh", face.id);
    let mesh_err = match mesh_attempt(face, &basis) {
        Ok(primitives) => {
            return FaceDrawing {
                primitives,
                wire_count: 1,
                source: PipelineSource::MeshBoundary,
            };
        }
        Err(err) => err,
    };

    log::warn!("face {}: mesh reconstruction failed ({mesh_err}), emitting placeholder square", face.id);
    FaceDrawing {
        primitives: placeholder_primitives(),
        wire_count: 1,
        source: PipelineSource::Placeholder,
    }
}
