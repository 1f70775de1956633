#![warn(missing_docs)]

//! Projection and reconstruction core for the faceplate engine.
//!
//! Turns a B-rep face into flat 2D vector geometry:
//!
//! - **Projection**: an orthonormal per-face basis built from the face
//!   normal, reused for every point of the face.
//! - **Exact pipeline**: wire classification (boundary vs. hole), edge
//!   classification into lines/circles/arcs/ellipses/polylines, arc
//!   direction resolution, and consolidation of split arcs into circles.
//! - **Fallback pipeline**: boundary reconstruction from the face's
//!   triangulation (boundary-edge walk, convex hull as a last resort)
//!   plus preview-only hole detection.
//! - **Never-fail guarantee**: a face with no usable geometry still
//!   yields a placeholder square.
//!
//! The output contract is the [`Primitive`] list; format renderers
//! implement [`DrawingRenderer`] over it and nothing else.

pub mod arcs;
pub mod consolidate;
pub mod edges;
pub mod error;
pub mod export;
pub mod holes;
pub mod mesh_boundary;
pub mod preview;
pub mod projection;
pub mod render;
pub mod types;
pub mod wires;

pub use arcs::{polar_angle_deg, resolve_arc};
pub use consolidate::consolidate_arcs;
pub use edges::classify_edge;
pub use error::FlattenError;
pub use export::{basis_for_face, flatten_face, FaceDrawing, PipelineSource};
pub use holes::{detect_holes, DetectedHole, HoleDetectionParams};
pub use mesh_boundary::{boundary_edges, convex_hull, extract_boundary, walk_boundary};
pub use preview::{build_preview, PreviewPayload};
pub use projection::ProjectionBasis;
pub use render::{write_drawing, DrawingRenderer};
pub use types::{bounds_of, ArcShape, BoundingBox2D, Point2D, Primitive, PrimitiveClass, Shape};
pub use wires::{classify_wires, WireRole};

#[cfg(test)]
mod tests {
    use super::*;
    use faceplate_brep::{
        CircleCurve, CurveGeometry, EdgeData, FaceData, SurfaceClass, TriangleMesh, WireData,
    };
    use faceplate_math::Point3;
    use std::f64::consts::TAU;

    /// A tilted square plate (normal along +X) with one circular hole —
    /// exercises basis construction away from the trivial XY case.
    fn tilted_plate() -> FaceData {
        let corners = [
            Point3::new(0.0, -10.0, -10.0),
            Point3::new(0.0, 10.0, -10.0),
            Point3::new(0.0, 10.0, 10.0),
            Point3::new(0.0, -10.0, 10.0),
        ];
        let boundary = WireData {
            edges: (0..4)
                .map(|i| EdgeData::line_between(corners[i], corners[(i + 1) % 4]))
                .collect(),
        };
        let hole = WireData {
            edges: vec![EdgeData::new(
                Some(CurveGeometry::Circle(CircleCurve {
                    center: [0.0, 2.0, 3.0],
                    x_axis: [0.0, 1.0, 0.0],
                    y_axis: [0.0, 0.0, 1.0],
                    radius: 2.0,
                })),
                0.0,
                TAU,
            )],
        };
        FaceData {
            id: 0,
            surface_class: SurfaceClass::Plane,
            normal: [1.0, 0.0, 0.0],
            wires: vec![boundary, hole],
            mesh: None,
        }
    }

    #[test]
    fn test_full_workflow_exact_pipeline() {
        let face = tilted_plate();
        let drawing = flatten_face(&face);

        assert_eq!(drawing.source, PipelineSource::ExactCurves);
        assert_eq!(drawing.entity_count(), 5, "4 boundary lines + 1 hole circle");

        let bounds = drawing.bounds();
        assert!(bounds.is_valid());
        assert!((bounds.width() - 20.0).abs() < 1e-9, "20-unit plate width");
        assert!((bounds.height() - 20.0).abs() < 1e-9, "20-unit plate height");

        let hole = drawing
            .primitives
            .iter()
            .find(|p| p.class == PrimitiveClass::Hole)
            .expect("hole primitive");
        match &hole.shape {
            Shape::Circle { radius, .. } => assert!((radius - 2.0).abs() < 1e-9),
            other => panic!("expected hole circle, got {other:?}"),
        }
    }

    #[test]
    fn test_full_workflow_mesh_fallback_and_preview() {
        // Same plate but with no curve data at all, only a triangulation.
        let face = FaceData {
            id: 1,
            surface_class: SurfaceClass::Plane,
            normal: [0.0, 0.0, 1.0],
            wires: Vec::new(),
            mesh: Some(TriangleMesh {
                vertices: vec![
                    [0.0, 0.0, 0.0],
                    [12.0, 0.0, 0.0],
                    [12.0, 9.0, 0.0],
                    [0.0, 9.0, 0.0],
                ],
                triangles: vec![[0, 1, 2], [0, 2, 3]],
            }),
        };

        let drawing = flatten_face(&face);
        assert_eq!(drawing.source, PipelineSource::MeshBoundary);

        let preview = build_preview(&face, &HoleDetectionParams::default());
        assert_eq!(preview.entity_count, 1);
        assert!((preview.dimensions.width - 12.0).abs() < 1e-9);
        assert!((preview.dimensions.height - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_never_fail_guarantee() {
        let empty_faces = [
            FaceData {
                id: 0,
                surface_class: SurfaceClass::Unknown,
                normal: [0.0, 0.0, 0.0],
                wires: Vec::new(),
                mesh: None,
            },
            FaceData {
                id: 1,
                surface_class: SurfaceClass::Curved,
                normal: [0.0, 0.0, 1.0],
                wires: vec![WireData { edges: Vec::new() }],
                mesh: Some(TriangleMesh::new()),
            },
        ];
        for face in &empty_faces {
            let drawing = flatten_face(face);
            assert!(
                drawing.entity_count() >= 1,
                "face {} must still produce a drawing",
                face.id
            );
        }
    }
}
