#![warn(missing_docs)]

//! B-rep face data model for the faceplate flattening engine.
//!
//! The exchange-file reader (the kernel collaborator) hands the core a
//! parsed set of faces. This crate defines that hand-off contract:
//! faces with a surface classification and normal, wires of ordered
//! edges, analytic curve geometry with typed evaluation errors, and the
//! triangulated mesh used by the fallback pipeline.
//!
//! All types serialize with serde so a face set can round-trip as JSON;
//! 3D coordinates are stored as `[f64; 3]` arrays to avoid requiring
//! nalgebra's serde feature.

pub mod curve;
pub mod face;
pub mod mesh;

pub use curve::{CircleCurve, CurveClass, CurveError, CurveGeometry, EllipseCurve, LineCurve, SampledCurve};
pub use face::{EdgeData, FaceData, SurfaceClass, WireData};
pub use mesh::TriangleMesh;

#[cfg(test)]
mod tests {
    use super::*;
    use faceplate_math::Point3;

    /// A square planar face with one circular hole wire, the shape the
    /// exchange reader typically produces.
    fn make_plate_face() -> FaceData {
        let boundary = WireData {
            edges: vec![
                EdgeData::line_between(
                    Point3::new(-10.0, -10.0, 0.0),
                    Point3::new(10.0, -10.0, 0.0),
                ),
                EdgeData::line_between(
                    Point3::new(10.0, -10.0, 0.0),
                    Point3::new(10.0, 10.0, 0.0),
                ),
                EdgeData::line_between(
                    Point3::new(10.0, 10.0, 0.0),
                    Point3::new(-10.0, 10.0, 0.0),
                ),
                EdgeData::line_between(
                    Point3::new(-10.0, 10.0, 0.0),
                    Point3::new(-10.0, -10.0, 0.0),
                ),
            ],
        };
        let hole = WireData {
            edges: vec![EdgeData::new(
                Some(CurveGeometry::Circle(CircleCurve::in_xy_plane(
                    Point3::new(2.0, 3.0, 0.0),
                    1.5,
                ))),
                0.0,
                std::f64::consts::TAU,
            )],
        };
        FaceData {
            id: 0,
            surface_class: SurfaceClass::Plane,
            normal: [0.0, 0.0, 1.0],
            wires: vec![boundary, hole],
            mesh: None,
        }
    }

    #[test]
    fn test_face_set_round_trips_as_json() {
        let face = make_plate_face();
        let json = serde_json::to_string(&face).expect("serialize");
        let back: FaceData = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.wires.len(), 2);
        assert_eq!(back.wires[0].edges.len(), 4);
        let edge = &back.wires[1].edges[0];
        assert_eq!(
            edge.curve().expect("curve present").class(),
            CurveClass::Circle
        );
    }

    #[test]
    fn test_boundary_wire_is_longer_than_hole() {
        let face = make_plate_face();
        let boundary_len = face.wires[0].length();
        let hole_len = face.wires[1].length();
        assert!((boundary_len - 80.0).abs() < 1e-9, "perimeter of 20x20 square");
        assert!(
            (hole_len - 1.5 * std::f64::consts::TAU).abs() < 1e-9,
            "full-circle circumference"
        );
        assert!(boundary_len > hole_len);
    }
}
