//! Preview payload: the JSON structure the viewer renders before a real
//! export is requested.
//!
//! Built from the mesh pipeline (plus hole detection, which runs only
//! here) so the preview is available even when exact curve data is not.
//! All coordinates round to 3 decimals.

use serde::{Deserialize, Serialize};

use faceplate_brep::FaceData;

use crate::export::basis_for_face;
use crate::holes::{detect_holes, DetectedHole, HoleDetectionParams};
use crate::mesh_boundary::extract_boundary;
use crate::types::Point2D;

/// Minimum reported width/height.
const MIN_DIMENSION: f64 = 0.1;

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

fn rounded(points: &[Point2D]) -> Vec<[f64; 2]> {
    points.iter().map(|p| [round3(p.x), round3(p.y)]).collect()
}

/// A closed or open polyline in the preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewPath {
    /// Entity tag, always `LWPOLYLINE`.
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Points as `[x, y]` pairs, rounded to 3 decimals.
    pub points: Vec<[f64; 2]>,
    /// Whether the path is closed.
    pub closed: bool,
}

impl PreviewPath {
    fn closed_from(points: &[Point2D]) -> Self {
        let mut pts = rounded(points);
        if let (Some(first), Some(last)) = (pts.first().copied(), pts.last().copied()) {
            if first != last {
                pts.push(first);
            }
        }
        Self {
            entity_type: "LWPOLYLINE".to_string(),
            points: pts,
            closed: true,
        }
    }
}

/// A detected hole in the preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PreviewHole {
    /// Circular hole.
    #[serde(rename = "CIRCLE")]
    Circle {
        /// Center `[x, y]`, rounded.
        center: [f64; 2],
        /// Radius, rounded.
        radius: f64,
    },
    /// Non-circular hole outline.
    #[serde(rename = "LWPOLYLINE")]
    Polyline {
        /// Outline points, closed.
        points: Vec<[f64; 2]>,
        /// Always true.
        closed: bool,
    },
}

/// Bounding values of the preview drawing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewBounds {
    /// Minimum X.
    pub x_min: f64,
    /// Maximum X.
    pub x_max: f64,
    /// Minimum Y.
    pub y_min: f64,
    /// Maximum Y.
    pub y_max: f64,
}

/// Width/height plus bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewDimensions {
    /// Width, floored at 0.1.
    pub width: f64,
    /// Height, floored at 0.1.
    pub height: f64,
    /// Axis-aligned bounds.
    pub bounds: PreviewBounds,
}

/// The complete preview payload for one face.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewPayload {
    /// Face index.
    pub face_id: usize,
    /// Surface classification as text (`Plane`/`Curved`/`Unknown`).
    pub face_type: String,
    /// Outer boundary path.
    pub boundary: PreviewPath,
    /// Detected holes.
    pub holes: Vec<PreviewHole>,
    /// Drawing dimensions.
    pub dimensions: PreviewDimensions,
    /// Number of entities in the payload.
    pub entity_count: usize,
}

fn placeholder_path() -> PreviewPath {
    PreviewPath {
        entity_type: "LWPOLYLINE".to_string(),
        points: vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]],
        closed: true,
    }
}

fn placeholder_dimensions() -> PreviewDimensions {
    PreviewDimensions {
        width: 10.0,
        height: 10.0,
        bounds: PreviewBounds {
            x_min: 0.0,
            x_max: 10.0,
            y_min: 0.0,
            y_max: 10.0,
        },
    }
}

fn dimensions_of(boundary: &[Point2D]) -> PreviewDimensions {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for p in boundary {
        x_min = x_min.min(p.x);
        x_max = x_max.max(p.x);
        y_min = y_min.min(p.y);
        y_max = y_max.max(p.y);
    }
    PreviewDimensions {
        width: round3((x_max - x_min).max(MIN_DIMENSION)),
        height: round3((y_max - y_min).max(MIN_DIMENSION)),
        bounds: PreviewBounds {
            x_min: round3(x_min),
            x_max: round3(x_max),
            y_min: round3(y_min),
            y_max: round3(y_max),
        },
    }
}

/// Build the preview payload for one face.
///
/// Mirrors the export fallback chain but stops at the mesh stage; hole
/// detection runs only here.
pub fn build_preview(face: &FaceData, params: &HoleDetectionParams) -> PreviewPayload {
    let mut payload = PreviewPayload {
        face_id: face.id,
        face_type: face.surface_class.to_string(),
        boundary: placeholder_path(),
        holes: Vec::new(),
        dimensions: placeholder_dimensions(),
        entity_count: 1,
    };

    let Some(mesh) = face.mesh.as_ref() else {
        return payload;
    };
    if mesh.num_vertices() < 3 {
        return payload;
    }

    let basis = basis_for_face(face);
    let projected = basis.project_all(&mesh.vertex_points());
    let boundary = extract_boundary(&projected, &mesh.triangles);
    if boundary.len() < 3 {
        return payload;
    }

    payload.boundary = PreviewPath::closed_from(&boundary);
    payload.dimensions = dimensions_of(&boundary);

    for hole in detect_holes(&projected, &boundary, params) {
        match hole {
            DetectedHole::Circle { center, radius } => {
                payload.holes.push(PreviewHole::Circle {
                    center: [round3(center.x), round3(center.y)],
                    radius: round3(radius),
                });
            }
            DetectedHole::Outline { points } => {
                if points.len() < 3 {
                    continue;
                }
                let mut pts = rounded(&points);
                if let (Some(first), Some(last)) = (pts.first().copied(), pts.last().copied()) {
                    if first != last {
                        pts.push(first);
                    }
                }
                payload.holes.push(PreviewHole::Polyline {
                    points: pts,
                    closed: true,
                });
            }
        }
        payload.entity_count += 1;
    }

    payload
}
