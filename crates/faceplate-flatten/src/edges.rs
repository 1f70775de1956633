//! Edge classification: turn one B-rep edge into one 2D primitive.
//!
//! Lines, full circles, arcs, and full ellipses map to their exact
//! primitives; everything else is discretized into a polyline. Failures
//! are per-edge: the caller logs, skips the edge, and keeps going.

use std::f64::consts::TAU;

use faceplate_brep::{CurveClass, CurveError, CurveGeometry, EdgeData};

use crate::arcs::resolve_arc;
use crate::projection::ProjectionBasis;
use crate::types::{Point2D, Primitive, PrimitiveClass, Shape};

/// Sample count for free-form curves on the primary export path.
pub const EXPORT_CURVE_SAMPLES: usize = 20;

/// Sample count for the secondary polyline fallback (partial ellipses).
pub const FALLBACK_CURVE_SAMPLES: usize = 12;

/// A parameter range within this tolerance of 2π classifies as a full turn.
pub const FULL_TURN_TOLERANCE: f64 = 0.01;

/// Consecutive projected samples closer than this are dropped.
pub const MIN_SEGMENT_LENGTH: f64 = 0.001;

/// Classify one edge into a primitive.
///
/// Returns `Ok(None)` when the edge degenerates to nothing worth
/// emitting (e.g. a polyline that collapses below
/// [`MIN_SEGMENT_LENGTH`]).
pub fn classify_edge(
    edge: &EdgeData,
    basis: &ProjectionBasis,
    class: PrimitiveClass,
) -> Result<Option<Primitive>, CurveError> {
    let curve = edge.curve()?;
    match curve.class() {
        CurveClass::Line => {
            let p1 = basis.project(&edge.point_at(edge.first)?);
            let p2 = basis.project(&edge.point_at(edge.last)?);
            Ok(Some(Primitive::new(class, Shape::Line { p1, p2 })))
        }
        CurveClass::Circle => classify_circle_edge(edge, curve, basis, class),
        CurveClass::Ellipse => classify_ellipse_edge(edge, curve, basis, class),
        CurveClass::Other => {
            Ok(sampled_polyline(edge, basis, EXPORT_CURVE_SAMPLES)?
                .map(|points| polyline_primitive(class, points)))
        }
    }
}

/// True when the edge's parameter span covers a full turn.
fn is_full_turn(edge: &EdgeData) -> bool {
    (edge.param_range() - TAU).abs() < FULL_TURN_TOLERANCE
}

fn classify_circle_edge(
    edge: &EdgeData,
    curve: &CurveGeometry,
    basis: &ProjectionBasis,
    class: PrimitiveClass,
) -> Result<Option<Primitive>, CurveError> {
    let CurveGeometry::Circle(circle) = curve else {
        return Err(CurveError::Evaluation(
            "circle-classified edge without circle geometry".into(),
        ));
    };
    let center = basis.project(&circle.center_point());
    let radius = circle.radius;

    if is_full_turn(edge) {
        return Ok(Some(Primitive::new(class, Shape::Circle { center, radius })));
    }

    let start = basis.project(&edge.point_at(edge.first)?);
    let end = basis.project(&edge.point_at(edge.last)?);
    let mid = basis.project(&edge.point_at((edge.first + edge.last) / 2.0)?);
    let arc = resolve_arc(center, radius, start, end, mid);
    Ok(Some(Primitive::new(class, Shape::Arc(arc))))
}

fn classify_ellipse_edge(
    edge: &EdgeData,
    curve: &CurveGeometry,
    basis: &ProjectionBasis,
    class: PrimitiveClass,
) -> Result<Option<Primitive>, CurveError> {
    let CurveGeometry::Ellipse(ellipse) = curve else {
        return Err(CurveError::Evaluation(
            "ellipse-classified edge without ellipse geometry".into(),
        ));
    };

    if is_full_turn(edge) {
        let center = basis.project(&ellipse.center_point());
        let axis_2d = basis.project_vec(&(ellipse.major_dir() * ellipse.major_radius));
        return Ok(Some(Primitive::new(
            class,
            Shape::Ellipse {
                center,
                major_axis: axis_2d,
                ratio: ellipse.ratio(),
            },
        )));
    }

    // Elliptical arcs have no dedicated primitive; discretize on the
    // shorter secondary path.
    Ok(sampled_polyline(edge, basis, FALLBACK_CURVE_SAMPLES)?
        .map(|points| polyline_primitive(class, points)))
}

/// Sample an edge's curve at `samples + 1` evenly spaced parameters,
/// project, and drop near-duplicate consecutive points.
///
/// Returns `Ok(None)` when fewer than two distinct points survive.
fn sampled_polyline(
    edge: &EdgeData,
    basis: &ProjectionBasis,
    samples: usize,
) -> Result<Option<Vec<Point2D>>, CurveError> {
    let mut points: Vec<Point2D> = Vec::with_capacity(samples + 1);
    for i in 0..=samples {
        let t = edge.first + (edge.last - edge.first) * i as f64 / samples as f64;
        let p = basis.project(&edge.point_at(t)?);
        if let Some(prev) = points.last() {
            if prev.distance(&p) <= MIN_SEGMENT_LENGTH {
                continue;
            }
        }
        points.push(p);
    }
    if points.len() < 2 {
        return Ok(None);
    }
    Ok(Some(points))
}

fn polyline_primitive(class: PrimitiveClass, points: Vec<Point2D>) -> Primitive {
    Primitive::new(
        class,
        Shape::Polyline {
            points,
            closed: false,
        },
    )
}
