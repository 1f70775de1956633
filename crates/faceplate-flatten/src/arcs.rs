//! Arc direction resolution.
//!
//! A projected circular arc is ambiguous until a sampled midpoint pins
//! down its travel direction. This module reduces start/mid/end polar
//! angles and decides sweep direction, swept span, and the large-arc
//! flag.

use crate::types::{ArcShape, Point2D};

/// Polar angle of `p` about `center`, in degrees within [0, 360).
pub fn polar_angle_deg(center: &Point2D, p: &Point2D) -> f64 {
    (p.y - center.y)
        .atan2(p.x - center.x)
        .to_degrees()
        .rem_euclid(360.0)
}

/// Check whether `mid` lies between `start` and `end` when traveling
/// counter-clockwise, with all angles reduced mod 360°.
fn is_angle_between_ccw(start: f64, end: f64, mid: f64) -> bool {
    let start = start.rem_euclid(360.0);
    let end = end.rem_euclid(360.0);
    let mid = mid.rem_euclid(360.0);
    if start <= end {
        start <= mid && mid <= end
    } else {
        // Interval wraps past 0°.
        mid >= start || mid <= end
    }
}

/// Resolve an arc's direction from its center, endpoints, and a point
/// sampled at the middle of its parameter range.
///
/// For clockwise arcs the stored start/end angles are swapped so
/// consumers always read start ≤ end in the stored travel direction.
pub fn resolve_arc(center: Point2D, radius: f64, start: Point2D, end: Point2D, mid: Point2D) -> ArcShape {
    let start_deg = polar_angle_deg(&center, &start);
    let end_deg = polar_angle_deg(&center, &end);
    let mid_deg = polar_angle_deg(&center, &mid);

    let sweep_ccw = is_angle_between_ccw(start_deg, end_deg, mid_deg);
    let (stored_start, stored_end, angle_diff) = if sweep_ccw {
        (start_deg, end_deg, (end_deg - start_deg).rem_euclid(360.0))
    } else {
        (end_deg, start_deg, (start_deg - end_deg).rem_euclid(360.0))
    };

    ArcShape {
        center,
        radius,
        start_angle: stored_start,
        end_angle: stored_end,
        sweep_ccw,
        large_arc: angle_diff > 180.0,
    }
}

/// Swept angle of a resolved arc in degrees, measured CCW from the
/// stored start to the stored end.
pub fn swept_degrees(arc: &ArcShape) -> f64 {
    (arc.end_angle - arc.start_angle).rem_euclid(360.0)
}
