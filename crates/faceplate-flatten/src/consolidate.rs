//! Arc consolidation: merge co-center, co-radius arcs into full circles.
//!
//! Exchange files often split a drilled hole into two or more arcs. When
//! a group of arcs agrees on one center and its coarse angular coverage
//! suggests a full turn, the group is replaced by a single circle
//! primitive; otherwise the arcs pass through untouched.

use crate::types::{ArcShape, Point2D, Primitive, PrimitiveClass, Shape};

/// Candidate circle centers within this distance cluster together.
pub const CENTER_CLUSTER_TOLERANCE: f64 = 0.1;

/// Minimum estimated coverage, in degrees, to accept a full circle.
pub const MIN_COVERAGE_DEGREES: f64 = 300.0;

/// Group key: class plus radius rounded to 3 decimals.
fn group_key(class: PrimitiveClass, radius: f64) -> (PrimitiveClass, i64) {
    (class, (radius * 1000.0).round() as i64)
}

/// Coarse angular-coverage estimate for a group of arcs: 180° per
/// large arc, 90° per small arc.
///
/// This is a heuristic, not an exact angle computation; it lives in one
/// place so an exact version can replace it without touching the
/// grouping or clustering logic.
fn estimated_coverage_degrees(arcs: &[ArcShape]) -> f64 {
    arcs.iter()
        .map(|arc| if arc.large_arc { 180.0 } else { 90.0 })
        .sum()
}

/// Up to two candidate centers for an arc, reconstructed from its chord
/// and radius by the perpendicular-bisector construction.
fn candidate_centers(arc: &ArcShape) -> Vec<Point2D> {
    let start = arc.start_point();
    let end = arc.end_point();

    let chord_half = start.distance(&end) / 2.0;
    if chord_half > arc.radius + CENTER_CLUSTER_TOLERANCE {
        // Chord longer than the diameter: inconsistent arc, no vote.
        return Vec::new();
    }
    // Exact semicircles land on chord_half == radius; clamp so they
    // still vote for the chord midpoint.
    let center_distance = (arc.radius * arc.radius - chord_half * chord_half).max(0.0).sqrt();

    let mid = Point2D::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0);
    let (mut perp_x, mut perp_y) = if (end.x - start.x).abs() > 0.001 {
        (-(end.y - start.y), end.x - start.x)
    } else {
        (1.0, 0.0)
    };
    let perp_len = (perp_x * perp_x + perp_y * perp_y).sqrt();
    if perp_len > 0.0 {
        perp_x /= perp_len;
        perp_y /= perp_len;
    }

    // A semicircle's two candidates coincide at the chord midpoint; a
    // single vote keeps one arc from counting twice in its own cluster.
    if 2.0 * center_distance < CENTER_CLUSTER_TOLERANCE {
        return vec![mid];
    }

    vec![
        Point2D::new(mid.x + perp_x * center_distance, mid.y + perp_y * center_distance),
        Point2D::new(mid.x - perp_x * center_distance, mid.y - perp_y * center_distance),
    ]
}

/// Cluster candidate centers with [`CENTER_CLUSTER_TOLERANCE`] and
/// return the largest cluster, if any.
fn largest_center_cluster(centers: &[Point2D]) -> Option<Vec<Point2D>> {
    let mut clusters: Vec<Vec<Point2D>> = Vec::new();
    for &c in centers {
        let mut placed = false;
        for cluster in &mut clusters {
            let anchor = cluster[0];
            if (c.x - anchor.x).abs() < CENTER_CLUSTER_TOLERANCE
                && (c.y - anchor.y).abs() < CENTER_CLUSTER_TOLERANCE
            {
                cluster.push(c);
                placed = true;
                break;
            }
        }
        if !placed {
            clusters.push(vec![c]);
        }
    }
    clusters.into_iter().max_by_key(Vec::len)
}

/// Try to merge one group of arcs into a circle primitive.
fn consolidate_group(class: PrimitiveClass, radius_key: i64, arcs: Vec<ArcShape>) -> Vec<Primitive> {
    if arcs.len() < 2 {
        return arcs
            .into_iter()
            .map(|arc| Primitive::new(class, Shape::Arc(arc)))
            .collect();
    }

    let centers: Vec<Point2D> = arcs.iter().flat_map(candidate_centers).collect();
    if let Some(cluster) = largest_center_cluster(&centers) {
        // Every arc must vote for the shared center, and the coverage
        // estimate must suggest a full turn.
        if cluster.len() >= arcs.len() && estimated_coverage_degrees(&arcs) >= MIN_COVERAGE_DEGREES {
            let n = cluster.len() as f64;
            let center = Point2D::new(
                cluster.iter().map(|c| c.x).sum::<f64>() / n,
                cluster.iter().map(|c| c.y).sum::<f64>() / n,
            );
            let radius = radius_key as f64 / 1000.0;
            log::debug!(
                "consolidating {} arcs into circle at ({:.2}, {:.2}) r={:.2}",
                arcs.len(),
                center.x,
                center.y,
                radius
            );
            return vec![Primitive::new(class, Shape::Circle { center, radius })];
        }
    }

    arcs.into_iter()
        .map(|arc| Primitive::new(class, Shape::Arc(arc)))
        .collect()
}

/// Consolidate arc primitives that together form complete circles.
///
/// Non-arc primitives pass through first, in input order; arc groups
/// follow in first-appearance order, each either merged into one circle
/// or kept verbatim.
pub fn consolidate_arcs(primitives: Vec<Primitive>) -> Vec<Primitive> {
    let mut kept: Vec<Primitive> = Vec::new();
    let mut groups: Vec<((PrimitiveClass, i64), Vec<ArcShape>)> = Vec::new();

    for prim in primitives {
        match prim.shape {
            Shape::Arc(arc) => {
                let key = group_key(prim.class, arc.radius);
                match groups.iter_mut().find(|(k, _)| *k == key) {
                    Some((_, arcs)) => arcs.push(arc),
                    None => groups.push((key, vec![arc])),
                }
            }
            _ => kept.push(prim),
        }
    }

    for ((class, radius_key), arcs) in groups {
        kept.extend(consolidate_group(class, radius_key, arcs));
    }

    kept
}
