//! Hole detection over projected mesh points — fallback, preview-only.
//!
//! Interior points are greedily clustered by common distance to a
//! candidate center, then each cluster is voted circle-or-outline. The
//! scan is greedy by design; candidates are sorted lexicographically
//! first so a given point set always clusters the same way.

use serde::{Deserialize, Serialize};

use crate::types::Point2D;

/// Tunable thresholds for hole detection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HoleDetectionParams {
    /// Smallest plausible hole radius, in drawing units.
    pub min_radius: f64,
    /// Largest plausible hole radius, in drawing units.
    pub max_radius: f64,
    /// Fractional tolerance around the candidate radius when gathering
    /// cluster members.
    pub radial_tolerance: f64,
    /// Fractional tolerance around the mean radius in the circle vote.
    pub circle_fit_tolerance: f64,
    /// Fraction of members that must pass the circle vote.
    pub circle_vote_fraction: f64,
    /// Minimum members for a cluster to count as a hole.
    pub min_cluster_size: usize,
    /// Minimum projected points before hole detection runs at all.
    pub min_point_count: usize,
}

impl Default for HoleDetectionParams {
    fn default() -> Self {
        Self {
            min_radius: 1.0,
            max_radius: 10.0,
            radial_tolerance: 0.2,
            circle_fit_tolerance: 0.25,
            circle_vote_fraction: 0.75,
            min_cluster_size: 6,
            min_point_count: 10,
        }
    }
}

/// A set of points hypothesized to lie on one hole's rim.
#[derive(Debug, Clone)]
pub struct HoleCluster {
    /// Member points.
    pub points: Vec<Point2D>,
}

/// A cluster after the circularity vote.
#[derive(Debug, Clone)]
pub enum DetectedHole {
    /// Members fit a circle.
    Circle {
        /// Centroid of the members.
        center: Point2D,
        /// Mean radial distance from the centroid.
        radius: f64,
    },
    /// Members form some other closed outline.
    Outline {
        /// Member points, in discovery order.
        points: Vec<Point2D>,
    },
}

impl HoleCluster {
    /// Centroid and mean radial distance of the member points.
    pub fn center_and_radius(&self) -> (Point2D, f64) {
        let n = self.points.len() as f64;
        let cx = self.points.iter().map(|p| p.x).sum::<f64>() / n;
        let cy = self.points.iter().map(|p| p.y).sum::<f64>() / n;
        let center = Point2D::new(cx, cy);
        let radius = self.points.iter().map(|p| p.distance(&center)).sum::<f64>() / n;
        (center, radius)
    }

    /// Vote on circularity: the cluster is a circle when at least
    /// `circle_vote_fraction` of members sit within
    /// `circle_fit_tolerance` of the mean radial distance.
    pub fn classify(&self, params: &HoleDetectionParams) -> DetectedHole {
        if self.points.len() < params.min_cluster_size {
            return DetectedHole::Outline {
                points: self.points.clone(),
            };
        }
        let (center, radius) = self.center_and_radius();
        let tolerance = radius * params.circle_fit_tolerance;
        let votes = self
            .points
            .iter()
            .filter(|p| (p.distance(&center) - radius).abs() <= tolerance)
            .count();
        if votes as f64 >= self.points.len() as f64 * params.circle_vote_fraction {
            DetectedHole::Circle { center, radius }
        } else {
            DetectedHole::Outline {
                points: self.points.clone(),
            }
        }
    }
}

/// Point-in-polygon test by the even-odd ray-casting rule.
pub fn point_in_polygon(p: &Point2D, polygon: &[Point2D]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = &polygon[i];
        let vj = &polygon[j];
        if ((vi.y > p.y) != (vj.y > p.y))
            && (p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Cluster interior points into candidate holes.
///
/// For each unused candidate center (in sorted order), distances to the
/// other unused points are gathered within the plausible radius range;
/// the first distance whose ±`radial_tolerance` band collects at least
/// `min_cluster_size` members claims those members as one cluster.
pub fn find_hole_clusters(
    points: &[Point2D],
    boundary: &[Point2D],
    params: &HoleDetectionParams,
) -> Vec<HoleCluster> {
    if points.len() < params.min_point_count || boundary.len() < 3 {
        return Vec::new();
    }

    let mut interior: Vec<Point2D> = points
        .iter()
        .copied()
        .filter(|p| point_in_polygon(p, boundary))
        .collect();
    if interior.len() < params.min_cluster_size {
        return Vec::new();
    }

    // Fixed scan order: the greedy outcome must not depend on how the
    // caller happened to order the point set.
    interior.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut used = vec![false; interior.len()];
    let mut clusters = Vec::new();

    for center_idx in 0..interior.len() {
        if used[center_idx] {
            continue;
        }
        let center = interior[center_idx];

        let mut candidates: Vec<(usize, f64)> = Vec::new();
        for (j, p) in interior.iter().enumerate() {
            if used[j] || j == center_idx {
                continue;
            }
            let dist = center.distance(p);
            if dist >= params.min_radius && dist <= params.max_radius {
                candidates.push((j, dist));
            }
        }
        if candidates.len() < params.min_cluster_size {
            continue;
        }

        let mut distances: Vec<f64> = candidates.iter().map(|&(_, d)| d).collect();
        distances.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        for &d in &distances {
            let tolerance = d * params.radial_tolerance;
            let members: Vec<usize> = candidates
                .iter()
                .filter(|&&(_, dist)| (dist - d).abs() <= tolerance)
                .map(|&(j, _)| j)
                .collect();
            if members.len() >= params.min_cluster_size {
                let cluster_points: Vec<Point2D> = members.iter().map(|&j| interior[j]).collect();
                for j in members {
                    used[j] = true;
                }
                log::debug!(
                    "hole cluster of {} points near distance {:.2}",
                    cluster_points.len(),
                    d
                );
                clusters.push(HoleCluster {
                    points: cluster_points,
                });
                break;
            }
        }
    }

    clusters
}

/// Detect and classify holes in one call.
pub fn detect_holes(
    points: &[Point2D],
    boundary: &[Point2D],
    params: &HoleDetectionParams,
) -> Vec<DetectedHole> {
    find_hole_clusters(points, boundary, params)
        .iter()
        .map(|cluster| cluster.classify(params))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_boundary(size: f64) -> Vec<Point2D> {
        vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(size, 0.0),
            Point2D::new(size, size),
            Point2D::new(0.0, size),
        ]
    }

    fn ring(center: Point2D, radius: f64, count: usize) -> Vec<Point2D> {
        (0..count)
            .map(|i| {
                let a = std::f64::consts::TAU * i as f64 / count as f64;
                Point2D::new(center.x + radius * a.cos(), center.y + radius * a.sin())
            })
            .collect()
    }

    #[test]
    fn test_point_in_polygon_square() {
        let square = square_boundary(10.0);
        assert!(point_in_polygon(&Point2D::new(5.0, 5.0), &square));
        assert!(!point_in_polygon(&Point2D::new(15.0, 5.0), &square));
        assert!(!point_in_polygon(&Point2D::new(-5.0, 5.0), &square));
    }

    #[test]
    fn test_ring_of_points_detects_circle_hole() {
        let boundary = square_boundary(20.0);
        // A 10-point rim plus a vertex at the hole center: no rim point
        // gathers a large-enough common-distance band, so the center
        // point claims the whole rim at distance 3.
        let mut points = ring(Point2D::new(10.0, 10.0), 3.0, 10);
        points.push(Point2D::new(10.0, 10.0));
        // Outliers outside the polygon are ignored.
        points.push(Point2D::new(25.0, 25.0));
        points.push(Point2D::new(-1.0, -1.0));

        let holes = detect_holes(&points, &boundary, &HoleDetectionParams::default());
        assert_eq!(holes.len(), 1, "one ring should yield one hole");
        match &holes[0] {
            DetectedHole::Circle { center, radius } => {
                assert!((center.x - 10.0).abs() < 1e-9);
                assert!((center.y - 10.0).abs() < 1e-9);
                assert!((radius - 3.0).abs() < 1e-9);
            }
            DetectedHole::Outline { .. } => panic!("rim at one distance should vote circle"),
        }
    }

    #[test]
    fn test_too_few_points_yields_nothing() {
        let boundary = square_boundary(20.0);
        let points = ring(Point2D::new(10.0, 10.0), 3.0, 5);
        let holes = detect_holes(&points, &boundary, &HoleDetectionParams::default());
        assert!(holes.is_empty());
    }

    #[test]
    fn test_scattered_points_do_not_cluster() {
        let boundary = square_boundary(100.0);
        // Widely spaced grid: no common-distance band gathers 6 members
        // within 20%.
        let points: Vec<Point2D> = (0..4)
            .flat_map(|i| (0..3).map(move |j| Point2D::new(5.0 + i as f64 * 25.0, 5.0 + j as f64 * 30.0)))
            .collect();
        let holes = detect_holes(&points, &boundary, &HoleDetectionParams::default());
        assert!(holes.is_empty(), "grid spacing exceeds the radius range");
    }

    #[test]
    fn test_clustering_is_order_independent() {
        let boundary = square_boundary(20.0);
        let points = ring(Point2D::new(10.0, 10.0), 3.0, 12);
        let mut reversed = points.clone();
        reversed.reverse();

        let params = HoleDetectionParams::default();
        let a = find_hole_clusters(&points, &boundary, &params);
        let b = find_hole_clusters(&reversed, &boundary, &params);
        assert_eq!(a.len(), b.len());
        if let (Some(ca), Some(cb)) = (a.first(), b.first()) {
            let (pa, ra) = ca.center_and_radius();
            let (pb, rb) = cb.center_and_radius();
            assert!(pa.distance(&pb) < 1e-9);
            assert!((ra - rb).abs() < 1e-9);
        }
    }

    #[test]
    fn test_non_circular_cluster_votes_outline() {
        let cluster = HoleCluster {
            // An elongated blob: radial distances vary far beyond 25%.
            points: vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(10.0, 0.0),
                Point2D::new(20.0, 0.0),
                Point2D::new(0.0, 1.0),
                Point2D::new(10.0, 1.0),
                Point2D::new(20.0, 1.0),
            ],
        };
        match cluster.classify(&HoleDetectionParams::default()) {
            DetectedHole::Outline { points } => assert_eq!(points.len(), 6),
            DetectedHole::Circle { .. } => panic!("elongated blob must not vote circle"),
        }
    }
}
