//! Mesh boundary extraction — the fallback when exact curve walking is
//! unavailable or fails.
//!
//! On a manifold triangulation an edge used by exactly one triangle lies
//! on the boundary. Those edges are chained into a path; if the mesh has
//! no boundary edges at all, a convex hull of the projected points
//! stands in as a last resort.

use std::collections::{BTreeMap, HashMap};

use crate::types::Point2D;

/// Points closer than this are merged before hull construction.
pub const DUPLICATE_POINT_TOLERANCE: f64 = 0.001;

/// Undirected edges used by exactly one triangle, as (min, max) index
/// pairs sorted for deterministic downstream walks.
pub fn boundary_edges(triangles: &[[usize; 3]]) -> Vec<(usize, usize)> {
    let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();
    for tri in triangles {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            let key = (a.min(b), a.max(b));
            *edge_count.entry(key).or_insert(0) += 1;
        }
    }

    let mut edges: Vec<(usize, usize)> = edge_count
        .into_iter()
        .filter_map(|(edge, count)| (count == 1).then_some(edge))
        .collect();
    edges.sort_unstable();
    edges
}

/// Chain boundary edges into an ordered path of 2D points.
///
/// Starts at a vertex of degree ≤ 2 (else the lowest-index vertex),
/// repeatedly steps to an unvisited neighbor other than the previous
/// vertex, and stops on returning to the start (path length > 2) or
/// running out of neighbors. Total steps are capped at `edges + 1` to
/// guard against malformed topology.
pub fn walk_boundary(edges: &[(usize, usize)], points: &[Point2D]) -> Vec<Point2D> {
    if edges.is_empty() {
        return Vec::new();
    }

    let mut adjacency: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for &(a, b) in edges {
        adjacency.entry(a).or_default().push(b);
        adjacency.entry(b).or_default().push(a);
    }
    for neighbors in adjacency.values_mut() {
        neighbors.sort_unstable();
    }

    let start = adjacency
        .iter()
        .find(|(_, neighbors)| neighbors.len() <= 2)
        .map(|(&v, _)| v)
        .or_else(|| adjacency.keys().next().copied());
    let Some(start) = start else {
        return Vec::new();
    };

    let mut path = vec![start];
    let mut current = start;
    let mut previous: Option<usize> = None;

    loop {
        let Some(neighbors) = adjacency.get(&current) else {
            break;
        };
        let next = neighbors.iter().copied().find(|&n| Some(n) != previous);
        let Some(next) = next else {
            break;
        };
        if next == start && path.len() > 2 {
            break;
        }
        path.push(next);
        previous = Some(current);
        current = next;

        if path.len() > edges.len() + 1 {
            break;
        }
    }

    path.into_iter()
        .filter(|&i| i < points.len())
        .map(|i| points[i])
        .collect()
}

/// Drop points that sit within [`DUPLICATE_POINT_TOLERANCE`] of an
/// already-kept point.
pub fn dedup_points(points: &[Point2D]) -> Vec<Point2D> {
    let mut unique: Vec<Point2D> = Vec::new();
    for p in points {
        let duplicate = unique.iter().any(|q| {
            (p.x - q.x).abs() < DUPLICATE_POINT_TOLERANCE
                && (p.y - q.y).abs() < DUPLICATE_POINT_TOLERANCE
        });
        if !duplicate {
            unique.push(*p);
        }
    }
    unique
}

fn cross(o: &Point2D, a: &Point2D, b: &Point2D) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Convex hull by monotone chain, in counter-clockwise hull order.
pub fn convex_hull(points: &[Point2D]) -> Vec<Point2D> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
    });
    sorted.dedup_by(|a, b| a.x == b.x && a.y == b.y);
    if sorted.len() < 3 {
        return sorted;
    }

    let mut lower: Vec<Point2D> = Vec::new();
    for p in &sorted {
        while lower.len() >= 2 && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= 0.0
        {
            lower.pop();
        }
        lower.push(*p);
    }

    let mut upper: Vec<Point2D> = Vec::new();
    for p in sorted.iter().rev() {
        while upper.len() >= 2 && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= 0.0
        {
            upper.pop();
        }
        upper.push(*p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Full fallback boundary: walk mesh boundary edges when the
/// triangulation has them, else hull the deduplicated point set.
pub fn extract_boundary(points: &[Point2D], triangles: &[[usize; 3]]) -> Vec<Point2D> {
    if !triangles.is_empty() && points.len() > 3 {
        let edges = boundary_edges(triangles);
        if !edges.is_empty() {
            let path = walk_boundary(&edges, points);
            if path.len() >= 3 {
                return path;
            }
        }
    }

    let unique = dedup_points(points);
    if unique.len() < 3 {
        return points.to_vec();
    }
    convex_hull(&unique)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_triangle_has_three_boundary_edges() {
        let triangles = [[0usize, 1, 2]];
        let edges = boundary_edges(&triangles);
        assert_eq!(edges.len(), 3, "every edge of a lone triangle is boundary");
    }

    #[test]
    fn test_single_triangle_walks_to_closed_path() {
        let points = [
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(0.0, 1.0),
        ];
        let edges = boundary_edges(&[[0, 1, 2]]);
        let path = walk_boundary(&edges, &points);
        assert_eq!(path.len(), 3, "closed 3-point path without repeated start");
    }

    #[test]
    fn test_shared_edge_is_interior() {
        // Two triangles forming a quad share the diagonal (0, 2).
        let triangles = [[0usize, 1, 2], [0, 2, 3]];
        let edges = boundary_edges(&triangles);
        assert_eq!(edges.len(), 4);
        assert!(!edges.contains(&(0, 2)), "diagonal must not be boundary");
    }

    #[test]
    fn test_quad_mesh_boundary_walk() {
        let points = [
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(0.0, 1.0),
        ];
        let edges = boundary_edges(&[[0, 1, 2], [0, 2, 3]]);
        let path = walk_boundary(&edges, &points);
        assert_eq!(path.len(), 4, "quad boundary visits all four corners");
    }

    #[test]
    fn test_convex_hull_drops_interior_point() {
        let points = [
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(0.0, 1.0),
            Point2D::new(0.5, 0.5),
        ];
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4, "only the square's corners remain");
        assert!(!hull
            .iter()
            .any(|p| (p.x - 0.5).abs() < 1e-12 && (p.y - 0.5).abs() < 1e-12));
        // Hull order: lexicographic start, counter-clockwise.
        assert!((hull[0].x - 0.0).abs() < 1e-12 && (hull[0].y - 0.0).abs() < 1e-12);
        assert!((hull[1].x - 1.0).abs() < 1e-12 && (hull[1].y - 0.0).abs() < 1e-12);
        assert!((hull[2].x - 1.0).abs() < 1e-12 && (hull[2].y - 1.0).abs() < 1e-12);
        assert!((hull[3].x - 0.0).abs() < 1e-12 && (hull[3].y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_dedup_merges_close_points() {
        let points = [
            Point2D::new(0.0, 0.0),
            Point2D::new(0.0005, 0.0),
            Point2D::new(1.0, 0.0),
        ];
        assert_eq!(dedup_points(&points).len(), 2);
    }

    #[test]
    fn test_extract_boundary_prefers_edge_walk() {
        let points = [
            Point2D::new(0.0, 0.0),
            Point2D::new(2.0, 0.0),
            Point2D::new(2.0, 2.0),
            Point2D::new(0.0, 2.0),
            Point2D::new(1.0, 1.0),
        ];
        // Fan around the center vertex: boundary is the square.
        let triangles = [[0usize, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]];
        let path = extract_boundary(&points, &triangles);
        assert_eq!(path.len(), 4);
        assert!(!path
            .iter()
            .any(|p| (p.x - 1.0).abs() < 1e-12 && (p.y - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_extract_boundary_hull_fallback_without_triangles() {
        let points = [
            Point2D::new(0.0, 0.0),
            Point2D::new(3.0, 0.0),
            Point2D::new(3.0, 3.0),
            Point2D::new(0.0, 3.0),
            Point2D::new(1.5, 1.5),
        ];
        let path = extract_boundary(&points, &[]);
        assert_eq!(path.len(), 4, "hull of square plus interior point");
    }

    #[test]
    fn test_walk_caps_steps_on_malformed_topology() {
        // A vertex with four boundary edges (two loops through vertex 0).
        let points: Vec<Point2D> = (0..5).map(|i| Point2D::new(i as f64, 0.0)).collect();
        let edges = [(0usize, 1usize), (1, 2), (0, 2), (0, 3), (3, 4), (0, 4)];
        let path = walk_boundary(&edges, &points);
        assert!(path.len() <= edges.len() + 1, "step cap must hold");
        assert!(path.len() >= 3);
    }
}
