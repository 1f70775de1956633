//! Wire classification: which loop is the outer boundary.

use faceplate_brep::WireData;

/// Role of a wire on its face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireRole {
    /// The outer loop.
    Boundary,
    /// An interior cut-out loop.
    Hole,
}

/// Assign a role to each wire: the longest wire is the boundary, every
/// other wire is a hole.
///
/// Ties keep the earliest wire in input order; the source behavior for
/// equal lengths is unspecified, so no semantic tie-break is invented.
pub fn classify_wires(wires: &[WireData]) -> Vec<WireRole> {
    if wires.is_empty() {
        return Vec::new();
    }

    let mut boundary_idx = 0;
    let mut best_len = wires[0].length();
    for (i, wire) in wires.iter().enumerate().skip(1) {
        let len = wire.length();
        if len > best_len {
            best_len = len;
            boundary_idx = i;
        }
    }

    (0..wires.len())
        .map(|i| {
            if i == boundary_idx {
                WireRole::Boundary
            } else {
                WireRole::Hole
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use faceplate_brep::EdgeData;
    use faceplate_math::Point3;

    fn wire_of_length(len: f64) -> WireData {
        WireData {
            edges: vec![EdgeData::line_between(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(len, 0.0, 0.0),
            )],
        }
    }

    #[test]
    fn test_longest_wire_is_boundary() {
        let wires = vec![wire_of_length(40.0), wire_of_length(10.0), wire_of_length(8.0)];
        let roles = classify_wires(&wires);
        assert_eq!(
            roles,
            vec![WireRole::Boundary, WireRole::Hole, WireRole::Hole]
        );
    }

    #[test]
    fn test_boundary_need_not_come_first() {
        let wires = vec![wire_of_length(5.0), wire_of_length(50.0)];
        let roles = classify_wires(&wires);
        assert_eq!(roles, vec![WireRole::Hole, WireRole::Boundary]);
    }

    #[test]
    fn test_tie_keeps_first_wire() {
        let wires = vec![wire_of_length(10.0), wire_of_length(10.0)];
        let roles = classify_wires(&wires);
        assert_eq!(roles, vec![WireRole::Boundary, WireRole::Hole]);
    }

    #[test]
    fn test_empty_input() {
        assert!(classify_wires(&[]).is_empty());
    }

    #[test]
    fn test_single_wire_is_boundary() {
        let roles = classify_wires(&[wire_of_length(1.0)]);
        assert_eq!(roles, vec![WireRole::Boundary]);
    }
}
