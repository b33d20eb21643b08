use crate::collision::Penetration;
use crate::shapes::ConvexHull;

/// Separating Axis Theorem test between two convex hulls.
///
/// Every edge normal of both hulls is tried as a separating axis. The first
/// axis with no overlap ends the test; otherwise the axis needing the
/// smallest push wins (earlier axes win ties), oriented from `a` toward `b`.
pub fn sat(a: &ConvexHull, b: &ConvexHull) -> Option<Penetration> {
    if a.is_empty() || b.is_empty() {
        return None;
    }

    let mut best: Option<Penetration> = None;

    for axis in a.edge_normals().chain(b.edge_normals()) {
        let (min_a, max_a) = a.project(&axis);
        let (min_b, max_b) = b.project(&axis);

        // Distance `b` would have to travel along +axis / -axis to clear `a`
        let forward = max_a - min_b;
        let backward = max_b - min_a;
        if forward <= 0.0 || backward <= 0.0 {
            return None;
        }

        let (depth, normal) = if forward <= backward {
            (forward, axis)
        } else {
            (backward, -axis)
        };

        if best.map_or(true, |current| depth < current.depth) {
            best = Some(Penetration { normal, depth });
        }
    }

    best
}
