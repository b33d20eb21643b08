use tracing::debug;

use crate::collision::gjk::{support, Simplex};
use crate::collision::Penetration;
use crate::math::{Vector3, EPSILON};
use crate::shapes::ConvexHull;

/// Maximum number of polytope expansions
pub const MAX_ITERATIONS: usize = 64;

/// Convergence tolerance, relative to the penetration depth for depths above one
pub const TOLERANCE: f32 = 1.0e-4;

/// An edge of the polytope
#[derive(Debug, Clone, Copy)]
struct Edge {
    /// Outward unit normal
    normal: Vector3,

    /// Distance from the origin to the edge's line
    distance: f32,

    /// Index of the edge's end vertex, where a new vertex gets inserted
    index: usize,
}

/// Expanding Polytope Algorithm.
///
/// Grows GJK's terminal triangle on the Minkowski difference `a - b` until
/// the edge closest to the origin stops moving. Its normal, which points from
/// `a` toward `b`, and its distance give the penetration.
pub fn epa(a: &ConvexHull, b: &ConvexHull, simplex: &Simplex) -> Option<Penetration> {
    let mut polytope: Vec<Vector3> = simplex.points().to_vec();
    if polytope.len() < 3 {
        return None;
    }

    // Counter-clockwise winding keeps (e.y, -e.x) pointing outward
    if (polytope[1] - polytope[0]).perp_dot(&(polytope[2] - polytope[0])) < 0.0 {
        polytope.swap(0, 1);
    }

    for _ in 0..MAX_ITERATIONS {
        let edge = closest_edge(&polytope)?;

        let point = support(a, b, edge.normal);
        let distance = point.dot(&edge.normal);

        if distance - edge.distance < TOLERANCE * edge.distance.max(1.0) {
            return Some(Penetration {
                normal: edge.normal,
                depth: edge.distance,
            });
        }

        polytope.insert(edge.index, point);
    }

    debug!(iterations = MAX_ITERATIONS, "EPA did not converge, reporting no contact");
    None
}

/// Finds the polytope edge closest to the origin, skipping degenerate edges
fn closest_edge(polytope: &[Vector3]) -> Option<Edge> {
    let n = polytope.len();
    let mut closest: Option<Edge> = None;

    for i in 0..n {
        let j = (i + 1) % n;
        let e = polytope[j] - polytope[i];
        let length = e.length();
        if length <= EPSILON {
            continue;
        }

        let mut normal = Vector3::xy(e.y / length, -e.x / length);
        let mut distance = normal.dot(&polytope[i]);
        if distance < 0.0 {
            normal = -normal;
            distance = -distance;
        }

        if closest.map_or(true, |edge| distance < edge.distance) {
            closest = Some(Edge { normal, distance, index: j });
        }
    }

    closest
}
