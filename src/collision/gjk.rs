use tracing::debug;

use crate::math::Vector3;
use crate::shapes::ConvexHull;

/// Maximum number of iterations for the GJK algorithm
pub const MAX_ITERATIONS: usize = 32;

/// A simplex in the plane: a point, a segment or a triangle of Minkowski
/// difference vertices, newest last
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Simplex {
    points: Vec<Vector3>,
}

impl Simplex {
    /// Creates a new empty simplex
    pub fn new() -> Self {
        Self {
            points: Vec::with_capacity(3),
        }
    }

    /// Adds a point to the simplex
    pub fn push(&mut self, point: Vector3) {
        self.points.push(point);
    }

    /// Gets the number of points in the simplex
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Gets a reference to the points in the simplex
    pub fn points(&self) -> &[Vector3] {
        &self.points
    }

    /// Reduces the simplex to the feature closest to the origin and points
    /// `direction` at the origin from it. Returns true once the simplex
    /// encloses the origin.
    fn evolve(&mut self, direction: &mut Vector3) -> bool {
        match self.points.len() {
            2 => {
                self.line_case(direction);
                false
            }
            3 => self.triangle_case(direction),
            _ => false,
        }
    }

    fn line_case(&mut self, direction: &mut Vector3) {
        let a = self.points[1];
        let b = self.points[0];

        let ab = b - a;
        let ao = -a;

        let toward_origin = Vector3::triple_product(&ab, &ao, &ab);
        *direction = if toward_origin.is_zero() {
            // The origin lies on the segment's line; either side will do
            ab.perpendicular()
        } else {
            toward_origin
        };
    }

    fn triangle_case(&mut self, direction: &mut Vector3) -> bool {
        let a = self.points[2];
        let b = self.points[1];
        let c = self.points[0];

        let ab = b - a;
        let ac = c - a;
        let ao = -a;

        if crate::math::approx_zero(ab.perp_dot(&ac)) {
            // Collinear points cannot enclose anything; keep the newest segment
            self.points.remove(0);
            self.line_case(direction);
            return false;
        }

        let ab_perp = Vector3::triple_product(&ac, &ab, &ab);
        let ac_perp = Vector3::triple_product(&ab, &ac, &ac);

        if ab_perp.dot(&ao) > 0.0 {
            // Origin is outside edge AB
            self.points.remove(0);
            *direction = ab_perp;
            false
        } else if ac_perp.dot(&ao) > 0.0 {
            // Origin is outside edge AC
            self.points.remove(1);
            *direction = ac_perp;
            false
        } else {
            true
        }
    }
}

/// Support point of the Minkowski difference `a - b` in the given direction
#[inline]
pub fn support(a: &ConvexHull, b: &ConvexHull, direction: Vector3) -> Vector3 {
    a.support(direction) - b.support(-direction)
}

/// Gilbert-Johnson-Keerthi overlap query between two convex hulls.
///
/// Returns the terminal simplex, a triangle enclosing the origin, when the
/// hulls overlap. Separated or merely touching hulls yield `None`, and so does
/// running out of iterations.
pub fn gjk(a: &ConvexHull, b: &ConvexHull) -> Option<Simplex> {
    if a.is_empty() || b.is_empty() {
        return None;
    }

    let mut direction = a.centroid() - b.centroid();
    if direction.is_zero() {
        direction = Vector3::unit_x();
    }

    let mut simplex = Simplex::new();
    let first = support(a, b, direction);
    simplex.push(first);
    direction = -first;

    for _ in 0..MAX_ITERATIONS {
        if direction.is_zero() {
            // The origin sits on a vertex of the difference: contact without overlap
            return None;
        }

        let point = support(a, b, direction);
        if point.dot(&direction) <= 0.0 {
            return None;
        }

        simplex.push(point);
        if simplex.evolve(&mut direction) {
            return Some(simplex);
        }
    }

    debug!(iterations = MAX_ITERATIONS, "GJK did not converge, reporting no contact");
    None
}
