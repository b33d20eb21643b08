use crate::bodies::Particle;
use crate::math::{Vector3, EPSILON};

/// Convex polygon enclosing a body's particles.
///
/// Vertices are stored counter-clockwise (in a y-up frame) together with the
/// index of the particle each one came from, so collision resolution can map
/// hull features back to particles. Collinear and duplicate points are
/// dropped; a hull may degenerate to a segment, a point or nothing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConvexHull {
    indices: Vec<usize>,
    vertices: Vec<Vector3>,
}

impl ConvexHull {
    /// Builds the hull of a particle set (Andrew's monotone chain)
    pub fn from_particles(particles: &[Particle]) -> Self {
        let positions: Vec<Vector3> = particles.iter().map(|p| p.position).collect();
        Self::from_points(&positions)
    }

    /// Builds the hull of a point set. Indices refer to positions in `points`.
    pub fn from_points(points: &[Vector3]) -> Self {
        let mut order: Vec<usize> = (0..points.len()).collect();
        order.sort_by(|&i, &j| {
            points[i]
                .x
                .total_cmp(&points[j].x)
                .then(points[i].y.total_cmp(&points[j].y))
        });
        order.dedup_by(|i, j| points[*i].distance_squared(&points[*j]) <= EPSILON * EPSILON);

        if order.len() <= 2 {
            return Self::from_ordered(points, order);
        }

        // Non-left turns are popped, which also removes collinear points
        let turn = |o: usize, a: usize, b: usize| {
            (points[a] - points[o]).perp_dot(&(points[b] - points[o]))
        };

        let mut lower: Vec<usize> = Vec::with_capacity(order.len());
        for &i in &order {
            while lower.len() >= 2
                && turn(lower[lower.len() - 2], lower[lower.len() - 1], i) <= 0.0
            {
                lower.pop();
            }
            lower.push(i);
        }

        let mut upper: Vec<usize> = Vec::with_capacity(order.len());
        for &i in order.iter().rev() {
            while upper.len() >= 2
                && turn(upper[upper.len() - 2], upper[upper.len() - 1], i) <= 0.0
            {
                upper.pop();
            }
            upper.push(i);
        }

        lower.pop();
        upper.pop();
        lower.extend(upper);

        Self::from_ordered(points, lower)
    }

    fn from_ordered(points: &[Vector3], indices: Vec<usize>) -> Self {
        let vertices = indices.iter().map(|&i| points[i]).collect();
        Self { indices, vertices }
    }

    /// Hull vertices in counter-clockwise order
    #[inline]
    pub fn vertices(&self) -> &[Vector3] {
        &self.vertices
    }

    /// Particle index of each hull vertex
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Mean of the hull vertices
    pub fn centroid(&self) -> Vector3 {
        if self.vertices.is_empty() {
            return Vector3::zero();
        }
        let sum = self.vertices.iter().fold(Vector3::zero(), |acc, v| acc + *v);
        sum / self.vertices.len() as f32
    }

    /// Edges as `(start, end)` vertex pairs, closing back to the first vertex.
    /// A segment hull yields both directions of its single edge.
    pub fn edges(&self) -> impl Iterator<Item = (Vector3, Vector3)> + '_ {
        let n = if self.vertices.len() >= 2 { self.vertices.len() } else { 0 };
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Outward unit normals of the non-degenerate edges
    pub fn edge_normals(&self) -> impl Iterator<Item = Vector3> + '_ {
        self.edges().filter_map(|(start, end)| {
            let edge = end - start;
            let length = edge.length();
            (length > EPSILON).then(|| Vector3::xy(edge.y / length, -edge.x / length))
        })
    }

    /// Interval covered by the hull when projected on `axis`
    pub fn project(&self, axis: &Vector3) -> (f32, f32) {
        self.vertices.iter().fold((f32::MAX, f32::MIN), |(min, max), v| {
            let d = v.dot(axis);
            (min.min(d), max.max(d))
        })
    }

    /// Position of the vertex farthest along `direction`. The first vertex
    /// wins ties.
    pub fn support(&self, direction: Vector3) -> Vector3 {
        self.farthest_vertex(&direction)
            .map(|i| self.vertices[i])
            .unwrap_or_else(Vector3::zero)
    }

    fn farthest_vertex(&self, direction: &Vector3) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, v) in self.vertices.iter().enumerate() {
            let d = v.dot(direction);
            if best.map_or(true, |(_, best_d)| d > best_d) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Particle indices of the edge lying farthest along `direction`.
    ///
    /// The edge is made of the farthest vertex and whichever of its two
    /// neighbours projects further along `direction`; the following vertex in
    /// hull order wins ties. Hulls with fewer than three vertices return all of
    /// their vertices.
    pub fn farthest_edge_in_direction(&self, direction: Vector3) -> Vec<usize> {
        let n = self.vertices.len();
        if n < 3 {
            return self.indices.clone();
        }

        let Some(i) = self.farthest_vertex(&direction) else {
            return Vec::new();
        };

        let next = (i + 1) % n;
        let prev = (i + n - 1) % n;
        let neighbour =
            if self.vertices[next].dot(&direction) >= self.vertices[prev].dot(&direction) {
                next
            } else {
                prev
            };

        vec![self.indices[i], self.indices[neighbour]]
    }
}
