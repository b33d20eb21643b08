use crate::bodies::Body;
use crate::math::Aabb;

/// Jakobsen-style relaxation solver.
///
/// Each iteration first clamps every particle into the world rectangle, then
/// relaxes every constraint once in order. More iterations bring the mesh
/// closer to its rest lengths without ever solving the system exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintSolver {
    iterations: u32,
    bounds: Aabb,
}

impl ConstraintSolver {
    /// Default number of relaxation iterations per step
    pub const DEFAULT_ITERATIONS: u32 = 3;

    pub fn new(iterations: u32, bounds: Aabb) -> Self {
        Self { iterations, bounds }
    }

    #[inline]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Runs all iterations on one body
    pub fn solve(&self, body: &mut Body) {
        let (particles, constraints) = body.split_mut();

        for _ in 0..self.iterations {
            for particle in particles.iter_mut() {
                particle.position = self.bounds.clamp_point(particle.position);
            }

            for constraint in constraints {
                constraint.relax(particles);
            }
        }
    }
}
