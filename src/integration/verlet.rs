use crate::bodies::Body;
use crate::integration::Integrator;
use crate::math::Vector3;

/// Position Verlet integrator with linear drag.
///
/// For each dynamic particle:
///
/// ```text
/// velocity     = position - old_position
/// old_position = position
/// position    += velocity + (gravity - drag * velocity) * dt²
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerletIntegrator {
    drag: f32,
}

impl VerletIntegrator {
    /// Drag coefficient used when none is configured
    pub const DEFAULT_DRAG: f32 = 10.0;

    /// Creates a new Verlet integrator with the given drag coefficient
    pub fn new(drag: f32) -> Self {
        Self { drag }
    }

    #[inline]
    pub fn drag(&self) -> f32 {
        self.drag
    }
}

impl Default for VerletIntegrator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DRAG)
    }
}

impl Integrator for VerletIntegrator {
    fn integrate(&self, body: &mut Body, gravity: Vector3, dt: f32) {
        let dt2 = dt * dt;

        for particle in body.particles_mut() {
            if particle.is_static() {
                continue;
            }

            let velocity = particle.position - particle.old_position;
            particle.old_position = particle.position;

            let drag = Vector3::xy(-self.drag * velocity.x, -self.drag * velocity.y);
            let acceleration = (drag + gravity) * dt2;

            particle.position += velocity + acceleration;
        }
    }

    fn name(&self) -> &str {
        "Verlet"
    }
}
