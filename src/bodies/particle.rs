use crate::math::Vector3;

/// A point mass advanced by Verlet integration.
///
/// Velocity is implicit: it is the difference between the current and the
/// previous position, so editing `position` directly also changes the
/// velocity seen by the next integration step.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Current position
    pub position: Vector3,

    /// Position at the start of the previous integration step
    pub old_position: Vector3,

    /// Mass of the particle
    pub mass: f32,

    is_static: bool,
}

impl Particle {
    /// Creates a dynamic particle at rest
    pub fn new(position: Vector3, mass: f32) -> Self {
        Self {
            position,
            old_position: position,
            mass,
            is_static: false,
        }
    }

    /// Creates a static particle. Static particles never move once placed.
    pub fn new_static(position: Vector3) -> Self {
        Self {
            position,
            old_position: position,
            mass: 1.0,
            is_static: true,
        }
    }

    /// Creates a dynamic particle with an initial per-step displacement
    pub fn with_velocity(position: Vector3, velocity: Vector3, mass: f32) -> Self {
        Self {
            position,
            old_position: position - velocity,
            mass,
            is_static: false,
        }
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub(crate) fn make_static(&mut self) {
        self.is_static = true;
        self.old_position = self.position;
    }

    /// Inverse mass, zero for static particles and for non-positive masses
    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        if self.is_static || self.mass <= 0.0 {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// Displacement over the last step
    #[inline]
    pub fn velocity(&self) -> Vector3 {
        self.position - self.old_position
    }

    /// Moves the particle by `delta`; static particles ignore the call
    #[inline]
    pub fn translate(&mut self, delta: Vector3) {
        if !self.is_static {
            self.position += delta;
        }
    }
}
