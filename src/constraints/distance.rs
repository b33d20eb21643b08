use crate::bodies::Particle;
use crate::error::PhysicsError;
use crate::Result;

/// A distance constraint keeps two particles of the same body at a fixed
/// separation.
///
/// The particles are referred to by their index in the owning body's particle
/// list. The rest length is captured when the constraint is created and never
/// changes afterwards; relaxation only moves the particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceConstraint {
    a: usize,
    b: usize,
    rest_length: f32,
}

impl DistanceConstraint {
    /// Creates a constraint with an explicit rest length
    pub fn new(a: usize, b: usize, rest_length: f32) -> Self {
        Self {
            a,
            b,
            rest_length: rest_length.max(0.0),
        }
    }

    /// Creates a constraint whose rest length is the current distance between
    /// particles `a` and `b`
    pub fn between(particles: &[Particle], a: usize, b: usize) -> Result<Self> {
        let (pa, pb) = match (particles.get(a), particles.get(b)) {
            (Some(pa), Some(pb)) if a != b => (pa, pb),
            _ => {
                return Err(PhysicsError::InvalidParameter(format!(
                    "cannot constrain particles ({a}, {b}) out of {}",
                    particles.len()
                )))
            }
        };

        Ok(Self::new(a, b, pa.position.distance(&pb.position)))
    }

    /// Indices of the two constrained particles
    #[inline]
    pub fn particles(&self) -> (usize, usize) {
        (self.a, self.b)
    }

    #[inline]
    pub fn rest_length(&self) -> f32 {
        self.rest_length
    }

    /// Current distance between the two particles
    pub fn current_length(&self, particles: &[Particle]) -> f32 {
        particles[self.a].position.distance(&particles[self.b].position)
    }

    /// Moves the endpoints toward the rest length.
    ///
    /// The correction is split by inverse mass, so two equal dynamic
    /// particles each cover half of it and a static endpoint acts as an
    /// anchor. Coincident particles and pairs with no movable endpoint are
    /// left untouched.
    pub fn relax(&self, particles: &mut [Particle]) {
        let (pa, pb) = (&particles[self.a], &particles[self.b]);

        let w_a = pa.inverse_mass();
        let w_b = pb.inverse_mass();
        let w_sum = w_a + w_b;
        if w_sum <= 0.0 {
            return;
        }

        let delta = pb.position - pa.position;
        let length = delta.length();
        if length <= crate::math::EPSILON {
            return;
        }

        let correction = delta * ((length - self.rest_length) / (length * w_sum));

        particles[self.a].translate(correction * w_a);
        particles[self.b].translate(-correction * w_b);
    }
}
