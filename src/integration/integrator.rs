use crate::bodies::Body;
use crate::math::Vector3;

/// Trait for numerical integration algorithms
pub trait Integrator: Send + Sync {
    /// Advances every non-static particle of a body over a time step
    fn integrate(&self, body: &mut Body, gravity: Vector3, dt: f32);

    /// Returns the name of the integrator
    fn name(&self) -> &str;
}
