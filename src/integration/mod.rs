mod integrator;
mod verlet;

pub use self::integrator::Integrator;
pub use self::verlet::VerletIntegrator;
