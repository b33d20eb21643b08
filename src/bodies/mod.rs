mod particle;
mod body;

pub use self::particle::Particle;
pub use self::body::Body;
