mod distance;
mod solver;

pub use self::distance::DistanceConstraint;
pub use self::solver::ConstraintSolver;
