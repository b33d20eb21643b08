use crate::constraints::ConstraintSolver;
use crate::error::PhysicsError;
use crate::integration::VerletIntegrator;
use crate::math::{Aabb, Vector3};
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Broad-phase algorithm used to find candidate pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum BroadPhaseMode {
    /// Test every pair of bounding boxes
    #[default]
    Naive,

    /// Bin bounding boxes into a uniform grid first
    SpatialHashGrid,
}

/// Narrow-phase algorithm used on candidate pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum NarrowPhaseMode {
    /// Separating Axis Theorem
    #[default]
    Sat,

    /// GJK followed by EPA
    GjkEpa,
}

/// Configuration parameters for the engine
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Rectangle every particle is clamped into
    pub world_bounds: Aabb,

    pub broad_phase: BroadPhaseMode,

    pub narrow_phase: NarrowPhaseMode,

    /// Constant acceleration applied to every dynamic particle
    pub gravity: Vector3,

    /// Cell side of the spatial hash grid, only read in `SpatialHashGrid` mode
    pub grid_cell_size: f32,

    /// Linear drag coefficient of the integrator
    pub drag: f32,

    /// Relaxation passes per body per step
    pub relaxation_iterations: u32,

    /// Number of per-step metric records kept before the oldest are dropped
    pub metrics_history: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            world_bounds: Aabb::new(Vector3::zero(), Vector3::xy(1000.0, 1000.0)),
            broad_phase: BroadPhaseMode::Naive,
            narrow_phase: NarrowPhaseMode::Sat,
            gravity: Vector3::xy(0.0, -9.81),
            grid_cell_size: 50.0,
            drag: VerletIntegrator::DEFAULT_DRAG,
            relaxation_iterations: ConstraintSolver::DEFAULT_ITERATIONS,
            metrics_history: 3600,
        }
    }
}

impl EngineConfig {
    /// Sets the world rectangle from any two opposite corners
    pub fn with_world_bounds(mut self, a: Vector3, b: Vector3) -> Self {
        self.world_bounds = Aabb::from_corners(a, b);
        self
    }

    pub fn with_broad_phase(mut self, mode: BroadPhaseMode) -> Self {
        self.broad_phase = mode;
        self
    }

    pub fn with_narrow_phase(mut self, mode: NarrowPhaseMode) -> Self {
        self.narrow_phase = mode;
        self
    }

    pub fn with_gravity(mut self, gravity: Vector3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Selects the spatial hash grid broad phase with the given cell size
    pub fn with_grid(mut self, cell_size: f32) -> Self {
        self.broad_phase = BroadPhaseMode::SpatialHashGrid;
        self.grid_cell_size = cell_size;
        self
    }

    pub fn with_drag(mut self, drag: f32) -> Self {
        self.drag = drag;
        self
    }

    pub fn with_relaxation_iterations(mut self, iterations: u32) -> Self {
        self.relaxation_iterations = iterations;
        self
    }

    pub fn with_metrics_history(mut self, records: usize) -> Self {
        self.metrics_history = records;
        self
    }

    /// Checks the configuration for values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if !self.world_bounds.is_valid() {
            return Err(PhysicsError::InvalidParameter(format!(
                "world bounds are inverted: min {} max {}",
                self.world_bounds.min, self.world_bounds.max
            )));
        }

        if self.broad_phase == BroadPhaseMode::SpatialHashGrid
            && (!self.grid_cell_size.is_finite() || self.grid_cell_size <= 0.0)
        {
            return Err(PhysicsError::InvalidParameter(format!(
                "grid cell size must be positive and finite, got {}",
                self.grid_cell_size
            )));
        }

        if self.relaxation_iterations == 0 {
            return Err(PhysicsError::InvalidParameter(
                "at least one relaxation iteration is required".to_string(),
            ));
        }

        if !self.drag.is_finite() || self.drag < 0.0 {
            return Err(PhysicsError::InvalidParameter(format!(
                "drag must be non-negative and finite, got {}",
                self.drag
            )));
        }

        Ok(())
    }
}
