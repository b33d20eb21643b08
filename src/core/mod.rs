pub mod engine;
pub mod config;
pub mod metrics;

pub use self::engine::Engine;
pub use self::config::{BroadPhaseMode, EngineConfig, NarrowPhaseMode};
pub use self::metrics::{MetricsLog, StepMetrics};

use bitflags::bitflags;

/// A unique identifier for a body registered with an [`Engine`].
///
/// Handles are handed out in registration order and double as the body's
/// index in [`Engine::bodies`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) u32);

impl BodyHandle {
    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position of the body in the engine's body list
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

bitflags! {
    /// Run-state flags of the engine
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EngineFlags: u32 {
        /// `step` does nothing while set
        const PAUSED = 0x01;

        /// Pause instead of resolving as soon as a step finds a collision
        const PAUSE_ON_COLLISION = 0x02;

        /// The current step was requested explicitly and resolves normally
        const SKIP = 0x04;
    }
}
