mod contact_pair;
mod broad_phase;
mod spatial_hash_grid;
mod narrow_phase;
mod collider_info;
pub mod sat;
pub mod gjk;
pub mod epa;
pub mod resolution;

pub use self::contact_pair::ContactPair;
pub use self::broad_phase::{BroadPhase, NaiveBroadPhase};
pub use self::spatial_hash_grid::{CellKey, SpatialHashGrid};
pub use self::narrow_phase::{GjkEpaNarrowPhase, NarrowPhase, Penetration, SatNarrowPhase};
pub use self::collider_info::ColliderInfo;
