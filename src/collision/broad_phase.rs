use crate::bodies::Body;
use crate::collision::ContactPair;
use crate::core::BodyHandle;

/// Trait for broad-phase collision detection algorithms
pub trait BroadPhase: Send {
    /// Appends every pair of bodies whose bounding boxes overlap to `pairs`.
    ///
    /// Bodies are identified by their index in `bodies`. Implementations keep
    /// no state from one call to the next that could leak stale pairs.
    fn find_pairs(&mut self, bodies: &mut [Body], pairs: &mut Vec<ContactPair>);

    /// Returns the name of the algorithm
    fn name(&self) -> &str;
}

/// All-pairs broad phase. Pairs come out in body index order.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaiveBroadPhase;

impl NaiveBroadPhase {
    /// Creates a new naive broad phase
    pub fn new() -> Self {
        Self
    }
}

impl BroadPhase for NaiveBroadPhase {
    fn find_pairs(&mut self, bodies: &mut [Body], pairs: &mut Vec<ContactPair>) {
        for i in 0..bodies.len() {
            let aabb_a = bodies[i].aabb();

            for j in (i + 1)..bodies.len() {
                if aabb_a.intersects(&bodies[j].aabb()) {
                    pairs.push(ContactPair::new(
                        BodyHandle::from_index(i),
                        BodyHandle::from_index(j),
                    ));
                }
            }
        }
    }

    fn name(&self) -> &str {
        "naive"
    }
}
