use crate::core::BodyHandle;

/// A pair of bodies whose bounding boxes overlap and that must go through the
/// narrow phase.
///
/// The handles are stored in canonical order (`body_a < body_b`), so a pair
/// doubles as the key used to deduplicate candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactPair {
    /// The body with the smaller handle
    pub body_a: BodyHandle,

    /// The body with the larger handle
    pub body_b: BodyHandle,
}

impl ContactPair {
    /// Creates a new contact pair
    pub fn new(body_a: BodyHandle, body_b: BodyHandle) -> Self {
        // Always sort the handles to ensure consistent ordering
        if body_a <= body_b {
            Self { body_a, body_b }
        } else {
            Self { body_a: body_b, body_b: body_a }
        }
    }

    /// Checks if this pair contains the specified body
    pub fn contains(&self, body: BodyHandle) -> bool {
        self.body_a == body || self.body_b == body
    }

    /// Returns the other body in the pair
    pub fn other(&self, body: BodyHandle) -> Option<BodyHandle> {
        if self.body_a == body {
            Some(self.body_b)
        } else if self.body_b == body {
            Some(self.body_a)
        } else {
            None
        }
    }
}
