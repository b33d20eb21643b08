use crate::bodies::Body;
use crate::collision::{epa, gjk, sat, ColliderInfo, ContactPair};
use crate::math::Vector3;
use crate::shapes::ConvexHull;

/// Minimum translation between two overlapping hulls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// Unit normal pointing from the first hull toward the second
    pub normal: Vector3,

    /// Overlap along `normal`, never negative
    pub depth: f32,
}

/// Trait for narrow-phase collision detection algorithms
pub trait NarrowPhase: Send + Sync {
    /// Exact overlap test between two convex hulls
    fn penetration(&self, a: &ConvexHull, b: &ConvexHull) -> Option<Penetration>;

    /// Returns the name of the algorithm
    fn name(&self) -> &str;

    /// Tests every pair and appends two records per hit, one per body, each
    /// with the normal pointing away from the other body. Returns the number
    /// of pairs tested.
    fn collide(
        &self,
        bodies: &[Body],
        pairs: &[ContactPair],
        colliders: &mut Vec<ColliderInfo>,
    ) -> usize {
        let mut tests = 0;

        for pair in pairs {
            let body_a = &bodies[pair.body_a.index()];
            let body_b = &bodies[pair.body_b.index()];

            tests += 1;
            if let Some(hit) = self.penetration(body_a.convex_hull(), body_b.convex_hull()) {
                // The normal goes from A to B, so A has to move the other way
                colliders.push(ColliderInfo::new(pair.body_a, -hit.normal, hit.depth));
                colliders.push(ColliderInfo::new(pair.body_b, hit.normal, hit.depth));
            }
        }

        tests
    }
}

/// Separating Axis Theorem narrow phase
#[derive(Debug, Default, Clone, Copy)]
pub struct SatNarrowPhase;

impl SatNarrowPhase {
    pub fn new() -> Self {
        Self
    }
}

impl NarrowPhase for SatNarrowPhase {
    fn penetration(&self, a: &ConvexHull, b: &ConvexHull) -> Option<Penetration> {
        sat::sat(a, b)
    }

    fn name(&self) -> &str {
        "sat"
    }
}

/// GJK overlap query followed by EPA for the penetration
#[derive(Debug, Default, Clone, Copy)]
pub struct GjkEpaNarrowPhase;

impl GjkEpaNarrowPhase {
    pub fn new() -> Self {
        Self
    }
}

impl NarrowPhase for GjkEpaNarrowPhase {
    fn penetration(&self, a: &ConvexHull, b: &ConvexHull) -> Option<Penetration> {
        let simplex = gjk::gjk(a, b)?;
        epa::epa(a, b, &simplex)
    }

    fn name(&self) -> &str {
        "gjk_epa"
    }
}
