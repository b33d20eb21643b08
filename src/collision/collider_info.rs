use crate::core::BodyHandle;
use crate::math::Vector3;

/// One body's side of a confirmed collision.
///
/// Each colliding pair yields two records sharing the same depth, with
/// opposite normals that point away from the other body. Records only live
/// for the step that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct ColliderInfo {
    /// The body this record moves
    pub body: BodyHandle,

    /// Unit direction the body has to move to separate
    pub normal: Vector3,

    /// Penetration depth
    pub depth: f32,

    /// Indices of the body's dynamic particles on the contact edge, filled in
    /// during resolution
    pub contact_points: Vec<usize>,
}

impl ColliderInfo {
    /// Creates a record with no contact points yet
    pub fn new(body: BodyHandle, normal: Vector3, depth: f32) -> Self {
        Self {
            body,
            normal,
            depth,
            contact_points: Vec::new(),
        }
    }

    /// Per-particle displacement before inverse-mass scaling
    pub fn correction_per_point(&self) -> Option<Vector3> {
        if self.contact_points.is_empty() {
            return None;
        }
        Some(self.normal * (self.depth / self.contact_points.len() as f32))
    }
}
