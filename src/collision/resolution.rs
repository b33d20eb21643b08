//! Positional collision response.
//!
//! Resolution is split in two phases so the engine can inspect contacts
//! without acting on them: [`compute_contact_points`] always runs, while
//! [`apply_corrections`] is skipped when the engine pauses on collision.

use crate::bodies::Body;
use crate::collision::ColliderInfo;
use crate::math::EPSILON;

/// Fills each record's contact points with the dynamic particles on the hull
/// edge facing away from the record's normal.
///
/// Edge vertices lying more than the record's depth behind the deepest one do
/// not reach the other body and are left out, so a tilted edge is only pushed
/// at its embedded end.
pub fn compute_contact_points(bodies: &[Body], colliders: &mut [ColliderInfo]) {
    for collider in colliders.iter_mut() {
        let body = &bodies[collider.body.index()];
        let particles = body.particles();
        let inward = -collider.normal;

        let edge = body.convex_hull().farthest_edge_in_direction(inward);
        let deepest = edge
            .iter()
            .map(|&i| particles[i].position.dot(&inward))
            .fold(f32::MIN, f32::max);
        let reach = deepest - collider.depth - EPSILON;

        collider.contact_points = edge
            .into_iter()
            .filter(|&i| particles[i].position.dot(&inward) >= reach)
            .filter(|&i| !particles[i].is_static())
            .collect();
    }
}

/// Moves every contact particle along its record's normal by an equal share
/// of the depth, scaled by the particle's inverse mass
pub fn apply_corrections(bodies: &mut [Body], colliders: &[ColliderInfo]) {
    for collider in colliders {
        let Some(correction) = collider.correction_per_point() else {
            continue;
        };

        let particles = bodies[collider.body.index()].particles_mut();
        for &i in &collider.contact_points {
            let particle = &mut particles[i];
            let inverse_mass = particle.inverse_mass();
            particle.translate(correction * inverse_mass);
        }
    }
}
