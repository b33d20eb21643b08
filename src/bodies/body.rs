use std::cell::OnceCell;

use crate::bodies::Particle;
use crate::collision::CellKey;
use crate::constraints::DistanceConstraint;
use crate::error::PhysicsError;
use crate::math::{Aabb, Vector3};
use crate::shapes::ConvexHull;
use crate::Result;

/// A soft body: a mesh of particles held together by distance constraints.
///
/// The bounding box and convex hull are derived from particle positions and
/// cached. The engine invalidates both at the start of every step and they are
/// recomputed on first access; any mutable access to the particles also drops
/// them.
#[derive(Debug, Clone)]
pub struct Body {
    particles: Vec<Particle>,
    constraints: Vec<DistanceConstraint>,
    is_static: bool,
    aabb: OnceCell<Aabb>,
    convex_hull: OnceCell<ConvexHull>,
    cell_keys: Vec<CellKey>,
}

impl Body {
    /// Creates a body from its particles and constraints.
    ///
    /// Fails if a constraint refers to a particle index outside `particles`
    /// or links a particle to itself. The body is static when it has at least
    /// one particle and every particle is static.
    pub fn new(particles: Vec<Particle>, constraints: Vec<DistanceConstraint>) -> Result<Self> {
        for (i, constraint) in constraints.iter().enumerate() {
            let (a, b) = constraint.particles();
            if a >= particles.len() || b >= particles.len() {
                return Err(PhysicsError::InvalidParameter(format!(
                    "constraint {i} references particle ({a}, {b}) but the body has {} particles",
                    particles.len()
                )));
            }
            if a == b {
                return Err(PhysicsError::InvalidParameter(format!(
                    "constraint {i} links particle {a} to itself"
                )));
            }
        }

        let is_static = !particles.is_empty() && particles.iter().all(Particle::is_static);

        Ok(Self {
            particles,
            constraints,
            is_static,
            aabb: OnceCell::new(),
            convex_hull: OnceCell::new(),
            cell_keys: Vec::new(),
        })
    }

    /// Creates a body whose particles are all pinned in place
    pub fn new_static(
        mut particles: Vec<Particle>,
        constraints: Vec<DistanceConstraint>,
    ) -> Result<Self> {
        particles.iter_mut().for_each(Particle::make_static);
        let mut body = Self::new(particles, constraints)?;
        body.is_static = true;
        Ok(body)
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to the particles. Drops the cached bounding box and hull.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        self.invalidate_caches();
        &mut self.particles
    }

    #[inline]
    pub fn constraints(&self) -> &[DistanceConstraint] {
        &self.constraints
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Mean particle position, or the origin for an empty body
    pub fn centroid(&self) -> Vector3 {
        if self.particles.is_empty() {
            return Vector3::zero();
        }
        let sum = self
            .particles
            .iter()
            .fold(Vector3::zero(), |acc, p| acc + p.position);
        sum / self.particles.len() as f32
    }

    /// Bounding box of the particle positions, computed on first access after
    /// an invalidation
    pub fn aabb(&self) -> Aabb {
        *self.aabb.get_or_init(|| {
            let mut positions = self.particles.iter().map(|p| p.position);
            match positions.next() {
                Some(first) => positions.fold(Aabb::new(first, first), |mut aabb, p| {
                    aabb.expand_to_include_point(p);
                    aabb
                }),
                None => Aabb::new(Vector3::zero(), Vector3::zero()),
            }
        })
    }

    /// Convex hull of the particle positions, computed on first access after
    /// an invalidation
    pub fn convex_hull(&self) -> &ConvexHull {
        self.convex_hull
            .get_or_init(|| ConvexHull::from_particles(&self.particles))
    }

    /// Drops the cached bounding box and convex hull
    pub fn invalidate_caches(&mut self) {
        self.aabb.take();
        self.convex_hull.take();
    }

    /// Grid cells the body was inserted into by the last spatial hash pass
    #[inline]
    pub fn cell_keys(&self) -> &[CellKey] {
        &self.cell_keys
    }

    pub(crate) fn cell_keys_mut(&mut self) -> &mut Vec<CellKey> {
        &mut self.cell_keys
    }

    /// Splits the body into its particles and constraints so the solver can
    /// move one while reading the other
    pub(crate) fn split_mut(&mut self) -> (&mut [Particle], &[DistanceConstraint]) {
        self.invalidate_caches();
        (&mut self.particles, &self.constraints)
    }
}
