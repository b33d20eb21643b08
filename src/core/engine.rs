use std::time::Instant;

use tracing::{debug, info, trace};

use crate::bodies::Body;
use crate::collision::{
    resolution, BroadPhase, ColliderInfo, ContactPair, GjkEpaNarrowPhase, NaiveBroadPhase,
    NarrowPhase, SatNarrowPhase, SpatialHashGrid,
};
use crate::constraints::ConstraintSolver;
use crate::core::{
    BodyHandle, BroadPhaseMode, EngineConfig, EngineFlags, MetricsLog, NarrowPhaseMode,
    StepMetrics,
};
use crate::error::PhysicsError;
use crate::integration::{Integrator, VerletIntegrator};
use crate::math::Vector3;
use crate::Result;

/// The simulation engine.
///
/// A step runs, in order: Verlet integration of every body, the broad phase,
/// the narrow phase, collision resolution, and constraint relaxation with
/// world clamping. Contact pairs and collider records are rebuilt from
/// scratch every step; records from a previous step are gone once the next
/// step starts.
///
/// The engine is single-threaded. It is `Send`, so a host may step it on
/// another thread as long as only copies of its state leave that thread.
pub struct Engine {
    config: EngineConfig,

    /// Registered bodies, indexed by handle
    bodies: Vec<Body>,

    /// Broad-phase output of the last step
    contact_pairs: Vec<ContactPair>,

    /// Narrow-phase output of the last step, two records per collision
    colliders: Vec<ColliderInfo>,

    gravity: Vector3,

    flags: EngineFlags,

    integrator: Box<dyn Integrator>,

    solver: ConstraintSolver,

    broad_phase: Box<dyn BroadPhase>,

    narrow_phase: Box<dyn NarrowPhase>,

    metrics: MetricsLog,
}

impl Engine {
    /// Creates an engine from a validated configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let broad_phase: Box<dyn BroadPhase> = match config.broad_phase {
            BroadPhaseMode::Naive => Box::new(NaiveBroadPhase::new()),
            BroadPhaseMode::SpatialHashGrid => {
                Box::new(SpatialHashGrid::new(config.grid_cell_size)?)
            }
        };

        let narrow_phase: Box<dyn NarrowPhase> = match config.narrow_phase {
            NarrowPhaseMode::Sat => Box::new(SatNarrowPhase::new()),
            NarrowPhaseMode::GjkEpa => Box::new(GjkEpaNarrowPhase::new()),
        };

        let integrator: Box<dyn Integrator> = Box::new(VerletIntegrator::new(config.drag));
        let solver = ConstraintSolver::new(config.relaxation_iterations, config.world_bounds);

        debug!(
            integrator = integrator.name(),
            broad_phase = broad_phase.name(),
            narrow_phase = narrow_phase.name(),
            iterations = solver.iterations(),
            "engine created"
        );

        Ok(Self {
            gravity: config.gravity,
            integrator,
            solver,
            metrics: MetricsLog::new(config.metrics_history),
            bodies: Vec::new(),
            contact_pairs: Vec::new(),
            colliders: Vec::new(),
            flags: EngineFlags::empty(),
            broad_phase,
            narrow_phase,
            config,
        })
    }

    /// Registers a body and returns its handle
    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        let handle = BodyHandle::from_index(self.bodies.len());

        debug!(
            body = handle.index(),
            particles = body.particle_count(),
            constraints = body.constraint_count(),
            is_static = body.is_static(),
            "body registered"
        );

        self.bodies.push(body);
        handle
    }

    /// Advances the simulation by `dt`. Does nothing while paused.
    pub fn step(&mut self, dt: f32) {
        if self.flags.contains(EngineFlags::PAUSED) {
            return;
        }
        self.run_step(dt);
    }

    /// Advances exactly one step even when paused. The step resolves its
    /// collisions even in pause-on-collision mode, so it never pauses the
    /// engine by itself; a paused engine stays paused afterwards.
    pub fn step_once(&mut self, dt: f32) {
        let was_paused = self.is_paused();

        self.flags.insert(EngineFlags::SKIP);
        self.run_step(dt);

        if was_paused {
            self.flags.insert(EngineFlags::PAUSED);
        }
    }

    fn run_step(&mut self, dt: f32) {
        self.contact_pairs.clear();
        self.colliders.clear();

        let gravity = self.gravity;
        for body in &mut self.bodies {
            body.invalidate_caches();
            self.integrator.integrate(body, gravity, dt);
        }

        let broad_start = Instant::now();
        self.broad_phase
            .find_pairs(&mut self.bodies, &mut self.contact_pairs);
        let broad_phase_time = broad_start.elapsed();

        let narrow_start = Instant::now();
        let collision_tests =
            self.narrow_phase
                .collide(&self.bodies, &self.contact_pairs, &mut self.colliders);
        let narrow_phase_time = narrow_start.elapsed();

        // Contact points are always computed so a paused engine can still
        // show them; only the correction is conditional
        resolution::compute_contact_points(&self.bodies, &mut self.colliders);

        let halt = !self.colliders.is_empty()
            && self.flags.contains(EngineFlags::PAUSE_ON_COLLISION)
            && !self.flags.contains(EngineFlags::SKIP);

        if halt {
            self.flags.insert(EngineFlags::PAUSED);
            info!(
                collisions = self.colliders.len() / 2,
                "collision detected, simulation paused"
            );
        } else {
            resolution::apply_corrections(&mut self.bodies, &self.colliders);
        }

        for body in &mut self.bodies {
            self.solver.solve(body);
        }

        self.flags.remove(EngineFlags::SKIP);

        let record = StepMetrics {
            dt,
            bodies: self.bodies.len(),
            particles: self.particle_count(),
            constraints: self.constraint_count(),
            contact_pairs: self.contact_pairs.len(),
            collision_tests,
            collisions: self.colliders.len() / 2,
            broad_phase_time,
            narrow_phase_time,
        };

        trace!(
            pairs = record.contact_pairs,
            tests = record.collision_tests,
            collisions = record.collisions,
            broad_us = broad_phase_time.as_micros() as u64,
            narrow_us = narrow_phase_time.as_micros() as u64,
            "step"
        );

        self.metrics.push(record);
    }

    /// Stops `step` from advancing the simulation
    pub fn pause(&mut self) {
        self.flags.insert(EngineFlags::PAUSED);
    }

    pub fn resume(&mut self) {
        self.flags.remove(EngineFlags::PAUSED);
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.flags.contains(EngineFlags::PAUSED)
    }

    /// Pause on the first step that detects a collision, before moving any
    /// particle out of contact
    pub fn set_pause_on_collision(&mut self, enabled: bool) {
        self.flags.set(EngineFlags::PAUSE_ON_COLLISION, enabled);
    }

    #[inline]
    pub fn pause_on_collision(&self) -> bool {
        self.flags.contains(EngineFlags::PAUSE_ON_COLLISION)
    }

    #[inline]
    pub fn flags(&self) -> EngineFlags {
        self.flags
    }

    #[inline]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Gets a reference to a body by its handle
    pub fn body(&self, handle: BodyHandle) -> Result<&Body> {
        self.bodies
            .get(handle.index())
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("body {}", handle.index())))
    }

    /// Gets a mutable reference to a body by its handle
    pub fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body> {
        self.bodies
            .get_mut(handle.index())
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("body {}", handle.index())))
    }

    /// Pairs produced by the broad phase during the last step
    #[inline]
    pub fn contact_pairs(&self) -> &[ContactPair] {
        &self.contact_pairs
    }

    /// Collision records produced during the last step
    #[inline]
    pub fn colliders(&self) -> &[ColliderInfo] {
        &self.colliders
    }

    #[inline]
    pub fn gravity(&self) -> Vector3 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vector3) {
        self.gravity = gravity;
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of particles over all bodies
    pub fn particle_count(&self) -> usize {
        self.bodies.iter().map(Body::particle_count).sum()
    }

    /// Number of constraints over all bodies
    pub fn constraint_count(&self) -> usize {
        self.bodies.iter().map(Body::constraint_count).sum()
    }

    #[inline]
    pub fn metrics(&self) -> &MetricsLog {
        &self.metrics
    }

    /// Removes and returns the recorded step metrics
    pub fn take_metrics(&mut self) -> Vec<StepMetrics> {
        self.metrics.drain()
    }
}
