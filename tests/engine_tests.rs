mod common;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use liso_engine::error::PhysicsError;
use liso_engine::{
    Aabb, Body, BodyHandle, BroadPhaseMode, Engine, EngineConfig, NarrowPhaseMode, Particle,
    Vector3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use common::{polygon, square, static_polygon, triangle};

const DT: f32 = 1.0 / 60.0;

fn still_world() -> EngineConfig {
    EngineConfig::default()
        .with_world_bounds(Vector3::xy(0.0, 0.0), Vector3::xy(200.0, 200.0))
        .with_gravity(Vector3::zero())
        .with_drag(0.0)
}

fn single_particle(x: f32, y: f32) -> Body {
    Body::new(vec![Particle::new(Vector3::xy(x, y), 1.0)], Vec::new()).unwrap()
}

fn positions(engine: &Engine, handle: BodyHandle) -> Vec<Vector3> {
    engine.body(handle).unwrap().particles().iter().map(|p| p.position).collect()
}

#[test]
fn test_particle_at_rest_stays_put() {
    let mut engine = Engine::new(still_world()).unwrap();
    let handle = engine.add_body(single_particle(5.0, 5.0));

    for _ in 0..10 {
        engine.step(DT);
    }

    let particle = &engine.body(handle).unwrap().particles()[0];
    assert_eq!(particle.position, Vector3::xy(5.0, 5.0));
}

#[test]
fn test_free_fall_is_quadratic_without_drag() {
    let config = EngineConfig::default().with_gravity(Vector3::xy(0.0, -10.0)).with_drag(0.0);
    let mut engine = Engine::new(config).unwrap();
    let handle = engine.add_body(single_particle(500.0, 500.0));

    let dt = 0.1;
    let steps = 20;
    for _ in 0..steps {
        engine.step(dt);
    }

    // Each step adds g * dt² to the per-step displacement
    let expected = 500.0 - 10.0 * dt * dt * (steps * (steps + 1) / 2) as f32;
    let position = engine.body(handle).unwrap().particles()[0].position;
    assert_relative_eq!(position.y, expected, max_relative = 1e-5);
    assert_eq!(position.x, 500.0);
    assert_eq!(position.z, 0.0);
}

#[test]
fn test_particles_stay_inside_world_bounds() {
    let config = still_world().with_gravity(Vector3::xy(30.0, -80.0));
    let mut engine = Engine::new(config).unwrap();
    let handle = engine.add_body(polygon(&square(150.0, 20.0, 30.0), 1.0));

    for _ in 0..300 {
        engine.step(DT);
    }

    // Clamping runs before each relaxation pass, so the last pass may leave
    // particles marginally outside
    let world = engine.config().world_bounds;
    for particle in engine.body(handle).unwrap().particles() {
        let p = particle.position;
        assert!(p.x >= world.min.x - 0.5 && p.x <= world.max.x + 0.5, "{p}");
        assert!(p.y >= world.min.y - 0.5 && p.y <= world.max.y + 0.5, "{p}");
    }
    let pressed = engine.body(handle).unwrap().aabb();
    assert!(pressed.max.x > 199.0);
    assert!(pressed.min.y < 1.0);
}

#[test]
fn test_static_squares_report_both_records() {
    for mode in [NarrowPhaseMode::Sat, NarrowPhaseMode::GjkEpa] {
        let mut engine = Engine::new(still_world().with_narrow_phase(mode)).unwrap();
        engine.add_body(static_polygon(&square(0.0, 0.0, 10.0)));
        engine.add_body(static_polygon(&square(8.0, 0.0, 10.0)));

        engine.step(DT);

        assert_eq!(engine.contact_pairs().len(), 1);
        let colliders = engine.colliders();
        assert_eq!(colliders.len(), 2, "{mode:?}");

        assert_abs_diff_eq!(colliders[0].depth, 2.0, epsilon = 1e-3);
        assert_abs_diff_eq!(colliders[1].depth, 2.0, epsilon = 1e-3);
        assert_abs_diff_eq!(colliders[0].normal.x, -1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(colliders[1].normal.x, 1.0, epsilon = 1e-3);
        assert!(colliders.iter().all(|c| c.contact_points.is_empty()));

        // Static bodies never move
        assert_eq!(engine.bodies()[1].particles()[0].position, Vector3::xy(8.0, 0.0));
    }
}

#[test]
fn test_records_are_rebuilt_every_step() {
    let mut engine = Engine::new(still_world()).unwrap();
    engine.add_body(static_polygon(&square(0.0, 0.0, 10.0)));
    let mover = engine.add_body(polygon(&square(9.0, 0.0, 10.0), 1.0));

    engine.step(DT);
    assert_eq!(engine.colliders().len(), 2);

    for particle in engine.body_mut(mover).unwrap().particles_mut() {
        particle.position += Vector3::xy(100.0, 0.0);
        particle.old_position = particle.position;
    }
    engine.step(DT);

    assert!(engine.contact_pairs().is_empty());
    assert!(engine.colliders().is_empty());
}

#[test]
fn test_pause_on_collision_keeps_contacts_unresolved() {
    let mut engine = Engine::new(still_world()).unwrap();
    engine.add_body(static_polygon(&square(0.0, 0.0, 10.0)));
    let mover = engine.add_body(polygon(&square(9.0, 0.0, 10.0), 1.0));
    engine.set_pause_on_collision(true);

    let before = positions(&engine, mover);

    engine.step(DT);
    assert!(engine.is_paused());
    assert_eq!(engine.colliders().len(), 2);

    let mut contact = engine.colliders()[1].contact_points.clone();
    contact.sort_unstable();
    assert_eq!(contact, vec![0, 3]);

    assert_eq!(positions(&engine, mover), before);

    // Paused: nothing happens
    engine.step(DT);
    assert_eq!(engine.metrics().len(), 1);

    // An explicit step resolves the contact and stays paused
    engine.step_once(DT);
    assert!(engine.is_paused());
    assert_eq!(engine.metrics().len(), 2);
    let moved = engine.body(mover).unwrap().particles()[0].position;
    assert!(moved.x > 9.0);
}

#[test]
fn test_step_once_while_running_leaves_engine_running() {
    let mut engine = Engine::new(still_world()).unwrap();
    engine.add_body(single_particle(10.0, 10.0));

    engine.step_once(DT);
    assert!(!engine.is_paused());

    engine.pause();
    engine.step(DT);
    assert_eq!(engine.metrics().len(), 1);

    engine.resume();
    engine.step(DT);
    assert_eq!(engine.metrics().len(), 2);
}

#[test]
fn test_step_once_resolves_without_pausing_a_running_engine() {
    let mut engine = Engine::new(still_world()).unwrap();
    engine.add_body(static_polygon(&square(0.0, 0.0, 10.0)));
    let mover = engine.add_body(polygon(&square(9.0, 0.0, 10.0), 1.0));
    engine.set_pause_on_collision(true);

    engine.step_once(DT);

    assert!(!engine.is_paused());
    assert_eq!(engine.colliders().len(), 2);
    assert!(positions(&engine, mover)[0].x > 9.0);

    // The next regular step pauses again
    engine.step(DT);
    assert!(engine.is_paused());
}

#[test]
fn test_shapes_come_to_rest_on_floor() {
    let shapes = [triangle(90.0, 60.0, 20.0), square(90.0, 60.0, 20.0)];

    for mode in [NarrowPhaseMode::Sat, NarrowPhaseMode::GjkEpa] {
        for shape in &shapes {
            let config = EngineConfig::default()
                .with_world_bounds(Vector3::xy(0.0, 0.0), Vector3::xy(200.0, 200.0))
                .with_gravity(Vector3::xy(0.0, -50.0))
                .with_narrow_phase(mode);
            let mut engine = Engine::new(config).unwrap();

            engine.add_body(static_polygon(&[(20.0, 50.0), (180.0, 50.0)]));
            let falling = engine.add_body(polygon(shape, 1.0));

            for _ in 0..480 {
                engine.step(DT);
            }

            for _ in 0..120 {
                engine.step(DT);

                let particles = engine.body(falling).unwrap().particles();
                let lowest = particles
                    .iter()
                    .map(|p| p.position.y)
                    .fold(f32::MAX, f32::min);
                assert!(lowest > 49.8, "{mode:?}: sank to {lowest}");
                assert!(lowest < 50.2, "{mode:?}: floats at {lowest}");

                // The base stays flat on the floor
                let tilt = (particles[1].position.y - particles[0].position.y).abs();
                assert!(tilt < 0.5, "{mode:?}: tilted by {tilt}");

                for particle in particles {
                    assert!(particle.velocity().length() < 0.1);
                }
            }

            let floor = &engine.bodies()[0];
            assert_eq!(floor.particles()[0].position, Vector3::xy(20.0, 50.0));
        }
    }
}

#[test]
fn test_broad_phase_modes_agree() {
    let mut rng = StdRng::seed_from_u64(42);
    let bodies: Vec<Body> = (0..50)
        .map(|_| {
            let x = rng.gen_range(0.0..170.0);
            let y = rng.gen_range(0.0..170.0);
            polygon(&square(x, y, rng.gen_range(5.0..25.0)), 1.0)
        })
        .collect();

    let mut naive = Engine::new(still_world()).unwrap();
    let mut grid = Engine::new(still_world().with_grid(15.0)).unwrap();
    for body in &bodies {
        naive.add_body(body.clone());
        grid.add_body(body.clone());
    }
    naive.set_pause_on_collision(true);
    grid.set_pause_on_collision(true);

    naive.step(DT);
    grid.step(DT);

    let mut naive_pairs = naive.contact_pairs().to_vec();
    let mut grid_pairs = grid.contact_pairs().to_vec();
    naive_pairs.sort();
    grid_pairs.sort();
    assert_eq!(naive_pairs, grid_pairs);
    assert_eq!(naive.colliders().len(), grid.colliders().len());
}

#[test]
fn test_metrics_track_steps() {
    let config = still_world().with_metrics_history(2);
    let mut engine = Engine::new(config).unwrap();
    engine.add_body(static_polygon(&square(0.0, 0.0, 10.0)));
    engine.add_body(polygon(&square(5.0, 5.0, 10.0), 1.0));

    for _ in 0..3 {
        engine.step(DT);
    }

    assert_eq!(engine.metrics().len(), 2);
    let last = engine.metrics().last().unwrap();
    assert_eq!(last.bodies, 2);
    assert_eq!(last.particles, 8);
    assert_eq!(last.constraints, 12);
    assert_eq!(last.collision_tests, last.contact_pairs);

    let drained = engine.take_metrics();
    assert_eq!(drained.len(), 2);
    assert!(engine.metrics().is_empty());
}

#[test]
fn test_counts_and_handles() {
    let mut engine = Engine::new(still_world()).unwrap();
    let first = engine.add_body(polygon(&square(0.0, 0.0, 10.0), 1.0));
    let second = engine.add_body(single_particle(50.0, 50.0));

    assert_eq!(first.index(), 0);
    assert_eq!(second.index(), 1);
    assert_eq!(engine.body_count(), 2);
    assert_eq!(engine.particle_count(), 5);
    assert_eq!(engine.constraint_count(), 6);

    let empty = Engine::new(still_world()).unwrap();
    assert!(matches!(empty.body(second), Err(PhysicsError::ResourceNotFound(_))));
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let mut inverted = EngineConfig::default();
    inverted.world_bounds = Aabb::new(Vector3::xy(10.0, 10.0), Vector3::xy(0.0, 0.0));
    assert!(matches!(Engine::new(inverted), Err(PhysicsError::InvalidParameter(_))));

    assert!(Engine::new(EngineConfig::default().with_grid(0.0)).is_err());
    assert!(Engine::new(EngineConfig::default().with_relaxation_iterations(0)).is_err());
    assert!(Engine::new(EngineConfig::default().with_drag(-1.0)).is_err());

    // The cell size only matters in grid mode
    let mut naive = EngineConfig::default().with_broad_phase(BroadPhaseMode::Naive);
    naive.grid_cell_size = 0.0;
    assert!(Engine::new(naive).is_ok());
}

#[test]
fn test_engine_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<Engine>();
}
