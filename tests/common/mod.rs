#![allow(dead_code)]

use liso_engine::{Body, DistanceConstraint, Particle, Vector3};

/// Every particle linked to every other one, so the mesh keeps its shape
pub fn fully_connected(particles: &[Particle]) -> Vec<DistanceConstraint> {
    let mut constraints = Vec::new();
    for a in 0..particles.len() {
        for b in (a + 1)..particles.len() {
            constraints.push(DistanceConstraint::between(particles, a, b).unwrap());
        }
    }
    constraints
}

pub fn polygon(points: &[(f32, f32)], mass: f32) -> Body {
    let particles: Vec<Particle> = points
        .iter()
        .map(|&(x, y)| Particle::new(Vector3::xy(x, y), mass))
        .collect();
    let constraints = fully_connected(&particles);
    Body::new(particles, constraints).unwrap()
}

pub fn static_polygon(points: &[(f32, f32)]) -> Body {
    let particles: Vec<Particle> = points
        .iter()
        .map(|&(x, y)| Particle::new_static(Vector3::xy(x, y)))
        .collect();
    let constraints = fully_connected(&particles);
    Body::new_static(particles, constraints).unwrap()
}

/// Corners of an axis-aligned rectangle, counter-clockwise from the lower left
pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Vec<(f32, f32)> {
    vec![(x, y), (x + width, y), (x + width, y + height), (x, y + height)]
}

pub fn square(x: f32, y: f32, size: f32) -> Vec<(f32, f32)> {
    rect(x, y, size, size)
}

/// Isosceles triangle with a horizontal base whose left end is at `(x, y)`
pub fn triangle(x: f32, y: f32, size: f32) -> Vec<(f32, f32)> {
    vec![(x, y), (x + size, y), (x + size * 0.5, y + size * 0.866)]
}
