use liso_engine::math::{approx_eq, clamp, Aabb, Vector3};
use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra as na;

#[test]
fn test_vector3_operations() {
    let v1 = Vector3::new(1.0, 2.0, 3.0);
    let v2 = Vector3::new(4.0, 5.0, 6.0);

    assert_eq!(v1 + v2, Vector3::new(5.0, 7.0, 9.0));
    assert_eq!(v2 - v1, Vector3::new(3.0, 3.0, 3.0));
    assert_eq!(v1 * 2.0, Vector3::new(2.0, 4.0, 6.0));
    assert_eq!(2.0 * v1, v1 * 2.0);
    assert_eq!(-v1, Vector3::new(-1.0, -2.0, -3.0));
    assert_eq!(v1.dot(&v2), 32.0);

    let cross = v1.cross(&v2);
    assert_eq!(cross, Vector3::new(-3.0, 6.0, -3.0));

    assert_relative_eq!(v1.normalize().length(), 1.0);
    assert_relative_eq!(v1.length(), 14.0f32.sqrt());
}

#[test]
fn test_planar_helpers() {
    let a = Vector3::xy(1.0, 0.0);
    let b = Vector3::xy(0.0, 1.0);

    assert_eq!(a.perp_dot(&b), 1.0);
    assert_eq!(b.perp_dot(&a), -1.0);
    assert_eq!(a.perpendicular(), b);

    // (ab × ao) × ab points from the segment toward the origin
    let ab = Vector3::xy(2.0, 0.0);
    let ao = Vector3::xy(-1.0, 3.0);
    let toward = Vector3::triple_product(&ab, &ao, &ab);
    assert_eq!(toward.x, 0.0);
    assert!(toward.y > 0.0);
    assert_eq!(toward.z, 0.0);
}

#[test]
fn test_normalize_leaves_tiny_vectors_alone() {
    let tiny = Vector3::xy(1.0e-8, 0.0);
    assert_eq!(tiny.normalize(), tiny);
    assert!(tiny.is_zero());
}

#[test]
fn test_nalgebra_conversion() {
    let v = Vector3::new(1.0, -2.0, 0.5);
    let n: na::Vector3<f32> = v.into();
    assert_eq!(n, na::Vector3::new(1.0, -2.0, 0.5));
    assert_eq!(Vector3::from(n), v);
    assert_eq!(Vector3::from_nalgebra(&v.to_nalgebra()), v);
}

#[test]
fn test_aabb_from_points() {
    let points = [
        Vector3::xy(3.0, -1.0),
        Vector3::xy(-2.0, 4.0),
        Vector3::xy(0.0, 0.0),
    ];
    let aabb = Aabb::from_points(&points).unwrap();
    assert_eq!(aabb.min, Vector3::xy(-2.0, -1.0));
    assert_eq!(aabb.max, Vector3::xy(3.0, 4.0));
    assert_eq!(aabb.area(), 25.0);
    assert!(Aabb::from_points(&[]).is_none());
}

#[test]
fn test_aabb_overlap_per_axis() {
    let a = Aabb::new(Vector3::xy(0.0, 0.0), Vector3::xy(10.0, 10.0));

    let overlapping = Aabb::new(Vector3::xy(5.0, 5.0), Vector3::xy(15.0, 15.0));
    let touching = Aabb::new(Vector3::xy(10.0, 0.0), Vector3::xy(20.0, 10.0));
    let apart_x = Aabb::new(Vector3::xy(11.0, 0.0), Vector3::xy(20.0, 10.0));
    let apart_y = Aabb::new(Vector3::xy(0.0, -20.0), Vector3::xy(10.0, -0.5));

    assert!(a.intersects(&overlapping));
    assert!(overlapping.intersects(&a));
    assert!(a.intersects(&touching));
    assert!(!a.intersects(&apart_x));
    assert!(!a.intersects(&apart_y));
}

#[test]
fn test_aabb_clamp_and_corners() {
    let world = Aabb::from_corners(Vector3::xy(100.0, 100.0), Vector3::xy(0.0, 0.0));
    assert_eq!(world.min, Vector3::zero());
    assert!(world.is_valid());

    assert_eq!(world.clamp_point(Vector3::xy(150.0, -20.0)), Vector3::xy(100.0, 0.0));
    assert_eq!(world.clamp_point(Vector3::xy(50.0, 120.0)), Vector3::xy(50.0, 100.0));
    assert_eq!(world.clamp_point(Vector3::xy(25.0, 75.0)), Vector3::xy(25.0, 75.0));
    assert!(world.contains_point(Vector3::xy(0.0, 100.0)));
}

#[test]
fn test_scalar_helpers() {
    assert!(approx_eq(0.1 + 0.2, 0.3));
    assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
    assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
}

#[test]
fn test_vector3_approx_comparisons() {
    let a = Vector3::xy(1.0, 2.0);
    let b = Vector3::xy(1.0 + 1.0e-5, 2.0 - 1.0e-5);

    assert_abs_diff_eq!(a, b, epsilon = 1e-4);
    assert_relative_eq!(a.normalize() * a.length(), a, epsilon = 1e-6);
    assert!(!approx::abs_diff_eq!(a, Vector3::new(1.0, 2.0, 1.0), epsilon = 1e-4));
}
