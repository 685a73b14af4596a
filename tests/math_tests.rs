use scene_physics2d::math::{self, Aabb, Transform, Vector2};
use std::f32::consts::{FRAC_PI_2, PI};
use approx::{assert_abs_diff_eq, assert_relative_eq};

#[test]
fn test_vector2_operations() {
    let v1 = Vector2::new(1.0, 2.0);
    let v2 = Vector2::new(4.0, 6.0);

    // Addition and subtraction
    assert_eq!(v1 + v2, Vector2::new(5.0, 8.0));
    assert_eq!(v2 - v1, Vector2::new(3.0, 4.0));

    // Scaling
    assert_eq!(v1 * 2.0, Vector2::new(2.0, 4.0));
    assert_eq!(2.0 * v1, Vector2::new(2.0, 4.0));
    assert_eq!(v2 / 2.0, Vector2::new(2.0, 3.0));
    assert_eq!(-v1, Vector2::new(-1.0, -2.0));

    // Dot and cross
    assert_eq!(v1.dot(&v2), 16.0);
    assert_eq!(v1.cross(&v2), 1.0 * 6.0 - 2.0 * 4.0);

    // Length
    assert_relative_eq!((v2 - v1).length(), 5.0);
    assert_relative_eq!(v1.distance(&v2), 5.0);

    // Normalization
    let n = Vector2::new(3.0, 4.0).normalize();
    assert_relative_eq!(n.length(), 1.0);
    assert_relative_eq!(n.x, 0.6);
    assert!(Vector2::ZERO.try_normalize().is_none());
}

#[test]
fn test_vector2_rotation() {
    let v = Vector2::unit_x();

    let quarter = v.rotated(FRAC_PI_2);
    assert_relative_eq!(quarter.x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(quarter.y, 1.0, epsilon = 1e-6);

    let half = v.rotated(PI);
    assert_relative_eq!(half.x, -1.0, epsilon = 1e-6);
    assert_relative_eq!(half.y, 0.0, epsilon = 1e-6);

    // Rotating by zero is exact
    let w = Vector2::new(0.3, -0.7);
    assert_eq!(w.rotated(0.0), w);

    // Perpendicular is a counter-clockwise quarter turn
    assert_eq!(Vector2::new(2.0, 1.0).perpendicular(), Vector2::new(-1.0, 2.0));
}

#[test]
fn test_transform_round_trip() {
    let transform = Transform::new(Vector2::new(3.0, -2.0), 0.75);
    let point = Vector2::new(1.5, 4.0);

    let world = transform.transform_point(point);
    let back = transform.inverse_transform_point(world);
    assert_relative_eq!(back.x, point.x, epsilon = 1e-5);
    assert_relative_eq!(back.y, point.y, epsilon = 1e-5);

    // Vectors ignore translation
    let v = transform.transform_vector(Vector2::unit_x());
    assert_relative_eq!(v.length(), 1.0, epsilon = 1e-6);
    assert_relative_eq!(v.angle(), 0.75, epsilon = 1e-6);
}

#[test]
fn test_transform_compose_and_relative() {
    let parent = Transform::new(Vector2::new(10.0, 0.0), FRAC_PI_2);
    let child = Transform::new(Vector2::new(1.0, 0.0), 0.25);

    // The child's x axis is the parent's y axis
    let world = parent.compose(&child);
    assert_relative_eq!(world.position.x, 10.0, epsilon = 1e-5);
    assert_relative_eq!(world.position.y, 1.0, epsilon = 1e-5);
    assert_relative_eq!(world.rotation, FRAC_PI_2 + 0.25, epsilon = 1e-6);

    // relative_to undoes compose
    let local = parent.relative_to(&world);
    assert_relative_eq!(local.position.x, child.position.x, epsilon = 1e-5);
    assert_relative_eq!(local.position.y, child.position.y, epsilon = 1e-5);
    assert_relative_eq!(local.rotation, child.rotation, epsilon = 1e-6);
}

#[test]
fn test_aabb_queries() {
    let a = Aabb::new(Vector2::new(0.0, 0.0), Vector2::new(2.0, 2.0));
    let b = Aabb::new(Vector2::new(1.0, 1.0), Vector2::new(3.0, 3.0));
    let touching = Aabb::new(Vector2::new(2.0, 0.0), Vector2::new(4.0, 2.0));
    let apart = Aabb::new(Vector2::new(5.0, 5.0), Vector2::new(6.0, 6.0));

    assert!(a.intersects(&b));
    assert!(a.overlaps_strictly(&b));

    // Shared edges intersect but do not overlap
    assert!(a.intersects(&touching));
    assert!(!a.overlaps_strictly(&touching));

    assert!(!a.intersects(&apart));
    assert!(a.intersection(&apart).is_none());

    let overlap = a.intersection(&b).unwrap();
    assert_eq!(overlap.min, Vector2::new(1.0, 1.0));
    assert_eq!(overlap.max, Vector2::new(2.0, 2.0));

    assert_eq!(a.center(), Vector2::new(1.0, 1.0));
    assert_relative_eq!(a.area(), 4.0);
    assert!(a.contains_point(Vector2::new(2.0, 0.5)));
    assert!(!a.contains_point(Vector2::new(2.1, 0.5)));

    let merged = a.union(&apart);
    assert_eq!(merged.max, Vector2::new(6.0, 6.0));

    let from_points = Aabb::from_points(&[
        Vector2::new(1.0, -1.0),
        Vector2::new(-2.0, 3.0),
        Vector2::new(0.5, 0.5),
    ])
    .unwrap();
    assert_eq!(from_points.min, Vector2::new(-2.0, -1.0));
    assert_eq!(from_points.max, Vector2::new(1.0, 3.0));
    assert!(Aabb::from_points(&[]).is_none());

    assert_eq!(a.closest_point(Vector2::new(5.0, 1.0)), Vector2::new(2.0, 1.0));
    assert_eq!(a.closest_point(Vector2::new(0.5, 0.5)), Vector2::new(0.5, 0.5));
    assert_eq!(a.extents(), Vector2::new(2.0, 2.0));
}

#[test]
fn test_scalar_helpers() {
    assert!(math::approx_eq(1.0, 1.0 + 1e-7));
    assert!(!math::approx_eq(1.0, 1.001));
    assert_eq!(math::clamp(5.0, 0.0, 1.0), 1.0);
    assert_eq!(math::clamp(-5.0, 0.0, 1.0), 0.0);
    assert_relative_eq!(math::lerp(2.0, 4.0, 0.25), 2.5);
    assert_eq!(math::smoothstep(0.0), 0.0);
    assert_eq!(math::smoothstep(1.0), 1.0);
    assert_relative_eq!(math::smoothstep(0.5), 0.5);
}

#[test]
fn test_vector2_abs_diff_eq() {
    let rotated = Vector2::new(3.0, 4.0).rotated(PI * 2.0);
    assert_abs_diff_eq!(rotated, Vector2::new(3.0, 4.0), epsilon = 1e-4);
    assert_abs_diff_eq!(Vector2::unit_x().perpendicular(), Vector2::unit_y());
    assert!(!approx::abs_diff_eq!(Vector2::ZERO, Vector2::new(0.0, 0.01), epsilon = 1e-3));
}
