use scene_physics2d::forces::{noise, FieldContext, FieldRegion, FieldSample, ForceField, ForceFieldType};
use scene_physics2d::math::Transform;
use scene_physics2d::{Node, NodeHandle, PhysicsBody, PhysicsEngine, Scene, Vector2};
use approx::assert_relative_eq;

const DT: f32 = 1.0 / 60.0;

fn context() -> FieldContext {
    FieldContext {
        dt: DT,
        elapsed: 0.0,
        velocity_match_factor: 10.0,
        turbulence_speed_factor: 0.1,
    }
}

fn sample(position: Vector2, velocity: Vector2) -> FieldSample {
    FieldSample {
        position,
        velocity,
        mass: 2.0,
        charge: 0.5,
    }
}

fn free_body() -> PhysicsBody {
    let mut body = PhysicsBody::circle(0.5);
    body.set_linear_damping(0.0);
    body
}

/// A gravity-free scene with one field at the origin and a body at (3, 0)
fn field_scene(field: ForceField) -> (Scene, NodeHandle, NodeHandle) {
    let mut scene = Scene::new();
    scene.physics_world_mut().set_gravity(Vector2::ZERO);
    let field = scene.add_node(Node::new().with_field(field));
    let body = scene.add_node(Node::at(Vector2::new(3.0, 0.0)).with_body(free_body()));
    (scene, field, body)
}

fn velocity(scene: &Scene, handle: NodeHandle) -> Vector2 {
    scene.body(handle).unwrap().get_velocity()
}

#[test]
fn test_radial_gravity_acceleration() {
    let (mut scene, _, body) = field_scene(ForceField::radial_gravity(2.0));
    let mut engine = PhysicsEngine::new();
    engine.simulate(&mut scene, DT);

    // Proportional to mass, so the acceleration is the strength
    let v = velocity(&scene, body);
    assert_relative_eq!(v.x, -2.0 * DT, epsilon = 1e-6);
    assert_relative_eq!(v.y, 0.0);
}

#[test]
fn test_falloff() {
    let field = ForceField::radial_gravity(1.0).with_falloff(2.0);
    assert_relative_eq!(field.falloff_factor(2.0), 0.25);
    assert_relative_eq!(field.falloff_factor(0.5), 4.0);

    let clamped = field.clone().with_minimum_radius(1.0);
    assert_relative_eq!(clamped.falloff_factor(0.25), 1.0);
    assert_relative_eq!(clamped.falloff_factor(2.0), 0.25);

    // No falloff means distance does not matter
    let flat = ForceField::radial_gravity(1.0);
    assert_eq!(flat.falloff_factor(100.0), 1.0);
}

#[test]
fn test_field_force_directions() {
    let at = Vector2::new(2.0, 0.0);
    let moving = Vector2::new(0.0, 3.0);
    let ctx = context();

    let radial = ForceField::radial_gravity(1.0).force_on(Vector2::ZERO, &sample(at, moving), &ctx);
    assert_eq!(radial, Vector2::new(-2.0, 0.0));

    let linear = ForceField::linear_gravity(Vector2::new(0.0, -1.0)).with_strength(3.0);
    assert_eq!(linear.force_on(Vector2::ZERO, &sample(at, moving), &ctx), Vector2::new(0.0, -6.0));

    let drag = ForceField::drag(0.5).force_on(Vector2::ZERO, &sample(at, moving), &ctx);
    assert_eq!(drag, Vector2::new(0.0, -3.0));

    // Counter-clockwise around the field
    let vortex = ForceField::vortex(1.0).force_on(Vector2::ZERO, &sample(at, moving), &ctx);
    assert_relative_eq!(vortex.x, 0.0);
    assert_relative_eq!(vortex.y, 2.0);

    let spring = ForceField::spring(4.0).force_on(Vector2::ZERO, &sample(at, moving), &ctx);
    assert_eq!(spring, Vector2::new(-8.0, 0.0));

    let matched = ForceField::velocity_match(Vector2::new(1.0, 3.0))
        .with_strength(0.1)
        .force_on(Vector2::ZERO, &sample(at, moving), &ctx);
    assert_relative_eq!(matched.x, 2.0, epsilon = 1e-5);
    assert_relative_eq!(matched.y, 0.0);

    let texture = ForceField::velocity_texture().force_on(Vector2::ZERO, &sample(at, moving), &ctx);
    assert_eq!(texture, Vector2::ZERO);
}

#[test]
fn test_charged_fields() {
    let ctx = context();
    let at = Vector2::new(0.0, 4.0);

    // Like charges repel
    let electric = ForceField::electric(2.0).force_on(Vector2::ZERO, &sample(at, Vector2::ZERO), &ctx);
    assert_relative_eq!(electric.x, 0.0);
    assert_relative_eq!(electric.y, 1.0);

    // v x B with B out of the plane
    let magnetic = ForceField::magnetic(2.0).force_on(
        Vector2::ZERO,
        &sample(at, Vector2::new(1.0, 0.0)),
        &ctx,
    );
    assert_relative_eq!(magnetic.x, 0.0);
    assert_relative_eq!(magnetic.y, -1.0);

    // Neutral bodies feel neither
    let mut neutral = sample(at, Vector2::new(1.0, 0.0));
    neutral.charge = 0.0;
    assert_eq!(ForceField::electric(2.0).force_on(Vector2::ZERO, &neutral, &ctx), Vector2::ZERO);
    assert_eq!(ForceField::magnetic(2.0).force_on(Vector2::ZERO, &neutral, &ctx), Vector2::ZERO);
}

#[test]
fn test_custom_field_closure() {
    let field = ForceField::custom(|position: Vector2, _velocity: Vector2, mass: f32, charge: f32, _dt: f32| {
        Vector2::new(position.x * mass, charge)
    })
    .with_strength(100.0);
    assert!(matches!(field.get_field_type(), ForceFieldType::Custom(_)));

    // Strength and falloff are left to the closure
    let force = field.force_on(Vector2::ZERO, &sample(Vector2::new(3.0, 0.0), Vector2::ZERO), &context());
    assert_eq!(force, Vector2::new(6.0, 0.5));
}

#[test]
fn test_noise_is_deterministic_and_bounded() {
    for i in 0..50 {
        let x = i as f32 * 0.37 - 4.0;
        let y = i as f32 * -0.61 + 2.0;
        let n = noise::value_noise(x, y);
        assert!((-1.0..=1.0).contains(&n));
        assert_eq!(n, noise::value_noise(x, y));
    }

    let field = ForceField::noise(0.5, 1.0);
    let probe = sample(Vector2::new(1.3, -2.2), Vector2::ZERO);
    let first = field.force_on(Vector2::ZERO, &probe, &context());
    let again = field.force_on(Vector2::ZERO, &probe, &context());
    assert_eq!(first, again);
    assert!(first.x.abs() <= 2.0 && first.y.abs() <= 2.0);
}

#[test]
fn test_turbulence_grows_with_speed() {
    let field = ForceField::turbulence(0.5, 0.0);
    let at = Vector2::new(0.42, 1.7);
    let slow = field.force_on(Vector2::ZERO, &sample(at, Vector2::ZERO), &context());
    let fast = field.force_on(Vector2::ZERO, &sample(at, Vector2::new(10.0, 0.0)), &context());
    assert_relative_eq!(fast.x, slow.x * 2.0, epsilon = 1e-5);
    assert_relative_eq!(fast.y, slow.y * 2.0, epsilon = 1e-5);
}

#[test]
fn test_field_region() {
    assert!(FieldRegion::Everywhere.contains(Vector2::new(1e6, -1e6)));
    assert!(FieldRegion::Circle { radius: 2.0 }.contains(Vector2::new(1.0, 1.0)));
    assert!(!FieldRegion::Circle { radius: 2.0 }.contains(Vector2::new(2.0, 1.0)));

    let rect = FieldRegion::Rectangle { size: Vector2::new(4.0, 2.0) };
    assert!(rect.contains(Vector2::new(2.0, 1.0)));
    assert!(!rect.contains(Vector2::new(2.0, 1.1)));

    // Regions follow the field node's transform
    let field = ForceField::drag(1.0).with_region(rect);
    let placed = Transform::new(Vector2::new(10.0, 0.0), std::f32::consts::FRAC_PI_2);
    assert!(field.affects(&placed, u32::MAX, Vector2::new(10.5, 1.9)));
    assert!(!field.affects(&placed, u32::MAX, Vector2::new(11.9, 0.0)));
}

#[test]
fn test_region_limits_field_in_scene() {
    let field = ForceField::radial_gravity(2.0).with_region(FieldRegion::Circle { radius: 2.0 });
    let (mut scene, _, body) = field_scene(field);
    let mut engine = PhysicsEngine::new();
    engine.simulate(&mut scene, DT);

    assert_eq!(velocity(&scene, body), Vector2::ZERO);
}

#[test]
fn test_category_masks() {
    let field = ForceField::radial_gravity(2.0).with_category_bit_mask(0b10);
    let (mut scene, _, body) = field_scene(field);
    scene.body_mut(body).unwrap().set_field_bit_mask(0b01);
    let other = scene.add_node(Node::at(Vector2::new(-3.0, 0.0)).with_body(free_body()));
    scene.body_mut(other).unwrap().set_field_bit_mask(0b11);

    let mut engine = PhysicsEngine::new();
    engine.simulate(&mut scene, DT);

    assert_eq!(velocity(&scene, body), Vector2::ZERO);
    assert!(velocity(&scene, other).x > 0.0);
}

#[test]
fn test_exclusive_field_overrides_others() {
    let (mut scene, _, body) = field_scene(ForceField::radial_gravity(2.0));
    scene.add_node(
        Node::at(Vector2::new(3.0, 5.0))
            .with_field(ForceField::linear_gravity(Vector2::new(0.0, 1.0)).with_exclusive(true)),
    );
    let mut engine = PhysicsEngine::new();
    engine.simulate(&mut scene, DT);

    // Only the exclusive linear field counts
    let v = velocity(&scene, body);
    assert_relative_eq!(v.x, 0.0);
    assert_relative_eq!(v.y, DT, epsilon = 1e-6);
}

#[test]
fn test_fields_sum_when_not_exclusive() {
    let (mut scene, _, body) = field_scene(ForceField::radial_gravity(2.0));
    scene.add_node(Node::new().with_field(ForceField::linear_gravity(Vector2::new(0.0, 1.0))));
    let mut engine = PhysicsEngine::new();
    engine.simulate(&mut scene, DT);

    let v = velocity(&scene, body);
    assert_relative_eq!(v.x, -2.0 * DT, epsilon = 1e-6);
    assert_relative_eq!(v.y, DT, epsilon = 1e-6);
}

#[test]
fn test_disabled_field_and_own_node() {
    let (mut scene, field, body) = field_scene(ForceField::radial_gravity(2.0));
    scene.node_mut(field).unwrap().field_mut().unwrap().set_enabled(false);
    assert!(scene.field_nodes().is_empty());

    // A body carrying its own field is not pulled by it
    let carrier = scene.add_node(
        Node::at(Vector2::new(-3.0, 0.0))
            .with_body(free_body())
            .with_field(ForceField::linear_gravity(Vector2::new(1.0, 0.0))),
    );

    let mut engine = PhysicsEngine::new();
    engine.simulate(&mut scene, DT);

    assert_eq!(velocity(&scene, carrier), Vector2::ZERO);
    assert_relative_eq!(velocity(&scene, body).x, DT, epsilon = 1e-6);
}

#[test]
fn test_attach_field_to_existing_node() {
    let mut scene = Scene::new();
    scene.physics_world_mut().set_gravity(Vector2::ZERO);
    let anchor = scene.add_node(Node::at(Vector2::new(0.0, -5.0)));
    let body = scene.add_node(Node::new().with_body(free_body()));
    scene.attach_field(anchor, ForceField::radial_gravity(3.0)).unwrap();

    let mut engine = PhysicsEngine::new();
    engine.simulate(&mut scene, DT);

    let v = velocity(&scene, body);
    assert_relative_eq!(v.x, 0.0);
    assert_relative_eq!(v.y, -3.0 * DT, epsilon = 1e-6);
}
