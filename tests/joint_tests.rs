use scene_physics2d::error::PhysicsError;
use scene_physics2d::joints::{FixedJoint, Joint, JointType, LimitJoint, PinJoint, SlidingJoint, SpringJoint};
use scene_physics2d::{Node, NodeHandle, PhysicsBody, PhysicsEngine, Scene, Vector2};
use approx::assert_relative_eq;

const DT: f32 = 1.0 / 60.0;

fn pinned_circle(radius: f32) -> PhysicsBody {
    let mut body = PhysicsBody::circle(radius);
    body.set_pinned(true);
    body
}

fn position(scene: &Scene, handle: NodeHandle) -> Vector2 {
    scene.world_transform(handle).unwrap().position
}

fn run(scene: &mut Scene, steps: usize) {
    let mut engine = PhysicsEngine::new();
    for _ in 0..steps {
        engine.simulate(scene, DT);
    }
}

#[test]
fn test_fixed_joint_holds_offset_under_gravity() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::at(Vector2::new(0.0, 0.0)).with_body(PhysicsBody::circle(0.5)));
    let b = scene.add_node(Node::at(Vector2::new(2.0, 0.0)).with_body(PhysicsBody::circle(0.5)));

    let joint = FixedJoint::new(&scene, a, b).unwrap();
    assert_eq!(joint.get_local_offset(), Vector2::new(2.0, 0.0));
    scene.physics_world_mut().add_joint(Box::new(joint));

    run(&mut scene, 60);

    // Both fell, together
    let offset = position(&scene, b) - position(&scene, a);
    assert!(position(&scene, a).y < -1.0);
    assert!((offset - Vector2::new(2.0, 0.0)).length() < 0.1);
}

#[test]
fn test_fixed_joint_to_pinned_body() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::at(Vector2::new(0.0, 0.0)).with_body(pinned_circle(0.5)));
    let b = scene.add_node(Node::at(Vector2::new(2.0, 0.0)).with_body(PhysicsBody::circle(0.5)));
    let joint = FixedJoint::new(&scene, a, b).unwrap();
    scene.physics_world_mut().add_joint(Box::new(joint));

    run(&mut scene, 60);

    // The pinned body never moves; the other hangs where it was fixed
    assert_eq!(position(&scene, a), Vector2::ZERO);
    assert!((position(&scene, b) - Vector2::new(2.0, 0.0)).length() < 0.1);
}

#[test]
fn test_pin_joint_swings_like_a_pendulum() {
    let mut scene = Scene::new();
    let pivot = scene.add_node(Node::new().with_body(pinned_circle(0.1)));
    let bob = scene.add_node(Node::at(Vector2::new(1.0, 0.0)).with_body(PhysicsBody::circle(0.2)));
    let joint = PinJoint::new(&scene, pivot, bob, Vector2::ZERO).unwrap();
    scene.physics_world_mut().add_joint(Box::new(joint));

    run(&mut scene, 30);

    // Swung down along a unit circle around the pivot
    let bob_position = position(&scene, bob);
    assert!(bob_position.y < -0.1, "bob did not swing: {}", bob_position);
    assert_relative_eq!(bob_position.length(), 1.0, epsilon = 0.05);
    assert_eq!(position(&scene, pivot), Vector2::ZERO);

    // Turning about the pivot turns the bob clockwise
    assert!(scene.world_transform(bob).unwrap().rotation < 0.0);
}

fn spinning_pin(angular_velocity: f32) -> (Scene, NodeHandle, NodeHandle) {
    let mut scene = Scene::new();
    scene.physics_world_mut().set_gravity(Vector2::ZERO);
    let a = scene.add_node(Node::new().with_body(pinned_circle(0.2)));
    let mut wheel = PhysicsBody::circle(0.5);
    wheel.set_angular_velocity(angular_velocity);
    wheel.set_angular_damping(0.0);
    let b = scene.add_node(Node::at(Vector2::new(1.0, 0.0)).with_body(wheel));
    (scene, a, b)
}

#[test]
fn test_pin_joint_angle_limits() {
    let (mut scene, a, b) = spinning_pin(5.0);
    let joint = PinJoint::new(&scene, a, b, Vector2::new(1.0, 0.0))
        .unwrap()
        .with_angle_limits(0.5, -0.5);
    assert_eq!(joint.get_angle_limits(), Some((-0.5, 0.5)));
    let handle = scene.physics_world_mut().add_joint(Box::new(joint));

    run(&mut scene, 60);

    let rotation = scene.world_transform(b).unwrap().rotation;
    assert!(rotation <= 0.6, "rotation passed the limit: {}", rotation);
    assert!(rotation > 0.3);
    assert_relative_eq!(scene.body(b).unwrap().get_angular_velocity(), 0.0, epsilon = 1e-4);

    // The wheel spins about its own center, which is the anchor
    assert!((position(&scene, b) - Vector2::new(1.0, 0.0)).length() < 1e-3);

    let joint = scene.physics_world().joint(handle).unwrap();
    let pin = joint.as_any().downcast_ref::<PinJoint>().unwrap();
    assert_relative_eq!(pin.relative_angle(&scene).unwrap(), rotation);
}

#[test]
fn test_pin_joint_motor_and_friction() {
    let (mut scene, a, b) = spinning_pin(0.0);
    let mut joint = PinJoint::new(&scene, a, b, Vector2::new(1.0, 0.0)).unwrap();
    joint.set_rotation_speed(2.0);
    let handle = scene.physics_world_mut().add_joint(Box::new(joint));

    run(&mut scene, 1);
    assert_relative_eq!(scene.body(b).unwrap().get_angular_velocity(), 2.0, epsilon = 1e-5);

    // Switch the motor off and let friction stop the wheel
    {
        let joint = scene.physics_world_mut().joint_mut(handle).unwrap();
        let pin = joint.as_any_mut().downcast_mut::<PinJoint>().unwrap();
        pin.set_rotation_speed(0.0);
        pin.set_friction_torque(1.0);
        assert_eq!(pin.get_friction_torque(), 1.0);
    }
    run(&mut scene, 60);
    assert_relative_eq!(scene.body(b).unwrap().get_angular_velocity(), 0.0, epsilon = 1e-4);
}

#[test]
fn test_limit_joint_caps_distance() {
    let mut scene = Scene::new();
    scene.physics_world_mut().set_gravity(Vector2::ZERO);
    let a = scene.add_node(Node::new().with_body(pinned_circle(0.2)));
    let mut runaway = PhysicsBody::circle(0.2);
    runaway.set_velocity(Vector2::new(10.0, 0.0));
    let b = scene.add_node(Node::at(Vector2::new(1.0, 0.0)).with_body(runaway));

    let joint = LimitJoint::new(&scene, a, b, Vector2::ZERO, Vector2::new(1.0, 0.0)).unwrap();
    assert_relative_eq!(joint.get_max_length(), 1.0);
    scene.physics_world_mut().add_joint(Box::new(joint));

    run(&mut scene, 30);

    assert!(position(&scene, b).length() < 1.05);
    // The outward velocity was removed
    assert!(scene.body(b).unwrap().get_velocity().x <= 1e-4);
}

#[test]
fn test_limit_joint_allows_slack() {
    let mut scene = Scene::new();
    scene.physics_world_mut().set_gravity(Vector2::ZERO);
    let a = scene.add_node(Node::new().with_body(pinned_circle(0.2)));
    let mut returning = PhysicsBody::circle(0.2);
    returning.set_velocity(Vector2::new(-2.0, 0.0));
    let b = scene.add_node(Node::at(Vector2::new(1.0, 0.0)).with_body(returning));
    let joint = LimitJoint::new(&scene, a, b, Vector2::ZERO, Vector2::new(1.0, 0.0)).unwrap();
    scene.physics_world_mut().add_joint(Box::new(joint));

    run(&mut scene, 10);

    assert!(position(&scene, b).x < 0.8);
    assert!(scene.body(b).unwrap().get_velocity().x < -1.5);
}

#[test]
fn test_spring_joint_pulls_toward_rest_length() {
    let mut scene = Scene::new();
    scene.physics_world_mut().set_gravity(Vector2::ZERO);
    let a = scene.add_node(Node::new().with_body(pinned_circle(0.2)));
    let b = scene.add_node(Node::at(Vector2::new(2.0, 0.0)).with_body(PhysicsBody::circle(0.2)));

    let spring = SpringJoint::new(&scene, a, b)
        .unwrap()
        .with_rest_length(1.0)
        .with_frequency(2.0)
        .with_damping(1.0);
    assert_relative_eq!(spring.get_rest_length(), 1.0);
    let handle = scene.physics_world_mut().add_joint(Box::new(spring));

    run(&mut scene, 1);
    assert!(scene.body(b).unwrap().get_velocity().x < 0.0);
    assert!(scene.physics_world().joint(handle).unwrap().reaction_force().x > 0.0);

    // Critically damped, it settles at the rest length
    run(&mut scene, 300);
    assert_relative_eq!(position(&scene, b).x, 1.0, epsilon = 0.05);
}

#[test]
fn test_spring_rest_length_defaults_to_distance() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::new().with_body(PhysicsBody::circle(0.2)));
    let b = scene.add_node(Node::at(Vector2::new(3.0, 4.0)).with_body(PhysicsBody::circle(0.2)));

    let spring = SpringJoint::new(&scene, a, b).unwrap();
    assert_relative_eq!(spring.get_rest_length(), 5.0);
    assert_relative_eq!(spring.get_frequency(), 1.0);
    assert_relative_eq!(spring.get_damping(), 0.1);
    assert_eq!(spring.joint_type(), JointType::Spring);
}

#[test]
fn test_sliding_joint_keeps_body_on_axis() {
    let mut scene = Scene::new();
    scene.physics_world_mut().set_gravity(Vector2::ZERO);
    let a = scene.add_node(Node::new().with_body(pinned_circle(0.2)));
    let mut slider = PhysicsBody::circle(0.2);
    slider.set_velocity(Vector2::new(3.0, 4.0));
    let b = scene.add_node(Node::at(Vector2::new(1.0, 0.0)).with_body(slider));

    let joint = SlidingJoint::new(&scene, a, b, Vector2::ZERO, Vector2::new(2.0, 0.0)).unwrap();
    let handle = scene.physics_world_mut().add_joint(Box::new(joint));

    run(&mut scene, 60);

    let slid = position(&scene, b);
    assert!(slid.y.abs() < 0.05, "slider left the axis: {}", slid);
    assert!(slid.x > 2.5);

    let joint = scene.physics_world().joint(handle).unwrap();
    let sliding = joint.as_any().downcast_ref::<SlidingJoint>().unwrap();
    assert_relative_eq!(sliding.translation(&scene).unwrap(), slid.x - 1.0, epsilon = 1e-4);
}

#[test]
fn test_sliding_joint_distance_limits() {
    let mut scene = Scene::new();
    scene.physics_world_mut().set_gravity(Vector2::ZERO);
    let a = scene.add_node(Node::new().with_body(pinned_circle(0.2)));
    let mut slider = PhysicsBody::circle(0.2);
    slider.set_velocity(Vector2::new(3.0, 0.0));
    let b = scene.add_node(Node::at(Vector2::new(1.0, 0.0)).with_body(slider));

    let joint = SlidingJoint::new(&scene, a, b, Vector2::ZERO, Vector2::new(1.0, 0.0))
        .unwrap()
        .with_distance_limits(-0.5, 0.5);
    assert_eq!(joint.get_distance_limits(), Some((-0.5, 0.5)));
    scene.physics_world_mut().add_joint(Box::new(joint));

    run(&mut scene, 60);

    assert!(position(&scene, b).x <= 1.55);
    assert!(position(&scene, b).x > 1.4);
    assert!(scene.body(b).unwrap().get_velocity().x.abs() < 1e-3);
}

#[test]
fn test_invalid_joints_are_rejected() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::new().with_body(PhysicsBody::circle(0.5)));
    let b = scene.add_node(Node::at(Vector2::new(1.0, 0.0)).with_body(PhysicsBody::circle(0.5)));
    let bare = scene.add_node(Node::new());

    assert!(matches!(FixedJoint::new(&scene, a, a), Err(PhysicsError::InvalidParameter(_))));
    assert_eq!(
        SpringJoint::new(&scene, a, bare).unwrap_err(),
        PhysicsError::MissingBody(bare)
    );
    assert!(matches!(
        SlidingJoint::new(&scene, a, b, Vector2::ZERO, Vector2::ZERO),
        Err(PhysicsError::InvalidParameter(_))
    ));
}

#[test]
fn test_joints_removed_with_their_bodies() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::new().with_body(PhysicsBody::circle(0.5)));
    let b = scene.add_node(Node::at(Vector2::new(1.0, 0.0)).with_body(PhysicsBody::circle(0.5)));
    let c = scene.add_node(Node::at(Vector2::new(2.0, 0.0)).with_body(PhysicsBody::circle(0.5)));

    let world_joints: Vec<Box<dyn Joint>> = vec![
        Box::new(FixedJoint::new(&scene, a, b).unwrap()),
        Box::new(SpringJoint::new(&scene, b, c).unwrap()),
        Box::new(LimitJoint::new(&scene, a, c, Vector2::ZERO, Vector2::new(2.0, 0.0)).unwrap()),
    ];
    let handles: Vec<_> = world_joints
        .into_iter()
        .map(|joint| scene.physics_world_mut().add_joint(joint))
        .collect();
    assert_eq!(scene.physics_world().joint_count(), 3);
    assert_eq!(scene.physics_world().joint_handles(), handles);

    // Removing b drops the two joints that reference it
    scene.remove_node(b).unwrap();
    assert_eq!(scene.physics_world().joint_count(), 1);
    assert_eq!(scene.physics_world().joint(handles[2]).unwrap().joint_type(), JointType::Limit);
    assert_eq!(
        scene.physics_world().joint(handles[0]).unwrap_err(),
        PhysicsError::JointNotFound(handles[0])
    );

    // Detaching a body does the same
    scene.detach_body(c).unwrap();
    assert_eq!(scene.physics_world().joint_count(), 0);

    assert!(scene.physics_world_mut().remove_joint(handles[2]).is_err());
}

#[test]
fn test_remove_joint_by_handle() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::new().with_body(PhysicsBody::circle(0.5)));
    let b = scene.add_node(Node::at(Vector2::new(1.0, 0.0)).with_body(PhysicsBody::circle(0.5)));
    let joint = PinJoint::new(&scene, a, b, Vector2::new(0.5, 0.0)).unwrap();
    let handle = scene.physics_world_mut().add_joint(Box::new(joint));

    let removed = scene.physics_world_mut().remove_joint(handle).unwrap();
    assert_eq!(removed.joint_type(), JointType::Pin);
    assert_eq!(removed.bodies(), [a, b]);
    assert!(removed.involves_body(b));
    assert_eq!(scene.physics_world().joint_count(), 0);
}
