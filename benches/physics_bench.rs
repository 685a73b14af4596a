//! Benchmarks for whole simulation steps.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use scene_physics2d::collision::{BruteForceBroadPhase, SweepAndPruneBroadPhase};
use scene_physics2d::joints::PinJoint;
use scene_physics2d::{ForceField, Node, PhysicsBody, PhysicsEngine, Scene, Vector2};

const DT: f32 = 1.0 / 60.0;

/// A box of static walls filled with randomly placed balls and boxes
fn pile_scene(count: usize) -> Scene {
    let mut rng = StdRng::seed_from_u64(7);
    let mut scene = Scene::new();

    let mut floor = PhysicsBody::rectangle(Vector2::new(60.0, 1.0));
    floor.set_dynamic(false);
    scene.add_node(Node::at(Vector2::new(0.0, -0.5)).with_body(floor));
    for x in [-30.0, 30.0] {
        let mut wall = PhysicsBody::rectangle(Vector2::new(1.0, 60.0));
        wall.set_dynamic(false);
        scene.add_node(Node::at(Vector2::new(x, 30.0)).with_body(wall));
    }

    for i in 0..count {
        let position = Vector2::new(rng.gen_range(-28.0..28.0), rng.gen_range(1.0..50.0));
        let body = if i % 2 == 0 {
            PhysicsBody::circle(rng.gen_range(0.2..0.6))
        } else {
            PhysicsBody::rectangle(Vector2::new(rng.gen_range(0.3..1.0), rng.gen_range(0.3..1.0)))
        };
        scene.add_node(Node::at(position).with_body(body));
    }
    scene
}

fn bench_pile(c: &mut Criterion) {
    let mut group = c.benchmark_group("pile_step");
    for count in [50, 200, 500] {
        group.bench_with_input(BenchmarkId::new("sweep_and_prune", count), &count, |b, &count| {
            let mut scene = pile_scene(count);
            let mut engine = PhysicsEngine::new();
            engine
                .collision_detector_mut()
                .set_broad_phase(Box::new(SweepAndPruneBroadPhase::new()));
            b.iter(|| engine.simulate(black_box(&mut scene), DT));
        });
        group.bench_with_input(BenchmarkId::new("brute_force", count), &count, |b, &count| {
            let mut scene = pile_scene(count);
            let mut engine = PhysicsEngine::new();
            engine
                .collision_detector_mut()
                .set_broad_phase(Box::new(BruteForceBroadPhase::new()));
            b.iter(|| engine.simulate(black_box(&mut scene), DT));
        });
    }
    group.finish();
}

fn bench_fields(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(11);
    let mut scene = Scene::new();
    scene.physics_world_mut().set_gravity(Vector2::ZERO);
    scene.add_node(Node::new().with_field(ForceField::radial_gravity(5.0).with_falloff(2.0).with_minimum_radius(1.0)));
    scene.add_node(Node::new().with_field(ForceField::turbulence(0.5, 1.0)));
    scene.add_node(Node::new().with_field(ForceField::vortex(1.0)));
    for _ in 0..300 {
        let position = Vector2::new(rng.gen_range(-40.0..40.0), rng.gen_range(-40.0..40.0));
        let mut body = PhysicsBody::circle(0.1);
        body.set_collision_bit_mask(0);
        scene.add_node(Node::at(position).with_body(body));
    }

    let mut engine = PhysicsEngine::new();
    c.bench_function("fields_300_bodies", |b| {
        b.iter(|| engine.simulate(black_box(&mut scene), DT));
    });
}

fn bench_chain(c: &mut Criterion) {
    let mut scene = Scene::new();
    let mut anchor = PhysicsBody::circle(0.1);
    anchor.set_pinned(true);
    let mut previous = scene.add_node(Node::new().with_body(anchor));

    for i in 1..=30 {
        let position = Vector2::new(i as f32 * 0.5, 0.0);
        let mut link = PhysicsBody::circle(0.1);
        link.set_collision_bit_mask(0);
        let next = scene.add_node(Node::at(position).with_body(link));
        if let Ok(joint) = PinJoint::new(&scene, previous, next, position - Vector2::new(0.25, 0.0)) {
            scene.physics_world_mut().add_joint(Box::new(joint));
        }
        previous = next;
    }

    let mut engine = PhysicsEngine::new();
    c.bench_function("pin_chain_30", |b| {
        b.iter(|| engine.simulate(black_box(&mut scene), DT));
    });
}

criterion_group!(benches, bench_pile, bench_fields, bench_chain);
criterion_main!(benches);
