//! The force passes of a simulation step. Each pass reads the scene first
//! and only then writes velocity changes back.

use crate::core::NodeHandle;
use crate::forces::{FieldContext, FieldSample};
use crate::math::{Transform, Vector2};
use crate::scene::Scene;

/// Turns every body's accumulated force and torque into velocity and clears
/// the accumulators. Bodies that cannot move only get their accumulators cleared.
pub fn apply_accumulated_forces(scene: &mut Scene, bodies: &[NodeHandle], dt: f32) {
    for &handle in bodies {
        let Ok(body) = scene.body_mut(handle) else {
            continue;
        };
        let (force, torque) = body.take_accumulated();
        if !body.is_simulated() {
            continue;
        }

        let inverse_mass = body.get_inverse_mass();
        let velocity = body.get_velocity() + force * (inverse_mass * dt);
        body.set_velocity(velocity);

        if body.allows_rotation() {
            let angular_velocity = body.get_angular_velocity() + torque * body.get_inverse_inertia() * dt;
            body.set_angular_velocity(angular_velocity);
        }
    }
}

/// Applies uniform gravity to every simulated body that is affected by it
pub fn apply_gravity(scene: &mut Scene, bodies: &[NodeHandle], gravity: Vector2, dt: f32) {
    for &handle in bodies {
        let Ok(body) = scene.body_mut(handle) else {
            continue;
        };
        if body.is_simulated() && body.is_affected_by_gravity() {
            let velocity = body.get_velocity() + gravity * dt;
            body.set_velocity(velocity);
        }
    }
}

/// Sums the force of every field acting on each body and applies it as a
/// velocity change. If any exclusive field acts on a body, only exclusive
/// fields count for that body.
pub fn apply_field_forces(scene: &mut Scene, bodies: &[NodeHandle], fields: &[NodeHandle], context: &FieldContext) {
    if fields.is_empty() {
        return;
    }

    let field_transforms: Vec<(NodeHandle, Transform)> = fields
        .iter()
        .filter_map(|&handle| Some((handle, scene.world_transform(handle).ok()?)))
        .collect();

    let mut changes: Vec<(NodeHandle, Vector2)> = Vec::new();
    for &handle in bodies {
        let Ok(body) = scene.body(handle) else {
            continue;
        };
        if !body.is_simulated() || body.get_field_bit_mask() == 0 {
            continue;
        }
        let Ok(transform) = scene.world_transform(handle) else {
            continue;
        };

        let sample = FieldSample {
            position: transform.position,
            velocity: body.get_velocity(),
            mass: body.get_mass(),
            charge: body.get_charge(),
        };

        let mut shared = Vector2::ZERO;
        let mut exclusive = Vector2::ZERO;
        let mut has_exclusive = false;

        for (field_handle, field_transform) in &field_transforms {
            // A field never acts on the body sharing its node
            if *field_handle == handle {
                continue;
            }
            let Some(field) = scene.node(*field_handle).ok().and_then(|node| node.field()) else {
                continue;
            };
            if !field.affects(field_transform, body.get_field_bit_mask(), sample.position) {
                continue;
            }

            let force = field.force_on(field_transform.position, &sample, context);
            if field.is_exclusive() {
                exclusive += force;
                has_exclusive = true;
            } else {
                shared += force;
            }
        }

        let total = if has_exclusive { exclusive } else { shared };
        let delta = total * (body.get_inverse_mass() * context.dt);
        if delta != Vector2::ZERO {
            changes.push((handle, delta));
        }
    }

    for (handle, delta) in changes {
        if let Ok(body) = scene.body_mut(handle) {
            let velocity = body.get_velocity() + delta;
            body.set_velocity(velocity);
        }
    }
}
