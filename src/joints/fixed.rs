use std::any::Any;

use crate::core::NodeHandle;
use crate::joints::joint::{connect, distribute_correction, distribute_rotation, gather};
use crate::joints::{Joint, JointType};
use crate::math::Vector2;
use crate::scene::Scene;
use crate::Result;

use tracing::debug;

/// Rigidly locks two bodies at the relative offset and rotation they had
/// when the joint was created
#[derive(Debug, Clone)]
pub struct FixedJoint {
    body_a: NodeHandle,
    body_b: NodeHandle,

    /// Body B's position in body A's local space
    local_offset: Vector2,

    /// Body B's rotation minus body A's rotation
    relative_rotation: f32,

    reaction_force: Vector2,
    reaction_torque: f32,
}

impl FixedJoint {
    /// Locks `body_b` to `body_a` in their current relative placement
    pub fn new(scene: &Scene, body_a: NodeHandle, body_b: NodeHandle) -> Result<Self> {
        let (transform_a, transform_b) = connect(scene, body_a, body_b)?;
        debug!(a = body_a.index(), b = body_b.index(), "fixed joint created");

        Ok(Self {
            body_a,
            body_b,
            local_offset: transform_a.inverse_transform_point(transform_b.position),
            relative_rotation: transform_b.rotation - transform_a.rotation,
            reaction_force: Vector2::ZERO,
            reaction_torque: 0.0,
        })
    }

    /// Returns body B's locked position in body A's local space
    pub fn get_local_offset(&self) -> Vector2 {
        self.local_offset
    }

    /// Returns the locked relative rotation
    pub fn get_relative_rotation(&self) -> f32 {
        self.relative_rotation
    }
}

impl Joint for FixedJoint {
    fn joint_type(&self) -> JointType {
        JointType::Fixed
    }

    fn bodies(&self) -> [NodeHandle; 2] {
        [self.body_a, self.body_b]
    }

    fn solve(&mut self, scene: &mut Scene, dt: f32, correction_factor: f32) {
        let Some((a, b)) = gather(scene, self.bodies()) else {
            return;
        };

        // Position: B belongs at A's transform applied to the locked offset
        let target = a.transform.transform_point(self.local_offset);
        let correction = (b.transform.position - target) * correction_factor;
        distribute_correction(scene, &a, &b, correction);
        self.reaction_force = correction / dt;

        // Rotation
        let rotation_error = b.transform.rotation - a.transform.rotation - self.relative_rotation;
        if rotation_error != 0.0 {
            let angle = rotation_error * correction_factor;
            if distribute_rotation(scene, &a, &b, angle) {
                self.reaction_torque = angle / dt;
            }
        }

        // Couple velocities; an immovable body imposes its own on the other
        let (velocity, angular_velocity) = match (a.is_movable(), b.is_movable()) {
            (true, true) => {
                let velocity = (a.velocity + b.velocity) * 0.5;
                let angular_velocity = if a.inverse_inertia > 0.0 && b.inverse_inertia > 0.0 {
                    Some((a.angular_velocity + b.angular_velocity) * 0.5)
                } else {
                    None
                };
                (velocity, angular_velocity)
            }
            (false, _) => (a.velocity, Some(a.angular_velocity)),
            (_, false) => (b.velocity, Some(b.angular_velocity)),
        };

        scene.set_body_velocity(a.handle, velocity, angular_velocity.unwrap_or(a.angular_velocity));
        scene.set_body_velocity(b.handle, velocity, angular_velocity.unwrap_or(b.angular_velocity));
    }

    fn reaction_force(&self) -> Vector2 {
        self.reaction_force
    }

    fn reaction_torque(&self) -> f32 {
        self.reaction_torque
    }

    fn reset_reaction(&mut self) {
        self.reaction_force = Vector2::ZERO;
        self.reaction_torque = 0.0;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
