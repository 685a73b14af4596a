use std::any::Any;

use crate::core::NodeHandle;
use crate::joints::joint::{connect, distribute_correction, gather};
use crate::joints::{Joint, JointType};
use crate::math::{Vector2, EPSILON};
use crate::scene::Scene;
use crate::Result;

use tracing::debug;

/// A rope: the anchors may come closer freely but never exceed `max_length`
#[derive(Debug, Clone)]
pub struct LimitJoint {
    body_a: NodeHandle,
    body_b: NodeHandle,

    /// Anchor in body A's local space
    local_anchor_a: Vector2,

    /// Anchor in body B's local space
    local_anchor_b: Vector2,

    /// Maximum anchor distance
    max_length: f32,

    reaction_force: Vector2,
}

impl LimitJoint {
    /// Ties scene-space `anchor_a` on `body_a` to `anchor_b` on `body_b`.
    /// The maximum length starts as the current anchor distance.
    pub fn new(
        scene: &Scene,
        body_a: NodeHandle,
        body_b: NodeHandle,
        anchor_a: Vector2,
        anchor_b: Vector2,
    ) -> Result<Self> {
        let (transform_a, transform_b) = connect(scene, body_a, body_b)?;
        let max_length = anchor_a.distance(&anchor_b);
        debug!(a = body_a.index(), b = body_b.index(), max_length, "limit joint created");

        Ok(Self {
            body_a,
            body_b,
            local_anchor_a: transform_a.inverse_transform_point(anchor_a),
            local_anchor_b: transform_b.inverse_transform_point(anchor_b),
            max_length,
            reaction_force: Vector2::ZERO,
        })
    }

    /// Sets the maximum length
    pub fn with_max_length(mut self, max_length: f32) -> Self {
        self.set_max_length(max_length);
        self
    }

    /// Gets the maximum length
    pub fn get_max_length(&self) -> f32 {
        self.max_length
    }

    /// Sets the maximum length (clamped to >= 0)
    pub fn set_max_length(&mut self, max_length: f32) {
        self.max_length = max_length.max(0.0);
    }
}

impl Joint for LimitJoint {
    fn joint_type(&self) -> JointType {
        JointType::Limit
    }

    fn bodies(&self) -> [NodeHandle; 2] {
        [self.body_a, self.body_b]
    }

    fn solve(&mut self, scene: &mut Scene, dt: f32, correction_factor: f32) {
        let Some((a, b)) = gather(scene, self.bodies()) else {
            return;
        };

        let delta = b.transform.transform_point(self.local_anchor_b)
            - a.transform.transform_point(self.local_anchor_a);
        let length = delta.length();
        if length <= self.max_length || length < EPSILON {
            return;
        }
        let normal = delta / length;

        let correction = normal * ((length - self.max_length) * correction_factor);
        distribute_correction(scene, &a, &b, correction);
        self.reaction_force = correction / dt;

        // Remove any velocity still pulling the anchors apart
        let separating_speed = (b.velocity - a.velocity).dot(&normal);
        let inverse_mass_sum = a.inverse_mass + b.inverse_mass;
        if separating_speed > 0.0 && inverse_mass_sum > 0.0 {
            let removed = normal * separating_speed;
            scene.set_body_velocity(
                a.handle,
                a.velocity + removed * (a.inverse_mass / inverse_mass_sum),
                a.angular_velocity,
            );
            scene.set_body_velocity(
                b.handle,
                b.velocity - removed * (b.inverse_mass / inverse_mass_sum),
                b.angular_velocity,
            );
        }
    }

    fn reaction_force(&self) -> Vector2 {
        self.reaction_force
    }

    fn reaction_torque(&self) -> f32 {
        0.0
    }

    fn reset_reaction(&mut self) {
        self.reaction_force = Vector2::ZERO;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
