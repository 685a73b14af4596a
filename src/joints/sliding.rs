use std::any::Any;

use crate::core::NodeHandle;
use crate::error::PhysicsError;
use crate::joints::joint::{connect, distribute_correction, gather};
use crate::joints::{Joint, JointType};
use crate::math::Vector2;
use crate::scene::Scene;
use crate::Result;

use tracing::{debug, warn};

/// Lets body B slide relative to body A along one axis only
#[derive(Debug, Clone)]
pub struct SlidingJoint {
    body_a: NodeHandle,
    body_b: NodeHandle,

    /// The anchor in body A's local space
    local_anchor_a: Vector2,

    /// The anchor in body B's local space
    local_anchor_b: Vector2,

    /// Unit slide axis in body A's local space
    local_axis: Vector2,

    /// Whether the travel along the axis is limited
    should_enable_limits: bool,

    /// Lowest allowed travel from the anchor along the axis
    lower_distance_limit: f32,

    /// Highest allowed travel from the anchor along the axis
    upper_distance_limit: f32,

    reaction_force: Vector2,
}

impl SlidingJoint {
    /// Creates a sliding joint through the scene-space `anchor` along `axis`
    pub fn new(
        scene: &Scene,
        body_a: NodeHandle,
        body_b: NodeHandle,
        anchor: Vector2,
        axis: Vector2,
    ) -> Result<Self> {
        let (transform_a, transform_b) = connect(scene, body_a, body_b)?;
        let Some(axis) = axis.try_normalize() else {
            warn!("sliding joint axis has zero length");
            return Err(PhysicsError::InvalidParameter(
                "sliding joint axis must be non-zero".to_string(),
            ));
        };
        debug!(a = body_a.index(), b = body_b.index(), "sliding joint created");

        Ok(Self {
            body_a,
            body_b,
            local_anchor_a: transform_a.inverse_transform_point(anchor),
            local_anchor_b: transform_b.inverse_transform_point(anchor),
            local_axis: transform_a.inverse_transform_vector(axis),
            should_enable_limits: false,
            lower_distance_limit: 0.0,
            upper_distance_limit: 0.0,
            reaction_force: Vector2::ZERO,
        })
    }

    /// Enables distance limits along the axis
    pub fn with_distance_limits(mut self, lower: f32, upper: f32) -> Self {
        self.set_distance_limits(lower, upper);
        self
    }

    /// Sets and enables the distance limits; the bounds are reordered if swapped
    pub fn set_distance_limits(&mut self, lower: f32, upper: f32) {
        self.lower_distance_limit = lower.min(upper);
        self.upper_distance_limit = lower.max(upper);
        self.should_enable_limits = true;
    }

    /// Returns the distance limits, if enabled
    pub fn get_distance_limits(&self) -> Option<(f32, f32)> {
        self.should_enable_limits
            .then_some((self.lower_distance_limit, self.upper_distance_limit))
    }

    /// Turns the distance limits on or off
    pub fn set_limits_enabled(&mut self, enabled: bool) {
        self.should_enable_limits = enabled;
    }

    /// Returns the current travel of body B's anchor along the axis
    pub fn translation(&self, scene: &Scene) -> Option<f32> {
        let a = scene.world_transform(self.body_a).ok()?;
        let b = scene.world_transform(self.body_b).ok()?;
        let offset = b.transform_point(self.local_anchor_b) - a.transform_point(self.local_anchor_a);
        Some(offset.dot(&a.transform_vector(self.local_axis)))
    }
}

impl Joint for SlidingJoint {
    fn joint_type(&self) -> JointType {
        JointType::Sliding
    }

    fn bodies(&self) -> [NodeHandle; 2] {
        [self.body_a, self.body_b]
    }

    fn solve(&mut self, scene: &mut Scene, dt: f32, correction_factor: f32) {
        let Some((a, b)) = gather(scene, self.bodies()) else {
            return;
        };

        let axis = a.transform.transform_vector(self.local_axis);
        let normal = axis.perpendicular();
        let offset = b.transform.transform_point(self.local_anchor_b)
            - a.transform.transform_point(self.local_anchor_a);

        let travel = offset.dot(&axis);
        let overshoot = if !self.should_enable_limits {
            0.0
        } else if travel < self.lower_distance_limit {
            travel - self.lower_distance_limit
        } else if travel > self.upper_distance_limit {
            travel - self.upper_distance_limit
        } else {
            0.0
        };

        // Off-axis drift plus any travel past the limits
        let correction =
            normal * (offset.dot(&normal) * correction_factor) + axis * (overshoot * correction_factor);

        distribute_correction(scene, &a, &b, correction);
        self.reaction_force = correction / dt;

        // Off-axis velocity
        let inverse_mass_sum = a.inverse_mass + b.inverse_mass;
        if inverse_mass_sum <= 0.0 {
            return;
        }
        let relative_velocity = b.velocity - a.velocity;
        let mut cancelled = normal * (relative_velocity.dot(&normal) * correction_factor);

        // Stop travel further past a limit
        let axial_speed = relative_velocity.dot(&axis);
        if overshoot * axial_speed > 0.0 {
            cancelled += axis * axial_speed;
        }
        scene.set_body_velocity(
            a.handle,
            a.velocity + cancelled * (a.inverse_mass / inverse_mass_sum),
            a.angular_velocity,
        );
        scene.set_body_velocity(
            b.handle,
            b.velocity - cancelled * (b.inverse_mass / inverse_mass_sum),
            b.angular_velocity,
        );
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
