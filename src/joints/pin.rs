use std::any::Any;

use nalgebra as na;

use crate::core::NodeHandle;
use crate::joints::joint::{connect, distribute_rotation, gather};
use crate::joints::{Joint, JointType};
use crate::math::Vector2;
use crate::scene::{BodyState, Scene};
use crate::Result;

use tracing::debug;

/// Pins two bodies together at a shared anchor they both rotate around
#[derive(Debug, Clone)]
pub struct PinJoint {
    body_a: NodeHandle,
    body_b: NodeHandle,

    /// The anchor in body A's local space
    local_anchor_a: Vector2,

    /// The anchor in body B's local space
    local_anchor_b: Vector2,

    /// Relative rotation (B minus A) when the joint was created
    reference_angle: f32,

    /// Whether the relative rotation is clamped to the limits below
    should_enable_limits: bool,

    /// Lowest relative rotation, measured from the reference angle
    lower_angle_limit: f32,

    /// Highest relative rotation, measured from the reference angle
    upper_angle_limit: f32,

    /// Maximum torque resisting relative rotation
    friction_torque: f32,

    /// Relative angular velocity the joint drives toward, when non-zero
    rotation_speed: f32,

    reaction_force: Vector2,
    reaction_torque: f32,
}

impl PinJoint {
    /// Pins `body_a` and `body_b` at the scene-space point `anchor`
    pub fn new(scene: &Scene, body_a: NodeHandle, body_b: NodeHandle, anchor: Vector2) -> Result<Self> {
        let (transform_a, transform_b) = connect(scene, body_a, body_b)?;
        debug!(a = body_a.index(), b = body_b.index(), "pin joint created");

        Ok(Self {
            body_a,
            body_b,
            local_anchor_a: transform_a.inverse_transform_point(anchor),
            local_anchor_b: transform_b.inverse_transform_point(anchor),
            reference_angle: transform_b.rotation - transform_a.rotation,
            should_enable_limits: false,
            lower_angle_limit: 0.0,
            upper_angle_limit: 0.0,
            friction_torque: 0.0,
            rotation_speed: 0.0,
            reaction_force: Vector2::ZERO,
            reaction_torque: 0.0,
        })
    }

    /// Enables angle limits
    pub fn with_angle_limits(mut self, lower: f32, upper: f32) -> Self {
        self.set_angle_limits(lower, upper);
        self
    }

    /// Sets and enables the angle limits; the bounds are reordered if swapped
    pub fn set_angle_limits(&mut self, lower: f32, upper: f32) {
        self.lower_angle_limit = lower.min(upper);
        self.upper_angle_limit = lower.max(upper);
        self.should_enable_limits = true;
    }

    /// Returns the angle limits, if enabled
    pub fn get_angle_limits(&self) -> Option<(f32, f32)> {
        self.should_enable_limits
            .then_some((self.lower_angle_limit, self.upper_angle_limit))
    }

    /// Turns the angle limits on or off
    pub fn set_limits_enabled(&mut self, enabled: bool) {
        self.should_enable_limits = enabled;
    }

    /// Gets the friction torque
    pub fn get_friction_torque(&self) -> f32 {
        self.friction_torque
    }

    /// Sets the friction torque (clamped to >= 0)
    pub fn set_friction_torque(&mut self, friction_torque: f32) {
        self.friction_torque = friction_torque.max(0.0);
    }

    /// Gets the motor speed
    pub fn get_rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    /// Sets the relative angular velocity the joint drives toward; zero disables the motor
    pub fn set_rotation_speed(&mut self, rotation_speed: f32) {
        self.rotation_speed = rotation_speed;
    }

    /// Returns the current relative rotation measured from the reference angle
    pub fn relative_angle(&self, scene: &Scene) -> Option<f32> {
        let a = scene.world_transform(self.body_a).ok()?;
        let b = scene.world_transform(self.body_b).ok()?;
        Some(b.rotation - a.rotation - self.reference_angle)
    }
}

impl Joint for PinJoint {
    fn joint_type(&self) -> JointType {
        JointType::Pin
    }

    fn bodies(&self) -> [NodeHandle; 2] {
        [self.body_a, self.body_b]
    }

    fn solve(&mut self, scene: &mut Scene, dt: f32, correction_factor: f32) {
        let Some((a, b)) = gather(scene, self.bodies()) else {
            return;
        };

        // Point constraint: both anchors must have the same velocity and position
        let arm_a = a.transform.transform_vector(self.local_anchor_a);
        let arm_b = b.transform.transform_vector(self.local_anchor_b);
        let Some(inverse_k) = effective_mass(&a, &b, arm_a, arm_b) else {
            return;
        };

        let anchor_velocity_a = a.velocity + cross_scalar(a.angular_velocity, arm_a);
        let anchor_velocity_b = b.velocity + cross_scalar(b.angular_velocity, arm_b);
        let impulse = -apply(&inverse_k, anchor_velocity_b - anchor_velocity_a);

        let mut velocity_a = a.velocity - impulse * a.inverse_mass;
        let mut angular_a = a.angular_velocity - a.inverse_inertia * arm_a.cross(&impulse);
        let mut velocity_b = b.velocity + impulse * b.inverse_mass;
        let mut angular_b = b.angular_velocity + b.inverse_inertia * arm_b.cross(&impulse);

        let error = (b.transform.position + arm_b) - (a.transform.position + arm_a);
        let correction = -apply(&inverse_k, error) * correction_factor;
        scene.nudge_body(a.handle, -correction * a.inverse_mass, -a.inverse_inertia * arm_a.cross(&correction));
        scene.nudge_body(b.handle, correction * b.inverse_mass, b.inverse_inertia * arm_b.cross(&correction));
        self.reaction_force = correction / dt;

        let inverse_inertia_sum = a.inverse_inertia + b.inverse_inertia;
        if inverse_inertia_sum > 0.0 {
            if self.should_enable_limits {
                let relative = b.transform.rotation - a.transform.rotation - self.reference_angle;
                let clamped = relative.clamp(self.lower_angle_limit, self.upper_angle_limit);
                let excess = relative - clamped;
                if excess != 0.0 {
                    let angle = excess * correction_factor;
                    if distribute_rotation(scene, &a, &b, angle) {
                        self.reaction_torque = angle / dt;
                    }
                    // Stop rotating further past the limit
                    let closing = angular_b - angular_a;
                    if closing * excess > 0.0 {
                        angular_a += closing * a.inverse_inertia / inverse_inertia_sum;
                        angular_b -= closing * b.inverse_inertia / inverse_inertia_sum;
                    }
                }
            }

            if self.rotation_speed != 0.0 {
                let shortfall = self.rotation_speed - (angular_b - angular_a);
                angular_a -= shortfall * a.inverse_inertia / inverse_inertia_sum;
                angular_b += shortfall * b.inverse_inertia / inverse_inertia_sum;
            } else if self.friction_torque > 0.0 {
                let limit = self.friction_torque * dt;
                let friction = (-(angular_b - angular_a) / inverse_inertia_sum).clamp(-limit, limit);
                angular_a -= friction * a.inverse_inertia;
                angular_b += friction * b.inverse_inertia;
                self.reaction_torque += friction / dt;
            }
        }

        if !a.is_movable() {
            velocity_a = a.velocity;
        }
        if !b.is_movable() {
            velocity_b = b.velocity;
        }
        scene.set_body_velocity(a.handle, velocity_a, angular_a);
        scene.set_body_velocity(b.handle, velocity_b, angular_b);
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

/// `w x r` for a scalar angular velocity `w`
fn cross_scalar(angular: f32, arm: Vector2) -> Vector2 {
    Vector2::new(-angular * arm.y, angular * arm.x)
}

fn apply(matrix: &na::Matrix2<f32>, vector: Vector2) -> Vector2 {
    Vector2::from_nalgebra(&(matrix * vector.to_nalgebra()))
}

/// Inverts the point-constraint mass matrix of two bodies with lever arms
/// `arm_a` and `arm_b`
fn effective_mass(a: &BodyState, b: &BodyState, arm_a: Vector2, arm_b: Vector2) -> Option<na::Matrix2<f32>> {
    let mass_sum = a.inverse_mass + b.inverse_mass;
    let k11 = mass_sum + a.inverse_inertia * arm_a.y * arm_a.y + b.inverse_inertia * arm_b.y * arm_b.y;
    let k12 = -a.inverse_inertia * arm_a.x * arm_a.y - b.inverse_inertia * arm_b.x * arm_b.y;
    let k22 = mass_sum + a.inverse_inertia * arm_a.x * arm_a.x + b.inverse_inertia * arm_b.x * arm_b.x;
    na::Matrix2::new(k11, k12, k12, k22).try_inverse()
}
