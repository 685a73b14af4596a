use std::any::Any;
use std::f32::consts::TAU;

use crate::core::NodeHandle;
use crate::joints::joint::{connect, gather};
use crate::joints::{Joint, JointType};
use crate::math::{Vector2, EPSILON};
use crate::scene::Scene;
use crate::Result;

use tracing::debug;

/// An elastic connection between two node positions
#[derive(Debug, Clone)]
pub struct SpringJoint {
    body_a: NodeHandle,
    body_b: NodeHandle,

    /// Length at which the spring exerts no force
    rest_length: f32,

    /// Oscillation frequency in hertz
    frequency: f32,

    /// Damping ratio (0 = none, 1 = critical)
    damping: f32,

    reaction_force: Vector2,
}

impl SpringJoint {
    /// Connects two bodies with a spring whose rest length is their current distance
    pub fn new(scene: &Scene, body_a: NodeHandle, body_b: NodeHandle) -> Result<Self> {
        let (transform_a, transform_b) = connect(scene, body_a, body_b)?;
        let rest_length = transform_a.position.distance(&transform_b.position);
        debug!(a = body_a.index(), b = body_b.index(), rest_length, "spring joint created");

        Ok(Self {
            body_a,
            body_b,
            rest_length,
            frequency: 1.0,
            damping: 0.1,
            reaction_force: Vector2::ZERO,
        })
    }

    /// Sets the frequency
    pub fn with_frequency(mut self, frequency: f32) -> Self {
        self.set_frequency(frequency);
        self
    }

    /// Sets the damping ratio
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.set_damping(damping);
        self
    }

    /// Sets the rest length
    pub fn with_rest_length(mut self, rest_length: f32) -> Self {
        self.set_rest_length(rest_length);
        self
    }

    /// Gets the rest length
    pub fn get_rest_length(&self) -> f32 {
        self.rest_length
    }

    /// Sets the rest length (clamped to >= 0)
    pub fn set_rest_length(&mut self, rest_length: f32) {
        self.rest_length = rest_length.max(0.0);
    }

    /// Gets the frequency
    pub fn get_frequency(&self) -> f32 {
        self.frequency
    }

    /// Sets the frequency (clamped to >= 0)
    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency.max(0.0);
    }

    /// Gets the damping ratio
    pub fn get_damping(&self) -> f32 {
        self.damping
    }

    /// Sets the damping ratio (clamped to >= 0)
    pub fn set_damping(&mut self, damping: f32) {
        self.damping = damping.max(0.0);
    }
}

impl Joint for SpringJoint {
    fn joint_type(&self) -> JointType {
        JointType::Spring
    }

    fn bodies(&self) -> [NodeHandle; 2] {
        [self.body_a, self.body_b]
    }

    fn solve(&mut self, scene: &mut Scene, dt: f32, _correction_factor: f32) {
        let Some((a, b)) = gather(scene, self.bodies()) else {
            return;
        };

        let delta = b.transform.position - a.transform.position;
        let length = delta.length();
        if length < EPSILON {
            return;
        }
        let axis = delta / length;

        // Harmonic mean of the masses, or the movable body's mass alone
        let effective_mass = match (a.is_movable(), b.is_movable()) {
            (true, true) if a.mass + b.mass > EPSILON => 2.0 * a.mass * b.mass / (a.mass + b.mass),
            (true, _) => a.mass,
            (_, true) => b.mass,
            _ => return,
        };

        let angular_frequency = TAU * self.frequency;
        let stiffness = angular_frequency * angular_frequency * effective_mass;
        let damping = 2.0 * self.damping * effective_mass * angular_frequency;

        let stretch = length - self.rest_length;
        let closing_speed = (b.velocity - a.velocity).dot(&axis);
        let tension = stiffness * stretch + damping * closing_speed;
        let force = axis * tension;

        scene.set_body_velocity(a.handle, a.velocity + force * (a.inverse_mass * dt), a.angular_velocity);
        scene.set_body_velocity(b.handle, b.velocity - force * (b.inverse_mass * dt), b.angular_velocity);
        self.reaction_force = force;
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
