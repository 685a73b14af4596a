use crate::bodies::PhysicsBody;
use crate::integration::Integrator;
use crate::math::Transform;

/// Symplectic Euler integrator (semi-implicit Euler): velocities were
/// already updated by the force passes, positions follow the new velocity
#[derive(Debug, Clone)]
pub struct SymplecticEulerIntegrator {
    /// Linear speed below which a body counts as resting
    resting_linear_threshold: f32,

    /// Angular speed below which a body counts as resting
    resting_angular_threshold: f32,
}

impl Default for SymplecticEulerIntegrator {
    fn default() -> Self {
        Self::new(0.01, 0.01)
    }
}

impl SymplecticEulerIntegrator {
    /// Creates a new Symplectic Euler integrator
    pub fn new(resting_linear_threshold: f32, resting_angular_threshold: f32) -> Self {
        Self {
            resting_linear_threshold,
            resting_angular_threshold,
        }
    }
}

impl Integrator for SymplecticEulerIntegrator {
    fn integrate(&mut self, body: &mut PhysicsBody, transform: &mut Transform, dt: f32) {
        if !body.is_simulated() {
            return;
        }

        let linear_retention = (1.0 - body.get_linear_damping() * dt).max(0.0);
        let velocity = body.get_velocity() * linear_retention;
        body.set_velocity(velocity);
        transform.position += velocity * dt;

        if body.allows_rotation() {
            let angular_retention = (1.0 - body.get_angular_damping() * dt).max(0.0);
            let angular_velocity = body.get_angular_velocity() * angular_retention;
            body.set_angular_velocity(angular_velocity);
            transform.rotation += angular_velocity * dt;
        }

        let resting = velocity.length() < self.resting_linear_threshold
            && body.get_angular_velocity().abs() < self.resting_angular_threshold;
        body.set_resting(resting);
    }

    fn name(&self) -> &str {
        "SymplecticEuler"
    }
}
