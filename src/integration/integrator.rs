use crate::bodies::PhysicsBody;
use crate::math::Transform;

/// Trait for numerical integration algorithms
pub trait Integrator {
    /// Advances a body and its scene-space transform over a time step
    fn integrate(&mut self, body: &mut PhysicsBody, transform: &mut Transform, dt: f32);

    /// Returns the name of the integrator
    fn name(&self) -> &str;
}
