use crate::math::Vector2;

/// User code that computes a field force for one body.
///
/// Implemented for every `Fn(position, velocity, mass, charge, dt) -> force`
/// closure, so most callers never implement it by hand.
pub trait FieldEvaluator: Send + Sync {
    /// Returns the force to apply to a body at `position` moving at `velocity`
    fn evaluate(&self, position: Vector2, velocity: Vector2, mass: f32, charge: f32, dt: f32) -> Vector2;
}

impl<F> FieldEvaluator for F
where
    F: Fn(Vector2, Vector2, f32, f32, f32) -> Vector2 + Send + Sync,
{
    fn evaluate(&self, position: Vector2, velocity: Vector2, mass: f32, charge: f32, dt: f32) -> Vector2 {
        self(position, velocity, mass, charge, dt)
    }
}
