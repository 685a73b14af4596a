mod vector;
mod transform;
mod aabb;

pub use vector::Vector2;
pub use transform::Transform;
pub use aabb::Aabb;

/// Tolerance for length and equality checks
pub const EPSILON: f32 = 1.0e-6;

/// `a` and `b` differ by at most `EPSILON`
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    approx::abs_diff_eq!(a, b, epsilon = EPSILON)
}

#[inline]
pub fn approx_zero(a: f32) -> bool {
    a.abs() < EPSILON
}

#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// `a` at `t = 0`, `b` at `t = 1`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite smoothstep on [0, 1]
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}
