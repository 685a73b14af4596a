//! Deterministic value noise for the noise and turbulence fields.

use crate::math::{lerp, smoothstep, Vector2};

/// Offset between the x and y noise channels, so the two force components
/// are uncorrelated
const CHANNEL_OFFSET: Vector2 = Vector2::new(31.416, 47.853);

/// Hashes an integer lattice point into [-1, 1]
fn lattice(x: i32, y: i32) -> f32 {
    let mut h = (x as u32).wrapping_mul(0x8da6_b343) ^ (y as u32).wrapping_mul(0xd816_3841);
    h = (h ^ (h >> 13)).wrapping_mul(0x5bd1_e995);
    h ^= h >> 15;
    (h as f32 / u32::MAX as f32) * 2.0 - 1.0
}

/// Smoothly interpolated 2D value noise in [-1, 1]
pub fn value_noise(x: f32, y: f32) -> f32 {
    let cell_x = x.floor();
    let cell_y = y.floor();
    let tx = smoothstep(x - cell_x);
    let ty = smoothstep(y - cell_y);
    let ix = cell_x as i32;
    let iy = cell_y as i32;

    let bottom = lerp(lattice(ix, iy), lattice(ix.wrapping_add(1), iy), tx);
    let top = lerp(
        lattice(ix, iy.wrapping_add(1)),
        lattice(ix.wrapping_add(1), iy.wrapping_add(1)),
        tx,
    );
    lerp(bottom, top, ty)
}

/// A noise vector with each component in [-1, 1], sampled at
/// `position * frequency` and shifted by `time`
pub fn noise_vector(position: Vector2, frequency: f32, time: f32) -> Vector2 {
    let p = position * frequency + Vector2::new(time, time);
    let q = p + CHANNEL_OFFSET;
    Vector2::new(value_noise(p.x, p.y), value_noise(q.x, q.y))
}

/// Maps a smoothness in [0, 1] to a sampling frequency; smoother fields
/// vary more slowly across space
pub fn frequency_for_smoothness(smoothness: f32) -> f32 {
    0.1 + (1.0 - smoothness.clamp(0.0, 1.0)) * 0.9
}
