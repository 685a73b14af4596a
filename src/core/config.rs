#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Tuning parameters for the simulation step
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// Fraction of a positional error removed per step by joints and
    /// penetration correction (Baumgarte factor)
    pub correction_factor: f32,

    /// Linear speed below which a body is flagged as resting
    pub resting_linear_threshold: f32,

    /// Angular speed below which a body is flagged as resting
    pub resting_angular_threshold: f32,

    /// Gain of the velocity-match field, multiplied by the body's mass
    pub velocity_match_factor: f32,

    /// Per-unit-speed amplification of turbulence fields
    pub turbulence_speed_factor: f32,

    /// Whether contact resolution applies a tangential friction impulse
    pub enable_friction: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            correction_factor: 0.8,
            resting_linear_threshold: 0.01,
            resting_angular_threshold: 0.01,
            velocity_match_factor: 10.0,
            turbulence_speed_factor: 0.1,
            enable_friction: true,
        }
    }
}
