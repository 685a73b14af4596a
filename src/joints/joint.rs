use std::any::Any;
use std::fmt;

use crate::core::NodeHandle;
use crate::error::PhysicsError;
use crate::math::{Transform, Vector2};
use crate::scene::{BodyState, Scene};
use crate::Result;

use tracing::warn;

/// The kinds of joint the world can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointType {
    Pin,
    Spring,
    Fixed,
    Sliding,
    Limit,
}

impl fmt::Display for JointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JointType::Pin => "pin",
            JointType::Spring => "spring",
            JointType::Fixed => "fixed",
            JointType::Sliding => "sliding",
            JointType::Limit => "limit",
        };
        f.write_str(name)
    }
}

/// Base trait for two-body joints
pub trait Joint: fmt::Debug + 'static {
    /// Returns the kind of joint
    fn joint_type(&self) -> JointType;

    /// Returns the two bodies the joint connects
    fn bodies(&self) -> [NodeHandle; 2];

    /// Checks if the joint involves a specific body
    fn involves_body(&self, body: NodeHandle) -> bool {
        self.bodies().contains(&body)
    }

    /// Corrects positions and velocities for one step
    fn solve(&mut self, scene: &mut Scene, dt: f32, correction_factor: f32);

    /// The force the joint applied during the last step
    fn reaction_force(&self) -> Vector2;

    /// The torque the joint applied during the last step
    fn reaction_torque(&self) -> f32;

    /// Zeroes the recorded reaction force and torque
    fn reset_reaction(&mut self);

    /// Returns a dynamic reference to any for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Returns a dynamic mutable reference to any for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Reads both bodies' scene-space transforms when building a joint
pub(crate) fn connect(scene: &Scene, body_a: NodeHandle, body_b: NodeHandle) -> Result<(Transform, Transform)> {
    if body_a == body_b {
        warn!(body = body_a.index(), "joint connects a body to itself");
        return Err(PhysicsError::InvalidParameter(
            "a joint needs two distinct bodies".to_string(),
        ));
    }
    scene.body(body_a)?;
    scene.body(body_b)?;
    Ok((scene.world_transform(body_a)?, scene.world_transform(body_b)?))
}

/// Snapshots both bodies for a solve. `None` when either body is gone or
/// neither can move.
pub(crate) fn gather(scene: &Scene, bodies: [NodeHandle; 2]) -> Option<(BodyState, BodyState)> {
    let a = scene.body_state(bodies[0])?;
    let b = scene.body_state(bodies[1])?;
    if !a.is_movable() && !b.is_movable() {
        return None;
    }
    Some((a, b))
}

/// Splits a positional correction between two bodies by inverse mass:
/// A moves along `correction`, B against it
pub(crate) fn distribute_correction(scene: &mut Scene, a: &BodyState, b: &BodyState, correction: Vector2) {
    let inverse_mass_sum = a.inverse_mass + b.inverse_mass;
    if inverse_mass_sum <= 0.0 {
        return;
    }
    scene.nudge_body(a.handle, correction * (a.inverse_mass / inverse_mass_sum), 0.0);
    scene.nudge_body(b.handle, -correction * (b.inverse_mass / inverse_mass_sum), 0.0);
}

/// Splits a rotation correction between two bodies by inverse inertia:
/// A turns by `angle`, B by its opposite. Returns false when neither can turn.
pub(crate) fn distribute_rotation(scene: &mut Scene, a: &BodyState, b: &BodyState, angle: f32) -> bool {
    let inverse_inertia_sum = a.inverse_inertia + b.inverse_inertia;
    if inverse_inertia_sum <= 0.0 {
        return false;
    }
    scene.nudge_body(a.handle, Vector2::ZERO, angle * (a.inverse_inertia / inverse_inertia_sum));
    scene.nudge_body(b.handle, Vector2::ZERO, -angle * (b.inverse_inertia / inverse_inertia_sum));
    true
}
