use crate::core::NodeHandle;
use crate::math::{Transform, Vector2};
use crate::scene::Scene;

/// A copy of the per-body quantities the solvers read, gathered before any
/// mutation so two bodies can be corrected without aliasing borrows.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BodyState {
    pub handle: NodeHandle,
    pub transform: Transform,
    pub velocity: Vector2,
    pub angular_velocity: f32,
    pub mass: f32,
    pub inverse_mass: f32,
    pub inverse_inertia: f32,
    pub restitution: f32,
    pub friction: f32,
    pub allows_rotation: bool,
}

impl BodyState {
    /// Whether the solvers may move this body at all
    pub fn is_movable(&self) -> bool {
        self.inverse_mass > 0.0
    }
}

impl Scene {
    /// Snapshots a body, or `None` if the node or its body is gone. Bodies
    /// the simulation does not move are reported at rest.
    pub(crate) fn body_state(&self, handle: NodeHandle) -> Option<BodyState> {
        let body = self.body(handle).ok()?;
        let transform = self.world_transform(handle).ok()?;
        let (velocity, angular_velocity) = if body.is_simulated() {
            (body.get_velocity(), body.get_angular_velocity())
        } else {
            (Vector2::ZERO, 0.0)
        };
        Some(BodyState {
            handle,
            transform,
            velocity,
            angular_velocity,
            mass: body.get_mass(),
            inverse_mass: body.get_inverse_mass(),
            inverse_inertia: body.get_inverse_inertia(),
            restitution: body.get_restitution(),
            friction: body.get_friction(),
            allows_rotation: body.allows_rotation(),
        })
    }

    /// Moves a body's node by a world-space offset and turns it by
    /// `rotation`. Immovable bodies are left untouched.
    pub(crate) fn nudge_body(&mut self, handle: NodeHandle, offset: Vector2, rotation: f32) {
        let Some(state) = self.body_state(handle) else {
            return;
        };
        if !state.is_movable() {
            return;
        }
        let mut transform = state.transform;
        transform.position += offset;
        if state.allows_rotation {
            transform.rotation += rotation;
        }
        // The node was just read, so this cannot miss
        let _ = self.set_world_transform(handle, transform);
    }

    /// Overwrites a body's velocities. Immovable bodies are left untouched,
    /// and the angular part is ignored for bodies that cannot turn.
    pub(crate) fn set_body_velocity(&mut self, handle: NodeHandle, velocity: Vector2, angular_velocity: f32) {
        let Ok(body) = self.body_mut(handle) else {
            return;
        };
        if body.get_inverse_mass() == 0.0 {
            return;
        }
        body.set_velocity(velocity);
        if body.allows_rotation() {
            body.set_angular_velocity(angular_velocity);
        }
    }
}
