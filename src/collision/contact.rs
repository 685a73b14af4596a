use crate::collision::ContactPair;
use crate::core::NodeHandle;
use crate::math::Vector2;

/// A snapshot of two bodies touching during one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// The first body
    pub body_a: NodeHandle,

    /// The second body
    pub body_b: NodeHandle,

    /// The contact point in scene space
    pub point: Vector2,

    /// Unit contact normal, pointing from body B toward body A
    pub normal: Vector2,

    /// 1.0 when the pair physically collides, 0.0 when the contact is only
    /// reported to the delegate
    pub collision_impulse: f32,

    /// Penetration depth measured when the contact was detected
    pub penetration: f32,
}

impl Contact {
    /// Returns the unordered pair this contact belongs to
    pub fn pair(&self) -> ContactPair {
        ContactPair::new(self.body_a, self.body_b)
    }

    /// Whether the contact takes part in collision resolution
    pub fn is_resolvable(&self) -> bool {
        self.collision_impulse != 0.0
    }

    /// Checks if the contact involves the specified body
    pub fn involves(&self, body: NodeHandle) -> bool {
        self.body_a == body || self.body_b == body
    }
}
