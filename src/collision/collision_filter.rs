use crate::bodies::PhysicsBody;

/// A filter for determining which body pairs the broad phase keeps
pub trait CollisionFilter {
    /// Returns whether the two bodies should physically collide
    fn should_collide(&self, body_a: &PhysicsBody, body_b: &PhysicsBody) -> bool;

    /// Returns whether contacts between the two bodies should be reported
    fn should_report(&self, body_a: &PhysicsBody, body_b: &PhysicsBody) -> bool;

    /// Returns whether the pair needs a narrow-phase test at all
    fn should_test(&self, body_a: &PhysicsBody, body_b: &PhysicsBody) -> bool {
        self.should_collide(body_a, body_b) || self.should_report(body_a, body_b)
    }
}

/// The category/collision/contact-test bit mask filter. A test passes when
/// it passes in either direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitMaskFilter;

impl BitMaskFilter {
    /// Creates a new bit mask filter
    pub fn new() -> Self {
        Self
    }
}

impl CollisionFilter for BitMaskFilter {
    fn should_collide(&self, body_a: &PhysicsBody, body_b: &PhysicsBody) -> bool {
        body_a.get_collision_bit_mask() & body_b.get_category_bit_mask() != 0
            || body_b.get_collision_bit_mask() & body_a.get_category_bit_mask() != 0
    }

    fn should_report(&self, body_a: &PhysicsBody, body_b: &PhysicsBody) -> bool {
        body_a.get_contact_test_bit_mask() & body_b.get_category_bit_mask() != 0
            || body_b.get_contact_test_bit_mask() & body_a.get_category_bit_mask() != 0
    }
}
