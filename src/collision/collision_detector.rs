use crate::collision::{
    broad_phase::{BodyProxy, BroadPhase, BruteForceBroadPhase},
    collision_filter::{BitMaskFilter, CollisionFilter},
    narrow_phase, Contact,
};

use tracing::trace;

/// Runs the broad phase, then the narrow phase, producing this step's contacts
pub struct CollisionDetector {
    /// The broad-phase algorithm to use
    broad_phase: Box<dyn BroadPhase>,

    /// The collision filter to use
    filter: Box<dyn CollisionFilter>,
}

impl Default for CollisionDetector {
    fn default() -> Self {
        Self::new(Box::new(BruteForceBroadPhase::new()), Box::new(BitMaskFilter::new()))
    }
}

impl CollisionDetector {
    /// Creates a new collision detector
    pub fn new(broad_phase: Box<dyn BroadPhase>, filter: Box<dyn CollisionFilter>) -> Self {
        Self { broad_phase, filter }
    }

    /// Replaces the broad-phase algorithm
    pub fn set_broad_phase(&mut self, broad_phase: Box<dyn BroadPhase>) {
        self.broad_phase = broad_phase;
    }

    /// Replaces the collision filter
    pub fn set_filter(&mut self, filter: Box<dyn CollisionFilter>) {
        self.filter = filter;
    }

    /// Returns the collision filter in use
    pub fn filter(&self) -> &dyn CollisionFilter {
        self.filter.as_ref()
    }

    /// Detects every contact between the given bodies. At most one contact
    /// is produced per pair, ordered by pair.
    pub fn detect(&mut self, proxies: &[BodyProxy<'_>]) -> Vec<Contact> {
        let pairs = self.broad_phase.find_pairs(proxies, self.filter.as_ref());
        trace!(candidates = pairs.len(), "broad phase done");

        pairs
            .into_iter()
            .filter_map(|(i, j)| {
                let a = &proxies[i];
                let b = &proxies[j];
                let hit = narrow_phase::collide(&a.geometry, &b.geometry)?;
                let collides = self.filter.should_collide(a.body, b.body);
                Some(Contact {
                    body_a: a.handle,
                    body_b: b.handle,
                    point: hit.point,
                    normal: hit.normal,
                    collision_impulse: if collides { 1.0 } else { 0.0 },
                    penetration: hit.depth.max(0.0),
                })
            })
            .collect()
    }
}
