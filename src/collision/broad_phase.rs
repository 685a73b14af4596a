use crate::bodies::PhysicsBody;
use crate::collision::CollisionFilter;
use crate::core::NodeHandle;
use crate::math::{Aabb, Transform};
use crate::shapes::ShapeGeometry;

/// A body as seen by collision detection for one step
#[derive(Debug, Clone, Copy)]
pub struct BodyProxy<'a> {
    /// The node carrying the body
    pub handle: NodeHandle,

    /// The body itself
    pub body: &'a PhysicsBody,

    /// The body's shape in scene space
    pub geometry: ShapeGeometry,

    /// The body's bounding box in scene space
    pub aabb: Aabb,
}

impl<'a> BodyProxy<'a> {
    /// Builds a proxy for a body whose node sits at `transform`
    pub fn new(handle: NodeHandle, body: &'a PhysicsBody, transform: &Transform) -> Self {
        let shape = body.get_shape();
        Self {
            handle,
            body,
            geometry: shape.geometry(transform),
            aabb: shape.world_aabb(transform),
        }
    }
}

/// Trait for broad-phase collision detection algorithms
pub trait BroadPhase {
    /// Returns index pairs `(i, j)` with `i < j` into `proxies` that the
    /// narrow phase should test, in ascending order
    fn find_pairs(&mut self, proxies: &[BodyProxy<'_>], filter: &dyn CollisionFilter) -> Vec<(usize, usize)>;
}

/// Tests every unordered pair of bodies
#[derive(Debug, Default)]
pub struct BruteForceBroadPhase;

impl BruteForceBroadPhase {
    /// Creates a new brute-force broad phase
    pub fn new() -> Self {
        Self
    }
}

impl BroadPhase for BruteForceBroadPhase {
    fn find_pairs(&mut self, proxies: &[BodyProxy<'_>], filter: &dyn CollisionFilter) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();

        for i in 0..proxies.len() {
            let a = &proxies[i];

            for (offset, b) in proxies[i + 1..].iter().enumerate() {
                // Two static bodies never interact
                if !a.body.is_dynamic() && !b.body.is_dynamic() {
                    continue;
                }

                if !filter.should_test(a.body, b.body) {
                    continue;
                }

                if a.aabb.intersects(&b.aabb) {
                    pairs.push((i, i + 1 + offset));
                }
            }
        }

        pairs
    }
}

/// Sorts bodies along x and only tests bodies whose x ranges overlap.
/// Produces the same pairs as [`BruteForceBroadPhase`].
#[derive(Debug, Default)]
pub struct SweepAndPruneBroadPhase {
    order: Vec<usize>,
}

impl SweepAndPruneBroadPhase {
    /// Creates a new sweep-and-prune broad phase
    pub fn new() -> Self {
        Self::default()
    }
}

impl BroadPhase for SweepAndPruneBroadPhase {
    fn find_pairs(&mut self, proxies: &[BodyProxy<'_>], filter: &dyn CollisionFilter) -> Vec<(usize, usize)> {
        self.order.clear();
        self.order.extend(0..proxies.len());
        self.order
            .sort_by(|&i, &j| proxies[i].aabb.min.x.total_cmp(&proxies[j].aabb.min.x).then(i.cmp(&j)));

        let mut pairs = Vec::new();
        for (position, &i) in self.order.iter().enumerate() {
            let a = &proxies[i];
            for &j in &self.order[position + 1..] {
                let b = &proxies[j];
                if b.aabb.min.x > a.aabb.max.x {
                    break;
                }
                if !a.body.is_dynamic() && !b.body.is_dynamic() {
                    continue;
                }
                if !filter.should_test(a.body, b.body) {
                    continue;
                }
                if a.aabb.intersects(&b.aabb) {
                    pairs.push((i.min(j), i.max(j)));
                }
            }
        }

        pairs.sort_unstable();
        pairs
    }
}
