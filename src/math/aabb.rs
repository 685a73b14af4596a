use crate::math::Vector2;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Axis-aligned box in scene space, the broad phase's view of a body
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Aabb {
    pub min: Vector2,
    pub max: Vector2,
}

impl Aabb {
    #[inline]
    pub fn new(min: Vector2, max: Vector2) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn from_center_half_extents(center: Vector2, half_extents: Vector2) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Smallest box holding every point, `None` for an empty slice
    pub fn from_points(points: &[Vector2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self::new(*first, *first), |bounds, point| {
            Self::new(bounds.min.min(point), bounds.max.max(point))
        }))
    }

    #[inline]
    pub fn center(&self) -> Vector2 {
        (self.min + self.max) * 0.5
    }

    /// Width and height
    #[inline]
    pub fn extents(&self) -> Vector2 {
        self.max - self.min
    }

    #[inline]
    pub fn area(&self) -> f32 {
        let size = self.extents();
        size.x * size.y
    }

    /// Points on the boundary are inside
    #[inline]
    pub fn contains_point(&self, point: Vector2) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }

    /// Inclusive test: boxes sharing only an edge or corner intersect
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Exclusive test: the boxes share a region of positive area
    #[inline]
    pub fn overlaps_strictly(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// The shared box, possibly degenerate when the boxes only touch
    #[inline]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        self.intersects(other)
            .then(|| Self::new(self.min.max(&other.min), self.max.min(&other.max)))
    }

    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(self.min.min(&other.min), self.max.max(&other.max))
    }

    /// Clamps `point` into the box
    #[inline]
    pub fn closest_point(&self, point: Vector2) -> Vector2 {
        Vector2::new(
            point.x.max(self.min.x).min(self.max.x),
            point.y.max(self.min.y).min(self.max.y),
        )
    }
}
