use crate::math::Vector2;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A rigid 2D transformation: a translation and a counter-clockwise rotation in radians
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Transform {
    /// Position in 2D space
    pub position: Vector2,

    /// Rotation in radians
    pub rotation: f32,
}

impl Transform {
    /// Creates a new transform with the given position and rotation
    #[inline]
    pub fn new(position: Vector2, rotation: f32) -> Self {
        Self { position, rotation }
    }

    /// Creates a new identity transform
    #[inline]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Creates a new transform from just a position
    #[inline]
    pub fn from_position(position: Vector2) -> Self {
        Self { position, rotation: 0.0 }
    }

    /// Transforms a point from local space to the space this transform lives in
    #[inline]
    pub fn transform_point(&self, point: Vector2) -> Vector2 {
        self.position + point.rotated(self.rotation)
    }

    /// Rotates a direction from local space (no translation)
    #[inline]
    pub fn transform_vector(&self, vector: Vector2) -> Vector2 {
        vector.rotated(self.rotation)
    }

    /// Transforms a point from the outer space into this transform's local space
    #[inline]
    pub fn inverse_transform_point(&self, point: Vector2) -> Vector2 {
        (point - self.position).rotated(-self.rotation)
    }

    /// Rotates a direction from the outer space into local space
    #[inline]
    pub fn inverse_transform_vector(&self, vector: Vector2) -> Vector2 {
        vector.rotated(-self.rotation)
    }

    /// Returns `self * child`: the child transform expressed in this transform's outer space
    #[inline]
    pub fn compose(&self, child: &Transform) -> Transform {
        Transform {
            position: self.transform_point(child.position),
            rotation: self.rotation + child.rotation,
        }
    }

    /// Expresses `world` (given in the outer space) relative to this transform
    #[inline]
    pub fn relative_to(&self, world: &Transform) -> Transform {
        Transform {
            position: self.inverse_transform_point(world.position),
            rotation: world.rotation - self.rotation,
        }
    }
}
