use crate::math::{Aabb, Transform, Vector2, EPSILON};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// The collision outline of a physics body, in the body's local space
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum BodyShape {
    /// Circle centered on the node
    Circle {
        radius: f32,
    },

    /// Circle whose center is offset from the node's origin
    CircleWithCenter {
        radius: f32,
        center: Vector2,
    },

    /// Rectangle centered on the node
    Rectangle {
        size: Vector2,
    },

    /// Rectangle whose center is offset from the node's origin
    RectangleWithCenter {
        size: Vector2,
        center: Vector2,
    },

    /// A single line segment
    Edge {
        from: Vector2,
        to: Vector2,
    },

    /// A closed chain of segments
    EdgeLoop {
        points: Vec<Vector2>,
    },

    /// Any outline the narrow phase has no exact test for; only its area is known
    Complex {
        area: f32,
    },
}

/// A shape resolved into world space, in the form the narrow phase and
/// penetration calculator dispatch on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeGeometry {
    /// A circle in world space
    Round {
        center: Vector2,
        radius: f32,
    },

    /// An oriented rectangle in world space
    Boxed {
        center: Vector2,
        half_extents: Vector2,
        rotation: f32,
    },

    /// No exact geometry; collide by bounding box
    Approximate {
        bounds: Aabb,
    },
}

impl BodyShape {
    /// Returns the type name of the shape
    pub fn shape_type(&self) -> &'static str {
        match self {
            BodyShape::Circle { .. } => "Circle",
            BodyShape::CircleWithCenter { .. } => "CircleWithCenter",
            BodyShape::Rectangle { .. } => "Rectangle",
            BodyShape::RectangleWithCenter { .. } => "RectangleWithCenter",
            BodyShape::Edge { .. } => "Edge",
            BodyShape::EdgeLoop { .. } => "EdgeLoop",
            BodyShape::Complex { .. } => "Complex",
        }
    }

    /// Returns the enclosed area of the shape. Edges enclose nothing.
    pub fn area(&self) -> f32 {
        match self {
            BodyShape::Circle { radius } | BodyShape::CircleWithCenter { radius, .. } => {
                std::f32::consts::PI * radius * radius
            }
            BodyShape::Rectangle { size } | BodyShape::RectangleWithCenter { size, .. } => {
                (size.x * size.y).abs()
            }
            BodyShape::Edge { .. } | BodyShape::EdgeLoop { .. } => 0.0,
            BodyShape::Complex { area } => area.max(0.0),
        }
    }

    /// Returns the offset of the shape's center from the node origin, in local space
    pub fn local_center(&self) -> Vector2 {
        match self {
            BodyShape::CircleWithCenter { center, .. }
            | BodyShape::RectangleWithCenter { center, .. } => *center,
            BodyShape::Edge { from, to } => (*from + *to) * 0.5,
            BodyShape::EdgeLoop { points } => Aabb::from_points(points)
                .map(|bounds| bounds.center())
                .unwrap_or_default(),
            BodyShape::Circle { .. } | BodyShape::Rectangle { .. } | BodyShape::Complex { .. } => {
                Vector2::ZERO
            }
        }
    }

    /// Returns the moment of inertia about the node origin for the given mass
    pub fn moment_of_inertia(&self, mass: f32) -> f32 {
        // Parallel axis term for shapes offset from the origin
        let offset_term = mass * self.local_center().length_squared();

        let central = match self {
            BodyShape::Circle { radius } | BodyShape::CircleWithCenter { radius, .. } => {
                0.5 * mass * radius * radius
            }
            BodyShape::Rectangle { size } | BodyShape::RectangleWithCenter { size, .. } => {
                mass * (size.x * size.x + size.y * size.y) / 12.0
            }
            BodyShape::Edge { from, to } => mass * from.distance_squared(to) / 12.0,
            BodyShape::EdgeLoop { points } => match Aabb::from_points(points) {
                Some(bounds) => {
                    let size = bounds.extents();
                    mass * (size.x * size.x + size.y * size.y) / 12.0
                }
                None => 0.0,
            },
            BodyShape::Complex { area } => mass * area.max(0.0) / 6.0,
        };

        central + offset_term
    }

    /// Returns the axis-aligned bounding box of the shape for a node at `transform`
    pub fn world_aabb(&self, transform: &Transform) -> Aabb {
        match self {
            BodyShape::Circle { radius } => {
                Aabb::from_center_half_extents(transform.position, Vector2::new(*radius, *radius))
            }
            BodyShape::CircleWithCenter { radius, center } => Aabb::from_center_half_extents(
                transform.transform_point(*center),
                Vector2::new(*radius, *radius),
            ),
            BodyShape::Rectangle { size } => {
                rotated_rect_aabb(transform.position, *size * 0.5, transform.rotation)
            }
            BodyShape::RectangleWithCenter { size, center } => rotated_rect_aabb(
                transform.transform_point(*center),
                *size * 0.5,
                transform.rotation,
            ),
            BodyShape::Edge { from, to } => {
                let a = transform.transform_point(*from);
                let b = transform.transform_point(*to);
                Aabb::new(a.min(&b), a.max(&b))
            }
            BodyShape::EdgeLoop { points } => {
                let world: Vec<Vector2> =
                    points.iter().map(|p| transform.transform_point(*p)).collect();
                Aabb::from_points(&world)
                    .unwrap_or_else(|| Aabb::new(transform.position, transform.position))
            }
            BodyShape::Complex { area } => {
                let half = area.max(0.0).sqrt() * 0.5;
                Aabb::from_center_half_extents(transform.position, Vector2::new(half, half))
            }
        }
    }

    /// Resolves the shape into world-space geometry for a node at `transform`
    pub fn geometry(&self, transform: &Transform) -> ShapeGeometry {
        match self {
            BodyShape::Circle { radius } => ShapeGeometry::Round {
                center: transform.position,
                radius: *radius,
            },
            BodyShape::CircleWithCenter { radius, center } => ShapeGeometry::Round {
                center: transform.transform_point(*center),
                radius: *radius,
            },
            BodyShape::Rectangle { size } => ShapeGeometry::Boxed {
                center: transform.position,
                half_extents: *size * 0.5,
                rotation: transform.rotation,
            },
            BodyShape::RectangleWithCenter { size, center } => ShapeGeometry::Boxed {
                center: transform.transform_point(*center),
                half_extents: *size * 0.5,
                rotation: transform.rotation,
            },
            BodyShape::Edge { .. } | BodyShape::EdgeLoop { .. } | BodyShape::Complex { .. } => {
                ShapeGeometry::Approximate {
                    bounds: self.world_aabb(transform),
                }
            }
        }
    }

    /// Returns whether a world-space point lies inside the shape
    pub fn contains_point(&self, transform: &Transform, point: Vector2) -> bool {
        match self {
            BodyShape::Edge { .. } => false,
            BodyShape::EdgeLoop { points } => {
                polygon_contains(points, transform.inverse_transform_point(point))
            }
            _ => match self.geometry(transform) {
                ShapeGeometry::Round { center, radius } => {
                    center.distance_squared(&point) <= radius * radius
                }
                ShapeGeometry::Boxed { center, half_extents, rotation } => {
                    let local = (point - center).rotated(-rotation);
                    local.x.abs() <= half_extents.x && local.y.abs() <= half_extents.y
                }
                ShapeGeometry::Approximate { bounds } => bounds.contains_point(point),
            },
        }
    }
}

impl ShapeGeometry {
    /// Returns the world-space center of the geometry
    pub fn center(&self) -> Vector2 {
        match self {
            ShapeGeometry::Round { center, .. } | ShapeGeometry::Boxed { center, .. } => *center,
            ShapeGeometry::Approximate { bounds } => bounds.center(),
        }
    }

    /// Returns the world-space bounding box of the geometry
    pub fn bounds(&self) -> Aabb {
        match self {
            ShapeGeometry::Round { center, radius } => {
                Aabb::from_center_half_extents(*center, Vector2::new(*radius, *radius))
            }
            ShapeGeometry::Boxed { center, half_extents, rotation } => {
                rotated_rect_aabb(*center, *half_extents, *rotation)
            }
            ShapeGeometry::Approximate { bounds } => *bounds,
        }
    }
}

/// Returns the four world-space corners of an oriented rectangle, counter-clockwise
pub fn rect_corners(center: Vector2, half_extents: Vector2, rotation: f32) -> [Vector2; 4] {
    let ux = Vector2::unit_x().rotated(rotation) * half_extents.x;
    let uy = Vector2::unit_y().rotated(rotation) * half_extents.y;
    [
        center - ux - uy,
        center + ux - uy,
        center + ux + uy,
        center - ux + uy,
    ]
}

fn rotated_rect_aabb(center: Vector2, half_extents: Vector2, rotation: f32) -> Aabb {
    if rotation == 0.0 {
        return Aabb::from_center_half_extents(center, half_extents);
    }
    let (sin, cos) = rotation.sin_cos();
    let extent = Vector2::new(
        half_extents.x * cos.abs() + half_extents.y * sin.abs(),
        half_extents.x * sin.abs() + half_extents.y * cos.abs(),
    );
    Aabb::from_center_half_extents(center, extent)
}

// Even-odd rule
fn polygon_contains(points: &[Vector2], point: Vector2) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (pi, pj) = (points[i], points[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let dy = pj.y - pi.y;
            if dy.abs() > EPSILON {
                let x = (pj.x - pi.x) * (point.y - pi.y) / dy + pi.x;
                if point.x < x {
                    inside = !inside;
                }
            }
        }
        j = i;
    }
    inside
}
