//! Exact pairwise tests between world-space shape geometries.
//!
//! Every test reports its normal pointing from the second geometry toward
//! the first, so a contact's normal always points from body B to body A.

use crate::math::{clamp, Aabb, Vector2, EPSILON};
use crate::shapes::{rect_corners, ShapeGeometry};

/// The geometric result of a narrow-phase hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactManifold {
    /// The contact point in scene space
    pub point: Vector2,

    /// Unit normal from the second geometry toward the first
    pub normal: Vector2,

    /// Penetration depth at the time of the test
    pub depth: f32,
}

/// Tests two geometries for contact, dispatching on the pair of shapes
pub fn collide(a: &ShapeGeometry, b: &ShapeGeometry) -> Option<ContactManifold> {
    match (a, b) {
        (
            ShapeGeometry::Round { center: center_a, radius: radius_a },
            ShapeGeometry::Round { center: center_b, radius: radius_b },
        ) => circle_circle(*center_a, *radius_a, *center_b, *radius_b),
        (
            ShapeGeometry::Round { center, radius },
            ShapeGeometry::Boxed { center: box_center, half_extents, rotation },
        ) => circle_rect(*center, *radius, *box_center, *half_extents, *rotation),
        (
            ShapeGeometry::Boxed { center: box_center, half_extents, rotation },
            ShapeGeometry::Round { center, radius },
        ) => circle_rect(*center, *radius, *box_center, *half_extents, *rotation).map(|hit| {
            ContactManifold {
                normal: -hit.normal,
                ..hit
            }
        }),
        (
            ShapeGeometry::Boxed { center: center_a, half_extents: half_a, rotation: rotation_a },
            ShapeGeometry::Boxed { center: center_b, half_extents: half_b, rotation: rotation_b },
        ) => rect_rect(*center_a, *half_a, *rotation_a, *center_b, *half_b, *rotation_b),
        (ShapeGeometry::Approximate { .. }, _) | (_, ShapeGeometry::Approximate { .. }) => {
            bounds_overlap(a.center(), &a.bounds(), b.center(), &b.bounds())
        }
    }
}

/// Circle against circle. Touching circles count as a contact.
pub fn circle_circle(
    center_a: Vector2,
    radius_a: f32,
    center_b: Vector2,
    radius_b: f32,
) -> Option<ContactManifold> {
    let offset = center_a - center_b;
    let distance = offset.length();
    let reach = radius_a + radius_b;
    if distance > reach {
        return None;
    }

    // Coincident centers have no preferred direction; push along +y
    let normal = if distance > EPSILON {
        offset / distance
    } else {
        Vector2::unit_y()
    };

    Some(ContactManifold {
        point: center_b + normal * radius_b,
        normal,
        depth: reach - distance,
    })
}

/// Where a circle center sits relative to an oriented box, in the box's frame
pub(crate) struct BoxProximity {
    /// Closest point on the box, box-local
    pub closest: Vector2,

    /// Unit normal from the box toward the circle, box-local
    pub normal: Vector2,

    /// Signed distance from the box surface; negative when inside
    pub distance: f32,
}

/// Finds the closest feature of an oriented box to `point`
pub(crate) fn box_proximity(point: Vector2, box_center: Vector2, half_extents: Vector2, rotation: f32) -> BoxProximity {
    let local = (point - box_center).rotated(-rotation);
    let inside = local.x.abs() <= half_extents.x && local.y.abs() <= half_extents.y;

    if inside {
        // Leave through the nearest of the four edges
        let to_x_edge = half_extents.x - local.x.abs();
        let to_y_edge = half_extents.y - local.y.abs();
        let sign_x = if local.x < 0.0 { -1.0 } else { 1.0 };
        let sign_y = if local.y < 0.0 { -1.0 } else { 1.0 };

        if to_x_edge < to_y_edge {
            BoxProximity {
                closest: Vector2::new(sign_x * half_extents.x, local.y),
                normal: Vector2::new(sign_x, 0.0),
                distance: -to_x_edge,
            }
        } else {
            BoxProximity {
                closest: Vector2::new(local.x, sign_y * half_extents.y),
                normal: Vector2::new(0.0, sign_y),
                distance: -to_y_edge,
            }
        }
    } else {
        let closest = Vector2::new(
            clamp(local.x, -half_extents.x, half_extents.x),
            clamp(local.y, -half_extents.y, half_extents.y),
        );
        let offset = local - closest;
        let distance = offset.length();
        BoxProximity {
            closest,
            normal: offset.try_normalize().unwrap_or(Vector2::unit_y()),
            distance,
        }
    }
}

/// Circle against an oriented rectangle; the normal points from the
/// rectangle toward the circle
pub fn circle_rect(
    center: Vector2,
    radius: f32,
    box_center: Vector2,
    half_extents: Vector2,
    rotation: f32,
) -> Option<ContactManifold> {
    let proximity = box_proximity(center, box_center, half_extents, rotation);
    if proximity.distance > radius {
        return None;
    }

    Some(ContactManifold {
        point: box_center + proximity.closest.rotated(rotation),
        normal: proximity.normal.rotated(rotation),
        depth: radius - proximity.distance,
    })
}

/// Result of projecting two oriented boxes on their four edge normals
pub(crate) struct SatResult {
    /// The axis of least overlap, oriented from the second box to the first
    pub axis: Vector2,

    /// Overlap along that axis
    pub overlap: f32,
}

/// Runs the separating axis test; `None` means a separating axis exists
pub(crate) fn separating_axis_test(
    center_a: Vector2,
    half_a: Vector2,
    rotation_a: f32,
    center_b: Vector2,
    half_b: Vector2,
    rotation_b: f32,
) -> Option<SatResult> {
    let corners_a = rect_corners(center_a, half_a, rotation_a);
    let corners_b = rect_corners(center_b, half_b, rotation_b);
    let axes = [
        Vector2::unit_x().rotated(rotation_a),
        Vector2::unit_y().rotated(rotation_a),
        Vector2::unit_x().rotated(rotation_b),
        Vector2::unit_y().rotated(rotation_b),
    ];

    let mut best: Option<SatResult> = None;
    for axis in axes {
        let (min_a, max_a) = project(&corners_a, axis);
        let (min_b, max_b) = project(&corners_b, axis);
        let overlap = max_a.min(max_b) - min_a.max(min_b);
        if overlap <= 0.0 {
            return None;
        }
        if best.as_ref().map_or(true, |current| overlap < current.overlap) {
            best = Some(SatResult { axis, overlap });
        }
    }

    best.map(|mut result| {
        if result.axis.dot(&(center_a - center_b)) < 0.0 {
            result.axis = -result.axis;
        }
        result
    })
}

fn project(corners: &[Vector2; 4], axis: Vector2) -> (f32, f32) {
    corners.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), corner| {
        let projection = corner.dot(&axis);
        (min.min(projection), max.max(projection))
    })
}

/// Rectangle against rectangle via the separating axis theorem
pub fn rect_rect(
    center_a: Vector2,
    half_a: Vector2,
    rotation_a: f32,
    center_b: Vector2,
    half_b: Vector2,
    rotation_b: f32,
) -> Option<ContactManifold> {
    let result = separating_axis_test(center_a, half_a, rotation_a, center_b, half_b, rotation_b)?;
    Some(ContactManifold {
        point: (center_a + center_b) * 0.5,
        normal: result.axis,
        depth: result.overlap,
    })
}

/// Fallback for shapes without an exact test: overlapping bounding boxes
pub fn bounds_overlap(
    center_a: Vector2,
    bounds_a: &Aabb,
    center_b: Vector2,
    bounds_b: &Aabb,
) -> Option<ContactManifold> {
    let overlap = bounds_a.intersection(bounds_b)?;
    let extents = overlap.extents();
    Some(ContactManifold {
        point: overlap.center(),
        normal: (center_a - center_b).try_normalize().unwrap_or(Vector2::unit_y()),
        depth: extents.x.min(extents.y),
    })
}
