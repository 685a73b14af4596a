use crate::collision::narrow_phase::{box_proximity, separating_axis_test};
use crate::shapes::ShapeGeometry;

/// Measures how deep two geometries overlap right now. Zero when they are
/// apart or only touching.
pub fn penetration_depth(a: &ShapeGeometry, b: &ShapeGeometry) -> f32 {
    let depth = match (a, b) {
        (
            ShapeGeometry::Round { center: center_a, radius: radius_a },
            ShapeGeometry::Round { center: center_b, radius: radius_b },
        ) => radius_a + radius_b - center_a.distance(center_b),
        (
            ShapeGeometry::Round { center, radius },
            ShapeGeometry::Boxed { center: box_center, half_extents, rotation },
        )
        | (
            ShapeGeometry::Boxed { center: box_center, half_extents, rotation },
            ShapeGeometry::Round { center, radius },
        ) => radius - box_proximity(*center, *box_center, *half_extents, *rotation).distance,
        (
            ShapeGeometry::Boxed { center: center_a, half_extents: half_a, rotation: rotation_a },
            ShapeGeometry::Boxed { center: center_b, half_extents: half_b, rotation: rotation_b },
        ) => separating_axis_test(*center_a, *half_a, *rotation_a, *center_b, *half_b, *rotation_b)
            .map_or(0.0, |result| result.overlap),
        (ShapeGeometry::Approximate { .. }, _) | (_, ShapeGeometry::Approximate { .. }) => {
            a.bounds().intersection(&b.bounds()).map_or(0.0, |overlap| {
                let extents = overlap.extents();
                extents.x.min(extents.y)
            })
        }
    };

    depth.max(0.0)
}
