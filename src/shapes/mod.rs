mod body_shape;

pub use self::body_shape::{BodyShape, ShapeGeometry, rect_corners};
