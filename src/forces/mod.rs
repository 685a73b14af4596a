mod force_field;
mod evaluator;
mod application;
pub mod noise;

pub use self::force_field::{FieldContext, FieldRegion, FieldSample, ForceField, ForceFieldType};
pub use self::evaluator::FieldEvaluator;
pub use self::application::{apply_accumulated_forces, apply_field_forces, apply_gravity};
