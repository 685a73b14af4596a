mod collision_pair;
mod contact;
mod collision_detector;
mod collision_filter;
mod contact_solver;
mod contact_tracker;
mod penetration;
pub mod broad_phase;
pub mod narrow_phase;

pub use self::collision_pair::ContactPair;
pub use self::contact::Contact;
pub use self::collision_detector::CollisionDetector;
pub use self::collision_filter::{BitMaskFilter, CollisionFilter};
pub use self::broad_phase::{BodyProxy, BroadPhase, BruteForceBroadPhase, SweepAndPruneBroadPhase};
pub use self::narrow_phase::ContactManifold;
pub use self::contact_solver::{ContactSolver, ImpulseContactSolver};
pub use self::contact_tracker::ContactTracker;
pub use self::penetration::penetration_depth;
