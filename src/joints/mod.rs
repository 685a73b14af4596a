mod joint;
mod pin;
mod spring;
mod fixed;
mod sliding;
mod limit;

pub use self::joint::{Joint, JointType};
pub use self::pin::PinJoint;
pub use self::spring::SpringJoint;
pub use self::fixed::FixedJoint;
pub use self::sliding::SlidingJoint;
pub use self::limit::LimitJoint;
