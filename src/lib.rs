pub mod math;
pub mod core;
pub mod scene;
pub mod bodies;
pub mod shapes;
pub mod collision;
pub mod joints;
pub mod forces;
pub mod integration;

/// Re-export common types for easier usage
pub use crate::core::{PhysicsEngine, PhysicsWorld, SimulationConfig, NodeHandle, JointHandle};
pub use crate::scene::{Node, Scene};
pub use crate::bodies::{PhysicsBody, Material};
pub use crate::shapes::BodyShape;
pub use crate::forces::ForceField;
pub use crate::math::Vector2;

/// Error types for the physics engine
pub mod error {
    use thiserror::Error;

    use crate::core::{JointHandle, NodeHandle};

    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum PhysicsError {
        #[error("Node not found: {0:?}")]
        NodeNotFound(NodeHandle),

        #[error("Node {0:?} has no physics body")]
        MissingBody(NodeHandle),

        #[error("Joint not found: {0:?}")]
        JointNotFound(JointHandle),

        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),
    }
}

/// Result type for physics engine operations
pub type Result<T> = std::result::Result<T, error::PhysicsError>;

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
