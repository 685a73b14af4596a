pub mod world;
pub mod config;
pub mod storage;
pub mod events;
pub mod engine;

pub use self::world::PhysicsWorld;
pub use self::config::SimulationConfig;
pub use self::storage::{Storage, StorageHandle, HandleStorage, NodeStorage, JointStorage};
pub use self::events::{EventQueue, ContactEvent, ContactEventType, ContactDelegate};
pub use self::engine::PhysicsEngine;

/// A stable identifier for a node in a scene. Bodies are addressed through
/// the node they are attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub(crate) u32);

/// A unique identifier for a joint in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JointHandle(pub(crate) u32);

impl NodeHandle {
    /// Returns the raw index of the handle
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl JointHandle {
    /// Returns the raw index of the handle
    pub fn index(&self) -> u32 {
        self.0
    }
}
