//! The scene graph the physics engine reads from and writes to.
//!
//! Nodes live in a handle-keyed arena. A [`PhysicsBody`] is owned by the
//! node it is attached to and refers back to it only by [`NodeHandle`], so
//! destroying a node drops its body and nothing dangles.

mod node;
mod body_state;

pub use self::node::Node;
pub(crate) use self::body_state::BodyState;

use crate::bodies::PhysicsBody;
use crate::core::{NodeHandle, NodeStorage, PhysicsWorld, Storage};
use crate::error::PhysicsError;
use crate::forces::ForceField;
use crate::math::{Transform, Vector2};
use crate::Result;

/// A tree of nodes plus the physics world that simulates their bodies
#[derive(Default)]
pub struct Scene {
    nodes: NodeStorage<Node>,
    physics_world: PhysicsWorld,
}

impl Scene {
    /// Creates an empty scene with a default physics world
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty scene around the given physics world
    pub fn with_world(physics_world: PhysicsWorld) -> Self {
        Self {
            nodes: NodeStorage::new(),
            physics_world,
        }
    }

    /// Returns the scene's physics world
    pub fn physics_world(&self) -> &PhysicsWorld {
        &self.physics_world
    }

    /// Returns the scene's physics world mutably
    pub fn physics_world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.physics_world
    }

    /// Adds a top-level node and returns its handle
    pub fn add_node(&mut self, mut node: Node) -> NodeHandle {
        node.parent = None;
        node.children.clear();
        let handle = self.nodes.add(node);
        self.bind_back_reference(handle);
        handle
    }

    /// Adds a node as a child of `parent`
    pub fn add_child(&mut self, parent: NodeHandle, mut node: Node) -> Result<NodeHandle> {
        self.nodes.get_checked(parent)?;
        node.parent = Some(parent);
        node.children.clear();
        let handle = self.nodes.add(node);
        self.nodes.get_checked_mut(parent)?.children.push(handle);
        self.bind_back_reference(handle);
        Ok(handle)
    }

    /// Removes a node and its whole subtree. Joints attached to any removed
    /// body are removed from the physics world as well.
    pub fn remove_node(&mut self, handle: NodeHandle) -> Result<Node> {
        let parent = self.nodes.get_checked(handle)?.parent;
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|&child| child != handle);
        }

        let mut pending = vec![handle];
        let mut removed_root = None;
        while let Some(current) = pending.pop() {
            let Some(mut node) = self.nodes.remove(current) else {
                continue;
            };
            pending.extend(node.children.iter().copied());
            if node.body.is_some() {
                self.physics_world.remove_joints_for_body(current);
            }
            if let Some(body) = node.body.as_mut() {
                body.set_node(None);
            }
            if current == handle {
                removed_root = Some(node);
            }
        }

        removed_root.ok_or(PhysicsError::NodeNotFound(handle))
    }

    /// Returns the number of nodes in the scene
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Gets a node by handle
    pub fn node(&self, handle: NodeHandle) -> Result<&Node> {
        self.nodes.get_checked(handle)
    }

    /// Gets a node mutably by handle
    pub fn node_mut(&mut self, handle: NodeHandle) -> Result<&mut Node> {
        self.nodes.get_checked_mut(handle)
    }

    /// Finds the first node with the given name
    pub fn find_node(&self, name: &str) -> Option<NodeHandle> {
        self.nodes
            .iter()
            .find(|(_, node)| node.name.as_deref() == Some(name))
            .map(|(handle, _)| handle)
    }

    /// Attaches a body to a node, replacing any previous one
    pub fn attach_body(&mut self, handle: NodeHandle, mut body: PhysicsBody) -> Result<()> {
        body.set_node(Some(handle));
        self.nodes.get_checked_mut(handle)?.body = Some(body);
        Ok(())
    }

    /// Detaches and returns a node's body
    pub fn detach_body(&mut self, handle: NodeHandle) -> Result<PhysicsBody> {
        let mut body = self
            .nodes
            .get_checked_mut(handle)?
            .body
            .take()
            .ok_or(PhysicsError::MissingBody(handle))?;
        self.physics_world.remove_joints_for_body(handle);
        body.set_node(None);
        Ok(body)
    }

    /// Attaches a force field to a node, replacing any previous one
    pub fn attach_field(&mut self, handle: NodeHandle, field: ForceField) -> Result<()> {
        self.nodes.get_checked_mut(handle)?.field = Some(field);
        Ok(())
    }

    /// Gets the body attached to a node
    pub fn body(&self, handle: NodeHandle) -> Result<&PhysicsBody> {
        self.nodes
            .get_checked(handle)?
            .body
            .as_ref()
            .ok_or(PhysicsError::MissingBody(handle))
    }

    /// Gets the body attached to a node mutably
    pub fn body_mut(&mut self, handle: NodeHandle) -> Result<&mut PhysicsBody> {
        self.nodes
            .get_checked_mut(handle)?
            .body
            .as_mut()
            .ok_or(PhysicsError::MissingBody(handle))
    }

    /// Returns the node's transform in scene space
    pub fn world_transform(&self, handle: NodeHandle) -> Result<Transform> {
        let node = self.nodes.get_checked(handle)?;
        let mut transform = node.local_transform();
        let mut parent = node.parent;
        while let Some(parent_handle) = parent {
            let parent_node = self.nodes.get_checked(parent_handle)?;
            transform = parent_node.local_transform().compose(&transform);
            parent = parent_node.parent;
        }
        Ok(transform)
    }

    /// Places a node at a scene-space transform, converting into its parent's space
    pub fn set_world_transform(&mut self, handle: NodeHandle, transform: Transform) -> Result<()> {
        let parent = self.nodes.get_checked(handle)?.parent;
        let local = match parent {
            Some(parent) => self.world_transform(parent)?.relative_to(&transform),
            None => transform,
        };
        let node = self.nodes.get_checked_mut(handle)?;
        node.position = local.position;
        node.rotation = local.rotation;
        Ok(())
    }

    /// Converts a point from a node's local space into scene space
    pub fn convert_point_to_scene(&self, point: Vector2, from: NodeHandle) -> Result<Vector2> {
        Ok(self.world_transform(from)?.transform_point(point))
    }

    /// Converts a scene-space point into a node's local space
    pub fn convert_point_from_scene(&self, point: Vector2, to: NodeHandle) -> Result<Vector2> {
        Ok(self.world_transform(to)?.inverse_transform_point(point))
    }

    /// Collects every node carrying a body, in handle order
    pub fn body_nodes(&self) -> Vec<NodeHandle> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.body.is_some())
            .map(|(handle, _)| handle)
            .collect()
    }

    /// Collects every node carrying an enabled field, in handle order
    pub fn field_nodes(&self) -> Vec<NodeHandle> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.field.as_ref().is_some_and(|field| field.is_enabled()))
            .map(|(handle, _)| handle)
            .collect()
    }

    fn bind_back_reference(&mut self, handle: NodeHandle) {
        if let Some(body) = self.nodes.get_mut(handle).and_then(|node| node.body.as_mut()) {
            body.set_node(Some(handle));
        }
    }
}
