use crate::bodies::PhysicsBody;
use crate::core::NodeHandle;
use crate::forces::ForceField;
use crate::math::{Transform, Vector2};

/// A scene-graph node. Position and rotation are relative to the parent.
#[derive(Debug, Default)]
pub struct Node {
    /// Optional name, for lookups and debugging
    pub name: Option<String>,

    /// Position in the parent's space
    pub position: Vector2,

    /// Rotation in radians, relative to the parent
    pub rotation: f32,

    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,
    pub(crate) body: Option<PhysicsBody>,
    pub(crate) field: Option<ForceField>,
}

impl Node {
    /// Creates an empty node at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty node at the given position
    pub fn at(position: Vector2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Sets the node's name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the node's rotation
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Attaches a physics body before the node is added to a scene
    pub fn with_body(mut self, body: PhysicsBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Attaches a force field before the node is added to a scene
    pub fn with_field(mut self, field: ForceField) -> Self {
        self.field = Some(field);
        self
    }

    /// Returns the node's transform relative to its parent
    pub fn local_transform(&self) -> Transform {
        Transform::new(self.position, self.rotation)
    }

    /// Returns the parent node, if any
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Returns the node's children
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// Returns the attached physics body, if any
    pub fn body(&self) -> Option<&PhysicsBody> {
        self.body.as_ref()
    }

    /// Returns the attached physics body mutably, if any
    pub fn body_mut(&mut self) -> Option<&mut PhysicsBody> {
        self.body.as_mut()
    }

    /// Returns the attached force field, if any
    pub fn field(&self) -> Option<&ForceField> {
        self.field.as_ref()
    }

    /// Returns the attached force field mutably, if any
    pub fn field_mut(&mut self) -> Option<&mut ForceField> {
        self.field.as_mut()
    }
}
