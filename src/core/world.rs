use crate::collision::{Contact, ContactTracker};
use crate::error::PhysicsError;
use crate::core::{ContactDelegate, EventQueue, JointHandle, JointStorage, NodeHandle, Storage};
use crate::joints::Joint;
use crate::math::{Aabb, Vector2};
use crate::scene::Scene;
use crate::Result;

use tracing::debug;

/// Scene-wide physics state: gravity, speed, joints, and contact reporting
pub struct PhysicsWorld {
    /// Uniform gravity applied to bodies that are affected by it
    gravity: Vector2,

    /// Multiplier on every step's time delta; zero or less pauses the simulation
    speed: f32,

    /// All joints in the world
    joints: JointStorage<Box<dyn Joint>>,

    /// Receives contact begin/end notifications
    contact_delegate: Option<Box<dyn ContactDelegate>>,

    /// Contact events produced by the most recent step
    events: EventQueue,

    /// Contact pairs seen in previous steps
    tracker: ContactTracker,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Creates a new physics world with default settings
    pub fn new() -> Self {
        Self {
            gravity: Vector2::new(0.0, -9.8),
            speed: 1.0,
            joints: JointStorage::new(),
            contact_delegate: None,
            events: EventQueue::new(),
            tracker: ContactTracker::new(),
        }
    }

    /// Gets the current gravity
    pub fn get_gravity(&self) -> Vector2 {
        self.gravity
    }

    /// Sets the gravity for the simulation
    pub fn set_gravity(&mut self, gravity: Vector2) {
        self.gravity = gravity;
    }

    /// Gets the simulation speed multiplier
    pub fn get_speed(&self) -> f32 {
        self.speed
    }

    /// Sets the simulation speed multiplier
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Adds a joint to the world and returns its handle
    pub fn add_joint(&mut self, joint: Box<dyn Joint>) -> JointHandle {
        let [a, b] = joint.bodies();
        let handle = self.joints.add(joint);
        debug!(joint = handle.index(), a = a.index(), b = b.index(), "joint added");
        handle
    }

    /// Removes a joint from the world
    pub fn remove_joint(&mut self, handle: JointHandle) -> Result<Box<dyn Joint>> {
        let joint = self
            .joints
            .remove(handle)
            .ok_or(PhysicsError::JointNotFound(handle))?;
        debug!(joint = handle.index(), "joint removed");
        Ok(joint)
    }

    /// Gets a joint by its handle
    pub fn joint(&self, handle: JointHandle) -> Result<&dyn Joint> {
        Ok(self.joints.get_checked(handle)?.as_ref())
    }

    /// Gets a joint mutably by its handle
    pub fn joint_mut(&mut self, handle: JointHandle) -> Result<&mut dyn Joint> {
        Ok(self.joints.get_checked_mut(handle)?.as_mut())
    }

    /// Returns the number of joints
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// Returns all joint handles in creation order
    pub fn joint_handles(&self) -> Vec<JointHandle> {
        self.joints.handles()
    }

    /// Removes every joint attached to `body`, returning how many were removed
    pub fn remove_joints_for_body(&mut self, body: NodeHandle) -> usize {
        let handles: Vec<JointHandle> = self
            .joints
            .iter()
            .filter(|(_, joint)| joint.involves_body(body))
            .map(|(handle, _)| handle)
            .collect();

        for handle in &handles {
            self.joints.remove(*handle);
        }
        if !handles.is_empty() {
            debug!(body = body.index(), count = handles.len(), "joints removed with body");
        }
        handles.len()
    }

    /// Installs the contact delegate, replacing any previous one
    pub fn set_contact_delegate(&mut self, delegate: Box<dyn ContactDelegate>) {
        self.contact_delegate = Some(delegate);
    }

    /// Removes and returns the contact delegate
    pub fn take_contact_delegate(&mut self) -> Option<Box<dyn ContactDelegate>> {
        self.contact_delegate.take()
    }

    /// Returns whether a contact delegate is installed
    pub fn has_contact_delegate(&self) -> bool {
        self.contact_delegate.is_some()
    }

    /// Returns the events produced by the most recent step
    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Returns the event queue mutably, for draining
    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// Returns the contact tracker
    pub fn contact_tracker(&self) -> &ContactTracker {
        &self.tracker
    }

    /// Returns the first body, in handle order, whose shape contains `point`
    pub fn body_at_point(&self, scene: &Scene, point: Vector2) -> Option<NodeHandle> {
        self.bodies_at_point(scene, point).into_iter().next()
    }

    /// Returns every body whose shape contains `point`
    pub fn bodies_at_point(&self, scene: &Scene, point: Vector2) -> Vec<NodeHandle> {
        scene
            .body_nodes()
            .into_iter()
            .filter(|&handle| {
                match (scene.body(handle), scene.world_transform(handle)) {
                    (Ok(body), Ok(transform)) => body.get_shape().contains_point(&transform, point),
                    _ => false,
                }
            })
            .collect()
    }

    /// Returns every body whose bounding box touches `rect`
    pub fn bodies_in_rect(&self, scene: &Scene, rect: &Aabb) -> Vec<NodeHandle> {
        scene
            .body_nodes()
            .into_iter()
            .filter(|&handle| {
                match (scene.body(handle), scene.world_transform(handle)) {
                    (Ok(body), Ok(transform)) => body.get_shape().world_aabb(&transform).intersects(rect),
                    _ => false,
                }
            })
            .collect()
    }

    /// Moves the joints out so they can be solved against the scene that owns this world
    pub(crate) fn take_joints(&mut self) -> JointStorage<Box<dyn Joint>> {
        std::mem::take(&mut self.joints)
    }

    /// Puts solved joints back
    pub(crate) fn restore_joints(&mut self, joints: JointStorage<Box<dyn Joint>>) {
        self.joints = joints;
    }

    /// Feeds this step's contacts to the tracker, notifying the delegate
    pub(crate) fn track_contacts(&mut self, contacts: &[Contact]) {
        self.tracker
            .update(contacts, self.contact_delegate.as_deref_mut(), &mut self.events);
    }

    /// Forgets all tracked contacts and pending events
    pub(crate) fn reset_contacts(&mut self) {
        self.tracker.reset();
        self.events.clear();
    }
}
