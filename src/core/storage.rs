use std::collections::BTreeMap;
use std::fmt::Debug;
use crate::core::{JointHandle, NodeHandle};
use crate::error::PhysicsError;
use crate::Result;

/// An arena of items addressed by stable handles
pub trait Storage<T, H> {
    fn new() -> Self;

    /// Stores `item` under a fresh handle
    fn add(&mut self, item: T) -> H;

    fn get(&self, handle: H) -> Option<&T>;

    fn get_mut(&mut self, handle: H) -> Option<&mut T>;

    /// Takes the item out; its handle is not handed out again
    fn remove(&mut self, handle: H) -> Option<T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool;

    fn clear(&mut self);

    /// Live handles, ascending
    fn handles(&self) -> Vec<H>;

    /// Items in handle order
    fn iter<'a>(&'a self) -> impl Iterator<Item = (H, &'a T)> + 'a where T: 'a;

    /// Items in handle order, mutably
    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (H, &'a mut T)> + 'a where T: 'a;
}

/// A handle type that a [`HandleStorage`] can mint
pub trait StorageHandle: Copy + Ord + Debug {
    /// Builds a handle from a raw id
    fn from_raw(id: u32) -> Self;

    /// The error reported when the handle is not present
    fn not_found(self) -> PhysicsError;
}

impl StorageHandle for NodeHandle {
    fn from_raw(id: u32) -> Self {
        NodeHandle(id)
    }

    fn not_found(self) -> PhysicsError {
        PhysicsError::NodeNotFound(self)
    }
}

impl StorageHandle for JointHandle {
    fn from_raw(id: u32) -> Self {
        JointHandle(id)
    }

    fn not_found(self) -> PhysicsError {
        PhysicsError::JointNotFound(self)
    }
}

/// Handle-keyed storage. Handles are never reused and iteration follows
/// handle order, so every pass over the storage is deterministic.
#[derive(Debug)]
pub struct HandleStorage<H: StorageHandle, T> {
    items: BTreeMap<H, T>,
    next_id: u32,
}

/// Storage for scene nodes
pub type NodeStorage<T> = HandleStorage<NodeHandle, T>;

/// Storage for joints
pub type JointStorage<T> = HandleStorage<JointHandle, T>;

impl<H: StorageHandle, T> Storage<T, H> for HandleStorage<H, T> {
    fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            // 0 is never a valid handle
            next_id: 1,
        }
    }

    fn add(&mut self, item: T) -> H {
        let handle = H::from_raw(self.next_id);
        self.next_id += 1;
        self.items.insert(handle, item);
        handle
    }

    fn get(&self, handle: H) -> Option<&T> {
        self.items.get(&handle)
    }

    fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.items.get_mut(&handle)
    }

    fn remove(&mut self, handle: H) -> Option<T> {
        self.items.remove(&handle)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn handles(&self) -> Vec<H> {
        self.items.keys().copied().collect()
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (H, &'a T)> + 'a where T: 'a {
        self.items.iter().map(|(h, item)| (*h, item))
    }

    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (H, &'a mut T)> + 'a where T: 'a {
        self.items.iter_mut().map(|(h, item)| (*h, item))
    }
}

impl<H: StorageHandle, T> HandleStorage<H, T> {
    /// Like `get`, but a missing handle is reported as the handle's
    /// not-found error
    pub fn get_checked(&self, handle: H) -> Result<&T> {
        self.get(handle).ok_or_else(|| handle.not_found())
    }

    pub fn get_checked_mut(&mut self, handle: H) -> Result<&mut T> {
        self.get_mut(handle).ok_or_else(|| handle.not_found())
    }
}

impl<H: StorageHandle, T> Default for HandleStorage<H, T> {
    fn default() -> Self {
        <Self as Storage<T, H>>::new()
    }
}
