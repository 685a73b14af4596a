use crate::core::NodeHandle;

/// An unordered pair of bodies, used to key contact tracking across steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactPair {
    /// The body with the lower handle
    pub body_a: NodeHandle,

    /// The body with the higher handle
    pub body_b: NodeHandle,
}

impl ContactPair {
    /// Creates a new contact pair
    pub fn new(body_a: NodeHandle, body_b: NodeHandle) -> Self {
        // Always sort the handles so (a, b) and (b, a) are the same key
        if body_a <= body_b {
            Self { body_a, body_b }
        } else {
            Self { body_a: body_b, body_b: body_a }
        }
    }

    /// Checks if this pair contains the specified body
    pub fn contains(&self, body: NodeHandle) -> bool {
        self.body_a == body || self.body_b == body
    }

    /// Returns the other body in the pair
    pub fn other(&self, body: NodeHandle) -> Option<NodeHandle> {
        if self.body_a == body {
            Some(self.body_b)
        } else if self.body_b == body {
            Some(self.body_a)
        } else {
            None
        }
    }
}
