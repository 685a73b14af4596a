use crate::collision::Contact;
use crate::core::NodeHandle;
use std::collections::VecDeque;

/// Types of contact events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEventType {
    /// Bodies have just started touching
    Begin,

    /// Bodies have just stopped touching
    End,
}

/// A contact transition between two bodies
#[derive(Debug, Clone)]
pub struct ContactEvent {
    /// The type of contact event
    pub event_type: ContactEventType,

    /// The contact that began, or the last live contact of a pair that ended
    pub contact: Contact,
}

/// Receives contact begin/end notifications from the physics world
pub trait ContactDelegate {
    /// Called once when two bodies start touching
    fn did_begin(&mut self, _contact: &Contact) {}

    /// Called once on the first step after two bodies stopped touching
    fn did_end(&mut self, _contact: &Contact) {}
}

/// A queue of contact events produced by the most recent step
#[derive(Debug, Default)]
pub struct EventQueue {
    contact_events: VecDeque<ContactEvent>,
}

impl EventQueue {
    /// Creates a new empty event queue
    pub fn new() -> Self {
        Self {
            contact_events: VecDeque::new(),
        }
    }

    /// Adds a contact event to the queue
    pub fn add_contact_event(&mut self, event: ContactEvent) {
        self.contact_events.push_back(event);
    }

    /// Gets the next contact event from the queue
    pub fn next_contact_event(&mut self) -> Option<ContactEvent> {
        self.contact_events.pop_front()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.contact_events.is_empty()
    }

    /// Returns the number of queued events
    pub fn len(&self) -> usize {
        self.contact_events.len()
    }

    /// Clears all events from the queue
    pub fn clear(&mut self) {
        self.contact_events.clear();
    }

    /// Gets all contact events of a specific type
    pub fn get_contact_events_of_type(&self, event_type: ContactEventType) -> Vec<&ContactEvent> {
        self.contact_events
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Gets all contact events involving a specific body
    pub fn get_contact_events_for_body(&self, body: NodeHandle) -> Vec<&ContactEvent> {
        self.contact_events
            .iter()
            .filter(|e| e.contact.body_a == body || e.contact.body_b == body)
            .collect()
    }
}
