use std::collections::{BTreeMap, BTreeSet};

use crate::collision::{Contact, ContactPair};
use crate::core::{ContactDelegate, ContactEvent, ContactEventType, EventQueue};

use tracing::trace;

/// Diffs each step's contacts against the previous step's to report every
/// begin and end transition exactly once
#[derive(Debug, Default)]
pub struct ContactTracker {
    /// Pairs touching in the previous step
    previous: BTreeSet<ContactPair>,

    /// The most recent live contact of every pair in `previous`
    cache: BTreeMap<ContactPair, Contact>,
}

impl ContactTracker {
    /// Creates a tracker with no history
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the pair was touching in the last tracked step
    pub fn is_touching(&self, pair: &ContactPair) -> bool {
        self.previous.contains(pair)
    }

    /// Returns the number of pairs touching in the last tracked step
    pub fn active_pair_count(&self) -> usize {
        self.previous.len()
    }

    /// Returns the cached contact of a pair touching in the last tracked step
    pub fn cached_contact(&self, pair: &ContactPair) -> Option<&Contact> {
        self.cache.get(pair)
    }

    /// Records this step's contacts and reports transitions: begins first,
    /// then ends, each in pair order
    pub fn update(
        &mut self,
        contacts: &[Contact],
        mut delegate: Option<&mut (dyn ContactDelegate + '_)>,
        events: &mut EventQueue,
    ) {
        let mut current: BTreeMap<ContactPair, Contact> = BTreeMap::new();
        for contact in contacts {
            current.entry(contact.pair()).or_insert(*contact);
        }

        for (pair, contact) in &current {
            if self.previous.contains(pair) {
                continue;
            }
            trace!(a = pair.body_a.index(), b = pair.body_b.index(), "contact began");
            if let Some(delegate) = delegate.as_deref_mut() {
                delegate.did_begin(contact);
            }
            events.add_contact_event(ContactEvent {
                event_type: ContactEventType::Begin,
                contact: *contact,
            });
        }

        for pair in &self.previous {
            if current.contains_key(pair) {
                continue;
            }
            let Some(contact) = self.cache.get(pair) else {
                continue;
            };
            trace!(a = pair.body_a.index(), b = pair.body_b.index(), "contact ended");
            if let Some(delegate) = delegate.as_deref_mut() {
                delegate.did_end(contact);
            }
            events.add_contact_event(ContactEvent {
                event_type: ContactEventType::End,
                contact: *contact,
            });
        }

        self.previous = current.keys().copied().collect();
        self.cache = current;
    }

    /// Forgets all tracked pairs without reporting anything
    pub fn reset(&mut self) {
        self.previous.clear();
        self.cache.clear();
    }
}
