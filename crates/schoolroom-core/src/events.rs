//! Change notification fan-out.
//!
//! Every store mutation emits a [`ChangeKind`] describing what part of the
//! state moved. UI collaborators subscribe, receive kinds synchronously in
//! FIFO subscription order, and re-read whatever projections they render.
//!
//! Delivery contract: listeners run on the emitting thread, in the order
//! they subscribed, and one listener's panic does not stop the fan-out
//! (it is caught, logged, and delivery continues).

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::{Rc, Weak};

/// What part of the planner state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// The active child filter changed.
    Child,
    /// The active view changed.
    View,
    /// The active week offset changed.
    Week,
    /// The subject collection changed.
    Subjects,
    /// The lesson collection changed.
    Lessons,
    /// A child's XP changed.
    Xp,
    /// A child leveled up.
    Level,
}

struct Entry {
    id: u64,
    listener: Rc<dyn Fn(ChangeKind)>,
}

/// Observer list with FIFO delivery and per-listener fault isolation.
#[derive(Default)]
pub struct EventBus {
    entries: Rc<RefCell<Vec<Entry>>>,
    next_id: std::cell::Cell<u64>,
}

/// Capability returned by [`EventBus::subscribe`]; cancelling it removes
/// the listener. Dropping it without cancelling leaves the listener live,
/// matching a subscription that lasts for the store's lifetime.
pub struct Subscription {
    id: u64,
    entries: Weak<RefCell<Vec<Entry>>>,
}

impl Subscription {
    /// Remove the listener from the bus.
    pub fn cancel(self) {
        if let Some(entries) = self.entries.upgrade() {
            entries.borrow_mut().retain(|e| e.id != self.id);
        }
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Listeners are invoked in subscription order.
    pub fn subscribe(&self, listener: impl Fn(ChangeKind) + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push(Entry {
            id,
            listener: Rc::new(listener),
        });
        Subscription {
            id,
            entries: Rc::downgrade(&self.entries),
        }
    }

    /// Deliver `kind` to every current listener, synchronously.
    ///
    /// The listener list is snapshotted before delivery so a listener may
    /// subscribe or cancel reentrantly without poisoning the iteration.
    pub fn emit(&self, kind: ChangeKind) {
        let listeners: Vec<Rc<dyn Fn(ChangeKind)>> = self
            .entries
            .borrow()
            .iter()
            .map(|e| Rc::clone(&e.listener))
            .collect();

        for listener in listeners {
            if catch_unwind(AssertUnwindSafe(|| listener(kind))).is_err() {
                eprintln!("schoolroom: change listener panicked on {kind:?}, continuing fan-out");
            }
        }
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.entries.borrow().len()
    }
}
