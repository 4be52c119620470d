//! Change notifications for persisted collections.
//!
//! Every successful collection write emits one [`ChangeEvent`] to the
//! subscribers registered on the owning [`Storage`](crate::Storage) handle.
//! Events carry the full post-write collection, but views are expected to
//! re-query through the repositories rather than trust the payload.
//!
//! Listeners run synchronously, in registration order, and may call back
//! into the storage handle, including writing, subscribing or
//! unsubscribing.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::models::{Category, Itinerary};

/// Which collection a change applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Categories,
    Itineraries,
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionKind::Categories => write!(f, "categories"),
            CollectionKind::Itineraries => write!(f, "itineraries"),
        }
    }
}

/// The collection as it stands after a write.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangePayload {
    Categories(Vec<Category>),
    Itineraries(Vec<Itinerary>),
}

impl ChangePayload {
    pub fn kind(&self) -> CollectionKind {
        match self {
            ChangePayload::Categories(_) => CollectionKind::Categories,
            ChangePayload::Itineraries(_) => CollectionKind::Itineraries,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ChangePayload::Categories(items) => items.len(),
            ChangePayload::Itineraries(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    /// Position of this event in emission order, starting at 1.
    pub sequence: u64,
    pub payload: ChangePayload,
}

impl ChangeEvent {
    pub fn kind(&self) -> CollectionKind {
        self.payload.kind()
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Rc<dyn Fn(&ChangeEvent)>;

struct Subscriber {
    id: u64,
    kind: Option<CollectionKind>,
    listener: Listener,
}

/// Observer registry that fans change events out to listeners.
#[derive(Default)]
pub struct ChangeBus {
    subscribers: RefCell<Vec<Subscriber>>,
    next_id: Cell<u64>,
    sequence: Cell<u64>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for changes to one collection.
    pub fn subscribe(
        &self,
        kind: CollectionKind,
        listener: impl Fn(&ChangeEvent) + 'static,
    ) -> Subscription {
        self.register(Some(kind), Rc::new(listener))
    }

    /// Registers a listener for changes to any collection.
    pub fn subscribe_all(&self, listener: impl Fn(&ChangeEvent) + 'static) -> Subscription {
        self.register(None, Rc::new(listener))
    }

    fn register(&self, kind: Option<CollectionKind>, listener: Listener) -> Subscription {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.subscribers.borrow_mut().push(Subscriber { id, kind, listener });
        Subscription(id)
    }

    /// Removes a listener. Returns false if it was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|s| s.id != subscription.0);
        subscribers.len() != before
    }

    fn is_registered(&self, id: u64) -> bool {
        self.subscribers.borrow().iter().any(|s| s.id == id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Number of events emitted so far.
    pub fn emitted(&self) -> u64 {
        self.sequence.get()
    }

    /// Delivers `payload` to every matching listener and returns its sequence number.
    pub fn emit(&self, payload: ChangePayload) -> u64 {
        let sequence = self.sequence.get() + 1;
        self.sequence.set(sequence);

        let event = ChangeEvent { sequence, payload };
        let kind = event.kind();

        // Snapshot first: listeners may subscribe or unsubscribe while running.
        let listeners: Vec<(u64, Listener)> = self
            .subscribers
            .borrow()
            .iter()
            .filter(|s| s.kind.map_or(true, |k| k == kind))
            .map(|s| (s.id, Rc::clone(&s.listener)))
            .collect();

        tracing::debug!(
            kind = %kind,
            sequence,
            items = event.payload.len(),
            listeners = listeners.len(),
            "emitting change event"
        );

        for (id, listener) in listeners {
            // Skip listeners removed by an earlier one during this dispatch.
            if self.is_registered(id) {
                listener(&event);
            }
        }

        sequence
    }
}

impl fmt::Debug for ChangeBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeBus")
            .field("subscribers", &self.subscriber_count())
            .field("emitted", &self.emitted())
            .finish()
    }
}
