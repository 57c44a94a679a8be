//! Display observers
//!
//! Read-only subscribers to transport state. The controller calls
//! [`ObserverRegistry::notify`] exactly once per logical state change.

use crate::state::TransportState;

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&TransportState)>;

#[derive(Default)]
pub(crate) struct ObserverRegistry {
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl ObserverRegistry {
    pub(crate) fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }

    pub(crate) fn notify(&mut self, state: &TransportState) {
        for (_, observer) in &mut self.observers {
            observer(state);
        }
    }
}
