//! The state-updated multicast event.

/// Identifies one subscription on a [`StateUpdated`] event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// In-process multicast event carrying raw reply text.
///
/// Subscribers receive the exact textual body of every successful reply,
/// before any parsing is attempted. Subscribers must tolerate reply
/// interleaving — overlapping requests complete in any order. The list is
/// only ever touched from the host's main thread.
#[derive(Default)]
pub struct StateUpdated {
    next_id: u64,
    subscribers: Vec<(SubscriberId, Box<dyn FnMut(&str)>)>,
}

impl StateUpdated {
    /// Create an event with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber. Returns an id for later removal.
    pub fn subscribe(&mut self, f: impl FnMut(&str) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(f)));
        id
    }

    /// Remove a subscriber. Returns `true` if it was registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        if let Some(pos) = self.subscribers.iter().position(|(sid, _)| *sid == id) {
            self.subscribers.remove(pos);
            return true;
        }
        false
    }

    /// Deliver `payload` to every subscriber, in subscription order.
    pub fn broadcast(&mut self, payload: &str) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(payload);
        }
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for StateUpdated {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateUpdated")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
