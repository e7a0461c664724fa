//! Change subscriptions shared by the stores

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered change callbacks, notified in subscription order
pub struct Subscribers<T> {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Box<dyn FnMut(&T)>)>,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            callbacks: Vec::new(),
        }
    }
}

impl<T> Subscribers<T> {
    pub fn subscribe(&mut self, callback: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns false when the id was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sub, _)| *sub != id);
        self.callbacks.len() != before
    }

    pub fn notify(&mut self, state: &T) {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(state);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}
