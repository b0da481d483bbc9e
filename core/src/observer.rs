use serde::{Deserialize, Serialize};

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

pub type Listener<S> = Box<dyn FnMut(&S)>;

/// Ordered listener list. Listeners run synchronously in registration order and
/// must only read the snapshot they receive.
pub struct Observers<S> {
    listeners: Vec<(SubscriptionId, Listener<S>)>,
    next_id: u64,
}

impl<S> Observers<S> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&S) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Builds the snapshot only when somebody is listening.
    pub fn notify_with(&mut self, snapshot: impl FnOnce() -> S) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = snapshot();
        for (_, listener) in self.listeners.iter_mut() {
            listener(&snapshot);
        }
    }
}

impl<S> Default for Observers<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> core::fmt::Debug for Observers<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn notifies_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();

        let first = Rc::clone(&seen);
        observers.subscribe(move |value: &u32| first.borrow_mut().push(("first", *value)));
        let second = Rc::clone(&seen);
        observers.subscribe(move |value: &u32| second.borrow_mut().push(("second", *value)));

        observers.notify_with(|| 7);

        assert_eq!(*seen.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn unsubscribe_removes_only_that_listener() {
        let count = Rc::new(RefCell::new(0));
        let mut observers = Observers::new();

        let a = Rc::clone(&count);
        let id = observers.subscribe(move |_: &()| *a.borrow_mut() += 1);
        let b = Rc::clone(&count);
        observers.subscribe(move |_: &()| *b.borrow_mut() += 10);

        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        observers.notify_with(|| ());

        assert_eq!(*count.borrow(), 10);
    }

    #[test]
    fn snapshot_not_built_without_listeners() {
        let mut observers: Observers<u32> = Observers::new();
        observers.notify_with(|| panic!("nobody is listening"));
    }
}
