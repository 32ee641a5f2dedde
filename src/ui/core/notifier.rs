//! Listener registries with guard-based unsubscription.
//!
//! A [`Notifier`] is a clonable broadcast point for one kind of event.
//! Subscribing yields a channel receiver plus a guard; dropping or releasing
//! the guard removes the listener, so a component that unsubscribes during
//! teardown can never be re-entered by a late event.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tokio::sync::mpsc;

pub type SubscriberId = u64;

struct Registry<T> {
    subscribers: HashMap<SubscriberId, mpsc::UnboundedSender<T>>,
    next_id: SubscriberId,
}

/// Broadcast point for one event type. Clones share the registry.
pub struct Notifier<T> {
    inner: Arc<Mutex<Registry<T>>>,
}

impl<T> Clone for Notifier<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> Notifier<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Registry {
                subscribers: HashMap::new(),
                next_id: 1,
            })),
        }
    }

    fn registry(&self) -> MutexGuard<'_, Registry<T>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a listener. The subscription stays live until its guard is
    /// released or dropped.
    pub fn subscribe(&self) -> Subscription<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = {
            let mut registry = self.registry();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.subscribers.insert(id, tx);
            id
        };
        Subscription {
            events: rx,
            guard: SubscriptionGuard {
                id,
                registry: Some(Arc::downgrade(&self.inner)),
            },
        }
    }

    /// Deliver an event to every live subscriber. Subscribers whose receiver
    /// is gone are dropped from the registry on the way.
    pub fn publish(&self, event: T) {
        let mut registry = self.registry();
        registry.subscribers.retain(|_, tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry().subscribers.len()
    }
}

impl<T: Clone> Default for Notifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving end of a subscription plus the guard keeping it registered.
pub struct Subscription<T> {
    pub events: mpsc::UnboundedReceiver<T>,
    pub guard: SubscriptionGuard<T>,
}

impl<T> Subscription<T> {
    /// Drain everything delivered so far without blocking.
    pub fn drain(&mut self) -> Vec<T> {
        let mut drained = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            drained.push(event);
        }
        drained
    }
}

/// Removes the subscriber from the registry when released or dropped.
pub struct SubscriptionGuard<T> {
    id: SubscriberId,
    registry: Option<Weak<Mutex<Registry<T>>>>,
}

impl<T> SubscriptionGuard<T> {
    /// Unsubscribe now instead of waiting for drop.
    pub fn release(mut self) {
        self.unsubscribe();
    }

    fn unsubscribe(&mut self) {
        if let Some(weak) = self.registry.take() {
            if let Some(inner) = weak.upgrade() {
                let mut registry = inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                registry.subscribers.remove(&self.id);
            }
        }
    }
}

impl<T> Drop for SubscriptionGuard<T> {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
