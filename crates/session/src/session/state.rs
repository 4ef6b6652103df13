//! Single-slot broadcast
//!
//! Holds one current value and a list of subscribers. A subscriber is called
//! once with the current value when it subscribes and again after every
//! [`Broadcast::set`], so late subscribers always see the latest state.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Slot<T> {
    value: T,
    listeners: Vec<(u64, Listener<T>)>,
    next_id: u64,
    version: u64,
}

/// Current value plus subscribers notified on change
///
/// Clones share the same slot.
pub struct Broadcast<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

impl<T: Clone + 'static> Broadcast<T> {
    pub fn new(value: T) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot {
                value,
                listeners: Vec::new(),
                next_id: 0,
                version: 0,
            })),
        }
    }

    /// Snapshot of the current value
    pub fn current(&self) -> T {
        self.slot.borrow().value.clone()
    }

    /// Replace the value and notify every subscriber in subscription order
    ///
    /// A listener may call `set` again; the nested call notifies everyone
    /// with the newer value and the remaining notifications of this call
    /// are dropped, so no subscriber ends on a superseded value.
    pub fn set(&self, value: T) {
        let (version, listeners): (u64, Vec<Listener<T>>) = {
            let mut slot = self.slot.borrow_mut();
            slot.value = value.clone();
            slot.version += 1;
            let listeners = slot.listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
            (slot.version, listeners)
        };
        // Borrow released: listeners may subscribe, unsubscribe, read or set.
        for listener in listeners {
            if self.slot.borrow().version != version {
                break;
            }
            listener(&value);
        }
    }

    /// Subscribe; `listener` runs immediately with the current value
    ///
    /// The subscription lasts until the returned handle is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let listener: Listener<T> = Rc::new(listener);
        let (id, current) = {
            let mut slot = self.slot.borrow_mut();
            let id = slot.next_id;
            slot.next_id += 1;
            slot.listeners.push((id, Rc::clone(&listener)));
            (id, slot.value.clone())
        };
        listener(&current);

        let slot = Rc::downgrade(&self.slot);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(slot) = Weak::upgrade(&slot) {
                    slot.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
                }
            })),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.slot.borrow().listeners.len()
    }
}

impl<T> Clone for Broadcast<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: Clone + Default + 'static> Default for Broadcast<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Broadcast<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.borrow();
        f.debug_struct("Broadcast")
            .field("value", &slot.value)
            .field("subscribers", &slot.listeners.len())
            .finish()
    }
}

/// Handle returned by [`Broadcast::subscribe`]; unsubscribes on drop
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Keep the listener registered for the lifetime of the broadcast
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
