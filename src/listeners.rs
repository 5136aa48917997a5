//! Callback registry shared by the link store and the keyboard hub.
//!
//! Registrations are scoped: [`Listeners::add`] hands back a [`Subscription`]
//! and the callback stays registered exactly as long as that guard lives.

use slab::Slab;
use std::cell::RefCell;
use std::rc::Rc;

type Callback<T> = Rc<dyn Fn(&T)>;

pub struct Listeners<T: ?Sized> {
    slots: Rc<RefCell<Slab<Callback<T>>>>,
}

impl<T: ?Sized> Clone for Listeners<T> {
    fn clone(&self) -> Self {
        Self {
            slots: Rc::clone(&self.slots),
        }
    }
}

impl<T: ?Sized + 'static> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + 'static> Listeners<T> {
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slab::new())),
        }
    }

    pub fn add(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let key = self.slots.borrow_mut().insert(Rc::new(callback));
        let slots = Rc::downgrade(&self.slots);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(slots) = slots.upgrade() {
                    let mut slots = slots.borrow_mut();
                    if slots.contains(key) {
                        slots.remove(key);
                    }
                }
            })),
        }
    }

    /// Call every registered callback with `value`.
    pub fn emit(&self, value: &T) {
        // Callbacks may subscribe or unsubscribe while running, so the
        // registry must not stay borrowed during the calls.
        let callbacks: Vec<Callback<T>> = self
            .slots
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for cb in callbacks {
            cb(value);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Guard for a registered callback. Dropping it unregisters the callback.
#[must_use = "dropping a Subscription unregisters its callback immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}
