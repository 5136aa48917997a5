use crate::links::ShortcutEntry;
use crate::listeners::{Listeners, Subscription};
use std::cell::RefCell;
use std::rc::Rc;

/// Immutable view of the store at one point in time.
pub type Snapshot = Rc<[ShortcutEntry]>;

/// Ordered shortcut list, in display order.
///
/// The owner is the only one able to [`replace`](LinkStore::replace) the
/// contents. Everyone else works through a [`StoreReader`].
pub struct LinkStore {
    shared: StoreReader,
}

/// Read-only handle onto a [`LinkStore`].
#[derive(Clone)]
pub struct StoreReader {
    entries: Rc<RefCell<Snapshot>>,
    listeners: Listeners<[ShortcutEntry]>,
}

impl Default for LinkStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkStore {
    pub fn new() -> Self {
        Self {
            shared: StoreReader {
                entries: Rc::new(RefCell::new(Rc::from(Vec::new()))),
                listeners: Listeners::new(),
            },
        }
    }

    /// Swap in a complete new list and notify subscribers.
    ///
    /// Subscribers are always notified, even when the list is unchanged.
    pub fn replace(&self, entries: Vec<ShortcutEntry>) {
        let snapshot: Snapshot = Rc::from(entries);
        *self.shared.entries.borrow_mut() = Rc::clone(&snapshot);
        tracing::debug!(count = snapshot.len(), "link store replaced");
        self.shared.listeners.emit(&snapshot);
    }

    pub fn reader(&self) -> StoreReader {
        self.shared.clone()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.shared.snapshot()
    }

    pub fn subscribe(&self, listener: impl Fn(&[ShortcutEntry]) + 'static) -> Subscription {
        self.shared.subscribe(listener)
    }
}

impl StoreReader {
    pub fn snapshot(&self) -> Snapshot {
        Rc::clone(&self.entries.borrow())
    }

    pub fn subscribe(&self, listener: impl Fn(&[ShortcutEntry]) + 'static) -> Subscription {
        self.listeners.add(listener)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
