use crate::launch::LaunchInvoker;
use crate::links::ShortcutEntry;
use crate::listeners::{Listeners, Subscription};
use crate::store::StoreReader;
use eframe::egui;

/// Source of key-up events for the panel window.
///
/// Listeners are scoped registrations, so the number of live listeners is
/// always the number of [`Subscription`]s still held.
#[derive(Clone, Default)]
pub struct KeyboardHub {
    listeners: Listeners<str>,
}

impl KeyboardHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&self, listener: impl Fn(&str) + 'static) -> Subscription {
        self.listeners.add(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn key_up(&self, key: &str) {
        self.listeners.emit(key);
    }

    /// Forward every key release in a frame's input events.
    pub fn feed(&self, events: &[egui::Event]) {
        for key in events.iter().filter_map(released_key) {
            self.key_up(key);
        }
    }
}

/// Name of the key released by `event`, if it is a key release.
///
/// Repeated releases from a held key are all reported.
pub fn released_key(event: &egui::Event) -> Option<&'static str> {
    match event {
        egui::Event::Key {
            key,
            pressed: false,
            ..
        } => Some(key.symbol_or_name()),
        _ => None,
    }
}

/// Entries whose accelerator matches `key`, in store order.
pub fn matching<'a>(entries: &'a [ShortcutEntry], key: &'a str) -> impl Iterator<Item = &'a ShortcutEntry> + 'a {
    entries.iter().filter(move |entry| entry.matches(key))
}

/// Resolves key-up events to launches.
///
/// Every entry sharing the pressed key fires, not just the first one.
pub struct ShortcutDispatcher {
    links: StoreReader,
    launcher: LaunchInvoker,
}

impl ShortcutDispatcher {
    pub fn new(links: StoreReader, launcher: LaunchInvoker) -> Self {
        Self { links, launcher }
    }

    /// Launch every entry bound to `key`. Returns how many launched.
    pub fn dispatch(&self, key: &str) -> usize {
        let snapshot = self.links.snapshot();
        let mut fired = 0;
        for entry in matching(&snapshot, key) {
            tracing::debug!(key, app = %entry.app_name, "shortcut matched");
            self.launcher.launch(&entry.link_path);
            fired += 1;
        }
        fired
    }

    /// Register as the hub's key listener for as long as the returned guard
    /// lives.
    pub fn mount(self, hub: &KeyboardHub) -> MountedDispatcher {
        let listener = hub.add_listener(move |key| {
            self.dispatch(key);
        });
        tracing::debug!(listeners = hub.listener_count(), "shortcut listener registered");
        MountedDispatcher { _listener: listener }
    }
}

/// A dispatcher attached to a keyboard hub. Dropping it detaches the listener.
#[derive(Debug)]
pub struct MountedDispatcher {
    _listener: Subscription,
}
