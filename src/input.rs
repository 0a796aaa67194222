//! Keyboard watching
//!
//! Two registries mirror what games ask about keys: a watch map of
//! held-state per key, refreshed from every key event, and a map of
//! callbacks fired on key-down edges. The engine polls events once per
//! frame and pushes them through here; game update code only reads.

use std::collections::HashMap;

use macroquad::prelude::KeyCode;

use crate::engine::Engine;

/// Key-down-edge callback. Gets full engine access, so it may mutate
/// the camera, start animations or re-register callbacks.
pub type KeyPressFn = Box<dyn FnMut(&mut Engine)>;

#[derive(Default)]
pub struct Keyboard {
    watch: HashMap<KeyCode, bool>,
    press: HashMap<KeyCode, KeyPressFn>,
}

impl Keyboard {
    /// Track held-state for a set of keys, seeded as released.
    pub fn watch_keys(&mut self, keys: &[KeyCode]) {
        println!("[ember-2d:keyboard] watching keys {:?}", keys);
        for key in keys {
            self.watch.entry(*key).or_insert(false);
        }
    }

    /// Register a callback fired on every key-down edge of `key`,
    /// replacing any previous callback for that key.
    pub fn watch_key_press(&mut self, key: KeyCode, callback: KeyPressFn) {
        println!("[ember-2d:keyboard] watching key (callback) {:?}", key);
        self.press.insert(key, callback);
    }

    /// Held-state of a key; false when the key was never seen.
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.watch.get(&key).copied().unwrap_or(false)
    }

    /// Record a key transition. Every physical key event lands here,
    /// watched or not.
    pub(crate) fn set_key(&mut self, key: KeyCode, down: bool) {
        self.watch.insert(key, down);
    }

    pub(crate) fn take_press(&mut self, key: KeyCode) -> Option<KeyPressFn> {
        self.press.remove(&key)
    }

    /// Put a lifted callback back unless the callback itself registered
    /// a replacement while it ran.
    pub(crate) fn restore_press(&mut self, key: KeyCode, callback: KeyPressFn) {
        self.press.entry(key).or_insert(callback);
    }
}
