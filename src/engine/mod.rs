//! Engine context
//!
//! One explicit object owns everything the engine shares with a hosted
//! game: the camera, the keyboard registries, the animation scheduler,
//! loaded assets, the debug overlay, the frame clock and the loop
//! state. Games receive it by mutable reference in their hooks; there
//! are no ambient singletons.
//!
//! Everything here runs on the single frame-loop thread. Animation
//! ticks, key callbacks and game hooks execute to completion in a fixed
//! order inside each frame, which is what makes the lock-free shared
//! state safe.

pub mod assets;
pub mod frame_loop;
pub mod overlay;

use macroquad::prelude::*;

use crate::animation::easing::Easing;
use crate::animation::scheduler::{AnimationHandle, Animations, ProgressFn};
use crate::input::{KeyPressFn, Keyboard};
use crate::render::camera::Camera;

use assets::AssetStore;
use frame_loop::{FpsCounter, LoopState};
use overlay::Overlay;

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Engine {
    pub camera: Camera,
    pub keyboard: Keyboard,
    pub animations: Animations,
    pub assets: AssetStore,
    overlay: Overlay,
    state: LoopState,
    /// Wall clock at the start of the current frame, in milliseconds.
    clock_ms: f64,
    fps: FpsCounter,
}

impl Engine {
    pub fn new() -> Self {
        println!("-----------------------------------");
        println!("[ember-2d {}]", VERSION);
        Engine {
            camera: Camera::default(),
            keyboard: Keyboard::default(),
            animations: Animations::default(),
            assets: AssetStore::default(),
            overlay: Overlay::default(),
            state: LoopState::Stopped,
            clock_ms: 0.0,
            fps: FpsCounter::default(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Append a line to the per-frame debug overlay.
    pub fn log(&mut self, message: impl Into<String>) {
        self.overlay.push(message);
    }

    /// Track held-state for a set of keys.
    pub fn watch_keys(&mut self, keys: &[KeyCode]) {
        self.keyboard.watch_keys(keys);
    }

    /// Fire `callback` on every key-down edge of `key`.
    pub fn watch_key_press(&mut self, key: KeyCode, callback: KeyPressFn) {
        self.keyboard.watch_key_press(key, callback);
    }

    /// Start a named animation. While the loop is not running this does
    /// nothing and returns an already-settled handle; while an
    /// animation with the same name is active it returns the existing
    /// run's handle instead of starting a second one.
    pub fn animate(
        &mut self,
        name: &str,
        on_progress: ProgressFn,
        duration_ms: f64,
        easing: Easing,
    ) -> AnimationHandle {
        if !self.is_running() {
            return AnimationHandle::not_started();
        }
        self.animations.start(name, on_progress, duration_ms, easing)
    }

    /// Stop a named animation immediately, without a final callback.
    pub fn cancel_animation(&mut self, name: &str) {
        self.animations.cancel(name);
    }

    /// Poll this frame's keyboard events: refresh held-state for every
    /// key that changed and fire key-down-edge callbacks.
    pub(crate) fn poll_input(&mut self) {
        let pressed = get_keys_pressed();
        for key in &pressed {
            self.keyboard.set_key(*key, true);
        }
        for key in get_keys_released() {
            self.keyboard.set_key(key, false);
        }
        for key in pressed {
            self.fire_press(key);
        }
    }

    /// Fire the key-down callback registered for `key`, if any. The
    /// callback is lifted out of the registry while it runs so it can
    /// be handed the whole engine.
    pub(crate) fn fire_press(&mut self, key: KeyCode) {
        if let Some(mut callback) = self.keyboard.take_press(key) {
            println!("[ember-2d:keyboard] key callback: {:?}", key);
            callback(self);
            self.keyboard.restore_press(key, callback);
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::scheduler::AnimationStatus;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_animate_requires_running_loop() {
        let mut engine = Engine::new();
        let handle = engine.animate("pan", Box::new(|_p, _camera| {}), 1000.0, Easing::Linear);
        assert_eq!(handle.status(), AnimationStatus::NotStarted);
        assert!(engine.animations.is_empty());
    }

    #[test]
    fn test_animate_while_running() {
        let mut engine = Engine::new();
        engine.state = LoopState::Running;
        let handle = engine.animate("pan", Box::new(|_p, _camera| {}), 1000.0, Easing::Linear);
        assert_eq!(handle.status(), AnimationStatus::Pending);
        assert!(!engine.animations.is_empty());
    }

    #[test]
    fn test_key_callback_gets_engine_access() {
        let mut engine = Engine::new();
        engine.state = LoopState::Running;
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        engine.watch_key_press(
            KeyCode::H,
            Box::new(move |engine| {
                counter.set(counter.get() + 1);
                engine.animate("zoom", Box::new(|_p, _camera| {}), 500.0, Easing::Linear);
            }),
        );

        engine.fire_press(KeyCode::H);
        assert_eq!(fired.get(), 1);
        assert!(!engine.animations.is_empty());

        // The callback stays registered for later edges.
        engine.fire_press(KeyCode::H);
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn test_key_callback_can_replace_itself() {
        let mut engine = Engine::new();
        let fired = Rc::new(Cell::new(Vec::new()));
        let outer = fired.clone();
        engine.watch_key_press(
            KeyCode::H,
            Box::new(move |engine| {
                let mut seen = outer.take();
                seen.push("old");
                outer.set(seen);
                let inner = outer.clone();
                engine.watch_key_press(
                    KeyCode::H,
                    Box::new(move |_engine| {
                        let mut seen = inner.take();
                        seen.push("new");
                        inner.set(seen);
                    }),
                );
            }),
        );

        engine.fire_press(KeyCode::H);
        engine.fire_press(KeyCode::H);
        assert_eq!(fired.take(), vec!["old", "new"]);
    }

    #[test]
    fn test_log_buffers_until_drawn() {
        let mut engine = Engine::new();
        engine.log("one");
        engine.log("two");
        assert_eq!(engine.overlay.line_count(), 2);
    }
}
