//! Named-animation scheduler
//!
//! Tracks the animations currently running, at most one per name, and
//! advances all of them once per frame. Each tick maps elapsed
//! wall-clock time through the animation's easing and hands the eased
//! value to the progress callback; the raw progress is kept around for
//! the debug overlay. Everything runs synchronously on the frame loop,
//! so callbacks never overlap each other or update/render.

use std::cell::Cell;
use std::rc::Rc;

use crate::render::camera::Camera;

use super::easing::Easing;

/// Per-frame progress callback. Receives the eased progress and the
/// engine camera, the one piece of engine state animations drive.
pub type ProgressFn = Box<dyn FnMut(f32, &mut Camera)>;

/// Where an animation's completion signal stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    /// Still running (or tied to a run that is).
    Pending,
    /// Ran to progress 1 and fired its last callback.
    Finished,
    /// Removed by `cancel`; no final callback was fired.
    Cancelled,
    /// Never entered the registry (the loop was not running).
    NotStarted,
}

/// Completion signal for a named animation. Cloneable; every clone
/// observes the same run. Settles exactly once.
#[derive(Clone)]
pub struct AnimationHandle {
    status: Rc<Cell<AnimationStatus>>,
}

impl AnimationHandle {
    fn pending() -> Self {
        AnimationHandle {
            status: Rc::new(Cell::new(AnimationStatus::Pending)),
        }
    }

    pub(crate) fn not_started() -> Self {
        AnimationHandle {
            status: Rc::new(Cell::new(AnimationStatus::NotStarted)),
        }
    }

    pub fn status(&self) -> AnimationStatus {
        self.status.get()
    }

    fn settle(&self, status: AnimationStatus) {
        if self.status.get() == AnimationStatus::Pending {
            self.status.set(status);
        }
    }
}

struct RunningAnimation {
    name: String,
    /// Wall clock of the run's first tick; the timeline is anchored
    /// there, so a run scheduled outside a frame does not jump ahead.
    started_ms: Option<f64>,
    duration_ms: f64,
    easing: Easing,
    /// Raw (non-eased) progress from the latest tick.
    progress: f32,
    on_progress: ProgressFn,
    handle: AnimationHandle,
}

/// Registry of running animations, in start order.
#[derive(Default)]
pub struct Animations {
    running: Vec<RunningAnimation>,
}

impl Animations {
    /// Begin a named animation. If one with the same name is already
    /// active this is a no-op returning the existing run's handle, so a
    /// name never runs twice concurrently. The run's timeline anchors
    /// at its first tick.
    pub fn start(
        &mut self,
        name: &str,
        on_progress: ProgressFn,
        duration_ms: f64,
        easing: Easing,
    ) -> AnimationHandle {
        if let Some(existing) = self.running.iter().find(|a| a.name == name) {
            return existing.handle.clone();
        }
        println!("[ember-2d:animations] animating {}", name);
        let handle = AnimationHandle::pending();
        self.running.push(RunningAnimation {
            name: name.to_string(),
            started_ms: None,
            duration_ms,
            easing,
            progress: 0.0,
            on_progress,
            handle: handle.clone(),
        });
        handle
    }

    /// Drop a running animation immediately. Its handle settles as
    /// Cancelled and no further callbacks fire, including a final one.
    pub fn cancel(&mut self, name: &str) {
        if let Some(pos) = self.running.iter().position(|a| a.name == name) {
            let animation = self.running.remove(pos);
            animation.handle.settle(AnimationStatus::Cancelled);
        }
    }

    /// Advance every running animation to `now_ms`. Completed runs are
    /// removed after their final callback and settle as Finished.
    pub fn tick(&mut self, now_ms: f64, camera: &mut Camera) {
        let mut i = 0;
        while i < self.running.len() {
            let animation = &mut self.running[i];
            let started_ms = *animation.started_ms.get_or_insert(now_ms);
            let raw = ((now_ms - started_ms) / animation.duration_ms).min(1.0) as f32;
            animation.progress = raw;
            let eased = animation.easing.apply(raw);
            (animation.on_progress)(eased, camera);
            if raw >= 1.0 {
                let done = self.running.remove(i);
                done.handle.settle(AnimationStatus::Finished);
            } else {
                i += 1;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    /// Raw progress per running animation, in start order.
    pub fn iter_progress(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.running.iter().map(|a| (a.name.as_str(), a.progress))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::easing::{Easing, EASE_IN_OUT};
    use std::cell::RefCell;

    fn recorder() -> (Rc<RefCell<Vec<f32>>>, ProgressFn) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let callback: ProgressFn = Box::new(move |p, _camera| sink.borrow_mut().push(p));
        (seen, callback)
    }

    #[test]
    fn test_linear_progress_midway() {
        let mut animations = Animations::default();
        let mut camera = Camera::default();
        let (seen, callback) = recorder();
        let handle = animations.start("pan", callback, 1000.0, Easing::Linear);

        animations.tick(0.0, &mut camera);
        assert_eq!(*seen.borrow().last().unwrap(), 0.0);

        animations.tick(500.0, &mut camera);
        assert_eq!(handle.status(), AnimationStatus::Pending);
        let last = *seen.borrow().last().unwrap();
        assert!((last - 0.5).abs() < 1e-6);

        animations.tick(1000.0, &mut camera);
        assert_eq!(handle.status(), AnimationStatus::Finished);
        assert_eq!(*seen.borrow().last().unwrap(), 1.0);
        assert!(animations.is_empty());
    }

    #[test]
    fn test_progress_clamped_past_duration() {
        let mut animations = Animations::default();
        let mut camera = Camera::default();
        let (seen, callback) = recorder();
        animations.start("pan", callback, 1000.0, Easing::Linear);
        animations.tick(0.0, &mut camera);

        animations.tick(2500.0, &mut camera);
        assert_eq!(*seen.borrow().last().unwrap(), 1.0);
        assert!(animations.is_empty());
    }

    #[test]
    fn test_duplicate_name_is_single_run() {
        let mut animations = Animations::default();
        let mut camera = Camera::default();
        let (seen_a, callback_a) = recorder();
        let (seen_b, callback_b) = recorder();

        let first = animations.start("zoom", callback_a, 1000.0, Easing::Linear);
        let second = animations.start("zoom", callback_b, 1000.0, Easing::Linear);
        assert_eq!(animations.iter_progress().count(), 1);
        assert_eq!(second.status(), AnimationStatus::Pending);

        animations.tick(0.0, &mut camera);
        animations.tick(1000.0, &mut camera);
        // Only the first run's callback ever fires; both handles settle
        // because they observe the same run.
        assert_eq!(seen_a.borrow().len(), 2);
        assert!(seen_b.borrow().is_empty());
        assert_eq!(first.status(), AnimationStatus::Finished);
        assert_eq!(second.status(), AnimationStatus::Finished);
    }

    #[test]
    fn test_cancel_stops_callbacks() {
        let mut animations = Animations::default();
        let mut camera = Camera::default();
        let (seen, callback) = recorder();
        let handle = animations.start("pan", callback, 1000.0, Easing::Linear);

        animations.tick(100.0, &mut camera);
        animations.cancel("pan");
        animations.tick(200.0, &mut camera);

        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(handle.status(), AnimationStatus::Cancelled);
        assert!(animations.is_empty());
    }

    #[test]
    fn test_cancel_unknown_name_is_noop() {
        let mut animations = Animations::default();
        animations.cancel("ghost");
        assert!(animations.is_empty());
    }

    #[test]
    fn test_eased_value_reaches_callback() {
        let mut animations = Animations::default();
        let mut camera = Camera::default();
        let (seen, callback) = recorder();
        animations.start("zoom", callback, 1000.0, Easing::Preset(&EASE_IN_OUT));
        animations.tick(0.0, &mut camera);

        animations.tick(250.0, &mut camera);
        let eased = *seen.borrow().last().unwrap();
        // ease-in-out starts slow: the eased value trails raw progress.
        assert!(eased > 0.0 && eased < 0.25, "eased was {}", eased);
    }

    #[test]
    fn test_raw_progress_is_introspectable() {
        let mut animations = Animations::default();
        let mut camera = Camera::default();
        let (_seen, callback) = recorder();
        animations.start("zoom", callback, 1000.0, Easing::Preset(&EASE_IN_OUT));
        animations.tick(0.0, &mut camera);

        animations.tick(250.0, &mut camera);
        let (name, raw) = animations.iter_progress().next().unwrap();
        assert_eq!(name, "zoom");
        assert!((raw - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_tick_order_matches_start_order() {
        let mut animations = Animations::default();
        let mut camera = Camera::default();
        let order = Rc::new(RefCell::new(Vec::new()));

        for name in ["first", "second", "third"] {
            let sink = order.clone();
            animations.start(
                name,
                Box::new(move |_p, _camera| sink.borrow_mut().push(name)),
                1000.0,
                Easing::Linear,
            );
        }
        animations.tick(10.0, &mut camera);
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_callbacks_can_move_camera() {
        let mut animations = Animations::default();
        let mut camera = Camera::default();
        animations.start(
            "pan",
            Box::new(|p, camera| camera.x = 100.0 * p),
            1000.0,
            Easing::Linear,
        );
        animations.tick(0.0, &mut camera);
        animations.tick(500.0, &mut camera);
        assert!((camera.x - 50.0).abs() < 1e-4);
    }
}
