//! Master frame loop
//!
//! Drives the hosted game once per host frame: poll input, advance
//! animations, update, clear, render, overlay. Also owns the
//! run/pause/stop state machine and the FPS sampler.
//!
//! The host (macroquad) presents frames continuously; pausing does not
//! stop presentation, it freezes the engine-side work. A paused frame
//! still clears and renders so the scene stays visible, but nothing
//! advances.

use macroquad::prelude::*;

use crate::game::Game;

use super::{Engine, VERSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// No live session; `run` starts one (constructing the game first
    /// if needed).
    #[default]
    Stopped,
    Running,
    /// Frozen but presentable; `run` resumes without reconstructing.
    Paused,
}

/// Counts presented frames and samples the count into an FPS figure
/// once per second.
#[derive(Default)]
pub struct FpsCounter {
    frames: u32,
    fps: u32,
    last_sample: f64,
}

impl FpsCounter {
    pub fn frame(&mut self, now_seconds: f64) {
        self.frames += 1;
        if now_seconds - self.last_sample >= 1.0 {
            self.fps = self.frames;
            self.frames = 0;
            self.last_sample = now_seconds;
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// The per-frame driver for one hosted game type.
pub struct FrameLoop<G: Game> {
    pub engine: Engine,
    game: Option<G>,
    factory: Box<dyn Fn(&mut Engine) -> G>,
    /// Whether the current game instance has had its `start` hook.
    started: bool,
    pub overlay_enabled: bool,
}

impl<G: Game> FrameLoop<G> {
    pub fn new(engine: Engine, factory: impl Fn(&mut Engine) -> G + 'static) -> Self {
        FrameLoop {
            engine,
            game: None,
            factory: Box::new(factory),
            started: false,
            overlay_enabled: true,
        }
    }

    /// Start, or resume, the loop. The game is constructed on the first
    /// call (and again after `stop`); its `start` hook runs exactly
    /// once per instance, so resuming from a pause does not repeat it.
    pub fn run(&mut self) {
        if self.game.is_none() {
            self.game = Some((self.factory)(&mut self.engine));
        }
        if self.engine.state != LoopState::Running {
            self.engine.state = LoopState::Running;
            println!("[ember-2d:loop] start");
            if !self.started {
                self.started = true;
                if let Some(game) = self.game.as_mut() {
                    game.start(&mut self.engine);
                }
            }
        }
    }

    /// Freeze the loop, keeping all game state.
    pub fn pause(&mut self) {
        if self.engine.state == LoopState::Running {
            self.engine.state = LoopState::Paused;
            println!("[ember-2d:loop] pause");
        }
    }

    /// Discard the current game and stage a fresh instance. The loop
    /// stays stopped until the next `run`, which will fire the fresh
    /// instance's `start` hook.
    pub fn stop(&mut self) {
        self.engine.state = LoopState::Stopped;
        self.game = Some((self.factory)(&mut self.engine));
        self.started = false;
        println!("[ember-2d:loop] stop");
    }

    /// One host frame. Update precedes render; animation ticks precede
    /// update.
    pub fn frame(&mut self) {
        let now = get_time();
        self.engine.clock_ms = now * 1000.0;

        if self.engine.is_running() {
            self.engine.poll_input();
            let Engine {
                animations,
                camera,
                clock_ms,
                ..
            } = &mut self.engine;
            animations.tick(*clock_ms, camera);
            if let Some(game) = self.game.as_mut() {
                game.update(&mut self.engine);
            }
        }

        clear_background(BLACK);
        if self.engine.state != LoopState::Stopped {
            if let Some(game) = self.game.as_mut() {
                game.render(&mut self.engine);
            }
        }

        if self.overlay_enabled {
            self.draw_overlay();
        }
        self.engine.fps.frame(now);
    }

    fn draw_overlay(&mut self) {
        let running = self.engine.is_running();
        let header = [
            format!("[{}]", game_name::<G>()),
            format!("ember-2d {}", VERSION),
            if running {
                format!("FPS: {}", self.engine.fps.fps())
            } else {
                "FPS: [paused]".to_string()
            },
            animations_line(&self.engine.animations, running),
            camera_line(&self.engine.camera),
            "-------------------------------".to_string(),
        ];
        self.engine.overlay.draw(&header, running);
    }
}

/// Short type name of the hosted game, for the overlay header.
fn game_name<G>() -> &'static str {
    let full = std::any::type_name::<G>();
    full.rsplit("::").next().unwrap_or(full)
}

fn animations_line(animations: &crate::animation::scheduler::Animations, running: bool) -> String {
    if !running {
        return "Animations: [paused]".to_string();
    }
    if animations.is_empty() {
        return "Animations: [--]".to_string();
    }
    let entries: Vec<String> = animations
        .iter_progress()
        .map(|(name, progress)| format!("{}({:.2}%)", name, progress * 100.0))
        .collect();
    format!("Animations: [{}]", entries.join(", "))
}

fn camera_line(camera: &crate::render::camera::Camera) -> String {
    format!(
        "Camera: [{},{}]({})",
        camera.x as i32,
        camera.y as i32,
        (camera.scale * 100.0) as i32
    )
}
