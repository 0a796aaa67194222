//! EMBER-2D: a minimal 2D engine for tile games
//!
//! A per-frame loop driving game update/render hooks, keyboard
//! watching, tile collision, a centered world camera and named
//! animations shaped by cubic-bezier easing, on top of macroquad's
//! drawing surface. Ships with a small demo room to walk around in.
//!
//! Engine-level keys (outside the demo's own bindings):
//! - P: pause / resume the loop
//! - R: restart with a fresh game instance

mod animation;
mod config;
mod engine;
mod game;
mod input;
mod render;

use macroquad::prelude::*;

use config::EngineConfig;
use engine::frame_loop::{FrameLoop, LoopState};
use engine::Engine;
use game::demo::DemoGame;

fn window_conf() -> Conf {
    let config = EngineConfig::load(config::CONFIG_PATH);
    Conf {
        window_title: format!("{} v{}", config.window_title, engine::VERSION),
        window_width: config.window_width,
        window_height: config.window_height,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging first, before any other code
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let config = EngineConfig::load(config::CONFIG_PATH);

    let mut engine = Engine::new();
    engine.assets.load("player", "assets/textures/player.png").await;

    let mut frame_loop = FrameLoop::new(engine, DemoGame::new);
    frame_loop.overlay_enabled = config.overlay;
    frame_loop.run();

    loop {
        let frame_start = get_time();
        frame_loop.frame();

        // Engine-level keys, outside the game's watch surface.
        if is_key_pressed(KeyCode::P) {
            match frame_loop.engine.state() {
                LoopState::Running => frame_loop.pause(),
                _ => frame_loop.run(),
            }
        }
        if is_key_pressed(KeyCode::R) {
            frame_loop.stop();
            frame_loop.run();
        }

        // FPS limiting
        if let Some(target_frame_time) = config.fps_limit.frame_time() {
            let remaining = target_frame_time - (get_time() - frame_start);
            if remaining > 0.0 {
                // Native: use sleep for bulk, then spin-wait for precision
                #[cfg(not(target_arch = "wasm32"))]
                {
                    let spin_margin = 0.002; // 2ms
                    while get_time() - frame_start + spin_margin < target_frame_time {
                        std::thread::sleep(std::time::Duration::from_millis(1));
                    }
                    while get_time() - frame_start < target_frame_time {
                        std::hint::spin_loop();
                    }
                }
                // WASM: just spin-wait (no thread::sleep available)
                #[cfg(target_arch = "wasm32")]
                {
                    while get_time() - frame_start < target_frame_time {
                        // Busy wait - browser handles frame pacing
                    }
                }
            }
        }

        next_frame().await;
    }
}
