//! Demo game: a walkable tile room
//!
//! A bordered 16x16 room, a four-direction atlas-animated player, a
//! camera that trails the player, and two named camera animations: an
//! intro zoom on start and an overview framing on H. Exercises every
//! engine hook and capability.

use macroquad::prelude::*;

use crate::animation::easing::{Easing, EasingCurve};
use crate::animation::{lerp, remap};
use crate::animation::scheduler::{AnimationHandle, AnimationStatus};
use crate::engine::Engine;
use crate::render::sprite::Sprite;

use super::collision::region_free;
use super::map::TileMap;
use super::Game;

const TILE_SIZE: f32 = 64.0;
const PLAYER_SIZE: f32 = 64.0;
const PLAYER_SPEED: f32 = 4.0;
const WALK_FRAMES: u32 = 9;

// Atlas rows for the four facing directions.
const ROW_UP: u32 = 8;
const ROW_LEFT: u32 = 9;
const ROW_DOWN: u32 = 10;
const ROW_RIGHT: u32 = 11;

pub struct DemoGame {
    player: Sprite,
    map: TileMap,
    /// Completion signal of the intro camera animation; movement stays
    /// locked until it settles.
    intro: Option<AnimationHandle>,
}

impl DemoGame {
    pub fn new(engine: &mut Engine) -> Self {
        let map = TileMap::bordered(16, 16, TILE_SIZE);

        let mut player = Sprite::new("player", PLAYER_SIZE);
        player.x = 2.0 * TILE_SIZE;
        player.y = 2.0 * TILE_SIZE;
        player.index_y = ROW_DOWN;

        engine.watch_keys(&[KeyCode::W, KeyCode::A, KeyCode::S, KeyCode::D]);

        let overview = vec2(map.width_px() / 2.0, map.height_px() / 2.0);
        engine.watch_key_press(
            KeyCode::H,
            Box::new(move |engine: &mut Engine| {
                // Don't fight the intro over the camera.
                engine.cancel_animation("intro-zoom");
                let (from_x, from_y, from_scale) =
                    (engine.camera.x, engine.camera.y, engine.camera.scale);
                // Slight overshoot on the way out, settling at the
                // overview framing.
                let easing = EasingCurve::new(0.34, 1.56, 0.64, 1.0)
                    .map(Easing::Curve)
                    .unwrap_or(Easing::Linear);
                engine.animate(
                    "camera-out",
                    Box::new(move |progress, camera| {
                        camera.scale = lerp(from_scale, 0.75, progress);
                        camera.x = lerp(from_x, overview.x, progress);
                        camera.y = lerp(from_y, overview.y, progress);
                    }),
                    1000.0,
                    easing,
                );
            }),
        );

        DemoGame {
            player,
            map,
            intro: None,
        }
    }

    /// Move the player if the target region is clear. Advances the walk
    /// cycle only on actual movement.
    fn step(&mut self, dx: f32, dy: f32) -> bool {
        let next_x = self.player.x + dx;
        let next_y = self.player.y + dy;
        if !region_free(
            &self.map,
            next_x,
            next_y,
            self.player.width,
            self.player.height,
        ) {
            return false;
        }
        self.player.x = next_x;
        self.player.y = next_y;
        self.player.index_x += 1;
        if self.player.index_x >= WALK_FRAMES {
            self.player.index_x = 0;
        }
        true
    }
}

impl Game for DemoGame {
    fn start(&mut self, engine: &mut Engine) {
        let map_center = vec2(self.map.width_px() / 2.0, self.map.height_px() / 2.0);
        let home = vec2(4.0 * TILE_SIZE, 4.0 * TILE_SIZE);
        let handle = engine.animate(
            "intro-zoom",
            Box::new(move |progress, camera| {
                // Zoom past the resting scale, then ease back down over
                // the last quarter.
                if progress < 0.75 {
                    camera.scale = lerp(0.2, 1.8, remap(progress, 0.0, 0.75, 0.0, 1.0));
                } else {
                    camera.scale = lerp(1.8, 1.5, remap(progress, 0.75, 1.0, 0.0, 1.0));
                }
                camera.x = lerp(map_center.x, home.x, progress);
                camera.y = lerp(map_center.y, home.y, progress);
            }),
            1500.0,
            Easing::named("ease-in-out").unwrap_or(Easing::Linear),
        );
        self.intro = Some(handle);
    }

    fn update(&mut self, engine: &mut Engine) {
        engine.log(format!("Player: [{}, {}]", self.player.x, self.player.y));

        let up = engine.keyboard.is_down(KeyCode::W);
        let left = engine.keyboard.is_down(KeyCode::A);
        let down = engine.keyboard.is_down(KeyCode::S);
        let right = engine.keyboard.is_down(KeyCode::D);
        engine.log(format!("Keyboard: {}, {}, {}, {}", up, left, down, right));

        // Controls unlock once the intro camera settles.
        let intro_running = self
            .intro
            .as_ref()
            .is_some_and(|handle| handle.status() == AnimationStatus::Pending);

        if !intro_running {
            if up {
                self.step(0.0, -PLAYER_SPEED);
                self.player.index_y = ROW_UP;
            }
            if left {
                self.step(-PLAYER_SPEED, 0.0);
                self.player.index_y = ROW_LEFT;
            }
            if down {
                self.step(0.0, PLAYER_SPEED);
                self.player.index_y = ROW_DOWN;
            }
            if right {
                self.step(PLAYER_SPEED, 0.0);
                self.player.index_y = ROW_RIGHT;
            }
        }
        if !(up || left || down || right) {
            self.player.index_x = 0;
        }
        engine.log(format!("Frame: {}", self.player.index_x));

        // Trail the player once it leaves the middle 40% of the view.
        let margin_x = screen_width() / 2.0 * 0.4;
        let margin_y = screen_height() / 2.0 * 0.4;
        if self.player.x - engine.camera.x > margin_x {
            engine.camera.x += PLAYER_SPEED;
        }
        if self.player.x - engine.camera.x < -margin_x {
            engine.camera.x -= PLAYER_SPEED;
        }
        if self.player.y - engine.camera.y > margin_y {
            engine.camera.y += PLAYER_SPEED;
        }
        if self.player.y - engine.camera.y < -margin_y {
            engine.camera.y -= PLAYER_SPEED;
        }
    }

    fn render(&mut self, engine: &mut Engine) {
        let camera = &engine.camera;
        let assets = &engine.assets;
        camera.scope(|| {
            self.map.draw();
            self.player.draw(assets);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> DemoGame {
        let mut engine = Engine::new();
        DemoGame::new(&mut engine)
    }

    #[test]
    fn test_player_spawns_on_open_floor() {
        let game = demo();
        assert_eq!(game.player.x, 128.0);
        assert_eq!(game.player.y, 128.0);
        assert!(region_free(
            &game.map,
            game.player.x,
            game.player.y,
            game.player.width,
            game.player.height
        ));
    }

    #[test]
    fn test_step_moves_on_open_floor() {
        let mut game = demo();
        assert!(game.step(PLAYER_SPEED, 0.0));
        assert_eq!(game.player.x, 128.0 + PLAYER_SPEED);
    }

    #[test]
    fn test_step_blocked_by_border_wall() {
        let mut game = demo();
        game.player.x = TILE_SIZE;
        assert!(!game.step(-PLAYER_SPEED, 0.0));
        assert_eq!(game.player.x, TILE_SIZE);
    }

    #[test]
    fn test_walk_cycle_wraps() {
        let mut game = demo();
        for _ in 0..WALK_FRAMES {
            assert!(game.step(0.0, PLAYER_SPEED));
        }
        assert_eq!(game.player.index_x, 0);
    }

    #[test]
    fn test_blocked_step_freezes_walk_cycle() {
        let mut game = demo();
        game.player.x = TILE_SIZE;
        let frame = game.player.index_x;
        game.step(-PLAYER_SPEED, 0.0);
        assert_eq!(game.player.index_x, frame);
    }
}
