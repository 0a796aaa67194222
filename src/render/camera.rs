//! World camera
//!
//! A 2D offset and uniform scale, applied to the drawing surface as a
//! scoped transform: world coordinate (x, y) maps to the surface
//! center, scaled by `scale`, with y growing downward like screen
//! space. Game logic and animation callbacks mutate the fields freely;
//! render code applies them once per frame.

use macroquad::prelude::*;

pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

impl Camera {
    /// Install the world transform. Must be matched by exactly one
    /// `end` before the frame completes; prefer `scope`, which cannot
    /// be left unbalanced.
    pub fn begin(&self) {
        set_camera(&Camera2D {
            target: vec2(self.x, self.y),
            // Negative y zoom keeps world y pointing down, matching the
            // default screen-space orientation.
            zoom: vec2(
                2.0 * self.scale / screen_width(),
                -2.0 * self.scale / screen_height(),
            ),
            ..Default::default()
        });
    }

    /// Revert to the default screen-space transform.
    pub fn end(&self) {
        set_default_camera();
    }

    /// Run `draw` inside a balanced begin/end pair.
    pub fn scope(&self, draw: impl FnOnce()) {
        self.begin();
        draw();
        self.end();
    }
}
