//! Debug text overlay
//!
//! A per-frame buffer of log lines drawn in screen space after the
//! world render, under a fixed header block. The buffer empties on
//! every draw, so games log what they want visible each frame from
//! their update hook.

use macroquad::prelude::*;

const TEXT_SIZE: f32 = 20.0;
const LINE_HEIGHT: f32 = 25.0;
const MARGIN: f32 = 5.0;

#[derive(Default)]
pub struct Overlay {
    lines: Vec<String>,
}

impl Overlay {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Draw the header block and, while the loop is running, the
    /// game's log lines. Clears the buffer for the next frame.
    pub fn draw(&mut self, header: &[String], show_log: bool) {
        let mut line = 1.0;
        for text in header {
            draw_text(text, MARGIN, MARGIN + line * LINE_HEIGHT, TEXT_SIZE, BLUE);
            line += 1.0;
        }
        if show_log {
            for text in &self.lines {
                draw_text(text, MARGIN, MARGIN + line * LINE_HEIGHT, TEXT_SIZE, RED);
                line += 1.0;
            }
        }
        self.lines.clear();
    }

    #[cfg(test)]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
