//! Atlas sprites
//!
//! A sprite is one square cell of a sprite-sheet texture, addressed by
//! column/row index, drawn at a world position. The sheet is looked up
//! by asset name every draw so a sheet that has not loaded yet simply
//! skips its frame and retries on the next one.

use macroquad::prelude::*;

use crate::engine::assets::AssetStore;

pub struct Sprite {
    /// Asset name of the sprite-sheet texture.
    pub sheet: String,
    /// Source cell size in sheet pixels.
    pub cell_size: f32,
    pub index_x: u32,
    pub index_y: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Sprite {
    pub fn new(sheet: impl Into<String>, cell_size: f32) -> Self {
        Sprite {
            sheet: sheet.into(),
            cell_size,
            index_x: 0,
            index_y: 0,
            x: 0.0,
            y: 0.0,
            width: cell_size,
            height: cell_size,
        }
    }

    /// Sheet sub-rectangle for the current cell indices.
    pub fn source_rect(&self) -> Rect {
        Rect::new(
            self.index_x as f32 * self.cell_size,
            self.index_y as f32 * self.cell_size,
            self.cell_size,
            self.cell_size,
        )
    }

    /// Draw the current cell in world space. Skips silently when the
    /// sheet texture is not loaded.
    pub fn draw(&self, assets: &AssetStore) {
        let Some(texture) = assets.texture(&self.sheet) else {
            return;
        };
        draw_texture_ex(
            texture,
            self.x,
            self.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(self.width, self.height)),
                source: Some(self.source_rect()),
                ..Default::default()
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_rect_tracks_indices() {
        let mut sprite = Sprite::new("player", 64.0);
        assert_eq!(sprite.source_rect(), Rect::new(0.0, 0.0, 64.0, 64.0));

        sprite.index_x = 3;
        sprite.index_y = 10;
        assert_eq!(sprite.source_rect(), Rect::new(192.0, 640.0, 64.0, 64.0));
    }

    #[test]
    fn test_new_fills_cell_sized_quad() {
        let sprite = Sprite::new("player", 64.0);
        assert_eq!(sprite.width, 64.0);
        assert_eq!(sprite.height, 64.0);
    }
}
