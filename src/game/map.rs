//! Tile map
//!
//! A rectangular grid of cells, 0 for floor and 1 for walls, with a
//! fixed pixel size per tile. Rendering draws walls as filled
//! rectangles in world space.

use macroquad::prelude::*;

const WALL: u8 = 1;

pub struct TileMap {
    cells: Vec<Vec<u8>>,
    pub tile_size: f32,
}

impl TileMap {
    /// A cols x rows map whose outermost ring of tiles is wall.
    pub fn bordered(cols: usize, rows: usize, tile_size: f32) -> Self {
        let cells = (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| {
                        if row == 0 || row == rows - 1 || col == 0 || col == cols - 1 {
                            WALL
                        } else {
                            0
                        }
                    })
                    .collect()
            })
            .collect();
        TileMap { cells, tile_size }
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn width_px(&self) -> f32 {
        self.cols() as f32 * self.tile_size
    }

    pub fn height_px(&self) -> f32 {
        self.rows() as f32 * self.tile_size
    }

    /// True when (col, row) is a wall; out-of-range reads as wall.
    pub fn is_wall(&self, col: usize, row: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(WALL)
            == WALL
    }

    /// Draw wall tiles in world space.
    pub fn draw(&self) {
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == WALL {
                    draw_rectangle(
                        col as f32 * self.tile_size,
                        row as f32 * self.tile_size,
                        self.tile_size,
                        self.tile_size,
                        WHITE,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bordered_ring_is_wall() {
        let map = TileMap::bordered(16, 16, 64.0);
        assert!(map.is_wall(0, 0));
        assert!(map.is_wall(15, 0));
        assert!(map.is_wall(0, 15));
        assert!(map.is_wall(15, 15));
        assert!(map.is_wall(7, 0));
        assert!(map.is_wall(0, 7));
        assert!(!map.is_wall(1, 1));
        assert!(!map.is_wall(8, 8));
    }

    #[test]
    fn test_pixel_dimensions() {
        let map = TileMap::bordered(16, 12, 64.0);
        assert_eq!(map.cols(), 16);
        assert_eq!(map.rows(), 12);
        assert_eq!(map.width_px(), 1024.0);
        assert_eq!(map.height_px(), 768.0);
    }

    #[test]
    fn test_out_of_range_reads_wall() {
        let map = TileMap::bordered(16, 16, 64.0);
        assert!(map.is_wall(16, 3));
        assert!(map.is_wall(3, 99));
    }
}
