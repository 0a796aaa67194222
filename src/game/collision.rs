//! Corner-sampled tile collision
//!
//! A proposed rectangle is tested by sampling the map cell under each
//! of its four corners. Thin walls between sample points can slip
//! through at large step sizes; the demo's per-frame step keeps
//! adjacent corners within one tile of each other.

use super::map::TileMap;

/// True when the axis-aligned rectangle lies inside the map and none of
/// its corners touch a wall cell.
pub fn region_free(map: &TileMap, x: f32, y: f32, width: f32, height: f32) -> bool {
    if x < 0.0 || y < 0.0 || x + width > map.width_px() || y + height > map.height_px() {
        return false;
    }

    let tile = map.tile_size;
    let left = (x / tile) as usize;
    let right = ((x + width) / tile) as usize;
    let top = (y / tile) as usize;
    let bottom = ((y + height) / tile) as usize;

    !(map.is_wall(left, top)
        || map.is_wall(right, top)
        || map.is_wall(left, bottom)
        || map.is_wall(right, bottom))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_map() -> TileMap {
        TileMap::bordered(16, 16, 64.0)
    }

    #[test]
    fn test_open_floor_is_free() {
        let map = demo_map();
        assert!(region_free(&map, 128.0, 128.0, 64.0, 64.0));
        assert!(region_free(&map, 200.5, 300.25, 64.0, 64.0));
    }

    #[test]
    fn test_wall_corner_blocks() {
        let map = demo_map();
        // One pixel into the border wall on each side.
        assert!(!region_free(&map, 63.0, 128.0, 64.0, 64.0));
        assert!(!region_free(&map, 128.0, 63.0, 64.0, 64.0));
        assert!(!region_free(&map, 897.0, 128.0, 64.0, 64.0));
        assert!(!region_free(&map, 128.0, 897.0, 64.0, 64.0));
    }

    #[test]
    fn test_flush_against_wall_is_free() {
        let map = demo_map();
        // Touching the inner face of the border is allowed; crossing is
        // not.
        assert!(region_free(&map, 64.0, 128.0, 64.0, 64.0));
        assert!(region_free(&map, 128.0, 64.0, 64.0, 64.0));
    }

    #[test]
    fn test_outside_map_blocks() {
        let map = demo_map();
        assert!(!region_free(&map, -1.0, 128.0, 64.0, 64.0));
        assert!(!region_free(&map, 128.0, -0.5, 64.0, 64.0));
        assert!(!region_free(&map, 961.0, 128.0, 64.0, 64.0));
    }
}
