//! Authored geometry to collision obstacles.

use crate::geometry::Rect;
use crate::movement::Obstacle;

/// One `tile_size` square obstacle per `[column, row]` fence tile.
#[must_use]
pub fn fence_obstacles(tiles: &[[i32; 2]], tile_size: i32) -> Vec<Obstacle> {
    tiles
        .iter()
        .map(|&[column, row]| {
            Obstacle::new(Rect::new(
                column.saturating_mul(tile_size),
                row.saturating_mul(tile_size),
                tile_size,
                tile_size,
            ))
        })
        .collect()
}

/// Free rectangles as obstacles. Empty rectangles can never collide and are
/// dropped.
#[must_use]
pub fn object_obstacles(objects: &[Rect]) -> Vec<Obstacle> {
    objects
        .iter()
        .filter(|rect| rect.has_area())
        .copied()
        .map(Obstacle::new)
        .collect()
}
