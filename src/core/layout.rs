//! Layout module - scale-to-fit screen placement for board tiles
//!
//! Pure rendering math: computes where each tile lands inside a viewport.
//! Logical adjacency and blocking never depend on anything in this file.

use crate::core::board::Board;
use crate::types::{TileId, FIT_COVERAGE, TILE_H, TILE_W};

/// Screen-space rectangle for one tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedTile {
    pub id: TileId,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub layer: u8,
}

/// The uniform scale and centering offsets used by a fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Compute the fit for a board inside `view_w` x `view_h`.
///
/// The board's bounding box (in logical pixels, tile 50x70, half-tile layer
/// offsets) is scaled uniformly to cover at most 96% of the viewport, never
/// scaled up, and centered. Removed tiles still count toward the box so the
/// layout stays stable as the stage empties.
pub fn fit(board: &Board, view_w: f32, view_h: f32) -> Fit {
    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;

    for tile in board.tiles() {
        let x = tile.half_x() as f32 * (TILE_W / 2.0);
        let y = tile.half_y() as f32 * (TILE_H / 2.0);
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x + TILE_W);
        max_y = max_y.max(y + TILE_H);
    }

    if board.tiles().is_empty() {
        return Fit {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
    }

    let board_w = max_x - min_x;
    let board_h = max_y - min_y;
    let scale_x = (view_w * FIT_COVERAGE) / board_w;
    let scale_y = (view_h * FIT_COVERAGE) / board_h;
    let scale = scale_x.min(scale_y).min(1.0);

    Fit {
        scale,
        offset_x: (view_w - board_w * scale) / 2.0 - min_x * scale,
        offset_y: (view_h - board_h * scale) / 2.0 - min_y * scale,
    }
}

/// Place every live tile, lowest layer first so painters-order draws stack
/// correctly.
pub fn place_tiles(board: &Board, view_w: f32, view_h: f32) -> Vec<PlacedTile> {
    let fit = fit(board, view_w, view_h);

    let mut placed: Vec<PlacedTile> = board
        .tiles()
        .iter()
        .enumerate()
        .filter(|(_, t)| !t.removed)
        .map(|(id, t)| PlacedTile {
            id,
            x: t.half_x() as f32 * (TILE_W / 2.0) * fit.scale + fit.offset_x,
            y: t.half_y() as f32 * (TILE_H / 2.0) * fit.scale + fit.offset_y,
            w: TILE_W * fit.scale,
            h: TILE_H * fit.scale,
            layer: t.layer,
        })
        .collect();

    placed.sort_by_key(|p| p.layer);
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::SimpleRng;

    #[test]
    fn test_fit_never_scales_up() {
        let mut rng = SimpleRng::new(1);
        let board = Board::generate(1, &mut rng);
        let fit = fit(&board, 100_000.0, 100_000.0);
        assert_eq!(fit.scale, 1.0);
    }

    #[test]
    fn test_fit_covers_at_most_96_percent() {
        let mut rng = SimpleRng::new(1);
        let board = Board::generate(1, &mut rng);
        let (view_w, view_h) = (800.0, 500.0);
        let f = fit(&board, view_w, view_h);

        for p in place_tiles(&board, view_w, view_h) {
            assert!(p.x >= -0.001 && p.x + p.w <= view_w + 0.001);
            assert!(p.y >= -0.001 && p.y + p.h <= view_h + 0.001);
        }
        assert!(f.scale > 0.0 && f.scale <= 1.0);
    }

    #[test]
    fn test_fit_centers_board() {
        let mut rng = SimpleRng::new(1);
        let board = Board::generate(1, &mut rng);
        let (view_w, view_h) = (800.0, 500.0);
        let placed = place_tiles(&board, view_w, view_h);

        let min_x = placed.iter().map(|p| p.x).fold(f32::MAX, f32::min);
        let max_x = placed.iter().map(|p| p.x + p.w).fold(f32::MIN, f32::max);
        let left_margin = min_x;
        let right_margin = view_w - max_x;
        assert!((left_margin - right_margin).abs() < 0.5);
    }

    #[test]
    fn test_painters_order_by_layer() {
        let mut rng = SimpleRng::new(2);
        let board = Board::generate(2, &mut rng); // 4 layers at stage 2
        let placed = place_tiles(&board, 800.0, 500.0);
        for pair in placed.windows(2) {
            assert!(pair[0].layer <= pair[1].layer);
        }
    }
}
