//! Board generation and occlusion behavior through the public API.

use tui_arcade::core::{Board, SimpleRng};
use tui_arcade::types::{BASE_LAYERS, LAYER_COLS, LAYER_ROWS};

#[test]
fn test_generate_is_deterministic() {
    let mut rng_a = SimpleRng::new(99);
    let mut rng_b = SimpleRng::new(99);
    let a = Board::generate(1, &mut rng_a);
    let b = Board::generate(1, &mut rng_b);

    assert_eq!(a.tiles().len(), b.tiles().len());
    for (ta, tb) in a.tiles().iter().zip(b.tiles()) {
        assert_eq!(ta.symbol, tb.symbol);
        assert_eq!((ta.row, ta.col, ta.layer), (tb.row, tb.col, tb.layer));
    }
}

#[test]
fn test_stage_one_board_shape() {
    let mut rng = SimpleRng::new(7);
    let board = Board::generate(1, &mut rng);

    // 30 pairs deal as 60 tiles.
    assert_eq!(board.tiles().len(), 60);

    // Tiles stay inside their layer's shrinking grid.
    for tile in board.tiles() {
        assert!(tile.layer < BASE_LAYERS);
        assert!(tile.row < LAYER_ROWS - tile.layer);
        assert!(tile.col < LAYER_COLS - tile.layer);
        assert!(!tile.removed);
    }

    // Every symbol appears an even number of times.
    let mut counts = std::collections::HashMap::new();
    for tile in board.tiles() {
        *counts.entry(tile.symbol).or_insert(0u32) += 1;
    }
    assert!(counts.values().all(|&c| c % 2 == 0));
}

#[test]
fn test_some_tiles_start_selectable() {
    let mut rng = SimpleRng::new(3);
    let board = Board::generate(1, &mut rng);
    let free = (0..board.tiles().len())
        .filter(|&id| board.is_selectable(id))
        .count();
    assert!(free > 0);
    assert!(free < board.tiles().len());
}

#[test]
fn test_removing_tiles_never_blocks_more() {
    let mut rng = SimpleRng::new(11);
    let mut board = Board::generate(1, &mut rng);

    let before: Vec<bool> = (0..board.tiles().len())
        .map(|id| board.is_selectable(id))
        .collect();

    let free = (0..board.tiles().len())
        .find(|&id| board.is_selectable(id))
        .unwrap();
    board.remove(free);

    for id in 0..board.tiles().len() {
        if id == free || board.tiles()[id].removed {
            continue;
        }
        // Occlusion is monotone: a removal can only open tiles up.
        if before[id] {
            assert!(board.is_selectable(id), "removal blocked tile {id}");
        }
    }
}

#[test]
fn test_shuffle_keeps_positions_and_symbol_multiset() {
    let mut rng = SimpleRng::new(5);
    let mut board = Board::generate(1, &mut rng);

    let positions: Vec<_> = board
        .tiles()
        .iter()
        .map(|t| (t.row, t.col, t.layer))
        .collect();
    let mut symbols_before: Vec<_> = board.tiles().iter().map(|t| t.symbol).collect();

    board.shuffle_symbols(&mut rng);

    let positions_after: Vec<_> = board
        .tiles()
        .iter()
        .map(|t| (t.row, t.col, t.layer))
        .collect();
    let mut symbols_after: Vec<_> = board.tiles().iter().map(|t| t.symbol).collect();

    assert_eq!(positions, positions_after);
    symbols_before.sort();
    symbols_after.sort();
    assert_eq!(symbols_before, symbols_after);
}

#[test]
fn test_hint_pair_is_selectable_and_matching() {
    let mut rng = SimpleRng::new(21);
    let board = Board::generate(2, &mut rng);

    let (a, b) = board.hint_pair().expect("fresh board has a free pair");
    assert_ne!(a, b);
    assert!(board.is_selectable(a));
    assert!(board.is_selectable(b));
    assert_eq!(board.tiles()[a].symbol, board.tiles()[b].symbol);
}
