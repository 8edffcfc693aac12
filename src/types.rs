//! Shared types and constants across the arcade games
//! This module contains pure data types with no external dependencies

/// Tile glyph alphabet for the layered board. Pair counts above the alphabet
/// size cycle back to the start, so symbols repeat with more than one pair.
pub const TILE_GLYPHS: [&str; 24] = [
    "🐰", "🦊", "👮", "🥕", "🍩", "🚔", "🦥", "🦁", //
    "🐯", "⚖️", "⛓️", "🚨", "📻", "📢", "🏙️", "🍎", //
    "🍍", "🍹", "🍦", "🍰", "🍪", "🥨", "🥜", "🍓",
];

/// Layered board stage parameters
pub const BASE_PAIRS: u32 = 20;
pub const PAIRS_PER_STAGE: u32 = 10;
pub const PAIR_CAP: u32 = 72;
pub const BASE_LAYERS: u8 = 3;
pub const LAYER_CAP: u8 = 4;
pub const LAYER_ROWS: u8 = 6;
pub const LAYER_COLS: u8 = 8;

/// Logical tile size in layout pixels (rendering coordinates only)
pub const TILE_W: f32 = 50.0;
pub const TILE_H: f32 = 70.0;
/// Fraction of the viewport the fitted board may cover
pub const FIT_COVERAGE: f32 = 0.96;

/// Collector discipline parameters
pub const COLLECTOR_CAPACITY: usize = 4;
pub const MATCH_BASE_POINTS: u32 = 200;

/// Limited-use charges per run
pub const HINT_CHARGES: u8 = 3;
pub const BOMB_CHARGES: u8 = 1;

/// Presentation delays (milliseconds). The core commits state synchronously;
/// these only pace what the app layer shows between commits.
pub const STAGE_ADVANCE_DELAY_MS: u64 = 1000;
pub const EPISODE_ADVANCE_DELAY_MS: u64 = 2000;
pub const HINT_FLASH_MS: u64 = 2000;

/// Merge game parameters
pub const MERGE_BOARD_SIZE: usize = 7;
pub const START_ENERGY: u32 = 50;
pub const START_COINS: u32 = 1250;
pub const XP_PER_LEVEL: u32 = 100;
pub const QUEST_XP: u32 = 50;
pub const MERGE_XP_PER_LEVEL: u32 = 10;
pub const INITIAL_SPAWNS: usize = 3;

/// A symbol on the layered board: an index into [`TILE_GLYPHS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(pub u8);

impl Symbol {
    /// The symbol for the n-th pair, cycling through the alphabet.
    pub fn for_pair(n: u32) -> Self {
        Symbol((n % TILE_GLYPHS.len() as u32) as u8)
    }

    pub fn glyph(self) -> &'static str {
        TILE_GLYPHS[self.0 as usize % TILE_GLYPHS.len()]
    }
}

/// Index of a tile in its board's tile list. Stable for the lifetime of a
/// stage: tiles are logically removed, never deleted.
pub type TileId = usize;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_cycles_alphabet() {
        assert_eq!(Symbol::for_pair(0), Symbol(0));
        assert_eq!(Symbol::for_pair(23), Symbol(23));
        assert_eq!(Symbol::for_pair(24), Symbol(0));
        assert_eq!(Symbol::for_pair(30), Symbol(6));
    }

    #[test]
    fn test_symbol_glyph_lookup() {
        assert_eq!(Symbol(0).glyph(), "🐰");
        assert_eq!(Symbol(23).glyph(), "🍓");
    }
}
