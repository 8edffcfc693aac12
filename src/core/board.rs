//! Board module - the layered tile board
//!
//! Tiles are dealt into a pyramid of layers: layer z has (6-z) rows by
//! (8-z) columns and sits half a tile further right and down than the layer
//! below, so upper tiles straddle the seams of the lower ones.
//!
//! All occlusion logic works in "half-unit" coordinates: a tile's footprint
//! is 2x2 half-units anchored at (2*col + layer, 2*row + layer). Blocking is
//! a pure function of the current removed flags and is recomputed from
//! scratch after every mutation; the cached copy exists only for rendering.

use crate::core::rng::SimpleRng;
use crate::core::scoring::{layer_count, pair_count};
use crate::types::{Symbol, TileId, LAYER_COLS, LAYER_ROWS};

/// A single matchable tile. Plain data: position, symbol, removed flag.
/// Tiles are logically destroyed (removed = true), never deleted, so a
/// `TileId` stays valid for the whole stage and removal can be undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub symbol: Symbol,
    pub row: u8,
    pub col: u8,
    pub layer: u8,
    pub removed: bool,
}

impl Tile {
    /// Left edge of the footprint in half-units.
    pub fn half_x(&self) -> i16 {
        2 * self.col as i16 + self.layer as i16
    }

    /// Top edge of the footprint in half-units.
    pub fn half_y(&self) -> i16 {
        2 * self.row as i16 + self.layer as i16
    }
}

/// Overlap of two 2-wide intervals starting at `a` and `b`, in half-units.
fn overlap(a: i16, b: i16) -> i16 {
    (a.min(b) + 2) - a.max(b)
}

/// The layered board plus a derived occlusion cache.
#[derive(Debug, Clone)]
pub struct Board {
    tiles: Vec<Tile>,
    /// Render cache only; authoritative answers come from `is_blocked`.
    blocked: Vec<bool>,
}

impl Board {
    /// Deal a new board for the given stage.
    ///
    /// Builds the pair multiset (each symbol pushed twice, cycling the
    /// alphabet), Fisher-Yates shuffles it, then fills the pyramid row-major
    /// per layer until the deck runs out.
    pub fn generate(stage: u32, rng: &mut SimpleRng) -> Self {
        let pairs = pair_count(stage);
        let mut deck: Vec<Symbol> = Vec::with_capacity(pairs as usize * 2);
        for n in 0..pairs {
            let sym = Symbol::for_pair(n);
            deck.push(sym);
            deck.push(sym);
        }
        rng.shuffle(&mut deck);

        let layers = layer_count(stage);
        let mut tiles = Vec::with_capacity(deck.len());
        let mut next = deck.into_iter();

        'deal: for layer in 0..layers {
            let rows = LAYER_ROWS - layer;
            let cols = LAYER_COLS - layer;
            for row in 0..rows {
                for col in 0..cols {
                    let Some(symbol) = next.next() else {
                        break 'deal;
                    };
                    tiles.push(Tile {
                        symbol,
                        row,
                        col,
                        layer,
                        removed: false,
                    });
                }
            }
        }

        let mut board = Self {
            blocked: vec![false; tiles.len()],
            tiles,
        };
        board.recompute_blocked();
        board
    }

    /// Build a board from explicit tiles (tests and undo scenarios).
    #[cfg(test)]
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        let mut board = Self {
            blocked: vec![false; tiles.len()],
            tiles,
        };
        board.recompute_blocked();
        board
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    /// Number of tiles still on the board (not removed).
    pub fn remaining(&self) -> usize {
        self.tiles.iter().filter(|t| !t.removed).count()
    }

    pub fn is_cleared(&self) -> bool {
        self.tiles.iter().all(|t| t.removed)
    }

    /// Authoritative blocking predicate, computed from current removed flags.
    ///
    /// A tile is blocked if some live tile on a strictly higher layer
    /// overlaps its footprint, or if it has live same-layer neighbours on
    /// both its left and right side at once. Removed tiles block nothing and
    /// are never blocked.
    pub fn is_blocked(&self, id: TileId) -> bool {
        let tile = self.tiles[id];
        if tile.removed {
            return false;
        }

        let (hx, hy) = (tile.half_x(), tile.half_y());
        let mut left = false;
        let mut right = false;

        for (other_id, other) in self.tiles.iter().enumerate() {
            if other_id == id || other.removed {
                continue;
            }
            let (ox, oy) = (other.half_x(), other.half_y());

            if other.layer > tile.layer {
                if overlap(hx, ox) > 0 && overlap(hy, oy) > 0 {
                    return true;
                }
            } else if other.layer == tile.layer && overlap(hy, oy) > 0 {
                match ox - hx {
                    2 => right = true,
                    -2 => left = true,
                    _ => {}
                }
            }
        }

        left && right
    }

    /// A tile the player may pick up right now.
    pub fn is_selectable(&self, id: TileId) -> bool {
        self.tiles
            .get(id)
            .is_some_and(|t| !t.removed && !self.is_blocked(id))
    }

    /// Refresh the rendering cache. Called after every mutation.
    pub fn recompute_blocked(&mut self) {
        for id in 0..self.tiles.len() {
            self.blocked[id] = self.is_blocked(id);
        }
    }

    /// Cached blocked flag for rendering. May be stale between a mutation
    /// and the following `recompute_blocked`; game rules use `is_blocked`.
    pub fn blocked_cached(&self, id: TileId) -> bool {
        self.blocked[id]
    }

    /// Logically destroy a tile. Returns false if it was already removed.
    pub fn remove(&mut self, id: TileId) -> bool {
        match self.tiles.get_mut(id) {
            Some(tile) if !tile.removed => {
                tile.removed = true;
                self.recompute_blocked();
                true
            }
            _ => false,
        }
    }

    /// Put a removed tile back (undo). Returns false if it was not removed.
    pub fn restore(&mut self, id: TileId) -> bool {
        match self.tiles.get_mut(id) {
            Some(tile) if tile.removed => {
                tile.removed = false;
                self.recompute_blocked();
                true
            }
            _ => false,
        }
    }

    /// Re-deal the symbols of the live tiles among their existing positions.
    /// Tile count, positions and stage are untouched.
    pub fn shuffle_symbols(&mut self, rng: &mut SimpleRng) {
        let live: Vec<TileId> = (0..self.tiles.len())
            .filter(|&id| !self.tiles[id].removed)
            .collect();
        let mut symbols: Vec<Symbol> = live.iter().map(|&id| self.tiles[id].symbol).collect();
        rng.shuffle(&mut symbols);
        for (&id, &symbol) in live.iter().zip(symbols.iter()) {
            self.tiles[id].symbol = symbol;
        }
        self.recompute_blocked();
    }

    /// Find one currently matchable pair among selectable tiles.
    ///
    /// Groups selectable tiles by symbol and returns the first group with
    /// two or more members. Order is deterministic (tile id order).
    pub fn hint_pair(&self) -> Option<(TileId, TileId)> {
        let selectable: Vec<TileId> = (0..self.tiles.len())
            .filter(|&id| self.is_selectable(id))
            .collect();

        for (i, &a) in selectable.iter().enumerate() {
            for &b in &selectable[i + 1..] {
                if self.tiles[a].symbol == self.tiles[b].symbol {
                    return Some((a, b));
                }
            }
        }
        None
    }
}
