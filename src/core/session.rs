//! Session module - one run of the layered-board game
//!
//! Ties the board, RNG and scoring together and owns the run lifecycle:
//! stage progression, charges, terminal states. The selection discipline is
//! pluggable: a session is built as either a collector run (bounded slot bar,
//! match-on-count) or a pairwise run (select-and-compare). Exactly one
//! discipline is active per session.
//!
//! Every mutation is synchronous and reported through [`GameEvent`]s; the
//! presentation layer decides what to animate and when to call
//! [`Session::advance_stage`]. Nothing in here waits on a timer.

use arrayvec::ArrayVec;

use crate::core::board::Board;
use crate::core::rng::SimpleRng;
use crate::core::scoring::match_points;
use crate::types::{Symbol, TileId, BOMB_CHARGES, COLLECTOR_CAPACITY, HINT_CHARGES};

/// A tile sitting in a collector slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collected {
    pub tile: TileId,
    pub symbol: Symbol,
}

/// Bounded FIFO slot bar: filling it with no matchable pair ends the run.
#[derive(Debug, Clone, Default)]
pub struct Collector {
    slots: ArrayVec<Collected, COLLECTOR_CAPACITY>,
    /// Re-armed by each collect that survives matching; one undo per collect.
    can_undo: bool,
}

impl Collector {
    /// First symbol currently held twice or more, if any.
    fn matchable_symbol(&self) -> Option<Symbol> {
        self.slots
            .iter()
            .find(|c| self.slots.iter().filter(|o| o.symbol == c.symbol).count() >= 2)
            .map(|c| c.symbol)
    }

    /// Remove the two earliest occurrences of `symbol`.
    fn take_pair(&mut self, symbol: Symbol) {
        for _ in 0..2 {
            if let Some(pos) = self.slots.iter().position(|c| c.symbol == symbol) {
                self.slots.remove(pos);
            }
        }
    }
}

/// Single selected-tile pointer: click a second tile to compare symbols.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pairwise {
    selected: Option<TileId>,
}

/// The selection discipline driving a session. The two designs are mutually
/// exclusive, not layered.
#[derive(Debug, Clone)]
pub enum Discipline {
    Collector(Collector),
    Pairwise(Pairwise),
}

/// Where the run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Board emptied; waiting for the app layer to call `advance_stage`.
    StageCleared,
    /// Collector filled with no matchable pair. Terminal.
    GameOver,
}

/// Synchronous state-change notifications for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Tile committed into a collector slot.
    Collected { tile: TileId, slot: usize },
    Selected { tile: TileId },
    Deselected { tile: TileId },
    SelectionMoved { from: TileId, to: TileId },
    /// Two tiles of `symbol` cleared for `points`.
    PairCleared { symbol: Symbol, points: u32 },
    StageCleared { stage: u32, score: u32 },
    /// Collector stuck; the run is over.
    Stuck { score: u32 },
}

/// Why a limited-use action did nothing. Advisory, never an error state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeRefused {
    NoCharges,
    NothingToClear,
    NoPairFree,
    WrongDiscipline,
}

impl ChargeRefused {
    pub fn message(self) -> &'static str {
        match self {
            ChargeRefused::NoCharges => "no charges left",
            ChargeRefused::NothingToClear => "the slot bar is already empty",
            ChargeRefused::NoPairFree => "no matchable pair is free right now",
            ChargeRefused::WrongDiscipline => "not available in this mode",
        }
    }
}

/// One run of the layered-board game.
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    rng: SimpleRng,
    discipline: Discipline,
    stage: u32,
    score: u32,
    hint_charges: u8,
    bomb_charges: u8,
    phase: Phase,
}

impl Session {
    /// New collector-discipline run.
    pub fn new_collector(seed: u32) -> Self {
        Self::new(seed, Discipline::Collector(Collector::default()))
    }

    /// New pairwise-discipline run.
    pub fn new_pairwise(seed: u32) -> Self {
        Self::new(seed, Discipline::Pairwise(Pairwise::default()))
    }

    fn new(seed: u32, discipline: Discipline) -> Self {
        let mut rng = SimpleRng::new(seed);
        let board = Board::generate(1, &mut rng);
        Self {
            board,
            rng,
            discipline,
            stage: 1,
            score: 0,
            hint_charges: HINT_CHARGES,
            bomb_charges: BOMB_CHARGES,
            phase: Phase::Playing,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn stage(&self) -> u32 {
        self.stage
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn hint_charges(&self) -> u8 {
        self.hint_charges
    }

    pub fn bomb_charges(&self) -> u8 {
        self.bomb_charges
    }

    /// Collector slot contents, in collection order. Empty for pairwise runs.
    pub fn collector_slots(&self) -> &[Collected] {
        match &self.discipline {
            Discipline::Collector(c) => &c.slots,
            Discipline::Pairwise(_) => &[],
        }
    }

    /// Currently selected tile of a pairwise run.
    pub fn selected(&self) -> Option<TileId> {
        match &self.discipline {
            Discipline::Pairwise(p) => p.selected,
            Discipline::Collector(_) => None,
        }
    }

    pub fn is_pairwise(&self) -> bool {
        matches!(self.discipline, Discipline::Pairwise(_))
    }

    /// Handle a click on a tile. Clicks on blocked or removed tiles, or
    /// outside the playing phase, are silently rejected: no state change,
    /// no events.
    pub fn click_tile(&mut self, id: TileId) -> Vec<GameEvent> {
        if self.phase != Phase::Playing || !self.board.is_selectable(id) {
            return Vec::new();
        }

        match &mut self.discipline {
            Discipline::Collector(_) => self.collect(id),
            Discipline::Pairwise(_) => self.compare(id),
        }
    }

    /// Collector discipline: move the tile into the next slot, then resolve
    /// matches one pair per scan pass until none remain.
    fn collect(&mut self, id: TileId) -> Vec<GameEvent> {
        let symbol = self.board.tiles()[id].symbol;
        let points = match_points(self.stage);

        let Discipline::Collector(collector) = &mut self.discipline else {
            return Vec::new();
        };
        if collector.slots.is_full() {
            return Vec::new();
        }

        // The tile leaves the board and stops interacting the moment it is
        // picked; the fly-to-slot animation is presentation only.
        self.board.remove(id);
        let slot = collector.slots.len();
        collector.slots.push(Collected { tile: id, symbol });
        collector.can_undo = true;

        let mut events = vec![GameEvent::Collected { tile: id, slot }];

        while let Some(sym) = collector.matchable_symbol() {
            collector.take_pair(sym);
            collector.can_undo = false;
            self.score += points;
            events.push(GameEvent::PairCleared {
                symbol: sym,
                points,
            });
        }

        if collector.slots.is_full() {
            self.phase = Phase::GameOver;
            events.push(GameEvent::Stuck { score: self.score });
        } else if self.board.is_cleared() && collector.slots.is_empty() {
            self.phase = Phase::StageCleared;
            events.push(GameEvent::StageCleared {
                stage: self.stage,
                score: self.score,
            });
        }

        events
    }

    /// Pairwise discipline: select, deselect, or compare against the current
    /// selection.
    fn compare(&mut self, id: TileId) -> Vec<GameEvent> {
        let symbol = self.board.tiles()[id].symbol;
        let points = match_points(self.stage);

        let Discipline::Pairwise(pairwise) = &mut self.discipline else {
            return Vec::new();
        };

        let Some(selected) = pairwise.selected else {
            pairwise.selected = Some(id);
            return vec![GameEvent::Selected { tile: id }];
        };

        if selected == id {
            pairwise.selected = None;
            return vec![GameEvent::Deselected { tile: id }];
        }

        if self.board.tiles()[selected].symbol == symbol {
            pairwise.selected = None;
            self.board.remove(selected);
            self.board.remove(id);
            self.score += points;
            let mut events = vec![GameEvent::PairCleared { symbol, points }];
            if self.board.is_cleared() {
                self.phase = Phase::StageCleared;
                events.push(GameEvent::StageCleared {
                    stage: self.stage,
                    score: self.score,
                });
            }
            events
        } else {
            pairwise.selected = Some(id);
            vec![GameEvent::SelectionMoved {
                from: selected,
                to: id,
            }]
        }
    }

    /// Undo the most recent collect: pop it from the slot bar back onto the
    /// board. Single-level; re-armed by the next collect. Pairwise runs have
    /// no undo.
    pub fn undo(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let Discipline::Collector(collector) = &mut self.discipline else {
            return false;
        };
        if !collector.can_undo {
            return false;
        }
        let Some(last) = collector.slots.pop() else {
            return false;
        };
        collector.can_undo = false;
        self.board.restore(last.tile)
    }

    /// Empty the slot bar, spending one bomb charge. The cleared tiles stay
    /// destroyed; they do not return to the board.
    pub fn use_bomb(&mut self) -> Result<(), ChargeRefused> {
        let Discipline::Collector(collector) = &mut self.discipline else {
            return Err(ChargeRefused::WrongDiscipline);
        };
        if self.bomb_charges == 0 {
            return Err(ChargeRefused::NoCharges);
        }
        if collector.slots.is_empty() {
            return Err(ChargeRefused::NothingToClear);
        }
        self.bomb_charges -= 1;
        collector.slots.clear();
        collector.can_undo = false;
        Ok(())
    }

    /// Find one free pair to highlight. Spends a charge only on success.
    pub fn use_hint(&mut self) -> Result<(TileId, TileId), ChargeRefused> {
        if self.hint_charges == 0 {
            return Err(ChargeRefused::NoCharges);
        }
        match self.board.hint_pair() {
            Some(pair) => {
                self.hint_charges -= 1;
                Ok(pair)
            }
            None => Err(ChargeRefused::NoPairFree),
        }
    }

    /// Re-deal the symbols of the remaining tiles. Free and unlimited.
    pub fn shuffle(&mut self) {
        self.board.shuffle_symbols(&mut self.rng);
        if let Discipline::Collector(collector) = &mut self.discipline {
            collector.can_undo = false;
        }
    }

    /// Deal the next stage. Only meaningful after a `StageCleared` event;
    /// the app layer calls this once its display delay has passed.
    pub fn advance_stage(&mut self) -> bool {
        if self.phase != Phase::StageCleared {
            return false;
        }
        self.stage += 1;
        self.board = Board::generate(self.stage, &mut self.rng);
        self.reset_discipline();
        self.phase = Phase::Playing;
        true
    }

    /// Start the run over: stage 1, zero score, fresh charges.
    pub fn restart(&mut self) {
        self.stage = 1;
        self.score = 0;
        self.hint_charges = HINT_CHARGES;
        self.bomb_charges = BOMB_CHARGES;
        self.board = Board::generate(self.stage, &mut self.rng);
        self.reset_discipline();
        self.phase = Phase::Playing;
    }

    /// Swap in an explicit board (small fixed scenarios in tests).
    #[cfg(test)]
    fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    fn reset_discipline(&mut self) {
        match &mut self.discipline {
            Discipline::Collector(c) => {
                c.slots.clear();
                c.can_undo = false;
            }
            Discipline::Pairwise(p) => p.selected = None,
        }
    }
}
