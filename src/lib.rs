//! A small arcade of casual detective-themed minigames for the terminal:
//! a layered tile-matching board (two selection disciplines), a nonogram
//! block puzzle, and a merge-and-quest progression board.
//!
//! Game rules live under [`core`], [`nonogram`], and [`merge`] and are
//! plain synchronous state machines; the terminal front end under [`term`]
//! and the key bindings in [`input`] are thin layers over them.

pub mod core;
pub mod input;
pub mod merge;
pub mod nonogram;
pub mod scoreboard;
pub mod term;
pub mod types;
