//! Core module - the layered tile board engine
//!
//! Pure game rules and state: no UI, no I/O, no timers. One board engine
//! serves both selection disciplines (collector and pairwise).

pub mod board;
pub mod layout;
pub mod rng;
pub mod scoring;
pub mod session;

// Re-export commonly used types
pub use board::{Board, Tile};
pub use rng::SimpleRng;
pub use session::{ChargeRefused, Collected, GameEvent, Phase, Session};
