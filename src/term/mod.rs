//! Terminal front end: renderer plus per-game views.

pub mod renderer;
pub mod views;

pub use renderer::{Row, Span, SpanStyle, TerminalRenderer};
pub use views::{selectable_ids, step_cursor, MahjongView, MergeView, NonogramView};
