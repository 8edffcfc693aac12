//! Views: turn game state into styled rows for the renderer.
//!
//! Views are pure functions of session state plus a little presentation
//! state (cursor, transient message, hint flash) owned by the app loop.
//! They never mutate a session.

use crate::core::layout::place_tiles;
use crate::core::session::Phase;
use crate::core::{Board, Session};
use crate::merge::MergeSession;
use crate::nonogram::{rotated, Puzzle};
use crate::scoreboard::ScoreEntry;
use crate::term::renderer::{Row, Span, SpanStyle};
use crate::types::{TileId, COLLECTOR_CAPACITY, TILE_H, TILE_W};

/// Character canvas the layered board is fitted into. A tile is 4 columns
/// by 2 rows, so these map back to logical pixels via TILE_W/4 and TILE_H/2.
const CANVAS_COLS: usize = 48;
const CANVAS_ROWS: usize = 18;

/// Tiles the player can pick right now, in tile-id order.
pub fn selectable_ids(board: &Board) -> Vec<TileId> {
    (0..board.tiles().len())
        .filter(|&id| board.is_selectable(id))
        .collect()
}

/// Move the cursor through the selectable tiles, wrapping at the ends.
/// Returns the current cursor when it is still valid and `step` is 0, the
/// first selectable tile when the cursor is gone, or `None` on an empty
/// board.
pub fn step_cursor(board: &Board, cursor: Option<TileId>, step: i32) -> Option<TileId> {
    let ids = selectable_ids(board);
    if ids.is_empty() {
        return None;
    }
    let Some(current) = cursor.and_then(|c| ids.iter().position(|&id| id == c)) else {
        return Some(ids[0]);
    };
    let len = ids.len() as i32;
    let next = (current as i32 + step).rem_euclid(len);
    Some(ids[next as usize])
}

/// Presentation state for the layered-board game.
#[derive(Debug, Clone, Default)]
pub struct MahjongView {
    pub cursor: Option<TileId>,
    pub hint: Option<(TileId, TileId)>,
    pub message: String,
    pub leaderboard: Option<Result<Vec<ScoreEntry>, String>>,
}

impl MahjongView {
    pub fn render(&self, session: &Session) -> Vec<Row> {
        let mut rows = Vec::new();

        rows.push(vec![
            Span::styled(format!("STAGE {}", session.stage()), SpanStyle::Title),
            Span::plain("   "),
            Span::styled(format!("SCORE {}", session.score()), SpanStyle::Good),
            Span::plain(format!(
                "   hints {}   bombs {}",
                session.hint_charges(),
                session.bomb_charges()
            )),
        ]);
        rows.push(Vec::new());

        rows.extend(self.render_board(session));
        rows.push(Vec::new());
        rows.push(self.render_slots(session));
        rows.push(Vec::new());

        match session.phase() {
            Phase::GameOver => {
                rows.push(vec![Span::styled(
                    format!(
                        "CASE CLOSED - slot bar stuck. Final score {} at stage {}.",
                        session.score(),
                        session.stage()
                    ),
                    SpanStyle::Alert,
                )]);
                rows.extend(self.render_leaderboard());
                rows.push(vec![Span::plain("press r to restart, q to quit")]);
            }
            Phase::StageCleared => {
                rows.push(vec![Span::styled(
                    "Stage cleared! Dealing the next one...",
                    SpanStyle::Good,
                )]);
            }
            Phase::Playing => {
                if !self.message.is_empty() {
                    rows.push(vec![Span::styled(&*self.message, SpanStyle::Alert)]);
                } else {
                    rows.push(Vec::new());
                }
                rows.push(vec![Span::styled(
                    "arrows/tab: move  enter: pick  u: undo  b: bomb  h: hint  s: shuffle  q: quit",
                    SpanStyle::Dim,
                )]);
            }
        }

        rows
    }

    /// Draw the pyramid by fitting the logical layout into the canvas.
    /// Higher layers come later in painters order and overwrite lower ones.
    fn render_board(&self, session: &Session) -> Vec<Row> {
        let view_w = CANVAS_COLS as f32 * (TILE_W / 4.0);
        let view_h = CANVAS_ROWS as f32 * (TILE_H / 2.0);
        let placed = place_tiles(session.board(), view_w, view_h);

        // Cell text "" marks the continuation column of a wide glyph.
        let mut canvas: Vec<Vec<(String, SpanStyle)>> =
            vec![vec![(" ".to_string(), SpanStyle::Plain); CANVAS_COLS]; CANVAS_ROWS];

        for p in &placed {
            let col = (p.x / (TILE_W / 4.0)).round() as usize;
            let row = (p.y / (TILE_H / 2.0)).round() as usize;
            if row >= CANVAS_ROWS || col + 4 > CANVAS_COLS {
                continue;
            }
            let tile = &session.board().tiles()[p.id];
            let style = if self.cursor == Some(p.id) {
                SpanStyle::Cursor
            } else if self
                .hint
                .is_some_and(|(a, b)| a == p.id || b == p.id)
            {
                SpanStyle::Hint
            } else if session.board().blocked_cached(p.id) {
                SpanStyle::Dim
            } else {
                SpanStyle::Plain
            };

            canvas[row][col] = ("[".to_string(), style);
            canvas[row][col + 1] = (tile.symbol.glyph().to_string(), style);
            canvas[row][col + 2] = (String::new(), style);
            canvas[row][col + 3] = ("]".to_string(), style);
        }

        canvas
            .into_iter()
            .map(|cells| {
                let mut row: Row = Vec::new();
                for (text, style) in cells {
                    if text.is_empty() {
                        continue;
                    }
                    match row.last_mut() {
                        Some(span) if span.style == style => span.text.push_str(&text),
                        _ => row.push(Span::styled(text, style)),
                    }
                }
                row
            })
            .collect()
    }

    fn render_slots(&self, session: &Session) -> Row {
        // Pairwise runs show the held tile; collector runs show the slot bar.
        if session.is_pairwise() {
            let mut row = vec![Span::styled("PICKED ", SpanStyle::Title)];
            match session.selected() {
                Some(id) => {
                    let glyph = session.board().tiles()[id].symbol.glyph();
                    row.push(Span::styled(format!("[{glyph}]"), SpanStyle::Hint));
                }
                None => row.push(Span::styled("[  ]", SpanStyle::Dim)),
            }
            return row;
        }

        let slots = session.collector_slots();
        let mut row = vec![Span::styled("SLOTS ", SpanStyle::Title)];
        for collected in slots {
            row.push(Span::plain(format!("[{}]", collected.symbol.glyph())));
        }
        for _ in slots.len()..COLLECTOR_CAPACITY {
            row.push(Span::styled("[  ]", SpanStyle::Dim));
        }
        row
    }

    fn render_leaderboard(&self) -> Vec<Row> {
        let mut rows = Vec::new();
        match &self.leaderboard {
            Some(Ok(entries)) if entries.is_empty() => {
                rows.push(vec![Span::styled("no scores recorded yet", SpanStyle::Dim)]);
            }
            Some(Ok(entries)) => {
                rows.push(vec![Span::styled("TOP INVESTIGATORS", SpanStyle::Title)]);
                for (i, entry) in entries.iter().enumerate() {
                    rows.push(vec![Span::plain(format!(
                        "#{:<2} {:<20} {:>8}  ST.{}",
                        i + 1,
                        entry.name,
                        entry.score,
                        entry.stage
                    ))]);
                }
            }
            Some(Err(message)) => {
                rows.push(vec![Span::styled(&**message, SpanStyle::Dim)]);
            }
            None => {}
        }
        rows
    }
}

/// Block-id fill characters for the nonogram grid.
const FILL_CHARS: [&str; 4] = ["░░", "▒▒", "▓▓", "██"];

fn fill_for(id: u8) -> &'static str {
    FILL_CHARS[(id as usize - 1) % FILL_CHARS.len()]
}

/// Presentation state for the nonogram game.
#[derive(Debug, Clone, Default)]
pub struct NonogramView {
    pub cursor: (usize, usize),
    pub message: String,
}

impl NonogramView {
    pub fn render(&self, puzzle: &Puzzle) -> Vec<Row> {
        let mut rows = Vec::new();
        rows.push(vec![Span::styled("PATTERN RECONSTRUCTION", SpanStyle::Title)]);
        rows.push(Vec::new());

        let hint_width = puzzle
            .row_hints()
            .iter()
            .map(|h| h.len() * 2)
            .max()
            .unwrap_or(0)
            .max(4);

        // Column hints stacked above the grid, bottom-aligned.
        let col_depth = puzzle.col_hints().iter().map(Vec::len).max().unwrap_or(1);
        for depth in 0..col_depth {
            let mut row = vec![Span::plain(" ".repeat(hint_width + 1))];
            for (c, hints) in puzzle.col_hints().iter().enumerate() {
                let pad = col_depth - hints.len();
                let style = if puzzle.col_complete(c) {
                    SpanStyle::Good
                } else {
                    SpanStyle::Plain
                };
                match depth.checked_sub(pad) {
                    Some(i) => row.push(Span::styled(format!("{:>2}", hints[i]), style)),
                    None => row.push(Span::plain("  ")),
                }
            }
            rows.push(row);
        }

        for r in 0..puzzle.rows() {
            let hint_text = puzzle.row_hints()[r]
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            let style = if puzzle.row_complete(r) {
                SpanStyle::Good
            } else {
                SpanStyle::Plain
            };
            let mut row = vec![Span::styled(
                format!("{hint_text:>hint_width$} "),
                style,
            )];

            for c in 0..puzzle.cols() {
                let tag = puzzle.tag(r, c);
                let cell_style = if self.cursor == (r, c) {
                    SpanStyle::Cursor
                } else if tag != 0 {
                    SpanStyle::Plain
                } else {
                    SpanStyle::Dim
                };
                let text = if tag != 0 { fill_for(tag) } else { "··" };
                row.push(Span::styled(text, cell_style));
            }
            rows.push(row);
        }

        rows.push(Vec::new());
        rows.extend(self.render_inventory(puzzle));
        rows.push(Vec::new());

        if puzzle.is_won() {
            rows.push(vec![Span::styled(
                "PATTERN COMPLETE - case solved!",
                SpanStyle::Good,
            )]);
            rows.push(vec![Span::plain("press q to quit")]);
        } else {
            if !self.message.is_empty() {
                rows.push(vec![Span::styled(&*self.message, SpanStyle::Alert)]);
            } else {
                rows.push(Vec::new());
            }
            rows.push(vec![Span::styled(
                "arrows: move  1-9: pick block  r: rotate  enter: place  x: remove  q: quit",
                SpanStyle::Dim,
            )]);
        }

        rows
    }

    fn render_inventory(&self, puzzle: &Puzzle) -> Vec<Row> {
        let mut rows = vec![vec![Span::styled("BLOCKS", SpanStyle::Title)]];
        for (i, block) in puzzle.blocks().iter().enumerate() {
            let style = if puzzle.selected_block() == Some(i) {
                SpanStyle::Cursor
            } else if block.used {
                SpanStyle::Dim
            } else {
                SpanStyle::Plain
            };
            rows.push(vec![Span::styled(
                format!("{}. {}{}", i + 1, block.name, if block.used { " (placed)" } else { "" }),
                style,
            )]);

            // Preview the shape as it would land, rotation applied.
            let shape = if puzzle.selected_block() == Some(i) {
                rotated(&block.shape, puzzle.rotation())
            } else {
                block.shape.clone()
            };
            for shape_row in &shape {
                let text: String = shape_row
                    .iter()
                    .map(|&v| if v { fill_for(block.id) } else { "  " })
                    .collect();
                rows.push(vec![Span::plain("   "), Span::styled(text, style)]);
            }
        }
        rows
    }
}

/// Presentation state for the merge game.
#[derive(Debug, Clone, Default)]
pub struct MergeView {
    pub cursor: usize,
    pub message: String,
}

impl MergeView {
    pub fn render(&self, session: &MergeSession) -> Vec<Row> {
        let size = crate::types::MERGE_BOARD_SIZE;
        let mut rows = Vec::new();

        let episode_line = match session.current_episode() {
            Some(episode) => format!(
                "EPISODE {} - {}",
                session.episode_index() + 1,
                episode.title
            ),
            None => "CAMPAIGN COMPLETE".to_string(),
        };
        rows.push(vec![Span::styled(episode_line, SpanStyle::Title)]);
        rows.push(vec![Span::plain(format!(
            "energy {}/{}  coins {}  LV.{} ({} xp)",
            session.energy(),
            crate::types::START_ENERGY,
            session.coins(),
            session.level(),
            session.xp()
        ))]);
        rows.push(Vec::new());

        for r in 0..size {
            let mut row: Row = Vec::new();
            for c in 0..size {
                let index = r * size + c;
                let style = if self.cursor == index {
                    SpanStyle::Cursor
                } else if session.selected() == Some(index) {
                    SpanStyle::Hint
                } else {
                    SpanStyle::Plain
                };
                let text = match session.slots()[index] {
                    Some(item) => format!("[{}]", item.glyph()),
                    None => "[ ·]".to_string(),
                };
                row.push(Span::styled(text, style));
            }
            rows.push(row);
        }
        rows.push(Vec::new());

        if let Some(episode) = session.current_episode() {
            rows.push(vec![Span::styled("QUESTS", SpanStyle::Title)]);
            for (i, quest) in episode.quests.iter().enumerate() {
                rows.push(vec![Span::plain(format!(
                    "{}. {} (needs {} lv.{}, +{} coins)",
                    i + 1,
                    quest.text,
                    quest.kind.name(),
                    quest.level,
                    quest.reward
                ))]);
            }
        } else {
            rows.push(vec![Span::styled(
                "Every episode is closed. A quiet city at last.",
                SpanStyle::Good,
            )]);
        }
        rows.push(Vec::new());

        if !self.message.is_empty() {
            rows.push(vec![Span::styled(&*self.message, SpanStyle::Alert)]);
        } else {
            rows.push(Vec::new());
        }
        rows.push(vec![Span::styled(
            "arrows: move  enter: select/merge  s: spawn  1-9: hand in quest  q: quit",
            SpanStyle::Dim,
        )]);

        rows
    }
}
