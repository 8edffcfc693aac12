//! Terminal arcade runner.
//!
//! Picks a game from the command line, prompts for a player name where
//! scores apply, then runs a crossterm event loop: poll for input, apply
//! actions to the game state, repaint. Presentation timing (stage-advance
//! pauses, hint flashes) lives here, never in the game rules.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tui_arcade::core::{GameEvent, Phase, Session};
use tui_arcade::input::{
    mahjong_action, merge_action, nonogram_action, MahjongAction, MergeAction, NonogramAction,
};
use tui_arcade::merge::{MergeEvent, MergeSession};
use tui_arcade::nonogram::Puzzle;
use tui_arcade::scoreboard::{self, JsonScoreStore, ScoreStore};
use tui_arcade::term::{step_cursor, MahjongView, MergeView, NonogramView, TerminalRenderer};
use tui_arcade::types::{
    EPISODE_ADVANCE_DELAY_MS, HINT_FLASH_MS, MERGE_BOARD_SIZE, STAGE_ADVANCE_DELAY_MS,
};

const USAGE: &str = "usage: tui-arcade <mahjong|pairs|nonogram|merge> \
[--scores PATH] [--name NAME] [--seed N]";

const POLL_MS: u64 = 50;
const LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Game {
    Mahjong,
    Pairs,
    Nonogram,
    Merge,
}

#[derive(Debug, Clone)]
struct Config {
    game: Game,
    scores: Option<PathBuf>,
    name: Option<String>,
    seed: Option<u32>,
}

fn parse_args(args: &[String]) -> Result<Config> {
    let Some(first) = args.first() else {
        return Err(anyhow!("missing game"));
    };
    let game = match first.as_str() {
        "mahjong" => Game::Mahjong,
        "pairs" => Game::Pairs,
        "nonogram" => Game::Nonogram,
        "merge" => Game::Merge,
        other => return Err(anyhow!("unknown game: {}", other)),
    };

    let mut scores = None;
    let mut name = None;
    let mut seed = None;
    let mut i = 1usize;
    while i < args.len() {
        match args[i].as_str() {
            "--scores" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --scores"))?;
                scores = Some(PathBuf::from(v));
            }
            "--name" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --name"))?;
                name = Some(v.clone());
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }

    Ok(Config {
        game,
        scores,
        name,
        seed,
    })
}

fn init_logging() -> Result<()> {
    let file = File::create("tui-arcade.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Name from --name, then the saved player file, then a prompt. Runs
/// before raw mode so the prompt behaves like normal line input.
fn resolve_player_name(explicit: Option<String>) -> Result<String> {
    if let Some(name) = explicit {
        return Ok(name);
    }
    let path = PathBuf::from(".tui-arcade-player");
    if let Some(name) = scoreboard::load_player_name(&path) {
        return Ok(name);
    }

    print!("Detective name: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let trimmed = line.trim();
    let name = if trimmed.is_empty() {
        "anonymous".to_string()
    } else {
        trimmed.to_string()
    };
    if let Err(err) = scoreboard::store_player_name(&path, &name) {
        tracing::warn!(error = %err, "could not save player name");
    }
    Ok(name)
}

fn default_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or(1)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };
    init_logging()?;

    let seed = config.seed.unwrap_or_else(default_seed);
    info!(game = ?config.game, seed, "starting");

    let name = match config.game {
        Game::Mahjong | Game::Pairs => resolve_player_name(config.name.clone())?,
        _ => String::new(),
    };
    let store = config.scores.as_ref().map(|p| JsonScoreStore::new(p.clone()));
    let store_ref: Option<&dyn ScoreStore> = store.as_ref().map(|s| s as &dyn ScoreStore);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = match config.game {
        Game::Mahjong => run_board_game(&mut term, Session::new_collector(seed), store_ref, &name),
        Game::Pairs => run_board_game(&mut term, Session::new_pairwise(seed), store_ref, &name),
        Game::Nonogram => run_nonogram(&mut term),
        Game::Merge => run_merge(&mut term, seed),
    };

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run_board_game(
    term: &mut TerminalRenderer,
    mut session: Session,
    store: Option<&dyn ScoreStore>,
    name: &str,
) -> Result<()> {
    let mut view = MahjongView {
        cursor: step_cursor(session.board(), None, 0),
        ..Default::default()
    };
    let mut hint_expiry: Option<Instant> = None;
    let mut stage_advance_at: Option<Instant> = None;

    loop {
        if hint_expiry.is_some_and(|at| Instant::now() >= at) {
            view.hint = None;
            hint_expiry = None;
        }
        if stage_advance_at.is_some_and(|at| Instant::now() >= at) {
            stage_advance_at = None;
            session.advance_stage();
            view.cursor = step_cursor(session.board(), None, 0);
            view.hint = None;
            hint_expiry = None;
            info!(stage = session.stage(), "stage dealt");
        }

        term.draw(&view.render(&session))?;

        if !event::poll(Duration::from_millis(POLL_MS))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(action) = mahjong_action(key.code) else {
            continue;
        };
        view.message.clear();

        match action {
            MahjongAction::Quit => {
                if session.phase() == Phase::Playing && session.score() > 0 {
                    scoreboard::record_or_log(store, name, session.score(), session.stage());
                }
                return Ok(());
            }
            MahjongAction::Restart => {
                if session.phase() == Phase::GameOver {
                    session.restart();
                    view = MahjongView {
                        cursor: step_cursor(session.board(), None, 0),
                        ..Default::default()
                    };
                    hint_expiry = None;
                    stage_advance_at = None;
                }
            }
            MahjongAction::CursorPrev => {
                view.cursor = step_cursor(session.board(), view.cursor, -1);
            }
            MahjongAction::CursorNext => {
                view.cursor = step_cursor(session.board(), view.cursor, 1);
            }
            MahjongAction::Pick => {
                let Some(id) = view.cursor else { continue };
                for event in session.click_tile(id) {
                    match event {
                        GameEvent::StageCleared { stage, score } => {
                            scoreboard::record_or_log(store, name, score, stage);
                            stage_advance_at =
                                Some(Instant::now() + Duration::from_millis(STAGE_ADVANCE_DELAY_MS));
                        }
                        GameEvent::Stuck { score } => {
                            scoreboard::record_or_log(store, name, score, session.stage());
                            view.leaderboard =
                                Some(scoreboard::top_or_message(store, LEADERBOARD_SIZE));
                        }
                        _ => {}
                    }
                }
                view.cursor = step_cursor(session.board(), view.cursor, 0);
            }
            MahjongAction::Undo => {
                if session.undo() {
                    view.cursor = step_cursor(session.board(), view.cursor, 0);
                } else {
                    view.message = "nothing to undo".to_string();
                }
            }
            MahjongAction::Bomb => match session.use_bomb() {
                Ok(()) => view.cursor = step_cursor(session.board(), view.cursor, 0),
                Err(refused) => view.message = refused.message().to_string(),
            },
            MahjongAction::Hint => match session.use_hint() {
                Ok(pair) => {
                    view.hint = Some(pair);
                    hint_expiry = Some(Instant::now() + Duration::from_millis(HINT_FLASH_MS));
                }
                Err(refused) => view.message = refused.message().to_string(),
            },
            MahjongAction::Shuffle => {
                session.shuffle();
                view.cursor = step_cursor(session.board(), view.cursor, 0);
                view.message = "tiles reshuffled".to_string();
            }
        }
    }
}

fn run_nonogram(term: &mut TerminalRenderer) -> Result<()> {
    let mut puzzle = Puzzle::standard();
    let mut view = NonogramView::default();

    loop {
        term.draw(&view.render(&puzzle))?;

        if !event::poll(Duration::from_millis(POLL_MS))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(action) = nonogram_action(key.code) else {
            continue;
        };
        view.message.clear();

        let (row, col) = view.cursor;
        match action {
            NonogramAction::Quit => return Ok(()),
            NonogramAction::MoveUp => view.cursor.0 = row.saturating_sub(1),
            NonogramAction::MoveDown => view.cursor.0 = (row + 1).min(puzzle.rows() - 1),
            NonogramAction::MoveLeft => view.cursor.1 = col.saturating_sub(1),
            NonogramAction::MoveRight => view.cursor.1 = (col + 1).min(puzzle.cols() - 1),
            NonogramAction::SelectBlock(index) => {
                if index < puzzle.blocks().len() {
                    if puzzle.blocks()[index].used {
                        view.message = "that block is already placed".to_string();
                    } else {
                        puzzle.select_block(index);
                    }
                }
            }
            NonogramAction::Rotate => puzzle.rotate_selection(),
            NonogramAction::Place => {
                if puzzle.selected_block().is_none() {
                    view.message = "pick a block first (1-9)".to_string();
                } else if !puzzle.place_at(row, col) {
                    view.message = "it does not fit there".to_string();
                } else if puzzle.is_won() {
                    info!("nonogram solved");
                }
            }
            NonogramAction::Remove => {
                if !puzzle.remove_at(row, col) {
                    view.message = "nothing to remove here".to_string();
                }
            }
        }
    }
}

fn run_merge(term: &mut TerminalRenderer, seed: u32) -> Result<()> {
    let mut session = MergeSession::new(seed);
    let mut view = MergeView::default();
    let mut episode_advance_at: Option<Instant> = None;

    loop {
        if episode_advance_at.is_some_and(|at| Instant::now() >= at) {
            episode_advance_at = None;
            for event in session.advance_episode() {
                if let MergeEvent::AllEpisodesCleared = event {
                    info!("campaign complete");
                }
            }
            view.message.clear();
        }

        term.draw(&view.render(&session))?;

        if !event::poll(Duration::from_millis(POLL_MS))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(action) = merge_action(key.code) else {
            continue;
        };
        // Keep the "episode cleared" banner up through the pause.
        if episode_advance_at.is_none() {
            view.message.clear();
        }

        let size = MERGE_BOARD_SIZE;
        let events = match action {
            MergeAction::Quit => return Ok(()),
            MergeAction::MoveUp => {
                view.cursor = view.cursor.saturating_sub(size);
                Vec::new()
            }
            MergeAction::MoveDown => {
                if view.cursor + size < size * size {
                    view.cursor += size;
                }
                Vec::new()
            }
            MergeAction::MoveLeft => {
                if view.cursor % size > 0 {
                    view.cursor -= 1;
                }
                Vec::new()
            }
            MergeAction::MoveRight => {
                if view.cursor % size < size - 1 {
                    view.cursor += 1;
                }
                Vec::new()
            }
            MergeAction::Click => session.click_slot(view.cursor),
            MergeAction::Spawn => session.spawn(),
            MergeAction::Quest(index) => {
                let quest_id = session
                    .current_episode()
                    .and_then(|e| e.quests.get(index))
                    .map(|q| q.id);
                match quest_id {
                    Some(id) => {
                        let events = session.complete_quest(id);
                        if events.is_empty() {
                            view.message = "no matching item on the board".to_string();
                        }
                        events
                    }
                    None => Vec::new(),
                }
            }
        };

        for event in events {
            match event {
                MergeEvent::Merged { item, xp, .. } => {
                    view.message = format!("merged into {} (+{} xp)", item.glyph(), xp);
                }
                MergeEvent::OutOfEnergy => {
                    view.message = "out of energy".to_string();
                }
                MergeEvent::QuestCompleted { reward } => {
                    view.message = format!("quest complete, +{reward} coins");
                }
                MergeEvent::EpisodeCleared => {
                    view.message = "episode cleared!".to_string();
                    episode_advance_at =
                        Some(Instant::now() + Duration::from_millis(EPISODE_ADVANCE_DELAY_MS));
                }
                MergeEvent::LevelUp { level } => {
                    view.message = format!("level up! now LV.{level}");
                }
                _ => {}
            }
        }
    }
}
