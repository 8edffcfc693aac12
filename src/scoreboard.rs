//! Scoreboard module - score persistence and player identity
//!
//! The games treat scoring as a fire-and-forget collaborator: a record call
//! that fails is logged and forgotten, and a missing store degrades to a
//! "not configured" message in the leaderboard view. Nothing here may ever
//! interrupt play.
//!
//! The store is a JSON file holding a `rankings` map keyed by player name,
//! each entry `{score, stage, last_updated}`. Recording overwrites the
//! player's entry.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
    pub stage: u32,
}

/// The scoring collaborator contract.
pub trait ScoreStore {
    /// Persist a final score for a player, overwriting any previous entry.
    fn record(&self, name: &str, score: u32, stage: u32) -> Result<()>;

    /// The top `n` entries, best score first.
    fn top(&self, n: usize) -> Result<Vec<ScoreEntry>>;
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct RankingRecord {
    score: u32,
    stage: u32,
    last_updated: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct RankingsFile {
    rankings: BTreeMap<String, RankingRecord>,
}

/// JSON-file score store.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<RankingsFile> {
        match fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text)
                .with_context(|| format!("malformed score file {}", self.path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(RankingsFile::default()),
            Err(err) => {
                Err(err).with_context(|| format!("reading score file {}", self.path.display()))
            }
        }
    }

    fn save(&self, file: &RankingsFile) -> Result<()> {
        let text = serde_json::to_string_pretty(file)?;
        fs::write(&self.path, text)
            .with_context(|| format!("writing score file {}", self.path.display()))
    }
}

impl ScoreStore for JsonScoreStore {
    fn record(&self, name: &str, score: u32, stage: u32) -> Result<()> {
        let mut file = self.load()?;
        let last_updated = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        file.rankings.insert(
            name.to_string(),
            RankingRecord {
                score,
                stage,
                last_updated,
            },
        );
        self.save(&file)
    }

    fn top(&self, n: usize) -> Result<Vec<ScoreEntry>> {
        let file = self.load()?;
        let mut entries: Vec<ScoreEntry> = file
            .rankings
            .into_iter()
            .map(|(name, rec)| ScoreEntry {
                name,
                score: rec.score,
                stage: rec.stage,
            })
            .collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
        entries.truncate(n);
        Ok(entries)
    }
}

/// Record a score without letting a store failure reach gameplay.
/// A `None` store is the degraded not-configured case and is skipped quietly.
pub fn record_or_log(store: Option<&dyn ScoreStore>, name: &str, score: u32, stage: u32) {
    let Some(store) = store else {
        return;
    };
    if let Err(err) = store.record(name, score, stage) {
        warn!(name, score, stage, "score record failed: {err:#}");
    }
}

/// Fetch the leaderboard, degrading to an advisory message on any failure.
pub fn top_or_message(store: Option<&dyn ScoreStore>, n: usize) -> Result<Vec<ScoreEntry>, String> {
    let Some(store) = store else {
        return Err("leaderboard not configured (pass --scores PATH)".to_string());
    };
    store.top(n).map_err(|err| {
        warn!("leaderboard fetch failed: {err:#}");
        "leaderboard unavailable".to_string()
    })
}

/// Read the persisted player display name, if any.
pub fn load_player_name(path: &Path) -> Option<String> {
    let name = fs::read_to_string(path).ok()?;
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Persist the player display name for later runs.
pub fn store_player_name(path: &Path, name: &str) -> Result<()> {
    fs::write(path, name).with_context(|| format!("writing player name {}", path.display()))
}
