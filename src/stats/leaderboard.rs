//! Local leaderboard
//!
//! A single shared list under the `leaderboard` key, ordered best first and
//! capped at a configured size. Ranks are 1-based.

use std::cmp::Ordering;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::db::LocalStore;
use super::error::normalize_user;
use crate::domain::{Difficulty, QuizResult};
use crate::stats::time_bucket::parse_timestamp;

const LEADERBOARD_KEY: &str = "leaderboard";

/// One submitted score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub percentage: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    pub date: String,
}

impl LeaderboardEntry {
    pub fn from_result(name: &str, result: &QuizResult) -> Self {
        Self {
            name: name.trim().to_string(),
            score: result.score.unwrap_or(0),
            percentage: result.percentage.unwrap_or(0),
            category: result.category.clone(),
            difficulty: result.difficulty,
            date: result.date.clone(),
        }
    }
}

/// Score descending, then percentage descending, then the older entry first
fn compare_entries(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| b.percentage.cmp(&a.percentage))
        .then_with(|| {
            let a_at = parse_timestamp(&a.date).map(|dt| dt.to_utc());
            let b_at = parse_timestamp(&b.date).map(|dt| dt.to_utc());
            match (a_at, b_at) {
                (Some(a_at), Some(b_at)) => a_at.cmp(&b_at),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        })
}

/// Stored board split into decodable entries and records kept verbatim
struct StoredBoard {
    entries: Vec<LeaderboardEntry>,
    undecodable: Vec<serde_json::Value>,
}

impl StoredBoard {
    /// Split a stored blob into entries (best first) and undecodable records.
    ///
    /// A blob that is not a JSON array is an error.
    fn parse(raw: &str) -> Result<Self> {
        let records = match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Array(records)) => records,
            Ok(_) => bail!("Stored leaderboard is not a JSON array"),
            Err(e) => return Err(e).context("Failed to parse stored leaderboard"),
        };

        let mut entries = Vec::with_capacity(records.len());
        let mut undecodable = Vec::new();
        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<LeaderboardEntry>(record.clone()) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!("Skipping malformed leaderboard record #{}: {}", index, e);
                    undecodable.push(record);
                }
            }
        }
        entries.sort_by(compare_entries);

        Ok(Self {
            entries,
            undecodable,
        })
    }
}

/// Reads and updates the shared leaderboard
#[derive(Clone)]
pub struct Leaderboard {
    db: LocalStore,
    capacity: usize,
}

impl Leaderboard {
    pub fn new(db: LocalStore, capacity: usize) -> Self {
        Self {
            db,
            capacity: capacity.max(1),
        }
    }

    /// Entries ordered best first; records that do not decode are skipped
    pub fn entries(&self) -> Result<Vec<LeaderboardEntry>> {
        let Some(raw) = self.db.get_raw(LEADERBOARD_KEY)? else {
            return Ok(Vec::new());
        };
        match StoredBoard::parse(&raw) {
            Ok(board) => Ok(board.entries),
            Err(e) => {
                tracing::warn!("Leaderboard could not be read, treating as empty: {:#}", e);
                Ok(Vec::new())
            }
        }
    }

    /// Insert an entry, keeping the board ordered and within capacity.
    ///
    /// Returns the entry's rank, or `None` if it did not make the cut.
    pub fn submit(&self, mut entry: LeaderboardEntry) -> Result<Option<u32>> {
        entry.name = normalize_user(&entry.name)?.to_string();

        let mut board = self.load()?;
        board.entries.push(entry.clone());
        board.entries.sort_by(compare_entries);
        board.entries.truncate(self.capacity);
        self.save(&board)?;

        let rank = board
            .entries
            .iter()
            .position(|e| *e == entry)
            .map(|pos| pos as u32 + 1);
        tracing::debug!("Leaderboard entry for {} placed at {:?}", entry.name, rank);
        Ok(rank)
    }

    /// 1-based position of the user's best entry, if they have one
    pub fn user_rank(&self, name: &str) -> Result<Option<u32>> {
        let Ok(name) = normalize_user(name) else {
            return Ok(None);
        };
        Ok(self
            .entries()?
            .iter()
            .position(|e| e.name == name)
            .map(|pos| pos as u32 + 1))
    }

    /// Drop a user's entries from the board
    pub fn remove_user(&self, name: &str) -> Result<usize> {
        let name = normalize_user(name)?;
        let mut board = self.load()?;
        let before = board.entries.len();
        board.entries.retain(|e| e.name != name);
        let removed = before - board.entries.len();
        if removed > 0 {
            self.save(&board)?;
        }
        Ok(removed)
    }

    pub fn clear(&self) -> Result<()> {
        self.db.remove(LEADERBOARD_KEY)?;
        Ok(())
    }

    /// Read the stored board; writers never replace a board they could not read
    fn load(&self) -> Result<StoredBoard> {
        match self.db.get_raw(LEADERBOARD_KEY)? {
            Some(raw) => StoredBoard::parse(&raw),
            None => Ok(StoredBoard {
                entries: Vec::new(),
                undecodable: Vec::new(),
            }),
        }
    }

    /// Write ranked entries first, then undecodable records unchanged
    fn save(&self, board: &StoredBoard) -> Result<()> {
        let mut records = Vec::with_capacity(board.entries.len() + board.undecodable.len());
        for entry in &board.entries {
            records.push(serde_json::to_value(entry)?);
        }
        records.extend(board.undecodable.iter().cloned());
        self.db.set_json(LEADERBOARD_KEY, &records)
    }
}
