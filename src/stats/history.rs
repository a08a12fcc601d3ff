//! Per-user quiz history
//!
//! Each user's results live as one JSON array under `quiz_history:<user>`.
//! Loading is lenient: records that no longer decode are skipped, never fatal.

use anyhow::{bail, Context, Result};

use super::db::LocalStore;
use super::error::{normalize_user, TrackerError};
use crate::domain::QuizResult;

const HISTORY_PREFIX: &str = "quiz_history:";

/// Reads and appends quiz results
#[derive(Clone)]
pub struct HistoryStore {
    db: LocalStore,
}

impl HistoryStore {
    pub fn new(db: LocalStore) -> Self {
        Self { db }
    }

    fn key(user: &str) -> Result<String, TrackerError> {
        Ok(format!("{}{}", HISTORY_PREFIX, normalize_user(user)?))
    }

    /// Append a finished quiz to the user's history
    pub fn append(&self, user: &str, result: &QuizResult) -> Result<()> {
        validate(result)?;
        let key = Self::key(user)?;

        let mut records = self.load_raw(&key)?;
        records.push(serde_json::to_value(result)?);
        self.db.set_json(&key, &records)?;

        tracing::debug!("Recorded quiz result for {} ({} total)", user.trim(), records.len());
        Ok(())
    }

    /// All decodable results for a user, in recorded order.
    ///
    /// Fields decode independently, so only records that are not JSON
    /// objects at all are dropped here.
    pub fn load(&self, user: &str) -> Result<Vec<QuizResult>> {
        let key = Self::key(user)?;
        let Some(raw) = self.db.get_raw(&key)? else {
            return Ok(Vec::new());
        };
        let records = match parse_records(&key, &raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("History for {} is unreadable, treating as empty: {:#}", user.trim(), e);
                return Ok(Vec::new());
            }
        };

        let mut results = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<QuizResult>(record) {
                Ok(result) => results.push(result),
                Err(e) => {
                    tracing::warn!("Skipping malformed history record #{} for {}: {}", index, user.trim(), e)
                }
            }
        }
        Ok(results)
    }

    /// Delete a user's history; returns whether there was any
    pub fn clear(&self, user: &str) -> Result<bool> {
        let key = Self::key(user)?;
        self.db.remove(&key)
    }

    /// Users that have a stored history
    pub fn users(&self) -> Result<Vec<String>> {
        Ok(self
            .db
            .keys_with_prefix(HISTORY_PREFIX)?
            .into_iter()
            .map(|key| key[HISTORY_PREFIX.len()..].to_string())
            .collect())
    }

    /// Stored records as raw JSON, so undecodable entries are preserved on append.
    ///
    /// A blob that is not a JSON array is an error; appending must not replace it.
    fn load_raw(&self, key: &str) -> Result<Vec<serde_json::Value>> {
        match self.db.get_raw(key)? {
            Some(raw) => parse_records(key, &raw),
            None => Ok(Vec::new()),
        }
    }
}

fn parse_records(key: &str, raw: &str) -> Result<Vec<serde_json::Value>> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(records)) => Ok(records),
        Ok(_) => bail!("History under '{}' is not a JSON array", key),
        Err(e) => Err(e).with_context(|| format!("Failed to parse history under '{}'", key)),
    }
}

fn validate(result: &QuizResult) -> Result<(), TrackerError> {
    if result.total_questions == 0 {
        return Err(TrackerError::InvalidResult(
            "totalQuestions must be greater than zero".to_string(),
        ));
    }
    if result.score.is_none() {
        return Err(TrackerError::InvalidResult("score is missing".to_string()));
    }
    match result.percentage {
        None => Err(TrackerError::InvalidResult("percentage is missing".to_string())),
        Some(pct) if pct > 100 => Err(TrackerError::InvalidResult(format!(
            "percentage {} is above 100",
            pct
        ))),
        Some(_) => Ok(()),
    }
}
