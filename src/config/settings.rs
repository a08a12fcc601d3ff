//! Settings configuration types

use serde::{Deserialize, Serialize};

use crate::domain::Difficulty;

/// General settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Display name used when a command is run without `--user`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,

    /// Maximum number of entries kept on the leaderboard
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,

    /// Questions asked per quiz
    #[serde(default = "default_questions_per_quiz")]
    pub questions_per_quiz: u32,

    /// Time limit per question in seconds
    #[serde(default = "default_seconds_per_question")]
    pub seconds_per_question: u32,

    /// Difficulty preselected for new quizzes
    #[serde(default = "default_difficulty")]
    pub default_difficulty: Difficulty,
}

fn default_leaderboard_size() -> usize {
    100
}

fn default_questions_per_quiz() -> u32 {
    10
}

fn default_seconds_per_question() -> u32 {
    30
}

fn default_difficulty() -> Difficulty {
    Difficulty::Medium
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_user: None,
            leaderboard_size: default_leaderboard_size(),
            questions_per_quiz: default_questions_per_quiz(),
            seconds_per_question: default_seconds_per_question(),
            default_difficulty: default_difficulty(),
        }
    }
}

/// Where local storage lives
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Path to the storage database (defaults to ~/.quizbadge/storage.db)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<std::path::PathBuf>,
}
