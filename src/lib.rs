//! quizbadge - local quiz history, leaderboard, and achievements
//!
//! Finished quizzes are appended to a per-user history and submitted to a
//! shared local leaderboard. After each quiz (or on request) the achievement
//! engine re-evaluates every badge against the full history and the user's
//! current rank, unlocking badges and tracking progress toward the rest.
//!
//! ## Layout
//!
//! - [`domain`]: quiz results and difficulties as stored on disk
//! - [`stats::achievements`]: badge catalogue, rule checks, streaks, badge state
//! - [`stats`]: local storage, history, leaderboard, and the [`stats::QuizTracker`] facade
//! - [`config`]: `~/.quizbadge/config.toml`

pub mod config;
pub mod domain;
pub mod stats;

pub use domain::*;
