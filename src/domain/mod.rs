//! Core domain types for quizbadge

mod difficulty;
mod quiz_result;

pub use difficulty::Difficulty;
pub use quiz_result::{performance_level, QuizResult};
