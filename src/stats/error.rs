/// Errors raised by the quiz stores before anything touches storage
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("User name must not be empty")]
    EmptyUser,

    #[error("Invalid quiz result: {0}")]
    InvalidResult(String),
}

/// Trim a display name and reject empty ones
pub(crate) fn normalize_user(user: &str) -> Result<&str, TrackerError> {
    let trimmed = user.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::EmptyUser);
    }
    Ok(trimmed)
}
