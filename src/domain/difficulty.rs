use serde::{Deserialize, Deserializer, Serialize};

/// Difficulty a quiz was played at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Parse a user-supplied difficulty, ignoring case and padding
    pub fn parse(s: &str) -> Option<Self> {
        Self::from_stored(&s.trim().to_ascii_lowercase())
    }

    /// Match a stored value exactly: only "easy", "medium" and "hard" are recognised
    pub fn from_stored(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Deserialize an optional difficulty, mapping unknown or non-string values to `None`.
///
/// Older records were written before difficulty existed, and some carry values
/// from builds that used other labels. Stored values are matched exactly;
/// [`Difficulty::parse`] is for user input.
pub(crate) fn lenient_difficulty<'de, D>(deserializer: D) -> Result<Option<Difficulty>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(Difficulty::from_stored))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Difficulty::parse("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse(" medium "), Some(Difficulty::Medium));
        assert_eq!(Difficulty::parse("expert"), None);
    }

    #[test]
    fn test_stored_values_must_match_exactly() {
        assert_eq!(Difficulty::from_stored("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_stored("Hard"), None);
        assert_eq!(Difficulty::from_stored(" hard "), None);
    }

    #[test]
    fn test_lenient_deserializer_ignores_other_casings() {
        #[derive(Deserialize)]
        struct Record {
            #[serde(default, deserialize_with = "lenient_difficulty")]
            difficulty: Option<Difficulty>,
        }

        for raw in [r#"{"difficulty":"HARD"}"#, r#"{"difficulty":"Hard"}"#, r#"{"difficulty":" hard "}"#] {
            let record: Record = serde_json::from_str(raw).unwrap();
            assert_eq!(record.difficulty, None, "{raw}");
        }
        let record: Record = serde_json::from_str(r#"{"difficulty":"hard"}"#).unwrap();
        assert_eq!(record.difficulty, Some(Difficulty::Hard));
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&Difficulty::Easy).unwrap();
        assert_eq!(json, "\"easy\"");
    }
}
