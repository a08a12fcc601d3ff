//! Badge grid filtering: unlock state, rarity, and free-text search

use super::definitions::Rarity;
use super::manager::Badge;

/// Which badges to show by unlock state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnlockFilter {
    #[default]
    All,
    Unlocked,
    Locked,
}

/// Filter applied to a badge snapshot
#[derive(Debug, Clone, Default)]
pub struct BadgeFilter {
    pub state: UnlockFilter,
    pub rarity: Option<Rarity>, // None = all
    pub search: Option<String>, // matched case-insensitively against title + description
}

impl BadgeFilter {
    pub fn matches(&self, badge: &Badge) -> bool {
        let state_ok = match self.state {
            UnlockFilter::All => true,
            UnlockFilter::Unlocked => badge.unlocked,
            UnlockFilter::Locked => !badge.unlocked,
        };
        if !state_ok {
            return false;
        }

        if self.rarity.is_some_and(|r| r != badge.rarity) {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => {
                let needle = needle.to_lowercase();
                badge.title.to_lowercase().contains(&needle)
                    || badge.description.to_lowercase().contains(&needle)
            }
            _ => true,
        }
    }

    pub fn apply(&self, badges: Vec<Badge>) -> Vec<Badge> {
        badges.into_iter().filter(|b| self.matches(b)).collect()
    }
}
