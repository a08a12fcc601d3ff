//! Badges command implementation

use anyhow::{Context, Result};
use clap::Args;

use quizbadge::config::Config;
use quizbadge::stats::{Badge, BadgeFilter, Rarity, UnlockFilter};

use super::{open_tracker, require_user};

#[derive(Args)]
pub struct BadgesArgs {
    /// Display name (defaults to settings.default_user)
    #[arg(short, long)]
    pub user: Option<String>,

    /// Only show unlocked badges
    #[arg(long, conflicts_with = "locked")]
    pub unlocked: bool,

    /// Only show locked badges
    #[arg(long)]
    pub locked: bool,

    /// Only show badges of this rarity (common, rare, epic, legendary)
    #[arg(long)]
    pub rarity: Option<String>,

    /// Free-text search over title and description
    #[arg(short, long)]
    pub search: Option<String>,

    /// Print the snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

/// List a user's badges with optional filters
pub fn badges_command(config: &Config, args: BadgesArgs) -> Result<()> {
    let user = require_user(config, args.user.as_deref())?;

    let rarity = args
        .rarity
        .as_deref()
        .map(|raw| {
            Rarity::parse(raw).with_context(|| {
                format!("Unknown rarity '{}' (expected common, rare, epic or legendary)", raw)
            })
        })
        .transpose()?;

    let filter = BadgeFilter {
        state: if args.unlocked {
            UnlockFilter::Unlocked
        } else if args.locked {
            UnlockFilter::Locked
        } else {
            UnlockFilter::All
        },
        rarity,
        search: args.search,
    };

    let tracker = open_tracker(config)?;
    let book = tracker.achievements(&user)?;
    let badges = filter.apply(book.list());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&badges)?);
        return Ok(());
    }

    if badges.is_empty() {
        println!("No badges match.");
        return Ok(());
    }

    println!(
        "Badges for {} ({}/{} unlocked):\n",
        user,
        book.unlocked_count(),
        book.list().len()
    );
    for badge in &badges {
        println!("  {}", format_badge(badge));
    }

    Ok(())
}

fn format_badge(badge: &Badge) -> String {
    let status = if badge.unlocked {
        match badge.unlocked_at {
            Some(at) => format!("unlocked {}", at.format("%Y-%m-%d")),
            None => "unlocked".to_string(),
        }
    } else {
        match (badge.progress, badge.target) {
            (Some(progress), Some(target)) => {
                format!("{:.0}% of {}", progress * 100.0, target)
            }
            _ => "locked".to_string(),
        }
    };

    format!(
        "{} {:<20} {:<10} {:<22} {}",
        badge.icon,
        badge.title,
        badge.rarity.label(),
        status,
        badge.description
    )
}
