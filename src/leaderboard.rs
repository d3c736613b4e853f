//! Client-side leaderboard.
//!
//! There is no index: every recompute scans all game records in the store.
//! The number of local accounts is expected to be tiny.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::console;
use crate::error::Result;
use crate::storage::{game_key, KeyValueStore};

/// Number of entries kept.
pub const LEADERBOARD_SIZE: usize = 10;

/// Shown when an account never set a display name.
pub const UNKNOWN_PLAYER: &str = "Unknown";

#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardEntry {
    pub email: String,
    pub display_name: String,
    pub money: f64,
}

/// The fields of a game record the leaderboard needs.
#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RecordSummary {
    money: f64,
    player_name: String,
}

/// Scan every account's record and return the richest, highest first.
///
/// Ties keep the store's enumeration order. Records that fail to parse are
/// skipped.
pub fn recompute<S: KeyValueStore>(store: &S) -> Result<Vec<LeaderboardEntry>> {
    let mut entries = Vec::new();
    for email in store.list_accounts()? {
        let Some(json) = store.get(&game_key(&email))? else {
            continue;
        };
        let summary: RecordSummary = match serde_json::from_str(&json) {
            Ok(s) => s,
            Err(e) => {
                console::warn(&format!("leaderboard: skipping record for {email}: {e}"));
                continue;
            }
        };
        let display_name = if summary.player_name.is_empty() {
            UNKNOWN_PLAYER.to_string()
        } else {
            summary.player_name
        };
        entries.push(LeaderboardEntry {
            email,
            display_name,
            money: summary.money,
        });
    }

    entries.sort_by(|a, b| b.money.partial_cmp(&a.money).unwrap_or(Ordering::Equal));
    entries.truncate(LEADERBOARD_SIZE);
    Ok(entries)
}

/// Medal for the top three ranks, `#n` below that. `rank` is zero-based.
pub fn rank_label(rank: usize) -> String {
    match rank {
        0 => "🥇".to_string(),
        1 => "🥈".to_string(),
        2 => "🥉".to_string(),
        n => format!("#{}", n + 1),
    }
}
