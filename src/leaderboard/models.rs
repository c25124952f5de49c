//! Leaderboard data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One leaderboard row: a user's best wpm and the accuracy recorded on
/// that best run.
#[derive(FromRow, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub login: String,
    pub max_wpm: i64,
    pub accuracy: i64,
}
