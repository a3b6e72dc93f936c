//! Contests and leaderboards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::Section;

/// A timed contest over one exam section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contest {
    pub id: Uuid,
    pub title: String,
    pub section: Section,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub participant_count: u32,
    /// Whether the signed-in account has joined.
    #[serde(default)]
    pub joined: bool,
}

/// One row of a contest leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub account_id: Uuid,
    pub display_name: String,
    pub score: u32,
}
