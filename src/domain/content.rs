//! Curated exam materials (manager console).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::Difficulty;

/// A reading exam material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingContent {
    pub id: Uuid,
    pub title: String,
    /// The passage students read.
    pub passage: String,
    pub difficulty: Difficulty,
    pub question_count: u32,
    /// Hidden from students until published.
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating or updating a reading material.
#[derive(Debug, Clone, Serialize)]
pub struct ReadingDraft {
    pub title: String,
    pub passage: String,
    pub difficulty: Difficulty,
    pub published: bool,
}

/// A listening exam material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListeningContent {
    pub id: Uuid,
    pub title: String,
    /// Where the audio track is served from.
    pub audio_url: String,
    /// Transcript shown when answers are revealed.
    pub transcript: String,
    pub difficulty: Difficulty,
    pub question_count: u32,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating or updating a listening material.
#[derive(Debug, Clone, Serialize)]
pub struct ListeningDraft {
    pub title: String,
    pub audio_url: String,
    pub transcript: String,
    pub difficulty: Difficulty,
    pub published: bool,
}
