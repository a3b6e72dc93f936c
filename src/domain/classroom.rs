//! Classrooms, assignments, and messaging (teacher console).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::Section;

/// A teacher's classroom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    pub id: Uuid,
    pub name: String,
    pub teacher_id: Uuid,
    pub student_count: u32,
    pub created_at: DateTime<Utc>,
}

/// An assignment handed to a classroom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: Uuid,
    pub classroom_id: Uuid,
    pub title: String,
    pub section: Section,
    /// The material the assignment points at.
    pub content_id: Uuid,
    pub due_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating an assignment.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentDraft {
    pub title: String,
    pub section: Section,
    pub content_id: Uuid,
    pub due_at: Option<DateTime<Utc>>,
}

/// One message in a classroom's feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassroomMessage {
    pub id: Uuid,
    pub classroom_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

/// Payload for posting a classroom message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageDraft {
    pub body: String,
}
