//! Practice attempts and answer sheets (student flows).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{Difficulty, Section};

/// Lifecycle of a practice attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttemptStatus {
    InProgress,
    Submitted,
    Scored,
}

/// One practice attempt by a student, covering one or both sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeAttempt {
    pub id: Uuid,
    pub sections: Vec<Section>,
    pub status: AttemptStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Payload to start a new attempt.
#[derive(Debug, Clone, Serialize)]
pub struct StartAttempt {
    pub sections: Vec<Section>,
}

/// Catalogue entry of a practisable material in one section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeMaterial {
    pub id: Uuid,
    pub section: Section,
    pub title: String,
    pub difficulty: Difficulty,
    pub question_count: u32,
}

/// One question of a section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub number: u32,
    pub prompt: String,
    /// Empty for free-text questions.
    #[serde(default)]
    pub options: Vec<String>,
}

/// Material and questions for one section of an attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionData {
    pub attempt_id: Uuid,
    pub section: Section,
    pub content_title: String,
    pub questions: Vec<Question>,
}

/// A student's answer for one question.
#[derive(Debug, Clone, Serialize)]
pub struct SubmittedAnswer {
    pub number: u32,
    pub response: String,
}

/// Payload to submit an attempt's answer sheet.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerSubmission {
    pub answers: Vec<SubmittedAnswer>,
}

/// One scored answer-sheet row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub number: u32,
    /// What the student wrote, if anything.
    pub response: Option<String>,
    /// The accepted answer.
    pub correct: String,
}

impl AnswerRecord {
    /// Whether the response matches the accepted answer.
    ///
    /// Comparison ignores surrounding whitespace and letter case, the
    /// usual IELTS answer-sheet marking rule.
    pub fn is_correct(&self) -> bool {
        match &self.response {
            Some(response) => response.trim().eq_ignore_ascii_case(self.correct.trim()),
            None => false,
        }
    }
}

/// Scored result of an attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptResult {
    pub attempt_id: Uuid,
    pub correct_count: u32,
    pub total: u32,
    /// IELTS band estimate, when the backend has scored the attempt.
    pub band: Option<f32>,
    pub answers: Vec<AnswerRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(response: Option<&str>, correct: &str) -> AnswerRecord {
        AnswerRecord {
            number: 1,
            response: response.map(str::to_string),
            correct: correct.to_string(),
        }
    }

    #[test]
    fn test_marking_ignores_case_and_whitespace() {
        assert!(record(Some("  The Thames "), "the thames").is_correct());
        assert!(!record(Some("Thames river"), "the thames").is_correct());
    }

    #[test]
    fn test_blank_response_is_wrong() {
        assert!(!record(None, "42").is_correct());
    }
}
