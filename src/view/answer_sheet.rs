//! Answer-sheet view model.
//!
//! The results page renders a scored answer sheet in two columns with a
//! toggle that reveals the accepted answers. Both the column split and
//! the reveal state live here; they are local to the page and never
//! persisted.

use crate::domain::practice::{AnswerRecord, AttemptResult};

/// Visibility of the accepted answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reveal {
    #[default]
    Hidden,
    Shown,
}

impl Reveal {
    /// Flip between hidden and shown.
    pub fn toggle(&mut self) {
        *self = match self {
            Reveal::Hidden => Reveal::Shown,
            Reveal::Shown => Reveal::Hidden,
        };
    }

    pub fn is_shown(&self) -> bool {
        matches!(self, Reveal::Shown)
    }
}

/// A scored answer sheet ready for rendering.
#[derive(Debug, Clone)]
pub struct AnswerSheet {
    records: Vec<AnswerRecord>,
    reveal: Reveal,
}

impl AnswerSheet {
    /// Build a sheet from scored rows. Answers start hidden.
    pub fn new(records: Vec<AnswerRecord>) -> Self {
        Self {
            records,
            reveal: Reveal::Hidden,
        }
    }

    /// Build a sheet from an attempt's result.
    pub fn from_result(result: &AttemptResult) -> Self {
        Self::new(result.answers.clone())
    }

    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    pub fn reveal(&self) -> Reveal {
        self.reveal
    }

    /// Flip the correct-answer visibility.
    pub fn toggle_reveal(&mut self) {
        self.reveal.toggle();
    }

    /// Two-column layout: the left column takes the first half of the
    /// rows, rounded up, so an odd sheet leans left.
    pub fn columns(&self) -> (&[AnswerRecord], &[AnswerRecord]) {
        self.records.split_at(self.records.len().div_ceil(2))
    }

    /// The accepted answer for a row, only while revealed.
    pub fn visible_correct_answer(&self, index: usize) -> Option<&str> {
        if !self.reveal.is_shown() {
            return None;
        }
        self.records.get(index).map(|record| record.correct.as_str())
    }

    /// Number of correctly answered rows.
    pub fn correct_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_correct()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(n: u32) -> AnswerSheet {
        AnswerSheet::new(
            (1..=n)
                .map(|number| AnswerRecord {
                    number,
                    response: Some(format!("answer {number}")),
                    correct: format!("Answer {number}"),
                })
                .collect(),
        )
    }

    #[test]
    fn test_odd_sheet_leans_left() {
        let sheet5 = sheet(5);
        let (left, right) = sheet5.columns();
        assert_eq!(left.len(), 3);
        assert_eq!(right.len(), 2);
        assert_eq!(left[0].number, 1);
        assert_eq!(right[0].number, 4);
    }

    #[test]
    fn test_empty_sheet_has_empty_columns() {
        let sheet0 = sheet(0);
        let (left, right) = sheet0.columns();
        assert!(left.is_empty());
        assert!(right.is_empty());
    }

    #[test]
    fn test_reveal_toggle_flips_visibility() {
        let mut sheet = sheet(2);
        assert_eq!(sheet.visible_correct_answer(0), None);

        sheet.toggle_reveal();
        assert_eq!(sheet.visible_correct_answer(0), Some("Answer 1"));

        sheet.toggle_reveal();
        assert_eq!(sheet.visible_correct_answer(0), None);
    }

    #[test]
    fn test_correct_count_uses_marking_rules() {
        // Responses differ from the accepted answers only in case.
        assert_eq!(sheet(4).correct_count(), 4);
    }
}
