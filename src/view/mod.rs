//! View-model state for the page shells.

mod answer_sheet;

pub use answer_sheet::{AnswerSheet, Reveal};
