use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::CLUE_COUNT;

/// One quiz item together with its play state.
///
/// The text fields come straight from the question sheet. The remaining
/// fields start zeroed and are written once, when the round for this
/// question resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionRecord {
    pub question_type: String,
    pub answer: String,
    pub hints: [String; CLUE_COUNT],
    pub awarded_score: i32,
    pub wrong_attempts: u32,
    pub penalty: i32,
    pub is_correct: bool,
    pub show_answer: bool,
    pub is_opened: bool,
}

impl QuestionRecord {
    pub fn new(question_type: String, answer: String, hints: [String; CLUE_COUNT]) -> Self {
        Self {
            question_type,
            answer,
            hints,
            awarded_score: 0,
            wrong_attempts: 0,
            penalty: 0,
            is_correct: false,
            show_answer: false,
            is_opened: false,
        }
    }

    /// Text of a clue by its 1-based number.
    pub fn hint(&self, clue: u8) -> Option<&str> {
        let index = usize::from(clue).checked_sub(1)?;
        self.hints.get(index).map(String::as_str)
    }

    /// A record is resolved once its outcome is on display.
    pub fn is_resolved(&self) -> bool {
        self.show_answer
    }
}

/// List-view projection of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionTile {
    pub number: u32, // 1-based, as shown on the tile
    pub is_opened: bool,
    pub awarded_score: Option<i32>,
}

impl QuestionTile {
    pub fn from_record(index: usize, record: &QuestionRecord) -> Self {
        Self {
            number: index as u32 + 1,
            is_opened: record.is_opened,
            awarded_score: record.is_resolved().then_some(record.awarded_score),
        }
    }
}
