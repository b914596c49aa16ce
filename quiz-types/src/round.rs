use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{CLUE_COUNT, RoundId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundStatus {
    Playing,
    Resolved,
}

/// Final result of a round, shown in the answer box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundOutcome {
    pub answer: String,
    pub is_correct: bool,
    pub awarded_score: i32,
    pub penalty: i32,
}

/// Everything the presentation layer needs to draw a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundSnapshot {
    pub round_id: RoundId,
    pub question_index: u32,
    pub question_type: String,
    pub hints: [Option<String>; CLUE_COUNT], // None while the clue is hidden
    pub revealed_clues: Vec<u8>,             // in reveal order
    pub status: RoundStatus,
    pub remaining_seconds: u32,
    pub in_danger_zone: bool,
    pub wrong_attempts: u32,
    pub possible_score: i32,
    pub pending_penalty: i32,
    pub outcome: Option<RoundOutcome>,
}

impl RoundSnapshot {
    pub fn is_playing(&self) -> bool {
        self.status == RoundStatus::Playing
    }

    /// Remaining time as `MM:SS`.
    pub fn clock(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_seconds / 60,
            self.remaining_seconds % 60
        )
    }
}
