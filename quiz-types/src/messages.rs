use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{QuestionTile, RoundSnapshot};

/// Discrete input events, independent of whether they came from a key press
/// or a pointer click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PlayerAction {
    SelectQuestion { number: u32 },
    RevealClue { clue: u8 },
    SubmitCorrect,
    SubmitIncorrect,
    ExitRound,
    Quit,
}

/// Actions the round controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundAction {
    Reveal { clue: u8 },
    Judge { is_correct: bool },
}

impl PlayerAction {
    /// The round-level meaning of this action, if it has one.
    pub fn as_round_action(self) -> Option<RoundAction> {
        match self {
            PlayerAction::RevealClue { clue } => Some(RoundAction::Reveal { clue }),
            PlayerAction::SubmitCorrect => Some(RoundAction::Judge { is_correct: true }),
            PlayerAction::SubmitIncorrect => Some(RoundAction::Judge { is_correct: false }),
            _ => None,
        }
    }
}

/// Updates pushed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ViewUpdate {
    QuestionList {
        tiles: Vec<QuestionTile>,
        total_score: i32,
    },
    RoundUpdate {
        snapshot: RoundSnapshot,
    },
    LoadFailed {
        message: String,
    },
}
