use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Named sound cues played during a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Cue {
    Beep,    // clue reveal and periodic countdown beep
    Correct,
    Wrong,
    Tick,    // danger zone loop
}

impl Cue {
    pub fn name(self) -> &'static str {
        match self {
            Cue::Beep => "beep",
            Cue::Correct => "correct",
            Cue::Wrong => "wrong",
            Cue::Tick => "tick",
        }
    }
}

impl std::fmt::Display for Cue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
