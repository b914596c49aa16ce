pub mod cue;
pub mod messages;
pub mod question;
pub mod round;

// Re-export all types
pub use cue::*;
pub use messages::*;
pub use question::*;
pub use round::*;

pub type RoundId = uuid::Uuid;

/// Number of clues every question carries.
pub const CLUE_COUNT: usize = 4;
