use crate::ScoringConfig;

pub struct ScoringEngine;

impl ScoringEngine {
    /// Points a correct answer would earn with `revealed` clues open.
    /// Runs out to 0 once every tier has been passed.
    pub fn possible_score(scoring: &ScoringConfig, revealed: usize) -> i32 {
        scoring.tiers.get(revealed).copied().unwrap_or(0)
    }

    /// Running penalty shown next to the possible score after wrong attempts.
    pub fn pending_penalty(scoring: &ScoringConfig, wrong_attempts: u32) -> i32 {
        scoring.wrong_penalty.saturating_mul(wrong_attempts as i32)
    }

    /// Whether a wrong answer still leaves the player another try.
    ///
    /// Only the first wrong answer is forgiven, and only while at least one
    /// clue is still hidden.
    pub fn grants_retry(wrong_attempts: u32, revealed: usize, clue_count: usize) -> bool {
        wrong_attempts == 1 && revealed < clue_count
    }
}
