use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::RoundConfigError;

/// Countdown settings for a single round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub total_seconds: u32,
    pub danger_zone_seconds: u32, // tick loop at or below this
    pub beep_interval_seconds: u32,
    pub tick_interval: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            total_seconds: 90,
            danger_zone_seconds: 75,
            beep_interval_seconds: 15,
            tick_interval: Duration::from_millis(1000),
        }
    }
}

/// Points awarded per number of clues revealed before a correct answer,
/// plus the fixed penalty for a failed question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub tiers: [i32; 4],
    pub wrong_penalty: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            tiers: [40, 30, 20, 10],
            wrong_penalty: -10,
        }
    }
}

/// Immutable configuration handed to every round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub timer: TimerConfig,
    pub scoring: ScoringConfig,
}

impl RoundConfig {
    pub fn new(timer: TimerConfig, scoring: ScoringConfig) -> Result<Self, RoundConfigError> {
        let config = Self { timer, scoring };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RoundConfigError> {
        if self.timer.total_seconds == 0 {
            return Err(RoundConfigError::ZeroDuration);
        }
        if self.timer.beep_interval_seconds == 0 {
            return Err(RoundConfigError::ZeroBeepInterval);
        }
        if self.timer.tick_interval.is_zero() {
            return Err(RoundConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}
