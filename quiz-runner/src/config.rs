use quiz_core::{RoundConfig, RoundConfigError, ScoringConfig, TimerConfig};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
    #[error("QUESTIONS_PER_ROW must be at least 1")]
    ZeroQuestionsPerRow,
    #[error(transparent)]
    Round(#[from] RoundConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewFormat {
    Text,
    Json,
}

impl FromStr for ViewFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(ViewFormat::Text),
            "json" => Ok(ViewFormat::Json),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub questions_path: PathBuf,
    pub sounds_dir: PathBuf,
    pub cue_command: Option<String>,
    pub event_title: String,
    pub institute_name: String,
    pub questions_per_row: usize,
    pub view_format: ViewFormat,
    pub round: RoundConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup, falling back to the
    /// defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let timer = TimerConfig {
            total_seconds: parse_var(&lookup, "TIMER_TOTAL_SECONDS", 90)?,
            danger_zone_seconds: parse_var(&lookup, "TIMER_DANGER_ZONE_SECONDS", 75)?,
            beep_interval_seconds: parse_var(&lookup, "TIMER_BEEP_INTERVAL_SECONDS", 15)?,
            ..TimerConfig::default()
        };
        // Scoring is fixed for every event
        let round = RoundConfig::new(timer, ScoringConfig::default())?;

        let questions_per_row = parse_var(&lookup, "QUESTIONS_PER_ROW", 3)?;
        if questions_per_row == 0 {
            return Err(ConfigError::ZeroQuestionsPerRow);
        }

        Ok(Self {
            questions_path: PathBuf::from(text("QUESTIONS_PATH", "./data/questions.csv")),
            sounds_dir: PathBuf::from(text("SOUNDS_DIR", "./assets/sounds")),
            cue_command: lookup("CUE_COMMAND").filter(|command| !command.trim().is_empty()),
            event_title: text("EVENT_TITLE", "Quiz Challenge 2024"),
            institute_name: text("INSTITUTE_NAME", "Knowledge Institute"),
            questions_per_row,
            view_format: parse_var(&lookup, "VIEW_FORMAT", ViewFormat::Text)?,
            round,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.questions_path, PathBuf::from("./data/questions.csv"));
        assert_eq!(config.sounds_dir, PathBuf::from("./assets/sounds"));
        assert_eq!(config.cue_command, None);
        assert_eq!(config.event_title, "Quiz Challenge 2024");
        assert_eq!(config.institute_name, "Knowledge Institute");
        assert_eq!(config.questions_per_row, 3);
        assert_eq!(config.view_format, ViewFormat::Text);
        assert_eq!(config.round, RoundConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("QUESTIONS_PATH", "/srv/quiz/finals.csv"),
            ("CUE_COMMAND", "paplay"),
            ("TIMER_TOTAL_SECONDS", "60"),
            ("TIMER_DANGER_ZONE_SECONDS", " 20 "),
            ("VIEW_FORMAT", "JSON"),
            ("QUESTIONS_PER_ROW", "5"),
        ])
        .unwrap();
        assert_eq!(config.questions_path, PathBuf::from("/srv/quiz/finals.csv"));
        assert_eq!(config.cue_command.as_deref(), Some("paplay"));
        assert_eq!(config.round.timer.total_seconds, 60);
        assert_eq!(config.round.timer.danger_zone_seconds, 20);
        assert_eq!(config.round.timer.beep_interval_seconds, 15);
        assert_eq!(config.round.scoring, ScoringConfig::default());
        assert_eq!(config.view_format, ViewFormat::Json);
        assert_eq!(config.questions_per_row, 5);
    }

    #[test]
    fn test_blank_cue_command_is_unset() {
        let config = config_from(&[("CUE_COMMAND", "   ")]).unwrap();
        assert_eq!(config.cue_command, None);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            config_from(&[("TIMER_TOTAL_SECONDS", "ninety")]).unwrap_err(),
            ConfigError::InvalidValue {
                key: "TIMER_TOTAL_SECONDS",
                value: "ninety".to_string()
            }
        );
        assert!(matches!(
            config_from(&[("VIEW_FORMAT", "html")]),
            Err(ConfigError::InvalidValue { key: "VIEW_FORMAT", .. })
        ));
        assert_eq!(
            config_from(&[("TIMER_TOTAL_SECONDS", "0")]).unwrap_err(),
            ConfigError::Round(RoundConfigError::ZeroDuration)
        );
        assert_eq!(
            config_from(&[("QUESTIONS_PER_ROW", "0")]).unwrap_err(),
            ConfigError::ZeroQuestionsPerRow
        );
    }
}
