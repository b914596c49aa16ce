use crate::TimerConfig;

/// What the countdown calls for at a given number of remaining seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownCue {
    Silent,
    Beep,
    DangerZone,
}

impl CountdownCue {
    /// Evaluate the cue for `remaining` seconds. Nothing plays at 0; that
    /// moment belongs to the timeout.
    pub fn at(remaining: u32, timer: &TimerConfig) -> Self {
        if remaining == 0 {
            CountdownCue::Silent
        } else if remaining <= timer.danger_zone_seconds {
            CountdownCue::DangerZone
        } else if remaining.checked_rem(timer.beep_interval_seconds) == Some(0) {
            CountdownCue::Beep
        } else {
            CountdownCue::Silent
        }
    }
}

pub fn in_danger_zone(remaining: u32, timer: &TimerConfig) -> bool {
    remaining <= timer.danger_zone_seconds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let timer = TimerConfig::default();
        assert_eq!(CountdownCue::at(90, &timer), CountdownCue::Beep);
        assert_eq!(CountdownCue::at(89, &timer), CountdownCue::Silent);
        assert_eq!(CountdownCue::at(76, &timer), CountdownCue::Silent);
        assert_eq!(CountdownCue::at(75, &timer), CountdownCue::DangerZone);
        // Multiples of the beep interval inside the danger zone do not beep
        for remaining in [60, 45, 30, 15] {
            assert_eq!(CountdownCue::at(remaining, &timer), CountdownCue::DangerZone);
        }
        assert_eq!(CountdownCue::at(1, &timer), CountdownCue::DangerZone);
        assert_eq!(CountdownCue::at(0, &timer), CountdownCue::Silent);
    }

    #[test]
    fn test_beeps_above_short_danger_zone() {
        let timer = TimerConfig {
            total_seconds: 120,
            danger_zone_seconds: 10,
            beep_interval_seconds: 30,
            ..TimerConfig::default()
        };
        let beeps: Vec<u32> = (1..=120)
            .rev()
            .filter(|&s| CountdownCue::at(s, &timer) == CountdownCue::Beep)
            .collect();
        assert_eq!(beeps, vec![120, 90, 60, 30]);
        assert!(in_danger_zone(10, &timer));
        assert!(!in_danger_zone(11, &timer));
    }

    #[test]
    fn test_zero_beep_interval_never_beeps() {
        let timer = TimerConfig {
            beep_interval_seconds: 0,
            ..TimerConfig::default()
        };
        assert_eq!(CountdownCue::at(90, &timer), CountdownCue::Silent);
        assert_eq!(CountdownCue::at(75, &timer), CountdownCue::DangerZone);
    }
}
