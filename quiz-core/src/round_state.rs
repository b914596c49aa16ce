use quiz_types::{
    CLUE_COUNT, Cue, QuestionRecord, RoundAction, RoundId, RoundOutcome, RoundSnapshot,
    RoundStatus,
};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{CountdownCue, RoundConfig, RoundEvent, ScoringEngine, in_danger_zone};

/// Side effects a transition asks its host to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEffect {
    PlayCue(Cue),
    StartRepeatingCue { cue: Cue, interval: Duration },
    StopRepeatingCue,
    /// The round resolved; this record goes back to the repository.
    Resolved(QuestionRecord),
}

/// Play loop for a single question.
///
/// Every operation is a no-op once the round is resolved, and none of them
/// fail: guards are checked before any state changes.
#[derive(Debug)]
pub struct Round {
    id: RoundId,
    question_index: usize,
    record: QuestionRecord,
    config: RoundConfig,
    revealed: Vec<u8>,
    wrong_attempts: u32,
    remaining_seconds: u32,
    status: RoundStatus,
    tick_cue_running: bool,
    events: Vec<RoundEvent>,
}

impl Round {
    /// Open a round for `record` and return the cues due at full time.
    pub fn start(
        question_index: usize,
        mut record: QuestionRecord,
        config: RoundConfig,
    ) -> (Self, Vec<RoundEffect>) {
        record.is_opened = true;
        let id = Uuid::new_v4();
        let total_seconds = config.timer.total_seconds;

        let mut round = Self {
            id,
            question_index,
            record,
            config,
            revealed: Vec::with_capacity(CLUE_COUNT),
            wrong_attempts: 0,
            remaining_seconds: total_seconds,
            status: RoundStatus::Playing,
            tick_cue_running: false,
            events: Vec::new(),
        };
        round.events.push(RoundEvent::RoundStarted {
            round_id: id,
            question_index,
            total_seconds,
        });
        info!(
            "Round {} started for question {} ({}s)",
            id,
            question_index + 1,
            total_seconds
        );

        let mut effects = Vec::new();
        round.countdown_cues(&mut effects);
        (round, effects)
    }

    pub fn dispatch(&mut self, action: RoundAction) -> Vec<RoundEffect> {
        match action {
            RoundAction::Reveal { clue } => self.reveal(clue),
            RoundAction::Judge { is_correct } => self.judge(is_correct),
        }
    }

    pub fn reveal(&mut self, clue: u8) -> Vec<RoundEffect> {
        if !self.is_playing() {
            debug!("Round {}: ignoring reveal of clue {} after resolution", self.id, clue);
            return Vec::new();
        }
        if !(1..=CLUE_COUNT as u8).contains(&clue) || self.revealed.contains(&clue) {
            debug!("Round {}: ignoring reveal of clue {}", self.id, clue);
            return Vec::new();
        }

        self.revealed.push(clue);
        self.events.push(RoundEvent::ClueRevealed {
            round_id: self.id,
            clue,
            possible_score: self.possible_score(),
        });
        vec![RoundEffect::PlayCue(Cue::Beep)]
    }

    pub fn judge(&mut self, is_correct: bool) -> Vec<RoundEffect> {
        if !self.is_playing() {
            debug!("Round {}: ignoring judgment after resolution", self.id);
            return Vec::new();
        }

        if is_correct {
            let score = self.possible_score();
            return self.resolve(true, score, 0, Cue::Correct);
        }

        self.wrong_attempts += 1;
        self.events.push(RoundEvent::WrongAttempt {
            round_id: self.id,
            attempts: self.wrong_attempts,
        });

        if ScoringEngine::grants_retry(self.wrong_attempts, self.revealed.len(), CLUE_COUNT) {
            info!("Round {}: first wrong answer, one more try", self.id);
            return vec![RoundEffect::PlayCue(Cue::Wrong)];
        }

        let penalty = self.config.scoring.wrong_penalty;
        self.resolve(false, penalty, penalty, Cue::Wrong)
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> Vec<RoundEffect> {
        if !self.is_playing() {
            return Vec::new();
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            return self.expire();
        }

        let mut effects = Vec::new();
        self.countdown_cues(&mut effects);
        effects
    }

    /// Time ran out. Unlike an interactive wrong answer there is no second try.
    pub fn expire(&mut self) -> Vec<RoundEffect> {
        if !self.is_playing() {
            return Vec::new();
        }

        self.remaining_seconds = 0;
        self.wrong_attempts += 1;
        self.events.push(RoundEvent::TimerExpired { round_id: self.id });
        info!("Round {}: timer expired", self.id);

        let penalty = self.config.scoring.wrong_penalty;
        self.resolve(false, penalty, penalty, Cue::Wrong)
    }

    /// Leave the round. Whatever state it is in, the tick loop stops.
    pub fn exit(&mut self) -> Vec<RoundEffect> {
        let resolved = !self.is_playing();
        self.events.push(RoundEvent::RoundExited {
            round_id: self.id,
            question_index: self.question_index,
            resolved,
        });
        info!("Round {} exited (resolved: {})", self.id, resolved);
        self.stop_tick_cue().into_iter().collect()
    }

    pub fn possible_score(&self) -> i32 {
        ScoringEngine::possible_score(&self.config.scoring, self.revealed.len())
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let hints = std::array::from_fn(|index| {
            let clue = index as u8 + 1;
            self.revealed
                .contains(&clue)
                .then(|| self.record.hints[index].clone())
        });

        let outcome = (!self.is_playing()).then(|| RoundOutcome {
            answer: self.record.answer.clone(),
            is_correct: self.record.is_correct,
            awarded_score: self.record.awarded_score,
            penalty: self.record.penalty,
        });

        RoundSnapshot {
            round_id: self.id,
            question_index: self.question_index as u32,
            question_type: self.record.question_type.clone(),
            hints,
            revealed_clues: self.revealed.clone(),
            status: self.status,
            remaining_seconds: self.remaining_seconds,
            in_danger_zone: in_danger_zone(self.remaining_seconds, &self.config.timer),
            wrong_attempts: self.wrong_attempts,
            possible_score: self.possible_score(),
            pending_penalty: ScoringEngine::pending_penalty(
                &self.config.scoring,
                self.wrong_attempts,
            ),
            outcome,
        }
    }

    pub fn id(&self) -> RoundId {
        self.id
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == RoundStatus::Playing
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn wrong_attempts(&self) -> u32 {
        self.wrong_attempts
    }

    pub fn revealed_clues(&self) -> &[u8] {
        &self.revealed
    }

    pub fn record(&self) -> &QuestionRecord {
        &self.record
    }

    pub fn into_record(self) -> QuestionRecord {
        self.record
    }

    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    fn resolve(
        &mut self,
        is_correct: bool,
        awarded: i32,
        penalty: i32,
        cue: Cue,
    ) -> Vec<RoundEffect> {
        let mut effects: Vec<RoundEffect> = self.stop_tick_cue().into_iter().collect();
        self.status = RoundStatus::Resolved;

        for clue in 1..=CLUE_COUNT as u8 {
            if !self.revealed.contains(&clue) {
                self.revealed.push(clue);
            }
        }

        self.record.awarded_score = awarded;
        self.record.penalty = penalty;
        self.record.is_correct = is_correct;
        self.record.wrong_attempts = self.wrong_attempts;
        self.record.show_answer = true;

        self.events.push(RoundEvent::RoundResolved {
            round_id: self.id,
            question_index: self.question_index,
            is_correct,
            awarded_score: awarded,
            penalty,
            resolved_at: chrono::Utc::now().to_rfc3339(),
        });
        info!(
            "Round {} resolved: correct={} score={} penalty={}",
            self.id, is_correct, awarded, penalty
        );

        effects.push(RoundEffect::PlayCue(cue));
        effects.push(RoundEffect::Resolved(self.record.clone()));
        effects
    }

    fn countdown_cues(&mut self, effects: &mut Vec<RoundEffect>) {
        match CountdownCue::at(self.remaining_seconds, &self.config.timer) {
            CountdownCue::DangerZone => {
                if !self.tick_cue_running {
                    self.tick_cue_running = true;
                    effects.push(RoundEffect::StartRepeatingCue {
                        cue: Cue::Tick,
                        interval: self.config.timer.tick_interval,
                    });
                }
            }
            CountdownCue::Beep => {
                effects.extend(self.stop_tick_cue());
                effects.push(RoundEffect::PlayCue(Cue::Beep));
            }
            CountdownCue::Silent => effects.extend(self.stop_tick_cue()),
        }
    }

    fn stop_tick_cue(&mut self) -> Option<RoundEffect> {
        if self.tick_cue_running {
            self.tick_cue_running = false;
            Some(RoundEffect::StopRepeatingCue)
        } else {
            None
        }
    }
}
