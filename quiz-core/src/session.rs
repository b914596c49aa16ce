use quiz_types::{QuestionRecord, QuestionTile, RoundAction, RoundSnapshot};
use tracing::{debug, error, info};

use crate::{
    QuestionRepository, Round, RoundConfig, RoundConfigError, RoundEffect, RoundEventBus,
    RoundEventHandler, SessionError,
};

/// How a round ended when the player left it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundExit {
    pub question_index: usize,
    pub record: QuestionRecord,
    pub resolved: bool,
    pub effects: Vec<RoundEffect>,
}

/// A quiz session: the question list plus at most one round in play.
#[derive(Debug)]
pub struct QuizSession {
    repository: QuestionRepository,
    config: RoundConfig,
    active_round: Option<Round>,
    event_bus: RoundEventBus,
}

impl QuizSession {
    /// Rejects a configuration that would stall or divide by zero mid-round.
    pub fn new(
        repository: QuestionRepository,
        config: RoundConfig,
    ) -> Result<Self, RoundConfigError> {
        config.validate()?;
        Ok(Self {
            repository,
            config,
            active_round: None,
            event_bus: RoundEventBus::new(),
        })
    }

    pub fn with_event_handler(mut self, handler: Box<dyn RoundEventHandler + Send>) -> Self {
        self.event_bus.add_handler(handler);
        self
    }

    pub fn add_event_handler(&mut self, handler: Box<dyn RoundEventHandler + Send>) {
        self.event_bus.add_handler(handler);
    }

    /// Open the question at `index` and start its round.
    pub fn open_question(&mut self, index: usize) -> Result<Vec<RoundEffect>, SessionError> {
        if self.active_round.is_some() {
            return Err(SessionError::RoundInProgress);
        }

        let record = self
            .repository
            .get(index)
            .ok_or(crate::RepositoryError::IndexOutOfRange {
                index,
                len: self.repository.len(),
            })?;
        if record.is_opened {
            return Err(SessionError::AlreadyOpened { number: index + 1 });
        }
        let record = record.clone();

        self.repository.mark_opened(index)?;
        let (round, effects) = Round::start(index, record, self.config.clone());
        self.active_round = Some(round);
        self.publish_events();

        Ok(effects)
    }

    /// Route a reveal or judgment to the active round.
    pub fn dispatch(&mut self, action: RoundAction) -> Vec<RoundEffect> {
        let Some(round) = self.active_round.as_mut() else {
            debug!("No active round, ignoring {:?}", action);
            return Vec::new();
        };
        let effects = round.dispatch(action);
        self.after_transition(&effects);
        effects
    }

    /// One second of countdown for the active round.
    pub fn tick(&mut self) -> Vec<RoundEffect> {
        let Some(round) = self.active_round.as_mut() else {
            return Vec::new();
        };
        let effects = round.tick();
        self.after_transition(&effects);
        effects
    }

    /// Leave the active round and return to the question list.
    pub fn exit_round(&mut self) -> Option<RoundExit> {
        let mut round = self.active_round.take()?;
        let effects = round.exit();
        let resolved = !round.is_playing();
        for event in round.drain_events() {
            self.event_bus.publish(event);
        }

        let question_index = round.question_index();
        Some(RoundExit {
            question_index,
            record: round.into_record(),
            resolved,
            effects,
        })
    }

    pub fn snapshot(&self) -> Option<RoundSnapshot> {
        self.active_round.as_ref().map(Round::snapshot)
    }

    pub fn is_round_active(&self) -> bool {
        self.active_round.is_some()
    }

    pub fn is_round_playing(&self) -> bool {
        self.active_round.as_ref().is_some_and(Round::is_playing)
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        self.repository.records()
    }

    pub fn tiles(&self) -> Vec<QuestionTile> {
        self.repository.tiles()
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Sum of the scores of every resolved question.
    pub fn total_score(&self) -> i32 {
        self.repository
            .iter()
            .filter(|record| record.is_resolved())
            .map(|record| record.awarded_score)
            .sum()
    }

    fn after_transition(&mut self, effects: &[RoundEffect]) {
        for effect in effects {
            if let RoundEffect::Resolved(record) = effect {
                self.write_back(record.clone());
            }
        }
        self.publish_events();
    }

    fn write_back(&mut self, record: QuestionRecord) {
        let Some(index) = self.active_round.as_ref().map(Round::question_index) else {
            return;
        };
        match self.repository.replace(index, record) {
            Ok(()) => info!("Question {} resolved and stored", index + 1),
            Err(e) => error!("Failed to store resolved question {}: {}", index + 1, e),
        }
    }

    fn publish_events(&mut self) {
        if let Some(round) = self.active_round.as_mut() {
            for event in round.drain_events() {
                self.event_bus.publish(event);
            }
        }
    }
}
