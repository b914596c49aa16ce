use quiz_types::RoundId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEvent {
    RoundStarted {
        round_id: RoundId,
        question_index: usize,
        total_seconds: u32,
    },
    ClueRevealed {
        round_id: RoundId,
        clue: u8,
        possible_score: i32,
    },
    WrongAttempt {
        round_id: RoundId,
        attempts: u32,
    },
    TimerExpired {
        round_id: RoundId,
    },
    RoundResolved {
        round_id: RoundId,
        question_index: usize,
        is_correct: bool,
        awarded_score: i32,
        penalty: i32,
        resolved_at: String, // RFC 3339
    },
    RoundExited {
        round_id: RoundId,
        question_index: usize,
        resolved: bool,
    },
}

impl RoundEvent {
    pub fn round_id(&self) -> RoundId {
        match self {
            RoundEvent::RoundStarted { round_id, .. }
            | RoundEvent::ClueRevealed { round_id, .. }
            | RoundEvent::WrongAttempt { round_id, .. }
            | RoundEvent::TimerExpired { round_id }
            | RoundEvent::RoundResolved { round_id, .. }
            | RoundEvent::RoundExited { round_id, .. } => *round_id,
        }
    }
}

/// Event handler trait for observing round progress
pub trait RoundEventHandler {
    fn handle_event(&mut self, event: RoundEvent);
}

/// Simple event bus for distributing round events
pub struct RoundEventBus {
    handlers: Vec<Box<dyn RoundEventHandler + Send>>,
}

impl RoundEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn RoundEventHandler + Send>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: RoundEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for RoundEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RoundEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundEventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
