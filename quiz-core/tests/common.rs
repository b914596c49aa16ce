#![allow(dead_code)]

use quiz_core::{QuestionRepository, QuizSession, RoundConfig, RoundEvent, RoundEventHandler};
use quiz_types::QuestionRecord;
use std::sync::{Arc, Mutex};

/// A small question sheet with a known layout
pub const TEST_SHEET: &str = "Type,Answer,Hint1,Hint2,Hint3,Hint4\n\
    Capital,Paris,Seine,Louvre,Eiffel,Baguette\n\
    Element,Gold,Au,Yellow,Precious,79\n\
    Animal,Owl,Night,Feathers,Wise,Hoot\n\
    Planet,Mars,Red,Fourth,Rover,Phobos\n";

/// Creates a repository from the test sheet
pub fn create_test_repository() -> QuestionRepository {
    QuestionRepository::load(TEST_SHEET).expect("test sheet should load")
}

/// Creates a session over the test sheet with the default round configuration
pub fn create_test_session() -> QuizSession {
    QuizSession::new(create_test_repository(), RoundConfig::default())
        .expect("default config should be valid")
}

/// Creates a session that reports every round event to the returned collector
pub fn create_observed_session() -> (QuizSession, EventCollector) {
    let collector = EventCollector::new();
    let session = create_test_session().with_event_handler(Box::new(collector.clone()));
    (session, collector)
}

/// Creates a standalone record with numbered hints
pub fn create_test_record(answer: &str) -> QuestionRecord {
    QuestionRecord::new(
        "Test".to_string(),
        answer.to_string(),
        ["one", "two", "three", "four"].map(String::from),
    )
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<RoundEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<RoundEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn count_matching(&self, check_fn: impl Fn(&RoundEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| check_fn(e)).count()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&RoundEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl RoundEventHandler for EventCollector {
    fn handle_event(&mut self, event: RoundEvent) {
        self.events.lock().unwrap().push(event);
    }
}
