use quiz_core::{RoundEvent, RoundEventHandler};
use tracing::info;

/// Writes every round event to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventHandler;

impl RoundEventHandler for TracingEventHandler {
    fn handle_event(&mut self, event: RoundEvent) {
        match event {
            RoundEvent::RoundStarted {
                round_id,
                question_index,
                total_seconds,
            } => info!(
                "Round {} started on question {} with {}s on the clock",
                round_id,
                question_index + 1,
                total_seconds
            ),
            RoundEvent::ClueRevealed {
                round_id,
                clue,
                possible_score,
            } => info!(
                "Round {}: clue {} revealed, possible score now {}",
                round_id, clue, possible_score
            ),
            RoundEvent::WrongAttempt { round_id, attempts } => {
                info!("Round {}: wrong attempt #{}", round_id, attempts)
            }
            RoundEvent::TimerExpired { round_id } => info!("Round {}: time is up", round_id),
            RoundEvent::RoundResolved {
                round_id,
                question_index,
                is_correct,
                awarded_score,
                penalty,
                resolved_at,
            } => info!(
                "Round {} resolved question {} at {}: correct={} score={} penalty={}",
                round_id,
                question_index + 1,
                resolved_at,
                is_correct,
                awarded_score,
                penalty
            ),
            RoundEvent::RoundExited {
                round_id,
                question_index,
                resolved,
            } => info!(
                "Round {} exited from question {} (resolved: {})",
                round_id,
                question_index + 1,
                resolved
            ),
        }
    }
}
