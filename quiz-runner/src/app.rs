use quiz_core::QuizSession;
use quiz_types::PlayerAction;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cues::CuePlayer;
use crate::input::ActionSource;
use crate::round_driver::run_round;
use crate::render::View;

/// Show the question list and run rounds until the player quits.
///
/// Returns the final total score.
pub async fn run_quiz<I, V>(
    session: &mut QuizSession,
    input: &mut I,
    cues: Arc<dyn CuePlayer>,
    view: &mut V,
) -> i32
where
    I: ActionSource,
    V: View + ?Sized,
{
    info!("Quiz started with {} questions", session.questions().len());

    loop {
        if let Err(e) = view.show_questions(&session.tiles(), session.total_score()) {
            warn!("Failed to draw question list: {}", e);
        }

        match input.next_list_action().await {
            Some(PlayerAction::SelectQuestion { number }) => {
                let Some(index) = (number as usize).checked_sub(1) else {
                    warn!("Question numbers start at 1");
                    continue;
                };
                match run_round(session, index, input, cues.clone(), view).await {
                    Ok(finish) if finish.quit => break,
                    Ok(_) => {}
                    Err(e) => warn!("Cannot open question {}: {}", number, e),
                }
            }
            Some(PlayerAction::Quit) | None => break,
            Some(action) => debug!("Ignoring {:?} on the question list", action),
        }
    }

    let total = session.total_score();
    info!("Quiz finished with a total score of {}", total);
    total
}
