use quiz_core::{QuizSession, RoundExit, SessionError};
use quiz_types::PlayerAction;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, interval_at};
use tracing::{debug, info, warn};

use crate::cues::{CueDeck, CuePlayer};
use crate::input::ActionSource;
use crate::render::View;

const SECOND: Duration = Duration::from_secs(1);

/// Result of driving one round to the point where the player left it.
#[derive(Debug)]
pub struct RoundFinish {
    pub exit: Option<RoundExit>,
    /// The player asked to quit, or the input closed.
    pub quit: bool,
}

/// Open question `index` and run its round until the player leaves.
///
/// The countdown only ticks while the round is still being played. A
/// resolved round stays on screen, silent, until the player exits it.
pub async fn run_round<I, V>(
    session: &mut QuizSession,
    index: usize,
    input: &mut I,
    cues: Arc<dyn CuePlayer>,
    view: &mut V,
) -> Result<RoundFinish, SessionError>
where
    I: ActionSource,
    V: View + ?Sized,
{
    let effects = session.open_question(index)?;
    let mut deck = CueDeck::new(cues);
    deck.apply(&effects);
    redraw(session, view);

    let mut countdown = interval_at(Instant::now() + SECOND, SECOND);
    let mut quit = false;

    loop {
        tokio::select! {
            _ = countdown.tick(), if session.is_round_playing() => {
                deck.apply(&session.tick());
            }
            action = input.next_round_action() => match action {
                Some(PlayerAction::ExitRound) => break,
                Some(PlayerAction::Quit) | None => {
                    quit = true;
                    break;
                }
                Some(action) => match action.as_round_action() {
                    Some(round_action) => deck.apply(&session.dispatch(round_action)),
                    None => debug!("Ignoring {:?} inside a round", action),
                },
            },
        }
        redraw(session, view);
    }

    let exit = session.exit_round();
    if let Some(exit) = &exit {
        deck.apply(&exit.effects);
        info!(
            "Left question {} (resolved: {})",
            exit.question_index + 1,
            exit.resolved
        );
    }
    // Whatever is still looping dies with the deck
    drop(deck);

    Ok(RoundFinish { exit, quit })
}

fn redraw<V: View + ?Sized>(session: &QuizSession, view: &mut V) {
    if let Some(snapshot) = session.snapshot() {
        if let Err(e) = view.show_round(&snapshot) {
            warn!("Failed to draw round: {}", e);
        }
    }
}
