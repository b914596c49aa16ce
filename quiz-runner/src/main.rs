use anyhow::Context;
use std::sync::Arc;
use tracing::{error, info};

use quiz_core::{QuestionRepository, QuizSession};
use quiz_runner::{
    config::Config, cues::CommandCuePlayer, events::TracingEventHandler, input::KeyboardInput,
    render::{create_view, show_load_failure},
    run_quiz,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with the rendered view
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    info!("Starting quiz runner...");

    let config = Config::from_env().context("invalid quiz configuration")?;
    let mut view = create_view(&config, std::io::stdout());

    info!("Loading questions from {}", config.questions_path.display());
    let repository = match QuestionRepository::from_path(&config.questions_path) {
        Ok(repository) => repository,
        Err(e) => {
            error!(
                "Failed to load questions from '{}': {}",
                config.questions_path.display(),
                e
            );
            error!("Set QUESTIONS_PATH to a CSV sheet with Type, Answer and Hint1-Hint4 columns.");
            // The error screen is terminal; nothing else can be done without questions
            show_load_failure(view.as_mut(), &e.to_string());
            return Err(e).context("question sheet could not be loaded");
        }
    };
    info!("Loaded {} questions", repository.len());

    let mut session = QuizSession::new(repository, config.round.clone())
        .context("invalid round configuration")?
        .with_event_handler(Box::new(TracingEventHandler));
    let cues = Arc::new(CommandCuePlayer::new(
        config.sounds_dir.clone(),
        config.cue_command.clone(),
    ));
    let mut input = KeyboardInput::spawn_stdin();

    let total = run_quiz(&mut session, &mut input, cues, view.as_mut()).await;
    info!("Quiz runner shut down with a total score of {}", total);

    Ok(())
}
