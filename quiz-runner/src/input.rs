use quiz_types::PlayerAction;
use std::future::Future;
use std::io::BufRead;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Source of player actions for the question list and for a round.
///
/// `None` means the input is gone and the session should end.
pub trait ActionSource {
    fn next_list_action(&mut self) -> impl Future<Output = Option<PlayerAction>> + Send;
    fn next_round_action(&mut self) -> impl Future<Output = Option<PlayerAction>> + Send;
}

/// Key bindings while the question list is shown: a question number opens
/// it, `q` quits.
pub fn parse_list_key(line: &str) -> Option<PlayerAction> {
    let key = line.trim();
    match key.to_lowercase().as_str() {
        "q" | "quit" => Some(PlayerAction::Quit),
        _ => match key.parse::<u32>() {
            Ok(number) if number >= 1 => Some(PlayerAction::SelectQuestion { number }),
            _ => None,
        },
    }
}

/// Key bindings inside a round: `1`-`4` reveal, `+`/`-` judge, `0`, `esc`
/// or `q` leave the round.
pub fn parse_round_key(line: &str) -> Option<PlayerAction> {
    match line.trim().to_lowercase().as_str() {
        "1" => Some(PlayerAction::RevealClue { clue: 1 }),
        "2" => Some(PlayerAction::RevealClue { clue: 2 }),
        "3" => Some(PlayerAction::RevealClue { clue: 3 }),
        "4" => Some(PlayerAction::RevealClue { clue: 4 }),
        "+" => Some(PlayerAction::SubmitCorrect),
        "-" => Some(PlayerAction::SubmitIncorrect),
        "0" | "esc" | "\u{1b}" | "q" => Some(PlayerAction::ExitRound),
        _ => None,
    }
}

/// Line-oriented keyboard input read from stdin on a dedicated thread.
pub struct KeyboardInput {
    lines: mpsc::Receiver<String>,
}

impl KeyboardInput {
    pub fn from_lines(lines: mpsc::Receiver<String>) -> Self {
        Self { lines }
    }

    /// Spawn the stdin reader. A plain thread is used so a pending read never
    /// holds up runtime shutdown.
    pub fn spawn_stdin() -> Self {
        let (tx, rx) = mpsc::channel(32);
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read from stdin: {}", e);
                        break;
                    }
                }
            }
            debug!("Stdin reader finished");
        });
        Self::from_lines(rx)
    }

    async fn next_mapped(
        &mut self,
        keymap: fn(&str) -> Option<PlayerAction>,
    ) -> Option<PlayerAction> {
        loop {
            let line = self.lines.recv().await?;
            match keymap(&line) {
                Some(action) => return Some(action),
                None => debug!("Ignoring unbound key {:?}", line),
            }
        }
    }
}

impl ActionSource for KeyboardInput {
    fn next_list_action(&mut self) -> impl Future<Output = Option<PlayerAction>> + Send {
        self.next_mapped(parse_list_key)
    }

    fn next_round_action(&mut self) -> impl Future<Output = Option<PlayerAction>> + Send {
        self.next_mapped(parse_round_key)
    }
}

/// Already-decoded actions, e.g. from a pointer-driven front end or a test.
impl ActionSource for mpsc::Receiver<PlayerAction> {
    fn next_list_action(&mut self) -> impl Future<Output = Option<PlayerAction>> + Send {
        self.recv()
    }

    fn next_round_action(&mut self) -> impl Future<Output = Option<PlayerAction>> + Send {
        self.recv()
    }
}
