use quiz_core::RoundEffect;
use quiz_types::Cue;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum CueError {
    #[error("sound asset {0} not found")]
    Missing(PathBuf),
    #[error("failed to start cue player for {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fire-and-forget sound playback.
pub trait CuePlayer: Send + Sync {
    fn play(&self, cue: Cue) -> Result<(), CueError>;
}

/// Play a cue, logging instead of propagating any failure.
pub fn play_and_log(player: &dyn CuePlayer, cue: Cue) {
    if let Err(e) = player.play(cue) {
        warn!("Cue {} unavailable: {}", cue, e);
    }
}

/// Plays `<sounds_dir>/<cue>.mp3` through an external command, or rings the
/// terminal bell when no command is configured.
#[derive(Debug, Clone)]
pub struct CommandCuePlayer {
    sounds_dir: PathBuf,
    command: Option<String>,
}

impl CommandCuePlayer {
    pub fn new(sounds_dir: impl Into<PathBuf>, command: Option<String>) -> Self {
        Self {
            sounds_dir: sounds_dir.into(),
            command,
        }
    }

    pub fn asset_path(&self, cue: Cue) -> PathBuf {
        self.sounds_dir.join(format!("{}.mp3", cue.name()))
    }

    fn spawn_command(&self, command: &str, path: &Path) -> Result<(), CueError> {
        let mut parts = command.split_whitespace();
        let Some(program) = parts.next() else {
            return Ok(());
        };
        // The child is never awaited; the runtime reaps it once it exits.
        tokio::process::Command::new(program)
            .args(parts)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(drop)
            .map_err(|source| CueError::Spawn {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl CuePlayer for CommandCuePlayer {
    fn play(&self, cue: Cue) -> Result<(), CueError> {
        match &self.command {
            Some(command) => {
                let path = self.asset_path(cue);
                if !path.is_file() {
                    return Err(CueError::Missing(path));
                }
                self.spawn_command(command, &path)
            }
            None => {
                let mut stderr = std::io::stderr();
                if let Err(e) = stderr.write_all(b"\x07").and_then(|_| stderr.flush()) {
                    debug!("Terminal bell failed: {}", e);
                }
                Ok(())
            }
        }
    }
}

/// A cue replayed on a fixed interval until the handle is stopped or dropped.
#[derive(Debug)]
pub struct RepeatingCue {
    cue: Cue,
    task: JoinHandle<()>,
}

impl RepeatingCue {
    /// Start playing `cue` now and every `interval` after that.
    pub fn spawn(player: Arc<dyn CuePlayer>, cue: Cue, interval: Duration) -> Self {
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                play_and_log(player.as_ref(), cue);
            }
        });
        Self { cue, task }
    }

    pub fn cue(&self) -> Cue {
        self.cue
    }

    pub fn stop(self) {
        // Drop does the work
    }
}

impl Drop for RepeatingCue {
    fn drop(&mut self) {
        self.task.abort();
        debug!("Stopped repeating cue {}", self.cue);
    }
}

/// Carries out the cue effects of a round and owns its repeating cue.
///
/// Dropping the deck cancels whatever is still looping.
pub struct CueDeck {
    player: Arc<dyn CuePlayer>,
    repeating: Option<RepeatingCue>,
}

impl CueDeck {
    pub fn new(player: Arc<dyn CuePlayer>) -> Self {
        Self {
            player,
            repeating: None,
        }
    }

    pub fn apply(&mut self, effects: &[RoundEffect]) {
        for effect in effects {
            match effect {
                RoundEffect::PlayCue(cue) => play_and_log(self.player.as_ref(), *cue),
                RoundEffect::StartRepeatingCue { cue, interval } if interval.is_zero() => {
                    warn!("Cue {} has a zero repeat interval, playing it once", cue);
                    play_and_log(self.player.as_ref(), *cue);
                }
                RoundEffect::StartRepeatingCue { cue, interval } => {
                    // Replacing an old handle drops (and cancels) it
                    self.repeating = Some(RepeatingCue::spawn(
                        self.player.clone(),
                        *cue,
                        *interval,
                    ));
                }
                RoundEffect::StopRepeatingCue => {
                    if let Some(repeating) = self.repeating.take() {
                        repeating.stop();
                    }
                }
                RoundEffect::Resolved(_) => {}
            }
        }
    }

    pub fn is_repeating(&self) -> bool {
        self.repeating.is_some()
    }
}
