use std::path::PathBuf;
use thiserror::Error;

/// The question sheet could not be turned into records. Fatal for the session.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to read question sheet {path}: {source}")]
    Unreachable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("question sheet has no header row")]
    MissingHeader,
    #[error("question sheet header is missing the {0} column")]
    MissingColumn(&'static str),
    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("question index {index} out of range ({len} questions)")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("a round is already in progress")]
    RoundInProgress,
    #[error("question {number} has already been opened")]
    AlreadyOpened { number: usize },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundConfigError {
    #[error("round duration must be at least one second")]
    ZeroDuration,
    #[error("beep interval must be at least one second")]
    ZeroBeepInterval,
    #[error("tick cue interval must be non-zero")]
    ZeroTickInterval,
}
