use crate::types::GameKind;

/// Result type for host session operations
pub type HostResult<T> = Result<T, HostError>;

/// Errors surfaced to the host. None of them leave the session unusable.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Unknown deck: {game}::{category}")]
    UnknownDeck { game: GameKind, category: String },

    #[error("Too many special roles for the number of players ({special} special roles, {players} players)")]
    InfeasibleQuota { special: usize, players: usize },

    #[error("Player count must be at least 1")]
    InvalidPlayerCount,

    #[error("No roles generated yet")]
    NoActiveAssignment,

    #[error("No {0} card is showing")]
    NoCardShowing(GameKind),

    #[error("Timer for {game} must be between {min} and {max} seconds (got {requested})")]
    InvalidTimer {
        game: GameKind,
        requested: u32,
        min: u32,
        max: u32,
    },

    #[error("A countdown is already running")]
    CountdownRunning,

    #[error("No countdown is running")]
    NoTimer,

    #[error("Invalid command: {0}")]
    BadCommand(String),

    #[error("Deck file error: {0}")]
    DeckFile(String),
}

impl HostError {
    /// Stable code sent to the presentation layer alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            HostError::UnknownDeck { .. } => "UNKNOWN_DECK",
            HostError::InfeasibleQuota { .. } => "INFEASIBLE_QUOTA",
            HostError::InvalidPlayerCount => "INVALID_PLAYER_COUNT",
            HostError::NoActiveAssignment => "NO_ACTIVE_ASSIGNMENT",
            HostError::NoCardShowing(_) => "NO_CARD_SHOWING",
            HostError::InvalidTimer { .. } => "INVALID_TIMER",
            HostError::CountdownRunning => "COUNTDOWN_RUNNING",
            HostError::NoTimer => "NO_TIMER",
            HostError::BadCommand(_) => "BAD_COMMAND",
            HostError::DeckFile(_) => "DECK_FILE",
        }
    }
}

impl From<serde_json::Error> for HostError {
    fn from(e: serde_json::Error) -> Self {
        HostError::DeckFile(e.to_string())
    }
}
