use crate::error::HostError;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Actions the presentation layer can trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum HostCommand {
    /// List games, categories and how many cards are left in each
    ListDecks,
    Draw {
        game: GameKind,
        category: String,
    },
    ResetDeck {
        game: GameKind,
        category: String,
    },
    /// Clear used-card tracking for every deck (host "start fresh")
    ResetAll,
    /// Award a point for the card currently showing
    MarkGuessed {
        game: GameKind,
    },
    /// Missing fields fall back to the session's configured defaults
    GenerateRoles {
        #[serde(default)]
        players: Option<usize>,
        #[serde(default)]
        quota: Option<RoleQuota>,
    },
    ClearRoles,
    RevealRole,
    HideRole,
    NextPlayer,
    CurrentPlayer,
    /// Role counts only, never who holds which role
    RoleSummary,
    StartTimer {
        game: GameKind,
        /// Falls back to the game's default duration
        #[serde(default)]
        seconds: Option<u32>,
    },
    CancelTimer,
}

/// Replies and pushed events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum HostEvent {
    Decks {
        decks: Vec<DeckInfo>,
    },
    Card {
        game: GameKind,
        category: String,
        prompt: String,
        remaining: usize,
    },
    DeckExhausted {
        game: GameKind,
        category: String,
    },
    DeckReset {
        game: GameKind,
        category: String,
    },
    AllDecksReset {
        decks_cleared: usize,
    },
    Guessed {
        game: GameKind,
        prompt: String,
        total: usize,
    },
    RolesReady {
        assignment_id: AssignmentId,
        player: PlayerView,
    },
    RolesCleared,
    Player {
        player: PlayerView,
    },
    Summary {
        counts: BTreeMap<Role, usize>,
        total: usize,
    },
    TimerStarted {
        game: GameKind,
        seconds: u32,
    },
    TimerTick {
        game: GameKind,
        remaining_secs: u32,
        fraction_elapsed: f64,
    },
    TimerFinished {
        game: GameKind,
    },
    TimerCancelled {
        game: GameKind,
    },
    Error {
        code: String,
        msg: String,
    },
}

impl From<HostError> for HostEvent {
    fn from(e: HostError) -> Self {
        HostEvent::Error {
            code: e.code().to_string(),
            msg: e.to_string(),
        }
    }
}
