use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque ID types
pub type SessionId = String;
pub type AssignmentId = String;

/// The card-drawing games served by the host
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Charades,
    Pictionary,
}

impl GameKind {
    pub const ALL: [GameKind; 2] = [GameKind::Charades, GameKind::Pictionary];

    /// Allowed round timer range for this game
    pub fn timer_bounds(&self) -> TimerBounds {
        match self {
            GameKind::Charades => TimerBounds {
                min: 5,
                max: 120,
                default: 30,
            },
            GameKind::Pictionary => TimerBounds {
                min: 10,
                max: 120,
                default: 30,
            },
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameKind::Charades => write!(f, "charades"),
            GameKind::Pictionary => write!(f, "pictionary"),
        }
    }
}

impl FromStr for GameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "charades" => Ok(GameKind::Charades),
            "pictionary" => Ok(GameKind::Pictionary),
            other => Err(format!("Unknown game: {}", other)),
        }
    }
}

/// Identifies one deck: a category within a game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DeckKey {
    pub game: GameKind,
    pub category: String,
}

impl DeckKey {
    pub fn new(game: GameKind, category: impl Into<String>) -> Self {
        Self {
            game,
            category: category.into(),
        }
    }
}

impl fmt::Display for DeckKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.game, self.category)
    }
}

/// Inclusive timer range in seconds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TimerBounds {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl TimerBounds {
    pub fn contains(&self, secs: u32) -> bool {
        (self.min..=self.max).contains(&secs)
    }
}

/// Mafia role labels. Variant order is the declared order used before shuffling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Mafia,
    Detective,
    Doctor,
    Villager,
}

impl Role {
    /// Special roles in declared order
    pub const SPECIAL: [Role; 3] = [Role::Mafia, Role::Detective, Role::Doctor];

    /// Label given to every player without a special role
    pub const DEFAULT: Role = Role::Villager;
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Mafia => write!(f, "Mafia"),
            Role::Detective => write!(f, "Detective"),
            Role::Doctor => write!(f, "Doctor"),
            Role::Villager => write!(f, "Villager"),
        }
    }
}

/// Requested number of each special role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleQuota {
    pub mafia: usize,
    pub detective: usize,
    pub doctor: usize,
}

impl Default for RoleQuota {
    fn default() -> Self {
        Self {
            mafia: 2,
            detective: 1,
            doctor: 1,
        }
    }
}

impl RoleQuota {
    pub fn new(mafia: usize, detective: usize, doctor: usize) -> Self {
        Self {
            mafia,
            detective,
            doctor,
        }
    }

    /// Quota for a special role (zero for the default label)
    pub fn count(&self, role: Role) -> usize {
        match role {
            Role::Mafia => self.mafia,
            Role::Detective => self.detective,
            Role::Doctor => self.doctor,
            Role::Villager => 0,
        }
    }

    /// Total number of special roles requested
    pub fn special_total(&self) -> usize {
        Role::SPECIAL.iter().map(|r| self.count(*r)).sum()
    }
}

/// A generated role list, one label per player position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoleAssignment {
    pub id: AssignmentId,
    pub roles: Vec<Role>,
    pub created_at: String,
}

impl RoleAssignment {
    pub fn player_count(&self) -> usize {
        self.roles.len()
    }
}

/// What the device shows for the player currently holding it.
/// `role` is only present while revealed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerView {
    /// 1-based player number
    pub number: usize,
    pub total: usize,
    pub revealed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Category listing for a deck selector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeckInfo {
    pub game: GameKind,
    pub category: String,
    pub size: usize,
    pub remaining: usize,
}
