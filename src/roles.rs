//! Mafia role assignment and the pass-the-phone reveal cursor

use crate::error::{HostError, HostResult};
use crate::types::{PlayerView, Role, RoleAssignment, RoleQuota};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Special roles in declared order, padded with the default label. Not shuffled.
pub fn ordered_roles(player_count: usize, quota: &RoleQuota) -> HostResult<Vec<Role>> {
    let mut roles: Vec<Role> = Role::SPECIAL
        .iter()
        .flat_map(|role| std::iter::repeat(*role).take(quota.count(*role)))
        .collect();

    if roles.len() > player_count {
        return Err(HostError::InfeasibleQuota {
            special: roles.len(),
            players: player_count,
        });
    }
    if player_count == 0 {
        return Err(HostError::InvalidPlayerCount);
    }

    roles.resize(player_count, Role::DEFAULT);
    Ok(roles)
}

/// Build a uniformly shuffled role list for `player_count` players
pub fn build_roles<R: Rng + ?Sized>(
    player_count: usize,
    quota: &RoleQuota,
    rng: &mut R,
) -> HostResult<Vec<Role>> {
    let mut roles = ordered_roles(player_count, quota)?;
    roles.shuffle(rng);
    Ok(roles)
}

/// Tally of labels in a role list
pub fn counts_by_role(roles: &[Role]) -> BTreeMap<Role, usize> {
    let mut counts = BTreeMap::new();
    for role in roles {
        *counts.entry(*role).or_insert(0) += 1;
    }
    counts
}

/// Position of the device in the player circle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealCursor {
    pub index: usize,
    pub revealed: bool,
}

/// An assignment together with its reveal cursor
#[derive(Debug, Clone)]
pub struct MafiaTable {
    assignment: RoleAssignment,
    cursor: RevealCursor,
}

impl MafiaTable {
    /// Wrap a non-empty role list; the cursor starts at the first player, hidden
    pub fn new(roles: Vec<Role>) -> HostResult<Self> {
        if roles.is_empty() {
            return Err(HostError::InvalidPlayerCount);
        }
        Ok(Self {
            assignment: RoleAssignment {
                id: ulid::Ulid::new().to_string(),
                roles,
                created_at: chrono::Utc::now().to_rfc3339(),
            },
            cursor: RevealCursor::default(),
        })
    }

    pub fn assignment(&self) -> &RoleAssignment {
        &self.assignment
    }

    pub fn cursor(&self) -> RevealCursor {
        self.cursor
    }

    pub fn reveal(&mut self) {
        self.cursor.revealed = true;
    }

    pub fn hide(&mut self) {
        self.cursor.revealed = false;
    }

    /// Hide and pass to the next player, wrapping after the last one
    pub fn advance(&mut self) {
        self.cursor.revealed = false;
        self.cursor.index = (self.cursor.index + 1) % self.assignment.player_count();
    }

    /// What the current holder of the device sees
    pub fn view(&self) -> PlayerView {
        PlayerView {
            number: self.cursor.index + 1,
            total: self.assignment.player_count(),
            revealed: self.cursor.revealed,
            role: self
                .cursor
                .revealed
                .then(|| self.assignment.roles[self.cursor.index]),
        }
    }

    pub fn counts(&self) -> BTreeMap<Role, usize> {
        counts_by_role(&self.assignment.roles)
    }
}
