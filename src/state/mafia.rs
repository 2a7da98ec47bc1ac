//! Mafia host tool: secret roles passed around a single device

use super::HostState;
use crate::error::{HostError, HostResult};
use crate::roles::{build_roles, MafiaTable};
use crate::types::*;
use std::collections::BTreeMap;

impl HostState {
    /// Generate a fresh assignment, replacing any previous one.
    /// On failure the previous assignment and cursor are untouched.
    pub async fn generate_roles(
        &self,
        player_count: usize,
        quota: RoleQuota,
    ) -> HostResult<RoleAssignment> {
        let roles = {
            let mut rng = self.rng.lock().await;
            build_roles(player_count, &quota, &mut *rng)?
        };
        let table = MafiaTable::new(roles)?;
        let assignment = table.assignment().clone();

        *self.mafia.write().await = Some(table);

        tracing::info!(
            "Roles ready for {} players ({} mafia, {} detective, {} doctor)",
            player_count,
            quota.mafia,
            quota.detective,
            quota.doctor
        );
        Ok(assignment)
    }

    /// Discard the assignment
    pub async fn clear_roles(&self) {
        if self.mafia.write().await.take().is_some() {
            tracing::info!("Cleared role assignment");
        }
    }

    /// Apply a cursor operation to the active table and return the resulting view
    async fn with_table<F>(&self, op: F) -> HostResult<PlayerView>
    where
        F: FnOnce(&mut MafiaTable),
    {
        let mut mafia = self.mafia.write().await;
        let table = mafia.as_mut().ok_or(HostError::NoActiveAssignment)?;
        op(table);
        Ok(table.view())
    }

    /// Show the current player their role
    pub async fn reveal_role(&self) -> HostResult<PlayerView> {
        self.with_table(MafiaTable::reveal).await
    }

    pub async fn hide_role(&self) -> HostResult<PlayerView> {
        self.with_table(MafiaTable::hide).await
    }

    /// Hide the role and hand the device to the next player
    pub async fn next_player(&self) -> HostResult<PlayerView> {
        let view = self.with_table(MafiaTable::advance).await?;
        tracing::debug!("Passed to player {}/{}", view.number, view.total);
        Ok(view)
    }

    pub async fn current_player(&self) -> HostResult<PlayerView> {
        self.with_table(|_| {}).await
    }

    /// Role tally for the host; says nothing about who holds which role
    pub async fn role_summary(&self) -> HostResult<BTreeMap<Role, usize>> {
        self.mafia
            .read()
            .await
            .as_ref()
            .map(MafiaTable::counts)
            .ok_or(HostError::NoActiveAssignment)
    }

    /// The full assignment, if any
    pub async fn assignment(&self) -> Option<RoleAssignment> {
        self.mafia
            .read()
            .await
            .as_ref()
            .map(|t| t.assignment().clone())
    }
}
