//! Command dispatch
//!
//! The single entry point for a presentation layer: one command in, one reply out.
//! Failures come back as `HostEvent::Error` and never poison the session.

use crate::error::{HostError, HostResult};
use crate::protocol::{HostCommand, HostEvent};
use crate::state::{CardDraw, HostState};
use crate::types::{GameKind, PlayerView};
use std::sync::Arc;

/// Handle a host command and return the reply
pub async fn handle_command(cmd: HostCommand, state: &Arc<HostState>) -> HostEvent {
    match cmd {
        HostCommand::ListDecks => HostEvent::Decks {
            decks: state.deck_infos().await,
        },

        HostCommand::Draw { game, category } => handle_draw(state, game, category).await,

        HostCommand::ResetDeck { game, category } => {
            match state.reset_deck(game, &category).await {
                Ok(()) => HostEvent::DeckReset { game, category },
                Err(e) => e.into(),
            }
        }

        HostCommand::ResetAll => HostEvent::AllDecksReset {
            decks_cleared: state.reset_all().await,
        },

        HostCommand::MarkGuessed { game } => match state.mark_guessed(game).await {
            Ok((prompt, total)) => HostEvent::Guessed {
                game,
                prompt,
                total,
            },
            Err(e) => e.into(),
        },

        HostCommand::GenerateRoles { players, quota } => {
            let players = players.unwrap_or(state.config.default_players);
            let quota = quota.unwrap_or(state.config.default_quota);
            tracing::info!("Host generating roles for {} players", players);
            match state.generate_roles(players, quota).await {
                Ok(assignment) => match state.current_player().await {
                    Ok(player) => HostEvent::RolesReady {
                        assignment_id: assignment.id,
                        player,
                    },
                    Err(e) => e.into(),
                },
                Err(e) => {
                    tracing::warn!("Role generation failed: {}", e);
                    e.into()
                }
            }
        }

        HostCommand::ClearRoles => {
            state.clear_roles().await;
            HostEvent::RolesCleared
        }

        HostCommand::RevealRole => player_event(state.reveal_role().await),
        HostCommand::HideRole => player_event(state.hide_role().await),
        HostCommand::NextPlayer => player_event(state.next_player().await),
        HostCommand::CurrentPlayer => player_event(state.current_player().await),

        HostCommand::RoleSummary => match state.role_summary().await {
            Ok(counts) => HostEvent::Summary {
                total: counts.values().sum(),
                counts,
            },
            Err(e) => e.into(),
        },

        HostCommand::StartTimer { game, seconds } => {
            match state.start_timer(game, seconds).await {
                // Announced on the event stream ahead of the first tick
            Ok(seconds) => HostEvent::TimerStarted { game, seconds },
                Err(e) => e.into(),
            }
        }

        HostCommand::CancelTimer => match state.cancel_timer().await {
            Some(game) => HostEvent::TimerCancelled { game },
            None => HostError::NoTimer.into(),
        },
    }
}

async fn handle_draw(state: &Arc<HostState>, game: GameKind, category: String) -> HostEvent {
    match state.draw_next(game, &category).await {
        Ok(CardDraw::Card { prompt, remaining }) => HostEvent::Card {
            game,
            category,
            prompt,
            remaining,
        },
        Ok(CardDraw::Exhausted) => HostEvent::DeckExhausted { game, category },
        Err(e) => e.into(),
    }
}

fn player_event(result: HostResult<PlayerView>) -> HostEvent {
    match result {
        Ok(player) => HostEvent::Player { player },
        Err(e) => e.into(),
    }
}
