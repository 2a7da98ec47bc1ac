//! Round timer for the drawing games

use super::{ActiveTimer, HostState};
use crate::countdown::{spawn_countdown, CountdownOutcome};
use crate::error::{HostError, HostResult};
use crate::protocol::HostEvent;
use crate::types::*;

impl HostState {
    /// Start a round countdown for a game. Pushes `TimerStarted`, then a `TimerTick`
    /// per second and `TimerFinished`. Only one countdown runs per session.
    pub async fn start_timer(&self, game: GameKind, seconds: Option<u32>) -> HostResult<u32> {
        let bounds = game.timer_bounds();
        let seconds = seconds.unwrap_or(bounds.default);
        if !bounds.contains(seconds) {
            return Err(HostError::InvalidTimer {
                game,
                requested: seconds,
                min: bounds.min,
                max: bounds.max,
            });
        }

        let mut timer = self.timer.lock().await;
        if timer.as_ref().is_some_and(|t| !t.handle.is_finished()) {
            return Err(HostError::CountdownRunning);
        }

        self.broadcast(HostEvent::TimerStarted { game, seconds });
        let events = self.events.clone();
        let handle = spawn_countdown(seconds, self.config.tick_interval, move |tick| {
            let _ = events.send(HostEvent::TimerTick {
                game,
                remaining_secs: tick.remaining_secs,
                fraction_elapsed: tick.fraction_elapsed,
            });
            if tick.remaining_secs == 0 {
                let _ = events.send(HostEvent::TimerFinished { game });
            }
        });
        *timer = Some(ActiveTimer { game, handle });

        tracing::info!("Started {}s {} timer", seconds, game);
        Ok(seconds)
    }

    /// Stop the running countdown. Returns the game it belonged to, if one was running.
    pub async fn cancel_timer(&self) -> Option<GameKind> {
        let active = self.timer.lock().await.take()?;
        if active.handle.is_finished() {
            return None;
        }

        active.handle.cancel();
        active.handle.wait().await;
        self.broadcast(HostEvent::TimerCancelled { game: active.game });

        tracing::info!("Cancelled {} timer", active.game);
        Some(active.game)
    }

    pub async fn timer_running(&self) -> bool {
        self.timer
            .lock()
            .await
            .as_ref()
            .is_some_and(|t| !t.handle.is_finished())
    }

    /// Wait for the current countdown to end. The countdown stays attached to the
    /// session (and cancellable) until it has finished.
    pub async fn wait_timer(&self) -> Option<CountdownOutcome> {
        let waiter = self.timer.lock().await.as_ref()?.handle.waiter();
        let outcome = waiter.wait().await;

        let mut timer = self.timer.lock().await;
        if timer.as_ref().is_some_and(|t| t.handle.is_finished()) {
            *timer = None;
        }
        Some(outcome)
    }
}
