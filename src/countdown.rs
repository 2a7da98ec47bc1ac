//! Round countdown
//!
//! `Countdown` is the tick schedule: whole seconds from the configured duration down
//! to zero, each with the elapsed fraction for a progress bar. It can be consumed
//! directly, as a timed stream, or by a spawned task that feeds a callback and can
//! be cancelled from the outside.

use futures::stream::{self, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountdownTick {
    pub remaining_secs: u32,
    /// 0.0 on the first tick, 1.0 on the last
    pub fraction_elapsed: f64,
}

/// Finite, non-restartable tick sequence
#[derive(Debug, Clone)]
pub struct Countdown {
    total: u32,
    next: Option<u32>,
}

impl Countdown {
    pub fn new(secs: u32) -> Self {
        Self {
            total: secs,
            next: Some(secs),
        }
    }

    /// Emit the remaining ticks with `interval` between consecutive ones
    pub fn into_stream(self, interval: Duration) -> impl Stream<Item = CountdownTick> {
        stream::unfold((self, true), move |(mut countdown, first)| async move {
            let tick = countdown.next()?;
            if !first {
                tokio::time::sleep(interval).await;
            }
            Some((tick, (countdown, false)))
        })
    }
}

impl Iterator for Countdown {
    type Item = CountdownTick;

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = self.next?;
        self.next = remaining.checked_sub(1);

        let done = (self.total - remaining) as f64 / self.total.max(1) as f64;
        Some(CountdownTick {
            remaining_secs: remaining,
            fraction_elapsed: done.clamp(0.0, 1.0),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.next.map_or(0, |r| r as usize + 1);
        (n, Some(n))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownOutcome {
    Completed,
    Cancelled,
}

/// A countdown running on the tokio runtime. Dropping the handle stops it.
#[derive(Debug)]
pub struct CountdownHandle {
    cancel: Arc<Notify>,
    outcome: watch::Receiver<Option<CountdownOutcome>>,
    task: JoinHandle<()>,
}

impl CountdownHandle {
    /// Stop before the next tick. No effect once finished.
    pub fn cancel(&self) {
        self.cancel.notify_one();
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.borrow().is_some() || self.task.is_finished()
    }

    /// Observer that can await the outcome without holding on to the handle
    pub fn waiter(&self) -> CountdownWaiter {
        CountdownWaiter(self.outcome.clone())
    }

    /// Wait for the countdown to complete or be cancelled
    pub async fn wait(&self) -> CountdownOutcome {
        self.waiter().wait().await
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[derive(Debug, Clone)]
pub struct CountdownWaiter(watch::Receiver<Option<CountdownOutcome>>);

impl CountdownWaiter {
    pub async fn wait(mut self) -> CountdownOutcome {
        match self.0.wait_for(Option::is_some).await {
            Ok(outcome) => (*outcome).unwrap_or(CountdownOutcome::Cancelled),
            Err(_) => {
                tracing::debug!("Countdown task ended without an outcome");
                CountdownOutcome::Cancelled
            }
        }
    }
}

/// Spawn a countdown that calls `on_tick` for every tick.
/// Must be called from within a tokio runtime.
pub fn spawn_countdown<F>(secs: u32, interval: Duration, mut on_tick: F) -> CountdownHandle
where
    F: FnMut(CountdownTick) + Send + 'static,
{
    let cancel = Arc::new(Notify::new());
    let cancelled = cancel.clone();
    let (outcome_tx, outcome) = watch::channel(None);

    let task = tokio::spawn(async move {
        let mut ticks = Box::pin(Countdown::new(secs).into_stream(interval));
        let outcome = loop {
            tokio::select! {
                _ = cancelled.notified() => {
                    tracing::debug!("Countdown of {}s cancelled", secs);
                    break CountdownOutcome::Cancelled;
                }
                tick = ticks.next() => match tick {
                    Some(tick) => on_tick(tick),
                    None => break CountdownOutcome::Completed,
                },
            }
        };
        outcome_tx.send_replace(Some(outcome));
    });

    CountdownHandle {
        cancel,
        outcome,
        task,
    }
}
