use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::{broadcast, mpsc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use partyhost::{
    config::HostConfig,
    error::HostError,
    handlers::handle_command,
    protocol::{HostCommand, HostEvent},
    state::HostState,
};

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Logs go to stderr; stdout carries the event stream
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "partyhost=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting party host...");

    let config = HostConfig::from_env();
    let state = match HostState::from_config(config) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("Failed to start session: {}", e);
            std::process::exit(1);
        }
    };

    let (out_tx, out_rx) = mpsc::unbounded_channel::<HostEvent>();
    let writer = tokio::spawn(write_events(out_rx));
    spawn_timer_forwarder(state.subscribe(), out_tx.clone());

    // One JSON command per line
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read stdin: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<HostCommand>(&line) {
            Ok(cmd) => {
                tracing::debug!("Command: {:?}", cmd);
                handle_command(cmd, &state).await
            }
            Err(e) => HostError::BadCommand(e.to_string()).into(),
        };
        // The forwarder already wrote it, ahead of the ticks
        if matches!(reply, HostEvent::TimerStarted { .. }) {
            continue;
        }
        if out_tx.send(reply).is_err() {
            break;
        }
    }

    state.cancel_timer().await;
    drop(out_tx);
    drop(state);
    let _ = writer.await;
    tracing::info!("Session closed");
}

/// Forward countdown events to the output stream, in the order they were pushed
fn spawn_timer_forwarder(
    mut rx: broadcast::Receiver<HostEvent>,
    out: mpsc::UnboundedSender<HostEvent>,
) {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(
                    event @ (HostEvent::TimerStarted { .. }
                    | HostEvent::TimerTick { .. }
                    | HostEvent::TimerFinished { .. }),
                ) => {
                    if out.send(event).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!("Dropped {} timer events", n);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

async fn write_events(mut rx: mpsc::UnboundedReceiver<HostEvent>) {
    let mut stdout = tokio::io::stdout();
    while let Some(event) = rx.recv().await {
        let mut line = match serde_json::to_string(&event) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize event: {}", e);
                continue;
            }
        };
        line.push('\n');
        if stdout.write_all(line.as_bytes()).await.is_err() {
            break;
        }
        let _ = stdout.flush().await;
    }
}
