mod deck;
mod mafia;
mod timer;

pub use deck::CardDraw;

use crate::config::HostConfig;
use crate::countdown::CountdownHandle;
use crate::decks::DeckRegistry;
use crate::draw::DrawTracker;
use crate::error::HostResult;
use crate::protocol::HostEvent;
use crate::roles::MafiaTable;
use crate::types::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};

/// The countdown currently attached to the session
pub(crate) struct ActiveTimer {
    pub game: GameKind,
    pub handle: CountdownHandle,
}

/// State of one hosting session.
///
/// Every field sits behind a lock so a single session can be driven from several
/// tasks; independent sessions share nothing.
#[derive(Clone)]
pub struct HostState {
    pub id: SessionId,
    pub created_at: String,
    pub config: HostConfig,
    pub decks: Arc<DeckRegistry>,
    pub draws: Arc<RwLock<DrawTracker>>,
    /// Card on screen per game
    pub showing: Arc<RwLock<HashMap<GameKind, String>>>,
    /// Cards marked as guessed, per game
    pub guessed: Arc<RwLock<HashMap<GameKind, Vec<String>>>>,
    pub mafia: Arc<RwLock<Option<MafiaTable>>>,
    pub(crate) timer: Arc<Mutex<Option<ActiveTimer>>>,
    pub rng: Arc<Mutex<ChaCha8Rng>>,
    /// Pushed events (countdown ticks) for whoever renders the session
    pub events: broadcast::Sender<HostEvent>,
}

impl HostState {
    /// Session with the built-in decks and an OS-seeded RNG
    pub fn new() -> Self {
        Self::with_decks(DeckRegistry::builtin(), HostConfig::default())
    }

    /// Session with the built-in decks and a fixed seed
    pub fn seeded(seed: u64) -> Self {
        let config = HostConfig {
            seed: Some(seed),
            ..HostConfig::default()
        };
        Self::with_decks(DeckRegistry::builtin(), config)
    }

    /// Session from configuration, merging the configured deck file over the built-ins
    pub fn from_config(config: HostConfig) -> HostResult<Self> {
        let mut decks = DeckRegistry::builtin();
        if let Some(path) = &config.decks_file {
            decks.merge(DeckRegistry::load_file(path)?);
        }
        Ok(Self::with_decks(decks, config))
    }

    pub fn with_decks(decks: DeckRegistry, config: HostConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        let (tx, _rx) = broadcast::channel(100);
        let state = Self {
            id: ulid::Ulid::new().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            config,
            decks: Arc::new(decks),
            draws: Arc::new(RwLock::new(DrawTracker::new())),
            showing: Arc::new(RwLock::new(HashMap::new())),
            guessed: Arc::new(RwLock::new(HashMap::new())),
            mafia: Arc::new(RwLock::new(None)),
            timer: Arc::new(Mutex::new(None)),
            rng: Arc::new(Mutex::new(rng)),
            events: tx,
        };
        tracing::info!(
            "Created session {} with {} decks",
            state.id,
            state.decks.len()
        );
        state
    }

    /// Receive pushed events
    pub fn subscribe(&self) -> broadcast::Receiver<HostEvent> {
        self.events.subscribe()
    }

    /// Push an event; having no subscribers is fine
    pub fn broadcast(&self, event: HostEvent) {
        let _ = self.events.send(event);
    }
}

impl Default for HostState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostError;
    use std::io::Write;

    #[tokio::test]
    async fn test_new_session() {
        let state = HostState::new();
        assert!(!state.id.is_empty());
        assert_eq!(state.decks.len(), 5);
        assert!(state.mafia.read().await.is_none());
        assert!(state.showing.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let a = HostState::seeded(1);
        let b = HostState::seeded(1);
        assert_ne!(a.id, b.id);

        a.draw_next(GameKind::Charades, "Bollywood movies or Tv Serial")
            .await
            .unwrap();
        a.generate_roles(5, RoleQuota::new(1, 0, 0)).await.unwrap();

        assert_eq!(
            b.remaining(GameKind::Charades, "Bollywood movies or Tv Serial")
                .await
                .unwrap(),
            44
        );
        assert!(b.mafia.read().await.is_none());
    }

    #[tokio::test]
    async fn test_seeded_sessions_draw_alike() {
        let a = HostState::seeded(2024);
        let b = HostState::seeded(2024);
        for _ in 0..5 {
            assert_eq!(
                a.draw_next(GameKind::Pictionary, "Professions").await.unwrap(),
                b.draw_next(GameKind::Pictionary, "Professions").await.unwrap()
            );
        }
    }

    #[tokio::test]
    async fn test_from_config_merges_deck_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"pictionary": {{"Animals": ["Tiger"]}}}}"#).unwrap();

        let config = HostConfig {
            seed: Some(5),
            decks_file: Some(file.path().to_path_buf()),
            ..HostConfig::default()
        };
        let state = HostState::from_config(config).unwrap();
        assert_eq!(state.decks.len(), 6);

        let draw = state.draw_next(GameKind::Pictionary, "Animals").await.unwrap();
        assert!(matches!(draw, CardDraw::Card { ref prompt, remaining: 0 } if prompt == "Tiger"));
    }

    #[tokio::test]
    async fn test_from_config_bad_deck_file() {
        let config = HostConfig {
            decks_file: Some("/nonexistent/decks.json".into()),
            ..HostConfig::default()
        };
        assert!(matches!(
            HostState::from_config(config),
            Err(HostError::DeckFile(_))
        ));
    }
}
