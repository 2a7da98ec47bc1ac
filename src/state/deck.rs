//! Card drawing for charades and pictionary

use super::HostState;
use crate::draw::DrawOutcome;
use crate::error::{HostError, HostResult};
use crate::types::*;

/// Owned result of drawing through the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardDraw {
    Card { prompt: String, remaining: usize },
    Exhausted,
}

impl HostState {
    /// Draw the next unseen card of a deck and put it on screen.
    /// An exhausted deck takes the current card off screen.
    pub async fn draw_next(&self, game: GameKind, category: &str) -> HostResult<CardDraw> {
        let items = self.decks.get_deck(game, category)?;
        let key = DeckKey::new(game, category);

        let draw = {
            let mut draws = self.draws.write().await;
            let mut rng = self.rng.lock().await;
            match draws.draw_unique(&key, items, &mut *rng) {
                DrawOutcome::Drawn { prompt, .. } => CardDraw::Card {
                    prompt: prompt.to_string(),
                    remaining: draws.remaining(&key, items.len()),
                },
                DrawOutcome::Exhausted => CardDraw::Exhausted,
            }
        };

        let mut showing = self.showing.write().await;
        match &draw {
            CardDraw::Card { prompt, remaining } => {
                tracing::debug!("Drew from {} ({} left)", key, remaining);
                showing.insert(game, prompt.clone());
            }
            CardDraw::Exhausted => {
                tracing::info!("Deck {} exhausted", key);
                showing.remove(&game);
            }
        }
        Ok(draw)
    }

    /// Make every card of one deck drawable again and clear the screen for its game
    pub async fn reset_deck(&self, game: GameKind, category: &str) -> HostResult<()> {
        self.decks.get_deck(game, category)?;
        let key = DeckKey::new(game, category);

        self.draws.write().await.reset_deck(&key);
        self.showing.write().await.remove(&game);

        tracing::info!("Reset deck {}", key);
        Ok(())
    }

    /// Clear used-card tracking of every deck. Nothing else in the session changes.
    pub async fn reset_all(&self) -> usize {
        let cleared = self.draws.write().await.reset_all();
        tracing::info!("Reset all decks ({} had been drawn from)", cleared);
        cleared
    }

    /// Card currently on screen for a game
    pub async fn showing(&self, game: GameKind) -> Option<String> {
        self.showing.read().await.get(&game).cloned()
    }

    /// Cards left in a deck before it is exhausted
    pub async fn remaining(&self, game: GameKind, category: &str) -> HostResult<usize> {
        let items = self.decks.get_deck(game, category)?;
        Ok(self
            .draws
            .read()
            .await
            .remaining(&DeckKey::new(game, category), items.len()))
    }

    /// All decks with their sizes and remaining cards
    pub async fn deck_infos(&self) -> Vec<DeckInfo> {
        let draws = self.draws.read().await;
        self.decks
            .keys()
            .filter_map(|key| {
                let items = self.decks.get_deck(key.game, &key.category).ok()?;
                Some(DeckInfo {
                    game: key.game,
                    category: key.category.clone(),
                    size: items.len(),
                    remaining: draws.remaining(key, items.len()),
                })
            })
            .collect()
    }

    /// Score the card on screen as guessed. Returns the card and the game's total.
    pub async fn mark_guessed(&self, game: GameKind) -> HostResult<(String, usize)> {
        let prompt = self
            .showing(game)
            .await
            .ok_or(HostError::NoCardShowing(game))?;

        let mut guessed = self.guessed.write().await;
        let cards = guessed.entry(game).or_default();
        cards.push(prompt.clone());
        let total = cards.len();

        tracing::info!("Point for {} ({} total)", game, total);
        Ok((prompt, total))
    }

    /// Number of points scored in a game this session
    pub async fn guessed_count(&self, game: GameKind) -> usize {
        self.guessed.read().await.get(&game).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const PROFESSIONS: &str = "Professions";

    #[tokio::test]
    async fn test_draw_whole_deck_without_repeats() {
        let state = HostState::seeded(9);
        let size = state.decks.get_deck(GameKind::Pictionary, PROFESSIONS).unwrap().len();

        let mut seen = HashSet::new();
        for i in 0..size {
            match state.draw_next(GameKind::Pictionary, PROFESSIONS).await.unwrap() {
                CardDraw::Card { prompt, remaining } => {
                    assert!(seen.insert(prompt));
                    assert_eq!(remaining, size - i - 1);
                }
                CardDraw::Exhausted => panic!("Deck exhausted early"),
            }
        }

        assert_eq!(
            state.draw_next(GameKind::Pictionary, PROFESSIONS).await.unwrap(),
            CardDraw::Exhausted
        );
        assert_eq!(state.showing(GameKind::Pictionary).await, None);
    }

    #[tokio::test]
    async fn test_unknown_deck_leaves_state_alone() {
        let state = HostState::seeded(1);
        state.draw_next(GameKind::Pictionary, PROFESSIONS).await.unwrap();
        let before = state.showing(GameKind::Pictionary).await;

        let result = state.draw_next(GameKind::Pictionary, "Animals").await;
        assert!(matches!(result, Err(HostError::UnknownDeck { .. })));
        assert_eq!(state.showing(GameKind::Pictionary).await, before);

        assert!(state.reset_deck(GameKind::Charades, "Animals").await.is_err());
    }

    #[tokio::test]
    async fn test_reset_deck_clears_screen() {
        let state = HostState::seeded(2);
        state.draw_next(GameKind::Pictionary, PROFESSIONS).await.unwrap();
        assert!(state.showing(GameKind::Pictionary).await.is_some());

        state.reset_deck(GameKind::Pictionary, PROFESSIONS).await.unwrap();
        assert!(state.showing(GameKind::Pictionary).await.is_none());
        assert_eq!(
            state.remaining(GameKind::Pictionary, PROFESSIONS).await.unwrap(),
            23
        );
    }

    #[tokio::test]
    async fn test_reset_all_keeps_screen_and_roles() {
        let state = HostState::seeded(3);
        state
            .draw_next(GameKind::Charades, "Bollywood movies or Tv Serial")
            .await
            .unwrap();
        state.draw_next(GameKind::Pictionary, PROFESSIONS).await.unwrap();
        state.generate_roles(6, RoleQuota::default()).await.unwrap();
        state.reveal_role().await.unwrap();

        assert_eq!(state.reset_all().await, 2);

        for info in state.deck_infos().await {
            assert_eq!(info.size, info.remaining);
        }
        assert!(state.showing(GameKind::Charades).await.is_some());
        let player = state.current_player().await.unwrap();
        assert!(player.revealed);
        assert_eq!(player.total, 6);
    }

    #[tokio::test]
    async fn test_mark_guessed() {
        let state = HostState::seeded(4);
        assert!(matches!(
            state.mark_guessed(GameKind::Pictionary).await,
            Err(HostError::NoCardShowing(GameKind::Pictionary))
        ));

        let draw = state.draw_next(GameKind::Pictionary, PROFESSIONS).await.unwrap();
        let (prompt, total) = state.mark_guessed(GameKind::Pictionary).await.unwrap();
        assert_eq!(draw, CardDraw::Card { prompt, remaining: 22 });
        assert_eq!(total, 1);
        assert_eq!(state.guessed_count(GameKind::Pictionary).await, 1);
        assert_eq!(state.guessed_count(GameKind::Charades).await, 0);
    }
}
