//! No-repeat drawing
//!
//! Tracks which positions of each deck have already been shown and draws uniformly
//! among the rest. Positions, not values, are tracked: a deck listing the same
//! prompt twice shows it twice.

use crate::types::DeckKey;
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Result of a draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOutcome<'a> {
    Drawn { index: usize, prompt: &'a str },
    /// Every position of the deck has been shown since the last reset
    Exhausted,
}

impl<'a> DrawOutcome<'a> {
    pub fn prompt(&self) -> Option<&'a str> {
        match self {
            DrawOutcome::Drawn { prompt, .. } => Some(*prompt),
            DrawOutcome::Exhausted => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, DrawOutcome::Exhausted)
    }
}

/// Per-deck sets of already drawn positions
#[derive(Debug, Clone, Default)]
pub struct DrawTracker {
    used: HashMap<DeckKey, HashSet<usize>>,
}

impl DrawTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw a not-yet-used prompt from `items`, uniformly among remaining positions
    pub fn draw_unique<'a, R: Rng + ?Sized>(
        &mut self,
        key: &DeckKey,
        items: &'a [String],
        rng: &mut R,
    ) -> DrawOutcome<'a> {
        let used = self.used.entry(key.clone()).or_default();
        used.retain(|&i| i < items.len());

        let remaining: Vec<usize> = (0..items.len()).filter(|i| !used.contains(i)).collect();
        if remaining.is_empty() {
            return DrawOutcome::Exhausted;
        }

        let index = remaining[rng.random_range(0..remaining.len())];
        used.insert(index);
        DrawOutcome::Drawn {
            index,
            prompt: &items[index],
        }
    }

    /// Forget the draws of one deck
    pub fn reset_deck(&mut self, key: &DeckKey) {
        self.used.remove(key);
    }

    /// Forget the draws of every deck. Returns how many decks had been drawn from.
    pub fn reset_all(&mut self) -> usize {
        let tracked = self.used.len();
        self.used.clear();
        tracked
    }

    /// Number of positions drawn from a deck since its last reset
    pub fn used_count(&self, key: &DeckKey) -> usize {
        self.used.get(key).map_or(0, HashSet::len)
    }

    /// Positions still available in a deck of `len` items
    pub fn remaining(&self, key: &DeckKey, len: usize) -> usize {
        let used = self
            .used
            .get(key)
            .map_or(0, |u| u.iter().filter(|&&i| i < len).count());
        len - used
    }

    /// Whether a deck has any draw tracking state
    pub fn is_tracked(&self, key: &DeckKey) -> bool {
        self.used.contains_key(key)
    }
}
