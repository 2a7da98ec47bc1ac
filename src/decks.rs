//! Deck registry
//!
//! Read-only `(game, category) -> prompts` tables. The built-in decks are always
//! present; a JSON deck file can add or replace categories at startup.

use crate::error::{HostError, HostResult};
use crate::types::{DeckKey, GameKind};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

const BOLLYWOOD: &[&str] = &[
    "Andaz Apna Apna", "Om Shanti Om", "Kal Ho Naa Ho", "Lagaan", "Gully Boy",
    "Dangal", "Bajrangi Bhaijaan", "Zindagi Na Milegi Dobara", "Jab We Met",
    "Kabir Singh", "Dil Chahta Hai", "Barfi!", "Queen", "Rockstar", "Kahaani",
    "Bhool Bhulaiyaa", "Hera Pheri", "Welcome", "Golmaal", "Chennai Express",
    "Yeh Jawaani Hai Deewani", "Swades", "Taare Zameen Par", "PK", "Don",
    "Don 2", "Race", "Race 2", "Tanu Weds Manu", "Stree", "Drishyam",
    "Sholay", "Deewar", "Black", "My Name Is Khan", "Sultan",
    "Taarak Mehta Ka Ooltah Chashmah", "CID", "Crime Patrol", "Balika Vadhu",
    "Naagin", "Bigg Boss", "Indian Idol", "Kaun Banega Crorepati",
];

const INDIAN_FOOD: &[&str] = &[
    "Pani Puri", "Vada Pav", "Dosa", "Idli", "Sambar", "Biryani", "Butter Chicken",
    "Rajma Chawal", "Chole Bhature", "Poha", "Upma", "Pav Bhaji", "Jalebi",
    "Gulab Jamun", "Samosa", "Kachori", "Pakora", "Misal Pav", "Dhaba",
    "Lassi", "Kulfi", "Rasgulla", "Modak", "Thepla", "Khichdi",
    "Fafda", "Dhokla", "Kheer", "Aloo Paratha", "Paneer Tikka",
    "Tandoor", "Chutney", "Pickle", "Papad",
];

const PROFESSIONS: &[&str] = &[
    "Doctor", "Dentist", "Teacher", "Cricketer", "Chef", "Engineer", "Lawyer", "Police",
    "Pilot", "Singer", "Actor", "Auto Rickshaw Driver", "Delivery Rider", "Journalist",
    "Photographer", "Tailor", "Carpenter", "Mechanic", "Barber", "Nurse",
    "Data Scientist", "YouTuber", "Stand-up Comedian",
];

const FESTIVAL_THINGS: &[&str] = &[
    "Rangoli", "Dhol", "Firecrackers", "Laddoo", "Aarti", "Garba", "Dandiya", "Gulal",
    "Diya", "Lantern", "Pandal", "Modak", "Ganesha Idol", "Christmas Tree", "Eidi",
    "Shehnai", "Mehendi", "Haldi Ceremony", "Dussehra Ravan", "Kite", "Bonfire",
    "Sweets Box", "New Clothes", "Thali", "Pooja Bell",
];

/// On-disk deck file layout: `{ "pictionary": { "Animals": ["Cat", ...] } }`
#[derive(Debug, Deserialize)]
struct DeckFile(HashMap<GameKind, BTreeMap<String, Vec<String>>>);

/// Named prompt collections, keyed by game and category
#[derive(Debug, Clone, Default)]
pub struct DeckRegistry {
    decks: HashMap<DeckKey, Vec<String>>,
    /// Insertion order, for stable category listings
    order: Vec<DeckKey>,
}

impl DeckRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in party decks
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.insert(
            GameKind::Charades,
            "Bollywood movies or Tv Serial",
            to_owned(BOLLYWOOD),
        );

        // The mixed category is the union of the three themed ones, in this order
        let mixed: Vec<String> = [INDIAN_FOOD, PROFESSIONS, FESTIVAL_THINGS]
            .concat()
            .into_iter()
            .map(str::to_string)
            .collect();
        registry.insert(
            GameKind::Pictionary,
            "Could be an Indian food or a Profession or Festival Thing",
            mixed,
        );
        registry.insert(GameKind::Pictionary, "Indian food", to_owned(INDIAN_FOOD));
        registry.insert(GameKind::Pictionary, "Professions", to_owned(PROFESSIONS));
        registry.insert(
            GameKind::Pictionary,
            "Festival things",
            to_owned(FESTIVAL_THINGS),
        );
        registry
    }

    /// Add a deck, replacing any deck with the same key
    pub fn insert(&mut self, game: GameKind, category: impl Into<String>, items: Vec<String>) {
        let key = DeckKey::new(game, category);
        if !self.decks.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.decks.insert(key, items);
    }

    /// Look up the prompts of a deck
    pub fn get_deck(&self, game: GameKind, category: &str) -> HostResult<&[String]> {
        self.decks
            .get(&DeckKey::new(game, category))
            .map(Vec::as_slice)
            .ok_or_else(|| HostError::UnknownDeck {
                game,
                category: category.to_string(),
            })
    }

    /// Category names of a game, in registration order
    pub fn categories(&self, game: GameKind) -> Vec<&str> {
        self.order
            .iter()
            .filter(|k| k.game == game)
            .map(|k| k.category.as_str())
            .collect()
    }

    /// All deck keys, in registration order
    pub fn keys(&self) -> impl Iterator<Item = &DeckKey> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Parse a JSON deck file into a registry
    pub fn from_json(json: &str) -> HostResult<Self> {
        let DeckFile(games) = serde_json::from_str(json)?;

        let mut registry = Self::new();
        // Deterministic order regardless of map iteration
        for game in GameKind::ALL {
            if let Some(categories) = games.get(&game) {
                for (category, items) in categories {
                    if category.trim().is_empty() {
                        return Err(HostError::DeckFile(format!(
                            "Empty category name in {} decks",
                            game
                        )));
                    }
                    registry.insert(game, category.clone(), items.clone());
                }
            }
        }
        Ok(registry)
    }

    /// Read and parse a JSON deck file
    pub fn load_file(path: impl AsRef<Path>) -> HostResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| HostError::DeckFile(format!("{}: {}", path.display(), e)))?;
        let registry = Self::from_json(&json)?;
        tracing::info!(
            "Loaded {} decks from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Add or replace every deck of `other` in this registry
    pub fn merge(&mut self, other: DeckRegistry) {
        let DeckRegistry { mut decks, order } = other;
        for key in order {
            if let Some(items) = decks.remove(&key) {
                self.insert(key.game, key.category, items);
            }
        }
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_decks() {
        let registry = DeckRegistry::builtin();
        assert_eq!(registry.len(), 5);
        assert_eq!(
            registry.categories(GameKind::Charades),
            vec!["Bollywood movies or Tv Serial"]
        );
        assert_eq!(
            registry.categories(GameKind::Pictionary),
            vec![
                "Could be an Indian food or a Profession or Festival Thing",
                "Indian food",
                "Professions",
                "Festival things",
            ]
        );

        let food = registry
            .get_deck(GameKind::Pictionary, "Indian food")
            .unwrap();
        assert_eq!(food.len(), 34);
        assert_eq!(food[0], "Pani Puri");

        let mixed = registry
            .get_deck(
                GameKind::Pictionary,
                "Could be an Indian food or a Profession or Festival Thing",
            )
            .unwrap();
        assert_eq!(mixed.len(), 34 + 23 + 25);
        // "Modak" appears twice and is kept twice
        assert_eq!(mixed.iter().filter(|s| *s == "Modak").count(), 2);
    }

    #[test]
    fn test_unknown_deck() {
        let registry = DeckRegistry::builtin();
        let result = registry.get_deck(GameKind::Charades, "Indian food");
        assert!(matches!(result, Err(HostError::UnknownDeck { .. })));
    }

    #[test]
    fn test_from_json_and_merge() {
        let json = r#"{
            "pictionary": { "Animals": ["Cat", "Dog"], "Indian food": ["Dosa"] },
            "charades": { "Cartoons": ["Chhota Bheem"] }
        }"#;
        let custom = DeckRegistry::from_json(json).unwrap();
        assert_eq!(custom.len(), 3);
        assert_eq!(custom.categories(GameKind::Charades), vec!["Cartoons"]);

        let mut registry = DeckRegistry::builtin();
        registry.merge(custom);
        assert_eq!(registry.len(), 7);
        assert_eq!(
            registry
                .get_deck(GameKind::Pictionary, "Indian food")
                .unwrap(),
            &["Dosa".to_string()]
        );
        assert_eq!(
            registry.get_deck(GameKind::Pictionary, "Animals").unwrap().len(),
            2
        );
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            DeckRegistry::from_json("{\"mafia\": {}}"),
            Err(HostError::DeckFile(_))
        ));
        assert!(matches!(
            DeckRegistry::from_json("{\"charades\": {\" \": []}}"),
            Err(HostError::DeckFile(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"charades": {{"Cricket": ["Sachin", "Dhoni"]}}}}"#).unwrap();

        let registry = DeckRegistry::load_file(file.path()).unwrap();
        assert_eq!(
            registry.get_deck(GameKind::Charades, "Cricket").unwrap().len(),
            2
        );

        let missing = DeckRegistry::load_file("/nonexistent/decks.json");
        assert!(matches!(missing, Err(HostError::DeckFile(_))));
    }
}
