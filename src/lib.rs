// Public API for the presentation layer and integration tests

pub mod config;
pub mod countdown;
pub mod decks;
pub mod draw;
pub mod error;
pub mod handlers;
pub mod protocol;
pub mod roles;
pub mod state;
pub mod types;
