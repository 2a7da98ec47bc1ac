//! Host configuration from environment variables

use crate::types::RoleQuota;
use std::path::PathBuf;
use std::time::Duration;

/// Session configuration
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Fixed RNG seed (None = seeded from the OS)
    pub seed: Option<u64>,
    /// Extra decks merged over the built-in ones
    pub decks_file: Option<PathBuf>,
    /// Time between countdown ticks
    pub tick_interval: Duration,
    /// Player count offered when the host has not picked one
    pub default_players: usize,
    pub default_quota: RoleQuota,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            seed: None,
            decks_file: None,
            tick_interval: Duration::from_secs(1),
            default_players: 8,
            default_quota: RoleQuota::default(),
        }
    }
}

impl HostConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let seed = parse_var("PARTYHOST_SEED");

        let decks_file = std::env::var("PARTYHOST_DECKS_FILE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let tick_interval = parse_var::<u64>("PARTYHOST_TICK_MS")
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.tick_interval);

        let default_players = parse_var::<usize>("PARTYHOST_DEFAULT_PLAYERS")
            .filter(|n| *n > 0)
            .unwrap_or(defaults.default_players);

        Self {
            seed,
            decks_file,
            tick_interval,
            default_players,
            default_quota: defaults.default_quota,
        }
    }
}

/// Read and parse an env var, warning (and ignoring it) when it does not parse
fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}", name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for name in [
            "PARTYHOST_SEED",
            "PARTYHOST_DECKS_FILE",
            "PARTYHOST_TICK_MS",
            "PARTYHOST_DEFAULT_PLAYERS",
        ] {
            std::env::remove_var(name);
        }
    }

    #[test]
    fn test_default_config() {
        let config = HostConfig::default();
        assert_eq!(config.tick_interval, Duration::from_secs(1));
        assert_eq!(config.default_players, 8);
        assert_eq!(config.default_quota, RoleQuota::new(2, 1, 1));
    }

    #[test]
    #[serial]
    fn test_from_env() {
        clear_env();
        std::env::set_var("PARTYHOST_SEED", "42");
        std::env::set_var("PARTYHOST_DECKS_FILE", " /tmp/decks.json ");
        std::env::set_var("PARTYHOST_TICK_MS", "250");

        let config = HostConfig::from_env();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.decks_file, Some(PathBuf::from("/tmp/decks.json")));
        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert_eq!(config.default_players, 8);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_values_fall_back() {
        clear_env();
        std::env::set_var("PARTYHOST_SEED", "not-a-number");
        std::env::set_var("PARTYHOST_TICK_MS", "0");
        std::env::set_var("PARTYHOST_DEFAULT_PLAYERS", "-3");

        let config = HostConfig::from_env();
        assert_eq!(config.seed, None);
        assert_eq!(config.tick_interval, Duration::from_secs(1));
        assert_eq!(config.default_players, 8);
        clear_env();
    }
}
