//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use card_lobby::room::RoomConfig;
use std::{net::SocketAddr, str::FromStr, time::Duration};

const DEFAULT_BIND: ([u8; 4], u16) = ([127, 0, 0, 1], 8080);

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Prometheus exporter address; no exporter when unset
    pub metrics_bind: Option<SocketAddr>,
    /// Per-connection message limits
    pub rate_limits: RateLimitConfig,
    /// Defaults applied to every room
    pub rooms: RoomDefaultsConfig,
}

/// Per-connection inbound message limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Messages allowed per burst window
    pub burst_messages: usize,
    /// Burst window length
    pub burst_window: Duration,
    /// Messages allowed per sustained window
    pub sustained_messages: usize,
    /// Sustained window length
    pub sustained_window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            burst_messages: 10,
            burst_window: Duration::from_secs(1),
            sustained_messages: 100,
            sustained_window: Duration::from_secs(60),
        }
    }
}

/// Default room configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDefaultsConfig {
    /// Maximum players per room
    pub max_players: usize,
    /// Players needed before the host can start
    pub min_players: usize,
    /// Display name length cap, in characters
    pub player_name_max_len: usize,
}

impl Default for RoomDefaultsConfig {
    fn default() -> Self {
        let room = RoomConfig::default();
        Self {
            max_players: room.max_players,
            min_players: room.min_players,
            player_name_max_len: room.max_name_len,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed
    pub fn from_env(bind_override: Option<SocketAddr>) -> Result<Self, ConfigError> {
        Self::from_lookup(bind_override, |key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(bind_override: Option<SocketAddr>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let bind = match bind_override {
            Some(bind) => bind,
            None => env.parse_or("SERVER_BIND", SocketAddr::from(DEFAULT_BIND))?,
        };

        let metrics_bind = env.parse_opt("METRICS_BIND")?;

        let defaults = RateLimitConfig::default();
        let rate_limits = RateLimitConfig {
            burst_messages: env.parse_or("WS_BURST_LIMIT", defaults.burst_messages)?,
            sustained_messages: env.parse_or("WS_SUSTAINED_LIMIT", defaults.sustained_messages)?,
            ..defaults
        };

        let defaults = RoomDefaultsConfig::default();
        let rooms = RoomDefaultsConfig {
            max_players: env.parse_or("ROOM_MAX_PLAYERS", defaults.max_players)?,
            min_players: env.parse_or("ROOM_MIN_PLAYERS", defaults.min_players)?,
            player_name_max_len: env.parse_or("PLAYER_NAME_MAX_LEN", defaults.player_name_max_len)?,
        };

        Ok(ServerConfig {
            bind,
            metrics_bind,
            rate_limits,
            rooms,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rooms.max_players < 2 || self.rooms.max_players > 4 {
            return Err(ConfigError::Invalid {
                var: "ROOM_MAX_PLAYERS".to_string(),
                reason: "Must be between 2 and 4 (13 cards each from a 52-card deck)".to_string(),
            });
        }

        if self.rooms.min_players < 2 {
            return Err(ConfigError::Invalid {
                var: "ROOM_MIN_PLAYERS".to_string(),
                reason: "Must be at least 2".to_string(),
            });
        }

        if self.rooms.min_players > self.rooms.max_players {
            return Err(ConfigError::Invalid {
                var: "ROOM_MIN_PLAYERS".to_string(),
                reason: format!("Cannot exceed max players ({})", self.rooms.max_players),
            });
        }

        if self.rooms.player_name_max_len == 0 {
            return Err(ConfigError::Invalid {
                var: "PLAYER_NAME_MAX_LEN".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.rate_limits.burst_messages == 0 {
            return Err(ConfigError::Invalid {
                var: "WS_BURST_LIMIT".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.rate_limits.sustained_messages == 0 {
            return Err(ConfigError::Invalid {
                var: "WS_SUSTAINED_LIMIT".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        self.room_config()
            .validate()
            .map_err(|reason| ConfigError::Invalid {
                var: "ROOM_MAX_PLAYERS".to_string(),
                reason,
            })
    }

    /// Room configuration handed to the registry
    pub fn room_config(&self) -> RoomConfig {
        RoomConfig {
            max_players: self.rooms.max_players,
            min_players: self.rooms.min_players,
            max_name_len: self.rooms.player_name_max_len,
            ..RoomConfig::default()
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Parse a variable, falling back to `default` when unset or blank. A
    /// value that is set but unparseable is an error.
    fn parse_or<T: FromStr>(&self, key: &str, default: T) -> Result<T, ConfigError> {
        Ok(self.parse_opt(key)?.unwrap_or(default))
    }

    fn parse_opt<T: FromStr>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        match (self.0)(key) {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| ConfigError::Invalid {
                    var: key.to_string(),
                    reason: format!("Cannot parse {raw:?}"),
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(None, |key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind, "127.0.0.1:8080".parse().unwrap());
        assert!(config.metrics_bind.is_none());
        assert_eq!(config.rate_limits, RateLimitConfig::default());
        assert_eq!(config.room_config(), RoomConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = load(&[
            ("SERVER_BIND", "0.0.0.0:9000"),
            ("METRICS_BIND", "127.0.0.1:9090"),
            ("WS_BURST_LIMIT", "5"),
            ("ROOM_MAX_PLAYERS", "3"),
            ("PLAYER_NAME_MAX_LEN", "12"),
        ])
        .unwrap();

        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.metrics_bind, Some("127.0.0.1:9090".parse().unwrap()));
        assert_eq!(config.rate_limits.burst_messages, 5);
        assert_eq!(config.rate_limits.sustained_messages, 100);
        assert_eq!(config.room_config().max_players, 3);
        assert_eq!(config.room_config().max_name_len, 12);
    }

    #[test]
    fn test_bind_override_wins() {
        let override_addr: SocketAddr = "127.0.0.1:1234".parse().unwrap();
        let config = ServerConfig::from_lookup(Some(override_addr), |key| {
            (key == "SERVER_BIND").then(|| "0.0.0.0:1".to_string())
        })
        .unwrap();
        assert_eq!(config.bind, override_addr);
    }

    #[test]
    fn test_unparseable_value_is_rejected() {
        let err = load(&[("ROOM_MAX_PLAYERS", "lots")]).unwrap_err();
        assert!(err.to_string().contains("ROOM_MAX_PLAYERS"));
    }

    #[test]
    fn test_config_validation_too_many_players() {
        let config = load(&[("ROOM_MAX_PLAYERS", "5")]).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "ROOM_MAX_PLAYERS"));
    }

    #[test]
    fn test_config_validation_min_above_max() {
        let config = load(&[("ROOM_MAX_PLAYERS", "3"), ("ROOM_MIN_PLAYERS", "4")]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_limit() {
        let config = load(&[("WS_SUSTAINED_LIMIT", "0")]).unwrap();
        assert!(config.validate().is_err());
    }
}
