//! Room configuration.

use serde::{Deserialize, Serialize};

use crate::game::constants::{DECK_SIZE, HAND_SIZE};

/// Name used when a client joins without one.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Length of generated room codes.
pub const ROOM_CODE_LEN: usize = 6;

/// Room configuration shared by every room in a registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Maximum number of players in a room (default: 4)
    pub max_players: usize,

    /// Players required before the host may start (default: 2)
    pub min_players: usize,

    /// Cards dealt to each player (default: 13)
    pub hand_size: usize,

    /// Display names are truncated to this many characters (default: 20)
    pub max_name_len: usize,

    /// Capacity of each room actor's inbox
    pub inbox_capacity: usize,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            max_players: 4,
            min_players: 2,
            hand_size: HAND_SIZE,
            max_name_len: 20,
            inbox_capacity: 100,
        }
    }
}

impl RoomConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.min_players < 2 {
            return Err("Min players must be at least 2".to_string());
        }

        if self.max_players < self.min_players {
            return Err("Max players must be at least min players".to_string());
        }

        if self.hand_size == 0 || self.max_players * self.hand_size > DECK_SIZE {
            return Err(format!(
                "Cannot deal {} cards to {} players from a {}-card deck",
                self.hand_size, self.max_players, DECK_SIZE
            ));
        }

        if self.max_name_len == 0 {
            return Err("Max name length must be positive".to_string());
        }

        if self.inbox_capacity == 0 {
            return Err("Inbox capacity must be positive".to_string());
        }

        Ok(())
    }

    /// Display name for a player: the requested name cut to
    /// `max_name_len` characters, or the default when absent or empty.
    pub fn player_name(&self, requested: Option<&str>) -> String {
        match requested {
            Some(name) if !name.is_empty() => name.chars().take(self.max_name_len).collect(),
            _ => DEFAULT_PLAYER_NAME.to_string(),
        }
    }
}
