//! Room and directory configuration.
//!
//! Rooms are configured at creation time with a `RoomConfig`; the directory
//! that mints room codes is configured with a `DirectoryConfig`, which can be
//! loaded from JSON. Missing JSON fields fall back to the defaults below.

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};

/// Play holes per player (scoring hole excluded).
pub const HOLES_PER_PLAYER: usize = 6;

/// Stones placed in every play hole when a board is built.
pub const STONES_PER_HOLE: usize = 4;

/// The only board layout supported: two players facing each other.
pub const SUPPORTED_PLAYER_COUNT: usize = 2;

/// Faces of the die that cyclic rule values are folded onto.
pub const DIE_FACES: i64 = 6;

/// Victory value for the single player holding the most stones.
pub const VICTORY_WIN: i64 = 1;

/// Victory value for every player sharing the maximum.
pub const VICTORY_TIE: i64 = 2;

/// History entry written by a reset.
pub const RESET_MARKER: &str = "Game reset!";

const DEFAULT_CODE_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";

/// Per-room settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Number of seats on the board. Only 2 is accepted.
    pub player_count: usize,

    /// Hotseat mode: one client plays every seat, so the acting
    /// name is not checked against the roster.
    pub hotseat: bool,

    /// Seed for the room's RNG. `None` draws one from the directory.
    pub seed: Option<u64>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            player_count: SUPPORTED_PLAYER_COUNT,
            hotseat: false,
            seed: None,
        }
    }
}

impl RoomConfig {
    /// Set the number of seats.
    #[must_use]
    pub fn with_player_count(mut self, player_count: usize) -> Self {
        self.player_count = player_count;
        self
    }

    /// Enable or disable hotseat mode.
    #[must_use]
    pub fn with_hotseat(mut self, hotseat: bool) -> Self {
        self.hotseat = hotseat;
        self
    }

    /// Fix the room's RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject board sizes other than the two-player layout.
    pub fn validate(&self) -> Result<()> {
        if self.player_count == SUPPORTED_PLAYER_COUNT {
            Ok(())
        } else {
            Err(GameError::InvalidBoardSize(self.player_count))
        }
    }
}

/// Settings for the room directory and its code generator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Characters per room code.
    pub code_length: usize,

    /// Random codes tried before giving up with `CodeSpaceExhausted`.
    pub code_attempts: usize,

    /// Characters room codes are drawn from.
    pub code_alphabet: String,

    /// Seed for the directory RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            code_attempts: 10_000,
            code_alphabet: DEFAULT_CODE_ALPHABET.to_string(),
            seed: None,
        }
    }
}

impl DirectoryConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Set the room code length.
    #[must_use]
    pub fn with_code_length(mut self, length: usize) -> Self {
        self.code_length = length;
        self
    }

    /// Set the number of generation attempts.
    #[must_use]
    pub fn with_code_attempts(mut self, attempts: usize) -> Self {
        self.code_attempts = attempts;
        self
    }

    /// Set the code alphabet.
    #[must_use]
    pub fn with_code_alphabet(mut self, alphabet: impl Into<String>) -> Self {
        self.code_alphabet = alphabet.into();
        self
    }

    /// Fix the directory RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject settings that can only mint the empty code.
    pub fn validate(&self) -> Result<()> {
        if self.code_length == 0 {
            return Err(GameError::InvalidCodeSpace("code_length must be at least 1"));
        }
        if self.code_alphabet.is_empty() {
            return Err(GameError::InvalidCodeSpace("code_alphabet is empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_config_defaults() {
        let config = RoomConfig::default();
        assert_eq!(config.player_count, 2);
        assert!(!config.hotseat);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_room_config_rejects_other_sizes() {
        for size in [0, 1, 3, 4] {
            let config = RoomConfig::default().with_player_count(size);
            assert_eq!(config.validate(), Err(GameError::InvalidBoardSize(size)));
        }
    }

    #[test]
    fn test_builder_pattern() {
        let config = RoomConfig::default().with_hotseat(true).with_seed(9);
        assert!(config.hotseat);
        assert_eq!(config.seed, Some(9));

        let dir = DirectoryConfig::default()
            .with_code_length(4)
            .with_code_attempts(3)
            .with_code_alphabet("ab")
            .with_seed(1);
        assert_eq!(dir.code_length, 4);
        assert_eq!(dir.code_attempts, 3);
        assert_eq!(dir.code_alphabet, "ab");
        assert_eq!(dir.seed, Some(1));
    }

    #[test]
    fn test_directory_config_from_partial_json() {
        let config = DirectoryConfig::from_json(r#"{"code_length": 8}"#).unwrap();
        assert_eq!(config.code_length, 8);
        assert_eq!(config.code_attempts, 10_000);
        assert_eq!(config.code_alphabet.len(), 62);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_directory_config_rejects_empty_codes() {
        let config = DirectoryConfig::from_json(r#"{"code_length": 0}"#).unwrap();
        assert_eq!(
            config.validate(),
            Err(GameError::InvalidCodeSpace("code_length must be at least 1"))
        );

        let config = DirectoryConfig::default().with_code_alphabet("");
        assert_eq!(
            config.validate(),
            Err(GameError::InvalidCodeSpace("code_alphabet is empty"))
        );
    }

    #[test]
    fn test_room_config_from_json() {
        let config: RoomConfig = serde_json::from_str(r#"{"hotseat": true}"#).unwrap();
        assert_eq!(config.player_count, 2);
        assert!(config.hotseat);
    }
}
