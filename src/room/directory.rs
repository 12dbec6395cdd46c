//! Process-wide registry of rooms keyed by code.
//!
//! The directory lock only guards the map. Lookups clone the room's `Arc`
//! and release the lock before any room operation runs, so a busy room never
//! blocks creation of, or access to, other rooms.

use std::sync::Arc;

use log::{info, warn};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::core::{DirectoryConfig, GameError, GameRng, Result, RoomConfig};

use super::room::Room;

struct Registry {
    rooms: FxHashMap<String, Arc<Room>>,
    rng: GameRng,
}

impl Registry {
    fn draw_code(&mut self, alphabet: &[char], length: usize) -> String {
        (0..length)
            .filter_map(|_| self.rng.choose(alphabet).copied())
            .collect()
    }
}

/// Registry of live rooms.
pub struct RoomDirectory {
    registry: RwLock<Registry>,
    config: DirectoryConfig,
}

impl Default for RoomDirectory {
    fn default() -> Self {
        Self::new(DirectoryConfig::default())
    }
}

impl RoomDirectory {
    #[must_use]
    pub fn new(config: DirectoryConfig) -> Self {
        Self {
            registry: RwLock::new(Registry {
                rooms: FxHashMap::default(),
                rng: GameRng::seeded_or_entropy(config.seed),
            }),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Create a room under a fresh random code.
    ///
    /// Gives up with `CodeSpaceExhausted` after `code_attempts` collisions.
    /// A room without its own seed gets a fork of the directory RNG.
    pub fn create(&self, config: &RoomConfig) -> Result<Arc<Room>> {
        self.config.validate()?;
        config.validate()?;
        let alphabet: Vec<char> = self.config.code_alphabet.chars().collect();

        let mut registry = self.registry.write();
        for _ in 0..self.config.code_attempts {
            let code = registry.draw_code(&alphabet, self.config.code_length);
            if registry.rooms.contains_key(&code) {
                continue;
            }

            let rng = match config.seed {
                Some(seed) => GameRng::new(seed),
                None => registry.rng.fork(),
            };
            let room = Arc::new(Room::with_rng(code.clone(), config, rng)?);
            registry.rooms.insert(code.clone(), Arc::clone(&room));
            info!(
                "created room {} ({} players, hotseat: {})",
                code, config.player_count, config.hotseat
            );
            return Ok(room);
        }

        warn!(
            "no free room code after {} attempts ({} rooms live)",
            self.config.code_attempts,
            registry.rooms.len()
        );
        Err(GameError::CodeSpaceExhausted(self.config.code_attempts))
    }

    /// Look up a room by code.
    pub fn get(&self, code: &str) -> Result<Arc<Room>> {
        self.registry
            .read()
            .rooms
            .get(code)
            .cloned()
            .ok_or_else(|| GameError::RoomNotFound(code.to_string()))
    }

    /// Drop a room from the directory. Clients holding its `Arc` keep it alive.
    pub fn remove(&self, code: &str) -> Option<Arc<Room>> {
        let removed = self.registry.write().rooms.remove(code);
        if removed.is_some() {
            info!("removed room {}", code);
        }
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.read().rooms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.read().rooms.is_empty()
    }

    /// Codes of every live room, in no particular order.
    #[must_use]
    pub fn codes(&self) -> Vec<String> {
        self.registry.read().rooms.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_use_alphabet_and_length() {
        let dir = RoomDirectory::new(DirectoryConfig::default().with_seed(5));
        let room = dir.create(&RoomConfig::default()).unwrap();

        assert_eq!(room.code().len(), 6);
        assert!(room
            .code()
            .chars()
            .all(|c| dir.config().code_alphabet.contains(c)));
        assert_eq!(dir.get(room.code()).unwrap().code(), room.code());
    }

    #[test]
    fn test_unknown_code() {
        let dir = RoomDirectory::default();
        assert_eq!(
            dir.get("nope").unwrap_err(),
            GameError::RoomNotFound("nope".to_string())
        );
    }

    #[test]
    fn test_code_space_exhausted() {
        let dir = RoomDirectory::new(
            DirectoryConfig::default()
                .with_code_alphabet("z")
                .with_code_length(1)
                .with_code_attempts(5),
        );
        assert_eq!(dir.create(&RoomConfig::default()).unwrap().code(), "z");
        assert_eq!(
            dir.create(&RoomConfig::default()).unwrap_err(),
            GameError::CodeSpaceExhausted(5)
        );
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn test_invalid_config_creates_nothing() {
        let dir = RoomDirectory::default();
        let err = dir
            .create(&RoomConfig::default().with_player_count(4))
            .unwrap_err();
        assert_eq!(err, GameError::InvalidBoardSize(4));
        assert!(dir.is_empty());
    }

    #[test]
    fn test_empty_code_space_creates_nothing() {
        let no_length = RoomDirectory::new(DirectoryConfig::default().with_code_length(0));
        assert_eq!(
            no_length.create(&RoomConfig::default()).unwrap_err(),
            GameError::InvalidCodeSpace("code_length must be at least 1")
        );
        assert!(no_length.get("").is_err());

        let no_alphabet = RoomDirectory::new(DirectoryConfig::default().with_code_alphabet(""));
        assert_eq!(
            no_alphabet.create(&RoomConfig::default()).unwrap_err(),
            GameError::InvalidCodeSpace("code_alphabet is empty")
        );
        assert!(no_alphabet.is_empty());
    }

    #[test]
    fn test_seeded_directory_is_deterministic() {
        let a = RoomDirectory::new(DirectoryConfig::default().with_seed(11));
        let b = RoomDirectory::new(DirectoryConfig::default().with_seed(11));
        let ra = a.create(&RoomConfig::default()).unwrap();
        let rb = b.create(&RoomConfig::default()).unwrap();

        assert_eq!(ra.code(), rb.code());
        assert_eq!(ra.board(), rb.board());
    }

    #[test]
    fn test_remove() {
        let dir = RoomDirectory::default();
        let code = dir.create(&RoomConfig::default()).unwrap().code().to_string();
        assert!(dir.remove(&code).is_some());
        assert!(dir.remove(&code).is_none());
        assert!(dir.get(&code).is_err());
    }
}
