use super::player::Player;
use crate::core::errors::{GameError, GameResult};
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Durable storage of player records, addressed by player id.
///
/// Combat logic only depends on the [`Player`] shape; the storage mechanism
/// stays behind this trait.
pub trait PlayerStore: Send + Sync {
    /// Loads a record. Missing records are `GameError::NotFound`.
    fn load(&self, id: &str) -> GameResult<Player>;
    fn save(&self, player: &Player) -> GameResult<()>;
    fn exists(&self, id: &str) -> bool;
    fn delete(&self, id: &str) -> GameResult<()>;
}

/// One pretty-printed JSON file per player in a directory.
pub struct JsonPlayerStore {
    save_dir: PathBuf,
}

impl JsonPlayerStore {
    /// Creates the store, creating `save_dir` if needed.
    pub fn new(save_dir: impl Into<PathBuf>) -> io::Result<Self> {
        let save_dir = save_dir.into();
        fs::create_dir_all(&save_dir)?;
        Ok(Self { save_dir })
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.save_dir.join(format!("{}.json", encode_id(id)))
    }
}

impl PlayerStore for JsonPlayerStore {
    fn load(&self, id: &str) -> GameResult<Player> {
        let path = self.path_for(id);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(GameError::NotFound(format!(
                    "No save file found for player {}.",
                    id
                )))
            }
            Err(e) => return Err(e.into()),
        };
        let player: Player = serde_json::from_str(&json)?;
        if player.id != id {
            return Err(GameError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "{} holds the record of player {}, not {}",
                    path.display(),
                    player.id,
                    id
                ),
            )));
        }
        debug!("loaded player {} from {}", id, path.display());
        Ok(player)
    }

    fn save(&self, player: &Player) -> GameResult<()> {
        let json = serde_json::to_string_pretty(player)?;
        let path = self.path_for(&player.id);
        fs::write(&path, json)?;
        debug!("saved player {} to {}", player.id, path.display());
        Ok(())
    }

    fn exists(&self, id: &str) -> bool {
        self.path_for(id).exists()
    }

    fn delete(&self, id: &str) -> GameResult<()> {
        match fs::remove_file(self.path_for(id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and embedding hosts that persist elsewhere.
#[derive(Default)]
pub struct MemoryPlayerStore {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlayerStore for MemoryPlayerStore {
    fn load(&self, id: &str) -> GameResult<Player> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        let json = records
            .get(id)
            .ok_or_else(|| GameError::NotFound(format!("No save file found for player {}.", id)))?;
        Ok(serde_json::from_str(json)?)
    }

    fn save(&self, player: &Player) -> GameResult<()> {
        let json = serde_json::to_string(player)?;
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(player.id.clone(), json);
        Ok(())
    }

    fn exists(&self, id: &str) -> bool {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(id)
    }

    fn delete(&self, id: &str) -> GameResult<()> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id);
        Ok(())
    }
}

/// File stem for a player id, safe on any filesystem and one-to-one.
///
/// ASCII letters, digits and `-` pass through; every other byte, `_`
/// included, becomes `_` followed by two hex digits.
pub fn encode_id(id: &str) -> String {
    let mut stem = String::with_capacity(id.len());
    for byte in id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("_{:02x}", byte));
        }
    }
    stem
}
