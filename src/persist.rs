use crate::clock::Clock;
use crate::consts::{SAVE_EXPIRY_HOURS, SAVE_FORMAT_VERSION, SAVE_KEY};
use crate::error::{CfResult, CountyForgeError};
use crate::game::GameState;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// String-keyed storage the engine saves sessions into.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> CfResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> CfResult<()>;
    fn remove(&mut self, key: &str) -> CfResult<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> CfResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> CfResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CfResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per entry under `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> CfResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(CountyForgeError::InvalidConfig(format!(
                "'{}' is not a usable store key",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> CfResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> CfResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(path, value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CfResult<()> {
        match fs::remove_file(self.path_for(key)?) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Envelope written under `SAVE_KEY`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub state: GameState,
}

impl SavedGame {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.saved_at > Duration::hours(SAVE_EXPIRY_HOURS)
    }
}

pub(crate) fn write_saved_game(
    store: &mut dyn KeyValueStore,
    state: &GameState,
    saved_at: DateTime<Utc>,
) -> CfResult<()> {
    let saved = SavedGame {
        version: SAVE_FORMAT_VERSION,
        saved_at,
        state: state.clone(),
    };
    store.set(SAVE_KEY, &serde_json::to_string(&saved)?)?;
    info!(
        phase = %state.phase(),
        placed = state.placed_counties.len(),
        "game saved"
    );
    Ok(())
}

/// Reads and validates the saved envelope without applying expiry.
pub fn peek_saved_game(store: &dyn KeyValueStore) -> CfResult<Option<SavedGame>> {
    let Some(raw) = store.get(SAVE_KEY)? else {
        return Ok(None);
    };
    let saved: SavedGame = serde_json::from_str(&raw)
        .map_err(|e| CountyForgeError::CorruptSave(e.to_string()))?;
    if saved.version != SAVE_FORMAT_VERSION {
        return Err(CountyForgeError::CorruptSave(format!(
            "unsupported save version {} (expected {})",
            saved.version, SAVE_FORMAT_VERSION
        )));
    }
    Ok(Some(saved))
}

pub(crate) fn read_saved_game(
    store: &mut dyn KeyValueStore,
    now: DateTime<Utc>,
) -> CfResult<Option<GameState>> {
    let Some(saved) = peek_saved_game(store)? else {
        return Ok(None);
    };
    if saved.is_expired(now) {
        warn!(saved_at = %saved.saved_at, "discarding expired saved game");
        store.remove(SAVE_KEY)?;
        return Ok(None);
    }
    info!(saved_at = %saved.saved_at, phase = %saved.state.phase(), "game loaded");
    Ok(Some(saved.state))
}

/// True when an unexpired, started and unfinished session is saved.
pub fn has_resumable_game<C: Clock>(store: &dyn KeyValueStore, clock: &C) -> bool {
    match peek_saved_game(store) {
        Ok(Some(saved)) => {
            !saved.is_expired(clock.now()) && saved.state.is_started && !saved.state.is_completed
        }
        Ok(None) => false,
        Err(e) => {
            warn!(error = %e, "saved game is unreadable");
            false
        }
    }
}

pub fn clear_saved_game(store: &mut dyn KeyValueStore) -> CfResult<()> {
    store.remove(SAVE_KEY)?;
    info!("saved game cleared");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_values() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let store = FileStore::new("unused");
        assert!(store.get("../escape").is_err());
        assert!(store.get("").is_err());
    }

    #[test]
    fn wrong_version_is_corrupt() {
        let mut store = MemoryStore::new();
        let state = GameState::new(vec!["a".into()]);
        let mut json = serde_json::to_value(SavedGame {
            version: SAVE_FORMAT_VERSION,
            saved_at: DateTime::<Utc>::default(),
            state,
        })
        .unwrap();
        json["version"] = serde_json::json!(99);
        store.set(SAVE_KEY, &json.to_string()).unwrap();
        assert!(matches!(
            peek_saved_game(&store),
            Err(CountyForgeError::CorruptSave(_))
        ));
    }
}
