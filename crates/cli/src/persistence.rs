use carioca_core::{KeyValueStore, StorageError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "CARIOCA_DATA_DIR";

pub fn default_data_dir() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(DATA_DIR_ENV) {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".carioca"))
}

/// Key-value store backed by one JSON file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
        if !valid {
            return Err(StorageError::Unavailable(format!("invalid key {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(body) => Ok(Some(body)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        // Replace atomically.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carioca_core::{GameAction, GamePhase, GameSession, GAME_STATE_KEY};
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn set_get_remove_roundtrip() {
        let dir = unique_temp_dir();
        let mut store = FileStore::new(&dir);
        assert_eq!(store.get("cariocaGameState").expect("get"), None);
        store.set("cariocaGameState", "{\"a\":1}").expect("set");
        assert_eq!(
            store.get("cariocaGameState").expect("get").as_deref(),
            Some("{\"a\":1}")
        );
        assert!(dir.join("cariocaGameState.json").exists());
        store.remove("cariocaGameState").expect("remove");
        store.remove("cariocaGameState").expect("remove twice");
        assert_eq!(store.get("cariocaGameState").expect("get"), None);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn rejects_path_like_keys() {
        let store = FileStore::new(unique_temp_dir());
        assert!(matches!(
            store.get("../escape"),
            Err(StorageError::Unavailable(_))
        ));
    }

    #[test]
    fn session_resumes_from_disk() {
        let dir = unique_temp_dir();
        let mut session = GameSession::open(FileStore::new(&dir));
        for name in ["Ana", "Beto"] {
            session
                .apply(GameAction::AddPlayer { name: name.into() })
                .expect("add");
        }
        session.apply(GameAction::StartGame).expect("start");
        assert!(dir.join(format!("{GAME_STATE_KEY}.json")).exists());

        let mut reopened = GameSession::open(FileStore::new(&dir));
        assert!(reopened.saved_game_available());
        reopened.continue_game().expect("continue");
        assert_eq!(reopened.game().phase(), GamePhase::WinnerSelection);
        assert_eq!(reopened.game().players().len(), 2);
        let _ = fs::remove_dir_all(dir);
    }

    fn unique_temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "carioca_cli_store_test_{}_{}",
            std::process::id(),
            nanos
        ))
    }
}
