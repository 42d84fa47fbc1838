use crate::{GameSettings, GameSnapshot, KeyValueStore, StorageError};
use tracing::warn;

pub const SETTINGS_KEY: &str = "cariocaGameSettings";
pub const GAME_STATE_KEY: &str = "cariocaGameState";

/// Reads and writes the settings record and the game snapshot.
///
/// Both live under separate keys of the same store. Write failures are
/// returned so callers can report them, but the in-memory state stays
/// authoritative either way.
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Stored settings, or the defaults when missing or malformed.
    pub fn load_settings(&self) -> GameSettings {
        let raw = match self.store.get(SETTINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return GameSettings::default(),
            Err(err) => {
                warn!(error = %err, "failed to read settings, using defaults");
                return GameSettings::default();
            }
        };
        let mut settings = match serde_json::from_str::<GameSettings>(&raw) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(error = %err, "stored settings unreadable, using defaults");
                return GameSettings::default();
            }
        };
        if let Err(err) = settings.validate() {
            warn!(error = %err, "stored settings invalid, using defaults");
            return GameSettings::default();
        }
        settings.reconcile();
        settings
    }

    pub fn save_settings(&mut self, settings: &GameSettings) -> Result<(), StorageError> {
        let body = serde_json::to_string(settings)
            .map_err(|err| StorageError::Unavailable(err.to_string()))?;
        self.store.set(SETTINGS_KEY, &body).inspect_err(|err| {
            warn!(error = %err, "failed to save settings");
        })
    }

    /// The saved game, if there is one worth resuming.
    ///
    /// Anything unreadable or not resumable is erased so it is not offered
    /// again; none of this is surfaced as an error.
    pub fn load_snapshot(&mut self) -> Option<GameSnapshot> {
        let raw = match self.store.get(GAME_STATE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "failed to read saved game");
                return None;
            }
        };
        match serde_json::from_str::<GameSnapshot>(&raw) {
            Ok(snapshot) if snapshot.is_resumable() => Some(snapshot),
            Ok(_) => {
                warn!("saved game is not resumable, discarding");
                self.discard_snapshot();
                None
            }
            Err(err) => {
                warn!(error = %err, "saved game is corrupt, discarding");
                self.discard_snapshot();
                None
            }
        }
    }

    /// Overwrites the previous snapshot wholesale.
    pub fn save_snapshot(&mut self, snapshot: &GameSnapshot) -> Result<(), StorageError> {
        let body = serde_json::to_string(snapshot)
            .map_err(|err| StorageError::Unavailable(err.to_string()))?;
        self.store.set(GAME_STATE_KEY, &body).inspect_err(|err| {
            warn!(error = %err, "failed to save game");
        })
    }

    pub fn clear_snapshot(&mut self) -> Result<(), StorageError> {
        self.store.remove(GAME_STATE_KEY).inspect_err(|err| {
            warn!(error = %err, "failed to clear saved game");
        })
    }

    fn discard_snapshot(&mut self) {
        let _ = self.clear_snapshot();
    }
}
