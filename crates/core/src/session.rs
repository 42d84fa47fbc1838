use crate::{
    apply_recognition, run_recognition, CardRecognizer, Event, EventBus, Game, GameAction,
    GameError, GamePhase, GameSettings, KeyValueStore, Persistence, RecognitionError,
    RecognitionResponse, ScanImage,
};
use tracing::debug;

/// Owns the settings, the game, and their storage, and keeps storage in step
/// with every accepted transition.
#[derive(Debug)]
pub struct GameSession<S> {
    settings: GameSettings,
    game: Game,
    persistence: Persistence<S>,
    events: EventBus,
    saved_game_available: bool,
}

impl<S: KeyValueStore> GameSession<S> {
    /// Loads settings (defaults on any problem) and probes for a saved game.
    pub fn open(store: S) -> Self {
        let mut persistence = Persistence::new(store);
        let settings = persistence.load_settings();
        let saved_game_available = persistence.load_snapshot().is_some();
        debug!(saved_game_available, "session opened");
        Self {
            settings,
            game: Game::new(),
            persistence,
            events: EventBus::default(),
            saved_game_available,
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn saved_game_available(&self) -> bool {
        self.saved_game_available
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain().collect()
    }

    pub fn apply(&mut self, action: GameAction) -> Result<(), GameError> {
        let resets_storage = matches!(action, GameAction::StartGame | GameAction::NewGame);
        let settings_before = self.settings.clone();
        self.game.apply(&mut self.settings, action, &mut self.events)?;
        if resets_storage {
            let _ = self.persistence.clear_snapshot();
            self.saved_game_available = false;
        }
        if self.settings != settings_before {
            let _ = self.persistence.save_settings(&self.settings);
        }
        self.persist_game();
        Ok(())
    }

    pub fn continue_game(&mut self) -> Result<(), GameError> {
        if self.game.phase() != GamePhase::Setup {
            return Err(GameError::InvalidPhase(self.game.phase()));
        }
        let Some(snapshot) = self.persistence.load_snapshot() else {
            self.saved_game_available = false;
            return Err(GameError::NoSavedGame);
        };
        self.game
            .continue_game(&self.settings, snapshot, &mut self.events)?;
        self.saved_game_available = false;
        self.persist_game();
        Ok(())
    }

    pub fn discard_saved_game(&mut self) {
        let _ = self.persistence.clear_snapshot();
        self.saved_game_available = false;
    }

    /// Settings can only be edited between games; `ChangeRound` covers the
    /// in-game case.
    pub fn toggle_round(&mut self, key: &str) -> Result<bool, GameError> {
        self.expect_setup()?;
        let enabled = self.settings.toggle_round(key)?;
        let _ = self.persistence.save_settings(&self.settings);
        Ok(enabled)
    }

    pub fn set_card_score(&mut self, rank: &str, raw: &str) -> Result<i64, GameError> {
        self.expect_setup()?;
        let value = self.settings.set_card_score(rank, raw)?;
        let _ = self.persistence.save_settings(&self.settings);
        Ok(value)
    }

    pub fn reset_settings(&mut self) -> Result<(), GameError> {
        self.expect_setup()?;
        self.settings = GameSettings::default();
        let _ = self.persistence.save_settings(&self.settings);
        Ok(())
    }

    /// Runs a blocking recognition round-trip for the current scan target.
    pub fn scan<R: CardRecognizer + ?Sized>(
        &mut self,
        recognizer: &mut R,
        image: ScanImage,
    ) -> Result<(), GameError> {
        let result = run_recognition(
            &mut self.game,
            &self.settings,
            recognizer,
            image,
            &mut self.events,
        );
        self.persist_game();
        result
    }

    /// First half of an asynchronous scan: marks the request as in flight.
    pub fn submit_scan(&mut self) -> Result<(), GameError> {
        self.game.submit_scan(&mut self.events)?;
        self.persist_game();
        Ok(())
    }

    /// Second half of an asynchronous scan.
    pub fn resolve_scan(
        &mut self,
        image: ScanImage,
        outcome: Result<RecognitionResponse, RecognitionError>,
    ) -> Result<(), GameError> {
        apply_recognition(
            &mut self.game,
            &self.settings,
            image,
            outcome,
            &mut self.events,
        )?;
        self.persist_game();
        Ok(())
    }

    pub fn confirm_pending_scan(&mut self) -> Result<(), GameError> {
        self.game.confirm_pending(&mut self.events)?;
        self.persist_game();
        Ok(())
    }

    fn expect_setup(&self) -> Result<(), GameError> {
        if self.game.phase() == GamePhase::Setup {
            Ok(())
        } else {
            Err(GameError::InvalidPhase(self.game.phase()))
        }
    }

    fn persist_game(&mut self) {
        if self.game.should_persist() {
            let _ = self.persistence.save_snapshot(&self.game.snapshot());
        }
    }
}
