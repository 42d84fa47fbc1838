use super::*;

impl Game {
    pub fn add_player(&mut self, name: &str, events: &mut EventBus) -> Result<PlayerId, GameError> {
        self.expect_phase(GamePhase::Setup)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyPlayerName);
        }
        let id = self.next_player_id;
        self.next_player_id += 1;
        self.players.push(Player::new(id, name));
        events.push(Event::PlayerAdded {
            id,
            name: name.to_string(),
        });
        Ok(id)
    }

    pub fn remove_player(&mut self, id: PlayerId, events: &mut EventBus) -> Result<(), GameError> {
        self.expect_phase(GamePhase::Setup)?;
        self.ensure_player(id)?;
        self.players.retain(|player| player.id != id);
        events.push(Event::PlayerRemoved { id });
        Ok(())
    }

    pub fn start_game(
        &mut self,
        settings: &GameSettings,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        self.expect_phase(GamePhase::Setup)?;
        if self.players.len() < 2 {
            return Err(GameError::NotEnoughPlayers(self.players.len()));
        }
        let rounds = settings.active_rounds().len();
        if rounds == 0 {
            return Err(GameError::NoRoundsEnabled);
        }
        for player in &mut self.players {
            player.clear_scores();
        }
        self.current_round = 0;
        self.round_winner = None;
        self.draft.clear();
        self.scan = ScanState::default();
        self.phase = GamePhase::WinnerSelection;
        debug!(players = self.players.len(), rounds, "game started");
        events.push(Event::GameStarted {
            players: self.players.len(),
            rounds,
        });
        Ok(())
    }

    /// Replaces the current state with a saved snapshot.
    pub fn continue_game(
        &mut self,
        settings: &GameSettings,
        snapshot: GameSnapshot,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        self.expect_phase(GamePhase::Setup)?;
        if !snapshot.is_resumable() {
            return Err(GameError::NoSavedGame);
        }
        if snapshot.game_phase.is_in_round() && settings.active_rounds().is_empty() {
            return Err(GameError::NoRoundsEnabled);
        }
        self.next_player_id = snapshot
            .players
            .iter()
            .map(|player| player.id)
            .max()
            .map_or(1, |max| max.saturating_add(1));
        self.players = snapshot.players;
        self.phase = snapshot.game_phase;
        self.current_round = snapshot.current_round;
        self.round_winner = snapshot.round_winner_id;
        self.draft = snapshot.round_scores;
        self.scan = ScanState::default();
        self.normalize(settings, events);
        debug!(phase = ?self.phase, round = self.current_round, "game resumed");
        events.push(Event::GameResumed {
            phase: self.phase,
            round: self.current_round,
        });
        Ok(())
    }

    /// Drops the roster and every index. Any phase but `Setup`.
    pub fn new_game(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        if self.phase == GamePhase::Setup {
            return Err(GameError::InvalidPhase(self.phase));
        }
        self.players.clear();
        self.next_player_id = 1;
        self.current_round = 0;
        self.round_winner = None;
        self.draft.clear();
        self.scan = ScanState::default();
        self.phase = GamePhase::Setup;
        debug!("game reset");
        events.push(Event::GameReset);
        Ok(())
    }
}
