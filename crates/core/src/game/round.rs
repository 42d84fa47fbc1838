use super::*;
use crate::{final_results, round_by_key};

impl Game {
    pub fn select_winner(
        &mut self,
        settings: &GameSettings,
        winner: PlayerId,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        self.expect_phase(GamePhase::WinnerSelection)?;
        self.ensure_player(winner)?;
        let round = self.active_round(settings)?;
        self.round_winner = Some(winner);
        self.draft = RoundScoresDraft::for_round(&self.players, winner);
        self.scan = ScanState::default();
        self.phase = GamePhase::ScoreInput;
        debug!(round = round.key, winner, "round winner selected");
        events.push(Event::WinnerSelected {
            round: round.key.to_string(),
            winner,
        });
        Ok(())
    }

    /// Closes a round nobody finished: everyone gets 0 for it.
    pub fn skip_round(
        &mut self,
        settings: &GameSettings,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        self.expect_phase(GamePhase::WinnerSelection)?;
        let round = self.active_round(settings)?;
        if !round.can_skip() {
            return Err(GameError::RoundNotSkippable(round.key.to_string()));
        }
        for player in &mut self.players {
            player.set_score(round.ordinal, 0);
        }
        self.round_winner = None;
        self.draft.clear();
        self.phase = GamePhase::Standings;
        debug!(round = round.key, "round skipped");
        events.push(Event::RoundSkipped {
            round: round.key.to_string(),
        });
        Ok(())
    }

    /// Stores the raw text typed for a player. Nothing is validated here.
    pub fn set_draft_score(&mut self, player: PlayerId, raw: &str) -> Result<(), GameError> {
        self.expect_phase(GamePhase::ScoreInput)?;
        self.ensure_player(player)?;
        if self.round_winner == Some(player) {
            return Err(GameError::WinnerScoreFixed);
        }
        self.draft.set(player, raw.trim());
        Ok(())
    }

    pub fn record_scores(
        &mut self,
        settings: &GameSettings,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        self.expect_phase(GamePhase::ScoreInput)?;
        if self.scan.in_flight {
            return Err(GameError::ScanInFlight);
        }
        let winner = self.round_winner.ok_or(GameError::NoRoundWinner)?;
        let round = self.active_round(settings)?;
        let scores = self.draft.validate(&self.players, winner).map_err(|issues| {
            GameError::IncompleteScores(issues.into_iter().map(|issue| issue.player).collect())
        })?;
        for (id, score) in &scores {
            if let Some(player) = self.players.iter_mut().find(|player| player.id == *id) {
                player.set_score(round.ordinal, *score);
            }
        }
        self.draft.clear();
        self.scan = ScanState::default();
        self.phase = GamePhase::Standings;
        debug!(round = round.key, "round scores recorded");
        events.push(Event::ScoresRecorded {
            round: round.key.to_string(),
            scores,
        });
        Ok(())
    }

    pub fn next_round(
        &mut self,
        settings: &GameSettings,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        self.expect_phase(GamePhase::Standings)?;
        let active = settings.active_rounds();
        self.round_winner = None;
        self.draft.clear();
        if self.current_round + 1 < active.len() {
            self.current_round += 1;
            self.phase = GamePhase::WinnerSelection;
            let key = active[self.current_round].key;
            debug!(round = self.current_round, key, "advanced to next round");
            events.push(Event::RoundAdvanced {
                round: self.current_round,
                key: key.to_string(),
            });
        } else {
            self.phase = GamePhase::Finished;
            let results = final_results(&self.players);
            debug!(winners = ?results.winners, "game finished");
            events.push(Event::GameFinished {
                winners: results.winners,
                total: results.winning_total,
            });
        }
        Ok(())
    }

    /// Re-points the current round at `key`, enabling it first if needed.
    ///
    /// Rounds that already hold a recorded score for anyone are refused so a
    /// finished round can never be played twice. Not available while a scan
    /// is open: cancel or confirm it first.
    pub fn change_round(
        &mut self,
        settings: &mut GameSettings,
        key: &str,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        if !matches!(
            self.phase,
            GamePhase::WinnerSelection | GamePhase::ScoreInput | GamePhase::Standings
        ) {
            return Err(GameError::InvalidPhase(self.phase));
        }
        let target = round_by_key(key).ok_or_else(|| GameError::UnknownRound(key.to_string()))?;
        let current = self.active_round(settings)?;
        if current.key == target.key {
            return Ok(());
        }
        if self.is_round_completed(target.ordinal) {
            return Err(GameError::RoundAlreadyCompleted(target.key.to_string()));
        }
        let enabled = settings.enable_round(target.key)?;
        let index = settings
            .active_rounds()
            .iter()
            .position(|round| round.key == target.key)
            .ok_or_else(|| GameError::UnknownRound(key.to_string()))?;
        self.current_round = index;
        debug!(from = current.key, to = target.key, enabled, "round changed");
        events.push(Event::RoundChanged {
            from: current.key.to_string(),
            to: target.key.to_string(),
            enabled,
        });
        Ok(())
    }
}
