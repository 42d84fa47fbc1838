use super::*;
use crate::{score_hand, ScanImage};

impl Game {
    /// Opens the camera for `player`. Only one scan may be outstanding.
    pub fn start_scan(&mut self, player: PlayerId, events: &mut EventBus) -> Result<(), GameError> {
        self.expect_phase(GamePhase::ScoreInput)?;
        if self.scan.in_flight {
            return Err(GameError::ScanInFlight);
        }
        self.ensure_player(player)?;
        if self.round_winner == Some(player) {
            return Err(GameError::WinnerScoreFixed);
        }
        self.scan = ScanState {
            target: Some(player),
            ..ScanState::default()
        };
        self.phase = GamePhase::Scanning;
        events.push(Event::ScanStarted { player });
        Ok(())
    }

    /// Marks the captured image as sent. The machine waits in `ScoreInput`
    /// until the recognizer answers or the scan is cancelled.
    pub fn submit_scan(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        self.expect_phase(GamePhase::Scanning)?;
        let player = self.scan.target.ok_or(GameError::NoScanTarget)?;
        self.scan.in_flight = true;
        self.phase = GamePhase::ScoreInput;
        events.push(Event::ScanSubmitted { player });
        Ok(())
    }

    pub fn scan_succeeded(
        &mut self,
        settings: &GameSettings,
        image: ScanImage,
        cards: Vec<Card>,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        self.expect_awaiting_recognition()?;
        let score = score_hand(&settings.card_scores, &cards);
        self.scan.in_flight = false;
        self.scan.last_error = None;
        self.scan.pending = Some(PendingScan {
            image,
            cards: cards.clone(),
            score,
        });
        self.phase = GamePhase::ScanConfirmation;
        debug!(cards = cards.len(), score, "scan recognized");
        events.push(Event::ScanRecognized { cards, score });
        Ok(())
    }

    /// Records why the scan failed and hands control back to score input.
    /// Draft scores are left as they were.
    pub fn scan_failed(&mut self, kind: ScanErrorKind, events: &mut EventBus) -> Result<(), GameError> {
        self.expect_awaiting_recognition()?;
        self.scan = ScanState {
            last_error: Some(kind),
            ..ScanState::default()
        };
        self.phase = GamePhase::ScoreInput;
        debug!(?kind, "scan failed");
        events.push(Event::ScanFailed { kind });
        Ok(())
    }

    pub fn cancel_scan(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        let cancellable = self.phase == GamePhase::Scanning
            || (self.phase == GamePhase::ScoreInput && self.scan.in_flight);
        if !cancellable {
            return Err(GameError::InvalidPhase(self.phase));
        }
        self.scan = ScanState::default();
        self.phase = GamePhase::ScoreInput;
        events.push(Event::ScanCancelled);
        Ok(())
    }

    pub fn retry_scan(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        self.expect_phase(GamePhase::ScanConfirmation)?;
        self.scan.pending = None;
        self.phase = GamePhase::Scanning;
        events.push(Event::ScanRetried);
        Ok(())
    }

    /// Writes `score` into the target player's draft entry.
    pub fn confirm_scan(
        &mut self,
        cards: Vec<Card>,
        score: i64,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        self.expect_phase(GamePhase::ScanConfirmation)?;
        let player = self.scan.target.ok_or(GameError::NoScanTarget)?;
        self.draft.set(player, score.to_string());
        self.scan = ScanState::default();
        self.phase = GamePhase::ScoreInput;
        debug!(player, cards = cards.len(), score, "scan confirmed");
        events.push(Event::ScanConfirmed { player, score });
        Ok(())
    }

    /// Confirms the pending hand as edited.
    pub fn confirm_pending(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        self.expect_phase(GamePhase::ScanConfirmation)?;
        let pending = self.scan.pending.clone().ok_or(GameError::NoPendingScan)?;
        self.confirm_scan(pending.cards, pending.score, events)
    }

    /// Corrects one recognized card. Ranks are upper-cased as entered.
    pub fn edit_pending_card(
        &mut self,
        settings: &GameSettings,
        index: usize,
        rank: Option<&str>,
        suit: Option<&str>,
    ) -> Result<(), GameError> {
        let pending = self.pending_mut()?;
        let card = pending
            .cards
            .get_mut(index)
            .ok_or(GameError::InvalidCardIndex(index))?;
        if let Some(rank) = rank {
            card.rank = rank.trim().to_uppercase();
        }
        if let Some(suit) = suit {
            card.suit = suit.trim().to_string();
        }
        pending.score = score_hand(&settings.card_scores, &pending.cards);
        Ok(())
    }

    pub fn add_pending_card(&mut self, settings: &GameSettings) -> Result<(), GameError> {
        let pending = self.pending_mut()?;
        pending.cards.push(Card::placeholder());
        pending.score = score_hand(&settings.card_scores, &pending.cards);
        Ok(())
    }

    pub fn remove_pending_card(
        &mut self,
        settings: &GameSettings,
        index: usize,
    ) -> Result<(), GameError> {
        let pending = self.pending_mut()?;
        if index >= pending.cards.len() {
            return Err(GameError::InvalidCardIndex(index));
        }
        pending.cards.remove(index);
        pending.score = score_hand(&settings.card_scores, &pending.cards);
        Ok(())
    }

    fn pending_mut(&mut self) -> Result<&mut PendingScan, GameError> {
        self.expect_phase(GamePhase::ScanConfirmation)?;
        self.scan.pending.as_mut().ok_or(GameError::NoPendingScan)
    }

    fn expect_awaiting_recognition(&self) -> Result<(), GameError> {
        let awaiting = self.phase == GamePhase::Scanning
            || (self.phase == GamePhase::ScoreInput && self.scan.in_flight);
        if !awaiting {
            return Err(GameError::InvalidPhase(self.phase));
        }
        if self.scan.target.is_none() {
            return Err(GameError::NoScanTarget);
        }
        Ok(())
    }
}
