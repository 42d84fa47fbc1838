use crate::{
    Card, EventBus, Event, GamePhase, GameSettings, GameSnapshot, PendingScan, Player, PlayerId,
    RoundDefinition, RoundScoresDraft, ScanErrorKind, SettingsError,
};
use thiserror::Error;
use tracing::debug;

mod round;
mod scan;
mod setup;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid phase: {0:?}")]
    InvalidPhase(GamePhase),
    #[error("at least 2 players are required, have {0}")]
    NotEnoughPlayers(usize),
    #[error("no rounds enabled")]
    NoRoundsEnabled,
    #[error("player name is empty")]
    EmptyPlayerName,
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
    #[error("unknown round {0}")]
    UnknownRound(String),
    #[error("round {0} cannot be skipped")]
    RoundNotSkippable(String),
    #[error("round {0} already has recorded scores")]
    RoundAlreadyCompleted(String),
    #[error("scores missing or invalid for players {0:?}")]
    IncompleteScores(Vec<PlayerId>),
    #[error("the round winner always scores 0")]
    WinnerScoreFixed,
    #[error("no round winner selected")]
    NoRoundWinner,
    #[error("a scan is already waiting for recognition")]
    ScanInFlight,
    #[error("no scan target")]
    NoScanTarget,
    #[error("no pending scan")]
    NoPendingScan,
    #[error("invalid card index {0}")]
    InvalidCardIndex(usize),
    #[error("no saved game")]
    NoSavedGame,
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// User-facing transitions, one variant per event in the phase table.
///
/// Recognition results are not here: they arrive through
/// [`crate::run_recognition`], which drives the scan sub-flow directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameAction {
    AddPlayer { name: String },
    RemovePlayer { id: PlayerId },
    StartGame,
    SelectWinner { player: PlayerId },
    SkipRound,
    SetDraftScore { player: PlayerId, raw: String },
    RecordScores,
    StartScan { player: PlayerId },
    CancelScan,
    RetryScan,
    ConfirmScan { cards: Vec<Card>, score: i64 },
    EditPendingCard {
        index: usize,
        rank: Option<String>,
        suit: Option<String>,
    },
    AddPendingCard,
    RemovePendingCard { index: usize },
    NextRound,
    NewGame,
    ChangeRound { key: String },
}

/// One option of the change-round picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOption {
    pub round: &'static RoundDefinition,
    pub completed: bool,
    pub current: bool,
}

#[derive(Debug, Clone, Default)]
struct ScanState {
    target: Option<PlayerId>,
    in_flight: bool,
    pending: Option<PendingScan>,
    last_error: Option<ScanErrorKind>,
}

/// Game progression state. Settings are owned elsewhere and passed in, so
/// the active round list is always derived fresh from them.
#[derive(Debug, Clone)]
pub struct Game {
    players: Vec<Player>,
    phase: GamePhase,
    current_round: usize,
    round_winner: Option<PlayerId>,
    draft: RoundScoresDraft,
    scan: ScanState,
    next_player_id: PlayerId,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            phase: GamePhase::Setup,
            current_round: 0,
            round_winner: None,
            draft: RoundScoresDraft::default(),
            scan: ScanState::default(),
            next_player_id: 1,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn current_round(&self) -> usize {
        self.current_round
    }

    pub fn round_winner(&self) -> Option<PlayerId> {
        self.round_winner
    }

    pub fn draft(&self) -> &RoundScoresDraft {
        &self.draft
    }

    pub fn scan_target(&self) -> Option<PlayerId> {
        self.scan.target
    }

    pub fn is_scan_in_flight(&self) -> bool {
        self.scan.in_flight
    }

    pub fn pending_scan(&self) -> Option<&PendingScan> {
        self.scan.pending.as_ref()
    }

    pub fn last_scan_error(&self) -> Option<ScanErrorKind> {
        self.scan.last_error
    }

    pub fn current_round_def(&self, settings: &GameSettings) -> Option<&'static RoundDefinition> {
        settings.active_rounds().get(self.current_round).copied()
    }

    pub fn is_last_round(&self, settings: &GameSettings) -> bool {
        self.current_round + 1 >= settings.active_rounds().len()
    }

    pub fn can_start(&self, settings: &GameSettings) -> bool {
        self.phase == GamePhase::Setup
            && self.players.len() >= 2
            && !settings.active_rounds().is_empty()
    }

    pub fn can_skip_round(&self, settings: &GameSettings) -> bool {
        self.phase == GamePhase::WinnerSelection
            && self
                .current_round_def(settings)
                .is_some_and(RoundDefinition::can_skip)
    }

    pub fn can_record_scores(&self) -> bool {
        self.phase == GamePhase::ScoreInput
            && !self.scan.in_flight
            && self
                .round_winner
                .is_some_and(|winner| self.draft.is_complete(&self.players, winner))
    }

    pub fn is_round_completed(&self, catalog_index: usize) -> bool {
        self.players
            .iter()
            .any(|player| player.has_score_at(catalog_index))
    }

    pub fn change_round_options(&self, settings: &GameSettings) -> Vec<RoundOption> {
        let current = self.current_round_def(settings).map(|round| round.key);
        crate::catalog()
            .iter()
            .map(|round| RoundOption {
                round,
                completed: self.is_round_completed(round.ordinal),
                current: current == Some(round.key),
            })
            .collect()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.players.clone(),
            game_phase: self.phase,
            current_round: self.current_round,
            round_winner_id: self.round_winner,
            round_scores: self.draft.clone(),
        }
    }

    /// Whether the session should persist this state.
    pub fn should_persist(&self) -> bool {
        self.phase != GamePhase::Setup && !self.players.is_empty()
    }

    pub fn apply(
        &mut self,
        settings: &mut GameSettings,
        action: GameAction,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        match action {
            GameAction::AddPlayer { name } => self.add_player(&name, events).map(|_| ()),
            GameAction::RemovePlayer { id } => self.remove_player(id, events),
            GameAction::StartGame => self.start_game(settings, events),
            GameAction::SelectWinner { player } => self.select_winner(settings, player, events),
            GameAction::SkipRound => self.skip_round(settings, events),
            GameAction::SetDraftScore { player, raw } => self.set_draft_score(player, &raw),
            GameAction::RecordScores => self.record_scores(settings, events),
            GameAction::StartScan { player } => self.start_scan(player, events),
            GameAction::CancelScan => self.cancel_scan(events),
            GameAction::RetryScan => self.retry_scan(events),
            GameAction::ConfirmScan { cards, score } => self.confirm_scan(cards, score, events),
            GameAction::EditPendingCard { index, rank, suit } => {
                self.edit_pending_card(settings, index, rank.as_deref(), suit.as_deref())
            }
            GameAction::AddPendingCard => self.add_pending_card(settings),
            GameAction::RemovePendingCard { index } => self.remove_pending_card(settings, index),
            GameAction::NextRound => self.next_round(settings, events),
            GameAction::NewGame => self.new_game(events),
            GameAction::ChangeRound { key } => self.change_round(settings, &key, events),
        }
    }

    /// Repairs phase/state combinations that cannot be rendered, e.g. score
    /// input with no declared winner, by stepping back to the nearest phase
    /// that is consistent.
    pub fn normalize(&mut self, settings: &GameSettings, events: &mut EventBus) {
        let before = self.phase;
        let needs_winner = matches!(
            self.phase,
            GamePhase::ScoreInput | GamePhase::Scanning | GamePhase::ScanConfirmation
        );
        if needs_winner
            && self
                .round_winner
                .map_or(true, |winner| self.player(winner).is_none())
        {
            self.round_winner = None;
            self.draft.clear();
            self.scan = ScanState::default();
            self.phase = GamePhase::WinnerSelection;
        }
        let scan_lost = match self.phase {
            GamePhase::Scanning => self.scan.target.is_none(),
            GamePhase::ScanConfirmation => self.scan.pending.is_none() || self.scan.target.is_none(),
            _ => false,
        };
        if scan_lost {
            self.scan = ScanState::default();
            self.phase = GamePhase::ScoreInput;
        }
        if self.phase.is_in_round() {
            let active = settings.active_rounds().len();
            if active > 0 && self.current_round >= active {
                self.current_round = active - 1;
            }
        }
        if self.phase != before {
            debug!(from = ?before, to = ?self.phase, "phase corrected");
            events.push(Event::PhaseCorrected {
                from: before,
                to: self.phase,
            });
        }
    }

    fn expect_phase(&self, phase: GamePhase) -> Result<(), GameError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(GameError::InvalidPhase(self.phase))
        }
    }

    fn ensure_player(&self, id: PlayerId) -> Result<(), GameError> {
        self.player(id)
            .map(|_| ())
            .ok_or(GameError::UnknownPlayer(id))
    }

    fn active_round(&self, settings: &GameSettings) -> Result<&'static RoundDefinition, GameError> {
        self.current_round_def(settings)
            .ok_or(GameError::NoRoundsEnabled)
    }
}
