use crate::{parse_manual_score, Player, PlayerId, ScoreParseError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Setup,
    WinnerSelection,
    ScoreInput,
    Standings,
    Finished,
    Scanning,
    ScanConfirmation,
}

impl GamePhase {
    /// Phases in which a round is being played and `current_round` must
    /// point into the active round list.
    pub fn is_in_round(self) -> bool {
        !matches!(self, Self::Setup | Self::Finished)
    }

    pub fn is_scan_flow(self) -> bool {
        matches!(self, Self::Scanning | Self::ScanConfirmation)
    }
}

/// Raw score text per player while the round's scores are being typed.
///
/// Entries may be empty or malformed; nothing is validated until
/// [`RoundScoresDraft::validate`] runs at the record boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundScoresDraft {
    entries: BTreeMap<PlayerId, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftIssue {
    pub player: PlayerId,
    pub error: ScoreParseError,
}

impl RoundScoresDraft {
    /// Winner starts at "0", everyone else blank.
    pub fn for_round(players: &[Player], winner: PlayerId) -> Self {
        let entries = players
            .iter()
            .map(|player| {
                let raw = if player.id == winner { "0" } else { "" };
                (player.id, raw.to_string())
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, player: PlayerId) -> Option<&str> {
        self.entries.get(&player).map(String::as_str)
    }

    pub fn set(&mut self, player: PlayerId, raw: impl Into<String>) {
        self.entries.insert(player, raw.into());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &str)> + '_ {
        self.entries.iter().map(|(id, raw)| (*id, raw.as_str()))
    }

    /// Parses every player's entry, forcing the winner to zero.
    pub fn validate(
        &self,
        players: &[Player],
        winner: PlayerId,
    ) -> Result<Vec<(PlayerId, u32)>, Vec<DraftIssue>> {
        let mut scores = Vec::with_capacity(players.len());
        let mut issues = Vec::new();
        for player in players {
            if player.id == winner {
                scores.push((player.id, 0));
                continue;
            }
            let raw = self.get(player.id).unwrap_or("");
            match parse_manual_score(raw) {
                Ok(value) => scores.push((player.id, value)),
                Err(error) => issues.push(DraftIssue {
                    player: player.id,
                    error,
                }),
            }
        }
        if issues.is_empty() {
            Ok(scores)
        } else {
            Err(issues)
        }
    }

    pub fn is_complete(&self, players: &[Player], winner: PlayerId) -> bool {
        self.validate(players, winner).is_ok()
    }
}

/// Serialized game used to resume an interrupted session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub players: Vec<Player>,
    pub game_phase: GamePhase,
    #[serde(default)]
    pub current_round: usize,
    #[serde(default)]
    pub round_winner_id: Option<PlayerId>,
    #[serde(default)]
    pub round_scores: RoundScoresDraft,
}

impl GameSnapshot {
    /// Whether this snapshot describes a game worth offering to resume.
    pub fn is_resumable(&self) -> bool {
        let mut ids = BTreeSet::new();
        !self.players.is_empty()
            && self.game_phase != GamePhase::Setup
            && self.players.iter().all(Player::has_valid_shape)
            && self
                .players
                .iter()
                .all(|player| player.id != PlayerId::MAX && ids.insert(player.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Player> {
        vec![Player::new(1, "A"), Player::new(2, "B"), Player::new(3, "C")]
    }

    #[test]
    fn draft_starts_with_winner_at_zero() {
        let draft = RoundScoresDraft::for_round(&roster(), 2);
        assert_eq!(draft.get(2), Some("0"));
        assert_eq!(draft.get(1), Some(""));
        assert_eq!(draft.get(3), Some(""));
        assert!(!draft.is_complete(&roster(), 2));
    }

    #[test]
    fn validate_reports_every_bad_entry() {
        let mut draft = RoundScoresDraft::for_round(&roster(), 1);
        draft.set(2, "abc");
        let issues = draft.validate(&roster(), 1).expect_err("invalid");
        let players: Vec<PlayerId> = issues.iter().map(|issue| issue.player).collect();
        assert_eq!(players, vec![2, 3]);
    }

    #[test]
    fn validate_forces_winner_to_zero() {
        let mut draft = RoundScoresDraft::for_round(&roster(), 1);
        draft.set(1, "12");
        draft.set(2, "25");
        draft.set(3, "300");
        let scores = draft.validate(&roster(), 1).expect("valid");
        assert_eq!(scores, vec![(1, 0), (2, 25), (3, 240)]);
    }

    #[test]
    fn draft_keys_serialize_as_strings() {
        let draft = RoundScoresDraft::for_round(&roster(), 1);
        let json = serde_json::to_string(&draft).expect("json");
        assert_eq!(json, r#"{"1":"0","2":"","3":""}"#);
        let back: RoundScoresDraft = serde_json::from_str(&json).expect("parse");
        assert_eq!(back, draft);
    }

    #[test]
    fn setup_snapshot_is_not_resumable() {
        let snapshot = GameSnapshot {
            players: roster(),
            game_phase: GamePhase::Setup,
            current_round: 0,
            round_winner_id: None,
            round_scores: RoundScoresDraft::default(),
        };
        assert!(!snapshot.is_resumable());
        let in_game = GameSnapshot {
            game_phase: GamePhase::Standings,
            ..snapshot
        };
        assert!(in_game.is_resumable());
    }
}
