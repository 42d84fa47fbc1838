use crate::{filter_enabled, ordered_keys, round_by_key, RoundDefinition, ROUND_CATALOG};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Card-rank label to point value.
pub type CardScores = BTreeMap<String, i64>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("card score table is empty")]
    EmptyCardScores,
    #[error("unknown round key: {0}")]
    UnknownRound(String),
    #[error("invalid card score {value:?} for rank {rank}")]
    InvalidCardScore { rank: String, value: String },
}

pub fn default_card_scores() -> CardScores {
    [
        ("A", 15),
        ("2", 2),
        ("3", 3),
        ("4", 4),
        ("5", 5),
        ("6", 6),
        ("7", 7),
        ("8", 8),
        ("9", 9),
        ("10", 10),
        ("J", 10),
        ("Q", 10),
        ("K", 10),
        (crate::JOKER, 30),
    ]
    .into_iter()
    .map(|(rank, value)| (rank.to_string(), value))
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    pub card_scores: CardScores,
    pub enabled_rounds: Vec<String>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            card_scores: default_card_scores(),
            enabled_rounds: ROUND_CATALOG
                .iter()
                .map(|round| round.key.to_string())
                .collect(),
        }
    }
}

impl GameSettings {
    /// Shape check applied to records read back from storage.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.card_scores.is_empty() {
            return Err(SettingsError::EmptyCardScores);
        }
        if let Some(bad) = self
            .enabled_rounds
            .iter()
            .find(|key| round_by_key(key).is_none())
        {
            return Err(SettingsError::UnknownRound(bad.clone()));
        }
        if let Some((rank, value)) = self.card_scores.iter().find(|(_, value)| **value < 0) {
            return Err(SettingsError::InvalidCardScore {
                rank: rank.clone(),
                value: value.to_string(),
            });
        }
        Ok(())
    }

    /// Puts `enabled_rounds` back into catalog order.
    pub fn reconcile(&mut self) {
        self.enabled_rounds = ordered_keys(&self.enabled_rounds);
    }

    pub fn active_rounds(&self) -> Vec<&'static RoundDefinition> {
        filter_enabled(&self.enabled_rounds)
    }

    pub fn is_round_enabled(&self, key: &str) -> bool {
        self.enabled_rounds.iter().any(|enabled| enabled == key)
    }

    /// Flips a round on or off and returns whether it is now enabled.
    ///
    /// A newly enabled key is appended; consumers derive the active list from
    /// the catalog, so insertion order never matters.
    pub fn toggle_round(&mut self, key: &str) -> Result<bool, SettingsError> {
        if round_by_key(key).is_none() {
            return Err(SettingsError::UnknownRound(key.to_string()));
        }
        if self.is_round_enabled(key) {
            self.enabled_rounds.retain(|enabled| enabled != key);
            Ok(false)
        } else {
            self.enabled_rounds.push(key.to_string());
            Ok(true)
        }
    }

    /// Enables `key` at its catalog position. Returns false if it already was.
    pub fn enable_round(&mut self, key: &str) -> Result<bool, SettingsError> {
        if round_by_key(key).is_none() {
            return Err(SettingsError::UnknownRound(key.to_string()));
        }
        if self.is_round_enabled(key) {
            return Ok(false);
        }
        self.enabled_rounds.push(key.to_string());
        self.reconcile();
        Ok(true)
    }

    /// Replaces the value for `rank` as typed. Ranks are stored verbatim;
    /// case folding happens on lookup.
    pub fn set_card_score(&mut self, rank: &str, raw: &str) -> Result<i64, SettingsError> {
        let value = raw
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|value| *value >= 0)
            .ok_or_else(|| SettingsError::InvalidCardScore {
                rank: rank.to_string(),
                value: raw.to_string(),
            })?;
        self.card_scores.insert(rank.to_string(), value);
        Ok(value)
    }
}
