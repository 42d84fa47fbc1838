use crate::{round_count, MAX_ROUND_SCORE};
use serde::{Deserialize, Serialize};

pub type PlayerId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// One slot per catalog round, `None` until that round is recorded.
    pub scores: Vec<Option<u32>>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            scores: vec![None; round_count()],
        }
    }

    pub fn total(&self) -> u32 {
        self.scores
            .iter()
            .flatten()
            .fold(0, |total, score| total.saturating_add(*score))
    }

    pub fn score_at(&self, catalog_index: usize) -> Option<u32> {
        self.scores.get(catalog_index).copied().flatten()
    }

    pub fn has_score_at(&self, catalog_index: usize) -> bool {
        self.score_at(catalog_index).is_some()
    }

    pub(crate) fn set_score(&mut self, catalog_index: usize, score: u32) {
        if let Some(slot) = self.scores.get_mut(catalog_index) {
            *slot = Some(score);
        }
    }

    pub(crate) fn clear_scores(&mut self) {
        self.scores = vec![None; round_count()];
    }

    /// Non-blank name, one slot per catalog round, every score in range.
    pub(crate) fn has_valid_shape(&self) -> bool {
        !self.name.trim().is_empty()
            && self.scores.len() == round_count()
            && self.scores.iter().flatten().all(|score| *score <= MAX_ROUND_SCORE)
    }
}
