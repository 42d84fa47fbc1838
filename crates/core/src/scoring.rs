use crate::{Card, CardScores, JOKER};
use thiserror::Error;

/// Used when neither the rank nor the Joker entry is in the table.
pub const FALLBACK_CARD_SCORE: i64 = 30;
pub const MAX_ROUND_SCORE: u32 = 240;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreParseError {
    #[error("score is empty")]
    Empty,
    #[error("score {0:?} is not a non-negative whole number")]
    NotANumber(String),
}

/// Point value of a single card.
///
/// Lookup is by upper-cased rank; unknown ranks fall back to the table's
/// Joker entry and then to [`FALLBACK_CARD_SCORE`]. The recognizer labels any
/// card it is unsure about as a Joker, so this chain is the scoring policy
/// for low-confidence reads, not just an error path.
pub fn score_card(card_scores: &CardScores, rank: &str) -> i64 {
    card_scores
        .get(&rank.to_uppercase())
        .or_else(|| card_scores.get(JOKER))
        .copied()
        .unwrap_or(FALLBACK_CARD_SCORE)
}

pub fn score_hand(card_scores: &CardScores, cards: &[Card]) -> i64 {
    cards
        .iter()
        .map(|card| score_card(card_scores, &card.rank))
        .sum()
}

/// Validates a typed round score. Only plain digit strings are accepted and
/// the result is clamped to [`MAX_ROUND_SCORE`].
pub fn parse_manual_score(raw: &str) -> Result<u32, ScoreParseError> {
    if raw.is_empty() {
        return Err(ScoreParseError::Empty);
    }
    if !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ScoreParseError::NotANumber(raw.to_string()));
    }
    // All digits, so a parse failure can only be overflow.
    let value = raw.parse::<u32>().unwrap_or(u32::MAX);
    Ok(value.min(MAX_ROUND_SCORE))
}
