use serde::{Deserialize, Serialize};

pub const JOKER: &str = "Joker";
pub const DEFAULT_ADDED_RANK: &str = "A";
pub const DEFAULT_ADDED_SUIT: &str = "Hearts";

/// A card as reported by the recognizer or typed in by hand.
///
/// Rank and suit stay free-form labels: the recognizer may emit anything and
/// scoring resolves unknown ranks through the fallback policy in
/// [`crate::score_card`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub suit: String,
}

impl Card {
    pub fn new(rank: impl Into<String>, suit: impl Into<String>) -> Self {
        Self {
            rank: rank.into(),
            suit: suit.into(),
        }
    }

    pub fn joker() -> Self {
        Self::new(JOKER, JOKER)
    }

    /// Card appended when the user adds a row on the confirmation screen.
    pub fn placeholder() -> Self {
        Self::new(DEFAULT_ADDED_RANK, DEFAULT_ADDED_SUIT)
    }

    pub fn is_joker(&self) -> bool {
        self.rank.eq_ignore_ascii_case(JOKER)
    }
}
