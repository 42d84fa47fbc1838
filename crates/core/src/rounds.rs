use serde::Serialize;

/// Immutable catalog entry. Display text is resolved by key elsewhere.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub struct RoundDefinition {
    pub key: &'static str,
    pub ordinal: usize,
}

impl RoundDefinition {
    /// Rounds that may legitimately end with nobody going out.
    pub fn can_skip(&self) -> bool {
        SKIPPABLE_ROUNDS.contains(&self.key)
    }

    pub fn name_key(&self) -> String {
        format!("roundName_{}", self.key)
    }

    pub fn description_key(&self) -> String {
        format!("roundDescription_{}", self.key)
    }
}

pub const ROUND_CATALOG: [RoundDefinition; 10] = [
    RoundDefinition { key: "two_sets", ordinal: 0 },
    RoundDefinition { key: "one_set_one_run", ordinal: 1 },
    RoundDefinition { key: "two_runs", ordinal: 2 },
    RoundDefinition { key: "three_sets", ordinal: 3 },
    RoundDefinition { key: "two_sets_one_run", ordinal: 4 },
    RoundDefinition { key: "one_set_two_runs", ordinal: 5 },
    RoundDefinition { key: "three_runs", ordinal: 6 },
    RoundDefinition { key: "four_sets", ordinal: 7 },
    RoundDefinition { key: "dirty_run", ordinal: 8 },
    RoundDefinition { key: "royal_run", ordinal: 9 },
];

pub const SKIPPABLE_ROUNDS: [&str; 3] = ["three_runs", "dirty_run", "royal_run"];

pub fn catalog() -> &'static [RoundDefinition] {
    &ROUND_CATALOG
}

pub fn round_count() -> usize {
    ROUND_CATALOG.len()
}

pub fn round_index(key: &str) -> Option<usize> {
    ROUND_CATALOG.iter().position(|round| round.key == key)
}

pub fn round_by_key(key: &str) -> Option<&'static RoundDefinition> {
    ROUND_CATALOG.iter().find(|round| round.key == key)
}

/// Catalog subset whose keys appear in `enabled`, always in catalog order.
/// The current-round pointer indexes into this list.
pub fn filter_enabled<S: AsRef<str>>(enabled: &[S]) -> Vec<&'static RoundDefinition> {
    ROUND_CATALOG
        .iter()
        .filter(|round| enabled.iter().any(|key| key.as_ref() == round.key))
        .collect()
}

/// Re-materializes an enabled set as catalog-ordered keys, dropping unknown
/// and duplicate entries.
pub fn ordered_keys<S: AsRef<str>>(enabled: &[S]) -> Vec<String> {
    filter_enabled(enabled)
        .into_iter()
        .map(|round| round.key.to_string())
        .collect()
}
