use carioca_core::{
    default_card_scores, parse_manual_score, score_card, score_hand, Card, ScoreParseError,
    FALLBACK_CARD_SCORE, MAX_ROUND_SCORE,
};
use proptest::prelude::*;

const RANKS: [&str; 14] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K", "Joker",
];

fn rank() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(RANKS.to_vec()).prop_map(str::to_string),
        "[a-zA-Z0-9?]{0,4}",
    ]
}

proptest! {
    #[test]
    fn lookup_ignores_case(rank in rank()) {
        let table = default_card_scores();
        prop_assert_eq!(
            score_card(&table, &rank.to_lowercase()),
            score_card(&table, &rank.to_uppercase())
        );
    }

    #[test]
    fn unknown_ranks_score_as_joker(rank in "[b-ik-pr-z?]{2,4}", joker in 0i64..500) {
        let mut table = default_card_scores();
        table.insert("Joker".into(), joker);
        prop_assert_eq!(score_card(&table, &rank), joker);
        table.remove("Joker");
        prop_assert_eq!(score_card(&table, &rank), FALLBACK_CARD_SCORE);
    }

    #[test]
    fn hand_score_is_sum_of_cards(ranks in prop::collection::vec(rank(), 0..12)) {
        let table = default_card_scores();
        let cards: Vec<Card> = ranks.iter().map(|rank| Card::new(rank.clone(), "Spades")).collect();
        let expected: i64 = ranks.iter().map(|rank| score_card(&table, rank)).sum();
        prop_assert_eq!(score_hand(&table, &cards), expected);
    }

    #[test]
    fn in_range_scores_parse_exactly(value in 0u32..=MAX_ROUND_SCORE) {
        prop_assert_eq!(parse_manual_score(&value.to_string()), Ok(value));
    }

    #[test]
    fn large_scores_clamp(value in (MAX_ROUND_SCORE + 1)..u32::MAX) {
        prop_assert_eq!(parse_manual_score(&value.to_string()), Ok(MAX_ROUND_SCORE));
    }

    #[test]
    fn non_digit_input_is_rejected(raw in "[0-9]{0,3}[-+. a-z][0-9]{0,3}") {
        prop_assert_eq!(
            parse_manual_score(&raw),
            Err(ScoreParseError::NotANumber(raw.clone()))
        );
    }
}

#[test]
fn empty_input_is_its_own_error() {
    assert_eq!(parse_manual_score(""), Err(ScoreParseError::Empty));
}
