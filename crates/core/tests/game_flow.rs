use carioca_core::{
    final_results, round_index, standings, EventBus, Event, Game, GameAction, GameError,
    GamePhase, GameSettings, PlayerId,
};

struct Table {
    game: Game,
    settings: GameSettings,
    events: EventBus,
    ids: Vec<PlayerId>,
}

impl Table {
    fn new(names: &[&str]) -> Self {
        Self::with_settings(names, GameSettings::default())
    }

    fn with_settings(names: &[&str], settings: GameSettings) -> Self {
        let mut game = Game::new();
        let mut events = EventBus::default();
        let ids = names
            .iter()
            .map(|name| game.add_player(name, &mut events).expect("add player"))
            .collect();
        Self {
            game,
            settings,
            events,
            ids,
        }
    }

    fn apply(&mut self, action: GameAction) -> Result<(), GameError> {
        self.game.apply(&mut self.settings, action, &mut self.events)
    }

    fn start(&mut self) {
        self.apply(GameAction::StartGame).expect("start");
    }

    fn play_round(&mut self, winner: usize, scores: &[(usize, &str)]) {
        self.apply(GameAction::SelectWinner {
            player: self.ids[winner],
        })
        .expect("select winner");
        for (idx, raw) in scores {
            self.apply(GameAction::SetDraftScore {
                player: self.ids[*idx],
                raw: raw.to_string(),
            })
            .expect("draft");
        }
        self.apply(GameAction::RecordScores).expect("record");
    }

    fn total(&self, idx: usize) -> u32 {
        self.game.player(self.ids[idx]).expect("player").total()
    }
}

#[test]
fn start_requires_two_players() {
    let mut table = Table::new(&["Solo"]);
    assert_eq!(
        table.apply(GameAction::StartGame),
        Err(GameError::NotEnoughPlayers(1))
    );
    assert_eq!(table.game.phase(), GamePhase::Setup);
}

#[test]
fn start_requires_an_enabled_round() {
    let settings = GameSettings {
        enabled_rounds: Vec::new(),
        ..GameSettings::default()
    };
    let mut table = Table::with_settings(&["A", "B"], settings);
    assert!(!table.game.can_start(&table.settings));
    assert_eq!(
        table.apply(GameAction::StartGame),
        Err(GameError::NoRoundsEnabled)
    );
    assert_eq!(table.game.phase(), GamePhase::Setup);
}

#[test]
fn blank_player_names_are_rejected() {
    let mut table = Table::new(&[]);
    assert_eq!(
        table.apply(GameAction::AddPlayer {
            name: "   ".into()
        }),
        Err(GameError::EmptyPlayerName)
    );
    table
        .apply(GameAction::AddPlayer {
            name: "  Rosa ".into(),
        })
        .expect("add");
    assert_eq!(table.game.players()[0].name, "Rosa");
}

#[test]
fn players_can_only_be_removed_during_setup() {
    let mut table = Table::new(&["A", "B", "C"]);
    let c = table.ids[2];
    table.apply(GameAction::RemovePlayer { id: c }).expect("remove");
    assert_eq!(table.game.players().len(), 2);
    table.start();
    let a = table.ids[0];
    assert_eq!(
        table.apply(GameAction::RemovePlayer { id: a }),
        Err(GameError::InvalidPhase(GamePhase::WinnerSelection))
    );
}

#[test]
fn selecting_a_winner_seeds_the_draft() {
    let mut table = Table::new(&["A", "B", "C"]);
    table.start();
    let winner = table.ids[1];
    table
        .apply(GameAction::SelectWinner { player: winner })
        .expect("winner");
    assert_eq!(table.game.phase(), GamePhase::ScoreInput);
    assert_eq!(table.game.draft().get(winner), Some("0"));
    assert_eq!(table.game.draft().get(table.ids[0]), Some(""));
    assert_eq!(table.game.draft().get(table.ids[2]), Some(""));
}

#[test]
fn unknown_winner_is_rejected() {
    let mut table = Table::new(&["A", "B"]);
    table.start();
    assert_eq!(
        table.apply(GameAction::SelectWinner { player: 999 }),
        Err(GameError::UnknownPlayer(999))
    );
    assert_eq!(table.game.phase(), GamePhase::WinnerSelection);
}

#[test]
fn record_is_blocked_until_every_draft_is_valid() {
    let mut table = Table::new(&["A", "B", "C"]);
    table.start();
    let (a, b, c) = (table.ids[0], table.ids[1], table.ids[2]);
    table
        .apply(GameAction::SelectWinner { player: a })
        .expect("winner");
    table
        .apply(GameAction::SetDraftScore {
            player: b,
            raw: "25".into(),
        })
        .expect("draft");
    assert!(!table.game.can_record_scores());
    assert_eq!(
        table.apply(GameAction::RecordScores),
        Err(GameError::IncompleteScores(vec![c]))
    );
    table
        .apply(GameAction::SetDraftScore {
            player: c,
            raw: "-5".into(),
        })
        .expect("draft");
    assert!(table.apply(GameAction::RecordScores).is_err());
    assert_eq!(table.game.phase(), GamePhase::ScoreInput);
    table
        .apply(GameAction::SetDraftScore {
            player: c,
            raw: "40".into(),
        })
        .expect("draft");
    assert!(table.game.can_record_scores());
    table.apply(GameAction::RecordScores).expect("record");
    assert_eq!(table.game.phase(), GamePhase::Standings);
    assert!(table.game.draft().is_empty());
}

#[test]
fn winner_draft_cannot_be_edited() {
    let mut table = Table::new(&["A", "B"]);
    table.start();
    let a = table.ids[0];
    table
        .apply(GameAction::SelectWinner { player: a })
        .expect("winner");
    assert_eq!(
        table.apply(GameAction::SetDraftScore {
            player: a,
            raw: "12".into()
        }),
        Err(GameError::WinnerScoreFixed)
    );
}

#[test]
fn recorded_scores_are_clamped() {
    let mut table = Table::new(&["A", "B"]);
    table.start();
    table.play_round(0, &[(1, "500")]);
    assert_eq!(table.total(1), 240);
    assert_eq!(table.total(0), 0);
}

#[test]
fn only_long_rounds_can_be_skipped() {
    let mut table = Table::new(&["A", "B"]);
    table.start();
    assert!(!table.game.can_skip_round(&table.settings));
    assert_eq!(
        table.apply(GameAction::SkipRound),
        Err(GameError::RoundNotSkippable("two_sets".into()))
    );
    table
        .apply(GameAction::ChangeRound {
            key: "dirty_run".into(),
        })
        .expect("change");
    assert!(table.game.can_skip_round(&table.settings));
    table.apply(GameAction::SkipRound).expect("skip");
    assert_eq!(table.game.phase(), GamePhase::Standings);
    let dirty = round_index("dirty_run").expect("round");
    for player in table.game.players() {
        assert_eq!(player.score_at(dirty), Some(0));
    }
}

#[test]
fn last_round_finishes_the_game() {
    let settings = GameSettings {
        enabled_rounds: vec!["two_sets".into(), "royal_run".into()],
        ..GameSettings::default()
    };
    let mut table = Table::with_settings(&["A", "B"], settings);
    table.start();
    table.play_round(0, &[(1, "10")]);
    assert!(!table.game.is_last_round(&table.settings));
    table.apply(GameAction::NextRound).expect("next");
    assert_eq!(table.game.phase(), GamePhase::WinnerSelection);
    assert_eq!(table.game.current_round(), 1);
    assert!(table.game.is_last_round(&table.settings));
    table.apply(GameAction::SkipRound).expect("skip");
    table.apply(GameAction::NextRound).expect("finish");
    assert_eq!(table.game.phase(), GamePhase::Finished);
    let finished = table
        .events
        .drain()
        .find(|event| matches!(event, Event::GameFinished { .. }));
    assert_eq!(
        finished,
        Some(Event::GameFinished {
            winners: vec![table.ids[0]],
            total: 0,
        })
    );
}

#[test]
fn change_round_enables_missing_round_in_catalog_order() {
    let settings = GameSettings {
        enabled_rounds: vec!["two_sets".into(), "royal_run".into()],
        ..GameSettings::default()
    };
    let mut table = Table::with_settings(&["A", "B"], settings);
    table.start();
    table
        .apply(GameAction::ChangeRound {
            key: "four_sets".into(),
        })
        .expect("change");
    assert_eq!(
        table.settings.enabled_rounds,
        vec!["two_sets", "four_sets", "royal_run"]
    );
    assert_eq!(table.game.current_round(), 1);
    assert_eq!(
        table.game.current_round_def(&table.settings).map(|r| r.key),
        Some("four_sets")
    );
    assert_eq!(table.game.phase(), GamePhase::WinnerSelection);
}

#[test]
fn change_round_refuses_completed_rounds() {
    let mut table = Table::new(&["A", "B"]);
    table.start();
    table.play_round(0, &[(1, "10")]);
    table.apply(GameAction::NextRound).expect("next");
    assert_eq!(
        table.apply(GameAction::ChangeRound {
            key: "two_sets".into()
        }),
        Err(GameError::RoundAlreadyCompleted("two_sets".into()))
    );
    assert_eq!(
        table.apply(GameAction::ChangeRound {
            key: "seven_sets".into()
        }),
        Err(GameError::UnknownRound("seven_sets".into()))
    );
    let options = table.game.change_round_options(&table.settings);
    assert!(options[0].completed);
    assert!(options[1].current);
    assert!(!options[2].completed);
}

#[test]
fn new_game_clears_everything() {
    let mut table = Table::new(&["A", "B"]);
    table.start();
    table.play_round(0, &[(1, "10")]);
    table.apply(GameAction::NewGame).expect("new game");
    assert_eq!(table.game.phase(), GamePhase::Setup);
    assert!(table.game.players().is_empty());
    assert_eq!(table.game.current_round(), 0);
    assert_eq!(table.game.round_winner(), None);
}

#[test]
fn resumed_game_keeps_recorded_scores() {
    let mut table = Table::new(&["A", "B"]);
    table.start();
    table.play_round(0, &[(1, "10")]);
    let snapshot = table.game.snapshot();
    let mut fresh = Game::new();
    let mut events = EventBus::default();
    fresh
        .continue_game(&table.settings, snapshot, &mut events)
        .expect("resume");
    assert_eq!(fresh.player(table.ids[1]).expect("b").total(), 10);
    let next = fresh.add_player("late", &mut events);
    assert_eq!(next, Err(GameError::InvalidPhase(GamePhase::Standings)));
}

#[test]
fn three_player_game_end_to_end() {
    let mut table = Table::new(&["A", "B", "C"]);
    table.start();
    table.play_round(0, &[(1, "25"), (2, "40")]);

    let rows = standings(table.game.players());
    let totals: Vec<(PlayerId, u32)> = rows.iter().map(|row| (row.player, row.total)).collect();
    assert_eq!(
        totals,
        vec![(table.ids[0], 0), (table.ids[1], 25), (table.ids[2], 40)]
    );
    assert_eq!(rows[0].position, 1);

    let later_rounds: [(usize, [(usize, &str); 2]); 9] = [
        (1, [(0, "10"), (2, "5")]),
        (2, [(0, "30"), (1, "12")]),
        (0, [(1, "8"), (2, "20")]),
        (1, [(0, "7"), (2, "9")]),
        (2, [(0, "11"), (1, "3")]),
        (0, [(1, "60"), (2, "15")]),
        (1, [(0, "2"), (2, "4")]),
        (2, [(0, "9"), (1, "1")]),
        (0, [(1, "14"), (2, "16")]),
    ];
    for (winner, scores) in later_rounds {
        table.apply(GameAction::NextRound).expect("next");
        table.play_round(winner, &scores);
    }
    table.apply(GameAction::NextRound).expect("finish");
    assert_eq!(table.game.phase(), GamePhase::Finished);

    // A: 0+10+30+0+7+11+0+2+9+0 = 69
    // B: 25+0+12+8+0+3+60+0+1+14 = 123
    // C: 40+5+0+20+9+0+15+4+0+16 = 109
    assert_eq!(table.total(0), 69);
    assert_eq!(table.total(1), 123);
    assert_eq!(table.total(2), 109);
    for player in table.game.players() {
        assert!(player.scores.iter().all(Option::is_some));
    }
    let results = final_results(table.game.players());
    assert_eq!(results.winners, vec![table.ids[0]]);
    assert_eq!(results.winning_total, 69);
}

#[test]
fn tied_totals_share_the_win() {
    let settings = GameSettings {
        enabled_rounds: vec!["two_sets".into(), "two_runs".into()],
        ..GameSettings::default()
    };
    let mut table = Table::with_settings(&["A", "B", "C"], settings);
    table.start();
    table.play_round(0, &[(1, "10"), (2, "30")]);
    table.apply(GameAction::NextRound).expect("next");
    table.play_round(1, &[(0, "10"), (2, "5")]);
    table.apply(GameAction::NextRound).expect("finish");
    let results = final_results(table.game.players());
    assert_eq!(results.winners, vec![table.ids[0], table.ids[1]]);
    assert_eq!(results.winning_total, 10);
}
