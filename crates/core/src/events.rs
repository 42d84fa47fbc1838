use crate::{Card, GamePhase, PlayerId, ScanErrorKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    PlayerAdded { id: PlayerId, name: String },
    PlayerRemoved { id: PlayerId },
    GameStarted { players: usize, rounds: usize },
    GameResumed { phase: GamePhase, round: usize },
    WinnerSelected { round: String, winner: PlayerId },
    RoundSkipped { round: String },
    ScoresRecorded {
        round: String,
        scores: Vec<(PlayerId, u32)>,
    },
    RoundAdvanced { round: usize, key: String },
    GameFinished { winners: Vec<PlayerId>, total: u32 },
    GameReset,
    RoundChanged {
        from: String,
        to: String,
        enabled: bool,
    },
    ScanStarted { player: PlayerId },
    ScanSubmitted { player: PlayerId },
    ScanRecognized { cards: Vec<Card>, score: i64 },
    ScanFailed { kind: ScanErrorKind },
    ScanCancelled,
    ScanRetried,
    ScanConfirmed { player: PlayerId, score: i64 },
    PhaseCorrected { from: GamePhase, to: GamePhase },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
