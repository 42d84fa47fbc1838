use crate::{GameSettings, Player, PlayerId, RoundDefinition};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingRow {
    /// 1-based position after sorting by total.
    pub position: usize,
    pub player: PlayerId,
    pub name: String,
    pub total: u32,
    /// Shares the lowest total.
    pub leader: bool,
}

/// Lowest total first. Players with equal totals keep roster order.
pub fn standings(players: &[Player]) -> Vec<StandingRow> {
    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by_key(|player| player.total());
    let best = sorted.first().map(|player| player.total());
    sorted
        .into_iter()
        .enumerate()
        .map(|(idx, player)| StandingRow {
            position: idx + 1,
            player: player.id,
            name: player.name.clone(),
            total: player.total(),
            leader: Some(player.total()) == best,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalResults {
    pub winners: Vec<PlayerId>,
    pub winning_total: u32,
    pub rows: Vec<StandingRow>,
}

pub fn final_results(players: &[Player]) -> FinalResults {
    let rows = standings(players);
    let winning_total = rows.first().map_or(0, |row| row.total);
    let winners = rows
        .iter()
        .filter(|row| row.leader)
        .map(|row| row.player)
        .collect();
    FinalResults {
        winners,
        winning_total,
        rows,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSheetRow {
    pub round: &'static RoundDefinition,
    /// One cell per player, roster order.
    pub cells: Vec<Option<u32>>,
    /// Comes after the round currently being played.
    pub upcoming: bool,
}

/// Per-round grid over the enabled rounds, in catalog order.
pub fn score_sheet(
    players: &[Player],
    settings: &GameSettings,
    current_round: usize,
) -> Vec<ScoreSheetRow> {
    let active = settings.active_rounds();
    let current_ordinal = active.get(current_round).map(|round| round.ordinal);
    active
        .into_iter()
        .map(|round| ScoreSheetRow {
            round,
            cells: players
                .iter()
                .map(|player| player.score_at(round.ordinal))
                .collect(),
            upcoming: current_ordinal.is_some_and(|current| round.ordinal > current),
        })
        .collect()
}
