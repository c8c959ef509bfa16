// Season context for a week (league scoring pace, record and points leaders)
// and a preview of the next listed week's pairings with current ranks.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::snapshot::{MatchupSide, RosterId};

use super::{group_by_pairing, MatchupResult, SeasonState, WeeklyStanding};

/// A franchise singled out by the season context, with its record so far.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LeaderLine {
    pub roster_id: RosterId,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: f64,
}

impl LeaderLine {
    fn from_standing(s: &WeeklyStanding) -> Self {
        LeaderLine {
            roster_id: s.roster_id,
            wins: s.record.wins,
            losses: s.record.losses,
            ties: s.record.ties,
            points_for: s.record.points_for,
        }
    }
}

/// Where the season stands after a week.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeasonContext {
    /// Weeks processed so far, this one included.
    pub weeks_played: usize,
    /// Weeks before the playoffs start.
    pub regular_season_weeks: u32,
    /// Mean points per slot per processed week. Idle slots count as zero.
    pub league_avg_ppg: f64,
    /// Mean score of the teams that played this week.
    pub week_avg: f64,
    pub best_record: Option<LeaderLine>,
    pub worst_record: Option<LeaderLine>,
    pub points_leader: Option<LeaderLine>,
}

/// One pairing of the next listed week, with both sides' current ranks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupPreview {
    pub matchup_id: u32,
    pub team1: RosterId,
    pub team1_rank: Option<usize>,
    pub team2: RosterId,
    pub team2_rank: Option<usize>,
}

/// Build the context from the state after this week has been folded in.
///
/// Record leaders compare win percentage; equal percentages go to the
/// better power rank for the best record and the worse one for the worst.
pub fn season_context(
    weeks_played: usize,
    playoff_week_start: u32,
    state: &SeasonState,
    results: &[MatchupResult],
    standings: &[WeeklyStanding],
) -> SeasonContext {
    let history = state.points_history();
    let entries: usize = history.values().map(Vec::len).sum();
    let total: f64 = history.values().flatten().sum();

    let scores: Vec<f64> = results
        .iter()
        .flat_map(|m| [m.team1.points, m.team2.points])
        .collect();

    // Power ranks are unique, so neither ordering leaves equal elements.
    let by_record = |a: &&WeeklyStanding, b: &&WeeklyStanding| {
        a.record
            .win_pct()
            .total_cmp(&b.record.win_pct())
            .then(b.power_rank.cmp(&a.power_rank))
    };
    let by_points = |a: &&WeeklyStanding, b: &&WeeklyStanding| {
        a.record
            .points_for
            .total_cmp(&b.record.points_for)
            .then(b.power_rank.cmp(&a.power_rank))
    };

    SeasonContext {
        weeks_played,
        regular_season_weeks: playoff_week_start.saturating_sub(1),
        league_avg_ppg: total / entries.max(1) as f64,
        week_avg: scores.iter().sum::<f64>() / scores.len().max(1) as f64,
        best_record: standings.iter().max_by(by_record).map(LeaderLine::from_standing),
        worst_record: standings.iter().min_by(by_record).map(LeaderLine::from_standing),
        points_leader: standings.iter().max_by(by_points).map(LeaderLine::from_standing),
    }
}

/// Pair up the next week's sides and attach this week's ranks. Sides that do
/// not form a pair are left out without being counted; the week is counted
/// when it is aggregated itself.
pub fn preview(sides: &[MatchupSide], standings: &[WeeklyStanding]) -> Vec<MatchupPreview> {
    let ranks: BTreeMap<RosterId, usize> = standings
        .iter()
        .map(|s| (s.roster_id, s.power_rank))
        .collect();

    group_by_pairing(sides)
        .into_iter()
        .filter_map(|(mid, group)| match group.as_slice() {
            [a, b] => Some(MatchupPreview {
                matchup_id: mid,
                team1: a.roster_id,
                team1_rank: ranks.get(&a.roster_id).copied(),
                team2: b.roster_id,
                team2_rank: ranks.get(&b.roster_id).copied(),
            }),
            _ => None,
        })
        .collect()
}
