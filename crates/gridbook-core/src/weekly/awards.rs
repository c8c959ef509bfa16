// Weekly superlatives: closest game, biggest blowout, top performer, rank
// movement, upsets, and current streak labels.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::game::Outcome;
use crate::snapshot::RosterId;

use super::power::round_to;
use super::{MatchupResult, Performer, WeekReport, WeeklyStanding};

/// A single game singled out by an award.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameAward {
    pub matchup_id: u32,
    pub team1: RosterId,
    pub team2: RosterId,
    pub winner: Option<RosterId>,
    /// `"high-low"` with one decimal.
    pub score: String,
    /// Absolute margin rounded to two decimals.
    pub margin: f64,
}

impl GameAward {
    fn from_result(m: &MatchupResult) -> Self {
        GameAward {
            matchup_id: m.matchup_id,
            team1: m.team1.roster_id,
            team2: m.team2.roster_id,
            winner: m.winner,
            score: m.score_line(),
            margin: round_to(m.margin(), 2),
        }
    }
}

/// Power-rank change since the previous processed week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankMovement {
    pub roster_id: RosterId,
    pub previous_rank: Option<usize>,
    pub current_rank: usize,
    /// Positive means the franchise moved up. Zero without a previous week.
    pub movement: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WeeklyAwards {
    pub closest_game: Option<GameAward>,
    pub biggest_blowout: Option<GameAward>,
    pub top_performer: Option<Performer>,
    /// Pairing ids won by the team ranked lower the week before.
    pub upsets: Vec<u32>,
    pub movements: Vec<RankMovement>,
    /// Current regular-season streak per slot, e.g. `W3`, `L1`, `T1`.
    pub streaks: BTreeMap<RosterId, String>,
}

/// Compute awards for a week from its results and the previous week's report.
pub fn compute(
    results: &[MatchupResult],
    standings: &[WeeklyStanding],
    top_performers: &[Performer],
    previous: Option<&WeekReport>,
    outcomes: &BTreeMap<RosterId, Vec<Outcome>>,
) -> WeeklyAwards {
    let prev_ranks: HashMap<RosterId, usize> = previous
        .map(|w| {
            w.standings
                .iter()
                .map(|s| (s.roster_id, s.power_rank))
                .collect()
        })
        .unwrap_or_default();

    let movements = standings
        .iter()
        .map(|s| {
            let previous_rank = prev_ranks.get(&s.roster_id).copied();
            RankMovement {
                roster_id: s.roster_id,
                previous_rank,
                current_rank: s.power_rank,
                movement: previous_rank
                    .map(|p| p as i64 - s.power_rank as i64)
                    .unwrap_or(0),
            }
        })
        .collect();

    let upsets = results
        .iter()
        .filter(|m| is_upset(m, &prev_ranks))
        .map(|m| m.matchup_id)
        .collect();

    let streaks = outcomes
        .iter()
        .map(|(&rid, list)| (rid, streak_label(list)))
        .collect();

    WeeklyAwards {
        closest_game: pick_by_margin(results, |m, best| m < best).map(GameAward::from_result),
        biggest_blowout: pick_by_margin(results, |m, best| m > best).map(GameAward::from_result),
        top_performer: top_performers.first().cloned(),
        upsets,
        movements,
        streaks,
    }
}

/// First result whose margin beats every earlier one under `better`.
fn pick_by_margin(
    results: &[MatchupResult],
    better: impl Fn(f64, f64) -> bool,
) -> Option<&MatchupResult> {
    let mut best: Option<&MatchupResult> = None;
    for m in results {
        match best {
            Some(b) if !better(m.margin(), b.margin()) => {}
            _ => best = Some(m),
        }
    }
    best
}

/// A win by the side that was ranked worse last week.
///
/// Both sides need a rank from the previous processed week. A team without
/// one is not treated as ranked last, so week 1 of a season never has an
/// upset and neither does a game involving a slot absent from last week's
/// standings.
fn is_upset(m: &MatchupResult, prev_ranks: &HashMap<RosterId, usize>) -> bool {
    let (Some(winner), Some(loser)) = (m.winner, m.loser()) else {
        return false;
    };
    match (prev_ranks.get(&winner), prev_ranks.get(&loser)) {
        (Some(w), Some(l)) => w > l,
        _ => false,
    }
}

/// Label the current run at the end of `outcomes` (chronological).
///
/// A tie as the latest result reads `T1`; an earlier tie ends the run.
pub fn streak_label(outcomes: &[Outcome]) -> String {
    let mut rev = outcomes.iter().rev();
    let Some(&last) = rev.next() else {
        return "-".to_string();
    };
    if last == Outcome::Tie {
        return "T1".to_string();
    }
    let run = 1 + rev.take_while(|&&o| o == last).count();
    format!("{}{}", last.letter(), run)
}
