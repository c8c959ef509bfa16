// Power score: weighted blend of record, scoring output, recent form, and
// schedule strength.
//
//   score = w_win * win_pct
//         + w_pf * (pf / league_avg_pf)
//         + w_recent * (own_recent_avg / league_recent_avg)
//         + w_sos * (pa / league_avg_pa)
//
// Every league-average divisor is floored at 1.

use std::collections::HashMap;

use crate::config::{PowerConfig, PowerWeights};
use crate::snapshot::RosterId;

use super::{CumulativeRecord, SeasonState, WeeklyStanding};

/// Decimal places kept on the published power score.
const SCORE_PRECISION: i32 = 4;

/// League-wide means that normalize each franchise's factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeagueAverages {
    pub points_for: f64,
    pub points_against: f64,
    pub recent_form: f64,
}

impl LeagueAverages {
    /// Means over every rostered slot in the season state.
    pub fn from_state(state: &SeasonState, window: usize) -> Self {
        let n = state.records().len().max(1) as f64;
        let pf: f64 = state.records().values().map(|r| r.points_for).sum();
        let pa: f64 = state.records().values().map(|r| r.points_against).sum();

        let m = state.points_history().len().max(1) as f64;
        let recent: f64 = state
            .points_history()
            .values()
            .map(|h| trailing_average(h, window))
            .sum();

        LeagueAverages {
            points_for: pf / n,
            points_against: pa / n,
            recent_form: recent / m,
        }
    }
}

/// Mean of the last `window` entries (fewer early in the season).
/// An empty history averages to zero.
pub fn trailing_average(history: &[f64], window: usize) -> f64 {
    let start = history.len().saturating_sub(window);
    let recent = &history[start..];
    recent.iter().sum::<f64>() / recent.len().max(1) as f64
}

/// Compute the unrounded power score for one franchise.
pub fn power_score(
    record: &CumulativeRecord,
    recent_avg: f64,
    league: &LeagueAverages,
    weights: &PowerWeights,
) -> f64 {
    let pf_factor = record.points_for / league.points_for.max(1.0);
    let recent_factor = recent_avg / league.recent_form.max(1.0);
    let sos_factor = record.points_against / league.points_against.max(1.0);

    weights.win_pct * record.win_pct()
        + weights.points_for * pf_factor
        + weights.recent_form * recent_factor
        + weights.schedule * sos_factor
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Build this week's standings, ranked by power score descending.
///
/// The sort is stable, so equal scores keep the season state's slot order.
pub fn rank(
    state: &SeasonState,
    week_scores: &HashMap<RosterId, f64>,
    config: &PowerConfig,
) -> Vec<WeeklyStanding> {
    let league = LeagueAverages::from_state(state, config.recent_window);

    let mut standings: Vec<WeeklyStanding> = state
        .records()
        .iter()
        .map(|(&rid, record)| {
            let recent_avg = state
                .points_history()
                .get(&rid)
                .map(|h| trailing_average(h, config.recent_window))
                .unwrap_or(0.0);
            let score = power_score(record, recent_avg, &league, &config.weights);
            WeeklyStanding {
                roster_id: rid,
                record: *record,
                week_points: week_scores.get(&rid).copied().unwrap_or(0.0),
                power_score: round_to(score, SCORE_PRECISION),
                power_rank: 0,
            }
        })
        .collect();

    standings.sort_by(|a, b| {
        b.power_score
            .partial_cmp(&a.power_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (i, s) in standings.iter_mut().enumerate() {
        s.power_rank = i + 1;
    }
    standings
}
