// Per-franchise career lines: summed final records, Elo, streaks, and
// playoff finals/championship credits.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::warn;

use crate::registry::{FranchiseId, FranchiseRegistry};
use crate::snapshot::{BracketGame, SeasonSnapshot};
use crate::weekly::SeasonReport;

use super::elo::RatingState;
use super::records::StreakState;

/// One season of a franchise's career.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonLine {
    pub season: u16,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: f64,
    pub points_against: f64,
    /// Power rank in the season's last processed week.
    pub final_power_rank: Option<usize>,
    pub finalist: bool,
    pub champion: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerStats {
    pub franchise: FranchiseId,
    pub display_name: String,
    pub team_name: String,
    pub seasons_played: usize,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: f64,
    pub points_against: f64,
    pub win_pct: f64,
    pub championships: u32,
    pub finals: u32,
    pub current_elo: Option<f64>,
    pub peak_elo: Option<f64>,
    pub best_win_streak: u32,
    pub seasons: Vec<SeasonLine>,
}

/// The championship game(s) of a winners bracket.
///
/// Takes every game at the highest round; if any of those decides first
/// place, only those do. An empty bracket has no championship.
pub fn championship_games(bracket: &[BracketGame]) -> Vec<&BracketGame> {
    let Some(max_round) = bracket.iter().map(|g| g.round).max() else {
        return Vec::new();
    };
    let last_round: Vec<&BracketGame> = bracket.iter().filter(|g| g.round == max_round).collect();
    if last_round.iter().any(|g| g.p == Some(1)) {
        last_round.into_iter().filter(|g| g.p == Some(1)).collect()
    } else {
        last_round
    }
}

/// Build career lines for every registered franchise, in franchise id order.
///
/// `seasons` should be in chronological order. They are matched to
/// `reports` by season number; a season without a
/// report still contributes its final record, just no power rank.
pub fn compute_careers<'a>(
    seasons: impl IntoIterator<Item = &'a SeasonSnapshot>,
    reports: &[SeasonReport],
    registry: &FranchiseRegistry,
    ratings: &BTreeMap<FranchiseId, RatingState>,
    streaks: &HashMap<FranchiseId, StreakState>,
) -> Vec<CareerStats> {
    let reports: HashMap<u16, &SeasonReport> = reports.iter().map(|r| (r.season, r)).collect();

    let mut careers: BTreeMap<&str, CareerStats> = registry
        .franchises()
        .map(|f| {
            let rating = ratings.get(&f.owner_id);
            let stats = CareerStats {
                franchise: f.owner_id.clone(),
                display_name: f.display_name.clone(),
                team_name: f.team_name.clone(),
                seasons_played: f.seasons_played(),
                wins: 0,
                losses: 0,
                ties: 0,
                points_for: 0.0,
                points_against: 0.0,
                win_pct: 0.0,
                championships: 0,
                finals: 0,
                current_elo: rating.map(|r| r.rating),
                peak_elo: rating.map(|r| r.peak),
                best_win_streak: streaks.get(&f.owner_id).map_or(0, |s| s.best_win),
                seasons: Vec::new(),
            };
            (f.owner_id.as_str(), stats)
        })
        .collect();

    for season in seasons {
        let mut finalists: Vec<&str> = Vec::new();
        let mut champions: Vec<&str> = Vec::new();
        for g in championship_games(&season.winners_bracket) {
            for rid in [g.t1, g.t2].into_iter().flatten() {
                match registry.resolve(season.season, rid) {
                    Some(f) => finalists.push(f),
                    None => warn!(
                        "season {}: championship roster {} has no franchise",
                        season.season, rid
                    ),
                }
            }
            if let Some(f) = g.w.and_then(|w| registry.resolve(season.season, w)) {
                champions.push(f);
            }
        }

        let report = reports.get(&season.season);
        for roster in &season.rosters {
            let Some(franchise) = registry.resolve(season.season, roster.roster_id) else {
                continue;
            };
            let Some(stats) = careers.get_mut(franchise) else {
                continue;
            };
            let rec = roster.final_record;
            let finalist = finalists.contains(&franchise);
            let champion = champions.contains(&franchise);

            stats.wins += rec.wins;
            stats.losses += rec.losses;
            stats.ties += rec.ties;
            stats.points_for += rec.points_for;
            stats.points_against += rec.points_against;
            stats.finals += u32::from(finalist);
            stats.championships += u32::from(champion);
            stats.seasons.push(SeasonLine {
                season: season.season,
                wins: rec.wins,
                losses: rec.losses,
                ties: rec.ties,
                points_for: rec.points_for,
                points_against: rec.points_against,
                final_power_rank: report.and_then(|r| r.final_rank(roster.roster_id)),
                finalist,
                champion,
            });
        }
    }

    careers
        .into_values()
        .map(|mut stats| {
            let games = stats.wins + stats.losses + stats.ties;
            if games > 0 {
                stats.win_pct = (stats.wins as f64 + 0.5 * stats.ties as f64) / games as f64;
            }
            stats
        })
        .collect()
}
