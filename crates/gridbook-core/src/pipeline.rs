// Two-pass orchestration: per-season weekly aggregation, then one
// chronological history pass feeding ratings, rivalries, records and
// career lines.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use crate::config::AnalyticsConfig;
use crate::error::{EngineError, SkipKind, SkipReport};
use crate::history::career::{compute_careers, CareerStats};
use crate::history::elo::{compute_ratings, RatingState};
use crate::history::records::{compute_records, RecordsBook};
use crate::history::rivalry::{build_matrix, RivalryMatrix};
use crate::history::build_game_log;
use crate::registry::{Franchise, FranchiseId, FranchiseRegistry};
use crate::snapshot::{LeagueSnapshot, SeasonSnapshot};
use crate::weekly::{aggregate_season, SeasonReport};

/// Everything one run derives from a snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct LeagueReport {
    pub league_name: String,
    pub seasons: Vec<SeasonReport>,
    pub franchises: Vec<Franchise>,
    pub ratings: BTreeMap<FranchiseId, RatingState>,
    pub rivalries: RivalryMatrix,
    pub records: RecordsBook,
    pub careers: Vec<CareerStats>,
    pub skips: SkipReport,
}

/// Run the full analytics pipeline over a snapshot.
///
/// Fails only when the snapshot has no seasons at all. Every other input
/// problem is skipped and counted in the report's `skips`; a season without
/// matchups still feeds the franchise list and career lines.
pub fn run(snapshot: &LeagueSnapshot, config: &AnalyticsConfig) -> Result<LeagueReport, EngineError> {
    if snapshot.seasons.is_empty() {
        return Err(EngineError::NoSeasonData {
            missing: "seasons".to_string(),
        });
    }

    let mut seasons: Vec<&SeasonSnapshot> = snapshot.seasons.iter().collect();
    seasons.sort_by_key(|s| s.season);

    let mut skips = SkipReport::default();
    let mut registry = FranchiseRegistry::new();
    let mut reports = Vec::with_capacity(seasons.len());

    for season in &seasons {
        registry.register_season(season.season, &season.rosters);
        let report = if season.has_matchups() {
            aggregate_season(season, &snapshot.players, config, &mut skips)
        } else {
            info!("season {}: no matchups, skipping weekly aggregation", season.season);
            skips.record(SkipKind::MissingData);
            SeasonReport {
                season: season.season,
                playoff_week_start: season.playoff_week_start,
                weeks: Vec::new(),
            }
        };
        info!("season {}: {} week(s) processed", season.season, report.weeks.len());
        reports.push(report);
    }

    let log = build_game_log(&reports, &registry, &mut skips);
    let ratings = compute_ratings(&log, &config.elo);
    let rivalries = build_matrix(&log);
    let (records, streaks) = compute_records(&log, &registry);

    let careers = compute_careers(seasons.iter().copied(), &reports, &registry, &ratings, &streaks);

    info!(
        "{} franchise(s), {} game(s), {} skip(s)",
        registry.len(),
        log.len(),
        skips.total()
    );

    Ok(LeagueReport {
        league_name: snapshot.league_name.clone(),
        seasons: reports,
        franchises: registry.franchises().cloned().collect(),
        ratings,
        rivalries,
        records,
        careers,
        skips,
    })
}
