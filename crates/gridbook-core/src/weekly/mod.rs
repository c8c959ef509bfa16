// Weekly aggregation: cumulative standings, power rankings, and weekly
// superlatives for one season.
//
// Weeks are processed in ascending order because power rankings depend on
// cumulative state. A week with no positive score means the season has not
// reached it yet, and aggregation stops there.

pub mod awards;
pub mod context;
pub mod power;

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::AnalyticsConfig;
use crate::error::{SkipKind, SkipReport};
use crate::game::{score_line, Outcome};
use crate::snapshot::{MatchupSide, PlayerInfo, RosterId, SeasonSnapshot};

use awards::WeeklyAwards;
use context::{preview, season_context, MatchupPreview, SeasonContext};

/// Placeholder for player fields the directory does not know.
const UNKNOWN_FIELD: &str = "?";

// ---------------------------------------------------------------------------
// Cumulative record
// ---------------------------------------------------------------------------

/// Regular-season record accumulated through a given week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CumulativeRecord {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: f64,
    pub points_against: f64,
}

impl CumulativeRecord {
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    /// `(wins + 0.5 * ties) / games`, with zero games counted as one.
    pub fn win_pct(&self) -> f64 {
        (self.wins as f64 + 0.5 * self.ties as f64) / self.games().max(1) as f64
    }

    /// Fold one game into the record. Strictly more points wins.
    pub fn apply(&mut self, own: f64, other: f64) {
        self.points_for += own;
        self.points_against += other;
        match Outcome::from_points(own, other) {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Tie => self.ties += 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-week output types
// ---------------------------------------------------------------------------

/// A starter's line for the week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Performer {
    pub player_id: String,
    pub name: String,
    pub position: String,
    pub team: String,
    pub points: f64,
    /// Fantasy roster that started the player.
    pub roster_id: RosterId,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchupTeam {
    pub roster_id: RosterId,
    pub points: f64,
    pub top_starters: Vec<Performer>,
}

/// One resolved pairing of the week.
#[derive(Debug, Clone, Serialize)]
pub struct MatchupResult {
    pub matchup_id: u32,
    pub team1: MatchupTeam,
    pub team2: MatchupTeam,
    /// `None` on a tie.
    pub winner: Option<RosterId>,
}

impl MatchupResult {
    pub fn margin(&self) -> f64 {
        (self.team1.points - self.team2.points).abs()
    }

    pub fn loser(&self) -> Option<RosterId> {
        self.winner.map(|w| {
            if w == self.team1.roster_id {
                self.team2.roster_id
            } else {
                self.team1.roster_id
            }
        })
    }

    pub fn score_line(&self) -> String {
        score_line(self.team1.points, self.team2.points)
    }
}

/// A franchise's state after a given week.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyStanding {
    pub roster_id: RosterId,
    #[serde(flatten)]
    pub record: CumulativeRecord,
    pub week_points: f64,
    pub power_score: f64,
    /// 1-based, unique within the week.
    pub power_rank: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScorerLine {
    pub roster_id: Option<RosterId>,
    pub points: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekReport {
    pub week: u32,
    pub is_playoff: bool,
    pub matchups: Vec<MatchupResult>,
    pub standings: Vec<WeeklyStanding>,
    pub top_performers: Vec<Performer>,
    pub bottom_performers: Vec<Performer>,
    pub highest_scorer: ScorerLine,
    pub lowest_scorer: ScorerLine,
    pub awards: WeeklyAwards,
    pub context: SeasonContext,
    /// Pairings of the next listed week, ranked as of this week. Empty after
    /// the last listed week.
    pub next_week: Vec<MatchupPreview>,
}

impl WeekReport {
    pub fn rank_of(&self, roster_id: RosterId) -> Option<usize> {
        self.standings
            .iter()
            .find(|s| s.roster_id == roster_id)
            .map(|s| s.power_rank)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonReport {
    pub season: u16,
    pub playoff_week_start: u32,
    pub weeks: Vec<WeekReport>,
}

impl SeasonReport {
    /// Power rank in the last processed week.
    pub fn final_rank(&self, roster_id: RosterId) -> Option<usize> {
        self.weeks.last().and_then(|w| w.rank_of(roster_id))
    }
}

// ---------------------------------------------------------------------------
// Season state
// ---------------------------------------------------------------------------

/// Mutable accumulators for one season pass.
#[derive(Debug, Clone, Default)]
pub struct SeasonState {
    records: BTreeMap<RosterId, CumulativeRecord>,
    points_history: BTreeMap<RosterId, Vec<f64>>,
    outcomes: BTreeMap<RosterId, Vec<Outcome>>,
}

impl SeasonState {
    /// Start a season with an empty record for every rostered slot.
    pub fn new(roster_ids: impl IntoIterator<Item = RosterId>) -> Self {
        let mut state = SeasonState::default();
        for rid in roster_ids {
            state.records.insert(rid, CumulativeRecord::default());
            state.points_history.insert(rid, Vec::new());
            state.outcomes.insert(rid, Vec::new());
        }
        state
    }

    pub fn records(&self) -> &BTreeMap<RosterId, CumulativeRecord> {
        &self.records
    }

    pub fn points_history(&self) -> &BTreeMap<RosterId, Vec<f64>> {
        &self.points_history
    }

    /// Regular-season outcomes per slot, in week order.
    pub fn outcomes(&self) -> &BTreeMap<RosterId, Vec<Outcome>> {
        &self.outcomes
    }

    /// Fold a regular-season week into the cumulative records. Slots outside
    /// the season's roster map are ignored.
    pub fn apply_regular_season(&mut self, results: &[MatchupResult]) {
        for m in results {
            let sides = [(&m.team1, &m.team2), (&m.team2, &m.team1)];
            for (own, other) in sides {
                if let Some(rec) = self.records.get_mut(&own.roster_id) {
                    rec.apply(own.points, other.points);
                }
                if let Some(list) = self.outcomes.get_mut(&own.roster_id) {
                    list.push(Outcome::from_points(own.points, other.points));
                }
            }
        }
    }

    /// Append this week's points for every rostered slot (zero if idle).
    pub fn push_week_points(&mut self, week_scores: &HashMap<RosterId, f64>) {
        for (rid, history) in self.points_history.iter_mut() {
            history.push(week_scores.get(rid).copied().unwrap_or(0.0));
        }
    }
}

// ---------------------------------------------------------------------------
// Season aggregation
// ---------------------------------------------------------------------------

/// Aggregate one season week by week.
pub fn aggregate_season(
    season: &SeasonSnapshot,
    players: &HashMap<String, PlayerInfo>,
    config: &AnalyticsConfig,
    skips: &mut SkipReport,
) -> SeasonReport {
    let mut state = SeasonState::new(season.rosters.iter().map(|r| r.roster_id));
    let mut weeks: Vec<WeekReport> = Vec::new();

    for (&week, sides) in &season.weeks {
        if !sides.iter().any(|s| s.points() > 0.0) {
            info!(
                "season {}: week {} has no scores yet, stopping aggregation",
                season.season, week
            );
            skips.record(SkipKind::MissingData);
            break;
        }

        let pairings = group_pairings(season.season, week, sides, skips);
        if pairings.is_empty() {
            warn!(
                "season {}: week {} has no usable pairings, stopping aggregation",
                season.season, week
            );
            skips.record(SkipKind::MissingData);
            break;
        }

        let is_playoff = season.is_playoff_week(week);
        let results: Vec<MatchupResult> = pairings
            .iter()
            .map(|&(mid, s1, s2)| build_result(mid, s1, s2, players, config.report.top_starters))
            .collect();

        if !is_playoff {
            state.apply_regular_season(&results);
        }

        let week_scores: HashMap<RosterId, f64> = results
            .iter()
            .flat_map(|m| [(m.team1.roster_id, m.team1.points), (m.team2.roster_id, m.team2.points)])
            .collect();
        state.push_week_points(&week_scores);

        let standings = power::rank(&state, &week_scores, &config.power);

        let mut performers: Vec<Performer> = pairings
            .iter()
            .flat_map(|&(_, s1, s2)| [s1, s2])
            .flat_map(|side| {
                side.starter_points()
                    .filter(|&(_, pts)| pts > 0.0)
                    .map(move |(pid, pts)| performer(pid, pts, side.roster_id, players))
            })
            .collect();
        sort_by_points_desc(&mut performers);

        let top_performers: Vec<Performer> = performers
            .iter()
            .take(config.report.top_performers)
            .cloned()
            .collect();
        let bottom_n = config.report.bottom_performers;
        let bottom_performers = if bottom_n > 0 && performers.len() >= bottom_n {
            performers[performers.len() - bottom_n..].to_vec()
        } else {
            Vec::new()
        };

        let awards = awards::compute(
            &results,
            &standings,
            &top_performers,
            weeks.last(),
            state.outcomes(),
        );

        let context = season_context(
            weeks.len() + 1,
            season.playoff_week_start,
            &state,
            &results,
            &standings,
        );
        let next_week = season
            .weeks
            .range((Bound::Excluded(week), Bound::Unbounded))
            .next()
            .map(|(_, next)| preview(next, &standings))
            .unwrap_or_default();

        debug!(
            "season {} week {}: {} matchups, {} performers",
            season.season,
            week,
            results.len(),
            performers.len()
        );

        weeks.push(WeekReport {
            week,
            is_playoff,
            highest_scorer: extreme_scorer(&results, true),
            lowest_scorer: extreme_scorer(&results, false),
            matchups: results,
            standings,
            top_performers,
            bottom_performers,
            awards,
            context,
            next_week,
        });
    }

    info!(
        "season {}: aggregated {} week(s)",
        season.season,
        weeks.len()
    );

    SeasonReport {
        season: season.season,
        playoff_week_start: season.playoff_week_start,
        weeks,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sides keyed by pairing id. Sides without one are left out.
fn group_by_pairing(sides: &[MatchupSide]) -> BTreeMap<u32, Vec<&MatchupSide>> {
    let mut groups: BTreeMap<u32, Vec<&MatchupSide>> = BTreeMap::new();
    for side in sides {
        if let Some(mid) = side.matchup_id {
            groups.entry(mid).or_default().push(side);
        }
    }
    groups
}

/// Group sides by pairing id, keeping only groups of exactly two.
fn group_pairings<'a>(
    season: u16,
    week: u32,
    sides: &'a [MatchupSide],
    skips: &mut SkipReport,
) -> Vec<(u32, &'a MatchupSide, &'a MatchupSide)> {
    for side in sides.iter().filter(|s| s.matchup_id.is_none()) {
        warn!(
            "season {} week {}: roster {} has no pairing id, skipping",
            season, week, side.roster_id
        );
        skips.record(SkipKind::MalformedPairing);
    }

    let groups = group_by_pairing(sides);
    let mut pairings = Vec::with_capacity(groups.len());
    for (mid, group) in groups {
        match group.as_slice() {
            [a, b] => pairings.push((mid, *a, *b)),
            _ => {
                warn!(
                    "season {} week {}: pairing {} has {} side(s), skipping",
                    season,
                    week,
                    mid,
                    group.len()
                );
                skips.record(SkipKind::MalformedPairing);
            }
        }
    }
    pairings
}

fn build_result(
    matchup_id: u32,
    s1: &MatchupSide,
    s2: &MatchupSide,
    players: &HashMap<String, PlayerInfo>,
    top_starters: usize,
) -> MatchupResult {
    let (p1, p2) = (s1.points(), s2.points());
    let winner = match Outcome::from_points(p1, p2) {
        Outcome::Win => Some(s1.roster_id),
        Outcome::Loss => Some(s2.roster_id),
        Outcome::Tie => None,
    };
    MatchupResult {
        matchup_id,
        team1: matchup_team(s1, players, top_starters),
        team2: matchup_team(s2, players, top_starters),
        winner,
    }
}

fn matchup_team(
    side: &MatchupSide,
    players: &HashMap<String, PlayerInfo>,
    top_starters: usize,
) -> MatchupTeam {
    let mut starters: Vec<Performer> = side
        .starter_points()
        .map(|(pid, pts)| performer(pid, pts, side.roster_id, players))
        .collect();
    sort_by_points_desc(&mut starters);
    starters.truncate(top_starters);
    MatchupTeam {
        roster_id: side.roster_id,
        points: side.points(),
        top_starters: starters,
    }
}

/// Resolve a player id through the directory. Unknown ids keep the id as
/// the name.
fn performer(
    player_id: &str,
    points: f64,
    roster_id: RosterId,
    players: &HashMap<String, PlayerInfo>,
) -> Performer {
    let info = players.get(player_id);
    let field = |f: Option<&String>| f.cloned().unwrap_or_else(|| UNKNOWN_FIELD.to_string());
    Performer {
        player_id: player_id.to_string(),
        name: info
            .map(|p| p.name.clone())
            .unwrap_or_else(|| player_id.to_string()),
        position: field(info.and_then(|p| p.position.as_ref())),
        team: field(info.and_then(|p| p.team.as_ref())),
        points,
        roster_id,
    }
}

fn sort_by_points_desc(performers: &mut [Performer]) {
    performers.sort_by(|a, b| {
        b.points
            .partial_cmp(&a.points)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// First team with the highest (or lowest) score this week.
fn extreme_scorer(results: &[MatchupResult], highest: bool) -> ScorerLine {
    let mut best: Option<(RosterId, f64)> = None;
    for team in results.iter().flat_map(|m| [&m.team1, &m.team2]) {
        let better = match best {
            None => true,
            Some((_, pts)) if highest => team.points > pts,
            Some((_, pts)) => team.points < pts,
        };
        if better {
            best = Some((team.roster_id, team.points));
        }
    }
    ScorerLine {
        roster_id: best.map(|(rid, _)| rid),
        points: best.map(|(_, pts)| pts).unwrap_or(0.0),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{FinalRecord, RosterEntry};

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn roster(roster_id: RosterId) -> RosterEntry {
        RosterEntry {
            roster_id,
            owner_id: format!("owner-{roster_id}"),
            display_name: format!("user{roster_id}"),
            team_name: format!("Team {roster_id}"),
            final_record: FinalRecord::default(),
        }
    }

    fn side(matchup_id: u32, roster_id: RosterId, points: f64) -> MatchupSide {
        MatchupSide {
            matchup_id: Some(matchup_id),
            roster_id,
            points: Some(points),
            starters: vec![],
            starters_points: vec![],
        }
    }

    fn side_with_starters(
        matchup_id: u32,
        roster_id: RosterId,
        points: f64,
        starters: &[(&str, f64)],
    ) -> MatchupSide {
        MatchupSide {
            starters: starters.iter().map(|(p, _)| p.to_string()).collect(),
            starters_points: starters.iter().map(|(_, v)| *v).collect(),
            ..side(matchup_id, roster_id, points)
        }
    }

    fn season(num_teams: u32, weeks: Vec<(u32, Vec<MatchupSide>)>) -> SeasonSnapshot {
        SeasonSnapshot {
            season: 2024,
            playoff_week_start: 15,
            rosters: (1..=num_teams).map(roster).collect(),
            weeks: weeks.into_iter().collect(),
            winners_bracket: vec![],
        }
    }

    fn run(season: &SeasonSnapshot) -> (SeasonReport, SkipReport) {
        let mut skips = SkipReport::default();
        let report = aggregate_season(
            season,
            &HashMap::new(),
            &AnalyticsConfig::default(),
            &mut skips,
        );
        (report, skips)
    }

    fn standing(week: &WeekReport, roster_id: RosterId) -> &WeeklyStanding {
        week.standings
            .iter()
            .find(|s| s.roster_id == roster_id)
            .unwrap()
    }

    #[test]
    fn single_week_win_updates_both_records() {
        let s = season(2, vec![(1, vec![side(1, 1, 120.5), side(1, 2, 99.0)])]);
        let (report, _) = run(&s);
        let week = &report.weeks[0];

        let a = standing(week, 1);
        let b = standing(week, 2);
        assert_eq!(a.record.wins, 1);
        assert_eq!(b.record.losses, 1);
        assert!(approx_eq(a.record.points_for, 120.5, 1e-9));
        assert!(approx_eq(b.record.points_against, 120.5, 1e-9));
        assert_eq!(a.power_rank, 1);
        assert_eq!(b.power_rank, 2);
        assert_eq!(week.matchups[0].winner, Some(1));
    }

    #[test]
    fn tie_increments_both_tie_counters() {
        let s = season(2, vec![(1, vec![side(1, 1, 100.0), side(1, 2, 100.0)])]);
        let (report, _) = run(&s);
        let week = &report.weeks[0];
        assert_eq!(standing(week, 1).record.ties, 1);
        assert_eq!(standing(week, 2).record.ties, 1);
        assert_eq!(week.matchups[0].winner, None);
    }

    #[test]
    fn playoff_weeks_do_not_touch_cumulative_record() {
        let mut s = season(
            2,
            vec![
                (14, vec![side(1, 1, 110.0), side(1, 2, 90.0)]),
                (15, vec![side(1, 1, 80.0), side(1, 2, 130.0)]),
            ],
        );
        s.playoff_week_start = 15;
        let (report, _) = run(&s);
        assert_eq!(report.weeks.len(), 2);

        let playoff = &report.weeks[1];
        assert!(playoff.is_playoff);
        let b = standing(playoff, 2);
        assert_eq!(b.record.wins, 0);
        assert_eq!(b.record.losses, 1);
        assert!(approx_eq(b.record.points_for, 90.0, 1e-9));
        assert!(approx_eq(b.week_points, 130.0, 1e-9));
    }

    #[test]
    fn zero_score_week_halts_aggregation() {
        let s = season(
            2,
            vec![
                (1, vec![side(1, 1, 100.0), side(1, 2, 90.0)]),
                (2, vec![side(1, 1, 0.0), side(1, 2, 0.0)]),
                (3, vec![side(1, 1, 100.0), side(1, 2, 90.0)]),
            ],
        );
        let (report, skips) = run(&s);
        assert_eq!(report.weeks.len(), 1);
        assert_eq!(skips.missing_data, 1);
    }

    #[test]
    fn malformed_pairings_are_skipped_and_counted() {
        let mut orphan = side(0, 4, 70.0);
        orphan.matchup_id = None;
        let s = season(
            5,
            vec![(
                1,
                vec![
                    side(1, 1, 100.0),
                    side(1, 2, 90.0),
                    side(2, 3, 80.0),
                    orphan,
                    side(3, 5, 60.0),
                ],
            )],
        );
        let (report, skips) = run(&s);
        // Pairing 2 has one side, pairing 3 has one side, roster 4 has no id.
        assert_eq!(skips.malformed_pairings, 3);
        assert_eq!(report.weeks[0].matchups.len(), 1);
        assert_eq!(report.weeks[0].standings.len(), 5);
    }

    #[test]
    fn wins_equal_losses_and_ranks_are_a_permutation() {
        let s = season(
            4,
            vec![
                (1, vec![side(1, 1, 100.0), side(1, 2, 90.0), side(2, 3, 95.0), side(2, 4, 95.0)]),
                (2, vec![side(1, 1, 80.0), side(1, 3, 120.0), side(2, 2, 101.0), side(2, 4, 99.0)]),
                (3, vec![side(1, 1, 111.0), side(1, 4, 87.0), side(2, 2, 92.0), side(2, 3, 93.0)]),
            ],
        );
        let (report, _) = run(&s);
        assert_eq!(report.weeks.len(), 3);
        for week in &report.weeks {
            let wins: u32 = week.standings.iter().map(|s| s.record.wins).sum();
            let losses: u32 = week.standings.iter().map(|s| s.record.losses).sum();
            assert_eq!(wins, losses, "week {}", week.week);

            let mut ranks: Vec<usize> = week.standings.iter().map(|s| s.power_rank).collect();
            ranks.sort_unstable();
            assert_eq!(ranks, vec![1, 2, 3, 4]);
        }
    }

    #[test]
    fn performers_and_starters_are_sorted() {
        let s = season(
            2,
            vec![(
                1,
                vec![
                    side_with_starters(1, 1, 50.0, &[("qb", 20.0), ("rb", 25.0), ("k", 0.0), ("te", 5.0)]),
                    side_with_starters(1, 2, 40.0, &[("wr", 30.0), ("dst", 10.0)]),
                ],
            )],
        );
        let (report, _) = run(&s);
        let week = &report.weeks[0];

        let top: Vec<&str> = week.top_performers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(top, vec!["wr", "rb", "qb", "dst", "te"]);
        let bottom: Vec<&str> = week.bottom_performers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(bottom, vec!["qb", "dst", "te"]);

        let starters = &week.matchups[0].team1.top_starters;
        assert_eq!(starters[0].player_id, "rb");
        assert_eq!(starters.len(), 4);
        assert_eq!(starters[0].position, "?");
        assert_eq!(week.top_performers[0].roster_id, 2);
    }

    #[test]
    fn bottom_performers_empty_when_fewer_than_three() {
        let s = season(
            2,
            vec![(
                1,
                vec![
                    side_with_starters(1, 1, 50.0, &[("qb", 20.0)]),
                    side_with_starters(1, 2, 40.0, &[("wr", 30.0)]),
                ],
            )],
        );
        let (report, _) = run(&s);
        assert!(report.weeks[0].bottom_performers.is_empty());
        assert_eq!(report.weeks[0].top_performers.len(), 2);
    }

    #[test]
    fn high_and_low_scorer() {
        let s = season(
            4,
            vec![(1, vec![side(1, 1, 100.0), side(1, 2, 130.0), side(2, 3, 70.0), side(2, 4, 90.0)])],
        );
        let (report, _) = run(&s);
        let week = &report.weeks[0];
        assert_eq!(week.highest_scorer.roster_id, Some(2));
        assert!(approx_eq(week.highest_scorer.points, 130.0, 1e-9));
        assert_eq!(week.lowest_scorer.roster_id, Some(3));
        assert_eq!(report.final_rank(2), week.rank_of(2));
    }

    #[test]
    fn week_carries_context_and_next_week_preview() {
        let s = season(
            4,
            vec![
                (1, vec![side(1, 1, 100.0), side(1, 2, 130.0), side(2, 3, 70.0), side(2, 4, 90.0)]),
                // Scheduled but not yet played.
                (2, vec![side(1, 1, 0.0), side(1, 4, 0.0), side(2, 2, 0.0), side(2, 3, 0.0)]),
            ],
        );
        let (report, skips) = run(&s);
        assert_eq!(report.weeks.len(), 1);
        assert_eq!(skips.missing_data, 1);
        assert_eq!(skips.malformed_pairings, 0);

        let week = &report.weeks[0];
        assert_eq!(week.context.weeks_played, 1);
        assert_eq!(week.context.regular_season_weeks, 14);
        assert!(approx_eq(week.context.week_avg, 97.5, 1e-9));
        assert!(approx_eq(week.context.league_avg_ppg, 97.5, 1e-9));
        assert_eq!(week.context.points_leader.unwrap().roster_id, 2);

        let next: Vec<(RosterId, RosterId)> = week.next_week.iter().map(|p| (p.team1, p.team2)).collect();
        assert_eq!(next, vec![(1, 4), (2, 3)]);
        let first = &week.next_week[0];
        assert_eq!(first.team1_rank, week.rank_of(1));
        assert_eq!(first.team2_rank, week.rank_of(4));
    }

    #[test]
    fn last_listed_week_has_no_preview() {
        let s = season(2, vec![(1, vec![side(1, 1, 100.0), side(1, 2, 90.0)])]);
        let (report, _) = run(&s);
        assert!(report.weeks[0].next_week.is_empty());
        assert_eq!(report.weeks[0].context.best_record.unwrap().roster_id, 1);
        assert_eq!(report.weeks[0].context.worst_record.unwrap().roster_id, 2);
    }

    #[test]
    fn idle_team_gets_zero_week_points() {
        let s = season(3, vec![(1, vec![side(1, 1, 100.0), side(1, 2, 90.0)])]);
        let mut skips = SkipReport::default();
        let report = aggregate_season(&s, &HashMap::new(), &AnalyticsConfig::default(), &mut skips);
        let idle = standing(&report.weeks[0], 3);
        assert_eq!(idle.record.games(), 0);
        assert_eq!(idle.week_points, 0.0);
    }
}
