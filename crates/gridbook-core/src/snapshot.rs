// Input snapshot handed over by the retrieval side.
//
// Field names follow the fantasy provider's payloads (`matchup_id`,
// `starters_points`, bracket `r`/`t1`/`t2`/`w`/`p`) so a fetched dump can be
// deserialized without reshaping.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Per-season roster slot number. Not stable across seasons.
pub type RosterId = u32;

/// Used when a league payload omits its playoff start.
pub const DEFAULT_PLAYOFF_WEEK_START: u32 = 15;

fn default_playoff_week_start() -> u32 {
    DEFAULT_PLAYOFF_WEEK_START
}

// ---------------------------------------------------------------------------
// League-level snapshot
// ---------------------------------------------------------------------------

/// Everything the engine needs for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    #[serde(default)]
    pub league_name: String,
    /// Player directory keyed by player id, shared across seasons.
    #[serde(default)]
    pub players: HashMap<String, PlayerInfo>,
    #[serde(default)]
    pub seasons: Vec<SeasonSnapshot>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
}

// ---------------------------------------------------------------------------
// Season snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonSnapshot {
    pub season: u16,
    /// First week counted as playoffs; earlier weeks are regular season.
    #[serde(default = "default_playoff_week_start")]
    pub playoff_week_start: u32,
    #[serde(default)]
    pub rosters: Vec<RosterEntry>,
    /// Week number -> one entry per side of each pairing.
    #[serde(default)]
    pub weeks: BTreeMap<u32, Vec<MatchupSide>>,
    #[serde(default)]
    pub winners_bracket: Vec<BracketGame>,
}

impl SeasonSnapshot {
    pub fn is_playoff_week(&self, week: u32) -> bool {
        week >= self.playoff_week_start
    }

    pub fn has_matchups(&self) -> bool {
        self.weeks.values().any(|sides| !sides.is_empty())
    }
}

/// One roster slot and the owner holding it this season.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub roster_id: RosterId,
    /// Stable franchise identity. Empty for an orphaned slot.
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub final_record: FinalRecord,
}

/// End-of-season record as reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinalRecord {
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub ties: u32,
    #[serde(default)]
    pub points_for: f64,
    #[serde(default)]
    pub points_against: f64,
}

/// One side of a weekly pairing. Both sides share a `matchup_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchupSide {
    #[serde(default)]
    pub matchup_id: Option<u32>,
    pub roster_id: RosterId,
    #[serde(default)]
    pub points: Option<f64>,
    /// Starting lineup player ids, in slot order.
    #[serde(default)]
    pub starters: Vec<String>,
    /// Points per starter, parallel to `starters`.
    #[serde(default)]
    pub starters_points: Vec<f64>,
}

impl MatchupSide {
    /// Points scored, treating a missing or null total as zero.
    pub fn points(&self) -> f64 {
        self.points.unwrap_or(0.0)
    }

    /// Iterate `(player_id, points)` for every starter. A starter without a
    /// matching points entry scored zero.
    pub fn starter_points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.starters.iter().enumerate().map(|(i, pid)| {
            let pts = self.starters_points.get(i).copied().unwrap_or(0.0);
            (pid.as_str(), pts)
        })
    }
}

/// A winners-bracket game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BracketGame {
    #[serde(rename = "r")]
    pub round: u32,
    #[serde(default)]
    pub t1: Option<RosterId>,
    #[serde(default)]
    pub t2: Option<RosterId>,
    /// Winning roster id, absent until the game is played.
    #[serde(default)]
    pub w: Option<RosterId>,
    /// Placement decided by this game (1 = championship, 3 = third place).
    #[serde(default)]
    pub p: Option<u32>,
}
