// Head-to-head rivalry matrix keyed by ordered franchise pair.
//
// Every meeting writes both (A, B) and (B, A), so each entry is the
// other's mirror: A's wins are B's losses and A's points-for are B's
// points-against.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::game::{Game, Outcome};
use crate::registry::FranchiseId;

use super::GameLog;

/// One meeting from the row franchise's point of view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RivalryGame {
    pub season: u16,
    pub week: u32,
    pub points_for: f64,
    pub points_against: f64,
    pub is_playoff: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RivalryRecord {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: f64,
    pub points_against: f64,
    pub games: Vec<RivalryGame>,
}

impl RivalryRecord {
    fn add(&mut self, game: &Game, outcome: Outcome, own: f64, other: f64) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Tie => self.ties += 1,
        }
        self.points_for += own;
        self.points_against += other;
        self.games.push(RivalryGame {
            season: game.season,
            week: game.week,
            points_for: own,
            points_against: other,
            is_playoff: game.is_playoff,
        });
    }

    pub fn meetings(&self) -> usize {
        self.games.len()
    }
}

/// Ordered-pair adjacency table.
#[derive(Debug, Clone, Default)]
pub struct RivalryMatrix {
    table: BTreeMap<(FranchiseId, FranchiseId), RivalryRecord>,
}

impl RivalryMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one game in both directions. Unresolved games are ignored.
    pub fn record(&mut self, game: &Game) {
        let Some((a, b)) = game.participants() else {
            return;
        };
        let (pa, pb) = (game.side_a.points, game.side_b.points);
        self.table
            .entry((a.to_string(), b.to_string()))
            .or_default()
            .add(game, game.outcome_a(), pa, pb);
        self.table
            .entry((b.to_string(), a.to_string()))
            .or_default()
            .add(game, game.outcome_b(), pb, pa);
    }

    pub fn get(&self, franchise: &str, opponent: &str) -> Option<&RivalryRecord> {
        self.table
            .get(&(franchise.to_string(), opponent.to_string()))
    }

    /// Every opponent a franchise has met, with its record against them.
    pub fn opponents<'a>(
        &'a self,
        franchise: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a RivalryRecord)> + 'a {
        self.table
            .iter()
            .filter(move |((f, _), _)| f == franchise)
            .map(|((_, o), r)| (o.as_str(), r))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &RivalryRecord)> {
        self.table
            .iter()
            .map(|((f, o), r)| (f.as_str(), o.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Build the matrix from every resolved game in the log.
pub fn build_matrix(log: &GameLog) -> RivalryMatrix {
    let mut matrix = RivalryMatrix::new();
    for (game, _, _) in log.resolved() {
        matrix.record(game);
    }
    matrix
}

#[derive(Serialize)]
struct RivalryEntry<'a> {
    franchise: &'a str,
    opponent: &'a str,
    #[serde(flatten)]
    record: &'a RivalryRecord,
}

// Tuple keys cannot be JSON object keys, so the matrix serializes as a list
// of (franchise, opponent, record) entries.
impl Serialize for RivalryMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(|(franchise, opponent, record)| RivalryEntry {
            franchise,
            opponent,
            record,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::test_support::{game, playoff, unresolved};

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn sample_log() -> GameLog {
        let mut log = GameLog::default();
        log.games = vec![
            game(2023, 1, "a", 120.0, "b", 100.0),
            game(2023, 5, "b", 130.5, "a", 90.0),
            game(2023, 9, "a", 101.0, "b", 101.0),
            playoff(game(2023, 15, "a", 140.0, "b", 110.0)),
            game(2024, 2, "a", 95.0, "c", 115.0),
            unresolved(game(2024, 3, "a", 95.0, "z", 115.0)),
        ];
        log
    }

    #[test]
    fn entries_are_mirrored() {
        let matrix = build_matrix(&sample_log());
        for (f, o, rec) in matrix.iter() {
            let mirror = matrix.get(o, f).expect("mirror entry exists");
            assert_eq!(rec.wins, mirror.losses);
            assert_eq!(rec.ties, mirror.ties);
            assert!(approx_eq(rec.points_for, mirror.points_against, 1e-9));
            assert_eq!(rec.meetings(), mirror.meetings());
        }
    }

    #[test]
    fn head_to_head_totals() {
        let matrix = build_matrix(&sample_log());
        let ab = matrix.get("a", "b").unwrap();
        assert_eq!((ab.wins, ab.losses, ab.ties), (2, 1, 1));
        assert!(approx_eq(ab.points_for, 451.0, 1e-9));
        assert!(approx_eq(ab.points_against, 441.5, 1e-9));
        assert_eq!(ab.games.len(), 4);
        assert!(ab.games[3].is_playoff);
        assert!(approx_eq(ab.games[1].points_for, 90.0, 1e-9));

        // a-b, b-a, a-c, c-a; the unresolved game adds nothing.
        assert_eq!(matrix.len(), 4);
        assert!(matrix.get("a", "z").is_none());
    }

    #[test]
    fn opponents_lists_row() {
        let matrix = build_matrix(&sample_log());
        let opps: Vec<&str> = matrix.opponents("a").map(|(o, _)| o).collect();
        assert_eq!(opps, vec!["b", "c"]);
    }

    #[test]
    fn serializes_as_entry_list() {
        let mut matrix = RivalryMatrix::new();
        matrix.record(&game(2024, 1, "a", 100.0, "b", 90.0));
        let json = serde_json::to_value(&matrix).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["franchise"], "a");
        assert_eq!(entries[0]["opponent"], "b");
        assert_eq!(entries[0]["wins"], 1);
        assert_eq!(entries[1]["losses"], 1);
    }
}
