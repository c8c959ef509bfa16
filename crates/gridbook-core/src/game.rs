// Resolved games: the unit shared by every cross-season stage.

use serde::Serialize;

use crate::registry::FranchiseId;
use crate::snapshot::RosterId;

/// Result of a game from one participant's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
}

impl Outcome {
    /// Outcome for the side scoring `own` against `other`. Equal points tie.
    pub fn from_points(own: f64, other: f64) -> Self {
        if own > other {
            Outcome::Win
        } else if other > own {
            Outcome::Loss
        } else {
            Outcome::Tie
        }
    }

    /// Elo actual score: 1 for a win, 0 for a loss, 0.5 for a tie.
    pub fn score(&self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Loss => 0.0,
            Outcome::Tie => 0.5,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Outcome::Win => 'W',
            Outcome::Loss => 'L',
            Outcome::Tie => 'T',
        }
    }
}

/// One participant of a game.
#[derive(Debug, Clone, Serialize)]
pub struct GameSide {
    pub roster_id: RosterId,
    /// `None` when the roster slot did not resolve to a franchise.
    pub franchise: Option<FranchiseId>,
    pub points: f64,
}

/// One matchup between two franchises in a season/week. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct Game {
    pub season: u16,
    pub week: u32,
    pub is_playoff: bool,
    pub side_a: GameSide,
    pub side_b: GameSide,
    /// Winning roster id, or `None` for a tie.
    pub winner: Option<RosterId>,
}

impl Game {
    /// Both franchise ids, or `None` if either side is unresolved.
    pub fn participants(&self) -> Option<(&str, &str)> {
        match (&self.side_a.franchise, &self.side_b.franchise) {
            (Some(a), Some(b)) => Some((a.as_str(), b.as_str())),
            _ => None,
        }
    }

    /// Outcome for side A according to the recorded winner.
    pub fn outcome_a(&self) -> Outcome {
        match self.winner {
            Some(w) if w == self.side_a.roster_id => Outcome::Win,
            Some(_) => Outcome::Loss,
            None => Outcome::Tie,
        }
    }

    pub fn outcome_b(&self) -> Outcome {
        match self.outcome_a() {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
            Outcome::Tie => Outcome::Tie,
        }
    }

    pub fn margin(&self) -> f64 {
        (self.side_a.points - self.side_b.points).abs()
    }

    pub fn combined(&self) -> f64 {
        self.side_a.points + self.side_b.points
    }

    /// The winning side, if the game was not a tie.
    pub fn winning_side(&self) -> Option<&GameSide> {
        match self.outcome_a() {
            Outcome::Win => Some(&self.side_a),
            Outcome::Loss => Some(&self.side_b),
            Outcome::Tie => None,
        }
    }

    /// Score as `"high-low"` with one decimal.
    pub fn score_line(&self) -> String {
        score_line(self.side_a.points, self.side_b.points)
    }
}

/// Format two scores as `"high-low"` with one decimal each.
pub fn score_line(p1: f64, p2: f64) -> String {
    format!("{:.1}-{:.1}", p1.max(p2), p1.min(p2))
}
