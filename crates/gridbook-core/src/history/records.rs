// All-time records book and regular-season streak tracking.
//
// One pass over the resolved game log keeps five running extrema, each with
// the game that produced it, plus per-franchise win/loss streak counters.
// A record only changes hands when strictly beaten, so the first game to
// reach a value keeps it.

use std::collections::HashMap;

use serde::Serialize;

use crate::game::{Game, GameSide, Outcome};
use crate::registry::{FranchiseId, FranchiseRegistry};

use super::GameLog;

// ---------------------------------------------------------------------------
// Record entries
// ---------------------------------------------------------------------------

/// One all-time superlative and the game behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordEntry {
    pub value: f64,
    pub season: u16,
    pub week: u32,
    /// Franchise credited with the record (the scoring or winning side;
    /// side A for game-level records).
    pub franchise: FranchiseId,
    pub franchise_name: String,
    pub opponent: FranchiseId,
    pub opponent_name: String,
    /// `"high-low"` with one decimal.
    pub score: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreakLeader {
    pub franchise: FranchiseId,
    pub franchise_name: String,
    pub length: u32,
    /// Season and week in which the streak first reached `length`.
    pub season: u16,
    pub week: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordsBook {
    pub highest_score: Option<RecordEntry>,
    pub lowest_winning_score: Option<RecordEntry>,
    pub biggest_margin: Option<RecordEntry>,
    pub highest_combined: Option<RecordEntry>,
    pub lowest_combined: Option<RecordEntry>,
    pub longest_win_streak: Option<StreakLeader>,
    pub longest_loss_streak: Option<StreakLeader>,
}

/// Per-franchise streak counters (regular season only).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreakState {
    pub current_win: u32,
    pub current_loss: u32,
    pub best_win: u32,
    pub best_loss: u32,
    /// (season, week) at which `best_win` was first reached.
    pub best_win_at: Option<(u16, u32)>,
    pub best_loss_at: Option<(u16, u32)>,
}

impl StreakState {
    /// A win extends the win run and clears the loss run; a loss mirrors it.
    /// Ties leave both runs untouched. A best only moves when strictly
    /// exceeded, so its timestamp marks when the value was first reached.
    pub fn apply(&mut self, outcome: Outcome, season: u16, week: u32) {
        match outcome {
            Outcome::Win => {
                self.current_win += 1;
                self.current_loss = 0;
                if self.current_win > self.best_win {
                    self.best_win = self.current_win;
                    self.best_win_at = Some((season, week));
                }
            }
            Outcome::Loss => {
                self.current_loss += 1;
                self.current_win = 0;
                if self.current_loss > self.best_loss {
                    self.best_loss = self.current_loss;
                    self.best_loss_at = Some((season, week));
                }
            }
            Outcome::Tie => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// Keep `slot` if it already beats `value`, otherwise replace it.
fn offer(
    slot: &mut Option<RecordEntry>,
    value: f64,
    beats: impl Fn(f64, f64) -> bool,
    entry: impl FnOnce() -> RecordEntry,
) {
    let replace = match slot {
        None => true,
        Some(current) => beats(value, current.value),
    };
    if replace {
        let mut e = entry();
        e.value = value;
        *slot = Some(e);
    }
}

pub struct RecordsTracker<'a> {
    registry: &'a FranchiseRegistry,
    book: RecordsBook,
    streaks: HashMap<FranchiseId, StreakState>,
    /// Franchises in first-encountered order. Breaks leader ties that were
    /// reached in the same week.
    order: Vec<FranchiseId>,
}

impl<'a> RecordsTracker<'a> {
    pub fn new(registry: &'a FranchiseRegistry) -> Self {
        RecordsTracker {
            registry,
            book: RecordsBook::default(),
            streaks: HashMap::new(),
            order: Vec::new(),
        }
    }

    fn entry_for(&self, game: &Game, holder: &str, opponent: &str) -> RecordEntry {
        RecordEntry {
            value: 0.0,
            season: game.season,
            week: game.week,
            franchise: holder.to_string(),
            franchise_name: self.registry.label_for(holder).to_string(),
            opponent: opponent.to_string(),
            opponent_name: self.registry.label_for(opponent).to_string(),
            score: game.score_line(),
        }
    }

    fn streak_mut(&mut self, franchise: &str) -> &mut StreakState {
        if !self.streaks.contains_key(franchise) {
            self.order.push(franchise.to_string());
        }
        self.streaks.entry(franchise.to_string()).or_default()
    }

    /// Fold one game in. Unresolved games are ignored.
    pub fn observe(&mut self, game: &Game) {
        let Some((a, b)) = game.participants() else {
            return;
        };

        let sides: [(&GameSide, &str, &str); 2] =
            [(&game.side_a, a, b), (&game.side_b, b, a)];
        for (side, own, other) in sides {
            let entry = self.entry_for(game, own, other);
            offer(&mut self.book.highest_score, side.points, |v, c| v > c, || entry);
        }

        let (holder, other, winning_points) = match game.outcome_a() {
            Outcome::Win => (a, b, Some(game.side_a.points)),
            Outcome::Loss => (b, a, Some(game.side_b.points)),
            Outcome::Tie => (a, b, None),
        };
        if let Some(points) = winning_points {
            let entry = self.entry_for(game, holder, other);
            offer(&mut self.book.lowest_winning_score, points, |v, c| v < c, || entry);
        }
        let entry = self.entry_for(game, holder, other);
        offer(&mut self.book.biggest_margin, game.margin(), |v, c| v > c, || entry);

        let combined = game.combined();
        let entry = self.entry_for(game, a, b);
        offer(&mut self.book.highest_combined, combined, |v, c| v > c, || entry);
        if combined > 0.0 {
            let entry = self.entry_for(game, a, b);
            offer(&mut self.book.lowest_combined, combined, |v, c| v < c, || entry);
        }

        if !game.is_playoff {
            let (season, week) = (game.season, game.week);
            self.streak_mut(a).apply(game.outcome_a(), season, week);
            self.streak_mut(b).apply(game.outcome_b(), season, week);
        }
    }

    pub fn streaks(&self) -> &HashMap<FranchiseId, StreakState> {
        &self.streaks
    }

    /// Longest streak under `pick`; among equal lengths the franchise that
    /// reached it earliest leads.
    fn leader(
        &self,
        pick: impl Fn(&StreakState) -> (u32, Option<(u16, u32)>),
    ) -> Option<StreakLeader> {
        let mut best: Option<StreakLeader> = None;
        for id in &self.order {
            let (len, reached) = pick(&self.streaks[id]);
            let Some((season, week)) = reached.filter(|_| len > 0) else {
                continue;
            };
            let better = match &best {
                None => true,
                Some(b) => len > b.length || (len == b.length && (season, week) < (b.season, b.week)),
            };
            if better {
                best = Some(StreakLeader {
                    franchise: id.clone(),
                    franchise_name: self.registry.label_for(id).to_string(),
                    length: len,
                    season,
                    week,
                });
            }
        }
        best
    }

    /// Close the pass: fill in the streak leaders and hand back the book
    /// along with every franchise's streak state.
    pub fn finish(mut self) -> (RecordsBook, HashMap<FranchiseId, StreakState>) {
        self.book.longest_win_streak = self.leader(|s| (s.best_win, s.best_win_at));
        self.book.longest_loss_streak = self.leader(|s| (s.best_loss, s.best_loss_at));
        (self.book, self.streaks)
    }
}

/// Run every resolved game through a fresh tracker.
pub fn compute_records(
    log: &GameLog,
    registry: &FranchiseRegistry,
) -> (RecordsBook, HashMap<FranchiseId, StreakState>) {
    let mut tracker = RecordsTracker::new(registry);
    for (game, _, _) in log.resolved() {
        tracker.observe(game);
    }
    tracker.finish()
}
