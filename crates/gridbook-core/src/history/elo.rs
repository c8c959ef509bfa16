// Elo rating engine with margin-of-victory weighting and season-boundary
// regression toward the initial rating.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::config::EloConfig;
use crate::game::Game;
use crate::registry::FranchiseId;

use super::GameLog;

/// Rating after one game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingPoint {
    pub season: u16,
    pub week: u32,
    pub rating: f64,
}

/// One franchise's evolving rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingState {
    pub rating: f64,
    /// Highest post-game rating reached.
    pub peak: f64,
    pub history: Vec<RatingPoint>,
}

impl RatingState {
    fn new(initial: f64) -> Self {
        RatingState {
            rating: initial,
            peak: initial,
            history: Vec::new(),
        }
    }

    fn record(&mut self, season: u16, week: u32, rating: f64) {
        self.peak = if self.history.is_empty() {
            rating
        } else {
            self.peak.max(rating)
        };
        self.rating = rating;
        self.history.push(RatingPoint {
            season,
            week,
            rating,
        });
    }
}

/// Expected score of A against B: `1 / (1 + 10^((R_B - R_A) / 400))`.
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / 400.0))
}

/// Rating engine state for one pass over the game log.
#[derive(Debug, Clone)]
pub struct EloEngine {
    config: EloConfig,
    ratings: BTreeMap<FranchiseId, RatingState>,
    current_season: Option<u16>,
}

impl EloEngine {
    pub fn new(config: EloConfig) -> Self {
        EloEngine {
            config,
            ratings: BTreeMap::new(),
            current_season: None,
        }
    }

    /// Current rating; unseen franchises sit at the initial rating.
    pub fn rating(&self, franchise: &str) -> f64 {
        self.ratings
            .get(franchise)
            .map(|s| s.rating)
            .unwrap_or(self.config.initial_rating)
    }

    /// `max(1, sqrt(margin / divisor))`.
    pub fn margin_multiplier(&self, margin: f64) -> f64 {
        (margin.abs() / self.config.margin_divisor).sqrt().max(1.0)
    }

    /// Regress every existing rating toward the initial rating.
    fn regress_all(&mut self) {
        let initial = self.config.initial_rating;
        let fraction = self.config.season_regression;
        for state in self.ratings.values_mut() {
            state.rating += fraction * (initial - state.rating);
        }
    }

    /// Process one game. Returns the (A, B) rating deltas, or `None` when a
    /// participant is unresolved.
    pub fn process(&mut self, game: &Game) -> Option<(f64, f64)> {
        if self.current_season != Some(game.season) {
            if self.current_season.is_some() {
                debug!("season {} begins, regressing {} rating(s)", game.season, self.ratings.len());
                self.regress_all();
            }
            self.current_season = Some(game.season);
        }

        let (a, b) = game.participants()?;
        let ra = self.rating(a);
        let rb = self.rating(b);

        let expected_a = expected_score(ra, rb);
        let actual_a = game.outcome_a().score();
        let k = self.config.k_factor * self.margin_multiplier(game.margin());

        let delta_a = k * (actual_a - expected_a);
        let delta_b = k * ((1.0 - actual_a) - (1.0 - expected_a));

        let initial = self.config.initial_rating;
        self.ratings
            .entry(a.to_string())
            .or_insert_with(|| RatingState::new(initial))
            .record(game.season, game.week, ra + delta_a);
        self.ratings
            .entry(b.to_string())
            .or_insert_with(|| RatingState::new(initial))
            .record(game.season, game.week, rb + delta_b);

        Some((delta_a, delta_b))
    }

    pub fn into_ratings(self) -> BTreeMap<FranchiseId, RatingState> {
        self.ratings
    }
}

/// Run the whole log through a fresh engine.
pub fn compute_ratings(log: &GameLog, config: &EloConfig) -> BTreeMap<FranchiseId, RatingState> {
    let mut engine = EloEngine::new(*config);
    for game in log.games() {
        engine.process(game);
    }
    engine.into_ratings()
}
