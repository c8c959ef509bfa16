// Engine tunables: power-score weights, Elo parameters, report sizes.
//
// Every struct deserializes with `#[serde(default)]` so a config file only
// needs to name the values it overrides.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Power rankings
// ---------------------------------------------------------------------------

/// Weights for the four power-score components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerWeights {
    pub win_pct: f64,
    pub points_for: f64,
    pub recent_form: f64,
    pub schedule: f64,
}

impl Default for PowerWeights {
    fn default() -> Self {
        PowerWeights {
            win_pct: 0.40,
            points_for: 0.30,
            recent_form: 0.20,
            schedule: 0.10,
        }
    }
}

impl PowerWeights {
    pub fn total(&self) -> f64 {
        self.win_pct + self.points_for + self.recent_form + self.schedule
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerConfig {
    pub weights: PowerWeights,
    /// Number of trailing weeks averaged for the recent-form factor.
    pub recent_window: usize,
}

impl Default for PowerConfig {
    fn default() -> Self {
        PowerConfig {
            weights: PowerWeights::default(),
            recent_window: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Elo
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EloConfig {
    /// Rating assigned to a franchise before its first game.
    pub initial_rating: f64,
    /// Base K-factor before the margin multiplier.
    pub k_factor: f64,
    /// Fraction of the distance to `initial_rating` removed at each season boundary.
    pub season_regression: f64,
    /// Points of margin that correspond to a multiplier of 1.0.
    pub margin_divisor: f64,
}

impl Default for EloConfig {
    fn default() -> Self {
        EloConfig {
            initial_rating: 1500.0,
            k_factor: 32.0,
            season_regression: 0.15,
            margin_divisor: 20.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Report sizes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub top_performers: usize,
    pub bottom_performers: usize,
    /// Starters listed per side of each matchup.
    pub top_starters: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            top_performers: 10,
            bottom_performers: 3,
            top_starters: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// Assembled config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub power: PowerConfig,
    pub elo: EloConfig,
    pub report: ReportConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        let w = PowerWeights::default();
        assert!((w.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg: AnalyticsConfig =
            serde_json::from_str(r#"{"elo": {"k_factor": 24.0}}"#).unwrap();
        assert!((cfg.elo.k_factor - 24.0).abs() < f64::EPSILON);
        assert!((cfg.elo.initial_rating - 1500.0).abs() < f64::EPSILON);
        assert_eq!(cfg.power.recent_window, 3);
        assert_eq!(cfg.report.top_performers, 10);
    }
}
