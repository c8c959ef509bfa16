// Library root: the league analytics engine. Consumes an in-memory league
// snapshot and produces weekly power rankings plus cross-season history
// (Elo ratings, rivalries, records, career lines).

pub mod config;
pub mod error;
pub mod game;
pub mod history;
pub mod pipeline;
pub mod registry;
pub mod snapshot;
pub mod weekly;

pub use config::AnalyticsConfig;
pub use error::{EngineError, SkipKind, SkipReport};
pub use pipeline::{run, LeagueReport};
pub use snapshot::LeagueSnapshot;
