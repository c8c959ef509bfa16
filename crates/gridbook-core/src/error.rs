// Error types and non-fatal skip accounting.
//
// Bad input rows never abort a run: they are logged and counted in a
// `SkipReport`. Only a snapshot with no usable season data is fatal.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no season data available: missing {missing}")]
    NoSeasonData { missing: String },
}

/// Category of a skipped input row or halted season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SkipKind {
    /// A week carried no positive score; the season stopped advancing there.
    MissingData,
    /// A pairing id did not group exactly two sides.
    MalformedPairing,
    /// A participant's roster slot did not resolve to a franchise.
    UnresolvableFranchise,
}

/// Counts of everything the engine skipped during one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipReport {
    pub missing_data: usize,
    pub malformed_pairings: usize,
    pub unresolvable_franchises: usize,
}

impl SkipReport {
    pub fn record(&mut self, kind: SkipKind) {
        match kind {
            SkipKind::MissingData => self.missing_data += 1,
            SkipKind::MalformedPairing => self.malformed_pairings += 1,
            SkipKind::UnresolvableFranchise => self.unresolvable_franchises += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.missing_data + self.malformed_pairings + self.unresolvable_franchises
    }
}
