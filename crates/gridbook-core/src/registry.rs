// Franchise registry: stable owner identities across seasons.
//
// Roster slot numbers are reassigned between seasons, so every cross-season
// stage resolves `(season, roster_id)` through this registry.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::{debug, warn};

use crate::snapshot::{RosterEntry, RosterId};

/// Owner id that identifies a franchise.
pub type FranchiseId = String;

/// Display name used when a roster entry carries none.
const UNKNOWN_NAME: &str = "Unknown";

/// A league member's persistent identity.
#[derive(Debug, Clone, Serialize)]
pub struct Franchise {
    pub owner_id: FranchiseId,
    /// Latest display name seen.
    pub display_name: String,
    /// Latest team name seen.
    pub team_name: String,
    /// Season -> roster slot held that season.
    pub roster_ids: BTreeMap<u16, RosterId>,
}

impl Franchise {
    pub fn seasons_played(&self) -> usize {
        self.roster_ids.len()
    }

    /// Team name when set, otherwise the display name.
    pub fn label(&self) -> &str {
        if self.team_name.is_empty() {
            &self.display_name
        } else {
            &self.team_name
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FranchiseRegistry {
    franchises: BTreeMap<FranchiseId, Franchise>,
    slots: HashMap<(u16, RosterId), FranchiseId>,
}

impl FranchiseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one season's roster map.
    ///
    /// A franchise is created the first time its owner id appears and its
    /// name fields are overwritten on every later encounter. Orphaned slots
    /// (no owner id) are left unresolved.
    pub fn register_season(&mut self, season: u16, rosters: &[RosterEntry]) {
        for entry in rosters {
            let owner_id = entry.owner_id.trim();
            if owner_id.is_empty() {
                warn!(
                    "season {}: roster {} has no owner, leaving slot unresolved",
                    season, entry.roster_id
                );
                continue;
            }

            let display_name = if entry.display_name.trim().is_empty() {
                UNKNOWN_NAME.to_string()
            } else {
                entry.display_name.trim().to_string()
            };
            let team_name = entry.team_name.trim().to_string();

            let franchise = self
                .franchises
                .entry(owner_id.to_string())
                .or_insert_with(|| {
                    debug!("new franchise '{}' in season {}", owner_id, season);
                    Franchise {
                        owner_id: owner_id.to_string(),
                        display_name: display_name.clone(),
                        team_name: team_name.clone(),
                        roster_ids: BTreeMap::new(),
                    }
                });
            franchise.display_name = display_name;
            franchise.team_name = team_name;
            franchise.roster_ids.insert(season, entry.roster_id);

            self.slots
                .insert((season, entry.roster_id), owner_id.to_string());
        }
    }

    /// Resolve a season's roster slot to its franchise id.
    pub fn resolve(&self, season: u16, roster_id: RosterId) -> Option<&str> {
        self.slots.get(&(season, roster_id)).map(String::as_str)
    }

    pub fn get(&self, owner_id: &str) -> Option<&Franchise> {
        self.franchises.get(owner_id)
    }

    /// Human-readable label for a franchise id, falling back to the id itself.
    pub fn label_for<'a>(&'a self, owner_id: &'a str) -> &'a str {
        self.franchises
            .get(owner_id)
            .map(Franchise::label)
            .unwrap_or(owner_id)
    }

    /// All franchises, ordered by owner id.
    pub fn franchises(&self) -> impl Iterator<Item = &Franchise> {
        self.franchises.values()
    }

    pub fn len(&self) -> usize {
        self.franchises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.franchises.is_empty()
    }
}
