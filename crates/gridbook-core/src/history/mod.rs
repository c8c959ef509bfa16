// Cross-season history: the chronological game log and the stages that
// consume it (Elo ratings, rivalry matrix, records, career lines).

pub mod career;
pub mod elo;
pub mod records;
pub mod rivalry;

use tracing::{debug, warn};

use crate::error::{SkipKind, SkipReport};
use crate::game::{Game, GameSide};
use crate::registry::FranchiseRegistry;
use crate::weekly::{MatchupTeam, SeasonReport};

/// Every game of every processed week, ordered by (season, week).
#[derive(Debug, Clone, Default)]
pub struct GameLog {
    games: Vec<Game>,
}

impl GameLog {
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Games whose two participants both resolved to franchises.
    pub fn resolved(&self) -> impl Iterator<Item = (&Game, &str, &str)> {
        self.games
            .iter()
            .filter_map(|g| g.participants().map(|(a, b)| (g, a, b)))
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// Flatten season reports into one chronological log.
///
/// Games with an unresolvable participant stay in the log (they are still
/// raw results) but are counted once here and ignored by every stage.
pub fn build_game_log(
    seasons: &[SeasonReport],
    registry: &FranchiseRegistry,
    skips: &mut SkipReport,
) -> GameLog {
    let mut games = Vec::new();
    for season in seasons {
        for week in &season.weeks {
            for m in &week.matchups {
                let side = |team: &MatchupTeam| GameSide {
                    roster_id: team.roster_id,
                    franchise: registry
                        .resolve(season.season, team.roster_id)
                        .map(str::to_string),
                    points: team.points,
                };
                let game = Game {
                    season: season.season,
                    week: week.week,
                    is_playoff: week.is_playoff,
                    side_a: side(&m.team1),
                    side_b: side(&m.team2),
                    winner: m.winner,
                };
                if game.participants().is_none() {
                    warn!(
                        "season {} week {}: pairing {} has an unresolvable roster, excluding from history",
                        season.season, week.week, m.matchup_id
                    );
                    skips.record(SkipKind::UnresolvableFranchise);
                }
                games.push(game);
            }
        }
    }

    games.sort_by_key(|g| (g.season, g.week));
    debug!("game log holds {} game(s)", games.len());
    GameLog { games }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::game::{Game, GameSide};

    /// Build a resolved game; roster ids are 1 (side A) and 2 (side B).
    pub fn game(season: u16, week: u32, a: &str, pa: f64, b: &str, pb: f64) -> Game {
        let winner = if pa > pb {
            Some(1)
        } else if pb > pa {
            Some(2)
        } else {
            None
        };
        Game {
            season,
            week,
            is_playoff: false,
            side_a: GameSide {
                roster_id: 1,
                franchise: Some(a.to_string()),
                points: pa,
            },
            side_b: GameSide {
                roster_id: 2,
                franchise: Some(b.to_string()),
                points: pb,
            },
            winner,
        }
    }

    pub fn playoff(mut g: Game) -> Game {
        g.is_playoff = true;
        g
    }

    pub fn unresolved(mut g: Game) -> Game {
        g.side_b.franchise = None;
        g
    }
}
