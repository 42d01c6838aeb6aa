//! Data structures for the league: players, matches, tournaments, config.

mod config;
mod error;
mod league_match;
mod player;
mod tournament;

pub use config::LeagueConfig;
pub use error::LeagueError;
pub use league_match::{LeagueMatch, MatchId};
pub use player::{Player, PlayerId, INITIAL_RATING};
pub use tournament::{
    MatchSlot, RankingEntry, Tournament, TournamentId, TournamentMatch, TournamentMatchId,
    TournamentPhase, TournamentSignup, BYE_SCORE, DEFAULT_BEST_OF, FINAL_BEST_OF,
};
