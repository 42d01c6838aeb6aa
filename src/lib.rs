//! Table-tennis league: Elo ladder plus single-elimination tournaments.

pub mod config;
pub mod logic;
pub mod models;
pub mod service;
pub mod store;

pub use config::Settings;
pub use logic::{
    advance, generate, rate, BracketSlotView, LeagueView, MatchSummary, NextRoundResult,
    RoundOutcome,
};
pub use models::{
    LeagueConfig, LeagueError, LeagueMatch, MatchId, MatchSlot, Player, PlayerId, RankingEntry,
    Tournament, TournamentId, TournamentMatch, TournamentMatchId, TournamentPhase,
    TournamentSignup, BYE_SCORE, DEFAULT_BEST_OF, FINAL_BEST_OF, INITIAL_RATING,
};
pub use service::League;
