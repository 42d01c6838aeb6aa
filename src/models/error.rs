//! Error taxonomy shared by every league operation.

use crate::models::league_match::MatchId;
use crate::models::player::PlayerId;
use crate::models::tournament::{TournamentId, TournamentMatchId, TournamentPhase};

/// Errors that can occur during league and tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LeagueError {
    PlayerNotFound(PlayerId),
    /// League match id unresolved.
    MatchNotFound(MatchId),
    TournamentMatchNotFound(TournamentMatchId),
    TournamentNotFound(TournamentId),
    /// Operation is not legal in the current phase.
    InvalidTransition {
        action: &'static str,
        phase: TournamentPhase,
    },
    /// Signups are only accepted during the signup phase.
    SignupClosed,
    /// A bracket needs at least two players.
    InsufficientPlayers { found: usize },
    /// Submitted winner is neither side of the match.
    InvalidWinner,
    MatchAlreadyDecided,
    ByeMatchCannotBeLogged,
    /// Round holds no winners to advance.
    EmptyRound,
    InvalidInput(String),
    /// Submitted admin secret did not match.
    Unauthorized,
    /// Store was opened without its configuration record.
    ConfigMissing,
    Storage(String),
    /// Standings could not be rendered.
    Export(String),
}

impl LeagueError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LeagueError::PlayerNotFound(_)
                | LeagueError::MatchNotFound(_)
                | LeagueError::TournamentMatchNotFound(_)
                | LeagueError::TournamentNotFound(_)
        )
    }
}

impl std::fmt::Display for LeagueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueError::PlayerNotFound(id) => write!(f, "Player {} not found", id),
            LeagueError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            LeagueError::TournamentMatchNotFound(id) => {
                write!(f, "Tournament match {} not found", id)
            }
            LeagueError::TournamentNotFound(id) => write!(f, "Tournament {} not found", id),
            LeagueError::InvalidTransition { action, phase } => {
                write!(f, "Cannot {} while tournament phase is {}", action, phase)
            }
            LeagueError::SignupClosed => write!(f, "Tournament signup is closed"),
            LeagueError::InsufficientPlayers { found } => {
                write!(f, "Need at least 2 players to start (found {})", found)
            }
            LeagueError::InvalidWinner => write!(f, "Winner must be one of the match players"),
            LeagueError::MatchAlreadyDecided => write!(f, "Match already has a winner"),
            LeagueError::ByeMatchCannotBeLogged => write!(f, "A bye cannot be logged"),
            LeagueError::EmptyRound => write!(f, "Round has no winners to advance"),
            LeagueError::InvalidInput(reason) => write!(f, "Invalid input: {}", reason),
            LeagueError::Unauthorized => write!(f, "Unauthorized: incorrect admin password"),
            LeagueError::ConfigMissing => write!(f, "League configuration is missing"),
            LeagueError::Storage(msg) => write!(f, "Storage error: {}", msg),
            LeagueError::Export(msg) => write!(f, "Export error: {}", msg),
        }
    }
}

impl std::error::Error for LeagueError {}

impl From<rusqlite::Error> for LeagueError {
    fn from(e: rusqlite::Error) -> Self {
        LeagueError::Storage(e.to_string())
    }
}

impl From<csv::Error> for LeagueError {
    fn from(e: csv::Error) -> Self {
        LeagueError::Export(e.to_string())
    }
}

impl From<r2d2::Error> for LeagueError {
    fn from(e: r2d2::Error) -> Self {
        LeagueError::Storage(e.to_string())
    }
}
