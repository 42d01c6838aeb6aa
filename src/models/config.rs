//! League-wide state: admin note, tournament phase and the current tournament.

use crate::models::tournament::{TournamentId, TournamentPhase};
use serde::{Deserialize, Serialize};

/// The one configuration record of the league. Loaded at the start of every
/// store transaction and saved before it commits.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeagueConfig {
    #[serde(skip)]
    pub row_id: i64,
    pub note: String,
    pub phase: TournamentPhase,
    /// Tournament the phase refers to. None before the first signup phase
    /// and after an abandon.
    pub current_tournament_id: Option<TournamentId>,
}
