//! A completed league game with its rating snapshots.

use crate::models::player::PlayerId;
use crate::models::tournament::TournamentMatchId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row id of a league match.
pub type MatchId = i64;

/// Immutable record of one league game. The pre/post snapshots are what
/// removal reverses; the Elo formula is never re-run for that.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeagueMatch {
    pub id: MatchId,
    pub winner_id: PlayerId,
    pub loser_id: PlayerId,
    pub score: String,
    pub played_at: DateTime<Utc>,
    pub winner_pre_rating: i32,
    pub loser_pre_rating: i32,
    pub winner_post_rating: i32,
    pub loser_post_rating: i32,
    /// Bracket slot this game decided, if it was a tournament match.
    pub tournament_match_id: Option<TournamentMatchId>,
}

impl LeagueMatch {
    pub fn winner_delta(&self) -> i32 {
        self.winner_post_rating - self.winner_pre_rating
    }

    pub fn loser_delta(&self) -> i32 {
        self.loser_post_rating - self.loser_pre_rating
    }
}
