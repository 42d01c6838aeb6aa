//! Player and the league-standing view of a player.

use serde::{Deserialize, Serialize};

/// Row id of a player in the store.
pub type PlayerId = i64;

/// Rating every new player starts with.
pub const INITIAL_RATING: i32 = 1200;

/// A league member. Rating and win/loss counts only move through recorded
/// results (or their reversal).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub rating: i32,
    pub wins: u32,
    pub losses: u32,
}

impl Player {
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses
    }

    /// Active players have at least one recorded result.
    pub fn is_active(&self) -> bool {
        self.games_played() > 0
    }

    /// Apply a win with the post-match rating.
    pub fn record_win(&mut self, new_rating: i32) {
        self.rating = new_rating;
        self.wins += 1;
    }

    /// Apply a loss with the post-match rating.
    pub fn record_loss(&mut self, new_rating: i32) {
        self.rating = new_rating;
        self.losses += 1;
    }

    /// Undo a win that moved the rating by `delta`.
    pub fn revert_win(&mut self, delta: i32) {
        self.rating -= delta;
        self.wins = self.wins.saturating_sub(1);
    }

    /// Undo a loss that moved the rating by `delta`.
    pub fn revert_loss(&mut self, delta: i32) {
        self.rating -= delta;
        self.losses = self.losses.saturating_sub(1);
    }
}
