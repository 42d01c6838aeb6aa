//! CSV export of the leaderboard.

use crate::models::{LeagueError, Player};
use serde::Serialize;

#[derive(Serialize)]
struct StandingRow<'a> {
    rank: usize,
    name: &'a str,
    rating: i32,
    wins: u32,
    losses: u32,
}

/// `rank,name,rating,wins,losses` for players already in leaderboard order.
pub fn standings_csv(players: &[Player]) -> Result<String, LeagueError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(["rank", "name", "rating", "wins", "losses"])?;
    for (i, player) in players.iter().enumerate() {
        writer.serialize(StandingRow {
            rank: i + 1,
            name: &player.name,
            rating: player.rating,
            wins: player.wins,
            losses: player.losses,
        })?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| LeagueError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| LeagueError::Export(e.to_string()))
}
