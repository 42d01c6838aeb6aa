use crate::models::{LeagueError, PlayerId, TournamentId, TournamentSignup};
use rusqlite::{params, Connection};

/// Register a player. Returns false when the player was already signed up.
pub fn insert(
    conn: &Connection,
    tournament_id: TournamentId,
    player_id: PlayerId,
) -> Result<bool, LeagueError> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO tournament_signups (tournament_id, player_id) VALUES (?1, ?2)",
        params![tournament_id, player_id],
    )?;
    Ok(inserted > 0)
}

/// Signups in registration order.
pub fn list_for(
    conn: &Connection,
    tournament_id: TournamentId,
) -> Result<Vec<TournamentSignup>, LeagueError> {
    let mut stmt = conn.prepare(
        "SELECT tournament_id, player_id FROM tournament_signups \
         WHERE tournament_id = ?1 ORDER BY id",
    )?;
    let rows = stmt
        .query_map(params![tournament_id], |row| {
            Ok(TournamentSignup {
                tournament_id: row.get(0)?,
                player_id: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

pub fn delete_all(conn: &Connection) -> Result<usize, LeagueError> {
    Ok(conn.execute("DELETE FROM tournament_signups", [])?)
}

pub fn delete_for_player(conn: &Connection, player_id: PlayerId) -> Result<usize, LeagueError> {
    Ok(conn.execute(
        "DELETE FROM tournament_signups WHERE player_id = ?1",
        params![player_id],
    )?)
}
