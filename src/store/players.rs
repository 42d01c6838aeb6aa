use crate::models::{LeagueError, Player, PlayerId, INITIAL_RATING};
use rusqlite::{params, Connection, OptionalExtension};

const COLUMNS: &str = "id, name, rating, wins, losses";

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        rating: row.get(2)?,
        wins: row.get(3)?,
        losses: row.get(4)?,
    })
}

pub fn insert(conn: &Connection, name: &str) -> Result<Player, LeagueError> {
    let sql = format!(
        "INSERT INTO players (name, rating, wins, losses) VALUES (?1, ?2, 0, 0) RETURNING {COLUMNS}"
    );
    Ok(conn.query_row(&sql, params![name, INITIAL_RATING], parse_player_row)?)
}

pub fn find_by_id(conn: &Connection, id: PlayerId) -> Result<Option<Player>, LeagueError> {
    let sql = format!("SELECT {COLUMNS} FROM players WHERE id = ?1");
    Ok(conn.query_row(&sql, params![id], parse_player_row).optional()?)
}

pub fn get(conn: &Connection, id: PlayerId) -> Result<Player, LeagueError> {
    find_by_id(conn, id)?.ok_or(LeagueError::PlayerNotFound(id))
}

/// Leaderboard order: rating descending, then name.
pub fn list_by_rating(conn: &Connection) -> Result<Vec<Player>, LeagueError> {
    let sql = format!("SELECT {COLUMNS} FROM players ORDER BY rating DESC, name ASC, id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Persist rating and win/loss counts.
pub fn update_standing(conn: &Connection, player: &Player) -> Result<(), LeagueError> {
    let updated = conn.execute(
        "UPDATE players SET rating = ?1, wins = ?2, losses = ?3 WHERE id = ?4",
        params![player.rating, player.wins, player.losses, player.id],
    )?;
    if updated == 0 {
        return Err(LeagueError::PlayerNotFound(player.id));
    }
    Ok(())
}

pub fn delete(conn: &Connection, id: PlayerId) -> Result<(), LeagueError> {
    let deleted = conn.execute("DELETE FROM players WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(LeagueError::PlayerNotFound(id));
    }
    Ok(())
}
