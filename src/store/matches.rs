use crate::models::{LeagueError, LeagueMatch, MatchId, PlayerId};
use rusqlite::{params, Connection, OptionalExtension};

const COLUMNS: &str = "id, winner_id, loser_id, score, played_at, \
    winner_pre_rating, loser_pre_rating, winner_post_rating, loser_post_rating, \
    tournament_match_id";

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<LeagueMatch> {
    Ok(LeagueMatch {
        id: row.get(0)?,
        winner_id: row.get(1)?,
        loser_id: row.get(2)?,
        score: row.get(3)?,
        played_at: row.get(4)?,
        winner_pre_rating: row.get(5)?,
        loser_pre_rating: row.get(6)?,
        winner_post_rating: row.get(7)?,
        loser_post_rating: row.get(8)?,
        tournament_match_id: row.get(9)?,
    })
}

/// Insert a record; the id on `record` is ignored and the stored row returned.
pub fn insert(conn: &Connection, record: &LeagueMatch) -> Result<LeagueMatch, LeagueError> {
    let sql = format!(
        "INSERT INTO matches (winner_id, loser_id, score, played_at, \
         winner_pre_rating, loser_pre_rating, winner_post_rating, loser_post_rating, \
         tournament_match_id) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) RETURNING {COLUMNS}"
    );
    Ok(conn.query_row(
        &sql,
        params![
            record.winner_id,
            record.loser_id,
            record.score,
            record.played_at,
            record.winner_pre_rating,
            record.loser_pre_rating,
            record.winner_post_rating,
            record.loser_post_rating,
            record.tournament_match_id
        ],
        parse_match_row,
    )?)
}

pub fn find_by_id(conn: &Connection, id: MatchId) -> Result<Option<LeagueMatch>, LeagueError> {
    let sql = format!("SELECT {COLUMNS} FROM matches WHERE id = ?1");
    Ok(conn.query_row(&sql, params![id], parse_match_row).optional()?)
}

pub fn get(conn: &Connection, id: MatchId) -> Result<LeagueMatch, LeagueError> {
    find_by_id(conn, id)?.ok_or(LeagueError::MatchNotFound(id))
}

/// Most recent first.
pub fn list_recent(conn: &Connection, limit: usize) -> Result<Vec<LeagueMatch>, LeagueError> {
    let sql =
        format!("SELECT {COLUMNS} FROM matches ORDER BY played_at DESC, id DESC LIMIT ?1");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![limit as i64], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

pub fn delete(conn: &Connection, id: MatchId) -> Result<(), LeagueError> {
    let deleted = conn.execute("DELETE FROM matches WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(LeagueError::MatchNotFound(id));
    }
    Ok(())
}

/// Delete every match the player won or lost. Returns how many rows went.
pub fn delete_involving(conn: &Connection, player_id: PlayerId) -> Result<usize, LeagueError> {
    Ok(conn.execute(
        "DELETE FROM matches WHERE winner_id = ?1 OR loser_id = ?1",
        params![player_id],
    )?)
}
