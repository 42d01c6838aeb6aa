use crate::models::{
    LeagueError, MatchSlot, PlayerId, TournamentId, TournamentMatch, TournamentMatchId,
};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

const COLUMNS: &str = "id, tournament_id, round_num, match_num, player1_id, player2_id, \
    winner_id, score, best_of, played_at";

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<TournamentMatch> {
    Ok(TournamentMatch {
        id: row.get(0)?,
        tournament_id: row.get(1)?,
        round: row.get(2)?,
        match_num: row.get(3)?,
        player_1: row.get(4)?,
        player_2: row.get(5)?,
        winner: row.get(6)?,
        score: row.get(7)?,
        best_of: row.get(8)?,
        played_at: row.get(9)?,
    })
}

/// Persist one slot. Fails on a duplicate (tournament, round, match number).
pub fn insert(
    conn: &Connection,
    tournament_id: TournamentId,
    slot: &MatchSlot,
) -> Result<TournamentMatch, LeagueError> {
    let sql = format!(
        "INSERT INTO tournament_matches \
         (tournament_id, round_num, match_num, player1_id, player2_id, winner_id, score, best_of) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING {COLUMNS}"
    );
    Ok(conn.query_row(
        &sql,
        params![
            tournament_id,
            slot.round,
            slot.match_num,
            slot.player_1,
            slot.player_2,
            slot.winner,
            slot.score,
            slot.best_of
        ],
        parse_match_row,
    )?)
}

pub fn insert_all(
    conn: &Connection,
    tournament_id: TournamentId,
    slots: &[MatchSlot],
) -> Result<Vec<TournamentMatch>, LeagueError> {
    slots
        .iter()
        .map(|slot| insert(conn, tournament_id, slot))
        .collect()
}

pub fn find_by_id(
    conn: &Connection,
    id: TournamentMatchId,
) -> Result<Option<TournamentMatch>, LeagueError> {
    let sql = format!("SELECT {COLUMNS} FROM tournament_matches WHERE id = ?1");
    Ok(conn.query_row(&sql, params![id], parse_match_row).optional()?)
}

/// Whole bracket ordered by round, then match number.
pub fn list_for(
    conn: &Connection,
    tournament_id: TournamentId,
) -> Result<Vec<TournamentMatch>, LeagueError> {
    let sql = format!(
        "SELECT {COLUMNS} FROM tournament_matches WHERE tournament_id = ?1 \
         ORDER BY round_num, match_num"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![tournament_id], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// One round ordered by match number.
pub fn list_round(
    conn: &Connection,
    tournament_id: TournamentId,
    round: u32,
) -> Result<Vec<TournamentMatch>, LeagueError> {
    let sql = format!(
        "SELECT {COLUMNS} FROM tournament_matches WHERE tournament_id = ?1 AND round_num = ?2 \
         ORDER BY match_num"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![tournament_id, round], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Highest round generated so far, if any.
pub fn latest_round(
    conn: &Connection,
    tournament_id: TournamentId,
) -> Result<Option<u32>, LeagueError> {
    Ok(conn.query_row(
        "SELECT MAX(round_num) FROM tournament_matches WHERE tournament_id = ?1",
        params![tournament_id],
        |row| row.get(0),
    )?)
}

pub fn record_result(
    conn: &Connection,
    id: TournamentMatchId,
    winner: PlayerId,
    score: &str,
    played_at: DateTime<Utc>,
) -> Result<(), LeagueError> {
    let updated = conn.execute(
        "UPDATE tournament_matches SET winner_id = ?1, score = ?2, played_at = ?3 \
         WHERE id = ?4 AND winner_id IS NULL",
        params![winner, score, played_at, id],
    )?;
    if updated == 0 {
        return Err(LeagueError::MatchAlreadyDecided);
    }
    Ok(())
}

pub fn delete_all(conn: &Connection) -> Result<usize, LeagueError> {
    Ok(conn.execute("DELETE FROM tournament_matches", [])?)
}
