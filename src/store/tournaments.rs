use crate::models::{LeagueError, PlayerId, RankingEntry, Tournament, TournamentId};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

const COLUMNS: &str = "id, started_at, ended_at, champion_id, final_rankings";

fn parse_tournament_row(row: &rusqlite::Row) -> rusqlite::Result<Tournament> {
    let rankings: Option<String> = row.get(4)?;
    let final_rankings = rankings
        .map(|json| serde_json::from_str::<Vec<RankingEntry>>(&json))
        .transpose()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;
    Ok(Tournament {
        id: row.get(0)?,
        started_at: row.get(1)?,
        ended_at: row.get(2)?,
        champion_id: row.get(3)?,
        final_rankings,
    })
}

pub fn insert(conn: &Connection, started_at: DateTime<Utc>) -> Result<Tournament, LeagueError> {
    let sql = format!("INSERT INTO tournaments (started_at) VALUES (?1) RETURNING {COLUMNS}");
    Ok(conn.query_row(&sql, params![started_at], parse_tournament_row)?)
}

pub fn find_by_id(conn: &Connection, id: TournamentId) -> Result<Option<Tournament>, LeagueError> {
    let sql = format!("SELECT {COLUMNS} FROM tournaments WHERE id = ?1");
    Ok(conn.query_row(&sql, params![id], parse_tournament_row).optional()?)
}

pub fn get(conn: &Connection, id: TournamentId) -> Result<Tournament, LeagueError> {
    find_by_id(conn, id)?.ok_or(LeagueError::TournamentNotFound(id))
}

/// Newest first.
pub fn list_all(conn: &Connection) -> Result<Vec<Tournament>, LeagueError> {
    let sql = format!("SELECT {COLUMNS} FROM tournaments ORDER BY id DESC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_tournament_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Persist end date, champion and rankings.
pub fn update_outcome(conn: &Connection, tournament: &Tournament) -> Result<(), LeagueError> {
    let rankings = tournament
        .final_rankings
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| LeagueError::Storage(e.to_string()))?;
    let updated = conn.execute(
        "UPDATE tournaments SET ended_at = ?1, champion_id = ?2, final_rankings = ?3 WHERE id = ?4",
        params![
            tournament.ended_at,
            tournament.champion_id,
            rankings,
            tournament.id
        ],
    )?;
    if updated == 0 {
        return Err(LeagueError::TournamentNotFound(tournament.id));
    }
    Ok(())
}

/// Forget a removed player as champion of past tournaments.
pub fn clear_champion(conn: &Connection, player_id: PlayerId) -> Result<usize, LeagueError> {
    Ok(conn.execute(
        "UPDATE tournaments SET champion_id = NULL WHERE champion_id = ?1",
        params![player_id],
    )?)
}
