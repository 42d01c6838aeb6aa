use crate::models::{LeagueConfig, LeagueError, TournamentPhase};
use rusqlite::{params, Connection, OptionalExtension};

const SELECT_CONFIG: &str =
    "SELECT id, note, phase, current_tournament_id FROM league_config ORDER BY id LIMIT 1";

fn parse_config_row(row: &rusqlite::Row) -> rusqlite::Result<LeagueConfig> {
    let code: i64 = row.get(2)?;
    let phase =
        TournamentPhase::from_code(code).ok_or(rusqlite::Error::IntegralValueOutOfRange(2, code))?;
    Ok(LeagueConfig {
        row_id: row.get(0)?,
        note: row.get(1)?,
        phase,
        current_tournament_id: row.get(3)?,
    })
}

fn find(conn: &Connection) -> Result<Option<LeagueConfig>, LeagueError> {
    Ok(conn.query_row(SELECT_CONFIG, [], parse_config_row).optional()?)
}

/// Load the configuration record, creating it when absent.
pub fn ensure(conn: &Connection) -> Result<LeagueConfig, LeagueError> {
    if let Some(existing) = find(conn)? {
        return Ok(existing);
    }
    let defaults = LeagueConfig::default();
    conn.execute(
        "INSERT INTO league_config (note, phase, current_tournament_id) VALUES (?1, ?2, ?3)",
        params![defaults.note, defaults.phase.code(), defaults.current_tournament_id],
    )?;
    log::info!("Created league configuration");
    find(conn)?.ok_or(LeagueError::ConfigMissing)
}

pub fn load(conn: &Connection) -> Result<LeagueConfig, LeagueError> {
    find(conn)?.ok_or(LeagueError::ConfigMissing)
}

pub fn save(conn: &Connection, config: &LeagueConfig) -> Result<(), LeagueError> {
    let updated = conn.execute(
        "UPDATE league_config SET note = ?1, phase = ?2, current_tournament_id = ?3 WHERE id = ?4",
        params![
            config.note,
            config.phase.code(),
            config.current_tournament_id,
            config.row_id
        ],
    )?;
    if updated == 0 {
        return Err(LeagueError::ConfigMissing);
    }
    Ok(())
}
