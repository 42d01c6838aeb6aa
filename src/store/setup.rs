use crate::models::{LeagueConfig, LeagueError};
use rusqlite::Connection;

use super::config;

/// Create missing tables and the configuration record.
pub fn initialize(conn: &Connection) -> Result<LeagueConfig, LeagueError> {
    conn.execute_batch(include_str!("schema.sql"))?;
    let config = config::ensure(conn)?;
    log::info!(
        "Database ready (tournament phase: {}, current tournament: {:?})",
        config.phase,
        config.current_tournament_id
    );
    Ok(config)
}
