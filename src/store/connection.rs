use crate::models::LeagueError;
use r2d2_sqlite::SqliteConnectionManager;
use std::time::Duration;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

const FILE_POOL_SIZE: u32 = 8;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub fn create_pool(database_path: &str) -> Result<DbPool, LeagueError> {
    let builder = r2d2::Pool::builder().max_size(FILE_POOL_SIZE);
    build_pool(builder, SqliteConnectionManager::file(database_path))
}

/// Private in-memory database. Every SQLite memory connection is its own
/// database, so the pool holds exactly one and never recycles it.
pub fn create_memory_pool() -> Result<DbPool, LeagueError> {
    let builder = r2d2::Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None);
    build_pool(builder, SqliteConnectionManager::memory())
}

fn build_pool(
    builder: r2d2::Builder<SqliteConnectionManager>,
    manager: SqliteConnectionManager,
) -> Result<DbPool, LeagueError> {
    let manager = manager.with_init(|conn| conn.busy_timeout(BUSY_TIMEOUT));
    Ok(builder.build(manager)?)
}

pub fn get_connection(pool: &DbPool) -> Result<DbConn, LeagueError> {
    Ok(pool.get()?)
}
