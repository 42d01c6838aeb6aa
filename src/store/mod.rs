//! SQLite persistence: one module per table, plus pool and schema setup.
//!
//! Every function takes a plain `Connection` so it can run inside the
//! transaction the caller opened.

pub mod brackets;
pub mod config;
pub mod connection;
pub mod matches;
pub mod players;
pub mod setup;
pub mod signups;
pub mod tournaments;

pub use connection::{create_memory_pool, create_pool, get_connection, DbConn, DbPool};
