//! SQLite connection utilities

use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite connection, in memory when no path is given
pub fn create_connection(path: Option<&Path>) -> rusqlite::Result<Connection> {
    match path {
        Some(path) => {
            let conn = Connection::open(path)?;
            // Enable WAL mode for better concurrent access
            conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
            Ok(conn)
        }
        None => Connection::open_in_memory(),
    }
}
