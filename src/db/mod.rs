// src/db/mod.rs

//! Database layer for the cookbook service
//!
//! Provides connection management, schema migration, and transactional
//! helpers on top of rusqlite. Each HTTP request opens its own connection
//! and runs mutating sequences inside a single transaction.

pub mod models;
pub mod schema;

use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

/// Initialize the database: create the file (and parent directories) if
/// missing and bring the schema up to date.
pub fn init(db_path: impl AsRef<Path>) -> Result<()> {
    let db_path = db_path.as_ref();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let conn = open(db_path)?;
    schema::migrate(&conn)?;

    debug!("Database initialized at {}", db_path.display());
    Ok(())
}

/// Open a connection to the database with foreign keys enforced
pub fn open(db_path: impl AsRef<Path>) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;
    Ok(conn)
}

/// Run a closure inside a transaction
///
/// Commits if the closure returns `Ok`; rolls back on `Err` (the transaction
/// is rolled back when dropped without commit).
pub fn transaction<T, F>(conn: &mut Connection, f: F) -> Result<T>
where
    F: FnOnce(&rusqlite::Transaction) -> Result<T>,
{
    let tx = conn.transaction()?;
    let result = f(&tx)?;
    tx.commit()?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_commits_on_ok() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        init(temp.path()).unwrap();
        let mut conn = open(temp.path()).unwrap();

        transaction(&mut conn, |tx| {
            tx.execute(
                "INSERT INTO recipes (title, cook_time) VALUES (?1, ?2)",
                rusqlite::params!["Soup", 40],
            )?;
            Ok(())
        })
        .unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_transaction_rolls_back_on_err() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        init(temp.path()).unwrap();
        let mut conn = open(temp.path()).unwrap();

        let result: Result<()> = transaction(&mut conn, |tx| {
            tx.execute(
                "INSERT INTO recipes (title, cook_time) VALUES (?1, ?2)",
                rusqlite::params!["Soup", 40],
            )?;
            Err(crate::Error::Internal("boom".to_string()))
        });
        assert!(result.is_err());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0, "failed transaction must leave no rows behind");
    }
}
