//! SQLite-backed storage for archived shortlinks and their visit logs.
//!
//! ## Surface
//!
//! The `Database` struct holds a single connection and exposes the
//! operations the rest of the crate needs:
//! - batched, transactional inserts for the importer
//! - per-shortlink reads for the analysers
//! - store-wide statistics for reporting
//!
//! Timestamps are stored as RFC 3339 TEXT in UTC throughout.

pub mod helpers;
mod operations;
pub mod schema;
pub mod statistics;

pub use operations::VisitTotals;
pub use schema::setup_schema;
pub use statistics::DatabaseStats;

use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::info;

/// The main database interface.
///
/// Opening a database initialises the schema, so a fresh path becomes a
/// working (empty) store and an existing one is reused as-is.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Open (or create) a store at the given path.
    pub fn new(database_path: &str) -> AppResult<Self> {
        let connection = Connection::open(database_path)?;

        // Schema setup is idempotent, so it runs on every open
        schema::setup_schema(&connection)?;

        info!("Database initialised at: {}", database_path);
        Ok(Self { connection })
    }

    /// Borrow the raw connection for ad hoc queries
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Run `f` inside a transaction, committing only on success
    pub fn execute_transaction<F, R>(&mut self, f: F) -> AppResult<R>
    where
        F: FnOnce(&rusqlite::Transaction) -> AppResult<R>,
    {
        let tx = self.connection.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}
