//! SQLite connection bootstrap for the key-value backend.
//!
//! # Invariants
//! - Returned connections already hold the `kv_store` table.
//! - Opening an existing database never drops or rewrites stored values.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or preparing a SQLite connection.
#[derive(Debug)]
pub enum DbError {
    /// The connection itself could not be opened.
    Open(rusqlite::Error),
    /// The connection opened but `kv_store` could not be prepared.
    Bootstrap(rusqlite::Error),
    /// A statement failed after bootstrap.
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "failed to open course database: {err}"),
            Self::Bootstrap(err) => write!(f, "failed to prepare kv_store table: {err}"),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) | Self::Bootstrap(err) | Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
