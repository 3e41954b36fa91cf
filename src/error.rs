use std::path::PathBuf;

use thiserror::Error;

/// Failures of a tour run. None of them are recovered locally.
#[derive(Error, Debug)]
pub enum TourError {
    #[error("cannot open database at {}: {source}", .path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("schema statement rejected: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("constraint violated while seeding {table}: {source}")]
    ConstraintViolation {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("query '{label}' failed: {source}")]
    Query {
        label: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("sqlite error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TourError>;

impl TourError {
    /// Classify an insert failure: key and reference violations become
    /// `ConstraintViolation`, anything else stays a plain SQL error.
    pub(crate) fn from_insert(table: &'static str, source: rusqlite::Error) -> Self {
        match source.sqlite_error_code() {
            Some(rusqlite::ErrorCode::ConstraintViolation) => {
                TourError::ConstraintViolation { table, source }
            }
            _ => TourError::Sql(source),
        }
    }
}
