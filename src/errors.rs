//! Unified error types for `taskstock`.
//!
//! Store errors coming out of `SeaORM` are classified into connection,
//! constraint and not-found kinds so callers (and tests) can match on them.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Application error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file missing pieces or malformed
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },

    /// The store could not be reached or a connection could not be acquired
    #[error("Connection error: {message}")]
    Connection {
        /// Underlying driver message
        message: String,
    },

    /// A unique or foreign-key constraint rejected a write
    #[error("Constraint violation: {message}")]
    ConstraintViolation {
        /// Underlying driver message
        message: String,
    },

    /// A lookup found no row
    #[error("{entity} not found: {key}")]
    NotFound {
        /// Kind of row looked up (e.g. "product")
        entity: &'static str,
        /// Key used for the lookup
        key: String,
    },

    /// Any other store error
    #[error("Database error: {0}")]
    Database(DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::NotFound`] keyed by anything displayable.
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => {
                return Self::ConstraintViolation { message };
            }
            Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
                return Self::ConstraintViolation { message };
            }
            _ => {}
        }

        match err {
            DbErr::Conn(e) => Self::Connection {
                message: e.to_string(),
            },
            DbErr::ConnectionAcquire(e) => Self::Connection {
                message: e.to_string(),
            },
            DbErr::RecordNotFound(key) => Self::NotFound {
                entity: "record",
                key,
            },
            other => Self::Database(other),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_not_found_maps_to_not_found() {
        let err: Error = DbErr::RecordNotFound("abc".to_string()).into();
        assert!(matches!(err, Error::NotFound { entity: "record", .. }));
    }

    #[test]
    fn test_other_errors_stay_database() {
        let err: Error = DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, Error::Database(_)));
        assert!(err.to_string().starts_with("Database error:"));
    }

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("device", "SKF_9");
        assert_eq!(err.to_string(), "device not found: SKF_9");
    }
}
