//! Error types for the database layer

use thiserror::Error;

/// Every failure surfaced by the repositories.
///
/// Driver errors are classified by [`DatabaseError::from_sqlx`] so callers can
/// tell a missing row or a constraint violation apart from a broken database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    Constraint(String),

    #[error("{0}")]
    Validation(String),

    #[error("Database query error: {0}")]
    Query(String),
}

impl DatabaseError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Translate a driver error, using `duplicate` as the message for
    /// uniqueness violations.
    pub fn from_sqlx(error: sqlx::Error, duplicate: &str) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::NotFound("Record not found".to_string()),
            sqlx::Error::Database(db_error) => {
                if db_error.is_unique_violation() {
                    Self::Duplicate(duplicate.to_string())
                } else if db_error.is_foreign_key_violation() || db_error.is_check_violation() {
                    Self::Constraint(db_error.message().to_string())
                } else {
                    Self::Query(db_error.message().to_string())
                }
            }
            other => Self::Query(other.to_string()),
        }
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        Self::from_sqlx(error, "Record is not unique")
    }
}

impl From<sqlx::migrate::MigrateError> for DatabaseError {
    fn from(error: sqlx::migrate::MigrateError) -> Self {
        Self::Migration(error.to_string())
    }
}

impl From<serde_json::Error> for DatabaseError {
    fn from(error: serde_json::Error) -> Self {
        Self::Query(format!("malformed JSON column: {error}"))
    }
}
