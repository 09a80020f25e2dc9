//! Store error types.
//!
//! Every persistence and validation failure is one of these variants. The
//! HTTP layer maps them onto status codes; nothing here knows about HTTP.

use thiserror::Error;

const FOREIGN_KEY_MESSAGE: &str = "FOREIGN KEY constraint failed";

/// Errors from repository and service operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Connection pool failure.
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Schema migration failed.
    #[error("Migration error: {message}")]
    Migration {
        /// What went wrong.
        message: String,
    },

    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity type (e.g., "Jorong", "News").
        entity: &'static str,
        /// The ID that was looked up.
        id: String,
    },

    /// Input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The write collides with existing data.
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl StoreError {
    /// Create a not-found error for `entity` with `id`.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this is a database-level `UNIQUE` constraint violation.
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Self::Database(rusqlite::Error::SqliteFailure(e, _))
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        )
    }

    /// Whether this is a database-level foreign key violation.
    ///
    /// A dangling reference on insert reports `SQLITE_CONSTRAINT_FOREIGNKEY`.
    /// Deleting a parent guarded by `ON DELETE RESTRICT` reports
    /// `SQLITE_CONSTRAINT_TRIGGER` with the same message.
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            Self::Database(rusqlite::Error::SqliteFailure(e, message)) => {
                e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
                    || (e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_TRIGGER
                        && message.as_deref() == Some(FOREIGN_KEY_MESSAGE))
            }
            _ => false,
        }
    }

    /// Replace a constraint violation with a [`StoreError::Conflict`] carrying `message`.
    #[must_use]
    pub fn or_conflict(self, message: impl Into<String>) -> Self {
        if self.is_unique_violation() || self.is_foreign_key_violation() {
            Self::Conflict(message.into())
        } else {
            self
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn unique_violation() -> StoreError {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (k TEXT UNIQUE); INSERT INTO t VALUES ('a');")
            .unwrap();
        conn.execute("INSERT INTO t VALUES ('a')", []).unwrap_err().into()
    }

    fn restrict_violation() -> StoreError {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             CREATE TABLE parent (id TEXT PRIMARY KEY);
             CREATE TABLE child (parent_id TEXT REFERENCES parent(id) ON DELETE RESTRICT);
             INSERT INTO parent VALUES ('p');
             INSERT INTO child VALUES ('p');",
        )
        .unwrap();
        conn.execute("DELETE FROM parent WHERE id = 'p'", []).unwrap_err().into()
    }

    #[test]
    fn not_found_display() {
        let err = StoreError::not_found("Jorong", "jrg-123");
        assert_eq!(err.to_string(), "Jorong not found: jrg-123");
    }

    #[test]
    fn validation_display() {
        let err = StoreError::validation("name is required");
        assert_eq!(err.to_string(), "Validation error: name is required");
    }

    #[test]
    fn unique_violation_detected() {
        let err = unique_violation();
        assert!(err.is_unique_violation());
        assert!(!err.is_foreign_key_violation());
    }

    #[test]
    fn or_conflict_rewrites_constraint_errors() {
        let err = unique_violation().or_conflict("duplicate");
        assert!(matches!(err, StoreError::Conflict(ref m) if m == "duplicate"));
    }

    #[test]
    fn restrict_delete_is_foreign_key_violation() {
        let err = restrict_violation();
        assert!(err.is_foreign_key_violation());
        assert!(matches!(err.or_conflict("still referenced"), StoreError::Conflict(_)));
    }

    #[test]
    fn or_conflict_keeps_other_errors() {
        let err = StoreError::validation("bad").or_conflict("duplicate");
        assert!(matches!(err, StoreError::Validation(_)));
    }
}
