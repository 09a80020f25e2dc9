//! SQL data access layer.
//!
//! All methods take a `&Connection` and are stateless: they translate between
//! the domain types in `nagari-core` and SQL rows. Lookups return `Ok(None)`
//! for missing rows; updates return `Ok(None)` when the id does not exist;
//! deletes return whether a row was removed. Input validation lives in
//! [`crate::service`], not here.

mod adat;
mod admin;
mod faq;
mod gallery;
mod jorong;
mod news;
mod profile;
mod statistic;
mod wali_nagari;

pub use admin::AdminRecord;
pub use jorong::JorongDependents;

use rusqlite::Connection;
use rusqlite::types::ToSql;

use nagari_core::ids::now_iso;

use crate::errors::Result;

/// Repository for SQL CRUD operations on every Nagari entity.
pub struct Repository;

/// Normalize empty or whitespace-only text to `None`.
pub(crate) fn blank_to_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Dynamic `SET` clause for partial updates.
pub(crate) struct Changes {
    sets: Vec<String>,
    values: Vec<Box<dyn ToSql>>,
}

impl Changes {
    pub(crate) fn new() -> Self {
        Self {
            sets: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Set `column` when `value` is present.
    pub(crate) fn set<T: ToSql + 'static>(&mut self, column: &str, value: Option<T>) {
        if let Some(value) = value {
            self.always(column, value);
        }
    }

    /// Set a nullable text column when present. An empty string stores `NULL`.
    pub(crate) fn set_nullable(&mut self, column: &str, value: Option<&String>) {
        if let Some(value) = value {
            self.always(column, blank_to_none(Some(value)));
        }
    }

    /// Set `column` unconditionally.
    pub(crate) fn always<T: ToSql + 'static>(&mut self, column: &str, value: T) {
        self.sets.push(format!("{column} = ?"));
        self.values.push(Box::new(value));
    }

    /// Execute against the row `id` in `table`. Returns whether the row exists.
    pub(crate) fn apply(mut self, conn: &Connection, table: &str, id: &str) -> Result<bool> {
        if self.sets.is_empty() {
            let exists: bool = conn.query_row(
                &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1)"),
                [id],
                |row| row.get(0),
            )?;
            return Ok(exists);
        }

        self.always("updated_at", now_iso());
        self.values.push(Box::new(id.to_string()));

        let sql = format!("UPDATE {table} SET {} WHERE id = ?", self.sets.join(", "));
        let params: Vec<&dyn ToSql> = self.values.iter().map(AsRef::as_ref).collect();
        let changed = conn.execute(&sql, params.as_slice())?;
        Ok(changed > 0)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use rusqlite::Connection;

    use crate::migrations::run_migrations;

    pub(crate) fn setup_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        let _ = run_migrations(&conn).unwrap();
        conn
    }
}
