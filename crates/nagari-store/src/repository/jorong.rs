use rusqlite::{Connection, OptionalExtension, Row, params};

use nagari_core::ids::{JORONG_PREFIX, generate_id, now_iso};
use nagari_core::{Jorong, JorongCreateParams, JorongUpdateParams};

use super::{Changes, Repository, blank_to_none};
use crate::errors::Result;

/// Rows in other tables that reference a jorong.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JorongDependents {
    /// Statistics records.
    pub statistics: u32,
    /// Adat istiadat records.
    pub adat: u32,
}

impl JorongDependents {
    /// Whether nothing references the jorong.
    pub fn is_empty(self) -> bool {
        self.statistics == 0 && self.adat == 0
    }
}

impl Repository {
    /// All jorongs, alphabetically.
    pub fn list_jorongs(conn: &Connection) -> Result<Vec<Jorong>> {
        let mut stmt = conn.prepare("SELECT * FROM jorongs ORDER BY name ASC, id ASC")?;
        let rows = stmt.query_map([], jorong_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Get a jorong by ID.
    pub fn get_jorong(conn: &Connection, id: &str) -> Result<Option<Jorong>> {
        let jorong = conn
            .query_row("SELECT * FROM jorongs WHERE id = ?1", params![id], jorong_from_row)
            .optional()?;
        Ok(jorong)
    }

    /// Insert a jorong.
    pub fn create_jorong(conn: &Connection, params: &JorongCreateParams) -> Result<Jorong> {
        let now = now_iso();
        let jorong = Jorong {
            id: generate_id(JORONG_PREFIX),
            name: params.name.trim().to_string(),
            description: params.description.trim().to_string(),
            area: params.area,
            population: params.population.unwrap_or(0),
            kepala_jorong: blank_to_none(params.kepala_jorong.as_deref()),
            created_at: now.clone(),
            updated_at: now,
        };

        let _ = conn.execute(
            "INSERT INTO jorongs (id, name, description, area, population, kepala_jorong,
             created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                jorong.id,
                jorong.name,
                jorong.description,
                jorong.area,
                jorong.population,
                jorong.kepala_jorong,
                jorong.created_at,
                jorong.updated_at,
            ],
        )?;
        Ok(jorong)
    }

    /// Update a jorong. Returns `None` if not found.
    pub fn update_jorong(
        conn: &Connection,
        id: &str,
        updates: &JorongUpdateParams,
    ) -> Result<Option<Jorong>> {
        let mut changes = Changes::new();
        changes.set("name", updates.name.as_deref().map(str::trim).map(String::from));
        changes.set(
            "description",
            updates.description.as_deref().map(str::trim).map(String::from),
        );
        changes.set("area", updates.area);
        changes.set("population", updates.population);
        changes.set_nullable("kepala_jorong", updates.kepala_jorong.as_ref());

        if !changes.apply(conn, "jorongs", id)? {
            return Ok(None);
        }
        Self::get_jorong(conn, id)
    }

    /// Delete a jorong. Returns true if a row was deleted.
    pub fn delete_jorong(conn: &Connection, id: &str) -> Result<bool> {
        let changed = conn.execute("DELETE FROM jorongs WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Count the rows that reference a jorong.
    pub fn count_jorong_dependents(conn: &Connection, id: &str) -> Result<JorongDependents> {
        let dependents = conn.query_row(
            "SELECT
               (SELECT COUNT(*) FROM jorong_statistics WHERE jorong_id = ?1),
               (SELECT COUNT(*) FROM adat_istiadat WHERE jorong_id = ?1)",
            params![id],
            |row| {
                Ok(JorongDependents {
                    statistics: row.get(0)?,
                    adat: row.get(1)?,
                })
            },
        )?;
        Ok(dependents)
    }

    /// Find a jorong by exact name.
    pub fn find_jorong_by_name(conn: &Connection, name: &str) -> Result<Option<Jorong>> {
        let jorong = conn
            .query_row(
                "SELECT * FROM jorongs WHERE name = ?1 LIMIT 1",
                params![name],
                jorong_from_row,
            )
            .optional()?;
        Ok(jorong)
    }
}

fn jorong_from_row(row: &Row<'_>) -> rusqlite::Result<Jorong> {
    Ok(Jorong {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        area: row.get("area")?,
        population: row.get("population")?,
        kepala_jorong: row.get("kepala_jorong")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
