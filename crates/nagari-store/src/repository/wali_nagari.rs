use rusqlite::{Connection, OptionalExtension, Row, params};

use nagari_core::ids::{WALI_NAGARI_PREFIX, generate_id, now_iso};
use nagari_core::{WaliNagari, WaliNagariCreateParams, WaliNagariUpdateParams};

use super::{Changes, Repository, blank_to_none};
use crate::errors::Result;

impl Repository {
    /// Every term of office, by `order` ascending.
    pub fn list_wali_nagari(conn: &Connection) -> Result<Vec<WaliNagari>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM wali_nagari ORDER BY sort_order ASC, start_year ASC, id ASC",
        )?;
        let rows = stmt.query_map([], wali_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Get a Wali Nagari record by ID.
    pub fn get_wali_nagari(conn: &Connection, id: &str) -> Result<Option<WaliNagari>> {
        let wali = conn
            .query_row("SELECT * FROM wali_nagari WHERE id = ?1", params![id], wali_from_row)
            .optional()?;
        Ok(wali)
    }

    /// Insert a Wali Nagari record.
    pub fn create_wali_nagari(
        conn: &Connection,
        params: &WaliNagariCreateParams,
    ) -> Result<WaliNagari> {
        let now = now_iso();
        let wali = WaliNagari {
            id: generate_id(WALI_NAGARI_PREFIX),
            name: params.name.trim().to_string(),
            start_year: params.start_year,
            end_year: params.end_year,
            photo: blank_to_none(params.photo.as_deref()),
            biography: blank_to_none(params.biography.as_deref()),
            achievements: blank_to_none(params.achievements.as_deref()),
            order: params.order,
            created_at: now.clone(),
            updated_at: now,
        };

        let _ = conn.execute(
            "INSERT INTO wali_nagari (id, name, start_year, end_year, photo, biography,
             achievements, sort_order, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                wali.id,
                wali.name,
                wali.start_year,
                wali.end_year,
                wali.photo,
                wali.biography,
                wali.achievements,
                wali.order,
                wali.created_at,
                wali.updated_at,
            ],
        )?;
        Ok(wali)
    }

    /// Update a Wali Nagari record. Returns `None` if not found.
    pub fn update_wali_nagari(
        conn: &Connection,
        id: &str,
        updates: &WaliNagariUpdateParams,
    ) -> Result<Option<WaliNagari>> {
        let mut changes = Changes::new();
        changes.set("name", updates.name.as_deref().map(str::trim).map(String::from));
        changes.set("start_year", updates.start_year);
        changes.set("end_year", updates.end_year);
        changes.set_nullable("photo", updates.photo.as_ref());
        changes.set_nullable("biography", updates.biography.as_ref());
        changes.set_nullable("achievements", updates.achievements.as_ref());
        changes.set("sort_order", updates.order);

        if !changes.apply(conn, "wali_nagari", id)? {
            return Ok(None);
        }
        Self::get_wali_nagari(conn, id)
    }

    /// Delete a Wali Nagari record. Returns true if a row was deleted.
    pub fn delete_wali_nagari(conn: &Connection, id: &str) -> Result<bool> {
        let changed = conn.execute("DELETE FROM wali_nagari WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}

fn wali_from_row(row: &Row<'_>) -> rusqlite::Result<WaliNagari> {
    Ok(WaliNagari {
        id: row.get("id")?,
        name: row.get("name")?,
        start_year: row.get("start_year")?,
        end_year: row.get("end_year")?,
        photo: row.get("photo")?,
        biography: row.get("biography")?,
        achievements: row.get("achievements")?,
        order: row.get("sort_order")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
