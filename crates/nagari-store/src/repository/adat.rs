use rusqlite::{Connection, OptionalExtension, Row, params};

use nagari_core::ids::{ADAT_PREFIX, generate_id, now_iso};
use nagari_core::{AdatCreateParams, AdatIstiadat, AdatUpdateParams};

use super::{Changes, Repository, blank_to_none};
use crate::errors::{Result, StoreError};

const SELECT_ADAT: &str = "SELECT a.*, j.name AS jorong_name
     FROM adat_istiadat a
     JOIN jorongs j ON j.id = a.jorong_id";

impl Repository {
    /// Adat istiadat records, newest first, optionally for one jorong.
    pub fn list_adat(conn: &Connection, jorong_id: Option<&str>) -> Result<Vec<AdatIstiadat>> {
        let mut stmt = conn.prepare(&format!(
            "{SELECT_ADAT}
             WHERE ?1 IS NULL OR a.jorong_id = ?1
             ORDER BY a.created_at DESC, a.id DESC"
        ))?;
        let rows = stmt.query_map(params![jorong_id], adat_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Get an adat istiadat record by ID.
    pub fn get_adat(conn: &Connection, id: &str) -> Result<Option<AdatIstiadat>> {
        let adat = conn
            .query_row(&format!("{SELECT_ADAT} WHERE a.id = ?1"), params![id], adat_from_row)
            .optional()?;
        Ok(adat)
    }

    /// Insert an adat istiadat record.
    pub fn create_adat(conn: &Connection, params: &AdatCreateParams) -> Result<AdatIstiadat> {
        let id = generate_id(ADAT_PREFIX);
        let now = now_iso();
        let _ = conn.execute(
            "INSERT INTO adat_istiadat (id, jorong_id, title, description, content, category,
             images, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
            params![
                id,
                params.jorong_id,
                params.title.trim(),
                params.description.trim(),
                params.content,
                params.category.trim(),
                blank_to_none(params.images.as_deref()),
                now,
            ],
        )?;

        Self::get_adat(conn, &id)?.ok_or_else(|| StoreError::not_found("AdatIstiadat", &id))
    }

    /// Update an adat istiadat record. Returns `None` if not found.
    pub fn update_adat(
        conn: &Connection,
        id: &str,
        updates: &AdatUpdateParams,
    ) -> Result<Option<AdatIstiadat>> {
        let mut changes = Changes::new();
        changes.set("jorong_id", updates.jorong_id.clone());
        changes.set("title", updates.title.as_deref().map(str::trim).map(String::from));
        changes.set(
            "description",
            updates.description.as_deref().map(str::trim).map(String::from),
        );
        changes.set("content", updates.content.clone());
        changes.set("category", updates.category.as_deref().map(str::trim).map(String::from));
        changes.set_nullable("images", updates.images.as_ref());

        if !changes.apply(conn, "adat_istiadat", id)? {
            return Ok(None);
        }
        Self::get_adat(conn, id)
    }

    /// Delete an adat istiadat record. Returns true if a row was deleted.
    pub fn delete_adat(conn: &Connection, id: &str) -> Result<bool> {
        let changed = conn.execute("DELETE FROM adat_istiadat WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}

fn adat_from_row(row: &Row<'_>) -> rusqlite::Result<AdatIstiadat> {
    Ok(AdatIstiadat {
        id: row.get("id")?,
        jorong_id: row.get("jorong_id")?,
        jorong_name: row.get("jorong_name")?,
        title: row.get("title")?,
        description: row.get("description")?,
        content: row.get("content")?,
        category: row.get("category")?,
        images: row.get("images")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
