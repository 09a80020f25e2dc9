use rusqlite::{Connection, OptionalExtension, Row, params};

use nagari_core::ids::{GALLERY_PREFIX, generate_id, now_iso};
use nagari_core::{GalleryCreateParams, GalleryItem, GalleryUpdateParams};

use super::{Changes, Repository, blank_to_none};
use crate::errors::Result;

/// Category assigned when none is given.
pub const DEFAULT_CATEGORY: &str = "kegiatan";

impl Repository {
    /// Gallery items, newest first, optionally restricted to one category.
    pub fn list_gallery(conn: &Connection, category: Option<&str>) -> Result<Vec<GalleryItem>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM gallery
             WHERE ?1 IS NULL OR category = ?1
             ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map(params![category], gallery_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Get a gallery item by ID.
    pub fn get_gallery_item(conn: &Connection, id: &str) -> Result<Option<GalleryItem>> {
        let item = conn
            .query_row("SELECT * FROM gallery WHERE id = ?1", params![id], gallery_from_row)
            .optional()?;
        Ok(item)
    }

    /// Insert a gallery item.
    pub fn create_gallery_item(
        conn: &Connection,
        params: &GalleryCreateParams,
    ) -> Result<GalleryItem> {
        let now = now_iso();
        let item = GalleryItem {
            id: generate_id(GALLERY_PREFIX),
            title: params.title.trim().to_string(),
            description: blank_to_none(params.description.as_deref()),
            image_url: params.image_url.trim().to_string(),
            category: blank_to_none(params.category.as_deref())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            event_date: blank_to_none(params.event_date.as_deref()),
            tags: blank_to_none(params.tags.as_deref()),
            created_at: now.clone(),
            updated_at: now,
        };

        let _ = conn.execute(
            "INSERT INTO gallery (id, title, description, image_url, category, event_date,
             tags, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                item.id,
                item.title,
                item.description,
                item.image_url,
                item.category,
                item.event_date,
                item.tags,
                item.created_at,
                item.updated_at,
            ],
        )?;
        Ok(item)
    }

    /// Update a gallery item. Returns `None` if not found.
    pub fn update_gallery_item(
        conn: &Connection,
        id: &str,
        updates: &GalleryUpdateParams,
    ) -> Result<Option<GalleryItem>> {
        let mut changes = Changes::new();
        changes.set("title", updates.title.as_deref().map(str::trim).map(String::from));
        changes.set(
            "image_url",
            updates.image_url.as_deref().map(str::trim).map(String::from),
        );
        changes.set_nullable("description", updates.description.as_ref());
        changes.set("category", blank_to_none(updates.category.as_deref()));
        changes.set_nullable("event_date", updates.event_date.as_ref());
        changes.set_nullable("tags", updates.tags.as_ref());

        if !changes.apply(conn, "gallery", id)? {
            return Ok(None);
        }
        Self::get_gallery_item(conn, id)
    }

    /// Delete a gallery item. Returns true if a row was deleted.
    pub fn delete_gallery_item(conn: &Connection, id: &str) -> Result<bool> {
        let changed = conn.execute("DELETE FROM gallery WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}

fn gallery_from_row(row: &Row<'_>) -> rusqlite::Result<GalleryItem> {
    Ok(GalleryItem {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        image_url: row.get("image_url")?,
        category: row.get("category")?,
        event_date: row.get("event_date")?,
        tags: row.get("tags")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
