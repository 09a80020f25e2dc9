use rusqlite::{Connection, OptionalExtension, Row, params};

use nagari_core::ids::{PROFILE_PREFIX, generate_id, now_iso};
use nagari_core::{NagariProfile, ProfileUpdateParams};

use super::{Changes, Repository, blank_to_none};
use crate::errors::{Result, StoreError};

const DEFAULT_NAME: &str = "Nagari";

impl Repository {
    /// The Nagari profile, if one has been written.
    pub fn get_profile(conn: &Connection) -> Result<Option<NagariProfile>> {
        let profile = conn
            .query_row(
                "SELECT * FROM nagari_profile ORDER BY created_at, id LIMIT 1",
                [],
                profile_from_row,
            )
            .optional()?;
        Ok(profile)
    }

    /// Update the profile, creating it on first write.
    ///
    /// On create, missing text fields default to `Nagari` for the name and
    /// empty strings elsewhere. Runs in its own transaction unless `conn` is
    /// already inside one, in which case the caller's transaction covers it.
    pub fn upsert_profile(conn: &Connection, params: &ProfileUpdateParams) -> Result<NagariProfile> {
        if !conn.is_autocommit() {
            return write_profile(conn, params);
        }
        let tx = conn.unchecked_transaction()?;
        let profile = write_profile(&tx, params)?;
        tx.commit()?;
        Ok(profile)
    }
}

fn write_profile(conn: &Connection, params: &ProfileUpdateParams) -> Result<NagariProfile> {
    let existing: Option<String> = conn
        .query_row(
            "SELECT id FROM nagari_profile ORDER BY created_at, id LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let id = if let Some(id) = existing {
        let mut changes = Changes::new();
        changes.set("name", params.name.clone());
        changes.set("description", params.description.clone());
        changes.set("history", params.history.clone());
        changes.set("vision", params.vision.clone());
        changes.set("mission", params.mission.clone());
        changes.set_nullable("logo", params.logo.as_ref());
        changes.set_nullable("cover_image", params.cover_image.as_ref());
        changes.set("address", params.address.clone());
        changes.set_nullable("phone", params.phone.as_ref());
        changes.set_nullable("email", params.email.as_ref());
        changes.set_nullable("website", params.website.as_ref());
        changes.set("latitude", params.latitude);
        changes.set("longitude", params.longitude);
        let _ = changes.apply(conn, "nagari_profile", &id)?;
        id
    } else {
        let id = generate_id(PROFILE_PREFIX);
        let now = now_iso();
        let _ = conn.execute(
            "INSERT INTO nagari_profile (id, name, description, history, vision, mission,
             logo, cover_image, address, phone, email, website, latitude, longitude,
             created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?15)",
            params![
                id,
                params.name.as_deref().unwrap_or(DEFAULT_NAME),
                params.description.as_deref().unwrap_or_default(),
                params.history.as_deref().unwrap_or_default(),
                params.vision.as_deref().unwrap_or_default(),
                params.mission.as_deref().unwrap_or_default(),
                blank_to_none(params.logo.as_deref()),
                blank_to_none(params.cover_image.as_deref()),
                params.address.as_deref().unwrap_or_default(),
                blank_to_none(params.phone.as_deref()),
                blank_to_none(params.email.as_deref()),
                blank_to_none(params.website.as_deref()),
                params.latitude,
                params.longitude,
                now,
            ],
        )?;
        id
    };

    let profile = conn
        .query_row(
            "SELECT * FROM nagari_profile WHERE id = ?1",
            params![id],
            profile_from_row,
        )
        .optional()?
        .ok_or_else(|| StoreError::not_found("Profile", &id))?;
    Ok(profile)
}

fn profile_from_row(row: &Row<'_>) -> rusqlite::Result<NagariProfile> {
    Ok(NagariProfile {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        history: row.get("history")?,
        vision: row.get("vision")?,
        mission: row.get("mission")?,
        logo: row.get("logo")?,
        cover_image: row.get("cover_image")?,
        address: row.get("address")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        website: row.get("website")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
