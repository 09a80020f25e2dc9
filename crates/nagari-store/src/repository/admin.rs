use rusqlite::{Connection, OptionalExtension, Row, params};

use nagari_core::Admin;
use nagari_core::ids::{ADMIN_PREFIX, generate_id, now_iso};

use super::Repository;
use crate::errors::Result;

/// An admin row together with its stored password hash.
#[derive(Clone, Debug)]
pub struct AdminRecord {
    /// The public part of the account.
    pub admin: Admin,
    /// Encoded password hash.
    pub password_hash: String,
}

impl Repository {
    /// Look up an admin by exact username.
    pub fn find_admin_by_username(conn: &Connection, username: &str) -> Result<Option<AdminRecord>> {
        let record = conn
            .query_row(
                "SELECT * FROM admins WHERE username = ?1",
                params![username],
                record_from_row,
            )
            .optional()?;
        Ok(record)
    }

    /// Look up an admin and its password hash by ID.
    pub fn get_admin_record(conn: &Connection, id: &str) -> Result<Option<AdminRecord>> {
        let record = conn
            .query_row("SELECT * FROM admins WHERE id = ?1", params![id], record_from_row)
            .optional()?;
        Ok(record)
    }

    /// Get an admin by ID.
    pub fn get_admin(conn: &Connection, id: &str) -> Result<Option<Admin>> {
        let admin = conn
            .query_row("SELECT * FROM admins WHERE id = ?1", params![id], admin_from_row)
            .optional()?;
        Ok(admin)
    }

    /// Insert an admin with an already-encoded password hash.
    pub fn create_admin(
        conn: &Connection,
        username: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<Admin> {
        let admin = Admin {
            id: generate_id(ADMIN_PREFIX),
            username: username.to_string(),
            name: name.to_string(),
            created_at: now_iso(),
        };
        let _ = conn.execute(
            "INSERT INTO admins (id, username, password_hash, name, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![admin.id, admin.username, password_hash, admin.name, admin.created_at],
        )?;
        Ok(admin)
    }

    /// Replace an admin's password hash. Returns true if the admin exists.
    pub fn set_admin_password(conn: &Connection, username: &str, password_hash: &str) -> Result<bool> {
        let changed = conn.execute(
            "UPDATE admins SET password_hash = ?1 WHERE username = ?2",
            params![password_hash, username],
        )?;
        Ok(changed > 0)
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<AdminRecord> {
    Ok(AdminRecord {
        admin: admin_from_row(row)?,
        password_hash: row.get("password_hash")?,
    })
}

fn admin_from_row(row: &Row<'_>) -> rusqlite::Result<Admin> {
    Ok(Admin {
        id: row.get("id")?,
        username: row.get("username")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::setup_db;

    #[test]
    fn create_and_find() {
        let conn = setup_db();
        let admin = Repository::create_admin(&conn, "admin", "Administrator", "hash").unwrap();
        assert!(admin.id.starts_with("adm-"));

        let record = Repository::find_admin_by_username(&conn, "admin").unwrap().unwrap();
        assert_eq!(record.admin, admin);
        assert_eq!(record.password_hash, "hash");
        assert_eq!(Repository::get_admin(&conn, &admin.id).unwrap().unwrap(), admin);

        let by_id = Repository::get_admin_record(&conn, &admin.id).unwrap().unwrap();
        assert_eq!(by_id.password_hash, "hash");
        assert!(Repository::get_admin_record(&conn, "adm-missing").unwrap().is_none());
    }

    #[test]
    fn username_lookup_is_exact() {
        let conn = setup_db();
        let _ = Repository::create_admin(&conn, "admin", "A", "hash").unwrap();
        assert!(Repository::find_admin_by_username(&conn, "Admin").unwrap().is_none());
        assert!(Repository::find_admin_by_username(&conn, "admin ").unwrap().is_none());
    }

    #[test]
    fn duplicate_username_is_unique_violation() {
        let conn = setup_db();
        let _ = Repository::create_admin(&conn, "admin", "A", "hash").unwrap();
        let err = Repository::create_admin(&conn, "admin", "B", "hash").unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[test]
    fn set_password() {
        let conn = setup_db();
        let _ = Repository::create_admin(&conn, "admin", "A", "old").unwrap();
        assert!(Repository::set_admin_password(&conn, "admin", "new").unwrap());
        assert!(!Repository::set_admin_password(&conn, "ghost", "new").unwrap());
        let record = Repository::find_admin_by_username(&conn, "admin").unwrap().unwrap();
        assert_eq!(record.password_hash, "new");
    }
}
