//! Administrator credential check.

use rusqlite::Connection;
use serde::Serialize;
use tracing::{info, warn};

use nagari_core::Admin;
use nagari_store::Repository;

use crate::errors::{AuthError, Result};
use crate::password::{hash_password, password_version, verify_password};
use crate::token::{Claims, TokenSigner};

/// A successful login.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedAdmin {
    /// Signed session token.
    pub token: String,
    /// Token expiry (RFC 3339).
    pub expires_at: String,
    /// The authenticated account.
    pub admin: Admin,
}

/// Checks admin credentials and issues session tokens.
#[derive(Clone, Debug)]
pub struct Authenticator {
    signer: TokenSigner,
    hash_iterations: u32,
    dummy_hash: String,
}

impl Authenticator {
    /// Create an authenticator. `hash_iterations` applies to new hashes and
    /// to the decoy hash checked for unknown usernames.
    pub fn new(signer: TokenSigner, hash_iterations: u32) -> Self {
        Self {
            signer,
            hash_iterations,
            dummy_hash: hash_password("nagari-decoy-password", hash_iterations),
        }
    }

    /// The token signer.
    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    /// Hash a new password with the configured iteration count.
    pub fn hash(&self, password: &str) -> String {
        hash_password(password, self.hash_iterations)
    }

    /// Verify `username`/`password` and issue a token.
    ///
    /// Unknown usernames and wrong passwords both fail with
    /// [`AuthError::InvalidCredentials`]; an unknown username still pays for
    /// one hash verification.
    pub fn verify_credentials(
        &self,
        conn: &Connection,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedAdmin> {
        let Some(record) = Repository::find_admin_by_username(conn, username)? else {
            let _ = verify_password(password, &self.dummy_hash);
            warn!(username, "login failed");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &record.password_hash) {
            warn!(username, "login failed");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self
            .signer
            .issue(&record.admin, &password_version(&record.password_hash))?;
        info!(admin_id = %record.admin.id, username, "admin logged in");
        Ok(AuthenticatedAdmin {
            token: issued.token,
            expires_at: issued.expires_at,
            admin: record.admin,
        })
    }

    /// Verify a session token's signature and expiry.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        self.signer.verify(token)
    }

    /// Confirm that verified `claims` still name an existing admin whose
    /// password has not changed since the token was issued.
    pub fn check_session(&self, conn: &Connection, claims: Claims) -> Result<Claims> {
        let current = Repository::get_admin_record(conn, &claims.sub)?
            .is_some_and(|record| password_version(&record.password_hash) == claims.pwv);
        if !current {
            warn!(admin_id = %claims.sub, username = %claims.username, "stale session rejected");
            return Err(AuthError::SessionRevoked);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use nagari_store::run_migrations;

    fn setup() -> (Connection, Authenticator) {
        let conn = Connection::open_in_memory().unwrap();
        let _ = run_migrations(&conn).unwrap();
        let auth = Authenticator::new(TokenSigner::new(b"test-secret", 3600), 4);
        let hash = auth.hash("admin123");
        let _ = Repository::create_admin(&conn, "admin", "Administrator", &hash).unwrap();
        (conn, auth)
    }

    #[test]
    fn valid_credentials_issue_token() {
        let (conn, auth) = setup();
        let result = auth.verify_credentials(&conn, "admin", "admin123").unwrap();
        assert_eq!(result.admin.username, "admin");
        let claims = auth.verify_token(&result.token).unwrap();
        assert_eq!(claims.sub, result.admin.id);
        assert_eq!(claims.username, "admin");
    }

    #[test]
    fn wrong_password_rejected() {
        let (conn, auth) = setup();
        assert_matches!(
            auth.verify_credentials(&conn, "admin", "wrong"),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn unknown_user_indistinguishable() {
        let (conn, auth) = setup();
        let unknown = auth.verify_credentials(&conn, "ghost", "admin123").unwrap_err();
        let wrong = auth.verify_credentials(&conn, "admin", "nope").unwrap_err();
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[test]
    fn username_is_case_sensitive() {
        let (conn, auth) = setup();
        assert_matches!(
            auth.verify_credentials(&conn, "ADMIN", "admin123"),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn login_response_shape() {
        let (conn, auth) = setup();
        let result = auth.verify_credentials(&conn, "admin", "admin123").unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["token"].is_string());
        assert!(json["expiresAt"].is_string());
        assert_eq!(json["admin"]["username"], "admin");
        assert!(json["admin"].get("passwordHash").is_none());
    }

    #[test]
    fn session_valid_until_password_changes() {
        let (conn, auth) = setup();
        let login = auth.verify_credentials(&conn, "admin", "admin123").unwrap();
        let claims = auth.verify_token(&login.token).unwrap();
        assert!(auth.check_session(&conn, claims.clone()).is_ok());

        let _ = Repository::set_admin_password(&conn, "admin", &auth.hash("changed")).unwrap();
        assert_matches!(auth.check_session(&conn, claims), Err(AuthError::SessionRevoked));

        let relogin = auth.verify_credentials(&conn, "admin", "changed").unwrap();
        let claims = auth.verify_token(&relogin.token).unwrap();
        assert!(auth.check_session(&conn, claims).is_ok());
    }

    #[test]
    fn session_for_removed_admin_rejected() {
        let (conn, auth) = setup();
        let login = auth.verify_credentials(&conn, "admin", "admin123").unwrap();
        let claims = auth.verify_token(&login.token).unwrap();
        let _ = conn.execute("DELETE FROM admins", []).unwrap();
        assert_matches!(auth.check_session(&conn, claims), Err(AuthError::SessionRevoked));
    }
}
