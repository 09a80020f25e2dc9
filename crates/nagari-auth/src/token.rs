//! Signed, expiring session tokens (HS256 JWT).

use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use nagari_core::Admin;

use crate::errors::{AuthError, Result};

/// Claims carried by an admin session token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Admin id.
    pub sub: String,
    /// Admin username.
    pub username: String,
    /// Fingerprint of the password hash at issue time.
    pub pwv: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// A freshly signed token with its expiry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact JWT.
    pub token: String,
    /// Expiry as an RFC 3339 timestamp.
    pub expires_at: String,
}

/// Issues and verifies session tokens with one shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    /// Create a signer for `secret` issuing tokens valid for `ttl_secs`.
    pub fn new(secret: &[u8], ttl_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX / 2),
        }
    }

    /// Token lifetime in seconds.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Sign a token for `admin` valid from now. `password_version` is the
    /// fingerprint of the admin's current password hash.
    pub fn issue(&self, admin: &Admin, password_version: &str) -> Result<IssuedToken> {
        self.issue_at(admin, password_version, Utc::now())
    }

    /// Sign a token for `admin` as if issued at `now`.
    pub fn issue_at(
        &self,
        admin: &Admin,
        password_version: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken> {
        let iat = now.timestamp();
        let exp = iat.saturating_add(self.ttl_secs);
        let claims = Claims {
            sub: admin.id.clone(),
            username: admin.username.clone(),
            pwv: password_version.to_string(),
            iat,
            exp,
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))?;
        let expires_at = DateTime::<Utc>::from_timestamp(exp, 0)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string();
        Ok(IssuedToken { token, expires_at })
    }

    /// Verify signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Duration;

    fn admin() -> Admin {
        Admin {
            id: "adm-1".into(),
            username: "admin".into(),
            name: "Administrator".into(),
            created_at: "2024-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn issue_then_verify() {
        let signer = TokenSigner::new(b"secret", 3600);
        let issued = signer.issue(&admin(), "v1").unwrap();
        let claims = signer.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, "adm-1");
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.pwv, "v1");
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(chrono::DateTime::parse_from_rfc3339(&issued.expires_at).is_ok());
    }

    #[test]
    fn expires_at_matches_ttl() {
        let signer = TokenSigner::new(b"secret", 43_200);
        let now = DateTime::parse_from_rfc3339("2024-05-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let issued = signer.issue_at(&admin(), "v1", now).unwrap();
        assert_eq!(issued.expires_at, "2024-05-01T12:00:00Z");
    }

    #[test]
    fn expired_token_rejected() {
        let signer = TokenSigner::new(b"secret", 60);
        let issued = signer
            .issue_at(&admin(), "v1", Utc::now() - Duration::hours(1))
            .unwrap();
        assert_matches!(signer.verify(&issued.token), Err(AuthError::TokenExpired));
    }

    #[test]
    fn wrong_secret_rejected() {
        let issued = TokenSigner::new(b"secret", 60).issue(&admin(), "v1").unwrap();
        let other = TokenSigner::new(b"another", 60);
        assert_matches!(other.verify(&issued.token), Err(AuthError::InvalidToken(_)));
    }

    #[test]
    fn tampered_token_rejected() {
        let signer = TokenSigner::new(b"secret", 60);
        let token = signer.issue(&admin(), "v1").unwrap().token;
        let (head, signature) = token.rsplit_once('.').unwrap();
        let first = if signature.starts_with('A') { 'B' } else { 'A' };
        let token = format!("{head}.{first}{}", &signature[1..]);
        assert_matches!(signer.verify(&token), Err(AuthError::InvalidToken(_)));
    }

    #[test]
    fn garbage_rejected() {
        let signer = TokenSigner::new(b"secret", 60);
        assert_matches!(signer.verify("not-a-token"), Err(AuthError::InvalidToken(_)));
        assert_matches!(signer.verify(""), Err(AuthError::InvalidToken(_)));
    }

    #[test]
    fn debug_hides_keys() {
        let signer = TokenSigner::new(b"super-secret", 60);
        assert!(!format!("{signer:?}").contains("super-secret"));
    }
}
