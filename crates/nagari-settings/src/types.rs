//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` and `#[serde(default)]`
//! so a settings file may contain any subset of fields.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Root settings type.
///
/// ```json
/// {
///   "server": { "port": 8080, "corsOrigins": ["https://nagari.example"] },
///   "auth": { "tokenSecret": "change-me" }
/// }
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NagariSettings {
    /// HTTP listener settings.
    pub server: ServerSettings,
    /// `SQLite` database settings.
    pub database: DatabaseSettings,
    /// Credential and token settings.
    pub auth: AuthSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
}

impl NagariSettings {
    /// Reject values the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(SettingsError::InvalidValue("server.port must be non-zero".into()));
        }
        if self.server.body_limit_bytes == 0 {
            return Err(SettingsError::InvalidValue(
                "server.bodyLimitBytes must be non-zero".into(),
            ));
        }
        if self.database.pool_size == 0 {
            return Err(SettingsError::InvalidValue(
                "database.poolSize must be at least 1".into(),
            ));
        }
        if self.auth.token_ttl_secs == 0 {
            return Err(SettingsError::InvalidValue(
                "auth.tokenTtlSecs must be non-zero".into(),
            ));
        }
        if self.auth.hash_iterations == 0 {
            return Err(SettingsError::InvalidValue(
                "auth.hashIterations must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// The token signing secret, or an error when none is configured.
    pub fn require_token_secret(&self) -> Result<&str> {
        let secret = self.auth.token_secret.trim();
        if secret.is_empty() {
            return Err(SettingsError::InvalidValue(
                "auth.tokenSecret is empty; set it in the settings file or NAGARI_TOKEN_SECRET"
                    .into(),
            ));
        }
        Ok(secret)
    }
}

/// HTTP listener settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Bind address.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Origins allowed by CORS. Empty allows any origin.
    pub cors_origins: Vec<String>,
    /// Maximum request body size in bytes.
    pub body_limit_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
            body_limit_bytes: 1_048_576,
        }
    }
}

/// `SQLite` database settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseSettings {
    /// Database file path.
    pub path: String,
    /// Maximum pooled connections.
    pub pool_size: u32,
    /// `busy_timeout` pragma in milliseconds.
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "data/nagari.db".to_string(),
            pool_size: 8,
            busy_timeout_ms: 5000,
        }
    }
}

/// Credential and token settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthSettings {
    /// HMAC secret for signing admin tokens.
    pub token_secret: String,
    /// Token lifetime in seconds.
    pub token_ttl_secs: u64,
    /// SHA-256 rounds for new password hashes.
    pub hash_iterations: u32,
    /// Password given to the default admin created by `seed`.
    pub seed_admin_password: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            token_secret: String::new(),
            token_ttl_secs: 43_200,
            hash_iterations: 100_000,
            seed_admin_password: "admin123".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of compact text.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(NagariSettings::default()).unwrap();
        assert_eq!(json["server"]["bodyLimitBytes"], 1_048_576);
        assert_eq!(json["database"]["busyTimeoutMs"], 5000);
        assert_eq!(json["auth"]["tokenTtlSecs"], 43_200);
    }

    #[test]
    fn partial_section_keeps_defaults() {
        let settings: NagariSettings =
            serde_json::from_value(serde_json::json!({"database": {"poolSize": 2}})).unwrap();
        assert_eq!(settings.database.pool_size, 2);
        assert_eq!(settings.database.path, "data/nagari.db");
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn defaults_validate() {
        assert!(NagariSettings::default().validate().is_ok());
    }

    #[test]
    fn zero_pool_rejected() {
        let mut settings = NagariSettings::default();
        settings.database.pool_size = 0;
        assert_matches!(settings.validate(), Err(SettingsError::InvalidValue(_)));
    }

    #[test]
    fn zero_ttl_rejected() {
        let mut settings = NagariSettings::default();
        settings.auth.token_ttl_secs = 0;
        assert_matches!(settings.validate(), Err(SettingsError::InvalidValue(_)));
    }

    #[test]
    fn empty_secret_rejected() {
        let mut settings = NagariSettings::default();
        assert_matches!(settings.require_token_secret(), Err(SettingsError::InvalidValue(_)));
        settings.auth.token_secret = "   ".into();
        assert!(settings.require_token_secret().is_err());
        settings.auth.token_secret = "s3cret".into();
        assert_eq!(settings.require_token_secret().unwrap(), "s3cret");
    }
}
