//! Shared handler state.

use std::sync::Arc;
use std::time::Instant;

use rusqlite::Connection;

use nagari_auth::Authenticator;
use nagari_settings::NagariSettings;
use nagari_store::{ConnectionPool, StoreError};

use crate::error::{ApiError, ApiResult};

/// State shared by every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// `SQLite` connection pool.
    pub pool: ConnectionPool,
    /// Credential checks and token verification.
    pub auth: Arc<Authenticator>,
    /// Effective settings.
    pub settings: Arc<NagariSettings>,
    /// When the server started.
    pub start_time: Instant,
}

impl AppState {
    /// Create state from its parts.
    pub fn new(pool: ConnectionPool, auth: Authenticator, settings: NagariSettings) -> Self {
        Self {
            pool,
            auth: Arc::new(auth),
            settings: Arc::new(settings),
            start_time: Instant::now(),
        }
    }

    /// Run `f` with a pooled connection on the blocking thread pool.
    pub async fn with_conn<T, E, F>(&self, f: F) -> ApiResult<T>
    where
        F: FnOnce(&Connection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: Into<ApiError>,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get().map_err(StoreError::from)?;
            f(&conn).map_err(Into::into)
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nagari_auth::TokenSigner;
    use nagari_store::{ConnectionConfig, Repository, new_in_memory, run_migrations};

    fn state() -> AppState {
        let pool = new_in_memory(&ConnectionConfig::default()).unwrap();
        let _ = run_migrations(&pool.get().unwrap()).unwrap();
        let auth = Authenticator::new(TokenSigner::new(b"secret", 60), 1);
        AppState::new(pool, auth, NagariSettings::default())
    }

    #[tokio::test]
    async fn with_conn_returns_value() {
        let state = state();
        let jorongs = state.with_conn(Repository::list_jorongs).await.unwrap();
        assert!(jorongs.is_empty());
    }

    #[tokio::test]
    async fn with_conn_maps_errors() {
        let state = state();
        let err = state
            .with_conn(|conn| nagari_store::CmsService::get_jorong(conn, "jrg-missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
