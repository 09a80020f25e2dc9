//! `/health` endpoint.

use serde::Serialize;
use std::time::Instant;

/// Health check response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `"ok"` when the database answers, `"degraded"` otherwise.
    pub status: String,
    /// Seconds since the server started.
    pub uptime_secs: u64,
    /// Whether a pooled connection answered a trivial query.
    pub database: bool,
    /// Crate version.
    pub version: &'static str,
}

/// Build a health response.
pub fn health_check(start_time: Instant, database: bool) -> HealthResponse {
    HealthResponse {
        status: if database { "ok" } else { "degraded" }.into(),
        uptime_secs: start_time.elapsed().as_secs(),
        database,
        version: env!("CARGO_PKG_VERSION"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_ok() {
        let resp = health_check(Instant::now(), true);
        assert_eq!(resp.status, "ok");
    }

    #[test]
    fn database_down_is_degraded() {
        let resp = health_check(Instant::now(), false);
        assert_eq!(resp.status, "degraded");
        assert!(!resp.database);
    }

    #[test]
    fn uptime_increases() {
        let start = Instant::now()
            .checked_sub(std::time::Duration::from_secs(60))
            .unwrap();
        let resp = health_check(start, true);
        assert!(resp.uptime_secs >= 59);
    }

    #[test]
    fn serialization() {
        let resp = health_check(Instant::now(), true);
        let parsed = serde_json::to_value(&resp).unwrap();
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["database"], true);
        assert!(parsed["uptimeSecs"].is_number());
        assert!(parsed["version"].is_string());
    }
}
