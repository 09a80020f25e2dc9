//! Identifier and timestamp helpers.
//!
//! Every row id is a UUID v7 (time-ordered) with an entity-specific prefix,
//! e.g. `jrg-0190f5c2-...`. Timestamps are RFC 3339 UTC strings so they sort
//! lexically in `SQLite`.

use uuid::Uuid;

/// Prefix for [`crate::types::NagariProfile`] ids.
pub const PROFILE_PREFIX: &str = "prf";
/// Prefix for [`crate::types::Jorong`] ids.
pub const JORONG_PREFIX: &str = "jrg";
/// Prefix for [`crate::types::JorongStatistic`] ids.
pub const STATISTIC_PREFIX: &str = "stat";
/// Prefix for [`crate::types::News`] ids.
pub const NEWS_PREFIX: &str = "news";
/// Prefix for [`crate::types::GalleryItem`] ids.
pub const GALLERY_PREFIX: &str = "gal";
/// Prefix for [`crate::types::Faq`] ids.
pub const FAQ_PREFIX: &str = "faq";
/// Prefix for [`crate::types::WaliNagari`] ids.
pub const WALI_NAGARI_PREFIX: &str = "wali";
/// Prefix for [`crate::types::AdatIstiadat`] ids.
pub const ADAT_PREFIX: &str = "adat";
/// Prefix for [`crate::types::Admin`] ids.
pub const ADMIN_PREFIX: &str = "adm";

/// Generate a prefixed UUID v7 id.
pub fn generate_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::now_v7())
}

/// Current UTC time as an RFC 3339 string with second precision.
pub fn now_iso() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
