//! Domain entities and their create/update parameter types.
//!
//! All types serialize with camelCase field names, which is the JSON shape
//! the public site and the admin dashboard consume. Create params carry the
//! required fields as plain values, so a payload missing one fails to
//! deserialize. Update params are all-optional: an absent field leaves the
//! stored value unchanged.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Visibility
// ─────────────────────────────────────────────────────────────────────────────

/// Which rows a listing may return for publishable content (news, FAQ).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    /// Only published rows. Used by every public endpoint.
    #[default]
    Public,
    /// Published and draft rows. Used by the admin API.
    All,
}

impl Visibility {
    /// Whether a row with the given `published` flag is visible.
    pub fn allows(self, published: bool) -> bool {
        match self {
            Self::Public => published,
            Self::All => true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Nagari profile
// ─────────────────────────────────────────────────────────────────────────────

/// The single profile row describing the Nagari itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NagariProfile {
    /// Row id.
    pub id: String,
    /// Display name of the Nagari.
    pub name: String,
    /// Short description.
    pub description: String,
    /// History text.
    pub history: String,
    /// Vision statement.
    pub vision: String,
    /// Mission statement.
    pub mission: String,
    /// Logo image URL.
    pub logo: Option<String>,
    /// Cover image URL.
    pub cover_image: Option<String>,
    /// Office address.
    pub address: String,
    /// Office phone number.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Website URL.
    pub website: Option<String>,
    /// Office latitude.
    pub latitude: Option<f64>,
    /// Office longitude.
    pub longitude: Option<f64>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Fields accepted when writing the profile. The first write creates the row.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdateParams {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New history text.
    pub history: Option<String>,
    /// New vision.
    pub vision: Option<String>,
    /// New mission.
    pub mission: Option<String>,
    /// New logo URL.
    pub logo: Option<String>,
    /// New cover image URL.
    pub cover_image: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New website.
    pub website: Option<String>,
    /// New latitude.
    pub latitude: Option<f64>,
    /// New longitude.
    pub longitude: Option<f64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Jorong
// ─────────────────────────────────────────────────────────────────────────────

/// A jorong, the administrative subdivision of a Nagari.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Jorong {
    /// Row id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Area in km².
    pub area: Option<f64>,
    /// Population as entered by the administrator.
    pub population: u32,
    /// Name of the head of the jorong.
    pub kepala_jorong: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Parameters for creating a jorong.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JorongCreateParams {
    /// Display name (required, non-empty).
    pub name: String,
    /// Description (required, non-empty).
    pub description: String,
    /// Area in km².
    pub area: Option<f64>,
    /// Population, defaults to 0.
    pub population: Option<u32>,
    /// Head of the jorong.
    pub kepala_jorong: Option<String>,
}

/// Parameters for updating a jorong.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JorongUpdateParams {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New area.
    pub area: Option<f64>,
    /// New population.
    pub population: Option<u32>,
    /// New head. An empty string clears it.
    pub kepala_jorong: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Statistics
// ─────────────────────────────────────────────────────────────────────────────

/// One year's demographic snapshot for one jorong.
///
/// At most one record exists per `(jorong_id, year)`. The gender and age
/// counts are administrator-entered and are not required to add up to
/// `population`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JorongStatistic {
    /// Row id.
    pub id: String,
    /// Owning jorong.
    pub jorong_id: String,
    /// Owning jorong's name, joined on read.
    pub jorong_name: String,
    /// Census year.
    pub year: i32,
    /// Total population.
    pub population: u32,
    /// Male residents.
    pub male_count: u32,
    /// Female residents.
    pub female_count: u32,
    /// Residents aged 0-17.
    pub child_count: u32,
    /// Residents aged 18-59.
    pub adult_count: u32,
    /// Residents aged 60 and over.
    pub elderly_count: u32,
    /// Number of households (kepala keluarga).
    pub households: u32,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Parameters for creating a statistics record.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticCreateParams {
    /// Owning jorong (must exist).
    pub jorong_id: String,
    /// Census year.
    pub year: i32,
    /// Total population.
    pub population: u32,
    /// Male residents.
    pub male_count: u32,
    /// Female residents.
    pub female_count: u32,
    /// Residents aged 0-17, defaults to 0.
    pub child_count: Option<u32>,
    /// Residents aged 18-59, defaults to 0.
    pub adult_count: Option<u32>,
    /// Residents aged 60 and over, defaults to 0.
    pub elderly_count: Option<u32>,
    /// Households, defaults to 0.
    pub households: Option<u32>,
}

/// Parameters for updating a statistics record.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatisticUpdateParams {
    /// Move the record to another jorong.
    pub jorong_id: Option<String>,
    /// New year.
    pub year: Option<i32>,
    /// New population.
    pub population: Option<u32>,
    /// New male count.
    pub male_count: Option<u32>,
    /// New female count.
    pub female_count: Option<u32>,
    /// New child count.
    pub child_count: Option<u32>,
    /// New adult count.
    pub adult_count: Option<u32>,
    /// New elderly count.
    pub elderly_count: Option<u32>,
    /// New household count.
    pub households: Option<u32>,
}

/// Filter for listing statistics records.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatisticFilter {
    /// Only records for this year.
    pub year: Option<i32>,
    /// Only records for this jorong.
    pub jorong_id: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// News
// ─────────────────────────────────────────────────────────────────────────────

/// A news article (berita).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    /// Row id.
    pub id: String,
    /// Headline.
    pub title: String,
    /// HTML body.
    pub content: String,
    /// Teaser text.
    pub excerpt: String,
    /// Cover image URL.
    pub cover_image: Option<String>,
    /// Comma-separated tags.
    pub tags: Option<String>,
    /// Author name.
    pub author: String,
    /// Whether the article is visible on the public site.
    pub published: bool,
    /// When the article was last published.
    pub published_at: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Parameters for creating a news article.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsCreateParams {
    /// Headline (required).
    pub title: String,
    /// Body (required).
    pub content: String,
    /// Teaser, derived from the body when absent.
    pub excerpt: Option<String>,
    /// Cover image URL.
    pub cover_image: Option<String>,
    /// Comma-separated tags.
    pub tags: Option<String>,
    /// Author, defaults to `Admin Nagari`.
    pub author: Option<String>,
    /// Publish immediately, defaults to `true`.
    pub published: Option<bool>,
}

/// Parameters for updating a news article.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsUpdateParams {
    /// New headline.
    pub title: Option<String>,
    /// New body.
    pub content: Option<String>,
    /// New teaser.
    pub excerpt: Option<String>,
    /// New cover image. An empty string clears it.
    pub cover_image: Option<String>,
    /// New tags. An empty string clears them.
    pub tags: Option<String>,
    /// New author.
    pub author: Option<String>,
    /// Publish (stamps `publishedAt`) or unpublish (clears it).
    pub published: Option<bool>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Gallery
// ─────────────────────────────────────────────────────────────────────────────

/// An image in the public gallery.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    /// Row id.
    pub id: String,
    /// Caption title.
    pub title: String,
    /// Caption text.
    pub description: Option<String>,
    /// Image URL.
    pub image_url: String,
    /// Category, e.g. `kegiatan`.
    pub category: String,
    /// Date of the pictured event.
    pub event_date: Option<String>,
    /// Comma-separated tags.
    pub tags: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Parameters for creating a gallery item.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryCreateParams {
    /// Caption title (required).
    pub title: String,
    /// Image URL (required).
    pub image_url: String,
    /// Caption text.
    pub description: Option<String>,
    /// Category, defaults to `kegiatan`.
    pub category: Option<String>,
    /// Event date (`YYYY-MM-DD` or RFC 3339).
    pub event_date: Option<String>,
    /// Comma-separated tags.
    pub tags: Option<String>,
}

/// Parameters for updating a gallery item.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryUpdateParams {
    /// New title.
    pub title: Option<String>,
    /// New image URL.
    pub image_url: Option<String>,
    /// New description. An empty string clears it.
    pub description: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New event date. An empty string clears it.
    pub event_date: Option<String>,
    /// New tags. An empty string clears them.
    pub tags: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// FAQ
// ─────────────────────────────────────────────────────────────────────────────

/// A frequently asked question.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    /// Row id.
    pub id: String,
    /// Question text.
    pub question: String,
    /// Answer text.
    pub answer: String,
    /// Category, e.g. `pelayanan`.
    pub category: Option<String>,
    /// Sort position, ascending.
    pub order: i64,
    /// Whether the entry is visible on the public site.
    pub published: bool,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Parameters for creating an FAQ entry.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqCreateParams {
    /// Question (required).
    pub question: String,
    /// Answer (required).
    pub answer: String,
    /// Category.
    pub category: Option<String>,
    /// Sort position, defaults to 0.
    pub order: Option<i64>,
    /// Visibility, defaults to `true`.
    pub published: Option<bool>,
}

/// Parameters for updating an FAQ entry.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaqUpdateParams {
    /// New question.
    pub question: Option<String>,
    /// New answer.
    pub answer: Option<String>,
    /// New category. An empty string clears it.
    pub category: Option<String>,
    /// New sort position.
    pub order: Option<i64>,
    /// New visibility.
    pub published: Option<bool>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Wali Nagari
// ─────────────────────────────────────────────────────────────────────────────

/// A term of office of a Wali Nagari (village head).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaliNagari {
    /// Row id.
    pub id: String,
    /// Name of the head.
    pub name: String,
    /// First year in office.
    pub start_year: i32,
    /// Last year in office, `None` for the incumbent.
    pub end_year: Option<i32>,
    /// Portrait URL.
    pub photo: Option<String>,
    /// Biography text.
    pub biography: Option<String>,
    /// Achievements text.
    pub achievements: Option<String>,
    /// Sort position, ascending.
    pub order: i64,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

impl WaliNagari {
    /// Whether this term is still running.
    pub fn is_incumbent(&self) -> bool {
        self.end_year.is_none()
    }
}

/// Parameters for creating a Wali Nagari record.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaliNagariCreateParams {
    /// Name (required).
    pub name: String,
    /// First year in office (required).
    pub start_year: i32,
    /// Sort position (required).
    pub order: i64,
    /// Last year in office.
    pub end_year: Option<i32>,
    /// Portrait URL.
    pub photo: Option<String>,
    /// Biography.
    pub biography: Option<String>,
    /// Achievements.
    pub achievements: Option<String>,
}

/// Parameters for updating a Wali Nagari record.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WaliNagariUpdateParams {
    /// New name.
    pub name: Option<String>,
    /// New start year.
    pub start_year: Option<i32>,
    /// New end year.
    pub end_year: Option<i32>,
    /// New portrait. An empty string clears it.
    pub photo: Option<String>,
    /// New biography. An empty string clears it.
    pub biography: Option<String>,
    /// New achievements. An empty string clears them.
    pub achievements: Option<String>,
    /// New sort position.
    pub order: Option<i64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Adat istiadat
// ─────────────────────────────────────────────────────────────────────────────

/// A custom or tradition recorded for a jorong.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdatIstiadat {
    /// Row id.
    pub id: String,
    /// Owning jorong.
    pub jorong_id: String,
    /// Owning jorong's name, joined on read.
    pub jorong_name: String,
    /// Title.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Full text.
    pub content: String,
    /// Category, e.g. `upacara`.
    pub category: String,
    /// Image URLs, stored as the client sent them.
    pub images: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Parameters for creating an adat istiadat record.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdatCreateParams {
    /// Owning jorong (must exist).
    pub jorong_id: String,
    /// Title (required).
    pub title: String,
    /// Description (required).
    pub description: String,
    /// Full text (required).
    pub content: String,
    /// Category (required).
    pub category: String,
    /// Image URLs.
    pub images: Option<String>,
}

/// Parameters for updating an adat istiadat record.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdatUpdateParams {
    /// Move to another jorong.
    pub jorong_id: Option<String>,
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New content.
    pub content: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New images. An empty string clears them.
    pub images: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Admin
// ─────────────────────────────────────────────────────────────────────────────

/// An administrator account, without its credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    /// Row id.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: String,
}
