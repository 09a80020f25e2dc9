//! Business rules layered over the repository.
//!
//! Every admin write goes through here. Key rules:
//!
//! - **Required text**: required fields must be non-blank, on create and when
//!   present in an update.
//! - **Jorong references**: statistics and adat istiadat must point at an
//!   existing jorong, otherwise `NotFound`.
//! - **One record per (jorong, year)**: a duplicate is a `Conflict`, whether
//!   caught by the pre-check or by the `UNIQUE` constraint under a race.
//! - **Restricted jorong delete**: a jorong with dependent rows cannot be
//!   deleted.
//! - **Terms of office**: `endYear` may not precede `startYear`.

use rusqlite::Connection;
use tracing::{debug, info};

use nagari_core::{
    AdatCreateParams, AdatIstiadat, AdatUpdateParams, Faq, FaqCreateParams, FaqUpdateParams,
    GalleryCreateParams, GalleryItem, GalleryUpdateParams, Jorong, JorongCreateParams,
    JorongStatistic, JorongUpdateParams, NagariProfile, News, NewsCreateParams, NewsUpdateParams,
    ProfileUpdateParams, StatisticCreateParams, StatisticFilter, StatisticUpdateParams, Summary,
    Visibility, WaliNagari, WaliNagariCreateParams, WaliNagariUpdateParams,
};

use crate::errors::{Result, StoreError};
use crate::repository::Repository;

/// Earliest census year accepted.
pub const MIN_YEAR: i32 = 1900;
/// Latest census year accepted.
pub const MAX_YEAR: i32 = 2100;

/// CMS service with validation over [`Repository`].
pub struct CmsService;

impl CmsService {
    // ─────────────────────────────────────────────────────────────────────
    // Profile
    // ─────────────────────────────────────────────────────────────────────

    /// The Nagari profile.
    pub fn get_profile(conn: &Connection) -> Result<NagariProfile> {
        Repository::get_profile(conn)?.ok_or_else(|| StoreError::not_found("Profile", "nagari"))
    }

    /// Write the profile, creating it on first use.
    pub fn update_profile(conn: &Connection, params: &ProfileUpdateParams) -> Result<NagariProfile> {
        if let Some(ref name) = params.name {
            require("name", name)?;
        }
        let profile = Repository::upsert_profile(conn, params)?;
        info!(id = %profile.id, "profile updated");
        Ok(profile)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Jorong
    // ─────────────────────────────────────────────────────────────────────

    /// Get a jorong or fail with `NotFound`.
    pub fn get_jorong(conn: &Connection, id: &str) -> Result<Jorong> {
        Repository::get_jorong(conn, id)?.ok_or_else(|| StoreError::not_found("Jorong", id))
    }

    /// Validate and create a jorong.
    pub fn create_jorong(conn: &Connection, params: &JorongCreateParams) -> Result<Jorong> {
        require("name", &params.name)?;
        require("description", &params.description)?;
        check_area(params.area)?;
        let jorong = Repository::create_jorong(conn, params)?;
        info!(id = %jorong.id, name = %jorong.name, "jorong created");
        Ok(jorong)
    }

    /// Validate and update a jorong.
    pub fn update_jorong(
        conn: &Connection,
        id: &str,
        params: &JorongUpdateParams,
    ) -> Result<Jorong> {
        require_opt("name", params.name.as_deref())?;
        require_opt("description", params.description.as_deref())?;
        check_area(params.area)?;
        Repository::update_jorong(conn, id, params)?.ok_or_else(|| StoreError::not_found("Jorong", id))
    }

    /// Delete a jorong that nothing references.
    pub fn delete_jorong(conn: &Connection, id: &str) -> Result<()> {
        let _ = Self::get_jorong(conn, id)?;
        let dependents = Repository::count_jorong_dependents(conn, id)?;
        if !dependents.is_empty() {
            return Err(StoreError::Conflict(format!(
                "jorong {id} still has {} statistics record(s) and {} adat istiadat record(s)",
                dependents.statistics, dependents.adat
            )));
        }
        let deleted = Repository::delete_jorong(conn, id)
            .map_err(|e| e.or_conflict(format!("jorong {id} is still referenced")))?;
        if !deleted {
            return Err(StoreError::not_found("Jorong", id));
        }
        info!(id, "jorong deleted");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Statistics
    // ─────────────────────────────────────────────────────────────────────

    /// Get a statistics record or fail with `NotFound`.
    pub fn get_statistic(conn: &Connection, id: &str) -> Result<JorongStatistic> {
        Repository::get_statistic(conn, id)?.ok_or_else(|| StoreError::not_found("Statistic", id))
    }

    /// Validate and create a statistics record.
    pub fn create_statistic(
        conn: &Connection,
        params: &StatisticCreateParams,
    ) -> Result<JorongStatistic> {
        require("jorongId", &params.jorong_id)?;
        check_year(params.year)?;
        let _ = Self::get_jorong(conn, &params.jorong_id)?;
        if Repository::find_statistic(conn, &params.jorong_id, params.year)?.is_some() {
            return Err(duplicate_statistic(&params.jorong_id, params.year));
        }

        let record = Repository::create_statistic(conn, params)
            .map_err(|e| e.or_conflict(duplicate_message(&params.jorong_id, params.year)))?;
        info!(id = %record.id, jorong_id = %record.jorong_id, year = record.year, "statistic created");
        Ok(record)
    }

    /// Validate and update a statistics record.
    pub fn update_statistic(
        conn: &Connection,
        id: &str,
        params: &StatisticUpdateParams,
    ) -> Result<JorongStatistic> {
        let current = Self::get_statistic(conn, id)?;
        if let Some(ref jorong_id) = params.jorong_id {
            require("jorongId", jorong_id)?;
            let _ = Self::get_jorong(conn, jorong_id)?;
        }
        if let Some(year) = params.year {
            check_year(year)?;
        }

        let jorong_id = params.jorong_id.as_deref().unwrap_or(&current.jorong_id);
        let year = params.year.unwrap_or(current.year);
        if let Some(other) = Repository::find_statistic(conn, jorong_id, year)? {
            if other.id != id {
                return Err(duplicate_statistic(jorong_id, year));
            }
        }

        Repository::update_statistic(conn, id, params)
            .map_err(|e| e.or_conflict(duplicate_message(jorong_id, year)))?
            .ok_or_else(|| StoreError::not_found("Statistic", id))
    }

    /// Delete a statistics record.
    pub fn delete_statistic(conn: &Connection, id: &str) -> Result<()> {
        if !Repository::delete_statistic(conn, id)? {
            return Err(StoreError::not_found("Statistic", id));
        }
        info!(id, "statistic deleted");
        Ok(())
    }

    /// Aggregate the records for `year`, optionally for one jorong.
    pub fn statistics_summary(
        conn: &Connection,
        year: i32,
        jorong_id: Option<&str>,
    ) -> Result<Summary> {
        let records = Repository::list_statistics(
            conn,
            &StatisticFilter {
                year: Some(year),
                jorong_id: jorong_id.map(String::from),
            },
        )?;
        debug!(year, records = records.len(), "computing statistics summary");
        Ok(nagari_core::compute_summary(&records, year, jorong_id))
    }

    /// Years that have at least one statistics record, newest first.
    pub fn statistics_years(conn: &Connection) -> Result<Vec<i32>> {
        let records = Repository::list_statistics(conn, &StatisticFilter::default())?;
        Ok(nagari_core::available_years(&records))
    }

    // ─────────────────────────────────────────────────────────────────────
    // News
    // ─────────────────────────────────────────────────────────────────────

    /// Get a news article visible under `visibility`.
    pub fn get_news(conn: &Connection, id: &str, visibility: Visibility) -> Result<News> {
        Repository::get_news(conn, id, visibility)?.ok_or_else(|| StoreError::not_found("News", id))
    }

    /// Validate and create a news article.
    pub fn create_news(conn: &Connection, params: &NewsCreateParams) -> Result<News> {
        require("title", &params.title)?;
        require("content", &params.content)?;
        let news = Repository::create_news(conn, params)?;
        info!(id = %news.id, published = news.published, "news created");
        Ok(news)
    }

    /// Validate and update a news article.
    pub fn update_news(conn: &Connection, id: &str, params: &NewsUpdateParams) -> Result<News> {
        require_opt("title", params.title.as_deref())?;
        require_opt("content", params.content.as_deref())?;
        Repository::update_news(conn, id, params)?.ok_or_else(|| StoreError::not_found("News", id))
    }

    /// Delete a news article.
    pub fn delete_news(conn: &Connection, id: &str) -> Result<()> {
        if !Repository::delete_news(conn, id)? {
            return Err(StoreError::not_found("News", id));
        }
        info!(id, "news deleted");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Gallery
    // ─────────────────────────────────────────────────────────────────────

    /// Get a gallery item.
    pub fn get_gallery_item(conn: &Connection, id: &str) -> Result<GalleryItem> {
        Repository::get_gallery_item(conn, id)?.ok_or_else(|| StoreError::not_found("GalleryItem", id))
    }

    /// Validate and create a gallery item.
    pub fn create_gallery_item(conn: &Connection, params: &GalleryCreateParams) -> Result<GalleryItem> {
        require("title", &params.title)?;
        require("imageUrl", &params.image_url)?;
        let item = Repository::create_gallery_item(conn, params)?;
        info!(id = %item.id, category = %item.category, "gallery item created");
        Ok(item)
    }

    /// Validate and update a gallery item.
    pub fn update_gallery_item(
        conn: &Connection,
        id: &str,
        params: &GalleryUpdateParams,
    ) -> Result<GalleryItem> {
        require_opt("title", params.title.as_deref())?;
        require_opt("imageUrl", params.image_url.as_deref())?;
        Repository::update_gallery_item(conn, id, params)?
            .ok_or_else(|| StoreError::not_found("GalleryItem", id))
    }

    /// Delete a gallery item.
    pub fn delete_gallery_item(conn: &Connection, id: &str) -> Result<()> {
        if !Repository::delete_gallery_item(conn, id)? {
            return Err(StoreError::not_found("GalleryItem", id));
        }
        info!(id, "gallery item deleted");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // FAQ
    // ─────────────────────────────────────────────────────────────────────

    /// Get an FAQ entry.
    pub fn get_faq(conn: &Connection, id: &str) -> Result<Faq> {
        Repository::get_faq(conn, id)?.ok_or_else(|| StoreError::not_found("Faq", id))
    }

    /// Validate and create an FAQ entry.
    pub fn create_faq(conn: &Connection, params: &FaqCreateParams) -> Result<Faq> {
        require("question", &params.question)?;
        require("answer", &params.answer)?;
        let faq = Repository::create_faq(conn, params)?;
        info!(id = %faq.id, "faq created");
        Ok(faq)
    }

    /// Validate and update an FAQ entry.
    pub fn update_faq(conn: &Connection, id: &str, params: &FaqUpdateParams) -> Result<Faq> {
        require_opt("question", params.question.as_deref())?;
        require_opt("answer", params.answer.as_deref())?;
        Repository::update_faq(conn, id, params)?.ok_or_else(|| StoreError::not_found("Faq", id))
    }

    /// Delete an FAQ entry.
    pub fn delete_faq(conn: &Connection, id: &str) -> Result<()> {
        if !Repository::delete_faq(conn, id)? {
            return Err(StoreError::not_found("Faq", id));
        }
        info!(id, "faq deleted");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Wali Nagari
    // ─────────────────────────────────────────────────────────────────────

    /// Get a Wali Nagari record.
    pub fn get_wali_nagari(conn: &Connection, id: &str) -> Result<WaliNagari> {
        Repository::get_wali_nagari(conn, id)?.ok_or_else(|| StoreError::not_found("WaliNagari", id))
    }

    /// Validate and create a Wali Nagari record.
    pub fn create_wali_nagari(
        conn: &Connection,
        params: &WaliNagariCreateParams,
    ) -> Result<WaliNagari> {
        require("name", &params.name)?;
        check_year(params.start_year)?;
        check_term(params.start_year, params.end_year)?;
        let wali = Repository::create_wali_nagari(conn, params)?;
        info!(id = %wali.id, "wali nagari created");
        Ok(wali)
    }

    /// Validate and update a Wali Nagari record.
    pub fn update_wali_nagari(
        conn: &Connection,
        id: &str,
        params: &WaliNagariUpdateParams,
    ) -> Result<WaliNagari> {
        let current = Self::get_wali_nagari(conn, id)?;
        require_opt("name", params.name.as_deref())?;
        if let Some(start) = params.start_year {
            check_year(start)?;
        }
        check_term(
            params.start_year.unwrap_or(current.start_year),
            params.end_year.or(current.end_year),
        )?;
        Repository::update_wali_nagari(conn, id, params)?
            .ok_or_else(|| StoreError::not_found("WaliNagari", id))
    }

    /// Delete a Wali Nagari record.
    pub fn delete_wali_nagari(conn: &Connection, id: &str) -> Result<()> {
        if !Repository::delete_wali_nagari(conn, id)? {
            return Err(StoreError::not_found("WaliNagari", id));
        }
        info!(id, "wali nagari deleted");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Adat istiadat
    // ─────────────────────────────────────────────────────────────────────

    /// Get an adat istiadat record.
    pub fn get_adat(conn: &Connection, id: &str) -> Result<AdatIstiadat> {
        Repository::get_adat(conn, id)?.ok_or_else(|| StoreError::not_found("AdatIstiadat", id))
    }

    /// Validate and create an adat istiadat record.
    pub fn create_adat(conn: &Connection, params: &AdatCreateParams) -> Result<AdatIstiadat> {
        require("jorongId", &params.jorong_id)?;
        require("title", &params.title)?;
        require("description", &params.description)?;
        require("content", &params.content)?;
        require("category", &params.category)?;
        let _ = Self::get_jorong(conn, &params.jorong_id)?;
        let adat = Repository::create_adat(conn, params)?;
        info!(id = %adat.id, jorong_id = %adat.jorong_id, "adat istiadat created");
        Ok(adat)
    }

    /// Validate and update an adat istiadat record.
    pub fn update_adat(
        conn: &Connection,
        id: &str,
        params: &AdatUpdateParams,
    ) -> Result<AdatIstiadat> {
        require_opt("title", params.title.as_deref())?;
        require_opt("description", params.description.as_deref())?;
        require_opt("content", params.content.as_deref())?;
        require_opt("category", params.category.as_deref())?;
        if let Some(ref jorong_id) = params.jorong_id {
            require("jorongId", jorong_id)?;
            let _ = Self::get_jorong(conn, jorong_id)?;
        }
        Repository::update_adat(conn, id, params)?
            .ok_or_else(|| StoreError::not_found("AdatIstiadat", id))
    }

    /// Delete an adat istiadat record.
    pub fn delete_adat(conn: &Connection, id: &str) -> Result<()> {
        if !Repository::delete_adat(conn, id)? {
            return Err(StoreError::not_found("AdatIstiadat", id));
        }
        info!(id, "adat istiadat deleted");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Validation helpers
// ─────────────────────────────────────────────────────────────────────────────

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StoreError::validation(format!("{field} is required")));
    }
    Ok(())
}

fn require_opt(field: &str, value: Option<&str>) -> Result<()> {
    value.map_or(Ok(()), |v| require(field, v))
}

fn check_year(year: i32) -> Result<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(StoreError::validation(format!(
            "year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
        )));
    }
    Ok(())
}

fn check_term(start_year: i32, end_year: Option<i32>) -> Result<()> {
    match end_year {
        Some(end) if end < start_year => Err(StoreError::validation(format!(
            "endYear ({end}) must not be before startYear ({start_year})"
        ))),
        _ => Ok(()),
    }
}

fn check_area(area: Option<f64>) -> Result<()> {
    match area {
        Some(a) if !a.is_finite() || a < 0.0 => {
            Err(StoreError::validation("area must be a non-negative number"))
        }
        _ => Ok(()),
    }
}

fn duplicate_message(jorong_id: &str, year: i32) -> String {
    format!("statistics for jorong {jorong_id} in {year} already exist")
}

fn duplicate_statistic(jorong_id: &str, year: i32) -> StoreError {
    StoreError::Conflict(duplicate_message(jorong_id, year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::setup_db;
    use assert_matches::assert_matches;

    fn jorong(conn: &Connection, name: &str) -> Jorong {
        CmsService::create_jorong(
            conn,
            &JorongCreateParams {
                name: name.into(),
                description: format!("Jorong {name}"),
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn stat_params(jorong_id: &str, year: i32) -> StatisticCreateParams {
        StatisticCreateParams {
            jorong_id: jorong_id.into(),
            year,
            population: 1000,
            male_count: 520,
            female_count: 480,
            child_count: Some(250),
            adult_count: Some(650),
            elderly_count: Some(100),
            households: Some(250),
        }
    }

    // ── Jorong ──────────────────────────────────────────────────────

    #[test]
    fn blank_name_rejected() {
        let conn = setup_db();
        let result = CmsService::create_jorong(
            &conn,
            &JorongCreateParams {
                name: "   ".into(),
                description: "x".into(),
                ..Default::default()
            },
        );
        assert_matches!(result, Err(StoreError::Validation(m)) if m.contains("name"));
    }

    #[test]
    fn negative_area_rejected() {
        let conn = setup_db();
        let result = CmsService::create_jorong(
            &conn,
            &JorongCreateParams {
                name: "A".into(),
                description: "x".into(),
                area: Some(-1.0),
                ..Default::default()
            },
        );
        assert_matches!(result, Err(StoreError::Validation(_)));
    }

    #[test]
    fn update_missing_jorong_not_found() {
        let conn = setup_db();
        let result = CmsService::update_jorong(
            &conn,
            "jrg-missing",
            &JorongUpdateParams {
                population: Some(3),
                ..Default::default()
            },
        );
        assert_matches!(result, Err(StoreError::NotFound { entity: "Jorong", .. }));
    }

    #[test]
    fn delete_jorong_with_statistics_is_conflict() {
        let conn = setup_db();
        let j = jorong(&conn, "Balai");
        let _ = CmsService::create_statistic(&conn, &stat_params(&j.id, 2024)).unwrap();
        let result = CmsService::delete_jorong(&conn, &j.id);
        assert_matches!(result, Err(StoreError::Conflict(m)) if m.contains("1 statistics"));
        assert!(Repository::get_jorong(&conn, &j.id).unwrap().is_some());
    }

    #[test]
    fn delete_free_jorong() {
        let conn = setup_db();
        let j = jorong(&conn, "Balai");
        CmsService::delete_jorong(&conn, &j.id).unwrap();
        assert_matches!(
            CmsService::delete_jorong(&conn, &j.id),
            Err(StoreError::NotFound { .. })
        );
    }

    // ── Statistics ──────────────────────────────────────────────────

    #[test]
    fn statistic_for_unknown_jorong_not_found() {
        let conn = setup_db();
        let result = CmsService::create_statistic(&conn, &stat_params("jrg-missing", 2024));
        assert_matches!(result, Err(StoreError::NotFound { entity: "Jorong", .. }));
    }

    #[test]
    fn duplicate_statistic_is_conflict() {
        let conn = setup_db();
        let j = jorong(&conn, "Balai");
        let _ = CmsService::create_statistic(&conn, &stat_params(&j.id, 2024)).unwrap();
        let result = CmsService::create_statistic(&conn, &stat_params(&j.id, 2024));
        assert_matches!(result, Err(StoreError::Conflict(_)));
        let _ = CmsService::create_statistic(&conn, &stat_params(&j.id, 2023)).unwrap();
    }

    #[test]
    fn update_into_existing_pair_is_conflict() {
        let conn = setup_db();
        let j = jorong(&conn, "Balai");
        let _ = CmsService::create_statistic(&conn, &stat_params(&j.id, 2024)).unwrap();
        let older = CmsService::create_statistic(&conn, &stat_params(&j.id, 2023)).unwrap();
        let result = CmsService::update_statistic(
            &conn,
            &older.id,
            &StatisticUpdateParams {
                year: Some(2024),
                ..Default::default()
            },
        );
        assert_matches!(result, Err(StoreError::Conflict(_)));

        let same = CmsService::update_statistic(
            &conn,
            &older.id,
            &StatisticUpdateParams {
                year: Some(2023),
                households: Some(1),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(same.households, 1);
    }

    #[test]
    fn out_of_range_year_rejected() {
        let conn = setup_db();
        let j = jorong(&conn, "Balai");
        let result = CmsService::create_statistic(&conn, &stat_params(&j.id, 24));
        assert_matches!(result, Err(StoreError::Validation(_)));
    }

    #[test]
    fn summary_matches_reference_scenario() {
        let conn = setup_db();
        let j = jorong(&conn, "Balai");
        let _ = CmsService::create_statistic(&conn, &stat_params(&j.id, 2024)).unwrap();

        let summary = CmsService::statistics_summary(&conn, 2024, None).unwrap();
        assert_eq!(summary.total_population, 1000);
        assert_eq!(summary.by_gender.male.percentage, 52.0);
        assert_eq!(summary.by_age_group.child.percentage, 25.0);
        assert_eq!(summary.by_jorong[0].name, "Balai");

        let empty = CmsService::statistics_summary(&conn, 2023, None).unwrap();
        assert_eq!(empty.total_population, 0);
        assert!(empty.by_jorong.is_empty());
    }

    #[test]
    fn years_descending() {
        let conn = setup_db();
        let a = jorong(&conn, "A");
        let b = jorong(&conn, "B");
        for (j, year) in [(&a, 2024), (&a, 2023), (&b, 2024), (&b, 2022)] {
            let _ = CmsService::create_statistic(&conn, &stat_params(&j.id, year)).unwrap();
        }
        assert_eq!(CmsService::statistics_years(&conn).unwrap(), vec![2024, 2023, 2022]);
    }

    // ── Content ─────────────────────────────────────────────────────

    #[test]
    fn news_requires_title_and_content() {
        let conn = setup_db();
        let result = CmsService::create_news(
            &conn,
            &NewsCreateParams {
                title: "T".into(),
                ..Default::default()
            },
        );
        assert_matches!(result, Err(StoreError::Validation(m)) if m.contains("content"));
    }

    #[test]
    fn unpublished_news_hidden_publicly() {
        let conn = setup_db();
        let news = CmsService::create_news(
            &conn,
            &NewsCreateParams {
                title: "T".into(),
                content: "C".into(),
                published: Some(false),
                ..Default::default()
            },
        )
        .unwrap();
        assert_matches!(
            CmsService::get_news(&conn, &news.id, Visibility::Public),
            Err(StoreError::NotFound { .. })
        );
        assert!(CmsService::get_news(&conn, &news.id, Visibility::All).is_ok());
    }

    #[test]
    fn update_blank_title_rejected() {
        let conn = setup_db();
        let news = CmsService::create_news(
            &conn,
            &NewsCreateParams {
                title: "T".into(),
                content: "C".into(),
                ..Default::default()
            },
        )
        .unwrap();
        let result = CmsService::update_news(
            &conn,
            &news.id,
            &NewsUpdateParams {
                title: Some(String::new()),
                ..Default::default()
            },
        );
        assert_matches!(result, Err(StoreError::Validation(_)));
    }

    #[test]
    fn wali_end_before_start_rejected() {
        let conn = setup_db();
        let result = CmsService::create_wali_nagari(
            &conn,
            &WaliNagariCreateParams {
                name: "A".into(),
                start_year: 2010,
                end_year: Some(2005),
                order: 1,
                ..Default::default()
            },
        );
        assert_matches!(result, Err(StoreError::Validation(m)) if m.contains("endYear"));
    }

    #[test]
    fn wali_update_checks_against_stored_start() {
        let conn = setup_db();
        let wali = CmsService::create_wali_nagari(
            &conn,
            &WaliNagariCreateParams {
                name: "A".into(),
                start_year: 2010,
                order: 1,
                ..Default::default()
            },
        )
        .unwrap();
        let result = CmsService::update_wali_nagari(
            &conn,
            &wali.id,
            &WaliNagariUpdateParams {
                end_year: Some(2009),
                ..Default::default()
            },
        );
        assert_matches!(result, Err(StoreError::Validation(_)));
    }

    #[test]
    fn adat_requires_existing_jorong() {
        let conn = setup_db();
        let result = CmsService::create_adat(
            &conn,
            &AdatCreateParams {
                jorong_id: "jrg-missing".into(),
                title: "T".into(),
                description: "D".into(),
                content: "C".into(),
                category: "upacara".into(),
                images: None,
            },
        );
        assert_matches!(result, Err(StoreError::NotFound { entity: "Jorong", .. }));
    }

    #[test]
    fn gallery_and_faq_delete_missing() {
        let conn = setup_db();
        assert_matches!(
            CmsService::delete_gallery_item(&conn, "gal-x"),
            Err(StoreError::NotFound { .. })
        );
        assert_matches!(CmsService::delete_faq(&conn, "faq-x"), Err(StoreError::NotFound { .. }));
    }

    #[test]
    fn profile_missing_then_created() {
        let conn = setup_db();
        assert_matches!(CmsService::get_profile(&conn), Err(StoreError::NotFound { .. }));
        let profile = CmsService::update_profile(
            &conn,
            &ProfileUpdateParams {
                name: Some("Nagari Koto".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(CmsService::get_profile(&conn).unwrap().id, profile.id);
    }
}
