//! Read-only endpoints for the public site.
//!
//! News and FAQ listings only ever return published rows here.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use nagari_core::{
    AdatIstiadat, Faq, GalleryItem, Jorong, JorongStatistic, NagariProfile, News, StatisticFilter,
    Summary, Visibility, WaliNagari,
};
use nagari_store::{CmsService, Repository};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Public routes, mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/jorongs", get(list_jorongs))
        .route("/jorongs/{id}", get(get_jorong))
        .route("/statistics", get(list_statistics))
        .route("/statistics/years", get(statistics_years))
        .route("/statistics/summary", get(statistics_summary))
        .route("/news", get(list_news))
        .route("/news/{id}", get(get_news))
        .route("/gallery", get(list_gallery))
        .route("/faq", get(list_faq))
        .route("/wali-nagari", get(list_wali_nagari))
        .route("/adat-istiadat", get(list_adat))
        .route("/adat-istiadat/{id}", get(get_adat))
}

/// `?category=`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CategoryQuery {
    /// Only rows in this category.
    pub category: Option<String>,
}

/// `?jorongId=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JorongQuery {
    /// Only rows for this jorong.
    pub jorong_id: Option<String>,
}

/// `?year=&jorongId=` for the summary endpoint. `year` is required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    /// Census year to aggregate.
    pub year: i32,
    /// Restrict to one jorong.
    #[serde(default)]
    pub jorong_id: Option<String>,
}

/// Body of `GET /api/statistics/years`.
#[derive(Debug, Serialize)]
pub struct YearsResponse {
    /// Distinct years, newest first.
    pub years: Vec<i32>,
}

/// Treat `?key=` the same as an absent key.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

async fn get_profile(State(state): State<AppState>) -> ApiResult<Json<NagariProfile>> {
    let profile = state.with_conn(CmsService::get_profile).await?;
    Ok(Json(profile))
}

async fn list_jorongs(State(state): State<AppState>) -> ApiResult<Json<Vec<Jorong>>> {
    let jorongs = state.with_conn(Repository::list_jorongs).await?;
    Ok(Json(jorongs))
}

async fn get_jorong(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Jorong>> {
    let jorong = state
        .with_conn(move |conn| CmsService::get_jorong(conn, &id))
        .await?;
    Ok(Json(jorong))
}

async fn list_statistics(
    State(state): State<AppState>,
    WithRejection(Query(mut filter), _): WithRejection<Query<StatisticFilter>, ApiError>,
) -> ApiResult<Json<Vec<JorongStatistic>>> {
    filter.jorong_id = non_empty(filter.jorong_id);
    let records = state
        .with_conn(move |conn| Repository::list_statistics(conn, &filter))
        .await?;
    Ok(Json(records))
}

async fn statistics_years(State(state): State<AppState>) -> ApiResult<Json<YearsResponse>> {
    let years = state.with_conn(CmsService::statistics_years).await?;
    Ok(Json(YearsResponse { years }))
}

async fn statistics_summary(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<SummaryQuery>, ApiError>,
) -> ApiResult<Json<Summary>> {
    let jorong_id = non_empty(query.jorong_id);
    let summary = state
        .with_conn(move |conn| CmsService::statistics_summary(conn, query.year, jorong_id.as_deref()))
        .await?;
    Ok(Json(summary))
}

async fn list_news(State(state): State<AppState>) -> ApiResult<Json<Vec<News>>> {
    let news = state
        .with_conn(|conn| Repository::list_news(conn, Visibility::Public))
        .await?;
    Ok(Json(news))
}

async fn get_news(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<News>> {
    let news = state
        .with_conn(move |conn| CmsService::get_news(conn, &id, Visibility::Public))
        .await?;
    Ok(Json(news))
}

async fn list_gallery(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<CategoryQuery>, ApiError>,
) -> ApiResult<Json<Vec<GalleryItem>>> {
    let category = non_empty(query.category);
    let items = state
        .with_conn(move |conn| Repository::list_gallery(conn, category.as_deref()))
        .await?;
    Ok(Json(items))
}

async fn list_faq(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<CategoryQuery>, ApiError>,
) -> ApiResult<Json<Vec<Faq>>> {
    let category = non_empty(query.category);
    let faqs = state
        .with_conn(move |conn| Repository::list_faqs(conn, Visibility::Public, category.as_deref()))
        .await?;
    Ok(Json(faqs))
}

async fn list_wali_nagari(State(state): State<AppState>) -> ApiResult<Json<Vec<WaliNagari>>> {
    let wali = state.with_conn(Repository::list_wali_nagari).await?;
    Ok(Json(wali))
}

async fn list_adat(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<JorongQuery>, ApiError>,
) -> ApiResult<Json<Vec<AdatIstiadat>>> {
    let jorong_id = non_empty(query.jorong_id);
    let adat = state
        .with_conn(move |conn| Repository::list_adat(conn, jorong_id.as_deref()))
        .await?;
    Ok(Json(adat))
}

async fn get_adat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<AdatIstiadat>> {
    let adat = state
        .with_conn(move |conn| CmsService::get_adat(conn, &id))
        .await?;
    Ok(Json(adat))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_drops_blank_values() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("jrg-1".into())), Some("jrg-1".into()));
    }

    #[test]
    fn years_response_shape() {
        let json = serde_json::to_value(YearsResponse { years: vec![2024, 2023] }).unwrap();
        assert_eq!(json, serde_json::json!({"years": [2024, 2023]}));
    }
}
