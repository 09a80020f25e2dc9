//! Authenticated management endpoints, mounted under `/api/admin`.
//!
//! Every entity type exposes the same shape: `GET`/`POST` on the collection
//! and `GET`/`PUT`/`DELETE` on `/{id}`. Drafts are visible here.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::middleware::from_extractor_with_state;
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use tracing::info;

use nagari_core::{
    AdatCreateParams, AdatIstiadat, AdatUpdateParams, Admin, Faq, FaqCreateParams,
    FaqUpdateParams, GalleryCreateParams, GalleryItem, GalleryUpdateParams, Jorong,
    JorongCreateParams, JorongStatistic, JorongUpdateParams, NagariProfile, News,
    NewsCreateParams, NewsUpdateParams, ProfileUpdateParams, StatisticCreateParams,
    StatisticFilter, StatisticUpdateParams, Visibility, WaliNagari, WaliNagariCreateParams,
    WaliNagariUpdateParams,
};
use nagari_store::{CmsService, Repository};

use crate::error::{ApiError, ApiResult};
use crate::extract::AdminClaims;
use crate::routes::public::{CategoryQuery, JorongQuery, non_empty};
use crate::state::AppState;

type Body<T> = WithRejection<Json<T>, ApiError>;
type Created<T> = ApiResult<(StatusCode, Json<T>)>;

/// Admin routes. Every route requires a valid bearer token.
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/profile", get(get_profile).put(update_profile))
        .route("/jorongs", get(list_jorongs).post(create_jorong))
        .route(
            "/jorongs/{id}",
            get(get_jorong).put(update_jorong).delete(delete_jorong),
        )
        .route("/statistics", get(list_statistics).post(create_statistic))
        .route(
            "/statistics/{id}",
            get(get_statistic).put(update_statistic).delete(delete_statistic),
        )
        .route("/news", get(list_news).post(create_news))
        .route(
            "/news/{id}",
            get(get_news).put(update_news).delete(delete_news),
        )
        .route("/gallery", get(list_gallery).post(create_gallery_item))
        .route(
            "/gallery/{id}",
            get(get_gallery_item)
                .put(update_gallery_item)
                .delete(delete_gallery_item),
        )
        .route("/faq", get(list_faq).post(create_faq))
        .route("/faq/{id}", get(get_faq).put(update_faq).delete(delete_faq))
        .route("/wali-nagari", get(list_wali_nagari).post(create_wali_nagari))
        .route(
            "/wali-nagari/{id}",
            get(get_wali_nagari)
                .put(update_wali_nagari)
                .delete(delete_wali_nagari),
        )
        .route("/adat-istiadat", get(list_adat).post(create_adat))
        .route(
            "/adat-istiadat/{id}",
            get(get_adat).put(update_adat).delete(delete_adat),
        )
        .route_layer(from_extractor_with_state::<AdminClaims, AppState>(
            state.clone(),
        ))
}

/// Body returned by every delete.
#[derive(Debug, Serialize)]
pub struct Deleted {
    /// Human-readable confirmation.
    pub message: String,
}

fn deleted(entity: &str, id: &str, admin: &AdminClaims) -> Json<Deleted> {
    info!(entity, id, admin = %admin.0.username, "deleted");
    Json(Deleted {
        message: format!("{entity} deleted"),
    })
}

async fn me(State(state): State<AppState>, AdminClaims(claims): AdminClaims) -> ApiResult<Json<Admin>> {
    let admin = state
        .with_conn(move |conn| Repository::get_admin(conn, &claims.sub))
        .await?
        .ok_or_else(|| ApiError::Unauthorized("admin account no longer exists".into()))?;
    Ok(Json(admin))
}

// ─────────────────────────────────────────────────────────────────────────────
// Profile
// ─────────────────────────────────────────────────────────────────────────────

async fn get_profile(State(state): State<AppState>) -> ApiResult<Json<NagariProfile>> {
    Ok(Json(state.with_conn(CmsService::get_profile).await?))
}

async fn update_profile(
    State(state): State<AppState>,
    WithRejection(Json(params), _): Body<ProfileUpdateParams>,
) -> ApiResult<Json<NagariProfile>> {
    let profile = state
        .with_conn(move |conn| CmsService::update_profile(conn, &params))
        .await?;
    Ok(Json(profile))
}

// ─────────────────────────────────────────────────────────────────────────────
// Jorong
// ─────────────────────────────────────────────────────────────────────────────

async fn list_jorongs(State(state): State<AppState>) -> ApiResult<Json<Vec<Jorong>>> {
    Ok(Json(state.with_conn(Repository::list_jorongs).await?))
}

async fn get_jorong(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Jorong>> {
    let jorong = state
        .with_conn(move |conn| CmsService::get_jorong(conn, &id))
        .await?;
    Ok(Json(jorong))
}

async fn create_jorong(
    State(state): State<AppState>,
    WithRejection(Json(params), _): Body<JorongCreateParams>,
) -> Created<Jorong> {
    let jorong = state
        .with_conn(move |conn| CmsService::create_jorong(conn, &params))
        .await?;
    Ok((StatusCode::CREATED, Json(jorong)))
}

async fn update_jorong(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(params), _): Body<JorongUpdateParams>,
) -> ApiResult<Json<Jorong>> {
    let jorong = state
        .with_conn(move |conn| CmsService::update_jorong(conn, &id, &params))
        .await?;
    Ok(Json(jorong))
}

async fn delete_jorong(
    State(state): State<AppState>,
    admin: AdminClaims,
    Path(id): Path<String>,
) -> ApiResult<Json<Deleted>> {
    let target = id.clone();
    state
        .with_conn(move |conn| CmsService::delete_jorong(conn, &target))
        .await?;
    Ok(deleted("Jorong", &id, &admin))
}

// ─────────────────────────────────────────────────────────────────────────────
// Statistics
// ─────────────────────────────────────────────────────────────────────────────

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

async fn get_statistic(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<JorongStatistic>> {
    let record = state
        .with_conn(move |conn| CmsService::get_statistic(conn, &id))
        .await?;
    Ok(Json(record))
}

async fn create_statistic(
    State(state): State<AppState>,
    WithRejection(Json(params), _): Body<StatisticCreateParams>,
) -> Created<JorongStatistic> {
    let record = state
        .with_conn(move |conn| CmsService::create_statistic(conn, &params))
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_statistic(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(params), _): Body<StatisticUpdateParams>,
) -> ApiResult<Json<JorongStatistic>> {
    let record = state
        .with_conn(move |conn| CmsService::update_statistic(conn, &id, &params))
        .await?;
    Ok(Json(record))
}

async fn delete_statistic(
    State(state): State<AppState>,
    admin: AdminClaims,
    Path(id): Path<String>,
) -> ApiResult<Json<Deleted>> {
    let target = id.clone();
    state
        .with_conn(move |conn| CmsService::delete_statistic(conn, &target))
        .await?;
    Ok(deleted("Statistic", &id, &admin))
}

// ─────────────────────────────────────────────────────────────────────────────
// News
// ─────────────────────────────────────────────────────────────────────────────

async fn list_news(State(state): State<AppState>) -> ApiResult<Json<Vec<News>>> {
    let news = state
        .with_conn(|conn| Repository::list_news(conn, Visibility::All))
        .await?;
    Ok(Json(news))
}

async fn get_news(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<News>> {
    let news = state
        .with_conn(move |conn| CmsService::get_news(conn, &id, Visibility::All))
        .await?;
    Ok(Json(news))
}

async fn create_news(
    State(state): State<AppState>,
    WithRejection(Json(params), _): Body<NewsCreateParams>,
) -> Created<News> {
    let news = state
        .with_conn(move |conn| CmsService::create_news(conn, &params))
        .await?;
    Ok((StatusCode::CREATED, Json(news)))
}

async fn update_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(params), _): Body<NewsUpdateParams>,
) -> ApiResult<Json<News>> {
    let news = state
        .with_conn(move |conn| CmsService::update_news(conn, &id, &params))
        .await?;
    Ok(Json(news))
}

async fn delete_news(
    State(state): State<AppState>,
    admin: AdminClaims,
    Path(id): Path<String>,
) -> ApiResult<Json<Deleted>> {
    let target = id.clone();
    state
        .with_conn(move |conn| CmsService::delete_news(conn, &target))
        .await?;
    Ok(deleted("News", &id, &admin))
}

// ─────────────────────────────────────────────────────────────────────────────
// Gallery
// ─────────────────────────────────────────────────────────────────────────────

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

async fn get_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<GalleryItem>> {
    let item = state
        .with_conn(move |conn| CmsService::get_gallery_item(conn, &id))
        .await?;
    Ok(Json(item))
}

async fn create_gallery_item(
    State(state): State<AppState>,
    WithRejection(Json(params), _): Body<GalleryCreateParams>,
) -> Created<GalleryItem> {
    let item = state
        .with_conn(move |conn| CmsService::create_gallery_item(conn, &params))
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(params), _): Body<GalleryUpdateParams>,
) -> ApiResult<Json<GalleryItem>> {
    let item = state
        .with_conn(move |conn| CmsService::update_gallery_item(conn, &id, &params))
        .await?;
    Ok(Json(item))
}

async fn delete_gallery_item(
    State(state): State<AppState>,
    admin: AdminClaims,
    Path(id): Path<String>,
) -> ApiResult<Json<Deleted>> {
    let target = id.clone();
    state
        .with_conn(move |conn| CmsService::delete_gallery_item(conn, &target))
        .await?;
    Ok(deleted("GalleryItem", &id, &admin))
}

// ─────────────────────────────────────────────────────────────────────────────
// FAQ
// ─────────────────────────────────────────────────────────────────────────────

async fn list_faq(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<CategoryQuery>, ApiError>,
) -> ApiResult<Json<Vec<Faq>>> {
    let category = non_empty(query.category);
    let faqs = state
        .with_conn(move |conn| Repository::list_faqs(conn, Visibility::All, category.as_deref()))
        .await?;
    Ok(Json(faqs))
}

async fn get_faq(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Faq>> {
    let faq = state
        .with_conn(move |conn| CmsService::get_faq(conn, &id))
        .await?;
    Ok(Json(faq))
}

async fn create_faq(
    State(state): State<AppState>,
    WithRejection(Json(params), _): Body<FaqCreateParams>,
) -> Created<Faq> {
    let faq = state
        .with_conn(move |conn| CmsService::create_faq(conn, &params))
        .await?;
    Ok((StatusCode::CREATED, Json(faq)))
}

async fn update_faq(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(params), _): Body<FaqUpdateParams>,
) -> ApiResult<Json<Faq>> {
    let faq = state
        .with_conn(move |conn| CmsService::update_faq(conn, &id, &params))
        .await?;
    Ok(Json(faq))
}

async fn delete_faq(
    State(state): State<AppState>,
    admin: AdminClaims,
    Path(id): Path<String>,
) -> ApiResult<Json<Deleted>> {
    let target = id.clone();
    state
        .with_conn(move |conn| CmsService::delete_faq(conn, &target))
        .await?;
    Ok(deleted("Faq", &id, &admin))
}

// ─────────────────────────────────────────────────────────────────────────────
// Wali Nagari
// ─────────────────────────────────────────────────────────────────────────────

async fn list_wali_nagari(State(state): State<AppState>) -> ApiResult<Json<Vec<WaliNagari>>> {
    Ok(Json(state.with_conn(Repository::list_wali_nagari).await?))
}

async fn get_wali_nagari(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<WaliNagari>> {
    let wali = state
        .with_conn(move |conn| CmsService::get_wali_nagari(conn, &id))
        .await?;
    Ok(Json(wali))
}

async fn create_wali_nagari(
    State(state): State<AppState>,
    WithRejection(Json(params), _): Body<WaliNagariCreateParams>,
) -> Created<WaliNagari> {
    let wali = state
        .with_conn(move |conn| CmsService::create_wali_nagari(conn, &params))
        .await?;
    Ok((StatusCode::CREATED, Json(wali)))
}

async fn update_wali_nagari(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(params), _): Body<WaliNagariUpdateParams>,
) -> ApiResult<Json<WaliNagari>> {
    let wali = state
        .with_conn(move |conn| CmsService::update_wali_nagari(conn, &id, &params))
        .await?;
    Ok(Json(wali))
}

async fn delete_wali_nagari(
    State(state): State<AppState>,
    admin: AdminClaims,
    Path(id): Path<String>,
) -> ApiResult<Json<Deleted>> {
    let target = id.clone();
    state
        .with_conn(move |conn| CmsService::delete_wali_nagari(conn, &target))
        .await?;
    Ok(deleted("WaliNagari", &id, &admin))
}

// ─────────────────────────────────────────────────────────────────────────────
// Adat istiadat
// ─────────────────────────────────────────────────────────────────────────────

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

async fn create_adat(
    State(state): State<AppState>,
    WithRejection(Json(params), _): Body<AdatCreateParams>,
) -> Created<AdatIstiadat> {
    let adat = state
        .with_conn(move |conn| CmsService::create_adat(conn, &params))
        .await?;
    Ok((StatusCode::CREATED, Json(adat)))
}

async fn update_adat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(params), _): Body<AdatUpdateParams>,
) -> ApiResult<Json<AdatIstiadat>> {
    let adat = state
        .with_conn(move |conn| CmsService::update_adat(conn, &id, &params))
        .await?;
    Ok(Json(adat))
}

async fn delete_adat(
    State(state): State<AppState>,
    admin: AdminClaims,
    Path(id): Path<String>,
) -> ApiResult<Json<Deleted>> {
    let target = id.clone();
    state
        .with_conn(move |conn| CmsService::delete_adat(conn, &target))
        .await?;
    Ok(deleted("AdatIstiadat", &id, &admin))
}
