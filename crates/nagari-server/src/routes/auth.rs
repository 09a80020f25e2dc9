//! `POST /api/auth/login`.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use nagari_auth::AuthenticatedAdmin;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Login routes, mounted under `/api/auth`.
pub fn routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Admin username.
    #[serde(default)]
    pub username: String,
    /// Plaintext password.
    #[serde(default)]
    pub password: String,
}

async fn login(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> ApiResult<Json<AuthenticatedAdmin>> {
    let username = req.username.trim().to_owned();
    if username.is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation("username and password are required".into()));
    }

    let auth = state.auth.clone();
    let session = state
        .with_conn(move |conn| auth.verify_credentials(conn, &username, &req.password))
        .await?;
    Ok(Json(session))
}
