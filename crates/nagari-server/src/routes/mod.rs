//! HTTP routes under `/api`.

pub mod admin;
pub mod auth;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// All `/api` routes.
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(public::routes())
        .nest("/auth", auth::routes())
        .nest("/admin", admin::routes(state))
}
