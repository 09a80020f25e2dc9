//! Request extractors.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use nagari_auth::{AuthError, Claims};

use crate::error::ApiError;
use crate::state::AppState;

/// Claims of the admin making the request.
///
/// Extracting this from a request requires a valid
/// `Authorization: Bearer <token>` header whose admin still exists with the
/// password the token was issued for; otherwise the handler never runs and
/// the client gets a 401.
#[derive(Clone, Debug)]
pub struct AdminClaims(pub Claims);

impl FromRequestParts<AppState> for AdminClaims {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthError::MissingToken)?;
        let claims = state.auth.verify_token(token)?;
        let auth = Arc::clone(&state.auth);
        let claims = state
            .with_conn(move |conn| auth.check_session(conn, claims))
            .await?;
        Ok(Self(claims))
    }
}

/// The token from an `Authorization: Bearer` header, if any.
fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
