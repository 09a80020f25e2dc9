//! HTTP error mapping.
//!
//! Every handler returns [`ApiResult`]. Store and auth failures convert into
//! [`ApiError`], which renders as `{"error": {"code", "message"}}` with the
//! matching status. Internal failures are logged here and reach the client
//! only as a generic message.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use nagari_auth::AuthError;
use nagari_store::StoreError;

/// Result type for request handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors a request can end with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed body or query, or a field failed validation.
    #[error("{0}")]
    Validation(String),

    /// The addressed entity does not exist (or is not visible).
    #[error("{0}")]
    NotFound(String),

    /// The write collides with existing data.
    #[error("{0}")]
    Conflict(String),

    /// Bad credentials or a missing, invalid or expired token.
    #[error("{0}")]
    Unauthorized(String),

    /// The request body exceeds the configured limit.
    #[error("request body too large")]
    PayloadTooLarge,

    /// Anything else. Details are logged, never returned.
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    code: &'a str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code(),
                message: self.to_string(),
            },
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(message) => Self::Validation(message),
            StoreError::NotFound { entity, id } => Self::NotFound(format!("{entity} not found: {id}")),
            StoreError::Conflict(message) => Self::Conflict(message),
            other @ (StoreError::Database(_) | StoreError::Pool(_) | StoreError::Migration { .. }) => {
                error!(error = %other, "store operation failed");
                Self::Internal
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::TokenExpired
            | AuthError::SessionRevoked => Self::Unauthorized(err.to_string()),
            AuthError::InvalidToken(detail) => {
                debug!(detail = %detail, "rejected token");
                Self::Unauthorized("invalid token".into())
            }
            AuthError::Signing(detail) => {
                error!(detail = %detail, "token signing failed");
                Self::Internal
            }
            AuthError::Store(inner) => inner.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::PayloadTooLarge;
        }
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        error!(error = %err, "blocking task failed");
        Self::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 10_000).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_renders_400() {
        let (status, body) = body_json(ApiError::Validation("name is required".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "name is required");
    }

    #[tokio::test]
    async fn internal_hides_detail() {
        let err: ApiError = StoreError::Migration {
            message: "disk on fire".into(),
        }
        .into();
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert_eq!(body["error"]["message"], "internal server error");
    }

    #[test]
    fn store_errors_map_to_statuses() {
        let cases = [
            (StoreError::validation("x"), StatusCode::BAD_REQUEST),
            (StoreError::not_found("Jorong", "jrg-1"), StatusCode::NOT_FOUND),
            (StoreError::Conflict("dup".into()), StatusCode::CONFLICT),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn not_found_names_entity() {
        let err = ApiError::from(StoreError::not_found("News", "news-9"));
        assert_eq!(err.to_string(), "News not found: news-9");
    }

    #[test]
    fn auth_errors_are_unauthorized() {
        for err in [
            AuthError::InvalidCredentials,
            AuthError::MissingToken,
            AuthError::TokenExpired,
            AuthError::SessionRevoked,
            AuthError::InvalidToken("bad signature".into()),
        ] {
            let api = ApiError::from(err);
            assert_eq!(api.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(api.code(), "UNAUTHORIZED");
        }
    }

    #[test]
    fn invalid_token_detail_not_exposed() {
        let api = ApiError::from(AuthError::InvalidToken("InvalidSignature".into()));
        assert_eq!(api.to_string(), "invalid token");
    }

    #[test]
    fn auth_store_error_unwraps() {
        let api = ApiError::from(AuthError::Store(StoreError::validation("bad")));
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn signing_failure_is_internal() {
        let api = ApiError::from(AuthError::Signing("key".into()));
        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
