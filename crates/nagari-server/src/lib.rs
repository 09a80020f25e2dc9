//! # nagari-server
//!
//! Axum HTTP API for the Nagari CMS.
//!
//! - [`routes::public`]: read-only endpoints for the public site
//! - [`routes::auth`]: admin login
//! - [`routes::admin`]: bearer-protected management endpoints
//! - [`error`]: mapping of store and auth errors onto HTTP responses
//!
//! Database work runs on the blocking pool through [`AppState::with_conn`].

#![deny(unsafe_code)]

pub mod error;
pub mod extract;
pub mod health;
pub mod routes;
pub mod server;
pub mod shutdown;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use extract::AdminClaims;
pub use server::{build_router, serve};
pub use shutdown::cancel_on_signal;
pub use state::AppState;
