//! # nagari-auth
//!
//! Administrator authentication:
//!
//! - [`password`]: salted PBKDF2-HMAC-SHA256 password hashes with
//!   constant-time verification
//! - [`token`]: HS256-signed, expiring session tokens
//! - [`credentials`]: the username/password check that issues a token, and
//!   the per-request check that a token's admin and password are current

#![deny(unsafe_code)]

pub mod credentials;
pub mod errors;
pub mod password;
pub mod token;

pub use credentials::{AuthenticatedAdmin, Authenticator};
pub use errors::{AuthError, Result};
pub use password::{hash_password, password_version, verify_password};
pub use token::{Claims, IssuedToken, TokenSigner};
