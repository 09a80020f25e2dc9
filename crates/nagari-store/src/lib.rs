//! # nagari-store
//!
//! `SQLite` persistence for the Nagari CMS.
//!
//! - [`connection`]: `r2d2` pool with per-connection pragmas
//! - [`migrations`]: embedded, versioned schema migrations
//! - [`repository`]: stateless SQL CRUD over `&Connection`
//! - [`service`]: validation and business rules over the repository
//! - [`seed`]: idempotent sample data for fresh installs
//!
//! All operations are synchronous; async callers run them on a blocking
//! thread with a pooled connection.

#![deny(unsafe_code)]

pub mod connection;
pub mod errors;
pub mod migrations;
pub mod repository;
pub mod seed;
pub mod service;

pub use connection::{ConnectionConfig, ConnectionPool, PooledConnection, new_file, new_in_memory};
pub use errors::{Result, StoreError};
pub use migrations::run_migrations;
pub use repository::{AdminRecord, JorongDependents, Repository};
pub use seed::{SeedReport, seed};
pub use service::CmsService;
