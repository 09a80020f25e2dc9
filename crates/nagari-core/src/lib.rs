//! # nagari-core
//!
//! Foundation for the Nagari CMS backend:
//!
//! - [`types`]: domain entities (profile, jorong, statistics, news, gallery,
//!   FAQ, Wali Nagari, adat istiadat, admin) and their create/update params
//! - [`stats`]: population statistics aggregation for chart rendering
//! - [`ids`]: prefixed, time-ordered identifiers and timestamps
//! - [`logging`]: `tracing` subscriber bootstrap

#![deny(unsafe_code)]

pub mod ids;
pub mod logging;
pub mod stats;
pub mod types;

pub use stats::{Summary, available_years, compute_summary};
pub use types::*;
