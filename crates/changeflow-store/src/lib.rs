//! `PostgreSQL`-backed collaborators for the Changeflow reduction engine.
//!
//! The engine itself is pure and operates on in-memory batches; this crate
//! supplies everything around it:
//!
//! - [`postgres`] -- Connection pool configuration and the [`ChangeStore`]
//!   handle.
//! - [`change_log`] -- The append-only change log (the engine's event
//!   source).
//! - [`baseline`] -- The baseline registry (the engine's
//!   reference-timestamp provider). A subject with no recorded baseline is
//!   a hard failure, never an empty default.
//! - [`report`] -- The fetch-and-summarize driver composing both
//!   collaborators with the engine.
//! - [`config`] -- YAML store configuration with environment overrides.
//!
//! Uses [`sqlx`] with runtime query construction (not compile-time checked)
//! to avoid requiring a live database at build time. All queries are
//! parameterized.

pub mod baseline;
pub mod change_log;
pub mod config;
pub mod error;
pub mod postgres;
pub mod report;

// Re-export primary types at crate root.
pub use baseline::Baselines;
pub use change_log::{ChangeLog, ChangeRow};
pub use config::{ConfigError, StoreConfig};
pub use error::StoreError;
pub use postgres::{ChangeStore, PostgresConfig};
pub use report::{summarize_since_baseline, ReportError};
