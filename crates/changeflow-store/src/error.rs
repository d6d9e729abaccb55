//! Error types for the store layer.
//!
//! All store operations propagate [`StoreError`], which wraps the
//! underlying [`sqlx`] errors and adds the two conditions the engine's
//! callers must distinguish: a missing baseline and an unmappable kind
//! string in storage.

use changeflow_types::SubjectId;

/// Errors that can occur in the store layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A stored kind string does not map to any [`changeflow_types::ChangeKind`].
    ///
    /// Unknown kinds are a loader-side concern: the engine never sees them.
    #[error("unknown change kind in storage: {0}")]
    UnknownKind(String),

    /// The subject has no recorded baseline.
    ///
    /// A missing baseline is a precondition failure for reduction, raised
    /// before the engine is ever invoked. It is never silently treated as
    /// "no events".
    #[error("no baseline recorded for subject {subject}")]
    NoBaseline {
        /// The subject that was queried.
        subject: SubjectId,
    },
}
