//! The fetch-and-summarize driver.
//!
//! Composes the two collaborators with the engine: look up the subject's
//! baseline (fatal if absent), fetch its change log since that baseline,
//! and reduce the batch to per-kind counts. Both failure conditions halt
//! the run eagerly; there is no partial result.

use std::collections::BTreeMap;

use changeflow_engine::{ChangeSummarizer, ReduceError};
use changeflow_types::{ChangeKind, SubjectId};

use crate::error::StoreError;
use crate::postgres::ChangeStore;

/// Errors that can occur while producing a change report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Fetching the baseline or the change log failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The reduction itself failed (empty window).
    #[error(transparent)]
    Reduce(#[from] ReduceError),
}

/// Summarize a subject's changes since its last recorded baseline.
///
/// # Errors
///
/// Returns [`ReportError::Store`] when the subject has no baseline
/// ([`StoreError::NoBaseline`]) or a query fails, and
/// [`ReportError::Reduce`] when no events fall inside the window
/// ([`ReduceError::NoChanges`]).
pub async fn summarize_since_baseline(
    store: &ChangeStore,
    summarizer: &ChangeSummarizer<ChangeKind>,
    subject: SubjectId,
) -> Result<BTreeMap<ChangeKind, u64>, ReportError> {
    let since = store.baselines().last_baseline(subject).await?;
    let events = store.change_log().select_since(subject, since).await?;

    tracing::debug!(
        subject = %subject,
        %since,
        fetched = events.len(),
        "Fetched change batch for reduction"
    );

    Ok(summarizer.summarize(subject, since, events)?)
}
