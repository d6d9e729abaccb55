//! Change-log reduction engine for the Changeflow workspace.
//!
//! Given an unordered batch of timestamped mutation events recorded against
//! named entities, the engine computes, per entity, the net effect of all
//! events since a reference point, then counts the net effects by effect
//! kind. The engine is pure: it holds no state across invocations and each
//! call is a function of its input batch alone.
//!
//! # Architecture
//!
//! The engine crate provides four modules, composed in a strictly forward
//! pipeline:
//!
//! - [`group`] -- Partition events by entity key, dropping keyless events.
//! - [`resolve`] -- Reduce one entity's events to a single net effect.
//! - [`aggregate`] -- Count resolved net effects by kind.
//! - [`summary`] -- The [`ChangeSummarizer`] façade: window filter, then
//!   group → resolve → aggregate.
//!
//! # Reduction Algorithm
//!
//! For each entity's group of events:
//!
//! 1. Find the latest event (maximum `occurred_at`; on equal timestamps the
//!    first event in input order wins).
//! 2. If the latest event carries the terminal kind, that kind is the net
//!    effect unconditionally.
//! 3. Otherwise count the group's toggle-pair events: an even count cancels
//!    out to "unchanged" (the entity is excluded from the aggregate), an
//!    odd count leaves the entity flipped in the direction of the latest
//!    event's kind.
//!
//! An even number of on/off flips returns an entity to its starting state;
//! an odd number leaves it flipped. This avoids tracking the actual prior
//! baseline state, which the change log does not record.
//!
//! # Errors
//!
//! The engine raises exactly one error: [`ReduceError::NoChanges`], when the
//! batch is empty after filtering to the reference window. An empty window
//! is exceptional rather than an empty summary, because an empty summary is
//! ambiguous with "changes that all cancelled out". Grouping, resolution,
//! and aggregation are total and never fail.
//!
//! # Usage
//!
//! ```
//! use changeflow_engine::ChangeSummarizer;
//! use changeflow_types::{ChangeEvent, ChangeKind, EntityKey, SubjectId};
//! use chrono::{Duration, Utc};
//!
//! let subject = SubjectId::new();
//! let since = Utc::now();
//! let events: Vec<ChangeEvent> = EntityKey::new("rule:S100")
//!     .map(|key| {
//!         vec![
//!             ChangeEvent::new(subject, ChangeKind::Activated, since)
//!                 .with_entity(key.clone()),
//!             ChangeEvent::new(subject, ChangeKind::Updated, since + Duration::seconds(5))
//!                 .with_entity(key),
//!         ]
//!     })
//!     .unwrap_or_default();
//!
//! let summarizer = ChangeSummarizer::standard();
//! let counts = summarizer.summarize(subject, since, events);
//! assert_eq!(
//!     counts.ok().and_then(|c| c.get(&ChangeKind::Updated).copied()),
//!     Some(1)
//! );
//! ```

pub mod aggregate;
pub mod group;
pub mod resolve;
pub mod summary;

// Re-export primary entry points at crate root.
pub use aggregate::count_by_kind;
pub use group::group_by_entity;
pub use resolve::resolve_net_effect;
pub use summary::ChangeSummarizer;

use chrono::{DateTime, Utc};

use changeflow_types::SubjectId;

/// Errors raised by the reduction engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReduceError {
    /// The batch contained no events at or after the reference point.
    ///
    /// Raised eagerly by the façade; distinct from a summary in which every
    /// entity's changes cancelled out (which yields an empty map, not an
    /// error).
    #[error("no changes recorded for subject {subject} since {since}")]
    NoChanges {
        /// The subject whose change log was reduced.
        subject: SubjectId,
        /// The inclusive lower bound of the reference window.
        since: DateTime<Utc>,
    },
}
