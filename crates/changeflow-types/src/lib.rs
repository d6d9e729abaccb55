//! Shared type definitions for the Changeflow reduction engine.
//!
//! This crate is the single source of truth for the vocabulary shared by the
//! engine and its collaborators: typed identifiers, the effect-kind
//! enumeration and its role configuration, and the change event record.
//! It performs no I/O and holds no state.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifier wrappers (subjects, change records,
//!   entity keys)
//! - [`kinds`] -- Effect kinds and the terminal/toggle role configuration
//! - [`event`] -- The immutable change event record

pub mod event;
pub mod ids;
pub mod kinds;

// Re-export all public types at crate root for convenience.
pub use event::ChangeEvent;
pub use ids::{ChangeId, EntityKey, SubjectId};
pub use kinds::{ChangeKind, KindRoles, TogglePair};
