//! Type-safe identifier wrappers.
//!
//! Subjects and change records carry strongly-typed UUID wrappers to prevent
//! accidental mixing of identifiers at compile time. All UUIDs use v7
//! (time-ordered) so that identifier order tracks recording order, which the
//! store relies on for deterministic result ordering.
//!
//! Entities are addressed by opaque string keys assigned by the upstream
//! system, so [`EntityKey`] wraps a `String` rather than a UUID.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a subject whose change log is reduced.
    SubjectId
}

define_id! {
    /// Unique identifier for one recorded change event.
    ChangeId
}

/// Opaque string key identifying the entity a change applies to.
///
/// Keys are assigned by the upstream system and compared by exact equality.
/// [`EntityKey::new`] is the validating constructor: it trims surrounding
/// whitespace and returns `None` for input that is empty after trimming, so
/// an unidentifiable key is represented as the absence of a key rather than
/// as an empty one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityKey(String);

impl EntityKey {
    /// Create a key from a raw string, rejecting empty input.
    ///
    /// Returns `None` if the input is empty or all whitespace.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    /// Return the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for EntityKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
