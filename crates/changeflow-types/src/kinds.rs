//! Effect kinds and the terminal/toggle role configuration.
//!
//! Every change event carries an effect kind. The reduction algorithm does
//! not hard-code a kind vocabulary; instead the caller supplies a
//! [`KindRoles`] value naming which kind overrides everything else (the
//! terminal kind) and which two kinds form a mutually cancelling toggle
//! pair. [`ChangeKind`] is the default vocabulary with
//! [`KindRoles::standard`] as its canonical wiring.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Default vocabulary
// ---------------------------------------------------------------------------

/// The default closed set of effect kinds a change event can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// The entity was switched on within the subject.
    Activated,
    /// The entity was switched off within the subject.
    Deactivated,
    /// The entity's configuration was modified in place.
    Updated,
}

impl ChangeKind {
    /// Return the canonical string form of the kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Activated => "activated",
            Self::Deactivated => "deactivated",
            Self::Updated => "updated",
        }
    }
}

impl core::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Role configuration
// ---------------------------------------------------------------------------

/// Two effect kinds that are mutually cancelling opposites.
///
/// Repeated alternation between `on` and `off` for the same entity returns
/// it to its starting state; the resolver exploits this by collapsing an
/// even number of toggle events to "unchanged".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TogglePair<K> {
    /// The kind that flips the entity on.
    pub on: K,
    /// The kind that flips the entity off.
    pub off: K,
}

impl<K: PartialEq> TogglePair<K> {
    /// Return `true` if `kind` is one of the pair.
    pub fn contains(&self, kind: &K) -> bool {
        *kind == self.on || *kind == self.off
    }
}

/// The role each effect kind plays in the reduction.
///
/// The engine is parameterized over this configuration rather than a fixed
/// enumeration, so the same reduction serves any vocabulary with one
/// terminal-overriding kind and one toggle pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindRoles<K> {
    /// The kind that, when it is the latest event for an entity, decides
    /// the entity's net effect unconditionally.
    pub terminal: K,
    /// The mutually cancelling pair.
    pub toggle: TogglePair<K>,
}

impl<K: PartialEq> KindRoles<K> {
    /// Return `true` if `kind` is the terminal-overriding kind.
    pub fn is_terminal(&self, kind: &K) -> bool {
        *kind == self.terminal
    }

    /// Return `true` if `kind` belongs to the toggle pair.
    pub fn is_toggle(&self, kind: &K) -> bool {
        self.toggle.contains(kind)
    }
}

impl KindRoles<ChangeKind> {
    /// The canonical wiring for the default vocabulary:
    /// [`ChangeKind::Updated`] is terminal, [`ChangeKind::Activated`] /
    /// [`ChangeKind::Deactivated`] form the toggle pair.
    pub const fn standard() -> Self {
        Self {
            terminal: ChangeKind::Updated,
            toggle: TogglePair {
                on: ChangeKind::Activated,
                off: ChangeKind::Deactivated,
            },
        }
    }
}
