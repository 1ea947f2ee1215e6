//! Entity handles and persistent monster identities.
//!
//! Two kinds of identity exist side by side:
//! - [`EntityId`] is a generational *slot* handle. It is what the occupancy
//!   index stores and what in-memory code passes around. It is not stable
//!   across a save/load cycle.
//! - [`Mid`] is the persistent identity of a monster. It is allocated once,
//!   never reused within a world, and is what property records store.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Entity slot handle with generational index for stale reference detection.
///
/// The generation counter increments when a slot is reused after destruction,
/// so a handle to a destroyed monster never aliases its successor.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityId {
    /// Index into entity storage.
    pub index: u64,
    /// Generation counter for stale reference detection.
    pub generation: u32,
}

impl EntityId {
    /// Creates a new entity ID with the given index and generation.
    #[must_use]
    pub const fn new(index: u64, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.index)
    }
}

/// Persistent monster identity.
///
/// Mids are small integers so they can be written into property records
/// as plain `Int` values.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mid(pub u32);

impl Mid {
    /// Returns the mid as it is written into property records.
    #[must_use]
    pub fn to_record(self) -> i64 {
        i64::from(self.0)
    }

    /// Reads a mid back from a record integer.
    ///
    /// Returns `None` for values that could never have been written by
    /// [`Mid::to_record`].
    #[must_use]
    pub fn from_record(value: i64) -> Option<Self> {
        u32::try_from(value).ok().map(Self)
    }
}

impl fmt::Debug for Mid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mid({})", self.0)
    }
}

impl fmt::Display for Mid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mid {}", self.0)
    }
}
