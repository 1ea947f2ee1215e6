//! Damage and death descriptors passed between the world and composites.

use serpentine_foundation::{Coord, Mid};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Damage type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Flavour {
    /// Blunt, slashing or piercing.
    #[default]
    Physical,
    /// Fire.
    Fire,
    /// Cold.
    Cold,
    /// Electricity.
    Electricity,
    /// Poison.
    Poison,
}

/// A single application of damage.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Hit {
    /// Who dealt it, if anyone.
    pub source: Option<Mid>,
    /// Hit points to remove.
    pub amount: i32,
    /// Damage type.
    pub flavour: Flavour,
}

impl Hit {
    /// Physical damage from an unknown source.
    #[must_use]
    pub const fn new(amount: i32) -> Self {
        Self {
            source: None,
            amount,
            flavour: Flavour::Physical,
        }
    }

    /// Sets the attacker.
    #[must_use]
    pub const fn by(mut self, source: Mid) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets the damage type.
    #[must_use]
    pub const fn with_flavour(mut self, flavour: Flavour) -> Self {
        self.flavour = flavour;
        self
    }

    /// The killer to blame if this hit is fatal.
    #[must_use]
    pub const fn killer(&self) -> Killer {
        match self.source {
            Some(mid) => Killer::monster(mid),
            None => Killer::misc(),
        }
    }
}

/// Category of whatever caused a death.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum KillerKind {
    /// The player.
    Player,
    /// Another monster.
    Monster,
    /// Bookkeeping removals: shrinking composites, cleanup.
    Misc,
}

/// Whatever caused a death.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Killer {
    /// Category.
    pub kind: KillerKind,
    /// The responsible monster, if any.
    pub source: Option<Mid>,
}

impl Killer {
    /// A bookkeeping removal with no responsible party.
    #[must_use]
    pub const fn misc() -> Self {
        Self {
            kind: KillerKind::Misc,
            source: None,
        }
    }

    /// Killed by the player.
    #[must_use]
    pub const fn player() -> Self {
        Self {
            kind: KillerKind::Player,
            source: None,
        }
    }

    /// Killed by monster `mid`.
    #[must_use]
    pub const fn monster(mid: Mid) -> Self {
        Self {
            kind: KillerKind::Monster,
            source: Some(mid),
        }
    }
}

/// A death the world has processed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Death {
    /// Who died.
    pub mid: Mid,
    /// Where.
    pub pos: Coord,
    /// Why.
    pub killer: Killer,
    /// Whether the death should go unannounced.
    pub silent: bool,
}
