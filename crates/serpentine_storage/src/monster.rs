//! Monster records.

use std::sync::Arc;

use serpentine_foundation::{Coord, Mid, PropTable};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::terrain::Habitat;

/// Name of the generic body-segment kind composites spawn as parts.
pub const PART_KIND_NAME: &str = "part";

/// Display colour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Colour {
    /// Black.
    Black,
    /// Red.
    Red,
    /// Green.
    Green,
    /// Brown.
    Brown,
    /// Blue.
    Blue,
    /// Magenta.
    Magenta,
    /// Cyan.
    Cyan,
    /// Light grey.
    #[default]
    LightGrey,
    /// Yellow.
    Yellow,
    /// White.
    White,
}

/// Allegiance towards the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Attitude {
    /// Attacks the player.
    #[default]
    Hostile,
    /// Ignores everyone.
    Neutral,
    /// Fights for the player.
    Friendly,
}

/// Elemental resistances, in levels. Negative values are vulnerabilities.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Resists {
    /// Fire.
    pub fire: i8,
    /// Cold.
    pub cold: i8,
    /// Electricity.
    pub elec: i8,
    /// Poison.
    pub poison: i8,
}

/// Derived combat statistics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CombatStats {
    /// Maximum hit points.
    pub max_hit_points: i32,
    /// Hit dice.
    pub hit_dice: u8,
    /// Energy gained per turn (10 is normal).
    pub speed: u8,
    /// Resistances.
    pub resists: Resists,
}

impl CombatStats {
    /// Stats with the given maximum hit points and normal speed.
    #[must_use]
    pub fn with_max_hit_points(max_hit_points: i32) -> Self {
        Self {
            max_hit_points,
            ..Self::default()
        }
    }
}

impl Default for CombatStats {
    fn default() -> Self {
        Self {
            max_hit_points: 10,
            hit_dice: 1,
            speed: 10,
            resists: Resists::default(),
        }
    }
}

/// A display character and colour.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    /// Character.
    pub ch: char,
    /// Colour.
    pub colour: Colour,
}

/// Static description of a kind of monster.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonsterKind {
    /// Kind name.
    pub name: Arc<str>,
    /// Display character.
    pub glyph: char,
    /// Where it can live.
    pub habitat: Habitat,
}

impl MonsterKind {
    /// Creates a kind.
    #[must_use]
    pub fn new(name: &str, glyph: char, habitat: Habitat) -> Self {
        Self {
            name: Arc::from(name),
            glyph,
            habitat,
        }
    }

    /// The generic body segment, with `habitat` borrowed from its head.
    #[must_use]
    pub fn part(habitat: Habitat) -> Self {
        Self::new(PART_KIND_NAME, '*', habitat)
    }

    /// True for generic body segments.
    #[must_use]
    pub fn is_part(&self) -> bool {
        &*self.name == PART_KIND_NAME
    }
}

/// Everything needed to spawn a monster.
#[derive(Clone, Debug)]
pub struct MonsterSpec {
    /// Kind.
    pub kind: MonsterKind,
    /// Starting hit points; `None` means full.
    pub hit_points: Option<i32>,
    /// Combat statistics.
    pub stats: CombatStats,
    /// Display colour.
    pub colour: Colour,
    /// Allegiance.
    pub attitude: Attitude,
    /// Current target.
    pub foe: Option<Mid>,
    /// Monster that summoned this one.
    pub summoner: Option<Mid>,
}

impl MonsterSpec {
    /// A hostile, full-health monster of `kind` with default stats.
    #[must_use]
    pub fn new(kind: MonsterKind) -> Self {
        Self {
            kind,
            hit_points: None,
            stats: CombatStats::default(),
            colour: Colour::default(),
            attitude: Attitude::default(),
            foe: None,
            summoner: None,
        }
    }

    /// Sets combat statistics.
    #[must_use]
    pub fn with_stats(mut self, stats: CombatStats) -> Self {
        self.stats = stats;
        self
    }

    /// Sets starting hit points.
    #[must_use]
    pub fn with_hit_points(mut self, hit_points: i32) -> Self {
        self.hit_points = Some(hit_points);
        self
    }

    /// Sets the colour.
    #[must_use]
    pub fn with_colour(mut self, colour: Colour) -> Self {
        self.colour = colour;
        self
    }

    /// Sets the allegiance.
    #[must_use]
    pub fn with_attitude(mut self, attitude: Attitude) -> Self {
        self.attitude = attitude;
        self
    }

    /// Sets the summoner.
    #[must_use]
    pub fn summoned_by(mut self, summoner: Mid) -> Self {
        self.summoner = Some(summoner);
        self
    }
}

/// A live monster.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Monster {
    /// Persistent identity.
    pub mid: Mid,
    /// Kind.
    pub kind: MonsterKind,
    /// Current cell.
    pub pos: Coord,
    /// Current hit points.
    pub hit_points: i32,
    /// Combat statistics.
    pub stats: CombatStats,
    /// Display colour.
    pub colour: Colour,
    /// Allegiance.
    pub attitude: Attitude,
    /// Current target.
    pub foe: Option<Mid>,
    /// Turns left before forgetting the foe.
    pub foe_memory: i32,
    /// Monster that summoned this one.
    pub summoner: Option<Mid>,
    /// Experience awarded for killing it.
    pub experience: u32,
    /// Head of the composite this monster belongs to.
    pub composite: Option<Mid>,
    /// Persistent property record.
    pub props: PropTable,
}

impl Monster {
    pub(crate) fn from_spec(spec: MonsterSpec, mid: Mid, pos: Coord) -> Self {
        let hit_points = spec.hit_points.unwrap_or(spec.stats.max_hit_points);
        let experience = u32::from(spec.stats.hit_dice) * 10;
        Self {
            mid,
            kind: spec.kind,
            pos,
            hit_points,
            stats: spec.stats,
            colour: spec.colour,
            attitude: spec.attitude,
            foe: spec.foe,
            foe_memory: 0,
            summoner: spec.summoner,
            experience,
            composite: None,
            props: PropTable::new(),
        }
    }

    /// True while hit points are positive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.hit_points > 0
    }

    /// True if this monster belongs to a composite.
    #[must_use]
    pub const fn is_member(&self) -> bool {
        self.composite.is_some()
    }

    /// True if this monster is the head of its composite.
    #[must_use]
    pub fn is_head(&self) -> bool {
        self.composite == Some(self.mid)
    }

    /// Default glyph for this monster.
    #[must_use]
    pub const fn glyph(&self) -> Glyph {
        Glyph {
            ch: self.kind.glyph,
            colour: self.colour,
        }
    }

    /// Short display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.kind.name
    }
}
