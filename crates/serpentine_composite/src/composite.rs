//! The contract shared by every composite kind.
//!
//! A composite is one head plus an ordered list of parts. Members are plain
//! monsters in the [`World`]; each carries the head's [`Mid`] as its
//! back-reference, and the composite itself lives in a
//! [`CompositeRegistry`](crate::CompositeRegistry).

use std::fmt::Write as _;

use log::trace;
use serpentine_foundation::{Coord, EntityId, Mid, Result};
use serpentine_storage::{Glyph, Hit, Killer, World};

/// Membership shared by all composite kinds.
#[derive(Clone, Debug)]
pub struct CompositeCore {
    /// The entity that defines identity, life and stats.
    pub(crate) head: EntityId,
    /// Persistent identity of the head.
    pub(crate) head_mid: Mid,
    /// Dependent members. Order is kind-specific.
    pub(crate) parts: Vec<EntityId>,
}

impl CompositeCore {
    /// A composite with `head` and no parts.
    ///
    /// # Errors
    ///
    /// Returns an error if `head` is not a live monster.
    pub fn new(world: &World, head: EntityId) -> Result<Self> {
        Ok(Self {
            head,
            head_mid: world.mid(head)?,
            parts: Vec::new(),
        })
    }

    pub(crate) fn with_parts(head: EntityId, head_mid: Mid, parts: Vec<EntityId>) -> Self {
        Self {
            head,
            head_mid,
            parts,
        }
    }

    /// Drops `part` from the member list, keeping order.
    pub(crate) fn remove_part(&mut self, part: EntityId) {
        self.parts.retain(|p| *p != part);
    }
}

impl PartialEq for CompositeCore {
    fn eq(&self, other: &Self) -> bool {
        self.head_mid == other.head_mid
    }
}

impl Eq for CompositeCore {}

/// What should happen after a non-head member dies.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PartDeath {
    /// Another member that should die in its place.
    pub redirect_to: Option<EntityId>,
    /// Whether the part's own death counts as a kill.
    pub counts_as_kill: bool,
}

/// What should happen to damage dealt to a non-head member.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DamageRoute {
    /// Another member that takes the damage instead.
    pub forward_to: Option<EntityId>,
    /// Whether the part itself can die from it.
    pub lethal: bool,
}

/// The contract every composite kind satisfies.
///
/// Membership queries, cleanup and display hooks are provided on top of
/// [`CompositeCore`]. Geometry, movement, the death/damage reactions and
/// persistence are kind-specific.
pub trait Composite {
    /// Shared membership data.
    fn core(&self) -> &CompositeCore;

    /// Mutable shared membership data.
    fn core_mut(&mut self) -> &mut CompositeCore;

    /// The head entity.
    fn head(&self) -> EntityId {
        self.core().head
    }

    /// Persistent identity of the head, and so of the composite.
    fn head_mid(&self) -> Mid {
        self.core().head_mid
    }

    /// Non-head members in kind order.
    fn parts(&self) -> &[EntityId] {
        &self.core().parts
    }

    /// Is any member standing on `pos`?
    fn located_at(&self, world: &World, pos: Coord) -> bool {
        std::iter::once(self.head())
            .chain(self.parts().iter().copied())
            .any(|m| world.get(m).is_some_and(|mon| mon.pos == pos))
    }

    /// Is `entity` the head or one of the parts?
    fn contains(&self, entity: EntityId) -> bool {
        entity == self.head() || self.parts().contains(&entity)
    }

    /// All members, with the head appended last when `include_head` is set.
    fn get_parts(&self, include_head: bool) -> Vec<EntityId> {
        let mut result = self.parts().to_vec();
        if include_head {
            result.push(self.head());
        }
        result
    }

    /// The entity whose attributes govern how `part` looks and behaves.
    fn reference_entity(&self, _part: EntityId) -> EntityId {
        self.head()
    }

    /// Is `part` its own reference entity?
    fn is_reference_entity(&self, part: EntityId) -> bool {
        self.reference_entity(part) == part
    }

    /// Removes every part from the world and forgets them.
    ///
    /// Parts die silently with a bookkeeping cause. Parts that are already
    /// gone are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the world's storage is inconsistent.
    fn destroy_parts(&mut self, world: &mut World) -> Result<()> {
        let parts = std::mem::take(&mut self.core_mut().parts);
        for part in parts {
            if !world.destroy(part, Killer::misc(), true)? {
                trace!("part {part:?} of {} was already dead", self.head_mid());
            }
        }
        Ok(())
    }

    /// Adjusts a glyph that was built from the reference entity so body
    /// segments do not masquerade as the head.
    fn adjust_glyph(&self, world: &World, glyph: &mut Glyph, part: EntityId) {
        if part == self.head() {
            return;
        }
        if let Some(monster) = world.get(part).filter(|m| m.kind.is_part()) {
            glyph.ch = monster.kind.glyph;
        }
    }

    /// Human-readable dump of the composite, for debugging.
    fn describe(&self, world: &World) -> String {
        let mut s = String::new();
        match world.get(self.head()) {
            Some(head) => {
                let _ = writeln!(
                    s,
                    "Part of composite type '{}'. Head at {} is '{}', {}.",
                    self.serialized_kind_tag(),
                    head.pos,
                    head.name(),
                    head.mid
                );
            }
            None => {
                let _ = writeln!(
                    s,
                    "Part of composite type '{}'. Head {} is gone.",
                    self.serialized_kind_tag(),
                    self.head_mid()
                );
            }
        }
        if self.parts().is_empty() {
            s.push_str("No parts.\n");
        } else {
            s.push_str("Parts:\n");
            for part in self.parts() {
                match world.get(*part) {
                    Some(m) => {
                        let _ = writeln!(s, "    part at {} is '{}', {}.", m.pos, m.name(), m.mid);
                    }
                    None => {
                        let _ = writeln!(s, "    dead part {part:?}.");
                    }
                }
            }
        }
        s
    }

    /// Could the head stand on `pos`?
    ///
    /// With `consider_occupants`, a cell held by an unrelated monster does
    /// not fit.
    ///
    /// # Errors
    ///
    /// Returns an error if the head is not live.
    fn head_fits_at(&self, world: &World, pos: Coord, consider_occupants: bool) -> Result<bool>;

    /// Moves the head to `pos`, dragging or reshaping the body as needed.
    ///
    /// Returns `Ok(false)` if the move is impossible; nothing changes then.
    ///
    /// # Errors
    ///
    /// Returns an error if a member is missing from the world.
    fn move_head_to(&mut self, world: &mut World, pos: Coord) -> Result<bool>;

    /// Reacts to the death of a non-head member.
    ///
    /// # Errors
    ///
    /// Returns an error if a member is missing from the world.
    fn on_part_died(
        &mut self,
        world: &mut World,
        part: EntityId,
        killer: Killer,
        silent: bool,
    ) -> Result<PartDeath>;

    /// Reacts to the death of the head.
    ///
    /// # Errors
    ///
    /// Returns an error if a member is missing from the world.
    fn on_head_died(&mut self, world: &mut World, killer: Killer, silent: bool) -> Result<()>;

    /// Reacts to damage dealt to a non-head member, before it is applied.
    ///
    /// # Errors
    ///
    /// Returns an error if a member is missing from the world.
    fn on_part_damage(&mut self, world: &mut World, part: EntityId, hit: &Hit)
    -> Result<DamageRoute>;

    /// Reacts to damage after it has been applied to the head.
    ///
    /// # Errors
    ///
    /// Returns an error if a member is missing from the world.
    fn on_head_damage(&mut self, world: &mut World, hit: &Hit) -> Result<()>;

    /// Tag naming this kind in property records.
    fn serialized_kind_tag(&self) -> &'static str;

    /// Writes the composite's topology into its members' property records.
    ///
    /// # Errors
    ///
    /// Returns an error if a member is missing from the world.
    fn sync_to_storage(&self, world: &mut World) -> Result<()>;
}
