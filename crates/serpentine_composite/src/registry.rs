//! Composites keyed by head, and the routing of deaths and damage.
//!
//! Members point at their composite through [`Monster::composite`], which
//! holds the head's [`Mid`]. The registry owns the composites themselves, so
//! kind hooks never need to reach back into it: they return a
//! [`PartDeath`](crate::PartDeath) or [`DamageRoute`](crate::DamageRoute) and
//! the registry follows the redirect.
//!
//! [`Monster::composite`]: serpentine_storage::Monster::composite

use std::collections::BTreeMap;

use log::{debug, trace};
use serpentine_foundation::{Coord, EntityId, Error, ErrorContext, ErrorKind, Mid, Result};
use serpentine_storage::{Glyph, Hit, Killer, World};

use crate::composite::Composite;
use crate::kinds::AnyComposite;
use crate::record;

/// Every composite in a world, keyed by head mid.
#[derive(Clone, Debug, Default)]
pub struct CompositeRegistry {
    composites: BTreeMap<Mid, AnyComposite>,
}

impl CompositeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of composites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.composites.len()
    }

    /// True if there are no composites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.composites.is_empty()
    }

    /// The composite headed by `head`.
    #[must_use]
    pub fn get(&self, head: Mid) -> Option<&AnyComposite> {
        self.composites.get(&head)
    }

    /// The composite headed by `head`, mutably.
    pub fn get_mut(&mut self, head: Mid) -> Option<&mut AnyComposite> {
        self.composites.get_mut(&head)
    }

    /// Iterates over composites in head-mid order.
    pub fn iter(&self) -> impl Iterator<Item = (Mid, &AnyComposite)> {
        self.composites.iter().map(|(mid, c)| (*mid, c))
    }

    /// Installs back-references on every member and takes ownership of the
    /// composite. Replaces any composite with the same head.
    ///
    /// # Errors
    ///
    /// Returns an error if a member is not live.
    pub fn register(&mut self, world: &mut World, composite: impl Into<AnyComposite>) -> Result<Mid> {
        let composite = composite.into();
        let head_mid = composite.head_mid();
        for member in composite.get_parts(true) {
            world.monster_mut(member)?.composite = Some(head_mid);
        }
        debug!(
            "registered {} composite {head_mid} with {} parts",
            composite.serialized_kind_tag(),
            composite.parts().len()
        );
        self.composites.insert(head_mid, composite);
        Ok(head_mid)
    }

    /// Head mid of the registered composite `entity` belongs to.
    #[must_use]
    pub fn owner_of(&self, world: &World, entity: EntityId) -> Option<Mid> {
        world
            .get(entity)?
            .composite
            .filter(|head| self.composites.contains_key(head))
    }

    /// The composite `entity` belongs to.
    #[must_use]
    pub fn composite_of(&self, world: &World, entity: EntityId) -> Option<&AnyComposite> {
        self.owner_of(world, entity)
            .and_then(|head| self.composites.get(&head))
    }

    /// Rebuilds and registers the composite headed by `head`.
    ///
    /// # Errors
    ///
    /// Returns an error if the head's record is corrupt or names an unknown
    /// kind.
    pub fn load(&mut self, world: &mut World, head: EntityId) -> Result<Mid> {
        let mid = world.mid(head)?;
        let composite = AnyComposite::load(world, head).map_err(|e| {
            e.with_context(
                ErrorContext::new()
                    .with_operation("load composite")
                    .with_mid(mid),
            )
        })?;
        debug!("loaded composite {}", composite.head_mid());
        self.register(world, composite)
    }

    /// Loads every composite whose head record is present in `world`.
    ///
    /// Returns how many were loaded.
    ///
    /// # Errors
    ///
    /// Stops at the first corrupt record.
    pub fn load_all(&mut self, world: &mut World) -> Result<usize> {
        let heads: Vec<EntityId> = world
            .monsters()
            .filter(|(_, m)| record::detect(m))
            .map(|(id, _)| id)
            .collect();
        for &head in &heads {
            self.load(world, head)?;
        }
        Ok(heads.len())
    }

    /// Writes every composite's topology into its members' records.
    ///
    /// # Errors
    ///
    /// Returns an error if a member is not live.
    pub fn sync_all(&self, world: &mut World) -> Result<()> {
        for composite in self.composites.values() {
            composite.sync_to_storage(world)?;
        }
        Ok(())
    }

    /// Moves the head of composite `head` to `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if no composite has that head, or a member is
    /// missing from the world.
    pub fn move_head_to(&mut self, world: &mut World, head: Mid, target: Coord) -> Result<bool> {
        self.composites
            .get_mut(&head)
            .ok_or_else(|| Error::new(ErrorKind::UnknownMid(head)))?
            .move_head_to(world, target)
    }

    /// Kills `entity`, routing through its composite.
    ///
    /// A dying part asks its composite what to do and follows any redirect;
    /// a dying head takes its parts with it and unregisters the composite.
    /// Returns whether a kill was credited, including one credited through a
    /// redirect. Killing something already dead does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the world's storage is inconsistent.
    pub fn kill(
        &mut self,
        world: &mut World,
        entity: EntityId,
        killer: Killer,
        silent: bool,
    ) -> Result<bool> {
        let Some(mid) = world.get(entity).map(|m| m.mid) else {
            trace!("{entity:?} is already dead");
            return Ok(false);
        };
        let Some(head) = self.owner_of(world, entity) else {
            return world.destroy(entity, killer, silent);
        };

        if head == mid {
            if let Some(mut composite) = self.composites.remove(&head) {
                composite.on_head_died(world, killer, silent)?;
            }
            debug!("composite {head} died: {killer:?}");
            return world.destroy(entity, killer, silent);
        }

        let death = match self.composites.get_mut(&head) {
            Some(composite) => composite.on_part_died(world, entity, killer, silent)?,
            None => return world.destroy(entity, killer, silent),
        };
        let mut credited = death.counts_as_kill;
        if let Some(target) = death.redirect_to.filter(|t| *t != entity) {
            trace!("death of {mid} redirected to {target:?}");
            credited |= self.kill(world, target, killer, silent)?;
        }
        if world.exists(entity) {
            if let Some(composite) = self.composites.get_mut(&head) {
                composite.core_mut().remove_part(entity);
            }
            world.destroy(entity, killer, silent)?;
        }
        Ok(credited)
    }

    /// Applies `hit` to `entity`, routing through its composite.
    ///
    /// Returns true if the hit killed whatever absorbed it.
    ///
    /// # Errors
    ///
    /// Returns an error if the world's storage is inconsistent.
    pub fn hurt(&mut self, world: &mut World, entity: EntityId, hit: &Hit) -> Result<bool> {
        let Some(mid) = world.get(entity).map(|m| m.mid) else {
            return Ok(false);
        };
        let owner = self.owner_of(world, entity);

        if let Some(head) = owner.filter(|h| *h != mid) {
            let route = match self.composites.get_mut(&head) {
                Some(composite) => composite.on_part_damage(world, entity, hit)?,
                None => return Ok(false),
            };
            if let Some(target) = route.forward_to.filter(|t| *t != entity) {
                trace!("damage to {mid} forwarded to {target:?}");
                return self.hurt(world, target, hit);
            }
            if !route.lethal {
                let hp = world.hit_points(entity)?;
                world.set_hit_points(entity, hp.saturating_sub(hit.amount).max(1))?;
                return Ok(false);
            }
        }

        let hp = world.hit_points(entity)?.saturating_sub(hit.amount);
        world.set_hit_points(entity, hp)?;
        if owner == Some(mid) {
            if let Some(composite) = self.composites.get_mut(&mid) {
                composite.on_head_damage(world, hit)?;
            }
        }
        if hp <= 0 {
            self.kill(world, entity, hit.killer(), false)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// The glyph `entity` should be drawn with.
    ///
    /// Members start from their reference entity's glyph, which their
    /// composite may then adjust.
    #[must_use]
    pub fn glyph_for(&self, world: &World, entity: EntityId) -> Option<Glyph> {
        let monster = world.get(entity)?;
        let Some(composite) = self.composite_of(world, entity) else {
            return Some(monster.glyph());
        };
        let mut glyph = world.get(composite.reference_entity(entity))?.glyph();
        composite.adjust_glyph(world, &mut glyph, entity);
        Some(glyph)
    }

    /// Debugging dump of the composite `entity` belongs to, or of its
    /// composite record if none is registered.
    #[must_use]
    pub fn describe(&self, world: &World, entity: EntityId) -> Option<String> {
        let monster = world.get(entity)?;
        Some(match self.composite_of(world, entity) {
            Some(composite) => composite.describe(world),
            None => record::describe_record(world, monster),
        })
    }
}
