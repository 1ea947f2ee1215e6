//! Entity lifecycle management with generational indices.
//!
//! The `EntityStore` manages slot allocation, tracks generations to detect
//! stale handles, and hands out persistent [`Mid`]s. A slot is reused after
//! its entity is destroyed; a mid never is.

// Allow u64 to usize casts - we target 64-bit systems
#![allow(clippy::cast_possible_truncation)]

use std::collections::BTreeMap;

use serpentine_foundation::{EntityId, Error, Mid, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Manages entity lifecycle, generation tracking and mid allocation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityStore {
    /// Generation counter for each slot.
    /// Even generations are free, odd generations are alive.
    generations: Vec<u32>,
    /// Persistent identity of the entity living in each slot.
    mids: Vec<Option<Mid>>,
    /// Free list of slots available for reuse.
    free_list: Vec<u64>,
    /// Live entities by persistent identity.
    by_mid: BTreeMap<Mid, EntityId>,
    /// Next mid to hand out.
    next_mid: u32,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    /// Creates a new empty entity store.
    ///
    /// Mids start at 1 so that 0 never names a monster.
    #[must_use]
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            mids: Vec::new(),
            free_list: Vec::new(),
            by_mid: BTreeMap::new(),
            next_mid: 1,
        }
    }

    /// Spawns a new entity, returning its slot handle and fresh mid.
    ///
    /// Reuses slots from the free list when available.
    pub fn spawn(&mut self) -> (EntityId, Mid) {
        let mid = Mid(self.next_mid);
        self.next_mid += 1;

        let id = if let Some(index) = self.free_list.pop() {
            let idx = index as usize;
            // was even/free, now odd/alive
            self.generations[idx] += 1;
            self.mids[idx] = Some(mid);
            EntityId::new(index, self.generations[idx])
        } else {
            let index = self.generations.len() as u64;
            self.generations.push(1);
            self.mids.push(Some(mid));
            EntityId::new(index, 1)
        };

        self.by_mid.insert(mid, id);
        (id, mid)
    }

    /// Destroys an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is stale or already destroyed.
    pub fn destroy(&mut self, id: EntityId) -> Result<Mid> {
        self.validate(id)?;

        let idx = id.index as usize;
        // was odd/alive, now even/free
        self.generations[idx] += 1;
        self.free_list.push(id.index);
        let mid = self.mids[idx]
            .take()
            .ok_or_else(|| Error::entity_not_found(id))?;
        self.by_mid.remove(&mid);

        Ok(mid)
    }

    /// Checks if an entity exists and is not stale.
    #[must_use]
    pub fn exists(&self, id: EntityId) -> bool {
        self.generations
            .get(id.index as usize)
            .is_some_and(|&generation| generation == id.generation && generation % 2 == 1)
    }

    /// Validates that an entity is live.
    ///
    /// # Errors
    ///
    /// Returns a stale-entity error on generation mismatch, or not-found if
    /// the slot never existed or is free.
    pub fn validate(&self, id: EntityId) -> Result<()> {
        let Some(&current_gen) = self.generations.get(id.index as usize) else {
            return Err(Error::entity_not_found(id));
        };

        if current_gen != id.generation {
            return Err(Error::stale_entity(id));
        }

        if current_gen % 2 == 0 {
            return Err(Error::entity_not_found(id));
        }

        Ok(())
    }

    /// Resolves a persistent identity to its live slot.
    #[must_use]
    pub fn by_mid(&self, mid: Mid) -> Option<EntityId> {
        self.by_mid.get(&mid).copied()
    }

    /// Returns the persistent identity of a live entity.
    #[must_use]
    pub fn mid_of(&self, id: EntityId) -> Option<Mid> {
        if self.exists(id) {
            self.mids[id.index as usize]
        } else {
            None
        }
    }

    /// Returns the total number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_mid.len()
    }

    /// Returns true if there are no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_mid.is_empty()
    }

    /// Iterates over all live entity IDs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.generations
            .iter()
            .enumerate()
            .filter(|(_, generation)| *generation % 2 == 1)
            .map(|(idx, generation)| EntityId::new(idx as u64, *generation))
    }
}
