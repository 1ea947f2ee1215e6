//! World state: entities, monsters, terrain, occupancy, and randomness.
//!
//! The `World` is the unified interface the composite layer works against.
//! It owns the occupancy index but never moves entities on the index by
//! itself: [`World::move_to`] only changes a monster's recorded position, and
//! callers reconcile the index, the way a mover that knows about its own
//! multi-cell body has to.

use std::collections::BTreeMap;

use log::trace;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serpentine_foundation::{Coord, EntityId, Error, ErrorKind, Mid, Result};

use crate::config::WorldConfig;
use crate::damage::{Death, Killer};
use crate::entity::EntityStore;
use crate::monster::{Monster, MonsterSpec};
use crate::occupancy::{OccupancyGrid, OccupancyIndex};
use crate::terrain::{Feature, FeatureGrid, Habitat};

#[cfg(feature = "serde")]
mod serde_support {
    use super::World;
    use crate::config::WorldConfig;
    use crate::entity::EntityStore;
    use crate::monster::Monster;
    use crate::occupancy::OccupancyGrid;
    use crate::terrain::FeatureGrid;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serpentine_foundation::EntityId;

    #[derive(Serialize)]
    struct WorldRef<'a> {
        config: &'a WorldConfig,
        entities: &'a EntityStore,
        monsters: Vec<(EntityId, &'a Monster)>,
        terrain: &'a FeatureGrid,
        occupancy: &'a OccupancyGrid,
    }

    #[derive(Deserialize)]
    struct WorldData {
        config: WorldConfig,
        entities: EntityStore,
        monsters: Vec<(EntityId, Monster)>,
        terrain: FeatureGrid,
        occupancy: OccupancyGrid,
    }

    impl Serialize for World {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            // The random stream and the death log are not part of a snapshot.
            WorldRef {
                config: &self.config,
                entities: &self.entities,
                monsters: self.monsters.iter().map(|(id, m)| (*id, m)).collect(),
                terrain: &self.terrain,
                occupancy: &self.occupancy,
            }
            .serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for World {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let data = WorldData::deserialize(deserializer)?;
            let (width, height) = (data.config.width, data.config.height);
            data.config.validate().map_err(D::Error::custom)?;
            if !data.terrain.has_shape(width, height) {
                return Err(D::Error::custom(format!(
                    "terrain does not cover a {width}x{height} map"
                )));
            }
            if !data.occupancy.has_shape(width, height) {
                return Err(D::Error::custom(format!(
                    "occupancy index does not cover a {width}x{height} map"
                )));
            }
            Ok(World {
                rng: ChaCha8Rng::seed_from_u64(data.config.seed),
                config: data.config,
                entities: data.entities,
                monsters: data.monsters.into_iter().collect(),
                terrain: data.terrain,
                occupancy: data.occupancy,
                deaths: Vec::new(),
            })
        }
    }
}

/// Mutable simulation state.
#[derive(Clone, Debug)]
pub struct World {
    /// Construction parameters.
    config: WorldConfig,
    /// Slot and mid allocation.
    entities: EntityStore,
    /// Monster records by slot.
    monsters: BTreeMap<EntityId, Monster>,
    /// Map terrain.
    terrain: FeatureGrid,
    /// Cell to slot index.
    occupancy: OccupancyGrid,
    /// Seeded random source.
    rng: ChaCha8Rng,
    /// Deaths processed since the last drain.
    deaths: Vec<Death>,
}

impl World {
    /// Creates an empty world.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            entities: EntityStore::new(),
            monsters: BTreeMap::new(),
            terrain: FeatureGrid::new(config.width, config.height, config.default_feature),
            occupancy: OccupancyGrid::new(config.width, config.height),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            deaths: Vec::new(),
            config,
        })
    }

    /// The configuration this world was built from.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// True if `pos` lies on the map.
    #[must_use]
    pub fn in_bounds(&self, pos: Coord) -> bool {
        self.terrain.in_bounds(pos)
    }

    /// Terrain.
    #[must_use]
    pub fn terrain(&self) -> &FeatureGrid {
        &self.terrain
    }

    /// The feature at `pos`.
    #[must_use]
    pub fn feature(&self, pos: Coord) -> Feature {
        self.terrain.get(pos)
    }

    /// Changes the feature at `pos`.
    ///
    /// # Errors
    ///
    /// Returns an error if `pos` is out of bounds.
    pub fn set_feature(&mut self, pos: Coord, feature: Feature) -> Result<()> {
        self.terrain.set(pos, feature)
    }

    /// The occupancy index.
    #[must_use]
    pub fn occupancy(&self) -> &OccupancyGrid {
        &self.occupancy
    }

    /// Mutable access to the occupancy index.
    pub fn occupancy_mut(&mut self) -> &mut OccupancyGrid {
        &mut self.occupancy
    }

    /// The world's random source.
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Can a creature of `habitat` live at `pos`?
    #[must_use]
    pub fn habitable(&self, habitat: Habitat, pos: Coord) -> bool {
        self.in_bounds(pos) && habitat.can_occupy(self.terrain.get(pos))
    }

    /// Can monster `id` physically move onto `pos`, ignoring occupants?
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not live.
    pub fn can_traverse(&self, id: EntityId, pos: Coord) -> Result<bool> {
        let habitat = self.monster(id)?.kind.habitat;
        Ok(self.habitable(habitat, pos))
    }

    /// Spawns a monster at `pos` and records it in the occupancy index.
    ///
    /// # Errors
    ///
    /// Returns an error if `pos` is out of bounds or already occupied.
    pub fn spawn(&mut self, spec: MonsterSpec, pos: Coord) -> Result<EntityId> {
        if !self.in_bounds(pos) {
            return Err(Error::out_of_bounds(pos));
        }
        if let Some(occupant) = self.monster_at(pos) {
            return Err(Error::new(ErrorKind::CellOccupied { pos, occupant }));
        }

        let (id, mid) = self.entities.spawn();
        trace!("spawned {} ({mid}) at {pos}", spec.kind.name);
        self.monsters.insert(id, Monster::from_spec(spec, mid, pos));
        self.occupancy.set(pos, id);
        Ok(id)
    }

    /// Removes a monster from the world.
    ///
    /// Clears its occupancy entry if the cell still points at it. Returns
    /// `Ok(false)` without doing anything if the monster is already gone.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity store and monster table disagree.
    pub fn destroy(&mut self, id: EntityId, killer: Killer, silent: bool) -> Result<bool> {
        if !self.entities.exists(id) {
            return Ok(false);
        }
        let monster = self
            .monsters
            .remove(&id)
            .ok_or_else(|| Error::new(ErrorKind::Internal(format!("{id:?} has no monster record"))))?;
        self.entities.destroy(id)?;
        self.occupancy.clear_if(monster.pos, id);
        trace!("{} ({}) died at {}: {killer:?}", monster.name(), monster.mid, monster.pos);
        self.deaths.push(Death {
            mid: monster.mid,
            pos: monster.pos,
            killer,
            silent,
        });
        Ok(true)
    }

    /// Returns and clears the deaths processed so far.
    pub fn drain_deaths(&mut self) -> Vec<Death> {
        std::mem::take(&mut self.deaths)
    }

    /// Checks if an entity is live.
    #[must_use]
    pub fn exists(&self, id: EntityId) -> bool {
        self.entities.exists(id)
    }

    /// Gets a monster if it is live.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Monster> {
        if self.entities.exists(id) {
            self.monsters.get(&id)
        } else {
            None
        }
    }

    /// Gets a live monster.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is stale or was never allocated.
    pub fn monster(&self, id: EntityId) -> Result<&Monster> {
        self.entities.validate(id)?;
        self.monsters.get(&id).ok_or_else(|| Error::entity_not_found(id))
    }

    /// Gets a live monster mutably.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is stale or was never allocated.
    pub fn monster_mut(&mut self, id: EntityId) -> Result<&mut Monster> {
        self.entities.validate(id)?;
        self.monsters
            .get_mut(&id)
            .ok_or_else(|| Error::entity_not_found(id))
    }

    /// Resolves a persistent identity to a live slot.
    #[must_use]
    pub fn monster_by_mid(&self, mid: Mid) -> Option<EntityId> {
        self.entities.by_mid(mid)
    }

    /// Persistent identity of a live monster.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not live.
    pub fn mid(&self, id: EntityId) -> Result<Mid> {
        Ok(self.monster(id)?.mid)
    }

    /// The live monster the occupancy index places at `pos`.
    #[must_use]
    pub fn monster_at(&self, pos: Coord) -> Option<EntityId> {
        self.occupancy.get(pos).filter(|id| self.entities.exists(*id))
    }

    /// Current position of a monster.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not live.
    pub fn position(&self, id: EntityId) -> Result<Coord> {
        Ok(self.monster(id)?.pos)
    }

    /// Changes a monster's recorded position. Does not touch the occupancy
    /// index.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not live.
    pub fn move_to(&mut self, id: EntityId, pos: Coord) -> Result<()> {
        self.monster_mut(id)?.pos = pos;
        Ok(())
    }

    /// Current hit points.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not live.
    pub fn hit_points(&self, id: EntityId) -> Result<i32> {
        Ok(self.monster(id)?.hit_points)
    }

    /// Sets current hit points.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not live.
    pub fn set_hit_points(&mut self, id: EntityId, hit_points: i32) -> Result<()> {
        self.monster_mut(id)?.hit_points = hit_points;
        Ok(())
    }

    /// Iterates over live monsters in slot order.
    pub fn monsters(&self) -> impl Iterator<Item = (EntityId, &Monster)> {
        self.monsters.iter().map(|(id, m)| (*id, m))
    }

    /// Number of live monsters.
    #[must_use]
    pub fn monster_count(&self) -> usize {
        self.entities.len()
    }
}
