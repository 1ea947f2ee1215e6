//! A world together with its composites.
//!
//! [`World`] knows nothing about composites and [`CompositeRegistry`] owns no
//! world; the session pairs them so callers can spawn, move, hurt and kill
//! without threading both through every call.

use log::debug;
use serpentine_composite::{AnyComposite, CompositeRegistry, LineComposite, LineConfig};
use serpentine_foundation::{Coord, EntityId, Mid, Result};
use serpentine_storage::{Death, Glyph, Hit, Killer, MonsterSpec, World, WorldConfig};

/// A world and the composites living in it.
#[derive(Clone, Debug)]
pub struct Session {
    /// The current world state.
    world: World,
    /// Composites keyed by head.
    composites: CompositeRegistry,
}

impl Session {
    /// Creates a session over an empty world.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: WorldConfig) -> Result<Self> {
        Ok(Self {
            world: World::new(config)?,
            composites: CompositeRegistry::new(),
        })
    }

    /// Creates a session over an existing world, rebuilding every composite
    /// recorded in it.
    ///
    /// # Errors
    ///
    /// Returns an error if a composite record is corrupt.
    pub fn with_world(mut world: World) -> Result<Self> {
        let mut composites = CompositeRegistry::new();
        let loaded = composites.load_all(&mut world)?;
        debug!("session resumed with {loaded} composites");
        Ok(Self { world, composites })
    }

    /// Returns a reference to the current world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Returns a mutable reference to the current world.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Returns the composite registry.
    #[must_use]
    pub const fn composites(&self) -> &CompositeRegistry {
        &self.composites
    }

    /// Spawns an ordinary single-cell monster.
    ///
    /// # Errors
    ///
    /// Returns an error if `pos` is out of bounds or occupied.
    pub fn spawn_monster(&mut self, spec: MonsterSpec, pos: Coord) -> Result<EntityId> {
        self.world.spawn(spec, pos)
    }

    /// Spawns a line composite with its head at `pos` and no parts yet.
    ///
    /// Returns the head's mid, which names the composite from then on.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, or `pos` is out of
    /// bounds or occupied.
    pub fn spawn_line(&mut self, spec: MonsterSpec, pos: Coord, config: LineConfig) -> Result<Mid> {
        config.validate()?;
        let head = self.world.spawn(spec, pos)?;
        let line = LineComposite::new(&self.world, head, config)?;
        self.composites.register(&mut self.world, line)
    }

    /// Moves a composite's head, reshaping its body.
    ///
    /// # Errors
    ///
    /// Returns an error if no composite has head `head`.
    pub fn move_head_to(&mut self, head: Mid, target: Coord) -> Result<bool> {
        self.composites.move_head_to(&mut self.world, head, target)
    }

    /// Applies damage. Returns true if something died of it.
    ///
    /// # Errors
    ///
    /// Returns an error if the world's storage is inconsistent.
    pub fn hurt(&mut self, entity: EntityId, hit: &Hit) -> Result<bool> {
        self.composites.hurt(&mut self.world, entity, hit)
    }

    /// Kills `entity` with an announced death.
    ///
    /// # Errors
    ///
    /// Returns an error if the world's storage is inconsistent.
    pub fn kill(&mut self, entity: EntityId, killer: Killer) -> Result<bool> {
        self.composites.kill(&mut self.world, entity, killer, false)
    }

    /// The composite `entity` belongs to.
    #[must_use]
    pub fn composite_of(&self, entity: EntityId) -> Option<&AnyComposite> {
        self.composites.composite_of(&self.world, entity)
    }

    /// The glyph `entity` should be drawn with.
    #[must_use]
    pub fn glyph_for(&self, entity: EntityId) -> Option<Glyph> {
        self.composites.glyph_for(&self.world, entity)
    }

    /// Debugging dump of `entity`'s composite.
    #[must_use]
    pub fn describe(&self, entity: EntityId) -> Option<String> {
        self.composites.describe(&self.world, entity)
    }

    /// Returns and clears the deaths processed so far.
    pub fn drain_deaths(&mut self) -> Vec<Death> {
        self.world.drain_deaths()
    }

    /// Writes every composite's topology into member records, ready for a
    /// snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if a member is not live.
    pub fn sync_composites(&mut self) -> Result<()> {
        self.composites.sync_all(&mut self.world)
    }

    /// Snapshots the session to `MessagePack` bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if a composite cannot be synced or encoding fails.
    pub fn save(&mut self) -> Result<Vec<u8>> {
        crate::serialize::to_bytes(self)
    }

    /// Restores a session from bytes written by [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails or a composite record is corrupt.
    pub fn restore(bytes: &[u8]) -> Result<Self> {
        crate::serialize::from_bytes(bytes)
    }
}
