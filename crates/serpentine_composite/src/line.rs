//! Line composites: flexible, snake-like creatures.
//!
//! A line is a head followed by parts in head-to-tail order, each part
//! adjacent to the one in front of it. Moving one step drags the body along
//! behind the head; moving into the creature's own body shortens or loops it;
//! a long jump collapses it to the head alone. The head owns hit points and
//! every other combat statistic, and parts mirror it.

use log::{debug, trace, warn};
use rand::seq::SliceRandom;
use serpentine_foundation::{Coord, EntityId, Error, ErrorKind, Result};
use serpentine_storage::{Hit, Killer, MonsterKind, MonsterSpec, OccupancyIndex, World};

use crate::composite::{Composite, CompositeCore, DamageRoute, PartDeath};
use crate::record::{self, LINE_KIND, LINE_LENGTH_KEY};

/// Configuration for a line composite.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LineConfig {
    /// Upper bound on head plus parts.
    pub max_length: usize,
}

impl LineConfig {
    /// A line that can grow to `max_length` segments.
    #[must_use]
    pub const fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    /// Checks that the line can hold at least its head.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_length` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_length == 0 {
            return Err(Error::new(ErrorKind::InvalidConfig(
                "line max_length must be at least 1".to_string(),
            )));
        }
        Ok(())
    }
}

impl Default for LineConfig {
    fn default() -> Self {
        Self::new(5)
    }
}

/// Shape state of a line, derived from its length.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LineState {
    /// Only the head; there is nothing to contract.
    Single,
    /// Has room to grow.
    Growing,
    /// At maximum length; expansion always fails.
    Full,
}

/// A snake-like composite of up to `max_length` segments.
#[derive(Clone, Debug)]
pub struct LineComposite {
    core: CompositeCore,
    max_length: usize,
}

impl PartialEq for LineComposite {
    fn eq(&self, other: &Self) -> bool {
        self.core == other.core
    }
}

impl LineComposite {
    /// A length-1 line headed by `head`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or `head` is not live.
    pub fn new(world: &World, head: EntityId, config: LineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            core: CompositeCore::new(world, head)?,
            max_length: config.max_length,
        })
    }

    /// A line headed by `head` with parts spawned at `body`, head-to-tail.
    ///
    /// # Errors
    ///
    /// Returns an error if the body does not fit the configuration, a cell
    /// is not adjacent to the previous segment, or a cell cannot be spawned
    /// on.
    pub fn with_body(
        world: &mut World,
        head: EntityId,
        config: LineConfig,
        body: &[Coord],
    ) -> Result<Self> {
        let mut line = Self::new(world, head, config)?;
        if body.len() + 1 > line.max_length {
            return Err(Error::new(ErrorKind::InvalidConfig(format!(
                "body of {} parts exceeds max_length {}",
                body.len(),
                line.max_length
            ))));
        }
        let mut previous = world.position(head)?;
        for &pos in body {
            if !previous.is_adjacent(pos) {
                return Err(Error::new(ErrorKind::InvalidConfig(format!(
                    "body cell {pos} is not adjacent to {previous}"
                ))));
            }
            let part = line.new_part_at(world, pos)?;
            line.core.parts.push(part);
            previous = pos;
        }
        Ok(line)
    }

    /// Rebuilds a line from the head's property record.
    ///
    /// Part attributes are re-derived from the head. Back-references are
    /// not installed; see [`CompositeRegistry::load`](crate::CompositeRegistry::load).
    ///
    /// # Errors
    ///
    /// Returns an error if the record is missing, inconsistent, or names
    /// parts that are not live.
    pub fn load(world: &mut World, head: EntityId) -> Result<Self> {
        let core = record::load_core(world, head, LINE_KIND)?;
        let data = record::head_record(world, head)?;
        let stored = data
            .get_int(LINE_LENGTH_KEY)
            .map_err(record::corrupt(core.head_mid, LINE_LENGTH_KEY))?;
        let max_length = usize::try_from(stored)
            .ok()
            .filter(|&n| n >= 1 && n > core.parts.len())
            .ok_or_else(|| {
                Error::corrupt_composite(
                    core.head_mid,
                    LINE_LENGTH_KEY,
                    format!("max length {stored} cannot hold {} parts", core.parts.len()),
                )
            })?;

        let line = Self { core, max_length };
        line.sync_parts(world)?;
        Ok(line)
    }

    /// Head plus parts.
    #[must_use]
    pub fn length(&self) -> usize {
        self.core.parts.len() + 1
    }

    /// Upper bound on [`length`](Self::length).
    #[must_use]
    pub const fn max_length(&self) -> usize {
        self.max_length
    }

    /// Current shape state.
    #[must_use]
    pub fn state(&self) -> LineState {
        if self.length() >= self.max_length {
            LineState::Full
        } else if self.length() == 1 {
            LineState::Single
        } else {
            LineState::Growing
        }
    }

    /// The last segment; the head when there are no parts.
    #[must_use]
    pub fn tail(&self) -> EntityId {
        self.core.parts.last().copied().unwrap_or(self.core.head)
    }

    /// Re-derives every part's attributes from the head.
    ///
    /// # Errors
    ///
    /// Returns an error if a member is not live.
    pub fn sync_parts(&self, world: &mut World) -> Result<()> {
        for &part in &self.core.parts {
            sync_part(world, self.core.head, part)?;
        }
        Ok(())
    }

    /// Spawns a part at `pos` without adding it to the body.
    fn new_part_at(&self, world: &mut World, pos: Coord) -> Result<EntityId> {
        let head = world.monster(self.core.head)?;
        let spec = MonsterSpec {
            foe: head.foe,
            ..MonsterSpec::new(MonsterKind::part(head.kind.habitat))
                .with_stats(head.stats)
                .with_colour(head.colour)
                .with_attitude(head.attitude)
        };
        let part = world.spawn(spec, pos)?;
        sync_part(world, self.core.head, part)?;
        world.monster_mut(part)?.composite = Some(self.core.head_mid);
        Ok(part)
    }

    /// Grows by one segment next to the tail.
    ///
    /// Candidate cells are the tail's neighbours that the head's habitat
    /// allows and nobody occupies; one is picked uniformly at random. Fails
    /// without side effects at full length or when no cell qualifies.
    ///
    /// # Errors
    ///
    /// Returns an error if a member is not live.
    pub fn expand(&mut self, world: &mut World) -> Result<bool> {
        if self.length() >= self.max_length {
            return Ok(false);
        }
        let habitat = world.monster(self.core.head)?.kind.habitat;
        let tail_pos = world.position(self.tail())?;

        let candidates: Vec<Coord> = tail_pos
            .neighbours()
            .filter(|&c| world.habitable(habitat, c) && world.monster_at(c).is_none())
            .collect();
        let Some(&spot) = candidates.choose(world.rng_mut()) else {
            trace!("{} has no room to grow at {tail_pos}", self.core.head_mid);
            return Ok(false);
        };

        let part = self.new_part_at(world, spot)?;
        self.core.parts.push(part);
        trace!("{} grew to length {} at {spot}", self.core.head_mid, self.length());
        Ok(true)
    }

    /// Shrinks by one segment.
    ///
    /// From the head, the head steps onto the first part's cell and that
    /// part is removed; from the tail, the tail part is removed. Fails at
    /// length 1.
    ///
    /// # Errors
    ///
    /// Returns an error if a member is not live.
    pub fn contract(&mut self, world: &mut World, from_head: bool) -> Result<bool> {
        if self.length() == 1 {
            return Ok(false);
        }
        if from_head {
            let head = self.core.head;
            let first = self.core.parts.remove(0);
            let new_head_pos = world.position(first)?;
            let old_pos = world.position(head)?;

            world.destroy(first, Killer::misc(), true)?;
            world.move_to(head, new_head_pos)?;
            let index = world.occupancy_mut();
            index.set(new_head_pos, head);
            index.clear_if(old_pos, head);
        } else if let Some(tail) = self.core.parts.pop() {
            world.destroy(tail, Killer::misc(), true)?;
        }
        Ok(true)
    }

    /// Contracts from the tail down to the head alone.
    ///
    /// Best effort: a failed step leaves the line at whatever length it had
    /// reached.
    ///
    /// # Errors
    ///
    /// Returns an error if a member is not live.
    pub fn contract_all(&mut self, world: &mut World) -> Result<bool> {
        while self.length() > 1 {
            if !self.contract(world, false)? {
                warn!(
                    "{} stopped contracting at length {}",
                    self.core.head_mid,
                    self.length()
                );
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Turns the line around in place.
    ///
    /// The occupied cells stay the same; member `i` (head first) takes the
    /// cell that member `length - 1 - i` held.
    ///
    /// # Errors
    ///
    /// Returns an error if a member is not live.
    pub fn invert(&mut self, world: &mut World) -> Result<()> {
        let members: Vec<EntityId> = std::iter::once(self.core.head)
            .chain(self.core.parts.iter().copied())
            .collect();
        let mut positions = members
            .iter()
            .map(|&m| world.position(m))
            .collect::<Result<Vec<_>>>()?;

        for &member in &members {
            let Some(pos) = positions.pop() else { break };
            world.move_to(member, pos)?;
            world.occupancy_mut().set(pos, member);
        }
        Ok(())
    }

    /// Snake step: the head moves to `target` and every part slides into the
    /// cell its predecessor just left.
    ///
    /// No validity checks are made. The cell the tail leaves is cleared in
    /// the index unless the head has already claimed it, which happens when
    /// the line loops onto its own tail.
    ///
    /// # Errors
    ///
    /// Returns an error if a member is not live.
    pub fn snake_movement_raw(&mut self, world: &mut World, target: Coord) -> Result<()> {
        let head = self.core.head;
        let mut last = world.position(head)?;
        let mut last_member = head;

        world.move_to(head, target)?;
        world.occupancy_mut().set(target, head);
        for &part in &self.core.parts {
            let vacated = world.position(part)?;
            world.move_to(part, last)?;
            world.occupancy_mut().set(last, part);
            last = vacated;
            last_member = part;
        }
        world.occupancy_mut().clear_if(last, last_member);
        Ok(())
    }

    /// Moves the head onto one of its own segments.
    fn move_head_to_part(&mut self, world: &mut World, part: EntityId) -> Result<bool> {
        if part == self.core.head {
            return Ok(true);
        }
        if part == self.tail() {
            if self.length() <= 2 {
                self.invert(world)?;
            } else {
                let loop_to = world.position(part)?;
                self.snake_movement_raw(world, loop_to)?;
            }
            return Ok(true);
        }

        // walk the head down its own body
        let part_pos = world.position(part)?;
        while world.position(self.core.head)? != part_pos {
            if !self.contract(world, true)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Copies the head's combat-relevant state onto `part`.
fn sync_part(world: &mut World, head: EntityId, part: EntityId) -> Result<()> {
    let h = world.monster(head)?.clone();
    let p = world.monster_mut(part)?;
    p.experience = 0;
    p.stats = h.stats;
    p.hit_points = h.hit_points;
    p.colour = h.colour;
    p.attitude = h.attitude;
    p.foe = h.foe;
    p.foe_memory = h.foe_memory;
    p.summoner = h.summoner;
    Ok(())
}

impl Composite for LineComposite {
    fn core(&self) -> &CompositeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CompositeCore {
        &mut self.core
    }

    fn head_fits_at(&self, world: &World, pos: Coord, consider_occupants: bool) -> Result<bool> {
        if !world.in_bounds(pos) {
            return Ok(false);
        }
        if consider_occupants {
            if let Some(occupant) = world.monster_at(pos) {
                // lines can move into any part of themselves
                return Ok(self.contains(occupant));
            }
        }
        world.can_traverse(self.core.head, pos)
    }

    fn move_head_to(&mut self, world: &mut World, pos: Coord) -> Result<bool> {
        debug!("moving {} head to {pos}", self.core.head_mid);
        let habitat = world.monster(self.core.head)?.kind.habitat;
        if !self.head_fits_at(world, pos, true)? || !world.habitable(habitat, pos) {
            return Ok(false);
        }

        if let Some(occupant) = world.monster_at(pos).filter(|&m| self.contains(m)) {
            return self.move_head_to_part(world, occupant);
        }

        let head_pos = world.position(self.core.head)?;
        if head_pos.is_adjacent(pos) {
            // grow first so the new segment follows the body
            if self.length() < self.max_length {
                self.expand(world)?;
            }
            self.snake_movement_raw(world, pos)?;
        } else {
            debug!("{} jumps {head_pos} -> {pos}; collapsing", self.core.head_mid);
            if !self.contract_all(world)? {
                return Ok(false);
            }
            let head = self.core.head;
            world.move_to(head, pos)?;
            let index = world.occupancy_mut();
            index.set(pos, head);
            index.clear_if(head_pos, head);
        }
        Ok(true)
    }

    fn on_part_died(
        &mut self,
        _world: &mut World,
        _part: EntityId,
        _killer: Killer,
        _silent: bool,
    ) -> Result<PartDeath> {
        // the head's death cleans up every part, this one included
        Ok(PartDeath {
            redirect_to: Some(self.core.head),
            counts_as_kill: false,
        })
    }

    fn on_head_died(&mut self, world: &mut World, _killer: Killer, _silent: bool) -> Result<()> {
        self.destroy_parts(world)
    }

    fn on_part_damage(
        &mut self,
        _world: &mut World,
        _part: EntityId,
        _hit: &Hit,
    ) -> Result<DamageRoute> {
        Ok(DamageRoute {
            forward_to: Some(self.core.head),
            lethal: false,
        })
    }

    fn on_head_damage(&mut self, world: &mut World, _hit: &Hit) -> Result<()> {
        // parts never die on their own; the head's death removes them
        let floor = world.hit_points(self.core.head)?.max(1);
        for &part in &self.core.parts {
            world.set_hit_points(part, floor)?;
        }
        Ok(())
    }

    fn serialized_kind_tag(&self) -> &'static str {
        LINE_KIND
    }

    fn sync_to_storage(&self, world: &mut World) -> Result<()> {
        record::write_base(self, world)?;
        let max_length = i64::try_from(self.max_length)
            .map_err(|_| Error::new(ErrorKind::Internal("max_length overflows".to_string())))?;
        record::head_record_mut(world, self.core.head)?.insert(LINE_LENGTH_KEY, max_length);
        Ok(())
    }
}
