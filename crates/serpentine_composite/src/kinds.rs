//! The closed set of composite kinds.

use serpentine_foundation::{Coord, EntityId, Error, ErrorKind, Result};
use serpentine_storage::{Glyph, Hit, Killer, World};

use crate::composite::{Composite, CompositeCore, DamageRoute, PartDeath};
use crate::line::LineComposite;
use crate::record::{self, LINE_KIND};

/// Any composite the registry can hold.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyComposite {
    /// A snake-like line.
    Line(LineComposite),
}

macro_rules! dispatch {
    ($self:expr, $c:ident => $body:expr) => {
        match $self {
            AnyComposite::Line($c) => $body,
        }
    };
}

impl AnyComposite {
    /// Rebuilds the composite headed by `head` from its property record,
    /// choosing the kind by the stored tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag names no loadable kind or the record is
    /// corrupt.
    pub fn load(world: &mut World, head: EntityId) -> Result<Self> {
        let tag = record::kind_tag(world.monster(head)?)?.to_owned();
        match tag.as_str() {
            LINE_KIND => LineComposite::load(world, head).map(Self::Line),
            _ => Err(Error::new(ErrorKind::UnknownCompositeKind(tag))),
        }
    }

    /// The line composite, if this is one.
    #[must_use]
    pub fn as_line(&self) -> Option<&LineComposite> {
        match self {
            Self::Line(line) => Some(line),
        }
    }

    /// The line composite mutably, if this is one.
    pub fn as_line_mut(&mut self) -> Option<&mut LineComposite> {
        match self {
            Self::Line(line) => Some(line),
        }
    }
}

impl From<LineComposite> for AnyComposite {
    fn from(line: LineComposite) -> Self {
        Self::Line(line)
    }
}

impl Composite for AnyComposite {
    fn core(&self) -> &CompositeCore {
        dispatch!(self, c => c.core())
    }

    fn core_mut(&mut self) -> &mut CompositeCore {
        dispatch!(self, c => c.core_mut())
    }

    fn reference_entity(&self, part: EntityId) -> EntityId {
        dispatch!(self, c => c.reference_entity(part))
    }

    fn adjust_glyph(&self, world: &World, glyph: &mut Glyph, part: EntityId) {
        dispatch!(self, c => c.adjust_glyph(world, glyph, part));
    }

    fn head_fits_at(&self, world: &World, pos: Coord, consider_occupants: bool) -> Result<bool> {
        dispatch!(self, c => c.head_fits_at(world, pos, consider_occupants))
    }

    fn move_head_to(&mut self, world: &mut World, pos: Coord) -> Result<bool> {
        dispatch!(self, c => c.move_head_to(world, pos))
    }

    fn on_part_died(
        &mut self,
        world: &mut World,
        part: EntityId,
        killer: Killer,
        silent: bool,
    ) -> Result<PartDeath> {
        dispatch!(self, c => c.on_part_died(world, part, killer, silent))
    }

    fn on_head_died(&mut self, world: &mut World, killer: Killer, silent: bool) -> Result<()> {
        dispatch!(self, c => c.on_head_died(world, killer, silent))
    }

    fn on_part_damage(
        &mut self,
        world: &mut World,
        part: EntityId,
        hit: &Hit,
    ) -> Result<DamageRoute> {
        dispatch!(self, c => c.on_part_damage(world, part, hit))
    }

    fn on_head_damage(&mut self, world: &mut World, hit: &Hit) -> Result<()> {
        dispatch!(self, c => c.on_head_damage(world, hit))
    }

    fn serialized_kind_tag(&self) -> &'static str {
        dispatch!(self, c => c.serialized_kind_tag())
    }

    fn sync_to_storage(&self, world: &mut World) -> Result<()> {
        dispatch!(self, c => c.sync_to_storage(world))
    }
}
