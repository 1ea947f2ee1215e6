//! The occupancy index: which entity slot stands on each cell.
//!
//! The index is owned by the [`World`](crate::World) and written by whoever
//! is moving entities around. It does not follow monster positions on its
//! own; movers keep the two in step.

use serpentine_foundation::{Coord, EntityId};

use crate::terrain::cell_count;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Read/write contract for a cell to entity-slot mapping.
pub trait OccupancyIndex {
    /// The slot at `pos`, if any.
    fn get(&self, pos: Coord) -> Option<EntityId>;

    /// Records `slot` at `pos`. Out-of-bounds writes are ignored.
    fn set(&mut self, pos: Coord, slot: EntityId);

    /// Empties `pos`. Clearing an empty or out-of-bounds cell is a no-op.
    fn clear(&mut self, pos: Coord);

    /// Empties `pos` only if it still holds `slot`.
    ///
    /// Returns true if the cell was cleared.
    fn clear_if(&mut self, pos: Coord, slot: EntityId) -> bool {
        if self.get(pos) == Some(slot) {
            self.clear(pos);
            true
        } else {
            false
        }
    }
}

/// Dense occupancy index covering the whole map.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OccupancyGrid {
    width: i32,
    height: i32,
    cells: Vec<Option<EntityId>>,
}

impl OccupancyGrid {
    /// Creates an empty index for a `width` x `height` map.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
            cells: vec![None; cell_count(width, height)],
        }
    }

    /// True if the index covers a `width` x `height` map.
    #[must_use]
    pub fn has_shape(&self, width: i32, height: i32) -> bool {
        self.width == width
            && self.height == height
            && self.cells.len() == cell_count(width, height)
    }

    fn index(&self, pos: Coord) -> Option<usize> {
        if pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height {
            usize::try_from(pos.y * self.width + pos.x).ok()
        } else {
            None
        }
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Every cell holding `slot`. More than one entry means the index is
    /// inconsistent.
    #[must_use]
    pub fn cells_of(&self, slot: EntityId) -> Vec<Coord> {
        self.iter()
            .filter(|&(_, s)| s == slot)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Iterates over occupied cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, EntityId)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(i, slot)| {
            let i = i32::try_from(i).ok()?;
            slot.map(|s| (Coord::new(i % width, i / width), s))
        })
    }
}

impl OccupancyIndex for OccupancyGrid {
    fn get(&self, pos: Coord) -> Option<EntityId> {
        self.index(pos)
            .and_then(|i| self.cells.get(i).copied())
            .flatten()
    }

    fn set(&mut self, pos: Coord, slot: EntityId) {
        if let Some(cell) = self.index(pos).and_then(|i| self.cells.get_mut(i)) {
            *cell = Some(slot);
        }
    }

    fn clear(&mut self, pos: Coord) {
        if let Some(cell) = self.index(pos).and_then(|i| self.cells.get_mut(i)) {
            *cell = None;
        }
    }
}
