//! Terrain features and habitat compatibility.

use serpentine_foundation::{Coord, Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a map cell is made of.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Feature {
    /// Open ground.
    #[default]
    Floor,
    /// Wadeable water.
    ShallowWater,
    /// Water only swimmers survive in.
    DeepWater,
    /// Molten rock.
    Lava,
    /// Solid rock.
    Wall,
    /// Solid vegetation.
    Tree,
}

impl Feature {
    /// True for features nothing can stand in.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Wall | Self::Tree)
    }
}

/// The terrain class a monster kind lives in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Habitat {
    /// Floor and shallow water.
    #[default]
    Land,
    /// Land plus deep water.
    Amphibious,
    /// Shallow and deep water only.
    Water,
    /// Lava only.
    Lava,
}

impl Habitat {
    /// Can a monster of this habitat occupy `feature`?
    #[must_use]
    pub const fn can_occupy(self, feature: Feature) -> bool {
        if feature.is_solid() {
            return false;
        }
        match self {
            Self::Land => matches!(feature, Feature::Floor | Feature::ShallowWater),
            Self::Amphibious => matches!(
                feature,
                Feature::Floor | Feature::ShallowWater | Feature::DeepWater
            ),
            Self::Water => matches!(feature, Feature::ShallowWater | Feature::DeepWater),
            Self::Lava => matches!(feature, Feature::Lava),
        }
    }
}

/// Cells in a `width` x `height` grid; zero for degenerate or overflowing
/// dimensions.
pub(crate) fn cell_count(width: i32, height: i32) -> usize {
    width
        .max(0)
        .checked_mul(height.max(0))
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}

/// A rectangular grid of terrain features.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeatureGrid {
    width: i32,
    height: i32,
    cells: Vec<Feature>,
}

impl FeatureGrid {
    /// Creates a grid filled with `fill`.
    #[must_use]
    pub fn new(width: i32, height: i32, fill: Feature) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
            cells: vec![fill; cell_count(width, height)],
        }
    }

    /// Grid width in cells.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// True if the grid has `width` x `height` cells.
    #[must_use]
    pub fn has_shape(&self, width: i32, height: i32) -> bool {
        self.width == width
            && self.height == height
            && self.cells.len() == cell_count(width, height)
    }

    /// True if `pos` lies on the grid.
    #[must_use]
    pub const fn in_bounds(&self, pos: Coord) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: Coord) -> Option<usize> {
        if self.in_bounds(pos) {
            usize::try_from(pos.y * self.width + pos.x).ok()
        } else {
            None
        }
    }

    /// The feature at `pos`; out-of-bounds cells read as [`Feature::Wall`].
    #[must_use]
    pub fn get(&self, pos: Coord) -> Feature {
        self.index(pos)
            .and_then(|i| self.cells.get(i).copied())
            .unwrap_or(Feature::Wall)
    }

    /// Sets the feature at `pos`.
    ///
    /// # Errors
    ///
    /// Returns an error if `pos` is out of bounds.
    pub fn set(&mut self, pos: Coord, feature: Feature) -> Result<()> {
        let cell = self
            .index(pos)
            .and_then(|i| self.cells.get_mut(i))
            .ok_or_else(|| Error::out_of_bounds(pos))?;
        *cell = feature;
        Ok(())
    }
}
