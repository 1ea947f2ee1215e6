//! Configuration for world construction.

use serpentine_foundation::{Error, ErrorKind, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::terrain::Feature;

/// Largest width or height a map may have.
pub const MAX_DIMENSION: i32 = 4096;

/// Configuration for a [`World`](crate::World).
///
/// Controls map dimensions, the terrain a fresh map is filled with, and the
/// seed for the world's random source.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldConfig {
    /// Map width in cells.
    pub width: i32,
    /// Map height in cells.
    pub height: i32,
    /// Random seed (expansion picks among open cells with it).
    pub seed: u64,
    /// Terrain a new map starts as.
    pub default_feature: Feature,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 70,
            seed: 0,
            default_feature: Feature::Floor,
        }
    }
}

impl WorldConfig {
    /// A small open arena, handy for tests and demos.
    #[must_use]
    pub fn arena() -> Self {
        Self {
            width: 20,
            height: 20,
            ..Self::default()
        }
    }

    /// A map where every cell starts as wall, to be carved afterwards.
    #[must_use]
    pub fn solid() -> Self {
        Self {
            default_feature: Feature::Wall,
            ..Self::default()
        }
    }

    /// Builder method to set dimensions.
    #[must_use]
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Builder method to set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder method to set the fill terrain.
    #[must_use]
    pub fn with_default_feature(mut self, feature: Feature) -> Self {
        self.default_feature = feature;
        self
    }

    /// Checks that the configuration describes a usable map.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is not positive or exceeds
    /// [`MAX_DIMENSION`].
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::new(ErrorKind::InvalidConfig(format!(
                "map dimensions must be positive, got {}x{}",
                self.width, self.height
            ))));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(Error::new(ErrorKind::InvalidConfig(format!(
                "map dimensions are capped at {MAX_DIMENSION}, got {}x{}",
                self.width, self.height
            ))));
        }
        Ok(())
    }
}
