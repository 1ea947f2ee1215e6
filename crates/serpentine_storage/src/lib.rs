//! Entity storage, monsters, terrain, and the occupancy index for Serpentine.
//!
//! This crate provides:
//! - [`EntityStore`] - Generational slot allocation and persistent mids
//! - [`Monster`] - The per-entity record composites read and write
//! - [`FeatureGrid`] / [`Habitat`] - Terrain and habitat compatibility
//! - [`OccupancyGrid`] - Cell to entity-slot index
//! - [`World`] - Everything above, plus the seeded random source

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod damage;
pub mod entity;
pub mod monster;
pub mod occupancy;
pub mod terrain;
pub mod world;

pub use config::{MAX_DIMENSION, WorldConfig};
pub use damage::{Death, Flavour, Hit, Killer, KillerKind};
pub use entity::EntityStore;
pub use monster::{Attitude, Colour, CombatStats, Glyph, Monster, MonsterKind, MonsterSpec, Resists};
pub use occupancy::{OccupancyGrid, OccupancyIndex};
pub use terrain::{Feature, FeatureGrid, Habitat};
pub use world::World;
