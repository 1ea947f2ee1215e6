//! Serpentine - Composite creatures on a grid
//!
//! This crate re-exports all layers of the Serpentine system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: serpentine_runtime    - Session facade, MessagePack snapshots
//! Layer 2: serpentine_composite  - Composite contract, line creatures,
//!                                  death/damage routing, record adapter
//! Layer 1: serpentine_storage    - Entities, monsters, terrain, occupancy
//! Layer 0: serpentine_foundation - Core types (EntityId, Mid, Coord, Error)
//! ```

pub use serpentine_composite as composite;
pub use serpentine_foundation as foundation;
pub use serpentine_runtime as runtime;
pub use serpentine_storage as storage;
