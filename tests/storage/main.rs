//! Integration tests for Layer 1: Storage
//!
//! Tests for the entity store, terrain, occupancy, and world state.

mod entities;
mod terrain;
mod world;
