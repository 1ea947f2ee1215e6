//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Coord, EntityId/Mid, Error, and property records.

mod coords;
mod props;
