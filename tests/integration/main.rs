//! Cross-layer integration tests for Serpentine
//!
//! Tests that drive sessions end to end: movement, combat, and snapshots.

mod sessions;
mod snapshots;
