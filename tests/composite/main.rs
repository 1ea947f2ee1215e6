//! Integration tests for Layer 2: Composites
//!
//! Tests for line movement, damage and death routing, and record
//! persistence through the public API.

mod common;
mod movement;
mod records;
