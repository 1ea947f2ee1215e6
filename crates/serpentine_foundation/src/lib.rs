//! Identities, coordinates, errors, and property records for Serpentine.
//!
//! This crate provides:
//! - [`EntityId`] - Generational slot handles into entity storage
//! - [`Mid`] - Persistent monster identities that survive save/load
//! - [`Coord`] - Grid coordinates with 8-way adjacency
//! - [`Error`] - Rich error types with context
//! - [`PropTable`] - Persistent key/value property records

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod coord;
pub mod entity;
pub mod error;
pub mod props;

pub use coord::Coord;
pub use entity::{EntityId, Mid};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use props::{PropTable, PropValue};
