//! Session facade and world snapshots for Serpentine.
//!
//! This crate provides:
//! - [`Session`] - A world plus its composites, driven as one unit
//! - [`serialize`] - `MessagePack` snapshots that carry composite topology
//!   through property records

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod serialize;
pub mod session;

pub use serialize::{from_bytes, load_from_file, save_to_file, to_bytes};
pub use session::Session;
