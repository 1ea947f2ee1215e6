//! Composite creatures: entities that span several grid cells but act as one.
//!
//! This crate provides:
//! - [`Composite`] - The contract every composite kind satisfies
//! - [`LineComposite`] - Snake-like creatures that grow, shrink, and loop
//!   through themselves
//! - [`AnyComposite`] - The closed set of composite kinds
//! - [`CompositeRegistry`] - Composites keyed by head, with damage and death
//!   routing
//! - [`record`] - Persisting composite topology in monster property records

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod composite;
pub mod kinds;
pub mod line;
pub mod record;
pub mod registry;

pub use composite::{Composite, CompositeCore, DamageRoute, PartDeath};
pub use kinds::AnyComposite;
pub use line::{LineComposite, LineConfig, LineState};
pub use registry::CompositeRegistry;
