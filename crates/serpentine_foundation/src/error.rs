//! Error types for the Serpentine system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Expected gameplay failures (no room to grow, a blocked cell) are not
//! errors; operations report them as `Ok(false)`. The variants here cover
//! broken invariants and corrupted persisted state.

use std::fmt;

use thiserror::Error;

use crate::coord::Coord;
use crate::entity::{EntityId, Mid};

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Serpentine operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn entity_not_found(id: EntityId) -> Self {
        Self::new(ErrorKind::EntityNotFound(id))
    }

    /// Creates a stale entity reference error.
    #[must_use]
    pub fn stale_entity(id: EntityId) -> Self {
        Self::new(ErrorKind::StaleEntity(id))
    }

    /// Creates an out-of-bounds error.
    #[must_use]
    pub fn out_of_bounds(pos: Coord) -> Self {
        Self::new(ErrorKind::OutOfBounds(pos))
    }

    /// Creates a corrupt composite error for the monster `mid`.
    #[must_use]
    pub fn corrupt_composite(mid: Mid, field: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CorruptComposite {
            mid,
            field: field.to_string(),
            message: message.into(),
        })
    }

    /// Creates a missing record field error.
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::new(ErrorKind::MissingField(field.to_string()))
    }

    /// Creates a record field type error.
    #[must_use]
    pub fn field_type(field: &str, expected: &'static str, actual: &'static str) -> Self {
        Self::new(ErrorKind::FieldType {
            field: field.to_string(),
            expected,
            actual,
        })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Entity was not found in storage.
    #[error("entity not found: {0:?}")]
    EntityNotFound(EntityId),

    /// Entity reference is stale (generation mismatch).
    #[error("stale entity reference: {0:?}")]
    StaleEntity(EntityId),

    /// No live monster carries this persistent identity.
    #[error("no live monster with {0}")]
    UnknownMid(Mid),

    /// Coordinate lies outside the map.
    #[error("position {0} is out of bounds")]
    OutOfBounds(Coord),

    /// Placement onto a cell another entity already holds.
    #[error("position {pos} is occupied by {occupant:?}")]
    CellOccupied {
        /// The contested cell.
        pos: Coord,
        /// The entity already there.
        occupant: EntityId,
    },

    /// A property record lacks a required field.
    #[error("missing record field: {0}")]
    MissingField(String),

    /// A property record field holds the wrong kind of value.
    #[error("record field {field}: expected {expected}, got {actual}")]
    FieldType {
        /// The offending field.
        field: String,
        /// The expected value kind.
        expected: &'static str,
        /// The value kind found.
        actual: &'static str,
    },

    /// Persisted composite topology is inconsistent (the save is corrupt).
    #[error("corrupt composite data on {mid}, field {field}: {message}")]
    CorruptComposite {
        /// The monster whose record is broken.
        mid: Mid,
        /// The record field at fault.
        field: String,
        /// What was wrong.
        message: String,
    },

    /// A record names a composite kind nobody knows how to load.
    #[error("unknown composite kind '{0}'")]
    UnknownCompositeKind(String),

    /// Configuration values that cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Snapshot encoding or decoding failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Reading or writing a snapshot file failed.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation that was running.
    pub operation: Option<String>,
    /// Monster the operation was acting on.
    pub mid: Option<Mid>,
    /// Enclosing operations, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operation name.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Sets the monster being acted on.
    #[must_use]
    pub fn with_mid(mut self, mid: Mid) -> Self {
        self.mid = Some(mid);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(op) = &self.operation {
            write!(f, "in {op}")?;
            if let Some(mid) = self.mid {
                write!(f, " on {mid}")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
