//! Persistent key/value property records.
//!
//! Every monster carries a [`PropTable`]. Records hold nested tables,
//! integer lists, integers and strings; that is all composite persistence
//! needs. Tables are backed by `im::OrdMap`, so cloning a monster (or a whole
//! world snapshot) shares structure instead of copying records.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single value stored in a property record.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PropValue {
    /// Signed integer.
    Int(i64),
    /// String.
    Str(Arc<str>),
    /// Ordered list of integers.
    IntVec(Vec<i64>),
    /// Nested table.
    Table(PropTable),
}

impl PropValue {
    /// Name of the value kind, for error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Str(_) => "string",
            Self::IntVec(_) => "int list",
            Self::Table(_) => "table",
        }
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::IntVec(v) => f.debug_list().entries(v).finish(),
            Self::Table(t) => fmt::Debug::fmt(t, f),
        }
    }
}

impl From<i64> for PropValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        Self::Str(Arc::from(s))
    }
}

impl From<Vec<i64>> for PropValue {
    fn from(v: Vec<i64>) -> Self {
        Self::IntVec(v)
    }
}

impl From<PropTable> for PropValue {
    fn from(t: PropTable) -> Self {
        Self::Table(t)
    }
}

/// A persistent string-keyed table of [`PropValue`]s.
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropTable(im::OrdMap<Arc<str>, PropValue>);

impl PropTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self(im::OrdMap::new())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Gets a raw value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.get(key)
    }

    /// Sets `key`, replacing any previous value.
    pub fn insert(&mut self, key: &str, value: impl Into<PropValue>) {
        self.0.insert(Arc::from(key), value.into());
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.0.remove(key)
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(k, v)| (&**k, v))
    }

    fn require(&self, key: &str) -> Result<&PropValue> {
        self.0.get(key).ok_or_else(|| Error::missing_field(key))
    }

    /// Reads an integer field.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is missing or not an integer.
    pub fn get_int(&self, key: &str) -> Result<i64> {
        match self.require(key)? {
            PropValue::Int(n) => Ok(*n),
            other => Err(Error::field_type(key, "int", other.kind_name())),
        }
    }

    /// Reads a string field.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is missing or not a string.
    pub fn get_str(&self, key: &str) -> Result<&str> {
        match self.require(key)? {
            PropValue::Str(s) => Ok(s),
            other => Err(Error::field_type(key, "string", other.kind_name())),
        }
    }

    /// Reads an integer list field.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is missing or not an integer list.
    pub fn get_int_vec(&self, key: &str) -> Result<&[i64]> {
        match self.require(key)? {
            PropValue::IntVec(v) => Ok(v),
            other => Err(Error::field_type(key, "int list", other.kind_name())),
        }
    }

    /// Reads a nested table.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is missing or not a table.
    pub fn get_table(&self, key: &str) -> Result<&PropTable> {
        match self.require(key)? {
            PropValue::Table(t) => Ok(t),
            other => Err(Error::field_type(key, "table", other.kind_name())),
        }
    }

    /// Returns the nested table at `key`, creating an empty one first if the
    /// key is absent or holds something other than a table.
    pub fn table_mut(&mut self, key: &str) -> &mut PropTable {
        if !matches!(self.0.get(key), Some(PropValue::Table(_))) {
            self.0
                .insert(Arc::from(key), PropValue::Table(PropTable::new()));
        }
        match self.0.get_mut(key) {
            Some(PropValue::Table(t)) => t,
            _ => unreachable!("table was inserted above"),
        }
    }
}

impl fmt::Debug for PropTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
