//! Fundamental identifiers for the staging layer
//!
//! This module defines the types used to key and tag staged work:
//! - [`CcbId`]: Unique identifier for a configuration change bundle
//! - [`ModType`]: How a modify operation combines values with an attribute

use serde::{Deserialize, Serialize};

/// Unique identifier for a configuration change bundle (CCB)
///
/// CCB ids are assigned by the external configuration service, never by this
/// layer. A record in the registry is keyed by its CcbId for the whole open
/// lifetime of the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CcbId(u64);

impl CcbId {
    /// Wrap an externally assigned id
    pub fn new(id: u64) -> Self {
        CcbId(id)
    }

    /// Raw id value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for CcbId {
    fn from(id: u64) -> Self {
        CcbId(id)
    }
}

impl std::fmt::Display for CcbId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a staged modification applies its values to the target attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModType {
    /// Append the supplied values to the attribute's current values
    Add,
    /// Replace the attribute's values with the supplied values
    Replace,
    /// Remove the supplied values from the attribute's current values
    Delete,
}

impl std::fmt::Display for ModType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ModType::Add => "add",
            ModType::Replace => "replace",
            ModType::Delete => "delete",
        };
        write!(f, "{}", s)
    }
}
