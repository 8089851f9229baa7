//! Error types for the CCB staging layer
//!
//! Not-found conditions are deliberately not errors in this layer: lookups
//! return `Option` because a missing record or operation is an expected,
//! common case (e.g. the first reference to a CCB id). Errors here are
//! contract violations in caller-supplied data.

use crate::value::ValueType;
use thiserror::Error;

/// All staging-layer errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// An attribute's value sequence contained a value whose type does not
    /// match the attribute's declared value type
    #[error("attribute {attr:?}: mixed value types: declared {declared}, found {found}")]
    MixedValueTypes {
        /// Attribute name
        attr: String,
        /// Declared value type of the attribute
        declared: ValueType,
        /// Type of the offending value
        found: ValueType,
    },

    /// A text value could not be converted to the requested value type
    #[error("cannot parse {input:?} as {value_type}")]
    InvalidValue {
        /// Requested value type
        value_type: ValueType,
        /// The input that failed to convert
        input: String,
    },

    /// Reserved: a second operation was staged against an object already
    /// targeted in the same CCB.
    ///
    /// The duplicate guard is currently disabled to match the behavior the
    /// surrounding protocol depends on (multiple modifies on one object all
    /// succeed and are preserved in list order). No API produces this
    /// variant today; it exists so enabling the guard is not a breaking
    /// change.
    #[error("object {0:?} already targeted in this CCB")]
    DuplicateOperation(String),
}

/// Result type for staging-layer operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_value_types_message() {
        let err = Error::MixedValueTypes {
            attr: "count".to_string(),
            declared: ValueType::Uint32,
            found: ValueType::String,
        };
        let msg = err.to_string();
        assert!(msg.contains("count"));
        assert!(msg.contains("uint32"));
        assert!(msg.contains("string"));
    }

    #[test]
    fn invalid_value_message() {
        let err = Error::InvalidValue {
            value_type: ValueType::Int32,
            input: "abc".to_string(),
        };
        assert!(err.to_string().contains("abc"));
    }
}
