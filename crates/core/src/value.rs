//! Attribute value model
//!
//! This module defines the canonical tagged value type for configuration
//! attributes. The declared-type tag and the value payload travel together
//! in one sum type, so a value can never disagree with its tag the way a
//! raw union with a parallel enum could.
//!
//! ## The Ten Types
//!
//! 1. `Int32` / `Uint32` - 32-bit signed/unsigned integers
//! 2. `Int64` / `Uint64` - 64-bit signed/unsigned integers
//! 3. `Time` - nanosecond timestamp, 64-bit signed
//! 4. `Float` / `Double` - IEEE-754 single/double precision
//! 5. `String` - UTF-8 text
//! 6. `Name` - object name (DN), distinct from plain strings
//! 7. `Blob` - opaque bytes

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Declared type of an attribute's values
///
/// Every attribute carries one of these tags; all values in the attribute's
/// sequence must match it (mixed-type sequences are rejected at staging).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// 32-bit signed integer
    Int32,
    /// 32-bit unsigned integer
    Uint32,
    /// 64-bit signed integer
    Int64,
    /// 64-bit unsigned integer
    Uint64,
    /// Timestamp in nanoseconds, 64-bit signed
    Time,
    /// Object name (DN)
    Name,
    /// IEEE-754 single precision
    Float,
    /// IEEE-754 double precision
    Double,
    /// UTF-8 string
    String,
    /// Opaque byte blob
    Blob,
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ValueType::Int32 => "int32",
            ValueType::Uint32 => "uint32",
            ValueType::Int64 => "int64",
            ValueType::Uint64 => "uint64",
            ValueType::Time => "time",
            ValueType::Name => "name",
            ValueType::Float => "float",
            ValueType::Double => "double",
            ValueType::String => "string",
            ValueType::Blob => "blob",
        };
        write!(f, "{}", s)
    }
}

/// One typed attribute value
///
/// Equality is exact: different variants are never equal, `Name` and
/// `String` are distinct even for identical text, and floats follow
/// IEEE-754 (`NaN != NaN`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// 32-bit signed integer
    Int32(i32),
    /// 32-bit unsigned integer
    Uint32(u32),
    /// 64-bit signed integer
    Int64(i64),
    /// 64-bit unsigned integer
    Uint64(u64),
    /// Timestamp in nanoseconds
    Time(i64),
    /// Object name (DN)
    Name(String),
    /// IEEE-754 single precision
    Float(f32),
    /// IEEE-754 double precision
    Double(f64),
    /// UTF-8 string
    String(String),
    /// Opaque byte blob
    Blob(Vec<u8>),
}

impl Value {
    /// The type tag this value carries
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Int32(_) => ValueType::Int32,
            Value::Uint32(_) => ValueType::Uint32,
            Value::Int64(_) => ValueType::Int64,
            Value::Uint64(_) => ValueType::Uint64,
            Value::Time(_) => ValueType::Time,
            Value::Name(_) => ValueType::Name,
            Value::Float(_) => ValueType::Float,
            Value::Double(_) => ValueType::Double,
            Value::String(_) => ValueType::String,
            Value::Blob(_) => ValueType::Blob,
        }
    }

    /// Try to get as i32
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as u32
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::Uint32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as u64
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Uint64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as a timestamp (nanoseconds)
    pub fn as_time(&self) -> Option<i64> {
        match self {
            Value::Time(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f32
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as a string slice (only for `String` values)
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as an object name (only for `Name` values)
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Value::Name(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as a byte slice (only for `Blob` values)
    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Value::Blob(b) => Some(b),
            _ => None,
        }
    }

    /// Convert a text representation into a typed value
    ///
    /// Integer types accept decimal or `0x`-prefixed hex and reject inputs
    /// that do not fit the declared width. `Blob` accepts a hex digit
    /// string; an odd-length input is treated as if padded with a trailing
    /// zero nibble.
    ///
    /// # Examples
    ///
    /// ```
    /// use ccb_core::value::{Value, ValueType};
    ///
    /// assert_eq!(Value::parse(ValueType::Uint32, "42").unwrap(), Value::Uint32(42));
    /// assert_eq!(Value::parse(ValueType::Int32, "0x10").unwrap(), Value::Int32(16));
    /// assert!(Value::parse(ValueType::Int32, "4294967296").is_err());
    /// ```
    pub fn parse(value_type: ValueType, input: &str) -> Result<Value> {
        let invalid = || Error::InvalidValue {
            value_type,
            input: input.to_string(),
        };
        let value = match value_type {
            ValueType::Int32 => {
                let wide = parse_i64(input).ok_or_else(invalid)?;
                let narrow = i32::try_from(wide).map_err(|_| invalid())?;
                Value::Int32(narrow)
            }
            ValueType::Uint32 => {
                let wide = parse_u64(input).ok_or_else(invalid)?;
                let narrow = u32::try_from(wide).map_err(|_| invalid())?;
                Value::Uint32(narrow)
            }
            ValueType::Int64 => Value::Int64(parse_i64(input).ok_or_else(invalid)?),
            ValueType::Uint64 => Value::Uint64(parse_u64(input).ok_or_else(invalid)?),
            ValueType::Time => Value::Time(parse_i64(input).ok_or_else(invalid)?),
            ValueType::Float => Value::Float(input.parse().map_err(|_| invalid())?),
            ValueType::Double => Value::Double(input.parse().map_err(|_| invalid())?),
            ValueType::Name => Value::Name(input.to_string()),
            ValueType::String => Value::String(input.to_string()),
            ValueType::Blob => Value::Blob(parse_hex(input).ok_or_else(invalid)?),
        };
        Ok(value)
    }
}

fn parse_i64(input: &str) -> Option<i64> {
    let (negative, rest) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };
    let magnitude = parse_u64(rest)?;
    if negative {
        // i64::MIN magnitude is one past i64::MAX
        if magnitude > i64::MAX as u64 + 1 {
            return None;
        }
        Some((magnitude as i64).wrapping_neg())
    } else {
        i64::try_from(magnitude).ok()
    }
}

fn parse_u64(input: &str) -> Option<u64> {
    if let Some(hex) = input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else {
        input.parse().ok()
    }
}

/// Decode a hex digit string; an odd-length input gets a zero low nibble
/// appended to its last byte.
fn parse_hex(input: &str) -> Option<Vec<u8>> {
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let digits: Vec<u8> = input
        .chars()
        .filter_map(|c| c.to_digit(16).map(|d| d as u8))
        .collect();
    let mut out = Vec::with_capacity((digits.len() + 1) / 2);
    for pair in digits.chunks(2) {
        let hi = pair[0];
        let lo = if pair.len() == 2 { pair[1] } else { 0 };
        out.push((hi << 4) | lo);
    }
    Some(out)
}
