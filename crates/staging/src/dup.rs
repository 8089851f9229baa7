//! Deep duplication of attribute data into arena storage
//!
//! The callback dispatcher hands this layer borrowed attribute data whose
//! backing storage the configuration service reclaims as soon as the
//! callback returns. Everything staged must therefore be copied: scalars
//! are stored inline in [`StagedValue`], strings, names and blobs are
//! copied into the record's arena and held by handle.
//!
//! Duplication is also where the single-type invariant is enforced: an
//! attribute whose value sequence disagrees with its declared type is
//! rejected, so a staged attribute can never carry a mixed sequence.

use crate::arena::{Arena, ArenaRef, StrRef};
use ccb_core::{Attr, AttrMod, Error, ModType, Result, Value, ValueType};

/// One attribute value in staged (arena-backed) form
///
/// Scalars are stored inline; variable-size payloads are handles into the
/// owning record's arena and need that arena to resolve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StagedValue {
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
    /// Object name, copied into the arena
    Name(StrRef),
    /// IEEE-754 single precision
    Float(f32),
    /// IEEE-754 double precision
    Double(f64),
    /// UTF-8 string, copied into the arena
    String(StrRef),
    /// Opaque bytes, copied into the arena
    Blob(ArenaRef),
}

impl StagedValue {
    /// The type tag this value carries
    pub fn value_type(&self) -> ValueType {
        match self {
            StagedValue::Int32(_) => ValueType::Int32,
            StagedValue::Uint32(_) => ValueType::Uint32,
            StagedValue::Int64(_) => ValueType::Int64,
            StagedValue::Uint64(_) => ValueType::Uint64,
            StagedValue::Time(_) => ValueType::Time,
            StagedValue::Name(_) => ValueType::Name,
            StagedValue::Float(_) => ValueType::Float,
            StagedValue::Double(_) => ValueType::Double,
            StagedValue::String(_) => ValueType::String,
            StagedValue::Blob(_) => ValueType::Blob,
        }
    }

    /// Copy this value back out into an owned [`Value`]
    pub fn resolve(&self, arena: &Arena) -> Value {
        match self {
            StagedValue::Int32(v) => Value::Int32(*v),
            StagedValue::Uint32(v) => Value::Uint32(*v),
            StagedValue::Int64(v) => Value::Int64(*v),
            StagedValue::Uint64(v) => Value::Uint64(*v),
            StagedValue::Time(v) => Value::Time(*v),
            StagedValue::Name(s) => Value::Name(arena.str(*s).to_string()),
            StagedValue::Float(v) => Value::Float(*v),
            StagedValue::Double(v) => Value::Double(*v),
            StagedValue::String(s) => Value::String(arena.str(*s).to_string()),
            StagedValue::Blob(b) => Value::Blob(arena.bytes(*b).to_vec()),
        }
    }

    /// Try to get as u32
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            StagedValue::Uint32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i32
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            StagedValue::Int32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as a string slice, resolved against `arena`
    pub fn as_str<'a>(&self, arena: &'a Arena) -> Option<&'a str> {
        match self {
            StagedValue::String(s) => Some(arena.str(*s)),
            _ => None,
        }
    }

    /// Try to get as an object name, resolved against `arena`
    pub fn as_name<'a>(&self, arena: &'a Arena) -> Option<&'a str> {
        match self {
            StagedValue::Name(s) => Some(arena.str(*s)),
            _ => None,
        }
    }

    /// Try to get as a byte slice, resolved against `arena`
    pub fn as_blob<'a>(&self, arena: &'a Arena) -> Option<&'a [u8]> {
        match self {
            StagedValue::Blob(b) => Some(arena.bytes(*b)),
            _ => None,
        }
    }
}

/// One attribute in staged form: name handle, declared type, values
#[derive(Debug, Clone)]
pub struct StagedAttr {
    name: StrRef,
    value_type: ValueType,
    values: Vec<StagedValue>,
}

impl StagedAttr {
    /// Attribute name, resolved against the owning arena
    pub fn name<'a>(&self, arena: &'a Arena) -> &'a str {
        arena.str(self.name)
    }

    /// Declared value type
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// The staged value sequence
    pub fn values(&self) -> &[StagedValue] {
        &self.values
    }
}

/// One staged modification: modification type plus the staged attribute
#[derive(Debug, Clone)]
pub struct StagedAttrMod {
    mod_type: ModType,
    attr: StagedAttr,
}

impl StagedAttrMod {
    /// How the values combine with the attribute's current values
    pub fn mod_type(&self) -> ModType {
        self.mod_type
    }

    /// The staged attribute carrying the values
    pub fn attr(&self) -> &StagedAttr {
        &self.attr
    }
}

/// Deep-copy one value into the arena
pub fn dup_value(arena: &mut Arena, value: &Value) -> StagedValue {
    match value {
        Value::Int32(v) => StagedValue::Int32(*v),
        Value::Uint32(v) => StagedValue::Uint32(*v),
        Value::Int64(v) => StagedValue::Int64(*v),
        Value::Uint64(v) => StagedValue::Uint64(*v),
        Value::Time(v) => StagedValue::Time(*v),
        Value::Name(s) => StagedValue::Name(arena.copy_str(s)),
        Value::Float(v) => StagedValue::Float(*v),
        Value::Double(v) => StagedValue::Double(*v),
        Value::String(s) => StagedValue::String(arena.copy_str(s)),
        Value::Blob(b) => StagedValue::Blob(arena.copy_bytes(b)),
    }
}

/// Deep-copy one attribute into the arena, enforcing the declared type
///
/// An empty value sequence is legal and keeps the declared tag.
pub fn dup_attr(arena: &mut Arena, attr: &Attr) -> Result<StagedAttr> {
    for value in &attr.values {
        let found = value.value_type();
        if found != attr.value_type {
            return Err(Error::MixedValueTypes {
                attr: attr.name.clone(),
                declared: attr.value_type,
                found,
            });
        }
    }
    let name = arena.copy_str(&attr.name);
    let values = attr.values.iter().map(|v| dup_value(arena, v)).collect();
    Ok(StagedAttr {
        name,
        value_type: attr.value_type,
        values,
    })
}

/// Deep-copy an attribute array into the arena
pub fn dup_attrs(arena: &mut Arena, attrs: &[Attr]) -> Result<Vec<StagedAttr>> {
    attrs.iter().map(|a| dup_attr(arena, a)).collect()
}

/// Deep-copy a modification array into the arena
///
/// The modification type of each element is copied verbatim.
pub fn dup_mods(arena: &mut Arena, mods: &[AttrMod]) -> Result<Vec<StagedAttrMod>> {
    mods.iter()
        .map(|m| {
            Ok(StagedAttrMod {
                mod_type: m.mod_type,
                attr: dup_attr(arena, &m.attr)?,
            })
        })
        .collect()
}
