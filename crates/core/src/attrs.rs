//! Caller-side attribute containers and lookup helpers
//!
//! [`Attr`] is the unit of configuration data handed to the staging layer:
//! a name, a declared value type, and an ordered value sequence. [`AttrMod`]
//! pairs an attribute with the modification type of a modify operation.
//!
//! The free functions in this module are the typed lookups an object
//! implementer runs over an attribute array when validating a notification:
//! find a group by name, read a value of a known type at an index, or count
//! a group's values. All of them return `None` on a name miss, an index out
//! of range, or a type mismatch.

use crate::types::ModType;
use crate::value::{Value, ValueType};
use serde::{Deserialize, Serialize};

/// One named, typed, multi-valued attribute
///
/// The declared `value_type` governs every value in `values`; the staging
/// layer rejects the attribute if any value disagrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attr {
    /// Attribute name
    pub name: String,
    /// Declared type of all values in this attribute
    pub value_type: ValueType,
    /// Ordered value sequence (may be empty)
    pub values: Vec<Value>,
}

impl Attr {
    /// Create an attribute with an explicit declared type
    pub fn new(name: impl Into<String>, value_type: ValueType, values: Vec<Value>) -> Self {
        Attr {
            name: name.into(),
            value_type,
            values,
        }
    }

    /// Create a single-valued attribute, deriving the declared type from
    /// the value
    pub fn single(name: impl Into<String>, value: Value) -> Self {
        let value_type = value.value_type();
        Attr {
            name: name.into(),
            value_type,
            values: vec![value],
        }
    }
}

/// One staged modification: a modification type plus the attribute it
/// applies to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttrMod {
    /// How the values combine with the attribute's current values
    pub mod_type: ModType,
    /// The attribute carrying the values
    pub attr: Attr,
}

impl AttrMod {
    /// Create a modification
    pub fn new(mod_type: ModType, attr: Attr) -> Self {
        AttrMod { mod_type, attr }
    }

    /// Shorthand for the common replace-with-one-value case
    pub fn replace(name: impl Into<String>, value: Value) -> Self {
        AttrMod {
            mod_type: ModType::Replace,
            attr: Attr::single(name, value),
        }
    }
}

/// Find an attribute group by name
pub fn find_attr<'a>(attrs: &'a [Attr], name: &str) -> Option<&'a Attr> {
    attrs.iter().find(|a| a.name == name)
}

/// Number of values in the named attribute, or `None` if absent
pub fn values_count(attrs: &[Attr], name: &str) -> Option<usize> {
    find_attr(attrs, name).map(|a| a.values.len())
}

/// The value at `index` of the named attribute, untyped
pub fn value_at<'a>(attrs: &'a [Attr], name: &str, index: usize) -> Option<&'a Value> {
    find_attr(attrs, name)?.values.get(index)
}

/// String value at `index` of the named attribute; `None` on type mismatch
pub fn string_value<'a>(attrs: &'a [Attr], name: &str, index: usize) -> Option<&'a str> {
    value_at(attrs, name, index)?.as_str()
}

/// Object-name value at `index` of the named attribute
pub fn name_value<'a>(attrs: &'a [Attr], name: &str, index: usize) -> Option<&'a str> {
    value_at(attrs, name, index)?.as_name()
}

/// u32 value at `index` of the named attribute
pub fn u32_value(attrs: &[Attr], name: &str, index: usize) -> Option<u32> {
    value_at(attrs, name, index)?.as_u32()
}

/// Timestamp value at `index` of the named attribute
pub fn time_value(attrs: &[Attr], name: &str, index: usize) -> Option<i64> {
    value_at(attrs, name, index)?.as_time()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Attr> {
        vec![
            Attr::single("count", Value::Uint32(5)),
            Attr::new(
                "aliases",
                ValueType::String,
                vec![
                    Value::String("a".to_string()),
                    Value::String("b".to_string()),
                ],
            ),
            Attr::single("since", Value::Time(1_000)),
            Attr::single("peer", Value::Name("obj=2".to_string())),
            Attr::new("empty", ValueType::Uint64, vec![]),
        ]
    }

    #[test]
    fn find_attr_hits_and_misses() {
        let attrs = sample();
        assert!(find_attr(&attrs, "count").is_some());
        assert!(find_attr(&attrs, "missing").is_none());
    }

    #[test]
    fn values_count_reports_length() {
        let attrs = sample();
        assert_eq!(values_count(&attrs, "aliases"), Some(2));
        assert_eq!(values_count(&attrs, "empty"), Some(0));
        assert_eq!(values_count(&attrs, "missing"), None);
    }

    #[test]
    fn typed_lookups() {
        let attrs = sample();
        assert_eq!(u32_value(&attrs, "count", 0), Some(5));
        assert_eq!(string_value(&attrs, "aliases", 1), Some("b"));
        assert_eq!(time_value(&attrs, "since", 0), Some(1_000));
        assert_eq!(name_value(&attrs, "peer", 0), Some("obj=2"));
    }

    #[test]
    fn lookup_rejects_wrong_type() {
        let attrs = sample();
        // "count" is Uint32, not String
        assert_eq!(string_value(&attrs, "count", 0), None);
        assert_eq!(u32_value(&attrs, "aliases", 0), None);
    }

    #[test]
    fn lookup_rejects_out_of_range_index() {
        let attrs = sample();
        assert_eq!(string_value(&attrs, "aliases", 2), None);
        assert_eq!(u32_value(&attrs, "empty", 0), None);
    }

    #[test]
    fn single_derives_declared_type() {
        let attr = Attr::single("x", Value::Double(1.5));
        assert_eq!(attr.value_type, ValueType::Double);
        assert_eq!(attr.values.len(), 1);
    }

    #[test]
    fn replace_shorthand() {
        let m = AttrMod::replace("count", Value::Uint32(7));
        assert_eq!(m.mod_type, ModType::Replace);
        assert_eq!(m.attr.name, "count");
    }
}
