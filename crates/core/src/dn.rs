//! Object name (DN) token helpers
//!
//! Object names are comma-separated `key=value` tokens, most specific
//! first, e.g. `"obj=1,app=demo"`. These helpers extract pieces of a name
//! without allocating.

/// The value of the first token whose key matches `key`
///
/// `key` must include the trailing `'='`. A token with an empty value
/// yields `None`.
///
/// # Examples
///
/// ```
/// use ccb_core::dn;
///
/// let name = "obj=1,app=demo";
/// assert_eq!(dn::value_for_key(name, "app="), Some("demo"));
/// assert_eq!(dn::value_for_key(name, "node="), None);
/// ```
pub fn value_for_key<'a>(dn: &'a str, key: &str) -> Option<&'a str> {
    debug_assert!(key.ends_with('='), "key must include the trailing '='");
    dn.split(',')
        .filter_map(|token| token.strip_prefix(key))
        .find(|value| !value.is_empty())
}

/// The value for `key`, parsed as a decimal or `0x`-prefixed integer
pub fn numeric_for_key(dn: &str, key: &str) -> Option<i64> {
    let value = value_for_key(dn, key)?;
    if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()
    } else {
        value.parse().ok()
    }
}

/// The `index`-th relative name token, counting from the most specific
///
/// # Examples
///
/// ```
/// use ccb_core::dn;
///
/// assert_eq!(dn::rdn_at("obj=1,app=demo", 0), Some("obj=1"));
/// assert_eq!(dn::rdn_at("obj=1,app=demo", 1), Some("app=demo"));
/// assert_eq!(dn::rdn_at("obj=1,app=demo", 2), None);
/// ```
pub fn rdn_at(dn: &str, index: usize) -> Option<&str> {
    dn.split(',').nth(index)
}
