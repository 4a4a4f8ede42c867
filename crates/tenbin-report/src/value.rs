//! Dynamic values held by a render context.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tenbin_core::MISSING_SENTINEL;

/// A value that templates can interpolate, test, or iterate.
///
/// Maps use a `BTreeMap` so that any iteration over keys is deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent data. Prints as `N/A`.
    #[default]
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Text.
    Text(String),
    /// Ordered list.
    List(Vec<Value>),
    /// String-keyed map.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Template truthiness.
    ///
    /// Null, `false`, blank text, and empty collections are false. Numbers are
    /// always true, including zero, so that a metric equal to zero still
    /// renders its row.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(_) => true,
            Value::Text(s) => !s.trim().is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(map) => !map.is_empty(),
        }
    }

    /// Printable form, or `None` for lists and maps.
    #[must_use]
    pub fn to_display(&self) -> Option<String> {
        match self {
            Value::Null => Some(MISSING_SENTINEL.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(format_plain(*n)),
            Value::Text(s) => Some(s.clone()),
            Value::List(_) | Value::Map(_) => None,
        }
    }

    /// Look up a key when this value is a map.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Returns true for [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Shortest round-trip form; integral values print without a fraction.
fn format_plain(n: f64) -> String {
    if !n.is_finite() {
        return MISSING_SENTINEL.to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_display() {
            Some(text) => f.write_str(&text),
            None => write!(f, "<{}>", self.kind()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        if n.is_finite() {
            Value::Number(n)
        } else {
            Value::Null
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::from("   \n").is_truthy());
        assert!(!Value::List(vec![]).is_truthy());
        assert!(!Value::Map(BTreeMap::new()).is_truthy());

        assert!(Value::Number(0.0).is_truthy());
        assert!(Value::from("x").is_truthy());
        assert!(Value::from(vec!["a"]).is_truthy());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_display().as_deref(), Some("N/A"));
        assert_eq!(Value::Number(3.0).to_display().as_deref(), Some("3"));
        assert_eq!(Value::Number(0.125).to_display().as_deref(), Some("0.125"));
        assert_eq!(Value::from("text").to_display().as_deref(), Some("text"));
        assert_eq!(Value::from(vec!["a"]).to_display(), None);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(None::<f64>), Value::Null);
        assert_eq!(Value::from(f64::NAN), Value::Null);
        assert_eq!(Value::from(Some(1.5)), Value::Number(1.5));

        let map: Value = [("a", 1.0), ("b", 2.0)].into_iter().collect();
        assert_eq!(map.get("b"), Some(&Value::Number(2.0)));
        assert_eq!(map.get("c"), None);
    }
}
