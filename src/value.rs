//! The shared value model.
//!
//! Every parser produces a [`Value`] and every transformer consumes one.
//! The model is a closed sum type: scalar leaves (`Null`, `Bool`, `Number`,
//! `Text`), ordered sequences, and ordered string-keyed mappings. Numbers and
//! booleans only appear when the source format distinguishes them natively
//! (object notation); tabular cells, markup text and log captures stay `Text`.

use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ordered string-keyed map.
///
/// Backed by a `Vec` of pairs so serialization is stable: keys keep insertion
/// order, and inserting an existing key overwrites its value in place without
/// moving the key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Value)>,
}

impl Mapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key/value pair. A duplicate key overwrites the existing value
    /// and keeps the key's original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if let Some(position) = self.entries.iter().position(|(k, _)| *k == key) {
            self.entries[position].1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Mutable lookup by key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Whether the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl FromIterator<(String, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (key, value) in iter {
            out.insert(key, value);
        }
        out
    }
}

/// A semi-structured value parsed from any supported format.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/null value.
    Null,
    /// Boolean literal (object notation only).
    Bool(bool),
    /// Numeric literal (object notation only).
    Number(f64),
    /// Text. Tabular cells, markup text and log captures always land here,
    /// whatever they look like.
    Text(String),
    /// Ordered list; elements may be heterogeneous.
    Sequence(Vec<Value>),
    /// Ordered string-keyed mapping.
    Mapping(Mapping),
}

impl Value {
    /// Shorthand for building a `Text` value.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Whether this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the inner text, if this is a `Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Borrow the elements, if this is a `Sequence`.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Borrow the mapping, if this is a `Mapping`.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Short lowercase name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }
}

/// The "string form" of a value: bare text for `Text`, literal renderings for
/// scalars, and a compact object-notation style for containers (with nested
/// text quoted). Used by the filter evaluator, the tabular/text transformers
/// and the console renderer.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(t) => f.write_str(t),
            Self::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt_nested(item, f)?;
                }
                f.write_str("]")
            }
            Self::Mapping(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: ")?;
                    fmt_nested(value, f)?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Inside containers, text is quoted so the rendering stays unambiguous.
fn fmt_nested(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::Text(t) => write!(f, "{t:?}"),
        other => fmt::Display::fmt(other, f),
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Text(t) => serializer.serialize_str(t),
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map.iter() {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("any object-notation value")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
                Ok(Value::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
                Ok(Value::Number(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
                Ok(Value::Number(v as f64))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
                Ok(Value::Number(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
                Ok(Value::Text(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
                Ok(Value::Text(v))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D2: Deserializer<'de>>(self, deserializer: D2) -> Result<Value, D2::Error> {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
                let mut items = Vec::new();
                while let Some(item) = access.next_element()? {
                    items.push(item);
                }
                Ok(Value::Sequence(items))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
                let mut map = Mapping::new();
                while let Some((key, value)) = access.next_entry::<String, Value>()? {
                    map.insert(key, value);
                }
                Ok(Value::Mapping(map))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::{Mapping, Value};

    fn sample_mapping() -> Mapping {
        let mut map = Mapping::new();
        map.insert("name", Value::text("Ada"));
        map.insert("id", Value::Number(1.0));
        map
    }

    #[test]
    fn insert_preserves_order_and_overwrites_in_place() {
        let mut map = sample_mapping();
        map.insert("name", Value::text("Grace"));

        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["name", "id"]);
        assert_eq!(map.get("name"), Some(&Value::text("Grace")));
    }

    #[test]
    fn display_forms() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Number(12.5).to_string(), "12.5");
        assert_eq!(Value::text("plain").to_string(), "plain");
        assert_eq!(
            Value::Sequence(vec![Value::text("a"), Value::Number(2.0)]).to_string(),
            r#"["a", 2]"#
        );
        assert_eq!(
            Value::Mapping(sample_mapping()).to_string(),
            r#"{"name": "Ada", "id": 1}"#
        );
    }

    #[test]
    fn serde_round_trip_preserves_order_and_literalness() {
        let input = r#"{"z": 1, "a": true, "m": {"x": null}, "list": [1, "two"]}"#;
        let value: Value = serde_json::from_str(input).unwrap();

        let map = value.as_mapping().unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["z", "a", "m", "list"]);
        assert_eq!(map.get("z"), Some(&Value::Number(1.0)));
        assert_eq!(map.get("a"), Some(&Value::Bool(true)));

        let encoded = serde_json::to_string(&value).unwrap();
        let again: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(again, value);
    }

    #[test]
    fn duplicate_keys_keep_last_assignment() {
        let value: Value = serde_json::from_str(r#"{"a": 1, "a": 2}"#).unwrap();
        let map = value.as_mapping().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), Some(&Value::Number(2.0)));
    }
}
