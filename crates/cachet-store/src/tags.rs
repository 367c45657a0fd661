use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// TagScalar — a single scalar tag value
// ---------------------------------------------------------------------------

/// A scalar tag value: string, number, or boolean.
///
/// Equality is strict: values of different kinds never compare equal, so a
/// numeric `1` does not match the string `"1"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagScalar {
    Bool(bool),
    Number(Number),
    Text(String),
}

impl From<&str> for TagScalar {
    fn from(s: &str) -> Self {
        TagScalar::Text(s.to_string())
    }
}

impl From<String> for TagScalar {
    fn from(s: String) -> Self {
        TagScalar::Text(s)
    }
}

impl From<bool> for TagScalar {
    fn from(b: bool) -> Self {
        TagScalar::Bool(b)
    }
}

impl From<i64> for TagScalar {
    fn from(n: i64) -> Self {
        TagScalar::Number(Number::from(n))
    }
}

impl From<u64> for TagScalar {
    fn from(n: u64) -> Self {
        TagScalar::Number(Number::from(n))
    }
}

// ---------------------------------------------------------------------------
// TagValue — scalar or ordered sequence of scalars
// ---------------------------------------------------------------------------

/// A tag value as stored on a record: a single scalar or an ordered
/// sequence of scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Scalar(TagScalar),
    List(Vec<TagScalar>),
}

impl From<TagScalar> for TagValue {
    fn from(s: TagScalar) -> Self {
        TagValue::Scalar(s)
    }
}

impl From<&str> for TagValue {
    fn from(s: &str) -> Self {
        TagValue::Scalar(s.into())
    }
}

impl From<String> for TagValue {
    fn from(s: String) -> Self {
        TagValue::Scalar(s.into())
    }
}

impl From<bool> for TagValue {
    fn from(b: bool) -> Self {
        TagValue::Scalar(b.into())
    }
}

impl From<i64> for TagValue {
    fn from(n: i64) -> Self {
        TagValue::Scalar(n.into())
    }
}

impl From<Vec<TagScalar>> for TagValue {
    fn from(v: Vec<TagScalar>) -> Self {
        TagValue::List(v)
    }
}

/// The queryable tag set of a record, keyed by attribute name.
///
/// A `BTreeMap` keeps the serialized form stable regardless of insertion
/// order.
pub type Tags = BTreeMap<String, TagValue>;
