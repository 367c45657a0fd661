//! Boolean tag queries.
//!
//! A query arrives as a JSON map and is parsed once into a small AST, then
//! evaluated by structural recursion against each record's tag set. Plain
//! keys at any level combine conjunctively; the reserved keys `$or`, `$and`
//! and `$not` nest arbitrarily and mix freely with plain clauses.

use serde_json::{Map, Value};

use crate::error::{StoreError, StoreResult};
use crate::tags::{TagScalar, TagValue, Tags};

/// A parsed tag query.
///
/// Evaluation semantics per clause:
/// - `And` / `Or` / `Not` — the usual boolean combinators over sub-queries.
/// - `Eq(key, scalar)` — the record's tag for `key` must be a scalar equal
///   to the queried value under strict equality (no cross-type coercion).
/// - `ContainsAll(key, scalars)` — the record's tag for `key` must be a
///   sequence containing every queried element (subset containment,
///   order-independent, duplicates ignored).
#[derive(Debug, Clone, PartialEq)]
pub enum TagQuery {
    And(Vec<TagQuery>),
    Or(Vec<TagQuery>),
    Not(Box<TagQuery>),
    Eq(String, TagScalar),
    ContainsAll(String, Vec<TagScalar>),
}

impl TagQuery {
    /// The empty query: matches every record.
    pub fn match_all() -> Self {
        TagQuery::And(Vec::new())
    }

    /// Parse a query from its JSON map form.
    ///
    /// `null` clause values are wildcards and are dropped, so callers can
    /// build queries with optional filters without conditionally omitting
    /// keys. Malformed operator shapes are rejected here; evaluation itself
    /// never fails.
    pub fn parse(query: &Value) -> StoreResult<Self> {
        match query {
            Value::Object(map) => Self::parse_map(map),
            other => Err(StoreError::InvalidQuery(format!(
                "query must be an object, got {}",
                kind_name(other)
            ))),
        }
    }

    fn parse_map(map: &Map<String, Value>) -> StoreResult<Self> {
        let mut clauses = Vec::new();

        for (key, value) in map {
            // Absent/null filter: always satisfied.
            if value.is_null() {
                continue;
            }

            match key.as_str() {
                "$or" => clauses.push(TagQuery::Or(Self::parse_subqueries(key, value)?)),
                "$and" => clauses.push(TagQuery::And(Self::parse_subqueries(key, value)?)),
                "$not" => {
                    let inner = match value {
                        Value::Object(m) => Self::parse_map(m)?,
                        other => {
                            return Err(StoreError::InvalidQuery(format!(
                                "$not expects an object, got {}",
                                kind_name(other)
                            )))
                        }
                    };
                    clauses.push(TagQuery::Not(Box::new(inner)));
                }
                _ => clauses.push(Self::parse_field(key, value)?),
            }
        }

        Ok(TagQuery::And(clauses))
    }

    fn parse_subqueries(key: &str, value: &Value) -> StoreResult<Vec<TagQuery>> {
        let items = value.as_array().ok_or_else(|| {
            StoreError::InvalidQuery(format!("{} expects an array, got {}", key, kind_name(value)))
        })?;

        items
            .iter()
            .map(|item| match item {
                Value::Object(m) => Self::parse_map(m),
                other => Err(StoreError::InvalidQuery(format!(
                    "{} sub-queries must be objects, got {}",
                    key,
                    kind_name(other)
                ))),
            })
            .collect()
    }

    fn parse_field(key: &str, value: &Value) -> StoreResult<Self> {
        match value {
            Value::Array(items) => {
                let scalars = items
                    .iter()
                    .map(|item| parse_scalar(key, item))
                    .collect::<StoreResult<Vec<_>>>()?;
                Ok(TagQuery::ContainsAll(key.to_string(), scalars))
            }
            _ => Ok(TagQuery::Eq(key.to_string(), parse_scalar(key, value)?)),
        }
    }

    /// Evaluate this query against a record's tag set.
    pub fn matches(&self, tags: &Tags) -> bool {
        match self {
            TagQuery::And(subs) => subs.iter().all(|q| q.matches(tags)),
            TagQuery::Or(subs) => subs.iter().any(|q| q.matches(tags)),
            TagQuery::Not(sub) => !sub.matches(tags),
            TagQuery::Eq(key, expected) => match tags.get(key) {
                Some(TagValue::Scalar(actual)) => actual == expected,
                _ => false,
            },
            TagQuery::ContainsAll(key, expected) => match tags.get(key) {
                Some(TagValue::List(actual)) => expected.iter().all(|e| actual.contains(e)),
                _ => false,
            },
        }
    }
}

fn parse_scalar(key: &str, value: &Value) -> StoreResult<TagScalar> {
    match value {
        Value::Bool(b) => Ok(TagScalar::Bool(*b)),
        Value::Number(n) => Ok(TagScalar::Number(n.clone())),
        Value::String(s) => Ok(TagScalar::Text(s.clone())),
        other => Err(StoreError::InvalidQuery(format!(
            "clause '{}' expects scalar values, got {}",
            key,
            kind_name(other)
        ))),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
