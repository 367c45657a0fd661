use cachet_core::RecordId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::tags::Tags;

// ---------------------------------------------------------------------------
// TagRecord — the storage envelope
// ---------------------------------------------------------------------------

/// The storage envelope for a single record: caller-assigned id, type
/// discriminator, queryable tags, and the opaque payload that equals the
/// record's externally visible state.
///
/// `id` and `record_type` are immutable for the life of the record; updates
/// replace the whole envelope under the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRecord {
    pub id: RecordId,
    pub record_type: String,
    pub tags: Tags,
    pub payload: serde_json::Value,
}

impl TagRecord {
    pub fn new(
        id: impl Into<RecordId>,
        record_type: impl Into<String>,
        tags: Tags,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            id: id.into(),
            record_type: record_type.into(),
            tags,
            payload,
        }
    }

    /// Serialize for storage. Records are persisted as JSON strings and
    /// reconstructed on every read, so no object identity survives a write.
    pub(crate) fn to_stored(&self) -> StoreResult<String> {
        serde_json::to_string(self).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    pub(crate) fn from_stored(stored: &str) -> StoreResult<Self> {
        serde_json::from_str(stored).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// RecordKind — typed record kinds
//
// An explicit compile-time registry: each kind names its partition type and
// derives its own tags from content. The store never inspects payloads.
// ---------------------------------------------------------------------------

/// A typed record kind persisted through the store.
pub trait RecordKind: Serialize + DeserializeOwned {
    /// Partition discriminator for this kind. Fixed for all records of the
    /// kind; the store treats it as an opaque string.
    const TYPE: &'static str;

    /// The record's identity within its partition.
    fn record_id(&self) -> RecordId;

    /// Derive the queryable tags from the record's content. Must be
    /// deterministic: equal records produce equal tags.
    fn tags(&self) -> Tags;

    /// Wrap this value in a storage envelope.
    fn to_record(&self) -> StoreResult<TagRecord> {
        Ok(TagRecord {
            id: self.record_id(),
            record_type: Self::TYPE.to_string(),
            tags: self.tags(),
            payload: serde_json::to_value(self)
                .map_err(|e| StoreError::Serialization(e.to_string()))?,
        })
    }

    /// Reconstruct a value from a storage envelope of this kind.
    fn from_record(record: &TagRecord) -> StoreResult<Self> {
        serde_json::from_value(record.payload.clone())
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::TagValue;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Widget {
        name: String,
        color: String,
    }

    impl RecordKind for Widget {
        const TYPE: &'static str = "Widget";

        fn record_id(&self) -> RecordId {
            RecordId::new(self.name.clone())
        }

        fn tags(&self) -> Tags {
            let mut tags = Tags::new();
            tags.insert("color".into(), TagValue::from(self.color.as_str()));
            tags
        }
    }

    #[test]
    fn test_stored_roundtrip() {
        let record = TagRecord::new(
            "rec-1",
            "Widget",
            Tags::new(),
            json!({"name": "gear", "color": "red", "nested": {"depth": [1, 2, 3]}}),
        );
        let stored = record.to_stored().unwrap();
        let restored = TagRecord::from_stored(&stored).unwrap();
        assert_eq!(record, restored);
    }

    #[test]
    fn test_from_stored_rejects_garbage() {
        assert!(matches!(
            TagRecord::from_stored("not json"),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_record_kind_envelope() {
        let widget = Widget {
            name: "gear".into(),
            color: "red".into(),
        };
        let record = widget.to_record().unwrap();
        assert_eq!(record.record_type, "Widget");
        assert_eq!(record.id.as_str(), "gear");
        assert_eq!(record.tags.get("color"), Some(&TagValue::from("red")));

        let restored = Widget::from_record(&record).unwrap();
        assert_eq!(widget, restored);
    }

    #[test]
    fn test_record_kind_tags_deterministic() {
        let widget = Widget {
            name: "gear".into(),
            color: "red".into(),
        };
        assert_eq!(widget.tags(), widget.clone().tags());
    }
}
