use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Typed identifiers — prevent stringly-typed confusion
// ---------------------------------------------------------------------------

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

define_id!(
    TenantId,
    "Opaque tenant correlation identifier. The isolation boundary for all record storage."
);
define_id!(
    RecordId,
    "Identifier of a stored record, unique within its (tenant, type) partition."
);
define_id!(CredentialId, "Unique identifier for an issued credential.");
define_id!(HolderId, "Identifier of a credential holder (subject DID or similar).");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_ids_distinct() {
        let tenant = TenantId::new("agent-main");
        let record = RecordId::new("rec-1");
        assert_ne!(tenant.as_str(), record.as_str());
    }

    #[test]
    fn test_id_display() {
        let id = CredentialId::new("urn:uuid:1234");
        assert_eq!(format!("{}", id), "urn:uuid:1234");
    }

    #[test]
    fn test_id_from_str() {
        let id: HolderId = "did:example:holder".into();
        assert_eq!(id.as_str(), "did:example:holder");
    }

    #[test]
    fn test_id_serde_roundtrip() {
        let id = RecordId::new("rec-42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"rec-42\"");
        let restored: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, restored);
    }
}
