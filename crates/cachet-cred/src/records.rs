//! Typed record kinds persisted through the record store.
//!
//! Tags are derived deterministically from record content here, on the
//! producer side; the store itself never interprets payloads.

use cachet_core::{HolderId, RecordId};
use cachet_store::{RecordKind, TagScalar, TagValue, Tags};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::VerifiableCredential;

// ---------------------------------------------------------------------------
// CredentialRecord — an issued credential plus storage metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub credential: VerifiableCredential,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder_id: Option<HolderId>,
}

impl CredentialRecord {
    pub fn new(credential: VerifiableCredential, holder_id: Option<HolderId>) -> Self {
        Self {
            credential,
            created_at: Utc::now(),
            holder_id,
        }
    }
}

impl RecordKind for CredentialRecord {
    const TYPE: &'static str = "CredentialRecord";

    fn record_id(&self) -> RecordId {
        RecordId::new(self.credential.id.as_str())
    }

    fn tags(&self) -> Tags {
        let mut tags = Tags::new();
        tags.insert(
            "credential_id".into(),
            TagValue::from(self.credential.id.as_str()),
        );
        tags.insert("issuer".into(), TagValue::from(self.credential.issuer.as_str()));
        tags.insert(
            "types".into(),
            TagValue::List(
                self.credential
                    .types
                    .iter()
                    .map(|t| TagScalar::from(t.as_str()))
                    .collect(),
            ),
        );
        if let Some(holder) = &self.holder_id {
            tags.insert("holder_id".into(), TagValue::from(holder.as_str()));
        }
        tags
    }
}

// ---------------------------------------------------------------------------
// DidRecord — a DID known to the service
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DidRecord {
    pub did: String,
    pub method: String,
    pub created_at: DateTime<Utc>,
}

impl DidRecord {
    pub fn new(did: impl Into<String>) -> Self {
        let did = did.into();
        let method = did_method(&did);
        Self {
            did,
            method,
            created_at: Utc::now(),
        }
    }
}

impl RecordKind for DidRecord {
    const TYPE: &'static str = "DidRecord";

    fn record_id(&self) -> RecordId {
        RecordId::new(self.did.clone())
    }

    fn tags(&self) -> Tags {
        let mut tags = Tags::new();
        tags.insert("did".into(), TagValue::from(self.did.as_str()));
        tags.insert("method".into(), TagValue::from(self.method.as_str()));
        tags
    }
}

/// The method segment of a DID: `did:<method>:<id>`.
fn did_method(did: &str) -> String {
    did.split(':').nth(1).unwrap_or_default().to_string()
}

// ---------------------------------------------------------------------------
// KeyRecord — issuer signing-key metadata (public half only)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyRecord {
    pub kid: String,
    pub alg: String,
    /// Base64url-encoded public key.
    pub public_key: String,
    pub created_at: DateTime<Utc>,
}

impl RecordKind for KeyRecord {
    const TYPE: &'static str = "KeyRecord";

    fn record_id(&self) -> RecordId {
        RecordId::new(self.kid.clone())
    }

    fn tags(&self) -> Tags {
        let mut tags = Tags::new();
        tags.insert("kid".into(), TagValue::from(self.kid.as_str()));
        tags.insert("alg".into(), TagValue::from(self.alg.as_str()));
        tags
    }
}
