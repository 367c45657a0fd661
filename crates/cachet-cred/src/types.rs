use cachet_core::{CredentialId, HolderId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// W3C Verifiable Credentials data model (simplified)
// ---------------------------------------------------------------------------

/// The subject of a credential: an optional holder identifier plus
/// arbitrary claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialSubject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<HolderId>,

    #[serde(flatten)]
    pub claims: Map<String, Value>,
}

/// Proof block attached to an issued credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialProof {
    #[serde(rename = "type")]
    pub proof_type: String,
    pub created: DateTime<Utc>,
    pub proof_purpose: String,
    pub verification_method: String,
    pub proof_value: String,
}

/// A credential following the W3C Verifiable Credentials data model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiableCredential {
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    pub id: CredentialId,
    #[serde(rename = "type")]
    pub types: Vec<String>,
    pub issuer: String,
    pub issuance_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    pub credential_subject: CredentialSubject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<CredentialProof>,
}

/// Request body for issuing a W3C credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCredentialRequest {
    pub issuer: String,
    pub credential_subject: CredentialSubject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Employee SD-JWT VC
// ---------------------------------------------------------------------------

/// Request body for issuing an employee credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCredentialRequest {
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    /// ISO 8601 date (YYYY-MM-DD) when the position started.
    pub start_date: String,
    /// ISO 8601 date (YYYY-MM-DD) when the position ended. Absent if still
    /// active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Response body after issuing an employee credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCredentialResponse {
    /// The issued SD-JWT VC in compact serialization format.
    pub credential: String,
    /// The credential format identifier.
    pub format: String,
}

// ---------------------------------------------------------------------------
// SD-JWT VC Type Metadata (draft-ietf-oauth-sd-jwt-vc)
// ---------------------------------------------------------------------------

/// Localized display entry for a credential type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VcTypeDisplay {
    pub lang: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Display entry for a single claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimDisplay {
    pub lang: String,
    pub label: String,
}

/// Whether a claim may be selectively disclosed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdMode {
    Always,
    Allowed,
    Never,
}

/// Definition of a single claim within VC Type Metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimDefinition {
    /// JSON path components pointing to the claim value.
    pub path: Vec<String>,
    pub sd: SdMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<Vec<ClaimDisplay>>,
}

/// SD-JWT VC Type Metadata document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VcTypeMetadata {
    /// URI uniquely identifying this credential type.
    pub vct: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<Vec<VcTypeDisplay>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claims: Option<Vec<ClaimDefinition>>,
}
