//! W3C credential assembly and proof construction.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use cachet_core::CredentialId;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{CredError, CredResult};
use crate::issuer::{decode_signature, verify_ed25519, IssuerAgent};
use crate::types::{CreateCredentialRequest, CredentialProof, VerifiableCredential};

const CONTEXT_CREDENTIALS_V1: &str = "https://www.w3.org/2018/credentials/v1";
const CONTEXT_CREDENTIALS_EXAMPLES_V1: &str = "https://www.w3.org/2018/credentials/examples/v1";
const DEFAULT_TYPE: &str = "VerifiableCredential";

/// Issue a W3C credential from a creation request.
///
/// Assembles the credential with a fresh `urn:uuid` id and the current
/// issuance date, then attaches a `DataIntegrityProof` signed by the issuer
/// agent over the canonical credential bytes.
pub fn issue_credential(
    issuer: &dyn IssuerAgent,
    request: &CreateCredentialRequest,
) -> CredResult<VerifiableCredential> {
    if request.issuer.trim().is_empty() {
        return Err(CredError::InvalidRequest("issuer is required".into()));
    }

    let issuance_date = Utc::now();
    let mut credential = VerifiableCredential {
        context: vec![
            CONTEXT_CREDENTIALS_V1.into(),
            CONTEXT_CREDENTIALS_EXAMPLES_V1.into(),
        ],
        id: CredentialId::new(format!("urn:uuid:{}", Uuid::new_v4())),
        types: request
            .types
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_TYPE.into()]),
        issuer: request.issuer.clone(),
        issuance_date,
        expiration_date: request.expiration_date,
        credential_subject: request.credential_subject.clone(),
        proof: None,
    };

    let proof = sign_credential(issuer, &credential, issuance_date)?;
    credential.proof = Some(proof);
    Ok(credential)
}

/// Sign the proof-less credential bytes and wrap the signature in a
/// `DataIntegrityProof`.
fn sign_credential(
    issuer: &dyn IssuerAgent,
    credential: &VerifiableCredential,
    created: DateTime<Utc>,
) -> CredResult<CredentialProof> {
    let signature = issuer.sign_ed25519(&signing_bytes(credential)?)?;

    Ok(CredentialProof {
        proof_type: "DataIntegrityProof".into(),
        created,
        proof_purpose: "assertionMethod".into(),
        verification_method: issuer.verification_method(),
        proof_value: STANDARD.encode(signature),
    })
}

/// Verify a credential's proof against the issuing key.
pub fn verify_credential(public_key: &[u8; 32], credential: &VerifiableCredential) -> bool {
    let Some(proof) = &credential.proof else {
        return false;
    };
    let Ok(signature) = decode_signature(&proof.proof_value) else {
        return false;
    };
    let mut unsigned = credential.clone();
    unsigned.proof = None;
    match signing_bytes(&unsigned) {
        Ok(bytes) => verify_ed25519(public_key, &bytes, &signature),
        Err(_) => false,
    }
}

/// The canonical byte form covered by the proof: the serialized credential
/// with the proof field absent.
fn signing_bytes(credential: &VerifiableCredential) -> CredResult<Vec<u8>> {
    debug_assert!(credential.proof.is_none());
    Ok(serde_json::to_vec(credential)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issuer::DevIssuer;
    use crate::types::CredentialSubject;
    use cachet_core::HolderId;
    use serde_json::{json, Map};

    fn make_issuer() -> DevIssuer {
        DevIssuer::from_seed([0x42u8; 32])
    }

    fn make_request() -> CreateCredentialRequest {
        let mut claims = Map::new();
        claims.insert("name".into(), json!("Test Subject"));
        CreateCredentialRequest {
            issuer: "did:example:issuer".into(),
            credential_subject: CredentialSubject {
                id: Some(HolderId::new("did:example:holder")),
                claims,
            },
            expiration_date: None,
            types: None,
        }
    }

    #[test]
    fn test_issue_assigns_urn_uuid_id() {
        let issuer = make_issuer();
        let credential = issue_credential(&issuer, &make_request()).unwrap();
        assert!(credential.id.as_str().starts_with("urn:uuid:"));

        let second = issue_credential(&issuer, &make_request()).unwrap();
        assert_ne!(credential.id, second.id);
    }

    #[test]
    fn test_issue_defaults_type() {
        let issuer = make_issuer();
        let credential = issue_credential(&issuer, &make_request()).unwrap();
        assert_eq!(credential.types, vec!["VerifiableCredential"]);

        let mut request = make_request();
        request.types = Some(vec!["VerifiableCredential".into(), "EmployeeCredential".into()]);
        let credential = issue_credential(&issuer, &request).unwrap();
        assert_eq!(credential.types.len(), 2);
    }

    #[test]
    fn test_issue_rejects_empty_issuer() {
        let issuer = make_issuer();
        let mut request = make_request();
        request.issuer = "  ".into();
        assert!(matches!(
            issue_credential(&issuer, &request),
            Err(CredError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_proof_shape() {
        let issuer = make_issuer();
        let credential = issue_credential(&issuer, &make_request()).unwrap();
        let proof = credential.proof.as_ref().unwrap();
        assert_eq!(proof.proof_type, "DataIntegrityProof");
        assert_eq!(proof.proof_purpose, "assertionMethod");
        assert_eq!(proof.verification_method, issuer.verification_method());
        assert_eq!(proof.created, credential.issuance_date);
    }

    #[test]
    fn test_proof_verifies() {
        let issuer = make_issuer();
        let credential = issue_credential(&issuer, &make_request()).unwrap();
        assert!(verify_credential(&issuer.public_key_ed25519(), &credential));
    }

    #[test]
    fn test_tampered_credential_fails_verification() {
        let issuer = make_issuer();
        let mut credential = issue_credential(&issuer, &make_request()).unwrap();
        credential.issuer = "did:example:impostor".into();
        assert!(!verify_credential(&issuer.public_key_ed25519(), &credential));
    }

    #[test]
    fn test_unsigned_credential_fails_verification() {
        let issuer = make_issuer();
        let mut credential = issue_credential(&issuer, &make_request()).unwrap();
        credential.proof = None;
        assert!(!verify_credential(&issuer.public_key_ed25519(), &credential));
    }

    #[test]
    fn test_expiration_date_carried_through() {
        let issuer = make_issuer();
        let mut request = make_request();
        let expires: DateTime<Utc> = "2030-01-01T00:00:00Z".parse().unwrap();
        request.expiration_date = Some(expires);
        let credential = issue_credential(&issuer, &request).unwrap();
        assert_eq!(credential.expiration_date, Some(expires));
    }
}
