//! Compact SD-JWT VC issuance for the employee credential type.
//!
//! Output format: `<issuer-jwt>~<disclosure 1>~...~<disclosure N>~` where
//! the issuer JWT carries `_sd` digests instead of the claim values and each
//! disclosure is the base64url-encoded JSON array `[salt, name, value]`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::error::CredResult;
use crate::issuer::IssuerAgent;
use crate::types::EmployeeCredentialRequest;

/// Issue a signed employee SD-JWT VC in compact serialization.
///
/// All claims are selectively disclosable; the signed payload carries only
/// their digests plus `vct`, `iss` and `iat`.
pub fn issue_employee_sd_jwt(
    issuer: &dyn IssuerAgent,
    vct: &str,
    request: &EmployeeCredentialRequest,
) -> CredResult<String> {
    let mut claims: Vec<(&str, Value)> = vec![
        ("firstName", json!(request.first_name)),
        ("lastName", json!(request.last_name)),
        ("jobTitle", json!(request.job_title)),
        ("startDate", json!(request.start_date)),
    ];
    if let Some(end_date) = &request.end_date {
        claims.push(("endDate", json!(end_date)));
    }

    let disclosures: Vec<String> = claims
        .iter()
        .map(|(name, value)| build_disclosure(name, value))
        .collect();

    let digests: Vec<String> = disclosures.iter().map(|d| disclosure_digest(d)).collect();

    let payload = json!({
        "vct": vct,
        "_sd": digests,
        "_sd_alg": "sha-256",
        "iss": issuer.did(),
        "iat": Utc::now().timestamp(),
    });

    let jwt = sign_compact_jwt(issuer, &payload)?;

    let mut compact = jwt;
    for disclosure in &disclosures {
        compact.push('~');
        compact.push_str(disclosure);
    }
    compact.push('~');
    Ok(compact)
}

/// Sign `base64url(header).base64url(payload)` with the issuer key.
fn sign_compact_jwt(issuer: &dyn IssuerAgent, payload: &Value) -> CredResult<String> {
    let header = json!({"alg": "EdDSA", "typ": "vc+sd-jwt"});
    let header_b64 = URL_SAFE_NO_PAD.encode(header.to_string());
    let payload_b64 = URL_SAFE_NO_PAD.encode(payload.to_string());

    let signing_input = format!("{}.{}", header_b64, payload_b64);
    let signature = issuer.sign_ed25519(signing_input.as_bytes())?;

    Ok(format!(
        "{}.{}",
        signing_input,
        URL_SAFE_NO_PAD.encode(signature)
    ))
}

/// Build a disclosure: base64url of the JSON array `[salt, name, value]`.
/// The salt is derived from the claim name, so reissuing the same request
/// yields the same disclosures.
fn build_disclosure(name: &str, value: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"cachet-disclosure-salt:");
    hasher.update(name.as_bytes());
    let salt = hasher.finalize();
    let salt_b64 = URL_SAFE_NO_PAD.encode(&salt[..16]);

    let disclosure = json!([salt_b64, name, value]);
    URL_SAFE_NO_PAD.encode(disclosure.to_string())
}

/// The `_sd` digest of a disclosure: base64url of the SHA-256 hash over the
/// encoded disclosure string.
fn disclosure_digest(disclosure: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(disclosure.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issuer::DevIssuer;
    use crate::metadata::EMPLOYEE_VCT_URI;

    fn make_issuer() -> DevIssuer {
        DevIssuer::from_seed([0x42u8; 32])
    }

    fn make_request() -> EmployeeCredentialRequest {
        EmployeeCredentialRequest {
            first_name: "Erika".into(),
            last_name: "Mustermann".into(),
            job_title: "Platform Engineer".into(),
            start_date: "2024-01-15".into(),
            end_date: None,
        }
    }

    fn split_compact(compact: &str) -> (String, Vec<String>) {
        assert!(compact.ends_with('~'), "compact form ends with a tilde");
        let mut parts: Vec<&str> = compact.trim_end_matches('~').split('~').collect();
        let jwt = parts.remove(0).to_string();
        (jwt, parts.into_iter().map(String::from).collect())
    }

    #[test]
    fn test_compact_structure() {
        let issuer = make_issuer();
        let compact = issue_employee_sd_jwt(&issuer, EMPLOYEE_VCT_URI, &make_request()).unwrap();
        let (jwt, disclosures) = split_compact(&compact);

        // Three dot-separated base64url segments, four disclosures (no endDate).
        assert_eq!(jwt.split('.').count(), 3);
        assert_eq!(disclosures.len(), 4);
    }

    #[test]
    fn test_end_date_adds_disclosure() {
        let issuer = make_issuer();
        let mut request = make_request();
        request.end_date = Some("2026-06-30".into());
        let compact = issue_employee_sd_jwt(&issuer, EMPLOYEE_VCT_URI, &request).unwrap();
        let (_, disclosures) = split_compact(&compact);
        assert_eq!(disclosures.len(), 5);
    }

    #[test]
    fn test_header_and_payload_contents() {
        let issuer = make_issuer();
        let compact = issue_employee_sd_jwt(&issuer, EMPLOYEE_VCT_URI, &make_request()).unwrap();
        let (jwt, disclosures) = split_compact(&compact);
        let segments: Vec<&str> = jwt.split('.').collect();

        let header: Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segments[0]).unwrap()).unwrap();
        assert_eq!(header["alg"], "EdDSA");
        assert_eq!(header["typ"], "vc+sd-jwt");

        let payload: Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segments[1]).unwrap()).unwrap();
        assert_eq!(payload["vct"], EMPLOYEE_VCT_URI);
        assert_eq!(payload["iss"], issuer.did());
        assert_eq!(payload["_sd_alg"], "sha-256");
        assert!(payload["iat"].is_i64());

        // Claim values live in disclosures, not the signed payload.
        assert!(payload.get("firstName").is_none());
        let sd = payload["_sd"].as_array().unwrap();
        assert_eq!(sd.len(), disclosures.len());
    }

    #[test]
    fn test_digests_bind_disclosures() {
        let issuer = make_issuer();
        let compact = issue_employee_sd_jwt(&issuer, EMPLOYEE_VCT_URI, &make_request()).unwrap();
        let (jwt, disclosures) = split_compact(&compact);
        let payload: Value = serde_json::from_slice(
            &URL_SAFE_NO_PAD.decode(jwt.split('.').nth(1).unwrap()).unwrap(),
        )
        .unwrap();
        let sd: Vec<String> = payload["_sd"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();

        for disclosure in &disclosures {
            assert!(sd.contains(&disclosure_digest(disclosure)));
        }
    }

    #[test]
    fn test_disclosures_decode_to_salt_name_value() {
        let issuer = make_issuer();
        let compact = issue_employee_sd_jwt(&issuer, EMPLOYEE_VCT_URI, &make_request()).unwrap();
        let (_, disclosures) = split_compact(&compact);

        let mut names = Vec::new();
        for disclosure in &disclosures {
            let decoded: Value =
                serde_json::from_slice(&URL_SAFE_NO_PAD.decode(disclosure).unwrap()).unwrap();
            let entry = decoded.as_array().unwrap();
            assert_eq!(entry.len(), 3);
            assert!(!entry[0].as_str().unwrap().is_empty());
            names.push(entry[1].as_str().unwrap().to_string());
        }
        assert_eq!(names, vec!["firstName", "lastName", "jobTitle", "startDate"]);
    }

    #[test]
    fn test_signature_verifies() {
        let issuer = make_issuer();
        let compact = issue_employee_sd_jwt(&issuer, EMPLOYEE_VCT_URI, &make_request()).unwrap();
        let (jwt, _) = split_compact(&compact);
        let segments: Vec<&str> = jwt.split('.').collect();

        let signing_input = format!("{}.{}", segments[0], segments[1]);
        let signature: [u8; 64] = URL_SAFE_NO_PAD
            .decode(segments[2])
            .unwrap()
            .try_into()
            .unwrap();
        assert!(issuer.verify(signing_input.as_bytes(), &signature));
        assert!(!issuer.verify(b"tampered", &signature));
    }
}
