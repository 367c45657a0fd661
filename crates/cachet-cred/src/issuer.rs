//! The issuer seam.
//!
//! Credential assembly is glue; the actual key custody and signing belong
//! to an identity framework behind the [`IssuerAgent`] trait. [`DevIssuer`]
//! is the built-in implementation: an in-memory Ed25519 key with a did:jwk
//! identity, suitable for development and testing.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use ed25519_dalek::{Signer as DalekSigner, SigningKey, VerifyingKey};
use rand::rngs::OsRng;

use crate::error::{CredError, CredResult};

// ---------------------------------------------------------------------------
// IssuerAgent — the external-framework boundary
// ---------------------------------------------------------------------------

pub trait IssuerAgent: Send + Sync {
    /// The issuer's DID.
    fn did(&self) -> &str;

    /// DID URL of the verification method that signatures resolve to.
    fn verification_method(&self) -> String;

    fn sign_ed25519(&self, message: &[u8]) -> CredResult<[u8; 64]>;

    fn public_key_ed25519(&self) -> [u8; 32];
}

// ---------------------------------------------------------------------------
// DevIssuer — in-memory Ed25519 issuer with a did:jwk identity
// ---------------------------------------------------------------------------

pub struct DevIssuer {
    signing_key: SigningKey,
    did: String,
}

impl DevIssuer {
    /// Generate a fresh issuer key. The key lives only in process memory;
    /// restarting the service produces a new issuer identity.
    pub fn generate() -> Self {
        Self::from_signing_key(SigningKey::generate(&mut OsRng))
    }

    /// Build an issuer from a fixed seed (for testing).
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(&seed))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let did = did_jwk_from_public_key(&signing_key.verifying_key());
        Self { signing_key, did }
    }

    /// Verify a signature against this issuer's public key.
    pub fn verify(&self, message: &[u8], signature: &[u8; 64]) -> bool {
        let sig = ed25519_dalek::Signature::from_bytes(signature);
        self.signing_key
            .verifying_key()
            .verify_strict(message, &sig)
            .is_ok()
    }
}

impl IssuerAgent for DevIssuer {
    fn did(&self) -> &str {
        &self.did
    }

    fn verification_method(&self) -> String {
        // did:jwk documents expose a single verification method, "#0".
        format!("{}#0", self.did)
    }

    fn sign_ed25519(&self, message: &[u8]) -> CredResult<[u8; 64]> {
        Ok(self.signing_key.sign(message).to_bytes())
    }

    fn public_key_ed25519(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }
}

/// Derive a did:jwk DID from an Ed25519 public key: the base64url-encoded
/// OKP JWK, prefixed with `did:jwk:`.
fn did_jwk_from_public_key(key: &VerifyingKey) -> String {
    let jwk = serde_json::json!({
        "kty": "OKP",
        "crv": "Ed25519",
        "x": URL_SAFE_NO_PAD.encode(key.to_bytes()),
    });
    format!("did:jwk:{}", URL_SAFE_NO_PAD.encode(jwk.to_string()))
}

/// Verify an Ed25519 signature against a raw public key. Used to check
/// proofs without holding an issuer instance.
pub fn verify_ed25519(public_key: &[u8; 32], message: &[u8], signature: &[u8; 64]) -> bool {
    match VerifyingKey::from_bytes(public_key) {
        Ok(vk) => {
            let sig = ed25519_dalek::Signature::from_bytes(signature);
            vk.verify_strict(message, &sig).is_ok()
        }
        Err(_) => false,
    }
}

/// Decode a signature produced by [`IssuerAgent::sign_ed25519`] from its
/// base64 transport form.
pub fn decode_signature(encoded: &str) -> CredResult<[u8; 64]> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| CredError::Signing(format!("invalid signature encoding: {}", e)))?;
    bytes
        .try_into()
        .map_err(|_| CredError::Signing("signature must be 64 bytes".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_issuer() -> DevIssuer {
        DevIssuer::from_seed([0x42u8; 32])
    }

    #[test]
    fn test_sign_and_verify() {
        let issuer = make_issuer();
        let sig = issuer.sign_ed25519(b"credential bytes").unwrap();
        assert!(issuer.verify(b"credential bytes", &sig));
        assert!(!issuer.verify(b"tampered", &sig));
    }

    #[test]
    fn test_did_jwk_format() {
        let issuer = make_issuer();
        assert!(issuer.did().starts_with("did:jwk:"));

        // The did:jwk method-specific id decodes to an OKP JWK.
        let encoded = issuer.did().trim_start_matches("did:jwk:");
        let jwk_bytes = URL_SAFE_NO_PAD.decode(encoded).unwrap();
        let jwk: serde_json::Value = serde_json::from_slice(&jwk_bytes).unwrap();
        assert_eq!(jwk["kty"], "OKP");
        assert_eq!(jwk["crv"], "Ed25519");
        let x = URL_SAFE_NO_PAD.decode(jwk["x"].as_str().unwrap()).unwrap();
        assert_eq!(x, issuer.public_key_ed25519());
    }

    #[test]
    fn test_verification_method_fragment() {
        let issuer = make_issuer();
        assert_eq!(
            issuer.verification_method(),
            format!("{}#0", issuer.did())
        );
    }

    #[test]
    fn test_deterministic_from_seed() {
        let a = DevIssuer::from_seed([7u8; 32]);
        let b = DevIssuer::from_seed([7u8; 32]);
        assert_eq!(a.did(), b.did());
        assert_eq!(a.public_key_ed25519(), b.public_key_ed25519());
    }

    #[test]
    fn test_generated_issuers_distinct() {
        let a = DevIssuer::generate();
        let b = DevIssuer::generate();
        assert_ne!(a.did(), b.did());
    }

    #[test]
    fn test_verify_ed25519_standalone() {
        let issuer = make_issuer();
        let sig = issuer.sign_ed25519(b"msg").unwrap();
        assert!(verify_ed25519(&issuer.public_key_ed25519(), b"msg", &sig));
        assert!(!verify_ed25519(&issuer.public_key_ed25519(), b"other", &sig));
    }

    #[test]
    fn test_decode_signature_rejects_bad_input() {
        assert!(matches!(
            decode_signature("not base64!!!"),
            Err(CredError::Signing(_))
        ));
        let short = base64::engine::general_purpose::STANDARD.encode([0u8; 16]);
        assert!(matches!(
            decode_signature(&short),
            Err(CredError::Signing(_))
        ));
    }
}
