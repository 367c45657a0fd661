//! Credential domain for cachet.
//!
//! W3C verifiable-credential types, SD-JWT VC issuance for the employee
//! credential type, the development-grade Ed25519 issuer that stands in for
//! an external identity framework, and the typed record kinds persisted
//! through the record store.

pub mod error;
pub mod issuance;
pub mod issuer;
pub mod metadata;
pub mod records;
pub mod sdjwt;
pub mod types;

pub use error::*;
pub use issuance::{issue_credential, verify_credential};
pub use issuer::{DevIssuer, IssuerAgent};
pub use records::{CredentialRecord, DidRecord, KeyRecord};
pub use types::*;
