//! Cachet root library.
//!
//! A thin credential-issuance API over a multi-tenant tag-indexed record
//! store. The root binary wires configuration, the in-memory store, the dev
//! issuer, and the axum HTTP layer together; the interesting state
//! management lives in `cachet-store`.

pub mod config;
pub mod directory;
pub mod error;
pub mod http;

pub use config::{IssuerConfig, RootConfig, ServerConfig};
pub use error::{RootError, RootResult};

use std::sync::Arc;

use cachet_core::TenantId;
use cachet_cred::records::{DidRecord, KeyRecord};
use cachet_cred::{DevIssuer, IssuerAgent};
use cachet_store::{InMemoryRecordStore, RecordStore, RecordStoreExt};
use chrono::Utc;
use tracing::info;

use crate::directory::CredentialDirectory;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

/// Shared application state for the HTTP layer.
pub struct AppState {
    pub config: RootConfig,
    pub store: Arc<dyn RecordStore>,
    pub issuer: Arc<DevIssuer>,
    pub directory: CredentialDirectory,
    pub tenant: TenantId,
}

/// Initialize the application: create the store, generate the issuer
/// identity, and persist its DID and key records.
pub fn initialize(config: RootConfig) -> RootResult<AppState> {
    config.validate()?;

    let store: Arc<dyn RecordStore> = Arc::new(InMemoryRecordStore::new());
    let issuer = Arc::new(DevIssuer::generate());
    let tenant = TenantId::new(config.default_tenant.clone());

    // Register the issuer identity in the store so it is discoverable like
    // any other framework-managed record.
    store.save(&tenant, &DidRecord::new(issuer.did()))?;
    store.save(
        &tenant,
        &KeyRecord {
            kid: issuer.verification_method(),
            alg: "EdDSA".into(),
            public_key: URL_SAFE_NO_PAD.encode(issuer.public_key_ed25519()),
            created_at: Utc::now(),
        },
    )?;

    info!(did = %issuer.did(), tenant = %tenant, "issuer initialized");

    let directory = CredentialDirectory::new(store.clone(), tenant.clone());

    Ok(AppState {
        config,
        store,
        issuer,
        directory,
        tenant,
    })
}
