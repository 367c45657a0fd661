//! Credential directory: persistence glue between the issuance service and
//! the record store.

use std::sync::Arc;

use cachet_core::{CredentialId, HolderId, RecordId, TenantId};
use cachet_cred::records::CredentialRecord;
use cachet_cred::types::VerifiableCredential;
use cachet_store::{RecordStore, RecordStoreExt, StoreError, TagQuery, TagScalar};

use crate::error::RootResult;

/// Stores issued credentials and answers id- and holder-scoped lookups.
///
/// All operations run against one tenant; lookups by holder are tag queries
/// over the `holder_id` tag rather than payload scans.
pub struct CredentialDirectory {
    store: Arc<dyn RecordStore>,
    tenant: TenantId,
}

impl CredentialDirectory {
    pub fn new(store: Arc<dyn RecordStore>, tenant: TenantId) -> Self {
        Self { store, tenant }
    }

    /// Persist an issued credential.
    pub fn save(
        &self,
        credential: &VerifiableCredential,
        holder_id: Option<HolderId>,
    ) -> RootResult<()> {
        let record = CredentialRecord::new(credential.clone(), holder_id);
        self.store.save(&self.tenant, &record)?;
        Ok(())
    }

    /// Fetch a credential by id. Absence is `None`, not an error.
    pub fn find_by_id(&self, id: &CredentialId) -> RootResult<Option<VerifiableCredential>> {
        match self
            .store
            .load::<CredentialRecord>(&self.tenant, &RecordId::new(id.as_str()))
        {
            Ok(record) => Ok(Some(record.credential)),
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Every stored credential, in no guaranteed order.
    pub fn find_all(&self) -> RootResult<Vec<VerifiableCredential>> {
        let records: Vec<CredentialRecord> = self.store.load_all(&self.tenant)?;
        Ok(records.into_iter().map(|r| r.credential).collect())
    }

    /// Every credential held by `holder_id`.
    pub fn find_by_holder(&self, holder_id: &HolderId) -> RootResult<Vec<VerifiableCredential>> {
        let query = TagQuery::Eq(
            "holder_id".into(),
            TagScalar::from(holder_id.as_str()),
        );
        let records: Vec<CredentialRecord> = self.store.find(&self.tenant, &query)?;
        Ok(records.into_iter().map(|r| r.credential).collect())
    }
}
