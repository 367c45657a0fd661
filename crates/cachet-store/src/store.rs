use cachet_core::{RecordId, TenantId};

use crate::error::StoreResult;
use crate::query::TagQuery;
use crate::record::{RecordKind, TagRecord};

// ---------------------------------------------------------------------------
// RecordStore — the storage service interface
//
// Every operation is scoped to one (tenant, type) partition. Mutations are
// individually atomic; operations against different partitions never
// serialize against each other.
// ---------------------------------------------------------------------------

pub trait RecordStore: Send + Sync {
    /// Store a new record. Fails with `Duplicate` if the id already exists
    /// in the `(tenant, record.record_type)` partition. Creates the
    /// partition if absent.
    fn create(&self, tenant: &TenantId, record: &TagRecord) -> StoreResult<()>;

    /// Replace the stored record under `record.id`. Fails with `NotFound`
    /// if no such record exists. The whole envelope is replaced; there is
    /// no partial update.
    fn update(&self, tenant: &TenantId, record: &TagRecord) -> StoreResult<()>;

    /// Remove a record. Fails with `NotFound` if absent.
    fn delete(&self, tenant: &TenantId, record: &TagRecord) -> StoreResult<()>;

    /// Remove a record addressed by type and id. Fails with `NotFound` if
    /// absent.
    fn delete_by_id(&self, tenant: &TenantId, record_type: &str, id: &RecordId)
        -> StoreResult<()>;

    /// Fetch one record. Fails with `NotFound` if absent.
    fn get_by_id(
        &self,
        tenant: &TenantId,
        record_type: &str,
        id: &RecordId,
    ) -> StoreResult<TagRecord>;

    /// Every record in the partition, in no guaranteed order. A missing or
    /// empty partition yields an empty vector, not an error.
    fn get_all(&self, tenant: &TenantId, record_type: &str) -> StoreResult<Vec<TagRecord>>;

    /// The subset of `get_all` whose tags satisfy the query. An empty
    /// result is not an error.
    fn find_by_query(
        &self,
        tenant: &TenantId,
        record_type: &str,
        query: &TagQuery,
    ) -> StoreResult<Vec<TagRecord>>;
}

// ---------------------------------------------------------------------------
// RecordStoreExt — typed convenience layer over RecordKind
// ---------------------------------------------------------------------------

pub trait RecordStoreExt: RecordStore {
    fn save<R: RecordKind>(&self, tenant: &TenantId, value: &R) -> StoreResult<()> {
        self.create(tenant, &value.to_record()?)
    }

    fn replace<R: RecordKind>(&self, tenant: &TenantId, value: &R) -> StoreResult<()> {
        self.update(tenant, &value.to_record()?)
    }

    fn load<R: RecordKind>(&self, tenant: &TenantId, id: &RecordId) -> StoreResult<R> {
        R::from_record(&self.get_by_id(tenant, R::TYPE, id)?)
    }

    fn load_all<R: RecordKind>(&self, tenant: &TenantId) -> StoreResult<Vec<R>> {
        self.get_all(tenant, R::TYPE)?
            .iter()
            .map(R::from_record)
            .collect()
    }

    fn find<R: RecordKind>(&self, tenant: &TenantId, query: &TagQuery) -> StoreResult<Vec<R>> {
        self.find_by_query(tenant, R::TYPE, query)?
            .iter()
            .map(R::from_record)
            .collect()
    }

    fn remove<R: RecordKind>(&self, tenant: &TenantId, id: &RecordId) -> StoreResult<()> {
        self.delete_by_id(tenant, R::TYPE, id)
    }
}

impl<S: RecordStore + ?Sized> RecordStoreExt for S {}
