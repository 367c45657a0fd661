//! In-memory record store.
//!
//! The store is a three-level mapping, `tenant -> type -> id -> serialized
//! record`. The partition directory sits behind a read-write lock; each
//! `(tenant, type)` partition has its own mutex, so operations on different
//! partitions proceed independently while same-partition operations appear
//! serialized. Partitions are created lazily on first write and are never
//! removed, even when emptied.

use cachet_core::{RecordId, TenantId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use crate::error::{StoreError, StoreResult};
use crate::query::TagQuery;
use crate::record::TagRecord;
use crate::store::RecordStore;

/// id -> serialized record envelope.
type Partition = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PartitionKey {
    tenant: TenantId,
    record_type: String,
}

impl PartitionKey {
    fn new(tenant: &TenantId, record_type: &str) -> Self {
        Self {
            tenant: tenant.clone(),
            record_type: record_type.to_string(),
        }
    }
}

/// In-memory implementation of [`RecordStore`].
///
/// Suitable for development and testing. Each instance is fully isolated;
/// tests can construct as many as they need without shared-state resets.
#[derive(Default)]
pub struct InMemoryRecordStore {
    partitions: RwLock<HashMap<PartitionKey, Arc<Mutex<Partition>>>>,
}

fn lock_partition(partition: &Mutex<Partition>) -> StoreResult<MutexGuard<'_, Partition>> {
    partition
        .lock()
        .map_err(|e| StoreError::Poisoned(e.to_string()))
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an existing partition without creating it. Read and mutate
    /// paths other than `create` must not allocate partitions.
    fn partition(
        &self,
        tenant: &TenantId,
        record_type: &str,
    ) -> StoreResult<Option<Arc<Mutex<Partition>>>> {
        let partitions = self
            .partitions
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        Ok(partitions
            .get(&PartitionKey::new(tenant, record_type))
            .cloned())
    }

    /// Look up a partition, creating it if absent (first write).
    fn partition_or_create(
        &self,
        tenant: &TenantId,
        record_type: &str,
    ) -> StoreResult<Arc<Mutex<Partition>>> {
        if let Some(partition) = self.partition(tenant, record_type)? {
            return Ok(partition);
        }
        let mut partitions = self
            .partitions
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        Ok(partitions
            .entry(PartitionKey::new(tenant, record_type))
            .or_insert_with(|| Arc::new(Mutex::new(Partition::new())))
            .clone())
    }

    fn not_found(record_type: &str, id: &RecordId) -> StoreError {
        StoreError::NotFound {
            record_type: record_type.to_string(),
            id: id.clone(),
        }
    }

    /// Number of records in a partition (for inspection and tests).
    pub fn count(&self, tenant: &TenantId, record_type: &str) -> StoreResult<usize> {
        match self.partition(tenant, record_type)? {
            Some(partition) => Ok(lock_partition(&partition)?.len()),
            None => Ok(0),
        }
    }
}

impl RecordStore for InMemoryRecordStore {
    fn create(&self, tenant: &TenantId, record: &TagRecord) -> StoreResult<()> {
        let stored = record.to_stored()?;
        let partition = self.partition_or_create(tenant, &record.record_type)?;
        let mut entries = lock_partition(&partition)?;

        if entries.contains_key(record.id.as_str()) {
            return Err(StoreError::Duplicate {
                record_type: record.record_type.clone(),
                id: record.id.clone(),
            });
        }
        entries.insert(record.id.as_str().to_string(), stored);
        Ok(())
    }

    fn update(&self, tenant: &TenantId, record: &TagRecord) -> StoreResult<()> {
        let stored = record.to_stored()?;
        let partition = self
            .partition(tenant, &record.record_type)?
            .ok_or_else(|| Self::not_found(&record.record_type, &record.id))?;
        let mut entries = lock_partition(&partition)?;

        if !entries.contains_key(record.id.as_str()) {
            return Err(Self::not_found(&record.record_type, &record.id));
        }
        entries.insert(record.id.as_str().to_string(), stored);
        Ok(())
    }

    fn delete(&self, tenant: &TenantId, record: &TagRecord) -> StoreResult<()> {
        self.delete_by_id(tenant, &record.record_type, &record.id)
    }

    fn delete_by_id(
        &self,
        tenant: &TenantId,
        record_type: &str,
        id: &RecordId,
    ) -> StoreResult<()> {
        let partition = self
            .partition(tenant, record_type)?
            .ok_or_else(|| Self::not_found(record_type, id))?;
        let mut entries = lock_partition(&partition)?;

        entries
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| Self::not_found(record_type, id))
    }

    fn get_by_id(
        &self,
        tenant: &TenantId,
        record_type: &str,
        id: &RecordId,
    ) -> StoreResult<TagRecord> {
        let partition = self
            .partition(tenant, record_type)?
            .ok_or_else(|| Self::not_found(record_type, id))?;
        let entries = lock_partition(&partition)?;

        let stored = entries
            .get(id.as_str())
            .ok_or_else(|| Self::not_found(record_type, id))?;
        TagRecord::from_stored(stored)
    }

    fn get_all(&self, tenant: &TenantId, record_type: &str) -> StoreResult<Vec<TagRecord>> {
        match self.partition(tenant, record_type)? {
            Some(partition) => {
                let entries = lock_partition(&partition)?;
                entries.values().map(|s| TagRecord::from_stored(s)).collect()
            }
            None => Ok(Vec::new()),
        }
    }

    fn find_by_query(
        &self,
        tenant: &TenantId,
        record_type: &str,
        query: &TagQuery,
    ) -> StoreResult<Vec<TagRecord>> {
        let all = self.get_all(tenant, record_type)?;
        Ok(all.into_iter().filter(|r| query.matches(&r.tags)).collect())
    }
}
