//! Multi-tenant, tag-indexed record store.
//!
//! Records are opaque payloads with an id, a type discriminator, and a set of
//! queryable tags. Each record lives in exactly one `(tenant, type)`
//! partition; no operation or query crosses tenants. Reads always
//! reconstruct records from their serialized form, so callers can never
//! mutate stored state through a previously returned value.

pub mod error;
pub mod memory;
pub mod query;
pub mod record;
pub mod store;
pub mod tags;

pub use error::*;
pub use memory::InMemoryRecordStore;
pub use query::TagQuery;
pub use record::{RecordKind, TagRecord};
pub use store::{RecordStore, RecordStoreExt};
pub use tags::{TagScalar, TagValue, Tags};
