use cachet_core::RecordId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate record: {record_type} '{id}' already exists")]
    Duplicate { record_type: String, id: RecordId },

    #[error("record not found: {record_type} '{id}'")]
    NotFound { record_type: String, id: RecordId },

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("lock poisoned: {0}")]
    Poisoned(String),
}

impl From<StoreError> for cachet_core::CachetError {
    fn from(e: StoreError) -> Self {
        cachet_core::CachetError::Store(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_display_carries_type_and_id() {
        let err = StoreError::Duplicate {
            record_type: "CredentialRecord".into(),
            id: RecordId::new("cred-1"),
        };
        let msg = err.to_string();
        assert!(msg.contains("CredentialRecord"));
        assert!(msg.contains("cred-1"));
    }

    #[test]
    fn test_not_found_display_carries_type_and_id() {
        let err = StoreError::NotFound {
            record_type: "DidRecord".into(),
            id: RecordId::new("did:jwk:abc"),
        };
        let msg = err.to_string();
        assert!(msg.contains("DidRecord"));
        assert!(msg.contains("did:jwk:abc"));
    }

    #[test]
    fn test_into_cachet_error() {
        let err = StoreError::InvalidQuery("$or expects an array".into());
        let core: cachet_core::CachetError = err.into();
        assert!(core.to_string().contains("$or expects an array"));
    }
}
