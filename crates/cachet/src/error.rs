use thiserror::Error;

/// Error type for the cachet root binary, aggregating errors from the
/// workspace crates.
#[derive(Debug, Error)]
pub enum RootError {
    #[error("store error: {0}")]
    Store(#[from] cachet_store::StoreError),

    #[error("credential error: {0}")]
    Credential(#[from] cachet_cred::CredError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for RootError {
    fn from(e: serde_json::Error) -> Self {
        RootError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for RootError {
    fn from(e: toml::de::Error) -> Self {
        RootError::Config(format!("TOML parse error: {}", e))
    }
}

pub type RootResult<T> = Result<T, RootError>;

#[cfg(test)]
mod tests {
    use super::*;
    use cachet_core::RecordId;

    #[test]
    fn test_root_error_from_store() {
        let store_err = cachet_store::StoreError::NotFound {
            record_type: "CredentialRecord".into(),
            id: RecordId::new("cred-1"),
        };
        let root_err: RootError = store_err.into();
        assert!(root_err.to_string().contains("cred-1"));
    }

    #[test]
    fn test_root_error_from_cred() {
        let cred_err = cachet_cred::CredError::InvalidRequest("issuer is required".into());
        let root_err: RootError = cred_err.into();
        assert!(root_err.to_string().contains("issuer is required"));
    }

    #[test]
    fn test_root_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let root_err: RootError = json_err.into();
        assert!(matches!(root_err, RootError::Serialization(_)));
    }

    #[test]
    fn test_root_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("= invalid").unwrap_err();
        let root_err: RootError = toml_err.into();
        assert!(matches!(root_err, RootError::Config(_)));
    }

    #[test]
    fn test_all_variants_have_display() {
        let errors: Vec<RootError> = vec![
            RootError::Config("config".into()),
            RootError::Serialization("json".into()),
            RootError::Internal("internal".into()),
        ];
        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }
}
