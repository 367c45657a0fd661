use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("signing error: {0}")]
    Signing(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<CredError> for cachet_core::CachetError {
    fn from(e: CredError) -> Self {
        cachet_core::CachetError::Credential(e.to_string())
    }
}

impl From<serde_json::Error> for CredError {
    fn from(e: serde_json::Error) -> Self {
        CredError::Serialization(e.to_string())
    }
}

pub type CredResult<T> = Result<T, CredError>;
