use thiserror::Error;

#[derive(Debug, Error)]
pub enum CachetError {
    #[error("store error: {0}")]
    Store(String),

    #[error("credential error: {0}")]
    Credential(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type CachetResult<T> = Result<T, CachetError>;
