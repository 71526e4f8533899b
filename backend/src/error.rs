
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoalesceError {
    #[error("Provider request failed: {0}")]
    Request(String),

    #[error("Provider response decode failed: {0}")]
    Decode(String),

    #[error("Failed to fetch data from all APIs")]
    AllProvidersFailed,

    #[error("Unknown coalescing strategy: {0}")]
    UnknownStrategy(String),

    #[error("Cannot coalesce an empty list of values")]
    EmptyValues,
}

pub type Result<T> = std::result::Result<T, CoalesceError>;
