use thiserror::Error;

#[derive(Error, Debug)]
pub enum EthUtilsError {
    #[error("Invalid keypath: {0}")]
    InvalidKeypath(String),

    #[error("Unsupported network: chain id {0}")]
    UnsupportedNetwork(u64),

    #[error("Invalid hex in {field}: {value:?}")]
    InvalidHex { field: &'static str, value: String },

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid firmware binding: {0}")]
    InvalidBinding(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("ethTx data sanitization failed: {0}")]
    SanitizationFailed(#[source] Box<EthUtilsError>),
}

impl EthUtilsError {
    /// The wrapped failure for `SanitizationFailed`, `None` for every other kind.
    pub fn cause(&self) -> Option<&EthUtilsError> {
        match self {
            EthUtilsError::SanitizationFailed(cause) => Some(cause),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EthUtilsError>;
