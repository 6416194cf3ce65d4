//! Enumerates errors related to key storage.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyStorageError {
    #[error("No key entry under alias `{0}`")]
    NotFound(String),
    #[error("Key storage unavailable: `{0}`")]
    Unavailable(String),
    #[error("Invalid protection parameters: `{0}`")]
    ProtectionParamsInvalid(String),
    #[error("Unsupported key size: {0}")]
    KeySizeUnsupported(usize),
    #[error("Key algorithm unavailable: `{0}`")]
    AlgorithmUnavailable(String),
    #[error("Key storage provider unavailable: `{0}`")]
    ProviderUnavailable(String),
    #[error("Invalid key generation parameters: `{0}`")]
    InvalidParameters(String),
    #[error("Thumbprint computation failed: `{0}`")]
    Thumbprint(String),
}
