//! The single error type surfaced by the device key manager.
//!
//! Each variant is one stable failure kind callers can branch on, e.g. re-provision the
//! device key on [`DevicePopError::KeyMissing`]. Low-level causes are classified where
//! they occur and carried along as the source or message.

use devicepop_providers::{
    crypto::{CipherError, SignerError},
    jwk::JwkError,
    jwt::JwtError,
    key_storage::error::KeyStorageError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DevicePopError {
    #[error("Key storage unavailable: `{0}`")]
    StorageUnavailable(#[source] KeyStorageError),
    #[error("Unsupported key size: `{0}`")]
    KeySizeUnsupported(#[source] KeyStorageError),
    #[error("Algorithm unsupported: `{0}`")]
    AlgorithmUnsupported(String),
    #[error("Padding unsupported: `{0}`")]
    PaddingUnsupported(String),
    #[error("Secure hardware provider unavailable: `{0}`")]
    HardwareProviderUnavailable(#[source] KeyStorageError),
    #[error("Invalid algorithm parameters: `{0}`")]
    InvalidAlgorithmParameters(String),
    #[error("Invalid key: `{0}`")]
    InvalidKey(String),
    #[error("Private key missing: `{0}`")]
    KeyMissing(String),
    #[error("Invalid protection parameters: `{0}`")]
    ProtectionParametersInvalid(#[source] KeyStorageError),
    #[error("Signing failed: `{0}`")]
    SigningFailure(#[source] SignerError),
    #[error("Thumbprint computation failed: `{0}`")]
    ThumbprintComputationFailure(String),
    #[error("Bad padding: `{0}`")]
    EncryptionPaddingViolation(String),
    #[error("Illegal block size: `{0}`")]
    BlockSizeMismatch(String),
    #[error("Cipher failure: `{0}`")]
    CipherFailure(String),
    #[error("JSON construction failed: `{0}`")]
    JsonConstructionFailed(String),
    #[error("JWT signing failed: `{0}`")]
    JwtSigningFailure(#[source] JwtError),
    #[error("Certificate encoding error: `{0}`")]
    CertificateEncodingError(String),
    #[error("Unrecognized or unsupported key format: `{0}`")]
    UnknownExportFormat(String),
    #[error("Invalid argument: `{0}`")]
    ArgumentInvalid(String),
    #[error("Device certificate signing failed: `{0}`")]
    DeviceCertificateSigning(#[source] SignerError),
    #[error("Interrupted while waiting on callback")]
    InterruptedWhileWaiting,
    /// Reserved: no operation currently waits with a deadline.
    #[error("Timed out")]
    TimedOut,
    #[error("Worker pool unavailable: `{0}`")]
    WorkerPoolUnavailable(#[source] std::io::Error),
}

impl DevicePopError {
    /// Stable textual code of the failure kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::StorageUnavailable(_) => "keystore_not_initialized",
            Self::KeySizeUnsupported(_) => "bad_key_size",
            Self::AlgorithmUnsupported(_) => "no_such_algorithm",
            Self::PaddingUnsupported(_) => "no_such_padding",
            Self::HardwareProviderUnavailable(_) => "hardware_keystore_unavailable",
            Self::InvalidAlgorithmParameters(_) => "invalid_algorithm_parameter",
            Self::InvalidKey(_) => "invalid_key",
            Self::KeyMissing(_) => "invalid_key_missing",
            Self::ProtectionParametersInvalid(_) => "protection_params_invalid",
            Self::SigningFailure(_) => "signing_failure",
            Self::ThumbprintComputationFailure(_) => "thumbprint_computation_failure",
            Self::EncryptionPaddingViolation(_) => "bad_padding",
            Self::BlockSizeMismatch(_) => "invalid_block_size",
            Self::CipherFailure(_) => "cipher_failure",
            Self::JsonConstructionFailed(_) => "json_construction_failed",
            Self::JwtSigningFailure(_) => "jwt_signing_failure",
            Self::CertificateEncodingError(_) => "certificate_encoding_error",
            Self::UnknownExportFormat(_) => "unknown_export_format",
            Self::ArgumentInvalid(_) => "invalid_argument",
            Self::DeviceCertificateSigning(_) => "device_certificate_signing_failure",
            Self::InterruptedWhileWaiting => "operation_interrupted",
            Self::TimedOut => "timed_out",
            Self::WorkerPoolUnavailable(_) => "worker_pool_unavailable",
        }
    }
}

impl From<KeyStorageError> for DevicePopError {
    fn from(error: KeyStorageError) -> Self {
        match error {
            KeyStorageError::NotFound(alias) => Self::KeyMissing(alias),
            KeyStorageError::Unavailable(_) => Self::StorageUnavailable(error),
            KeyStorageError::ProtectionParamsInvalid(_) => Self::ProtectionParametersInvalid(error),
            KeyStorageError::KeySizeUnsupported(_) => Self::KeySizeUnsupported(error),
            KeyStorageError::AlgorithmUnavailable(message) => Self::AlgorithmUnsupported(message),
            KeyStorageError::ProviderUnavailable(_) => Self::HardwareProviderUnavailable(error),
            KeyStorageError::InvalidParameters(message) => {
                Self::InvalidAlgorithmParameters(message)
            }
            KeyStorageError::Thumbprint(message) => Self::ThumbprintComputationFailure(message),
        }
    }
}

impl From<SignerError> for DevicePopError {
    fn from(error: SignerError) -> Self {
        match error {
            SignerError::InvalidKey(message) => Self::InvalidKey(message),
            SignerError::CouldNotExtractKeyPair => Self::InvalidKey(error.to_string()),
            SignerError::MissingKey => Self::KeyMissing(error.to_string()),
            SignerError::MissingAlgorithm(algorithm) => Self::AlgorithmUnsupported(algorithm),
            SignerError::CryptoError(provider) => Self::AlgorithmUnsupported(provider.to_string()),
            error => Self::SigningFailure(error),
        }
    }
}

impl From<CipherError> for DevicePopError {
    fn from(error: CipherError) -> Self {
        match error {
            CipherError::InvalidKey(message) => Self::InvalidKey(message),
            CipherError::Failed(message) => Self::CipherFailure(message),
            CipherError::InvalidParameters(message) => Self::InvalidAlgorithmParameters(message),
            CipherError::BlockSize(message) => Self::BlockSizeMismatch(message),
            CipherError::BadPadding => Self::EncryptionPaddingViolation(error.to_string()),
        }
    }
}

impl From<JwkError> for DevicePopError {
    fn from(error: JwkError) -> Self {
        match error {
            JwkError::Json(message) => Self::JsonConstructionFailed(message),
            error => Self::ThumbprintComputationFailure(error.to_string()),
        }
    }
}

impl From<JwtError> for DevicePopError {
    fn from(error: JwtError) -> Self {
        Self::JwtSigningFailure(error)
    }
}

/// Logs a classified failure; meant for `Result::inspect_err`.
pub(crate) fn log_failure(method: &'static str) -> impl FnOnce(&DevicePopError) {
    move |error| {
        tracing::error!(
            method,
            code = error.error_code(),
            %error,
            "Device key operation failed"
        );
    }
}
