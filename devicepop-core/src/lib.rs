//! The **device PoP** library manages a device-bound RSA keypair and uses it to prove
//! possession of the device when presenting tokens.
//!
//! ## Repository structure
//!
//! The library consists of three crates:
//!
//! * **Crypto**: RSA hashing, signing and encryption primitives behind a provider, kept
//!   apart so they can be swapped or certified independently.
//! * **Providers**
//!   * Key storage holding the device keypair and its self-signed certificate
//!   * JWK and JWT encoding
//!   * Performance markers
//!   * Device certificate contract
//! * **Core**
//!   * Device key manager: key lifecycle, signing, encryption, signed HTTP requests
//!   * Device PoP manager: the asynchronous entry points, run on a worker pool
//!   * Challenge-response signer for registered device certificates
//!
//! ## Getting started
//!
//! ```ignore rust
//! /// `None` initializes with the default configuration
//! let device_pop = DevicePop::new(None)?;
//!
//! let thumbprint = device_pop.manager.keys().generate_asymmetric_key()?;
//! let req_cnf = device_pop.manager.get_request_confirmation()?;
//! ```
//!
//! See `demos/signed_request_example` for a complete run.

use std::{collections::HashMap, sync::Arc, time::Duration};

use devicepop_crypto::{
    imp::{
        cipher::rsa_cipher::{RsaCipher, RsaPadding},
        digest::DigestAlgorithm,
        hasher::sha256::SHA256,
        signer::{
            rsa_pkcs1::{RsaPkcs1Signer, RsaRawSigner},
            rsa_pss::RsaPssSigner,
        },
        CryptoProviderImpl,
    },
    Cipher, CryptoProvider, Signer,
};
use devicepop_providers::{
    key_storage::{imp::software::SoftwareKeyStorage, KeyStorage},
    perf_marker::{PerfMarkerSink, TracingMarkerSink},
};

use config::DevicePopConfig;
use model::{CipherAlgorithm, SigningAlgorithm};
use service::{
    challenge_response::ChallengeResponseSigner,
    device_key_manager::{DeviceKeyManager, THUMBPRINT_HASHER},
    device_pop_manager::DevicePopManager, error::DevicePopError, worker_pool::WorkerPool,
};

pub mod config;
pub mod model;
pub mod service;

#[cfg(test)]
mod test;

pub struct DevicePop {
    pub manager: DevicePopManager,
    pub challenge_response: ChallengeResponseSigner,
    workers: Arc<WorkerPool>,
}

impl DevicePop {
    /// Device PoP over an in-process software key store.
    pub fn new(config: Option<DevicePopConfig>) -> Result<Self, DevicePopError> {
        let config = config.unwrap_or_default();
        let storage = Arc::new(SoftwareKeyStorage::new(config.key_alias.clone()));

        Self::with_storage(config, storage, Arc::new(TracingMarkerSink))
    }

    pub fn with_storage(
        config: DevicePopConfig,
        storage: Arc<dyn KeyStorage>,
        markers: Arc<dyn PerfMarkerSink>,
    ) -> Result<Self, DevicePopError> {
        let workers = Arc::new(WorkerPool::new(config.worker_pool_size)?);

        let keys = DeviceKeyManager::new(
            storage,
            rsa_crypto_provider(),
            markers,
            config.key_generation_params(),
        );

        Ok(Self {
            manager: DevicePopManager::new(keys, workers.clone()),
            challenge_response: ChallengeResponseSigner::new(),
            workers,
        })
    }

    /// Waits up to `timeout` for tasks still running on the worker pool.
    pub fn shutdown(self, timeout: Duration) {
        let Self { manager, workers, .. } = self;
        drop(manager);

        match Arc::try_unwrap(workers) {
            Ok(workers) => workers.shutdown(timeout),
            Err(_) => tracing::warn!("Worker pool still shared, not shut down"),
        }
    }
}

/// Crypto provider registering every supported RSA signer and cipher under its JCA name.
///
/// `MD5withRSA` and the SHA-1 OAEP transformations are not registered and fail as
/// unsupported.
pub fn rsa_crypto_provider() -> Arc<dyn CryptoProvider> {
    let signers: HashMap<String, Arc<dyn Signer>> = HashMap::from_iter(vec![
        (
            SigningAlgorithm::NoneWithRsa.to_string(),
            Arc::new(RsaRawSigner {}) as _,
        ),
        (
            SigningAlgorithm::Sha256WithRsa.to_string(),
            Arc::new(RsaPkcs1Signer::new(DigestAlgorithm::Sha256)) as _,
        ),
        (
            SigningAlgorithm::Sha384WithRsa.to_string(),
            Arc::new(RsaPkcs1Signer::new(DigestAlgorithm::Sha384)) as _,
        ),
        (
            SigningAlgorithm::Sha512WithRsa.to_string(),
            Arc::new(RsaPkcs1Signer::new(DigestAlgorithm::Sha512)) as _,
        ),
        (
            SigningAlgorithm::Sha256WithRsaPss.to_string(),
            Arc::new(RsaPssSigner::new(DigestAlgorithm::Sha256)) as _,
        ),
        (
            SigningAlgorithm::Sha384WithRsaPss.to_string(),
            Arc::new(RsaPssSigner::new(DigestAlgorithm::Sha384)) as _,
        ),
        (
            SigningAlgorithm::Sha512WithRsaPss.to_string(),
            Arc::new(RsaPssSigner::new(DigestAlgorithm::Sha512)) as _,
        ),
    ]);

    let ciphers: HashMap<String, Arc<dyn Cipher>> = HashMap::from_iter(vec![
        (
            CipherAlgorithm::RsaEcbPkcs1Padding.to_string(),
            Arc::new(RsaCipher::new(RsaPadding::Pkcs1v15)) as _,
        ),
        (
            CipherAlgorithm::RsaEcbOaepWithSha256AndMgf1Padding.to_string(),
            Arc::new(RsaCipher::new(RsaPadding::Oaep(DigestAlgorithm::Sha256))) as _,
        ),
        (
            CipherAlgorithm::RsaEcbOaepWithSha384AndMgf1Padding.to_string(),
            Arc::new(RsaCipher::new(RsaPadding::Oaep(DigestAlgorithm::Sha384))) as _,
        ),
        (
            CipherAlgorithm::RsaEcbOaepWithSha512AndMgf1Padding.to_string(),
            Arc::new(RsaCipher::new(RsaPadding::Oaep(DigestAlgorithm::Sha512))) as _,
        ),
    ]);

    Arc::new(CryptoProviderImpl::new(
        HashMap::from_iter(vec![(THUMBPRINT_HASHER.to_string(), Arc::new(SHA256 {}) as _)]),
        signers,
        ciphers,
    ))
}
