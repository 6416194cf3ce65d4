//! Lifecycle and use of the device proof-of-possession key.
//!
//! The manager owns no key material itself. Every operation reads the current entry from
//! the [`KeyStorage`] once and works on that snapshot, so a concurrent regeneration can
//! never mix the old and the new key within one operation.

use std::sync::Arc;

use devicepop_providers::{
    crypto::{Cipher, CryptoProvider, Signer},
    jwk::PublicKeyJwk,
    key_storage::{
        model::{KeyEntry, KeyGenerationParams},
        KeyStorage,
    },
    perf_marker::{PerfMarker, PerfMarkerSink},
};

use super::error::DevicePopError;
use crate::model::{CipherAlgorithm, SigningAlgorithm};

mod lifecycle;
mod signed_request;
mod signing;

pub use signed_request::{Confirmation, SignedHttpRequestClaims};


/// Name of the hasher the thumbprint is computed with.
pub(crate) const THUMBPRINT_HASHER: &str = "sha-256";

#[derive(Clone)]
pub struct DeviceKeyManager {
    storage: Arc<dyn KeyStorage>,
    crypto: Arc<dyn CryptoProvider>,
    markers: Arc<dyn PerfMarkerSink>,
    params: KeyGenerationParams,
}

impl DeviceKeyManager {
    pub fn new(
        storage: Arc<dyn KeyStorage>,
        crypto: Arc<dyn CryptoProvider>,
        markers: Arc<dyn PerfMarkerSink>,
        params: KeyGenerationParams,
    ) -> Self {
        Self {
            storage,
            crypto,
            markers,
            params,
        }
    }

    /// The underlying key store.
    pub fn storage(&self) -> &Arc<dyn KeyStorage> {
        &self.storage
    }

    fn entry(&self) -> Result<KeyEntry, DevicePopError> {
        self.storage.get_entry().map_err(|error| {
            tracing::warn!(alias = self.storage.alias(), %error, "Device key entry not readable");
            error.into()
        })
    }

    /// RFC 7638 thumbprint of `entry`'s public key.
    fn thumbprint(&self, entry: &KeyEntry) -> Result<String, DevicePopError> {
        let hasher = self
            .crypto
            .get_hasher(THUMBPRINT_HASHER)
            .map_err(|e| DevicePopError::AlgorithmUnsupported(e.to_string()))?;

        Ok(PublicKeyJwk::from_rsa(entry.public_key())?.thumbprint(hasher.as_ref())?)
    }

    fn signer(&self, algorithm: SigningAlgorithm) -> Result<Arc<dyn Signer>, DevicePopError> {
        self.crypto
            .get_signer(&algorithm.to_string())
            .map_err(|e| DevicePopError::AlgorithmUnsupported(e.to_string()))
    }

    fn cipher(&self, algorithm: CipherAlgorithm) -> Result<Arc<dyn Cipher>, DevicePopError> {
        self.crypto
            .get_cipher(&algorithm.to_string())
            .map_err(|e| DevicePopError::PaddingUnsupported(e.to_string()))
    }
}

/// Emits the start marker on creation and the end marker when dropped, on every path.
struct MarkerScope<'a> {
    sink: &'a dyn PerfMarkerSink,
    end: PerfMarker,
}

impl<'a> MarkerScope<'a> {
    fn enter(sink: &'a dyn PerfMarkerSink, start: PerfMarker, end: PerfMarker) -> Self {
        sink.mark(start);
        Self { sink, end }
    }
}

impl Drop for MarkerScope<'_> {
    fn drop(&mut self) {
        self.sink.mark(self.end);
    }
}
