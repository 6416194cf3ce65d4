//! In-process software key store.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use rsa::RsaPrivateKey;
use time::OffsetDateTime;
use x509_cert::Certificate;

use crate::{
    jwk::rsa_thumbprint,
    key_storage::{
        error::KeyStorageError,
        model::{KeyEntry, KeyGenerationParams, KeySecurity},
        KeyStorage,
    },
};

mod certificate;

#[cfg(test)]
mod test;

/// Smallest modulus accepted for the device key, as advised by NIST.
pub const MIN_KEY_SIZE: usize = 2048;
pub const MAX_KEY_SIZE: usize = 4096;

/// Holds the entry in process memory. Key operations never leave the process, so the
/// entry reports [`KeySecurity::Software`].
pub struct SoftwareKeyStorage {
    alias: String,
    entry: RwLock<Option<KeyEntry>>,
}

impl SoftwareKeyStorage {
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            entry: RwLock::new(None),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Option<KeyEntry>>, KeyStorageError> {
        self.entry
            .read()
            .map_err(|e| KeyStorageError::Unavailable(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Option<KeyEntry>>, KeyStorageError> {
        self.entry
            .write()
            .map_err(|e| KeyStorageError::Unavailable(e.to_string()))
    }
}

impl KeyStorage for SoftwareKeyStorage {
    fn alias(&self) -> String {
        self.alias.clone()
    }

    fn exists(&self) -> bool {
        self.read().map(|entry| entry.is_some()).unwrap_or(false)
    }

    fn has_thumbprint(&self, thumbprint: &[u8]) -> bool {
        let Ok(guard) = self.read() else {
            return false;
        };
        let Some(entry) = guard.as_ref() else {
            return false;
        };

        rsa_thumbprint(entry.public_key())
            .map(|computed| computed.as_bytes() == thumbprint)
            .unwrap_or(false)
    }

    fn generate(&self, params: &KeyGenerationParams) -> Result<KeyEntry, KeyStorageError> {
        if !(MIN_KEY_SIZE..=MAX_KEY_SIZE).contains(&params.key_size) {
            return Err(KeyStorageError::KeySizeUnsupported(params.key_size));
        }

        let private_key = RsaPrivateKey::new(&mut rand::thread_rng(), params.key_size)
            .map_err(|e| KeyStorageError::InvalidParameters(e.to_string()))?;
        let certificate = certificate::self_signed(&private_key, params)?;

        let entry = KeyEntry::new(
            private_key,
            vec![certificate],
            OffsetDateTime::now_utc(),
            KeySecurity::Software,
        );

        *self.write()? = Some(entry.clone());
        tracing::debug!(
            alias = %self.alias,
            key_size = params.key_size,
            "Installed device key entry"
        );

        Ok(entry)
    }

    fn get_entry(&self) -> Result<KeyEntry, KeyStorageError> {
        self.read()?
            .clone()
            .ok_or_else(|| KeyStorageError::NotFound(self.alias.clone()))
    }

    fn get_creation_date(&self) -> Result<Option<OffsetDateTime>, KeyStorageError> {
        Ok(self.read()?.as_ref().map(KeyEntry::created_at))
    }

    fn get_certificate_chain(&self) -> Result<Vec<Certificate>, KeyStorageError> {
        Ok(self
            .read()?
            .as_ref()
            .map(|entry| entry.certificate_chain().to_vec())
            .unwrap_or_default())
    }

    fn clear(&self) -> bool {
        match self.write() {
            Ok(mut entry) => entry.take().is_some(),
            Err(_) => false,
        }
    }
}
