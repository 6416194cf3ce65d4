use time::OffsetDateTime;
use x509_cert::Certificate;

use self::{
    error::KeyStorageError,
    model::{KeyEntry, KeyGenerationParams},
};

pub mod error;
pub mod imp;
pub mod model;

/// A secure store holding at most one keypair + certificate entry under its alias.
///
/// Implementations must make reads and replacements of the entry atomic; callers add
/// no locking of their own.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait KeyStorage: Send + Sync {
    /// The alias the entry is stored under.
    fn alias(&self) -> String;

    fn exists(&self) -> bool;

    /// Whether the stored entry's RFC 7638 thumbprint equals the given UTF-8 bytes.
    fn has_thumbprint(&self, thumbprint: &[u8]) -> bool;

    /// Creates a new RSA keypair wrapped in a self-signed certificate and installs it,
    /// replacing any previous entry.
    fn generate(&self, params: &KeyGenerationParams) -> Result<KeyEntry, KeyStorageError>;

    fn get_entry(&self) -> Result<KeyEntry, KeyStorageError>;

    fn get_creation_date(&self) -> Result<Option<OffsetDateTime>, KeyStorageError>;

    fn get_certificate_chain(&self) -> Result<Vec<Certificate>, KeyStorageError>;

    /// Removes the entry. Returns whether there was one to remove.
    fn clear(&self) -> bool;
}
