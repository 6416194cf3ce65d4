//! `struct`s and `enum`s for key storage.

use std::{fmt, sync::Arc};

use rsa::{RsaPrivateKey, RsaPublicKey};
use time::{Duration, OffsetDateTime};
use x509_cert::Certificate;

/// Where key operations take place.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeySecurity {
    Hardware { attested: bool },
    Software,
    Unknown,
}

/// Parameters for generating the device keypair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyGenerationParams {
    pub key_size: usize,
    /// Distinguished name used as both subject and issuer, e.g. `CN=device-pop`.
    pub common_name: String,
    pub certificate_validity: Duration,
}

/// The device keypair with its self-signed certificate.
///
/// The private key is only reachable through [`KeyEntry::private_key`], so that it is
/// borrowed for the duration of a single operation. It is never serialized and the
/// `Debug` output omits it.
#[derive(Clone)]
pub struct KeyEntry {
    private_key: Arc<RsaPrivateKey>,
    public_key: RsaPublicKey,
    certificate_chain: Vec<Certificate>,
    created_at: OffsetDateTime,
    security: KeySecurity,
}

impl KeyEntry {
    pub fn new(
        private_key: RsaPrivateKey,
        certificate_chain: Vec<Certificate>,
        created_at: OffsetDateTime,
        security: KeySecurity,
    ) -> Self {
        Self {
            public_key: private_key.to_public_key(),
            private_key: Arc::new(private_key),
            certificate_chain,
            created_at,
            security,
        }
    }

    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    pub fn certificate_chain(&self) -> &[Certificate] {
        &self.certificate_chain
    }

    /// The leaf certificate carrying the entry's public key.
    pub fn certificate(&self) -> Option<&Certificate> {
        self.certificate_chain.first()
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn security(&self) -> KeySecurity {
        self.security
    }
}

impl fmt::Debug for KeyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyEntry")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .field("certificate_chain_len", &self.certificate_chain.len())
            .field("created_at", &self.created_at)
            .field("security", &self.security)
            .finish()
    }
}
