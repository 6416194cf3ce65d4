//! A registered device certificate able to sign with its private key.
//!
//! The key behind the certificate is owned by whoever registered the device; it is
//! unrelated to the proof-of-possession key held in [`crate::key_storage`].

use x509_cert::Certificate;

use crate::crypto::SignerError;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait DeviceCertificate: Send + Sync {
    fn certificate(&self) -> Certificate;

    /// Signs `input` with the certificate's private key using a JCA algorithm name,
    /// e.g. `SHA256withRSA`.
    fn sign(&self, algorithm: &str, input: &[u8]) -> Result<Vec<u8>, SignerError>;
}
