//! Hashing, signing and encryption of raw bytes with RSA key material.
//!
//! This crate holds the cryptographic primitives only. It knows nothing about key
//! storage, JWTs or the device key lifecycle; callers hand it a key and bytes and get
//! bytes back. Keeping it separate makes it possible to swap or certify the primitives
//! without touching the rest of the stack.

use std::sync::Arc;

use rsa::{RsaPrivateKey, RsaPublicKey};
use thiserror::Error;

pub mod imp;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum CryptoProviderError {
    #[error("Missing hasher: `{0}`")]
    MissingHasher(String),
    #[error("Missing signer: `{0}`")]
    MissingSigner(String),
    #[error("Missing cipher: `{0}`")]
    MissingCipher(String),
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum HasherError {
    #[error("Could not hash")]
    CouldNotHash,
    #[error("Crypto provider error: `{0}`")]
    CryptoError(#[from] CryptoProviderError),
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum SignerError {
    #[error("Crypto provider error: `{0}`")]
    CryptoError(#[from] CryptoProviderError),
    #[error("Could not sign: `{0}`")]
    CouldNotSign(String),
    #[error("Could not extract keypair")]
    CouldNotExtractKeyPair,
    #[error("Invalid key: `{0}`")]
    InvalidKey(String),
    #[error("Could not verify: `{0}`")]
    CouldNotVerify(String),
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Missing algorithm `{0}`")]
    MissingAlgorithm(String),
    #[error("Missing key")]
    MissingKey,
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum CipherError {
    #[error("Invalid key: `{0}`")]
    InvalidKey(String),
    #[error("Invalid cipher parameters: `{0}`")]
    InvalidParameters(String),
    #[error("Illegal block size: `{0}`")]
    BlockSize(String),
    #[error("Bad padding")]
    BadPadding,
    #[error("Cipher failure: `{0}`")]
    Failed(String),
}

/// Optional parameters for a cipher transformation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CipherParameters {
    /// OAEP encoding parameters. The digests are fixed by the transformation name.
    Oaep { label: Option<String> },
}

/// Provides hashing.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Hasher: Send + Sync {
    /// Hash, then base64url encode without padding.
    fn hash_base64(&self, input: &[u8]) -> Result<String, HasherError>;

    fn hash(&self, input: &[u8]) -> Result<Vec<u8>, HasherError>;
}

/// Generally the device key manager is used for signing with the managed key, but
/// direct signing and verification is possible here.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Signer: Send + Sync {
    /// Direct signing.
    fn sign(&self, input: &[u8], private_key: &RsaPrivateKey) -> Result<Vec<u8>, SignerError>;

    /// Direct signature verification.
    fn verify(
        &self,
        input: &[u8],
        signature: &[u8],
        public_key: &RsaPublicKey,
    ) -> Result<(), SignerError>;
}

/// Asymmetric encryption. Encrypts to the public key, decrypts with the private key.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Cipher: Send + Sync {
    fn encrypt<'a>(
        &self,
        plaintext: &[u8],
        public_key: &RsaPublicKey,
        parameters: Option<&'a CipherParameters>,
    ) -> Result<Vec<u8>, CipherError>;

    fn decrypt<'a>(
        &self,
        ciphertext: &[u8],
        private_key: &RsaPrivateKey,
        parameters: Option<&'a CipherParameters>,
    ) -> Result<Vec<u8>, CipherError>;
}

/// Return hasher, signer or cipher instances by their algorithm name.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait CryptoProvider: Send + Sync {
    /// Returns hasher instance.
    fn get_hasher(&self, hasher: &str) -> Result<Arc<dyn Hasher>, CryptoProviderError>;

    /// Returns signer instance, e.g. for `SHA256withRSA`.
    fn get_signer(&self, signer: &str) -> Result<Arc<dyn Signer>, CryptoProviderError>;

    /// Returns cipher instance, e.g. for `RSA/ECB/PKCS1Padding`.
    fn get_cipher(&self, cipher: &str) -> Result<Arc<dyn Cipher>, CryptoProviderError>;
}
