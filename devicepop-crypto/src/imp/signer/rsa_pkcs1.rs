use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};

use super::map_sign_error;
use crate::{imp::digest::DigestAlgorithm, Signer, SignerError};

/// RSASSA-PKCS1-v1_5, e.g. `SHA256withRSA`.
pub struct RsaPkcs1Signer {
    digest: DigestAlgorithm,
}

impl RsaPkcs1Signer {
    pub fn new(digest: DigestAlgorithm) -> Self {
        Self { digest }
    }
}

impl Signer for RsaPkcs1Signer {
    fn sign(&self, input: &[u8], private_key: &RsaPrivateKey) -> Result<Vec<u8>, SignerError> {
        let hashed = self.digest.digest(input);
        private_key
            .sign(self.digest.pkcs1v15(), &hashed)
            .map_err(map_sign_error)
    }

    fn verify(
        &self,
        input: &[u8],
        signature: &[u8],
        public_key: &RsaPublicKey,
    ) -> Result<(), SignerError> {
        let hashed = self.digest.digest(input);
        public_key
            .verify(self.digest.pkcs1v15(), &hashed, signature)
            .map_err(|_| SignerError::InvalidSignature)
    }
}

/// `NONEwithRSA`: the input is signed as-is, without a DigestInfo prefix.
pub struct RsaRawSigner {}

impl Signer for RsaRawSigner {
    fn sign(&self, input: &[u8], private_key: &RsaPrivateKey) -> Result<Vec<u8>, SignerError> {
        private_key
            .sign(Pkcs1v15Sign::new_unprefixed(), input)
            .map_err(map_sign_error)
    }

    fn verify(
        &self,
        input: &[u8],
        signature: &[u8],
        public_key: &RsaPublicKey,
    ) -> Result<(), SignerError> {
        public_key
            .verify(Pkcs1v15Sign::new_unprefixed(), input, signature)
            .map_err(|_| SignerError::InvalidSignature)
    }
}
