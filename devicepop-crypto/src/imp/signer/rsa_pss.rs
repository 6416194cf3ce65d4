use rsa::{RsaPrivateKey, RsaPublicKey};

use super::map_sign_error;
use crate::{imp::digest::DigestAlgorithm, Signer, SignerError};

/// RSASSA-PSS with MGF1 over the same digest, e.g. `SHA256withRSA/PSS`.
pub struct RsaPssSigner {
    digest: DigestAlgorithm,
}

impl RsaPssSigner {
    pub fn new(digest: DigestAlgorithm) -> Self {
        Self { digest }
    }
}

impl Signer for RsaPssSigner {
    fn sign(&self, input: &[u8], private_key: &RsaPrivateKey) -> Result<Vec<u8>, SignerError> {
        let hashed = self.digest.digest(input);
        private_key
            .sign_with_rng(&mut rand::thread_rng(), self.digest.pss(), &hashed)
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
            .verify(self.digest.pss(), &hashed, signature)
            .map_err(|_| SignerError::InvalidSignature)
    }
}
