use std::{collections::HashMap, sync::Arc};

use super::{Cipher, CryptoProvider, CryptoProviderError, Hasher, Signer};

pub mod cipher;
pub mod digest;
pub mod hasher;
pub mod signer;


#[derive(Clone)]
pub struct CryptoProviderImpl {
    hashers: HashMap<String, Arc<dyn Hasher>>,
    signers: HashMap<String, Arc<dyn Signer>>,
    ciphers: HashMap<String, Arc<dyn Cipher>>,
}

impl CryptoProviderImpl {
    pub fn new(
        hashers: HashMap<String, Arc<dyn Hasher>>,
        signers: HashMap<String, Arc<dyn Signer>>,
        ciphers: HashMap<String, Arc<dyn Cipher>>,
    ) -> Self {
        Self {
            hashers,
            signers,
            ciphers,
        }
    }
}

impl CryptoProvider for CryptoProviderImpl {
    fn get_hasher(&self, hasher: &str) -> Result<Arc<dyn Hasher>, CryptoProviderError> {
        Ok(self
            .hashers
            .get(hasher)
            .ok_or(CryptoProviderError::MissingHasher(hasher.to_owned()))?
            .clone())
    }

    fn get_signer(&self, signer: &str) -> Result<Arc<dyn Signer>, CryptoProviderError> {
        Ok(self
            .signers
            .get(signer)
            .ok_or(CryptoProviderError::MissingSigner(signer.to_owned()))?
            .clone())
    }

    fn get_cipher(&self, cipher: &str) -> Result<Arc<dyn Cipher>, CryptoProviderError> {
        Ok(self
            .ciphers
            .get(cipher)
            .ok_or(CryptoProviderError::MissingCipher(cipher.to_owned()))?
            .clone())
    }
}
