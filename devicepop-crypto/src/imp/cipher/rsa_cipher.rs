use rsa::{traits::PublicKeyParts, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};

use crate::{
    imp::{digest::DigestAlgorithm, signer::is_key_error},
    Cipher, CipherError, CipherParameters,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RsaPadding {
    Pkcs1v15,
    Oaep(DigestAlgorithm),
}

/// RSA encryption. Input longer than a single block is split into consecutive blocks,
/// each encrypted independently; the ciphertext is the concatenation of modulus-sized
/// blocks.
pub struct RsaCipher {
    padding: RsaPadding,
}

impl RsaCipher {
    pub fn new(padding: RsaPadding) -> Self {
        Self { padding }
    }

    fn max_block_len(&self, modulus_len: usize) -> Result<usize, CipherError> {
        let overhead = match self.padding {
            RsaPadding::Pkcs1v15 => 11,
            RsaPadding::Oaep(digest) => 2 * digest.output_len() + 2,
        };

        modulus_len
            .checked_sub(overhead)
            .filter(|len| *len > 0)
            .ok_or_else(|| {
                CipherError::InvalidKey(format!(
                    "modulus of {modulus_len} bytes is too small for {:?}",
                    self.padding
                ))
            })
    }

    fn label<'a>(
        &self,
        parameters: Option<&'a CipherParameters>,
    ) -> Result<Option<&'a str>, CipherError> {
        match (self.padding, parameters) {
            (_, None) => Ok(None),
            (RsaPadding::Oaep(_), Some(CipherParameters::Oaep { label })) => Ok(label.as_deref()),
            (RsaPadding::Pkcs1v15, Some(parameters)) => Err(CipherError::InvalidParameters(
                format!("{parameters:?} cannot be used with PKCS#1 v1.5 padding"),
            )),
        }
    }
}

impl Cipher for RsaCipher {
    fn encrypt(
        &self,
        plaintext: &[u8],
        public_key: &RsaPublicKey,
        parameters: Option<&CipherParameters>,
    ) -> Result<Vec<u8>, CipherError> {
        let modulus_len = public_key.size();
        let block_len = self.max_block_len(modulus_len)?;
        let label = self.label(parameters)?;

        // an empty message still produces one block
        let blocks: Vec<&[u8]> = if plaintext.is_empty() {
            vec![plaintext]
        } else {
            plaintext.chunks(block_len).collect()
        };

        let mut rng = rand::thread_rng();
        let mut ciphertext = Vec::with_capacity(blocks.len() * modulus_len);
        for block in blocks {
            let encrypted = match self.padding {
                RsaPadding::Pkcs1v15 => public_key.encrypt(&mut rng, Pkcs1v15Encrypt, block),
                RsaPadding::Oaep(digest) => {
                    public_key.encrypt(&mut rng, digest.oaep(label), block)
                }
            }
            .map_err(map_encrypt_error)?;

            ciphertext.extend_from_slice(&encrypted);
        }

        Ok(ciphertext)
    }

    fn decrypt(
        &self,
        ciphertext: &[u8],
        private_key: &RsaPrivateKey,
        parameters: Option<&CipherParameters>,
    ) -> Result<Vec<u8>, CipherError> {
        let modulus_len = private_key.size();
        self.max_block_len(modulus_len)?;
        let label = self.label(parameters)?;

        if ciphertext.is_empty() || ciphertext.len() % modulus_len != 0 {
            return Err(CipherError::BlockSize(format!(
                "ciphertext of {} bytes is not a multiple of {modulus_len}",
                ciphertext.len()
            )));
        }

        let mut plaintext = Vec::with_capacity(ciphertext.len());
        for block in ciphertext.chunks(modulus_len) {
            let decrypted = match self.padding {
                RsaPadding::Pkcs1v15 => private_key.decrypt(Pkcs1v15Encrypt, block),
                RsaPadding::Oaep(digest) => private_key.decrypt(digest.oaep(label), block),
            }
            .map_err(map_decrypt_error)?;

            plaintext.extend_from_slice(&decrypted);
        }

        Ok(plaintext)
    }
}

fn map_encrypt_error(error: rsa::Error) -> CipherError {
    match error {
        rsa::Error::MessageTooLong => CipherError::BlockSize(error.to_string()),
        rsa::Error::LabelTooLong => CipherError::InvalidParameters(error.to_string()),
        error if is_key_error(&error) => CipherError::InvalidKey(error.to_string()),
        error => CipherError::Failed(error.to_string()),
    }
}

fn map_decrypt_error(error: rsa::Error) -> CipherError {
    match error {
        rsa::Error::Decryption => CipherError::BadPadding,
        rsa::Error::LabelTooLong => CipherError::InvalidParameters(error.to_string()),
        error if is_key_error(&error) => CipherError::InvalidKey(error.to_string()),
        error => CipherError::Failed(error.to_string()),
    }
}
