use std::str::FromStr;

use ct_codecs::{Base64, Base64NoPadding, Decoder, Encoder};
use devicepop_providers::{crypto::SignerError, jwk::PublicKeyJwk};
use rsa::pkcs8::EncodePublicKey;

use super::DeviceKeyManager;
use crate::{
    model::{CipherSpec, PublicKeyFormat, SigningAlgorithm},
    service::error::{log_failure, DevicePopError},
};

impl DeviceKeyManager {
    /// Public key of the device key, either as standard base64 of the DER
    /// SubjectPublicKeyInfo or as public JWK JSON.
    pub fn get_public_key(&self, format: &str) -> Result<String, DevicePopError> {
        self.export_public_key(format)
            .inspect_err(log_failure("get_public_key"))
    }

    fn export_public_key(&self, format: &str) -> Result<String, DevicePopError> {
        let format = PublicKeyFormat::from_str(format)
            .map_err(|_| DevicePopError::UnknownExportFormat(format.to_owned()))?;
        let entry = self.entry()?;

        match format {
            PublicKeyFormat::X509SubjectPublicKeyInfo => {
                let der = entry
                    .public_key()
                    .to_public_key_der()
                    .map_err(|e| DevicePopError::InvalidKey(e.to_string()))?;
                Base64::encode_to_string(der.as_bytes())
                    .map_err(|e| DevicePopError::InvalidKey(e.to_string()))
            }
            PublicKeyFormat::Jwk => Ok(PublicKeyJwk::from_rsa(entry.public_key())?.to_json()?),
        }
    }

    pub fn sign(
        &self,
        algorithm: SigningAlgorithm,
        input: &[u8],
    ) -> Result<Vec<u8>, DevicePopError> {
        self.try_sign(algorithm, input)
            .inspect_err(log_failure("sign"))
    }

    fn try_sign(
        &self,
        algorithm: SigningAlgorithm,
        input: &[u8],
    ) -> Result<Vec<u8>, DevicePopError> {
        let entry = self.entry()?;
        let signer = self.signer(algorithm)?;

        Ok(signer.sign(input, entry.private_key())?)
    }

    /// Signs the UTF-8 bytes of `input`. Returns standard base64 with padding.
    pub fn sign_string(
        &self,
        algorithm: SigningAlgorithm,
        input: &str,
    ) -> Result<String, DevicePopError> {
        let signature = self.sign(algorithm, input.as_bytes())?;

        Base64::encode_to_string(signature)
            .map_err(|e| DevicePopError::SigningFailure(SignerError::CouldNotSign(e.to_string())))
    }

    /// Any failure, including a missing key, yields `false`.
    pub fn verify(&self, algorithm: SigningAlgorithm, input: &[u8], signature: &[u8]) -> bool {
        match self.try_verify(algorithm, input, signature) {
            Ok(()) => true,
            Err(DevicePopError::SigningFailure(SignerError::InvalidSignature)) => false,
            Err(error) => {
                tracing::warn!(
                    code = error.error_code(),
                    %error,
                    "Signature verification failed"
                );
                false
            }
        }
    }

    fn try_verify(
        &self,
        algorithm: SigningAlgorithm,
        input: &[u8],
        signature: &[u8],
    ) -> Result<(), DevicePopError> {
        let entry = self.entry()?;
        let signer = self.signer(algorithm)?;

        Ok(signer.verify(input, signature, entry.public_key())?)
    }

    /// Verifies a standard base64 signature over the UTF-8 bytes of `input`.
    pub fn verify_string(&self, algorithm: SigningAlgorithm, input: &str, signature: &str) -> bool {
        match Base64::decode_to_vec(signature, None) {
            Ok(signature) => self.verify(algorithm, input.as_bytes(), &signature),
            Err(error) => {
                tracing::warn!(%error, "Signature is not valid base64");
                false
            }
        }
    }

    /// Encrypts to the device public key. Input longer than one block is split into
    /// modulus-sized ciphertext blocks.
    pub fn encrypt(&self, spec: &CipherSpec, plaintext: &[u8]) -> Result<Vec<u8>, DevicePopError> {
        self.try_encrypt(spec, plaintext)
            .inspect_err(log_failure("encrypt"))
    }

    fn try_encrypt(&self, spec: &CipherSpec, plaintext: &[u8]) -> Result<Vec<u8>, DevicePopError> {
        let entry = self.entry()?;
        let cipher = self.cipher(spec.algorithm)?;

        Ok(cipher.encrypt(plaintext, entry.public_key(), spec.parameters.as_ref())?)
    }

    /// Encrypts the UTF-8 bytes of `plaintext`. Returns standard base64 without padding.
    pub fn encrypt_string(
        &self,
        spec: &CipherSpec,
        plaintext: &str,
    ) -> Result<String, DevicePopError> {
        let ciphertext = self.encrypt(spec, plaintext.as_bytes())?;

        Base64NoPadding::encode_to_string(ciphertext)
            .map_err(|e| DevicePopError::BlockSizeMismatch(e.to_string()))
    }

    pub fn decrypt(&self, spec: &CipherSpec, ciphertext: &[u8]) -> Result<Vec<u8>, DevicePopError> {
        self.try_decrypt(spec, ciphertext)
            .inspect_err(log_failure("decrypt"))
    }

    fn try_decrypt(&self, spec: &CipherSpec, ciphertext: &[u8]) -> Result<Vec<u8>, DevicePopError> {
        let entry = self.entry()?;
        let cipher = self.cipher(spec.algorithm)?;

        Ok(cipher.decrypt(ciphertext, entry.private_key(), spec.parameters.as_ref())?)
    }

    /// Inverse of [`DeviceKeyManager::encrypt_string`].
    pub fn decrypt_string(
        &self,
        spec: &CipherSpec,
        ciphertext: &str,
    ) -> Result<String, DevicePopError> {
        let ciphertext = Base64NoPadding::decode_to_vec(ciphertext, None)
            .map_err(|e| DevicePopError::BlockSizeMismatch(e.to_string()))
            .inspect_err(log_failure("decrypt_string"))?;

        let plaintext = self.decrypt(spec, &ciphertext)?;

        String::from_utf8(plaintext)
            .map_err(|e| DevicePopError::EncryptionPaddingViolation(e.to_string()))
            .inspect_err(log_failure("decrypt_string"))
    }
}
