use std::str::FromStr;

use rsa::{
    pkcs1v15::{Signature, SigningKey},
    RsaPrivateKey,
};
use sha2::Sha256;
use x509_cert::{
    builder::{Builder, CertificateBuilder, Profile},
    name::Name,
    serial_number::SerialNumber,
    spki::SubjectPublicKeyInfoOwned,
    time::Validity,
    Certificate,
};

use crate::key_storage::{error::KeyStorageError, model::KeyGenerationParams};

const SERIAL_NUMBER: [u8; 1] = [0x01];

/// Self-signed SHA256withRSA certificate for the given key, valid from now.
pub(super) fn self_signed(
    private_key: &RsaPrivateKey,
    params: &KeyGenerationParams,
) -> Result<Certificate, KeyStorageError> {
    let validity = std::time::Duration::try_from(params.certificate_validity)
        .map_err(|e| KeyStorageError::InvalidParameters(e.to_string()))
        .and_then(|duration| {
            Validity::from_now(duration)
                .map_err(|e| KeyStorageError::InvalidParameters(e.to_string()))
        })?;

    let subject = Name::from_str(&params.common_name)
        .map_err(|e| KeyStorageError::InvalidParameters(e.to_string()))?;
    let serial_number = SerialNumber::new(&SERIAL_NUMBER)
        .map_err(|e| KeyStorageError::InvalidParameters(e.to_string()))?;
    let public_key_info = SubjectPublicKeyInfoOwned::from_key(private_key.to_public_key())
        .map_err(|e| KeyStorageError::AlgorithmUnavailable(e.to_string()))?;

    let signer = SigningKey::<Sha256>::new(private_key.clone());

    CertificateBuilder::new(
        Profile::Root,
        serial_number,
        validity,
        subject,
        public_key_info,
        &signer,
    )
    .map_err(|e| KeyStorageError::InvalidParameters(e.to_string()))?
    .build::<Signature>()
    .map_err(|e| KeyStorageError::ProviderUnavailable(e.to_string()))
}
