use crate::SignerError;

pub mod rsa_pkcs1;
pub mod rsa_pss;

pub(crate) fn map_sign_error(error: rsa::Error) -> SignerError {
    if is_key_error(&error) {
        SignerError::InvalidKey(error.to_string())
    } else {
        SignerError::CouldNotSign(error.to_string())
    }
}

pub(crate) fn is_key_error(error: &rsa::Error) -> bool {
    matches!(
        error,
        rsa::Error::InvalidModulus
            | rsa::Error::InvalidExponent
            | rsa::Error::InvalidPrime
            | rsa::Error::InvalidCoefficient
            | rsa::Error::ModulusTooLarge
            | rsa::Error::PublicExponentTooSmall
            | rsa::Error::PublicExponentTooLarge
    )
}
