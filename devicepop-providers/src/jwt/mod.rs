//! Compact JWS serialization: `base64url(header).base64url(payload).base64url(signature)`.

use std::fmt::Debug;

use ct_codecs::{Base64UrlSafeNoPadding, Decoder};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use self::{
    mapper::{bin_to_b64url_string, string_to_b64url_string},
    model::{DecomposedToken, JWTHeader},
};
use crate::crypto::SignerError;

#[cfg(test)]
mod test;

pub mod mapper;
pub mod model;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Could not format: `{0}`")]
    CouldNotFormat(String),
    #[error("Could not sign: `{0}`")]
    CouldNotSign(#[from] SignerError),
    #[error("Could not extract token: `{0}`")]
    CouldNotExtract(String),
}

/// Signs the JWS signing input (`header.payload`) with some key.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait SignatureProvider: Send + Sync {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError>;
}

#[derive(Debug)]
pub struct Jwt<Payload> {
    pub header: JWTHeader,
    pub payload: Payload,
}

impl<Payload: Serialize + Debug> Jwt<Payload> {
    pub fn new(header: JWTHeader, payload: Payload) -> Jwt<Payload> {
        Jwt { header, payload }
    }

    pub fn signing_input(&self) -> Result<String, JwtError> {
        let header_json = serde_json::to_string(&self.header)
            .map_err(|e| JwtError::CouldNotFormat(e.to_string()))?;
        let payload_json = serde_json::to_string(&self.payload)
            .map_err(|e| JwtError::CouldNotFormat(e.to_string()))?;

        Ok(format!(
            "{}.{}",
            string_to_b64url_string(&header_json)?,
            string_to_b64url_string(&payload_json)?,
        ))
    }

    pub fn tokenize(&self, signer: &dyn SignatureProvider) -> Result<String, JwtError> {
        let mut token = self.signing_input()?;

        let signature = signer.sign(token.as_bytes())?;

        token.push('.');
        token.push_str(&bin_to_b64url_string(&signature)?);

        Ok(token)
    }
}

impl<Payload: DeserializeOwned> Jwt<Payload> {
    pub fn decompose_token(token: &str) -> Result<DecomposedToken<Payload>, JwtError> {
        let token = token.trim_matches(|c: char| c == '.' || c.is_whitespace());
        let mut jwt_parts = token.splitn(3, '.');

        let (Some(header), Some(payload), Some(signature)) =
            (jwt_parts.next(), jwt_parts.next(), jwt_parts.next())
        else {
            return Err(JwtError::CouldNotExtract("Missing token part".to_owned()));
        };

        let header_decoded = Base64UrlSafeNoPadding::decode_to_vec(header, None)
            .map_err(|e| JwtError::CouldNotExtract(e.to_string()))?;
        let header_parsed: JWTHeader = serde_json::from_slice(&header_decoded)
            .map_err(|e| JwtError::CouldNotExtract(e.to_string()))?;

        let payload_decoded = Base64UrlSafeNoPadding::decode_to_vec(payload, None)
            .map_err(|e| JwtError::CouldNotExtract(e.to_string()))?;
        let payload_parsed: Payload = serde_json::from_slice(&payload_decoded)
            .map_err(|e| JwtError::CouldNotExtract(e.to_string()))?;

        let signature_decoded = Base64UrlSafeNoPadding::decode_to_vec(signature, None)
            .map_err(|e| JwtError::CouldNotExtract(e.to_string()))?;

        Ok(DecomposedToken {
            header: header_parsed,
            payload: payload_parsed,
            signing_input: format!("{header}.{payload}"),
            signature: signature_decoded,
        })
    }
}
