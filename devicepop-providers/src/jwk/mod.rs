//! RSA public JWKs and RFC 7638 thumbprints.

use ct_codecs::{Base64UrlSafeNoPadding, Decoder, Encoder};
use rsa::{traits::PublicKeyParts, BigUint, RsaPublicKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::{imp::hasher::sha256::SHA256, Hasher, HasherError};

#[cfg(test)]
mod test;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum JwkError {
    #[error("Could not encode key material: `{0}`")]
    Encoding(String),
    #[error("Invalid key: `{0}`")]
    InvalidKey(String),
    #[error("Could not serialize JWK: `{0}`")]
    Json(String),
    #[error("Hasher error: `{0}`")]
    Hasher(#[from] HasherError),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kty")]
pub enum PublicKeyJwk {
    #[serde(rename = "RSA")]
    Rsa(PublicKeyJwkRsaData),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyJwkRsaData {
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub r#use: Option<String>,
    pub n: String,
    pub e: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
}

impl PublicKeyJwk {
    pub fn from_rsa(public_key: &RsaPublicKey) -> Result<Self, JwkError> {
        Ok(Self::Rsa(PublicKeyJwkRsaData {
            r#use: None,
            n: encode_uint(public_key.n())?,
            e: encode_uint(public_key.e())?,
            kid: None,
        }))
    }

    pub fn with_key_id(self, kid: String) -> Self {
        match self {
            Self::Rsa(data) => Self::Rsa(PublicKeyJwkRsaData {
                kid: Some(kid),
                ..data
            }),
        }
    }

    pub fn to_rsa(&self) -> Result<RsaPublicKey, JwkError> {
        let Self::Rsa(data) = self;
        RsaPublicKey::new(decode_uint(&data.n)?, decode_uint(&data.e)?)
            .map_err(|e| JwkError::InvalidKey(e.to_string()))
    }

    /// RFC 7638: hash of the required members only, lexicographically ordered, no
    /// whitespace.
    pub fn thumbprint(&self, hasher: &dyn Hasher) -> Result<String, JwkError> {
        let Self::Rsa(data) = self;

        // serde_json orders object keys, which yields the canonical e, kty, n sequence
        let canonical = serde_json::json!({
            "e": data.e,
            "kty": "RSA",
            "n": data.n,
        })
        .to_string();

        Ok(hasher.hash_base64(canonical.as_bytes())?)
    }

    pub fn to_json(&self) -> Result<String, JwkError> {
        serde_json::to_string(self).map_err(|e| JwkError::Json(e.to_string()))
    }
}

/// SHA-256 JWK thumbprint of an RSA public key.
pub fn rsa_thumbprint(public_key: &RsaPublicKey) -> Result<String, JwkError> {
    PublicKeyJwk::from_rsa(public_key)?.thumbprint(&SHA256 {})
}

fn encode_uint(value: &BigUint) -> Result<String, JwkError> {
    Base64UrlSafeNoPadding::encode_to_string(value.to_bytes_be())
        .map_err(|e| JwkError::Encoding(e.to_string()))
}

fn decode_uint(value: &str) -> Result<BigUint, JwkError> {
    Base64UrlSafeNoPadding::decode_to_vec(value, None)
        .map(|bytes| BigUint::from_bytes_be(&bytes))
        .map_err(|e| JwkError::Encoding(e.to_string()))
}
