//! Challenge-response JWS signed by a registered device certificate.
//!
//! The token header is `{"alg":"RS256","typ":"JWT","x5c":[<leaf>]}` and the payload is
//! `{"aud":..,"iat":..,"nonce":..}`. The device certificate key is unrelated to the
//! proof-of-possession key.

use ct_codecs::{Base64, Encoder};
use der::Encode;
use devicepop_providers::{
    crypto::SignerError,
    device_certificate::DeviceCertificate,
    jwt::{model::JWTHeader, Jwt, JwtError, SignatureProvider},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::error::{log_failure, DevicePopError};
use crate::model::SigningAlgorithm;


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeResponseClaims {
    #[serde(rename = "aud")]
    pub audience: String,
    #[serde(rename = "iat")]
    pub issued_at: i64,
    pub nonce: String,
}

pub struct ChallengeResponseSigner {
    clock: fn() -> OffsetDateTime,
}

impl Default for ChallengeResponseSigner {
    fn default() -> Self {
        Self::with_clock(OffsetDateTime::now_utc)
    }
}

impl ChallengeResponseSigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: fn() -> OffsetDateTime) -> Self {
        Self { clock }
    }

    /// Builds the response to a client certificate challenge. `nonce` and `audience`
    /// must be non-empty; they are checked before anything is signed.
    pub fn sign(
        &self,
        nonce: &str,
        audience: &str,
        device_certificate: &dyn DeviceCertificate,
    ) -> Result<String, DevicePopError> {
        self.build(nonce, audience, device_certificate)
            .inspect_err(log_failure("challenge_response_sign"))
    }

    fn build(
        &self,
        nonce: &str,
        audience: &str,
        device_certificate: &dyn DeviceCertificate,
    ) -> Result<String, DevicePopError> {
        if nonce.is_empty() {
            return Err(DevicePopError::ArgumentInvalid(
                "nonce must not be empty".to_owned(),
            ));
        }
        if audience.is_empty() {
            return Err(DevicePopError::ArgumentInvalid(
                "audience must not be empty".to_owned(),
            ));
        }

        let certificate = device_certificate
            .certificate()
            .to_der()
            .map_err(|e| DevicePopError::CertificateEncodingError(e.to_string()))?;
        let certificate = Base64::encode_to_string(certificate)
            .map_err(|e| DevicePopError::CertificateEncodingError(e.to_string()))?;

        let header = JWTHeader {
            algorithm: "RS256".to_owned(),
            signature_type: Some("JWT".to_owned()),
            key_id: None,
            certificate_chain: Some(vec![certificate]),
        };
        let claims = ChallengeResponseClaims {
            audience: audience.to_owned(),
            issued_at: (self.clock)().unix_timestamp(),
            nonce: nonce.to_owned(),
        };

        tracing::debug!(audience, "Signing client certificate challenge response");

        Jwt::new(header, claims)
            .tokenize(&CertificateSigner(device_certificate))
            .map_err(|error| match error {
                JwtError::CouldNotSign(error) => DevicePopError::DeviceCertificateSigning(error),
                error => DevicePopError::JsonConstructionFailed(error.to_string()),
            })
    }
}

struct CertificateSigner<'a>(&'a dyn DeviceCertificate);

impl SignatureProvider for CertificateSigner<'_> {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        self.0
            .sign(&SigningAlgorithm::Sha256WithRsa.to_string(), message)
    }
}
