//! Signed HTTP request (SHR) tokens bound to the device key.

use std::sync::Arc;

use devicepop_providers::{
    crypto::{Signer, SignerError},
    jwk::PublicKeyJwk,
    jwt::{mapper::string_to_b64url_string, model::JWTHeader, Jwt, SignatureProvider},
    key_storage::model::KeyEntry,
};
use serde::{Deserialize, Serialize};
use url::Url;

use super::DeviceKeyManager;
use crate::{
    model::SigningAlgorithm,
    service::error::{log_failure, DevicePopError},
};

const SHR_ALGORITHM: &str = "RS256";
const SHR_TYPE: &str = "JWT";

/// SHR payload. Field order is the serialized claim order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedHttpRequestClaims {
    #[serde(rename = "at", default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(rename = "ts")]
    pub timestamp: i64,
    /// Request authority as written in the URL, including userinfo and port.
    #[serde(rename = "u")]
    pub host: String,
    pub cnf: Confirmation,
    #[serde(rename = "p", default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(rename = "m", default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_claims: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    /// The public device key, with `kid` set to its thumbprint.
    pub jwk: PublicKeyJwk,
}

#[derive(Serialize)]
struct RequestConfirmation<'a> {
    kid: &'a str,
}

impl DeviceKeyManager {
    /// Mints an SHR embedding `access_token`, signed with the device key.
    ///
    /// `timestamp` is in seconds since the Unix epoch. `request_url` supplies `u` and `p`
    /// exactly as written, so an explicit default port is kept. Empty optional values are
    /// omitted from the token.
    pub fn mint_signed_access_token(
        &self,
        http_method: Option<&str>,
        timestamp: i64,
        request_url: &str,
        access_token: &str,
        nonce: Option<&str>,
        client_claims: Option<&str>,
    ) -> Result<String, DevicePopError> {
        self.mint(
            http_method,
            timestamp,
            request_url,
            Some(access_token),
            nonce,
            client_claims,
        )
        .inspect_err(log_failure("mint_signed_access_token"))
    }

    /// Mints an SHR without an access token.
    pub fn mint_signed_http_request(
        &self,
        http_method: Option<&str>,
        timestamp: i64,
        request_url: &str,
        nonce: Option<&str>,
        client_claims: Option<&str>,
    ) -> Result<String, DevicePopError> {
        self.mint(
            http_method,
            timestamp,
            request_url,
            None,
            nonce,
            client_claims,
        )
        .inspect_err(log_failure("mint_signed_http_request"))
    }

    /// Base64url (no padding) of `{"kid":"<thumbprint>"}`, sent as `req_cnf` when
    /// requesting a PoP token.
    pub fn get_request_confirmation(&self) -> Result<String, DevicePopError> {
        self.request_confirmation()
            .inspect_err(log_failure("get_request_confirmation"))
    }

    fn request_confirmation(&self) -> Result<String, DevicePopError> {
        let entry = self.entry()?;
        let thumbprint = self.thumbprint(&entry)?;

        let json = serde_json::to_string(&RequestConfirmation { kid: &thumbprint })
            .map_err(|e| DevicePopError::JsonConstructionFailed(e.to_string()))?;

        string_to_b64url_string(&json)
            .map_err(|e| DevicePopError::JsonConstructionFailed(e.to_string()))
    }

    fn mint(
        &self,
        http_method: Option<&str>,
        timestamp: i64,
        request_url: &str,
        access_token: Option<&str>,
        nonce: Option<&str>,
        client_claims: Option<&str>,
    ) -> Result<String, DevicePopError> {
        let target = RequestTarget::parse(request_url)?;
        let entry = self.entry()?;
        let thumbprint = self.thumbprint(&entry)?;

        let claims = SignedHttpRequestClaims {
            access_token: non_empty(access_token),
            timestamp,
            host: target.authority.to_owned(),
            cnf: Confirmation {
                jwk: PublicKeyJwk::from_rsa(entry.public_key())?.with_key_id(thumbprint.clone()),
            },
            path: non_empty(Some(target.path)),
            http_method: non_empty(http_method),
            nonce: non_empty(nonce),
            client_claims: non_empty(client_claims),
        };

        let header = JWTHeader {
            algorithm: SHR_ALGORITHM.to_owned(),
            signature_type: Some(SHR_TYPE.to_owned()),
            key_id: Some(thumbprint),
            certificate_chain: None,
        };

        let signer = EntrySigner {
            signer: self.signer(SigningAlgorithm::Sha256WithRsa)?,
            entry: &entry,
        };

        Ok(Jwt::new(header, claims).tokenize(&signer)?)
    }
}

struct EntrySigner<'a> {
    signer: Arc<dyn Signer>,
    entry: &'a KeyEntry,
}

impl SignatureProvider for EntrySigner<'_> {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        self.signer.sign(message, self.entry.private_key())
    }
}

/// Authority and path of a request URL, sliced from the URL text.
///
/// `url::Url` normalizes away default ports and turns an empty path into `/`, so both
/// parts are taken from the input once it has parsed as a URL with a host.
struct RequestTarget<'a> {
    authority: &'a str,
    path: &'a str,
}

impl<'a> RequestTarget<'a> {
    fn parse(request_url: &'a str) -> Result<Self, DevicePopError> {
        let request_url = request_url.trim();
        let url = Url::parse(request_url).map_err(|e| {
            DevicePopError::ArgumentInvalid(format!("Invalid URL `{request_url}`: {e}"))
        })?;

        let no_host = || DevicePopError::ArgumentInvalid(format!("URL `{url}` has no host"));
        if url.host_str().map_or(true, str::is_empty) {
            return Err(no_host());
        }

        let (_, rest) = request_url.split_once("://").ok_or_else(no_host)?;
        let (authority, rest) = rest.split_at(rest.find(['/', '?', '#']).unwrap_or(rest.len()));
        let path = &rest[..rest.find(['?', '#']).unwrap_or(rest.len())];

        Ok(Self { authority, path })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|value| !value.is_empty()).map(str::to_owned)
}
