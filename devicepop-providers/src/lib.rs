//! Collaborator contracts and default implementations for the device key manager.
//!
//! * [`key_storage`]: the secure store holding the device keypair and its certificate.
//! * [`jwk`]: RSA public JWKs and their RFC 7638 thumbprints.
//! * [`jwt`]: compact JWS/JWT serialization.
//! * [`perf_marker`]: instrumentation sink for key generation.
//! * [`device_certificate`]: the signing capability of a registered device certificate.

pub mod device_certificate;
pub mod jwk;
pub mod jwt;
pub mod key_storage;
pub mod perf_marker;

pub use devicepop_crypto as crypto;
