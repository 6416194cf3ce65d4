use der::Encode;
use time::Duration;

use super::SoftwareKeyStorage;
use crate::{
    jwk::rsa_thumbprint,
    key_storage::{
        error::KeyStorageError,
        model::{KeyGenerationParams, KeySecurity},
        KeyStorage,
    },
};

fn params(key_size: usize) -> KeyGenerationParams {
    KeyGenerationParams {
        key_size,
        common_name: "CN=device-pop".to_string(),
        certificate_validity: Duration::days(365),
    }
}

#[test]
fn test_empty_storage() {
    let storage = SoftwareKeyStorage::new("alias");

    assert!(!storage.exists());
    assert!(!storage.has_thumbprint(b"anything"));
    assert!(!storage.clear());
    assert_eq!(storage.get_creation_date().unwrap(), None);
    assert!(storage.get_certificate_chain().unwrap().is_empty());
    assert_eq!(
        storage.get_entry().unwrap_err(),
        KeyStorageError::NotFound("alias".to_string())
    );
}

#[test]
fn test_generate_installs_entry() {
    let storage = SoftwareKeyStorage::new("alias");

    let entry = storage.generate(&params(2048)).unwrap();

    assert!(storage.exists());
    assert_eq!(entry.security(), KeySecurity::Software);
    assert_eq!(
        storage.get_creation_date().unwrap(),
        Some(entry.created_at())
    );

    let thumbprint = rsa_thumbprint(entry.public_key()).unwrap();
    assert!(storage.has_thumbprint(thumbprint.as_bytes()));
    assert!(!storage.has_thumbprint(b"other"));

    let chain = storage.get_certificate_chain().unwrap();
    assert_eq!(chain.len(), 1);
    let certificate = &chain[0];
    assert_eq!(
        certificate.tbs_certificate.subject,
        certificate.tbs_certificate.issuer
    );
    assert_eq!(
        certificate.tbs_certificate.subject.to_string(),
        "CN=device-pop"
    );
    assert!(certificate.to_der().is_ok());
}

#[test]
fn test_generate_replaces_entry() {
    let storage = SoftwareKeyStorage::new("alias");

    let first = storage.generate(&params(2048)).unwrap();
    let second = storage.generate(&params(2048)).unwrap();

    let stored = storage.get_entry().unwrap();
    assert_ne!(first.public_key(), second.public_key());
    assert_eq!(stored.public_key(), second.public_key());
}

#[test]
fn test_generate_rejects_small_key() {
    let storage = SoftwareKeyStorage::new("alias");

    assert_eq!(
        storage.generate(&params(1024)).unwrap_err(),
        KeyStorageError::KeySizeUnsupported(1024)
    );
    assert!(!storage.exists());
}

#[test]
fn test_generate_rejects_bad_common_name() {
    let storage = SoftwareKeyStorage::new("alias");
    let params = KeyGenerationParams {
        common_name: "not a distinguished name".to_string(),
        ..params(2048)
    };

    assert!(matches!(
        storage.generate(&params),
        Err(KeyStorageError::InvalidParameters(_))
    ));
}

#[test]
fn test_clear_removes_entry() {
    let storage = SoftwareKeyStorage::new("alias");
    storage.generate(&params(2048)).unwrap();

    assert!(storage.clear());
    assert!(!storage.exists());
    assert!(!storage.clear());
}

#[test]
fn test_debug_redacts_private_key() {
    let storage = SoftwareKeyStorage::new("alias");
    let entry = storage.generate(&params(2048)).unwrap();

    let debug = format!("{entry:?}");

    assert!(debug.contains("<redacted>"));
    assert!(!debug.contains("primes"));
}
