use rsa::RsaPrivateKey;

use super::{rsa_thumbprint, PublicKeyJwk, PublicKeyJwkRsaData};
use crate::crypto::{imp::hasher::sha256::SHA256, MockHasher};

fn rfc7638_example() -> PublicKeyJwk {
    PublicKeyJwk::Rsa(PublicKeyJwkRsaData {
        r#use: None,
        n: "0vx7agoebGcQSuuPiLJXZptN9nndrQmbXEps2aiAFbWhM78LhWx4cbbfAAtVT86zwu1RK7aPFFxuhDR1L6tSoc_BJECPebWKRXjBZCiFV4n3oknjhMstn64tZ_2W-5JsGY4Hc5n9yBXArwl93lqt7_RN5w6Cf0h4QyQ5v-65YGjQR0_FDW2QvzqY368QQMicAtaSqzs8KJZgnYb9c7d0zgdAZHzu6qMQvRL5hajrn1n91CbOpbISD08qNLyrdkt-bFTWhAI4vMQFh6WeZu0fM4lFd2NcRwr3XPksINHaQ-G_xBniIqbw0Ls1jF44-csFCur-kEgU8awapJzKnqDKgw".to_string(),
        e: "AQAB".to_string(),
        kid: None,
    })
}

#[test]
fn test_thumbprint_matches_rfc7638_example() {
    let thumbprint = rfc7638_example().thumbprint(&SHA256 {}).unwrap();

    assert_eq!(thumbprint, "NzbLsXh8uDCcd-6MNwXF4W_7noWXFZAfHkxZsRGC9Xs");
}

#[test]
fn test_thumbprint_ignores_optional_members() {
    let plain = rfc7638_example();
    let with_kid = rfc7638_example().with_key_id("some-kid".to_string());

    assert_eq!(
        plain.thumbprint(&SHA256 {}).unwrap(),
        with_kid.thumbprint(&SHA256 {}).unwrap()
    );
}

#[test]
fn test_thumbprint_hashes_canonical_json() {
    let mut hasher = MockHasher::default();
    hasher
        .expect_hash_base64()
        .withf(|input| {
            let json = std::str::from_utf8(input).unwrap();
            json.starts_with(r#"{"e":"AQAB","kty":"RSA","n":"0vx7"#) && !json.contains(' ')
        })
        .times(1)
        .returning(|_| Ok("thumb".to_string()));

    assert_eq!(rfc7638_example().thumbprint(&hasher).unwrap(), "thumb");
}

#[test]
fn test_rsa_key_round_trip() {
    let private_key = RsaPrivateKey::new(&mut rand::thread_rng(), 2048).unwrap();
    let public_key = private_key.to_public_key();

    let jwk = PublicKeyJwk::from_rsa(&public_key).unwrap();
    assert_eq!(jwk.to_rsa().unwrap(), public_key);

    let json: serde_json::Value = serde_json::from_str(&jwk.to_json().unwrap()).unwrap();
    assert_eq!(json["kty"], "RSA");
    assert_eq!(json["e"], "AQAB");
    assert!(json.get("d").is_none());

    assert_eq!(
        rsa_thumbprint(&public_key).unwrap(),
        jwk.thumbprint(&SHA256 {}).unwrap()
    );
}
