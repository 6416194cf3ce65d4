use serde::{Deserialize, Serialize};

use super::{model::JWTHeader, Jwt, JwtError, MockSignatureProvider};
use crate::crypto::SignerError;

#[derive(Serialize, Deserialize, Debug, Eq, PartialEq)]
struct Payload {
    test_field: String,
}

const REFERENCE_TOKEN: &str = "eyJhbGciOiJBbGdvcml0aG0xIiwidHlwIjoiU2lnbmF0dXJlMSIsImtpZCI6ImtleS0xIn0.eyJ0ZXN0X2ZpZWxkIjoidGVzdCJ9.AQID";

fn prepare_test_jwt() -> Jwt<Payload> {
    Jwt::new(
        JWTHeader {
            algorithm: "Algorithm1".to_owned(),
            signature_type: Some("Signature1".to_owned()),
            key_id: Some("key-1".to_owned()),
            certificate_chain: None,
        },
        Payload {
            test_field: "test".to_owned(),
        },
    )
}

fn extract_jwt_part(token: &str) -> String {
    let token_parts: Vec<&str> = token.split('.').collect();
    if let Some(result) = token_parts.get(..token_parts.len() - 1) {
        result.join(".")
    } else {
        panic!("Incorrect input data");
    }
}

#[test]
fn test_tokenize() {
    let jwt = prepare_test_jwt();
    let expected_input = extract_jwt_part(REFERENCE_TOKEN);

    let mut signer = MockSignatureProvider::default();
    signer
        .expect_sign()
        .withf(move |data| data == expected_input.as_bytes())
        .times(1)
        .returning(|_| Ok(vec![1u8, 2, 3]));

    let token = jwt.tokenize(&signer).unwrap();

    assert_eq!(token, REFERENCE_TOKEN);
}

#[test]
fn test_tokenize_propagates_signer_error() {
    let mut signer = MockSignatureProvider::default();
    signer
        .expect_sign()
        .returning(|_| Err(SignerError::MissingKey));

    let result = prepare_test_jwt().tokenize(&signer);

    assert_eq!(result, Err(JwtError::CouldNotSign(SignerError::MissingKey)));
}

#[test]
fn test_decompose_token() {
    let decomposed = Jwt::<Payload>::decompose_token(REFERENCE_TOKEN).unwrap();

    assert_eq!(decomposed.header, prepare_test_jwt().header);
    assert_eq!(decomposed.payload, prepare_test_jwt().payload);
    assert_eq!(decomposed.signature, vec![1, 2, 3]);
    assert_eq!(decomposed.signing_input, extract_jwt_part(REFERENCE_TOKEN));
}

#[test]
fn test_decompose_token_missing_part() {
    let result = Jwt::<Payload>::decompose_token("abc.def");

    assert!(matches!(result, Err(JwtError::CouldNotExtract(_))));
}
