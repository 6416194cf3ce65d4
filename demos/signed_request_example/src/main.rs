use std::{sync::Arc, time::Duration};

use devicepop_core::{model::SigningAlgorithm, rsa_crypto_provider, DevicePop};
use devicepop_providers::{
    crypto::{CryptoProvider, SignerError},
    device_certificate::DeviceCertificate,
    key_storage::{
        imp::software::SoftwareKeyStorage,
        model::{KeyEntry, KeyGenerationParams},
        KeyStorage,
    },
};
use time::OffsetDateTime;
use x509_cert::Certificate;

/// A registered device whose certificate key lives in a separate store.
struct RegisteredDevice {
    entry: KeyEntry,
    crypto: Arc<dyn CryptoProvider>,
}

impl DeviceCertificate for RegisteredDevice {
    fn certificate(&self) -> Certificate {
        self.entry
            .certificate()
            .cloned()
            .expect("Device certificate missing")
    }

    fn sign(&self, algorithm: &str, input: &[u8]) -> Result<Vec<u8>, SignerError> {
        self.crypto
            .get_signer(algorithm)?
            .sign(input, self.entry.private_key())
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let device_pop = DevicePop::new(None).expect("Initialization failed");
    let keys = device_pop.manager.keys();

    let thumbprint = keys
        .generate_asymmetric_key()
        .expect("Key generation failed");
    println!("Device key thumbprint: {thumbprint}");

    let req_cnf = device_pop
        .manager
        .get_request_confirmation()
        .expect("Request confirmation failed");
    println!("req_cnf: {req_cnf}");

    let request_url = "https://graph.contoso.com/v1.0/me";
    let shr = keys
        .mint_signed_access_token(
            Some("GET"),
            OffsetDateTime::now_utc().unix_timestamp(),
            request_url,
            "eyJ0eXAiOiJKV1QiLCJhbGciOiJSUzI1NiJ9.access.token",
            Some("AQAB-nonce"),
            None,
        )
        .expect("Minting failed");
    println!("Signed HTTP request: {shr}");

    let signature = keys
        .sign_string(SigningAlgorithm::Sha256WithRsa, "hello device")
        .expect("Signing failed");
    match keys.verify_string(SigningAlgorithm::Sha256WithRsa, "hello device", &signature) {
        true => println!("Successfully verified"),
        false => println!("Signature is incorrect"),
    };

    let registered = SoftwareKeyStorage::new("registered-device")
        .generate(&KeyGenerationParams {
            key_size: 2048,
            common_name: "CN=registered-device".to_string(),
            certificate_validity: time::Duration::days(30),
        })
        .expect("Device certificate creation failed");
    let device = RegisteredDevice {
        entry: registered,
        crypto: rsa_crypto_provider(),
    };

    let challenge_response = device_pop
        .challenge_response
        .sign("challenge-nonce", "https://login.contoso.com", &device)
        .expect("Challenge response failed");
    println!("Challenge response: {challenge_response}");

    device_pop.shutdown(Duration::from_secs(5));
}
