use std::{
    sync::{mpsc, Arc},
    time::Duration,
};

use ct_codecs::{Base64UrlSafeNoPadding, Decoder};
use devicepop_providers::{
    key_storage::{error::KeyStorageError, MockKeyStorage},
    perf_marker::{PerfMarker, RecordingMarkerSink},
};

use crate::{
    config::DevicePopConfig, model::SigningAlgorithm, rsa_crypto_provider,
    service::error::DevicePopError, DevicePop,
};

const RECV_TIMEOUT: Duration = Duration::from_secs(30);

#[test]
fn test_default_config() {
    let config = DevicePopConfig::default();

    assert_eq!("microsoft-device-pop", config.key_alias);
    assert_eq!(2048, config.key_size);
    assert_eq!("CN=device-pop", config.certificate_common_name);
    assert_eq!(5, config.worker_pool_size);
    assert_eq!(
        time::Duration::days(365),
        config.key_generation_params().certificate_validity
    );
}

#[test]
fn test_partial_config_uses_defaults() {
    let config: DevicePopConfig =
        serde_json::from_str(r#"{"keySize":3072,"workerPoolSize":2}"#).unwrap();

    assert_eq!(3072, config.key_size);
    assert_eq!(2, config.worker_pool_size);
    assert_eq!("microsoft-device-pop", config.key_alias);
}

#[test]
fn test_zero_workers_rejected() {
    let result = DevicePop::new(Some(DevicePopConfig {
        worker_pool_size: 0,
        ..Default::default()
    }));

    assert!(matches!(
        result,
        Err(DevicePopError::WorkerPoolUnavailable(_))
    ));
}

#[test]
fn test_crypto_provider_registrations() {
    let provider = rsa_crypto_provider();

    assert!(provider.get_hasher("sha-256").is_ok());
    assert!(provider.get_signer("SHA256withRSA").is_ok());
    assert!(provider.get_signer("SHA512withRSA/PSS").is_ok());
    assert!(provider.get_signer("NONEwithRSA").is_ok());
    assert!(provider
        .get_signer(&SigningAlgorithm::Md5WithRsa.to_string())
        .is_err());
    assert!(provider
        .get_cipher("RSA/ECB/OAEPWithSHA-256AndMGF1Padding")
        .is_ok());
    assert!(provider
        .get_cipher("RSA/ECB/OAEPWithSHA-1AndMGF1Padding")
        .is_err());
}

#[test]
fn test_generate_with_callback() {
    let device_pop = DevicePop::new(None).unwrap();
    let (sender, receiver) = mpsc::channel();

    device_pop
        .manager
        .generate_asymmetric_key_with_callback(move |result| sender.send(result).unwrap());

    let thumbprint = receiver.recv_timeout(RECV_TIMEOUT).unwrap().unwrap();
    assert!(device_pop
        .manager
        .keys()
        .asymmetric_key_exists_with_thumbprint(&thumbprint));

    device_pop.shutdown(Duration::from_secs(5));
}

#[test]
fn test_generate_with_callback_reports_failure_and_markers() {
    let mut storage = MockKeyStorage::default();
    storage
        .expect_alias()
        .returning(|| "microsoft-device-pop".to_owned());
    storage
        .expect_generate()
        .times(1)
        .returning(|_| Err(KeyStorageError::ProviderUnavailable("gone".to_owned())));
    let markers = Arc::new(RecordingMarkerSink::new(8));

    let device_pop =
        DevicePop::with_storage(DevicePopConfig::default(), Arc::new(storage), markers.clone())
            .unwrap();
    let (sender, receiver) = mpsc::channel();

    device_pop
        .manager
        .generate_asymmetric_key_with_callback(move |result| sender.send(result).unwrap());

    let result = receiver.recv_timeout(RECV_TIMEOUT).unwrap();
    assert!(matches!(
        result,
        Err(DevicePopError::HardwareProviderUnavailable(_))
    ));
    assert!(receiver.recv_timeout(Duration::from_millis(200)).is_err());

    let recorded: Vec<_> = markers.markers().into_iter().map(|m| m.marker).collect();
    assert_eq!(
        vec![
            PerfMarker::GenerateAsymmetricKeyStart,
            PerfMarker::GenerateAsymmetricKeyEnd
        ],
        recorded
    );
}

#[test]
fn test_request_confirmation_blocking_and_callback() {
    let device_pop = DevicePop::new(None).unwrap();
    let thumbprint = device_pop
        .manager
        .keys()
        .generate_asymmetric_key()
        .unwrap();

    let blocking = device_pop.manager.get_request_confirmation().unwrap();
    let decoded = Base64UrlSafeNoPadding::decode_to_vec(&blocking, None).unwrap();
    assert_eq!(
        format!("{{\"kid\":\"{thumbprint}\"}}"),
        String::from_utf8(decoded).unwrap()
    );

    let (sender, receiver) = mpsc::channel();
    device_pop
        .manager
        .get_request_confirmation_with_callback(move |result| sender.send(result).unwrap());

    assert_eq!(
        blocking,
        receiver.recv_timeout(RECV_TIMEOUT).unwrap().unwrap()
    );
}

#[test]
fn test_request_confirmation_from_async_context() {
    let device_pop = DevicePop::new(None).unwrap();
    let thumbprint = device_pop
        .manager
        .keys()
        .generate_asymmetric_key()
        .unwrap();
    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();

    let confirmation = runtime
        .block_on(async { device_pop.manager.get_request_confirmation() })
        .unwrap();

    let decoded = Base64UrlSafeNoPadding::decode_to_vec(&confirmation, None).unwrap();
    assert_eq!(
        format!("{{\"kid\":\"{thumbprint}\"}}"),
        String::from_utf8(decoded).unwrap()
    );
}

#[test]
fn test_request_confirmation_without_key() {
    let device_pop = DevicePop::new(None).unwrap();

    assert!(matches!(
        device_pop.manager.get_request_confirmation(),
        Err(DevicePopError::KeyMissing(_))
    ));
}
