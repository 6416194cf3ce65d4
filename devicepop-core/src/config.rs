use devicepop_providers::key_storage::model::KeyGenerationParams;
use serde::Deserialize;
use time::Duration;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DevicePopConfig {
    /// Alias of the device key entry in the key store.
    pub key_alias: String,
    /// RSA modulus size in bits.
    pub key_size: usize,
    pub certificate_common_name: String,
    pub certificate_validity_days: i64,
    /// Threads servicing the asynchronous entry points.
    pub worker_pool_size: usize,
}

impl Default for DevicePopConfig {
    fn default() -> Self {
        Self {
            key_alias: "microsoft-device-pop".to_string(),
            key_size: 2048,
            certificate_common_name: "CN=device-pop".to_string(),
            certificate_validity_days: 365,
            worker_pool_size: 5,
        }
    }
}

impl DevicePopConfig {
    pub fn key_generation_params(&self) -> KeyGenerationParams {
        KeyGenerationParams {
            key_size: self.key_size,
            common_name: self.certificate_common_name.clone(),
            certificate_validity: Duration::days(self.certificate_validity_days),
        }
    }
}
