use devicepop_providers::perf_marker::PerfMarker;
use time::OffsetDateTime;
use x509_cert::Certificate;

use super::{DeviceKeyManager, MarkerScope};
use crate::{
    model::SecureHardwareState,
    service::error::{log_failure, DevicePopError},
};

impl DeviceKeyManager {
    pub fn asymmetric_key_exists(&self) -> bool {
        self.storage.exists()
    }

    /// Whether a key exists and its thumbprint equals `thumbprint`.
    pub fn asymmetric_key_exists_with_thumbprint(&self, thumbprint: &str) -> bool {
        self.storage.has_thumbprint(thumbprint.as_bytes())
    }

    /// Creates a fresh keypair, replacing any existing one, and returns its thumbprint.
    pub fn generate_asymmetric_key(&self) -> Result<String, DevicePopError> {
        let _markers = MarkerScope::enter(
            self.markers.as_ref(),
            PerfMarker::GenerateAsymmetricKeyStart,
            PerfMarker::GenerateAsymmetricKeyEnd,
        );

        let entry = self
            .storage
            .generate(&self.params)
            .map_err(DevicePopError::from)
            .inspect_err(log_failure("generate_asymmetric_key"))?;

        tracing::info!(alias = self.storage.alias(), "Device key generated");

        self.thumbprint(&entry)
            .inspect_err(log_failure("generate_asymmetric_key"))
    }

    pub fn get_asymmetric_key_creation_date(
        &self,
    ) -> Result<Option<OffsetDateTime>, DevicePopError> {
        self.storage
            .get_creation_date()
            .map_err(DevicePopError::from)
            .inspect_err(log_failure("get_asymmetric_key_creation_date"))
    }

    /// Removes the key. Returns whether there was one to remove.
    pub fn clear_asymmetric_key(&self) -> bool {
        let cleared = self.storage.clear();
        tracing::info!(alias = self.storage.alias(), cleared, "Device key cleared");
        cleared
    }

    pub fn get_secure_hardware_state(&self) -> Result<SecureHardwareState, DevicePopError> {
        self.entry()
            .map(|entry| SecureHardwareState::from(entry.security()))
            .inspect_err(log_failure("get_secure_hardware_state"))
    }

    pub fn get_asymmetric_key_thumbprint(&self) -> Result<String, DevicePopError> {
        self.entry()
            .and_then(|entry| self.thumbprint(&entry))
            .inspect_err(log_failure("get_asymmetric_key_thumbprint"))
    }

    /// The certificate chain of the key, leaf first.
    pub fn get_certificate_chain(&self) -> Result<Vec<Certificate>, DevicePopError> {
        self.storage
            .get_certificate_chain()
            .map_err(DevicePopError::from)
            .inspect_err(log_failure("get_certificate_chain"))
    }
}
