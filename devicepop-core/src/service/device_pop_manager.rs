//! Asynchronous entry points over [`DeviceKeyManager`].
//!
//! Both the callback and the blocking variants go through [`WorkerPool::submit`]; the
//! blocking variant simply waits on the returned handle.

use std::sync::Arc;

use super::{device_key_manager::DeviceKeyManager, error::DevicePopError, worker_pool::WorkerPool};

pub struct DevicePopManager {
    keys: DeviceKeyManager,
    workers: Arc<WorkerPool>,
}

impl DevicePopManager {
    pub fn new(keys: DeviceKeyManager, workers: Arc<WorkerPool>) -> Self {
        Self { keys, workers }
    }

    /// Synchronous operations on the device key.
    pub fn keys(&self) -> &DeviceKeyManager {
        &self.keys
    }

    /// Generates the key on a pool thread. `callback` runs exactly once, on that thread,
    /// with the thumbprint or the failure.
    pub fn generate_asymmetric_key_with_callback<C>(&self, callback: C)
    where
        C: FnOnce(Result<String, DevicePopError>) + Send + 'static,
    {
        let keys = self.keys.clone();
        self.workers
            .execute(move || keys.generate_asymmetric_key(), callback);
    }

    pub fn get_request_confirmation_with_callback<C>(&self, callback: C)
    where
        C: FnOnce(Result<String, DevicePopError>) + Send + 'static,
    {
        let keys = self.keys.clone();
        self.workers
            .execute(move || keys.get_request_confirmation(), callback);
    }

    /// Computes the request confirmation on a pool thread and blocks until it is done.
    /// There is no deadline; a task that never finishes blocks the caller forever.
    /// Callable from async code as well, where it blocks the polling thread.
    pub fn get_request_confirmation(&self) -> Result<String, DevicePopError> {
        let keys = self.keys.clone();
        self.workers
            .submit(move || keys.get_request_confirmation())
            .wait()?
    }
}
