//! Fixed-size pool running the asynchronous entry points off the caller's thread.

use std::{io, marker::PhantomData, sync::mpsc, time::Duration};

use tokio::runtime::{Builder, Runtime};

use super::error::DevicePopError;

#[cfg(test)]
mod test;

pub struct WorkerPool {
    runtime: Runtime,
    size: usize,
}

impl WorkerPool {
    pub fn new(size: usize) -> Result<Self, DevicePopError> {
        if size == 0 {
            return Err(DevicePopError::WorkerPoolUnavailable(io::Error::new(
                io::ErrorKind::InvalidInput,
                "worker pool size must be positive",
            )));
        }

        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(size)
            .thread_name("device-pop-worker")
            .build()
            .map_err(DevicePopError::WorkerPoolUnavailable)?;

        tracing::debug!(size, "Worker pool started");

        Ok(Self { runtime, size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Runs `task` on a pool thread. Tasks beyond the pool size queue up.
    pub fn submit<T, F>(&self, task: F) -> TaskHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (sender, receiver) = mpsc::sync_channel(1);

        self.runtime.spawn_blocking(move || {
            // nobody listening is fine: the caller dropped the handle
            let _ = sender.send(task());
        });

        TaskHandle { receiver }
    }

    /// Runs `task` on a pool thread and hands its result to `callback` on that thread.
    ///
    /// The callback runs exactly once. If the task never completes, because it panicked
    /// or the pool shut down first, it receives
    /// [`DevicePopError::InterruptedWhileWaiting`].
    pub fn execute<T, F, C>(&self, task: F, callback: C)
    where
        F: FnOnce() -> Result<T, DevicePopError> + Send + 'static,
        C: FnOnce(Result<T, DevicePopError>) + Send + 'static,
        T: Send + 'static,
    {
        let completion = Completion::new(callback);
        drop(self.submit(move || completion.complete(task())));
    }

    /// Stops accepting work and waits up to `timeout` for running tasks.
    pub fn shutdown(self, timeout: Duration) {
        tracing::debug!(size = self.size, "Worker pool shutting down");
        self.runtime.shutdown_timeout(timeout);
    }
}

/// Completion of a submitted task.
pub struct TaskHandle<T> {
    receiver: mpsc::Receiver<T>,
}

impl<T> TaskHandle<T> {
    /// Blocks the calling thread until the task completes. There is no deadline.
    ///
    /// Safe to call from any thread, including one driving an async runtime, which stays
    /// blocked for the duration.
    pub fn wait(self) -> Result<T, DevicePopError> {
        self.receiver
            .recv()
            .map_err(|_| DevicePopError::InterruptedWhileWaiting)
    }
}

impl<T: Send + 'static> TaskHandle<T> {
    /// Awaits the task without blocking the runtime. Must be polled on a tokio runtime.
    pub async fn join(self) -> Result<T, DevicePopError> {
        let receiver = self.receiver;
        tokio::task::spawn_blocking(move || receiver.recv())
            .await
            .map_err(|_| DevicePopError::InterruptedWhileWaiting)?
            .map_err(|_| DevicePopError::InterruptedWhileWaiting)
    }
}

struct Completion<T, C>
where
    C: FnOnce(Result<T, DevicePopError>),
{
    callback: Option<C>,
    _result: PhantomData<fn(T)>,
}

impl<T, C> Completion<T, C>
where
    C: FnOnce(Result<T, DevicePopError>),
{
    fn new(callback: C) -> Self {
        Self {
            callback: Some(callback),
            _result: PhantomData,
        }
    }

    fn complete(mut self, result: Result<T, DevicePopError>) {
        if let Some(callback) = self.callback.take() {
            callback(result);
        }
    }
}

impl<T, C> Drop for Completion<T, C>
where
    C: FnOnce(Result<T, DevicePopError>),
{
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            tracing::warn!("Task dropped before completion");
            callback(Err(DevicePopError::InterruptedWhileWaiting));
        }
    }
}
