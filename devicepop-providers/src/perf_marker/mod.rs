//! Instrumentation markers around key operations.
//!
//! Sinks are fire-and-forget: `mark` cannot fail, so a broken sink can never turn a
//! successful key operation into an error.

use std::{
    sync::Mutex,
    thread::{self, ThreadId},
};

use strum::{Display, EnumString};
use time::OffsetDateTime;

#[cfg(test)]
mod test;

#[derive(Debug, Copy, Clone, Display, EnumString, PartialEq, Eq, Hash)]
pub enum PerfMarker {
    #[strum(serialize = "GENERATE_AT_POP_ASYMMETRIC_KEYPAIR_START")]
    GenerateAsymmetricKeyStart,
    #[strum(serialize = "GENERATE_AT_POP_ASYMMETRIC_KEYPAIR_END")]
    GenerateAsymmetricKeyEnd,
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait PerfMarkerSink: Send + Sync {
    fn mark(&self, marker: PerfMarker);
}

/// Emits every marker as a `tracing` debug event.
#[derive(Default)]
pub struct TracingMarkerSink;

impl PerfMarkerSink for TracingMarkerSink {
    fn mark(&self, marker: PerfMarker) {
        tracing::debug!(
            marker = %marker,
            thread = ?thread::current().id(),
            timestamp = %OffsetDateTime::now_utc(),
            "Perf marker"
        );
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedMarker {
    pub marker: PerfMarker,
    pub timestamp: OffsetDateTime,
    pub thread: ThreadId,
}

/// Keeps the most recent markers in memory, oldest dropped first.
pub struct RecordingMarkerSink {
    capacity: usize,
    markers: Mutex<Vec<RecordedMarker>>,
}

impl RecordingMarkerSink {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            markers: Mutex::new(Vec::new()),
        }
    }

    pub fn markers(&self) -> Vec<RecordedMarker> {
        self.markers
            .lock()
            .map(|markers| markers.clone())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut markers) = self.markers.lock() {
            markers.clear();
        }
    }
}

impl PerfMarkerSink for RecordingMarkerSink {
    fn mark(&self, marker: PerfMarker) {
        let Ok(mut markers) = self.markers.lock() else {
            return;
        };

        if self.capacity == 0 {
            return;
        }
        if markers.len() == self.capacity {
            markers.remove(0);
        }
        markers.push(RecordedMarker {
            marker,
            timestamp: OffsetDateTime::now_utc(),
            thread: thread::current().id(),
        });
    }
}
