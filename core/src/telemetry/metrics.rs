use std::sync::Mutex;

/// Counters for the frame cycle, shared behind a mutex so the bridge can
/// snapshot them from any thread.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Clone, Copy, Default)]
struct Metrics {
    frames: usize,
    pings: usize,
    scans: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub frames: usize,
    pub pings: usize,
    pub scans: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_frame(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.frames += 1;
        }
    }

    pub fn record_pings(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.pings += count;
        }
    }

    pub fn record_scan(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.scans += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let metrics = self
            .inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default();
        MetricsSnapshot {
            frames: metrics.frames,
            pings: metrics.pings,
            scans: metrics.scans,
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
