use std::sync::Mutex;

pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

/// Counters for one map session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub markers_drawn: usize,
    pub features_skipped: usize,
    pub load_errors: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_marker(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.markers_drawn += 1;
        }
    }

    pub fn record_skipped(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.features_skipped += 1;
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.load_errors += 1;
        }
    }

    pub fn snapshot(&self) -> Metrics {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
