use log::{error, info, warn};

/// Thin wrapper over the `log` facade so every component tags its records
/// with the same target.
pub struct LogManager {
    target: &'static str,
}

impl LogManager {
    pub fn new() -> Self {
        Self::with_target("quakecore")
    }

    pub fn with_target(target: &'static str) -> Self {
        Self { target }
    }

    pub fn record(&self, message: &str) {
        info!(target: self.target, "{}", message);
    }

    pub fn warn(&self, message: &str) {
        warn!(target: self.target, "{}", message);
    }

    pub fn error(&self, message: &str) {
        error!(target: self.target, "{}", message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
