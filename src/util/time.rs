//! Time utilities

use std::time::Instant;

/// Current UTC time as RFC 3339, used for persisted timestamps
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// A simple timer for measuring durations
#[derive(Debug, Clone)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_parses_back() {
        let stamp = now_rfc3339();
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
    }
}
