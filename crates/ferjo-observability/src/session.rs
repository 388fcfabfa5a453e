//! Session identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::Serialize;

/// Identifier for one catalog session (one page load, one CLI run).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a new session ID from the clock and a process-local counter.
    pub fn generate() -> Self {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
        let now = chrono::Utc::now();
        Self(format!(
            "{:x}-{:x}",
            now.timestamp_nanos_opt().unwrap_or_else(|| now.timestamp_micros()),
            seq
        ))
    }

    /// Create from an existing ID string.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
