//! Run limits passed into the orchestration layer.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default number of rows per processing window.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Operational limits for one processing run.
///
/// These replace ambient environment detection: the caller decides the
/// ceiling and window size and hands them in explicitly. The matching
/// engine itself never reads them; `max_rows` is enforced by the caller
/// before invoking the engine, `batch_size` drives the windowed
/// orchestration, and `timeout` is advisory only (the engine performs no
/// I/O and never checks the clock).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunLimits {
    /// Hard cap on the number of data rows processed. `None` means no cap.
    pub max_rows: Option<usize>,
    /// Rows per window for batched processing. `None` falls back to
    /// [`DEFAULT_BATCH_SIZE`].
    pub batch_size: Option<usize>,
    /// Advisory wall-clock budget for the run.
    pub timeout: Option<Duration>,
}

impl RunLimits {
    /// Set the row cap.
    #[must_use]
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }

    /// Set the window size.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Set the advisory timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Effective window size: the configured one, or the default.
    #[must_use]
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE)
    }
}
