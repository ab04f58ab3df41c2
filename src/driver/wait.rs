use crate::error::{Result, ScrapeError};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Bounded polling policy: how long to keep probing and how often
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitPolicy {
    /// Give up after this many milliseconds
    pub timeout_ms: u64,

    /// Pause between probes
    pub poll_interval_ms: u64,
}

impl WaitPolicy {
    pub const fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self { timeout_ms: timeout.as_millis() as u64, poll_interval_ms: poll_interval.as_millis() as u64 }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(15), Duration::from_millis(250))
    }
}

/// Probe until it reports `true` or the policy's timeout elapses.
///
/// The probe always runs at least once. Errors from the probe abort the wait
/// immediately; running out of time yields [`ScrapeError::Timeout`] naming `what`.
pub fn poll_until<F>(policy: &WaitPolicy, what: &str, mut probe: F) -> Result<()>
where
    F: FnMut() -> Result<bool>,
{
    let deadline = Instant::now() + policy.timeout();

    loop {
        if probe()? {
            return Ok(());
        }

        let now = Instant::now();
        if now >= deadline {
            return Err(ScrapeError::Timeout { what: what.to_string(), timeout: policy.timeout() });
        }

        std::thread::sleep(policy.poll_interval().min(deadline - now));
    }
}
