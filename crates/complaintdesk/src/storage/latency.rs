//! Simulated round-trip delay for storage operations.

use std::time::Duration;

/// Delay applied before every record store read and write.
///
/// The demo configuration uses a visible delay so the dashboard's
/// optimistic path is exercised; tests use [`Latency::none`] or tokio's
/// paused clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latency {
    delay: Duration,
}

impl Latency {
    pub const fn none() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }

    pub const fn simulated(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::simulated(Duration::from_millis(millis))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
