//! Read retry.
//!
//! Failed reads are retried once after a short fixed delay when the failure
//! is transient (see [`DataError::is_transient`]). Writes never go through
//! here.

use std::future::Future;
use std::time::Duration;

use crate::error::DataError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            delay: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// A single attempt.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }

    /// `default()` when `enabled`, otherwise [`Self::none`].
    #[must_use]
    pub fn from_flag(enabled: bool) -> Self {
        if enabled { Self::default() } else { Self::none() }
    }

    /// Run `op` until it succeeds, fails permanently, or attempts run out.
    ///
    /// # Errors
    ///
    /// The error from the last attempt.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T, DataError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DataError>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    tracing::warn!(
                        %label,
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "read failed, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
