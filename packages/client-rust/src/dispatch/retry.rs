//! Bounded retry with a randomized delay window between attempts.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::debug;

// ---------------------------------------------------------------------------
// RetryPolicy
// ---------------------------------------------------------------------------

/// How many times to retry and how long to wait in between.
///
/// A dispatch makes at most `max_retries + 1` attempts. Each inter-attempt
/// delay is drawn uniformly from `[min_interval, max_interval]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub min_interval: Duration,
    pub max_interval: Duration,
}

impl RetryPolicy {
    /// A policy that never retries.
    pub const NONE: RetryPolicy = RetryPolicy {
        max_retries: 0,
        min_interval: Duration::ZERO,
        max_interval: Duration::ZERO,
    };

    /// Total attempts this policy allows.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Draw the next inter-attempt delay, uniformly in nanoseconds.
    ///
    /// A window with `min >= max` collapses to `min`; config validation
    /// rejects inverted windows before they get here.
    #[must_use]
    pub fn next_delay(&self) -> Duration {
        if self.max_interval <= self.min_interval {
            return self.min_interval;
        }
        let min = duration_nanos(self.min_interval);
        let max = duration_nanos(self.max_interval);
        Duration::from_nanos(rand::rng().random_range(min..=max))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            min_interval: Duration::from_millis(500),
            max_interval: Duration::from_millis(2_000),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn duration_nanos(duration: Duration) -> u64 {
    duration.as_nanos().min(u128::from(u64::MAX)) as u64
}

// ---------------------------------------------------------------------------
// Retry controller
// ---------------------------------------------------------------------------

/// Failure outcome of a single attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum AttemptError<E> {
    /// Transient: try again if the policy allows.
    Retry(E),
    /// Terminal: surface immediately.
    Abort(E),
}

/// Run `attempt` until it succeeds, aborts, or the policy is exhausted.
///
/// `attempt` receives the 1-based attempt number. Attempts run strictly one
/// after another. When the last allowed attempt still asks for a retry, its
/// error is returned; the controller never reports success it did not see.
///
/// # Errors
///
/// Returns the error carried by the first `Abort`, or by the final `Retry`
/// once `policy.max_retries` retries have been spent.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut attempt: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, AttemptError<E>>>,
{
    let mut number: u32 = 1;
    loop {
        match attempt(number).await {
            Ok(value) => return Ok(value),
            Err(AttemptError::Abort(err)) => return Err(err),
            Err(AttemptError::Retry(err)) => {
                if number > policy.max_retries {
                    return Err(err);
                }
                let delay = policy.next_delay();
                debug!(
                    attempt = number,
                    delay_ms = delay.as_secs_f64() * 1_000.0,
                    "attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
                number += 1;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
