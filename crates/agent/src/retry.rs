//! Retry budget and backoff for one agent iteration.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

type DelayFn = dyn Fn(u32) -> Duration + Send + Sync;

/// How many times an iteration may ask the model, and how long to wait
/// after a failed completion before asking again.
///
/// The delay function receives the 1-based number of the attempt that just
/// failed. It is only consulted after completion errors; malformed replies
/// are retried immediately.
#[derive(Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first). Zero is treated as one.
    pub max_attempts: u32,
    delay: Arc<DelayFn>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(3, Duration::from_secs(30))
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("first_delay", &(self.delay)(1))
            .finish()
    }
}

impl RetryPolicy {
    /// Use an arbitrary delay function.
    pub fn new(max_attempts: u32, delay: impl Fn(u32) -> Duration + Send + Sync + 'static) -> Self {
        Self {
            max_attempts,
            delay: Arc::new(delay),
        }
    }

    /// Same wait after every failure.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self::new(max_attempts, move |_| delay)
    }

    /// No wait at all.
    pub fn immediate(max_attempts: u32) -> Self {
        Self::fixed(max_attempts, Duration::ZERO)
    }

    /// Doubling backoff starting at `initial`, capped at `max`.
    pub fn exponential(max_attempts: u32, initial: Duration, max: Duration) -> Self {
        Self::new(max_attempts, move |attempt| {
            let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
            initial.saturating_mul(factor).min(max)
        })
    }

    /// Effective attempt budget.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Wait after the given failed attempt.
    pub fn delay(&self, attempt: u32) -> Duration {
        (self.delay)(attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_three_attempts_thirty_seconds() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.attempts(), 3);
        assert_eq!(policy.delay(1), Duration::from_secs(30));
        assert_eq!(policy.delay(2), Duration::from_secs(30));
    }

    #[test]
    fn exponential_doubles_and_caps() {
        let policy =
            RetryPolicy::exponential(5, Duration::from_millis(100), Duration::from_millis(350));
        assert_eq!(policy.delay(1), Duration::from_millis(100));
        assert_eq!(policy.delay(2), Duration::from_millis(200));
        assert_eq!(policy.delay(3), Duration::from_millis(350));
        assert_eq!(policy.delay(40), Duration::from_millis(350));
    }

    #[test]
    fn zero_attempts_still_tries_once() {
        assert_eq!(RetryPolicy::immediate(0).attempts(), 1);
    }

    #[test]
    fn custom_delay_sees_attempt_number() {
        let policy = RetryPolicy::new(4, |n| Duration::from_secs(u64::from(n) * 10));
        assert_eq!(policy.delay(3), Duration::from_secs(30));
    }
}
