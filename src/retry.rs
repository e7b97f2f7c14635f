use std::fmt::Display;
use std::time::Duration;

use tracing::warn;

/// Errors that may succeed when the same request is sent again.
pub trait Retriable {
    fn is_retriable(&self) -> bool;
}

/// Linear backoff: the wait after failed attempt `n` (1-based) is `base_delay * n`.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// Run `op` until it succeeds, fails with a non-retriable error, or `max_attempts` is reached.
///
/// `sleep` performs the backoff wait; production code passes `tokio::time::sleep`.
/// The error from the last attempt is returned unchanged.
pub async fn with_retry<T, E, Op, Fut, S, SFut>(
    policy: RetryPolicy,
    mut op: Op,
    mut sleep: S,
) -> Result<T, E>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retriable + Display,
    S: FnMut(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retriable() && attempt < policy.max_attempts => {
                let delay = policy.delay_after(attempt);
                warn!(
                    attempt,
                    max_retries = policy.max_attempts - 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "retrying after transient error"
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
