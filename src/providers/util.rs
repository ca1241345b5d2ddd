use anyhow::Error;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Runs a request-producing operation, retrying transient failures.
///
/// The operation runs once plus up to `retries` more times, sleeping
/// `delay_ms` between attempts. The first success wins; the error of the
/// final attempt is returned when every attempt fails.
pub async fn with_retry<F, Fut, T>(
    mut operation: F,
    retries: usize,
    delay_ms: u64,
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, reqwest::Error>>,
{
    let attempts = retries + 1;
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt == attempts => return Err(err.into()),
            Err(err) => {
                debug!(
                    "Attempt {}/{} failed: {}. Retrying...",
                    attempt, attempts, err
                );
                attempt += 1;
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
