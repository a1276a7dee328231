//! Retry policy for pack API requests.
//!
//! A request is repeated when it could not connect, timed out, or the API
//! answered 429, 502, 503 or 504. Any other outcome, including other 5xx
//! statuses, goes straight back to the caller. Delays double from
//! [`RetryPolicy::base_delay`]; a `Retry-After` header given in seconds
//! replaces the computed delay for that attempt. No delay exceeds
//! [`MAX_DELAY`].

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};

/// Upper bound on any single wait between attempts.
pub const MAX_DELAY: Duration = Duration::from_secs(5);

/// How many times, and how patiently, to repeat a transient failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one.
    pub max_retries: u32,
    /// Wait before the first retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    /// Send each request exactly once.
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    /// Wait before retry number `retry` (zero-based).
    fn delay(&self, retry: u32, response: Option<&Response>) -> Duration {
        response
            .and_then(retry_after)
            .unwrap_or_else(|| self.base_delay.saturating_mul(2u32.saturating_pow(retry)))
            .min(MAX_DELAY)
    }

    /// Send the request built by `build`, repeating transient failures.
    ///
    /// `build` runs once per attempt. After the last retry the final
    /// outcome is returned as-is, so a caller still sees the 503 or the
    /// connect error that exhausted the policy.
    pub(crate) async fn send<F>(&self, build: F) -> Result<Response, reqwest::Error>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut retry = 0;
        loop {
            let outcome = build().send().await;
            let transient = match &outcome {
                Ok(resp) => is_transient_status(resp.status()),
                Err(e) => is_transient_error(e),
            };
            if !transient || retry >= self.max_retries {
                return outcome;
            }

            let delay = self.delay(retry, outcome.as_ref().ok());
            match &outcome {
                Ok(resp) => tracing::warn!(
                    status = resp.status().as_u16(),
                    retry = retry + 1,
                    ?delay,
                    "pack API unavailable, retrying"
                ),
                Err(e) => tracing::warn!(
                    error = %e,
                    retry = retry + 1,
                    ?delay,
                    "pack API unreachable, retrying"
                ),
            }
            drop(outcome);
            tokio::time::sleep(delay).await;
            retry += 1;
        }
    }
}

fn is_transient_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 502 | 503 | 504)
}

fn is_transient_error(e: &reqwest::Error) -> bool {
    e.is_connect() || e.is_timeout()
}

/// `Retry-After` in delta-seconds form. HTTP-date values are ignored.
fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_doubles_and_is_capped() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay(0, None), Duration::from_millis(200));
        assert_eq!(policy.delay(1, None), Duration::from_millis(400));
        assert_eq!(policy.delay(2, None), Duration::from_millis(800));
        assert_eq!(policy.delay(10, None), MAX_DELAY);
        assert_eq!(policy.delay(u32::MAX, None), MAX_DELAY);
    }

    #[test]
    fn only_overload_statuses_are_transient() {
        for code in [429, 502, 503, 504] {
            assert!(is_transient_status(StatusCode::from_u16(code).unwrap()), "{code}");
        }
        for code in [200, 400, 404, 500, 501] {
            assert!(!is_transient_status(StatusCode::from_u16(code).unwrap()), "{code}");
        }
    }

    #[tokio::test]
    async fn connect_errors_are_retried_until_exhausted() {
        use std::sync::atomic::{AtomicU32, Ordering};

        let client = reqwest::Client::new();
        let attempts = AtomicU32::new(0);
        let policy = RetryPolicy {
            max_retries: 2,
            base_delay: Duration::from_millis(1),
        };

        let result = policy
            .send(|| {
                attempts.fetch_add(1, Ordering::SeqCst);
                client.get("http://127.0.0.1:1/")
            })
            .await;

        assert!(result.unwrap_err().is_connect());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }
}
