use std::fmt::Display;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Fixed-delay retry policy for network-style extraction.
///
/// File-system loads are never retried; local I/O failures are permanent
/// for their source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay_secs: 2,
        }
    }
}

impl RetryPolicy {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }

    /// Run `op` up to `attempts` times, sleeping the fixed delay between
    /// failures. The last error is returned once attempts are exhausted.
    pub fn run<T, E: Display>(
        &self,
        label: &str,
        mut op: impl FnMut(u32) -> Result<T, E>,
    ) -> Result<T, E> {
        let attempts = self.attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(err) if attempt < attempts => {
                    warn!(%label, attempt, error = %err, "attempt failed, retrying");
                    std::thread::sleep(self.delay());
                }
                Err(err) => {
                    warn!(%label, attempt, error = %err, "all attempts failed");
                    return Err(err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant_policy(attempts: u32) -> RetryPolicy {
        RetryPolicy {
            attempts,
            delay_secs: 0,
        }
    }

    #[test]
    fn succeeds_without_retrying() {
        let mut calls = 0;
        let result: Result<u32, String> = instant_policy(3).run("op", |_| {
            calls += 1;
            Ok(7)
        });
        assert_eq!(result.ok(), Some(7));
        assert_eq!(calls, 1);
    }

    #[test]
    fn retries_transient_failures_until_success() {
        let mut calls = 0;
        let result: Result<u32, String> = instant_policy(3).run("op", |attempt| {
            calls += 1;
            if attempt < 3 {
                Err("transient".to_string())
            } else {
                Ok(attempt)
            }
        });
        assert_eq!(result.ok(), Some(3));
        assert_eq!(calls, 3);
    }

    #[test]
    fn exhausts_attempts_and_returns_last_error() {
        let mut calls = 0;
        let result: Result<(), String> = instant_policy(3).run("op", |attempt| {
            calls += 1;
            Err(format!("failure {attempt}"))
        });
        assert_eq!(result.err().as_deref(), Some("failure 3"));
        assert_eq!(calls, 3);
    }

    #[test]
    fn zero_attempts_still_runs_once() {
        let mut calls = 0;
        let _: Result<(), String> = instant_policy(0).run("op", |_| {
            calls += 1;
            Err("nope".to_string())
        });
        assert_eq!(calls, 1);
    }
}
