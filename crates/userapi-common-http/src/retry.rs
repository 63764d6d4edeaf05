// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Retry logic with exponential backoff for transient failures.

use std::future::Future;
use std::time::Duration;

/// Classifies errors into transient (worth retrying) and permanent.
pub trait RetryableError {
	/// True when the failed operation may succeed on a later attempt.
	fn is_retryable(&self) -> bool;
}

/// Retry policy: attempt count and backoff bounds.
#[derive(Debug, Clone)]
pub struct RetryConfig {
	/// Total number of attempts, including the first.
	pub max_attempts: u32,
	/// Delay before the second attempt; doubles per attempt thereafter.
	pub initial_backoff: Duration,
	/// Upper bound on the per-attempt delay.
	pub max_backoff: Duration,
}

impl Default for RetryConfig {
	fn default() -> Self {
		Self {
			max_attempts: 3,
			initial_backoff: Duration::from_millis(250),
			max_backoff: Duration::from_secs(5),
		}
	}
}

/// Run `f` until it succeeds, the error is permanent, or attempts run out.
///
/// Backoff doubles per attempt with up to 50% random jitter, capped at
/// `max_backoff`. Only call this with idempotent operations.
pub async fn retry<T, E, F, Fut>(config: &RetryConfig, operation: &str, mut f: F) -> Result<T, E>
where
	E: RetryableError + std::fmt::Display,
	F: FnMut() -> Fut,
	Fut: Future<Output = Result<T, E>>,
{
	let mut backoff = config.initial_backoff;
	let mut attempt = 1u32;

	loop {
		match f().await {
			Ok(value) => return Ok(value),
			Err(e) if attempt < config.max_attempts && e.is_retryable() => {
				let jitter = backoff.mul_f64(fastrand::f64() * 0.5);
				let delay = (backoff + jitter).min(config.max_backoff);
				tracing::debug!(
					operation,
					attempt,
					error = %e,
					delay_ms = delay.as_millis() as u64,
					"transient failure, retrying"
				);
				tokio::time::sleep(delay).await;
				backoff = (backoff * 2).min(config.max_backoff);
				attempt += 1;
			}
			Err(e) => return Err(e),
		}
	}
}
