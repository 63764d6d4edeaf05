// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Best-effort cache-aside helper.
//!
//! Reference data (group lookups, role definitions) can be served from a
//! distributed cache when one is configured. The cache is never on a
//! correctness path: every cache failure degrades to the live fetch and
//! is logged at debug level. When no cache is configured, [`NoopStore`]
//! stands in and every read is a miss.

mod store;

pub use store::{CacheStore, NoopStore, RedisStore};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;

/// Default entry lifetime: 3 hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3 * 60 * 60);

/// Errors from the underlying cache transport or value encoding.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
	#[error("redis error: {0}")]
	Redis(#[from] redis::RedisError),
	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

/// Get-or-populate-on-miss.
///
/// Returns the cached value for `key` when present and decodable;
/// otherwise runs `fetch`, stores the result under `key` with `ttl`, and
/// returns it. Cache failures on either side never fail the call.
pub async fn get_or_fetch<T, E, F, Fut>(
	store: &dyn CacheStore,
	key: &str,
	ttl: Duration,
	fetch: F,
) -> Result<T, E>
where
	T: Serialize + DeserializeOwned,
	F: FnOnce() -> Fut,
	Fut: Future<Output = Result<T, E>>,
{
	match store.get_raw(key).await {
		Ok(Some(raw)) => match serde_json::from_str(&raw) {
			Ok(value) => return Ok(value),
			Err(e) => {
				tracing::debug!(key, error = %e, "discarding undecodable cache entry");
			}
		},
		Ok(None) => {}
		Err(e) => {
			tracing::debug!(key, error = %e, "cache read failed, falling back to fetch");
		}
	}

	let value = fetch().await?;

	match serde_json::to_string(&value) {
		Ok(raw) => {
			if let Err(e) = store.put_raw(key, &raw, ttl).await {
				tracing::debug!(key, error = %e, "cache write failed");
			}
		}
		Err(e) => {
			tracing::debug!(key, error = %e, "value not cacheable");
		}
	}

	Ok(value)
}
