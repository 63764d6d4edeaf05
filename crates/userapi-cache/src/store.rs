// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Cache store backends.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;

use crate::CacheError;

/// A string-keyed, string-valued store with per-entry TTL.
#[async_trait]
pub trait CacheStore: Send + Sync {
	async fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError>;
	async fn put_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;
}

/// Stand-in store when no cache is configured; every read is a miss.
pub struct NoopStore;

#[async_trait]
impl CacheStore for NoopStore {
	async fn get_raw(&self, _key: &str) -> Result<Option<String>, CacheError> {
		Ok(None)
	}

	async fn put_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
		Ok(())
	}
}

/// Redis-backed store using a multiplexed connection manager.
///
/// The manager reconnects on its own; callers see individual command
/// errors, which the cache-aside helper treats as misses.
pub struct RedisStore {
	conn: ConnectionManager,
}

impl RedisStore {
	/// Connect to redis at `url` (e.g. `redis://127.0.0.1:6379`).
	pub async fn connect(url: &str) -> Result<Self, CacheError> {
		let client = redis::Client::open(url)?;
		let conn = client.get_connection_manager().await?;
		tracing::info!("connected to redis cache");
		Ok(Self { conn })
	}
}

#[async_trait]
impl CacheStore for RedisStore {
	async fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
		let mut conn = self.conn.clone();
		let value: Option<String> = conn.get(key).await?;
		Ok(value)
	}

	async fn put_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
		let mut conn = self.conn.clone();
		conn.set_ex::<_, _, ()>(key, value, ttl.as_secs()).await?;
		Ok(())
	}
}
