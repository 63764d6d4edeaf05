// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Reference-data cache configuration.

use serde::Deserialize;

/// Cache configuration (runtime, fully resolved).
///
/// When `redis_url` is unset the server runs with a no-op store and
/// every lookup hits the directory.
#[derive(Debug, Clone)]
pub struct CacheConfig {
	pub redis_url: Option<String>,
	pub ttl_secs: u64,
}

/// Cache configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheConfigLayer {
	#[serde(default)]
	pub redis_url: Option<String>,
	#[serde(default)]
	pub ttl_secs: Option<u64>,
}

impl CacheConfigLayer {
	pub fn merge(&mut self, other: CacheConfigLayer) {
		if other.redis_url.is_some() {
			self.redis_url = other.redis_url;
		}
		if other.ttl_secs.is_some() {
			self.ttl_secs = other.ttl_secs;
		}
	}
}

impl CacheConfig {
	pub fn from_layer(layer: CacheConfigLayer) -> Self {
		Self {
			redis_url: layer.redis_url,
			ttl_secs: layer.ttl_secs.unwrap_or(3 * 60 * 60),
		}
	}
}
