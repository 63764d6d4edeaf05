// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Graph directory client configuration.

use serde::Deserialize;
use userapi_common_secret::SecretString;

use crate::error::ConfigError;

/// Graph client configuration (runtime, fully resolved).
///
/// The credentials drive the client-credentials token flow; there are no
/// usable defaults, so all three must come from a source.
#[derive(Debug, Clone)]
pub struct GraphConfig {
	pub tenant_id: String,
	pub client_id: String,
	pub client_secret: SecretString,
	/// Per-request timeout for directory calls.
	pub timeout_secs: u64,
}

/// Graph client configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphConfigLayer {
	#[serde(default)]
	pub tenant_id: Option<String>,
	#[serde(default)]
	pub client_id: Option<String>,
	#[serde(default)]
	pub client_secret: Option<SecretString>,
	#[serde(default)]
	pub timeout_secs: Option<u64>,
}

impl GraphConfigLayer {
	pub fn merge(&mut self, other: GraphConfigLayer) {
		if other.tenant_id.is_some() {
			self.tenant_id = other.tenant_id;
		}
		if other.client_id.is_some() {
			self.client_id = other.client_id;
		}
		if other.client_secret.is_some() {
			self.client_secret = other.client_secret;
		}
		if other.timeout_secs.is_some() {
			self.timeout_secs = other.timeout_secs;
		}
	}
}

impl GraphConfig {
	pub fn from_layer(layer: GraphConfigLayer) -> Result<Self, ConfigError> {
		Ok(Self {
			tenant_id: layer
				.tenant_id
				.ok_or(ConfigError::MissingField("graph.tenant_id"))?,
			client_id: layer
				.client_id
				.ok_or(ConfigError::MissingField("graph.client_id"))?,
			client_secret: layer
				.client_secret
				.ok_or(ConfigError::MissingField("graph.client_secret"))?,
			timeout_secs: layer.timeout_secs.unwrap_or(30),
		})
	}
}
