// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! User provisioning configuration.

use serde::Deserialize;
use userapi_common_secret::SecretString;

use crate::error::ConfigError;

/// User provisioning configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct UsersConfig {
	/// Domain appended to allocated usernames.
	pub email_domain: String,
	/// Fixed password assigned to test users.
	pub test_user_password: SecretString,
	/// True in production: judge listings exclude test accounts.
	pub is_live: bool,
	/// Display name of the directory role that marks administrators.
	pub admin_role_name: String,
	/// Given-name prefix marking performance-test accounts.
	pub perf_test_prefix: String,
}

/// User provisioning configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersConfigLayer {
	#[serde(default)]
	pub email_domain: Option<String>,
	#[serde(default)]
	pub test_user_password: Option<SecretString>,
	#[serde(default)]
	pub is_live: Option<bool>,
	#[serde(default)]
	pub admin_role_name: Option<String>,
	#[serde(default)]
	pub perf_test_prefix: Option<String>,
}

impl UsersConfigLayer {
	pub fn merge(&mut self, other: UsersConfigLayer) {
		if other.email_domain.is_some() {
			self.email_domain = other.email_domain;
		}
		if other.test_user_password.is_some() {
			self.test_user_password = other.test_user_password;
		}
		if other.is_live.is_some() {
			self.is_live = other.is_live;
		}
		if other.admin_role_name.is_some() {
			self.admin_role_name = other.admin_role_name;
		}
		if other.perf_test_prefix.is_some() {
			self.perf_test_prefix = other.perf_test_prefix;
		}
	}
}

impl UsersConfig {
	pub fn from_layer(layer: UsersConfigLayer) -> Result<Self, ConfigError> {
		Ok(Self {
			email_domain: layer
				.email_domain
				.ok_or(ConfigError::MissingField("users.email_domain"))?,
			test_user_password: layer
				.test_user_password
				.unwrap_or_else(|| SecretString::new("")),
			is_live: layer.is_live.unwrap_or(false),
			admin_role_name: layer
				.admin_role_name
				.unwrap_or_else(|| "User Administrator".to_string()),
			perf_test_prefix: layer.perf_test_prefix.unwrap_or_else(|| "TP".to_string()),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn email_domain_is_required() {
		assert!(matches!(
			UsersConfig::from_layer(UsersConfigLayer::default()),
			Err(ConfigError::MissingField("users.email_domain"))
		));
	}

	#[test]
	fn defaults_follow_directory_conventions() {
		let layer = UsersConfigLayer {
			email_domain: Some("reform.example".to_string()),
			..Default::default()
		};
		let config = UsersConfig::from_layer(layer).unwrap();

		assert!(!config.is_live);
		assert!(config.test_user_password.is_empty());
		assert_eq!(config.admin_role_name, "User Administrator");
		assert_eq!(config.perf_test_prefix, "TP");
	}
}
