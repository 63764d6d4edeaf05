// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, TOML files, and environment variables.

use std::path::PathBuf;

use tracing::{debug, trace};
use userapi_common_secret::SecretString;

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{
	CacheConfigLayer, GraphConfigLayer, GroupsConfigLayer, HttpConfigLayer, LoggingConfigLayer,
	UsersConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/userapi/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: USERAPI_SERVER_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(ServerConfigLayer {
			http: Some(load_http_from_env()?),
			graph: Some(load_graph_from_env()?),
			users: Some(load_users_from_env()?),
			groups: Some(load_groups_from_env()),
			cache: Some(load_cache_from_env()?),
			logging: Some(load_logging_from_env()),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_secret(name: &str) -> Option<SecretString> {
	env_var(name).map(SecretString::new)
}

fn env_bool(name: &str) -> Option<bool> {
	env_var(name).map(|v| v.eq_ignore_ascii_case("true") || v == "1")
}

fn env_u16(name: &str) -> Result<Option<u16>, ConfigError> {
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid u16 value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn env_u64(name: &str) -> Result<Option<u64>, ConfigError> {
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid u64 value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn load_http_from_env() -> Result<HttpConfigLayer, ConfigError> {
	Ok(HttpConfigLayer {
		host: env_var("USERAPI_SERVER_HOST"),
		port: env_u16("USERAPI_SERVER_PORT")?,
	})
}

fn load_graph_from_env() -> Result<GraphConfigLayer, ConfigError> {
	Ok(GraphConfigLayer {
		tenant_id: env_var("USERAPI_SERVER_GRAPH_TENANT_ID"),
		client_id: env_var("USERAPI_SERVER_GRAPH_CLIENT_ID"),
		client_secret: env_secret("USERAPI_SERVER_GRAPH_CLIENT_SECRET"),
		timeout_secs: env_u64("USERAPI_SERVER_GRAPH_TIMEOUT_SECS")?,
	})
}

fn load_users_from_env() -> Result<UsersConfigLayer, ConfigError> {
	Ok(UsersConfigLayer {
		email_domain: env_var("USERAPI_SERVER_EMAIL_DOMAIN"),
		test_user_password: env_secret("USERAPI_SERVER_TEST_USER_PASSWORD"),
		is_live: env_bool("USERAPI_SERVER_IS_LIVE"),
		admin_role_name: env_var("USERAPI_SERVER_ADMIN_ROLE_NAME"),
		perf_test_prefix: env_var("USERAPI_SERVER_PERF_TEST_PREFIX"),
	})
}

fn load_groups_from_env() -> GroupsConfigLayer {
	GroupsConfigLayer {
		judges_group_id: env_var("USERAPI_SERVER_JUDGES_GROUP_ID"),
		test_accounts_group_id: env_var("USERAPI_SERVER_TEST_ACCOUNTS_GROUP_ID"),
	}
}

fn load_cache_from_env() -> Result<CacheConfigLayer, ConfigError> {
	Ok(CacheConfigLayer {
		redis_url: env_var("USERAPI_SERVER_REDIS_URL"),
		ttl_secs: env_u64("USERAPI_SERVER_CACHE_TTL_SECS")?,
	})
}

fn load_logging_from_env() -> LoggingConfigLayer {
	LoggingConfigLayer {
		level: env_var("USERAPI_SERVER_LOG_LEVEL"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn precedence_ordering() {
		assert!(Precedence::Environment > Precedence::ConfigFile);
		assert!(Precedence::ConfigFile > Precedence::Defaults);
	}

	#[test]
	fn defaults_source_returns_empty_layer() {
		let layer = DefaultsSource.load().unwrap();
		assert!(layer.http.is_none());
		assert!(layer.graph.is_none());
	}

	#[test]
	fn toml_source_missing_file_returns_empty() {
		let source = TomlSource::new("/nonexistent/config.toml");
		let layer = source.load().unwrap();
		assert!(layer.http.is_none());
	}

	#[test]
	fn env_bool_accepts_true_and_one() {
		std::env::set_var("USERAPI_TEST_BOOL", "TRUE");
		assert_eq!(env_bool("USERAPI_TEST_BOOL"), Some(true));
		std::env::set_var("USERAPI_TEST_BOOL", "1");
		assert_eq!(env_bool("USERAPI_TEST_BOOL"), Some(true));
		std::env::set_var("USERAPI_TEST_BOOL", "no");
		assert_eq!(env_bool("USERAPI_TEST_BOOL"), Some(false));
		std::env::remove_var("USERAPI_TEST_BOOL");
		assert_eq!(env_bool("USERAPI_TEST_BOOL"), None);
	}
}
