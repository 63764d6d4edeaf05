// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Centralized configuration management for the UserApi server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`USERAPI_SERVER_*`)
//!
//! Configuration is resolved once at startup into an immutable
//! [`ServerConfig`] that is passed around explicitly; there are no
//! global settings objects.
//!
//! # Usage
//!
//! ```ignore
//! use userapi_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("Server listening on {}:{}", config.http.host, config.http.port);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::debug;

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub graph: GraphConfig,
	pub users: UsersConfig,
	pub groups: GroupsConfig,
	pub cache: CacheConfig,
	pub logging: LoggingConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`USERAPI_SERVER_*`)
/// 2. Config file (`/etc/userapi/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	let mut sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	];

	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Load configuration from environment only (for testing or simple deployments).
pub fn load_config_from_env() -> Result<ServerConfig, ConfigError> {
	let mut merged = ServerConfigLayer::default();
	merged.merge(EnvSource.load()?);
	finalize(merged)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	let mut sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	];

	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Resolve a merged layer into the final, validated configuration.
pub fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = HttpConfig::from_layer(layer.http.unwrap_or_default());
	let graph = GraphConfig::from_layer(layer.graph.unwrap_or_default())?;
	let users = UsersConfig::from_layer(layer.users.unwrap_or_default())?;
	let groups = GroupsConfig::from_layer(layer.groups.unwrap_or_default());
	let cache = CacheConfig::from_layer(layer.cache.unwrap_or_default());
	let logging = LoggingConfig::from_layer(layer.logging.unwrap_or_default());

	Ok(ServerConfig {
		http,
		graph,
		users,
		groups,
		cache,
		logging,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn minimal_layer() -> ServerConfigLayer {
		let toml = r#"
			[graph]
			tenant_id = "tenant-1"
			client_id = "client-1"
			client_secret = "secret-1"

			[users]
			email_domain = "reform.example"
		"#;
		toml::from_str(toml).unwrap()
	}

	#[test]
	fn minimal_configuration_finalizes_with_defaults() {
		let config = finalize(minimal_layer()).unwrap();

		assert_eq!(config.http.host, "0.0.0.0");
		assert_eq!(config.http.port, 8080);
		assert_eq!(config.socket_addr(), "0.0.0.0:8080");
		assert_eq!(config.graph.tenant_id, "tenant-1");
		assert_eq!(config.users.email_domain, "reform.example");
		assert_eq!(config.users.admin_role_name, "User Administrator");
		assert_eq!(config.users.perf_test_prefix, "TP");
		assert!(!config.users.is_live);
		assert!(config.cache.redis_url.is_none());
		assert_eq!(config.cache.ttl_secs, 3 * 60 * 60);
		assert_eq!(config.logging.level, "info");
	}

	#[test]
	fn missing_graph_credentials_fail_validation() {
		let layer: ServerConfigLayer = toml::from_str(
			r#"
			[users]
			email_domain = "reform.example"
		"#,
		)
		.unwrap();

		assert!(matches!(
			finalize(layer),
			Err(ConfigError::MissingField(_))
		));
	}

	#[test]
	fn missing_email_domain_fails_validation() {
		let layer: ServerConfigLayer = toml::from_str(
			r#"
			[graph]
			tenant_id = "tenant-1"
			client_id = "client-1"
			client_secret = "secret-1"
		"#,
		)
		.unwrap();

		assert!(matches!(
			finalize(layer),
			Err(ConfigError::MissingField("users.email_domain"))
		));
	}

	#[test]
	fn later_layers_override_earlier_ones() {
		let mut base = minimal_layer();
		let overlay: ServerConfigLayer = toml::from_str(
			r#"
			[http]
			port = 9090

			[users]
			is_live = true
		"#,
		)
		.unwrap();

		base.merge(overlay);
		let config = finalize(base).unwrap();

		assert_eq!(config.http.port, 9090);
		assert!(config.users.is_live);
		// Untouched values survive the merge.
		assert_eq!(config.graph.tenant_id, "tenant-1");
	}

	#[test]
	fn full_configuration_round_trips_through_toml() {
		let layer: ServerConfigLayer = toml::from_str(
			r#"
			[http]
			host = "127.0.0.1"
			port = 3000

			[graph]
			tenant_id = "tenant-1"
			client_id = "client-1"
			client_secret = "secret-1"
			timeout_secs = 10

			[users]
			email_domain = "reform.example"
			test_user_password = "Fixed-Pass-1"
			is_live = true

			[groups]
			judges_group_id = "jg-1"
			test_accounts_group_id = "tg-1"

			[cache]
			redis_url = "redis://127.0.0.1:6379"
			ttl_secs = 600

			[logging]
			level = "debug"
		"#,
		)
		.unwrap();

		let config = finalize(layer).unwrap();

		assert_eq!(config.http.host, "127.0.0.1");
		assert_eq!(config.graph.timeout_secs, 10);
		assert_eq!(config.users.test_user_password.expose(), "Fixed-Pass-1");
		assert_eq!(config.groups.judges_group_id.as_deref(), Some("jg-1"));
		assert_eq!(
			config.groups.test_accounts_group_id.as_deref(),
			Some("tg-1")
		);
		assert_eq!(
			config.cache.redis_url.as_deref(),
			Some("redis://127.0.0.1:6379")
		);
		assert_eq!(config.cache.ttl_secs, 600);
		assert_eq!(config.logging.level, "debug");
	}
}
