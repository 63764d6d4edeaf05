// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! OAuth2 client-credentials token acquisition for the directory.
//!
//! Tokens are fetched from the tenant authority and cached in-process;
//! a token is reused until it is within [`EXPIRY_MARGIN`] of expiring.
//! Secrets are wrapped in [`SecretString`] and never logged.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;
use userapi_common_secret::SecretString;

use crate::error::GraphError;

const DEFAULT_AUTHORITY_URL: &str = "https://login.microsoftonline.com";
const DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Refresh tokens this long before the authority-reported expiry.
const EXPIRY_MARGIN: Duration = Duration::seconds(60);

/// Credentials and endpoints for the client-credentials flow.
#[derive(Debug, Clone)]
pub struct GraphAuthConfig {
	/// Directory (tenant) id.
	pub tenant_id: String,
	/// Application (client) id.
	pub client_id: String,
	/// Application client secret (never logged).
	pub client_secret: SecretString,
	/// Token authority base URL.
	pub authority_url: String,
	/// OAuth scope to request.
	pub scope: String,
}

impl GraphAuthConfig {
	/// Build a config with the standard authority and Graph default scope.
	pub fn new(
		tenant_id: impl Into<String>,
		client_id: impl Into<String>,
		client_secret: SecretString,
	) -> Self {
		Self {
			tenant_id: tenant_id.into(),
			client_id: client_id.into(),
			client_secret,
			authority_url: DEFAULT_AUTHORITY_URL.to_string(),
			scope: DEFAULT_SCOPE.to_string(),
		}
	}

	/// Override the authority base URL (used by tests against a stub).
	pub fn with_authority_url(mut self, authority_url: impl Into<String>) -> Self {
		self.authority_url = authority_url.into();
		self
	}

	fn token_url(&self) -> String {
		format!("{}/{}/oauth2/v2.0/token", self.authority_url, self.tenant_id)
	}
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
	access_token: SecretString,
	expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
	error: String,
	error_description: Option<String>,
}

struct CachedToken {
	token: SecretString,
	expires_at: DateTime<Utc>,
}

impl CachedToken {
	fn is_fresh(&self, now: DateTime<Utc>) -> bool {
		self.expires_at - EXPIRY_MARGIN > now
	}
}

/// Acquires and caches bearer tokens for directory requests.
pub struct TokenProvider {
	config: GraphAuthConfig,
	http: reqwest::Client,
	cached: RwLock<Option<CachedToken>>,
}

impl TokenProvider {
	pub fn new(config: GraphAuthConfig, http: reqwest::Client) -> Self {
		Self {
			config,
			http,
			cached: RwLock::new(None),
		}
	}

	/// Return a bearer token, fetching a fresh one when the cached token
	/// is absent or close to expiry.
	pub async fn bearer_token(&self) -> Result<String, GraphError> {
		let now = Utc::now();

		{
			let cached = self.cached.read().await;
			if let Some(token) = cached.as_ref() {
				if token.is_fresh(now) {
					return Ok(token.token.expose().to_string());
				}
			}
		}

		let mut cached = self.cached.write().await;
		// Another request may have refreshed while we waited for the lock.
		if let Some(token) = cached.as_ref() {
			if token.is_fresh(now) {
				return Ok(token.token.expose().to_string());
			}
		}

		let fresh = self.fetch_token().await?;
		let value = fresh.token.expose().to_string();
		*cached = Some(fresh);
		Ok(value)
	}

	#[tracing::instrument(skip(self), fields(tenant_id = %self.config.tenant_id))]
	async fn fetch_token(&self) -> Result<CachedToken, GraphError> {
		tracing::debug!("requesting client-credentials token");

		let response = self
			.http
			.post(self.config.token_url())
			.form(&[
				("grant_type", "client_credentials"),
				("client_id", self.config.client_id.as_str()),
				("client_secret", self.config.client_secret.expose()),
				("scope", self.config.scope.as_str()),
			])
			.send()
			.await?;

		let status = response.status();
		let body = response.text().await?;

		if !status.is_success() {
			let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
				Ok(err) => err.error_description.unwrap_or(err.error),
				Err(_) => format!("authority returned status {status}"),
			};
			return Err(GraphError::Auth(message));
		}

		let token: TokenResponse = serde_json::from_str(&body)
			.map_err(|e| GraphError::Parse(format!("failed to parse token response: {e}")))?;

		Ok(CachedToken {
			token: token.access_token,
			expires_at: Utc::now() + Duration::seconds(token.expires_in),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn token_url_includes_tenant() {
		let config = GraphAuthConfig::new(
			"tenant-123",
			"client-abc",
			SecretString::new("secret"),
		);
		assert_eq!(
			config.token_url(),
			"https://login.microsoftonline.com/tenant-123/oauth2/v2.0/token"
		);
	}

	#[test]
	fn authority_override_is_used() {
		let config = GraphAuthConfig::new("t", "c", SecretString::new("s"))
			.with_authority_url("http://127.0.0.1:9999");
		assert_eq!(config.token_url(), "http://127.0.0.1:9999/t/oauth2/v2.0/token");
	}

	#[test]
	fn cached_token_freshness_honors_margin() {
		let now = Utc::now();
		let fresh = CachedToken {
			token: SecretString::new("t"),
			expires_at: now + Duration::seconds(3600),
		};
		assert!(fresh.is_fresh(now));

		let nearly_expired = CachedToken {
			token: SecretString::new("t"),
			expires_at: now + Duration::seconds(30),
		};
		assert!(!nearly_expired.is_fresh(now));
	}

	#[test]
	fn client_secret_never_in_debug() {
		let config = GraphAuthConfig::new("t", "c", SecretString::new("super_secret"));
		let debug = format!("{config:?}");
		assert!(!debug.contains("super_secret"));
		assert!(debug.contains("[REDACTED]"));
	}
}
