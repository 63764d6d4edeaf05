// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The directory client: trait and Graph-backed implementation.

use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use userapi_common_http::{retry, RetryConfig};

use crate::auth::{GraphAuthConfig, TokenProvider};
use crate::error::GraphError;
use crate::filter::{escape_odata_literal, DeletedUserFilter, UserFilter};
use crate::models::{
	DirectoryGroup, DirectoryUser, DirectoryUserUpdate, GraphList, NewDirectoryUser,
	RoleAssignment, RoleDefinition,
};

const DEFAULT_BASE_URL: &str = "https://graph.microsoft.com/v1.0";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_SELECT: &str =
	"id,userPrincipalName,displayName,givenName,surname,mail,otherMails,accountEnabled,userType";
const GROUP_SELECT: &str = "id,displayName";

/// Operations the provisioning layer needs from the identity directory.
///
/// The directory is the system of record; this service never caches
/// authoritative identity state beyond a single call. Implementations
/// must model absence explicitly: read lookups return `Ok(None)` (or an
/// empty list) rather than an error when the target does not exist.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
	/// Create a user and return the directory's record of it.
	async fn create_user(&self, user: &NewDirectoryUser) -> Result<DirectoryUser, GraphError>;

	/// Apply a partial update to an existing user.
	async fn update_user(
		&self,
		user_id: &str,
		update: &DirectoryUserUpdate,
	) -> Result<(), GraphError>;

	/// Soft-delete a user by principal name.
	async fn delete_user(&self, principal_name: &str) -> Result<(), GraphError>;

	/// Fetch active users matching a filter.
	async fn get_users(&self, filter: &UserFilter) -> Result<Vec<DirectoryUser>, GraphError>;

	/// Fetch a user by id; `None` when absent.
	async fn get_user_by_id(&self, user_id: &str) -> Result<Option<DirectoryUser>, GraphError>;

	/// Fetch principal names of soft-deleted users matching a filter.
	async fn get_deleted_usernames(
		&self,
		filter: &DeletedUserFilter,
	) -> Result<Vec<String>, GraphError>;

	/// Fetch the user members of a group.
	async fn get_users_in_group(&self, group_id: &str) -> Result<Vec<DirectoryUser>, GraphError>;

	/// Fetch the groups a user belongs to.
	async fn get_groups_for_user(&self, user_id: &str)
		-> Result<Vec<DirectoryGroup>, GraphError>;

	/// Look up a group by display name; `None` when absent.
	async fn get_group_by_name(&self, name: &str) -> Result<Option<DirectoryGroup>, GraphError>;

	/// Look up a group by id; `None` when absent.
	async fn get_group_by_id(&self, group_id: &str)
		-> Result<Option<DirectoryGroup>, GraphError>;

	/// Fetch the role assignments held by a principal.
	async fn get_role_assignments(
		&self,
		principal_id: &str,
	) -> Result<Vec<RoleAssignment>, GraphError>;

	/// Look up a role definition by display name; `None` when absent.
	async fn get_role_definition(
		&self,
		display_name: &str,
	) -> Result<Option<RoleDefinition>, GraphError>;

	/// Add a user to a group. Not idempotent at the directory level: the
	/// directory rejects duplicate membership, so callers check first.
	async fn add_user_to_group(&self, user_id: &str, group_id: &str) -> Result<(), GraphError>;
}

/// Transport settings for [`GraphClient`].
#[derive(Debug, Clone)]
pub struct GraphClientConfig {
	/// Graph API base URL, without a trailing slash.
	pub base_url: String,
	/// Per-request timeout.
	pub timeout: Duration,
	/// Retry policy for idempotent reads.
	pub retry: RetryConfig,
}

impl Default for GraphClientConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_string(),
			timeout: DEFAULT_TIMEOUT,
			retry: RetryConfig::default(),
		}
	}
}

impl GraphClientConfig {
	/// Override the Graph base URL (used by tests against a stub).
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}
}

/// Graph-backed [`DirectoryClient`].
///
/// Reads are retried on transient failures (connect errors, timeouts,
/// 429, 5xx); writes are sent exactly once.
pub struct GraphClient {
	base_url: String,
	http: reqwest::Client,
	tokens: TokenProvider,
	retry: RetryConfig,
}

impl GraphClient {
	pub fn new(auth: GraphAuthConfig, config: GraphClientConfig) -> Self {
		let http = userapi_common_http::new_client_with_timeout(config.timeout);
		let tokens = TokenProvider::new(auth, http.clone());
		Self {
			base_url: config.base_url,
			http,
			tokens,
			retry: config.retry,
		}
	}

	fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	async fn get_json<T: DeserializeOwned>(
		&self,
		path: &str,
		query: &[(&str, &str)],
	) -> Result<T, GraphError> {
		let url = self.url(path);
		retry(&self.retry, path, || self.get_json_once(&url, query)).await
	}

	async fn get_json_once<T: DeserializeOwned>(
		&self,
		url: &str,
		query: &[(&str, &str)],
	) -> Result<T, GraphError> {
		let token = self.tokens.bearer_token().await?;
		let response = self
			.http
			.get(url)
			.query(query)
			.bearer_auth(token)
			.send()
			.await?;
		Self::parse_json(response).await
	}

	async fn get_list<T: DeserializeOwned>(
		&self,
		path: &str,
		query: &[(&str, &str)],
	) -> Result<Vec<T>, GraphError> {
		let list: GraphList<T> = self.get_json(path, query).await?;
		Ok(list.value)
	}

	async fn get_optional<T: DeserializeOwned>(
		&self,
		path: &str,
		query: &[(&str, &str)],
	) -> Result<Option<T>, GraphError> {
		match self.get_json::<T>(path, query).await {
			Ok(value) => Ok(Some(value)),
			Err(e) if e.is_not_found() => Ok(None),
			Err(e) => Err(e),
		}
	}

	async fn post_json<B: Serialize, T: DeserializeOwned>(
		&self,
		path: &str,
		body: &B,
	) -> Result<T, GraphError> {
		let token = self.tokens.bearer_token().await?;
		let response = self
			.http
			.post(self.url(path))
			.bearer_auth(token)
			.json(body)
			.send()
			.await?;
		Self::parse_json(response).await
	}

	async fn post_no_content<B: Serialize>(&self, path: &str, body: &B) -> Result<(), GraphError> {
		let token = self.tokens.bearer_token().await?;
		let response = self
			.http
			.post(self.url(path))
			.bearer_auth(token)
			.json(body)
			.send()
			.await?;
		Self::expect_success(response).await
	}

	async fn patch_no_content<B: Serialize>(
		&self,
		path: &str,
		body: &B,
	) -> Result<(), GraphError> {
		let token = self.tokens.bearer_token().await?;
		let response = self
			.http
			.patch(self.url(path))
			.bearer_auth(token)
			.json(body)
			.send()
			.await?;
		Self::expect_success(response).await
	}

	async fn delete_no_content(&self, path: &str) -> Result<(), GraphError> {
		let token = self.tokens.bearer_token().await?;
		let response = self
			.http
			.delete(self.url(path))
			.bearer_auth(token)
			.send()
			.await?;
		Self::expect_success(response).await
	}

	async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, GraphError> {
		if !response.status().is_success() {
			return Err(Self::api_error(response).await);
		}
		response
			.json::<T>()
			.await
			.map_err(|e| GraphError::Parse(format!("failed to parse response body: {e}")))
	}

	async fn expect_success(response: Response) -> Result<(), GraphError> {
		if !response.status().is_success() {
			return Err(Self::api_error(response).await);
		}
		Ok(())
	}

	async fn api_error(response: Response) -> GraphError {
		let status = response.status().as_u16();
		let body = response.text().await.unwrap_or_default();
		match serde_json::from_str::<GraphErrorBody>(&body) {
			Ok(parsed) => GraphError::Api {
				status,
				code: parsed.error.code,
				message: parsed.error.message,
			},
			Err(_) => GraphError::Api {
				status,
				code: "unknown".to_string(),
				message: if body.is_empty() {
					format!("directory returned status {status}")
				} else {
					body
				},
			},
		}
	}
}

#[derive(Debug, serde::Deserialize)]
struct GraphErrorBody {
	error: GraphErrorDetail,
}

#[derive(Debug, serde::Deserialize)]
struct GraphErrorDetail {
	#[serde(default)]
	code: String,
	#[serde(default)]
	message: String,
}

#[async_trait]
impl DirectoryClient for GraphClient {
	#[tracing::instrument(skip(self, user), fields(principal_name = %user.user_principal_name))]
	async fn create_user(&self, user: &NewDirectoryUser) -> Result<DirectoryUser, GraphError> {
		tracing::debug!("creating directory user");
		self.post_json("/users", user).await
	}

	#[tracing::instrument(skip(self, update))]
	async fn update_user(
		&self,
		user_id: &str,
		update: &DirectoryUserUpdate,
	) -> Result<(), GraphError> {
		tracing::debug!("updating directory user");
		self.patch_no_content(&format!("/users/{user_id}"), update)
			.await
	}

	#[tracing::instrument(skip(self))]
	async fn delete_user(&self, principal_name: &str) -> Result<(), GraphError> {
		tracing::debug!("deleting directory user");
		self.delete_no_content(&format!("/users/{principal_name}"))
			.await
	}

	#[tracing::instrument(skip(self))]
	async fn get_users(&self, filter: &UserFilter) -> Result<Vec<DirectoryUser>, GraphError> {
		self.get_list(
			"/users",
			&[("$filter", filter.to_odata().as_str()), ("$select", USER_SELECT)],
		)
		.await
	}

	#[tracing::instrument(skip(self))]
	async fn get_user_by_id(&self, user_id: &str) -> Result<Option<DirectoryUser>, GraphError> {
		self.get_optional(&format!("/users/{user_id}"), &[("$select", USER_SELECT)])
			.await
	}

	#[tracing::instrument(skip(self))]
	async fn get_deleted_usernames(
		&self,
		filter: &DeletedUserFilter,
	) -> Result<Vec<String>, GraphError> {
		let users: Vec<DirectoryUser> = self
			.get_list(
				"/directory/deletedItems/microsoft.graph.user",
				&[
					("$filter", filter.to_odata().as_str()),
					("$select", "id,userPrincipalName"),
				],
			)
			.await?;

		Ok(users
			.into_iter()
			.map(|u| u.user_principal_name)
			.filter(|name| !name.is_empty())
			.collect())
	}

	#[tracing::instrument(skip(self))]
	async fn get_users_in_group(&self, group_id: &str) -> Result<Vec<DirectoryUser>, GraphError> {
		self.get_list(
			&format!("/groups/{group_id}/members/microsoft.graph.user"),
			&[("$select", USER_SELECT)],
		)
		.await
	}

	#[tracing::instrument(skip(self))]
	async fn get_groups_for_user(
		&self,
		user_id: &str,
	) -> Result<Vec<DirectoryGroup>, GraphError> {
		self.get_list(
			&format!("/users/{user_id}/memberOf/microsoft.graph.group"),
			&[("$select", GROUP_SELECT)],
		)
		.await
	}

	#[tracing::instrument(skip(self))]
	async fn get_group_by_name(&self, name: &str) -> Result<Option<DirectoryGroup>, GraphError> {
		let filter = format!("displayName eq '{}'", escape_odata_literal(name));
		let groups: Vec<DirectoryGroup> = self
			.get_list(
				"/groups",
				&[("$filter", filter.as_str()), ("$select", GROUP_SELECT)],
			)
			.await?;
		Ok(groups.into_iter().next())
	}

	#[tracing::instrument(skip(self))]
	async fn get_group_by_id(
		&self,
		group_id: &str,
	) -> Result<Option<DirectoryGroup>, GraphError> {
		self.get_optional(&format!("/groups/{group_id}"), &[("$select", GROUP_SELECT)])
			.await
	}

	#[tracing::instrument(skip(self))]
	async fn get_role_assignments(
		&self,
		principal_id: &str,
	) -> Result<Vec<RoleAssignment>, GraphError> {
		let filter = format!("principalId eq '{}'", escape_odata_literal(principal_id));
		self.get_list(
			"/roleManagement/directory/roleAssignments",
			&[("$filter", filter.as_str())],
		)
		.await
	}

	#[tracing::instrument(skip(self))]
	async fn get_role_definition(
		&self,
		display_name: &str,
	) -> Result<Option<RoleDefinition>, GraphError> {
		let filter = format!("displayName eq '{}'", escape_odata_literal(display_name));
		let definitions: Vec<RoleDefinition> = self
			.get_list(
				"/roleManagement/directory/roleDefinitions",
				&[("$filter", filter.as_str())],
			)
			.await?;
		Ok(definitions.into_iter().next())
	}

	#[tracing::instrument(skip(self))]
	async fn add_user_to_group(&self, user_id: &str, group_id: &str) -> Result<(), GraphError> {
		tracing::debug!("adding user to group");
		let body = json!({
			"@odata.id": format!("{}/directoryObjects/{}", self.base_url, user_id),
		});
		self.post_no_content(&format!("/groups/{group_id}/members/$ref"), &body)
			.await
	}
}
