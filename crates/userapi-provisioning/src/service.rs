// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The user provisioning service.
//!
//! Orchestrates validation, duplicate detection, username allocation,
//! and directory calls. Each method is a complete request/response
//! cycle; directory calls within a workflow are awaited sequentially
//! because later steps depend on earlier results. Nothing is rolled
//! back on partial failure: the directory is the sole source of truth
//! and every operation is a single call or a short fixed sequence.

use std::collections::HashSet;
use std::sync::Arc;

use userapi_cache::{get_or_fetch, CacheStore, NoopStore, DEFAULT_TTL};
use userapi_graph::{
	DeletedUserFilter, DirectoryClient, DirectoryGroup, DirectoryUser, DirectoryUserUpdate,
	NewDirectoryUser, PasswordProfile, RoleDefinition, UserFilter, UserType,
};

use crate::config::{GroupRole, ProvisioningConfig};
use crate::email::is_valid_email;
use crate::error::ProvisioningError;
use crate::password::generate_random_password;
use crate::username::{allocate_username, username_base};

/// Inputs for creating a user account.
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
	pub first_name: String,
	pub last_name: String,
	pub recovery_email: String,
	pub is_test_user: bool,
}

/// Result of a successful create: the allocated username, the
/// directory id, and the one-time password. Never persisted.
#[derive(Debug, Clone)]
pub struct NewAccountResult {
	pub username: String,
	pub user_id: String,
	pub password: String,
}

/// Inputs for updating an existing account.
#[derive(Debug, Clone)]
pub struct UpdateUserRequest {
	pub first_name: String,
	pub last_name: String,
	pub contact_email: Option<String>,
}

/// Result of a successful update.
#[derive(Debug, Clone)]
pub struct UpdatedAccount {
	pub username: String,
	pub user_id: String,
}

/// Orchestrates user and group management against the directory.
///
/// Holds no cross-request mutable state. The optional cache serves
/// reference data only (group and role-definition lookups); username
/// allocation always queries live directory state.
pub struct UserProvisioningService {
	directory: Arc<dyn DirectoryClient>,
	config: ProvisioningConfig,
	cache: Arc<dyn CacheStore>,
}

impl UserProvisioningService {
	pub fn new(directory: Arc<dyn DirectoryClient>, config: ProvisioningConfig) -> Self {
		Self {
			directory,
			config,
			cache: Arc::new(NoopStore),
		}
	}

	/// Attach a cache store for reference-data lookups.
	pub fn with_cache(mut self, cache: Arc<dyn CacheStore>) -> Self {
		self.cache = cache;
		self
	}

	/// Create a directory account for a new user.
	///
	/// Rejects recovery emails already attached to an active account,
	/// then allocates a principal name that collides with neither
	/// active nor soft-deleted accounts.
	#[tracing::instrument(skip(self, request), fields(is_test_user = request.is_test_user))]
	pub async fn create_user(
		&self,
		request: &CreateUserRequest,
	) -> Result<NewAccountResult, ProvisioningError> {
		let email = request.recovery_email.trim();
		if !is_valid_email(email) {
			return Err(ProvisioningError::InvalidEmail);
		}

		let holders = self
			.directory
			.get_users(&UserFilter::ContactEmail(email.to_string()))
			.await
			.map_err(ProvisioningError::from_directory)?;
		if let Some(holder) = holders.first() {
			tracing::info!(
				username = %holder.user_principal_name,
				"recovery email already attached to an active account"
			);
			return Err(ProvisioningError::UserAlreadyExists {
				username: holder.user_principal_name.clone(),
			});
		}

		let base = username_base(&request.first_name, &request.last_name);
		let username = self
			.allocate_principal_name(&base, Some(email), &request.first_name, &request.last_name)
			.await?;

		let (password, force_change) = if request.is_test_user {
			(self.config.test_user_password.expose().to_string(), false)
		} else {
			(generate_random_password(), true)
		};

		let first_name = request.first_name.trim();
		let last_name = request.last_name.trim();
		let new_user = NewDirectoryUser {
			account_enabled: true,
			display_name: format!("{first_name} {last_name}"),
			given_name: first_name.to_string(),
			surname: last_name.to_string(),
			mail_nickname: base,
			user_principal_name: username.clone(),
			mail: email.to_string(),
			other_mails: vec![email.to_string()],
			user_type: UserType::Guest,
			password_profile: PasswordProfile {
				password: password.clone(),
				force_change_password_next_sign_in: force_change,
			},
		};

		let created = self
			.directory
			.create_user(&new_user)
			.await
			.map_err(ProvisioningError::from_directory)?;
		if created.id.is_empty() {
			return Err(ProvisioningError::service(
				"the directory returned an empty user record",
				"create-user response carried no id",
			));
		}

		tracing::info!(username = %username, user_id = %created.id, "provisioned user");
		Ok(NewAccountResult {
			username,
			user_id: created.id,
			password,
		})
	}

	/// Update an existing account's names and contact email.
	///
	/// The principal name is recomputed only when the given name or
	/// surname actually changed.
	#[tracing::instrument(skip(self, request))]
	pub async fn update_user(
		&self,
		user_id: &str,
		request: &UpdateUserRequest,
	) -> Result<UpdatedAccount, ProvisioningError> {
		let existing = self
			.directory
			.get_user_by_id(user_id)
			.await
			.map_err(ProvisioningError::from_directory)?
			.ok_or_else(|| ProvisioningError::UserDoesNotExist {
				user_id: user_id.to_string(),
			})?;

		let first_name = request.first_name.trim();
		let last_name = request.last_name.trim();

		let name_changed = !existing
			.given_name
			.as_deref()
			.unwrap_or("")
			.eq_ignore_ascii_case(first_name)
			|| !existing
				.surname
				.as_deref()
				.unwrap_or("")
				.eq_ignore_ascii_case(last_name);

		let new_username = if name_changed {
			let base = username_base(first_name, last_name);
			Some(
				self.allocate_principal_name(
					&base,
					request.contact_email.as_deref(),
					first_name,
					last_name,
				)
				.await?,
			)
		} else {
			None
		};

		let mut update = DirectoryUserUpdate {
			display_name: Some(format!("{first_name} {last_name}")),
			given_name: Some(first_name.to_string()),
			surname: Some(last_name.to_string()),
			user_principal_name: new_username.clone(),
			..Default::default()
		};
		if let Some(email) = &request.contact_email {
			update.mail = Some(email.clone());
			update.other_mails = Some(vec![email.clone()]);
		}

		self.directory
			.update_user(user_id, &update)
			.await
			.map_err(ProvisioningError::from_directory)?;

		let username = new_username.unwrap_or(existing.user_principal_name);
		tracing::info!(username = %username, "updated user");
		Ok(UpdatedAccount {
			username,
			user_id: user_id.to_string(),
		})
	}

	/// Delete a user by principal name.
	///
	/// Delegates directly to the directory; a not-found response is not
	/// unwrapped here and surfaces as a service error like any other
	/// directory failure.
	#[tracing::instrument(skip(self))]
	pub async fn delete_user(&self, username: &str) -> Result<(), ProvisioningError> {
		self.directory
			.delete_user(username)
			.await
			.map_err(ProvisioningError::from_directory)?;
		tracing::info!(username = %username, "deleted user");
		Ok(())
	}

	/// Add a user to a group, resolving the group by display name.
	pub async fn add_user_to_group_by_name(
		&self,
		user_id: &str,
		group_name: &str,
	) -> Result<(), ProvisioningError> {
		let group_id = self
			.group_id_by_name(group_name)
			.await?
			.ok_or_else(|| {
				ProvisioningError::service(
					"group not found",
					format!("no directory group named '{group_name}'"),
				)
			})?;
		self.add_user_to_group(user_id, &group_id).await
	}

	/// Add a user to a group by id.
	///
	/// Idempotent: the user's current memberships are checked first so
	/// the directory's duplicate-membership error is never triggered.
	#[tracing::instrument(skip(self))]
	pub async fn add_user_to_group(
		&self,
		user_id: &str,
		group_id: &str,
	) -> Result<(), ProvisioningError> {
		let groups = self
			.directory
			.get_groups_for_user(user_id)
			.await
			.map_err(ProvisioningError::from_directory)?;
		if groups.iter().any(|g| g.id == group_id) {
			tracing::debug!("user already a member, nothing to do");
			return Ok(());
		}

		self.directory
			.add_user_to_group(user_id, group_id)
			.await
			.map_err(ProvisioningError::from_directory)?;
		tracing::info!("added user to group");
		Ok(())
	}

	/// List judges: members of the judge group, minus test accounts in
	/// live mode, minus performance-test users, optionally restricted
	/// by a username substring. Ordered by display name.
	#[tracing::instrument(skip(self))]
	pub async fn judges(
		&self,
		username_filter: Option<&str>,
	) -> Result<Vec<DirectoryUser>, ProvisioningError> {
		let judge_group = self.configured_group(GroupRole::Judges)?;
		let mut members = self
			.directory
			.get_users_in_group(judge_group)
			.await
			.map_err(ProvisioningError::from_directory)?;

		if self.config.is_live {
			let test_group = self.configured_group(GroupRole::TestAccounts)?;
			let test_ids: HashSet<String> = self
				.directory
				.get_users_in_group(test_group)
				.await
				.map_err(ProvisioningError::from_directory)?
				.into_iter()
				.map(|user| user.id)
				.collect();
			members.retain(|user| !test_ids.contains(&user.id));
		}

		let marker = self.config.perf_test_prefix.to_lowercase();
		if !marker.is_empty() {
			members.retain(|user| {
				!user
					.given_name
					.as_deref()
					.unwrap_or("")
					.to_lowercase()
					.starts_with(&marker)
			});
		}

		if let Some(filter) = username_filter {
			let needle = filter.trim().to_lowercase();
			if !needle.is_empty() {
				members.retain(|user| user.user_principal_name.to_lowercase().contains(&needle));
			}
		}

		members.sort_by(|a, b| {
			a.display_name
				.as_deref()
				.unwrap_or("")
				.cmp(b.display_name.as_deref().unwrap_or(""))
		});
		Ok(members)
	}

	/// True when the principal holds the configured administrator role.
	#[tracing::instrument(skip(self))]
	pub async fn is_user_admin(&self, principal_id: &str) -> Result<bool, ProvisioningError> {
		let assignments = self
			.directory
			.get_role_assignments(principal_id)
			.await
			.map_err(ProvisioningError::from_directory)?;
		if assignments.is_empty() {
			return Ok(false);
		}

		let Some(definition) = self.admin_role_definition().await? else {
			return Ok(false);
		};

		Ok(assignments
			.iter()
			.any(|assignment| assignment.role_definition_id == definition.id))
	}

	/// Fetch a user by directory id; `None` when absent.
	pub async fn get_user(
		&self,
		user_id: &str,
	) -> Result<Option<DirectoryUser>, ProvisioningError> {
		self.directory
			.get_user_by_id(user_id)
			.await
			.map_err(ProvisioningError::from_directory)
	}

	/// Fetch a user by exact principal name; `None` when absent.
	pub async fn get_user_by_username(
		&self,
		username: &str,
	) -> Result<Option<DirectoryUser>, ProvisioningError> {
		let users = self
			.directory
			.get_users(&UserFilter::PrincipalName(username.to_string()))
			.await
			.map_err(ProvisioningError::from_directory)?;
		Ok(users.into_iter().next())
	}

	/// Fetch a user by contact email; `None` when absent.
	pub async fn get_user_by_email(
		&self,
		email: &str,
	) -> Result<Option<DirectoryUser>, ProvisioningError> {
		let users = self
			.directory
			.get_users(&UserFilter::ContactEmail(email.to_string()))
			.await
			.map_err(ProvisioningError::from_directory)?;
		Ok(users.into_iter().next())
	}

	/// Groups the user currently belongs to.
	pub async fn groups_for_user(
		&self,
		user_id: &str,
	) -> Result<Vec<DirectoryGroup>, ProvisioningError> {
		self.directory
			.get_groups_for_user(user_id)
			.await
			.map_err(ProvisioningError::from_directory)
	}

	/// User members of a group.
	pub async fn group_members(
		&self,
		group_id: &str,
	) -> Result<Vec<DirectoryUser>, ProvisioningError> {
		self.directory
			.get_users_in_group(group_id)
			.await
			.map_err(ProvisioningError::from_directory)
	}

	/// Gather the collision set and allocate the next free principal
	/// name: active users sharing the base prefix, deleted users
	/// matching the contact email, and deleted users matching the exact
	/// name pair all count as taken.
	async fn allocate_principal_name(
		&self,
		base: &str,
		contact_email: Option<&str>,
		given_name: &str,
		surname: &str,
	) -> Result<String, ProvisioningError> {
		let mut taken: Vec<String> = self
			.directory
			.get_users(&UserFilter::PrincipalPrefix(base.to_string()))
			.await
			.map_err(ProvisioningError::from_directory)?
			.into_iter()
			.map(|user| user.user_principal_name)
			.collect();

		if let Some(email) = contact_email.map(str::trim).filter(|e| !e.is_empty()) {
			taken.extend(
				self.directory
					.get_deleted_usernames(&DeletedUserFilter::ContactEmail(email.to_string()))
					.await
					.map_err(ProvisioningError::from_directory)?,
			);
		}

		let given_name = given_name.trim();
		let surname = surname.trim();
		if !given_name.is_empty() && !surname.is_empty() {
			taken.extend(
				self.directory
					.get_deleted_usernames(&DeletedUserFilter::Name {
						given: given_name.to_string(),
						surname: surname.to_string(),
					})
					.await
					.map_err(ProvisioningError::from_directory)?,
			);
		}

		allocate_username(base, &self.config.email_domain, &taken)
			.map_err(|e| ProvisioningError::service("failed to allocate a username", e))
	}

	fn configured_group(&self, role: GroupRole) -> Result<&str, ProvisioningError> {
		self.config.groups.get(role).ok_or_else(|| {
			ProvisioningError::service(
				"group is not configured",
				format!("no group id configured for role '{}'", role.as_str()),
			)
		})
	}

	async fn group_id_by_name(
		&self,
		name: &str,
	) -> Result<Option<String>, ProvisioningError> {
		let key = format!("userapi:group-by-name:{name}");
		let group: Option<DirectoryGroup> =
			get_or_fetch(self.cache.as_ref(), &key, DEFAULT_TTL, || async {
				self.directory.get_group_by_name(name).await
			})
			.await
			.map_err(ProvisioningError::from_directory)?;
		Ok(group.map(|g| g.id))
	}

	async fn admin_role_definition(
		&self,
	) -> Result<Option<RoleDefinition>, ProvisioningError> {
		let name = self.config.admin_role_name.clone();
		let key = format!("userapi:role-definition:{name}");
		get_or_fetch(self.cache.as_ref(), &key, DEFAULT_TTL, || async {
			self.directory.get_role_definition(&name).await
		})
		.await
		.map_err(ProvisioningError::from_directory)
	}
}
