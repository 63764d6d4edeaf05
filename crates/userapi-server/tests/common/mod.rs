// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Recording in-memory directory for router tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use userapi_graph::{
	DeletedUserFilter, DirectoryClient, DirectoryGroup, DirectoryUser, DirectoryUserUpdate,
	GraphError, NewDirectoryUser, RoleAssignment, RoleDefinition, UserFilter, UserType,
};

/// The id the mock assigns to every created user.
pub const CREATED_USER_ID: &str = "new-user-id";

/// In-memory [`DirectoryClient`] that records writes so tests can
/// assert on what the HTTP layer drove the service to do.
#[derive(Default)]
pub struct MockDirectory {
	pub users: Mutex<Vec<DirectoryUser>>,
	pub groups_by_name: Mutex<HashMap<String, DirectoryGroup>>,
	pub group_members: Mutex<HashMap<String, Vec<DirectoryUser>>>,
	pub user_groups: Mutex<HashMap<String, Vec<DirectoryGroup>>>,
	pub role_assignments: Mutex<HashMap<String, Vec<RoleAssignment>>>,
	pub role_definitions: Mutex<Vec<RoleDefinition>>,

	pub created: Mutex<Vec<NewDirectoryUser>>,
	pub updated: Mutex<Vec<(String, DirectoryUserUpdate)>>,
	pub deleted: Mutex<Vec<String>>,
	pub added_to_group: Mutex<Vec<(String, String)>>,
}

impl MockDirectory {
	pub fn new() -> Self {
		Self::default()
	}
}

/// Build a directory user with the fields the handlers render.
pub fn user(id: &str, principal_name: &str, given: &str, surname: &str) -> DirectoryUser {
	DirectoryUser {
		id: id.to_string(),
		user_principal_name: principal_name.to_string(),
		display_name: Some(format!("{given} {surname}")),
		given_name: Some(given.to_string()),
		surname: Some(surname.to_string()),
		mail: None,
		other_mails: Vec::new(),
		account_enabled: Some(true),
		user_type: Some(UserType::Guest),
	}
}

#[async_trait]
impl DirectoryClient for MockDirectory {
	async fn create_user(&self, new_user: &NewDirectoryUser) -> Result<DirectoryUser, GraphError> {
		self.created.lock().unwrap().push(new_user.clone());
		Ok(DirectoryUser {
			id: CREATED_USER_ID.to_string(),
			user_principal_name: new_user.user_principal_name.clone(),
			display_name: Some(new_user.display_name.clone()),
			given_name: Some(new_user.given_name.clone()),
			surname: Some(new_user.surname.clone()),
			mail: Some(new_user.mail.clone()),
			other_mails: new_user.other_mails.clone(),
			account_enabled: Some(new_user.account_enabled),
			user_type: Some(new_user.user_type),
		})
	}

	async fn update_user(
		&self,
		user_id: &str,
		update: &DirectoryUserUpdate,
	) -> Result<(), GraphError> {
		self.updated
			.lock()
			.unwrap()
			.push((user_id.to_string(), update.clone()));
		Ok(())
	}

	async fn delete_user(&self, principal_name: &str) -> Result<(), GraphError> {
		self.deleted.lock().unwrap().push(principal_name.to_string());
		Ok(())
	}

	async fn get_users(&self, filter: &UserFilter) -> Result<Vec<DirectoryUser>, GraphError> {
		let users = self.users.lock().unwrap();
		let matching = users
			.iter()
			.filter(|user| match filter {
				UserFilter::ContactEmail(email) => user
					.other_mails
					.iter()
					.any(|m| m.eq_ignore_ascii_case(email)),
				UserFilter::PrincipalPrefix(prefix) => user
					.user_principal_name
					.to_lowercase()
					.starts_with(&prefix.to_lowercase()),
				UserFilter::PrincipalName(name) => {
					user.user_principal_name.eq_ignore_ascii_case(name)
				}
			})
			.cloned()
			.collect();
		Ok(matching)
	}

	async fn get_user_by_id(&self, user_id: &str) -> Result<Option<DirectoryUser>, GraphError> {
		let users = self.users.lock().unwrap();
		Ok(users.iter().find(|user| user.id == user_id).cloned())
	}

	async fn get_deleted_usernames(
		&self,
		_filter: &DeletedUserFilter,
	) -> Result<Vec<String>, GraphError> {
		Ok(Vec::new())
	}

	async fn get_users_in_group(&self, group_id: &str) -> Result<Vec<DirectoryUser>, GraphError> {
		Ok(self
			.group_members
			.lock()
			.unwrap()
			.get(group_id)
			.cloned()
			.unwrap_or_default())
	}

	async fn get_groups_for_user(
		&self,
		user_id: &str,
	) -> Result<Vec<DirectoryGroup>, GraphError> {
		Ok(self
			.user_groups
			.lock()
			.unwrap()
			.get(user_id)
			.cloned()
			.unwrap_or_default())
	}

	async fn get_group_by_name(&self, name: &str) -> Result<Option<DirectoryGroup>, GraphError> {
		Ok(self.groups_by_name.lock().unwrap().get(name).cloned())
	}

	async fn get_group_by_id(
		&self,
		group_id: &str,
	) -> Result<Option<DirectoryGroup>, GraphError> {
		Ok(self
			.groups_by_name
			.lock()
			.unwrap()
			.values()
			.find(|group| group.id == group_id)
			.cloned())
	}

	async fn get_role_assignments(
		&self,
		principal_id: &str,
	) -> Result<Vec<RoleAssignment>, GraphError> {
		Ok(self
			.role_assignments
			.lock()
			.unwrap()
			.get(principal_id)
			.cloned()
			.unwrap_or_default())
	}

	async fn get_role_definition(
		&self,
		display_name: &str,
	) -> Result<Option<RoleDefinition>, GraphError> {
		Ok(self
			.role_definitions
			.lock()
			.unwrap()
			.iter()
			.find(|definition| definition.display_name == display_name)
			.cloned())
	}

	async fn add_user_to_group(&self, user_id: &str, group_id: &str) -> Result<(), GraphError> {
		self.added_to_group
			.lock()
			.unwrap()
			.push((user_id.to_string(), group_id.to_string()));
		Ok(())
	}
}
