// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Response bodies.
//!
//! External responses use snake_case field names regardless of the
//! directory's camelCase wire format.

use serde::Serialize;
use userapi_graph::{DirectoryGroup, DirectoryUser};

/// A user as rendered to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
	pub user_id: String,
	pub username: String,
	pub display_name: Option<String>,
	pub first_name: Option<String>,
	pub last_name: Option<String>,
	pub email: Option<String>,
}

impl From<DirectoryUser> for UserResponse {
	fn from(user: DirectoryUser) -> Self {
		Self {
			user_id: user.id,
			username: user.user_principal_name,
			display_name: user.display_name,
			first_name: user.given_name,
			last_name: user.surname,
			email: user.mail,
		}
	}
}

/// A group as rendered to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct GroupResponse {
	pub group_id: String,
	pub display_name: Option<String>,
}

impl From<DirectoryGroup> for GroupResponse {
	fn from(group: DirectoryGroup) -> Self {
		Self {
			group_id: group.id,
			display_name: group.display_name,
		}
	}
}

/// Result of `POST /api/users`. The password is returned exactly once
/// and never stored.
#[derive(Debug, Serialize)]
pub struct NewAccountResponse {
	pub username: String,
	pub user_id: String,
	pub password: String,
}

/// Result of `PUT /api/users/{id}`.
#[derive(Debug, Serialize)]
pub struct UpdatedAccountResponse {
	pub username: String,
	pub user_id: String,
}

/// Result of `GET /api/users/{id}/is-admin`.
#[derive(Debug, Serialize)]
pub struct IsAdminResponse {
	pub is_admin: bool,
}

/// Result of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
	pub status: &'static str,
	pub version: &'static str,
	pub timestamp: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_response_uses_snake_case_fields() {
		let user = DirectoryUser {
			id: "id-1".to_string(),
			user_principal_name: "jane.doe@reform.example".to_string(),
			display_name: Some("Jane Doe".to_string()),
			given_name: Some("Jane".to_string()),
			surname: Some("Doe".to_string()),
			mail: Some("jane@example.com".to_string()),
			other_mails: vec!["jane@example.com".to_string()],
			account_enabled: Some(true),
			user_type: None,
		};

		let json = serde_json::to_value(UserResponse::from(user)).unwrap();
		assert_eq!(json["user_id"], "id-1");
		assert_eq!(json["username"], "jane.doe@reform.example");
		assert_eq!(json["display_name"], "Jane Doe");
		assert_eq!(json["first_name"], "Jane");
		assert_eq!(json["last_name"], "Doe");
		assert_eq!(json["email"], "jane@example.com");
	}
}
