// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Wire models for the Graph directory API.
//!
//! Field names follow Graph's camelCase convention on the wire; the Rust
//! structs stay snake_case via serde rename rules.

use serde::{Deserialize, Serialize};

/// Directory account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
	Member,
	Guest,
	/// Forward compatibility with values this service does not produce.
	#[serde(other)]
	Unknown,
}

/// A user record as returned by the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUser {
	pub id: String,
	#[serde(default)]
	pub user_principal_name: String,
	pub display_name: Option<String>,
	pub given_name: Option<String>,
	pub surname: Option<String>,
	pub mail: Option<String>,
	#[serde(default)]
	pub other_mails: Vec<String>,
	pub account_enabled: Option<bool>,
	pub user_type: Option<UserType>,
}

/// Password settings submitted with a create-user request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordProfile {
	pub password: String,
	pub force_change_password_next_sign_in: bool,
}

/// Payload for creating a directory user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDirectoryUser {
	pub account_enabled: bool,
	pub display_name: String,
	pub given_name: String,
	pub surname: String,
	pub mail_nickname: String,
	pub user_principal_name: String,
	pub mail: String,
	pub other_mails: Vec<String>,
	pub user_type: UserType,
	pub password_profile: PasswordProfile,
}

/// Partial update payload for an existing directory user.
///
/// Only fields that are `Some` are serialized, so an update touches
/// exactly the attributes the caller set.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUserUpdate {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub given_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub surname: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_principal_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub mail: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub other_mails: Option<Vec<String>>,
}

/// A directory group; lookup/reference data only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryGroup {
	pub id: String,
	pub display_name: Option<String>,
}

/// An assignment of a role definition to a principal.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignment {
	pub id: String,
	pub principal_id: String,
	pub role_definition_id: String,
}

/// A directory role definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDefinition {
	pub id: String,
	pub display_name: String,
}

/// Graph collection envelope: `{"value": [...]}`.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphList<T> {
	#[serde(default = "Vec::new")]
	pub value: Vec<T>,
}
