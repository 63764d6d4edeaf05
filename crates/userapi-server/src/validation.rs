// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Request bodies and their validators.
//!
//! Validators are pure and synchronous, and collect every violated rule
//! rather than stopping at the first, so a client sees all of its
//! mistakes in one response.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use userapi_provisioning::email::is_valid_email;

/// Field name to message, serialized as the `errors` object of a 400
/// response. BTreeMap keeps the field order stable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
		self.0.insert(field.into(), message.into());
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn get(&self, field: &str) -> Option<&str> {
		self.0.get(field).map(String::as_str)
	}

	fn into_result(self) -> Result<(), ValidationErrors> {
		if self.is_empty() {
			Ok(())
		} else {
			Err(self)
		}
	}
}

/// Body of `POST /api/users`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
	#[serde(default)]
	pub first_name: String,
	#[serde(default)]
	pub last_name: String,
	#[serde(default)]
	pub recovery_email: String,
	#[serde(default)]
	pub is_test_user: bool,
}

impl CreateUserRequest {
	pub fn validate(&self) -> Result<(), ValidationErrors> {
		let mut errors = ValidationErrors::new();
		if self.first_name.trim().is_empty() {
			errors.add("first_name", "first name is required");
		}
		if self.last_name.trim().is_empty() {
			errors.add("last_name", "last name is required");
		}
		let email = self.recovery_email.trim();
		if email.is_empty() {
			errors.add("recovery_email", "recovery email is required");
		} else if !is_valid_email(email) {
			errors.add("recovery_email", "recovery email is not a valid email address");
		}
		errors.into_result()
	}
}

/// Body of `PUT /api/users/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserAccountRequest {
	#[serde(default)]
	pub first_name: String,
	#[serde(default)]
	pub last_name: String,
	#[serde(default)]
	pub contact_email: Option<String>,
}

impl UpdateUserAccountRequest {
	pub fn validate(&self) -> Result<(), ValidationErrors> {
		let mut errors = ValidationErrors::new();
		if self.first_name.trim().is_empty() {
			errors.add("first_name", "first name is required");
		}
		if self.last_name.trim().is_empty() {
			errors.add("last_name", "last name is required");
		}
		errors.into_result()
	}
}

/// Body of `POST /api/groups/members`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddUserToGroupRequest {
	#[serde(default)]
	pub user_id: String,
	#[serde(default)]
	pub group_name: String,
}

impl AddUserToGroupRequest {
	pub fn validate(&self) -> Result<(), ValidationErrors> {
		let mut errors = ValidationErrors::new();
		if self.user_id.trim().is_empty() {
			errors.add("user_id", "user id is required");
		}
		if self.group_name.trim().is_empty() {
			errors.add("group_name", "group name is required");
		}
		errors.into_result()
	}
}
