// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Provisioning configuration.
//!
//! Built once at startup and passed in explicitly; there are no global
//! settings objects. Group ids are held in an explicit role→id map so an
//! unknown role is a lookup miss, not a runtime reflection failure.

use std::collections::HashMap;

use userapi_common_secret::SecretString;

/// Roles this service resolves to configured directory group ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupRole {
	/// The group whose members are listed as judges.
	Judges,
	/// The group holding test accounts, excluded from judge listings in
	/// live mode.
	TestAccounts,
}

impl GroupRole {
	pub fn as_str(&self) -> &'static str {
		match self {
			GroupRole::Judges => "judges",
			GroupRole::TestAccounts => "test-accounts",
		}
	}
}

/// Explicit mapping from group role to configured directory group id.
#[derive(Debug, Clone, Default)]
pub struct GroupMap {
	ids: HashMap<GroupRole, String>,
}

impl GroupMap {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_group(mut self, role: GroupRole, group_id: impl Into<String>) -> Self {
		self.ids.insert(role, group_id.into());
		self
	}

	pub fn get(&self, role: GroupRole) -> Option<&str> {
		self.ids.get(&role).map(String::as_str)
	}
}

/// Immutable settings for the provisioning service.
#[derive(Debug, Clone)]
pub struct ProvisioningConfig {
	/// Domain appended to allocated usernames.
	pub email_domain: String,
	/// Configured group ids by role.
	pub groups: GroupMap,
	/// True in production: judge listings exclude test accounts.
	pub is_live: bool,
	/// Fixed password assigned to test users.
	pub test_user_password: SecretString,
	/// Display name of the directory role that marks administrators.
	pub admin_role_name: String,
	/// Users whose given name starts with this marker are excluded from
	/// judge listings.
	pub perf_test_prefix: String,
}

impl ProvisioningConfig {
	pub fn new(email_domain: impl Into<String>) -> Self {
		Self {
			email_domain: email_domain.into(),
			groups: GroupMap::new(),
			is_live: false,
			test_user_password: SecretString::new(""),
			admin_role_name: "User Administrator".to_string(),
			perf_test_prefix: "TP".to_string(),
		}
	}
}
