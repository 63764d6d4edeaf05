// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Directory group id configuration.

use serde::Deserialize;

/// Configured directory group ids (runtime, fully resolved).
///
/// Both ids are optional at load time; operations that need an
/// unconfigured group fail with a lookup miss at call time.
#[derive(Debug, Clone, Default)]
pub struct GroupsConfig {
	pub judges_group_id: Option<String>,
	pub test_accounts_group_id: Option<String>,
}

/// Group id configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupsConfigLayer {
	#[serde(default)]
	pub judges_group_id: Option<String>,
	#[serde(default)]
	pub test_accounts_group_id: Option<String>,
}

impl GroupsConfigLayer {
	pub fn merge(&mut self, other: GroupsConfigLayer) {
		if other.judges_group_id.is_some() {
			self.judges_group_id = other.judges_group_id;
		}
		if other.test_accounts_group_id.is_some() {
			self.test_accounts_group_id = other.test_accounts_group_id;
		}
	}
}

impl GroupsConfig {
	pub fn from_layer(layer: GroupsConfigLayer) -> Self {
		Self {
			judges_group_id: layer.judges_group_id,
			test_accounts_group_id: layer.test_accounts_group_id,
		}
	}
}
