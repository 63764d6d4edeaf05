// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The partial configuration layer produced by each source.
//!
//! Every section is optional so a source only has to mention the fields
//! it actually sets; [`ServerConfigLayer::merge`] folds a higher-
//! precedence layer over this one field by field.

use serde::Deserialize;

use crate::sections::{
	CacheConfigLayer, GraphConfigLayer, GroupsConfigLayer, HttpConfigLayer, LoggingConfigLayer,
	UsersConfigLayer,
};

/// Partial server configuration, one per source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfigLayer {
	#[serde(default)]
	pub http: Option<HttpConfigLayer>,
	#[serde(default)]
	pub graph: Option<GraphConfigLayer>,
	#[serde(default)]
	pub users: Option<UsersConfigLayer>,
	#[serde(default)]
	pub groups: Option<GroupsConfigLayer>,
	#[serde(default)]
	pub cache: Option<CacheConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

impl ServerConfigLayer {
	/// Fold `other` (higher precedence) over this layer. Fields set in
	/// `other` win; fields it leaves unset survive from this layer.
	pub fn merge(&mut self, other: ServerConfigLayer) {
		match (&mut self.http, other.http) {
			(Some(mine), Some(theirs)) => mine.merge(theirs),
			(mine @ None, theirs @ Some(_)) => *mine = theirs,
			_ => {}
		}
		match (&mut self.graph, other.graph) {
			(Some(mine), Some(theirs)) => mine.merge(theirs),
			(mine @ None, theirs @ Some(_)) => *mine = theirs,
			_ => {}
		}
		match (&mut self.users, other.users) {
			(Some(mine), Some(theirs)) => mine.merge(theirs),
			(mine @ None, theirs @ Some(_)) => *mine = theirs,
			_ => {}
		}
		match (&mut self.groups, other.groups) {
			(Some(mine), Some(theirs)) => mine.merge(theirs),
			(mine @ None, theirs @ Some(_)) => *mine = theirs,
			_ => {}
		}
		match (&mut self.cache, other.cache) {
			(Some(mine), Some(theirs)) => mine.merge(theirs),
			(mine @ None, theirs @ Some(_)) => *mine = theirs,
			_ => {}
		}
		match (&mut self.logging, other.logging) {
			(Some(mine), Some(theirs)) => mine.merge(theirs),
			(mine @ None, theirs @ Some(_)) => *mine = theirs,
			_ => {}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_layer_deserializes_from_empty_toml() {
		let layer: ServerConfigLayer = toml::from_str("").unwrap();
		assert!(layer.http.is_none());
		assert!(layer.graph.is_none());
		assert!(layer.users.is_none());
	}

	#[test]
	fn merge_takes_sections_absent_on_the_base() {
		let mut base = ServerConfigLayer::default();
		let overlay: ServerConfigLayer = toml::from_str(
			r#"
			[http]
			port = 9090
		"#,
		)
		.unwrap();

		base.merge(overlay);
		assert_eq!(base.http.unwrap().port, Some(9090));
	}

	#[test]
	fn merge_is_field_wise_within_a_section() {
		let mut base: ServerConfigLayer = toml::from_str(
			r#"
			[http]
			host = "127.0.0.1"
			port = 8080
		"#,
		)
		.unwrap();
		let overlay: ServerConfigLayer = toml::from_str(
			r#"
			[http]
			port = 9090
		"#,
		)
		.unwrap();

		base.merge(overlay);
		let http = base.http.unwrap();
		assert_eq!(http.host.as_deref(), Some("127.0.0.1"));
		assert_eq!(http.port, Some(9090));
	}
}
