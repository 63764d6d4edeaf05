// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Application state and router construction.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use userapi_provisioning::service::UserProvisioningService;

use crate::routes::{groups, health, judges, users};

/// Shared handler state. Cloned per request; all fields are cheap
/// handles.
#[derive(Clone)]
pub struct AppState {
	pub provisioning: Arc<UserProvisioningService>,
}

/// Build the API router.
pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health::health_check))
		.route("/api/users", post(users::create_user))
		// The path parameter is a directory id for GET and PUT, and a
		// principal name for DELETE, mirroring the directory's own
		// delete-by-principal-name semantics.
		.route(
			"/api/users/{id}",
			get(users::get_user)
				.put(users::update_user)
				.delete(users::delete_user),
		)
		.route("/api/users/username/{username}", get(users::get_user_by_username))
		.route("/api/users/email/{email}", get(users::get_user_by_email))
		.route("/api/users/{id}/groups", get(users::user_groups))
		.route("/api/users/{id}/is-admin", get(users::is_admin))
		.route("/api/judges", get(judges::list_judges))
		.route("/api/groups/members", post(groups::add_member))
		.route("/api/groups/{id}/members", get(groups::group_members))
		.with_state(state)
}
