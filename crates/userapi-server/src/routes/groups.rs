// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Group membership handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::AppState;
use crate::dto::UserResponse;
use crate::error::ApiError;
use crate::validation::AddUserToGroupRequest;

/// POST /api/groups/members
///
/// Accepted rather than created: membership addition is idempotent and
/// the caller cannot observe whether the directory was actually
/// touched.
pub async fn add_member(
	State(state): State<AppState>,
	Json(request): Json<AddUserToGroupRequest>,
) -> Result<StatusCode, ApiError> {
	request.validate().map_err(ApiError::Validation)?;

	state
		.provisioning
		.add_user_to_group_by_name(&request.user_id, &request.group_name)
		.await?;

	Ok(StatusCode::ACCEPTED)
}

/// GET /api/groups/{id}/members
pub async fn group_members(
	State(state): State<AppState>,
	Path(group_id): Path<String>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
	let members = state.provisioning.group_members(&group_id).await?;
	Ok(Json(members.into_iter().map(UserResponse::from).collect()))
}
