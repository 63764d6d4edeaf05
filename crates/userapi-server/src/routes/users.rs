// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! User account handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use userapi_provisioning::service;

use crate::api::AppState;
use crate::dto::{
	GroupResponse, IsAdminResponse, NewAccountResponse, UpdatedAccountResponse, UserResponse,
};
use crate::error::ApiError;
use crate::validation::{CreateUserRequest, UpdateUserAccountRequest};

/// POST /api/users
pub async fn create_user(
	State(state): State<AppState>,
	Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<NewAccountResponse>), ApiError> {
	request.validate().map_err(ApiError::Validation)?;

	let account = state
		.provisioning
		.create_user(&service::CreateUserRequest {
			first_name: request.first_name,
			last_name: request.last_name,
			recovery_email: request.recovery_email,
			is_test_user: request.is_test_user,
		})
		.await?;

	Ok((
		StatusCode::CREATED,
		Json(NewAccountResponse {
			username: account.username,
			user_id: account.user_id,
			password: account.password,
		}),
	))
}

/// PUT /api/users/{id}
pub async fn update_user(
	State(state): State<AppState>,
	Path(user_id): Path<String>,
	Json(request): Json<UpdateUserAccountRequest>,
) -> Result<Json<UpdatedAccountResponse>, ApiError> {
	request.validate().map_err(ApiError::Validation)?;

	let account = state
		.provisioning
		.update_user(
			&user_id,
			&service::UpdateUserRequest {
				first_name: request.first_name,
				last_name: request.last_name,
				contact_email: request.contact_email,
			},
		)
		.await?;

	Ok(Json(UpdatedAccountResponse {
		username: account.username,
		user_id: account.user_id,
	}))
}

/// DELETE /api/users/{username}
pub async fn delete_user(
	State(state): State<AppState>,
	Path(username): Path<String>,
) -> Result<StatusCode, ApiError> {
	state.provisioning.delete_user(&username).await?;
	Ok(StatusCode::ACCEPTED)
}

/// GET /api/users/{id}
pub async fn get_user(
	State(state): State<AppState>,
	Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
	let user = state
		.provisioning
		.get_user(&user_id)
		.await?
		.ok_or_else(|| ApiError::NotFound(format!("user does not exist: {user_id}")))?;
	Ok(Json(user.into()))
}

/// GET /api/users/username/{username}
pub async fn get_user_by_username(
	State(state): State<AppState>,
	Path(username): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
	let user = state
		.provisioning
		.get_user_by_username(&username)
		.await?
		.ok_or_else(|| ApiError::NotFound(format!("user does not exist: {username}")))?;
	Ok(Json(user.into()))
}

/// GET /api/users/email/{email}
pub async fn get_user_by_email(
	State(state): State<AppState>,
	Path(email): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
	let user = state
		.provisioning
		.get_user_by_email(&email)
		.await?
		.ok_or_else(|| ApiError::NotFound("no user with this email".to_string()))?;
	Ok(Json(user.into()))
}

/// GET /api/users/{id}/groups
pub async fn user_groups(
	State(state): State<AppState>,
	Path(user_id): Path<String>,
) -> Result<Json<Vec<GroupResponse>>, ApiError> {
	let groups = state.provisioning.groups_for_user(&user_id).await?;
	Ok(Json(groups.into_iter().map(GroupResponse::from).collect()))
}

/// GET /api/users/{id}/is-admin
pub async fn is_admin(
	State(state): State<AppState>,
	Path(user_id): Path<String>,
) -> Result<Json<IsAdminResponse>, ApiError> {
	let is_admin = state.provisioning.is_user_admin(&user_id).await?;
	Ok(Json(IsAdminResponse { is_admin }))
}
