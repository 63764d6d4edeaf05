// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Judge listing handler.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::AppState;
use crate::dto::UserResponse;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct JudgesQuery {
	/// Optional case-insensitive substring of the principal name.
	pub username: Option<String>,
}

/// GET /api/judges?username=
pub async fn list_judges(
	State(state): State<AppState>,
	Query(query): Query<JudgesQuery>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
	let judges = state
		.provisioning
		.judges(query.username.as_deref())
		.await?;
	Ok(Json(judges.into_iter().map(UserResponse::from).collect()))
}
