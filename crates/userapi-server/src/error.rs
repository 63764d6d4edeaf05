// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! API error type and response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use userapi_provisioning::error::ProvisioningError;

use crate::validation::ValidationErrors;

/// Failures surfaced by the HTTP layer.
///
/// Every variant maps to exactly one status code; directory failures
/// never leak transport detail to the client beyond the service-level
/// message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
	#[error("request validation failed")]
	Validation(ValidationErrors),

	#[error("recovery email address is not valid")]
	InvalidEmail,

	#[error("an account already exists for this recovery email: {username}")]
	UserAlreadyExists { username: String },

	#[error("not found: {0}")]
	NotFound(String),

	#[error("{message}")]
	Internal { message: String, reason: String },
}

impl From<ProvisioningError> for ApiError {
	fn from(e: ProvisioningError) -> Self {
		match e {
			ProvisioningError::InvalidEmail => ApiError::InvalidEmail,
			ProvisioningError::UserAlreadyExists { username } => {
				ApiError::UserAlreadyExists { username }
			}
			ProvisioningError::UserDoesNotExist { user_id } => {
				ApiError::NotFound(format!("user does not exist: {user_id}"))
			}
			ProvisioningError::Service { message, reason } => {
				ApiError::Internal { message, reason }
			}
		}
	}
}

#[derive(Serialize)]
struct ErrorBody {
	error: &'static str,
	message: String,
}

#[derive(Serialize)]
struct ValidationErrorBody {
	error: &'static str,
	errors: ValidationErrors,
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		match self {
			ApiError::Validation(errors) => (
				StatusCode::BAD_REQUEST,
				Json(ValidationErrorBody {
					error: "validation_failed",
					errors,
				}),
			)
				.into_response(),
			ApiError::InvalidEmail => (
				StatusCode::BAD_REQUEST,
				Json(ErrorBody {
					error: "invalid_email",
					message: "recovery email address is not valid".to_string(),
				}),
			)
				.into_response(),
			ApiError::UserAlreadyExists { username } => (
				StatusCode::CONFLICT,
				Json(ErrorBody {
					error: "user_already_exists",
					message: format!("an account already exists for this recovery email: {username}"),
				}),
			)
				.into_response(),
			ApiError::NotFound(message) => (
				StatusCode::NOT_FOUND,
				Json(ErrorBody {
					error: "not_found",
					message,
				}),
			)
				.into_response(),
			ApiError::Internal { message, reason } => {
				tracing::error!(reason = %reason, "request failed: {message}");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					Json(ErrorBody {
						error: "internal_error",
						message,
					}),
				)
					.into_response()
			}
		}
	}
}
