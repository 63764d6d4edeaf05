// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use userapi_graph::GraphError;

/// Failures surfaced by the provisioning service.
///
/// Nothing here is retried at this layer. The `Service` variant carries
/// a human-readable message plus the original failure detail as the
/// reason; the other variants map to specific caller-visible outcomes.
#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
	/// The supplied recovery email is malformed.
	#[error("recovery email address is not valid")]
	InvalidEmail,

	/// An active account already uses the supplied recovery email. The
	/// colliding principal name is carried instead of the raw email so
	/// the address does not leak into logs or messages.
	#[error("an account already exists for this recovery email: {username}")]
	UserAlreadyExists { username: String },

	/// The referenced user does not exist in the directory.
	#[error("user does not exist: {user_id}")]
	UserDoesNotExist { user_id: String },

	/// A directory call failed, or something unexpected went wrong.
	#[error("{message} ({reason})")]
	Service { message: String, reason: String },
}

impl ProvisioningError {
	pub(crate) fn service(message: impl Into<String>, reason: impl std::fmt::Display) -> Self {
		ProvisioningError::Service {
			message: message.into(),
			reason: reason.to_string(),
		}
	}

	/// Wrap a directory failure: structured errors keep the directory's
	/// message, everything else gets a generic message plus the original
	/// error text.
	pub(crate) fn from_directory(err: GraphError) -> Self {
		match err {
			GraphError::Api { message, .. } => ProvisioningError::Service {
				message: "the directory rejected the request".to_string(),
				reason: message,
			},
			other => ProvisioningError::Service {
				message: "unexpected error while calling the directory".to_string(),
				reason: other.to_string(),
			},
		}
	}
}
