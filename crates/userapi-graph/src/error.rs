// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use userapi_common_http::RetryableError;

/// Errors that can occur when talking to the directory.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
	/// The HTTP request failed before a response arrived (network error,
	/// timeout, TLS failure).
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	/// The directory returned a structured error response.
	#[error("Graph API error ({status}) {code}: {message}")]
	Api {
		status: u16,
		code: String,
		message: String,
	},

	/// The response body could not be parsed as expected.
	#[error("failed to parse response: {0}")]
	Parse(String),

	/// Token acquisition against the authority failed.
	#[error("token acquisition failed: {0}")]
	Auth(String),
}

impl GraphError {
	/// True when the directory reported the target object as absent.
	pub fn is_not_found(&self) -> bool {
		matches!(self, GraphError::Api { status: 404, .. })
	}
}

impl RetryableError for GraphError {
	fn is_retryable(&self) -> bool {
		match self {
			GraphError::Http(e) => e.is_timeout() || e.is_connect(),
			GraphError::Api { status, .. } => *status == 429 || *status >= 500,
			GraphError::Parse(_) | GraphError::Auth(_) => false,
		}
	}
}
