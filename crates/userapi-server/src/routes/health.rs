// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Health check handler.

use axum::Json;

use crate::dto::HealthResponse;

/// GET /health
///
/// Liveness only: does not call the directory, so a degraded Graph
/// tenant never takes the health endpoint down with it.
pub async fn health_check() -> Json<HealthResponse> {
	Json(HealthResponse {
		status: "ok",
		version: env!("CARGO_PKG_VERSION"),
		timestamp: chrono::Utc::now().to_rfc3339(),
	})
}
