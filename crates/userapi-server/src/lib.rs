// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP surface for UserApi.
//!
//! Handlers validate request bodies, delegate to the provisioning
//! service, and map results and failures to JSON responses with
//! snake_case field names. All orchestration lives in
//! `userapi-provisioning`; nothing here talks to the directory
//! directly.

pub mod api;
pub mod dto;
pub mod error;
pub mod routes;
pub mod validation;

pub use api::{create_router, AppState};
pub use error::ApiError;
