// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! User provisioning core for UserApi.
//!
//! This crate owns the only nontrivial logic in the service:
//! - [`username`]: name sanitization and collision-free username
//!   allocation against the set of existing and soft-deleted accounts
//! - [`password`]: one-time password generation
//! - [`service`]: the orchestration layer that validates, detects
//!   duplicates, allocates usernames, and drives the directory client
//!
//! The service holds no cross-request state; the directory is the system
//! of record for every decision.

pub mod config;
pub mod email;
pub mod error;
pub mod password;
pub mod service;
pub mod username;

pub use config::{GroupMap, GroupRole, ProvisioningConfig};
pub use error::ProvisioningError;
pub use service::{
	CreateUserRequest, NewAccountResult, UpdateUserRequest, UpdatedAccount,
	UserProvisioningService,
};
