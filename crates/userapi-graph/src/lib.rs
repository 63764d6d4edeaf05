// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Microsoft Graph directory client for UserApi.
//!
//! This crate wraps the Graph REST API behind the [`DirectoryClient`]
//! trait so the provisioning layer can be exercised against a test double.
//! It provides:
//! - Typed wire models for directory users, groups, and role data
//! - OData filter rendering with single-quote escaping
//! - OAuth2 client-credentials token acquisition with in-process caching
//! - [`GraphClient`], the reqwest-backed implementation
//!
//! Absence is modeled explicitly: read paths return `Ok(None)` (or an
//! empty list) when the directory reports 404, while write paths surface
//! the structured error to the caller.

pub mod auth;
pub mod client;
pub mod error;
pub mod filter;
pub mod models;

pub use auth::{GraphAuthConfig, TokenProvider};
pub use client::{DirectoryClient, GraphClient, GraphClientConfig};
pub use error::GraphError;
pub use filter::{DeletedUserFilter, UserFilter};
pub use models::{
	DirectoryGroup, DirectoryUser, DirectoryUserUpdate, NewDirectoryUser, PasswordProfile,
	RoleAssignment, RoleDefinition, UserType,
};
