// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Secret handling for UserApi.
//!
//! [`SecretString`] wraps sensitive values (client secrets, passwords,
//! access tokens) so they cannot leak through `Debug`/`Display` output or
//! tracing fields. The inner value is zeroized on drop.

use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string wrapper that redacts its contents in all formatted output.
///
/// Use [`SecretString::expose`] at the single point where the raw value is
/// actually needed (e.g. an `Authorization` header). Everywhere else the
/// value renders as `[REDACTED]`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
	/// Wrap a sensitive value.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Access the underlying value.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// True when the wrapped value is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl std::fmt::Debug for SecretString {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("[REDACTED]")
	}
}

impl std::fmt::Display for SecretString {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("[REDACTED]")
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let value = String::deserialize(deserializer)?;
		Ok(Self(value))
	}
}
