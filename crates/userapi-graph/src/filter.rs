// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Typed directory query filters.
//!
//! Callers express what they are looking for; only this crate knows the
//! OData syntax the directory expects. String literals are escaped here so
//! a recovery email containing a quote cannot break out of the filter.

/// Filter over active directory users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
	/// Users whose contact-email list contains this address exactly.
	ContactEmail(String),
	/// Users whose principal name starts with this prefix.
	PrincipalPrefix(String),
	/// The user with exactly this principal name.
	PrincipalName(String),
}

/// Filter over soft-deleted directory users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletedUserFilter {
	/// Deleted users whose contact-email list contains this address.
	ContactEmail(String),
	/// Deleted users matching this exact given-name/surname pair.
	Name { given: String, surname: String },
}

/// Escape a string literal for inclusion in an OData filter.
///
/// OData escapes embedded single quotes by doubling them.
pub fn escape_odata_literal(value: &str) -> String {
	value.replace('\'', "''")
}

impl UserFilter {
	/// Render the filter as an OData `$filter` expression.
	pub fn to_odata(&self) -> String {
		match self {
			UserFilter::ContactEmail(email) => {
				format!(
					"otherMails/any(m: m eq '{}')",
					escape_odata_literal(email)
				)
			}
			UserFilter::PrincipalPrefix(prefix) => {
				format!(
					"startswith(userPrincipalName, '{}')",
					escape_odata_literal(prefix)
				)
			}
			UserFilter::PrincipalName(name) => {
				format!("userPrincipalName eq '{}'", escape_odata_literal(name))
			}
		}
	}
}

impl DeletedUserFilter {
	/// Render the filter as an OData `$filter` expression.
	pub fn to_odata(&self) -> String {
		match self {
			DeletedUserFilter::ContactEmail(email) => {
				format!(
					"otherMails/any(m: m eq '{}')",
					escape_odata_literal(email)
				)
			}
			DeletedUserFilter::Name { given, surname } => {
				format!(
					"givenName eq '{}' and surname eq '{}'",
					escape_odata_literal(given),
					escape_odata_literal(surname)
				)
			}
		}
	}
}
