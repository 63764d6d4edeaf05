// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Permissive email shape check.

use regex::Regex;
use std::sync::LazyLock;

// Deliberately loose: one '@' with non-trivial local and domain parts.
// Full RFC 5322 validation is not the goal; the directory is the final
// arbiter of what it accepts.
static EMAIL_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").unwrap());

/// True when `value` looks like an email address.
pub fn is_valid_email(value: &str) -> bool {
	EMAIL_REGEX.is_match(value)
}
