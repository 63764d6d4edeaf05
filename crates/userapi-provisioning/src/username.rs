// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Username sanitization and allocation.
//!
//! Directory principal names are case-insensitive, so every comparison
//! here happens on lower-cased full candidates. Allocation is a set
//! membership test over the supplied names: input ordering and
//! duplicates do not matter, and a name like `jane.doenut@d` never
//! blocks the base `jane.doe`.

use std::collections::HashSet;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Invalid allocator input.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UsernameError {
	#[error("username base must not be empty")]
	EmptyBase,
	#[error("domain must not be empty")]
	EmptyDomain,
}

/// Fold diacritics to their closest ASCII equivalent.
///
/// Decomposes to NFD and drops combining marks, so `É` becomes `E` and
/// `ñ` becomes `n`.
pub fn fold_diacritics(value: &str) -> String {
	value.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Sanitize one name component for use in a username.
///
/// Folds diacritics, removes spaces, strips leading/trailing periods,
/// and lower-cases.
pub fn sanitize_name_part(part: &str) -> String {
	fold_diacritics(part)
		.replace(' ', "")
		.trim()
		.trim_matches('.')
		.to_lowercase()
}

/// Compose the base username `first.last` from sanitized name parts.
pub fn username_base(first_name: &str, last_name: &str) -> String {
	format!(
		"{}.{}",
		sanitize_name_part(first_name),
		sanitize_name_part(last_name)
	)
}

/// Allocate the first free username for `base` under `domain`.
///
/// Tries `base@domain` first, then `base1@domain`, `base2@domain`, and
/// so on, returning the first candidate that does not collide
/// case-insensitively with any name in `existing`. The suffix search is
/// unbounded but terminates because `existing` is finite.
pub fn allocate_username(
	base: &str,
	domain: &str,
	existing: &[String],
) -> Result<String, UsernameError> {
	if base.is_empty() {
		return Err(UsernameError::EmptyBase);
	}
	if domain.is_empty() {
		return Err(UsernameError::EmptyDomain);
	}

	let base = base.to_lowercase();
	let taken: HashSet<String> = existing.iter().map(|name| name.to_lowercase()).collect();

	let candidate = format!("{base}@{domain}");
	if !taken.contains(&candidate.to_lowercase()) {
		return Ok(candidate);
	}

	for suffix in 1u64.. {
		let candidate = format!("{base}{suffix}@{domain}");
		if !taken.contains(&candidate.to_lowercase()) {
			return Ok(candidate);
		}
	}

	unreachable!("suffix search terminates: the existing-name set is finite")
}

#[cfg(test)]
mod tests {
	use super::*;

	fn existing(names: &[&str]) -> Vec<String> {
		names.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn empty_inputs_are_rejected() {
		assert_eq!(
			allocate_username("", "x.com", &[]),
			Err(UsernameError::EmptyBase)
		);
		assert_eq!(
			allocate_username("jane.doe", "", &[]),
			Err(UsernameError::EmptyDomain)
		);
	}

	#[test]
	fn free_base_is_returned_without_suffix() {
		let result = allocate_username("jane.doe", "x.com", &[]).unwrap();
		assert_eq!(result, "jane.doe@x.com");
	}

	#[test]
	fn base_is_lower_cased() {
		let result = allocate_username("Jane.Doe", "x.com", &[]).unwrap();
		assert_eq!(result, "jane.doe@x.com");
	}

	#[test]
	fn collisions_are_case_insensitive() {
		let taken = existing(&["EXisting.User@x.com", "ExistIng.UseR1@x.com"]);
		let result = allocate_username("existing.user", "x.com", &taken).unwrap();
		assert_eq!(result, "existing.user2@x.com");
	}

	#[test]
	fn longer_names_sharing_the_prefix_do_not_collide() {
		let taken = existing(&[
			"existing.user@d",
			"existing.username1@d",
			"existing.username2@d",
			"existing.user1@d",
		]);
		let result = allocate_username("existing.user", "d", &taken).unwrap();
		assert_eq!(result, "existing.user2@d");
	}

	#[test]
	fn first_gap_in_suffixes_is_filled() {
		let taken = existing(&["existing.user@d", "existing.user1@d", "existing.user3@d"]);
		let result = allocate_username("existing.user", "d", &taken).unwrap();
		assert_eq!(result, "existing.user2@d");
	}

	#[test]
	fn double_digit_suffixes_are_reached() {
		let mut taken = vec!["existing.user@d".to_string()];
		taken.extend((1..=10).map(|n| format!("existing.user{n}@d")));
		// Ordering must not matter.
		taken.reverse();

		let result = allocate_username("existing.user", "d", &taken).unwrap();
		assert_eq!(result, "existing.user11@d");
	}

	#[test]
	fn duplicate_entries_in_existing_set_are_harmless() {
		let taken = existing(&["jane.doe@d", "JANE.DOE@D", "jane.doe@d"]);
		let result = allocate_username("jane.doe", "d", &taken).unwrap();
		assert_eq!(result, "jane.doe1@d");
	}

	#[test]
	fn diacritics_fold_to_ascii() {
		assert_eq!(fold_diacritics("Émile"), "Emile");
		assert_eq!(fold_diacritics("Muñoz"), "Munoz");
		assert_eq!(fold_diacritics("Brontë"), "Bronte");
	}

	#[test]
	fn name_parts_are_sanitized() {
		assert_eq!(sanitize_name_part(" Émile "), "emile");
		assert_eq!(sanitize_name_part("de la Cruz."), "delacruz");
		assert_eq!(sanitize_name_part(".St. John"), "st.john");
		assert_eq!(sanitize_name_part("O Connor"), "oconnor");
	}

	#[test]
	fn base_joins_sanitized_parts_with_period() {
		assert_eq!(username_base("Jane", "Doe"), "jane.doe");
		assert_eq!(username_base(" Émile ", "de la Cruz."), "emile.delacruz");
	}
}
