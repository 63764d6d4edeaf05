// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! One-time password generation.

use rand::Rng;

/// Generated passwords are exactly this long.
pub const PASSWORD_LENGTH: usize = 12;

// Ambiguous letters (I, O, l, o) are excluded so a password read over
// the phone cannot be mistyped.
const UPPERCASE: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijkmnpqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*";

const CLASSES: [&[u8]; 4] = [UPPERCASE, LOWERCASE, DIGITS, SYMBOLS];

/// Generate a random password containing at least one character from
/// each class.
///
/// One character per class is seeded at a random position, then the
/// remainder is drawn uniformly from the union of all classes. Uses the
/// thread-local CSPRNG.
pub fn generate_random_password() -> String {
	let mut rng = rand::rng();
	let mut chars: Vec<char> = Vec::with_capacity(PASSWORD_LENGTH);

	for class in CLASSES {
		let c = class[rng.random_range(0..class.len())] as char;
		let position = rng.random_range(0..=chars.len());
		chars.insert(position, c);
	}

	let union: Vec<u8> = CLASSES.concat();
	while chars.len() < PASSWORD_LENGTH {
		let c = union[rng.random_range(0..union.len())] as char;
		let position = rng.random_range(0..=chars.len());
		chars.insert(position, c);
	}

	chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn contains_class(password: &str, class: &[u8]) -> bool {
		password.bytes().any(|b| class.contains(&b))
	}

	#[test]
	fn passwords_meet_length_and_class_requirements() {
		for _ in 0..10_000 {
			let password = generate_random_password();
			assert_eq!(password.len(), PASSWORD_LENGTH, "password: {password}");
			assert!(contains_class(&password, UPPERCASE), "password: {password}");
			assert!(contains_class(&password, LOWERCASE), "password: {password}");
			assert!(contains_class(&password, DIGITS), "password: {password}");
			assert!(contains_class(&password, SYMBOLS), "password: {password}");
		}
	}

	#[test]
	fn passwords_only_use_allowed_characters() {
		let union: Vec<u8> = CLASSES.concat();
		for _ in 0..1_000 {
			let password = generate_random_password();
			assert!(password.bytes().all(|b| union.contains(&b)));
		}
	}

	#[test]
	fn ambiguous_letters_are_excluded() {
		for _ in 0..1_000 {
			let password = generate_random_password();
			for forbidden in ['I', 'O', 'l', 'o'] {
				assert!(!password.contains(forbidden), "password: {password}");
			}
		}
	}

	#[test]
	fn consecutive_passwords_differ() {
		// Not a determinism guarantee, just a sanity check that the
		// generator is not stuck.
		let a = generate_random_password();
		let b = generate_random_password();
		let c = generate_random_password();
		assert!(a != b || b != c);
	}
}
