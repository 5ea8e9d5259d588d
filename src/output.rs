//! The single result line printed on stdout.

use std::collections::BTreeSet;

/// Printed on stdout in place of a result when anything fails.
pub const INVALID_TEST_DATA: &str = "INVALID-TEST-DATA";

/// Dedup and sort tokens, then join them with single spaces.
///
/// No tokens gives an empty line, meaning no tests or no flags.
pub fn format_tokens<I, S>(tokens: I) -> String
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let unique: BTreeSet<String> = tokens
		.into_iter()
		.map(|token| token.as_ref().to_string())
		.collect();

	unique.into_iter().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_sorted_and_deduplicated() {
		assert_eq!(format_tokens(["test2", "other", "test2"]), "other test2");
	}

	#[test]
	fn test_empty_is_empty_line() {
		assert_eq!(format_tokens(Vec::<String>::new()), "");
	}

	#[test]
	fn test_byte_order() {
		assert_eq!(
			format_tokens(["-DTEST_STATE_USER_INPUT=1", "-DA", "sp01", "Sp01"]),
			"-DA -DTEST_STATE_USER_INPUT=1 Sp01 sp01"
		);
	}
}
