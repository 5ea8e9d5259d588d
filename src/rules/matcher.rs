use crate::error::{Result, TestCheckError};
use regex::Regex;

/// A config pattern compiled for matching at the start of a test name.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
	/// The pattern as written in the config.
	pub pattern: String,

	regex: Regex,
}

impl CompiledPattern {
	/// Compile `pattern`, naming `state` in the error if it is malformed.
	pub fn compile(state: &str, pattern: &str) -> Result<Self> {
		let regex = compile_regex(pattern).map_err(|source| TestCheckError::InvalidRegex {
			state: state.to_string(),
			pattern: pattern.to_string(),
			source,
		})?;

		Ok(CompiledPattern {
			pattern: pattern.to_string(),
			regex,
		})
	}

	/// Check if the pattern matches a prefix of `test`. The match need not
	/// reach the end of the name.
	pub fn matches(&self, test: &str) -> bool {
		self.regex.is_match(test)
	}
}

/// Anchor a pattern at the start of the haystack only.
///
/// The pattern must be valid on its own before it is wrapped, otherwise an
/// unbalanced `)` could close the anchoring group early.
fn compile_regex(pattern: &str) -> std::result::Result<Regex, regex::Error> {
	Regex::new(pattern)?;
	Regex::new(&format!(r"\A(?:{pattern})"))
}

/// Compile every pattern of a list, failing on the first malformed one.
pub fn compile_patterns(state: &str, patterns: &[String]) -> Result<Vec<CompiledPattern>> {
	patterns
		.iter()
		.map(|pattern| CompiledPattern::compile(state, pattern))
		.collect()
}

/// Check if any pattern in the list matches `test`.
pub fn any_match(patterns: &[CompiledPattern], test: &str) -> bool {
	patterns.iter().any(|pattern| pattern.matches(test))
}
