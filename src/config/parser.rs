use crate::config::types::{Directive, FlagKind, RegexState, TestState};

/// One parsed line of a test config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRecord {
	/// `include: <file>`
	Include(String),

	/// `<state>: name,name,...`
	Literal { state: TestState, names: Vec<String> },

	/// `rexclude: pattern,...` or `rinclude: pattern,...`
	Regex {
		state: RegexState,
		patterns: Vec<String>,
	},

	/// `cflags: pattern,pattern,...: <flags>`
	Flag {
		kind: FlagKind,
		patterns: Vec<String>,
		flags: String,
	},
}

/// Why a line was rejected. The loader adds the file and line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineError {
	Syntax,
	InvalidState(String),
}

/// Strip the comment and surrounding whitespace from a raw line.
///
/// Everything from the first `#` on is a comment; there is no escape.
pub fn clean_line(line: &str) -> &str {
	let line = line.trim_end_matches(['\n', '\r']);
	let line = match line.find('#') {
		Some(start) => &line[..start],
		None => line,
	};
	line.trim()
}

/// Parse a cleaned, non-empty line.
pub fn parse_line(line: &str) -> Result<LineRecord, LineError> {
	let (state, value) = split_field(line).ok_or(LineError::Syntax)?;

	let directive =
		Directive::from_name(state).ok_or_else(|| LineError::InvalidState(state.to_string()))?;

	let record = match directive {
		Directive::Include => {
			if value.is_empty() {
				return Err(LineError::Syntax);
			}
			LineRecord::Include(value.to_string())
		}
		Directive::Literal(state) => LineRecord::Literal {
			state,
			names: split_list(value),
		},
		Directive::Regex(state) => LineRecord::Regex {
			state,
			patterns: split_list(value),
		},
		Directive::Flag(kind) => {
			let (patterns, flags) = split_field(value).ok_or(LineError::Syntax)?;
			if flags.is_empty() {
				return Err(LineError::Syntax);
			}
			LineRecord::Flag {
				kind,
				patterns: split_list(patterns),
				flags: flags.to_string(),
			}
		}
	};

	Ok(record)
}

/// Split on the first `:` into two trimmed fields.
fn split_field(input: &str) -> Option<(&str, &str)> {
	input
		.split_once(':')
		.map(|(head, tail)| (head.trim(), tail.trim()))
}

/// Split a comma separated list, dropping empty items.
fn split_list(input: &str) -> Vec<String> {
	input
		.split(',')
		.map(str::trim)
		.filter(|item| !item.is_empty())
		.map(str::to_string)
		.collect()
}
