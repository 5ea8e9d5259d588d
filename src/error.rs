use std::path::PathBuf;

/// Library-level structured errors for rtems-test-check.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum TestCheckError {
	#[error("invalid command line")]
	InvalidCommandLine,

	#[error("invalid mode: {mode}")]
	InvalidMode { mode: String },

	#[error("test count not 1 for mode: {mode} (got {count})")]
	TestCount { mode: String, count: usize },

	#[error("test config not found: {name}")]
	ConfigNotFound { name: String },

	#[error("failed to read test config: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("syntax error: {path}:{line}")]
	SyntaxError { path: PathBuf, line: usize },

	#[error("invalid test state: {state} in {path}:{line}")]
	InvalidState {
		state: String,
		path: PathBuf,
		line: usize,
	},

	#[error("include not found: {name} in {path}:{line}")]
	IncludeNotFound {
		name: String,
		path: PathBuf,
		line: usize,
	},

	#[error("include cycle: {target} in {path}:{line}")]
	IncludeCycle {
		target: PathBuf,
		path: PathBuf,
		line: usize,
	},

	#[error("invalid {state} regex: {pattern}")]
	InvalidRegex {
		state: String,
		pattern: String,
		#[source]
		source: regex::Error,
	},
}

impl TestCheckError {
	/// Process exit status for this error.
	///
	/// A command line too short to name a mode exits 2, everything else 1.
	pub fn exit_code(&self) -> u8 {
		match self {
			TestCheckError::InvalidCommandLine => 2,
			_ => 1,
		}
	}
}

/// Result type alias using TestCheckError.
pub type Result<T> = std::result::Result<T, TestCheckError>;
