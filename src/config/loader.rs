use crate::config::parser::{LineError, LineRecord, clean_line, parse_line};
use crate::config::types::{RuleStore, RuleStoreBuilder};
use crate::error::{Result, TestCheckError};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Suite-wide test config, loaded ahead of the named config when present.
pub const BASELINE_CONFIG: &str = "testdata/rtems.tcfg";

/// Ordered directories searched for every config file reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
	dirs: Vec<PathBuf>,
}

impl SearchPath {
	pub fn new(dirs: Vec<PathBuf>) -> Self {
		Self { dirs }
	}

	/// Split a platform path-separator delimited list of directories.
	pub fn parse(paths: &str) -> Self {
		Self {
			dirs: std::env::split_paths(paths).collect(),
		}
	}

	pub fn dirs(&self) -> &[PathBuf] {
		&self.dirs
	}

	/// Return the first `dir/name` that is a file, trying directories in order.
	pub fn find(&self, name: &str) -> Option<PathBuf> {
		self.dirs
			.iter()
			.map(|dir| dir.join(name))
			.find(|candidate| candidate.is_file())
	}
}

/// A config file waiting to be read, with the files that included it.
#[derive(Debug, Clone)]
struct PendingConfig {
	path: PathBuf,

	/// Identities of this file and every file above it in the include chain.
	chain: Vec<PathBuf>,
}

impl PendingConfig {
	fn root(path: PathBuf) -> Self {
		let chain = vec![file_identity(&path)];
		Self { path, chain }
	}

	fn included(&self, path: PathBuf) -> Self {
		let mut chain = self.chain.clone();
		chain.push(file_identity(&path));
		Self { path, chain }
	}

	fn is_included_by_chain(&self, path: &Path) -> bool {
		let identity = file_identity(path);
		self.chain.contains(&identity)
	}
}

/// Canonical path when available, so two spellings of one file compare equal.
fn file_identity(path: &Path) -> PathBuf {
	std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Load the baseline config (if found) and then the named config, expanding
/// every `include:` along the way.
///
/// An included file is pushed onto the front of the pending queue, so it is
/// read before anything already waiting. Several includes in one file are
/// therefore read last-to-first.
pub fn load_rule_store(search: &SearchPath, config_name: &str) -> Result<RuleStore> {
	let config = search
		.find(config_name)
		.ok_or_else(|| TestCheckError::ConfigNotFound {
			name: config_name.to_string(),
		})?;

	let mut pending = VecDeque::new();
	pending.push_back(PendingConfig::root(config));

	match search.find(BASELINE_CONFIG) {
		Some(baseline) => pending.push_front(PendingConfig::root(baseline)),
		None => debug!("{}: not found", BASELINE_CONFIG),
	}

	drain(search, pending, RuleStoreBuilder::new())
}

/// Load a single config given as a string, resolving its includes through
/// `search`.
#[cfg(test)]
fn load_config_str(content: &str, path: &Path, search: &SearchPath) -> Result<RuleStore> {
	let mut builder = RuleStoreBuilder::new();
	let mut pending = VecDeque::new();
	let root = PendingConfig::root(path.to_path_buf());

	merge_lines(content, &root, search, &mut builder, &mut pending)?;
	drain(search, pending, builder)
}

fn drain(
	search: &SearchPath,
	mut pending: VecDeque<PendingConfig>,
	mut builder: RuleStoreBuilder,
) -> Result<RuleStore> {
	while let Some(current) = pending.pop_front() {
		merge_file(&current, search, &mut builder, &mut pending)?;
	}

	Ok(builder.build())
}

fn merge_file(
	current: &PendingConfig,
	search: &SearchPath,
	builder: &mut RuleStoreBuilder,
	pending: &mut VecDeque<PendingConfig>,
) -> Result<()> {
	debug!("reading: {}", current.path.display());

	let content =
		std::fs::read_to_string(&current.path).map_err(|source| TestCheckError::ConfigReadError {
			path: current.path.clone(),
			source,
		})?;

	merge_lines(&content, current, search, builder, pending)
}

fn merge_lines(
	content: &str,
	current: &PendingConfig,
	search: &SearchPath,
	builder: &mut RuleStoreBuilder,
	pending: &mut VecDeque<PendingConfig>,
) -> Result<()> {
	for (index, raw) in content.lines().enumerate() {
		let line_number = index + 1;
		let line = clean_line(raw);
		if line.is_empty() {
			continue;
		}

		debug!("{:3}: {}", line_number, line);

		let record = parse_line(line).map_err(|err| match err {
			LineError::Syntax => TestCheckError::SyntaxError {
				path: current.path.clone(),
				line: line_number,
			},
			LineError::InvalidState(state) => TestCheckError::InvalidState {
				state,
				path: current.path.clone(),
				line: line_number,
			},
		})?;

		match record {
			LineRecord::Include(name) => {
				let target = search
					.find(&name)
					.ok_or_else(|| TestCheckError::IncludeNotFound {
						name: name.clone(),
						path: current.path.clone(),
						line: line_number,
					})?;

				if current.is_included_by_chain(&target) {
					return Err(TestCheckError::IncludeCycle {
						target,
						path: current.path.clone(),
						line: line_number,
					});
				}

				pending.push_front(current.included(target));
				debug!(
					"include: {}",
					pending
						.iter()
						.map(|p| p.path.display().to_string())
						.collect::<Vec<_>>()
						.join(", ")
				);
			}
			LineRecord::Literal { state, names } => builder.add_names(state, names),
			LineRecord::Regex { state, patterns } => builder.add_patterns(state, patterns),
			LineRecord::Flag {
				kind,
				patterns,
				flags,
			} => {
				for pattern in &patterns {
					builder.add_flag(kind, pattern, &flags);
				}
			}
		}
	}

	Ok(())
}
