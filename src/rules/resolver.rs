use crate::config::types::{FlagKind, RegexState, RuleStore, TestState};
use crate::error::{Result, TestCheckError};
use crate::rules::matcher::{CompiledPattern, any_match, compile_patterns};
use tracing::debug;

/// What to compute for the tests on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
	/// Report which of many tests should be built and run.
	Exclude,

	/// Report the compiler flags for exactly one test.
	Flags(FlagKind),
}

impl Mode {
	/// Parse a mode name. `flags` is accepted as another spelling of `cflags`.
	pub fn parse(name: &str) -> Result<Self> {
		match name {
			"exclude" => Ok(Mode::Exclude),
			"cflags" | "flags" => Ok(Mode::Flags(FlagKind::CFlags)),
			_ => Err(TestCheckError::InvalidMode {
				mode: name.to_string(),
			}),
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Mode::Exclude => "exclude",
			Mode::Flags(kind) => kind.as_str(),
		}
	}

	/// Exclusion takes any number of tests, flag modes exactly one.
	pub fn check_test_count(&self, count: usize) -> Result<()> {
		match self {
			Mode::Flags(_) if count != 1 => Err(TestCheckError::TestCount {
				mode: self.as_str().to_string(),
				count,
			}),
			_ => Ok(()),
		}
	}
}

/// Resolve `tests` against the loaded rules.
///
/// The tokens come back in evaluation order and may repeat; the output
/// formatter dedups and sorts them.
pub fn resolve(mode: Mode, tests: &[String], store: &RuleStore) -> Result<Vec<String>> {
	mode.check_test_count(tests.len())?;

	match mode {
		Mode::Exclude => exclude_tests(tests, store),
		Mode::Flags(kind) => resolve_flags(kind, &tests[0], store),
	}
}

/// Keep the tests that are not excluded.
///
/// A literal `exclude` always drops the test. Otherwise a `rexclude` match
/// drops it unless a `rinclude` pattern also matches.
pub fn exclude_tests(tests: &[String], store: &RuleStore) -> Result<Vec<String>> {
	let rexclude = compile_patterns(
		RegexState::RExclude.as_str(),
		store.patterns(RegexState::RExclude),
	)?;
	let rinclude = compile_patterns(
		RegexState::RInclude.as_str(),
		store.patterns(RegexState::RInclude),
	)?;

	let mut kept = Vec::new();
	for test in tests {
		if store.contains(TestState::Exclude, test) {
			debug!("{}: excluded", test);
			continue;
		}

		let excluded = any_match(&rexclude, test) && !any_match(&rinclude, test);
		if excluded {
			debug!("{}: excluded by pattern", test);
			continue;
		}

		kept.push(test.clone());
	}

	Ok(kept)
}

/// Collect the state defines and every matching `kind` flag string for one test.
pub fn resolve_flags(kind: FlagKind, test: &str, store: &RuleStore) -> Result<Vec<String>> {
	let mut tokens: Vec<String> = TestState::ALL
		.iter()
		.filter(|state| store.contains(**state, test))
		.filter_map(|state| state.define())
		.map(str::to_string)
		.collect();

	let rules = store.flag_rules(kind);
	let compiled = rules
		.iter()
		.map(|rule| CompiledPattern::compile(kind.as_str(), &rule.pattern))
		.collect::<Result<Vec<_>>>()?;

	for (rule, pattern) in rules.iter().zip(&compiled) {
		if pattern.matches(test) {
			debug!("{}: {} matches {}", test, kind.as_str(), rule.pattern);
			tokens.extend(rule.flags.iter().cloned());
		}
	}

	Ok(tokens)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::types::RuleStoreBuilder;

	fn tests(names: &[&str]) -> Vec<String> {
		names.iter().map(|name| name.to_string()).collect()
	}

	#[test]
	fn test_mode_parse() {
		assert_eq!(Mode::parse("exclude").unwrap(), Mode::Exclude);
		assert_eq!(Mode::parse("cflags").unwrap(), Mode::Flags(FlagKind::CFlags));
		assert_eq!(Mode::parse("flags").unwrap(), Mode::Flags(FlagKind::CFlags));
		assert!(matches!(
			Mode::parse("include"),
			Err(TestCheckError::InvalidMode { mode }) if mode == "include"
		));
	}

	#[test]
	fn test_flag_mode_requires_one_test() {
		let store = RuleStore::default();
		let mode = Mode::Flags(FlagKind::CFlags);

		assert!(matches!(
			resolve(mode, &[], &store),
			Err(TestCheckError::TestCount { count: 0, .. })
		));
		assert!(matches!(
			resolve(mode, &tests(&["a", "b"]), &store),
			Err(TestCheckError::TestCount { count: 2, .. })
		));
		assert!(Mode::Exclude.check_test_count(0).is_ok());
		assert!(Mode::Exclude.check_test_count(40).is_ok());
	}

	#[test]
	fn test_literal_exclude() {
		let mut builder = RuleStoreBuilder::new();
		builder.add_names(TestState::Exclude, ["foo", "bar"]);
		let store = builder.build();

		let kept = exclude_tests(&tests(&["foo", "bar", "baz"]), &store).unwrap();
		assert_eq!(kept, vec!["baz"]);
	}

	#[test]
	fn test_rinclude_reverses_rexclude() {
		let mut builder = RuleStoreBuilder::new();
		builder.add_patterns(RegexState::RExclude, ["te.*"]);
		builder.add_patterns(RegexState::RInclude, ["test2"]);
		let store = builder.build();

		let kept = exclude_tests(&tests(&["test1", "test2", "other"]), &store).unwrap();
		assert_eq!(kept, vec!["test2", "other"]);
	}

	#[test]
	fn test_literal_exclude_beats_rinclude() {
		let mut builder = RuleStoreBuilder::new();
		builder.add_names(TestState::Exclude, ["test2"]);
		builder.add_patterns(RegexState::RExclude, ["te.*"]);
		builder.add_patterns(RegexState::RInclude, ["test2"]);
		let store = builder.build();

		let kept = exclude_tests(&tests(&["test1", "test2", "other"]), &store).unwrap();
		assert_eq!(kept, vec!["other"]);
	}

	#[test]
	fn test_rinclude_alone_keeps_everything() {
		let mut builder = RuleStoreBuilder::new();
		builder.add_patterns(RegexState::RInclude, ["nothing"]);
		let store = builder.build();

		let kept = exclude_tests(&tests(&["a", "b"]), &store).unwrap();
		assert_eq!(kept, vec!["a", "b"]);
	}

	#[test]
	fn test_other_states_do_not_exclude() {
		let mut builder = RuleStoreBuilder::new();
		builder.add_names(TestState::ExpectedFail, ["a"]);
		builder.add_names(TestState::Benchmark, ["b"]);
		let store = builder.build();

		let kept = exclude_tests(&tests(&["a", "b"]), &store).unwrap();
		assert_eq!(kept, vec!["a", "b"]);
	}

	#[test]
	fn test_bad_rexclude_fails_without_partial_output() {
		let mut builder = RuleStoreBuilder::new();
		builder.add_patterns(RegexState::RExclude, ["ok", "(bad"]);
		let store = builder.build();

		let err = exclude_tests(&tests(&["ok1", "other"]), &store).unwrap_err();
		assert!(matches!(
			err,
			TestCheckError::InvalidRegex { state, pattern, .. } if state == "rexclude" && pattern == "(bad"
		));
	}

	#[test]
	fn test_flags_from_rules() {
		let mut builder = RuleStoreBuilder::new();
		builder.add_flag(FlagKind::CFlags, "test1", "-DFOO=1");
		builder.add_flag(FlagKind::CFlags, "test2", "-DFOO=1");
		let store = builder.build();

		let tokens = resolve_flags(FlagKind::CFlags, "test1", &store).unwrap();
		assert_eq!(tokens, vec!["-DFOO=1"]);
		let tokens = resolve_flags(FlagKind::CFlags, "other", &store).unwrap();
		assert!(tokens.is_empty());
	}

	#[test]
	fn test_state_defines() {
		let mut builder = RuleStoreBuilder::new();
		builder.add_names(TestState::Exclude, ["test1"]);
		builder.add_names(TestState::ExpectedFail, ["test1"]);
		builder.add_names(TestState::Indeterminate, ["test1", "test2"]);
		let store = builder.build();

		let tokens = resolve_flags(FlagKind::CFlags, "test1", &store).unwrap();
		assert_eq!(
			tokens,
			vec!["-DTEST_STATE_EXPECTED_FAIL=1", "-DTEST_STATE_INDETERMINATE=1"]
		);
	}

	#[test]
	fn test_flags_are_additive() {
		let mut builder = RuleStoreBuilder::new();
		builder.add_names(TestState::UserInput, ["termios01"]);
		builder.add_flag(FlagKind::CFlags, "termios.*", "-DA");
		let fewer = resolve_flags(FlagKind::CFlags, "termios01", &builder.build()).unwrap();

		let mut builder = RuleStoreBuilder::new();
		builder.add_names(TestState::UserInput, ["termios01"]);
		builder.add_flag(FlagKind::CFlags, "termios.*", "-DA");
		builder.add_flag(FlagKind::CFlags, "term", "-DB");
		builder.add_flag(FlagKind::CFlags, "termios.*", "-DC");
		let more = resolve_flags(FlagKind::CFlags, "termios01", &builder.build()).unwrap();

		for token in &fewer {
			assert!(more.contains(token));
		}
		assert_eq!(
			more,
			vec!["-DTEST_STATE_USER_INPUT=1", "-DA", "-DC", "-DB"]
		);
	}

	#[test]
	fn test_bad_flag_pattern() {
		let mut builder = RuleStoreBuilder::new();
		builder.add_flag(FlagKind::CFlags, "[x", "-DA");
		let store = builder.build();

		let err = resolve_flags(FlagKind::CFlags, "x", &store).unwrap_err();
		assert!(matches!(err, TestCheckError::InvalidRegex { state, .. } if state == "cflags"));
	}

	#[test]
	fn test_flag_mode_ignores_bad_exclusion_patterns() {
		let mut builder = RuleStoreBuilder::new();
		builder.add_patterns(RegexState::RExclude, ["(bad"]);
		builder.add_names(TestState::Benchmark, ["whetstone"]);
		let store = builder.build();

		let tokens = resolve(Mode::Flags(FlagKind::CFlags), &tests(&["whetstone"]), &store).unwrap();
		assert_eq!(tokens, vec!["-DTEST_STATE_BENCHMARK=1"]);
	}
}
