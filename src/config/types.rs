use std::collections::{BTreeMap, BTreeSet};

/// Literal test states: exact test-name membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TestState {
	Exclude,
	ExpectedFail,
	UserInput,
	Indeterminate,
	Benchmark,
}

impl TestState {
	/// Every literal state, in the order their defines are reported.
	pub const ALL: [TestState; 5] = [
		TestState::Exclude,
		TestState::ExpectedFail,
		TestState::UserInput,
		TestState::Indeterminate,
		TestState::Benchmark,
	];

	/// Get the name used for this state in a test config.
	pub fn as_str(&self) -> &'static str {
		match self {
			TestState::Exclude => "exclude",
			TestState::ExpectedFail => "expected-fail",
			TestState::UserInput => "user-input",
			TestState::Indeterminate => "indeterminate",
			TestState::Benchmark => "benchmark",
		}
	}

	/// Compiler define emitted for a test in this state. `exclude` has none.
	pub fn define(&self) -> Option<&'static str> {
		match self {
			TestState::Exclude => None,
			TestState::ExpectedFail => Some("-DTEST_STATE_EXPECTED_FAIL=1"),
			TestState::UserInput => Some("-DTEST_STATE_USER_INPUT=1"),
			TestState::Indeterminate => Some("-DTEST_STATE_INDETERMINATE=1"),
			TestState::Benchmark => Some("-DTEST_STATE_BENCHMARK=1"),
		}
	}
}

/// Regex states: ordered pattern lists matched against test names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegexState {
	RExclude,
	RInclude,
}

impl RegexState {
	pub const ALL: [RegexState; 2] = [RegexState::RExclude, RegexState::RInclude];

	pub fn as_str(&self) -> &'static str {
		match self {
			RegexState::RExclude => "rexclude",
			RegexState::RInclude => "rinclude",
		}
	}
}

/// Flag kinds: per-pattern flag strings, selected by the flag mode of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FlagKind {
	CFlags,
}

impl FlagKind {
	pub const ALL: [FlagKind; 1] = [FlagKind::CFlags];

	pub fn as_str(&self) -> &'static str {
		match self {
			FlagKind::CFlags => "cflags",
		}
	}
}

/// The state field of a config line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
	Include,
	Literal(TestState),
	Regex(RegexState),
	Flag(FlagKind),
}

impl Directive {
	/// Look up a state name. Anything outside the fixed vocabulary is `None`.
	pub fn from_name(name: &str) -> Option<Self> {
		let directive = match name {
			"include" => Directive::Include,
			"exclude" => Directive::Literal(TestState::Exclude),
			"expected-fail" => Directive::Literal(TestState::ExpectedFail),
			"user-input" => Directive::Literal(TestState::UserInput),
			"indeterminate" => Directive::Literal(TestState::Indeterminate),
			"benchmark" => Directive::Literal(TestState::Benchmark),
			"rexclude" => Directive::Regex(RegexState::RExclude),
			"rinclude" => Directive::Regex(RegexState::RInclude),
			"cflags" => Directive::Flag(FlagKind::CFlags),
			_ => return None,
		};
		Some(directive)
	}
}

/// A test pattern and the flag strings accumulated for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagRule {
	/// Regex pattern matched against the start of a test name.
	pub pattern: String,

	/// Flag strings in the order they were declared.
	pub flags: Vec<String>,
}

/// Every rule loaded from the test configs of one invocation.
///
/// Built by [`RuleStoreBuilder`] while loading and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleStore {
	literal: BTreeMap<TestState, BTreeSet<String>>,
	regex: BTreeMap<RegexState, Vec<String>>,
	flags: BTreeMap<FlagKind, Vec<FlagRule>>,
}

impl RuleStore {
	/// Check if a test is a member of a literal state.
	pub fn contains(&self, state: TestState, test: &str) -> bool {
		self.literal
			.get(&state)
			.is_some_and(|names| names.contains(test))
	}

	/// Names assigned to a literal state, sorted.
	pub fn names(&self, state: TestState) -> impl Iterator<Item = &str> {
		self.literal
			.get(&state)
			.into_iter()
			.flatten()
			.map(String::as_str)
	}

	/// Patterns of a regex state, in load order.
	pub fn patterns(&self, state: RegexState) -> &[String] {
		self.regex.get(&state).map(Vec::as_slice).unwrap_or_default()
	}

	/// Flag rules of a flag kind, in the order their patterns first appeared.
	pub fn flag_rules(&self, kind: FlagKind) -> &[FlagRule] {
		self.flags.get(&kind).map(Vec::as_slice).unwrap_or_default()
	}

	pub fn is_empty(&self) -> bool {
		self.literal.values().all(BTreeSet::is_empty)
			&& self.regex.values().all(Vec::is_empty)
			&& self.flags.values().all(Vec::is_empty)
	}
}

/// Accumulates config lines into a [`RuleStore`].
///
/// Literal states union, regex and flag lists append.
#[derive(Debug, Default)]
pub struct RuleStoreBuilder {
	store: RuleStore,
}

impl RuleStoreBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_names<I, S>(&mut self, state: TestState, names: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.store
			.literal
			.entry(state)
			.or_default()
			.extend(names.into_iter().map(Into::into));
	}

	pub fn add_patterns<I, S>(&mut self, state: RegexState, patterns: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.store
			.regex
			.entry(state)
			.or_default()
			.extend(patterns.into_iter().map(Into::into));
	}

	/// Append a flag string to the list held for `pattern`.
	pub fn add_flag(&mut self, kind: FlagKind, pattern: &str, flags: &str) {
		let rules = self.store.flags.entry(kind).or_default();
		match rules.iter_mut().find(|rule| rule.pattern == pattern) {
			Some(rule) => rule.flags.push(flags.to_string()),
			None => rules.push(FlagRule {
				pattern: pattern.to_string(),
				flags: vec![flags.to_string()],
			}),
		}
	}

	pub fn build(self) -> RuleStore {
		self.store
	}
}
