//! Test config loading and parsing.
//!
//! This module handles:
//! - The line grammar of `.tcfg` files
//! - Search path lookup and `include:` expansion
//! - Accumulating every loaded rule into a [`RuleStore`]

pub mod loader;
pub mod parser;
pub mod types;

pub use loader::{BASELINE_CONFIG, SearchPath, load_rule_store};
pub use parser::{LineError, LineRecord, clean_line, parse_line};
pub use types::{
	Directive, FlagKind, FlagRule, RegexState, RuleStore, RuleStoreBuilder, TestState,
};
