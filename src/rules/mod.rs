//! Rule matching and resolution.
//!
//! This module handles:
//! - Compiling config patterns anchored at the start of a test name
//! - Exclusion and flag resolution against a loaded [`RuleStore`](crate::config::RuleStore)

pub mod matcher;
pub mod resolver;

pub use matcher::{CompiledPattern, any_match, compile_patterns};
pub use resolver::{Mode, exclude_tests, resolve, resolve_flags};
