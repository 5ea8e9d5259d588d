//! rtems-test-check - decide which tests of a suite to build and with what flags.
//!
//! This library provides the core functionality, including:
//! - Loading `.tcfg` test configs through a search path, expanding includes
//! - Classifying tests by literal and regex states
//! - Resolving exclusions and per-test compiler flags
//!
//! # Example
//!
//! ```no_run
//! use rtems_test_check::config::{SearchPath, load_rule_store};
//! use rtems_test_check::output::format_tokens;
//! use rtems_test_check::rules::{Mode, resolve};
//!
//! let search = SearchPath::parse("testsuites:testsuites/sptests");
//! let store = load_rule_store(&search, "testdata/sptests.tcfg").unwrap();
//!
//! let tests = vec!["sp01".to_string(), "spfatal01".to_string()];
//! let kept = resolve(Mode::Exclude, &tests, &store).unwrap();
//! println!("{}", format_tokens(kept));
//! ```

pub mod config;
pub mod error;
pub mod output;
pub mod rules;

pub use error::{Result, TestCheckError};
