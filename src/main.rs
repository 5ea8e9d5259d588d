use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rtems_test_check::TestCheckError;
use rtems_test_check::config::{
	FlagKind, RegexState, RuleStore, SearchPath, TestState, load_rule_store,
};
use rtems_test_check::output::{INVALID_TEST_DATA, format_tokens};
use rtems_test_check::rules::{Mode, resolve};

#[derive(Parser)]
#[command(name = "rtems-test-check")]
#[command(
	author,
	version,
	about = "Decide which tests to build for a BSP and the flags each test needs"
)]
struct Cli {
	/// Print diagnostics to stderr
	#[arg(short, long)]
	verbose: bool,

	/// Resolution mode: exclude, cflags or flags
	mode: String,

	/// Board support package the tests are built for
	bsp: String,

	/// Test config file, looked up on the search paths
	config: String,

	/// Directories searched for test configs, separated by the platform path separator
	search_paths: String,

	/// Tests to resolve (exactly one for the flag modes)
	#[arg(trailing_var_arg = true, allow_hyphen_values = true)]
	tests: Vec<String>,
}

/// Install a stderr subscriber when verbose diagnostics are requested.
fn init_tracing(verbose: bool) {
	if verbose {
		tracing_subscriber::fmt()
			.with_env_filter(
				EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
			)
			.with_writer(std::io::stderr)
			.with_target(false)
			.without_time()
			.init();
	}
}

fn main() -> ExitCode {
	let cli = match Cli::try_parse() {
		Ok(cli) => cli,
		Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
		Err(e) => {
			let _ = e.print();
			return fail(TestCheckError::InvalidCommandLine.into());
		}
	};

	match run(&cli) {
		Ok(line) => {
			println!("{}", line);
			ExitCode::SUCCESS
		}
		Err(e) => fail(e),
	}
}

/// Report an error and print the sentinel in place of a result.
fn fail(error: anyhow::Error) -> ExitCode {
	eprintln!("error: {error:#}");
	println!("{}", INVALID_TEST_DATA);

	let code = error
		.downcast_ref::<TestCheckError>()
		.map_or(1, TestCheckError::exit_code);
	ExitCode::from(code)
}

/// Summarize every state of the loaded rules.
fn log_rule_store(store: &RuleStore) {
	if store.is_empty() {
		info!("loaded: no rules");
		return;
	}

	for state in TestState::ALL {
		info!("loaded: {}={}", state.as_str(), store.names(state).count());
	}
	for state in RegexState::ALL {
		info!("loaded: {}={}", state.as_str(), store.patterns(state).len());
	}
	for kind in FlagKind::ALL {
		let rules = store.flag_rules(kind);
		info!(
			"loaded: {}={} patterns, {} flags",
			kind.as_str(),
			rules.len(),
			rules.iter().map(|rule| rule.flags.len()).sum::<usize>()
		);
	}
}

fn run(cli: &Cli) -> Result<String> {
	init_tracing(cli.verbose);
	info!("cmd: {}", std::env::args().collect::<Vec<_>>().join(" "));

	let mode = Mode::parse(&cli.mode)?;
	mode.check_test_count(cli.tests.len())?;

	let search = SearchPath::parse(&cli.search_paths);

	info!("mode: {}", mode.as_str());
	info!("bsp: {}", cli.bsp);
	info!("testconfig: {}", cli.config);
	info!(
		"includepaths: {}",
		search
			.dirs()
			.iter()
			.map(|dir| dir.display().to_string())
			.collect::<Vec<_>>()
			.join(", ")
	);
	info!("tests: {}", cli.tests.join(", "));

	let store = load_rule_store(&search, &cli.config)
		.with_context(|| format!("Failed to load test config for {}", cli.bsp))?;

	log_rule_store(&store);

	let tokens = resolve(mode, &cli.tests, &store)
		.with_context(|| format!("Failed to resolve tests in {} mode", mode.as_str()))?;

	Ok(format_tokens(tokens))
}
