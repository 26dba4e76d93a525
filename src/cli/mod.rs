//! The casecheck command-line interface.
//!
//! Thin wrapper over the library: load a suite, run it, print exactly one
//! notice and turn the outcome into the process exit status.

use std::path::Path;
use std::process;

use clap::Parser;

use crate::builtins::build_default_registry;
use crate::cli::args::{CasecheckArgs, Command};
use crate::config::{load_suite, RunConfig};
use crate::invoker::{Invoker, Outcome};
use crate::registry::TargetRegistry;
use crate::report;

pub mod args;

/// The main entry point for the CLI.
pub fn run() {
    let args = CasecheckArgs::parse();
    let registry = build_default_registry();

    let code = match args.command {
        Command::Run {
            file,
            owner,
            method,
            json,
            no_color,
        } => {
            let mut config = RunConfig {
                json,
                ..RunConfig::default()
            };
            if no_color {
                config.use_colors = false;
            }
            handle_run(&registry, &file, owner, method, &config)
        }
        Command::List => {
            handle_list(&registry);
            0
        }
    };

    process::exit(code);
}

/// Handles the `run` subcommand, returning the exit status.
pub fn handle_run(
    registry: &TargetRegistry,
    file: &Path,
    owner: Option<String>,
    method: Option<String>,
    config: &RunConfig,
) -> i32 {
    let outcome = match load_suite(file, owner, method) {
        Ok(loaded) => {
            tracing::debug!(file = %file.display(), cases = loaded.suite.len(), "loaded suite");
            Invoker::new(registry).run(&loaded.owner, &loaded.method, &loaded.suite)
        }
        Err(err) => Outcome::Errored(err),
    };
    report::print_outcome(&outcome, config);
    outcome.exit_code()
}

/// Handles the `list` subcommand.
fn handle_list(registry: &TargetRegistry) {
    for signature in registry.signatures() {
        println!("{}", signature);
    }
}
