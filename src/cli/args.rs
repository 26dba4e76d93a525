//! Defines the command-line arguments and subcommands for the casecheck CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "casecheck",
    version,
    about = "Invoke one method over a table of cases and report the first mismatch."
)]
pub struct CasecheckArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a suite file against its target and exit non-zero on the first failure.
    Run {
        /// The path to the YAML suite file.
        #[arg(required = true)]
        file: PathBuf,
        /// Owner to resolve, overriding `owner:` in the file.
        #[arg(long)]
        owner: Option<String>,
        /// Method to resolve, overriding `method:` in the file.
        #[arg(long)]
        method: Option<String>,
        /// Print the outcome as JSON.
        #[arg(long)]
        json: bool,
        /// Disable colored output.
        #[arg(long)]
        no_color: bool,
    },
    /// List every registered owner and method overload.
    List,
}
