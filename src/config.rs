//! Run configuration and YAML suite files.
//!
//! A suite file names its target and supplies exactly one case-table shape:
//!
//! ```yaml
//! owner: demo.Arith
//! method: square
//! inputs: [1, 2, 3, 4]
//! expected: [1, 4, 9, 16]
//! ```
//!
//! | shape            | keys                  | notes                                 |
//! |------------------|-----------------------|---------------------------------------|
//! | explicit pairs   | `cases`               | list of `{ input, expected }`         |
//! | parallel lists   | `inputs` + `expected` | lengths must match                    |
//! | mapping          | `table`               | scalar keys only, single argument     |
//! | multi-parameter  | `args` + `expected`   | each row is spread into the arguments |

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::diagnostics::HarnessError;
use crate::err_msg;
use crate::suite::{TestCase, TestSuite};
use crate::value::Value;

/// Configuration for running a suite and reporting its outcome.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub use_colors: bool,
    /// Print the outcome as a JSON document instead of a text notice.
    pub json: bool,
    /// Terminate the process with the outcome's exit status when a run does not pass.
    pub exit_on_failure: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stdout),
            json: false,
            exit_on_failure: true,
        }
    }
}

/// One `{ input, expected }` entry of the explicit pairs shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseEntry {
    pub input: Value,
    pub expected: Value,
}

/// A suite file as written on disk, before its shape is normalized.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteFile {
    pub owner: Option<String>,
    pub method: Option<String>,
    #[serde(default)]
    pub cases: Option<Vec<CaseEntry>>,
    #[serde(default)]
    pub inputs: Option<Vec<Value>>,
    #[serde(default)]
    pub expected: Option<Vec<Value>>,
    #[serde(default)]
    pub table: Option<serde_yaml::Mapping>,
    #[serde(default)]
    pub args: Option<Vec<Vec<Value>>>,
}

/// A suite file with its target named and its cases normalized.
#[derive(Debug, Clone)]
pub struct LoadedSuite {
    pub owner: String,
    pub method: String,
    pub suite: TestSuite,
}

impl SuiteFile {
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let text = fs::read_to_string(path).map_err(|source| HarnessError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| HarnessError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Normalizes whichever shape the file uses into a [`TestSuite`].
    ///
    /// `owner` and `method` override the file's own target when given.
    pub fn into_suite(
        self,
        owner: Option<String>,
        method: Option<String>,
    ) -> Result<LoadedSuite, HarnessError> {
        let owner = owner.or(self.owner).ok_or_else(|| {
            err_msg!(Configuration, "no owner given").with_help("set `owner:` in the suite file or pass --owner")
        })?;
        let method = method.or(self.method).ok_or_else(|| {
            err_msg!(Configuration, "no method given").with_help("set `method:` in the suite file or pass --method")
        })?;

        let shapes = [
            ("cases", self.cases.is_some()),
            ("inputs", self.inputs.is_some()),
            ("table", self.table.is_some()),
            ("args", self.args.is_some()),
        ];
        let present: Vec<&str> = shapes
            .iter()
            .filter(|(_, present)| *present)
            .map(|(name, _)| *name)
            .collect();
        if present.len() != 1 {
            return Err(err_msg!(
                Configuration,
                "suite file must use exactly one case-table shape, found {}",
                if present.is_empty() {
                    "none".to_string()
                } else {
                    present.join(", ")
                }
            )
            .with_help("use one of `cases`, `inputs` + `expected`, `table`, or `args` + `expected`"));
        }

        let suite = match (self.cases, self.inputs, self.table, self.args, self.expected) {
            (Some(cases), _, _, _, None) => TestSuite::new(
                cases
                    .into_iter()
                    .map(|c| TestCase::new(c.input, c.expected))
                    .collect(),
            )?,
            (_, Some(inputs), _, _, Some(expected)) => TestSuite::from_parallel(inputs, expected)?,
            (_, _, Some(table), _, None) => TestSuite::from_map(mapping_entries(table)?)?,
            (_, _, _, Some(args), Some(expected)) => TestSuite::from_args(args, expected)?,
            (Some(_), ..) | (_, _, Some(_), _, Some(_)) => {
                return Err(err_msg!(
                    Configuration,
                    "`expected` is only used with `inputs` or `args`"
                ))
            }
            _ => {
                return Err(err_msg!(
                    Configuration,
                    "`inputs` and `args` need an `expected` list"
                ))
            }
        };

        Ok(LoadedSuite {
            owner,
            method,
            suite,
        })
    }
}

fn mapping_entries(table: serde_yaml::Mapping) -> Result<Vec<(Value, Value)>, HarnessError> {
    table
        .into_iter()
        .map(|(key, value)| {
            let key: Value = serde_yaml::from_value(key).map_err(|e| {
                err_msg!(Configuration, "unsupported table key: {}", e)
            })?;
            let value: Value = serde_yaml::from_value(value).map_err(|e| {
                err_msg!(Configuration, "unsupported table value: {}", e)
            })?;
            Ok((key, value))
        })
        .collect()
}

/// Loads a suite file and normalizes it, applying optional target overrides.
pub fn load_suite(
    path: &Path,
    owner: Option<String>,
    method: Option<String>,
) -> Result<LoadedSuite, HarnessError> {
    SuiteFile::load(path)?.into_suite(owner, method)
}
