//! Unified, `miette`-based diagnostics for the harness.
//!
//! Every way a run can stop other than a value mismatch is a [`HarnessError`]. A
//! mismatch is not an error: it is reported through
//! [`Outcome::FailedAt`](crate::invoker::Outcome::FailedAt), so a crash and a wrong
//! answer can never be confused in a report.
//!
//! Message-only errors are built with [`err_msg!`](crate::err_msg):
//!
//! ```rust
//! use casecheck::{err_msg, ErrorType};
//! let err = err_msg!(Configuration, "{} inputs but {} expected values", 3, 2);
//! assert_eq!(err.error_type(), ErrorType::Configuration);
//! ```

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Type-safe classification of a [`HarnessError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// Malformed or arity-inconsistent case table, detected before any invocation.
    Configuration,
    /// Owner or method unknown, or no overload matching the derived parameter kinds.
    Resolution,
    /// The method under test failed or panicked.
    Invocation,
    /// A suite file could not be read or parsed.
    Io,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Configuration => "configuration",
            ErrorType::Resolution => "resolution",
            ErrorType::Invocation => "invocation",
            ErrorType::Io => "io",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error raised by a method under test.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CallError {
    pub message: String,
}

impl CallError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Every fatal condition a run can end in.
#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    #[error("Configuration error: {message}")]
    #[diagnostic(code(casecheck::configuration))]
    Configuration {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Resolution error: {owner}::{method}: {message}")]
    #[diagnostic(code(casecheck::resolution))]
    Resolution {
        owner: String,
        method: String,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invocation error in case {}: input {input}: {message}", .case + 1)]
    #[diagnostic(code(casecheck::invocation))]
    Invocation {
        /// Zero-based case index.
        case: usize,
        input: String,
        message: String,
    },

    #[error("Failed to read suite file {}", .path.display())]
    #[diagnostic(code(casecheck::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse suite file {}", .path.display())]
    #[diagnostic(code(casecheck::io), help("suite files are YAML with `owner`, `method` and one case-table shape"))]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl HarnessError {
    pub fn error_type(&self) -> ErrorType {
        match self {
            HarnessError::Configuration { .. } => ErrorType::Configuration,
            HarnessError::Resolution { .. } => ErrorType::Resolution,
            HarnessError::Invocation { .. } => ErrorType::Invocation,
            HarnessError::Io { .. } | HarnessError::Yaml { .. } => ErrorType::Io,
        }
    }

    pub fn resolution(
        owner: &str,
        method: &str,
        message: impl Into<String>,
        help: Option<String>,
    ) -> Self {
        HarnessError::Resolution {
            owner: owner.to_string(),
            method: method.to_string(),
            message: message.into(),
            help,
        }
    }

    /// Attaches a help line to a configuration or resolution error; other variants are unchanged.
    pub fn with_help(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            HarnessError::Configuration { help, .. } | HarnessError::Resolution { help, .. } => {
                *help = Some(text.into());
            }
            _ => {}
        }
        self
    }
}

/// Constructs a message-only [`HarnessError::Configuration`] with `format!` arguments.
#[macro_export]
macro_rules! err_msg {
    (Configuration, $($arg:tt)+) => {
        $crate::HarnessError::Configuration {
            message: format!($($arg)+),
            help: None,
        }
    };
}
