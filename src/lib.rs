pub use crate::diagnostics::{CallError, ErrorType, HarnessError};
pub use crate::invoker::{assert_table, assert_table_with, check, Invoker, Outcome};
pub use crate::suite::{Expected, Input, TestCase, TestSuite};
pub use crate::value::Value;

pub mod builtins;
pub mod cli;
pub mod compare;
pub mod config;
pub mod diagnostics;
pub mod invoker;
pub mod registry;
pub mod report;
pub mod suite;
pub mod value;
