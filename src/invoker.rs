//! The invoker: run one callable over a [`TestSuite`] and produce an [`Outcome`].
//!
//! Execution is strictly sequential and halts at the first case that does not
//! pass. Evaluation is pure with respect to the process; printing and exit
//! codes live in [`crate::report`] and in [`assert_table`] and [`assert_table_with`],
//! the only functions here that may terminate the process.
//!
//! # Example
//!
//! ```rust
//! use casecheck::builtins::build_default_registry;
//! use casecheck::invoker::{Invoker, Outcome};
//! use casecheck::suite::TestSuite;
//!
//! let registry = build_default_registry();
//! let suite = TestSuite::from_parallel([1, 2, 3, 4], [1, 4, 9, 16]).unwrap();
//! let outcome = Invoker::new(&registry).run("demo.Arith", "square", &suite);
//! assert!(matches!(outcome, Outcome::AllPassed { cases: 4 }));
//! ```

use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;

use crate::compare::{compare, Mismatch};
use crate::config::RunConfig;
use crate::diagnostics::{CallError, HarnessError};
use crate::registry::{join_kinds, Target, TargetRegistry};
use crate::report;
use crate::suite::{Expected, Input, TestCase, TestSuite};
use crate::value::{Value, ValueKind};

// =============================================================================
// CORE TYPES
// =============================================================================

/// The first case that produced a wrong answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    /// Zero-based case index.
    pub index: usize,
    pub input: Input,
    pub expected: Expected,
    pub actual: Value,
    pub mismatch: Mismatch,
}

/// How a run halted.
#[derive(Debug)]
pub enum Outcome {
    /// Every case matched.
    AllPassed { cases: usize },
    /// A case returned a value that did not match; later cases were not run.
    FailedAt(Failure),
    /// The run stopped on a configuration, resolution or invocation error.
    Errored(HarnessError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::AllPassed { .. })
    }

    /// Process exit status for this outcome: 0 on success, 1 on a mismatch, 2 on an error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::AllPassed { .. } => 0,
            Outcome::FailedAt(_) => 1,
            Outcome::Errored(_) => 2,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::FailedAt(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&HarnessError> {
        match self {
            Outcome::Errored(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HarnessError> for Outcome {
    fn from(err: HarnessError) -> Self {
        Outcome::Errored(err)
    }
}

/// Anything that can be applied to a case's arguments.
pub trait Invocable {
    fn invoke(&mut self, args: &[Value]) -> Result<Value, CallError>;

    /// `(owner, method)` used when reporting.
    fn identity(&self) -> (&str, &str);

    /// Whether arguments of these kinds may be passed. Untyped callables accept anything.
    fn accepts(&self, _kinds: &[ValueKind]) -> bool {
        true
    }

    fn signature(&self) -> String {
        let (_, method) = self.identity();
        method.to_string()
    }
}

impl Invocable for Target {
    fn invoke(&mut self, args: &[Value]) -> Result<Value, CallError> {
        self.call(args)
    }

    fn identity(&self) -> (&str, &str) {
        (&self.owner, &self.method)
    }

    fn accepts(&self, kinds: &[ValueKind]) -> bool {
        Target::accepts(self, kinds)
    }

    fn signature(&self) -> String {
        Target::signature(self)
    }
}

/// Adapts a closure over dynamic values into an [`Invocable`].
pub struct FnInvocable<F> {
    label: String,
    f: F,
}

impl<F> FnInvocable<F>
where
    F: FnMut(&[Value]) -> Result<Value, CallError>,
{
    pub fn new(label: impl Into<String>, f: F) -> Self {
        Self {
            label: label.into(),
            f,
        }
    }
}

impl<F> Invocable for FnInvocable<F>
where
    F: FnMut(&[Value]) -> Result<Value, CallError>,
{
    fn invoke(&mut self, args: &[Value]) -> Result<Value, CallError> {
        (self.f)(args)
    }

    fn identity(&self) -> (&str, &str) {
        ("<fn>", &self.label)
    }
}

// =============================================================================
// INVOKER
// =============================================================================

/// Runs suites against targets resolved by name from a registry.
///
/// Nothing is cached: each [`Invoker::run`] resolves its target again and binds a
/// fresh instance.
pub struct Invoker<'r> {
    registry: &'r TargetRegistry,
}

impl<'r> Invoker<'r> {
    pub fn new(registry: &'r TargetRegistry) -> Self {
        Self { registry }
    }

    /// Resolves `owner::method` from the first case's argument kinds, then runs every case.
    pub fn run(&self, owner: &str, method: &str, suite: &TestSuite) -> Outcome {
        let span = tracing::info_span!("run", owner, method, cases = suite.len());
        let _guard = span.enter();
        let mut target = match self
            .registry
            .resolve(owner, method, &suite.derived_kinds())
        {
            Ok(target) => target,
            Err(err) => return Outcome::Errored(err),
        };
        run_with(&mut target, suite)
    }
}

/// Runs every case of `suite` against an already resolved callable.
pub fn run_with<C: Invocable>(callable: &mut C, suite: &TestSuite) -> Outcome {
    drive(suite, |index, case| {
        let kinds = case.input.kinds();
        if !callable.accepts(&kinds) {
            let (owner, method) = callable.identity();
            return Err(HarnessError::resolution(
                owner,
                method,
                format!(
                    "case {} passes ({}) but the resolved signature is {}",
                    index + 1,
                    join_kinds(&kinds),
                    callable.signature()
                ),
                Some(
                    "parameter kinds are derived from the first case; later cases must match them"
                        .to_string(),
                ),
            ));
        }
        let args = case.input.args();
        guarded(index, &case.input, || callable.invoke(args))
    })
}

/// Runs a typed function over `(input, expected)` pairs without any name lookup.
///
/// Inputs and outputs are converted to [`Value`]s for comparison and reporting, so
/// the same comparison rule applies as for registered targets.
///
/// ```rust
/// use casecheck::invoker::check;
/// let outcome = check(|x: i64| x * x, [(2, 4), (3, 9)]);
/// assert!(outcome.is_success());
/// ```
pub fn check<I, O, F>(mut f: F, pairs: impl IntoIterator<Item = (I, O)>) -> Outcome
where
    I: Into<Value> + Clone,
    O: Into<Value>,
    F: FnMut(I) -> O,
{
    let (inputs, expected): (Vec<I>, Vec<O>) = pairs.into_iter().unzip();
    let suite = match TestSuite::from_parallel(inputs.iter().cloned(), expected) {
        Ok(suite) => suite,
        Err(err) => return Outcome::Errored(err),
    };
    drive(&suite, |index, case| {
        let arg = inputs[index].clone();
        guarded(index, &case.input, || Ok(f(arg).into()))
    })
}

/// Prints the outcome of running `owner::method` over `suite` and exits the process
/// with a non-zero status unless every case passed.
///
/// Returns the outcome only when it passed. See [`assert_table_with`] to keep the
/// process alive on failure.
pub fn assert_table(
    registry: &TargetRegistry,
    owner: &str,
    method: &str,
    suite: &TestSuite,
) -> Outcome {
    assert_table_with(registry, owner, method, suite, &RunConfig::default())
}

/// Like [`assert_table`], but printing and exiting follow `config`.
///
/// With `exit_on_failure` unset the outcome is printed and returned whatever it is.
pub fn assert_table_with(
    registry: &TargetRegistry,
    owner: &str,
    method: &str,
    suite: &TestSuite,
    config: &RunConfig,
) -> Outcome {
    let outcome = Invoker::new(registry).run(owner, method, suite);
    report::print_outcome(&outcome, config);
    if config.exit_on_failure && !outcome.is_success() {
        std::process::exit(outcome.exit_code());
    }
    outcome
}

// =============================================================================
// INTERNAL HELPERS
// =============================================================================

fn drive<F>(suite: &TestSuite, mut call: F) -> Outcome
where
    F: FnMut(usize, &TestCase) -> Result<Value, HarnessError>,
{
    for (index, case) in suite.cases().iter().enumerate() {
        tracing::debug!(case = index + 1, input = %case.input, "invoking");
        let actual = match call(index, case) {
            Ok(actual) => actual,
            Err(err) => {
                tracing::debug!(case = index + 1, error = %err, "halted on error");
                return Outcome::Errored(err);
            }
        };
        if let Err(mismatch) = compare(&case.expected, &actual) {
            tracing::debug!(case = index + 1, %mismatch, "halted on mismatch");
            return Outcome::FailedAt(Failure {
                index,
                input: case.input.clone(),
                expected: case.expected.clone(),
                actual,
                mismatch,
            });
        }
    }
    Outcome::AllPassed { cases: suite.len() }
}

/// Invokes `f`, turning both an `Err` and a panic into an invocation error for case `index`.
fn guarded<F>(index: usize, input: &Input, f: F) -> Result<Value, HarnessError>
where
    F: FnOnce() -> Result<Value, CallError>,
{
    let invocation_error = |message: String| HarnessError::Invocation {
        case: index,
        input: input.to_string(),
        message,
    };
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(invocation_error(err.message)),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic payload".to_string());
            Err(invocation_error(format!("panicked: {}", message)))
        }
    }
}
