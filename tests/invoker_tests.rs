// Behavioral tests for the invoker: halting, comparison and error categories.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use casecheck::builtins::build_default_registry;
use casecheck::cli::handle_run;
use casecheck::compare::Mismatch;
use casecheck::config::RunConfig;
use casecheck::invoker::{run_with, FnInvocable};
use casecheck::registry::{Callable, OwnerDef, TargetRegistry};
use casecheck::value::ValueKind;
use casecheck::{CallError, ErrorType, Invoker, Outcome, TestCase, TestSuite, Value};

static PASSTHROUGH_CALLS: AtomicUsize = AtomicUsize::new(0);
static HALT_CALLS: AtomicUsize = AtomicUsize::new(0);
static NEVER_CALLS: AtomicUsize = AtomicUsize::new(0);

fn passthrough(args: &[Value]) -> Result<Value, CallError> {
    PASSTHROUGH_CALLS.fetch_add(1, Ordering::SeqCst);
    Ok(args[0].clone())
}

fn counted_identity(args: &[Value]) -> Result<Value, CallError> {
    HALT_CALLS.fetch_add(1, Ordering::SeqCst);
    Ok(args[0].clone())
}

fn must_not_run(_args: &[Value]) -> Result<Value, CallError> {
    NEVER_CALLS.fetch_add(1, Ordering::SeqCst);
    panic!("target invoked although the suite was invalid");
}

fn stub_registry() -> TargetRegistry {
    let mut registry = build_default_registry();
    registry.register(
        OwnerDef::new("stub.Counting")
            .method("passthrough", &[ValueKind::Int], Callable::Static(passthrough))
            .method("identity", &[ValueKind::Int], Callable::Static(counted_identity))
            .method("never", &[ValueKind::Int], Callable::Static(must_not_run)),
    );
    registry
}

#[test]
fn all_matching_cases_pass_without_halting_early() {
    let registry = stub_registry();
    let suite = TestSuite::from_parallel([1, 2, 3, 4, 5], [1, 2, 3, 4, 5]).unwrap();
    let outcome = Invoker::new(&registry).run("stub.Counting", "passthrough", &suite);
    assert!(matches!(outcome, Outcome::AllPassed { cases: 5 }));
    assert_eq!(PASSTHROUGH_CALLS.load(Ordering::SeqCst), 5);
}

#[test]
fn first_mismatch_stops_later_cases() {
    let registry = stub_registry();
    // Case 3 is the first mismatch; cases 4 and 5 must never be invoked.
    let suite = TestSuite::from_parallel([1, 2, 3, 4, 5], [1, 2, 99, 4, 100]).unwrap();
    let outcome = Invoker::new(&registry).run("stub.Counting", "identity", &suite);
    let failure = outcome.failure().expect("expected a mismatch");
    assert_eq!(failure.index, 2);
    assert_eq!(failure.actual, Value::Int(3));
    assert_eq!(HALT_CALLS.load(Ordering::SeqCst), 3);
}

#[test]
fn length_mismatch_is_rejected_when_building_the_suite() {
    // The lengths are checked by `from_parallel`, so no suite exists to hand to the invoker.
    let err = TestSuite::from_parallel([1, 2, 3], [1, 2]).unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Configuration);
    assert!(err.to_string().contains("3 inputs, 2 expected"));
}

#[test]
fn length_mismatched_file_never_reaches_the_target() {
    let config = RunConfig {
        use_colors: false,
        json: true,
        exit_on_failure: false,
    };
    let code = handle_run(
        &stub_registry(),
        Path::new("tests/suites/length_mismatch.yaml"),
        Some("stub.Counting".into()),
        Some("never".into()),
        &config,
    );
    assert_eq!(code, 2);
    assert_eq!(NEVER_CALLS.load(Ordering::SeqCst), 0);
}

#[test]
fn mixed_arity_is_rejected_when_building_the_suite() {
    let err = TestSuite::new(vec![
        TestCase::with_args(vec![Value::Int(1), Value::Int(2)], 3),
        TestCase::new(4, 4),
    ])
    .unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Configuration);
    assert!(err.to_string().contains("case 2 has 1 argument(s) but case 1 has 2"));
}

#[test]
fn square_scenario_passes_then_fails_on_mutated_expectation() {
    let registry = build_default_registry();
    let invoker = Invoker::new(&registry);

    let suite = TestSuite::from_parallel([1, 2, 3, 4], [1, 4, 9, 16]).unwrap();
    assert!(invoker.run("demo.Arith", "square", &suite).is_success());

    let suite = TestSuite::from_parallel([1, 2, 3, 4], [1, 4, 9, 17]).unwrap();
    let outcome = invoker.run("demo.Arith", "square", &suite);
    let failure = outcome.failure().unwrap();
    assert_eq!(failure.input.to_string(), "4");
    assert_eq!(failure.expected.to_string(), "17");
    assert_eq!(failure.actual, Value::Int(16));
}

#[test]
fn element_wise_mismatch_reports_index() {
    let mut callable = FnInvocable::new("fixed", |_: &[Value]| Ok(Value::from(vec![1, 2, 4])));
    let suite = TestSuite::from_pairs([(0, vec![1, 2, 3])]).unwrap();
    let outcome = run_with(&mut callable, &suite);
    assert_eq!(
        outcome.failure().unwrap().mismatch,
        Mismatch::Element {
            index: 2,
            expected: Value::Int(3),
            actual: Value::Int(4),
        }
    );
}

#[test]
fn scalar_float_equality_is_exact() {
    let mut callable = FnInvocable::new("near", |_: &[Value]| Ok(Value::Float(1.0000001)));
    let suite = TestSuite::from_pairs([(0, 1.0)]).unwrap();
    let outcome = run_with(&mut callable, &suite);
    assert_eq!(outcome.failure().unwrap().mismatch, Mismatch::Value);
}

#[test]
fn multi_parameter_add_passes() {
    let registry = build_default_registry();
    let suite = TestSuite::from_args(
        [vec![Value::Int(1), Value::Int(2)], vec![Value::Int(3), Value::Int(4)]],
        [3, 7],
    )
    .unwrap();
    assert!(Invoker::new(&registry).run("demo.Arith", "add", &suite).is_success());
}

#[test]
fn later_case_with_incompatible_kinds_is_a_resolution_error() {
    let registry = build_default_registry();
    let suite = TestSuite::from_args(
        [vec![Value::Int(1), Value::Int(2)], vec![Value::Int(3), Value::from("x")]],
        [3, 7],
    )
    .unwrap();
    let outcome = Invoker::new(&registry).run("demo.Arith", "add", &suite);
    let err = outcome.error().expect("kind mismatch must not pass silently");
    assert_eq!(err.error_type(), ErrorType::Resolution);
    assert!(err.to_string().contains("case 2 passes (Int, String)"));
}

#[test]
fn callee_error_is_distinct_from_mismatch() {
    let registry = build_default_registry();
    let suite = TestSuite::from_args(
        [vec![Value::Int(6), Value::Int(3)], vec![Value::Int(1), Value::Int(0)]],
        [2, 0],
    )
    .unwrap();
    let outcome = Invoker::new(&registry).run("demo.Arith", "divide", &suite);
    assert!(outcome.failure().is_none());
    let err = outcome.error().unwrap();
    assert_eq!(err.error_type(), ErrorType::Invocation);
    assert!(err.to_string().contains("division by zero"));
    assert_eq!(outcome.exit_code(), 2);
}

#[test]
fn unknown_method_runs_no_cases() {
    let registry = stub_registry();
    let suite = TestSuite::from_parallel([1], [1]).unwrap();
    let outcome = Invoker::new(&registry).run("stub.Counting", "missing", &suite);
    assert_eq!(outcome.error().unwrap().error_type(), ErrorType::Resolution);
}

#[test]
fn instance_owner_gets_fresh_state_per_run() {
    let registry = build_default_registry();
    let invoker = Invoker::new(&registry);
    let suite = TestSuite::from_parallel([1, 2, 3], [1, 3, 6]).unwrap();
    assert!(invoker.run("demo.Accumulator", "push", &suite).is_success());
    // A second run must start from zero again.
    assert!(invoker.run("demo.Accumulator", "push", &suite).is_success());
}

#[test]
fn list_input_is_passed_as_one_argument() {
    let registry = build_default_registry();
    let suite = TestSuite::new(vec![
        TestCase::new(vec![3, 1, 2], vec![1, 2, 3]),
        TestCase::new(vec!["b", "c", "a"], vec!["a", "b", "c"]),
    ])
    .unwrap();
    assert!(Invoker::new(&registry).run("demo.Arrays", "sorted", &suite).is_success());
}

#[test]
fn sequence_expected_against_scalar_output_is_clean_mismatch() {
    let registry = build_default_registry();
    let suite = TestSuite::from_pairs([(2, vec![4])]).unwrap();
    let outcome = Invoker::new(&registry).run("demo.Arith", "square", &suite);
    assert!(matches!(
        outcome.failure().unwrap().mismatch,
        Mismatch::NotASequence { .. }
    ));
}
