// CLI contract: one stdout notice per run and the matching exit status.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn casecheck() -> Command {
    let mut cmd = Command::cargo_bin("casecheck").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn passing_suite_prints_congrats_and_exits_zero() {
    casecheck()
        .args(["run", "--no-color", "tests/suites/square_pass.yaml"])
        .assert()
        .success()
        .stdout("Congrats! All tests passed.\n");
}

#[test]
fn failing_suite_reports_input_expected_and_output() {
    casecheck()
        .args(["run", "--no-color", "tests/suites/square_fail.yaml"])
        .assert()
        .code(1)
        .stdout(contains("input 4").and(contains("expected 17")).and(contains("output 16")));
}

#[test]
fn length_mismatch_is_a_configuration_error() {
    casecheck()
        .args(["run", "--no-color", "tests/suites/length_mismatch.yaml"])
        .assert()
        .code(2)
        .stdout(contains("error[configuration]").and(contains("lengths do not match")))
        .stderr(contains("casecheck::configuration"));
}

#[test]
fn multi_parameter_suite_passes() {
    casecheck()
        .args(["run", "--no-color", "tests/suites/add_args.yaml"])
        .assert()
        .success();
}

#[test]
fn mixed_argument_kinds_are_a_resolution_error() {
    casecheck()
        .args(["run", "--no-color", "tests/suites/add_mixed_kinds.yaml"])
        .assert()
        .code(2)
        .stdout(contains("error[resolution]"));
}

#[test]
fn callee_failure_is_reported_as_invocation_error() {
    casecheck()
        .args(["run", "--no-color", "tests/suites/divide_by_zero.yaml"])
        .assert()
        .code(2)
        .stdout(contains("error[invocation]").and(contains("division by zero")));
}

#[test]
fn pairs_and_table_shapes_run() {
    for file in ["tests/suites/reverse_pairs.yaml", "tests/suites/upper_table.yaml"] {
        casecheck()
            .args(["run", "--no-color", file])
            .assert()
            .success()
            .stdout("Congrats! All tests passed.\n");
    }
}

#[test]
fn unknown_owner_lists_registered_owners() {
    casecheck()
        .args(["run", "--no-color", "tests/suites/unknown_owner.yaml"])
        .assert()
        .code(2)
        .stdout(contains("demo.Nope::square"))
        .stderr(contains("demo.Arith"));
}

#[test]
fn owner_and_method_flags_override_file() {
    casecheck()
        .args([
            "run",
            "--no-color",
            "--owner",
            "demo.Accumulator",
            "--method",
            "push",
            "tests/suites/square_pass.yaml",
        ])
        .assert()
        .code(1)
        .stdout(contains("test failed for case 2"));
}

#[test]
fn json_output_is_structured() {
    casecheck()
        .args(["run", "--json", "tests/suites/square_fail.yaml"])
        .assert()
        .code(1)
        .stdout(contains(r#""status":"failed""#).and(contains(r#""case":4"#)));
}

#[test]
fn missing_file_is_an_io_error() {
    casecheck()
        .args(["run", "--no-color", "tests/suites/does_not_exist.yaml"])
        .assert()
        .code(2)
        .stdout(contains("error[io]"));
}

#[test]
fn list_shows_overloads() {
    casecheck()
        .arg("list")
        .assert()
        .success()
        .stdout(
            contains("demo.Arith::add(Int, Int) [static]")
                .and(contains("demo.Accumulator::push(Int) [instance]")),
        );
}

#[test]
fn integer_beyond_i64_fails_to_load() {
    casecheck()
        .args(["run", "--no-color", "tests/suites/oversized_int.yaml"])
        .assert()
        .code(2)
        .stdout(contains("error[io]").and(contains("oversized_int.yaml")))
        .stderr(contains("out of range for Int"));
}
