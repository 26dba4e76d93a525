// The table_runner binary: `assert_table` prints one notice and sets the exit status.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn table_runner() -> Command {
    let mut cmd = Command::cargo_bin("table_runner").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn passing_table_prints_congrats_and_exits_zero() {
    table_runner()
        .args(["demo.Arith", "square", "[1, 2, 3, 4]", "[1, 4, 9, 16]"])
        .assert()
        .success()
        .stdout("Congrats! All tests passed.\n");
}

#[test]
fn failing_table_prints_first_mismatch_and_exits_one() {
    table_runner()
        .args(["demo.Arith", "square", "[1, 2, 3, 4]", "[1, 4, 10, 17]"])
        .assert()
        .code(1)
        .stdout("test failed for case 3: input 3, expected 10, output 9\n");
}

#[test]
fn unequal_lists_exit_two_without_running() {
    table_runner()
        .args(["demo.Arith", "square", "[1, 2]", "[1]"])
        .assert()
        .code(2)
        .stdout(contains("error[configuration]").and(contains("lengths do not match")));
}
