// Runs one inline case table through `assert_table`.
// Usage: cargo run --bin table_runner -- demo.Arith square "[1, 2, 3]" "[1, 4, 9]"

use clap::Parser;

use casecheck::builtins::build_default_registry;
use casecheck::config::RunConfig;
use casecheck::value::Value;
use casecheck::{assert_table, err_msg, report, HarnessError, Outcome, TestSuite};

#[derive(Debug, Parser)]
#[command(
    name = "table_runner",
    about = "Run an inline case table and exit non-zero on the first failure."
)]
struct TableArgs {
    /// Owner to resolve, e.g. `demo.Arith`.
    owner: String,
    /// Method to resolve on the owner.
    method: String,
    /// YAML flow list of inputs, e.g. "[1, 2, 3]".
    inputs: String,
    /// YAML flow list of expected outputs, one per input.
    expected: String,
}

fn parse_list(name: &str, text: &str) -> Result<Vec<Value>, HarnessError> {
    serde_yaml::from_str(text).map_err(|e| err_msg!(Configuration, "cannot read {} list: {}", name, e))
}

fn main() {
    let args = TableArgs::parse();
    let registry = build_default_registry();

    let suite = parse_list("inputs", &args.inputs).and_then(|inputs| {
        let expected = parse_list("expected", &args.expected)?;
        TestSuite::from_parallel(inputs, expected)
    });
    match suite {
        Ok(suite) => {
            assert_table(&registry, &args.owner, &args.method, &suite);
        }
        Err(err) => {
            let outcome = Outcome::Errored(err);
            report::print_outcome(&outcome, &RunConfig::default());
            std::process::exit(outcome.exit_code());
        }
    }
}
