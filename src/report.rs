//! Handles all user-facing rendering of an [`Outcome`].
//!
//! Exactly one notice goes to stdout per run. Supporting detail (error
//! diagnostics, string diffs) goes to stderr so stdout stays a single line.

use std::io::Write;

use difference::{Changeset, Difference};
use miette::{GraphicalReportHandler, GraphicalTheme};
use serde_json::json;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::config::RunConfig;
use crate::diagnostics::HarnessError;
use crate::invoker::{Failure, Outcome};
use crate::suite::Expected;
use crate::value::Value;

pub const SUCCESS: &str = "Congrats! All tests passed.";

// ============================================================================
// TEXT RENDERING
// ============================================================================

/// The single stdout line for an outcome, without color.
pub fn render_text(outcome: &Outcome) -> String {
    match outcome {
        Outcome::AllPassed { .. } => SUCCESS.to_string(),
        Outcome::FailedAt(failure) => render_failure(failure),
        Outcome::Errored(err) => format!("error[{}]: {}", err.error_type(), err),
    }
}

fn render_failure(failure: &Failure) -> String {
    let mut line = format!(
        "test failed for case {}: input {}, expected {}, output {}",
        failure.index + 1,
        failure.input,
        failure.expected,
        failure.actual
    );
    if !matches!(failure.mismatch, crate::compare::Mismatch::Value) {
        line.push_str(&format!(" ({})", failure.mismatch));
    }
    line
}

/// Renders an error as a `miette` diagnostic.
pub fn render_diagnostic(err: &HarnessError, use_colors: bool) -> String {
    let theme = if use_colors {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let mut out = String::new();
    if GraphicalReportHandler::new_themed(theme)
        .render_report(&mut out, err)
        .is_err()
    {
        out = err.to_string();
    }
    out
}

// ============================================================================
// JSON RENDERING
// ============================================================================

/// A structured form of the outcome for programmatic consumers.
pub fn render_json(outcome: &Outcome) -> serde_json::Value {
    match outcome {
        Outcome::AllPassed { cases } => json!({
            "status": "passed",
            "cases": cases,
        }),
        Outcome::FailedAt(failure) => json!({
            "status": "failed",
            "case": failure.index + 1,
            "failure": failure,
        }),
        Outcome::Errored(err) => json!({
            "status": "errored",
            "kind": err.error_type().as_str(),
            "message": err.to_string(),
        }),
    }
}

// ============================================================================
// PRINTING
// ============================================================================

/// Prints the outcome: one notice on stdout, diagnostics and diffs on stderr.
pub fn print_outcome(outcome: &Outcome, config: &RunConfig) {
    if config.json {
        println!("{}", render_json(outcome));
        return;
    }

    let choice = if config.use_colors {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    let color = match outcome {
        Outcome::AllPassed { .. } => Color::Green,
        Outcome::FailedAt(_) => Color::Red,
        Outcome::Errored(_) => Color::Yellow,
    };
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = writeln!(stdout, "{}", render_text(outcome));
    let _ = stdout.reset();

    match outcome {
        Outcome::FailedAt(failure) => {
            if let (Expected::Scalar(Value::String(expected)), Value::String(actual)) =
                (&failure.expected, &failure.actual)
            {
                print_string_diff(expected, actual, choice);
            }
        }
        Outcome::Errored(err) => eprintln!("{}", render_diagnostic(err, config.use_colors)),
        Outcome::AllPassed { .. } => {}
    }
}

fn print_string_diff(expected: &str, actual: &str, choice: ColorChoice) {
    let mut stderr = StandardStream::stderr(choice);
    let changeset = Changeset::new(expected, actual, "");
    let _ = write!(stderr, "diff: ");
    for diff in &changeset.diffs {
        match diff {
            Difference::Same(x) => {
                let _ = stderr.reset();
                let _ = write!(stderr, "{}", x);
            }
            Difference::Add(x) => {
                let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
                let _ = write!(stderr, "[+{}]", x);
            }
            Difference::Rem(x) => {
                let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                let _ = write!(stderr, "[-{}]", x);
            }
        }
    }
    let _ = stderr.reset();
    let _ = writeln!(stderr);
}
