//! The comparison rule applied to every case.
//!
//! A scalar expectation uses value equality. A sequence expectation is checked
//! element by element so a report can name the first differing index; an actual
//! value that is not a list, or a list of a different length, is a clean
//! mismatch rather than an out-of-bounds crash.

use std::fmt;

use serde::Serialize;

use crate::suite::Expected;
use crate::value::Value;

/// Why an actual value failed to match its expectation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Mismatch {
    /// Scalar expectation, unequal actual value.
    Value,
    /// Sequence expectation, actual value is not a list.
    NotASequence { actual_kind: String },
    /// Sequence expectation, elements differ at `index`.
    Element {
        index: usize,
        expected: Value,
        actual: Value,
    },
    /// Sequence expectation, every shared element matches but lengths differ.
    Length { expected: usize, actual: usize },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Value => write!(f, "values differ"),
            Mismatch::NotASequence { actual_kind } => {
                write!(f, "expected a sequence, output is {}", actual_kind)
            }
            Mismatch::Element {
                index,
                expected,
                actual,
            } => write!(
                f,
                "first difference at index {}: expected {}, output {}",
                index, expected, actual
            ),
            Mismatch::Length { expected, actual } => write!(
                f,
                "expected {} element(s), output has {}",
                expected, actual
            ),
        }
    }
}

/// Compares `actual` against `expected`, returning the first mismatch found.
pub fn compare(expected: &Expected, actual: &Value) -> Result<(), Mismatch> {
    match expected {
        Expected::Scalar(value) if value == actual => Ok(()),
        Expected::Scalar(_) => Err(Mismatch::Value),
        Expected::Sequence(items) => compare_sequence(items, actual),
    }
}

fn compare_sequence(expected: &[Value], actual: &Value) -> Result<(), Mismatch> {
    let Value::List(actual_items) = actual else {
        return Err(Mismatch::NotASequence {
            actual_kind: actual.type_name().to_string(),
        });
    };
    if let Some((index, (e, a))) = expected
        .iter()
        .zip(actual_items)
        .enumerate()
        .find(|(_, (e, a))| e != a)
    {
        return Err(Mismatch::Element {
            index,
            expected: e.clone(),
            actual: a.clone(),
        });
    }
    if expected.len() != actual_items.len() {
        return Err(Mismatch::Length {
            expected: expected.len(),
            actual: actual_items.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_mismatch_names_index() {
        let result = compare(&Expected::of(vec![1, 2, 3]), &Value::from(vec![1, 2, 4]));
        assert_eq!(
            result,
            Err(Mismatch::Element {
                index: 2,
                expected: Value::Int(3),
                actual: Value::Int(4),
            })
        );
    }

    #[test]
    fn floats_compare_exactly() {
        assert_eq!(
            compare(&Expected::of(1.0), &Value::Float(1.0000001)),
            Err(Mismatch::Value)
        );
        assert_eq!(compare(&Expected::of(1.0), &Value::Float(1.0)), Ok(()));
    }

    #[test]
    fn int_and_float_are_distinct() {
        assert_eq!(compare(&Expected::of(1), &Value::Float(1.0)), Err(Mismatch::Value));
    }

    #[test]
    fn sequence_against_scalar_is_a_mismatch() {
        assert_eq!(
            compare(&Expected::of(vec![1]), &Value::Int(1)),
            Err(Mismatch::NotASequence {
                actual_kind: "Int".into()
            })
        );
    }

    #[test]
    fn shorter_and_longer_outputs_are_mismatches() {
        let expected = Expected::of(vec![1, 2, 3]);
        assert_eq!(
            compare(&expected, &Value::from(vec![1, 2])),
            Err(Mismatch::Length {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            compare(&expected, &Value::from(vec![1, 2, 3, 4])),
            Err(Mismatch::Length {
                expected: 3,
                actual: 4
            })
        );
    }

    #[test]
    fn nested_lists_compare_structurally() {
        let expected = Expected::of(vec![vec![1, 2], vec![3]]);
        assert_eq!(compare(&expected, &Value::from(vec![vec![1, 2], vec![3]])), Ok(()));
    }
}
