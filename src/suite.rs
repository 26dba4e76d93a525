//! Case tables: the input and expected-value model and the constructors that
//! normalize every accepted shape into one ordered [`TestSuite`].
//!
//! All constructors validate before anything is invoked. A suite that exists is
//! non-empty and arity-consistent.

use std::fmt;

use serde::Serialize;

use crate::diagnostics::HarnessError;
use crate::err_msg;
use crate::value::{Value, ValueKind};

/// The argument list of one case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Input {
    /// A single argument. A `Value::List` here is one list-typed argument, not a spread.
    Single(Value),
    /// Positional arguments spread into the method's parameter list.
    Args(Vec<Value>),
}

impl Input {
    pub fn arity(&self) -> usize {
        match self {
            Input::Single(_) => 1,
            Input::Args(args) => args.len(),
        }
    }

    pub fn args(&self) -> &[Value] {
        match self {
            Input::Single(value) => std::slice::from_ref(value),
            Input::Args(args) => args,
        }
    }

    pub fn kinds(&self) -> Vec<ValueKind> {
        self.args().iter().map(Value::kind).collect()
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Single(value) => write!(f, "{}", value),
            Input::Args(args) => {
                write!(f, "(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match arg {
                        Value::String(s) => write!(f, "{:?}", s)?,
                        other => write!(f, "{}", other)?,
                    }
                }
                write!(f, ")")
            }
        }
    }
}

/// The value a case must produce.
///
/// The tag decides the comparison: sequences compare element by element,
/// scalars by value equality.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", content = "value", rename_all = "lowercase")]
pub enum Expected {
    Scalar(Value),
    Sequence(Vec<Value>),
}

impl Expected {
    /// Tags a value: lists become [`Expected::Sequence`], anything else [`Expected::Scalar`].
    pub fn of(value: impl Into<Value>) -> Self {
        match value.into() {
            Value::List(items) => Expected::Sequence(items),
            scalar => Expected::Scalar(scalar),
        }
    }

    pub fn as_value(&self) -> Value {
        match self {
            Expected::Scalar(value) => value.clone(),
            Expected::Sequence(items) => Value::List(items.clone()),
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Scalar(value) => write!(f, "{}", value),
            Expected::Sequence(items) => write!(f, "{}", Value::List(items.clone())),
        }
    }
}

/// One (input, expected) row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCase {
    pub input: Input,
    pub expected: Expected,
}

impl TestCase {
    /// A single-argument case.
    pub fn new(input: impl Into<Value>, expected: impl Into<Value>) -> Self {
        Self {
            input: Input::Single(input.into()),
            expected: Expected::of(expected),
        }
    }

    /// A multi-parameter case.
    pub fn with_args(args: Vec<Value>, expected: impl Into<Value>) -> Self {
        Self {
            input: Input::Args(args),
            expected: Expected::of(expected),
        }
    }
}

/// An ordered, non-empty, arity-consistent collection of cases sharing one target.
#[derive(Debug, Clone, PartialEq)]
pub struct TestSuite {
    cases: Vec<TestCase>,
}

impl TestSuite {
    /// Explicit pairs form. Every other constructor delegates here.
    pub fn new(cases: Vec<TestCase>) -> Result<Self, HarnessError> {
        let Some(first) = cases.first() else {
            return Err(err_msg!(Configuration, "suite has no cases")
                .with_help("supply at least one (input, expected) pair"));
        };
        let arity = first.input.arity();
        if let Some((index, case)) = cases
            .iter()
            .enumerate()
            .find(|(_, case)| case.input.arity() != arity)
        {
            return Err(err_msg!(
                Configuration,
                "case {} has {} argument(s) but case 1 has {}",
                index + 1,
                case.input.arity(),
                arity
            )
            .with_help("every case in a suite must supply the same number of arguments"));
        }
        Ok(Self { cases })
    }

    pub fn from_pairs<I, E>(pairs: impl IntoIterator<Item = (I, E)>) -> Result<Self, HarnessError>
    where
        I: Into<Value>,
        E: Into<Value>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(input, expected)| TestCase::new(input, expected))
                .collect(),
        )
    }

    /// Parallel collections form; the lengths must match.
    pub fn from_parallel<I, E>(
        inputs: impl IntoIterator<Item = I>,
        expected: impl IntoIterator<Item = E>,
    ) -> Result<Self, HarnessError>
    where
        I: Into<Value>,
        E: Into<Value>,
    {
        let inputs: Vec<Input> = inputs.into_iter().map(|i| Input::Single(i.into())).collect();
        let expected: Vec<Expected> = expected.into_iter().map(Expected::of).collect();
        check_lengths(inputs.len(), expected.len())?;
        Self::new(
            inputs
                .into_iter()
                .zip(expected)
                .map(|(input, expected)| TestCase { input, expected })
                .collect(),
        )
    }

    /// Mapping form: keys are single-argument inputs, values are expected results.
    ///
    /// Keys must be key-like scalars (see [`Value::is_key_like`]); list-shaped inputs
    /// need [`TestSuite::from_pairs`] or [`TestSuite::from_args`] instead. Iteration
    /// order of `map` becomes case order, so pass an ordered map when order matters.
    pub fn from_map<K, V>(map: impl IntoIterator<Item = (K, V)>) -> Result<Self, HarnessError>
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        let mut cases = Vec::new();
        for (key, expected) in map {
            let key = key.into();
            if !key.is_key_like() {
                return Err(err_msg!(
                    Configuration,
                    "mapping key {} of kind {} cannot be used as a case input",
                    key,
                    key.kind()
                )
                .with_help("use the explicit pairs form for list or float inputs"));
            }
            cases.push(TestCase {
                input: Input::Single(key),
                expected: Expected::of(expected),
            });
        }
        Self::new(cases)
    }

    /// Multi-parameter form: each row is spread into the method's parameters.
    pub fn from_args<E>(
        rows: impl IntoIterator<Item = Vec<Value>>,
        expected: impl IntoIterator<Item = E>,
    ) -> Result<Self, HarnessError>
    where
        E: Into<Value>,
    {
        let rows: Vec<Vec<Value>> = rows.into_iter().collect();
        let expected: Vec<Expected> = expected.into_iter().map(Expected::of).collect();
        check_lengths(rows.len(), expected.len())?;
        Self::new(
            rows.into_iter()
                .zip(expected)
                .map(|(args, expected)| TestCase {
                    input: Input::Args(args),
                    expected,
                })
                .collect(),
        )
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn arity(&self) -> usize {
        self.cases[0].input.arity()
    }

    /// Parameter kinds derived from the first case, used for overload resolution.
    pub fn derived_kinds(&self) -> Vec<ValueKind> {
        self.cases[0].input.kinds()
    }
}

fn check_lengths(inputs: usize, expected: usize) -> Result<(), HarnessError> {
    if inputs != expected {
        return Err(err_msg!(
            Configuration,
            "inputs and expected lengths do not match: {} inputs, {} expected",
            inputs,
            expected
        ));
    }
    Ok(())
}
