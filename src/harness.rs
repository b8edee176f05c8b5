//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

//! Runs every `#[miri_run]` function in a module and checks the values they
//! produce against their `expected` attribute argument.

use crate::ir::{Module, EXPECTED, MIRI_RUN};
use crate::vm::{EvalError, Interpreter, InterpreterConfig};
use std::fmt;
use tracing::{info, warn};

/// What happened when a single start point was interpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The function returned exactly the expected value
    Passed,
    /// The function returned something other than the expected value
    Mismatch {
        /// The rendering of the value that was returned
        actual: String,
        /// The `expected` argument of the attribute
        expected: String,
    },
    /// The attribute had no `expected` argument, so there was nothing to check
    NoExpectation {
        /// The rendering of the value that was returned
        actual: String,
    },
    /// Interpretation failed before the function returned
    Errored(EvalError),
}

impl Outcome {
    /// Whether the outcome counts against the run, i.e. it's a
    /// [`Outcome::Mismatch`] or an [`Outcome::Errored`].
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Mismatch { .. } | Outcome::Errored(_))
    }
}

/// The outcome of one start point, along with the name of its function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartPointResult {
    /// The name of the function that was run
    pub name: String,
    /// What happened
    pub outcome: Outcome,
}

/// Every start point in a module that was interpreted, in declaration order.
///
/// The [`Display`](fmt::Display) impl renders the report in the same format
/// that `miri` prints it in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StartPointReport {
    results: Vec<StartPointResult>,
}

impl StartPointReport {
    /// Every result, in the order the start points were run.
    pub fn results(&self) -> &[StartPointResult] {
        &self.results
    }

    /// The number of start points that were run.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the module had any start points at all.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The number of start points that failed.
    pub fn failures(&self) -> usize {
        self.results
            .iter()
            .filter(|result| result.outcome.is_failure())
            .count()
    }

    /// Whether every start point either passed or had nothing to check.
    pub fn success(&self) -> bool {
        self.failures() == 0
    }
}

impl fmt::Display for StartPointReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in self.results.iter() {
            writeln!(f, "Interpreting: {}", result.name)?;

            match &result.outcome {
                Outcome::Passed => writeln!(f, "Test passed!")?,
                Outcome::Mismatch { actual, expected } => {
                    writeln!(f, "Actual value:\t{actual}\nExpected value:\t{expected}")?
                }
                Outcome::NoExpectation { actual } => writeln!(f, "=> {actual}")?,
                Outcome::Errored(err) => writeln!(f, "error: {err}")?,
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

/// Interprets every function marked with `#[miri_run]` in `module`, in
/// declaration order. Each start point gets a fresh interpreter and is
/// called with no arguments.
pub fn interpret_start_points(module: &Module, config: InterpreterConfig) -> StartPointReport {
    let mut report = StartPointReport::default();

    for (func, f) in module.iter() {
        for attr in f.attrs().iter().filter(|attr| attr.check_name(MIRI_RUN)) {
            info!(name = f.name(), "interpreting start point");

            let mut interpreter = Interpreter::new(module, config);

            let outcome = match interpreter.call(func, &[]) {
                Ok(value) => {
                    let actual = value.to_string();

                    match attr.value_str(EXPECTED) {
                        Some(expected) if expected == actual => Outcome::Passed,
                        Some(expected) => Outcome::Mismatch {
                            actual,
                            expected: expected.to_owned(),
                        },
                        None => Outcome::NoExpectation { actual },
                    }
                }
                Err(err) => {
                    warn!(name = f.name(), error = %err, "start point failed");

                    Outcome::Errored(err)
                }
            };

            report.results.push(StartPointResult {
                name: f.name().to_owned(),
                outcome,
            });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_mir;

    const START_POINTS: &str = r#"
        #[miri_run(expected = "Int(3)")]
        fn passes() {
            bb0: { return = Add(const 1, const 2); return; }
        }

        fn helper(arg0) {
            bb0: { return = arg0; return; }
        }

        #[miri_run(expected = "Int(4)")]
        fn mismatches() {
            bb0: { return = call helper(const 5) -> bb1; }
            bb1: { return; }
        }

        #[miri_run]
        fn unchecked() {
            bb0: { return = Lt(const 1, const 2); return; }
        }

        #[miri_run(expected = "Int(0)")]
        fn errors() {
            bb0: { return = Div(const 1, const 0); return; }
        }

        #[miri_run]
        fn takes_args(arg0) {
            bb0: { return; }
        }
    "#;

    fn report() -> StartPointReport {
        let module = parse_mir("test", START_POINTS).unwrap();

        interpret_start_points(&module, InterpreterConfig::default())
    }

    #[test]
    fn outcomes_in_declaration_order() {
        let report = report();
        let names: Vec<&str> = report.results().iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["passes", "mismatches", "unchecked", "errors", "takes_args"]);
        assert_eq!(report.results()[0].outcome, Outcome::Passed);
        assert_eq!(
            report.results()[1].outcome,
            Outcome::Mismatch {
                actual: "Int(5)".to_owned(),
                expected: "Int(4)".to_owned()
            }
        );
        assert_eq!(
            report.results()[2].outcome,
            Outcome::NoExpectation {
                actual: "Bool(true)".to_owned()
            }
        );
        assert_eq!(
            report.results()[3].outcome,
            Outcome::Errored(EvalError::DivisionByZero)
        );
        assert!(matches!(
            report.results()[4].outcome,
            Outcome::Errored(EvalError::ArgumentCount { expected: 1, actual: 0, .. })
        ));
        assert_eq!(report.failures(), 3);
        assert!(!report.success());
    }

    #[test]
    fn rendering() {
        let expected = "Interpreting: passes\n\
                        Test passed!\n\
                        \n\
                        Interpreting: mismatches\n\
                        Actual value:\tInt(5)\n\
                        Expected value:\tInt(4)\n\
                        \n\
                        Interpreting: unchecked\n\
                        => Bool(true)\n\
                        \n\
                        Interpreting: errors\n\
                        error: attempted to divide by zero\n\
                        \n\
                        Interpreting: takes_args\n\
                        error: `takes_args` takes 1 argument(s) but 0 were given\n\
                        \n";

        assert_eq!(report().to_string(), expected);
    }

    #[test]
    fn no_start_points() {
        let module = parse_mir("test", "fn f() { bb0: { return; } }").unwrap();
        let report = interpret_start_points(&module, InterpreterConfig::default());

        assert!(report.is_empty());
        assert!(report.success());
        assert_eq!(report.to_string(), "");
    }
}
