//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::ir::Lvalue;
use crate::vm::Value;
use thiserror::Error;

/// Everything that can go wrong while interpreting MIR.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    /// An `if` condition evaluated to something other than a `Bool`
    #[error("non-boolean `if` condition value: {0}")]
    NonBooleanCondition(Value),
    /// A `switchInt` discriminant matched none of the values, and there was
    /// no `otherwise` target
    #[error("discriminant {0} matched no values")]
    NoMatchingSwitchValue(Value),
    /// The callee of a `call` wasn't a function value
    #[error("tried to call a non-function value: {0}")]
    NonFunctionCall(Value),
    /// A `diverge` terminator was executed
    #[error("reached a `diverge` terminator")]
    Diverged,
    /// A `panic` terminator was executed
    #[error("reached a `panic` terminator")]
    Panicked,
    /// A local was evaluated with no active stack frame
    #[error("tried to access a local without an active stack frame")]
    NoFrame,
    /// A local was used that the current function doesn't declare
    #[error("use of undeclared local `{0:?}`")]
    UndeclaredLocal(Lvalue),
    /// Checked integer arithmetic overflowed, or a shift amount was out of range
    #[error("arithmetic overflow in `{0}`")]
    Overflow(&'static str),
    /// `Div` or `Rem` with a zero divisor
    #[error("attempted to divide by zero")]
    DivisionByZero,
    /// A binary operator was applied to values it doesn't support
    #[error("invalid operands for `{op}`: {lhs} and {rhs}")]
    InvalidBinaryOperands {
        /// The operator's name
        op: &'static str,
        /// The left operand
        lhs: Value,
        /// The right operand
        rhs: Value,
    },
    /// A unary operator was applied to a value it doesn't support
    #[error("invalid operand for `{op}`: {value}")]
    InvalidUnaryOperand {
        /// The operator's name
        op: &'static str,
        /// The operand
        value: Value,
    },
    /// A constant of a kind the interpreter can't represent yet
    #[error("unsupported {0} constant")]
    Unsupported(&'static str),
    /// The call stack grew past the configured maximum depth
    #[error("stack overflow, call depth exceeded the limit of {0}")]
    StackOverflow(usize),
    /// More statements and terminators were executed than the configured limit
    #[error("step limit of {0} exceeded")]
    StepLimitExceeded(u64),
    /// A function was called with the wrong number of arguments
    #[error("`{name}` takes {expected} argument(s) but {actual} were given")]
    ArgumentCount {
        /// The function being called
        name: String,
        /// The number of parameters it has
        expected: usize,
        /// The number of arguments that were passed
        actual: usize,
    },
    /// A function was referenced that isn't in the module
    #[error("call to nonexistent function `{0}`")]
    UnknownFunction(String),
    /// A jump to a block that isn't in the function
    #[error("jump to nonexistent block `{0}`")]
    UnknownBlock(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            EvalError::NonBooleanCondition(Value::Int(1)).to_string(),
            "non-boolean `if` condition value: Int(1)"
        );
        assert_eq!(
            EvalError::InvalidBinaryOperands {
                op: "Add",
                lhs: Value::Bool(true),
                rhs: Value::Int(1)
            }
            .to_string(),
            "invalid operands for `Add`: Bool(true) and Int(1)"
        );
        assert_eq!(
            EvalError::ArgumentCount {
                name: "f".to_owned(),
                expected: 1,
                actual: 0
            }
            .to_string(),
            "`f` takes 1 argument(s) but 0 were given"
        );
        assert_eq!(
            EvalError::UndeclaredLocal(Lvalue::Var(2)).to_string(),
            "use of undeclared local `Var(2)`"
        );
    }
}
