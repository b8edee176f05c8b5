//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::arena::ArenaKey;
use crate::ir::Func;
use static_assertions::assert_eq_size;
use std::fmt;

#[cfg(feature = "enable-serde")]
use serde::{Deserialize, Serialize};

/// A value that lives in a slot of the interpreter's value stack.
///
/// The [`Display`](fmt::Display) rendering of a value (e.g. `Int(3)`) is what
/// `#[miri_run(expected = "...")]` attributes are compared against.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// A slot that has never been written to
    #[default]
    Uninit,
    /// A `bool`
    Bool(bool),
    /// An integer, every integer is currently 64 bits wide
    Int(i64),
    /// A reference to a function in the module being interpreted
    Func(Func),
}

assert_eq_size!(Value, [u64; 2]);

impl Value {
    /// A short name for the kind of value, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Uninit => "uninit",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Func(_) => "function",
        }
    }

    /// Gets the `bool` inside of the value, if it's a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Gets the integer inside of the value, if it's an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Uninit => write!(f, "Uninit"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(i) => write!(f, "Int({i})"),
            Value::Func(func) => write!(f, "Func({})", func.index()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendering() {
        assert_eq!(Value::Uninit.to_string(), "Uninit");
        assert_eq!(Value::Bool(true).to_string(), "Bool(true)");
        assert_eq!(Value::Int(-3).to_string(), "Int(-3)");
        assert_eq!(Value::Func(Func::new(2)).to_string(), "Func(2)");
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::Int(5).as_int(), Some(5));
        assert_eq!(Value::Bool(false).as_int(), None);
        assert_eq!(Value::Bool(false).as_bool(), Some(false));
        assert_eq!(Value::default(), Value::Uninit);
    }

    #[cfg(feature = "enable-serde")]
    #[test]
    fn serde_tokens() {
        use serde_test::{assert_tokens, Token};

        assert_tokens(
            &Value::Uninit,
            &[Token::UnitVariant {
                name: "Value",
                variant: "Uninit",
            }],
        );

        assert_tokens(
            &Value::Int(3),
            &[
                Token::NewtypeVariant {
                    name: "Value",
                    variant: "Int",
                },
                Token::I64(3),
            ],
        );

        assert_tokens(
            &Value::Func(Func::new(1)),
            &[
                Token::NewtypeVariant {
                    name: "Value",
                    variant: "Func",
                },
                Token::NewtypeStruct { name: "Func" },
                Token::U32(1),
            ],
        );
    }
}
