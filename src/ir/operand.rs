//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::ir::{Func, Lvalue};

#[cfg(feature = "enable-serde")]
use serde::{Deserialize, Serialize};

/// A compile-time constant value.
///
/// The reader accepts every one of these, but the interpreter only knows how
/// to evaluate [`ConstVal::Int`] and [`ConstVal::Bool`] so far.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum ConstVal {
    /// A signed integer, e.g. `const -5`
    Int(i64),
    /// An unsigned integer, e.g. `const 5u`
    Uint(u64),
    /// A float, e.g. `const 1.5`
    Float(f64),
    /// A string, e.g. `const "hello"`
    Str(String),
    /// `const true` or `const false`
    Bool(bool),
}

impl ConstVal {
    /// A short name for the kind of constant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Uint(_) => "unsigned integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Bool(_) => "bool",
        }
    }
}

/// The payload of a `const` operand.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum Literal {
    /// A plain constant value
    Value(ConstVal),
    /// A reference to a function item, this is how callees are named
    Item(Func),
}

/// An input to an rvalue, call or condition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum Operand {
    /// Reads the current value of an lvalue
    Consume(Lvalue),
    /// A constant
    Constant(Literal),
}

impl Operand {
    /// Shorthand for `Operand::Constant(Literal::Value(ConstVal::Int(value)))`.
    pub fn int(value: i64) -> Self {
        Self::Constant(Literal::Value(ConstVal::Int(value)))
    }

    /// Shorthand for `Operand::Constant(Literal::Value(ConstVal::Bool(value)))`.
    pub fn bool(value: bool) -> Self {
        Self::Constant(Literal::Value(ConstVal::Bool(value)))
    }

    /// Shorthand for `Operand::Constant(Literal::Item(func))`.
    pub fn item(func: Func) -> Self {
        Self::Constant(Literal::Item(func))
    }
}

impl From<Lvalue> for Operand {
    fn from(lvalue: Lvalue) -> Self {
        Self::Consume(lvalue)
    }
}
