//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::ir::Operand;

#[cfg(feature = "enable-serde")]
use serde::{Deserialize, Serialize};

/// A binary operator, e.g. the `Add` in `tmp0 = Add(arg0, const 1);`.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum BinOp {
    /// `Add`
    Add,
    /// `Sub`
    Sub,
    /// `Mul`
    Mul,
    /// `Div`
    Div,
    /// `Rem`
    Rem,
    /// `BitXor`
    BitXor,
    /// `BitAnd`
    BitAnd,
    /// `BitOr`
    BitOr,
    /// `Shl`
    Shl,
    /// `Shr`
    Shr,
    /// `Eq`
    Eq,
    /// `Lt`
    Lt,
    /// `Le`
    Le,
    /// `Ne`
    Ne,
    /// `Ge`
    Ge,
    /// `Gt`
    Gt,
}

impl BinOp {
    /// Every binary operator, in declaration order.
    pub const ALL: [BinOp; 16] = [
        BinOp::Add,
        BinOp::Sub,
        BinOp::Mul,
        BinOp::Div,
        BinOp::Rem,
        BinOp::BitXor,
        BinOp::BitAnd,
        BinOp::BitOr,
        BinOp::Shl,
        BinOp::Shr,
        BinOp::Eq,
        BinOp::Lt,
        BinOp::Le,
        BinOp::Ne,
        BinOp::Ge,
        BinOp::Gt,
    ];

    /// The name of the operator in textual MIR.
    pub fn name(self) -> &'static str {
        match self {
            BinOp::Add => "Add",
            BinOp::Sub => "Sub",
            BinOp::Mul => "Mul",
            BinOp::Div => "Div",
            BinOp::Rem => "Rem",
            BinOp::BitXor => "BitXor",
            BinOp::BitAnd => "BitAnd",
            BinOp::BitOr => "BitOr",
            BinOp::Shl => "Shl",
            BinOp::Shr => "Shr",
            BinOp::Eq => "Eq",
            BinOp::Lt => "Lt",
            BinOp::Le => "Le",
            BinOp::Ne => "Ne",
            BinOp::Ge => "Ge",
            BinOp::Gt => "Gt",
        }
    }

    /// Whether the operator produces a `bool` instead of a value of
    /// the operand type.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::Lt | BinOp::Le | BinOp::Ne | BinOp::Ge | BinOp::Gt
        )
    }
}

/// A unary operator, e.g. the `Neg` in `tmp0 = Neg(arg0);`.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum UnOp {
    /// `Not`, bitwise on integers and logical on bools
    Not,
    /// `Neg`
    Neg,
}

impl UnOp {
    /// The name of the operator in textual MIR.
    pub fn name(self) -> &'static str {
        match self {
            UnOp::Not => "Not",
            UnOp::Neg => "Neg",
        }
    }
}

/// The right-hand side of an assignment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum Rvalue {
    /// The value of a single operand, printed as just the operand
    Use(Operand),
    /// `Op(lhs, rhs)`
    BinaryOp(BinOp, Operand, Operand),
    /// `Op(operand)`
    UnaryOp(UnOp, Operand),
}
