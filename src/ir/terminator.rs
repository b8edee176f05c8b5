//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::ir::{Block, ConstVal, DebugInfo, Lvalue, Operand};
use smallvec::SmallVec;

#[cfg(feature = "enable-serde")]
use serde::{Deserialize, Serialize};

/// The different ways that control can leave a basic block.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum TerminatorKind {
    /// `return;`, the function finishes with whatever is in the return slot
    Return,
    /// `goto -> bbN;`
    Goto {
        /// The block to continue at
        target: Block,
    },
    /// `if(cond) -> [true: bbA, false: bbB];`
    If {
        /// The condition, must evaluate to a `bool`
        cond: Operand,
        /// `[then, else]`
        targets: [Block; 2],
    },
    /// `switchInt(discr) -> [1: bbA, 2: bbB, otherwise: bbC];`
    ///
    /// `targets` either has exactly one block per value, or one extra block at
    /// the end that is taken when nothing matches.
    SwitchInt {
        /// The place being switched on
        discr: Lvalue,
        /// The values being compared against
        values: Vec<ConstVal>,
        /// The block for each value, plus the optional `otherwise` block
        targets: SmallVec<[Block; 4]>,
    },
    /// `dest = call func(args...) -> bbN;`
    Call {
        /// Where the result of the call is written
        destination: Lvalue,
        /// The callee, must evaluate to a function value
        func: Operand,
        /// The arguments, in order
        args: SmallVec<[Operand; 4]>,
        /// The block to continue at after the call returns
        target: Block,
    },
    /// `diverge;`, the function unwinds
    Diverge,
    /// `panic -> bbN;`
    Panic {
        /// The cleanup block that would run after the panic
        target: Block,
    },
}

impl TerminatorKind {
    /// Whether this terminator has an `otherwise` target, only ever true
    /// for `switchInt`.
    pub fn has_otherwise(&self) -> bool {
        match self {
            TerminatorKind::SwitchInt {
                values, targets, ..
            } => targets.len() == values.len() + 1,
            _ => false,
        }
    }

    /// Every block that control can flow to from this terminator.
    pub fn successors(&self) -> SmallVec<[Block; 4]> {
        match self {
            TerminatorKind::Return | TerminatorKind::Diverge => SmallVec::new(),
            TerminatorKind::Goto { target }
            | TerminatorKind::Call { target, .. }
            | TerminatorKind::Panic { target } => smallvec::smallvec![*target],
            TerminatorKind::If { targets, .. } => SmallVec::from_slice(targets),
            TerminatorKind::SwitchInt { targets, .. } => targets.clone(),
        }
    }
}

/// The terminator of a block and where it came from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub struct Terminator {
    /// How control leaves the block
    pub kind: TerminatorKind,
    /// Where the terminator came from
    pub debug: DebugInfo,
}
