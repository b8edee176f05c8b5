//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::arena::ArenaMap;
use crate::ir::{Block, Lvalue, Statement, Terminator, START_BLOCK};

#[cfg(feature = "enable-serde")]
use serde::{Deserialize, Serialize};

/// A single basic block: straight-line statements followed by one terminator.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub struct BasicBlockData {
    /// The statements, executed in order
    pub statements: Vec<Statement>,
    /// How control leaves the block
    pub terminator: Terminator,
}

/// The MIR body of a function.
///
/// The body only records *how many* arguments, variables and temporaries exist,
/// MIR locals are untyped. The interpreter uses these counts to lay out a
/// stack frame for each call.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub struct Body {
    num_args: u32,
    num_vars: u32,
    num_temps: u32,
    blocks: ArenaMap<Block, BasicBlockData>,
}

impl Body {
    /// Creates a body directly from its parts. Usually a
    /// [`FuncBuilder`](crate::ir::FuncBuilder) is a nicer way to do this.
    pub fn new(
        num_args: u32,
        num_vars: u32,
        num_temps: u32,
        blocks: ArenaMap<Block, BasicBlockData>,
    ) -> Self {
        Self {
            num_args,
            num_vars,
            num_temps,
            blocks,
        }
    }

    /// The number of arguments the function takes.
    pub fn num_args(&self) -> u32 {
        self.num_args
    }

    /// The number of `varN` locals.
    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    /// The number of `tmpN` locals.
    pub fn num_temps(&self) -> u32 {
        self.num_temps
    }

    /// The total number of value slots a frame for this body needs,
    /// including the return slot.
    pub fn frame_size(&self) -> usize {
        1 + self.num_args as usize + self.num_vars as usize + self.num_temps as usize
    }

    /// Whether an lvalue refers to a slot that actually exists in this body.
    pub fn contains_lvalue(&self, lvalue: Lvalue) -> bool {
        match lvalue {
            Lvalue::ReturnPointer => true,
            Lvalue::Arg(i) => i < self.num_args,
            Lvalue::Var(i) => i < self.num_vars,
            Lvalue::Temp(i) => i < self.num_temps,
        }
    }

    /// Gets the data for a block, if it exists.
    pub fn block(&self, block: Block) -> Option<&BasicBlockData> {
        self.blocks.get(block)
    }

    /// Every block in the body, in order. The first is always [`START_BLOCK`].
    pub fn blocks(&self) -> impl Iterator<Item = (Block, &BasicBlockData)> {
        self.blocks.iter()
    }

    /// The number of blocks in the body.
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the body has any code at all. Declared-but-undefined functions
    /// have empty bodies.
    pub fn is_empty(&self) -> bool {
        !self.blocks.contains(START_BLOCK)
    }
}
