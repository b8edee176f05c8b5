//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::arena_key;
use std::fmt;

arena_key! {
    /// Refers to a single function inside of a [`Module`](crate::ir::Module).
    ///
    /// This is what a function item literal (`const fib`) evaluates to, the
    /// interpreter carries it around inside of a `Value::Func`.
    pub struct Func;

    /// Refers to a basic block inside of a single [`Body`](crate::ir::Body).
    ///
    /// Blocks are only meaningful in the body that created them, using a block
    /// from one body to index another is not detected.
    pub struct Block;
}

/// The block that execution of every body begins at.
pub const START_BLOCK: Block = Block(0);

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bb{}", self.0)
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn{}", self.0)
    }
}
