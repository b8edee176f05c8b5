//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::ir::{Block, Body, Func, Lvalue, START_BLOCK};

/// An address of a single value slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pointer {
    /// An absolute offset into the value stack
    Stack(usize),
}

/// A single activation of a function.
///
/// Every frame lives on the same value stack, starting at `offset`:
///
/// ```text
/// +-----------------------+
/// | ReturnPointer         | return value
/// + - - - - - - - - - - - +
/// | Arg(0)                |
/// | ...                   | arguments
/// | Arg(num_args - 1)     |
/// + - - - - - - - - - - - +
/// | Var(0)                |
/// | ...                   | variables
/// | Var(num_vars - 1)     |
/// + - - - - - - - - - - - +
/// | Temp(0)               |
/// | ...                   | temporaries
/// | Temp(num_temps - 1)   |
/// +-----------------------+
/// ```
///
/// The frame also remembers which block it is executing, and where its
/// result goes once it returns.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    func: Func,
    offset: usize,
    num_args: usize,
    num_vars: usize,
    num_temps: usize,
    block: Block,
    return_to: Option<(Pointer, Block)>,
}

impl Frame {
    /// Creates a frame for `body` that starts at `offset` in the value stack.
    /// Execution starts at [`START_BLOCK`].
    pub fn new(func: Func, body: &Body, offset: usize, return_to: Option<(Pointer, Block)>) -> Self {
        Self {
            func,
            offset,
            num_args: body.num_args() as usize,
            num_vars: body.num_vars() as usize,
            num_temps: body.num_temps() as usize,
            block: START_BLOCK,
            return_to,
        }
    }

    /// The function this frame is an activation of.
    pub fn func(&self) -> Func {
        self.func
    }

    /// Where the frame's slots begin in the value stack.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The number of value slots the frame occupies.
    pub fn size(&self) -> usize {
        1 + self.num_args + self.num_vars + self.num_temps
    }

    /// The block currently being executed.
    pub fn block(&self) -> Block {
        self.block
    }

    /// Moves execution to `block`.
    pub fn jump(&mut self, block: Block) {
        self.block = block;
    }

    /// Where the caller wants the return value written, and the block it
    /// continues at. `None` for the outermost frame of a call.
    pub fn return_to(&self) -> Option<(Pointer, Block)> {
        self.return_to
    }

    /// Maps an lvalue to the slot it refers to, or `None` if the frame has
    /// no such local.
    pub fn pointer(&self, lvalue: Lvalue) -> Option<Pointer> {
        let offset = match lvalue {
            Lvalue::ReturnPointer => self.offset,
            Lvalue::Arg(i) if (i as usize) < self.num_args => self.offset + 1 + i as usize,
            Lvalue::Var(i) if (i as usize) < self.num_vars => {
                self.offset + 1 + self.num_args + i as usize
            }
            Lvalue::Temp(i) if (i as usize) < self.num_temps => {
                self.offset + 1 + self.num_args + self.num_vars + i as usize
            }
            _ => return None,
        };

        Some(Pointer::Stack(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{ArenaKey, ArenaMap};

    #[test]
    fn layout() {
        let body = Body::new(2, 1, 3, ArenaMap::default());
        let frame = Frame::new(Func::new(0), &body, 10, None);

        assert_eq!(frame.size(), 7);
        assert_eq!(frame.block(), START_BLOCK);
        assert_eq!(frame.pointer(Lvalue::ReturnPointer), Some(Pointer::Stack(10)));
        assert_eq!(frame.pointer(Lvalue::Arg(1)), Some(Pointer::Stack(12)));
        assert_eq!(frame.pointer(Lvalue::Var(0)), Some(Pointer::Stack(13)));
        assert_eq!(frame.pointer(Lvalue::Temp(2)), Some(Pointer::Stack(16)));
        assert_eq!(frame.pointer(Lvalue::Arg(2)), None);
        assert_eq!(frame.pointer(Lvalue::Var(1)), None);
    }
}
