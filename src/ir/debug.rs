//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use static_assertions::assert_eq_size;

#[cfg(feature = "enable-serde")]
use serde::{Deserialize, Serialize};

/// Holds the "debug info" for a statement or terminator, i.e. where it came from.
///
/// MIR read from text has the line/column of the first token of the statement,
/// MIR built with a [`FuncBuilder`](crate::ir::FuncBuilder) uses whatever the
/// builder was given (usually [`DebugInfo::fake`]).
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Default)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub struct DebugInfo {
    line: u32,
    col: u32,
}

impl DebugInfo {
    /// Creates debug info pointing at a position in a source file.
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// Debug info for MIR that didn't come from any file, e.g. tests.
    pub fn fake() -> Self {
        Self { line: 0, col: 0 }
    }

    /// Returns the line in the original file that the entity came from.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Returns the column in the original file that the entity came from.
    pub fn col(&self) -> u32 {
        self.col
    }

    /// Whether this info came from [`Self::fake`].
    pub fn is_fake(&self) -> bool {
        self.line == 0
    }
}

assert_eq_size!(DebugInfo, u64);
