//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::ir::{DebugInfo, Lvalue, Rvalue};

#[cfg(feature = "enable-serde")]
use serde::{Deserialize, Serialize};

/// How much of a value a `drop` is asking to tear down.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum DropKind {
    /// `drop(lv)`, only frees the storage of the value
    Free,
    /// `drop_deep(lv)`, runs drop glue for the whole value
    Deep,
}

/// The different kinds of statements that can appear inside of a block.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum StatementKind {
    /// `lvalue = rvalue;`
    Assign(Lvalue, Rvalue),
    /// `drop(lvalue);` or `drop_deep(lvalue);`
    ///
    /// There is no heap yet, so these have no effect when interpreted.
    Drop(DropKind, Lvalue),
}

/// A single non-terminating statement and where it came from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub struct Statement {
    /// What the statement does
    pub kind: StatementKind,
    /// Where the statement came from
    pub debug: DebugInfo,
}
