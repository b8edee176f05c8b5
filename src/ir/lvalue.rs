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

/// A place that can be read from or written to inside of a stack frame.
///
/// Indices are relative to their own section of the frame, `Var(0)` is the
/// first variable no matter how many arguments the function has.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum Lvalue {
    /// `return`, the slot the result of the function is written to
    ReturnPointer,
    /// `argN`
    Arg(u32),
    /// `varN`
    Var(u32),
    /// `tmpN`
    Temp(u32),
}

assert_eq_size!(Lvalue, u64);
