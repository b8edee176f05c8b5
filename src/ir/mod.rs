//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

//! Provides the types required to represent and build MIR.
//!
//! MIR is a control-flow graph of basic blocks per function. Each block is a
//! list of assignments and drops followed by a single terminator. Functions
//! have no types, only a count of arguments, variables and temporaries.

mod body;
mod builders;
mod debug;
mod entities;
mod function;
mod lvalue;
mod module;
mod operand;
mod rvalue;
mod statement;
mod terminator;

pub use body::*;
pub use builders::*;
pub use debug::*;
pub use entities::*;
pub use function::*;
pub use lvalue::*;
pub use module::*;
pub use operand::*;
pub use rvalue::*;
pub use statement::*;
pub use terminator::*;
