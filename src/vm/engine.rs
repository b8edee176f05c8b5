//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::ir::Module;
use crate::vm::{EvalError, InterpreterConfig, Value};

/// Abstract interface for an "engine" that can execute MIR.
///
/// How the engine decides to do that is completely irrelevant, this interface
/// only exposes the basic operations that are necessary for a user of that
/// engine to actually do meaningful work with it.
pub trait Engine<'m>: Sized {
    /// Creates an engine instance that will execute `module`.
    fn with_module(module: &'m Module, config: InterpreterConfig) -> Self;

    /// Runs the function named `entry` with `args`, and returns the value it
    /// leaves in its return slot.
    fn run(&mut self, entry: &str, args: &[Value]) -> Result<Value, EvalError>;
}
