//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

#[cfg(feature = "enable-serde")]
use serde::{Deserialize, Serialize};

/// Limits that the interpreter enforces while executing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub struct InterpreterConfig {
    /// The maximum number of frames that can be on the call stack at once.
    pub max_call_depth: usize,
    /// The maximum number of statements and terminators that a single
    /// top-level call can execute, counting everything it calls, or `None`
    /// for no limit.
    pub step_limit: Option<u64>,
}

impl InterpreterConfig {
    /// The call depth limit used by [`Default`].
    pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

    /// Replaces the call depth limit.
    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    /// Replaces the step limit.
    pub fn with_step_limit(mut self, step_limit: Option<u64>) -> Self {
        self.step_limit = step_limit;
        self
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            max_call_depth: Self::DEFAULT_MAX_CALL_DEPTH,
            step_limit: None,
        }
    }
}
