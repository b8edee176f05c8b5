//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use miri::cli;
use miri::cli::{BaseOptions, InterpreterOptions};

/// The options given by the user.
pub struct Options {
    /// The base tool options
    pub base: BaseOptions,
    /// Options that control the interpreter
    pub interp: InterpreterOptions,
}

/// Parses every option `miri` takes.
pub fn parse_options() -> Options {
    let (interp, base) = cli::tool_with(
        "Interprets textual MIR, running every `#[miri_run]` function",
        "Usage: miri [options] <input files>",
        cli::interpreter_options(),
    )
    .run();

    Options { base, interp }
}
