//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

mod driver;
mod options;

use std::process::ExitCode;

fn main() -> ExitCode {
    let options = options::parse_options();

    miri::cli::init_logging(options.base.verbose, options.interp.trace);

    driver::driver(&options)
}
