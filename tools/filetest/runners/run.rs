//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::subtest::{Subtest, TestResult};
use miri::harness;
use miri::vm::InterpreterConfig;

// a runaway test shouldn't hang the whole suite
const STEP_LIMIT: u64 = 1_000_000;

fn run_output(name: &str, content: &str) -> TestResult {
    match miri::parse_mir(name, content) {
        Ok(module) => {
            let config = InterpreterConfig::default().with_step_limit(Some(STEP_LIMIT));
            let report = harness::interpret_start_points(&module, config);

            TestResult::Output(report.to_string())
        }
        Err(err) => TestResult::CompileError(err.render(name, content)),
    }
}

pub const fn interpret_subtest() -> Subtest {
    Subtest::new("run", run_output)
}
