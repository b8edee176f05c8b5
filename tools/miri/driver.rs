//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::options::Options;
use miri::analysis;
use miri::harness::interpret_start_points;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, error};

/// Reads, verifies and then either prints or interprets every input,
/// writing everything produced to the output file (or `stdout`).
pub fn driver(options: &Options) -> ExitCode {
    if options.base.inputs.is_empty() {
        error!("no input files");

        return ExitCode::FAILURE;
    }

    let mut output = String::default();
    let mut success = true;

    for input in options.base.inputs.iter() {
        success &= run_single_file(input, options, &mut output);
    }

    match &options.base.output {
        Some(path) => {
            if let Err(e) = fs::write(path, output) {
                error!("unable to write output to file `{}`: {e}", path.display());

                return ExitCode::FAILURE;
            }
        }
        None => print!("{output}"),
    }

    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run_single_file(input: &Path, options: &Options, output: &mut String) -> bool {
    let name = input.display().to_string();
    let source = match fs::read_to_string(input) {
        Ok(source) => source,
        Err(e) => {
            error!("unable to read `{name}`: {e}");

            return false;
        }
    };

    let module = match miri::parse_mir(&name, &source) {
        Ok(module) => module,
        Err(e) => {
            eprintln!("{}", e.render(&name, &source));

            return false;
        }
    };

    debug!(file = %name, functions = module.len(), "parsed module");

    if options.interp.print {
        *output += &analysis::stringify_module(&module);

        return true;
    }

    let report = interpret_start_points(&module, options.interp.config());

    *output += &report.to_string();

    if report.is_empty() {
        debug!(file = %name, "no start points to interpret");
    }

    report.success()
}
