//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

//! Contains utility code specifically for the CLI tools located in
//! the `tools/` subdirectory.
//!
//! All of these tools have similar command-line arguments and they all
//! should look/feel uniform, so most of the code is pulled into this
//! module and then used in the drivers of the different tools.

use crate::vm::InterpreterConfig;
use bpaf::{construct, OptionParser, Parser};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The environment variable that log filters are read from.
pub const LOG_ENV: &str = "MIRI_LOG";

/// Basic options that every CLI tool in the suite takes in.
pub struct BaseOptions {
    /// The file to output results to
    pub output: Option<PathBuf>,
    /// Whether or not to run the logging in verbose mode.
    pub verbose: bool,
    /// The list of inputs given to the tool
    pub inputs: Vec<PathBuf>,
}

/// Options that control how MIR is interpreted.
pub struct InterpreterOptions {
    /// The maximum call depth before interpretation fails
    pub max_depth: usize,
    /// The maximum number of steps a start point can take, if any
    pub step_limit: Option<u64>,
    /// Whether every executed statement and terminator should be logged
    pub trace: bool,
    /// Whether to print the parsed MIR instead of interpreting it
    pub print: bool,
}

impl InterpreterOptions {
    /// Builds the interpreter configuration these options describe.
    pub fn config(&self) -> InterpreterConfig {
        InterpreterConfig::default()
            .with_max_call_depth(self.max_depth)
            .with_step_limit(self.step_limit)
    }
}

/// Returns a [`OptionParser`] preconfigured with the standard options and
/// additional tool-specific options.
pub fn tool_with<T>(
    description: &'static str,
    usage: &'static str,
    additional: impl Parser<T> + 'static,
) -> OptionParser<(T, BaseOptions)> {
    let res = construct!(additional, default());

    res.to_options()
        .descr(description)
        .version(VERSION)
        .usage(usage)
}

/// Returns a [`OptionParser`] preconfigured with the standard options and
/// nothing else.
pub fn tool(description: &'static str, usage: &'static str) -> OptionParser<BaseOptions> {
    default()
        .to_options()
        .descr(description)
        .version(VERSION)
        .usage(usage)
}

/// Gets the baseline default options that every tool needs.
pub fn default() -> impl Parser<BaseOptions> {
    let inputs = inputs();
    let output = output();
    let verbose = verbose();

    construct!(BaseOptions {
        output,
        verbose,
        inputs,
    })
}

/// Gets the output file specified on the CLI, if one exists.
pub fn output() -> impl Parser<Option<PathBuf>> {
    bpaf::long("output")
        .short('o')
        .help("the file to output to")
        .argument::<PathBuf>("FILE")
        .optional()
}

/// Gets the input file specified on the CLI.
pub fn inputs() -> impl Parser<Vec<PathBuf>> {
    bpaf::positional::<PathBuf>("FILES")
        .help("files to read as input to the tool")
        .many()
}

/// Checks for the presence of `-v` or `--verbose`
pub fn verbose() -> impl Parser<bool> {
    bpaf::long("verbose")
        .short('v')
        .help("enable verbose output")
        .flag(true, false)
}

/// Gets the number of concurrent threads to use for a given task
pub fn jobs() -> impl Parser<Option<usize>> {
    bpaf::long("jobs")
        .short('j')
        .help("the number of concurrent jobs to run tests on")
        .argument::<usize>("JOBS")
        .optional()
}

/// Gets the maximum call depth, defaulting to [`InterpreterConfig::DEFAULT_MAX_CALL_DEPTH`]
pub fn max_depth() -> impl Parser<usize> {
    bpaf::long("max-depth")
        .help("the maximum call depth before interpretation fails")
        .argument::<usize>("N")
        .guard(|depth| *depth > 0, "the maximum depth must be at least 1")
        .fallback(InterpreterConfig::DEFAULT_MAX_CALL_DEPTH)
}

/// Gets the step limit, if one was given
pub fn step_limit() -> impl Parser<Option<u64>> {
    bpaf::long("step-limit")
        .help("the maximum number of statements and terminators a start point may execute")
        .argument::<u64>("N")
        .optional()
}

/// Checks for the presence of `--trace`
pub fn trace() -> impl Parser<bool> {
    bpaf::long("trace")
        .help("log every statement and terminator as it executes")
        .flag(true, false)
}

/// Checks for the presence of `--print`
pub fn print() -> impl Parser<bool> {
    bpaf::long("print")
        .help("print the parsed MIR instead of interpreting it")
        .flag(true, false)
}

/// Gets every option that affects interpretation.
pub fn interpreter_options() -> impl Parser<InterpreterOptions> {
    let max_depth = max_depth();
    let step_limit = step_limit();
    let trace = trace();
    let print = print();

    construct!(InterpreterOptions {
        max_depth,
        step_limit,
        trace,
        print,
    })
}

/// Picks the log filter for a tool: `trace` beats `verbose`, and otherwise
/// the filter comes from [`LOG_ENV`], defaulting to `warn`.
pub fn log_filter(verbose: bool, trace: bool) -> EnvFilter {
    if trace {
        EnvFilter::new("trace")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

/// Installs the global `tracing` subscriber, logging to `stderr` so that
/// logs never mix with a tool's real output.
pub fn init_logging(verbose: bool, trace: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, trace))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
