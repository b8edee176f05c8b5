//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::discovery;
use crate::display::{self, Failure};
use crate::runners::*;
use crate::subtest::Subtest;
use std::io;
use std::time::Duration;
use threadpool::ThreadPool;

const SUBTESTS: [Subtest; 2] = [parse_subtest(), interpret_subtest()];

fn run_tests<'a>(tests: impl IntoIterator<Item = &'a Subtest>, jobs: Option<usize>) -> io::Result<()> {
    let mut pool = jobs.map_or_else(ThreadPool::default, ThreadPool::new);
    let mut total = 0usize;
    let mut elapsed = Duration::default();
    let mut failures: Vec<Failure> = Vec::default();

    for test in tests {
        display::print_subtest_header(test, discovery::cases_in_subdir(test.subdir()).len());

        for (file, details) in test.run(&mut pool) {
            total += 1;
            elapsed += details.elapsed;

            failures.extend(display::print_case(test, file, &details));
        }
    }

    display::print_summary(total, failures.len(), elapsed);

    if failures.is_empty() {
        return Ok(());
    }

    display::print_failures(&failures);

    Err(io::Error::new(
        io::ErrorKind::Other,
        format!("{} of {total} file tests failed", failures.len()),
    ))
}

pub fn run_all(jobs: Option<usize>) -> io::Result<()> {
    run_tests(&SUBTESTS, jobs)
}

pub fn run_subtest(name: &str, jobs: Option<usize>) -> io::Result<()> {
    match SUBTESTS.iter().find(|test| test.subdir() == name) {
        Some(test) => run_tests([test], jobs),
        None => Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("unknown subtest '{name}'"),
        )),
    }
}
