//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::subtest::{Subtest, TestDetails};
use crate::testcase::TestFailure;
use ansi_term::Color::{Blue, Cyan, Green, Red, White, Yellow};
use std::time::Duration;

// everything after the status column lines up under the file name
const INDENT: &str = "        ";

/// A failed case, kept around until every subtest has finished so that the
/// failure details don't interleave with the per-file status lines.
pub struct Failure {
    file: String,
    details: String,
}

fn indented(text: &str) -> String {
    text.replace('\n', &format!("\n{INDENT}"))
}

fn seconds(elapsed: Duration) -> String {
    format!("{:9.4}s", elapsed.as_secs_f32())
}

pub fn print_subtest_header(subtest: &Subtest, cases: usize) {
    println!(
        "     {} subtest '{}' ({cases} files)",
        Green.bold().paint("Running"),
        White.bold().paint(subtest.subdir())
    );
}

pub fn print_summary(total: usize, failed: usize, elapsed: Duration) {
    let color = if failed == 0 { Green } else { Red };

    println!(
        "     {} [ {} ] {} files, {} passed, {} failed",
        color.bold().paint("Finished"),
        seconds(elapsed),
        Blue.paint(total.to_string()),
        Green.paint((total - failed).to_string()),
        color.paint(failed.to_string()),
    );
}

// `got` is on the left, so removed lines are what the runner printed and
// added lines are what the test file expects
fn render_diff(expected: &str, got: &str) -> String {
    let mut out = format!(
        "{} {}\n",
        Red.paint("- output"),
        Green.paint("+ expected")
    );

    for (n, line) in diff::lines(got, expected).into_iter().enumerate() {
        let rendered = match line {
            diff::Result::Left(l) => Red.paint(format!("- {l}")).to_string(),
            diff::Result::Right(r) => Green.paint(format!("+ {r}")).to_string(),
            diff::Result::Both(l, _) => format!("  {l}"),
        };

        out += &format!("{INDENT}{:4} | {rendered}\n", n + 1);
    }

    out
}

fn render_failure(failure: &TestFailure) -> String {
    match failure {
        TestFailure::Diff { expected, got } => render_diff(expected, got),
        TestFailure::Missing { check, full } => format!(
            "{}\n{INDENT}{check}\n\n{INDENT}{}\n{INDENT}{}",
            Red.bold().paint("no output line matched CHECK:"),
            Yellow.paint("full output:"),
            indented(full)
        ),
        TestFailure::CompileError(err) => format!(
            "{}\n{INDENT}{}",
            Red.bold().paint("file failed to read:"),
            indented(err)
        ),
        TestFailure::LackOfCompileError => Red
            .bold()
            .paint("expected the file to be rejected, but it was read successfully")
            .to_string(),
        TestFailure::Panic(backtrace, message) => format!(
            "{} {}\n\n{}",
            Red.paint("runner panicked:"),
            Red.bold().paint(message),
            Red.paint(backtrace.as_str())
        ),
    }
}

/// Prints the status line for one file, returning the failure details if
/// the case didn't pass.
pub fn print_case(subtest: &Subtest, file: &str, details: &TestDetails) -> Option<Failure> {
    let path = format!("{}/{}", Cyan.paint(subtest.subdir()), Blue.paint(file));
    let time = seconds(details.elapsed);

    match &details.output {
        Ok(()) => {
            println!("{INDENT}{} [ {time} ] {path}", Green.bold().paint("pass"));

            None
        }
        Err(failure) => {
            println!("{INDENT}{} [ {time} ] {path}", Red.bold().paint("FAIL"));

            Some(Failure {
                file: path,
                details: render_failure(failure),
            })
        }
    }
}

pub fn print_failures(failures: &[Failure]) {
    for failure in failures {
        println!();
        println!("{INDENT}{}", "- ".repeat(20));
        println!(
            "{} {}",
            Red.bold().paint(format!("failure in '{}':", failure.file)),
            failure.details
        );
    }
}
