//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::subtest::TestResult;

#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub enum TestFailure {
    Diff { expected: String, got: String },
    Missing { check: String, full: String },
    CompileError(String),
    Panic(String, String),
    LackOfCompileError,
}

#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub enum Check<'data> {
    // rest
    MatchEntireFile(&'data str),
    // expected
    MatchSection(String),
    // checks
    IndividualChecks(Vec<&'data str>),
    // error message
    CompileError(&'data str),
}

fn first_line(contents: &str) -> Option<(&str, &str)> {
    contents
        .find('\n')
        .map(|idx| (&contents[0..idx], &contents[idx + 1..]))
}

// a section is `//` on its own line, then `// `-prefixed lines, then `///`
fn find_match_section<'data>(name: &str, rest: &str) -> Check<'data> {
    let mut lines = rest.lines();
    let mut section = String::default();

    assert_eq!(
        lines.next().map(str::trim_end),
        Some("//"),
        "test '{name}' has a `// MATCH-SECTION` header without an opening `//`"
    );

    for line in lines
        .map(|line| line.trim_end())
        .take_while(|line| *line != "///")
    {
        // an empty line in the section is just `//`, `// ` is stripped from
        // everything else so that indentation after it is kept
        if line != "//" {
            section.push_str(line.strip_prefix("// ").unwrap_or(line));
        }

        section.push('\n');
    }

    Check::MatchSection(section)
}

fn find_individual_checks(rest: &str) -> Check<'_> {
    let checks = rest
        .lines()
        .map(|line| line.trim_start())
        .filter_map(|line| line.strip_prefix("// CHECK: "))
        .map(|check| check.trim_end())
        .collect();

    Check::IndividualChecks(checks)
}

fn find_checks<'data>(name: &str, contents: &'data str) -> Check<'data> {
    let (first, rest) = match first_line(contents) {
        Some(data) => data,
        None => return Check::IndividualChecks(Vec::default()),
    };

    if first.starts_with("// MATCH-ENTIRE") {
        return Check::MatchEntireFile(rest);
    }

    if first.starts_with("// MATCH-SECTION") {
        return find_match_section(name, rest);
    }

    if let Some(error) = first.strip_prefix("// COMPILE-ERROR: ") {
        return Check::CompileError(error.trim_end());
    }

    if first.starts_with("// STANDARD") {
        return find_individual_checks(rest);
    }

    panic!("test '{name}' did not provide `// <TYPE>` header for `filetest`. got: '{first}'")
}

fn match_entire_file(output: TestResult, expected: &str) -> Result<(), TestFailure> {
    match output {
        TestResult::Output(data) if data == expected => Ok(()),
        TestResult::CompileError(err) => Err(TestFailure::CompileError(err)),
        TestResult::Output(data) => Err(TestFailure::Diff {
            expected: expected.to_string(),
            got: data,
        }),
    }
}

fn match_compile_error(output: TestResult, err: &str) -> Result<(), TestFailure> {
    match output {
        TestResult::CompileError(got) if got.contains(err) => Ok(()),
        TestResult::CompileError(got) => Err(TestFailure::CompileError(got)),
        _ => Err(TestFailure::LackOfCompileError),
    }
}

fn match_section(output: TestResult, section: &str) -> Result<(), TestFailure> {
    match output {
        TestResult::Output(data) if data.contains(section) => Ok(()),
        TestResult::CompileError(err) => Err(TestFailure::CompileError(err)),
        TestResult::Output(data) => Err(TestFailure::Diff {
            expected: section.to_string(),
            got: data,
        }),
    }
}

fn match_checks(output: TestResult, checks: &[&str]) -> Result<(), TestFailure> {
    let data = match output {
        TestResult::Output(data) => data,
        TestResult::CompileError(err) => return Err(TestFailure::CompileError(err)),
    };

    let mut checks = checks.iter().peekable();

    for line in data.lines() {
        let check = match checks.peek() {
            Some(check) => **check,
            None => break,
        };

        if line == check {
            let _ = checks.next();
        }
    }

    match checks.next() {
        None => Ok(()),
        Some(check) => Err(TestFailure::Missing {
            check: check.to_string(),
            full: data,
        }),
    }
}

#[derive(Debug, Hash, Eq, PartialEq)]
pub struct FileTestCase<'data> {
    check: Check<'data>,
}

impl<'data> FileTestCase<'data> {
    pub fn from_raw(name: &str, raw: &'data str) -> Self {
        Self {
            check: find_checks(name, raw),
        }
    }

    pub fn check(&self, output: TestResult) -> Result<(), TestFailure> {
        match &self.check {
            Check::MatchEntireFile(expected) => match_entire_file(output, expected),
            Check::MatchSection(section) => match_section(output, section),
            Check::CompileError(error) => match_compile_error(output, error),
            Check::IndividualChecks(checks) => match_checks(output, checks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers() {
        assert_eq!(
            find_checks("a", "// MATCH-ENTIRE\nfn f() {}\n"),
            Check::MatchEntireFile("fn f() {}\n")
        );
        assert_eq!(
            find_checks("b", "// COMPILE-ERROR: unknown block label\nfn f() {}\n"),
            Check::CompileError("unknown block label")
        );
        assert_eq!(
            find_checks("c", "// STANDARD\n// CHECK: Interpreting: f\nfn f() {}\n  // CHECK: Test passed!\n"),
            Check::IndividualChecks(vec!["Interpreting: f", "Test passed!"])
        );
        assert_eq!(
            find_checks("d", "// MATCH-SECTION\n//\n// Interpreting: f\n//\n///\nfn f() {}\n"),
            Check::MatchSection("Interpreting: f\n\n".to_owned())
        );
    }

    #[test]
    fn checks_match_in_order() {
        let output = || TestResult::Output("a\nb\nc\n".to_owned());

        assert_eq!(match_checks(output(), &["a", "c"]), Ok(()));
        assert!(matches!(
            match_checks(output(), &["c", "a"]),
            Err(TestFailure::Missing { .. })
        ));
    }
}
