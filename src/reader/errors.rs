//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::ir::DebugInfo;
use thiserror::Error;

/// An error produced by the parser, pointing at the token that caused it.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Error)]
#[error("{line}:{col}: {message}")]
pub struct ParseError {
    /// The line of the offending token, or the last line when EOF was hit
    pub line: u32,
    /// The column of the offending token
    pub col: u16,
    /// The length of the offending token, `0` when EOF was hit
    pub len: u16,
    /// What went wrong
    pub message: String,
}

/// Everything that can go wrong when reading a file of MIR.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ReadError {
    /// The text didn't match the grammar.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// The text parsed, but the resulting MIR isn't well-formed.
    #[error("module failed verification with {} issue(s)", .0.len())]
    Verify(Vec<(String, DebugInfo)>),
}

impl ReadError {
    /// Renders the error into a human-readable, multi-line string.
    ///
    /// `name` is the name of the file shown to the user, `source` is the
    /// text that was parsed.
    pub fn render(&self, name: &str, source: &str) -> String {
        match self {
            ReadError::Parse(err) => format_parse_error(name, source, err),
            ReadError::Verify(issues) => format_verifier_error(name, issues.clone()),
        }
    }
}

/// Formats a parse error into a rustc-style snippet with the offending
/// token underlined.
pub fn format_parse_error(name: &str, source: &str, err: &ParseError) -> String {
    // EOF errors point one past the end of the last line, there's nothing to underline
    let line = match source.lines().nth((err.line.max(1) - 1) as usize) {
        Some(line) if err.len != 0 => line,
        _ => {
            return format!(
                "{name}: hit EOF while expecting tokens, error: '{}'",
                err.message
            )
        }
    };

    let (line_n, col_n) = (err.line.to_string(), err.col.to_string());
    let mut error = String::default();

    let num_padding = " ".repeat(line_n.len());
    let col_padding = " ".repeat(err.col.saturating_sub(1) as usize);
    let underline = "^".repeat(err.len as usize);

    error += &format!("  --> {name}:{line_n}:{col_n}\n");
    error += &format!(" {num_padding} |\n");
    error += &format!(" {line_n} | {line}\n");
    error += &format!(" {num_padding} | {col_padding}{underline}\n");
    error += &format!(" {num_padding} |\n");
    error += &format!(" {num_padding} = {}", err.message);

    error
}

/// Formats errors emitted by the verifier, one `name:line:col: message` per line
/// in source order.
pub fn format_verifier_error(name: &str, mut issues: Vec<(String, DebugInfo)>) -> String {
    issues.sort_by_key(|(_, info)| (info.line(), info.col()));

    let mut error = String::default();

    for (err, info) in issues {
        let line = info.line();
        let col = info.col();

        error += &format!("{name}:{line}:{col}: {err}\n");
    }

    error.pop();

    error
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_underlines_token() {
        let source = "fn f() {\n    bb0: { nope; }\n}\n";
        let err = ParseError {
            line: 2,
            col: 12,
            len: 4,
            message: "expected a statement".to_owned(),
        };

        let expected = "  --> test.mir:2:12
   |
 2 |     bb0: { nope; }
   |            ^^^^
   |
   = expected a statement";

        assert_eq!(format_parse_error("test.mir", source, &err), expected);
    }

    #[test]
    fn eof_error_has_no_snippet() {
        let err = ParseError {
            line: 1,
            col: 9,
            len: 0,
            message: "expected `}`".to_owned(),
        };

        assert_eq!(
            format_parse_error("test.mir", "fn f() {", &err),
            "test.mir: hit EOF while expecting tokens, error: 'expected `}`'"
        );
    }

    #[test]
    fn verifier_errors_are_sorted() {
        let issues = vec![
            ("second".to_owned(), DebugInfo::new(4, 1)),
            ("first".to_owned(), DebugInfo::new(2, 7)),
        ];

        assert_eq!(
            format_verifier_error("m.mir", issues),
            "m.mir:2:7: first\nm.mir:4:1: second"
        );
    }
}
