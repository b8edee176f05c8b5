//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::ir::{BinOp, UnOp};
use std::iter::Peekable;
use std::str::Bytes;

/// A lexer for textual MIR that lazily produces tokens.
#[derive(Clone)]
pub struct Lex<'a> {
    raw: RawLex<'a>,
    next: Option<TokPair<'a>>,
}

impl<'a> Lex<'a> {
    /// Creates a new [`Lex`] based on a given source file.
    pub fn new(source: &'a str) -> Self {
        let mut raw = RawLex::new(source);
        let first = raw.next();

        Self { raw, next: first }
    }

    /// Produces the next token, if one exists. If `None` is returned,
    /// EOF has been reached.
    pub fn next_token(&mut self) -> Option<TokPair<'a>> {
        // we stay "one ahead" of the raw lexer, this makes `peek_token` trivial
        // and lets `is_at_end` work without `&mut self`
        let old = self.next.take();

        self.next = self.raw.next();

        old
    }

    /// Returns whether or not the lexer is able to yield more tokens via [`Self::next_token`]
    pub fn is_at_end(&self) -> bool {
        self.next.is_none()
    }

    /// Peek at the next token to be yielded, if there are any
    pub fn peek_token(&self) -> Option<TokPair<'a>> {
        self.next
    }
}

/// A single lex token
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Token<'a> {
    /// An identifier that isn't a keyword: function names, block labels, attribute names
    Ident(&'a str),
    /// `argN`
    Arg(u32),
    /// `varN`
    Var(u32),
    /// `tmpN`
    Temp(u32),
    /// `return`, both the terminator and the return place
    Return,
    /// `fn`
    Fn,
    /// `let`
    Let,
    /// `const`
    Const,
    /// `drop`
    Drop,
    /// `drop_deep`
    DropDeep,
    /// `goto`
    Goto,
    /// `if`
    If,
    /// `switchInt`
    SwitchInt,
    /// `otherwise`
    Otherwise,
    /// `call`
    Call,
    /// `diverge`
    Diverge,
    /// `panic`
    Panic,
    /// A binary operator name, e.g. `Add`
    BinOp(BinOp),
    /// A unary operator name, e.g. `Neg`
    UnOp(UnOp),
    /// `true` or `false`
    BoolLit(bool),
    /// An integer literal, e.g. `-1`, `42` or `0xff`
    IntLit(&'a str),
    /// An unsigned integer literal, e.g. `42u`. The `u` is included
    UintLit(&'a str),
    /// A float literal, e.g. `3.25` or `1.0e-9`
    FloatLit(&'a str),
    /// A string literal, without the quotes and with escapes left as-is
    StrLit(&'a str),
    /// `#`
    Hash,
    /// `{`
    CurlyOpen,
    /// `}`
    CurlyClose,
    /// `(`
    ParenOpen,
    /// `)`
    ParenClose,
    /// `[`
    SquareOpen,
    /// `]`
    SquareClose,
    /// `=`
    Eq,
    /// `:`
    Colon,
    /// `;`
    Semi,
    /// `,`
    Comma,
    /// `->`
    Arrow,
    /// An unknown token, almost certainly an error
    Unknown(&'a str),
}

/// A token yielded by the lexer, containing line/col information as well
/// as raw token data.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TokPair<'a> {
    /// The raw token data
    pub tok: Token<'a>,
    /// The line in the original source that the token is located at
    pub line: u32,
    /// The column in the original source that the token is located at
    pub col: u16,
    /// The length of the token in characters
    pub len: u16,
}

// implements lexicographic string comparisons at compile time
//
// this is equivalent to `Ord<str, str>`, just written in a way that
// is actually usable inside `const` functions
const fn less_than(left: &'static str, right: &'static str) -> bool {
    let left = left.as_bytes();
    let right = right.as_bytes();
    let mut i = 0;
    let min_length = if left.len() > right.len() {
        right.len()
    } else {
        left.len()
    };

    while i < min_length {
        if left[i] != right[i] {
            return left[i] < right[i];
        }

        i += 1;
    }

    left.len() < right.len()
}

// insertion sort at compile time, lets us binary-search keywords while lexing
const fn sort_array<const N: usize>(
    mut arr: [(&'static str, Token<'static>); N],
) -> [(&'static str, Token<'static>); N] {
    let mut i = 1;

    while i < N {
        let mut j = i;

        while j > 0 && !less_than(arr[j - 1].0, arr[j].0) {
            let tmp = arr[j - 1];
            arr[j - 1] = arr[j];
            arr[j] = tmp;
            j -= 1;
        }

        i += 1;
    }

    arr
}

const KEYWORDS: [(&str, Token<'static>); 33] = [
    ("return", Token::Return),
    ("fn", Token::Fn),
    ("let", Token::Let),
    ("const", Token::Const),
    ("drop", Token::Drop),
    ("drop_deep", Token::DropDeep),
    ("goto", Token::Goto),
    ("if", Token::If),
    ("switchInt", Token::SwitchInt),
    ("otherwise", Token::Otherwise),
    ("call", Token::Call),
    ("diverge", Token::Diverge),
    ("panic", Token::Panic),
    ("true", Token::BoolLit(true)),
    ("false", Token::BoolLit(false)),
    ("Add", Token::BinOp(BinOp::Add)),
    ("Sub", Token::BinOp(BinOp::Sub)),
    ("Mul", Token::BinOp(BinOp::Mul)),
    ("Div", Token::BinOp(BinOp::Div)),
    ("Rem", Token::BinOp(BinOp::Rem)),
    ("BitXor", Token::BinOp(BinOp::BitXor)),
    ("BitAnd", Token::BinOp(BinOp::BitAnd)),
    ("BitOr", Token::BinOp(BinOp::BitOr)),
    ("Shl", Token::BinOp(BinOp::Shl)),
    ("Shr", Token::BinOp(BinOp::Shr)),
    ("Eq", Token::BinOp(BinOp::Eq)),
    ("Lt", Token::BinOp(BinOp::Lt)),
    ("Le", Token::BinOp(BinOp::Le)),
    ("Ne", Token::BinOp(BinOp::Ne)),
    ("Ge", Token::BinOp(BinOp::Ge)),
    ("Gt", Token::BinOp(BinOp::Gt)),
    ("Not", Token::UnOp(UnOp::Not)),
    ("Neg", Token::UnOp(UnOp::Neg)),
];

const SORTED_KEYWORDS: [(&str, Token<'static>); 33] = sort_array(KEYWORDS);

#[derive(Clone)]
struct RawLex<'a> {
    source: &'a str,
    chars: Peekable<Bytes<'a>>,
    current: usize,
    line: usize,
    col: usize,
}

impl<'a> RawLex<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            current: 0,
            line: 1,
            col: 0,
            chars: source.bytes().peekable(),
        }
    }

    fn next(&mut self) -> Option<TokPair<'a>> {
        let ch = self.take_next()?;
        let start = self.current - 1;
        let col = self.col;
        let line = self.line;

        let tok = match ch {
            '#' => Token::Hash,
            '{' => Token::CurlyOpen,
            '}' => Token::CurlyClose,
            '(' => Token::ParenOpen,
            ')' => Token::ParenClose,
            '[' => Token::SquareOpen,
            ']' => Token::SquareClose,
            ':' => Token::Colon,
            ';' => Token::Semi,
            ',' => Token::Comma,
            '=' => Token::Eq,
            '"' => self.lex_string(),
            '-' => match self.peek_next() {
                Some('>') => {
                    self.consume_next();

                    Token::Arrow
                }
                Some(c) if c.is_ascii_digit() => self.lex_number(),
                _ => self.lex_unknown(start),
            },
            '0' if matches!(self.peek_next(), Some('x' | 'b' | 'o')) => self.lex_prefixed_int(),
            c if c.is_ascii_digit() => self.lex_number(),
            c if c.is_ascii_alphabetic() || c == '_' => self.lex_ident(),
            _ => self.lex_unknown(start),
        };

        let len = self.source[start..self.current].chars().count();

        Some(TokPair {
            tok,
            line: u32::try_from(line).unwrap_or(u32::MAX),
            col: u16::try_from(col).unwrap_or(u16::MAX),
            len: u16::try_from(len).unwrap_or(u16::MAX),
        })
    }

    // lexes an identifier where the first character has been consumed, then
    // figures out whether it's actually a keyword or a local
    fn lex_ident(&mut self) -> Token<'a> {
        let start = self.current - 1;

        self.consume_while(|c| c.is_ascii_alphanumeric() || c == '_');

        let full = &self.source[start..self.current];

        if let Ok(idx) = SORTED_KEYWORDS.binary_search_by_key(&full, |(s, _)| *s) {
            return SORTED_KEYWORDS[idx].1;
        }

        local_from_ident(full).unwrap_or(Token::Ident(full))
    }

    // lexes a decimal number where the first character (digit or `-`) has been consumed
    fn lex_number(&mut self) -> Token<'a> {
        let start = self.current - 1;

        self.consume_while(|c| c.is_ascii_digit());

        let mut is_float = false;

        if self.peek_next() == Some('.') {
            is_float = true;
            self.consume_next();
            self.consume_while(|c| c.is_ascii_digit());

            if self.peek_next() == Some('e') {
                self.consume_next();

                if self.peek_next() == Some('-') {
                    self.consume_next();
                }

                self.consume_while(|c| c.is_ascii_digit());
            }
        }

        if !is_float && self.peek_next() == Some('u') {
            self.consume_next();

            return Token::UintLit(&self.source[start..self.current]);
        }

        let full = &self.source[start..self.current];

        if is_float {
            Token::FloatLit(full)
        } else {
            Token::IntLit(full)
        }
    }

    // lexes `0x...`, `0b...` and `0o...` where the `0` has been consumed
    fn lex_prefixed_int(&mut self) -> Token<'a> {
        let start = self.current - 1;

        match self.consume_next() {
            Some('x') => self.consume_while(|c| c.is_ascii_hexdigit()),
            Some('b') => self.consume_while(|c| c == '0' || c == '1'),
            _ => self.consume_while(|c| ('0'..='7').contains(&c)),
        }

        if self.peek_next() == Some('u') {
            self.consume_next();

            return Token::UintLit(&self.source[start..self.current]);
        }

        Token::IntLit(&self.source[start..self.current])
    }

    // lexes a string where the opening `"` has been consumed, escapes are skipped
    // over but not interpreted
    fn lex_string(&mut self) -> Token<'a> {
        let start = self.current;

        loop {
            match self.consume_next() {
                Some('"') => return Token::StrLit(&self.source[start..self.current - 1]),
                Some('\\') => {
                    self.consume_next();
                }
                Some('\n') | None => return Token::Unknown(&self.source[start - 1..self.current]),
                Some(_) => {}
            }
        }
    }

    fn take_next(&mut self) -> Option<char> {
        while let Some(ch) = self.consume_next() {
            if ch.is_ascii_whitespace() {
                continue;
            }

            // `//` comments run until the end of the line
            if ch == '/' && self.peek_next() == Some('/') {
                while self.peek_next().is_some_and(|c| c != '\n') {
                    self.consume_next();
                }

                continue;
            }

            return Some(ch);
        }

        None
    }

    fn consume_next(&mut self) -> Option<char> {
        let ch = self.chars.next();

        if let Some(ch) = ch {
            // columns count characters, not bytes
            if ch == b'\n' {
                self.line += 1;
                self.col = 0;
            } else if !is_continuation(ch) {
                self.col += 1;
            }

            self.current += 1;
        }

        ch.map(|ch| ch as char)
    }

    fn consume_while(&mut self, f: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek_next() {
            if f(ch) {
                self.consume_next();
            } else {
                return;
            }
        }
    }

    #[inline]
    fn peek_next(&mut self) -> Option<char> {
        self.chars.peek().map(|&ch| ch as char)
    }

    // a stray character, a non-ASCII one is taken whole so the token always
    // lands on a char boundary
    fn lex_unknown(&mut self, start: usize) -> Token<'a> {
        while self.chars.peek().is_some_and(|&b| is_continuation(b)) {
            self.consume_next();
        }

        Token::Unknown(&self.source[start..self.current])
    }
}

#[inline]
fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

// `arg0`, `var12`, `tmp3` etc. are locals, not identifiers
fn local_from_ident(ident: &str) -> Option<Token<'_>> {
    let (prefix, digits) = ident.split_at(ident.len().min(3));

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let index = digits.parse::<u32>().ok()?;

    match prefix {
        "arg" => Some(Token::Arg(index)),
        "var" => Some(Token::Var(index)),
        "tmp" => Some(Token::Temp(index)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token<'_>> {
        let mut lex = Lex::new(source);
        let mut out = Vec::default();

        while let Some(pair) = lex.next_token() {
            out.push(pair.tok);
        }

        out
    }

    #[test]
    fn keywords_are_sorted() {
        for pair in SORTED_KEYWORDS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} >= {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn lex_assignment() {
        assert_eq!(
            tokens("tmp0 = Add(arg1, const -5);"),
            vec![
                Token::Temp(0),
                Token::Eq,
                Token::BinOp(BinOp::Add),
                Token::ParenOpen,
                Token::Arg(1),
                Token::Comma,
                Token::Const,
                Token::IntLit("-5"),
                Token::ParenClose,
                Token::Semi,
            ]
        );
    }

    #[test]
    fn lex_terminators() {
        assert_eq!(
            tokens("goto -> bb1; return = call fib(var0) -> exit;"),
            vec![
                Token::Goto,
                Token::Arrow,
                Token::Ident("bb1"),
                Token::Semi,
                Token::Return,
                Token::Eq,
                Token::Call,
                Token::Ident("fib"),
                Token::ParenOpen,
                Token::Var(0),
                Token::ParenClose,
                Token::Arrow,
                Token::Ident("exit"),
                Token::Semi,
            ]
        );
    }

    #[test]
    fn lex_literals() {
        assert_eq!(
            tokens(r#"42 42u 0xff 0b101u 3.25 1.0e-9 "a \"b\"" true"#),
            vec![
                Token::IntLit("42"),
                Token::UintLit("42u"),
                Token::IntLit("0xff"),
                Token::UintLit("0b101u"),
                Token::FloatLit("3.25"),
                Token::FloatLit("1.0e-9"),
                Token::StrLit(r#"a \"b\""#),
                Token::BoolLit(true),
            ]
        );
    }

    #[test]
    fn locals_need_digits() {
        assert_eq!(
            tokens("arg var tmp args var1x arg007"),
            vec![
                Token::Ident("arg"),
                Token::Ident("var"),
                Token::Ident("tmp"),
                Token::Ident("args"),
                Token::Ident("var1x"),
                Token::Arg(7),
            ]
        );
    }

    #[test]
    fn comments_and_positions() {
        let mut lex = Lex::new("// a comment\n  fn foo");
        let first = lex.next_token().unwrap();
        let second = lex.next_token().unwrap();

        assert_eq!(first.tok, Token::Fn);
        assert_eq!((first.line, first.col, first.len), (2, 3, 2));
        assert_eq!(second.tok, Token::Ident("foo"));
        assert_eq!((second.line, second.col, second.len), (2, 6, 3));
        assert!(lex.is_at_end());
    }

    #[test]
    fn unknown_tokens() {
        assert_eq!(
            tokens("- ? \"open"),
            vec![
                Token::Unknown("-"),
                Token::Unknown("?"),
                Token::Unknown("\"open"),
            ]
        );
    }

    #[test]
    fn non_ascii_is_one_unknown_token() {
        let mut lex = Lex::new("x = é;
λ");
        let toks: Vec<TokPair<'_>> = std::iter::from_fn(|| lex.next_token()).collect();

        assert_eq!(toks[2].tok, Token::Unknown("é"));
        assert_eq!((toks[2].line, toks[2].col, toks[2].len), (1, 5, 1));
        assert_eq!(toks[3].tok, Token::Semi);
        assert_eq!((toks[3].line, toks[3].col), (1, 6));
        assert_eq!(toks[4].tok, Token::Unknown("λ"));
        assert_eq!(toks.len(), 5);
    }

    #[test]
    fn huge_positions_saturate() {
        let source = format!("{}\"{}\"", " ".repeat(70_000), "a".repeat(70_000));
        let mut lex = Lex::new(&source);
        let pair = lex.next_token().unwrap();

        assert!(matches!(pair.tok, Token::StrLit(s) if s.len() == 70_000));
        assert_eq!((pair.line, pair.col, pair.len), (1, u16::MAX, u16::MAX));
    }
}
