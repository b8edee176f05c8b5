//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::analysis::verify_module;
use crate::arena::ArenaKey;
use crate::ir::*;
use crate::reader::{Lex, ParseError, ReadError, TokPair, Token};
use crate::utility::SaHashMap;
use smallvec::SmallVec;

type ParseResult<T> = Result<T, ParseError>;

/// Parses a string containing textual MIR.
///
/// The parser works in three passes over the token stream: one collecting
/// every function name (so calls can refer to functions defined later), then
/// for each function one collecting its block labels (so jumps can refer to
/// blocks defined later), and finally the real parse.
pub struct Parser<'a> {
    name: &'a str,
    lex: Lex<'a>,
    last: Option<TokPair<'a>>,
    functions: SaHashMap<&'a str, Func>,
    labels: SaHashMap<&'a str, Block>,
}

impl<'a> Parser<'a> {
    /// Creates a parser for a [`Module`] named `name`.
    ///
    /// `source` will be parsed into the module when [`Self::parse`] is called.
    pub fn new(name: &'a str, source: &'a str) -> Self {
        Self {
            name,
            lex: Lex::new(source),
            last: None,
            functions: SaHashMap::default(),
            labels: SaHashMap::default(),
        }
    }

    /// Parses the file. The module is *not* verified, see [`parse_mir`] for that.
    pub fn parse(mut self) -> ParseResult<Module> {
        let mut module = Module::new(self.name);

        self.collect_function_names()?;

        while !self.lex.is_at_end() {
            self.parse_function(&mut module)?;
        }

        Ok(module)
    }

    fn collect_function_names(&mut self) -> ParseResult<()> {
        let mut lex = self.lex.clone();
        let mut depth = 0usize;

        while let Some(pair) = lex.next_token() {
            match pair.tok {
                Token::CurlyOpen => depth += 1,
                Token::CurlyClose => depth = depth.saturating_sub(1),
                Token::Fn if depth == 0 => {
                    if let Some(TokPair {
                        tok: Token::Ident(name),
                        ..
                    }) = lex.peek_token()
                    {
                        let ident = lex.next_token().unwrap_or(pair);

                        if self.functions.contains_key(name) {
                            return Err(self.error_at(
                                ident,
                                format!("function `{name}` is defined more than once"),
                            ));
                        }

                        let func = Func::new(self.functions.len());

                        self.functions.insert(name, func);
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    // scans from just inside of a function's `{` to its `}` looking for `label: {`
    fn collect_labels(&mut self, b: &mut FuncBuilder<'_>) -> ParseResult<()> {
        let mut lex = self.lex.clone();
        let mut depth = 0usize;

        self.labels.clear();

        while let Some(pair) = lex.next_token() {
            match pair.tok {
                Token::CurlyOpen => depth += 1,
                Token::CurlyClose if depth == 0 => break,
                Token::CurlyClose => depth -= 1,
                Token::Ident(label)
                    if depth == 0
                        && matches!(lex.peek_token(), Some(TokPair { tok: Token::Colon, .. })) =>
                {
                    if self.labels.contains_key(label) {
                        return Err(
                            self.error_at(pair, format!("block `{label}` is defined more than once"))
                        );
                    }

                    let block = b.create_block();

                    self.labels.insert(label, block);
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn parse_function(&mut self, module: &mut Module) -> ParseResult<()> {
        let mut attrs = Vec::default();

        while self.peek_is(Token::Hash) {
            attrs.push(self.parse_attribute()?);
        }

        self.expect(Token::Fn, "expected `fn`")?;

        let (name, _) = self.expect_ident("expected a function name")?;
        let num_args = self.parse_params()?;
        let open = self.expect(Token::CurlyOpen, "expected `{` to begin function body")?;
        let func = module.declare_function(name, attrs);

        debug_assert_eq!(self.functions.get(name).copied(), Some(func));

        let mut b = module.define_existing_function(func, num_args);

        self.parse_decls(&mut b)?;
        self.collect_labels(&mut b)?;

        if self.labels.is_empty() {
            return Err(self.error_at(open, format!("function `{name}` has no basic blocks")));
        }

        while !self.peek_is(Token::CurlyClose) {
            self.parse_block(&mut b)?;
        }

        let close = self.expect(Token::CurlyClose, "expected `}` to end function body")?;

        b.define()
            .map(|_| ())
            .map_err(|err| self.error_at(close, err.to_string()))
    }

    // `(arg0, arg1, ...)`, returns the number of arguments
    fn parse_params(&mut self) -> ParseResult<u32> {
        let mut num_args = 0;

        self.expect(Token::ParenOpen, "expected `(` to begin parameter list")?;

        if self.peek_is(Token::ParenClose) {
            self.next();

            return Ok(0);
        }

        loop {
            let pair = self.next_or_eof("expected a parameter")?;

            match pair.tok {
                Token::Arg(i) if i == num_args => num_args += 1,
                _ => {
                    return Err(self.error_at(pair, format!("expected parameter `arg{num_args}`")))
                }
            }

            let pair = self.next_or_eof("expected `,` or `)`")?;

            match pair.tok {
                Token::Comma => continue,
                Token::ParenClose => return Ok(num_args),
                _ => return Err(self.error_at(pair, "expected `,` or `)`")),
            }
        }
    }

    // `let var0; let tmp0; ...`, each kind must be declared in order
    fn parse_decls(&mut self, b: &mut FuncBuilder<'_>) -> ParseResult<()> {
        let (mut vars, mut temps) = (0, 0);

        while self.peek_is(Token::Let) {
            self.next();

            let pair = self.next_or_eof("expected a local to declare")?;

            match pair.tok {
                Token::Var(i) if i == vars => {
                    vars += 1;
                    b.declare_var();
                }
                Token::Temp(i) if i == temps => {
                    temps += 1;
                    b.declare_temp();
                }
                Token::Var(_) => {
                    return Err(self.error_at(pair, format!("expected `var{vars}` to be declared next")))
                }
                Token::Temp(_) => {
                    return Err(
                        self.error_at(pair, format!("expected `tmp{temps}` to be declared next"))
                    )
                }
                _ => return Err(self.error_at(pair, "expected `varN` or `tmpN`")),
            }

            self.expect(Token::Semi, "expected `;` after declaration")?;
        }

        Ok(())
    }

    fn parse_attribute(&mut self) -> ParseResult<Attribute> {
        self.expect(Token::Hash, "expected `#`")?;
        self.expect(Token::SquareOpen, "expected `[` after `#`")?;

        let (name, _) = self.expect_ident("expected an attribute name")?;
        let mut attr = Attribute::new(name);

        if self.peek_is(Token::ParenOpen) {
            self.next();

            loop {
                let (key, _) = self.expect_ident("expected an attribute argument name")?;

                self.expect(Token::Eq, "expected `=` after attribute argument name")?;

                let value = self.parse_string("expected a string for the attribute argument")?;

                attr = attr.with_arg(key, &value);

                let pair = self.next_or_eof("expected `,` or `)`")?;

                match pair.tok {
                    Token::Comma => continue,
                    Token::ParenClose => break,
                    _ => return Err(self.error_at(pair, "expected `,` or `)`")),
                }
            }
        }

        self.expect(Token::SquareClose, "expected `]` to close attribute")?;

        Ok(attr)
    }

    fn parse_block(&mut self, b: &mut FuncBuilder<'_>) -> ParseResult<()> {
        let (label, pair) = self.expect_ident("expected a block label")?;
        let block = match self.labels.get(label) {
            Some(block) => *block,
            None => return Err(self.error_at(pair, format!("unknown block label `{label}`"))),
        };

        self.expect(Token::Colon, "expected `:` after block label")?;
        self.expect(Token::CurlyOpen, "expected `{` to begin block")?;

        b.switch_to(block);

        while !self.parse_statement(b)? {}

        self.expect(Token::CurlyClose, "expected `}` after terminator")?;

        Ok(())
    }

    // parses a statement or a terminator, returning `true` if it was a terminator
    fn parse_statement(&mut self, b: &mut FuncBuilder<'_>) -> ParseResult<bool> {
        let pair = self.peek_or_eof("expected a statement or terminator")?;
        let debug = DebugInfo::new(pair.line, pair.col as u32);

        match pair.tok {
            Token::Drop | Token::DropDeep => {
                let kind = match self.next_or_eof("expected `drop`")?.tok {
                    Token::DropDeep => DropKind::Deep,
                    _ => DropKind::Free,
                };

                self.expect(Token::ParenOpen, "expected `(` after drop")?;

                let lvalue = self.parse_lvalue()?;

                self.expect(Token::ParenClose, "expected `)` after dropped lvalue")?;
                self.expect(Token::Semi, "expected `;` after statement")?;

                b.drop(kind, lvalue, debug);

                Ok(false)
            }
            Token::Return => {
                self.next();

                if self.peek_is(Token::Semi) {
                    self.next();
                    b.ret(debug);

                    return Ok(true);
                }

                self.parse_assign_or_call(b, Lvalue::ReturnPointer, debug)
            }
            Token::Arg(_) | Token::Var(_) | Token::Temp(_) => {
                let lvalue = self.parse_lvalue()?;

                self.parse_assign_or_call(b, lvalue, debug)
            }
            Token::Goto => {
                self.next();
                self.expect(Token::Arrow, "expected `->` after `goto`")?;

                let target = self.parse_target()?;

                self.expect(Token::Semi, "expected `;` after terminator")?;
                b.goto(target, debug);

                Ok(true)
            }
            Token::If => {
                self.next();
                self.parse_if(b, debug)?;

                Ok(true)
            }
            Token::SwitchInt => {
                self.next();
                self.parse_switch_int(b, debug)?;

                Ok(true)
            }
            Token::Diverge => {
                self.next();
                self.expect(Token::Semi, "expected `;` after terminator")?;
                b.diverge(debug);

                Ok(true)
            }
            Token::Panic => {
                self.next();
                self.expect(Token::Arrow, "expected `->` after `panic`")?;

                let target = self.parse_target()?;

                self.expect(Token::Semi, "expected `;` after terminator")?;
                b.panic(target, debug);

                Ok(true)
            }
            _ => Err(self.error_at(pair, "expected a statement or terminator")),
        }
    }

    // everything after `lvalue` in `lvalue = rvalue;` or `lvalue = call f(...) -> bb;`
    fn parse_assign_or_call(
        &mut self,
        b: &mut FuncBuilder<'_>,
        lvalue: Lvalue,
        debug: DebugInfo,
    ) -> ParseResult<bool> {
        self.expect(Token::Eq, "expected `=` after lvalue")?;

        if !self.peek_is(Token::Call) {
            let rvalue = self.parse_rvalue()?;

            self.expect(Token::Semi, "expected `;` after statement")?;
            b.assign(lvalue, rvalue, debug);

            return Ok(false);
        }

        self.next();

        let func = self.parse_callee()?;
        let mut args = SmallVec::<[Operand; 4]>::new();

        self.expect(Token::ParenOpen, "expected `(` to begin argument list")?;

        if self.peek_is(Token::ParenClose) {
            self.next();
        } else {
            loop {
                args.push(self.parse_operand()?);

                let pair = self.next_or_eof("expected `,` or `)`")?;

                match pair.tok {
                    Token::Comma => continue,
                    Token::ParenClose => break,
                    _ => return Err(self.error_at(pair, "expected `,` or `)`")),
                }
            }
        }

        self.expect(Token::Arrow, "expected `->` after call")?;

        let target = self.parse_target()?;

        self.expect(Token::Semi, "expected `;` after terminator")?;
        b.call(lvalue, func, &args, target, debug);

        Ok(true)
    }

    // `(cond) -> [true: bbA, false: bbB];`
    fn parse_if(&mut self, b: &mut FuncBuilder<'_>, debug: DebugInfo) -> ParseResult<()> {
        self.expect(Token::ParenOpen, "expected `(` after `if`")?;

        let cond = self.parse_operand()?;

        self.expect(Token::ParenClose, "expected `)` after condition")?;
        self.expect(Token::Arrow, "expected `->` after condition")?;
        self.expect(Token::SquareOpen, "expected `[` to begin targets")?;
        self.expect(Token::BoolLit(true), "expected `true`")?;
        self.expect(Token::Colon, "expected `:` after `true`")?;

        let then = self.parse_target()?;

        self.expect(Token::Comma, "expected `,` between targets")?;
        self.expect(Token::BoolLit(false), "expected `false`")?;
        self.expect(Token::Colon, "expected `:` after `false`")?;

        let otherwise = self.parse_target()?;

        self.expect(Token::SquareClose, "expected `]` to end targets")?;
        self.expect(Token::Semi, "expected `;` after terminator")?;

        b.branch(cond, then, otherwise, debug);

        Ok(())
    }

    // `(discr) -> [1: bbA, 2: bbB, otherwise: bbC];`
    fn parse_switch_int(&mut self, b: &mut FuncBuilder<'_>, debug: DebugInfo) -> ParseResult<()> {
        self.expect(Token::ParenOpen, "expected `(` after `switchInt`")?;

        let discr = self.parse_lvalue()?;

        self.expect(Token::ParenClose, "expected `)` after discriminant")?;
        self.expect(Token::Arrow, "expected `->` after discriminant")?;
        self.expect(Token::SquareOpen, "expected `[` to begin targets")?;

        let mut cases = Vec::default();
        let mut otherwise = None;

        loop {
            let pair = self.peek_or_eof("expected a switch case or `]`")?;

            match pair.tok {
                Token::SquareClose => {
                    self.next();
                    break;
                }
                Token::Otherwise => {
                    self.next();
                    self.expect(Token::Colon, "expected `:` after `otherwise`")?;
                    otherwise = Some(self.parse_target()?);
                    self.expect(Token::SquareClose, "expected `]` after `otherwise` target")?;
                    break;
                }
                _ => {
                    let value = self.parse_const_val()?;

                    self.expect(Token::Colon, "expected `:` after switch value")?;
                    cases.push((value, self.parse_target()?));

                    if self.peek_is(Token::Comma) {
                        self.next();
                    } else {
                        self.expect(Token::SquareClose, "expected `,` or `]`")?;
                        break;
                    }
                }
            }
        }

        self.expect(Token::Semi, "expected `;` after terminator")?;

        b.switch_int(discr, &cases, otherwise, debug);

        Ok(())
    }

    fn parse_target(&mut self) -> ParseResult<Block> {
        let (label, pair) = self.expect_ident("expected a block label")?;

        match self.labels.get(label) {
            Some(block) => Ok(*block),
            None => Err(self.error_at(pair, format!("unknown block label `{label}`"))),
        }
    }

    fn parse_rvalue(&mut self) -> ParseResult<Rvalue> {
        match self.peek().map(|pair| pair.tok) {
            Some(Token::BinOp(op)) => {
                self.next();
                self.expect(Token::ParenOpen, "expected `(` after operator")?;

                let lhs = self.parse_operand()?;

                self.expect(Token::Comma, "expected `,` between operands")?;

                let rhs = self.parse_operand()?;

                self.expect(Token::ParenClose, "expected `)` after operands")?;

                Ok(Rvalue::BinaryOp(op, lhs, rhs))
            }
            Some(Token::UnOp(op)) => {
                self.next();
                self.expect(Token::ParenOpen, "expected `(` after operator")?;

                let operand = self.parse_operand()?;

                self.expect(Token::ParenClose, "expected `)` after operand")?;

                Ok(Rvalue::UnaryOp(op, operand))
            }
            _ => Ok(Rvalue::Use(self.parse_operand()?)),
        }
    }

    // the callee can be written as a bare function name
    fn parse_callee(&mut self) -> ParseResult<Operand> {
        match self.peek() {
            Some(TokPair {
                tok: Token::Ident(_),
                ..
            }) => Ok(Operand::Constant(self.parse_literal()?)),
            _ => self.parse_operand(),
        }
    }

    fn parse_operand(&mut self) -> ParseResult<Operand> {
        let pair = self.peek_or_eof("expected an operand")?;

        match pair.tok {
            Token::Const => {
                self.next();

                Ok(Operand::Constant(self.parse_literal()?))
            }
            Token::Return | Token::Arg(_) | Token::Var(_) | Token::Temp(_) => {
                Ok(Operand::Consume(self.parse_lvalue()?))
            }
            _ => Err(self.error_at(pair, "expected an operand")),
        }
    }

    fn parse_literal(&mut self) -> ParseResult<Literal> {
        let pair = self.peek_or_eof("expected a constant")?;

        if let Token::Ident(name) = pair.tok {
            self.next();

            return match self.functions.get(name) {
                Some(func) => Ok(Literal::Item(*func)),
                None => Err(self.error_at(pair, format!("unknown function `{name}`"))),
            };
        }

        Ok(Literal::Value(self.parse_const_val()?))
    }

    fn parse_const_val(&mut self) -> ParseResult<ConstVal> {
        let pair = self.next_or_eof("expected a constant")?;

        let value = match pair.tok {
            Token::IntLit(lit) => int_from_lit(lit).map(ConstVal::Int),
            Token::UintLit(lit) => u64_from_lit(lit.trim_end_matches('u')).map(ConstVal::Uint),
            Token::FloatLit(lit) => lit.parse::<f64>().ok().map(ConstVal::Float),
            Token::StrLit(lit) => unescape(lit).map(ConstVal::Str),
            Token::BoolLit(b) => Some(ConstVal::Bool(b)),
            _ => return Err(self.error_at(pair, "expected a constant")),
        };

        value.ok_or_else(|| self.error_at(pair, "invalid literal"))
    }

    fn parse_lvalue(&mut self) -> ParseResult<Lvalue> {
        let pair = self.next_or_eof("expected an lvalue")?;

        match pair.tok {
            Token::Return => Ok(Lvalue::ReturnPointer),
            Token::Arg(i) => Ok(Lvalue::Arg(i)),
            Token::Var(i) => Ok(Lvalue::Var(i)),
            Token::Temp(i) => Ok(Lvalue::Temp(i)),
            _ => Err(self.error_at(pair, "expected an lvalue")),
        }
    }

    fn parse_string(&mut self, message: &str) -> ParseResult<String> {
        let pair = self.next_or_eof(message)?;

        match pair.tok {
            Token::StrLit(lit) => {
                unescape(lit).ok_or_else(|| self.error_at(pair, "invalid escape in string"))
            }
            _ => Err(self.error_at(pair, message)),
        }
    }

    fn next(&mut self) -> Option<TokPair<'a>> {
        let pair = self.lex.next_token();

        if pair.is_some() {
            self.last = pair;
        }

        pair
    }

    fn peek(&self) -> Option<TokPair<'a>> {
        self.lex.peek_token()
    }

    fn peek_is(&self, tok: Token<'_>) -> bool {
        self.peek().is_some_and(|pair| pair.tok == tok)
    }

    fn peek_or_eof(&self, message: &str) -> ParseResult<TokPair<'a>> {
        self.peek().ok_or_else(|| self.eof_error(message))
    }

    fn next_or_eof(&mut self, message: &str) -> ParseResult<TokPair<'a>> {
        self.next().ok_or_else(|| self.eof_error(message))
    }

    fn expect(&mut self, tok: Token<'_>, message: &str) -> ParseResult<TokPair<'a>> {
        let pair = self.next_or_eof(message)?;

        if pair.tok == tok {
            Ok(pair)
        } else {
            Err(self.error_at(pair, message))
        }
    }

    fn expect_ident(&mut self, message: &str) -> ParseResult<(&'a str, TokPair<'a>)> {
        let pair = self.next_or_eof(message)?;

        match pair.tok {
            Token::Ident(ident) => Ok((ident, pair)),
            _ => Err(self.error_at(pair, message)),
        }
    }

    fn error_at(&self, pair: TokPair<'_>, message: impl Into<String>) -> ParseError {
        let message = match pair.tok {
            Token::Unknown(tok) => format!("{}, found invalid token `{tok}`", message.into()),
            _ => message.into(),
        };

        ParseError {
            line: pair.line,
            col: pair.col,
            len: pair.len,
            message,
        }
    }

    // EOF errors point just past the last token that was read
    fn eof_error(&self, message: &str) -> ParseError {
        let (line, col) = match self.last {
            Some(pair) => (pair.line, pair.col.saturating_add(pair.len)),
            None => (1, 1),
        };

        ParseError {
            line,
            col,
            len: 0,
            message: message.to_owned(),
        }
    }
}

fn u64_from_lit(lit: &str) -> Option<u64> {
    if let Some(hex) = lit.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = lit.strip_prefix("0b") {
        u64::from_str_radix(bin, 2).ok()
    } else if let Some(oct) = lit.strip_prefix("0o") {
        u64::from_str_radix(oct, 8).ok()
    } else {
        lit.parse::<u64>().ok()
    }
}

// decimal literals must fit in an `i64`, prefixed literals are treated as a bit
// pattern so `0xffffffffffffffff` is `-1`
fn int_from_lit(lit: &str) -> Option<i64> {
    if let Some(magnitude) = lit.strip_prefix('-') {
        let magnitude = u64_from_lit(magnitude)?;

        return 0i64.checked_sub_unsigned(magnitude);
    }

    let value = u64_from_lit(lit)?;

    if lit.starts_with("0x") || lit.starts_with("0b") || lit.starts_with("0o") {
        Some(value as i64)
    } else {
        i64::try_from(value).ok()
    }
}

/// Resolves the escapes `\n`, `\t`, `\0`, `\\` and `\"` in a string literal.
pub(crate) fn unescape(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        out.push(match chars.next()? {
            'n' => '\n',
            't' => '\t',
            '0' => '\0',
            '\\' => '\\',
            '"' => '"',
            _ => return None,
        });
    }

    Some(out)
}

/// Parses and verifies a string of textual MIR. `name` becomes the name of the module.
///
/// ```
/// let module = miri::parse_mir("example", r#"
///     #[miri_run(expected = "Int(3)")]
///     fn three() {
///         bb0: {
///             return = Add(const 1, const 2);
///             return;
///         }
///     }
/// "#).unwrap();
///
/// assert!(module.find_function_by_name("three").is_some());
/// ```
pub fn parse_mir(name: &str, source: &str) -> Result<Module, ReadError> {
    let module = Parser::new(name, source).parse()?;

    verify_module(&module).map_err(ReadError::Verify)?;

    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Module {
        match parse_mir("test", source) {
            Ok(module) => module,
            Err(err) => panic!("{}", err.render("test", source)),
        }
    }

    fn parse_err(source: &str) -> ParseError {
        match parse_mir("test", source) {
            Err(ReadError::Parse(err)) => err,
            Err(err) => panic!("expected a parse error, got: {err}"),
            Ok(_) => panic!("expected a parse error, but the source parsed"),
        }
    }

    #[test]
    fn parse_simple_function() {
        let module = parse(
            r#"
            #[miri_run(expected = "Int(3)")]
            fn add(arg0, arg1) {
                let var0;
                let tmp0;

                bb0: {
                    tmp0 = Add(arg0, arg1);
                    var0 = tmp0;
                    drop(var0);
                    return = var0;
                    return;
                }
            }
            "#,
        );

        let f = module.find_function_by_name("add").unwrap();
        let func = module.function(f);
        let body = func.body();
        let bb0 = body.block(START_BLOCK).unwrap();

        assert_eq!(
            func.find_attr(MIRI_RUN).and_then(|a| a.value_str(EXPECTED)),
            Some("Int(3)")
        );
        assert_eq!((body.num_args(), body.num_vars(), body.num_temps()), (2, 1, 1));
        assert_eq!(bb0.statements.len(), 4);
        assert_eq!(
            bb0.statements[0].kind,
            StatementKind::Assign(
                Lvalue::Temp(0),
                Rvalue::BinaryOp(
                    BinOp::Add,
                    Operand::Consume(Lvalue::Arg(0)),
                    Operand::Consume(Lvalue::Arg(1))
                )
            )
        );
        assert_eq!(
            bb0.statements[2].kind,
            StatementKind::Drop(DropKind::Free, Lvalue::Var(0))
        );
        assert_eq!(bb0.statements[0].debug, DebugInfo::new(8, 21));
        assert_eq!(bb0.terminator.kind, TerminatorKind::Return);
    }

    #[test]
    fn forward_references_resolve() {
        let module = parse(
            r#"
            fn first() {
                bb0: {
                    return = call second(const 1) -> bb1;
                }

                bb1: {
                    goto -> bb2;
                }

                bb2: {
                    return;
                }
            }

            fn second(arg0) {
                bb0: {
                    return = arg0;
                    return;
                }
            }
            "#,
        );

        let first = module.find_function_by_name("first").unwrap();
        let second = module.find_function_by_name("second").unwrap();
        let body = module.function(first).body();
        let (_, entry) = body.blocks().next().unwrap();

        match &entry.terminator.kind {
            TerminatorKind::Call {
                destination,
                func,
                args,
                target,
            } => {
                assert_eq!(*destination, Lvalue::ReturnPointer);
                assert_eq!(*func, Operand::item(second));
                assert_eq!(args.as_slice(), &[Operand::int(1)]);
                assert_eq!(target.index(), 1);
            }
            other => panic!("expected a call, got {other:?}"),
        }
    }

    #[test]
    fn blocks_keep_definition_order() {
        let module = parse(
            r#"
            fn f(arg0) {
                entry: {
                    switchInt(arg0) -> [1: two, 2: one, otherwise: one];
                }

                one: {
                    return;
                }

                two: {
                    if(const true) -> [true: one, false: two];
                }
            }
            "#,
        );

        let f = module.find_function_by_name("f").unwrap();
        let body = module.function(f).body();
        let entry = body.block(START_BLOCK).unwrap();

        assert_eq!(
            entry.terminator.kind.successors().as_slice(),
            &[Block::new(2), Block::new(1), Block::new(1)]
        );
        assert!(entry.terminator.kind.has_otherwise());
    }

    #[test]
    fn literals() {
        let module = parse(
            r#"
            fn f() {
                let tmp0;

                bb0: {
                    tmp0 = const -9223372036854775808;
                    tmp0 = const 0xffffffffffffffff;
                    tmp0 = const 18446744073709551615u;
                    tmp0 = const 2.5;
                    tmp0 = const "a\n\"b\"";
                    tmp0 = const f;
                    return;
                }
            }
            "#,
        );

        let f = module.find_function_by_name("f").unwrap();
        let body = module.function(f).body();
        let values: Vec<Rvalue> = body
            .block(START_BLOCK)
            .unwrap()
            .statements
            .iter()
            .map(|stmt| match &stmt.kind {
                StatementKind::Assign(_, rvalue) => rvalue.clone(),
                other => panic!("unexpected statement {other:?}"),
            })
            .collect();

        let constant = |c: ConstVal| Rvalue::Use(Operand::Constant(Literal::Value(c)));

        assert_eq!(values[0], constant(ConstVal::Int(i64::MIN)));
        assert_eq!(values[1], constant(ConstVal::Int(-1)));
        assert_eq!(values[2], constant(ConstVal::Uint(u64::MAX)));
        assert_eq!(values[3], constant(ConstVal::Float(2.5)));
        assert_eq!(values[4], constant(ConstVal::Str("a\n\"b\"".to_owned())));
        assert_eq!(values[5], Rvalue::Use(Operand::item(f)));
    }

    #[test]
    fn duplicate_function() {
        let err = parse_err("fn f() { bb0: { return; } }\nfn f() { bb0: { return; } }");

        assert_eq!((err.line, err.col), (2, 4));
        assert!(err.message.contains("defined more than once"));
    }

    #[test]
    fn unknown_label() {
        let err = parse_err("fn f() {\n    bb0: {\n        goto -> nowhere;\n    }\n}");

        assert_eq!((err.line, err.col, err.len), (3, 17, 7));
        assert_eq!(err.message, "unknown block label `nowhere`");
    }

    #[test]
    fn out_of_order_params() {
        let err = parse_err("fn f(arg1) { bb0: { return; } }");

        assert_eq!(err.message, "expected parameter `arg0`");
    }

    #[test]
    fn out_of_range_literal() {
        let err = parse_err("fn f() { bb0: { return = const 9223372036854775808; return; } }");

        assert_eq!(err.message, "invalid literal");
    }

    #[test]
    fn no_blocks() {
        let err = parse_err("fn f() { let var0; }");

        assert_eq!(err.message, "function `f` has no basic blocks");
    }

    #[test]
    fn missing_terminator() {
        let err = parse_err("fn f() { bb0: { return = const 1; } }");

        assert_eq!(err.message, "expected a statement or terminator");
    }

    #[test]
    fn eof_inside_function() {
        let err = parse_err("fn f() { bb0: { return;");

        assert_eq!(err.len, 0);
        assert_eq!(err.message, "expected `}` after terminator");
    }

    #[test]
    fn invalid_token() {
        let err = parse_err("fn f() { bb0: { return = ?; return; } }");

        assert_eq!(err.message, "expected an operand, found invalid token `?`");
    }

    #[test]
    fn non_ascii_operand() {
        let result = parse_mir("test", "fn f() { bb0: { return = é; return; } }");

        match result {
            Err(ReadError::Parse(err)) => {
                assert_eq!((err.line, err.col, err.len), (1, 26, 1));
                assert_eq!(err.message, "expected an operand, found invalid token `é`");
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn verifier_runs_after_parse() {
        let result = parse_mir("test", "fn f() {\n    bb0: {\n        return = var3;\n        return;\n    }\n}");

        match result {
            Err(ReadError::Verify(issues)) => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].1, DebugInfo::new(3, 9));
            }
            other => panic!("expected a verifier error, got {other:?}"),
        }
    }
}
