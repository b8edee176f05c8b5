//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::arena::ArenaMap;
use crate::ir::*;
use std::ops::Range;

/// A MIR -> text pass that takes in an entire module, turns it into textual
/// MIR, and remembers which range of that text each function occupies.
///
/// The output is always accepted by [`parse_mir`](crate::parse_mir), and
/// re-stringifying the parsed result produces exactly the same text.
#[derive(Debug, Clone)]
pub struct ModuleWriter {
    whole: String,
    func_ranges: ArenaMap<Func, Range<usize>>,
}

impl ModuleWriter {
    /// Stringifies every function in `module`.
    pub fn new(module: &Module) -> Self {
        let mut writer_impl = WriterImpl {
            module,
            state: ModuleWriter {
                whole: String::default(),
                func_ranges: ArenaMap::default(),
            },
        };

        writer_impl.walk();

        writer_impl.state
    }

    /// Stringifies a whole function. This includes attributes, the header,
    /// every declaration and every block.
    pub fn func(&self, func: Func) -> &str {
        &self.whole[self.func_ranges[func].clone()]
    }

    /// Returns the entire module as a string.
    pub fn module(&self) -> &str {
        &self.whole
    }
}

/// Turns an entire module into textual MIR.
pub fn stringify_module(module: &Module) -> String {
    ModuleWriter::new(module).whole
}

/// Prints an entire module to `stdout`.
pub fn print_module(module: &Module) {
    print!("{}", ModuleWriter::new(module).module());
}

pub(crate) fn stringify_lvalue(lvalue: Lvalue) -> String {
    match lvalue {
        Lvalue::ReturnPointer => "return".to_owned(),
        Lvalue::Arg(i) => format!("arg{i}"),
        Lvalue::Var(i) => format!("var{i}"),
        Lvalue::Temp(i) => format!("tmp{i}"),
    }
}

pub(crate) fn stringify_const(value: &ConstVal) -> String {
    match value {
        ConstVal::Int(i) => i.to_string(),
        ConstVal::Uint(u) => format!("{u}u"),
        ConstVal::Float(f) => stringify_float(*f),
        ConstVal::Str(s) => format!("\"{}\"", escape(s)),
        ConstVal::Bool(b) => b.to_string(),
    }
}

pub(crate) fn stringify_operand(module: &Module, operand: &Operand) -> String {
    match operand {
        Operand::Consume(lvalue) => stringify_lvalue(*lvalue),
        Operand::Constant(Literal::Value(value)) => format!("const {}", stringify_const(value)),
        Operand::Constant(Literal::Item(func)) => format!("const {}", func_name(module, *func)),
    }
}

pub(crate) fn stringify_rvalue(module: &Module, rvalue: &Rvalue) -> String {
    match rvalue {
        Rvalue::Use(operand) => stringify_operand(module, operand),
        Rvalue::BinaryOp(op, lhs, rhs) => {
            let lhs = stringify_operand(module, lhs);
            let rhs = stringify_operand(module, rhs);

            format!("{}({lhs}, {rhs})", op.name())
        }
        Rvalue::UnaryOp(op, operand) => {
            format!("{}({})", op.name(), stringify_operand(module, operand))
        }
    }
}

pub(crate) fn stringify_statement(module: &Module, stmt: &Statement) -> String {
    match &stmt.kind {
        StatementKind::Assign(lvalue, rvalue) => format!(
            "{} = {}",
            stringify_lvalue(*lvalue),
            stringify_rvalue(module, rvalue)
        ),
        StatementKind::Drop(DropKind::Free, lvalue) => {
            format!("drop({})", stringify_lvalue(*lvalue))
        }
        StatementKind::Drop(DropKind::Deep, lvalue) => {
            format!("drop_deep({})", stringify_lvalue(*lvalue))
        }
    }
}

pub(crate) fn stringify_terminator(module: &Module, term: &Terminator) -> String {
    match &term.kind {
        TerminatorKind::Return => "return".to_owned(),
        TerminatorKind::Goto { target } => format!("goto -> {target}"),
        TerminatorKind::If { cond, targets } => format!(
            "if({}) -> [true: {}, false: {}]",
            stringify_operand(module, cond),
            targets[0],
            targets[1]
        ),
        TerminatorKind::SwitchInt {
            discr,
            values,
            targets,
        } => {
            let mut cases = values
                .iter()
                .zip(targets.iter())
                .map(|(value, target)| format!("{}: {target}", stringify_const(value)))
                .collect::<Vec<_>>();

            if let Some(otherwise) = targets.get(values.len()) {
                cases.push(format!("otherwise: {otherwise}"));
            }

            format!(
                "switchInt({}) -> [{}]",
                stringify_lvalue(*discr),
                cases.join(", ")
            )
        }
        TerminatorKind::Call {
            destination,
            func,
            args,
            target,
        } => {
            let callee = match func {
                Operand::Constant(Literal::Item(f)) => func_name(module, *f),
                other => stringify_operand(module, other),
            };

            let args = args
                .iter()
                .map(|arg| stringify_operand(module, arg))
                .collect::<Vec<_>>()
                .join(", ");

            format!(
                "{} = call {callee}({args}) -> {target}",
                stringify_lvalue(*destination)
            )
        }
        TerminatorKind::Diverge => "diverge".to_owned(),
        TerminatorKind::Panic { target } => format!("panic -> {target}"),
    }
}

fn func_name(module: &Module, func: Func) -> String {
    match module.get_function(func) {
        Some(f) => f.name().to_owned(),
        None => func.to_string(),
    }
}

// `{:?}` keeps the `.0` on whole floats, but uses `1e-9` style exponents that
// need a `.0` added to stay lexable
fn stringify_float(value: f64) -> String {
    let s = format!("{value:?}");

    match s.find('e') {
        Some(e) if !s[..e].contains('.') => format!("{}.0{}", &s[..e], &s[e..]),
        _ => s,
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());

    for c in s.chars() {
        match c {
            '\\' => out += "\\\\",
            '"' => out += "\\\"",
            '\n' => out += "\\n",
            '\t' => out += "\\t",
            '\0' => out += "\\0",
            c => out.push(c),
        }
    }

    out
}

struct WriterImpl<'m> {
    module: &'m Module,
    state: ModuleWriter,
}

impl<'m> WriterImpl<'m> {
    fn walk(&mut self) {
        let mut it = self.module.functions();

        // if we have any functions at all, print first one without leading \n
        if let Some(func) = it.next() {
            self.visit_func(func);
        }

        // for any remaining functions, print a newline to split them up
        // then print the function
        for func in it {
            self.state.whole += "\n";

            self.visit_func(func);
        }
    }

    fn visit_func(&mut self, func: Func) {
        let begin = self.state.whole.len();
        let f = self.module.function(func);
        let body = f.body();

        for attr in f.attrs() {
            self.visit_attr(attr);
        }

        let params = (0..body.num_args())
            .map(|i| format!("arg{i}"))
            .collect::<Vec<_>>()
            .join(", ");

        self.state.whole += &format!("fn {}({params}) {{\n", f.name());

        for i in 0..body.num_vars() {
            self.state.whole += &format!("    let var{i};\n");
        }

        for i in 0..body.num_temps() {
            self.state.whole += &format!("    let tmp{i};\n");
        }

        if body.num_vars() + body.num_temps() != 0 {
            self.state.whole += "\n";
        }

        let mut blocks = body.blocks().peekable();

        while let Some((bb, data)) = blocks.next() {
            self.visit_block(bb, data);

            if blocks.peek().is_some() {
                self.state.whole += "\n";
            }
        }

        self.state.whole += "}\n";

        let end = self.state.whole.len();
        let key = self.state.func_ranges.insert(begin..end);

        debug_assert_eq!(key, func);
    }

    fn visit_attr(&mut self, attr: &Attribute) {
        self.state.whole += &format!("#[{}", attr.name());

        if !attr.args().is_empty() {
            let args = attr
                .args()
                .iter()
                .map(|(key, value)| format!("{key} = \"{}\"", escape(value)))
                .collect::<Vec<_>>()
                .join(", ");

            self.state.whole += &format!("({args})");
        }

        self.state.whole += "]\n";
    }

    fn visit_block(&mut self, bb: Block, data: &BasicBlockData) {
        self.state.whole += &format!("    {bb}: {{\n");

        for stmt in data.statements.iter() {
            let text = stringify_statement(self.module, stmt);

            self.state.whole += &format!("        {text};\n");
        }

        let text = stringify_terminator(self.module, &data.terminator);

        self.state.whole += &format!("        {text};\n    }}\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_mir;

    const CANONICAL: &str = r#"#[miri_run(expected = "Int(120)")]
fn factorial(arg0) {
    let var0;
    let tmp0;
    let tmp1;

    bb0: {
        tmp0 = Le(arg0, const 1);
        if(tmp0) -> [true: bb1, false: bb2];
    }

    bb1: {
        return = const 1;
        return;
    }

    bb2: {
        tmp1 = Sub(arg0, const 1);
        var0 = call factorial(tmp1) -> bb3;
    }

    bb3: {
        return = Mul(arg0, var0);
        drop(var0);
        drop_deep(tmp1);
        return;
    }
}

#[miri_run]
fn misc() {
    let tmp0;

    bb0: {
        tmp0 = const "a \"quoted\"\n\tstring";
        tmp0 = const 1.5;
        tmp0 = const 1.0e-9;
        tmp0 = const 7u;
        tmp0 = Not(const false);
        tmp0 = const factorial;
        switchInt(tmp0) -> [1: bb1, 2: bb2, otherwise: bb3];
    }

    bb1: {
        return = call tmp0(const -3) -> bb2;
    }

    bb2: {
        diverge;
    }

    bb3: {
        panic -> bb2;
    }
}
"#;

    #[test]
    fn canonical_text_is_unchanged() {
        let module = parse_mir("canonical", CANONICAL).unwrap();

        assert_eq!(stringify_module(&module), CANONICAL);
    }

    #[test]
    fn writer_output_reparses_identically() {
        let source = r#"
            fn f(arg0) {
                let tmp0;
                start: { tmp0 = Neg(arg0); goto -> end; }
                end: {
                    switchInt(tmp0) -> [-1: start];
                }
            }
        "#;

        let once = stringify_module(&parse_mir("once", source).unwrap());
        let twice = stringify_module(&parse_mir("twice", &once).unwrap());

        assert_eq!(once, twice);
        assert!(once.contains("    bb1: {\n        switchInt(tmp0) -> [-1: bb0];\n    }\n"));
    }

    #[test]
    fn function_ranges() {
        let module = parse_mir("ranges", CANONICAL).unwrap();
        let writer = ModuleWriter::new(&module);
        let misc = module.find_function_by_name("misc").unwrap();

        assert!(writer.func(misc).starts_with("#[miri_run]\nfn misc() {\n"));
        assert!(writer.func(misc).ends_with("    }\n}\n"));
    }

    #[test]
    fn builder_module() {
        let mut module = Module::new("built");
        let mut b = module.define_function("id", Vec::default(), 1);
        let bb0 = b.create_block();

        b.switch_to(bb0);
        b.assign(
            Lvalue::ReturnPointer,
            Rvalue::Use(Operand::Consume(Lvalue::Arg(0))),
            DebugInfo::fake(),
        );
        b.ret(DebugInfo::fake());
        b.define().unwrap();

        assert_eq!(
            stringify_module(&module),
            "fn id(arg0) {\n    bb0: {\n        return = arg0;\n        return;\n    }\n}\n"
        );
    }

    #[test]
    fn floats_stay_lexable() {
        assert_eq!(stringify_float(2.0), "2.0");
        assert_eq!(stringify_float(-0.25), "-0.25");
        assert_eq!(stringify_float(1e-9), "1.0e-9");
        assert_eq!(stringify_float(1e300), "1.0e300");
    }
}
