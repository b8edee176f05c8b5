//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::analysis;
use crate::analysis::stringify_lvalue;
use crate::ir::*;

/// Verifies that an entire module is well-formed MIR.
///
/// This checks that every local that is used was declared, that every jump
/// goes to a block that exists, that every function item refers to a real
/// function, that `switchInt` has a target for each value (plus at most one
/// `otherwise`) and that every body has at least one block.
///
/// If it isn't, this function returns a list of errors and the associated debug-info
/// of the IR that caused it.
pub fn verify_module(module: &Module) -> Result<(), Vec<(String, DebugInfo)>> {
    let mut verifier = Verifier {
        module,
        errors: Vec::default(),
    };

    for (func, _) in module.iter() {
        verifier.visit_func(func);
    }

    if verifier.errors.is_empty() {
        Ok(())
    } else {
        Err(verifier.errors)
    }
}

/// This is [`verify_module`], except that it writes out any errors
/// and then panics on failure.
pub fn verify_module_panic(module: &Module) {
    if let Err(e) = verify_module(module) {
        println!();
        analysis::print_module(module);
        println!();

        for (error, spot) in e {
            let (line, col) = (spot.line(), spot.col());

            println!("{line}:{col}: {error}");
        }

        panic!("module failed verification");
    }
}

macro_rules! verify_assert {
    ($self:expr, $info:expr, $cond:expr, $explanation:expr) => {
        if !($cond) {
            $self.errors.push((($explanation).to_string(), $info));
        }
    };
}

struct Verifier<'m> {
    module: &'m Module,
    errors: Vec<(String, DebugInfo)>,
}

impl<'m> Verifier<'m> {
    fn visit_func(&mut self, func: Func) {
        let f = self.module.function(func);
        let body = f.body();

        verify_assert!(
            self,
            DebugInfo::fake(),
            !body.is_empty(),
            format!("function `{}` has no basic blocks", f.name())
        );

        for (_, data) in body.blocks() {
            for stmt in data.statements.iter() {
                self.visit_stmt(f, stmt);
            }

            self.visit_terminator(f, &data.terminator);
        }
    }

    fn visit_stmt(&mut self, f: &Function, stmt: &Statement) {
        match &stmt.kind {
            StatementKind::Assign(lvalue, rvalue) => {
                self.lvalue(f, *lvalue, stmt.debug);

                match rvalue {
                    Rvalue::Use(operand) | Rvalue::UnaryOp(_, operand) => {
                        self.operand(f, operand, stmt.debug)
                    }
                    Rvalue::BinaryOp(_, lhs, rhs) => {
                        self.operand(f, lhs, stmt.debug);
                        self.operand(f, rhs, stmt.debug);
                    }
                }
            }
            StatementKind::Drop(_, lvalue) => self.lvalue(f, *lvalue, stmt.debug),
        }
    }

    fn visit_terminator(&mut self, f: &Function, term: &Terminator) {
        let debug = term.debug;

        match &term.kind {
            TerminatorKind::Return | TerminatorKind::Diverge => {}
            TerminatorKind::Goto { .. } | TerminatorKind::Panic { .. } => {}
            TerminatorKind::If { cond, .. } => self.operand(f, cond, debug),
            TerminatorKind::SwitchInt {
                discr,
                values,
                targets,
            } => {
                self.lvalue(f, *discr, debug);

                verify_assert!(
                    self,
                    debug,
                    targets.len() == values.len() || targets.len() == values.len() + 1,
                    format!(
                        "`switchInt` has {} value(s) but {} target(s)",
                        values.len(),
                        targets.len()
                    )
                );
            }
            TerminatorKind::Call {
                destination,
                func,
                args,
                ..
            } => {
                self.lvalue(f, *destination, debug);
                self.operand(f, func, debug);

                for arg in args.iter() {
                    self.operand(f, arg, debug);
                }

                if let Operand::Constant(Literal::Item(callee)) = func {
                    if let Some(callee) = self.module.get_function(*callee) {
                        let expected = callee.body().num_args() as usize;

                        verify_assert!(
                            self,
                            debug,
                            args.len() == expected,
                            format!(
                                "call to `{}` passes {} argument(s) but it takes {expected}",
                                callee.name(),
                                args.len()
                            )
                        );
                    }
                }
            }
        }

        for target in term.kind.successors() {
            verify_assert!(
                self,
                debug,
                f.body().block(target).is_some(),
                format!("jump to nonexistent block `{target}`")
            );
        }
    }

    fn operand(&mut self, f: &Function, operand: &Operand, debug: DebugInfo) {
        match operand {
            Operand::Consume(lvalue) => self.lvalue(f, *lvalue, debug),
            Operand::Constant(Literal::Item(func)) => verify_assert!(
                self,
                debug,
                self.module.get_function(*func).is_some(),
                format!("reference to nonexistent function `{func}`")
            ),
            Operand::Constant(Literal::Value(_)) => {}
        }
    }

    fn lvalue(&mut self, f: &Function, lvalue: Lvalue, debug: DebugInfo) {
        verify_assert!(
            self,
            debug,
            f.body().contains_lvalue(lvalue),
            format!(
                "use of undeclared local `{}` in `{}`",
                stringify_lvalue(lvalue),
                f.name()
            )
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::ArenaKey;
    use crate::{parse_mir, ReadError};

    fn issues(source: &str) -> Vec<(String, DebugInfo)> {
        match parse_mir("test", source) {
            Err(ReadError::Verify(issues)) => issues,
            Err(ReadError::Parse(err)) => panic!("unexpected parse error: {err}"),
            Ok(_) => Vec::default(),
        }
    }

    #[test]
    fn valid_module() {
        let source = r#"
            fn f(arg0) {
                let var0;

                bb0: {
                    var0 = call g(arg0, const 2) -> bb1;
                }

                bb1: {
                    switchInt(var0) -> [0: bb0, otherwise: bb1];
                }
            }

            fn g(arg0, arg1) {
                bb0: {
                    return = Add(arg0, arg1);
                    return;
                }
            }
        "#;

        assert_eq!(issues(source), Vec::default());
    }

    #[test]
    fn undeclared_locals() {
        let found = issues("fn f(arg0) {\n    bb0: {\n        tmp0 = Add(arg1, var0);\n        return;\n    }\n}");
        let messages: Vec<&str> = found.iter().map(|(m, _)| m.as_str()).collect();

        assert_eq!(
            messages,
            vec![
                "use of undeclared local `tmp0` in `f`",
                "use of undeclared local `arg1` in `f`",
                "use of undeclared local `var0` in `f`",
            ]
        );
        assert!(found.iter().all(|(_, debug)| *debug == DebugInfo::new(3, 9)));
    }

    #[test]
    fn wrong_argument_count() {
        let found = issues(
            r#"
            fn f() {
                bb0: { return = call f(const 1) -> bb0; }
            }
        "#,
        );

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, "call to `f` passes 1 argument(s) but it takes 0");
    }

    #[test]
    fn built_modules_are_checked() {
        let mut module = Module::new("built");
        let f = module.declare_function("f", Vec::default());
        let mut b = module.define_existing_function(f, 0);
        let bb0 = b.create_block();

        b.switch_to(bb0);
        b.goto(Block::new(7), DebugInfo::new(1, 1));
        b.define().unwrap();

        let g = module.declare_function("g", Vec::default());

        module.define_existing_function(g, 0).define().unwrap();

        let errors = verify_module(&module).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], ("jump to nonexistent block `bb7`".to_owned(), DebugInfo::new(1, 1)));
        assert_eq!(errors[1], ("function `g` has no basic blocks".to_owned(), DebugInfo::fake()));
    }

    #[test]
    fn dangling_function_items() {
        let mut module = Module::new("built");
        let mut b = module.define_function("f", Vec::default(), 0);
        let bb0 = b.create_block();
        let missing = Operand::item(Func::new(9));

        b.switch_to(bb0);
        b.assign(Lvalue::ReturnPointer, Rvalue::Use(missing), DebugInfo::new(2, 5));
        b.ret(DebugInfo::new(3, 5));
        b.define().unwrap();

        let errors = verify_module(&module).unwrap_err();

        assert_eq!(
            errors,
            vec![("reference to nonexistent function `fn9`".to_owned(), DebugInfo::new(2, 5))]
        );
    }

    #[test]
    fn switch_target_count() {
        let mut module = Module::new("built");
        let mut b = module.define_function("f", Vec::default(), 1);
        let bb0 = b.create_block();

        b.switch_to(bb0);
        b.switch_int(Lvalue::Arg(0), &[], None, DebugInfo::fake());
        b.define().unwrap();

        assert!(verify_module(&module).is_ok());
    }

    #[test]
    #[should_panic]
    fn panicking_verifier() {
        let mut module = Module::new("empty");

        module.declare_function("f", Vec::default());

        verify_module_panic(&module);
    }
}
