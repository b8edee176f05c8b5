//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::analysis::{stringify_statement, stringify_terminator};
use crate::ir::*;
use crate::vm::{Engine, EvalError, Frame, InterpreterConfig, Pointer, Value};
use smallvec::SmallVec;
use std::iter;
use tracing::{debug, trace};

/// An implementation of an [`Engine`] as a MIR interpreter.
///
/// Calls inside of the interpreted program don't recurse on the host stack,
/// every frame carries the block it will continue at and the slot its result
/// is written to, so the call depth is only bounded by
/// [`InterpreterConfig::max_call_depth`].
pub struct Interpreter<'m> {
    module: &'m Module,
    config: InterpreterConfig,
    value_stack: Vec<Value>,
    call_stack: Vec<Frame>,
    steps: u64,
}

impl<'m> Interpreter<'m> {
    /// Creates an interpreter for `module` with no frames on the stack.
    pub fn new(module: &'m Module, config: InterpreterConfig) -> Self {
        Self {
            module,
            config,
            value_stack: Vec::default(),
            call_stack: Vec::default(),
            steps: 0,
        }
    }

    /// The module being interpreted.
    pub fn module(&self) -> &'m Module {
        self.module
    }

    /// The limits the interpreter is enforcing.
    pub fn config(&self) -> InterpreterConfig {
        self.config
    }

    /// The number of statements and terminators executed since the outermost
    /// [`Self::call`] began.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// The number of frames currently on the call stack.
    pub fn depth(&self) -> usize {
        self.call_stack.len()
    }

    /// Calls `func` with `args`, runs it until it returns and then gives back
    /// the value in its return slot.
    ///
    /// If interpretation fails, every frame pushed by this call is removed
    /// before the error is returned.
    ///
    /// A call made with an empty call stack starts a fresh step count, so the
    /// step limit applies to each top-level call separately.
    pub fn call(&mut self, func: Func, args: &[Value]) -> Result<Value, EvalError> {
        let (depth, stack) = (self.call_stack.len(), self.value_stack.len());

        if depth == 0 {
            self.steps = 0;
        }

        self.push_stack_frame(func, args, None)?;

        let result = self.execute(depth);

        if result.is_err() {
            self.call_stack.truncate(depth);
            self.value_stack.truncate(stack);
        }

        result
    }

    /// Pushes a frame for `func` at the end of the value stack, fills it with
    /// [`Value::Uninit`] and then copies `args` into the argument slots.
    pub fn push_stack_frame(
        &mut self,
        func: Func,
        args: &[Value],
        return_to: Option<(Pointer, Block)>,
    ) -> Result<(), EvalError> {
        let module = self.module;
        let f = module
            .get_function(func)
            .ok_or_else(|| EvalError::UnknownFunction(func.to_string()))?;
        let body = f.body();

        if args.len() != body.num_args() as usize {
            return Err(EvalError::ArgumentCount {
                name: f.name().to_owned(),
                expected: body.num_args() as usize,
                actual: args.len(),
            });
        }

        if self.call_stack.len() >= self.config.max_call_depth {
            return Err(EvalError::StackOverflow(self.config.max_call_depth));
        }

        let frame = Frame::new(func, body, self.value_stack.len(), return_to);

        self.value_stack
            .extend(iter::repeat(Value::Uninit).take(frame.size()));

        let first_arg = frame.offset() + 1;

        self.value_stack[first_arg..first_arg + args.len()].clone_from_slice(args);
        self.call_stack.push(frame);

        debug!(
            func = f.name(),
            depth = self.call_stack.len(),
            offset = frame.offset(),
            "pushed stack frame"
        );

        Ok(())
    }

    /// Pops the innermost frame and truncates the value stack back to where
    /// that frame began.
    pub fn pop_stack_frame(&mut self) -> Result<Frame, EvalError> {
        let frame = self.call_stack.pop().ok_or(EvalError::NoFrame)?;

        self.value_stack.truncate(frame.offset());

        debug!(
            func = self.func_name(frame.func()),
            depth = self.call_stack.len(),
            "popped stack frame"
        );

        Ok(frame)
    }

    /// Maps an lvalue to a pointer through the innermost frame.
    pub fn eval_lvalue(&self, lvalue: Lvalue) -> Result<Pointer, EvalError> {
        let frame = self.call_stack.last().ok_or(EvalError::NoFrame)?;

        frame
            .pointer(lvalue)
            .ok_or(EvalError::UndeclaredLocal(lvalue))
    }

    /// Evaluates the right-hand side of an assignment.
    pub fn eval_rvalue(&self, rvalue: &Rvalue) -> Result<Value, EvalError> {
        match rvalue {
            Rvalue::Use(operand) => self.eval_operand(operand),
            Rvalue::BinaryOp(op, lhs, rhs) => {
                let lhs = self.eval_operand(lhs)?;
                let rhs = self.eval_operand(rhs)?;

                eval_binary_op(*op, lhs, rhs)
            }
            Rvalue::UnaryOp(op, operand) => eval_unary_op(*op, self.eval_operand(operand)?),
        }
    }

    /// Evaluates an operand into a value.
    pub fn eval_operand(&self, operand: &Operand) -> Result<Value, EvalError> {
        match operand {
            Operand::Consume(lvalue) => self.read_lvalue(*lvalue),
            Operand::Constant(Literal::Value(value)) => eval_constant(value),
            Operand::Constant(Literal::Item(func)) => Ok(Value::Func(*func)),
        }
    }

    /// Reads the value an lvalue refers to. Slots that were never written
    /// hold [`Value::Uninit`].
    pub fn read_lvalue(&self, lvalue: Lvalue) -> Result<Value, EvalError> {
        Ok(self.read_pointer(self.eval_lvalue(lvalue)?))
    }

    /// Reads the value at `ptr`.
    pub fn read_pointer(&self, ptr: Pointer) -> Value {
        match ptr {
            Pointer::Stack(offset) => self.value_stack.get(offset).cloned().unwrap_or_default(),
        }
    }

    /// Writes `value` to `ptr`.
    pub fn write_pointer(&mut self, ptr: Pointer, value: Value) {
        match ptr {
            Pointer::Stack(offset) => {
                if let Some(slot) = self.value_stack.get_mut(offset) {
                    *slot = value;
                }
            }
        }
    }

    // runs until the frame at index `base` returns
    fn execute(&mut self, base: usize) -> Result<Value, EvalError> {
        loop {
            let module = self.module;
            let frame = *self.call_stack.last().ok_or(EvalError::NoFrame)?;
            let body = module.function(frame.func()).body();
            let block = frame.block();
            let data = body
                .block(block)
                .ok_or_else(|| EvalError::UnknownBlock(block.to_string()))?;

            for stmt in data.statements.iter() {
                self.step()?;

                trace!(%block, "{}", stringify_statement(module, stmt));

                self.eval_statement(stmt)?;
            }

            self.step()?;

            trace!(%block, "{}", stringify_terminator(module, &data.terminator));

            match &data.terminator.kind {
                TerminatorKind::Return => {
                    let value = self.read_lvalue(Lvalue::ReturnPointer)?;
                    let frame = self.pop_stack_frame()?;

                    match frame.return_to() {
                        Some((ptr, target)) if self.call_stack.len() > base => {
                            self.write_pointer(ptr, value);
                            self.jump(target)?;
                        }
                        _ => return Ok(value),
                    }
                }
                TerminatorKind::Goto { target } => self.jump(*target)?,
                TerminatorKind::If { cond, targets } => match self.eval_operand(cond)? {
                    Value::Bool(true) => self.jump(targets[0])?,
                    Value::Bool(false) => self.jump(targets[1])?,
                    other => return Err(EvalError::NonBooleanCondition(other)),
                },
                TerminatorKind::SwitchInt {
                    discr,
                    values,
                    targets,
                } => {
                    let discr = self.read_lvalue(*discr)?;
                    let mut selected = None;

                    for (i, value) in values.iter().enumerate() {
                        if eval_constant(value)? == discr {
                            selected = Some(i);
                            break;
                        }
                    }

                    // the `otherwise` target (if any) sits right after the last case
                    let index = selected.unwrap_or(values.len());

                    match targets.get(index) {
                        Some(target) => self.jump(*target)?,
                        None => return Err(EvalError::NoMatchingSwitchValue(discr)),
                    }
                }
                TerminatorKind::Call {
                    destination,
                    func,
                    args,
                    target,
                } => {
                    let ptr = self.eval_lvalue(*destination)?;
                    let callee = match self.eval_operand(func)? {
                        Value::Func(callee) => callee,
                        other => return Err(EvalError::NonFunctionCall(other)),
                    };

                    let args = args
                        .iter()
                        .map(|arg| self.eval_operand(arg))
                        .collect::<Result<SmallVec<[Value; 4]>, _>>()?;

                    self.push_stack_frame(callee, &args, Some((ptr, *target)))?;
                }
                TerminatorKind::Diverge => return Err(EvalError::Diverged),
                TerminatorKind::Panic { .. } => return Err(EvalError::Panicked),
            }
        }
    }

    fn eval_statement(&mut self, stmt: &Statement) -> Result<(), EvalError> {
        match &stmt.kind {
            StatementKind::Assign(lvalue, rvalue) => {
                let ptr = self.eval_lvalue(*lvalue)?;
                let value = self.eval_rvalue(rvalue)?;

                self.write_pointer(ptr, value);
            }
            // there is no heap, so there's nothing to free
            StatementKind::Drop(_, lvalue) => {
                self.eval_lvalue(*lvalue)?;
            }
        }

        Ok(())
    }

    fn jump(&mut self, target: Block) -> Result<(), EvalError> {
        let frame = self.call_stack.last_mut().ok_or(EvalError::NoFrame)?;

        frame.jump(target);

        Ok(())
    }

    fn step(&mut self) -> Result<(), EvalError> {
        self.steps += 1;

        match self.config.step_limit {
            Some(limit) if self.steps > limit => Err(EvalError::StepLimitExceeded(limit)),
            _ => Ok(()),
        }
    }

    fn func_name(&self, func: Func) -> &'m str {
        match self.module.get_function(func) {
            Some(f) => f.name(),
            None => "<unknown>",
        }
    }
}

impl<'m> Engine<'m> for Interpreter<'m> {
    fn with_module(module: &'m Module, config: InterpreterConfig) -> Self {
        Self::new(module, config)
    }

    fn run(&mut self, entry: &str, args: &[Value]) -> Result<Value, EvalError> {
        let func = self
            .module
            .find_function_by_name(entry)
            .ok_or_else(|| EvalError::UnknownFunction(entry.to_owned()))?;

        self.call(func, args)
    }
}

/// Evaluates a constant. Only integers and booleans have a runtime
/// representation so far.
pub fn eval_constant(value: &ConstVal) -> Result<Value, EvalError> {
    match value {
        ConstVal::Int(i) => Ok(Value::Int(*i)),
        ConstVal::Bool(b) => Ok(Value::Bool(*b)),
        other => Err(EvalError::Unsupported(other.kind())),
    }
}

/// Applies a binary operator to two values.
///
/// Integer arithmetic is checked, and `bool` supports the comparisons and the
/// bitwise operators (with `false < true`).
pub fn eval_binary_op(op: BinOp, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    let invalid = |lhs, rhs| EvalError::InvalidBinaryOperands {
        op: op.name(),
        lhs,
        rhs,
    };

    match (lhs, rhs) {
        (Value::Int(l), Value::Int(r)) => eval_int_binary_op(op, l, r),
        (Value::Bool(l), Value::Bool(r)) => match op {
            BinOp::Eq => Ok(Value::Bool(l == r)),
            BinOp::Ne => Ok(Value::Bool(l != r)),
            BinOp::Lt => Ok(Value::Bool(l < r)),
            BinOp::Le => Ok(Value::Bool(l <= r)),
            BinOp::Gt => Ok(Value::Bool(l > r)),
            BinOp::Ge => Ok(Value::Bool(l >= r)),
            BinOp::BitAnd => Ok(Value::Bool(l & r)),
            BinOp::BitOr => Ok(Value::Bool(l | r)),
            BinOp::BitXor => Ok(Value::Bool(l ^ r)),
            _ => Err(invalid(Value::Bool(l), Value::Bool(r))),
        },
        (lhs, rhs) => Err(invalid(lhs, rhs)),
    }
}

fn eval_int_binary_op(op: BinOp, l: i64, r: i64) -> Result<Value, EvalError> {
    let overflow = || EvalError::Overflow(op.name());

    let result = match op {
        BinOp::Add => l.checked_add(r),
        BinOp::Sub => l.checked_sub(r),
        BinOp::Mul => l.checked_mul(r),
        BinOp::Div | BinOp::Rem if r == 0 => return Err(EvalError::DivisionByZero),
        BinOp::Div => l.checked_div(r),
        BinOp::Rem => l.checked_rem(r),
        BinOp::BitXor => Some(l ^ r),
        BinOp::BitAnd => Some(l & r),
        BinOp::BitOr => Some(l | r),
        BinOp::Shl | BinOp::Shr => {
            let amount = u32::try_from(r)
                .ok()
                .filter(|amount| *amount < i64::BITS)
                .ok_or_else(overflow)?;

            if op == BinOp::Shl {
                l.checked_shl(amount)
            } else {
                l.checked_shr(amount)
            }
        }
        BinOp::Eq => return Ok(Value::Bool(l == r)),
        BinOp::Ne => return Ok(Value::Bool(l != r)),
        BinOp::Lt => return Ok(Value::Bool(l < r)),
        BinOp::Le => return Ok(Value::Bool(l <= r)),
        BinOp::Gt => return Ok(Value::Bool(l > r)),
        BinOp::Ge => return Ok(Value::Bool(l >= r)),
    };

    result.map(Value::Int).ok_or_else(overflow)
}

/// Applies a unary operator to a value. `Not` is bitwise on integers and
/// logical on `bool`, `Neg` is checked.
pub fn eval_unary_op(op: UnOp, value: Value) -> Result<Value, EvalError> {
    match (op, value) {
        (UnOp::Not, Value::Int(i)) => Ok(Value::Int(!i)),
        (UnOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnOp::Neg, Value::Int(i)) => i
            .checked_neg()
            .map(Value::Int)
            .ok_or(EvalError::Overflow(op.name())),
        (op, value) => Err(EvalError::InvalidUnaryOperand {
            op: op.name(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::ArenaKey;
    use crate::parse_mir;

    fn run_with(source: &str, entry: &str, args: &[Value], config: InterpreterConfig) -> Result<Value, EvalError> {
        let module = match parse_mir("test", source) {
            Ok(module) => module,
            Err(err) => panic!("{}", err.render("test", source)),
        };

        let mut interpreter = Interpreter::with_module(&module, config);
        let result = interpreter.run(entry, args);

        assert_eq!(interpreter.depth(), 0);

        result
    }

    fn run(source: &str, entry: &str, args: &[Value]) -> Result<Value, EvalError> {
        run_with(source, entry, args, InterpreterConfig::default())
    }

    fn eval(rvalue: &str) -> Result<Value, EvalError> {
        let source = format!("fn f() {{ bb0: {{ return = {rvalue}; return; }} }}");

        run(&source, "f", &[])
    }

    const RECURSIVE: &str = r#"
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
                return;
            }
        }

        fn fib(arg0) {
            let tmp0;
            let tmp1;
            let tmp2;

            bb0: {
                tmp0 = Lt(arg0, const 2);
                if(tmp0) -> [true: bb1, false: bb2];
            }

            bb1: {
                return = arg0;
                return;
            }

            bb2: {
                tmp1 = Sub(arg0, const 1);
                tmp1 = call fib(tmp1) -> bb3;
            }

            bb3: {
                tmp2 = Sub(arg0, const 2);
                tmp2 = call fib(tmp2) -> bb4;
            }

            bb4: {
                return = Add(tmp1, tmp2);
                return;
            }
        }

        fn forever(arg0) {
            bb0: {
                return = call forever(arg0) -> bb1;
            }

            bb1: {
                return;
            }
        }
    "#;

    #[test]
    fn arithmetic() {
        assert_eq!(eval("Add(const 1, const 2)"), Ok(Value::Int(3)));
        assert_eq!(eval("Sub(const 1, const 2)"), Ok(Value::Int(-1)));
        assert_eq!(eval("Mul(const -4, const 5)"), Ok(Value::Int(-20)));
        assert_eq!(eval("Div(const 7, const 2)"), Ok(Value::Int(3)));
        assert_eq!(eval("Rem(const -7, const 2)"), Ok(Value::Int(-1)));
        assert_eq!(eval("BitXor(const 6, const 3)"), Ok(Value::Int(5)));
        assert_eq!(eval("BitAnd(const 6, const 3)"), Ok(Value::Int(2)));
        assert_eq!(eval("BitOr(const 6, const 3)"), Ok(Value::Int(7)));
        assert_eq!(eval("Shl(const 1, const 10)"), Ok(Value::Int(1024)));
        assert_eq!(eval("Shr(const -8, const 1)"), Ok(Value::Int(-4)));
        assert_eq!(eval("Not(const 0)"), Ok(Value::Int(-1)));
        assert_eq!(eval("Neg(const 5)"), Ok(Value::Int(-5)));
    }

    #[test]
    fn comparisons() {
        assert_eq!(eval("Eq(const 1, const 1)"), Ok(Value::Bool(true)));
        assert_eq!(eval("Ne(const 1, const 1)"), Ok(Value::Bool(false)));
        assert_eq!(eval("Lt(const -1, const 1)"), Ok(Value::Bool(true)));
        assert_eq!(eval("Ge(const 1, const 2)"), Ok(Value::Bool(false)));
        assert_eq!(eval("Lt(const false, const true)"), Ok(Value::Bool(true)));
        assert_eq!(eval("Gt(const false, const true)"), Ok(Value::Bool(false)));
        assert_eq!(eval("BitXor(const true, const true)"), Ok(Value::Bool(false)));
        assert_eq!(eval("Not(const true)"), Ok(Value::Bool(false)));
    }

    #[test]
    fn arithmetic_errors() {
        assert_eq!(
            eval("Add(const 9223372036854775807, const 1)"),
            Err(EvalError::Overflow("Add"))
        );
        assert_eq!(
            eval("Div(const -9223372036854775808, const -1)"),
            Err(EvalError::Overflow("Div"))
        );
        assert_eq!(eval("Rem(const 1, const 0)"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("Shl(const 1, const 64)"), Err(EvalError::Overflow("Shl")));
        assert_eq!(eval("Shr(const 1, const -1)"), Err(EvalError::Overflow("Shr")));
        assert_eq!(
            eval("Neg(const -9223372036854775808)"),
            Err(EvalError::Overflow("Neg"))
        );
    }

    #[test]
    fn invalid_operands() {
        assert_eq!(
            eval("Add(const true, const 1)"),
            Err(EvalError::InvalidBinaryOperands {
                op: "Add",
                lhs: Value::Bool(true),
                rhs: Value::Int(1),
            })
        );
        assert_eq!(
            eval("Add(const true, const false)"),
            Err(EvalError::InvalidBinaryOperands {
                op: "Add",
                lhs: Value::Bool(true),
                rhs: Value::Bool(false),
            })
        );
        assert_eq!(
            eval("Neg(const true)"),
            Err(EvalError::InvalidUnaryOperand {
                op: "Neg",
                value: Value::Bool(true),
            })
        );
    }

    #[test]
    fn constants() {
        assert_eq!(eval("const 1u"), Err(EvalError::Unsupported("unsigned integer")));
        assert_eq!(eval("const 1.5"), Err(EvalError::Unsupported("float")));
        assert_eq!(eval("const \"hi\""), Err(EvalError::Unsupported("string")));
        assert_eq!(eval("const f"), Ok(Value::Func(Func::new(0))));
    }

    #[test]
    fn uninit_reads() {
        let source = "fn f() { let var0; bb0: { return = var0; return; } }";

        assert_eq!(run(source, "f", &[]), Ok(Value::Uninit));
        assert_eq!(
            run("fn f() { bb0: { return; } }", "f", &[]),
            Ok(Value::Uninit)
        );
    }

    #[test]
    fn recursion() {
        assert_eq!(run(RECURSIVE, "factorial", &[Value::Int(5)]), Ok(Value::Int(120)));
        assert_eq!(run(RECURSIVE, "fib", &[Value::Int(10)]), Ok(Value::Int(55)));
    }

    #[test]
    fn stack_overflow() {
        let config = InterpreterConfig::default().with_max_call_depth(32);

        assert_eq!(
            run_with(RECURSIVE, "forever", &[Value::Int(0)], config),
            Err(EvalError::StackOverflow(32))
        );
        assert_eq!(
            run(RECURSIVE, "forever", &[Value::Int(0)]),
            Err(EvalError::StackOverflow(InterpreterConfig::DEFAULT_MAX_CALL_DEPTH))
        );
    }

    #[test]
    fn step_limit() {
        let source = "fn spin() { bb0: { goto -> bb0; } }";
        let config = InterpreterConfig::default().with_step_limit(Some(100));

        assert_eq!(
            run_with(source, "spin", &[], config),
            Err(EvalError::StepLimitExceeded(100))
        );

        let config = InterpreterConfig::default().with_step_limit(Some(2));

        assert_eq!(
            run_with("fn f() { bb0: { return = const 1; return; } }", "f", &[], config),
            Ok(Value::Int(1))
        );
    }

    #[test]
    fn step_limit_is_per_call() {
        let module = parse_mir("test", "fn f() { bb0: { return = const 1; return; } }").unwrap();
        let config = InterpreterConfig::default().with_step_limit(Some(3));
        let mut interpreter = Interpreter::new(&module, config);

        assert_eq!(interpreter.steps(), 0);

        for _ in 0..3 {
            assert_eq!(interpreter.run("f", &[]), Ok(Value::Int(1)));
            assert_eq!(interpreter.steps(), 2);
        }
    }

    #[test]
    fn switch_int() {
        let source = r#"
            fn classify(arg0) {
                bb0: {
                    switchInt(arg0) -> [0: bb1, 1: bb2, otherwise: bb3];
                }

                bb1: { return = const 10; return; }
                bb2: { return = const 20; return; }
                bb3: { return = const 30; return; }
            }

            fn strict(arg0) {
                bb0: {
                    switchInt(arg0) -> [0: bb1];
                }

                bb1: { return; }
            }
        "#;

        assert_eq!(run(source, "classify", &[Value::Int(0)]), Ok(Value::Int(10)));
        assert_eq!(run(source, "classify", &[Value::Int(1)]), Ok(Value::Int(20)));
        assert_eq!(run(source, "classify", &[Value::Int(7)]), Ok(Value::Int(30)));
        assert_eq!(
            run(source, "strict", &[Value::Int(7)]),
            Err(EvalError::NoMatchingSwitchValue(Value::Int(7)))
        );
    }

    #[test]
    fn control_flow_errors() {
        assert_eq!(
            run("fn f() { bb0: { if(const 1) -> [true: bb0, false: bb0]; } }", "f", &[]),
            Err(EvalError::NonBooleanCondition(Value::Int(1)))
        );
        assert_eq!(
            run("fn f() { bb0: { return = call return() -> bb0; } }", "f", &[]),
            Err(EvalError::NonFunctionCall(Value::Uninit))
        );
        assert_eq!(
            run("fn f() { bb0: { diverge; } }", "f", &[]),
            Err(EvalError::Diverged)
        );
        assert_eq!(
            run("fn f() { bb0: { panic -> bb0; } }", "f", &[]),
            Err(EvalError::Panicked)
        );
    }

    #[test]
    fn indirect_calls() {
        let source = r#"
            fn double(arg0) {
                bb0: { return = Mul(arg0, const 2); return; }
            }

            fn apply(arg0, arg1) {
                bb0: { return = call arg0(arg1) -> bb1; }
                bb1: { return; }
            }

            fn main() {
                let tmp0;

                bb0: {
                    tmp0 = const double;
                    return = call apply(tmp0, const 21) -> bb1;
                }

                bb1: { return; }
            }

            fn wrong() {
                bb0: { return = call apply(const apply, const 21) -> bb1; }
                bb1: { return; }
            }
        "#;

        assert_eq!(run(source, "main", &[]), Ok(Value::Int(42)));
        assert_eq!(
            run(source, "wrong", &[]),
            Err(EvalError::ArgumentCount {
                name: "apply".to_owned(),
                expected: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn entry_errors() {
        let source = "fn f(arg0) { bb0: { return = arg0; return; } }";

        assert_eq!(
            run(source, "f", &[]),
            Err(EvalError::ArgumentCount {
                name: "f".to_owned(),
                expected: 1,
                actual: 0,
            })
        );
        assert_eq!(
            run(source, "g", &[]),
            Err(EvalError::UnknownFunction("g".to_owned()))
        );
        assert_eq!(run(source, "f", &[Value::Bool(true)]), Ok(Value::Bool(true)));
    }

    #[test]
    fn frame_operations() {
        let module = parse_mir("frames", "fn f(arg0) { let tmp0; bb0: { return; } }").unwrap();
        let f = module.find_function_by_name("f").unwrap();
        let mut interpreter = Interpreter::new(&module, InterpreterConfig::default());

        assert_eq!(interpreter.eval_lvalue(Lvalue::Arg(0)), Err(EvalError::NoFrame));
        assert_eq!(interpreter.pop_stack_frame(), Err(EvalError::NoFrame));

        interpreter.push_stack_frame(f, &[Value::Int(9)], None).unwrap();

        assert_eq!(interpreter.read_lvalue(Lvalue::Arg(0)), Ok(Value::Int(9)));
        assert_eq!(interpreter.read_lvalue(Lvalue::Temp(0)), Ok(Value::Uninit));
        assert_eq!(interpreter.eval_lvalue(Lvalue::Temp(0)), Ok(Pointer::Stack(2)));
        assert_eq!(
            interpreter.eval_lvalue(Lvalue::Var(0)),
            Err(EvalError::UndeclaredLocal(Lvalue::Var(0)))
        );

        let frame = interpreter.pop_stack_frame().unwrap();

        assert_eq!(frame.func(), f);
        assert_eq!(interpreter.depth(), 0);
    }
}
