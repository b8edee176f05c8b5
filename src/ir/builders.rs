//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::arena::{ArenaKey, ArenaMap};
use crate::ir::*;
use smallvec::SmallVec;
use thiserror::Error;

/// Errors that can occur when finishing a [`FuncBuilder`].
#[derive(Clone, Debug, Hash, Eq, PartialEq, Error)]
pub enum BuilderError {
    /// A block was created but never given a terminator.
    #[error("block `{0}` has no terminator")]
    MissingTerminator(Block),
}

struct PartialBlock {
    statements: Vec<Statement>,
    terminator: Option<Terminator>,
}

/// Helper type for building the body of a function inside of a [`Module`].
///
/// Blocks can be created before they're filled in, so forward jumps work
/// just like they do in textual MIR.
///
/// ```
/// # use miri::ir::*;
/// let mut module = Module::new("example");
/// let mut b = module.define_function("three", vec![], 0);
/// let bb0 = b.create_block();
///
/// b.switch_to(bb0);
/// b.assign(
///     Lvalue::ReturnPointer,
///     Rvalue::BinaryOp(BinOp::Add, Operand::int(1), Operand::int(2)),
///     DebugInfo::fake(),
/// );
/// b.ret(DebugInfo::fake());
///
/// let f = b.define().unwrap();
/// assert_eq!(module.function(f).body().num_blocks(), 1);
/// ```
pub struct FuncBuilder<'m> {
    module: &'m mut Module,
    func: Func,
    num_args: u32,
    num_vars: u32,
    num_temps: u32,
    blocks: Vec<PartialBlock>,
    current: Option<Block>,
}

impl<'m> FuncBuilder<'m> {
    pub(in crate::ir) fn new(module: &'m mut Module, func: Func, num_args: u32) -> Self {
        Self {
            module,
            func,
            num_args,
            num_vars: 0,
            num_temps: 0,
            blocks: Vec::default(),
            current: None,
        }
    }

    /// The function being defined.
    pub fn func(&self) -> Func {
        self.func
    }

    /// The module the function lives in. Useful for resolving callees
    /// while building.
    pub fn module(&self) -> &Module {
        self.module
    }

    /// Gets the lvalue for the `index`th argument.
    pub fn arg(&self, index: u32) -> Lvalue {
        debug_assert!(index < self.num_args, "argument index out of range");

        Lvalue::Arg(index)
    }

    /// Declares a new `varN` local and returns it.
    pub fn declare_var(&mut self) -> Lvalue {
        self.num_vars += 1;

        Lvalue::Var(self.num_vars - 1)
    }

    /// Declares a new `tmpN` local and returns it.
    pub fn declare_temp(&mut self) -> Lvalue {
        self.num_temps += 1;

        Lvalue::Temp(self.num_temps - 1)
    }

    /// Creates a new, empty block. The first block created is the entry block.
    pub fn create_block(&mut self) -> Block {
        self.blocks.push(PartialBlock {
            statements: Vec::default(),
            terminator: None,
        });

        Block::new(self.blocks.len() - 1)
    }

    /// Makes `block` the block that statements/terminators get appended to.
    pub fn switch_to(&mut self, block: Block) {
        debug_assert!(block.index() < self.blocks.len(), "block is not from this builder");

        self.current = Some(block);
    }

    /// The block currently being appended to.
    pub fn current_block(&self) -> Option<Block> {
        self.current
    }

    /// Whether `block` already has a terminator.
    pub fn is_terminated(&self, block: Block) -> bool {
        self.blocks[block.index()].terminator.is_some()
    }

    /// Appends `lvalue = rvalue;` to the current block.
    pub fn assign(&mut self, lvalue: Lvalue, rvalue: Rvalue, debug: DebugInfo) {
        self.push_statement(StatementKind::Assign(lvalue, rvalue), debug);
    }

    /// Appends `drop(lvalue);` or `drop_deep(lvalue);` to the current block.
    pub fn drop(&mut self, kind: DropKind, lvalue: Lvalue, debug: DebugInfo) {
        self.push_statement(StatementKind::Drop(kind, lvalue), debug);
    }

    /// Terminates the current block with `return;`.
    pub fn ret(&mut self, debug: DebugInfo) {
        self.terminate(TerminatorKind::Return, debug);
    }

    /// Terminates the current block with `goto -> target;`.
    pub fn goto(&mut self, target: Block, debug: DebugInfo) {
        self.terminate(TerminatorKind::Goto { target }, debug);
    }

    /// Terminates the current block with a two-way branch on `cond`.
    pub fn branch(&mut self, cond: Operand, then: Block, otherwise: Block, debug: DebugInfo) {
        self.terminate(
            TerminatorKind::If {
                cond,
                targets: [then, otherwise],
            },
            debug,
        );
    }

    /// Terminates the current block with a `switchInt`. `otherwise` is taken
    /// if none of the `cases` match.
    pub fn switch_int(
        &mut self,
        discr: Lvalue,
        cases: &[(ConstVal, Block)],
        otherwise: Option<Block>,
        debug: DebugInfo,
    ) {
        let values = cases.iter().map(|(v, _)| v.clone()).collect();
        let targets = cases
            .iter()
            .map(|(_, bb)| *bb)
            .chain(otherwise)
            .collect::<SmallVec<_>>();

        self.terminate(
            TerminatorKind::SwitchInt {
                discr,
                values,
                targets,
            },
            debug,
        );
    }

    /// Terminates the current block with `destination = call func(args) -> target;`.
    pub fn call(
        &mut self,
        destination: Lvalue,
        func: Operand,
        args: &[Operand],
        target: Block,
        debug: DebugInfo,
    ) {
        self.terminate(
            TerminatorKind::Call {
                destination,
                func,
                args: SmallVec::from(args),
                target,
            },
            debug,
        );
    }

    /// Terminates the current block with `diverge;`.
    pub fn diverge(&mut self, debug: DebugInfo) {
        self.terminate(TerminatorKind::Diverge, debug);
    }

    /// Terminates the current block with `panic -> target;`.
    pub fn panic(&mut self, target: Block, debug: DebugInfo) {
        self.terminate(TerminatorKind::Panic { target }, debug);
    }

    /// Finishes the body and installs it into the module.
    pub fn define(self) -> Result<Func, BuilderError> {
        let mut blocks = ArenaMap::default();

        for (i, partial) in self.blocks.into_iter().enumerate() {
            let terminator = partial
                .terminator
                .ok_or(BuilderError::MissingTerminator(Block::new(i)))?;

            blocks.insert(BasicBlockData {
                statements: partial.statements,
                terminator,
            });
        }

        let body = Body::new(self.num_args, self.num_vars, self.num_temps, blocks);

        self.module.function_mut(self.func).set_body(body);

        Ok(self.func)
    }

    fn current_mut(&mut self) -> &mut PartialBlock {
        let block = self.current.expect("no block was selected with `switch_to`");

        &mut self.blocks[block.index()]
    }

    fn push_statement(&mut self, kind: StatementKind, debug: DebugInfo) {
        let block = self.current_mut();

        debug_assert!(block.terminator.is_none(), "appending after a terminator");

        block.statements.push(Statement { kind, debug });
    }

    fn terminate(&mut self, kind: TerminatorKind, debug: DebugInfo) {
        let block = self.current_mut();

        debug_assert!(block.terminator.is_none(), "block already has a terminator");

        block.terminator = Some(Terminator { kind, debug });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_blocks_in_creation_order() {
        let mut module = Module::new("test");
        let mut b = module.define_function("f", vec![], 2);

        let v0 = b.declare_var();
        let t0 = b.declare_temp();
        let t1 = b.declare_temp();
        let bb0 = b.create_block();
        let bb1 = b.create_block();

        b.switch_to(bb0);
        b.assign(v0, Rvalue::Use(b.arg(1).into()), DebugInfo::fake());
        b.goto(bb1, DebugInfo::fake());

        b.switch_to(bb1);
        b.drop(DropKind::Free, t0, DebugInfo::fake());
        b.assign(t1, Rvalue::Use(Operand::int(1)), DebugInfo::fake());
        b.ret(DebugInfo::fake());

        let f = b.define().unwrap();
        let body = module.function(f).body();

        assert_eq!(v0, Lvalue::Var(0));
        assert_eq!(t1, Lvalue::Temp(1));
        assert_eq!(body.num_args(), 2);
        assert_eq!(body.num_vars(), 1);
        assert_eq!(body.num_temps(), 2);
        assert_eq!(body.frame_size(), 6);
        assert_eq!(body.num_blocks(), 2);
        assert_eq!(
            body.block(START_BLOCK).unwrap().terminator.kind,
            TerminatorKind::Goto { target: bb1 }
        );
        assert_eq!(body.block(bb1).unwrap().statements.len(), 2);
    }

    #[test]
    fn unterminated_block_is_an_error() {
        let mut module = Module::new("test");
        let mut b = module.define_function("f", vec![], 0);
        let bb0 = b.create_block();
        let bb1 = b.create_block();

        b.switch_to(bb0);
        b.goto(bb1, DebugInfo::fake());

        assert_eq!(b.define(), Err(BuilderError::MissingTerminator(bb1)));
    }

    #[test]
    fn switch_int_appends_otherwise() {
        let mut module = Module::new("test");
        let mut b = module.define_function("f", vec![], 1);
        let bb0 = b.create_block();
        let bb1 = b.create_block();
        let bb2 = b.create_block();

        b.switch_to(bb0);
        b.switch_int(
            b.arg(0),
            &[(ConstVal::Int(1), bb1), (ConstVal::Int(2), bb1)],
            Some(bb2),
            DebugInfo::fake(),
        );
        b.switch_to(bb1);
        b.ret(DebugInfo::fake());
        b.switch_to(bb2);
        b.ret(DebugInfo::fake());

        let f = b.define().unwrap();
        let term = &module.function(f).body().block(bb0).unwrap().terminator;

        assert!(term.kind.has_otherwise());
        assert_eq!(term.kind.successors().as_slice(), &[bb1, bb1, bb2]);
    }
}
