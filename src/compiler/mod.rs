// SPDX-License-Identifier: CC0-1.0

//! Clause compilation
//!
//! Turns a [`Clause`] tree into a single script program plus one witness
//! recipe per spending branch: normalization rewrites the tree into a sum of
//! conjunctions, flattening lists the conjunctions, and the dispatcher below
//! stitches the branches' fragments together. The shape of the emitted
//! control flow depends only on the branch count:
//!
//! * one branch: the fragments concatenated, no dispatch at all;
//! * two branches: a plain `IF`/`ELSE`, selected by a witness boolean;
//! * three or more: a range-checked index cascade, selected by a witness
//!   index in `[0, n)`.

mod codegen;
pub mod flatten;
pub mod normalize;

pub use self::flatten::{flatten, Branch};
pub use self::normalize::{normalize, Normalized};

use bitcoin::opcodes::all::{
    OP_1SUB, OP_DUP, OP_ELSE, OP_ENDIF, OP_IF, OP_IFDUP, OP_NOTIF, OP_PUSHNUM_1, OP_VERIFY,
    OP_WITHIN,
};
use bitcoin::script::Builder;

use self::codegen::compile_literal;
use crate::clause::Clause;
use crate::error::Error;
use crate::witness::{WitnessItem, WitnessManager, WitnessTemplate};

/// Compiles a clause tree into a program and per-branch witness recipes.
///
/// All-or-nothing: any unbound required constant, unsatisfiable branch or
/// internal invariant violation fails the whole compilation.
pub fn compile(clause: &Clause) -> Result<WitnessManager, Error> {
    let normalized = normalize(clause)?;
    let branches = flatten(&normalized)?;
    match branches.len() {
        0 => Err(Error::NoSpendingPaths),
        1 => compile_single(&branches[0]),
        2 => compile_pair(&branches[0], &branches[1]),
        _ => compile_cascade(&branches),
    }
}

impl Clause {
    /// Compiles this tree; see [`compile`].
    pub fn compile(&self) -> Result<WitnessManager, Error> { compile(self) }
}

// A lone branch needs no dispatch. Fragments leave the stack bare, so the
// program ends on an explicit true.
fn compile_single(branch: &[Clause]) -> Result<WitnessManager, Error> {
    let mut witness = WitnessTemplate::new();
    let mut builder = Builder::new();
    for literal in branch {
        builder = compile_literal(literal, builder, &mut witness)?;
    }
    let program = builder.push_opcode(OP_PUSHNUM_1).into_script();
    Ok(WitnessManager::from_parts(program, vec![witness]))
}

// Two branches: branch 0 is the IF path, so its selector is 1 and branch 1's
// is 0 — inverted relative to the branch index.
fn compile_pair(first: &[Clause], second: &[Clause]) -> Result<WitnessManager, Error> {
    let mut wit0 = WitnessTemplate::new();
    let mut wit1 = WitnessTemplate::new();
    // Selectors register before the branch's own requirements so they end up
    // last in the recipe, i.e. on top of the witness stack.
    wit0.add(WitnessItem::constant_int(1));
    wit1.add(WitnessItem::constant_int(0));

    let mut builder = Builder::new().push_opcode(OP_IF);
    for literal in first {
        builder = compile_literal(literal, builder, &mut wit0)?;
    }
    builder = builder.push_opcode(OP_ELSE);
    for literal in second {
        builder = compile_literal(literal, builder, &mut wit1)?;
    }
    let program = builder
        .push_opcode(OP_ENDIF)
        .push_opcode(OP_PUSHNUM_1)
        .into_script();
    Ok(WitnessManager::from_parts(program, vec![wit0, wit1]))
}

// Three or more branches: the spender pushes their branch's index. The
// prologue verifies the index is in [0, n); each conditional block then
// tests the running index for zero, decrementing it once per block after
// the first. A taken non-final block leaves a zero behind so every later
// block is skipped as well.
fn compile_cascade(branches: &[Branch]) -> Result<WitnessManager, Error> {
    let mut builder = Builder::new()
        .push_opcode(OP_DUP)
        .push_int(0)
        .push_int(branches.len() as i64)
        .push_opcode(OP_WITHIN)
        .push_opcode(OP_VERIFY);

    let mut templates = Vec::with_capacity(branches.len());
    for (idx, branch) in branches.iter().enumerate() {
        let mut witness = WitnessTemplate::new();
        witness.add(WitnessItem::constant_int(idx as i64));
        if idx > 0 {
            builder = builder.push_opcode(OP_1SUB);
        }
        builder = builder.push_opcode(OP_IFDUP).push_opcode(OP_NOTIF);
        for literal in branch {
            builder = compile_literal(literal, builder, &mut witness)?;
        }
        if idx + 1 < branches.len() {
            builder = builder.push_int(0);
        }
        builder = builder.push_opcode(OP_ENDIF);
        templates.push(witness);
    }
    let program = builder.push_opcode(OP_PUSHNUM_1).into_script();
    Ok(WitnessManager::from_parts(program, templates))
}
