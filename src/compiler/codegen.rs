// SPDX-License-Identifier: CC0-1.0

//! Literal code generation
//!
//! Compiles one literal clause into a script fragment, registering whatever
//! the spender must push into the branch's witness template as a side
//! effect. A fragment consumes its inputs from the top of the stack and
//! leaves the stack bare (or a leftover comparison result), so a branch's
//! conjunction is realized by plain concatenation of its fragments.

use std::convert::TryFrom;

use bitcoin::hashes::{sha256, Hash as _};
use bitcoin::opcodes::all::{
    OP_CHECKSIGVERIFY, OP_CLTV, OP_CSV, OP_DROP, OP_EQUAL, OP_NOP4, OP_SHA256,
};
use bitcoin::script::{Builder, PushBytesBuf};
use bitcoin::PublicKey;

use crate::clause::{Clause, Variable};
use crate::error::Error;
use crate::timelock::TimeSpec;
use crate::witness::{WitnessItem, WitnessTemplate};

/// Appends the fragment for one literal to `builder`.
///
/// Only literals are compilable; an `And`/`Or` arriving here means the
/// normalizer or flattener failed to do its job.
pub(super) fn compile_literal(
    clause: &Clause,
    builder: Builder,
    witness: &mut WitnessTemplate,
) -> Result<Builder, Error> {
    match clause {
        // Trivially true: nothing to verify, nothing to supply.
        Clause::Satisfied => Ok(builder),
        Clause::Unsatisfiable => Err(Error::UnsatisfiableBranch),
        Clause::Variable(var) => push_bytes_slot(builder, var, witness),
        Clause::Signature(check) => {
            let builder = push_bytes_slot(builder, &check.signature, witness)?;
            let builder = push_key_slot(builder, &check.pubkey, witness);
            Ok(builder.push_opcode(OP_CHECKSIGVERIFY))
        }
        Clause::PreImage(check) => {
            let builder = push_bytes_slot(builder, &check.preimage, witness)?;
            let builder = builder.push_opcode(OP_SHA256);
            let builder = push_hash_slot(builder, &check.hash, witness);
            Ok(builder.push_opcode(OP_EQUAL))
        }
        Clause::TemplateCommit(check) => {
            let hash = check
                .hash
                .assigned_value()
                .copied()
                .ok_or_else(|| Error::UnboundTemplateHash(check.hash.name().to_owned()))?;
            witness.name(hash);
            Ok(builder
                .push_slice(hash.to_byte_array())
                // OP_NOP4 is OP_CHECKTEMPLATEVERIFY under BIP119
                .push_opcode(OP_NOP4)
                .push_opcode(OP_DROP))
        }
        Clause::TimeLock(var) => {
            let spec = var
                .assigned_value()
                .copied()
                .ok_or_else(|| Error::UnboundTimeLock(var.name().to_owned()))?;
            let builder = builder.push_int(i64::from(spec.to_consensus_u32()));
            let builder = match spec {
                TimeSpec::Absolute(_) => builder.push_opcode(OP_CLTV),
                TimeSpec::Relative(_) => builder.push_opcode(OP_CSV),
            };
            Ok(builder.push_opcode(OP_DROP))
        }
        Clause::And(..) | Clause::Or(..) => Err(Error::NotNormalized(clause.to_string())),
    }
}

// The three slot shapes below share one rule: a bound slot becomes an
// immediate push, an unbound slot becomes a witness placeholder and no code.

fn push_key_slot(
    builder: Builder,
    var: &Variable<PublicKey>,
    witness: &mut WitnessTemplate,
) -> Builder {
    match var.assigned_value() {
        Some(key) => builder.push_key(key),
        None => {
            witness.add(WitnessItem::Placeholder(var.name().to_owned()));
            builder
        }
    }
}

fn push_hash_slot(
    builder: Builder,
    var: &Variable<sha256::Hash>,
    witness: &mut WitnessTemplate,
) -> Builder {
    match var.assigned_value() {
        Some(hash) => builder.push_slice(hash.to_byte_array()),
        None => {
            witness.add(WitnessItem::Placeholder(var.name().to_owned()));
            builder
        }
    }
}

fn push_bytes_slot(
    builder: Builder,
    var: &Variable<Vec<u8>>,
    witness: &mut WitnessTemplate,
) -> Result<Builder, Error> {
    match var.assigned_value() {
        Some(bytes) => {
            let push = PushBytesBuf::try_from(bytes.clone())
                .map_err(|_| Error::OversizePush(var.name().to_owned()))?;
            Ok(builder.push_slice(push))
        }
        None => {
            witness.add(WitnessItem::Placeholder(var.name().to_owned()));
            Ok(builder)
        }
    }
}
